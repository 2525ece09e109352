// src/application/commands/favorite_commands.rs
//
// Favorite Command Handlers
//
// RULES:
// - Accept plain parameters
// - Call sealed services
// - Return DTOs
// - Never contain business logic

use super::detail_commands::find_movie;
use crate::application::{dto::*, state::AppState};
use crate::error::AppResult;

/// Mark a movie as favorite and return it as stored
pub async fn add_favorite(state: &AppState, movie_id: i64) -> AppResult<MovieDto> {
    let movie = find_movie(state, movie_id).await?;
    state.favorite_service.add_favorite(&movie)?;
    Ok(MovieDto::from(movie))
}

/// Remove a movie from favorites
pub async fn remove_favorite(state: &AppState, movie_id: i64) -> AppResult<()> {
    state.favorite_service.remove_favorite(movie_id)
}

/// All favorites, most popular first
pub async fn list_favorites(state: &AppState) -> AppResult<Vec<MovieDto>> {
    let movies = state.favorite_service.list_favorites()?;
    Ok(movies.into_iter().map(MovieDto::from).collect())
}
