// src/application/commands/detail_commands.rs
//
// Detail Command Handlers
//
// RULES:
// - Accept plain parameters
// - Call sealed services
// - Return DTOs
// - Never contain business logic

use tracing::debug;

use crate::application::{dto::*, state::AppState};
use crate::domain::Movie;
use crate::error::{AppError, AppResult};

/// Full detail view for one movie: sections, genres, favorite status
pub async fn movie_detail(state: &AppState, movie_id: i64) -> AppResult<MovieDetailDto> {
    let movie = find_movie(state, movie_id).await?;
    let detail = state.detail_service.movie_detail(movie).await?;
    Ok(MovieDetailDto::from(detail))
}

/// Poster color theme for one movie, None when it has no poster
pub async fn poster_theme(state: &AppState, movie_id: i64) -> AppResult<Option<PosterThemeDto>> {
    let movie = find_movie(state, movie_id).await?;
    let theme = state.detail_service.poster_theme(&movie).await?;
    Ok(theme.map(PosterThemeDto::from))
}

/// Resolve a movie id against what the app can see: the favorites
/// store first, then the current grid (loading it if still empty).
pub(crate) async fn find_movie(state: &AppState, movie_id: i64) -> AppResult<Movie> {
    if let Some(movie) = state.favorite_service.get_favorite(movie_id)? {
        debug!("Movie {} resolved from favorites", movie_id);
        return Ok(movie);
    }

    let mut movies = state.listing_service.movies();
    if movies.is_empty() {
        state.listing_service.start();
        state.listing_service.await_load().await;
        movies = state.listing_service.movies();
    }

    movies
        .into_iter()
        .find(|m| m.id == movie_id)
        .ok_or(AppError::NotFound)
}
