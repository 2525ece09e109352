// src/services/favorite_service.rs
use crate::domain::movie::{validate_movie, Movie};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, FavoriteAdded, FavoriteRemoved};
use crate::repositories::FavoriteMovieRepository;
use std::sync::Arc;

pub struct FavoriteService {
    favorite_repo: Arc<dyn FavoriteMovieRepository>,
    event_bus: Arc<EventBus>,
}

impl FavoriteService {
    pub fn new(favorite_repo: Arc<dyn FavoriteMovieRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            favorite_repo,
            event_bus,
        }
    }

    /// Store a movie as a local favorite
    ///
    /// Saving the same movie again refreshes its stored listing data.
    pub fn add_favorite(&self, movie: &Movie) -> AppResult<()> {
        validate_movie(movie).map_err(AppError::Domain)?;
        self.favorite_repo.save(movie)?;

        self.event_bus
            .emit(FavoriteAdded::new(movie.id, movie.title.clone()));

        Ok(())
    }

    /// Remove a movie from the local favorites
    pub fn remove_favorite(&self, movie_id: i64) -> AppResult<()> {
        let movie = self
            .favorite_repo
            .get_by_id(movie_id)?
            .ok_or(AppError::NotFound)?;

        self.favorite_repo.delete(movie_id)?;

        self.event_bus
            .emit(FavoriteRemoved::new(movie_id, movie.title));

        Ok(())
    }

    /// Flip favorite status; returns the status after the call
    pub fn toggle_favorite(&self, movie: &Movie) -> AppResult<bool> {
        if self.favorite_repo.exists(movie.id)? {
            self.remove_favorite(movie.id)?;
            Ok(false)
        } else {
            self.add_favorite(movie)?;
            Ok(true)
        }
    }

    pub fn is_favorite(&self, movie_id: i64) -> AppResult<bool> {
        self.favorite_repo.exists(movie_id)
    }

    /// One favorite by id, as stored
    pub fn get_favorite(&self, movie_id: i64) -> AppResult<Option<Movie>> {
        self.favorite_repo.get_by_id(movie_id)
    }

    /// All favorites, most popular first
    pub fn list_favorites(&self) -> AppResult<Vec<Movie>> {
        self.favorite_repo.list_all()
    }
}
