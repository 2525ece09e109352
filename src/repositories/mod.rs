// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - Explicit SQL only

pub mod favorite_movie_repository;

pub use favorite_movie_repository::{FavoriteMovieRepository, SqliteFavoriteMovieRepository};
