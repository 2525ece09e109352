// src/integrations/mod.rs
//
// External Integrations Module

pub mod tmdb;

pub use tmdb::client::{CatalogSource, TmdbClient, DEFAULT_API_BASE_URL, DEFAULT_IMAGE_BASE_URL};
