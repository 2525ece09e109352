// src/lib.rs
// CineGrid - Movie catalog browser with local favorites
//
// Architecture:
// - Domain-centric: All business logic lives in domains (SEALED)
// - Event-driven: Services coordinate through events (SEALED)
// - Explicit: No implicit behavior, no magic
// - Local-first: Favorites and preferences live on the user's disk
// - Application Layer: UI boundary

// ============================================================================
// SEALED FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain Entities (Sealed)
// ============================================================================

pub use domain::{
    average_color,
    brightness,
    validate_movie,
    validate_page,
    // Movie
    Genre,
    Movie,
    MovieDetail,
    MovieReview,
    // Sort Order
    MovieSortOrder,
    MovieTrailer,
    // Poster Theming
    PosterTheme,
    Rgb,
};

// ============================================================================
// PUBLIC API - Error Types (Sealed)
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events (Sealed)
// ============================================================================

pub use events::{
    DomainEvent,
    EventBus,
    EventLogEntry,
    // Favorite events
    FavoriteAdded,
    FavoriteRemoved,
    // Listing events
    MovieSelected,
    MoviesLoaded,
};

// ============================================================================
// PUBLIC API - Database (Sealed)
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories (Sealed)
// ============================================================================

pub use repositories::{FavoriteMovieRepository, SqliteFavoriteMovieRepository};

// ============================================================================
// PUBLIC API - Infrastructure (Sealed)
// ============================================================================

pub use infrastructure::{ConnectivityProbe, PosterCache, PreferenceStore, TcpConnectivityProbe};

// ============================================================================
// PUBLIC API - Services (Sealed)
// ============================================================================

pub use services::{
    // Detail Service
    DetailService,
    // Favorite Service
    FavoriteService,
    // Listing Service
    ListingService,
    ListingSnapshot,
    ViewState,
};

// ============================================================================
// PUBLIC API - Configuration
// ============================================================================

pub use config::{load_config, AppConfig};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;

// Re-export application submodules
pub use application::commands;
pub use application::dto;

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{CatalogSource, TmdbClient};
