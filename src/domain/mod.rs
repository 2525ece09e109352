// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod movie;
pub mod sort_order;
pub mod theme;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Movie Domain
pub use movie::{
    validate_movie, validate_page, Genre, Movie, MovieDetail, MovieReview, MovieTrailer,
};

// Sort Order
pub use sort_order::MovieSortOrder;

// Poster Theming
pub use theme::{average_color, brightness, PosterTheme, Rgb};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Cannot average an image with no pixels")]
    EmptyImage,
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
