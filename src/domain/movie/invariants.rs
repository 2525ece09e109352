use super::entity::Movie;
use crate::domain::{DomainError, DomainResult};

/// Validates all Movie invariants
/// These are the absolute rules that must hold before a movie is persisted
pub fn validate_movie(movie: &Movie) -> DomainResult<()> {
    validate_id(movie.id)?;
    validate_title(&movie.title)?;
    validate_vote_average(movie.vote_average)?;
    Ok(())
}

/// Catalog ids are strictly positive
fn validate_id(id: i64) -> DomainResult<()> {
    if id <= 0 {
        return Err(DomainError::InvariantViolation(format!(
            "Movie id must be positive, got {}",
            id
        )));
    }
    Ok(())
}

/// Title cannot be empty
fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Movie title cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Ratings live on the catalog's 0..=10 scale
fn validate_vote_average(vote_average: f64) -> DomainResult<()> {
    if !(0.0..=10.0).contains(&vote_average) {
        return Err(DomainError::InvariantViolation(format!(
            "Vote average {} outside 0..=10",
            vote_average
        )));
    }
    Ok(())
}

/// Listing pages are 1-based
pub fn validate_page(page: u32) -> DomainResult<()> {
    if page == 0 {
        return Err(DomainError::InvariantViolation(
            "Listing pages start at 1".to_string(),
        ));
    }
    Ok(())
}

/// Invariants that must hold true for the Movie domain:
///
/// 1. Identity (catalog id) is immutable and strictly positive
/// 2. Equality and hashing consider the id alone
/// 3. Title cannot be empty
/// 4. Vote average stays on the 0..=10 scale
/// 5. `genres` holds one entry per `genre_ids` entry after a single enrichment
/// 6. Trailers and reviews are transient detail data, never persisted
