use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::DomainError;

/// Which listing the grid shows and where its data comes from
///
/// Popular and TopRated page through the remote catalog; Favorite reads the
/// local store in one shot. The Display/FromStr names are the stable values
/// written to the preference file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovieSortOrder {
    #[default]
    Popular,
    TopRated,
    Favorite,
}

impl MovieSortOrder {
    /// Favorites load exactly once per trigger; only the API-backed orders
    /// respond to scroll-driven pagination.
    pub fn is_paginated(self) -> bool {
        !matches!(self, MovieSortOrder::Favorite)
    }
}

impl fmt::Display for MovieSortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovieSortOrder::Popular => write!(f, "POPULAR"),
            MovieSortOrder::TopRated => write!(f, "TOP_RATED"),
            MovieSortOrder::Favorite => write!(f, "FAVORITE"),
        }
    }
}

impl FromStr for MovieSortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "POPULAR" => Ok(MovieSortOrder::Popular),
            "TOP_RATED" => Ok(MovieSortOrder::TopRated),
            "FAVORITE" => Ok(MovieSortOrder::Favorite),
            other => Err(DomainError::InvariantViolation(format!(
                "Unknown sort order: {}",
                other
            ))),
        }
    }
}
