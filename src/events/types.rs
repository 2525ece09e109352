// events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// LISTING EVENTS
// ============================================================================

/// Emitted whenever a load completes and its results are applied to the grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoviesLoaded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub order: String, // "POPULAR", "TOP_RATED", "FAVORITE"
    pub page: u32,
    pub count: usize,
    /// True when the results replaced the list, false for a pagination append
    pub fresh: bool,
}

impl MoviesLoaded {
    pub fn new(order: String, page: u32, count: usize, fresh: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            order,
            page,
            count,
            fresh,
        }
    }
}

impl DomainEvent for MoviesLoaded {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "MoviesLoaded"
    }
}

/// Emitted when a movie is picked from the grid to open its detail view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieSelected {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: i64,
    pub title: String,
}

impl MovieSelected {
    pub fn new(movie_id: i64, title: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
            title,
        }
    }
}

impl DomainEvent for MovieSelected {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "MovieSelected"
    }
}

// ============================================================================
// FAVORITE EVENTS
// ============================================================================

/// Emitted when a movie is stored as a local favorite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteAdded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: i64,
    pub title: String,
}

impl FavoriteAdded {
    pub fn new(movie_id: i64, title: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
            title,
        }
    }
}

impl DomainEvent for FavoriteAdded {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "FavoriteAdded"
    }
}

/// Emitted when a movie is removed from the local favorites
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteRemoved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: i64,
    pub title: String,
}

impl FavoriteRemoved {
    pub fn new(movie_id: i64, title: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
            title,
        }
    }
}

impl DomainEvent for FavoriteRemoved {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "FavoriteRemoved"
    }
}
