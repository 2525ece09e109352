// src/events/mod.rs
//
// Internal Event System - Public API
//
// CRITICAL: EventHandler is INTERNAL and must NOT be exported

pub mod bus;
pub mod types;

// ============================================================================
// PUBLIC EXPORTS - Event Types and Bus Only
// ============================================================================

pub use types::DomainEvent;

pub use types::{
    // Favorites
    FavoriteAdded,
    FavoriteRemoved,
    // Listing
    MovieSelected,
    MoviesLoaded,
};

pub use bus::{EventBus, EventLogEntry};
