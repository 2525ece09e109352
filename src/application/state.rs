// src/application/state.rs

use std::sync::Arc;

use crate::events::EventBus;
use crate::services::{DetailService, FavoriteService, ListingService};

/// Application state shared by every command.
/// All fields are Arc-wrapped for thread-safe sharing across commands.
/// Services are initialized in main.rs and passed here.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub listing_service: Arc<ListingService>,
    pub favorite_service: Arc<FavoriteService>,
    pub detail_service: Arc<DetailService>,
}
