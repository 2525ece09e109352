// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod detail_service;
pub mod favorite_service;
pub mod listing_service;

#[cfg(test)]
mod listing_service_tests;

// Re-export all services and their types
pub use detail_service::DetailService;

pub use favorite_service::FavoriteService;

pub use listing_service::{
    ListingService,
    ListingSnapshot,
    ViewState,
};
