// src/application/commands/listing_commands.rs
//
// Listing Command Handlers
//
// RULES:
// - Accept plain parameters
// - Call sealed services
// - Return DTOs
// - Never contain business logic

use crate::application::{dto::*, state::AppState};
use crate::domain::MovieSortOrder;
use crate::error::AppResult;

/// Load the grid under the given order (or the persisted one) and walk
/// `pages` pages of it, then report what the grid is showing.
pub async fn browse_movies(
    state: &AppState,
    order: Option<MovieSortOrder>,
    pages: u32,
) -> AppResult<ListingViewDto> {
    match order {
        Some(order) => state.listing_service.set_sort_order(order)?,
        None => state.listing_service.start(),
    }
    state.listing_service.await_load().await;

    // Page 1 is already in; each further page goes through the same
    // scroll path the UI uses, which no-ops for unpaginated orders.
    for _ in 1..pages {
        if !state.listing_service.on_scroll_near_end() {
            break;
        }
        state.listing_service.await_load().await;
    }

    Ok(listing_view(state))
}

/// Current grid state without triggering any load
pub fn listing_view(state: &AppState) -> ListingViewDto {
    let snapshot = state.listing_service.snapshot();
    ListingViewDto {
        order: snapshot.order.to_string(),
        view: state.listing_service.view_state().to_string(),
        page: snapshot.page,
        movies: snapshot.movies.into_iter().map(MovieDto::from).collect(),
    }
}
