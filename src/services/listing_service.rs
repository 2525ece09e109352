// src/services/listing_service.rs
//
// Listing Controller - the stateful heart of the browsing grid
//
// RESPONSIBILITIES:
// - Load ranked pages from the catalog, or the whole favorites set
// - Append pagination pages, replace the list on order switches
// - Decide between Loaded and Offline when results arrive
// - Discard results from loads that were superseded mid-flight
//
// CRITICAL RULES:
// - One load in flight at a time; starting a new one aborts the old one
// - Every load carries a generation token; only the newest generation
//   may touch the grid
// - A failed fetch and an empty page look identical here; the
//   connectivity probe is what tells "no results" apart from "offline"
// - State changes happen on the caller's context, never on the worker

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::{Movie, MovieSortOrder};
use crate::error::AppResult;
use crate::events::{EventBus, MoviesLoaded};
use crate::infrastructure::{ConnectivityProbe, PreferenceStore};
use crate::integrations::CatalogSource;
use crate::repositories::FavoriteMovieRepository;

/// What the grid is showing right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing requested yet
    Idle,
    /// A fresh (non-pagination) load is running
    Loading,
    /// Results are on screen, possibly zero of them
    Loaded,
    /// The last load came back empty with no network available
    Offline,
}

impl std::fmt::Display for ViewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ViewState::Idle => "IDLE",
            ViewState::Loading => "LOADING",
            ViewState::Loaded => "LOADED",
            ViewState::Offline => "OFFLINE",
        };
        write!(f, "{}", s)
    }
}

/// Everything needed to rebuild the grid after a frontend restart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingSnapshot {
    pub order: MovieSortOrder,
    pub page: u32,
    pub movies: Vec<Movie>,
    pub scroll_position: usize,
}

/// What a fetch worker reports back
struct LoadOutcome {
    generation: u64,
    page: u32,
    movies: Vec<Movie>,
}

struct ListingState {
    /// Order the user currently wants
    order: MovieSortOrder,
    /// Order of the last load whose results were applied
    loaded_order: Option<MovieSortOrder>,
    /// Page of the last applied load (API-backed orders only)
    page: u32,
    movies: Vec<Movie>,
    view: ViewState,
    scroll_position: usize,
    /// Token of the newest load; anything older is stale
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
}

pub struct ListingService {
    catalog: Arc<dyn CatalogSource>,
    favorite_repo: Arc<dyn FavoriteMovieRepository>,
    connectivity: Arc<dyn ConnectivityProbe>,
    preferences: Arc<PreferenceStore>,
    event_bus: Arc<EventBus>,
    state: Mutex<ListingState>,
    outcome_tx: UnboundedSender<LoadOutcome>,
    outcome_rx: tokio::sync::Mutex<UnboundedReceiver<LoadOutcome>>,
}

impl ListingService {
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        favorite_repo: Arc<dyn FavoriteMovieRepository>,
        connectivity: Arc<dyn ConnectivityProbe>,
        preferences: Arc<PreferenceStore>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        let initial_order = preferences.sort_order();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        Self {
            catalog,
            favorite_repo,
            connectivity,
            preferences,
            event_bus,
            state: Mutex::new(ListingState {
                order: initial_order,
                loaded_order: None,
                page: 1,
                movies: Vec::new(),
                view: ViewState::Idle,
                scroll_position: 0,
                generation: 0,
                in_flight: None,
            }),
            outcome_tx,
            outcome_rx: tokio::sync::Mutex::new(outcome_rx),
        }
    }

    /// Kick off the first load using the persisted sort order
    pub fn start(&self) {
        let order = self.current_order();
        self.spawn_load(order, 1, true);
    }

    /// Switch sort order: persist the choice, then start a fresh page-1 load
    pub fn set_sort_order(&self, order: MovieSortOrder) -> AppResult<()> {
        self.preferences.set_sort_order(order)?;

        {
            let mut state = self.state.lock().unwrap();
            state.order = order;
        }

        self.spawn_load(order, 1, true);
        Ok(())
    }

    /// Ask for the next page as the grid nears its end
    ///
    /// Returns whether a load was started. FAVORITE never paginates, and a
    /// load already in flight is never doubled up.
    pub fn on_scroll_near_end(&self) -> bool {
        let (order, next_page) = {
            let state = self.state.lock().unwrap();

            if !state.order.is_paginated() {
                return false;
            }
            if state.in_flight.is_some() {
                return false;
            }

            (state.order, state.page + 1)
        };

        // Pagination keeps the current results on screen, so no blocking
        // indicator for this one
        self.spawn_load(order, next_page, false);
        true
    }

    /// Drive the pending load (if any) to completion and report the view
    ///
    /// Loops because a superseded load may leave a stale outcome in the
    /// channel ahead of the one being waited for.
    pub async fn await_load(&self) -> ViewState {
        loop {
            let handle = {
                let mut state = self.state.lock().unwrap();
                match state.in_flight.take() {
                    Some(handle) => handle,
                    None => return state.view,
                }
            };

            if let Err(e) = handle.await {
                // A worker panic (corrupt catalog data) must not turn into
                // an endless wait on a send that never comes
                if e.is_panic() {
                    std::panic::resume_unwind(e.into_panic());
                }
            }

            // The worker has finished or been cancelled, so everything it
            // sent is already queued
            let mut rx = self.outcome_rx.lock().await;
            while let Ok(outcome) = rx.try_recv() {
                self.apply(outcome);
            }
        }
    }

    /// Movies currently on the grid
    pub fn movies(&self) -> Vec<Movie> {
        self.state.lock().unwrap().movies.clone()
    }

    pub fn view_state(&self) -> ViewState {
        self.state.lock().unwrap().view
    }

    pub fn current_order(&self) -> MovieSortOrder {
        self.state.lock().unwrap().order
    }

    /// Remember how far down the grid the user has scrolled
    pub fn set_scroll_position(&self, position: usize) {
        self.state.lock().unwrap().scroll_position = position;
    }

    pub fn scroll_position(&self) -> usize {
        self.state.lock().unwrap().scroll_position
    }

    /// Capture everything needed to rebuild this grid later
    pub fn snapshot(&self) -> ListingSnapshot {
        let state = self.state.lock().unwrap();
        ListingSnapshot {
            order: state.order,
            page: state.page,
            movies: state.movies.clone(),
            scroll_position: state.scroll_position,
        }
    }

    /// Rebuild the grid from a snapshot without refetching
    ///
    /// Runs through the same arrival path as a live load, so the offline
    /// decision and the MoviesLoaded event fire exactly as they would for
    /// a fetch.
    pub fn restore(&self, snapshot: ListingSnapshot) {
        let generation = {
            let mut state = self.state.lock().unwrap();

            if let Some(handle) = state.in_flight.take() {
                handle.abort();
            }

            state.generation += 1;
            state.order = snapshot.order;
            state.loaded_order = None;
            state.generation
        };

        self.apply(LoadOutcome {
            generation,
            page: snapshot.page,
            movies: snapshot.movies,
        });

        // Applying a fresh result rewinds the scroll; put it back where
        // the snapshot had it
        self.state.lock().unwrap().scroll_position = snapshot.scroll_position;
    }

    /// Abort any in-flight load and wait for its worker to wind down
    pub async fn shutdown(&self) {
        let handle = { self.state.lock().unwrap().in_flight.take() };

        if let Some(handle) = handle {
            handle.abort();
            let _ = handle.await;
        }
    }

    // ========================================================================
    // INTERNAL: Load Execution
    // ========================================================================

    /// Start an asynchronous load, cancelling whatever was in flight
    fn spawn_load(&self, order: MovieSortOrder, page: u32, show_indicator: bool) {
        let mut state = self.state.lock().unwrap();

        if let Some(handle) = state.in_flight.take() {
            debug!("Superseding in-flight load");
            handle.abort();
        }

        state.generation += 1;
        if show_indicator {
            state.view = ViewState::Loading;
        }
        let generation = state.generation;

        let catalog = Arc::clone(&self.catalog);
        let favorite_repo = Arc::clone(&self.favorite_repo);
        let tx = self.outcome_tx.clone();

        let handle = tokio::spawn(async move {
            let result = match order {
                MovieSortOrder::Popular => catalog.popular_movies(page).await,
                MovieSortOrder::TopRated => catalog.top_rated_movies(page).await,
                MovieSortOrder::Favorite => favorite_repo.list_all(),
            };

            // Failures collapse into an empty result on purpose; the
            // offline probe at arrival is the only disambiguation
            let movies = result.unwrap_or_else(|e| {
                warn!("Load failed for {} page {}: {}", order, page, e);
                Vec::new()
            });

            let _ = tx.send(LoadOutcome {
                generation,
                page,
                movies,
            });
        });

        state.in_flight = Some(handle);
    }

    /// Apply one load outcome to the grid
    ///
    /// Arrival-time rules, in order:
    /// 1. Outcomes from superseded loads are dropped untouched.
    /// 2. Results replace the list when the wanted order differs from the
    ///    order of the last applied load, or when the order is FAVORITE;
    ///    otherwise they append as the next page.
    /// 3. An empty arrival with no network shows Offline; everything else
    ///    shows Loaded. The list mutation above happens either way.
    fn apply(&self, outcome: LoadOutcome) {
        let order_name;
        let page;
        let count;
        let fresh;
        {
            let mut state = self.state.lock().unwrap();

            if outcome.generation != state.generation {
                debug!(
                    "Discarding stale load result (generation {} != {})",
                    outcome.generation, state.generation
                );
                return;
            }

            let offline = outcome.movies.is_empty() && !self.connectivity.is_online();

            fresh = state.order == MovieSortOrder::Favorite
                || state.loaded_order != Some(state.order);

            if fresh {
                state.movies = outcome.movies;
                state.scroll_position = 0;
            } else {
                state.movies.extend(outcome.movies);
            }

            state.page = outcome.page;
            state.loaded_order = Some(state.order);
            state.view = if offline {
                ViewState::Offline
            } else {
                ViewState::Loaded
            };

            order_name = state.order.to_string();
            page = outcome.page;
            count = state.movies.len();
        }

        // Emit outside the state lock; handlers may call back into us
        self.event_bus
            .emit(MoviesLoaded::new(order_name, page, count, fresh));
    }
}
