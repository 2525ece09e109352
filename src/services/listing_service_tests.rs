// src/services/listing_service_tests.rs
//
// UNIT TESTS: Listing Controller Behavior
//
// PURPOSE:
// - Prove pagination appends pages in arrival order
// - Prove an order switch replaces the list and resets pagination
// - Prove the offline decision happens at arrival time
// - Prove superseded loads never touch the grid
//
// INVARIANTS TESTED:
// - FAVORITE never paginates
// - Empty-with-connectivity is Loaded, empty-without is Offline
// - A failed fetch is outwardly identical to an empty page
// - Snapshot restore rebuilds the grid without refetching

#[cfg(test)]
mod grid_behavior_tests {
    use crate::db::{create_connection_pool_at, initialize_database};
    use crate::domain::{Movie, MovieSortOrder};
    use crate::error::AppError;
    use crate::events::EventBus;
    use crate::infrastructure::connectivity::MockConnectivityProbe;
    use crate::infrastructure::PreferenceStore;
    use crate::integrations::tmdb::client::MockCatalogSource;
    use crate::repositories::{FavoriteMovieRepository, SqliteFavoriteMovieRepository};
    use crate::services::listing_service::{ListingService, ListingSnapshot, ViewState};
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    fn sample_movie(id: i64) -> Movie {
        let mut movie = Movie::new(id, format!("Movie {}", id));
        movie.vote_average = 7.0;
        movie.popularity = 1000.0 - id as f64;
        movie
    }

    /// Four movies per page; page 1 of base 1 is ids 1..=4, page 2 is 5..=8
    fn ranked_page(base: i64, page: u32) -> Vec<Movie> {
        let start = base + i64::from(page - 1) * 4;
        (start..start + 4).map(sample_movie).collect()
    }

    fn local_stores(
        dir: &TempDir,
    ) -> (
        Arc<SqliteFavoriteMovieRepository>,
        Arc<PreferenceStore>,
        Arc<EventBus>,
    ) {
        let pool = create_connection_pool_at(dir.path().join("test.db")).unwrap();
        {
            let conn = pool.get().unwrap();
            initialize_database(&conn).unwrap();
        }

        let repo = Arc::new(SqliteFavoriteMovieRepository::new(Arc::new(pool)));
        let prefs = Arc::new(PreferenceStore::at_path(dir.path().join("preferences.json")));
        let bus = Arc::new(EventBus::new());

        (repo, prefs, bus)
    }

    fn online() -> MockConnectivityProbe {
        let mut probe = MockConnectivityProbe::new();
        probe.expect_is_online().returning(|| true);
        probe
    }

    fn offline() -> MockConnectivityProbe {
        let mut probe = MockConnectivityProbe::new();
        probe.expect_is_online().returning(|| false);
        probe
    }

    fn popular_catalog() -> MockCatalogSource {
        let mut catalog = MockCatalogSource::new();
        catalog
            .expect_popular_movies()
            .returning(|page| Ok(ranked_page(1, page)));
        catalog
    }

    /// The persisted preference decides what the first load fetches
    #[tokio::test]
    async fn test_first_load_uses_persisted_order() {
        let dir = TempDir::new().unwrap();
        let (repo, prefs, bus) = local_stores(&dir);
        prefs.set_sort_order(MovieSortOrder::TopRated).unwrap();

        let mut catalog = MockCatalogSource::new();
        catalog
            .expect_top_rated_movies()
            .returning(|page| Ok(ranked_page(101, page)));

        let service = ListingService::new(
            Arc::new(catalog),
            repo,
            Arc::new(online()),
            prefs,
            Arc::clone(&bus),
        );

        assert_eq!(service.current_order(), MovieSortOrder::TopRated);
        assert_eq!(service.view_state(), ViewState::Idle);

        service.start();
        let view = service.await_load().await;

        assert_eq!(view, ViewState::Loaded);
        let ids: Vec<i64> = service.movies().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![101, 102, 103, 104]);

        let log = bus.get_event_log();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].event_type, "MoviesLoaded");
    }

    /// Scrolling to the end fetches the next page and appends it
    #[tokio::test]
    async fn test_pagination_appends_pages_in_order() {
        let dir = TempDir::new().unwrap();
        let (repo, prefs, bus) = local_stores(&dir);

        let service = ListingService::new(
            Arc::new(popular_catalog()),
            repo,
            Arc::new(online()),
            prefs,
            bus,
        );

        service.start();
        service.await_load().await;
        assert_eq!(service.movies().len(), 4);

        assert!(service.on_scroll_near_end());
        service.await_load().await;

        let ids: Vec<i64> = service.movies().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(service.snapshot().page, 2);
    }

    /// A fresh load blocks the grid behind an indicator; pagination does not
    #[tokio::test]
    async fn test_pagination_suppresses_loading_indicator() {
        let dir = TempDir::new().unwrap();
        let (repo, prefs, bus) = local_stores(&dir);

        let service = ListingService::new(
            Arc::new(popular_catalog()),
            repo,
            Arc::new(online()),
            prefs,
            bus,
        );

        service.start();
        assert_eq!(service.view_state(), ViewState::Loading);
        service.await_load().await;

        assert!(service.on_scroll_near_end());
        // The grid keeps its current results while the next page loads
        assert_eq!(service.view_state(), ViewState::Loaded);
        service.await_load().await;

        assert_eq!(service.movies().len(), 8);
    }

    /// Changing order replaces the list instead of appending to it
    #[tokio::test]
    async fn test_order_switch_replaces_list_and_resets_page() {
        let dir = TempDir::new().unwrap();
        let (repo, prefs, bus) = local_stores(&dir);

        let mut catalog = MockCatalogSource::new();
        catalog
            .expect_popular_movies()
            .returning(|page| Ok(ranked_page(1, page)));
        catalog
            .expect_top_rated_movies()
            .returning(|page| Ok(ranked_page(101, page)));

        let service = ListingService::new(
            Arc::new(catalog),
            repo,
            Arc::new(online()),
            Arc::clone(&prefs),
            bus,
        );

        service.start();
        service.await_load().await;
        assert!(service.on_scroll_near_end());
        service.await_load().await;
        assert_eq!(service.snapshot().page, 2);

        service.set_sort_order(MovieSortOrder::TopRated).unwrap();
        service.await_load().await;

        let ids: Vec<i64> = service.movies().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![101, 102, 103, 104]);
        assert_eq!(service.snapshot().page, 1);

        // The choice is persisted for the next run
        assert_eq!(prefs.sort_order(), MovieSortOrder::TopRated);
    }

    /// Empty result with connectivity present is an ordinary empty grid
    #[tokio::test]
    async fn test_empty_result_online_is_loaded() {
        let dir = TempDir::new().unwrap();
        let (repo, prefs, bus) = local_stores(&dir);

        let mut catalog = MockCatalogSource::new();
        catalog.expect_popular_movies().returning(|_| Ok(Vec::new()));

        let service = ListingService::new(
            Arc::new(catalog),
            repo,
            Arc::new(online()),
            prefs,
            bus,
        );

        service.start();
        assert_eq!(service.await_load().await, ViewState::Loaded);
        assert!(service.movies().is_empty());
    }

    /// Empty result without connectivity flips the view to Offline
    #[tokio::test]
    async fn test_empty_result_offline_is_offline() {
        let dir = TempDir::new().unwrap();
        let (repo, prefs, bus) = local_stores(&dir);

        let mut catalog = MockCatalogSource::new();
        catalog.expect_popular_movies().returning(|_| Ok(Vec::new()));

        let service = ListingService::new(
            Arc::new(catalog),
            repo,
            Arc::new(offline()),
            prefs,
            bus,
        );

        service.start();
        assert_eq!(service.await_load().await, ViewState::Offline);
    }

    /// A fetch failure collapses into an empty page; only the probe
    /// distinguishes the two
    #[tokio::test]
    async fn test_fetch_failure_looks_like_empty_page() {
        let dir = TempDir::new().unwrap();
        let (repo, prefs, bus) = local_stores(&dir);

        let mut catalog = MockCatalogSource::new();
        catalog
            .expect_popular_movies()
            .returning(|_| Err(AppError::Other("catalog unreachable".to_string())));

        let service = ListingService::new(
            Arc::new(catalog),
            repo,
            Arc::new(offline()),
            prefs,
            bus,
        );

        service.start();
        assert_eq!(service.await_load().await, ViewState::Offline);
        assert!(service.movies().is_empty());
    }

    /// FAVORITE reads the local store, reloads whole, and never paginates
    #[tokio::test]
    async fn test_favorite_order_reads_local_store_without_pagination() {
        let dir = TempDir::new().unwrap();
        let (repo, prefs, bus) = local_stores(&dir);

        repo.save(&sample_movie(603)).unwrap();
        repo.save(&sample_movie(129)).unwrap();

        let service = ListingService::new(
            Arc::new(MockCatalogSource::new()),
            Arc::clone(&repo) as Arc<dyn FavoriteMovieRepository>,
            Arc::new(online()),
            prefs,
            bus,
        );

        service.set_sort_order(MovieSortOrder::Favorite).unwrap();
        assert_eq!(service.await_load().await, ViewState::Loaded);
        assert_eq!(service.movies().len(), 2);

        assert!(!service.on_scroll_near_end());

        // A favorite added later shows up on the next full reload,
        // replacing rather than appending
        repo.save(&sample_movie(550)).unwrap();
        service.set_sort_order(MovieSortOrder::Favorite).unwrap();
        service.await_load().await;
        assert_eq!(service.movies().len(), 3);
    }

    /// Results of a superseded load are discarded even when they arrive
    #[tokio::test]
    async fn test_superseded_load_never_touches_the_grid() {
        let dir = TempDir::new().unwrap();
        let (repo, prefs, bus) = local_stores(&dir);

        let mut catalog = MockCatalogSource::new();
        catalog
            .expect_popular_movies()
            .returning(|page| Ok(ranked_page(1, page)));
        catalog
            .expect_top_rated_movies()
            .returning(|page| Ok(ranked_page(101, page)));

        let service = ListingService::new(
            Arc::new(catalog),
            repo,
            Arc::new(online()),
            prefs,
            Arc::clone(&bus),
        );

        service.start();
        // Let the first worker finish and queue its outcome
        tokio::time::sleep(Duration::from_millis(10)).await;

        service.set_sort_order(MovieSortOrder::TopRated).unwrap();
        service.await_load().await;

        let ids: Vec<i64> = service.movies().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![101, 102, 103, 104]);

        // The superseded outcome produced no event either
        let loads: Vec<_> = bus
            .get_event_log()
            .into_iter()
            .filter(|e| e.event_type == "MoviesLoaded")
            .collect();
        assert_eq!(loads.len(), 1);
    }

    /// Scroll triggers are ignored while a load is already pending
    #[tokio::test]
    async fn test_scroll_is_ignored_while_load_pending() {
        let dir = TempDir::new().unwrap();
        let (repo, prefs, bus) = local_stores(&dir);

        let service = ListingService::new(
            Arc::new(popular_catalog()),
            repo,
            Arc::new(online()),
            prefs,
            bus,
        );

        service.start();
        assert!(!service.on_scroll_near_end());

        service.await_load().await;
        assert!(service.on_scroll_near_end());
        service.await_load().await;
        assert_eq!(service.movies().len(), 8);
    }

    /// A snapshot rebuilds the grid bit-for-bit without refetching
    #[tokio::test]
    async fn test_snapshot_restores_grid_without_refetching() {
        let dir = TempDir::new().unwrap();
        let (repo, prefs, bus) = local_stores(&dir);

        let service = ListingService::new(
            Arc::new(popular_catalog()),
            Arc::clone(&repo) as Arc<dyn FavoriteMovieRepository>,
            Arc::new(online()),
            Arc::clone(&prefs),
            bus,
        );

        service.start();
        service.await_load().await;
        service.set_scroll_position(3);

        let snapshot = service.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: ListingSnapshot = serde_json::from_str(&json).unwrap();

        // A catalog with no expectations panics if anything fetches
        let dir2 = TempDir::new().unwrap();
        let (_, prefs2, bus2) = local_stores(&dir2);
        let rebuilt = ListingService::new(
            Arc::new(MockCatalogSource::new()),
            repo,
            Arc::new(online()),
            prefs2,
            bus2,
        );

        rebuilt.restore(restored);

        assert_eq!(rebuilt.view_state(), ViewState::Loaded);
        assert_eq!(rebuilt.current_order(), MovieSortOrder::Popular);
        assert_eq!(rebuilt.scroll_position(), 3);
        let ids: Vec<i64> = rebuilt.movies().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(rebuilt.snapshot().page, 1);
    }

    /// Restoring an empty grid with no network shows the offline view
    #[tokio::test]
    async fn test_restore_of_empty_snapshot_offline_is_offline() {
        let dir = TempDir::new().unwrap();
        let (repo, prefs, bus) = local_stores(&dir);

        let service = ListingService::new(
            Arc::new(MockCatalogSource::new()),
            repo,
            Arc::new(offline()),
            prefs,
            bus,
        );

        service.restore(ListingSnapshot {
            order: MovieSortOrder::Popular,
            page: 1,
            movies: Vec::new(),
            scroll_position: 0,
        });

        assert_eq!(service.view_state(), ViewState::Offline);
    }

    /// Shutdown cancels the in-flight worker and leaves the grid untouched
    #[tokio::test]
    async fn test_shutdown_aborts_in_flight_load() {
        let dir = TempDir::new().unwrap();
        let (repo, prefs, bus) = local_stores(&dir);

        let service = ListingService::new(
            Arc::new(popular_catalog()),
            repo,
            Arc::new(online()),
            prefs,
            Arc::clone(&bus),
        );

        service.start();
        service.shutdown().await;

        // await_load has nothing left to wait for
        service.await_load().await;
        assert!(service.movies().is_empty());
        assert!(bus.get_event_log().is_empty());
    }
}
