// src/services/detail_service.rs
use crate::domain::{Movie, MovieDetail, PosterTheme};
use crate::error::AppResult;
use crate::events::{EventBus, MovieSelected};
use crate::infrastructure::PosterCache;
use crate::integrations::CatalogSource;
use crate::repositories::FavoriteMovieRepository;
use std::sync::Arc;
use tracing::warn;

pub struct DetailService {
    catalog: Arc<dyn CatalogSource>,
    favorite_repo: Arc<dyn FavoriteMovieRepository>,
    poster_cache: Arc<PosterCache>,
    event_bus: Arc<EventBus>,
}

impl DetailService {
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        favorite_repo: Arc<dyn FavoriteMovieRepository>,
        poster_cache: Arc<PosterCache>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            catalog,
            favorite_repo,
            poster_cache,
            event_bus,
        }
    }

    /// Assemble the full detail view for a movie picked from the grid
    ///
    /// Trailer and review fetches fail independently: a dead section shows
    /// up empty instead of taking the whole detail view down with it.
    pub async fn movie_detail(&self, mut movie: Movie) -> AppResult<MovieDetail> {
        self.event_bus
            .emit(MovieSelected::new(movie.id, movie.title.clone()));

        // Favorites come off disk without genres; resolve them here when
        // the genre table is reachable
        if movie.genres.is_empty() && !movie.genre_ids.is_empty() {
            match self.catalog.genre_map().await {
                Ok(genre_map) => movie.enrich(&genre_map),
                Err(e) => warn!("Genre table unavailable, showing raw ids: {}", e),
            }
        }

        movie.trailers = match self.catalog.movie_trailers(movie.id).await {
            Ok(trailers) => trailers,
            Err(e) => {
                warn!("Trailers unavailable for movie {}: {}", movie.id, e);
                Vec::new()
            }
        };

        movie.reviews = match self.catalog.movie_reviews(movie.id).await {
            Ok(reviews) => reviews,
            Err(e) => {
                warn!("Reviews unavailable for movie {}: {}", movie.id, e);
                Vec::new()
            }
        };

        let is_favorite = self.favorite_repo.exists(movie.id)?;

        Ok(MovieDetail { movie, is_favorite })
    }

    /// Theme derived from the movie's poster, None when there is no poster
    ///
    /// The poster is served from the on-disk cache when present, so this
    /// works offline for anything viewed before.
    pub async fn poster_theme(&self, movie: &Movie) -> AppResult<Option<PosterTheme>> {
        let Some(path) = movie.poster_path.as_deref() else {
            return Ok(None);
        };

        let url = self.catalog.poster_url(path);
        let bytes = self.poster_cache.fetch(&url).await?;
        let image = image::load_from_memory(&bytes)?;

        Ok(Some(PosterTheme::from_image(&image)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_connection_pool_at, initialize_database};
    use crate::domain::{Genre, MovieTrailer, Rgb};
    use crate::error::AppError;
    use crate::integrations::tmdb::client::MockCatalogSource;
    use crate::repositories::SqliteFavoriteMovieRepository;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn test_fixtures(dir: &TempDir) -> (Arc<SqliteFavoriteMovieRepository>, Arc<PosterCache>, Arc<EventBus>) {
        let pool = create_connection_pool_at(dir.path().join("test.db")).unwrap();
        {
            let conn = pool.get().unwrap();
            initialize_database(&conn).unwrap();
        }

        let repo = Arc::new(SqliteFavoriteMovieRepository::new(Arc::new(pool)));
        let cache = Arc::new(PosterCache::at_dir(dir.path().join("posters")).unwrap());
        let bus = Arc::new(EventBus::new());

        (repo, cache, bus)
    }

    fn sample_movie(id: i64, title: &str) -> Movie {
        let mut movie = Movie::new(id, title.to_string());
        movie.vote_average = 7.5;
        movie.popularity = 10.0;
        movie
    }

    #[tokio::test]
    async fn test_detail_survives_dead_trailer_and_review_endpoints() {
        let dir = TempDir::new().unwrap();
        let (repo, cache, bus) = test_fixtures(&dir);

        let mut catalog = MockCatalogSource::new();
        catalog
            .expect_movie_trailers()
            .returning(|_| Err(AppError::Other("videos endpoint down".to_string())));
        catalog
            .expect_movie_reviews()
            .returning(|_| Err(AppError::Other("reviews endpoint down".to_string())));

        let service = DetailService::new(Arc::new(catalog), repo, cache, bus);

        let detail = service.movie_detail(sample_movie(603, "The Matrix")).await.unwrap();

        assert!(detail.movie.trailers.is_empty());
        assert!(detail.movie.reviews.is_empty());
        assert!(!detail.is_favorite);
    }

    #[tokio::test]
    async fn test_detail_resolves_genres_and_favorite_status() {
        let dir = TempDir::new().unwrap();
        let (repo, cache, bus) = test_fixtures(&dir);

        let mut movie = sample_movie(129, "Spirited Away");
        movie.genre_ids = vec![16];
        repo.save(&movie).unwrap();

        let mut catalog = MockCatalogSource::new();
        catalog.expect_genre_map().returning(|| {
            let mut map = HashMap::new();
            map.insert(
                16,
                Genre {
                    id: 16,
                    name: "Animation".to_string(),
                },
            );
            Ok(map)
        });
        catalog.expect_movie_trailers().returning(|_| {
            Ok(vec![MovieTrailer {
                key: "ByXuk9QqQkk".to_string(),
                name: "Official Trailer".to_string(),
                site: "YouTube".to_string(),
            }])
        });
        catalog.expect_movie_reviews().returning(|_| Ok(Vec::new()));

        let service = DetailService::new(Arc::new(catalog), repo, cache, bus);

        let detail = service.movie_detail(movie).await.unwrap();

        assert!(detail.is_favorite);
        assert_eq!(detail.movie.genres.len(), 1);
        assert_eq!(detail.movie.genres[0].name, "Animation");
        assert_eq!(detail.movie.trailers.len(), 1);
    }

    #[tokio::test]
    async fn test_detail_emits_selection_event() {
        let dir = TempDir::new().unwrap();
        let (repo, cache, bus) = test_fixtures(&dir);

        let mut catalog = MockCatalogSource::new();
        catalog.expect_movie_trailers().returning(|_| Ok(Vec::new()));
        catalog.expect_movie_reviews().returning(|_| Ok(Vec::new()));

        let service = DetailService::new(Arc::new(catalog), repo, cache, Arc::clone(&bus));
        service.movie_detail(sample_movie(603, "The Matrix")).await.unwrap();

        let log = bus.get_event_log();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].event_type, "MovieSelected");
    }

    #[tokio::test]
    async fn test_poster_theme_reads_from_cache() {
        let dir = TempDir::new().unwrap();
        let (repo, cache, bus) = test_fixtures(&dir);

        let mut catalog = MockCatalogSource::new();
        catalog
            .expect_poster_url()
            .returning(|path| format!("https://img.example{}", path));

        let mut movie = sample_movie(1, "Solid Red");
        movie.poster_path = Some("/red.jpg".to_string());

        // Seed the cache with a solid red poster
        let red = image::RgbImage::from_pixel(2, 2, image::Rgb([255, 0, 0]));
        let mut bytes: Vec<u8> = Vec::new();
        image::DynamicImage::ImageRgb8(red)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        std::fs::write(cache.cache_path("https://img.example/red.jpg"), &bytes).unwrap();

        let service = DetailService::new(Arc::new(catalog), repo, cache, bus);

        let theme = service.poster_theme(&movie).await.unwrap().unwrap();
        assert_eq!(theme.average_color, Rgb::new(255, 0, 0));
        // Pure red sits just under the readability cutoff
        assert!(theme.is_dark);
    }

    #[tokio::test]
    async fn test_poster_theme_is_none_without_poster() {
        let dir = TempDir::new().unwrap();
        let (repo, cache, bus) = test_fixtures(&dir);

        let catalog = MockCatalogSource::new();
        let service = DetailService::new(Arc::new(catalog), repo, cache, bus);

        let theme = service.poster_theme(&sample_movie(1, "Posterless")).await.unwrap();
        assert!(theme.is_none());
    }
}
