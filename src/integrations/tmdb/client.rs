// src/integrations/tmdb/client.rs
//
// TMDb API Integration
//
// ARCHITECTURE:
// - REST client for The Movie Database v3 API
// - Maps wire payloads → domain movies in one place
// - Used by ListingService and DetailService through CatalogSource
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Never touches local persistence or the event bus
// - Returns fully mapped domain values that services can use as-is
// - Handles all external API concerns

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::domain::{Genre, Movie, MovieReview, MovieTrailer};
use crate::error::AppResult;

/// Public TMDb API endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Public TMDb image CDN endpoint
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Poster width served to the browsing grid
const POSTER_SIZE: &str = "w342";

/// Backdrop width served to the detail header
const BACKDROP_SIZE: &str = "w780";

/// Remote movie catalog
///
/// ListingService and DetailService depend on this trait rather than on the
/// concrete TMDb client, so tests can substitute canned responses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// One page of the popularity ranking
    async fn popular_movies(&self, page: u32) -> AppResult<Vec<Movie>>;

    /// One page of the rating ranking
    async fn top_rated_movies(&self, page: u32) -> AppResult<Vec<Movie>>;

    /// The catalog's full genre table, keyed by genre id
    async fn genre_map(&self) -> AppResult<HashMap<i64, Genre>>;

    /// YouTube trailers for one movie
    async fn movie_trailers(&self, movie_id: i64) -> AppResult<Vec<MovieTrailer>>;

    /// Published reviews for one movie
    async fn movie_reviews(&self, movie_id: i64) -> AppResult<Vec<MovieReview>>;

    /// Displayable image URL for a poster path fragment
    fn poster_url(&self, poster_path: &str) -> String;

    /// Displayable image URL for a backdrop path fragment
    fn backdrop_url(&self, backdrop_path: &str) -> String;
}

// ============================================================================
// WIRE FORMAT
// ============================================================================

/// Paged listing payload (popular and top rated share the shape)
#[derive(Debug, Deserialize)]
struct MoviePageDto {
    results: Vec<MovieDto>,
}

/// One movie entry in a listing payload
#[derive(Debug, Deserialize)]
struct MovieDto {
    id: i64,
    title: String,
    #[serde(default)]
    overview: String,
    #[serde(default)]
    genre_ids: Vec<i64>,
    release_date: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    #[serde(default)]
    vote_average: f64,
    #[serde(default)]
    popularity: f64,
}

#[derive(Debug, Deserialize)]
struct GenreListDto {
    genres: Vec<GenreDto>,
}

#[derive(Debug, Deserialize)]
struct GenreDto {
    id: i64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct VideoListDto {
    results: Vec<VideoDto>,
}

#[derive(Debug, Deserialize)]
struct VideoDto {
    key: String,
    name: String,
    site: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct ReviewPageDto {
    results: Vec<ReviewDto>,
}

#[derive(Debug, Deserialize)]
struct ReviewDto {
    author: String,
    content: String,
    url: String,
}

// ============================================================================
// CLIENT
// ============================================================================

/// TMDb API Client
pub struct TmdbClient {
    api_base_url: String,
    image_base_url: String,
    api_key: String,
    http_client: Client,
    /// Genre table fetched once and reused for every listing page
    genre_cache: RwLock<Option<HashMap<i64, Genre>>>,
}

impl TmdbClient {
    /// Create a client against the public TMDb endpoints
    pub fn new(api_key: String) -> Self {
        Self::with_base_urls(
            api_key,
            DEFAULT_API_BASE_URL.to_string(),
            DEFAULT_IMAGE_BASE_URL.to_string(),
        )
    }

    /// Create a client against custom endpoints
    pub fn with_base_urls(api_key: String, api_base_url: String, image_base_url: String) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_base_url,
            image_base_url,
            api_key,
            http_client,
            genre_cache: RwLock::new(None),
        }
    }

    // ========================================================================
    // INTERNAL: Request Execution
    // ========================================================================

    /// GET a JSON payload, treating non-2xx statuses as errors
    async fn get_json<T>(&self, url: &str) -> AppResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self.http_client.get(url).send().await?;
        let response = response.error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    /// Fetch one page of a ranked listing and map it to enriched movies
    async fn fetch_listing(&self, path: &str, page: u32) -> AppResult<Vec<Movie>> {
        let url = format!(
            "{}/{}?api_key={}&page={}",
            self.api_base_url, path, self.api_key, page
        );

        let payload: MoviePageDto = self.get_json(&url).await?;
        let genre_map = self.genre_map().await?;

        let mut movies = Vec::with_capacity(payload.results.len());
        for dto in payload.results {
            let mut movie = map_movie(dto)?;
            movie.enrich(&genre_map);
            movies.push(movie);
        }

        Ok(movies)
    }
}

#[async_trait]
impl CatalogSource for TmdbClient {
    async fn popular_movies(&self, page: u32) -> AppResult<Vec<Movie>> {
        self.fetch_listing("movie/popular", page).await
    }

    async fn top_rated_movies(&self, page: u32) -> AppResult<Vec<Movie>> {
        self.fetch_listing("movie/top_rated", page).await
    }

    async fn genre_map(&self) -> AppResult<HashMap<i64, Genre>> {
        {
            let cache = self.genre_cache.read().await;
            if let Some(map) = cache.as_ref() {
                return Ok(map.clone());
            }
        }

        let url = format!(
            "{}/genre/movie/list?api_key={}",
            self.api_base_url, self.api_key
        );
        let payload: GenreListDto = self.get_json(&url).await?;
        let map = map_genres(payload);

        let mut cache = self.genre_cache.write().await;
        *cache = Some(map.clone());

        Ok(map)
    }

    async fn movie_trailers(&self, movie_id: i64) -> AppResult<Vec<MovieTrailer>> {
        let url = format!(
            "{}/movie/{}/videos?api_key={}",
            self.api_base_url, movie_id, self.api_key
        );
        let payload: VideoListDto = self.get_json(&url).await?;

        Ok(map_videos(payload))
    }

    async fn movie_reviews(&self, movie_id: i64) -> AppResult<Vec<MovieReview>> {
        let url = format!(
            "{}/movie/{}/reviews?api_key={}",
            self.api_base_url, movie_id, self.api_key
        );
        let payload: ReviewPageDto = self.get_json(&url).await?;

        Ok(map_reviews(payload))
    }

    fn poster_url(&self, poster_path: &str) -> String {
        format!("{}/{}{}", self.image_base_url, POSTER_SIZE, poster_path)
    }

    fn backdrop_url(&self, backdrop_path: &str) -> String {
        format!("{}/{}{}", self.image_base_url, BACKDROP_SIZE, backdrop_path)
    }
}

// ============================================================================
// INTERNAL: Wire → Domain Mapping
// ============================================================================

/// Map one listing entry to a bare (not yet enriched) domain movie
///
/// Release dates arrive as "YYYY-MM-DD" and are blank or absent for titles
/// without a confirmed date. Blank maps to None; a malformed date is an error.
fn map_movie(dto: MovieDto) -> AppResult<Movie> {
    let release_date = match dto.release_date.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d")?),
    };

    Ok(Movie {
        id: dto.id,
        title: dto.title,
        overview: dto.overview,
        genre_ids: dto.genre_ids,
        genres: Vec::new(),
        release_date,
        poster_path: dto.poster_path,
        backdrop_path: dto.backdrop_path,
        vote_average: dto.vote_average,
        popularity: dto.popularity,
        trailers: Vec::new(),
        reviews: Vec::new(),
    })
}

fn map_genres(payload: GenreListDto) -> HashMap<i64, Genre> {
    payload
        .genres
        .into_iter()
        .map(|dto| {
            (
                dto.id,
                Genre {
                    id: dto.id,
                    name: dto.name,
                },
            )
        })
        .collect()
}

/// Keep YouTube-hosted trailers only; teasers, featurettes and other hosts
/// are dropped at the boundary
fn map_videos(payload: VideoListDto) -> Vec<MovieTrailer> {
    payload
        .results
        .into_iter()
        .filter(|v| v.site == "YouTube" && v.kind == "Trailer")
        .map(|v| MovieTrailer {
            key: v.key,
            name: v.name,
            site: v.site,
        })
        .collect()
}

fn map_reviews(payload: ReviewPageDto) -> Vec<MovieReview> {
    payload
        .results
        .into_iter()
        .map(|r| MovieReview {
            author: r.author,
            content: r.content,
            url: r.url,
        })
        .collect()
}
