// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - DTOs NEVER leak domain invariants
// - DTOs are simple, serializable structs
// - Conversion FROM domain entities only (never TO)

use serde::{Deserialize, Serialize};

// ============================================================================
// MOVIE DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDto {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub genre_ids: Vec<i64>,
    /// Genre names, empty when the movie has not been enriched
    pub genres: Vec<String>,
    pub release_year: Option<i32>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: f64,
    pub popularity: f64,
}

// ============================================================================
// LISTING DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingViewDto {
    pub order: String,
    pub view: String,
    pub page: u32,
    pub movies: Vec<MovieDto>,
}

// ============================================================================
// DETAIL DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailerDto {
    pub name: String,
    pub site: String,
    pub watch_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDto {
    pub author: String,
    pub content: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetailDto {
    pub movie: MovieDto,
    pub trailers: Vec<TrailerDto>,
    pub reviews: Vec<ReviewDto>,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosterThemeDto {
    pub average_color: String,
    pub brightness: f64,
    pub is_dark: bool,
}

// ============================================================================
// CONVERSION HELPERS (Domain → DTO)
// ============================================================================

impl From<crate::domain::Movie> for MovieDto {
    fn from(movie: crate::domain::Movie) -> Self {
        let release_year = movie.release_year();
        Self {
            id: movie.id,
            title: movie.title,
            overview: movie.overview,
            genre_ids: movie.genre_ids,
            genres: movie.genres.into_iter().map(|g| g.name).collect(),
            release_year,
            poster_path: movie.poster_path,
            backdrop_path: movie.backdrop_path,
            vote_average: movie.vote_average,
            popularity: movie.popularity,
        }
    }
}

impl From<crate::domain::MovieTrailer> for TrailerDto {
    fn from(trailer: crate::domain::MovieTrailer) -> Self {
        let watch_url = trailer.watch_url();
        Self {
            name: trailer.name,
            site: trailer.site,
            watch_url,
        }
    }
}

impl From<crate::domain::MovieReview> for ReviewDto {
    fn from(review: crate::domain::MovieReview) -> Self {
        Self {
            author: review.author,
            content: review.content,
            url: review.url,
        }
    }
}

impl From<crate::domain::MovieDetail> for MovieDetailDto {
    fn from(detail: crate::domain::MovieDetail) -> Self {
        let mut movie = detail.movie;
        let trailers = std::mem::take(&mut movie.trailers);
        let reviews = std::mem::take(&mut movie.reviews);
        Self {
            movie: MovieDto::from(movie),
            trailers: trailers.into_iter().map(TrailerDto::from).collect(),
            reviews: reviews.into_iter().map(ReviewDto::from).collect(),
            is_favorite: detail.is_favorite,
        }
    }
}

impl From<crate::domain::PosterTheme> for PosterThemeDto {
    fn from(theme: crate::domain::PosterTheme) -> Self {
        Self {
            average_color: theme.average_color.to_hex(),
            brightness: theme.brightness,
            is_dark: theme.is_dark,
        }
    }
}
