use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// A movie as shown in the browsing grid
/// This is the root entity for catalog listings and local favorites
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    /// Catalog identifier - the only identity-bearing field
    pub id: i64,

    pub title: String,

    pub overview: String,

    /// Raw genre ids exactly as the catalog delivered them
    pub genre_ids: Vec<i64>,

    /// Resolved genre records, empty until `enrich` runs
    #[serde(default)]
    pub genres: Vec<Genre>,

    pub release_date: Option<NaiveDate>,

    /// Poster path fragment, joined with the image base URL for display
    pub poster_path: Option<String>,

    pub backdrop_path: Option<String>,

    /// Mean user rating on the catalog's 0..=10 scale
    pub vote_average: f64,

    pub popularity: f64,

    /// Filled by the detail flow, never persisted locally
    #[serde(default)]
    pub trailers: Vec<MovieTrailer>,

    /// Filled by the detail flow, never persisted locally
    #[serde(default)]
    pub reviews: Vec<MovieReview>,
}

/// A genre id/name pair from the catalog's genre table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// A promotional video attached to a movie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieTrailer {
    /// Provider-side video key (a YouTube video id for YouTube trailers)
    pub key: String,
    pub name: String,
    pub site: String,
}

/// A user review attached to a movie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieReview {
    pub author: String,
    pub content: String,
    pub url: String,
}

/// A movie with its detail sections resolved, plus local favorite status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetail {
    pub movie: Movie,
    pub is_favorite: bool,
}

impl Movie {
    /// Create a bare Movie with the given identity and title
    /// All remaining fields start empty; listing data comes from the
    /// catalog mapper or the favorites row mapper, not from here.
    pub fn new(id: i64, title: String) -> Self {
        Self {
            id,
            title,
            overview: String::new(),
            genre_ids: Vec::new(),
            genres: Vec::new(),
            release_date: None,
            poster_path: None,
            backdrop_path: None,
            vote_average: 0.0,
            popularity: 0.0,
            trailers: Vec::new(),
            reviews: Vec::new(),
        }
    }

    /// Resolve `genre_ids` against the catalog's genre table, appending the
    /// matching records to `genres` in id order.
    ///
    /// Not idempotent: enriching an already-enriched movie appends the same
    /// genres a second time. Callers enrich exactly once, immediately after
    /// mapping from the wire.
    ///
    /// # Panics
    ///
    /// Panics if an id has no entry in `genre_map`. The table comes from the
    /// same catalog that produced the ids, so a miss means corrupt state and
    /// there is nothing sensible to fall back to.
    pub fn enrich(&mut self, genre_map: &HashMap<i64, Genre>) {
        for id in &self.genre_ids {
            let genre = genre_map
                .get(id)
                .unwrap_or_else(|| panic!("genre id {} missing from genre table", id));
            self.genres.push(genre.clone());
        }
    }

    /// Release year, when a release date is known
    pub fn release_year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.release_date.map(|d| d.year())
    }
}

// Identity is the catalog id alone. A record fresh off the wire and the
// same movie enriched with genres or detail data compare equal, which is
// what list membership and favorite lookups rely on.
impl PartialEq for Movie {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Movie {}

impl Hash for Movie {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl MovieTrailer {
    /// Watch URL for YouTube-hosted trailers
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn genre_map(pairs: &[(i64, &str)]) -> HashMap<i64, Genre> {
        pairs
            .iter()
            .map(|(id, name)| {
                (
                    *id,
                    Genre {
                        id: *id,
                        name: name.to_string(),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_equality_is_keyed_on_id_only() {
        let mut a = Movie::new(603, "The Matrix".to_string());
        let b = Movie::new(603, "The Matrix (enriched)".to_string());
        a.genres.push(Genre {
            id: 28,
            name: "Action".to_string(),
        });

        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_enrich_resolves_in_id_order() {
        let mut movie = Movie::new(1, "Test".to_string());
        movie.genre_ids = vec![1, 2];

        movie.enrich(&genre_map(&[(1, "Action"), (2, "Drama")]));

        let names: Vec<&str> = movie.genres.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Action", "Drama"]);
    }

    #[test]
    fn test_enrich_twice_duplicates_genres() {
        let map = genre_map(&[(1, "Action"), (2, "Drama")]);
        let mut movie = Movie::new(1, "Test".to_string());
        movie.genre_ids = vec![1, 2];

        movie.enrich(&map);
        movie.enrich(&map);

        let names: Vec<&str> = movie.genres.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Action", "Drama", "Action", "Drama"]);
    }

    #[test]
    #[should_panic(expected = "genre id 99 missing")]
    fn test_enrich_panics_on_unknown_genre_id() {
        let mut movie = Movie::new(1, "Test".to_string());
        movie.genre_ids = vec![99];
        movie.enrich(&genre_map(&[(1, "Action")]));
    }

    #[test]
    fn test_serde_round_trip_is_lossless() {
        let mut movie = Movie::new(354912, "Coco".to_string());
        movie.overview = "Aspiring musician Miguel enters the Land of the Dead.".to_string();
        movie.genre_ids = vec![16, 10751];
        movie.release_date = NaiveDate::from_ymd_opt(2017, 10, 27);
        movie.poster_path = Some("/gGEsBPAijhVUFoiNpgZXqRVWJt2.jpg".to_string());
        movie.vote_average = 8.2;
        movie.popularity = 91.5;
        movie.enrich(&genre_map(&[(16, "Animation"), (10751, "Family")]));
        movie.trailers.push(MovieTrailer {
            key: "xlnPHQ3TLX8".to_string(),
            name: "Official Trailer".to_string(),
            site: "YouTube".to_string(),
        });

        let json = serde_json::to_string(&movie).unwrap();
        let restored: Movie = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.id, movie.id);
        assert_eq!(restored.title, movie.title);
        assert_eq!(restored.overview, movie.overview);
        assert_eq!(restored.genre_ids, movie.genre_ids);
        assert_eq!(restored.genres, movie.genres);
        assert_eq!(restored.release_date, movie.release_date);
        assert_eq!(restored.poster_path, movie.poster_path);
        assert_eq!(restored.trailers, movie.trailers);
        assert_eq!(restored.vote_average, movie.vote_average);
    }

    #[test]
    fn test_release_year() {
        let mut movie = Movie::new(1, "Test".to_string());
        assert_eq!(movie.release_year(), None);
        movie.release_date = NaiveDate::from_ymd_opt(1999, 3, 31);
        assert_eq!(movie.release_year(), Some(1999));
    }
}
