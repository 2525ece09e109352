// src/repositories/favorite_movie_repository.rs
//
// Favorite movie persistence

use chrono::{NaiveDate, Utc};
use rusqlite::{params, Row};
use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::domain::movie::Movie;
use crate::error::{AppError, AppResult};

pub trait FavoriteMovieRepository: Send + Sync {
    fn save(&self, movie: &Movie) -> AppResult<()>;
    fn get_by_id(&self, id: i64) -> AppResult<Option<Movie>>;
    fn list_all(&self) -> AppResult<Vec<Movie>>;
    fn delete(&self, id: i64) -> AppResult<()>;
    fn exists(&self, id: i64) -> AppResult<bool>;
}

pub struct SqliteFavoriteMovieRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteFavoriteMovieRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to Movie - returns rusqlite::Error for query_map compatibility
    ///
    /// Only the flat listing columns are stored, so restored movies carry
    /// empty genres, trailers and reviews.
    fn row_to_movie(row: &Row) -> Result<Movie, rusqlite::Error> {
        let genre_ids_json: String = row.get("genre_ids")?;
        let genre_ids: Vec<i64> = serde_json::from_str(&genre_ids_json)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let release_date_str: Option<String> = row.get("release_date")?;
        let release_date = release_date_str
            .map(|s| {
                NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
            })
            .transpose()?;

        Ok(Movie {
            id: row.get("id")?,
            title: row.get("title")?,
            overview: row.get("overview")?,
            genre_ids,
            genres: Vec::new(),
            release_date,
            poster_path: row.get("poster_path")?,
            backdrop_path: row.get("backdrop_path")?,
            vote_average: row.get("vote_average")?,
            popularity: row.get("popularity")?,
            trailers: Vec::new(),
            reviews: Vec::new(),
        })
    }
}

impl FavoriteMovieRepository for SqliteFavoriteMovieRepository {
    fn save(&self, movie: &Movie) -> AppResult<()> {
        let conn = self.pool.get()?;

        let genre_ids_json = serde_json::to_string(&movie.genre_ids)?;

        conn.execute(
            "INSERT OR REPLACE INTO favorite_movies (
                id, title, overview, genre_ids, release_date,
                poster_path, backdrop_path, vote_average, popularity, favorited_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                movie.id,
                movie.title,
                movie.overview,
                genre_ids_json,
                movie.release_date.map(|d| d.format("%Y-%m-%d").to_string()),
                movie.poster_path,
                movie.backdrop_path,
                movie.vote_average,
                movie.popularity,
                Utc::now().to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: i64) -> AppResult<Option<Movie>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, title, overview, genre_ids, release_date,
                    poster_path, backdrop_path, vote_average, popularity
             FROM favorite_movies WHERE id = ?1",
        )?;

        match stmt.query_row(params![id], Self::row_to_movie) {
            Ok(movie) => Ok(Some(movie)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Movie>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, title, overview, genre_ids, release_date,
                    poster_path, backdrop_path, vote_average, popularity
             FROM favorite_movies
             ORDER BY popularity DESC",
        )?;

        let movies: Vec<Movie> = stmt
            .query_map([], Self::row_to_movie)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(movies)
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute("DELETE FROM favorite_movies WHERE id = ?1", params![id])?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn exists(&self, id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM favorite_movies WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }
}
