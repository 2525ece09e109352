pub mod entity;
pub mod invariants;

pub use entity::{Genre, Movie, MovieDetail, MovieReview, MovieTrailer};
pub use invariants::{validate_movie, validate_page};
