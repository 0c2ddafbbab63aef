pub mod entity;
pub mod invariants;

pub use entity::{Genre, MovieDetail, MovieId, MovieSummary, NO_OVERVIEW_FALLBACK};
pub use invariants::validate_movie_summary;
