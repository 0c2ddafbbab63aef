// src/integrations/catalog.rs
//
// Contract of the external movie catalog. Implementations handle all
// HTTP concerns and hand back domain values; they never touch storage.

use async_trait::async_trait;

use crate::domain::{Genre, MovieDetail, MovieId, MovieSummary};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// `AppError::NotFound` when the catalog has no such movie,
    /// `AppError::Transport` when it could not be asked.
    async fn get_movie(&self, id: MovieId) -> AppResult<MovieDetail>;

    async fn search_movies(&self, query: &str) -> AppResult<Vec<MovieSummary>>;

    async fn discover_by_genre(&self, genre_id: i64) -> AppResult<Vec<MovieSummary>>;

    async fn recommendations(&self, id: MovieId) -> AppResult<Vec<MovieSummary>>;

    async fn list_genres(&self) -> AppResult<Vec<Genre>>;
}
