// src/services/catalog_service.rs
//
// Catalog browsing: keyword search, genre discovery and recommendations.
// Results are list rows only; details always go through the hydrator.

use std::sync::Arc;

use crate::domain::{Genre, MovieId, MovieSummary};
use crate::error::AppResult;
use crate::integrations::MovieCatalog;

pub struct CatalogService {
    catalog: Arc<dyn MovieCatalog>,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn MovieCatalog>) -> Self {
        Self { catalog }
    }

    /// Blank keywords return no results without asking the catalog
    pub async fn search_by_keyword(&self, keyword: &str) -> AppResult<Vec<MovieSummary>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(Vec::new());
        }

        let results = self.catalog.search_movies(keyword).await?;
        log::debug!("Keyword '{}' matched {} movies", keyword, results.len());
        Ok(results)
    }

    pub async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.catalog.list_genres().await
    }

    pub async fn discover_by_genre(&self, genre_id: i64) -> AppResult<Vec<MovieSummary>> {
        self.catalog.discover_by_genre(genre_id).await
    }

    pub async fn recommendations(&self, movie_id: MovieId) -> AppResult<Vec<MovieSummary>> {
        self.catalog.recommendations(movie_id).await
    }
}
