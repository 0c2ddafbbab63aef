// src/integrations/tmdb/client.rs
//
// TMDB-compatible REST client
//
// ARCHITECTURE:
// - Plain GET endpoints, JSON bodies
// - Authentication is opaque configuration (bearer header or api_key query)
// - Maps wire data → domain values (MovieSummary, MovieDetail, Genre)
// - Classifies failures: NotFound vs Transport vs Deserialization

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::config::{CatalogAuth, CatalogConfig};
use crate::domain::{Genre, MovieDetail, MovieId, MovieSummary};
use crate::error::{AppError, AppResult};
use crate::integrations::MovieCatalog;

/// TMDB reports "resource not found" with this status code in the body
const TMDB_NOT_FOUND_CODE: i64 = 34;

/// Error body returned alongside non-2xx statuses
#[derive(Debug, Deserialize)]
struct StatusBody {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    status_code: Option<i64>,
    #[serde(default)]
    status_message: Option<String>,
}

/// Full movie record
#[derive(Debug, Deserialize)]
struct MovieData {
    id: Option<i64>,
    title: Option<String>,
    overview: Option<String>,
    tagline: Option<String>,
    release_date: Option<String>,
    poster_path: Option<String>,
    runtime: Option<u32>,
    vote_average: Option<f64>,
    #[serde(default)]
    genres: Option<Vec<GenreData>>,
}

/// Paged list wrapper for search/discover/recommendations
#[derive(Debug, Deserialize)]
struct PageData {
    #[serde(default)]
    results: Option<Vec<ListItemData>>,
}

/// List rows without an id are skipped
#[derive(Debug, Deserialize)]
struct ListItemData {
    id: Option<i64>,
    title: Option<String>,
    release_date: Option<String>,
    poster_path: Option<String>,
    vote_average: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct GenreListData {
    #[serde(default)]
    genres: Option<Vec<GenreData>>,
}

#[derive(Debug, Deserialize)]
struct GenreData {
    id: Option<i64>,
    name: Option<String>,
}

/// Retry schedule for transport failures
#[derive(Debug, Clone, Copy)]
struct RetryPolicy {
    max_retries: u32,
    backoff: Duration,
}

impl RetryPolicy {
    /// Exponential: backoff, 2*backoff, 4*backoff, ...
    fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(1u32 << attempt.min(16))
    }
}

/// TMDB API Client
pub struct TmdbClient {
    base_url: String,
    http_client: Client,
    auth: Option<CatalogAuth>,
    language: String,
    retry: RetryPolicy,
}

impl TmdbClient {
    pub fn new(config: &CatalogConfig) -> AppResult<Self> {
        let auth = config.auth();
        if auth.is_none() {
            log::debug!("No catalog credentials configured; catalog requests will fail");
        }

        let http_client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client,
            auth,
            language: config.language.clone(),
            retry: RetryPolicy {
                max_retries: config.max_retries,
                backoff: config.retry_backoff(),
            },
        })
    }

    // ========================================================================
    // INTERNAL: Request Execution
    // ========================================================================

    /// GET `path` with retries on transport failures only
    async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let mut attempt = 0;
        loop {
            match self.get_json_once(path, query).await {
                Err(e) if e.is_retryable() && attempt < self.retry.max_retries => {
                    let delay = self.retry.delay_for(attempt);
                    log::warn!(
                        "Catalog request {} failed (attempt {}): {}; retrying in {:?}",
                        path,
                        attempt + 1,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn get_json_once<T>(&self, path: &str, query: &[(&str, String)]) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let auth = self.auth.as_ref().ok_or_else(|| {
            AppError::Config("catalog.api_key or catalog.bearer_token must be set".to_string())
        })?;
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .http_client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .query(&[("language", self.language.as_str())])
            .query(query);

        request = match auth {
            CatalogAuth::Bearer(token) => request.bearer_auth(token),
            CatalogAuth::ApiKey(key) => request.query(&[("api_key", key.as_str())]),
        };

        log::debug!("GET {}", url);

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("Catalog request to {} failed: {}", path, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Transport(format!("Catalog response from {} was cut short: {}", path, e)))?;

        if !status.is_success() {
            return Err(Self::classify_failure(path, status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            AppError::Deserialization(format!("Catalog response from {} is malformed: {}", path, e))
        })
    }

    fn classify_failure(path: &str, status: StatusCode, body: &str) -> AppError {
        let status_body = serde_json::from_str::<StatusBody>(body).ok();

        let catalog_says_missing = status_body
            .as_ref()
            .map(|b| b.success == Some(false) && b.status_code == Some(TMDB_NOT_FOUND_CODE))
            .unwrap_or(false);

        if status == StatusCode::NOT_FOUND || catalog_says_missing {
            return AppError::NotFound;
        }

        let message = status_body
            .and_then(|b| b.status_message)
            .unwrap_or_default();

        AppError::Transport(format!(
            "Catalog returned status {} for {} {}",
            status, path, message
        ))
    }

    // ========================================================================
    // INTERNAL: Mapping
    // ========================================================================

    fn map_movie(data: MovieData) -> AppResult<MovieDetail> {
        // A 200 with no record is still "not found"
        let id = data.id.ok_or(AppError::NotFound)?;

        Ok(MovieDetail {
            id,
            title: data.title.unwrap_or_default(),
            poster_path: non_blank(data.poster_path),
            release_date: non_blank(data.release_date),
            vote_average: data.vote_average,
            overview: data.overview.unwrap_or_default(),
            tagline: non_blank(data.tagline),
            runtime_minutes: data.runtime.filter(|minutes| *minutes > 0),
            genres: data
                .genres
                .unwrap_or_default()
                .into_iter()
                .filter_map(Self::map_genre)
                .collect(),
        })
    }

    fn map_page(page: PageData) -> Vec<MovieSummary> {
        page.results
            .unwrap_or_default()
            .into_iter()
            .filter_map(|item| {
                Some(MovieSummary {
                    id: item.id?,
                    title: item.title.unwrap_or_default(),
                    poster_path: non_blank(item.poster_path),
                    release_date: non_blank(item.release_date),
                    vote_average: item.vote_average,
                })
            })
            .collect()
    }

    fn map_genre(genre: GenreData) -> Option<Genre> {
        Some(Genre {
            id: genre.id?,
            name: genre.name.unwrap_or_default(),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn get_movie(&self, id: MovieId) -> AppResult<MovieDetail> {
        if id <= 0 {
            return Err(AppError::NotFound);
        }

        let data: MovieData = self.get_json(&format!("/movie/{}", id), &[]).await?;
        Self::map_movie(data)
    }

    async fn search_movies(&self, query: &str) -> AppResult<Vec<MovieSummary>> {
        let page: PageData = self
            .get_json(
                "/search/movie",
                &[("query", query.to_string()), ("page", "1".to_string())],
            )
            .await?;
        Ok(Self::map_page(page))
    }

    async fn discover_by_genre(&self, genre_id: i64) -> AppResult<Vec<MovieSummary>> {
        let page: PageData = self
            .get_json(
                "/discover/movie",
                &[("with_genres", genre_id.to_string()), ("page", "1".to_string())],
            )
            .await?;
        Ok(Self::map_page(page))
    }

    async fn recommendations(&self, id: MovieId) -> AppResult<Vec<MovieSummary>> {
        let page: PageData = self
            .get_json(&format!("/movie/{}/recommendations", id), &[("page", "1".to_string())])
            .await?;
        Ok(Self::map_page(page))
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        let data: GenreListData = self.get_json("/genre/movie/list", &[]).await?;
        Ok(data
            .genres
            .unwrap_or_default()
            .into_iter()
            .filter_map(Self::map_genre)
            .collect())
    }
}
