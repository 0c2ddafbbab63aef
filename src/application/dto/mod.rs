// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// - DTOs are UI-friendly representations
// - DTOs are simple, serializable structs
// - Conversion FROM domain values only (never TO)

use serde::{Deserialize, Serialize};

use crate::domain::{Genre, MovieDetail, MovieId, MovieSummary};
use crate::services::{HydrationFailure, HydrationReport};

/// Shown when a movie has no rating
pub const NO_RATING_LABEL: &str = "N/A";

// ============================================================================
// MOVIE DTOs
// ============================================================================

/// One row in a list or grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieCardDto {
    pub id: MovieId,
    pub title: String,
    pub poster_url: Option<String>,
    pub release_date: Option<String>,
    pub rating_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetailDto {
    pub id: MovieId,
    pub title: String,
    pub poster_url: Option<String>,
    pub release_date: Option<String>,
    pub rating_label: String,
    pub overview: String,
    pub tagline: Option<String>,
    pub runtime_minutes: Option<u32>,
    pub genres: Vec<GenreDto>,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreDto {
    pub id: i64,
    pub name: String,
}

// ============================================================================
// FAVORITES DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct FavoritesViewDto {
    pub movies: Vec<MovieCardDto>,
    /// Favorites that could not be fetched and are not shown
    pub unavailable: Vec<HydrationFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteStatusDto {
    pub movie_id: MovieId,
    pub is_favorite: bool,
}

// ============================================================================
// CONVERSION HELPERS (Domain → DTO)
// ============================================================================

/// Joins a catalog poster path onto the image base URL
pub fn poster_url(poster_base_url: &str, poster_path: Option<&str>) -> Option<String> {
    poster_path.map(|path| {
        format!(
            "{}/{}",
            poster_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    })
}

pub fn rating_label(vote_average: Option<f64>) -> String {
    match vote_average {
        Some(vote) if vote > 0.0 => format!("{:.1}", vote),
        _ => NO_RATING_LABEL.to_string(),
    }
}

impl MovieCardDto {
    pub fn from_summary(movie: MovieSummary, poster_base_url: &str) -> Self {
        Self {
            id: movie.id,
            poster_url: poster_url(poster_base_url, movie.poster_path.as_deref()),
            rating_label: rating_label(movie.vote_average),
            title: movie.title,
            release_date: movie.release_date,
        }
    }

    pub fn from_detail(movie: MovieDetail, poster_base_url: &str) -> Self {
        Self::from_summary(movie.into(), poster_base_url)
    }
}

impl MovieDetailDto {
    pub fn from_detail(movie: MovieDetail, is_favorite: bool, poster_base_url: &str) -> Self {
        Self {
            id: movie.id,
            poster_url: poster_url(poster_base_url, movie.poster_path.as_deref()),
            rating_label: rating_label(movie.vote_average),
            overview: movie.overview_or_fallback().to_string(),
            title: movie.title,
            release_date: movie.release_date,
            tagline: movie.tagline,
            runtime_minutes: movie.runtime_minutes,
            genres: movie.genres.into_iter().map(GenreDto::from).collect(),
            is_favorite,
        }
    }
}

impl From<Genre> for GenreDto {
    fn from(genre: Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name,
        }
    }
}

impl FavoritesViewDto {
    pub fn from_report(report: HydrationReport, poster_base_url: &str) -> Self {
        Self {
            movies: report
                .movies
                .into_iter()
                .map(|movie| MovieCardDto::from_detail(movie, poster_base_url))
                .collect(),
            unavailable: report.failures,
        }
    }
}
