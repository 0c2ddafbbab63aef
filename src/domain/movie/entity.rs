use serde::{Deserialize, Serialize};

/// Catalog identifier of a movie. Always positive for real records.
pub type MovieId = i64;

/// Shown in place of an empty overview
pub const NO_OVERVIEW_FALLBACK: &str = "No overview available";

/// Minimal movie shape needed to render a list row.
///
/// Field names follow the catalog's JSON so a persisted favorites blob
/// written with full catalog records still deserializes; extra fields are
/// ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: MovieId,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub poster_path: Option<String>,

    #[serde(default)]
    pub release_date: Option<String>,

    #[serde(default)]
    pub vote_average: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Full movie record. Only ever produced from a catalog response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: MovieId,
    pub title: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,

    /// Empty when the catalog has none
    pub overview: String,
    pub tagline: Option<String>,
    pub runtime_minutes: Option<u32>,

    /// Catalog order is kept
    pub genres: Vec<Genre>,
}

impl MovieSummary {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: None,
            release_date: None,
            vote_average: None,
        }
    }
}

impl MovieDetail {
    /// The list-row projection of this record, suitable for storing as a favorite.
    pub fn summary(&self) -> MovieSummary {
        MovieSummary {
            id: self.id,
            title: self.title.clone(),
            poster_path: self.poster_path.clone(),
            release_date: self.release_date.clone(),
            vote_average: self.vote_average,
        }
    }

    pub fn overview_or_fallback(&self) -> &str {
        if self.overview.trim().is_empty() {
            NO_OVERVIEW_FALLBACK
        } else {
            &self.overview
        }
    }
}

impl From<MovieDetail> for MovieSummary {
    fn from(detail: MovieDetail) -> Self {
        MovieSummary {
            id: detail.id,
            title: detail.title,
            poster_path: detail.poster_path,
            release_date: detail.release_date,
            vote_average: detail.vote_average,
        }
    }
}
