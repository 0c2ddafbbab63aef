// src/domain/mod.rs
//
// Domain Root
//
// Declares the domain modules and re-exports their public API.
// Other layers import from `crate::domain::*`.

pub mod favorites;
pub mod movie;

pub use favorites::FavoritesList;
pub use movie::{
    validate_movie_summary, Genre, MovieDetail, MovieId, MovieSummary, NO_OVERVIEW_FALLBACK,
};

use thiserror::Error;

/// Violations of domain rules
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
