// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Network failure or non-2xx status from the catalog
    #[error("Transport error: {0}")]
    Transport(String),

    /// Malformed JSON, either from the catalog or the persisted favorites blob
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// The catalog has no record for a valid id
    #[error("Resource not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

/// Coarse failure taxonomy, used by callers that only need to decide
/// between "empty", "not found" and "failed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Transport,
    Deserialization,
    NotFound,
    Persistence,
    Validation,
    Internal,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Transport(_) => ErrorKind::Transport,
            AppError::Deserialization(_) => ErrorKind::Deserialization,
            AppError::NotFound => ErrorKind::NotFound,
            AppError::Database(_) | AppError::Pool(_) | AppError::Io(_) => ErrorKind::Persistence,
            AppError::Domain(_) | AppError::Config(_) => ErrorKind::Validation,
            AppError::Other(_) => ErrorKind::Internal,
        }
    }

    /// Only transport failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Transport(_))
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Deserialization(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Deserialization(format!("Catalog response could not be decoded: {}", err))
        } else {
            AppError::Transport(format!("Catalog request failed: {}", err))
        }
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

impl From<::config::ConfigError> for AppError {
    fn from(err: ::config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(AppError::NotFound.kind(), ErrorKind::NotFound);
        assert_eq!(AppError::Transport("down".into()).kind(), ErrorKind::Transport);
        assert_eq!(
            AppError::Pool("exhausted".into()).kind(),
            ErrorKind::Persistence
        );
    }

    #[test]
    fn test_serde_error_is_deserialization() {
        let err: AppError = serde_json::from_str::<Vec<i64>>("{not json")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), ErrorKind::Deserialization);
    }

    #[test]
    fn test_only_transport_is_retryable() {
        assert!(AppError::Transport("timeout".into()).is_retryable());
        assert!(!AppError::NotFound.is_retryable());
        assert!(!AppError::Deserialization("bad".into()).is_retryable());
    }
}
