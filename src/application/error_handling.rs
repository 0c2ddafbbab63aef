// src/application/error_handling.rs
//
// Error Handling for Commands
//
// - Maps internal errors → user-facing responses
// - Never exposes raw error text to the user
// - Logs the underlying error for debugging

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response for UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The catalog has no such movie
    NotFound,

    /// Invalid input or a domain rule was violated
    Validation,

    /// Local storage could not be read or written
    Persistence,

    /// Stored or received data could not be understood
    Deserialization,

    /// The catalog could not be reached
    ExternalService,

    Internal,
}

impl ErrorResponse {
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound => Self::not_found("Movie"),

            AppError::Domain(domain_error) => Self {
                success: false,
                error_type: ErrorType::Validation,
                message: "The request could not be applied".to_string(),
                details: Some(domain_error.to_string()),
            },

            AppError::Transport(message) => {
                log::error!("Catalog transport failure: {}", message);

                Self {
                    success: false,
                    error_type: ErrorType::ExternalService,
                    message: "Could not reach the movie catalog".to_string(),
                    details: None,
                }
            }

            AppError::Deserialization(message) => {
                log::error!("Deserialization failure: {}", message);

                Self {
                    success: false,
                    error_type: ErrorType::Deserialization,
                    message: "Received data could not be read".to_string(),
                    details: None,
                }
            }

            AppError::Database(_) | AppError::Pool(_) | AppError::Io(_) => {
                log::error!("Storage failure: {}", error);

                Self {
                    success: false,
                    error_type: ErrorType::Persistence,
                    message: "Local storage is unavailable".to_string(),
                    details: None,
                }
            }

            AppError::Config(message) => Self {
                success: false,
                error_type: ErrorType::Validation,
                message: "The application is not configured correctly".to_string(),
                details: Some(message),
            },

            AppError::Other(message) => {
                log::error!("Unexpected failure: {}", message);

                Self {
                    success: false,
                    error_type: ErrorType::Internal,
                    message: "Something went wrong".to_string(),
                    details: None,
                }
            }
        }
    }

    pub fn not_found(resource: &str) -> Self {
        Self {
            success: false,
            error_type: ErrorType::NotFound,
            message: format!("{} not found", resource),
            details: None,
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self::from_app_error(error)
    }
}

/// Result type returned by every command
pub type CommandResult<T> = Result<T, ErrorResponse>;
