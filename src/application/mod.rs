// src/application/mod.rs
//
// Application Layer
//
// The boundary between a UI shell and the services:
// - commands: thin async adapters returning DTOs
// - screens: per-view state holders (loading flags, stale-response guards)
// - error_handling: user-facing error mapping

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod screens;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{CommandResult, ErrorResponse, ErrorType};
pub use screens::{DetailScreen, DetailView, FavoritesScreen, FavoritesScreenState};
pub use state::AppState;
