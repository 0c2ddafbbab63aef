// src/application/commands/mod.rs
//
// Command Handlers
//
// - Commands are thin adapters between UI and Services
// - Commands accept ids and plain values, return DTOs
// - Commands convert errors into ErrorResponse
// - Commands NEVER contain business logic

pub mod favorite_commands;
pub mod movie_commands;
pub mod search_commands;

pub use favorite_commands::*;
pub use movie_commands::*;
pub use search_commands::*;
