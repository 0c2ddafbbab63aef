// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO event emission
// - Explicit SQL only

pub mod favorites_repository;
pub mod key_value_repository;

pub use favorites_repository::{
    FavoritesRepository, KeyValueFavoritesRepository, DEFAULT_FAVORITES_KEY,
};
pub use key_value_repository::{KeyValueRepository, SqliteKeyValueRepository};

#[cfg(test)]
pub use favorites_repository::MockFavoritesRepository;
#[cfg(test)]
pub use key_value_repository::MockKeyValueRepository;
