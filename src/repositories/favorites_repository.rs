// src/repositories/favorites_repository.rs

use std::sync::Arc;

use crate::domain::{FavoritesList, MovieSummary};
use crate::error::{AppError, AppResult};
use crate::repositories::KeyValueRepository;

/// Key the favorites array has always been stored under
pub const DEFAULT_FAVORITES_KEY: &str = "@FavoriteList";

/// Whole-list persistence for favorites. Loads and saves the complete list;
/// membership rules live in the service.
#[cfg_attr(test, mockall::automock)]
pub trait FavoritesRepository: Send + Sync {
    /// Empty list if nothing was ever saved
    fn load(&self) -> AppResult<FavoritesList>;
    fn save(&self, favorites: &FavoritesList) -> AppResult<()>;
}

/// Stores the favorites as one JSON array in a key-value slot
pub struct KeyValueFavoritesRepository {
    kv: Arc<dyn KeyValueRepository>,
    key: String,
}

impl KeyValueFavoritesRepository {
    pub fn new(kv: Arc<dyn KeyValueRepository>, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }
}

impl FavoritesRepository for KeyValueFavoritesRepository {
    fn load(&self) -> AppResult<FavoritesList> {
        let Some(raw) = self.kv.get(&self.key)? else {
            return Ok(FavoritesList::new());
        };

        let movies: Vec<MovieSummary> = serde_json::from_str(&raw).map_err(|e| {
            AppError::Deserialization(format!("Stored favorites under {} are corrupt: {}", self.key, e))
        })?;

        let count = movies.len();
        let favorites = FavoritesList::from_movies(movies);
        if favorites.len() != count {
            log::warn!(
                "Dropped {} duplicate favorite(s) while loading {}",
                count - favorites.len(),
                self.key
            );
        }

        Ok(favorites)
    }

    fn save(&self, favorites: &FavoritesList) -> AppResult<()> {
        let raw = serde_json::to_string(favorites)?;
        self.kv.set(&self.key, &raw)
    }
}
