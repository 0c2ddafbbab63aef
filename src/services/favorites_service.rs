// src/services/favorites_service.rs
//
// Favorites Store
//
// Sole authority over the persisted favorites list. Every mutation is a
// read-modify-write of the whole list, serialized through one lock so two
// overlapping adds cannot overwrite each other's result.

use std::sync::{Arc, Mutex};

use crate::domain::{validate_movie_summary, FavoritesList, MovieId, MovieSummary};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, FavoriteAdded, FavoriteRemoved};
use crate::repositories::FavoritesRepository;

pub struct FavoritesService {
    favorites_repo: Arc<dyn FavoritesRepository>,
    event_bus: Arc<EventBus>,
    mutation_lock: Mutex<()>,
}

impl FavoritesService {
    pub fn new(favorites_repo: Arc<dyn FavoritesRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            favorites_repo,
            event_bus,
            mutation_lock: Mutex::new(()),
        }
    }

    /// Current favorites in favorite order. Empty if nothing was ever stored.
    pub fn list(&self) -> AppResult<FavoritesList> {
        self.favorites_repo.load()
    }

    /// Like `list`, but any failure is logged and reported as an empty list
    pub fn list_or_empty(&self) -> FavoritesList {
        match self.list() {
            Ok(favorites) => favorites,
            Err(e) => {
                log::warn!("Could not read favorites, showing none: {}", e);
                FavoritesList::new()
            }
        }
    }

    pub fn contains(&self, movie_id: MovieId) -> AppResult<bool> {
        Ok(self.list()?.contains(movie_id))
    }

    /// Appends `movie` unless already present. Returns true if it was added.
    pub fn add(&self, movie: MovieSummary) -> AppResult<bool> {
        validate_movie_summary(&movie).map_err(AppError::Domain)?;

        let _guard = self.lock_mutations();

        let mut favorites = self.favorites_repo.load()?;
        let movie_id = movie.id;
        let title = movie.title.clone();

        if !favorites.insert(movie) {
            log::debug!("Movie {} already in favorites", movie_id);
            return Ok(false);
        }

        self.favorites_repo.save(&favorites)?;
        log::info!("Added movie {} to favorites ({} total)", movie_id, favorites.len());

        self.event_bus
            .emit(FavoriteAdded::new(movie_id, title, favorites.len()));

        Ok(true)
    }

    /// Removes `movie_id` if present. Returns true if it was removed.
    pub fn remove(&self, movie_id: MovieId) -> AppResult<bool> {
        let _guard = self.lock_mutations();

        let mut favorites = self.favorites_repo.load()?;

        if !favorites.remove(movie_id) {
            log::debug!("Movie {} was not a favorite", movie_id);
            return Ok(false);
        }

        self.favorites_repo.save(&favorites)?;
        log::info!(
            "Removed movie {} from favorites ({} left)",
            movie_id,
            favorites.len()
        );

        self.event_bus
            .emit(FavoriteRemoved::new(movie_id, favorites.len()));

        Ok(true)
    }

    /// Adds the movie if absent, removes it if present.
    /// Returns the membership after the call.
    pub fn toggle(&self, movie: MovieSummary) -> AppResult<bool> {
        let _guard = self.lock_mutations();

        let mut favorites = self.favorites_repo.load()?;
        let movie_id = movie.id;

        if favorites.remove(movie_id) {
            self.favorites_repo.save(&favorites)?;
            self.event_bus
                .emit(FavoriteRemoved::new(movie_id, favorites.len()));
            return Ok(false);
        }

        validate_movie_summary(&movie).map_err(AppError::Domain)?;
        let title = movie.title.clone();
        favorites.insert(movie);
        self.favorites_repo.save(&favorites)?;
        self.event_bus
            .emit(FavoriteAdded::new(movie_id, title, favorites.len()));

        Ok(true)
    }

    /// Replaces whatever is stored, including an unreadable blob, with an
    /// empty list.
    pub fn clear(&self) -> AppResult<()> {
        let _guard = self.lock_mutations();
        self.favorites_repo.save(&FavoritesList::new())?;
        log::info!("Cleared favorites");
        Ok(())
    }

    fn lock_mutations(&self) -> std::sync::MutexGuard<'_, ()> {
        self.mutation_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use crate::repositories::{
        KeyValueFavoritesRepository, KeyValueRepository, MockFavoritesRepository,
        SqliteKeyValueRepository, DEFAULT_FAVORITES_KEY,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn movie(id: MovieId) -> MovieSummary {
        MovieSummary::new(id, format!("Movie {}", id))
    }

    fn sqlite_service() -> (tempfile::TempDir, FavoritesService) {
        let (dir, pool) = create_test_pool();
        let kv = Arc::new(SqliteKeyValueRepository::new(Arc::new(pool)));
        let repo = Arc::new(KeyValueFavoritesRepository::new(kv, DEFAULT_FAVORITES_KEY));
        (dir, FavoritesService::new(repo, Arc::new(EventBus::new())))
    }

    #[test]
    fn test_empty_store_scenario() {
        let (_dir, service) = sqlite_service();

        assert!(service.list().unwrap().is_empty());
        assert!(!service.contains(42).unwrap());

        service.add(movie(42)).unwrap();
        assert!(service.contains(42).unwrap());

        service.remove(42).unwrap();
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_add_is_idempotent() {
        let (_dir, service) = sqlite_service();

        assert!(service.add(movie(7)).unwrap());
        assert!(!service.add(movie(7)).unwrap());

        let favorites = service.list().unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites.as_slice()[0], movie(7));
    }

    #[test]
    fn test_order_preserved_across_remove() {
        let (_dir, service) = sqlite_service();

        service.add(movie(1)).unwrap();
        service.add(movie(2)).unwrap();
        service.add(movie(3)).unwrap();
        assert_eq!(service.list().unwrap().ids(), vec![1, 2, 3]);

        service.remove(2).unwrap();
        assert_eq!(service.list().unwrap().ids(), vec![1, 3]);
    }

    #[test]
    fn test_remove_absent_leaves_list_unchanged() {
        let (_dir, service) = sqlite_service();
        service.add(movie(1)).unwrap();

        assert!(!service.remove(99).unwrap());
        assert_eq!(service.list().unwrap().ids(), vec![1]);
    }

    #[test]
    fn test_invalid_movie_rejected() {
        let (_dir, service) = sqlite_service();

        let result = service.add(MovieSummary::new(0, "Nothing"));
        assert!(matches!(result, Err(AppError::Domain(_))));
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_toggle_flips_membership() {
        let (_dir, service) = sqlite_service();

        assert!(service.toggle(movie(5)).unwrap());
        assert!(service.contains(5).unwrap());

        assert!(!service.toggle(movie(5)).unwrap());
        assert!(!service.contains(5).unwrap());
    }

    #[test]
    fn test_concurrent_adds_lose_no_update() {
        let (_dir, service) = sqlite_service();
        let service = Arc::new(service);

        let handles: Vec<_> = (1..=8)
            .map(|id| {
                let service = Arc::clone(&service);
                std::thread::spawn(move || service.add(movie(id)).unwrap())
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let mut ids = service.list().unwrap().ids();
        ids.sort();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn test_mutations_emit_events() {
        let (dir, pool) = create_test_pool();
        let kv = Arc::new(SqliteKeyValueRepository::new(Arc::new(pool)));
        let repo = Arc::new(KeyValueFavoritesRepository::new(kv, DEFAULT_FAVORITES_KEY));
        let bus = Arc::new(EventBus::new());

        let added = Arc::new(AtomicUsize::new(0));
        let added_clone = Arc::clone(&added);
        bus.subscribe::<FavoriteAdded, _>(move |_| {
            added_clone.fetch_add(1, Ordering::SeqCst);
        });

        let service = FavoritesService::new(repo, Arc::clone(&bus));
        service.add(movie(1)).unwrap();
        service.add(movie(1)).unwrap();
        service.remove(1).unwrap();

        assert_eq!(added.load(Ordering::SeqCst), 1);
        let types: Vec<_> = bus
            .get_event_log()
            .into_iter()
            .map(|entry| entry.event_type)
            .collect();
        assert_eq!(types, vec!["FavoriteAdded", "FavoriteRemoved"]);
        drop(dir);
    }

    #[test]
    fn test_list_or_empty_swallows_read_failure() {
        let mut repo = MockFavoritesRepository::new();
        repo.expect_load()
            .returning(|| Err(AppError::Deserialization("corrupt".to_string())));

        let service = FavoritesService::new(Arc::new(repo), Arc::new(EventBus::new()));

        assert!(service.list().is_err());
        assert!(service.list_or_empty().is_empty());
    }

    #[test]
    fn test_failed_write_surfaces_error_and_emits_nothing() {
        let mut repo = MockFavoritesRepository::new();
        repo.expect_load().returning(|| Ok(FavoritesList::new()));
        repo.expect_save()
            .returning(|_| Err(AppError::Pool("disk full".to_string())));

        let bus = Arc::new(EventBus::new());
        let service = FavoritesService::new(Arc::new(repo), Arc::clone(&bus));

        assert!(service.add(movie(3)).is_err());
        assert!(bus.get_event_log().is_empty());
    }

    #[test]
    fn test_clear_recovers_from_corrupt_blob() {
        let (dir, pool) = create_test_pool();
        let kv = Arc::new(SqliteKeyValueRepository::new(Arc::new(pool)));
        kv.set(DEFAULT_FAVORITES_KEY, "not json").unwrap();

        let repo = Arc::new(KeyValueFavoritesRepository::new(
            kv.clone(),
            DEFAULT_FAVORITES_KEY,
        ));
        let service = FavoritesService::new(repo, Arc::new(EventBus::new()));

        assert!(service.add(movie(1)).is_err());
        service.clear().unwrap();
        assert!(service.add(movie(1)).unwrap());
        drop(dir);
    }
}
