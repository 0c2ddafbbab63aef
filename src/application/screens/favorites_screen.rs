// src/application/screens/favorites_screen.rs

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::{MovieDetail, MovieId};
use crate::error::ErrorKind;
use crate::events::{EventBus, FavoriteRemoved, SubscriptionId};
use crate::services::{FavoritesService, HydrationFailure, HydrationService};

#[derive(Debug, Clone, Default)]
pub struct FavoritesScreenState {
    pub loading: bool,
    pub movies: Vec<MovieDetail>,
    pub unavailable: Vec<HydrationFailure>,
    /// Set when the stored list could not be read; `movies` is then empty
    pub load_error: Option<ErrorKind>,
}

#[derive(Default)]
struct ScreenInner {
    view: FavoritesScreenState,
    /// Ids removed since the last load started. Filtered out of that load's
    /// result, which was read before the removal.
    removed_since_load: HashSet<MovieId>,
}

/// Favorites listing. Reloads from the store and the catalog every time it
/// gains focus.
pub struct FavoritesScreen {
    favorites: Arc<FavoritesService>,
    hydration: Arc<HydrationService>,
    event_bus: EventBus,
    subscription: SubscriptionId,
    generation: AtomicU64,
    inner: Arc<Mutex<ScreenInner>>,
}

impl FavoritesScreen {
    pub fn new(
        favorites: Arc<FavoritesService>,
        hydration: Arc<HydrationService>,
        event_bus: &EventBus,
    ) -> Self {
        let inner = Arc::new(Mutex::new(ScreenInner::default()));

        // Removal elsewhere (detail screen) drops the row without a reload
        let weak = Arc::downgrade(&inner);
        let subscription = event_bus.subscribe::<FavoriteRemoved, _>(move |event| {
            if let Some(inner) = weak.upgrade() {
                let mut inner = inner.lock().unwrap_or_else(|e| e.into_inner());
                inner.view.movies.retain(|movie| movie.id != event.movie_id);
                inner.removed_since_load.insert(event.movie_id);
            }
        });

        Self {
            favorites,
            hydration,
            event_bus: event_bus.clone(),
            subscription,
            generation: AtomicU64::new(0),
            inner,
        }
    }

    /// Loads favorites and hydrates them. Returns false when a newer focus
    /// or a blur superseded this load and its result was discarded.
    pub async fn on_focus(&self) -> bool {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut inner = self.lock_inner();
            inner.view.loading = true;
            inner.removed_since_load.clear();
        }

        let (report, load_error) = match self.favorites.list() {
            Ok(favorites) => (self.hydration.hydrate_all_with_report(&favorites).await, None),
            Err(e) => {
                log::warn!("Could not read favorites: {}", e);
                (Default::default(), Some(e.kind()))
            }
        };

        let mut inner = self.lock_inner();
        if self.generation.load(Ordering::SeqCst) != generation {
            log::debug!("Discarding stale favorites load (generation {})", generation);
            return false;
        }

        let ScreenInner {
            view,
            removed_since_load,
        } = &mut *inner;

        view.movies = report
            .movies
            .into_iter()
            .filter(|movie| !removed_since_load.contains(&movie.id))
            .collect();
        view.unavailable = report
            .failures
            .into_iter()
            .filter(|failure| !removed_since_load.contains(&failure.movie_id))
            .collect();
        view.load_error = load_error;
        view.loading = false;
        true
    }

    /// Invalidates any load still in flight
    pub fn on_blur(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.lock_inner().view.loading = false;
    }

    pub fn snapshot(&self) -> FavoritesScreenState {
        self.lock_inner().view.clone()
    }

    fn lock_inner(&self) -> MutexGuard<'_, ScreenInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for FavoritesScreen {
    fn drop(&mut self) {
        self.event_bus.unsubscribe(self.subscription);
    }
}
