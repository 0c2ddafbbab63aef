// src/services/hydration_service.rs
//
// Detail Hydrator
//
// Turns stored favorites into full catalog records for display. Fetches run
// concurrently (bounded); a failed entry is dropped from the result and
// never aborts the batch. Output order always equals favorites order.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::domain::{FavoritesList, MovieDetail, MovieId};
use crate::error::{AppError, AppResult, ErrorKind};
use crate::events::{EventBus, HydrationBatchCompleted};
use crate::integrations::MovieCatalog;
use crate::services::FavoritesService;

/// An entry that could not be hydrated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HydrationFailure {
    pub movie_id: MovieId,
    pub kind: ErrorKind,
}

/// Outcome of a batch: hydrated records in favorites order plus what was dropped
#[derive(Debug, Clone, Default)]
pub struct HydrationReport {
    pub movies: Vec<MovieDetail>,
    pub failures: Vec<HydrationFailure>,
}

pub struct HydrationService {
    catalog: Arc<dyn MovieCatalog>,
    favorites: Arc<FavoritesService>,
    event_bus: Arc<EventBus>,
    max_concurrency: usize,
}

impl HydrationService {
    pub fn new(
        catalog: Arc<dyn MovieCatalog>,
        favorites: Arc<FavoritesService>,
        event_bus: Arc<EventBus>,
        max_concurrency: usize,
    ) -> Self {
        Self {
            catalog,
            favorites,
            event_bus,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Full records for every favorite that could be fetched, in favorites order
    pub async fn hydrate_all(&self, favorites: &FavoritesList) -> Vec<MovieDetail> {
        self.hydrate_all_with_report(favorites).await.movies
    }

    pub async fn hydrate_all_with_report(&self, favorites: &FavoritesList) -> HydrationReport {
        let ids = favorites.ids();
        if ids.is_empty() {
            return HydrationReport::default();
        }

        let permits = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = JoinSet::new();

        for (index, movie_id) in ids.iter().copied().enumerate() {
            let catalog = Arc::clone(&self.catalog);
            let permits = Arc::clone(&permits);

            tasks.spawn(async move {
                let _permit = permits.acquire_owned().await;
                (index, catalog.get_movie(movie_id).await)
            });
        }

        let mut slots: Vec<Option<AppResult<MovieDetail>>> = ids.iter().map(|_| None).collect();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => slots[index] = Some(result),
                Err(e) => log::error!("Hydration task failed to complete: {}", e),
            }
        }

        let mut report = HydrationReport::default();

        for (movie_id, slot) in ids.iter().copied().zip(slots) {
            match slot {
                Some(Ok(detail)) => report.movies.push(detail),
                Some(Err(e)) => {
                    log::warn!("Dropping favorite {} from display: {}", movie_id, e);
                    report.failures.push(HydrationFailure {
                        movie_id,
                        kind: e.kind(),
                    });
                }
                None => report.failures.push(HydrationFailure {
                    movie_id,
                    kind: ErrorKind::Internal,
                }),
            }
        }

        self.event_bus.emit(HydrationBatchCompleted::new(
            ids.len(),
            report.movies.len(),
            report.failures.iter().map(|f| f.movie_id).collect(),
        ));

        report
    }

    /// Single record for the detail view.
    /// `AppError::NotFound` is kept distinct from transport failures.
    pub async fn hydrate_one(&self, movie_id: MovieId) -> AppResult<MovieDetail> {
        match self.catalog.get_movie(movie_id).await {
            Err(AppError::NotFound) => {
                log::info!("Movie {} not found in catalog", movie_id);
                Err(AppError::NotFound)
            }
            other => other,
        }
    }

    /// Fresh membership check, never cached
    pub fn is_favorite(&self, movie_id: MovieId) -> AppResult<bool> {
        self.favorites.contains(movie_id)
    }
}
