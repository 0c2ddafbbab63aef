// src/application/state.rs

use std::sync::Arc;

use crate::config::CatalogConfig;
use crate::events::EventBus;
use crate::integrations::MovieCatalog;
use crate::repositories::FavoritesRepository;
use crate::services::{CatalogService, FavoritesService, HydrationService};

/// Application state shared by all commands and screens.
/// Services are built once and injected; nothing reaches storage directly.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub favorites_service: Arc<FavoritesService>,
    pub hydration_service: Arc<HydrationService>,
    pub catalog_service: Arc<CatalogService>,
    pub poster_base_url: String,
}

impl AppState {
    pub fn new(
        favorites_repo: Arc<dyn FavoritesRepository>,
        catalog: Arc<dyn MovieCatalog>,
        event_bus: Arc<EventBus>,
        catalog_config: &CatalogConfig,
    ) -> Self {
        let favorites_service = Arc::new(FavoritesService::new(
            favorites_repo,
            Arc::clone(&event_bus),
        ));
        let hydration_service = Arc::new(HydrationService::new(
            Arc::clone(&catalog),
            Arc::clone(&favorites_service),
            Arc::clone(&event_bus),
            catalog_config.max_concurrency,
        ));
        let catalog_service = Arc::new(CatalogService::new(catalog));

        Self {
            event_bus,
            favorites_service,
            hydration_service,
            catalog_service,
            poster_base_url: catalog_config.poster_base_url.clone(),
        }
    }
}
