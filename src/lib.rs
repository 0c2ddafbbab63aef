// src/lib.rs
// MovieHub - Movie browser with a local favorites list
//
// Architecture:
// - Domain-centric: movie and favorites rules live in `domain`
// - Event-driven: the store announces membership changes on the event bus
// - Explicit: one injected favorites store, no ad-hoc storage access
// - Local-first: favorites persist in SQLite, details come from the catalog
// - Application Layer: commands, DTOs and screen state for the UI boundary

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    validate_movie_summary, DomainError, FavoritesList, Genre, MovieDetail, MovieId,
    MovieSummary,
};

// ============================================================================
// PUBLIC API - Errors and Configuration
// ============================================================================

pub use config::{AppConfig, CatalogConfig, StorageConfig};
pub use error::{AppError, AppResult, ErrorKind};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus, DomainEvent, EventBus, EventLogEntry, FavoriteAdded, FavoriteRemoved,
    HydrationBatchCompleted, SubscriptionId,
};

// ============================================================================
// PUBLIC API - Database and Repositories
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};
pub use repositories::{
    FavoritesRepository, KeyValueFavoritesRepository, KeyValueRepository,
    SqliteKeyValueRepository, DEFAULT_FAVORITES_KEY,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    CatalogService, FavoritesService, HydrationFailure, HydrationReport, HydrationService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, DetailScreen, DetailView, FavoritesScreen};

pub use application::commands;
pub use application::dto;

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{MovieCatalog, TmdbClient};
