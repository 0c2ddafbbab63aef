// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod catalog_service;
pub mod favorites_service;
pub mod hydration_service;

pub use catalog_service::CatalogService;
pub use favorites_service::FavoritesService;
pub use hydration_service::{HydrationFailure, HydrationReport, HydrationService};
