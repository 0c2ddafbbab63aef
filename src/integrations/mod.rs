// src/integrations/mod.rs
//
// External Integrations

pub mod catalog;
pub mod tmdb;

pub use catalog::MovieCatalog;
pub use tmdb::TmdbClient;

#[cfg(test)]
pub use catalog::MockMovieCatalog;
