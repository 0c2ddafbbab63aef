// src/application/screens/mod.rs
//
// Per-screen state holders. Each screen tags its requests with a generation
// and only applies a response whose generation is still current.

pub mod detail_screen;
pub mod favorites_screen;

pub use detail_screen::{DetailScreen, DetailView};
pub use favorites_screen::{FavoritesScreen, FavoritesScreenState};
