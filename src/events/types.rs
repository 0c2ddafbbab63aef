// src/events/types.rs
//
// Domain events. Each event is an immutable fact that has already occurred
// and carries only the data needed to react.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::MovieId;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    fn event_id(&self) -> Uuid;
    fn occurred_at(&self) -> DateTime<Utc>;
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// FAVORITES EVENTS
// ============================================================================

/// Emitted after a movie was added and the list persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteAdded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: MovieId,
    pub title: String,
    pub favorites_count: usize,
}

impl FavoriteAdded {
    pub fn new(movie_id: MovieId, title: String, favorites_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
            title,
            favorites_count,
        }
    }
}

impl DomainEvent for FavoriteAdded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "FavoriteAdded" }
}

/// Emitted after a movie was removed and the list persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteRemoved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: MovieId,
    pub favorites_count: usize,
}

impl FavoriteRemoved {
    pub fn new(movie_id: MovieId, favorites_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
            favorites_count,
        }
    }
}

impl DomainEvent for FavoriteRemoved {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "FavoriteRemoved" }
}

// ============================================================================
// HYDRATION EVENTS
// ============================================================================

/// Emitted when a favorites hydration batch finished, failures included
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HydrationBatchCompleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub requested: usize,
    pub hydrated: usize,
    pub dropped_ids: Vec<MovieId>,
}

impl HydrationBatchCompleted {
    pub fn new(requested: usize, hydrated: usize, dropped_ids: Vec<MovieId>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            requested,
            hydrated,
            dropped_ids,
        }
    }
}

impl DomainEvent for HydrationBatchCompleted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "HydrationBatchCompleted" }
}
