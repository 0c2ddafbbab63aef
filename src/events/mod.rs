// src/events/mod.rs
//
// Internal Event System - Public API

pub mod bus;
pub mod types;

pub use bus::{EventBus, EventLogEntry, SubscriptionId};
pub use types::{DomainEvent, FavoriteAdded, FavoriteRemoved, HydrationBatchCompleted};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
