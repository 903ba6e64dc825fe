//! Favorites watchlist.
//!
//! The user-curated list of equity quotes, with persistence and bulk
//! refresh. Data flows in one direction:
//!
//! ```text
//!   toggle/remove/reorder ──> FavoritesList (in memory, RwLock)
//!                                   │ serialize snapshot
//!                                   ▼
//!                             write actor ──> PreferencesStore
//!                                   │
//!                                   ▼
//!                             DomainEventSink (announce change)
//! ```
//!
//! File roles:
//! 1. `model.rs` — the list itself and its editing rules (uniqueness,
//!    ordering, index handling).
//! 2. `service.rs` — orchestration: in-flight toggle guard, lock
//!    discipline, persistence, events.
//! 3. `refresh.rs` — bounded fan-out of quote requests and the
//!    summary handed back to callers.
//!
//! Locks are never held across awaits: a mutation serializes the list
//! and enqueues the write inside the lock (enqueueing never blocks),
//! then awaits the write outcome after releasing it. Queue order
//! therefore matches mutation order, and the stored blob never lags
//! behind an acknowledged change.

pub mod model;
pub mod refresh;
pub mod service;


// Re-export the service surface.
pub use model::FavoritesList;
pub use refresh::RefreshSummary;
pub use service::{FavoritesLookup, FavoritesService, FavoritesServiceTrait, ToggleOutcome};
