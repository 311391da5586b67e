//! Service catalog for Cloud Hangman.
//!
//! Owns the mapping from service name to its metadata, persists it as a JSON
//! document, and merges pre-fetched documentation feeds into it. The game
//! engine in `hm-game` consumes a [`Catalog`] for round selection; admin
//! flows mutate it through a [`CatalogStore`].

/// Persistence port and its JSON file / in-memory adapters.
pub mod backend;
/// The name-to-entry mapping and its derived views.
pub mod catalog;
/// Service entries and difficulty levels.
pub mod entry;
/// Error types used throughout the crate.
pub mod error;
/// Merging documentation feeds into a catalog.
pub mod refresh;
/// Built-in entries used when no snapshot exists.
pub mod seed;
/// The catalog store: a catalog plus the backend it persists to.
pub mod store;

/// Re-export persistence types.
pub use backend::{CatalogBackend, JsonFileBackend, MemoryBackend};
/// Re-export the catalog.
pub use catalog::{Catalog, normalize_name};
/// Re-export entry types.
pub use entry::{Difficulty, EntryPatch, ServiceEntry};
/// Re-export error types.
pub use error::{CatalogError, CatalogResult};
/// Re-export the store.
pub use store::CatalogStore;
