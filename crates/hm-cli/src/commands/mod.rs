pub mod add;
pub mod categories;
pub mod delete;
pub mod list;
pub mod play;
pub mod refresh;
pub mod show;
pub mod update;

use std::path::Path;

use hm_core::{CatalogStore, Difficulty};
use tracing::debug;

/// Open the catalog file, falling back to the built-in services.
fn open_store(path: &Path) -> CatalogStore {
    let store = CatalogStore::open_file(path);
    debug!(path = %path.display(), entries = store.catalog().len(), "opened catalog");
    store
}

/// Parse an optional difficulty argument.
fn parse_difficulty(value: Option<&str>) -> Result<Option<Difficulty>, String> {
    value
        .map(|v| v.parse::<Difficulty>().map_err(|e| e.to_string()))
        .transpose()
}
