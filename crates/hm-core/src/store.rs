use std::path::PathBuf;

use tracing::{info, warn};

use crate::backend::{CatalogBackend, JsonFileBackend};
use crate::catalog::{Catalog, normalize_name};
use crate::entry::{Difficulty, EntryPatch, ServiceEntry};
use crate::error::CatalogResult;
use crate::seed::default_catalog;

/// The live catalog together with the backend it persists to.
///
/// Every mutation writes the whole catalog back immediately. The store
/// assumes a single owner; wrap it in a lock before sharing it.
#[derive(Debug)]
pub struct CatalogStore<B = JsonFileBackend> {
    backend: B,
    catalog: Catalog,
}

impl CatalogStore<JsonFileBackend> {
    /// Open the JSON snapshot at `path`, falling back to the seed catalog.
    pub fn open_file(path: impl Into<PathBuf>) -> Self {
        Self::open(JsonFileBackend::new(path))
    }
}

impl<B: CatalogBackend> CatalogStore<B> {
    /// Load the catalog from `backend`.
    ///
    /// A missing or unreadable snapshot is not an error: the built-in seed
    /// catalog is used instead and nothing is written until the first
    /// mutation. A file backend moves an unreadable document aside before
    /// that first write.
    pub fn open(backend: B) -> Self {
        let catalog = match backend.load() {
            Ok(Some(catalog)) => catalog,
            Ok(None) => default_catalog(),
            Err(e) => {
                warn!("catalog snapshot unreadable, using built-in services: {e}");
                default_catalog()
            }
        };
        Self { backend, catalog }
    }

    /// The current catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Sorted, deduplicated categories of the current catalog.
    pub fn categories(&self) -> Vec<String> {
        self.catalog.categories()
    }

    /// Persist the current catalog.
    pub fn save(&mut self) -> CatalogResult<()> {
        self.backend.save(&self.catalog)
    }

    /// Save `next` and make it the live catalog. The live catalog is left
    /// untouched when the save fails.
    fn commit(&mut self, next: Catalog) -> CatalogResult<()> {
        self.backend.save(&next)?;
        self.catalog = next;
        Ok(())
    }

    /// Add a new service. Fails with `DuplicateEntry` if the name is taken.
    /// Returns the normalized name.
    pub fn add(
        &mut self,
        name: &str,
        description: &str,
        category: &str,
        difficulty: Difficulty,
        study_notes: &str,
    ) -> CatalogResult<String> {
        let entry = ServiceEntry::new(description, category, difficulty, study_notes);
        let mut next = self.catalog.clone();
        let key = next.add(name, entry)?;
        self.commit(next)?;
        info!(name = %key, "added service");
        Ok(key)
    }

    /// Add a service, overwriting any existing entry with the same name.
    /// Returns true if an entry was replaced.
    pub fn upsert(&mut self, name: &str, entry: ServiceEntry) -> CatalogResult<bool> {
        let mut next = self.catalog.clone();
        let replaced = next.upsert(name, entry)?.is_some();
        self.commit(next)?;
        info!(name = %normalize_name(name), replaced, "upserted service");
        Ok(replaced)
    }

    /// Merge the non-empty fields of `patch` into an existing service.
    /// Returns false without writing if the service does not exist.
    pub fn update(&mut self, name: &str, patch: &EntryPatch) -> CatalogResult<bool> {
        let mut next = self.catalog.clone();
        if !next.update(name, patch) {
            return Ok(false);
        }
        self.commit(next)?;
        info!(name = %normalize_name(name), "updated service");
        Ok(true)
    }

    /// Remove a service. Returns false without writing if it does not exist.
    pub fn delete(&mut self, name: &str) -> CatalogResult<bool> {
        let mut next = self.catalog.clone();
        if next.remove(name).is_none() {
            return Ok(false);
        }
        self.commit(next)?;
        info!(name = %normalize_name(name), "deleted service");
        Ok(true)
    }

    /// Install a whole new snapshot (e.g. the result of a content refresh).
    /// Writes a backup of the new snapshot when the backend supports it and
    /// returns its location.
    pub fn replace(&mut self, catalog: Catalog) -> CatalogResult<Option<PathBuf>> {
        self.commit(catalog)?;
        let backup = self.backend.backup(&self.catalog)?;
        info!(entries = self.catalog.len(), "installed new catalog snapshot");
        Ok(backup)
    }
}
