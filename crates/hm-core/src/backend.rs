use std::cell::Cell;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::error::{CatalogError, CatalogResult};

/// Where a catalog snapshot lives.
///
/// The store only ever loads once and then writes whole snapshots, so the
/// port is deliberately small.
pub trait CatalogBackend {
    /// Read the persisted snapshot. `Ok(None)` means no snapshot exists yet.
    fn load(&self) -> CatalogResult<Option<Catalog>>;

    /// Replace the persisted snapshot with `catalog`.
    fn save(&mut self, catalog: &Catalog) -> CatalogResult<()>;

    /// Write a timestamped copy of `catalog` next to the snapshot, if the
    /// backend supports it. Returns where the copy went.
    fn backup(&self, catalog: &Catalog) -> CatalogResult<Option<PathBuf>>;
}

/// Snapshot stored as a pretty-printed JSON file.
///
/// A document that fails to parse is moved aside to
/// `<stem>_corrupt_<timestamp>.json` before the first save replaces it.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
    unreadable: Cell<bool>,
}

impl JsonFileBackend {
    /// Use the JSON document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            unreadable: Cell::new(false),
        }
    }

    /// The snapshot location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    fn stamped_path(&self, kind: &str) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "catalog".to_string());
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        self.dir().join(format!("{stem}_{kind}_{stamp}.json"))
    }

    fn move_unreadable_aside(&self) -> CatalogResult<()> {
        if !self.unreadable.get() {
            return Ok(());
        }
        let aside = self.stamped_path("corrupt");
        match fs::rename(&self.path, &aside) {
            Ok(()) => warn!(path = %aside.display(), "moved unreadable catalog aside"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(CatalogError::io(&self.path, e)),
        }
        self.unreadable.set(false);
        Ok(())
    }
}

impl CatalogBackend for JsonFileBackend {
    fn load(&self) -> CatalogResult<Option<Catalog>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CatalogError::io(&self.path, e)),
        };
        let catalog: Catalog = match serde_json::from_str(&text) {
            Ok(catalog) => catalog,
            Err(e) => {
                self.unreadable.set(true);
                return Err(e.into());
            }
        };
        debug!(path = %self.path.display(), entries = catalog.len(), "loaded catalog");
        Ok(Some(catalog))
    }

    fn save(&mut self, catalog: &Catalog) -> CatalogResult<()> {
        let dir = self.dir().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| CatalogError::io(&dir, e))?;
        self.move_unreadable_aside()?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| CatalogError::io(&dir, e))?;
        serde_json::to_writer_pretty(&mut tmp, catalog)?;
        tmp.write_all(b"\n")
            .map_err(|e| CatalogError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| CatalogError::io(&self.path, e.error))?;

        debug!(path = %self.path.display(), entries = catalog.len(), "saved catalog");
        Ok(())
    }

    fn backup(&self, catalog: &Catalog) -> CatalogResult<Option<PathBuf>> {
        let path = self.stamped_path("backup");
        let json = serde_json::to_string_pretty(catalog)?;
        fs::write(&path, json).map_err(|e| CatalogError::io(&path, e))?;
        debug!(path = %path.display(), "wrote catalog backup");
        Ok(Some(path))
    }
}

/// Snapshot kept in memory. Used by tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    snapshot: Option<Catalog>,
    saves: usize,
}

impl MemoryBackend {
    /// A backend with no snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that already holds `catalog`.
    pub fn with_snapshot(catalog: Catalog) -> Self {
        Self {
            snapshot: Some(catalog),
            saves: 0,
        }
    }

    /// The last saved snapshot.
    pub fn snapshot(&self) -> Option<&Catalog> {
        self.snapshot.as_ref()
    }

    /// How many times `save` has been called.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl CatalogBackend for MemoryBackend {
    fn load(&self) -> CatalogResult<Option<Catalog>> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, catalog: &Catalog) -> CatalogResult<()> {
        self.snapshot = Some(catalog.clone());
        self.saves += 1;
        Ok(())
    }

    fn backup(&self, _catalog: &Catalog) -> CatalogResult<Option<PathBuf>> {
        Ok(None)
    }
}
