use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::entry::{Difficulty, EntryPatch, ServiceEntry};
use crate::error::{CatalogError, CatalogResult};

/// Normalize a service name to its catalog key: trimmed and uppercased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// All guessable services, keyed by uppercase name.
///
/// Serializes as a plain JSON object so the on-disk document is just
/// `{"EC2": {...}, "S3": {...}}`. Keys are kept sorted, which makes listings
/// and seeded round selection reproducible. Deserializing goes through
/// the same key rules as [`FromIterator`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: BTreeMap<String, ServiceEntry>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a service with this name (case-insensitive) exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&normalize_name(name))
    }

    /// Look up an entry by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&ServiceEntry> {
        self.entries.get(&normalize_name(name))
    }

    /// Mutable lookup by name (case-insensitive).
    pub fn get_mut(&mut self, name: &str) -> Option<&mut ServiceEntry> {
        self.entries.get_mut(&normalize_name(name))
    }

    /// Iterate over `(name, entry)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ServiceEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// All names in order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Sorted, deduplicated list of categories present in the catalog.
    pub fn categories(&self) -> Vec<String> {
        self.entries
            .values()
            .map(|e| e.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Entries matching both filters. `None` means no constraint. The
    /// category comparison ignores case.
    pub fn filter(
        &self,
        category: Option<&str>,
        difficulty: Option<Difficulty>,
    ) -> Vec<(&str, &ServiceEntry)> {
        let category = category.map(|c| c.trim().to_lowercase());
        self.iter()
            .filter(|(_, e)| {
                category
                    .as_deref()
                    .is_none_or(|c| e.category.to_lowercase() == c)
            })
            .filter(|(_, e)| difficulty.is_none_or(|d| e.difficulty == d))
            .collect()
    }

    /// Add a new entry. Fails if the name is taken or cannot be guessed.
    pub fn add(&mut self, name: &str, entry: ServiceEntry) -> CatalogResult<String> {
        let key = validated_key(name)?;
        if self.entries.contains_key(&key) {
            return Err(CatalogError::DuplicateEntry(key));
        }
        self.entries.insert(key.clone(), entry);
        Ok(key)
    }

    /// Insert or overwrite an entry. Returns the previous entry, if any.
    pub fn upsert(
        &mut self,
        name: &str,
        entry: ServiceEntry,
    ) -> CatalogResult<Option<ServiceEntry>> {
        let key = validated_key(name)?;
        Ok(self.entries.insert(key, entry))
    }

    /// Merge a patch into an existing entry. Returns false if absent.
    pub fn update(&mut self, name: &str, patch: &EntryPatch) -> bool {
        match self.get_mut(name) {
            Some(entry) => {
                entry.apply(patch);
                true
            }
            None => false,
        }
    }

    /// Remove an entry. Returns the removed entry if it existed.
    pub fn remove(&mut self, name: &str) -> Option<ServiceEntry> {
        self.entries.remove(&normalize_name(name))
    }
}

impl FromIterator<(String, ServiceEntry)> for Catalog {
    /// Keys are normalized. Names that cannot be guessed are skipped, and
    /// when two names normalize to the same key the first one is kept.
    fn from_iter<I: IntoIterator<Item = (String, ServiceEntry)>>(iter: I) -> Self {
        let mut entries = BTreeMap::new();
        for (name, entry) in iter {
            let key = match validated_key(&name) {
                Ok(key) => key,
                Err(e) => {
                    warn!("skipping service: {e}");
                    continue;
                }
            };
            match entries.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
                Entry::Occupied(slot) => {
                    warn!(name = %name, key = %slot.key(), "skipping service that clashes with an earlier entry");
                }
            }
        }
        Self { entries }
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, ServiceEntry>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}

fn validated_key(name: &str) -> CatalogResult<String> {
    let key = normalize_name(name);
    if key.is_empty() || !key.chars().all(char::is_alphanumeric) {
        return Err(CatalogError::InvalidName(name.to_string()));
    }
    Ok(key)
}
