use std::path::Path;

use hm_core::{CatalogError, Difficulty, ServiceEntry};

pub fn run(
    catalog: &Path,
    name: &str,
    description: &str,
    category: &str,
    difficulty: &str,
    notes: &str,
    overwrite: bool,
) -> Result<(), String> {
    let difficulty: Difficulty = difficulty.parse().map_err(|e: CatalogError| e.to_string())?;
    let mut store = super::open_store(catalog);

    if overwrite {
        let entry = ServiceEntry::new(description, category, difficulty, notes);
        let replaced = store.upsert(name, entry).map_err(|e| e.to_string())?;
        let key = hm_core::normalize_name(name);
        if replaced {
            println!("  Replaced {key}.");
        } else {
            println!("  Added {key}.");
        }
        return Ok(());
    }

    let key = store
        .add(name, description, category, difficulty, notes)
        .map_err(|e| e.to_string())?;
    println!("  Added {key} ({category}, {difficulty}).");
    Ok(())
}
