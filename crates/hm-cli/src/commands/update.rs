use std::path::Path;

use hm_core::EntryPatch;

pub fn run(
    catalog: &Path,
    name: &str,
    description: Option<String>,
    category: Option<String>,
    difficulty: Option<String>,
    notes: Option<String>,
) -> Result<(), String> {
    let patch = EntryPatch {
        difficulty: super::parse_difficulty(difficulty.as_deref())?,
        description,
        category,
        study_notes: notes,
    };
    if patch.is_empty() {
        return Err("nothing to update (pass --description, --category, --difficulty or --notes)".into());
    }

    let mut store = super::open_store(catalog);
    let key = hm_core::normalize_name(name);
    if !store.update(name, &patch).map_err(|e| e.to_string())? {
        return Err(format!("service not found: \"{key}\""));
    }

    println!("  Updated {key}.");
    Ok(())
}
