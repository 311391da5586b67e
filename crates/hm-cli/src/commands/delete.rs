use std::path::Path;

pub fn run(catalog: &Path, name: &str) -> Result<(), String> {
    let mut store = super::open_store(catalog);
    let key = hm_core::normalize_name(name);

    if !store.delete(name).map_err(|e| e.to_string())? {
        return Err(format!("service not found: \"{key}\""));
    }

    println!("  Deleted {key}.");
    Ok(())
}
