use std::path::Path;

use colored::Colorize;

pub fn run(catalog: &Path, name: &str) -> Result<(), String> {
    let store = super::open_store(catalog);
    let entry = store
        .catalog()
        .get(name)
        .ok_or_else(|| format!("service not found: \"{name}\""))?;

    println!("{}", hm_core::normalize_name(name).bold());
    println!("  Category:   {}", entry.category);
    println!("  Difficulty: {}", entry.difficulty);
    println!();
    println!("  {}", entry.description);

    if !entry.study_notes.is_empty() {
        println!();
        println!("  {}", "Study notes:".bold());
        for line in entry.study_notes.lines() {
            println!("    {line}");
        }
    }

    Ok(())
}
