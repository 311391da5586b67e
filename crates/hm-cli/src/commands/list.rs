use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(catalog: &Path, category: Option<&str>, difficulty: Option<&str>) -> Result<(), String> {
    let difficulty = super::parse_difficulty(difficulty)?;
    let store = super::open_store(catalog);
    let results = store.catalog().filter(category, difficulty);

    if results.is_empty() {
        println!("  No services found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Category", "Difficulty", "Description"]);

    for (name, entry) in &results {
        let desc = if entry.description.chars().count() > 60 {
            let short: String = entry.description.chars().take(57).collect();
            format!("{short}...")
        } else if entry.description.is_empty() {
            "-".to_string()
        } else {
            entry.description.clone()
        };

        table.add_row(vec![
            name.to_string(),
            entry.category.clone(),
            entry.difficulty.to_string(),
            desc,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} services", results.len());

    Ok(())
}
