use std::path::Path;

pub fn run(catalog: &Path) -> Result<(), String> {
    let store = super::open_store(catalog);
    let categories = store.categories();

    if categories.is_empty() {
        println!("  No categories.");
        return Ok(());
    }

    for (i, category) in categories.iter().enumerate() {
        let count = store.catalog().filter(Some(category.as_str()), None).len();
        println!("  {}. {category} ({count})", i + 1);
    }

    Ok(())
}
