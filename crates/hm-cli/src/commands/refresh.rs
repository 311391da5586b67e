use std::path::Path;

use colored::Colorize;

use hm_core::refresh::{FeedFile, RefreshScope, refresh};

pub fn run(catalog: &Path, feed: &Path, scope: &str) -> Result<(), String> {
    let scope = RefreshScope::parse(scope)
        .ok_or_else(|| format!("unknown scope '{scope}', use: docs, cert, blogs, all"))?;
    let feed = FeedFile::load(feed).map_err(|e| format!("cannot read feed: {e}"))?;
    let mut store = super::open_store(catalog);

    println!("  {} from {scope}", "Refreshing".bold());
    let report = refresh(store.catalog(), &feed, scope);
    let backup = store.replace(report.catalog).map_err(|e| e.to_string())?;

    println!("  Total updates: {}", report.changes.len());
    for change in &report.changes {
        println!("  - {change}");
    }
    println!("  Catalog saved to {}", store.backend().path().display());
    if let Some(path) = backup {
        println!("  Backup saved to {}", path.display());
    }

    Ok(())
}
