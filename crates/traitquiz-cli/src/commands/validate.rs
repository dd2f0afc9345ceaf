//! The `traitquiz validate` command.

use std::path::PathBuf;

use anyhow::Result;

use traitquiz_core::parser::{catalog_files, parse_catalog, validate_catalog};

pub fn execute(catalog_path: PathBuf) -> Result<()> {
    let files = if catalog_path.is_dir() {
        catalog_files(&catalog_path)?
    } else {
        vec![catalog_path]
    };

    let mut total_warnings = 0;
    let mut invalid = 0;

    for path in &files {
        let catalog = match parse_catalog(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                println!("{}: INVALID: {e:#}", path.display());
                invalid += 1;
                continue;
            }
        };

        println!(
            "Catalog: {} ({} traits, {} scenarios)",
            catalog.info().name,
            catalog.trait_count(),
            catalog.scenario_count()
        );

        let warnings = validate_catalog(&catalog);
        for w in &warnings {
            let prefix = w
                .trait_name
                .as_ref()
                .map(|name| format!("  [{name}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if invalid > 0 {
        anyhow::bail!("{invalid} of {} catalog file(s) invalid", files.len());
    }

    if total_warnings == 0 {
        println!("All catalogs valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
