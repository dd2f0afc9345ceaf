//! The `traitquiz list-traits` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use traitquiz_core::config::load_config_from;

pub fn execute(catalog: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let engine = super::load_engine(catalog.or(config.catalog).as_deref())?;
    let catalog = engine.catalog();

    println!(
        "Catalog: {} ({} traits, {} scenarios)",
        catalog.info().name,
        catalog.trait_count(),
        catalog.scenario_count()
    );

    let mut table = Table::new();
    table.set_header(vec!["#", "Trait", "Scenarios"]);
    for (i, t) in catalog.traits().iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(t.name()),
            Cell::new(t.scenarios().len()),
        ]);
    }

    println!("{table}");
    Ok(())
}
