//! The built-in entrepreneurial trait catalog, embedded at compile time.

use std::path::Path;

use anyhow::Result;

use crate::model::Catalog;
use crate::parser::parse_catalog_str;

/// Raw TOML for the built-in catalog.
pub const BUILTIN_CATALOG_TOML: &str =
    include_str!("../../../catalogs/entrepreneurial-traits.toml");

/// Parse and validate the built-in catalog.
pub fn builtin_catalog() -> Result<Catalog> {
    parse_catalog_str(BUILTIN_CATALOG_TOML, Path::new("<builtin>"))
}
