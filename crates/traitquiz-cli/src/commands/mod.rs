pub mod init;
pub mod list_traits;
pub mod show;
pub mod take;
pub mod validate;

use std::path::Path;

use anyhow::Result;

use traitquiz_core::engine::AssessmentEngine;
use traitquiz_core::parser::parse_catalog;

/// Build an engine from a catalog file, or the built-in catalog if none.
pub(crate) fn load_engine(catalog: Option<&Path>) -> Result<AssessmentEngine> {
    match catalog {
        Some(path) => Ok(AssessmentEngine::new(parse_catalog(path)?)),
        None => AssessmentEngine::builtin(),
    }
}
