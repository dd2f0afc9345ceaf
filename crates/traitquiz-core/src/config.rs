//! traitquiz configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level traitquiz configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitquizConfig {
    /// Catalog file to use instead of the built-in one.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// Fixed seed for reproducible draws.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Output directory for saved reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Report formats to save: text, json, html, markdown, all.
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./traitquiz-results")
}

fn default_format() -> String {
    "text".to_string()
}

impl Default for TraitquizConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            seed: None,
            output_dir: default_output_dir(),
            format: default_format(),
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `traitquiz.toml` in the current directory
/// 2. `~/.config/traitquiz/config.toml`
///
/// Environment variable overrides: `TRAITQUIZ_CATALOG`, `TRAITQUIZ_SEED`.
pub fn load_config() -> Result<TraitquizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<TraitquizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("traitquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!("using config {}", path.display());
            toml::from_str::<TraitquizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => TraitquizConfig::default(),
    };

    // Apply env var overrides
    if let Ok(catalog) = std::env::var("TRAITQUIZ_CATALOG") {
        if !catalog.is_empty() {
            config.catalog = Some(PathBuf::from(catalog));
        }
    }

    if let Ok(seed) = std::env::var("TRAITQUIZ_SEED") {
        let seed = seed
            .trim()
            .parse::<u64>()
            .with_context(|| format!("TRAITQUIZ_SEED is not a valid u64: {seed}"))?;
        config.seed = Some(seed);
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("traitquiz"))
}
