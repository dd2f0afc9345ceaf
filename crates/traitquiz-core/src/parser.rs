//! TOML catalog parser.
//!
//! Loads trait catalogs from TOML files and directories, validates them into
//! [`Catalog`]s, and lints them for softer issues.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::CatalogError;
use crate::model::{Catalog, CatalogInfo, ScenarioDefinition, TraitDefinition};

/// Intermediate TOML structure for parsing catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    catalog: TomlCatalogHeader,
    #[serde(default)]
    traits: Vec<TomlTrait>,
}

#[derive(Debug, Deserialize)]
struct TomlCatalogHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlTrait {
    name: String,
    #[serde(default)]
    scenarios: Vec<TomlScenario>,
}

// `correct_option` may appear in authored files; it is accepted and ignored.
#[derive(Debug, Deserialize)]
struct TomlScenario {
    prompt: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    feedback: BTreeMap<String, String>,
}

/// Parse a single TOML file into a validated `Catalog`.
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a validated `Catalog` (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Catalog> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let traits = parsed
        .traits
        .into_iter()
        .map(|t| -> Result<TraitDefinition, CatalogError> {
            let scenarios = t
                .scenarios
                .into_iter()
                .enumerate()
                .map(|(index, s)| -> Result<ScenarioDefinition, CatalogError> {
                    let feedback = s
                        .feedback
                        .into_iter()
                        .map(|(key, text)| match feedback_position(&key) {
                            Some(position) => Ok((position, text)),
                            None => Err(CatalogError::InvalidFeedbackKey {
                                trait_name: t.name.clone(),
                                scenario: index,
                                key,
                            }),
                        })
                        .collect::<Result<BTreeMap<_, _>, _>>()?;

                    Ok(ScenarioDefinition {
                        prompt: s.prompt,
                        options: s.options,
                        feedback,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            Ok(TraitDefinition {
                name: t.name,
                scenarios,
            })
        })
        .collect::<Result<Vec<_>, CatalogError>>()
        .with_context(|| format!("invalid catalog: {}", source_path.display()))?;

    let info = CatalogInfo {
        id: parsed.catalog.id,
        name: parsed.catalog.name,
        description: parsed.catalog.description,
    };

    let catalog = Catalog::new(info, traits)
        .with_context(|| format!("invalid catalog: {}", source_path.display()))?;

    tracing::info!(
        catalog = %catalog.info().id,
        traits = catalog.trait_count(),
        scenarios = catalog.scenario_count(),
        "catalog loaded"
    );

    Ok(catalog)
}

/// Parse a feedback key written as a plain decimal position.
///
/// Signs, padding and leading zeros are rejected so that no two keys in a
/// table can name the same position.
fn feedback_position(key: &str) -> Option<usize> {
    let canonical = !key.is_empty()
        && key.bytes().all(|b| b.is_ascii_digit())
        && (key == "0" || !key.starts_with('0'));
    if canonical {
        key.parse().ok()
    } else {
        None
    }
}

/// Recursively collect all `.toml` files under a directory, sorted by path.
pub fn catalog_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();

        if path.is_dir() {
            files.extend(catalog_files(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Recursively load all `.toml` catalog files from a directory.
///
/// Files that fail to parse or validate are skipped with a warning.
pub fn load_catalog_directory(dir: &Path) -> Result<Vec<Catalog>> {
    let mut catalogs = Vec::new();

    for path in catalog_files(dir)? {
        match parse_catalog(&path) {
            Ok(catalog) => catalogs.push(catalog),
            Err(e) => {
                tracing::warn!("skipping {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(catalogs)
}

/// A non-fatal issue found by [`validate_catalog`].
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The trait name (if applicable).
    pub trait_name: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Lint a validated catalog for issues that do not break evaluation.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for t in catalog.traits() {
        let warn = |message: String| ValidationWarning {
            trait_name: Some(t.name().to_string()),
            message,
        };

        // A single-scenario pool never varies between sessions
        if t.scenarios().len() == 1 {
            warnings.push(warn(
                "only one scenario; every session draws the same question".into(),
            ));
        }

        let mut seen_prompts = HashSet::new();
        for (i, q) in t.scenarios().iter().enumerate() {
            let n = i + 1;

            if q.prompt().trim().is_empty() {
                warnings.push(warn(format!("scenario {n}: prompt is empty")));
            } else if !seen_prompts.insert(q.prompt().trim()) {
                warnings.push(warn(format!("scenario {n}: duplicate prompt")));
            }

            for (p, option) in q.options().iter().enumerate() {
                if option.trim().is_empty() {
                    warnings.push(warn(format!("scenario {n}: option {} is empty", p + 1)));
                }
                if q.feedback_for(p + 1).is_some_and(|f| f.trim().is_empty()) {
                    warnings.push(warn(format!(
                        "scenario {n}: feedback for option {} is empty",
                        p + 1
                    )));
                }
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_TOML: &str = r#"
[catalog]
id = "test-catalog"
name = "Test Catalog"
description = "A test catalog"

[[traits]]
name = "A"

[[traits.scenarios]]
prompt = "Pick one for A"
options = ["x", "y"]
correct_option = 2

[traits.scenarios.feedback]
1 = "fx"
2 = "fy"

[[traits]]
name = "B"

[[traits.scenarios]]
prompt = "Pick one for B"
options = ["p", "q"]

[traits.scenarios.feedback]
1 = "fp"
2 = "fq"
"#;

    fn parse(toml: &str) -> Result<Catalog> {
        parse_catalog_str(toml, &PathBuf::from("test.toml"))
    }

    #[test]
    fn parse_valid_toml() {
        let catalog = parse(VALID_TOML).unwrap();
        assert_eq!(catalog.info().id, "test-catalog");
        assert_eq!(catalog.info().name, "Test Catalog");
        assert_eq!(catalog.trait_names(), vec!["A", "B"]);
        let q = &catalog.traits()[0].scenarios()[0];
        assert_eq!(q.options(), ["x", "y"]);
        assert_eq!(q.feedback_for(2), Some("fy"));
    }

    #[test]
    fn parse_missing_feedback_is_fatal() {
        let toml = r#"
[catalog]
id = "gap"
name = "Gap"

[[traits]]
name = "A"

[[traits.scenarios]]
prompt = "Pick"
options = ["x", "y", "z"]

[traits.scenarios.feedback]
1 = "fx"
3 = "fz"
"#;
        let err = parse(toml).unwrap_err();
        let root = err.downcast_ref::<CatalogError>().unwrap();
        assert!(matches!(
            root,
            CatalogError::MissingFeedback { position: 2, .. }
        ));
    }

    #[test]
    fn parse_non_numeric_feedback_key_is_fatal() {
        let toml = r#"
[catalog]
id = "bad-key"
name = "Bad Key"

[[traits]]
name = "A"

[[traits.scenarios]]
prompt = "Pick"
options = ["x"]

[traits.scenarios.feedback]
first = "fx"
"#;
        let err = parse(toml).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::InvalidFeedbackKey { key, .. }) if key == "first"
        ));
    }

    #[test]
    fn parse_rejects_keys_aliasing_a_position() {
        let toml = r#"
[catalog]
id = "alias"
name = "Alias"

[[traits]]
name = "A"

[[traits.scenarios]]
prompt = "Pick"
options = ["x", "y"]

[traits.scenarios.feedback]
1 = "first"
"01" = "second"
2 = "fy"
"#;
        let err = parse(toml).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::InvalidFeedbackKey { key, .. }) if key == "01"
        ));
    }

    #[test]
    fn feedback_position_accepts_only_plain_decimals() {
        assert_eq!(feedback_position("1"), Some(1));
        assert_eq!(feedback_position("12"), Some(12));
        assert_eq!(feedback_position("0"), Some(0));
        assert_eq!(feedback_position("01"), None);
        assert_eq!(feedback_position(" 1"), None);
        assert_eq!(feedback_position("+2"), None);
        assert_eq!(feedback_position(""), None);
        assert_eq!(feedback_position("99999999999999999999999"), None);
    }

    #[test]
    fn parse_trait_without_scenarios_is_fatal() {
        let toml = r#"
[catalog]
id = "empty-pool"
name = "Empty Pool"

[[traits]]
name = "A"
"#;
        let err = parse(toml).unwrap_err();
        assert_eq!(
            err.downcast_ref::<CatalogError>(),
            Some(&CatalogError::EmptyPool("A".into()))
        );
    }

    #[test]
    fn parse_catalog_without_traits_is_fatal() {
        let toml = r#"
[catalog]
id = "none"
name = "None"
"#;
        let err = parse(toml).unwrap_err();
        assert_eq!(
            err.downcast_ref::<CatalogError>(),
            Some(&CatalogError::NoTraits)
        );
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse(bad).is_err());
    }

    #[test]
    fn validate_flags_single_scenario_pools() {
        let catalog = parse(VALID_TOML).unwrap();
        let warnings = validate_catalog(&catalog);
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.message.contains("only one scenario")));
    }

    #[test]
    fn validate_flags_blank_text_and_duplicate_prompts() {
        let toml = r#"
[catalog]
id = "lint"
name = "Lint"

[[traits]]
name = "A"

[[traits.scenarios]]
prompt = "Same"
options = ["x", "y"]

[traits.scenarios.feedback]
1 = "fx"
2 = "  "

[[traits.scenarios]]
prompt = "Same"
options = ["x"]

[traits.scenarios.feedback]
1 = "fx"
"#;
        let catalog = parse(toml).unwrap();
        let warnings = validate_catalog(&catalog);
        assert!(warnings
            .iter()
            .any(|w| w.message == "scenario 1: feedback for option 2 is empty"));
        assert!(warnings
            .iter()
            .any(|w| w.message == "scenario 2: duplicate prompt"));
        assert!(warnings
            .iter()
            .all(|w| w.trait_name.as_deref() == Some("A")));
    }

    #[test]
    fn load_directory_skips_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("good.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("bad.toml"), "[catalog]\nid = 1").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(
            nested.join("builtin.toml"),
            crate::builtin::BUILTIN_CATALOG_TOML,
        )
        .unwrap();

        let mut ids: Vec<String> = load_catalog_directory(dir.path())
            .unwrap()
            .into_iter()
            .map(|c| c.info().id.clone())
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["entrepreneurial-traits", "test-catalog"]);
    }

    #[test]
    fn catalog_files_are_sorted_and_recursive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("b")).unwrap();
        std::fs::write(dir.path().join("b").join("z.toml"), "").unwrap();
        std::fs::write(dir.path().join("a.toml"), "").unwrap();
        std::fs::write(dir.path().join("readme.md"), "").unwrap();

        let files = catalog_files(dir.path()).unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("a.toml"), dir.path().join("b").join("z.toml")]
        );
    }

    #[test]
    fn load_directory_rejects_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("c.toml");
        std::fs::write(&file, VALID_TOML).unwrap();
        assert!(load_catalog_directory(&file).is_err());
    }
}
