//! Core data model types for traitquiz.
//!
//! Catalogs are authored as plain [`TraitDefinition`]s and only become a
//! [`Catalog`] after [`Catalog::new`] has checked them. A `Catalog` is
//! immutable from then on and is shared across sessions by `Arc`.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Identifying metadata for a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogInfo {
    /// Unique identifier for this catalog.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of what the catalog assesses.
    #[serde(default)]
    pub description: String,
}

/// An unvalidated trait as supplied by a catalog author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraitDefinition {
    /// Trait name, e.g. "Perseverance".
    pub name: String,
    /// The pool of scenarios one is drawn from per session.
    #[serde(default)]
    pub scenarios: Vec<ScenarioDefinition>,
}

/// An unvalidated scenario question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    /// The situational prompt.
    pub prompt: String,
    /// Answer choices, in display order.
    #[serde(default)]
    pub options: Vec<String>,
    /// Feedback keyed by 1-based option position.
    #[serde(default)]
    pub feedback: BTreeMap<usize, String>,
}

impl ScenarioDefinition {
    pub fn new<P, O, F>(prompt: P, options: O, feedback: F) -> Self
    where
        P: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
        F: IntoIterator<Item = (usize, String)>,
    {
        Self {
            prompt: prompt.into(),
            options: options.into_iter().map(Into::into).collect(),
            feedback: feedback.into_iter().collect(),
        }
    }
}

/// A validated scenario question.
///
/// Invariant: `feedback.len() == options.len()`, and `feedback[i]` is the
/// text for option position `i + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioQuestion {
    prompt: String,
    options: Vec<String>,
    feedback: Vec<String>,
}

impl ScenarioQuestion {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// 1-based position of `option` in the option list.
    pub fn position_of(&self, option: &str) -> Option<usize> {
        self.options.iter().position(|o| o == option).map(|i| i + 1)
    }

    /// Feedback text for a 1-based option position.
    pub fn feedback_for(&self, position: usize) -> Option<&str> {
        position
            .checked_sub(1)
            .and_then(|i| self.feedback.get(i))
            .map(String::as_str)
    }

    /// Resolve a chosen option to its 1-based position and feedback text.
    pub fn respond(&self, option: &str) -> Option<(usize, &str)> {
        self.options
            .iter()
            .zip(&self.feedback)
            .position(|(o, _)| o == option)
            .map(|i| (i + 1, self.feedback[i].as_str()))
    }
}

/// A validated trait with a non-empty scenario pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trait {
    name: String,
    scenarios: Vec<ScenarioQuestion>,
}

impl Trait {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scenarios(&self) -> &[ScenarioQuestion] {
        &self.scenarios
    }
}

/// A validated, read-only trait catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    info: CatalogInfo,
    traits: Vec<Trait>,
}

impl Catalog {
    /// Validate trait definitions and build a catalog.
    ///
    /// Fails on the first problem found: no traits, a blank or duplicate
    /// trait name, an empty pool, a scenario with no options or a repeated
    /// option, or a feedback map that is not keyed exactly `1..=options`.
    pub fn new(info: CatalogInfo, traits: Vec<TraitDefinition>) -> Result<Self, CatalogError> {
        if traits.is_empty() {
            return Err(CatalogError::NoTraits);
        }

        let mut seen_names = HashSet::new();
        let mut validated = Vec::with_capacity(traits.len());

        for (index, def) in traits.into_iter().enumerate() {
            if def.name.trim().is_empty() {
                return Err(CatalogError::EmptyTraitName { index });
            }
            if !seen_names.insert(def.name.clone()) {
                return Err(CatalogError::DuplicateTrait(def.name));
            }
            if def.scenarios.is_empty() {
                return Err(CatalogError::EmptyPool(def.name));
            }

            let scenarios = def
                .scenarios
                .into_iter()
                .enumerate()
                .map(|(scenario, s)| check_scenario(&def.name, scenario, s))
                .collect::<Result<Vec<_>, _>>()?;

            validated.push(Trait {
                name: def.name,
                scenarios,
            });
        }

        Ok(Self {
            info,
            traits: validated,
        })
    }

    pub fn info(&self) -> &CatalogInfo {
        &self.info
    }

    pub fn traits(&self) -> &[Trait] {
        &self.traits
    }

    /// Trait names in catalog order.
    pub fn trait_names(&self) -> Vec<&str> {
        self.traits.iter().map(Trait::name).collect()
    }

    pub fn trait_count(&self) -> usize {
        self.traits.len()
    }

    /// Total number of scenarios across all pools.
    pub fn scenario_count(&self) -> usize {
        self.traits.iter().map(|t| t.scenarios.len()).sum()
    }
}

fn check_scenario(
    trait_name: &str,
    scenario: usize,
    def: ScenarioDefinition,
) -> Result<ScenarioQuestion, CatalogError> {
    let option_count = def.options.len();
    if option_count == 0 {
        return Err(CatalogError::EmptyOptions {
            trait_name: trait_name.to_string(),
            scenario,
        });
    }

    let mut seen = HashSet::new();
    for option in &def.options {
        if !seen.insert(option.as_str()) {
            return Err(CatalogError::DuplicateOption {
                trait_name: trait_name.to_string(),
                scenario,
                option: option.clone(),
            });
        }
    }

    if let Some(&position) = def
        .feedback
        .keys()
        .find(|&&k| k == 0 || k > option_count)
    {
        return Err(CatalogError::FeedbackOutOfRange {
            trait_name: trait_name.to_string(),
            scenario,
            position,
            options: option_count,
        });
    }

    let mut feedback = def.feedback;
    let aligned = (1..=option_count)
        .map(|position| {
            feedback
                .remove(&position)
                .ok_or_else(|| CatalogError::MissingFeedback {
                    trait_name: trait_name.to_string(),
                    scenario,
                    position,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ScenarioQuestion {
        prompt: def.prompt,
        options: def.options,
        feedback: aligned,
    })
}
