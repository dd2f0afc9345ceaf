//! Feedback report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The per-trait feedback produced by evaluating a completed session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackReport {
    /// The session this report was produced for.
    pub session_id: Uuid,
    /// When the session that produced the report began.
    pub created_at: DateTime<Utc>,
    /// Seed the session was drawn with, if any.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Summary of the catalog.
    pub catalog: CatalogSummary,
    /// One entry per selected scenario, in trait order.
    pub entries: Vec<FeedbackEntry>,
}

/// Summary of a catalog (without the scenario pools).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub id: String,
    pub name: String,
    pub trait_count: usize,
}

/// Feedback for one answered scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    /// Trait this scenario assesses.
    pub trait_name: String,
    /// Scenario prompt as shown.
    pub prompt: String,
    /// The option the user picked.
    pub answer: String,
    /// 1-based position of `answer` in the option list.
    pub position: usize,
    /// Feedback text for that position.
    pub feedback: String,
}

impl FeedbackReport {
    /// `(trait name, feedback)` pairs in trait order.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.trait_name.as_str(), e.feedback.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plain-text feedback summary.
    pub fn to_text(&self) -> String {
        let mut out = String::from("Feedback Summary\n");
        for (i, e) in self.entries.iter().enumerate() {
            out.push_str(&format!(
                "\nScenario {} - Trait: {}\n  Your answer: {}\n  Feedback: {}\n",
                i + 1,
                e.trait_name,
                e.answer,
                e.feedback
            ));
        }
        out
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: FeedbackReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
