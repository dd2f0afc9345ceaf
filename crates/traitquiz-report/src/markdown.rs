//! Markdown report generator.

use std::path::Path;

use anyhow::{Context, Result};

use traitquiz_core::report::FeedbackReport;

/// Escape table-breaking characters in a Markdown table cell.
fn cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

/// Render a feedback report as Markdown.
pub fn generate_markdown(report: &FeedbackReport) -> String {
    let mut md = String::new();

    md.push_str(&format!("## Feedback Summary: {}\n\n", report.catalog.name));
    md.push_str(&format!(
        "**Session:** `{}` | **Scenarios:** {} | **Date:** {}",
        report.session_id,
        report.entries.len(),
        report.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    if let Some(seed) = report.seed {
        md.push_str(&format!(" | **Seed:** {seed}"));
    }
    md.push_str("\n\n");

    md.push_str("| # | Trait | Your answer | Feedback |\n");
    md.push_str("|---|-------|-------------|----------|\n");
    for (i, e) in report.entries.iter().enumerate() {
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            i + 1,
            cell(&e.trait_name),
            cell(&e.answer),
            cell(&e.feedback)
        ));
    }
    md.push('\n');

    md
}

/// Write a Markdown report to a file.
pub fn write_markdown_report(report: &FeedbackReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, generate_markdown(report))
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use traitquiz_core::report::{CatalogSummary, FeedbackEntry};

    fn entry(trait_name: &str, answer: &str, feedback: &str) -> FeedbackEntry {
        FeedbackEntry {
            trait_name: trait_name.into(),
            prompt: "What do you do?".into(),
            answer: answer.into(),
            position: 1,
            feedback: feedback.into(),
        }
    }

    fn make_report(seed: Option<u64>) -> FeedbackReport {
        FeedbackReport {
            session_id: uuid::Uuid::nil(),
            created_at: chrono::Utc::now(),
            seed,
            catalog: CatalogSummary {
                id: "ab".into(),
                name: "AB".into(),
                trait_count: 2,
            },
            entries: vec![
                entry("A", "y", "fy"),
                entry("B", "either | or", "fp"),
            ],
        }
    }

    #[test]
    fn markdown_has_one_row_per_trait() {
        let md = generate_markdown(&make_report(None));
        assert!(md.contains("## Feedback Summary: AB"));
        assert!(md.contains("| 1 | A | y | fy |"));
        assert!(md.contains("| 2 | B | either \\| or | fp |"));
        assert!(!md.contains("Seed"));
    }

    #[test]
    fn markdown_includes_seed_when_present() {
        let md = generate_markdown(&make_report(Some(9)));
        assert!(md.contains("**Seed:** 9"));
    }

    #[test]
    fn markdown_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.md");
        write_markdown_report(&make_report(None), &path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("| # | Trait |"));
    }
}
