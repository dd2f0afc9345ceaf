//! The `traitquiz show` command.

use std::path::PathBuf;

use anyhow::Result;

use traitquiz_core::report::FeedbackReport;
use traitquiz_report::markdown::generate_markdown;

pub fn execute(report_path: PathBuf, format: String) -> Result<()> {
    let report = FeedbackReport::load_json(&report_path)?;

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", generate_markdown(&report));
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            println!("{}", report.to_text());
        }
    }

    Ok(())
}
