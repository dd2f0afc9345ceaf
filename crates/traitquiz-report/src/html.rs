//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use traitquiz_core::report::FeedbackReport;

/// Escape a string for safe HTML insertion.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from a feedback report.
pub fn generate_html(report: &FeedbackReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>traitquiz feedback - {}</title>\n",
        html_escape(&report.catalog.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Trait Assessment Feedback</h1>\n");
    let seed = report
        .seed
        .map(|s| format!(" | seed {s}"))
        .unwrap_or_default();
    html.push_str(&format!(
        "<p class=\"meta\">Catalog: <strong>{}</strong> | {} scenarios | {}{}</p>\n",
        html_escape(&report.catalog.name),
        report.entries.len(),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        seed
    ));
    html.push_str("</header>\n");

    // Per-scenario feedback
    html.push_str("<section class=\"feedback\">\n");
    html.push_str("<h2>Feedback Summary</h2>\n");
    for (i, e) in report.entries.iter().enumerate() {
        html.push_str("<article class=\"scenario\">\n");
        html.push_str(&format!(
            "<h3>Scenario {} - Trait: {}</h3>\n",
            i + 1,
            html_escape(&e.trait_name)
        ));
        html.push_str(&format!(
            "<p class=\"prompt\">{}</p>\n",
            html_escape(&e.prompt).replace('\n', "<br>")
        ));
        html.push_str(&format!(
            "<p class=\"answer\"><span class=\"label\">Your answer ({}):</span> {}</p>\n",
            e.position,
            html_escape(&e.answer)
        ));
        html.push_str(&format!(
            "<p class=\"text\">{}</p>\n",
            html_escape(&e.feedback)
        ));
        html.push_str("</article>\n");
    }
    html.push_str("<p class=\"done\">Quiz completed. Review your feedback above.</p>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &FeedbackReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --done: #dcfce7; --muted: #6b7280; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --done: #064e3b; --muted: #9ca3af; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); max-width: 56rem; }
h1, h2 { margin-top: 2rem; }
.meta { color: var(--muted); }
.scenario { border: 1px solid var(--border); border-radius: 8px; padding: 0.5rem 1.25rem; margin: 1rem 0; }
.prompt { color: var(--muted); }
.label { font-weight: bold; }
.done { background: var(--done); padding: 0.75rem 1rem; border-radius: 8px; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
"#;
