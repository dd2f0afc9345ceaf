//! The `traitquiz take` command.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;

use traitquiz_core::config::load_config_from;
use traitquiz_core::engine::AssessmentEngine;
use traitquiz_core::model::ScenarioQuestion;
use traitquiz_core::report::FeedbackReport;
use traitquiz_core::session::Session;
use traitquiz_report::html::write_html_report;
use traitquiz_report::markdown::write_markdown_report;

pub fn execute(
    catalog: Option<PathBuf>,
    seed: Option<u64>,
    output: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let catalog = catalog.or(config.catalog);
    let engine = super::load_engine(catalog.as_deref())?;
    let mut session = match seed.or(config.seed) {
        Some(seed) => Session::with_seed(seed),
        None => Session::new(),
    };
    tracing::debug!(session = %session.id(), seed = ?session.seed(), "session started");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let report = run_quiz(&engine, &mut session, &mut stdin.lock(), &mut stdout.lock())?;

    println!("{}", report.to_text());
    println!("Quiz completed! Review your feedback above.");

    let output = output.unwrap_or(config.output_dir);
    let format = format.unwrap_or(config.format);
    save_reports(&report, &output, &format)
}

/// Walk the session through every scenario, then evaluate it.
///
/// Each answer is an option number or the exact option text; `r` draws a
/// new set of scenarios and starts over. End of input stops asking, and
/// evaluation then reports whatever is still unanswered.
fn run_quiz<R: BufRead, W: Write>(
    engine: &AssessmentEngine,
    session: &mut Session,
    input: &mut R,
    out: &mut W,
) -> Result<FeedbackReport> {
    writeln!(out, "{}", engine.catalog().info().name)?;
    let description = &engine.catalog().info().description;
    if !description.is_empty() {
        writeln!(out, "{description}")?;
    }

    'quiz: loop {
        let selection = engine.selection(session).clone();

        for scenario in selection.iter() {
            writeln!(
                out,
                "\nScenario {} - Trait: {}",
                scenario.index + 1,
                scenario.trait_name
            )?;
            print_question(out, scenario.question)?;

            loop {
                write!(
                    out,
                    "Choose your answer [1-{}, r to randomize]: ",
                    scenario.question.options().len()
                )?;
                out.flush()?;

                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    writeln!(out)?;
                    break 'quiz;
                }
                let line = line.trim();

                if line.eq_ignore_ascii_case("r") {
                    engine.randomize(session);
                    writeln!(out, "\nQuestions randomized.")?;
                    continue 'quiz;
                }

                let option = resolve_option(scenario.question, line);
                match engine.record_answer(session, scenario.index, &option) {
                    Ok(()) => {
                        writeln!(
                            out,
                            "Progress: {}/{} ({:.0}%)",
                            session.answered_count(),
                            selection.len(),
                            session.progress() * 100.0
                        )?;
                        break;
                    }
                    Err(e) => writeln!(out, "{e}. Try again.")?,
                }
            }
        }

        break;
    }

    writeln!(out)?;
    Ok(engine.evaluate(session)?)
}

fn print_question<W: Write>(out: &mut W, question: &ScenarioQuestion) -> io::Result<()> {
    for line in question.prompt().lines() {
        writeln!(out, "  {}", line.trim())?;
    }
    for (i, option) in question.options().iter().enumerate() {
        writeln!(out, "    {}. {}", i + 1, option)?;
    }
    Ok(())
}

/// Map an option number to its text; anything else is taken verbatim.
fn resolve_option(question: &ScenarioQuestion, input: &str) -> String {
    input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| question.options().get(i))
        .cloned()
        .unwrap_or_else(|| input.to_string())
}

fn save_reports(report: &FeedbackReport, output: &Path, format: &str) -> Result<()> {
    let formats: Vec<&str> = if format == "all" {
        vec!["json", "html", "markdown"]
    } else {
        format.split(',').map(str::trim).collect()
    };

    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");

    for fmt in &formats {
        match *fmt {
            "text" | "" => {}
            "json" => {
                let path = output.join(format!("feedback-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("feedback-{timestamp}.html"));
                write_html_report(report, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            "markdown" | "md" => {
                let path = output.join(format!("feedback-{timestamp}.md"));
                write_markdown_report(report, &path)?;
                eprintln!("Markdown report: {}", path.display());
            }
            _ => {
                tracing::warn!(format = %fmt, "unknown report format, skipping");
            }
        }
    }

    Ok(())
}
