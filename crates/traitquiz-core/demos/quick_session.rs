//! Minimal programmatic use of traitquiz-core.
//!
//! Loads `traitquiz.toml` if present, runs one session answering the first
//! option of every scenario, and prints the feedback.
//!
//! ```bash
//! cargo run -p traitquiz-core --example quick_session
//! ```

use traitquiz_core::config::load_config;
use traitquiz_core::engine::AssessmentEngine;
use traitquiz_core::parser::parse_catalog;
use traitquiz_core::session::Session;

fn main() -> anyhow::Result<()> {
    let config = load_config()?;

    let engine = match &config.catalog {
        Some(path) => AssessmentEngine::new(parse_catalog(path)?),
        None => AssessmentEngine::builtin()?,
    };
    println!(
        "Loaded catalog: {} ({} traits)",
        engine.catalog().info().name,
        engine.list_traits().len()
    );

    let mut session = match config.seed {
        Some(seed) => Session::with_seed(seed),
        None => Session::new(),
    };

    let answers: Vec<String> = engine
        .selection(&mut session)
        .iter()
        .map(|s| s.question.options()[0].clone())
        .collect();
    for (index, answer) in answers.iter().enumerate() {
        engine.record_answer(&mut session, index, answer)?;
    }

    let report = engine.evaluate(&mut session)?;
    println!("\n{}", report.to_text());

    report.save_json("quick_session_results.json".as_ref())?;
    println!("Results saved to quick_session_results.json");

    Ok(())
}
