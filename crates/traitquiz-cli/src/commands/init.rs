//! The `traitquiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create traitquiz.toml
    if std::path::Path::new("traitquiz.toml").exists() {
        println!("traitquiz.toml already exists, skipping.");
    } else {
        std::fs::write("traitquiz.toml", SAMPLE_CONFIG)?;
        println!("Created traitquiz.toml");
    }

    // Create example catalog
    std::fs::create_dir_all("catalogs")?;
    let example_path = std::path::Path::new("catalogs/example.toml");
    if example_path.exists() {
        println!("catalogs/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_CATALOG)?;
        println!("Created catalogs/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit catalogs/example.toml or point traitquiz.toml at your own catalog");
    println!("  2. Run: traitquiz validate --catalog catalogs/example.toml");
    println!("  3. Run: traitquiz take --catalog catalogs/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# traitquiz configuration

# Catalog to draw scenarios from (omit to use the built-in catalog)
# catalog = "catalogs/example.toml"

# Fixed seed for reproducible draws
# seed = 42

output_dir = "./traitquiz-results"
format = "text"
"#;

const EXAMPLE_CATALOG: &str = r#"[catalog]
id = "example"
name = "Example Trait Catalog"
description = "A small example catalog to get started"

[[traits]]
name = "Perseverance"

[[traits.scenarios]]
prompt = """
You are halfway through a year-long research project when your hypothesis is proven wrong.
What do you do?"""
options = [
    "Abandon the project since the initial hypothesis is no longer valid.",
    "Reframe the project and continue testing new hypotheses.",
]

[traits.scenarios.feedback]
1 = "Abandoning the project would waste the progress you've already made."
2 = "Reframing the project shows perseverance and adaptability."

[[traits.scenarios]]
prompt = """
Your startup has missed key targets and investors are losing confidence.
What's your next move?"""
options = [
    "Shut down the business and return the remaining funds.",
    "Adjust your strategy and find new ways to reach your targets.",
]

[traits.scenarios.feedback]
1 = "Shutting down might be premature without exploring all possible solutions."
2 = "Adjusting strategy and pushing forward demonstrates perseverance."

[[traits]]
name = "SelfReliance"

[[traits.scenarios]]
prompt = """
You are assigned a task at work but there are no clear instructions.
What is your first step?"""
options = [
    "Wait for your supervisor to provide more instructions.",
    "Research the task on your own and begin working.",
]

[traits.scenarios.feedback]
1 = "Waiting may delay your progress and reflect a lack of self-reliance."
2 = "Taking initiative and researching on your own shows self-reliance."

[[traits.scenarios]]
prompt = """
You hit a problem with the project management software while working remotely.
How do you handle it?"""
options = [
    "Contact the IT department immediately.",
    "Try troubleshooting the issue yourself before seeking help.",
]

[traits.scenarios.feedback]
1 = "Contacting IT can help, but trying to resolve it first demonstrates self-reliance."
2 = "Troubleshooting independently shows resourcefulness and self-reliance."
"#;
