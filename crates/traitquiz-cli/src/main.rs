//! traitquiz command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "traitquiz",
    version,
    about = "Scenario-based trait assessment quiz"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the quiz interactively (answers are read from stdin)
    Take {
        /// Catalog .toml file (default: built-in catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory for saved reports
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report formats to save: text, json, html, markdown, all
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List the traits of a catalog
    ListTraits {
        /// Catalog .toml file (default: built-in catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate catalog TOML files
    Validate {
        /// Path to catalog file or directory
        #[arg(long)]
        catalog: PathBuf,
    },

    /// Print a saved JSON feedback report
    Show {
        /// Report JSON file
        #[arg(long)]
        report: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create starter config and example catalog
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("traitquiz=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take {
            catalog,
            seed,
            output,
            format,
            config,
        } => commands::take::execute(catalog, seed, output, format, config),
        Commands::ListTraits { catalog, config } => {
            commands::list_traits::execute(catalog, config)
        }
        Commands::Validate { catalog } => commands::validate::execute(catalog),
        Commands::Show { report, format } => commands::show::execute(report, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
