//! wiscar CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "wiscar", version, about = "Career-fit questionnaire and WISCAR scoring")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the questions of a bank
    Questions {
        /// Question bank TOML file (default: configured or built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Output format: text, toml
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to question bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Score a saved set of responses
    Score {
        /// JSON file with a response array (or a saved report)
        #[arg(long)]
        responses: PathBuf,

        /// Question bank TOML file (default: configured or built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Refuse to score when a score has no responses
        #[arg(long)]
        strict: bool,

        /// Output format: text, json, markdown
        #[arg(long)]
        format: Option<String>,

        /// Save the full report as JSON
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Take the assessment interactively
    Take {
        /// Question bank TOML file (default: configured or built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Output format: text, json, markdown
        #[arg(long)]
        format: Option<String>,

        /// Save the full report as JSON
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and question bank
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wiscar=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Questions { bank, format } => commands::questions::execute(bank, format),
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Score {
            responses,
            bank,
            strict,
            format,
            output,
            config,
        } => commands::score::execute(responses, bank, strict, format, output, config),
        Commands::Take {
            bank,
            format,
            output,
            config,
        } => commands::take::execute(bank, format, output, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
