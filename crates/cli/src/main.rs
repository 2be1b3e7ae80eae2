mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Migration timeline consistency checker.
#[derive(Parser)]
#[command(
    name = "timeline",
    version,
    about = "Migration timeline consistency checker"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check deprecation / breaking-change links and print a checklist
    Check {
        /// Path to the timeline JSON file
        file: PathBuf,
        /// List every deprecation and breaking change, not only defective ones
        #[arg(long)]
        all: bool,
        /// Path to a TOML config file (default: ./timeline.toml if present)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Variable name expected in example snippets
        #[arg(long)]
        marker: Option<String>,
    },

    /// Print placeholder breaking changes for every missing counterpart
    Scaffold {
        /// Path to the timeline JSON file
        file: PathBuf,
    },

    /// Print index sizes and duplicate identifiers
    Stats {
        /// Path to the timeline JSON file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    match cli.command {
        Commands::Check {
            file,
            all,
            config,
            marker,
        } => {
            commands::check::cmd_check(commands::check::CheckOptions {
                file: &file,
                all,
                config: config.as_deref(),
                marker: marker.as_deref(),
                output: cli.output,
                quiet: cli.quiet,
            });
        }
        Commands::Scaffold { file } => {
            commands::scaffold::cmd_scaffold(&file, cli.output, cli.quiet);
        }
        Commands::Stats { file } => {
            commands::stats::cmd_stats(&file, cli.output, cli.quiet);
        }
    }
}

/// Log to stderr so stdout carries nothing but the report.
fn init_logging(quiet: bool) {
    let default_level = if quiet { "error" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
