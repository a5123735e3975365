//! doctag CLI - Event-sourcing code generator
//!
//! Commands:
//! - `doctag generate` - Generate event wrappers and aggregate dispatch
//! - `doctag dump-model` - Write the annotated declaration model as JSON
//! - `doctag check-config` - Validate a doctag.toml file

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod logging;

use commands::SourceArgs;

#[derive(Parser)]
#[command(name = "doctag")]
#[command(author, version, about = "Generate event-sourcing code from doc comment annotations", long_about = None)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate event wrappers, aggregate dispatch and the aggregate registry
    Generate {
        #[command(flatten)]
        source: SourceArgs,

        /// Output directory (default: output.dir, else next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Leave out events with invalid annotations instead of failing
        #[arg(long)]
        skip_invalid: bool,

        /// Also emit a round-trip test unit per event
        #[arg(long)]
        wrapper_tests: bool,
    },

    /// Write the annotated, linked declaration model as JSON
    DumpModel {
        #[command(flatten)]
        source: SourceArgs,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a doctag.toml file
    CheckConfig {
        /// Path to doctag.toml (default: ./doctag.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Generate {
            source,
            output,
            skip_invalid,
            wrapper_tests,
        } => {
            commands::generate(&source, output, skip_invalid, wrapper_tests)?;
        }
        Commands::DumpModel { source, output } => {
            commands::dump_model(&source, output)?;
        }
        Commands::CheckConfig { config } => {
            config::check(config)?;
        }
    }

    Ok(())
}
