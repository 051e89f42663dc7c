//! ghjira CLI - pull request HTML to Jira wiki markup.
//!
//! Provides commands for:
//! - `convert`: Translate an HTML fragment to wiki markup
//! - `check`: Check a pull request title and description
//! - `keys`: List Jira issue keys found in text

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ConvertArgs, KeysArgs};
use output::Output;

/// ghjira - HTML to Jira wiki markup converter.
#[derive(Parser)]
#[command(name = "ghjira", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an HTML fragment to Jira wiki markup.
    Convert(ConvertArgs),
    /// Check a pull request title and description.
    Check(CheckArgs),
    /// Print Jira issue keys found in text.
    Keys(KeysArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Convert(args) => args.verbose,
            Self::Check(args) => args.verbose,
            Self::Keys(args) => args.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = cli.command.verbose();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN.
    // Logs go to stderr; stdout carries the command's result.
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Convert(args) => args.execute(),
        Commands::Check(args) => args.execute(),
        Commands::Keys(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(err.exit_code());
    }
}
