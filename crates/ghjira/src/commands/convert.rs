//! `ghjira convert` command implementation.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use ghjira_config::{CliSettings, Config};
use ghjira_markup::{CompatMode, OrderedListStyle, Translation, TranslatorOptions, convert};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// HTML input file (default: read stdin).
    input: Option<PathBuf>,

    /// Write markup to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover ghjira.toml).
    #[arg(short, long, env = "GHJIRA_CONFIG")]
    config: Option<PathBuf>,

    /// Reproduce the legacy converter's output byte for byte.
    #[arg(long)]
    legacy: bool,

    /// Use `#` for ordered list items.
    #[arg(long)]
    numbered_lists: bool,

    /// Enable verbose output (debug logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the input cannot be read or
    /// tokenized, or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        if let Some(path) = &config.config_path {
            tracing::debug!(path = %path.display(), "Loaded configuration");
        }

        let html = read_input(self.input.as_deref())?;
        let translation = translate(&html, config.translate)?;

        for warning in &translation.warnings {
            output.warning(&format!("Warning: {warning}"));
        }

        if let Some(path) = &self.output {
            std::fs::write(path, &translation.markup)?;
            output.success(&format!("Wrote {}", path.display()));
        } else {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(translation.markup.as_bytes())?;
            stdout.flush()?;
        }

        Ok(())
    }

    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            compat: self.legacy.then_some(CompatMode::Legacy),
            ordered_lists: self.numbered_lists.then_some(OrderedListStyle::Numbered),
        }
    }
}

fn translate(html: &str, options: TranslatorOptions) -> Result<Translation, CliError> {
    tracing::debug!(bytes = html.len(), ?options, "Converting HTML");
    let translation = convert(html, options)?;
    tracing::debug!(bytes = translation.markup.len(), "Conversion finished");
    Ok(translation)
}

/// Read the input file, or stdin when no path is given.
fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut html = String::new();
            std::io::stdin().read_to_string(&mut html)?;
            Ok(html)
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ConvertArgs,
    }

    fn parse(args: &[&str]) -> ConvertArgs {
        TestCli::parse_from(std::iter::once("ghjira").chain(args.iter().copied())).args
    }

    #[test]
    fn test_cli_settings_default_overrides_nothing() {
        let settings = parse(&[]).cli_settings();
        assert_eq!(settings.compat, None);
        assert_eq!(settings.ordered_lists, None);
    }

    #[test]
    fn test_cli_settings_flags() {
        let settings = parse(&["--legacy", "--numbered-lists", "in.html"]).cli_settings();
        assert_eq!(settings.compat, Some(CompatMode::Legacy));
        assert_eq!(settings.ordered_lists, Some(OrderedListStyle::Numbered));
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.html");
        std::fs::write(&path, "<h1>T</h1>").unwrap();

        assert_eq!(read_input(Some(&path)).unwrap(), "<h1>T</h1>");
    }

    #[test]
    fn test_read_input_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_input(Some(&dir.path().join("missing.html")));
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn test_translate_collects_warnings() {
        let translation = translate("<a name=\"x\">y</a>", TranslatorOptions::default()).unwrap();
        assert_eq!(translation.markup, "y\n");
        assert_eq!(translation.warnings.len(), 1);
    }
}
