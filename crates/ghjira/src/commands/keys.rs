//! `ghjira keys` command implementation.

use std::io::Write;

use clap::Args;
use ghjira_checks::{epic_key, find_issue_keys};

use crate::error::CliError;

/// Arguments for the keys command.
#[derive(Args)]
pub(crate) struct KeysArgs {
    /// Text to search, such as a pull request title or comment.
    text: String,

    /// Print only the key named by a `/jira-epic KEY` command.
    #[arg(long)]
    epic: bool,

    /// Enable verbose output (debug logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl KeysArgs {
    /// Execute the keys command, printing one key per line.
    ///
    /// Finding no key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if stdout cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let keys = self.keys();
        tracing::debug!(count = keys.len(), epic = self.epic, "Found issue keys");

        let mut stdout = std::io::stdout().lock();
        for key in keys {
            writeln!(stdout, "{key}")?;
        }
        stdout.flush()?;
        Ok(())
    }

    fn keys(&self) -> Vec<&str> {
        if self.epic {
            epic_key(&self.text).into_iter().collect()
        } else {
            find_issue_keys(&self.text)
        }
    }
}
