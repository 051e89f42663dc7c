//! `ghjira check` command implementation.

use clap::{ArgGroup, Args};
use ghjira_checks::{check_description, check_title};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
#[command(group(
    ArgGroup::new("fields")
        .required(true)
        .multiple(true)
        .args(["title", "description"])
))]
pub(crate) struct CheckArgs {
    /// Pull request title to check against the title schema.
    #[arg(long)]
    title: Option<String>,

    /// Pull request description that must not be blank.
    #[arg(long)]
    description: Option<String>,

    /// Enable verbose output (debug logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns the first failed check. The title is checked first.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        for message in self.run()? {
            output.success(message);
        }
        Ok(())
    }

    /// Run the requested checks, returning a message per passed check.
    fn run(&self) -> Result<Vec<&'static str>, CliError> {
        let mut passed = Vec::new();
        if let Some(title) = &self.title {
            check_title(title)?;
            passed.push("Pull request title complies with the schema.");
        }
        if let Some(description) = &self.description {
            check_description(description)?;
            passed.push("Pull request description is not empty.");
        }
        Ok(passed)
    }
}
