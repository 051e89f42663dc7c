//! CLI error types.

use ghjira_checks::CheckError;
use ghjira_config::ConfigError;
use ghjira_markup::TokenizeError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Tokenize(#[from] TokenizeError),

    #[error("{0}")]
    Check(#[from] CheckError),
}

impl CliError {
    /// Process exit code for this error.
    pub(crate) fn exit_code(&self) -> i32 {
        match self {
            Self::Check(err) => err.exit_code(),
            _ => 1,
        }
    }
}
