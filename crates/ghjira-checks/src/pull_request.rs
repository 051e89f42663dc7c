//! Pull request title and description checks.

use std::sync::LazyLock;

use regex::Regex;

/// Title layout the check expects.
pub const TITLE_SCHEMA: &str = "component: This describes the change (JIRA-001)";

/// A component separator, a summary, then a parenthesized issue key.
static TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(.*[?<=:])(.*[?<= (])(\([A-Z][A-Z0-9]+-[0-9]+\))")
        .expect("invalid title regex")
});

/// A failed pull request check.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CheckError {
    /// The title does not follow [`TITLE_SCHEMA`].
    #[error("Pull request title should follow `{TITLE_SCHEMA}` but looks like `{title}`")]
    TitleSchema { title: String },

    /// The description is empty or blank.
    #[error("Pull request needs a description")]
    EmptyDescription,
}

impl CheckError {
    /// Process exit code reported for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::TitleSchema { .. } => 2,
            Self::EmptyDescription => 1,
        }
    }
}

/// Check that a title follows [`TITLE_SCHEMA`].
pub fn check_title(title: &str) -> Result<(), CheckError> {
    if TITLE.is_match(title) {
        tracing::debug!(title, "Title complies with schema");
        Ok(())
    } else {
        Err(CheckError::TitleSchema {
            title: title.to_owned(),
        })
    }
}

/// Check that a description holds more than whitespace.
pub fn check_description(description: &str) -> Result<(), CheckError> {
    if description.trim().is_empty() {
        Err(CheckError::EmptyDescription)
    } else {
        Ok(())
    }
}
