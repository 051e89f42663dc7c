//! Pull request hygiene checks and Jira issue key extraction.
//!
//! Everything here works on plain text; nothing talks to GitHub or Jira.
//!
//! ```
//! use ghjira_checks::{check_title, find_issue_keys};
//!
//! assert!(check_title("renderer: Fix table spans (DOC-42)").is_ok());
//! assert_eq!(find_issue_keys("Fixes DOC-42 and OPS-7."), vec!["DOC-42", "OPS-7"]);
//! ```

mod keys;
mod pull_request;

pub use keys::{epic_key, find_issue_keys};
pub use pull_request::{CheckError, TITLE_SCHEMA, check_description, check_title};
