//! Jira issue key extraction.

use std::sync::LazyLock;

use regex::Regex;

/// A whole-word issue key such as `ABC-123`.
static ISSUE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]+-\d+\b").expect("invalid issue key regex"));

/// The `/jira-epic KEY` comment command.
static EPIC_COMMAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/jira-epic (\b[A-Z]+-\d+\b)").expect("invalid epic command regex")
});

/// All issue keys in `text`, in order of appearance.
///
/// Keys glued to other word characters (`xABC-1`, `ABC-1x`) are not keys.
pub fn find_issue_keys(text: &str) -> Vec<&str> {
    ISSUE_KEY.find_iter(text).map(|m| m.as_str()).collect()
}

/// The key named by the first `/jira-epic KEY` command in `text`.
pub fn epic_key(text: &str) -> Option<&str> {
    EPIC_COMMAND
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_find_issue_keys_in_order() {
        assert_eq!(
            find_issue_keys("DOC-1: fix (see OPS-22, DOC-1)"),
            vec!["DOC-1", "OPS-22", "DOC-1"]
        );
    }

    #[test]
    fn test_find_adjacent_keys() {
        assert_eq!(find_issue_keys("A-1 B-2"), vec!["A-1", "B-2"]);
    }

    #[test]
    fn test_find_issue_keys_requires_word_boundaries() {
        assert!(find_issue_keys("xDOC-1 DOC-1x doc-1 DOC- -1").is_empty());
    }

    #[test]
    fn test_find_issue_keys_at_edges() {
        assert_eq!(find_issue_keys("DOC-9"), vec!["DOC-9"]);
        assert_eq!(find_issue_keys("(DOC-9)."), vec!["DOC-9"]);
    }

    #[test]
    fn test_epic_key() {
        assert_eq!(epic_key("Please link.\n/jira-epic PLAT-100 thanks"), Some("PLAT-100"));
    }

    #[test]
    fn test_epic_key_first_command_wins() {
        assert_eq!(epic_key("/jira-epic A-1 /jira-epic B-2"), Some("A-1"));
    }

    #[test]
    fn test_epic_key_missing() {
        assert_eq!(epic_key("no command here PLAT-100"), None);
        assert_eq!(epic_key("/jira-epic plat-100"), None);
        assert_eq!(epic_key("/jira-epicPLAT-100"), None);
    }
}
