//! Line buffering and the commit rules applied to each finished line.

use std::sync::LazyLock;

use regex::Regex;

/// Horizontal rule as written in the source dialect.
const SOURCE_RULE: &str = "---";

/// Horizontal rule in wiki markup.
pub(crate) const RULE: &str = "----";

/// Quote-span delimiter.
const QUOTE: &str = "??";

/// Heading or list marker that must stay outside a quote span.
static QUOTE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:h[1-9]\.|[*#]+) ").expect("invalid quote prefix regex"));

/// Committed output plus the line currently being assembled.
///
/// The pending line never holds a newline: text is split at each newline
/// and every completed line is committed on its own.
#[derive(Debug, Default)]
pub(crate) struct LineWriter {
    /// Committed text.
    output: String,
    /// Current, uncommitted line.
    line: String,
    /// Open blockquote count.
    quote_depth: usize,
}

impl LineWriter {
    /// Append text, committing every line it completes.
    pub(crate) fn push_str(&mut self, text: &str) {
        let mut rest = text;
        while let Some(pos) = rest.find('\n') {
            self.line.push_str(&rest[..pos]);
            self.commit();
            rest = &rest[pos + 1..];
        }
        self.line.push_str(rest);
    }

    /// End the pending line, then append a block verbatim.
    ///
    /// Block lines skip the rule rewrite and the quote wrap, so code keeps
    /// its content inside a blockquote too.
    pub(crate) fn push_block(&mut self, block: &str) {
        self.commit();
        self.output.push_str(block);
        if !block.ends_with('\n') {
            self.output.push('\n');
        }
    }

    /// Commit the pending line if it holds anything but whitespace.
    pub(crate) fn break_line(&mut self) {
        if !self.line.trim().is_empty() {
            self.commit();
        }
    }

    pub(crate) fn enter_quote(&mut self) {
        self.quote_depth += 1;
    }

    pub(crate) fn leave_quote(&mut self) {
        self.quote_depth = self.quote_depth.saturating_sub(1);
    }

    pub(crate) fn in_quote(&self) -> bool {
        self.quote_depth > 0
    }

    /// Commit the pending line followed by a newline.
    fn commit(&mut self) {
        let line = normalize_rule(std::mem::take(&mut self.line));
        if self.in_quote() && !line.trim().is_empty() {
            self.output.push_str(&quote_line(&line));
        } else {
            self.output.push_str(&line);
        }
        self.output.push('\n');
    }

    /// Flush the pending line and return the full output.
    ///
    /// With `legacy` set the last line is right-trimmed and gets no newline.
    pub(crate) fn finish(mut self, legacy: bool) -> String {
        if self.line.is_empty() {
            return self.output;
        }
        if !legacy {
            self.commit();
            return self.output;
        }

        let line = normalize_rule(std::mem::take(&mut self.line));
        if self.in_quote() && !line.trim().is_empty() {
            self.output.push_str(&quote_line(&line));
        } else {
            self.output.push_str(line.trim_end());
        }
        self.output
    }
}

/// Rewrite a lone `---` to the wiki rule token.
fn normalize_rule(line: String) -> String {
    if line.trim() == SOURCE_RULE {
        RULE.to_owned()
    } else {
        line
    }
}

/// Wrap a line in quote-span markers, keeping a leading heading or list
/// marker outside the span.
fn quote_line(line: &str) -> String {
    let split = QUOTE_PREFIX.find(line).map_or(0, |m| m.end());
    let (prefix, rest) = line.split_at(split);
    format!("{prefix}{QUOTE}{}{QUOTE}", rest.trim_end())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn written(chunks: &[&str], quote: bool) -> String {
        let mut writer = LineWriter::default();
        if quote {
            writer.enter_quote();
        }
        for chunk in chunks {
            writer.push_str(chunk);
        }
        writer.finish(false)
    }

    #[test]
    fn test_plain_lines_verbatim() {
        assert_eq!(written(&["one\ntw", "o\n"], false), "one\ntwo\n");
    }

    #[test]
    fn test_rule_token_rewritten() {
        assert_eq!(written(&["a\n", "  ---  \n", "b"], false), "a\n----\nb\n");
    }

    #[test]
    fn test_longer_dash_runs_untouched() {
        assert_eq!(written(&["-----\n"], false), "-----\n");
    }

    #[test]
    fn test_quote_wraps_each_line() {
        assert_eq!(written(&["first\nsecond\n"], true), "??first??\n??second??\n");
    }

    #[test]
    fn test_quote_keeps_heading_prefix_outside() {
        assert_eq!(written(&["h3. Title  \n"], true), "h3. ??Title??\n");
    }

    #[test]
    fn test_quote_keeps_list_markers_outside() {
        assert_eq!(written(&["* item\n# other\n"], true), "* ??item??\n# ??other??\n");
    }

    #[test]
    fn test_quote_keeps_nested_list_markers_outside() {
        assert_eq!(written(&["** deep\n#* mixed\n"], true), "** ??deep??\n#* ??mixed??\n");
    }

    #[test]
    fn test_push_block_is_verbatim() {
        let mut writer = LineWriter::default();
        writer.enter_quote();
        writer.push_str("intro");
        writer.push_block("{code}\n---\n# x\n{code}\n");
        assert_eq!(writer.finish(false), "??intro??\n{code}\n---\n# x\n{code}\n");
    }

    #[test]
    fn test_quote_marker_without_space_stays_inside() {
        assert_eq!(written(&["*bold*\n"], true), "??*bold*??\n");
    }

    #[test]
    fn test_quote_skips_blank_lines() {
        assert_eq!(written(&["\n  \nx\n"], true), "\n  \n??x??\n");
    }

    #[test]
    fn test_break_line_ignores_blank_pending_line() {
        let mut writer = LineWriter::default();
        writer.push_str("  ");
        writer.break_line();
        writer.push_str("x");
        writer.break_line();
        writer.break_line();
        assert_eq!(writer.finish(false), "  x\n");
    }

    #[test]
    fn test_quote_depth_saturates() {
        let mut writer = LineWriter::default();
        writer.leave_quote();
        writer.enter_quote();
        assert!(writer.in_quote());
        writer.leave_quote();
        writer.leave_quote();
        assert!(!writer.in_quote());
    }

    #[test]
    fn test_finish_adds_newline_to_pending_line() {
        assert_eq!(written(&["hello"], false), "hello\n");
        assert_eq!(written(&["hello\n"], false), "hello\n");
    }

    #[test]
    fn test_finish_legacy_trims_last_line() {
        let mut writer = LineWriter::default();
        writer.push_str("hello  ");
        assert_eq!(writer.finish(true), "hello");
    }

    #[test]
    fn test_finish_legacy_quoted_last_line() {
        let mut writer = LineWriter::default();
        writer.enter_quote();
        writer.push_str("a\nb");
        assert_eq!(writer.finish(true), "??a??\n??b??");
    }
}
