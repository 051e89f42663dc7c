//! HTML character reference handling.
//!
//! The XML reader only knows the five predefined entities, so the input is
//! rewritten first: named HTML entities become their characters, a bare
//! `&` is escaped, and a `<` that cannot open markup becomes `&lt;`. References that survive the pre-pass are decoded by
//! [`decode_reference`] when the reader reports them.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// An ampersand, optionally followed by a complete named or numeric reference.
static AMPERSAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:([a-zA-Z][a-zA-Z0-9]*);|(#[0-9]+;|#[xX][0-9a-fA-F]+;))?")
        .expect("invalid ampersand regex")
});

/// Rewrite references the XML reader would reject.
///
/// Named HTML entities are replaced with their characters. Predefined XML
/// entities, numeric references and unknown names are left alone. A `&` that
/// starts no reference becomes `&amp;`.
pub(crate) fn prepare_entities(html: &str) -> Cow<'_, str> {
    if !html.contains('&') {
        return Cow::Borrowed(html);
    }
    AMPERSAND.replace_all(html, |caps: &regex::Captures| {
        if let Some(name) = caps.get(1) {
            html_entity(name.as_str()).map_or_else(|| caps[0].to_owned(), str::to_owned)
        } else if caps.get(2).is_some() {
            caps[0].to_owned()
        } else {
            "&amp;".to_owned()
        }
    })
}

/// Escape every `<` that is not followed by a name, `/`, `!` or `?`.
///
/// HTML reads such a `<` as text (`a < b`, `<3`) while the XML reader
/// fails on it.
pub(crate) fn escape_stray_lt(html: &str) -> Cow<'_, str> {
    let is_stray = |at: usize| {
        !html[at + 1..]
            .starts_with(|c: char| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'))
    };
    if !html.match_indices('<').any(|(at, _)| is_stray(at)) {
        return Cow::Borrowed(html);
    }

    let mut escaped = String::with_capacity(html.len() + 8);
    let mut last = 0;
    for (at, _) in html.match_indices('<').filter(|&(at, _)| is_stray(at)) {
        escaped.push_str(&html[last..at]);
        escaped.push_str("&lt;");
        last = at + 1;
    }
    escaped.push_str(&html[last..]);
    Cow::Owned(escaped)
}

/// Decode a reference reported by the reader (the text between `&` and `;`).
pub(crate) fn decode_reference(entity: &str) -> Cow<'static, str> {
    let decoded = match entity {
        "lt" => "<",
        "gt" => ">",
        "amp" => "&",
        "apos" => "'",
        "quot" => "\"",
        s if s.starts_with('#') => {
            let code = if s.starts_with("#x") || s.starts_with("#X") {
                u32::from_str_radix(&s[2..], 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            return code
                .and_then(char::from_u32)
                .map_or_else(|| Cow::Owned(format!("&{entity};")), |c| Cow::Owned(c.to_string()));
        }
        _ => return html_entity(entity).map_or_else(|| Cow::Owned(format!("&{entity};")), Cow::Borrowed),
    };
    Cow::Borrowed(decoded)
}

/// Map a named HTML entity to its text.
fn html_entity(name: &str) -> Option<&'static str> {
    Some(match name {
        "nbsp" => "\u{00a0}",
        "ensp" => "\u{2002}",
        "emsp" => "\u{2003}",
        "thinsp" => "\u{2009}",
        "zwnj" => "\u{200c}",
        "zwj" => "\u{200d}",
        "shy" => "\u{00ad}",

        // Punctuation
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "laquo" => "\u{00ab}",
        "raquo" => "\u{00bb}",
        "bull" => "\u{2022}",
        "hellip" => "\u{2026}",
        "middot" => "\u{00b7}",
        "iexcl" => "\u{00a1}",
        "iquest" => "\u{00bf}",
        "para" => "\u{00b6}",
        "sect" => "\u{00a7}",
        "dagger" => "\u{2020}",
        "Dagger" => "\u{2021}",

        // Arrows
        "rarr" => "\u{2192}",
        "larr" => "\u{2190}",
        "harr" => "\u{2194}",
        "uarr" => "\u{2191}",
        "darr" => "\u{2193}",

        // Math
        "le" => "\u{2264}",
        "ge" => "\u{2265}",
        "ne" => "\u{2260}",
        "plusmn" => "\u{00b1}",
        "times" => "\u{00d7}",
        "divide" => "\u{00f7}",
        "deg" => "\u{00b0}",
        "micro" => "\u{00b5}",
        "frac14" => "\u{00bc}",
        "frac12" => "\u{00bd}",
        "frac34" => "\u{00be}",
        "sup1" => "\u{00b9}",
        "sup2" => "\u{00b2}",
        "sup3" => "\u{00b3}",

        // Symbols
        "copy" => "\u{00a9}",
        "reg" => "\u{00ae}",
        "trade" => "\u{2122}",
        "euro" => "\u{20ac}",
        "pound" => "\u{00a3}",
        "yen" => "\u{00a5}",
        "cent" => "\u{00a2}",
        "check" => "\u{2713}",
        "hearts" => "\u{2665}",

        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_without_ampersand_borrows() {
        assert!(matches!(prepare_entities("plain <b>text</b>"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_prepare_named_entities() {
        assert_eq!(prepare_entities("a&nbsp;b&mdash;c"), "a\u{00a0}b\u{2014}c");
        assert_eq!(prepare_entities("&frac12;"), "\u{00bd}");
    }

    #[test]
    fn test_prepare_keeps_xml_and_numeric_references() {
        assert_eq!(prepare_entities("&lt;&amp;&#39;&#x27;"), "&lt;&amp;&#39;&#x27;");
    }

    #[test]
    fn test_prepare_escapes_bare_ampersand() {
        assert_eq!(prepare_entities("R&D & more"), "R&amp;D &amp; more");
        assert_eq!(prepare_entities("?a=1&b=2"), "?a=1&amp;b=2");
    }

    #[test]
    fn test_prepare_keeps_unknown_names() {
        assert_eq!(prepare_entities("&bogus;"), "&bogus;");
    }

    #[test]
    fn test_escape_stray_lt() {
        assert_eq!(escape_stray_lt("a < b <= c <3 <"), "a &lt; b &lt;= c &lt;3 &lt;");
        assert_eq!(escape_stray_lt("x << y"), "x &lt;&lt; y");
    }

    #[test]
    fn test_escape_stray_lt_keeps_markup() {
        let html = "<p>a</p><!-- c --><?pi x?><br/>";
        assert!(matches!(escape_stray_lt(html), Cow::Borrowed(_)));
    }

    #[test]
    fn test_decode_references() {
        assert_eq!(decode_reference("lt"), "<");
        assert_eq!(decode_reference("#39"), "'");
        assert_eq!(decode_reference("#x27"), "'");
        assert_eq!(decode_reference("nbsp"), "\u{00a0}");
        assert_eq!(decode_reference("bogus"), "&bogus;");
        assert_eq!(decode_reference("#xFFFFFFFF"), "&#xFFFFFFFF;");
    }
}
