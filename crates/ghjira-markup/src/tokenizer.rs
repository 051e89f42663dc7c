//! Permissive HTML fragment tokenizer built on the XML reader.
//!
//! Feeds [`TagEvent`]s to a [`TagEventHandler`] in document order. Adjacent
//! text and character references are merged into a single text event.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::entities::{decode_reference, escape_stray_lt, prepare_entities};
use crate::error::TokenizeError;
use crate::events::{Attribute, TagEvent, TagEventHandler};

/// Elements that never have content, delivered as a lone start tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Tokenize an HTML fragment into parse events.
///
/// # Errors
///
/// Returns an error if the reader hits markup it cannot recover from, such
/// as an unterminated tag, or if text cannot be decoded.
pub fn tokenize<H>(html: &str, handler: &mut H) -> Result<(), TokenizeError>
where
    H: TagEventHandler + ?Sized,
{
    let html = escape_stray_lt(html);
    let html = prepare_entities(&html);
    let mut reader = Reader::from_str(&html);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut buf = Vec::new();
    let mut text = String::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|source| TokenizeError::Parse {
                position: reader.error_position(),
                source,
            })?;

        match event {
            Event::Start(e) => {
                flush_text(&mut text, handler);
                handler.handle_event(start_tag(&reader, &e));
            }
            Event::Empty(e) => {
                flush_text(&mut text, handler);
                let name = tag_name(&reader, e.name().as_ref());
                handler.handle_event(start_tag(&reader, &e));
                if !VOID_ELEMENTS.contains(&name.as_str()) {
                    handler.handle_event(TagEvent::EndTag { name });
                }
            }
            Event::End(e) => {
                flush_text(&mut text, handler);
                let name = tag_name(&reader, e.name().as_ref());
                handler.handle_event(TagEvent::EndTag { name });
            }
            Event::Text(e) => {
                text.push_str(&reader.decoder().decode(&e)?);
            }
            Event::GeneralRef(e) => {
                let entity = reader.decoder().decode(&e)?;
                text.push_str(&decode_reference(&entity));
            }
            Event::CData(e) => {
                flush_text(&mut text, handler);
                let data = String::from_utf8_lossy(&e).into_owned();
                handler.handle_event(TagEvent::UnknownData(data));
            }
            Event::PI(e) => {
                flush_text(&mut text, handler);
                let data = String::from_utf8_lossy(&e).into_owned();
                handler.handle_event(TagEvent::UnknownData(data));
            }
            Event::Comment(_) | Event::Decl(_) | Event::DocType(_) => {
                tracing::trace!(position = reader.buffer_position(), "Skipping declaration");
            }
            Event::Eof => {
                flush_text(&mut text, handler);
                return Ok(());
            }
        }
        buf.clear();
    }
}

/// Deliver buffered text, if any.
fn flush_text<H: TagEventHandler + ?Sized>(text: &mut String, handler: &mut H) {
    if !text.is_empty() {
        handler.handle_event(TagEvent::Text(std::mem::take(text)));
    }
}

fn start_tag<R: BufRead>(reader: &Reader<R>, e: &BytesStart) -> TagEvent {
    TagEvent::StartTag {
        name: tag_name(reader, e.name().as_ref()),
        attrs: attributes(reader, e),
    }
}

/// Decode and lowercase a tag or attribute name.
fn tag_name<R: BufRead>(reader: &Reader<R>, name: &[u8]) -> String {
    reader
        .decoder()
        .decode(name)
        .map_or_else(|_| String::from_utf8_lossy(name).into_owned(), |s| s.into_owned())
        .to_ascii_lowercase()
}

/// Attributes in document order, read with HTML rules.
///
/// An attribute the reader rejects is dropped and the rest are kept.
fn attributes<R: BufRead>(reader: &Reader<R>, e: &BytesStart) -> Vec<Attribute> {
    let mut attrs = Vec::new();
    for attr in e.html_attributes() {
        let attr = match attr {
            Ok(attr) => attr,
            Err(err) => {
                tracing::debug!(error = %err, "Dropping malformed attribute");
                continue;
            }
        };
        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            std::borrow::Cow::into_owned,
        );
        attrs.push(Attribute {
            name: tag_name(reader, attr.key.as_ref()),
            value,
        });
    }
    attrs
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn events(html: &str) -> Vec<TagEvent> {
        let mut events = Vec::new();
        tokenize(html, &mut events).unwrap();
        events
    }

    #[test]
    fn test_tokenize_nested_elements() {
        assert_eq!(
            events("<p>Hi <em>there</em></p>"),
            vec![
                TagEvent::start("p"),
                TagEvent::text("Hi "),
                TagEvent::start("em"),
                TagEvent::text("there"),
                TagEvent::end("em"),
                TagEvent::end("p"),
            ]
        );
    }

    #[test]
    fn test_tokenize_lowercases_names_and_keeps_attribute_order() {
        assert_eq!(
            events(r#"<A HREF="https://example.com" Title="t">x</A>"#),
            vec![
                TagEvent::start_with(
                    "a",
                    vec![
                        Attribute::new("href", "https://example.com"),
                        Attribute::new("title", "t"),
                    ]
                ),
                TagEvent::text("x"),
                TagEvent::end("a"),
            ]
        );
    }

    #[test]
    fn test_tokenize_valueless_attribute() {
        assert_eq!(
            events("<details open>"),
            vec![TagEvent::start_with("details", vec![Attribute::new("open", "")])]
        );
    }

    #[test]
    fn test_tokenize_attribute_references() {
        assert_eq!(
            events(r#"<a href="https://example.com/?a=1&b=2&amp;c=3">"#),
            vec![TagEvent::start_with(
                "a",
                vec![Attribute::new("href", "https://example.com/?a=1&b=2&c=3")]
            )]
        );
    }

    #[test]
    fn test_tokenize_merges_text_and_references() {
        assert_eq!(
            events("a &amp; b &lt;c&gt; &#39;q&#x27;&nbsp;R&D"),
            vec![TagEvent::text("a & b <c> 'q'\u{00a0}R&D")]
        );
    }

    #[test]
    fn test_tokenize_void_and_self_closing_elements() {
        assert_eq!(
            events("<hr/><br><p/>"),
            vec![
                TagEvent::start("hr"),
                TagEvent::start("br"),
                TagEvent::start("p"),
                TagEvent::end("p"),
            ]
        );
    }

    #[test]
    fn test_tokenize_cdata_as_unknown_data() {
        assert_eq!(
            events("<![CDATA[raw]]>"),
            vec![TagEvent::UnknownData("raw".to_owned())]
        );
    }

    #[test]
    fn test_tokenize_drops_comments() {
        assert_eq!(events("a<!-- note -->b"), vec![TagEvent::text("ab")]);
    }

    #[test]
    fn test_tokenize_unmatched_end_tag() {
        assert_eq!(
            events("x</b>y"),
            vec![TagEvent::text("x"), TagEvent::end("b"), TagEvent::text("y")]
        );
    }

    #[test]
    fn test_tokenize_preserves_whitespace() {
        assert_eq!(
            events("<ul>\n<li>1</li>\n</ul>"),
            vec![
                TagEvent::start("ul"),
                TagEvent::text("\n"),
                TagEvent::start("li"),
                TagEvent::text("1"),
                TagEvent::end("li"),
                TagEvent::text("\n"),
                TagEvent::end("ul"),
            ]
        );
    }

    #[test]
    fn test_tokenize_processing_instruction_as_unknown_data() {
        assert_eq!(
            events("a<?php echo 1 ?>b"),
            vec![
                TagEvent::text("a"),
                TagEvent::UnknownData("php echo 1 ".to_owned()),
                TagEvent::text("b"),
            ]
        );
    }

    #[test]
    fn test_tokenize_stray_less_than_is_text() {
        assert_eq!(
            events("<p>a < b</p>"),
            vec![TagEvent::start("p"), TagEvent::text("a < b"), TagEvent::end("p")]
        );
    }

    #[test]
    fn test_tokenize_drops_duplicate_attribute() {
        assert_eq!(
            events(r#"<a href="x" href="y" title="t">"#),
            vec![TagEvent::start_with(
                "a",
                vec![Attribute::new("href", "x"), Attribute::new("title", "t")]
            )]
        );
    }

    #[test]
    fn test_tokenize_unterminated_tag_fails() {
        let mut events = Vec::new();
        let err = tokenize("text <p", &mut events).unwrap_err();
        assert!(matches!(err, TokenizeError::Parse { .. }));
    }
}
