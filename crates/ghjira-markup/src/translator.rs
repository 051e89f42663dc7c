//! Stateful HTML to wiki markup translator.

use crate::capture::{CaptureStack, Frame, ListKind};
use crate::events::{Attribute, TagEvent, TagEventHandler};
use crate::line::{LineWriter, RULE};
use crate::options::{OrderedListStyle, TranslatorOptions};

/// Emphasis delimiter.
const EMPHASIS: &str = "_";

/// Block code delimiter.
const CODE_BLOCK: &str = "{code}";

/// Closing block code delimiter written by the legacy converter.
const LEGACY_CODE_CLOSE: &str = "{code";

/// Result of a translation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Translation {
    /// Translated wiki markup.
    pub markup: String,
    /// Human-readable warnings about input that was passed through.
    pub warnings: Vec<String>,
}

/// Translates parse events into wiki markup.
///
/// Every piece of output, literal or synthesized, goes through a single
/// routing step: it lands in the innermost open capture frame (anchor, list
/// or code) or, with none open, in the current line. Closing a frame
/// formats its text and routes the result one level out.
///
/// A translator handles exactly one document and is consumed by
/// [`finish`](Self::finish).
#[derive(Debug, Default)]
pub struct MarkupTranslator {
    options: TranslatorOptions,
    writer: LineWriter,
    captures: CaptureStack,
    warnings: Vec<String>,
}

impl MarkupTranslator {
    /// Create a translator.
    #[must_use]
    pub fn new(options: TranslatorOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Process a start tag.
    pub fn start_tag(&mut self, name: &str, attrs: &[Attribute]) {
        match name {
            "a" => self.start_anchor(attrs),
            "blockquote" => {
                if !self.options.is_legacy() {
                    self.writer.break_line();
                }
                self.writer.enter_quote();
            }
            "ul" => self.captures.push(Frame::list(ListKind::Unordered)),
            "ol" => self.captures.push(Frame::list(ListKind::Ordered)),
            "li" => self.start_item(),
            "em" => self.emit(EMPHASIS),
            "code" => self.captures.push(Frame::code()),
            "hr" => self.emit(&format!("{RULE}\n")),
            _ => {
                if is_heading(name) {
                    self.emit(&format!("{name}. "));
                }
            }
        }
    }

    /// Process an end tag. Tags without an open counterpart are ignored.
    pub fn end_tag(&mut self, name: &str) {
        match name {
            "a" => self.close_innermost(name, |f| matches!(f, Frame::Anchor { .. })),
            "code" => self.close_innermost(name, |f| matches!(f, Frame::Code { .. })),
            "ul" => self.close_innermost(name, |f| {
                matches!(f, Frame::List { kind: ListKind::Unordered, .. })
            }),
            "ol" => self.close_innermost(name, |f| {
                matches!(f, Frame::List { kind: ListKind::Ordered, .. })
            }),
            "li" => self.end_item(),
            "blockquote" => {
                if !self.options.is_legacy() {
                    self.writer.break_line();
                }
                self.writer.leave_quote();
            }
            "em" => self.emit(EMPHASIS),
            "p" => self.emit("\n"),
            _ => {}
        }
    }

    /// Process a text run.
    pub fn text(&mut self, data: &str) {
        self.emit(data);
    }

    /// Flush pending content and return the translated document.
    ///
    /// Constructs still open are closed innermost first, as if their end
    /// tags had been seen.
    #[must_use]
    pub fn finish(mut self) -> Translation {
        self.close_through(0);
        Translation {
            markup: self.writer.finish(self.options.is_legacy()),
            warnings: self.warnings,
        }
    }

    /// Route text to the innermost capture frame, or the current line.
    fn emit(&mut self, text: &str) {
        match self.captures.top_text_mut() {
            Some(buffer) => buffer.push_str(text),
            None => self.writer.push_str(text),
        }
    }

    fn start_anchor(&mut self, attrs: &[Attribute]) {
        match attrs.first() {
            Some(attr) if attr.name == "href" => {
                self.captures.push(Frame::anchor(attr.value.as_str()));
            }
            first => {
                let found = first.map_or("none", |attr| attr.name.as_str());
                tracing::warn!(
                    first_attribute = found,
                    "Ignoring link without leading href attribute"
                );
                self.warnings.push(format!(
                    "Ignoring link without leading href attribute (first attribute: {found})"
                ));
            }
        }
    }

    /// Close the innermost frame matching `pred` and everything above it.
    fn close_innermost(&mut self, tag: &str, pred: impl Fn(&Frame) -> bool) {
        match self.captures.rposition(pred) {
            Some(index) => self.close_through(index),
            None => tracing::debug!(tag, "Ignoring unmatched end tag"),
        }
    }

    /// Close frames from the top down until `index` frames remain.
    fn close_through(&mut self, index: usize) {
        while self.captures.len() > index {
            let Some(frame) = self.captures.pop() else {
                break;
            };
            self.close_frame(frame);
        }
    }

    /// Format a closed frame's text into the next enclosing target.
    fn close_frame(&mut self, frame: Frame) {
        match frame {
            Frame::Anchor { href, text } => {
                if text.is_empty() {
                    self.emit(&format!("[{href}]"));
                } else {
                    self.emit(&format!("[{text}|{href}]"));
                }
            }
            Frame::Code { text } => {
                if is_block_code(&text) && self.captures.is_empty() {
                    let block = format!("{CODE_BLOCK}\n{text}\n{}\n", self.code_block_close());
                    self.writer.push_block(&block);
                } else {
                    let markup = self.code_markup(&text);
                    self.emit(&markup);
                }
            }
            Frame::List {
                kind,
                text,
                item_open,
            } => {
                if self.options.is_legacy() {
                    return;
                }
                if item_open {
                    self.emit_item(kind, &text);
                } else if !text.trim().is_empty() {
                    self.emit(&format!("{}\n", text.trim()));
                }
            }
        }
    }

    fn code_markup(&self, code: &str) -> String {
        if is_block_code(code) {
            format!("\n{CODE_BLOCK}\n{code}\n{}\n", self.code_block_close())
        } else {
            format!("{{{{{code}}}}}")
        }
    }

    fn code_block_close(&self) -> &'static str {
        if self.options.is_legacy() {
            LEGACY_CODE_CLOSE
        } else {
            CODE_BLOCK
        }
    }

    fn start_item(&mut self) {
        let item_open = self
            .captures
            .innermost_list_mut()
            .is_some_and(|(_, item_open)| *item_open);
        // An `li` may end implicitly at the next one.
        if item_open && !self.options.is_legacy() {
            self.end_item();
        }
        if let Some((text, item_open)) = self.captures.innermost_list_mut() {
            // Drop whitespace between the container (or previous item) and this item.
            let trimmed = text.trim();
            if trimmed.len() != text.len() {
                *text = trimmed.to_owned();
            }
            *item_open = true;
        }
    }

    /// Emit the current item of the innermost list.
    fn end_item(&mut self) {
        let Some(index) = self.captures.rposition(|f| matches!(f, Frame::List { .. })) else {
            tracing::debug!(tag = "li", "Ignoring list item outside a list");
            return;
        };
        self.close_through(index + 1);
        let Some(Frame::List { kind, text, .. }) = self.captures.pop() else {
            return;
        };

        // The list frame is off the stack, so the item routes one level out.
        self.emit_item(kind, &text);
        self.captures.push(Frame::list(kind));
    }

    fn emit_item(&mut self, kind: ListKind, text: &str) {
        let marker = self.item_marker(kind);
        let item = if self.options.is_legacy() {
            match kind {
                ListKind::Unordered => format!("{marker} {text}\n"),
                ListKind::Ordered => format!("{marker} {text}"),
            }
        } else {
            let needs_break = self
                .captures
                .top_text_mut()
                .is_some_and(|outer| !outer.is_empty() && !outer.ends_with('\n'));
            let lead = if needs_break { "\n" } else { "" };
            format!("{lead}{marker} {}\n", text.trim())
        };
        self.emit(&item);
    }

    /// Item marker: one character per open list, outermost first.
    fn item_marker(&self, kind: ListKind) -> String {
        let ordered = self.options.ordered_lists;
        self.captures
            .list_kinds()
            .chain(std::iter::once(kind))
            .map(|kind| list_marker(kind, ordered))
            .collect()
    }
}

impl TagEventHandler for MarkupTranslator {
    fn handle_event(&mut self, event: TagEvent) {
        match event {
            TagEvent::StartTag { name, attrs } => self.start_tag(&name, &attrs),
            TagEvent::EndTag { name } => self.end_tag(&name),
            TagEvent::Text(data) | TagEvent::UnknownData(data) => self.text(&data),
        }
    }
}

fn list_marker(kind: ListKind, ordered: OrderedListStyle) -> char {
    match kind {
        ListKind::Unordered => '*',
        ListKind::Ordered => ordered.marker(),
    }
}

/// Code with a line break inside its trimmed text renders as a block.
fn is_block_code(code: &str) -> bool {
    code.trim().contains('\n')
}

/// `h1` through `h9`.
fn is_heading(name: &str) -> bool {
    matches!(name.as_bytes(), [b'h', b'1'..=b'9'])
}
