//! HTML to Jira wiki markup translation.
//!
//! Translates HTML fragments, as rendered for pull request descriptions and
//! comments, into issue-tracker wiki markup. The translator is a single-pass
//! consumer of parse events; [`tokenize`] produces those events from an
//! HTML string.
//!
//! # Architecture
//!
//! - [`tokenize`]: permissive event source over an XML reader
//! - [`MarkupTranslator`]: stateful [`TagEventHandler`] producing markup
//! - [`TranslatorOptions`]: output compatibility switches
//!
//! Open links, lists and code spans capture the text emitted inside them
//! and release the formatted result to the enclosing construct when they
//! close. Finished lines go through the commit rules for horizontal rules
//! and quoted lines.
//!
//! # Example
//!
//! ```
//! use ghjira_markup::{TranslatorOptions, convert};
//!
//! let result = convert("<ul><li>one</li><li>two</li></ul>", TranslatorOptions::default())?;
//! assert_eq!(result.markup, "* one\n* two\n");
//! # Ok::<(), ghjira_markup::TokenizeError>(())
//! ```

mod capture;
mod entities;
mod error;
mod events;
mod line;
mod options;
mod tokenizer;
mod translator;

pub use error::TokenizeError;
pub use events::{Attribute, TagEvent, TagEventHandler};
pub use options::{CompatMode, OrderedListStyle, TranslatorOptions};
pub use tokenizer::tokenize;
pub use translator::{MarkupTranslator, Translation};

/// Translate an HTML fragment in one call.
///
/// # Errors
///
/// Returns an error if the fragment cannot be tokenized.
pub fn convert(html: &str, options: TranslatorOptions) -> Result<Translation, TokenizeError> {
    let mut translator = MarkupTranslator::new(options);
    tokenize(html, &mut translator)?;
    Ok(translator.finish())
}
