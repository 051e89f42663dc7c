//! Translator options.

/// Output compatibility mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CompatMode {
    /// Consistent output: every list item ends with a newline, block code
    /// closes with `{code}` and the document ends with a newline.
    #[default]
    Normalized,
    /// Byte-compatible with the existing consumer: ordered items have no
    /// trailing newline, block code closes with `{code` and the last line
    /// is right-trimmed without a newline.
    Legacy,
}

/// Marker used for ordered list items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OrderedListStyle {
    /// `*`, same as unordered lists.
    #[default]
    Bullet,
    /// `#`, the wiki numbered list marker.
    Numbered,
}

impl OrderedListStyle {
    pub(crate) fn marker(self) -> char {
        match self {
            Self::Bullet => '*',
            Self::Numbered => '#',
        }
    }
}

/// Options controlling translation output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct TranslatorOptions {
    /// Compatibility mode.
    pub compat: CompatMode,
    /// Ordered list marker.
    pub ordered_lists: OrderedListStyle,
}

impl TranslatorOptions {
    /// Options reproducing the existing consumer's output.
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            compat: CompatMode::Legacy,
            ..Self::default()
        }
    }

    pub(crate) fn is_legacy(self) -> bool {
        self.compat == CompatMode::Legacy
    }
}
