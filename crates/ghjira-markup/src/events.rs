//! Parse events delivered by a tag event source.

/// A start-tag attribute, kept in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    /// Lowercase attribute name.
    pub name: String,
    /// Unescaped value. Empty for valueless attributes.
    pub value: String,
}

impl Attribute {
    /// Create an attribute from a name and value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A single markup parse event.
///
/// Tag names are lowercase. Self-closing void elements (e.g. `hr`) arrive
/// as a lone [`TagEvent::StartTag`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagEvent {
    /// Opening tag with its attributes.
    StartTag {
        /// Tag name.
        name: String,
        /// Attributes in document order.
        attrs: Vec<Attribute>,
    },
    /// Closing tag.
    EndTag {
        /// Tag name.
        name: String,
    },
    /// Text run with entities already decoded.
    Text(String),
    /// Declaration content the source does not interpret (e.g. CDATA).
    UnknownData(String),
}

impl TagEvent {
    /// Start tag without attributes.
    pub fn start(name: impl Into<String>) -> Self {
        Self::StartTag {
            name: name.into(),
            attrs: Vec::new(),
        }
    }

    /// Start tag with attributes.
    pub fn start_with(name: impl Into<String>, attrs: Vec<Attribute>) -> Self {
        Self::StartTag {
            name: name.into(),
            attrs,
        }
    }

    /// End tag.
    pub fn end(name: impl Into<String>) -> Self {
        Self::EndTag { name: name.into() }
    }

    /// Text run.
    pub fn text(data: impl Into<String>) -> Self {
        Self::Text(data.into())
    }
}

/// Consumer of parse events.
///
/// The tokenizer calls [`handle_event`](Self::handle_event) once per event,
/// in document order.
pub trait TagEventHandler {
    /// Process one event.
    fn handle_event(&mut self, event: TagEvent);
}

/// Records events, mostly useful for inspecting tokenizer output.
impl TagEventHandler for Vec<TagEvent> {
    fn handle_event(&mut self, event: TagEvent) {
        self.push(event);
    }
}
