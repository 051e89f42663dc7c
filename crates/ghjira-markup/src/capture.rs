//! Capture frames that divert emitted text while a construct is open.

/// List container kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ListKind {
    Unordered,
    Ordered,
}

/// An open construct collecting the text emitted inside it.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Frame {
    /// Link with its target, collecting link text.
    Anchor { href: String, text: String },
    /// List container, collecting the current item's text.
    List {
        kind: ListKind,
        text: String,
        /// Whether an `li` is open.
        item_open: bool,
    },
    /// Code span or block.
    Code { text: String },
}

impl Frame {
    pub(crate) fn anchor(href: impl Into<String>) -> Self {
        Self::Anchor {
            href: href.into(),
            text: String::new(),
        }
    }

    pub(crate) fn list(kind: ListKind) -> Self {
        Self::List {
            kind,
            text: String::new(),
            item_open: false,
        }
    }

    pub(crate) fn code() -> Self {
        Self::Code {
            text: String::new(),
        }
    }

    fn text_mut(&mut self) -> &mut String {
        match self {
            Self::Anchor { text, .. } | Self::List { text, .. } | Self::Code { text } => text,
        }
    }
}

/// Stack of open capture frames. Text goes to the top frame.
#[derive(Debug, Default)]
pub(crate) struct CaptureStack {
    frames: Vec<Frame>,
}

impl CaptureStack {
    pub(crate) fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub(crate) fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    pub(crate) fn len(&self) -> usize {
        self.frames.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Buffer of the top frame, or `None` when text should reach the line.
    pub(crate) fn top_text_mut(&mut self) -> Option<&mut String> {
        self.frames.last_mut().map(Frame::text_mut)
    }

    /// Index of the innermost frame matching `pred`.
    pub(crate) fn rposition(&self, pred: impl Fn(&Frame) -> bool) -> Option<usize> {
        self.frames.iter().rposition(pred)
    }

    /// Item buffer and open-item flag of the innermost list.
    pub(crate) fn innermost_list_mut(&mut self) -> Option<(&mut String, &mut bool)> {
        self.frames.iter_mut().rev().find_map(|frame| match frame {
            Frame::List {
                text, item_open, ..
            } => Some((text, item_open)),
            _ => None,
        })
    }

    /// Kinds of the open lists, outermost first.
    pub(crate) fn list_kinds(&self) -> impl Iterator<Item = ListKind> + '_ {
        self.frames.iter().filter_map(|frame| match frame {
            Frame::List { kind, .. } => Some(*kind),
            _ => None,
        })
    }
}
