//! Error types for markup tokenizing.

/// Error while turning an HTML fragment into parse events.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TokenizeError {
    /// The reader could not make sense of the markup.
    #[error("markup parse error at byte {position}")]
    Parse {
        /// Byte offset reported by the reader.
        position: u64,
        /// Underlying reader error.
        #[source]
        source: quick_xml::Error,
    },

    /// Text or names could not be decoded.
    #[error("encoding error")]
    Encoding(#[from] quick_xml::encoding::EncodingError),
}
