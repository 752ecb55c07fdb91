//! Error types for the table widget.

use thiserror::Error;

/// Errors produced by parsers and the component registry.
///
/// The widget's public setters never surface these; they log and fall back to
/// an empty table instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Input text was not valid JSON, or not the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Decoded JSON was valid but not a sequence of records.
    #[error("Expected a sequence of records, found {0}")]
    NotASequence(&'static str),

    /// Tag is not a valid custom element name.
    #[error("Invalid custom element name '{0}'")]
    InvalidTagName(String),

    /// Tag has already been registered.
    #[error("Custom element '{0}' is already defined")]
    AlreadyDefined(String),

    /// Tag was never registered.
    #[error("Custom element '{0}' is not defined")]
    UnknownTag(String),
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
