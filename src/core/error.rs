//! Error kinds raised by the bulletin core

use thiserror::Error;

/// Failure to address a leaf of the bulletin
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The section/field/subfield triple does not name a text field
    #[error("invalid field path: {0}")]
    InvalidPath(String),
    /// The entry index is past the end of the section's list
    #[error("index {index} out of range for {section} (len {len})")]
    IndexOutOfRange {
        section: &'static str,
        index: usize,
        len: usize,
    },
    /// The entry type has no attribute with this name
    #[error("{section} entries have no field named {field:?} (expected one of {expected:?})")]
    UnknownField {
        section: &'static str,
        field: String,
        expected: &'static [&'static str],
    },
}

/// Rejected hymn sheet input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("unsupported image: {0}")]
    UnsupportedImage(String),
}

/// Failure to turn a share token back into a bulletin
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("share token is not valid base64")]
    Transport(#[from] base64::DecodeError),
    #[error("share token does not contain UTF-8 text")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("share token text is not percent-encoded JSON")]
    Escape,
    #[error("share token does not describe a bulletin: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Failure while producing or delivering a share link
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("bulletin could not be serialized: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("invalid base address {address:?}: {source}")]
    BaseAddress {
        address: String,
        source: url::ParseError,
    },
    #[error("base address {0:?} cannot carry a query string")]
    NotHierarchical(String),
    #[allow(dead_code)]
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}
