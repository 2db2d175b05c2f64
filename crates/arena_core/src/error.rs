//! Error types for the item subsystem.

use thiserror::Error;

use crate::item::ItemKind;

/// Result type alias using [`ArenaError`].
pub type Result<T> = std::result::Result<T, ArenaError>;

/// Top-level error type for item decoding, recordings and configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArenaError {
    /// A snapshot attribute was missing or could not be parsed.
    #[error("Malformed snapshot attribute '{attribute}': {value:?}")]
    MalformedSnapshot {
        /// Attribute name as written in the element.
        attribute: String,
        /// Raw attribute text (empty when the attribute was missing).
        value: String,
    },

    /// Unknown item state name.
    #[error("Invalid item state: {0}")]
    InvalidState(String),

    /// Snapshot written by a newer schema than this build understands.
    #[error("Unsupported snapshot schema version {found} (supported up to {supported})")]
    UnsupportedSchemaVersion {
        /// Version found in the element.
        found: u32,
        /// Newest version this build can decode.
        supported: u32,
    },

    /// Recording text could not be parsed or written.
    #[error("Recording error: {0}")]
    RecordingParse(String),

    /// Recording format version mismatch.
    #[error("Recording version mismatch: expected {expected}, got {found}")]
    RecordingVersion {
        /// Version this build writes.
        expected: u32,
        /// Version found in the file.
        found: u32,
    },

    /// Configuration text could not be parsed.
    #[error("Failed to parse arena config: {0}")]
    ConfigParse(String),

    /// Every id of an item kind has been handed out.
    #[error("No {0:?} ids left to allocate")]
    IdsExhausted(ItemKind),

    /// Configuration parsed but failed validation.
    #[error("Invalid arena config: {0:?}")]
    InvalidConfig(Vec<String>),
}

impl ArenaError {
    pub(crate) fn malformed(attribute: &str, value: &str) -> Self {
        Self::MalformedSnapshot {
            attribute: attribute.to_string(),
            value: value.to_string(),
        }
    }
}
