//! Error types for the profile codec.
//!
//! Every variant carries the operation that failed and the dotted field path
//! (`tx.clauses.#0.to`) so callers can point at the exact offending field.
//! The human-readable message is produced by `Display` only.

use thiserror::Error;

/// Errors raised while packing or unpacking a value against a profile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A scalar failed its kind-specific validation (wrong type, out of
    /// range, non-canonical bytes, wrong fixed length).
    #[error("{operation}: invalid field `{path}`: {reason} (got {value})")]
    InvalidField {
        /// The codec step that rejected the value.
        operation: &'static str,
        /// Dotted path of the field.
        path: String,
        /// Rendering of the offending value.
        value: String,
        /// What rule was violated.
        reason: String,
    },

    /// The value or encoded node does not have the shape the profile expects.
    #[error("{operation}: invalid structure at `{path}`: {reason}")]
    InvalidStructure {
        /// The codec step that rejected the node.
        operation: &'static str,
        /// Dotted path of the node.
        path: String,
        /// What shape was expected.
        reason: String,
    },

    /// The raw bytes are not a canonical RLP item.
    #[error("malformed RLP: {0}")]
    MalformedRlp(String),
}

impl CodecError {
    pub(crate) fn field(
        operation: &'static str,
        path: &str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            operation,
            path: path.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn structure(
        operation: &'static str,
        path: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidStructure {
            operation,
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    /// Dotted path of the failing field, if the error is tied to one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::InvalidField { path, .. } | Self::InvalidStructure { path, .. } => Some(path),
            Self::MalformedRlp(_) => None,
        }
    }
}

impl From<alloy_rlp::Error> for CodecError {
    fn from(err: alloy_rlp::Error) -> Self {
        Self::MalformedRlp(err.to_string())
    }
}
