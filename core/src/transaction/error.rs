//! Transaction-level errors.
//!
//! Codec failures pass through unchanged inside [`TransactionError::Codec`];
//! everything else is specific to transactions (reserved-field rules, keys,
//! delegation state, signature-derived fields). [`TransactionError::kind`]
//! flattens both layers into one [`ErrorKind`] for callers that only want
//! to branch on the category.

use std::fmt;

use alloy_primitives::Bytes;
use thiserror::Error;

use crate::codec::CodecError;
use crate::crypto::{KeyError, SignatureError};

/// Error categories, independent of which layer raised them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidField,
    InvalidStructure,
    InvalidTransactionField,
    InvalidKey,
    InvalidDelegationState,
    FieldUnavailable,
    InvalidSignature,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidField => write!(f, "InvalidField"),
            Self::InvalidStructure => write!(f, "InvalidStructure"),
            Self::InvalidTransactionField => write!(f, "InvalidTransactionField"),
            Self::InvalidKey => write!(f, "InvalidKey"),
            Self::InvalidDelegationState => write!(f, "InvalidDelegationState"),
            Self::FieldUnavailable => write!(f, "FieldUnavailable"),
            Self::InvalidSignature => write!(f, "InvalidSignature"),
        }
    }
}

/// Errors raised while encoding, decoding, hashing, or signing transactions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// The body failed profile validation.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A transaction-level canonicalization rule was violated on decode.
    #[error("{operation}: invalid transaction field `{field}`: {reason}")]
    InvalidTransactionField {
        operation: &'static str,
        field: &'static str,
        reason: String,
        /// The raw reserved list as it came off the wire.
        reserved: Vec<Bytes>,
    },

    /// A supplied private key was rejected. The key itself is never echoed.
    #[error("{operation}: invalid {role} private key: {source}")]
    InvalidKey {
        operation: &'static str,
        /// `"signer"` or `"gas payer"`.
        role: &'static str,
        source: KeyError,
    },

    /// The requested signing path does not match the body's delegation flag.
    #[error("{operation}: {reason}")]
    InvalidDelegationState {
        operation: &'static str,
        reason: &'static str,
    },

    /// A signature-derived property was read before the transaction was
    /// fully signed.
    #[error("{operation}: `{field}` is not available: {reason}")]
    FieldUnavailable {
        operation: &'static str,
        field: &'static str,
        reason: &'static str,
    },

    /// A signature was malformed or could not be recovered.
    #[error("{operation}: invalid signature: {source}")]
    InvalidSignature {
        operation: &'static str,
        source: SignatureError,
    },
}

impl TransactionError {
    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Codec(CodecError::InvalidField { .. }) => ErrorKind::InvalidField,
            Self::Codec(CodecError::InvalidStructure { .. } | CodecError::MalformedRlp(_)) => {
                ErrorKind::InvalidStructure
            }
            Self::InvalidTransactionField { .. } => ErrorKind::InvalidTransactionField,
            Self::InvalidKey { .. } => ErrorKind::InvalidKey,
            Self::InvalidDelegationState { .. } => ErrorKind::InvalidDelegationState,
            Self::FieldUnavailable { .. } => ErrorKind::FieldUnavailable,
            Self::InvalidSignature { .. } => ErrorKind::InvalidSignature,
        }
    }
}
