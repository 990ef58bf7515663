//! # Key Management
//!
//! secp256k1 secret keys and account addresses.
//!
//! A [`SecretKey`] can only be built from bytes that form a valid scalar
//! (non-zero, below the curve order), so every signing path downstream can
//! take one without re-checking. The wrapped `k256::ecdsa::SigningKey`
//! zeroizes itself on drop.
//!
//! ## Security considerations
//!
//! - Key bytes are never logged and never appear in `Debug` output.
//! - Hex input is decoded into a `Zeroizing` buffer so the intermediate copy
//!   is wiped as well.
//! - There is no `Serialize` impl. Exporting a key should be an explicit call
//!   to [`SecretKey::to_bytes`], not a side effect of dumping a struct.

use std::fmt;

use alloy_primitives::Address;
use k256::ecdsa::{SigningKey, VerifyingKey};
use thiserror::Error;
use zeroize::Zeroizing;

use super::hash::keccak256;
use crate::config::SECRET_KEY_LENGTH;

/// Errors that can occur while loading a secret key.
///
/// None of them echo the key material back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("invalid secret key length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid secret key: not a valid secp256k1 scalar")]
    InvalidScalar,

    #[error("invalid secret key: malformed hex")]
    InvalidHex,
}

/// A validated secp256k1 secret key.
///
/// # Examples
///
/// ```
/// use thor_tx_core::crypto::SecretKey;
///
/// let key = SecretKey::from_hex(
///     "7582be841ca040aa940fff6c05773129e135623e41acce3e0b8ba520dc1ae26a",
/// ).unwrap();
/// assert_eq!(
///     key.address().to_string().to_lowercase(),
///     "0xd989829d88b0ed1b06edf5c50174ecfa64f14a64"
/// );
/// ```
#[derive(Clone)]
pub struct SecretKey {
    signing_key: SigningKey,
}

impl SecretKey {
    /// Load a key from exactly 32 big-endian bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        // `SigningKey::from_slice` left-pads short input, which would turn a
        // truncated key into a different valid one.
        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(KeyError::InvalidLength {
                expected: SECRET_KEY_LENGTH,
                actual: bytes.len(),
            });
        }
        let signing_key = SigningKey::from_slice(bytes).map_err(|_| KeyError::InvalidScalar)?;
        Ok(Self { signing_key })
    }

    /// Load a key from hex, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = Zeroizing::new(hex::decode(digits).map_err(|_| KeyError::InvalidHex)?);
        Self::from_slice(&bytes)
    }

    /// Exports the raw secret scalar. The caller owns wiping the copy.
    pub fn to_bytes(&self) -> Zeroizing<[u8; SECRET_KEY_LENGTH]> {
        Zeroizing::new(self.signing_key.to_bytes().into())
    }

    /// The account address controlled by this key.
    pub fn address(&self) -> Address {
        address_from_verifying_key(self.signing_key.verifying_key())
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey(address={})", self.address())
    }
}

impl PartialEq for SecretKey {
    /// Compared by address, so secret bytes are never compared directly.
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl Eq for SecretKey {}

/// Address of the account controlled by `key`.
pub fn address_of(key: &SecretKey) -> Address {
    key.address()
}

/// Last 20 bytes of keccak256 over the uncompressed public key, minus its
/// `0x04` tag.
pub(crate) fn address_from_verifying_key(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}
