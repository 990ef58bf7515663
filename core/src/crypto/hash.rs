//! # Hashing Utilities
//!
//! The two hash functions the chain uses:
//!
//! - **BLAKE2b-256** for everything transaction-related: the signing hash,
//!   the delegated signing hash, and the transaction id.
//! - **Keccak-256** (the pre-standard SHA-3, as in Ethereum) only for
//!   deriving account addresses from public keys.
//!
//! Both return [`B256`] so digests can't be confused with arbitrary byte
//! buffers downstream.

use alloy_primitives::B256;
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use sha3::Keccak256;

type Blake2b256 = Blake2b<U32>;

/// BLAKE2b with a 32-byte output.
///
/// # Example
///
/// ```
/// use thor_tx_core::crypto::blake2b256;
///
/// let hash = blake2b256(b"");
/// assert_eq!(
///     hash.to_string(),
///     "0x0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
/// );
/// ```
pub fn blake2b256(data: &[u8]) -> B256 {
    blake2b256_multi(&[data])
}

/// BLAKE2b-256 over the concatenation of `parts`, without building the
/// concatenated buffer.
pub fn blake2b256_multi(parts: &[&[u8]]) -> B256 {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    B256::from_slice(&hasher.finalize())
}

/// Keccak-256 (Ethereum flavour, not FIPS SHA3-256).
pub fn keccak256(data: &[u8]) -> B256 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    B256::from_slice(&hasher.finalize())
}
