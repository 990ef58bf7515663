//! # Digital Signatures
//!
//! Recoverable secp256k1 ECDSA over 32-byte digests.
//!
//! The wire form is 65 bytes, `r (32) || s (32) || v (1)`, with `v` the
//! recovery id (0 or 1). Nonces are derived with RFC 6979, so signing is
//! deterministic, and `s` is always in the lower half of the group order.
//! Verification is address-based: recover the public key, derive its
//! address, compare.

use alloy_primitives::{Address, B256};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use thiserror::Error;

use super::keys::{address_from_verifying_key, SecretKey};
use crate::config::SIGNATURE_LENGTH;

/// Errors during signature operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("invalid signature length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid signature recovery id: {0}")]
    InvalidRecoveryId(u8),

    #[error("invalid signature: r or s out of range")]
    InvalidComponents,

    #[error("public key recovery failed")]
    RecoveryFailed,

    #[error("signing failed")]
    SigningFailed,
}

/// Sign a 32-byte digest.
pub fn sign_hash(key: &SecretKey, hash: &B256) -> Result<[u8; SIGNATURE_LENGTH], SignatureError> {
    let (signature, recovery_id) = key
        .signing_key()
        .sign_prehash_recoverable(hash.as_slice())
        .map_err(|_| SignatureError::SigningFailed)?;

    let mut out = [0u8; SIGNATURE_LENGTH];
    out[..64].copy_from_slice(&signature.to_bytes());
    out[64] = recovery_id.to_byte();
    Ok(out)
}

/// Recover the address that produced `signature` over `hash`.
pub fn recover_address(hash: &B256, signature: &[u8]) -> Result<Address, SignatureError> {
    if signature.len() != SIGNATURE_LENGTH {
        return Err(SignatureError::InvalidLength {
            expected: SIGNATURE_LENGTH,
            actual: signature.len(),
        });
    }
    let v = signature[64];
    if v > 1 {
        return Err(SignatureError::InvalidRecoveryId(v));
    }
    let recovery_id = RecoveryId::from_byte(v).ok_or(SignatureError::InvalidRecoveryId(v))?;
    let sig =
        Signature::from_slice(&signature[..64]).map_err(|_| SignatureError::InvalidComponents)?;

    let key = VerifyingKey::recover_from_prehash(hash.as_slice(), &sig, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)?;
    Ok(address_from_verifying_key(&key))
}

/// Check that `signature` over `hash` was made by `expected`.
///
/// Returns `false` for malformed signatures as well as for a different
/// signer. Callers that need to know which should use [`recover_address`].
pub fn verify(hash: &B256, signature: &[u8], expected: &Address) -> bool {
    matches!(recover_address(hash, signature), Ok(addr) if addr == *expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::hash::blake2b256;

    fn key() -> SecretKey {
        SecretKey::from_hex("7582be841ca040aa940fff6c05773129e135623e41acce3e0b8ba520dc1ae26a")
            .unwrap()
    }

    #[test]
    fn test_sign_and_recover() {
        let hash = blake2b256(b"transfer 1 VET");
        let sig = sign_hash(&key(), &hash).unwrap();
        assert!(sig[64] <= 1);
        assert_eq!(recover_address(&hash, &sig).unwrap(), key().address());
        assert!(verify(&hash, &sig, &key().address()));
    }

    #[test]
    fn test_signing_is_deterministic() {
        let hash = blake2b256(b"same message");
        assert_eq!(sign_hash(&key(), &hash).unwrap(), sign_hash(&key(), &hash).unwrap());
    }

    #[test]
    fn test_wrong_hash_recovers_other_address() {
        let sig = sign_hash(&key(), &blake2b256(b"one")).unwrap();
        assert!(!verify(&blake2b256(b"two"), &sig, &key().address()));
    }

    #[test]
    fn test_rejects_malformed_signatures() {
        let hash = blake2b256(b"x");
        let mut sig = sign_hash(&key(), &hash).unwrap();

        assert_eq!(
            recover_address(&hash, &sig[..64]).unwrap_err(),
            SignatureError::InvalidLength {
                expected: 65,
                actual: 64
            }
        );

        sig[64] = 2;
        assert_eq!(
            recover_address(&hash, &sig).unwrap_err(),
            SignatureError::InvalidRecoveryId(2)
        );

        let zeros = [0u8; 65];
        assert_eq!(
            recover_address(&hash, &zeros).unwrap_err(),
            SignatureError::InvalidComponents
        );
    }
}
