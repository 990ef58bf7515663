//! # Cryptographic Primitives
//!
//! Everything the transaction layer needs from cryptography, and nothing
//! more:
//!
//! - **BLAKE2b-256** for signing hashes and transaction ids.
//! - **Keccak-256** for address derivation.
//! - **secp256k1 ECDSA** (recoverable, RFC 6979, low-s) for signatures.
//!
//! Every function here is a thin, typed wrapper around audited RustCrypto
//! implementations.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{blake2b256, blake2b256_multi, keccak256};
pub use keys::{address_of, KeyError, SecretKey};
pub use signatures::{recover_address, sign_hash, verify, SignatureError};
