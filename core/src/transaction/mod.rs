//! # Transaction Module
//!
//! The Thor transaction model, its canonical wire format, hashing, and
//! signing, including fee delegation.
//!
//! ## Architecture
//!
//! ```text
//! types.rs     — Plain value types (Clause, Reserved, TransactionBody)
//! builder.rs   — Fluent TransactionBodyBuilder with defaults
//! encoding.rs  — Transaction profiles, reserved-field rules, decode
//! envelope.rs  — Immutable Transaction: body + signature + derived hashes
//! signing.rs   — sign / sign_with_delegator and two-party delegation
//! gas.rs       — Intrinsic gas
//! error.rs     — TransactionError and the ErrorKind taxonomy
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build** — assemble a [`TransactionBody`] (by hand or with
//!    [`TransactionBodyBuilder`]).
//! 2. **Sign** — [`sign`] for plain transactions, [`sign_with_delegator`]
//!    (or [`sign_for_delegator`] then [`sign_as_delegator`]) when a gas
//!    payer covers the fee.
//! 3. **Ship** — send [`Transaction::encoded`] to a node.
//! 4. **Read back** — [`decode`] raw bytes from the chain.
//!
//! ## Hashes
//!
//! - Signing hash: BLAKE2b-256 of the unsigned encoding.
//! - Gas-payer hash: BLAKE2b-256 of `signing_hash || sender_address`.
//! - Id: BLAKE2b-256 of the signed encoding, available once fully signed.

pub mod builder;
pub mod encoding;
pub mod envelope;
pub mod error;
pub mod gas;
pub mod signing;
pub mod types;

pub use builder::TransactionBodyBuilder;
pub use encoding::{decode, encode_body, signed_profile, unsigned_profile};
pub use envelope::Transaction;
pub use error::{ErrorKind, TransactionError};
pub use gas::intrinsic_gas;
pub use signing::{sign, sign_as_delegator, sign_for_delegator, sign_with_delegator};
pub use types::{Clause, Reserved, TransactionBody};
