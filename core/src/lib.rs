// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Thor Transaction Core
//!
//! Transaction codec and signing core for the VeChain Thor blockchain: how a
//! transaction is laid out on the wire, hashed, and signed, optionally by a
//! second party who pays the gas.
//!
//! Every node re-encodes what it receives and checks hashes and signatures
//! against that encoding, so "close enough" is a rejected transaction. The
//! whole crate is organised around producing exactly one encoding per
//! transaction and refusing input that could have any other.
//!
//! ## Architecture
//!
//! - **codec** — Profile-driven RLP codec: scalar rules, profile tree, framing.
//! - **transaction** — Body model, wire profiles, hashing, signing, delegation.
//! - **crypto** — BLAKE2b-256, Keccak-256, recoverable secp256k1 signatures.
//! - **config** — Protocol constants: field widths, lengths, gas costs.
//!
//! ## Quick start
//!
//! ```
//! use alloy_primitives::{Address, U256};
//! use thor_tx_core::transaction::{self, Clause, TransactionBodyBuilder};
//!
//! let body = TransactionBodyBuilder::new(0x27)
//!     .clause(Clause::transfer(Address::repeat_byte(0x11), U256::from(1_000)))
//!     .nonce(42)
//!     .build();
//!
//! let key = [0x11u8; 32];
//! let tx = transaction::sign(&body, &key).unwrap();
//! let back = transaction::decode(tx.encoded(), true).unwrap();
//! assert_eq!(back, tx);
//! ```
//!
//! ## Design Philosophy
//!
//! 1. Validate before producing, validate before interpreting.
//! 2. Values are immutable; signing returns a new transaction.
//! 3. Errors are data (operation, field path, offending value); messages
//!    are only rendered at the edge.
//! 4. Key material is zeroized and never logged.

pub mod codec;
pub mod config;
pub mod crypto;
pub mod transaction;

pub use codec::{CodecError, Value};
pub use transaction::{
    decode, sign, sign_with_delegator, ErrorKind, Transaction, TransactionBody, TransactionError,
};
