//! Transaction body construction via the builder pattern.
//!
//! [`TransactionBodyBuilder`] fills in sensible defaults so callers only
//! set what matters to them, and derives `gas` from the clause list when it
//! is not set explicitly. It produces a plain [`TransactionBody`]; signing
//! happens in [`super::signing`].

use alloy_primitives::{Bytes, B256, B64};

use super::gas::intrinsic_gas;
use super::types::{Clause, Reserved, TransactionBody};
use crate::config::{DEFAULT_EXPIRATION, DELEGATED_FEATURE_BIT};

/// Fluent builder for [`TransactionBody`].
///
/// # Usage
///
/// ```
/// use alloy_primitives::{Address, U256};
/// use thor_tx_core::transaction::{Clause, TransactionBodyBuilder};
///
/// let body = TransactionBodyBuilder::new(0x4a)
///     .clause(Clause::transfer(Address::repeat_byte(0x11), U256::from(1)))
///     .nonce(7)
///     .delegated(true)
///     .build();
///
/// assert_eq!(body.gas, 21_000);
/// assert!(body.is_delegated());
/// ```
#[derive(Debug, Clone)]
pub struct TransactionBodyBuilder {
    chain_tag: u8,
    block_ref: B64,
    expiration: u32,
    clauses: Vec<Clause>,
    gas_price_coef: u8,
    gas: Option<u64>,
    depends_on: Option<B256>,
    nonce: u64,
    delegated: bool,
    unused: Option<Vec<Bytes>>,
}

impl TransactionBodyBuilder {
    /// Starts a body for the network identified by `chain_tag`.
    pub fn new(chain_tag: u8) -> Self {
        Self {
            chain_tag,
            block_ref: B64::ZERO,
            expiration: DEFAULT_EXPIRATION,
            clauses: Vec::new(),
            gas_price_coef: 0,
            gas: None,
            depends_on: None,
            nonce: 0,
            delegated: false,
            unused: None,
        }
    }

    pub fn block_ref(mut self, block_ref: B64) -> Self {
        self.block_ref = block_ref;
        self
    }

    pub fn expiration(mut self, blocks: u32) -> Self {
        self.expiration = blocks;
        self
    }

    /// Appends one clause.
    pub fn clause(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Appends several clauses, in order.
    pub fn clauses(mut self, clauses: impl IntoIterator<Item = Clause>) -> Self {
        self.clauses.extend(clauses);
        self
    }

    pub fn gas_price_coef(mut self, coef: u8) -> Self {
        self.gas_price_coef = coef;
        self
    }

    /// Gas limit. Defaults to the intrinsic gas of the clauses.
    pub fn gas(mut self, gas: u64) -> Self {
        self.gas = Some(gas);
        self
    }

    pub fn depends_on(mut self, id: B256) -> Self {
        self.depends_on = Some(id);
        self
    }

    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    /// Sets or clears the fee-delegation feature bit.
    pub fn delegated(mut self, delegated: bool) -> Self {
        self.delegated = delegated;
        self
    }

    /// Opaque reserved slots after the feature bits.
    pub fn unused_reserved(mut self, unused: Vec<Bytes>) -> Self {
        self.unused = Some(unused);
        self
    }

    pub fn build(self) -> TransactionBody {
        let gas = self.gas.unwrap_or_else(|| intrinsic_gas(&self.clauses));
        let features = if self.delegated { DELEGATED_FEATURE_BIT } else { 0 };
        let reserved = (features != 0 || self.unused.is_some()).then(|| Reserved {
            features: (features != 0).then_some(features),
            unused: self.unused,
        });

        TransactionBody {
            chain_tag: self.chain_tag,
            block_ref: self.block_ref,
            expiration: self.expiration,
            clauses: self.clauses,
            gas_price_coef: self.gas_price_coef,
            gas,
            depends_on: self.depends_on,
            nonce: self.nonce,
            reserved,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
