//! Core type definitions for Thor transactions.
//!
//! These are plain values: a [`TransactionBody`] says nothing about
//! signatures or hashes, which live on [`super::Transaction`]. All of them
//! serialize to the camelCase JSON shape used by Thor's REST API.

use alloy_primitives::{Address, Bytes, B256, B64, U256};
use serde::{Deserialize, Serialize};

use crate::config::DELEGATED_FEATURE_BIT;

// ---------------------------------------------------------------------------
// Clause
// ---------------------------------------------------------------------------

/// One `(to, value, data)` call. A transaction executes its clauses
/// atomically and in order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clause {
    /// Recipient, or `None` to deploy `data` as contract bytecode.
    pub to: Option<Address>,
    /// Amount of VET in wei.
    pub value: U256,
    /// Call data or bytecode.
    pub data: Bytes,
}

impl Clause {
    /// Plain VET transfer.
    pub fn transfer(to: Address, value: U256) -> Self {
        Self {
            to: Some(to),
            value,
            data: Bytes::new(),
        }
    }

    /// Contract call with no VET attached.
    pub fn call(to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            to: Some(to),
            value: U256::ZERO,
            data: data.into(),
        }
    }

    /// Contract deployment.
    pub fn deploy(bytecode: impl Into<Bytes>) -> Self {
        Self {
            to: None,
            value: U256::ZERO,
            data: bytecode.into(),
        }
    }

    pub fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }
}

// ---------------------------------------------------------------------------
// Reserved
// ---------------------------------------------------------------------------

/// The trailing `reserved` field: feature bits plus opaque slots kept for
/// future protocol upgrades.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reserved {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unused: Option<Vec<Bytes>>,
}

impl Reserved {
    /// Reserved field of a fee-delegated transaction.
    pub fn delegated() -> Self {
        Self {
            features: Some(DELEGATED_FEATURE_BIT),
            unused: None,
        }
    }

    pub fn features(&self) -> u32 {
        self.features.unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// TransactionBody
// ---------------------------------------------------------------------------

/// Everything a transaction commits to, apart from its signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBody {
    /// Last byte of the genesis block id; pins the tx to one network.
    pub chain_tag: u8,
    /// First 8 bytes of the block the expiration counts from.
    pub block_ref: B64,
    /// Number of blocks after `block_ref` the tx stays valid.
    pub expiration: u32,
    pub clauses: Vec<Clause>,
    /// 0..=255, scales the base gas price.
    pub gas_price_coef: u8,
    pub gas: u64,
    /// Id of a transaction that must be executed first.
    pub depends_on: Option<B256>,
    pub nonce: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved: Option<Reserved>,
}

impl TransactionBody {
    /// Feature bits, 0 when `reserved` is absent.
    pub fn features(&self) -> u32 {
        self.reserved.as_ref().map_or(0, Reserved::features)
    }

    /// Whether the delegation feature bit is set.
    pub fn is_delegated(&self) -> bool {
        self.features() & DELEGATED_FEATURE_BIT == DELEGATED_FEATURE_BIT
    }
}
