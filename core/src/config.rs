//! # Protocol Configuration & Constants
//!
//! Every magic number of the Thor transaction format lives here. If you're
//! hardcoding a length or a gas cost somewhere else, move it here.
//!
//! These values are consensus-critical. The node rejects anything that is
//! not byte-for-byte what it expects, so none of them are tunable at runtime.

// ---------------------------------------------------------------------------
// Field Lengths
// ---------------------------------------------------------------------------

/// Nominal length of a block reference. On the wire it is compact-trimmed
/// (leading zero bytes dropped), so the encoded form may be shorter.
pub const BLOCK_REF_LENGTH: usize = 8;

/// Account address length: the last 20 bytes of keccak256(pubkey).
pub const ADDRESS_LENGTH: usize = 20;

/// Length of a transaction id / `dependsOn` reference / BLAKE2b-256 digest.
pub const HASH_LENGTH: usize = 32;

/// secp256k1 recoverable signature: `r (32) || s (32) || recovery_id (1)`.
pub const SIGNATURE_LENGTH: usize = 65;

/// Fee-delegated transactions carry the sender signature followed by the
/// gas-payer signature.
pub const DELEGATED_SIGNATURE_LENGTH: usize = SIGNATURE_LENGTH * 2;

/// Raw secp256k1 secret scalar length.
pub const SECRET_KEY_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Numeric Field Widths (maximum encoded bytes)
// ---------------------------------------------------------------------------

pub const CHAIN_TAG_MAX_BYTES: usize = 1;
pub const EXPIRATION_MAX_BYTES: usize = 4;
pub const CLAUSE_VALUE_MAX_BYTES: usize = 32;
pub const GAS_PRICE_COEF_MAX_BYTES: usize = 1;
pub const GAS_MAX_BYTES: usize = 8;
pub const NONCE_MAX_BYTES: usize = 8;
pub const FEATURES_MAX_BYTES: usize = 4;

/// Largest integer a numeric field accepts in `Number` form. Anything above
/// must be passed as a decimal or hex string so no client ever round-trips a
/// value through a lossy double.
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Numeric values up to this many bytes decode back to `Number`; longer
/// ones decode to a decimal string.
pub const NUMBER_DECODE_MAX_BYTES: usize = 6;

// ---------------------------------------------------------------------------
// Reserved Field
// ---------------------------------------------------------------------------

/// Bit 0 of `reserved.features` marks a fee-delegated transaction.
pub const DELEGATED_FEATURE_BIT: u32 = 1;

// ---------------------------------------------------------------------------
// Wire Format Limits
// ---------------------------------------------------------------------------

/// Maximum RLP list nesting accepted by the decoder. The transaction shape
/// needs 3 levels (tx -> clauses -> clause); the slack is for custom profiles.
pub const MAX_RLP_DEPTH: usize = 16;

// ---------------------------------------------------------------------------
// Intrinsic Gas
// ---------------------------------------------------------------------------

/// Base cost every transaction pays.
pub const TX_GAS: u64 = 5_000;

/// Per-clause cost for a call or transfer.
pub const CLAUSE_GAS: u64 = 16_000;

/// Per-clause cost when the clause deploys a contract (`to` is null).
pub const CLAUSE_GAS_CONTRACT_CREATION: u64 = 48_000;

/// Cost per zero byte of clause data.
pub const ZERO_GAS_DATA: u64 = 4;

/// Cost per non-zero byte of clause data.
pub const NON_ZERO_GAS_DATA: u64 = 68;

// ---------------------------------------------------------------------------
// Builder Defaults
// ---------------------------------------------------------------------------

/// Default expiration (in blocks) used by the body builder. 32 blocks is
/// roughly five minutes at the 10s block interval.
pub const DEFAULT_EXPIRATION: u32 = 32;
