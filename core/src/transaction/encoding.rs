//! # Transaction Wire Format
//!
//! The profiles describing the unsigned and signed transaction shapes, the
//! canonicalization of the `reserved` field, and conversion between typed
//! [`TransactionBody`] values and the codec's [`Value`] tree.
//!
//! ## Field order
//!
//! ```text
//! chainTag, blockRef, expiration, clauses[{to, value, data}],
//! gasPriceCoef, gas, dependsOn, nonce, reserved[], (signature)
//! ```
//!
//! `blockRef` is the only compact field: its leading zero bytes are dropped
//! on the wire. Addresses and `dependsOn` are strictly fixed-length. Mixing
//! the two policies up changes the encoding of existing transactions, so
//! each field names its own scalar kind.
//!
//! ## Reserved
//!
//! On the wire `reserved` is `[features, ...unused]` with trailing empty
//! elements trimmed, so a body with no feature bits and no unused slots
//! encodes an empty list. On decode a non-empty list ending in an empty
//! element is rejected: the encoder could never have produced it.

use std::sync::OnceLock;

use alloy_primitives::{Address, Bytes, B256, B64, U256};
use tracing::{debug, warn};

use super::envelope::Transaction;
use super::error::TransactionError;
use super::types::{Clause, Reserved, TransactionBody};
use crate::codec::profile::child_path;
use crate::codec::{self, CodecError, Kind, Profile, ScalarKind, Value};
use crate::config::{
    ADDRESS_LENGTH, BLOCK_REF_LENGTH, CHAIN_TAG_MAX_BYTES, CLAUSE_VALUE_MAX_BYTES,
    EXPIRATION_MAX_BYTES, FEATURES_MAX_BYTES, GAS_MAX_BYTES, GAS_PRICE_COEF_MAX_BYTES,
    HASH_LENGTH, NONCE_MAX_BYTES,
};

const ROOT: &str = "tx";
const DECODE: &str = "decode";

const FEATURES: ScalarKind = ScalarKind::Numeric {
    max_bytes: FEATURES_MAX_BYTES,
};

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

fn body_fields() -> Vec<Profile> {
    vec![
        Profile::scalar(
            "chainTag",
            ScalarKind::Numeric {
                max_bytes: CHAIN_TAG_MAX_BYTES,
            },
        ),
        Profile::scalar(
            "blockRef",
            ScalarKind::CompactFixedBlob {
                len: BLOCK_REF_LENGTH,
            },
        ),
        Profile::scalar(
            "expiration",
            ScalarKind::Numeric {
                max_bytes: EXPIRATION_MAX_BYTES,
            },
        ),
        Profile::array(
            "clauses",
            Kind::Struct(vec![
                Profile::scalar(
                    "to",
                    ScalarKind::OptionalFixedBlob {
                        len: ADDRESS_LENGTH,
                    },
                ),
                Profile::scalar(
                    "value",
                    ScalarKind::Numeric {
                        max_bytes: CLAUSE_VALUE_MAX_BYTES,
                    },
                ),
                Profile::scalar("data", ScalarKind::HexBlob),
            ]),
        ),
        Profile::scalar(
            "gasPriceCoef",
            ScalarKind::Numeric {
                max_bytes: GAS_PRICE_COEF_MAX_BYTES,
            },
        ),
        Profile::scalar(
            "gas",
            ScalarKind::Numeric {
                max_bytes: GAS_MAX_BYTES,
            },
        ),
        Profile::scalar(
            "dependsOn",
            ScalarKind::OptionalFixedBlob { len: HASH_LENGTH },
        ),
        Profile::scalar(
            "nonce",
            ScalarKind::Numeric {
                max_bytes: NONCE_MAX_BYTES,
            },
        ),
        Profile::array("reserved", Kind::Scalar(ScalarKind::Buffer)),
    ]
}

/// Profile of the body alone, the input to the signing hash.
pub fn unsigned_profile() -> &'static Profile {
    static PROFILE: OnceLock<Profile> = OnceLock::new();
    PROFILE.get_or_init(|| Profile::structure(ROOT, body_fields()))
}

/// Body followed by the signature.
pub fn signed_profile() -> &'static Profile {
    static PROFILE: OnceLock<Profile> = OnceLock::new();
    PROFILE.get_or_init(|| {
        let mut fields = body_fields();
        fields.push(Profile::scalar("signature", ScalarKind::Buffer));
        Profile::structure(ROOT, fields)
    })
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// RLP-encode `body`, with `signature` appended when given.
pub fn encode_body(
    body: &TransactionBody,
    signature: Option<&[u8]>,
) -> Result<Vec<u8>, TransactionError> {
    let mut value = body_to_value(body)?;
    let profile = match (signature, &mut value) {
        (Some(sig), Value::Struct(map)) => {
            map.insert("signature".to_string(), Value::bytes(sig));
            signed_profile()
        }
        _ => unsigned_profile(),
    };
    Ok(codec::encode_object(&value, profile)?)
}

fn body_to_value(body: &TransactionBody) -> Result<Value, CodecError> {
    let clauses = body
        .clauses
        .iter()
        .map(|clause| {
            Value::object([
                ("to", clause.to.map_or(Value::Null, |to| Value::bytes(to.as_slice()))),
                ("value", Value::Text(clause.value.to_string())),
                ("data", Value::bytes(&clause.data)),
            ])
        })
        .collect();

    let reserved = encode_reserved(body.reserved.as_ref())?
        .into_iter()
        .map(Value::Bytes)
        .collect();

    Ok(Value::object([
        ("chainTag", Value::uint(u64::from(body.chain_tag))),
        ("blockRef", Value::bytes(body.block_ref.as_slice())),
        ("expiration", Value::uint(u64::from(body.expiration))),
        ("clauses", Value::List(clauses)),
        ("gasPriceCoef", Value::uint(u64::from(body.gas_price_coef))),
        ("gas", Value::uint(body.gas)),
        (
            "dependsOn",
            body.depends_on.map_or(Value::Null, |id| Value::bytes(id.as_slice())),
        ),
        ("nonce", Value::uint(body.nonce)),
        ("reserved", Value::List(reserved)),
    ]))
}

/// Wire elements of the reserved field: `[features, ...unused]` minus any
/// trailing empty elements.
pub(crate) fn encode_reserved(reserved: Option<&Reserved>) -> Result<Vec<Vec<u8>>, CodecError> {
    let Some(reserved) = reserved else {
        return Ok(Vec::new());
    };
    let features_path = child_path(&child_path(ROOT, "reserved"), "features");
    let features = Value::uint(u64::from(reserved.features()));
    let mut list = vec![FEATURES.encode(&features, &features_path)?];
    if let Some(unused) = &reserved.unused {
        list.extend(unused.iter().map(|b| b.to_vec()));
    }
    while list.last().is_some_and(|b| b.is_empty()) {
        list.pop();
    }
    Ok(list)
}

/// Rebuild `reserved` from its wire elements.
pub(crate) fn decode_reserved(list: &[Vec<u8>]) -> Result<Option<Reserved>, TransactionError> {
    let Some(last) = list.last() else {
        return Ok(None);
    };
    if last.is_empty() {
        warn!(elements = list.len(), "rejecting reserved field with a trailing empty element");
        return Err(TransactionError::InvalidTransactionField {
            operation: DECODE,
            field: "reserved",
            reason: "last element must not be empty".to_string(),
            reserved: list.iter().map(|b| Bytes::copy_from_slice(b)).collect(),
        });
    }

    let features_path = child_path(&child_path(ROOT, "reserved"), "features");
    let features = FEATURES.decode(&list[0], &features_path)?;
    let features = u32::try_from(to_u64(&features, &features_path)?).map_err(|_| {
        CodecError::field(DECODE, &features_path, &features, "expected a 32-bit integer")
    })?;

    let unused: Vec<Bytes> = list[1..].iter().map(|b| Bytes::copy_from_slice(b)).collect();
    Ok(Some(Reserved {
        features: Some(features),
        unused: (!unused.is_empty()).then_some(unused),
    }))
}

/// Canonical form of `reserved`: what decoding its own encoding yields.
pub(crate) fn normalize_reserved(
    reserved: Option<&Reserved>,
) -> Result<Option<Reserved>, TransactionError> {
    decode_reserved(&encode_reserved(reserved)?)
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode a raw transaction.
///
/// `is_signed` picks the profile: a signed transaction carries a trailing
/// signature whose length must match the body's delegation flag.
pub fn decode(raw: &[u8], is_signed: bool) -> Result<Transaction, TransactionError> {
    let profile = if is_signed {
        signed_profile()
    } else {
        unsigned_profile()
    };
    let value = codec::decode_object(raw, profile)?;
    let body = body_from_value(&value)?;

    let tx = if is_signed {
        let path = child_path(ROOT, "signature");
        let signature = field(&value, ROOT, "signature").and_then(|v| to_bytes(v, &path))?;
        Transaction::decoded(body, signature)?
    } else {
        Transaction::unsigned(body)?
    };
    debug!(
        len = raw.len(),
        signed = is_signed,
        clauses = tx.body().clauses.len(),
        "transaction decoded"
    );
    Ok(tx)
}

fn body_from_value(value: &Value) -> Result<TransactionBody, TransactionError> {
    let clauses_path = child_path(ROOT, "clauses");
    let clauses = field(value, ROOT, "clauses")?
        .as_list()
        .ok_or_else(|| CodecError::structure(DECODE, &clauses_path, "expected a list"))?
        .iter()
        .enumerate()
        .map(|(i, clause)| {
            clause_from_value(clause, &child_path(&clauses_path, &format!("#{}", i)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let reserved_path = child_path(ROOT, "reserved");
    let reserved = field(value, ROOT, "reserved")?
        .as_list()
        .ok_or_else(|| CodecError::structure(DECODE, &reserved_path, "expected a list"))?
        .iter()
        .map(|v| to_bytes(v, &reserved_path))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TransactionBody {
        chain_tag: narrow(value, "chainTag")?,
        block_ref: B64::from(fixed::<BLOCK_REF_LENGTH>(value, ROOT, "blockRef")?),
        expiration: narrow(value, "expiration")?,
        clauses,
        gas_price_coef: narrow(value, "gasPriceCoef")?,
        gas: narrow(value, "gas")?,
        depends_on: optional_fixed::<HASH_LENGTH>(value, ROOT, "dependsOn")?.map(B256::from),
        nonce: narrow(value, "nonce")?,
        reserved: decode_reserved(&reserved)?,
    })
}

fn clause_from_value(value: &Value, path: &str) -> Result<Clause, CodecError> {
    let value_path = child_path(path, "value");
    let amount = match field(value, path, "value")? {
        Value::Number(n) => U256::from(*n),
        Value::Text(s) => U256::from_str_radix(s, 10).map_err(|_| {
            CodecError::field(DECODE, &value_path, s, "expected a decimal integer")
        })?,
        other => {
            return Err(CodecError::field(DECODE, &value_path, other, "expected an integer"))
        }
    };
    Ok(Clause {
        to: optional_fixed::<ADDRESS_LENGTH>(value, path, "to")?.map(Address::from),
        value: amount,
        data: Bytes::from(to_bytes(field(value, path, "data")?, &child_path(path, "data"))?),
    })
}

// ---------------------------------------------------------------------------
// Value accessors
// ---------------------------------------------------------------------------

fn field<'a>(value: &'a Value, parent: &str, name: &str) -> Result<&'a Value, CodecError> {
    value
        .get(name)
        .ok_or_else(|| CodecError::structure(DECODE, &child_path(parent, name), "missing property"))
}

fn to_u64(value: &Value, path: &str) -> Result<u64, CodecError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Text(s) => s
            .parse::<u64>()
            .map_err(|_| CodecError::field(DECODE, path, value, "expected a 64-bit integer")),
        other => Err(CodecError::field(DECODE, path, other, "expected an integer")),
    }
}

/// Top-level integer field, narrowed to its Rust type.
fn narrow<T: TryFrom<u64>>(value: &Value, name: &str) -> Result<T, CodecError> {
    let path = child_path(ROOT, name);
    let raw = field(value, ROOT, name)?;
    let n = to_u64(raw, &path)?;
    T::try_from(n).map_err(|_| CodecError::field(DECODE, &path, raw, "integer out of range"))
}

fn to_bytes(value: &Value, path: &str) -> Result<Vec<u8>, CodecError> {
    value
        .as_bytes()
        .map(<[u8]>::to_vec)
        .ok_or_else(|| CodecError::field(DECODE, path, value, "expected bytes"))
}

fn fixed<const N: usize>(value: &Value, parent: &str, name: &str) -> Result<[u8; N], CodecError> {
    let path = child_path(parent, name);
    let raw = field(value, parent, name)?;
    to_bytes(raw, &path)?
        .try_into()
        .map_err(|_| CodecError::field(DECODE, &path, raw, format!("expected {} bytes", N)))
}

fn optional_fixed<const N: usize>(
    value: &Value,
    parent: &str,
    name: &str,
) -> Result<Option<[u8; N]>, CodecError> {
    if field(value, parent, name)?.is_null() {
        return Ok(None);
    }
    fixed::<N>(value, parent, name).map(Some)
}
