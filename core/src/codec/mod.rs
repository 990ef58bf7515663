//! # Profile-Driven RLP Codec
//!
//! Turns loosely typed [`Value`] trees into canonical RLP bytes and back,
//! steered by a declarative [`Profile`].
//!
//! ## Layers
//!
//! - [`scalar`] — leaf codecs with their canonicalization rules.
//! - [`profile`] — the profile tree and the recursive pack/unpack walk.
//! - [`rlp`] — length-prefix framing of nested byte items.
//!
//! Transactions are one user of this module; their profiles live in
//! `transaction::encoding`.

pub mod error;
pub mod profile;
pub mod rlp;
pub mod scalar;
pub mod value;

pub use error::CodecError;
pub use profile::{Kind, Profile};
pub use rlp::RlpItem;
pub use scalar::ScalarKind;
pub use value::Value;

use tracing::trace;

/// Pack `value` with `profile` and serialize it.
pub fn encode_object(value: &Value, profile: &Profile) -> Result<Vec<u8>, CodecError> {
    let item = profile.pack(value)?;
    let bytes = rlp::encode(&item);
    trace!(profile = profile.name, len = bytes.len(), "object encoded");
    Ok(bytes)
}

/// Parse `bytes` and unpack the result with `profile`.
pub fn decode_object(bytes: &[u8], profile: &Profile) -> Result<Value, CodecError> {
    let item = rlp::decode(bytes)?;
    profile.unpack(&item)
}
