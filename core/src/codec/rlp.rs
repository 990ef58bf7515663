//! RLP primitive over nested byte items.
//!
//! Only length-prefix framing lives here; what the bytes mean is decided by
//! the profile engine. Header parsing is `alloy_rlp::Header`, which already
//! rejects non-canonical prefixes (single bytes wrapped in `0x81`, long form
//! used for short payloads, length-of-length with leading zeros). On top of
//! that the decoder rejects trailing bytes and bounds list nesting.

use alloy_rlp::{Header, EMPTY_STRING_CODE};
use tracing::trace;

use super::error::CodecError;
use crate::config::MAX_RLP_DEPTH;

/// One RLP node: a byte string or a list of nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem {
    Bytes(Vec<u8>),
    List(Vec<RlpItem>),
}

impl RlpItem {
    /// Node kind as used in structure errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            RlpItem::Bytes(_) => "byte string",
            RlpItem::List(_) => "list",
        }
    }
}

/// Serialize an item tree.
pub fn encode(item: &RlpItem) -> Vec<u8> {
    let mut out = Vec::new();
    encode_into(item, &mut out);
    out
}

fn encode_into(item: &RlpItem, out: &mut Vec<u8>) {
    match item {
        RlpItem::Bytes(bytes) => {
            if bytes.len() == 1 && bytes[0] < EMPTY_STRING_CODE {
                out.push(bytes[0]);
                return;
            }
            Header {
                list: false,
                payload_length: bytes.len(),
            }
            .encode(out);
            out.extend_from_slice(bytes);
        }
        RlpItem::List(items) => {
            let mut payload = Vec::new();
            for child in items {
                encode_into(child, &mut payload);
            }
            Header {
                list: true,
                payload_length: payload.len(),
            }
            .encode(out);
            out.extend_from_slice(&payload);
        }
    }
}

/// Parse exactly one item spanning the whole of `buf`.
pub fn decode(buf: &[u8]) -> Result<RlpItem, CodecError> {
    let mut cursor = buf;
    let item = decode_item(&mut cursor, 0)?;
    if !cursor.is_empty() {
        return Err(CodecError::MalformedRlp(format!(
            "{} trailing bytes after the top-level item",
            cursor.len()
        )));
    }
    trace!(len = buf.len(), "rlp item decoded");
    Ok(item)
}

fn decode_item(buf: &mut &[u8], depth: usize) -> Result<RlpItem, CodecError> {
    let header = Header::decode(buf)?;
    if header.payload_length > buf.len() {
        return Err(alloy_rlp::Error::InputTooShort.into());
    }
    let (payload, rest) = buf.split_at(header.payload_length);
    *buf = rest;

    if !header.list {
        return Ok(RlpItem::Bytes(payload.to_vec()));
    }
    if depth >= MAX_RLP_DEPTH {
        return Err(CodecError::MalformedRlp(format!(
            "lists nested deeper than {}",
            MAX_RLP_DEPTH
        )));
    }

    let mut payload = payload;
    let mut items = Vec::new();
    while !payload.is_empty() {
        items.push(decode_item(&mut payload, depth + 1)?);
    }
    Ok(RlpItem::List(items))
}
