//! # Scalar Codecs
//!
//! Leaf rules of the profile tree. Each [`ScalarKind`] turns one [`Value`]
//! into the raw byte string that sits in an RLP leaf, and back.
//!
//! The rules are strict in both directions. Encoding never coerces a
//! questionable input (a negative-looking string, an odd-length hex blob, a
//! 19-byte address) into something that merely looks valid, and decoding
//! refuses any byte string the encoder could not have produced. That second
//! half is what makes the wire format canonical: there is exactly one
//! encoding per value, so hashes and signatures are reproducible across
//! implementations.
//!
//! | Kind               | Accepts                        | Wire form                       |
//! |--------------------|--------------------------------|---------------------------------|
//! | `Numeric`          | `Number`, decimal/`0x` `Text`  | minimal big-endian, 0 is empty  |
//! | `FixedBlob`        | `0x` `Text`, `Bytes`           | exactly `len` bytes             |
//! | `OptionalFixedBlob`| as above, or `Null`            | `len` bytes, or empty for null  |
//! | `CompactFixedBlob` | `0x` `Text`, `Bytes` (`len`)   | leading zero bytes trimmed      |
//! | `HexBlob`          | `0x` `Text`, `Bytes`           | verbatim, any length            |
//! | `Buffer`           | `Bytes`                        | verbatim, any length            |

use alloy_primitives::U256;

use super::error::CodecError;
use super::value::Value;
use crate::config::{MAX_SAFE_INTEGER, NUMBER_DECODE_MAX_BYTES};

const ENCODE: &str = "encode";
const DECODE: &str = "decode";

/// Largest numeric width the codec can represent.
const NUMERIC_MAX_WIDTH: usize = 32;

/// A leaf codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// Unsigned integer of at most `max_bytes` bytes.
    Numeric { max_bytes: usize },
    /// Blob of exactly `len` bytes.
    FixedBlob { len: usize },
    /// Like `FixedBlob`, with `Null` carried as the empty string.
    OptionalFixedBlob { len: usize },
    /// Nominally `len` bytes; leading zero bytes are dropped on the wire.
    CompactFixedBlob { len: usize },
    /// Arbitrary-length blob given as `0x` hex or bytes.
    HexBlob,
    /// Arbitrary-length raw bytes.
    Buffer,
}

impl ScalarKind {
    /// Validate `value` and produce its leaf bytes.
    pub fn encode(&self, value: &Value, path: &str) -> Result<Vec<u8>, CodecError> {
        match *self {
            ScalarKind::Numeric { max_bytes } => encode_numeric(value, max_bytes, path),
            ScalarKind::FixedBlob { len } => fixed_blob(value, len, path),
            ScalarKind::OptionalFixedBlob { len } => match value {
                Value::Null => Ok(Vec::new()),
                other => fixed_blob(other, len, path),
            },
            ScalarKind::CompactFixedBlob { len } => {
                let blob = fixed_blob(value, len, path)?;
                let start = blob.iter().position(|b| *b != 0).unwrap_or(blob.len());
                Ok(blob[start..].to_vec())
            }
            ScalarKind::HexBlob => blob(value, path),
            ScalarKind::Buffer => match value {
                Value::Bytes(b) => Ok(b.clone()),
                other => Err(CodecError::field(ENCODE, path, other, "expected bytes")),
            },
        }
    }

    /// Validate leaf bytes and rebuild the value.
    pub fn decode(&self, buf: &[u8], path: &str) -> Result<Value, CodecError> {
        match *self {
            ScalarKind::Numeric { max_bytes } => decode_numeric(buf, max_bytes, path),
            ScalarKind::FixedBlob { len } => {
                if buf.len() != len {
                    return Err(CodecError::field(
                        DECODE,
                        path,
                        Value::bytes(buf),
                        format!("expected {} bytes", len),
                    ));
                }
                Ok(Value::bytes(buf))
            }
            ScalarKind::OptionalFixedBlob { len } => {
                if buf.is_empty() {
                    return Ok(Value::Null);
                }
                ScalarKind::FixedBlob { len }.decode(buf, path)
            }
            ScalarKind::CompactFixedBlob { len } => {
                if buf.len() > len {
                    return Err(CodecError::field(
                        DECODE,
                        path,
                        Value::bytes(buf),
                        format!("expected at most {} bytes", len),
                    ));
                }
                if buf.first() == Some(&0) {
                    return Err(CodecError::field(
                        DECODE,
                        path,
                        Value::bytes(buf),
                        "expected no leading zero bytes",
                    ));
                }
                let mut padded = vec![0u8; len - buf.len()];
                padded.extend_from_slice(buf);
                Ok(Value::Bytes(padded))
            }
            ScalarKind::HexBlob | ScalarKind::Buffer => Ok(Value::bytes(buf)),
        }
    }
}

// ---------------------------------------------------------------------------
// Numeric
// ---------------------------------------------------------------------------

fn encode_numeric(value: &Value, max_bytes: usize, path: &str) -> Result<Vec<u8>, CodecError> {
    let n = match value {
        Value::Number(n) => {
            if *n > MAX_SAFE_INTEGER {
                return Err(CodecError::field(
                    ENCODE,
                    path,
                    value,
                    "number exceeds 2^53 - 1, pass it as a string",
                ));
            }
            U256::from(*n)
        }
        Value::Text(s) => parse_integer_text(s).ok_or_else(|| {
            CodecError::field(
                ENCODE,
                path,
                value,
                "expected a non-negative decimal or 0x-hex integer",
            )
        })?,
        other => {
            return Err(CodecError::field(
                ENCODE,
                path,
                other,
                "expected a number or an integer string",
            ))
        }
    };

    let bytes = minimal_be_bytes(n);
    if bytes.len() > max_bytes {
        return Err(CodecError::field(
            ENCODE,
            path,
            value,
            format!("expected an integer of at most {} bytes", max_bytes),
        ));
    }
    Ok(bytes)
}

fn decode_numeric(buf: &[u8], max_bytes: usize, path: &str) -> Result<Value, CodecError> {
    if buf.len() > max_bytes {
        return Err(CodecError::field(
            DECODE,
            path,
            Value::bytes(buf),
            format!("expected at most {} bytes", max_bytes),
        ));
    }
    if buf.len() > 1 && buf[0] == 0 {
        return Err(CodecError::field(
            DECODE,
            path,
            Value::bytes(buf),
            "expected a canonical integer (no leading zero bytes)",
        ));
    }

    if buf.len() <= NUMBER_DECODE_MAX_BYTES {
        let n = buf.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b));
        return Ok(Value::Number(n));
    }
    // Width is bounded by the check above; anything wider than 32 bytes
    // would be a misconfigured profile.
    let n = U256::try_from_be_slice(buf).ok_or_else(|| {
        CodecError::field(DECODE, path, Value::bytes(buf), "integer wider than 256 bits")
    })?;
    Ok(Value::Text(n.to_string()))
}

/// Parses `"123"` or `"0x7b"`. Signs, whitespace, and an empty digit string
/// are all rejected.
fn parse_integer_text(s: &str) -> Option<U256> {
    if let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        U256::from_str_radix(digits, 16).ok()
    } else {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        U256::from_str_radix(s, 10).ok()
    }
}

fn minimal_be_bytes(n: U256) -> Vec<u8> {
    let full: [u8; NUMERIC_MAX_WIDTH] = n.to_be_bytes();
    let start = full.iter().position(|b| *b != 0).unwrap_or(full.len());
    full[start..].to_vec()
}

// ---------------------------------------------------------------------------
// Blobs
// ---------------------------------------------------------------------------

fn blob(value: &Value, path: &str) -> Result<Vec<u8>, CodecError> {
    match value {
        Value::Bytes(b) => Ok(b.clone()),
        Value::Text(s) => parse_hex_blob(s).ok_or_else(|| {
            CodecError::field(ENCODE, path, value, "expected an even-length 0x-prefixed hex string")
        }),
        other => Err(CodecError::field(ENCODE, path, other, "expected a hex string or bytes")),
    }
}

fn fixed_blob(value: &Value, len: usize, path: &str) -> Result<Vec<u8>, CodecError> {
    let bytes = blob(value, path)?;
    if bytes.len() != len {
        return Err(CodecError::field(
            ENCODE,
            path,
            value,
            format!("expected {} bytes, got {}", len, bytes.len()),
        ));
    }
    Ok(bytes)
}

fn parse_hex_blob(s: &str) -> Option<Vec<u8>> {
    let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))?;
    if digits.len() % 2 != 0 {
        return None;
    }
    hex::decode(digits).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: &str = "tx.field";

    fn numeric(max_bytes: usize) -> ScalarKind {
        ScalarKind::Numeric { max_bytes }
    }

    // -----------------------------------------------------------------------
    // Numeric
    // -----------------------------------------------------------------------

    #[test]
    fn test_numeric_zero_is_empty() {
        assert!(numeric(8).encode(&Value::Number(0), P).unwrap().is_empty());
        assert!(numeric(8).encode(&"0".into(), P).unwrap().is_empty());
        assert!(numeric(8).encode(&"0x0".into(), P).unwrap().is_empty());
    }

    #[test]
    fn test_numeric_minimal_big_endian() {
        assert_eq!(numeric(8).encode(&Value::Number(21000), P).unwrap(), vec![0x52, 0x08]);
        assert_eq!(numeric(8).encode(&"0x5208".into(), P).unwrap(), vec![0x52, 0x08]);
        assert_eq!(numeric(8).encode(&"0x000100".into(), P).unwrap(), vec![0x01, 0x00]);
        assert_eq!(numeric(1).encode(&Value::Number(255), P).unwrap(), vec![0xff]);
    }

    #[test]
    fn test_numeric_rejects_out_of_range() {
        assert!(numeric(1).encode(&Value::Number(256), P).is_err());
        assert!(numeric(8).encode(&Value::Number(MAX_SAFE_INTEGER + 1), P).is_err());
        // Large values are fine as strings.
        assert_eq!(
            numeric(8).encode(&"18446744073709551615".into(), P).unwrap(),
            vec![0xff; 8]
        );
        assert!(numeric(8).encode(&"18446744073709551616".into(), P).is_err());
    }

    #[test]
    fn test_numeric_rejects_bad_text() {
        for bad in ["", "-1", "1.5", " 1", "0x", "0xzz", "abc", "1e3"] {
            let err = numeric(8).encode(&bad.into(), P).unwrap_err();
            assert!(
                matches!(err, CodecError::InvalidField { .. }),
                "{:?} should be rejected",
                bad
            );
        }
        assert!(numeric(8).encode(&Value::Null, P).is_err());
        assert!(numeric(8).encode(&Value::bytes([1]), P).is_err());
    }

    #[test]
    fn test_numeric_decode_canonical() {
        assert_eq!(numeric(8).decode(&[], P).unwrap(), Value::Number(0));
        assert_eq!(numeric(8).decode(&[0x00], P).unwrap(), Value::Number(0));
        assert_eq!(numeric(8).decode(&[0x52, 0x08], P).unwrap(), Value::Number(21000));

        let err = numeric(8).decode(&[0x00, 0x01], P).unwrap_err();
        assert_eq!(err.path(), Some(P));
        assert!(numeric(1).decode(&[0x01, 0x00], P).is_err());
    }

    #[test]
    fn test_numeric_decode_wide_values_as_text() {
        let six = [0xff; 6];
        assert_eq!(
            numeric(8).decode(&six, P).unwrap(),
            Value::Number(0xffff_ffff_ffff)
        );
        let eight = [0xff; 8];
        assert_eq!(
            numeric(8).decode(&eight, P).unwrap(),
            Value::Text("18446744073709551615".to_string())
        );
        let big = numeric(32).decode(&[0x01; 32], P).unwrap();
        assert!(matches!(big, Value::Text(_)));
    }

    // -----------------------------------------------------------------------
    // Blobs
    // -----------------------------------------------------------------------

    #[test]
    fn test_fixed_blob_length_checked_both_ways() {
        let kind = ScalarKind::FixedBlob { len: 4 };
        assert_eq!(kind.encode(&"0x01020304".into(), P).unwrap(), vec![1, 2, 3, 4]);
        assert!(kind.encode(&"0x010203".into(), P).is_err());
        assert!(kind.encode(&Value::Null, P).is_err());
        assert!(kind.decode(&[1, 2, 3], P).is_err());
        assert_eq!(kind.decode(&[1, 2, 3, 4], P).unwrap(), Value::bytes([1, 2, 3, 4]));
    }

    #[test]
    fn test_optional_fixed_blob_null() {
        let kind = ScalarKind::OptionalFixedBlob { len: 20 };
        assert!(kind.encode(&Value::Null, P).unwrap().is_empty());
        assert_eq!(kind.decode(&[], P).unwrap(), Value::Null);
        assert!(kind.decode(&[0xaa; 19], P).is_err());
        assert_eq!(kind.encode(&Value::bytes([0xaa; 20]), P).unwrap(), vec![0xaa; 20]);
    }

    #[test]
    fn test_compact_blob_trims_and_pads() {
        let kind = ScalarKind::CompactFixedBlob { len: 8 };
        assert!(kind.encode(&"0x0000000000000000".into(), P).unwrap().is_empty());
        assert_eq!(
            kind.encode(&"0x00000000aabbccdd".into(), P).unwrap(),
            vec![0xaa, 0xbb, 0xcc, 0xdd]
        );
        assert_eq!(kind.decode(&[], P).unwrap(), Value::bytes([0u8; 8]));
        assert_eq!(
            kind.decode(&[0xaa, 0xbb], P).unwrap(),
            Value::bytes([0, 0, 0, 0, 0, 0, 0xaa, 0xbb])
        );
        assert!(kind.encode(&"0x00aabb".into(), P).is_err());
    }

    #[test]
    fn test_compact_blob_rejects_non_canonical() {
        let kind = ScalarKind::CompactFixedBlob { len: 8 };
        assert!(kind.decode(&[0x00, 0x01], P).is_err());
        assert!(kind.decode(&[0x01; 9], P).is_err());
    }

    #[test]
    fn test_hex_blob() {
        assert_eq!(ScalarKind::HexBlob.encode(&"0x".into(), P).unwrap(), Vec::<u8>::new());
        assert_eq!(ScalarKind::HexBlob.encode(&"0xABcd".into(), P).unwrap(), vec![0xab, 0xcd]);
        assert!(ScalarKind::HexBlob.encode(&"0xabc".into(), P).is_err());
        assert!(ScalarKind::HexBlob.encode(&"abcd".into(), P).is_err());
        assert!(ScalarKind::HexBlob.encode(&Value::Number(1), P).is_err());
    }

    #[test]
    fn test_buffer_bytes_only() {
        assert_eq!(ScalarKind::Buffer.encode(&Value::bytes([9, 9]), P).unwrap(), vec![9, 9]);
        assert!(ScalarKind::Buffer.encode(&"0x0909".into(), P).is_err());
        assert_eq!(ScalarKind::Buffer.decode(&[0], P).unwrap(), Value::bytes([0]));
    }
}
