//! The plain value tree the profile codec packs from and unpacks into.
//!
//! A [`Value`] is deliberately loose: it is what a caller hands in before
//! validation, and what comes out of the wire before it is turned back into
//! typed structs. Scalar codecs decide which variants they accept.

use std::collections::BTreeMap;
use std::fmt;

use crate::config::MAX_SAFE_INTEGER;

/// A dynamically shaped value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Absent value (e.g. a contract-creation clause's `to`).
    Null,
    /// Unsigned integer. Numeric codecs cap this at `2^53 - 1`.
    Number(u64),
    /// Text: a decimal/`0x`-hex integer or a `0x`-hex blob.
    Text(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// Ordered list, matched against array profiles.
    List(Vec<Value>),
    /// Named properties, matched against struct profiles.
    Struct(BTreeMap<String, Value>),
}

impl Value {
    /// Wraps a `u64` the way numeric codecs want it: as a `Number` when it is
    /// exactly representable, otherwise as a decimal string.
    pub fn uint(n: u64) -> Self {
        if n <= MAX_SAFE_INTEGER {
            Value::Number(n)
        } else {
            Value::Text(n.to_string())
        }
    }

    pub fn bytes(b: impl AsRef<[u8]>) -> Self {
        Value::Bytes(b.as_ref().to_vec())
    }

    /// Builds a struct value from `(name, value)` pairs.
    pub fn object<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Value::Struct(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Property lookup on a struct value. `None` for missing keys and for
    /// non-struct values.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Struct(map) => map.get(key),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Short name of the variant, used in structure errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::Struct(_) => "struct",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{:?}", s),
            Value::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Struct(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::uint(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
