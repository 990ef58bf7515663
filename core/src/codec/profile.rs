//! # Profile Tree & Pack/Unpack Engine
//!
//! A [`Profile`] describes the shape of a value: a scalar leaf, a struct of
//! named sub-profiles (encoded as an RLP list in declaration order), or a
//! homogeneous array. Packing walks the profile and the [`Value`] together
//! and yields an [`RlpItem`] tree; unpacking is the mirror image.
//!
//! Both directions stop at the first problem and report the dotted path of
//! the node that caused it, e.g. `tx.clauses.#1.value`.

use std::collections::BTreeMap;

use super::error::CodecError;
use super::rlp::RlpItem;
use super::scalar::ScalarKind;
use super::value::Value;

const PACK: &str = "pack";
const UNPACK: &str = "unpack";

/// A named shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: &'static str,
    pub kind: Kind,
}

/// What a profile describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    Scalar(ScalarKind),
    /// Fields in wire order.
    Struct(Vec<Profile>),
    /// Every element shares the item kind.
    Array(Box<Kind>),
}

impl Profile {
    pub fn scalar(name: &'static str, kind: ScalarKind) -> Self {
        Self {
            name,
            kind: Kind::Scalar(kind),
        }
    }

    pub fn structure(name: &'static str, fields: Vec<Profile>) -> Self {
        Self {
            name,
            kind: Kind::Struct(fields),
        }
    }

    pub fn array(name: &'static str, item: Kind) -> Self {
        Self {
            name,
            kind: Kind::Array(Box::new(item)),
        }
    }

    /// Pack `value` using this profile's name as the root of every path.
    pub fn pack(&self, value: &Value) -> Result<RlpItem, CodecError> {
        pack(value, &self.kind, self.name)
    }

    /// Unpack `item` using this profile's name as the root of every path.
    pub fn unpack(&self, item: &RlpItem) -> Result<Value, CodecError> {
        unpack(item, &self.kind, self.name)
    }
}

/// Joins a parent path and a child name with a dot.
pub fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

fn item_path(parent: &str, index: usize) -> String {
    child_path(parent, &format!("#{}", index))
}

/// Apply `kind` to `value`.
pub fn pack(value: &Value, kind: &Kind, path: &str) -> Result<RlpItem, CodecError> {
    match kind {
        Kind::Scalar(scalar) => scalar.encode(value, path).map(RlpItem::Bytes),
        Kind::Struct(fields) => {
            let Value::Struct(props) = value else {
                return Err(CodecError::structure(
                    PACK,
                    path,
                    format!("expected a struct, got {}", value.type_name()),
                ));
            };
            fields
                .iter()
                .map(|field| {
                    let field_path = child_path(path, field.name);
                    let prop = props.get(field.name).ok_or_else(|| {
                        CodecError::structure(PACK, &field_path, "missing property")
                    })?;
                    pack(prop, &field.kind, &field_path)
                })
                .collect::<Result<Vec<_>, _>>()
                .map(RlpItem::List)
        }
        Kind::Array(item_kind) => {
            let Value::List(items) = value else {
                return Err(CodecError::structure(
                    PACK,
                    path,
                    format!("expected a list, got {}", value.type_name()),
                ));
            };
            items
                .iter()
                .enumerate()
                .map(|(i, item)| pack(item, item_kind, &item_path(path, i)))
                .collect::<Result<Vec<_>, _>>()
                .map(RlpItem::List)
        }
    }
}

/// Apply `kind` to a decoded RLP node.
pub fn unpack(item: &RlpItem, kind: &Kind, path: &str) -> Result<Value, CodecError> {
    match kind {
        Kind::Scalar(scalar) => match item {
            RlpItem::Bytes(bytes) => scalar.decode(bytes, path),
            RlpItem::List(_) => Err(CodecError::structure(
                UNPACK,
                path,
                "expected a byte string, got a list",
            )),
        },
        Kind::Struct(fields) => {
            let RlpItem::List(items) = item else {
                return Err(CodecError::structure(
                    UNPACK,
                    path,
                    format!("expected a list, got a {}", item.kind_name()),
                ));
            };
            if items.len() != fields.len() {
                return Err(CodecError::structure(
                    UNPACK,
                    path,
                    format!("expected {} fields, got {}", fields.len(), items.len()),
                ));
            }
            fields
                .iter()
                .zip(items)
                .map(|(field, node)| {
                    let value = unpack(node, &field.kind, &child_path(path, field.name))?;
                    Ok((field.name.to_string(), value))
                })
                .collect::<Result<BTreeMap<_, _>, CodecError>>()
                .map(Value::Struct)
        }
        Kind::Array(item_kind) => {
            let RlpItem::List(items) = item else {
                return Err(CodecError::structure(
                    UNPACK,
                    path,
                    format!("expected a list, got a {}", item.kind_name()),
                ));
            };
            items
                .iter()
                .enumerate()
                .map(|(i, node)| unpack(node, item_kind, &item_path(path, i)))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List)
        }
    }
}
