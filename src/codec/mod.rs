//! JSON wire codec for component trees and actions.
//!
//! Decoding is tolerant: unknown keys are ignored, absent optional fields
//! take their defaults, and safely coercible scalars are coerced (see
//! [`crate::model::lenient`]). An unknown or missing `type` tag is a hard
//! failure. Encoding writes every field the model carries, so
//! `decode(encode(node)) == node` for any constructed tree.

mod error;

pub use error::{DecodeError, DecodeErrorKind, EncodeError};

use serde::Deserialize;
use serde_json::Value;

use crate::model::{Action, Node};

/// Decode one component node from JSON text.
pub fn decode(text: &str) -> Result<Node, DecodeError> {
    let node: Node = serde_json::from_str(text).map_err(|err| {
        let mut err = DecodeError::from(err);
        if err.kind == DecodeErrorKind::Data {
            if let Ok(value) = serde_json::from_str::<Value>(text) {
                err.path = locate_failure(&value, "$");
            }
        }
        tracing::debug!(
            kind = err.kind.as_str(),
            line = err.line,
            column = err.column,
            path = err.path.as_deref().unwrap_or(""),
            error = %err.message,
            "Component decode failed"
        );
        err
    })?;
    tracing::trace!(root = node.type_name(), nodes = node.count(), "Decoded component tree");
    Ok(node)
}

/// Decode a node from an already-parsed JSON value.
pub fn decode_value(value: Value) -> Result<Node, DecodeError> {
    Node::deserialize(&value).map_err(|err| {
        let mut err = DecodeError::from(err);
        err.path = locate_failure(&value, "$");
        err
    })
}

/// Path of the deepest node that fails to decode on its own. Children are
/// searched first, in document order, so the first broken leaf wins over
/// the ancestors that fail because of it.
fn locate_failure(value: &Value, path: &str) -> Option<String> {
    if let Value::Object(fields) = value {
        for field in ["children", "items"] {
            let Some(Value::Array(children)) = fields.get(field) else {
                continue;
            };
            for (index, child) in children.iter().enumerate() {
                let child_path = format!("{}.{}[{}]", path, field, index);
                if let Some(found) = locate_failure(child, &child_path) {
                    return Some(found);
                }
            }
        }
    }
    Node::deserialize(value).is_err().then(|| path.to_string())
}

/// Decode a JSON array of nodes. A single top-level node is accepted as a
/// one-element list.
pub fn decode_list(text: &str) -> Result<Vec<Node>, DecodeError> {
    let value: Value = serde_json::from_str(text)?;
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                decode_value(item).map_err(|mut err| {
                    err.message = format!("[{}]: {}", index, err.message);
                    err.path = err
                        .path
                        .map(|path| path.replacen('$', &format!("$[{}]", index), 1));
                    err
                })
            })
            .collect(),
        Value::Object(_) => Ok(vec![decode_value(value)?]),
        _ => Err(DecodeError::data(
            "expected a component object or an array of components",
        )),
    }
}

/// Decode a standalone action.
pub fn decode_action(text: &str) -> Result<Action, DecodeError> {
    Ok(serde_json::from_str(text)?)
}

/// Encode a node as compact JSON.
pub fn encode(node: &Node) -> Result<String, EncodeError> {
    Ok(serde_json::to_string(node)?)
}

/// Encode a node as indented JSON.
pub fn encode_pretty(node: &Node) -> Result<String, EncodeError> {
    Ok(serde_json::to_string_pretty(node)?)
}

pub fn encode_list(nodes: &[Node]) -> Result<String, EncodeError> {
    Ok(serde_json::to_string(nodes)?)
}

pub fn encode_action(action: &Action) -> Result<String, EncodeError> {
    Ok(serde_json::to_string(action)?)
}
