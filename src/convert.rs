//! JSON <-> syntax tree conversion.
//!
//! Trees arrive from the parser as JSON objects tagged by `type`, with
//! camelCase field names (`literalType`, `castType`, `commandType`, ...) and
//! bare arrays for implicit groups. [`json_to_query`] lowers that shape into
//! the typed [`Query`](crate::ast::Query); [`query_to_json`] produces it back.
//!
//! Lowering is strict: an operator node with the wrong number of arguments,
//! or a field of the wrong shape, stops with a [`DecodeError`] naming the
//! offending path. Use [`crate::validate`] to collect every problem of a
//! malformed tree instead.

mod decode;
mod encode;

pub use decode::{json_to_command, json_to_expr, json_to_item, json_to_query};
pub(crate) use decode::{boolean_value, decode_formatting, integer_value, param_position};
pub use encode::{command_to_json, expr_to_json, item_to_json, query_to_json};

use thiserror::Error;

/// Path of the root value in [`DecodeError::path`].
pub const ROOT_PATH: &str = "$";

/// A JSON tree that does not have the shape of a syntax tree.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at {path}")]
pub struct DecodeError {
    /// Location of the offending value, e.g. `$.commands[1].args[0]`
    pub path: String,
    pub kind: DecodeErrorKind,
}

impl DecodeError {
    pub(crate) fn new(path: &str, kind: DecodeErrorKind) -> Self {
        DecodeError {
            path: path.to_string(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeErrorKind {
    #[error("expected an object")]
    NotAnObject,

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("unknown node type `{0}`")]
    UnknownNodeType(String),

    #[error("expected {expected} node, found `{found}`")]
    UnexpectedNode {
        expected: &'static str,
        found: String,
    },

    #[error("`{node}` takes {expected} argument(s), found {found}")]
    Arity {
        node: &'static str,
        expected: usize,
        found: usize,
    },
}

pub(crate) fn field_path(path: &str, field: &str) -> String {
    format!("{}.{}", path, field)
}

pub(crate) fn index_path(path: &str, index: usize) -> String {
    format!("{}[{}]", path, index)
}
