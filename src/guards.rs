//! Classification of untyped JSON values against the node shapes.
//!
//! These predicates accept any [`serde_json::Value`] and never fail. They
//! are the gate a consumer passes before reading tag-specific fields of a
//! tree handed over as JSON.

use serde_json::Value;

use crate::ast::NodeType;

/// An object with both a `name` and a `text` field.
pub fn is_base_node(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|fields| fields.contains_key("name") && fields.contains_key("text"))
}

/// A base node tagged `function`.
pub fn is_function_node(value: &Value) -> bool {
    is_base_node(value) && tag(value, "type") == Some("function")
}

/// A base node that is a `?name` / `??name` parameter literal.
pub fn is_named_param_literal(value: &Value) -> bool {
    is_base_node(value)
        && tag(value, "type") == Some("literal")
        && tag(value, "literalType") == Some("param")
        && tag(value, "paramType") == Some("named")
}

/// An object with a `type` tag, as opposed to a group.
pub fn is_proper_node(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|fields| fields.contains_key("type"))
}

/// A bare array standing for an implicit grouping of items.
pub fn is_group(value: &Value) -> bool {
    value.is_array()
}

/// A node tagged `unknown`: input the producer did not recognise.
pub fn is_unknown_node(value: &Value) -> bool {
    node_type(value) == Some(NodeType::Unknown)
}

/// The node type tag, when it is one of the known ones.
pub fn node_type(value: &Value) -> Option<NodeType> {
    tag(value, "type").and_then(NodeType::from_name)
}

fn tag<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value.get(field).and_then(Value::as_str)
}
