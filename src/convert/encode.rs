use serde_json::{Map as Fields, Number, Value, json};

use crate::ast::{
    Callee, Column, ColumnPart, Command, Comment, Expr, Formatting, Function, Item, Literal,
    LiteralValue, Location, MapEntry, NodeMeta, NodeType, ParamType, Query, Source,
};

pub fn query_to_json(query: &Query) -> Value {
    let mut fields = base(NodeType::Query, &query.meta);
    fields.insert(
        "commands".to_string(),
        Value::Array(query.commands.iter().map(command_to_json).collect()),
    );
    Value::Object(fields)
}

pub fn command_to_json(command: &Command) -> Value {
    let mut fields = base(NodeType::Command, &command.meta);
    if let Some(command_type) = &command.command_type {
        fields.insert("commandType".to_string(), json!(command_type));
    }
    fields.insert("args".to_string(), items(&command.args));
    Value::Object(fields)
}

/// Groups come out as bare arrays.
pub fn item_to_json(item: &Item) -> Value {
    match item {
        Item::Expr(expr) => expr_to_json(expr),
        Item::Group(group) => items(group),
    }
}

/// A `NaN` or infinite double literal or interval quantity encodes as
/// `null`, so such trees do not survive a round trip through
/// [`json_to_expr`](super::json_to_expr).
pub fn expr_to_json(expr: &Expr) -> Value {
    let mut fields = base(expr.node_type(), expr.meta());
    match expr {
        Expr::Query(query) => {
            fields.insert(
                "commands".to_string(),
                Value::Array(query.commands.iter().map(command_to_json).collect()),
            );
        }
        Expr::Function(function) => function_fields(function, &mut fields),
        Expr::Option(option) => {
            fields.insert("args".to_string(), items(&option.args));
        }
        Expr::Source(source) => source_fields(source, &mut fields),
        Expr::Column(column) => column_fields(column, &mut fields),
        Expr::TimeInterval(interval) => {
            fields.insert("unit".to_string(), json!(interval.unit));
            fields.insert("quantity".to_string(), number(interval.quantity));
        }
        Expr::List(list) => {
            fields.insert("subtype".to_string(), json!(list.subtype.as_str()));
            fields.insert(
                "values".to_string(),
                Value::Array(list.values.iter().map(expr_to_json).collect()),
            );
        }
        Expr::Literal(literal) => literal_fields(literal, &mut fields),
        Expr::Identifier(_) | Expr::Unknown(_) => {}
        Expr::InlineCast(cast) => {
            fields.insert("value".to_string(), item_to_json(&cast.value));
            fields.insert("castType".to_string(), json!(cast.cast_type.as_str()));
        }
        Expr::Order(order) => {
            fields.insert("order".to_string(), json!(order.order.as_str()));
            fields.insert("nulls".to_string(), json!(order.nulls.as_str()));
            fields.insert(
                "args".to_string(),
                Value::Array(vec![item_to_json(&order.field)]),
            );
        }
        Expr::Map(map) => {
            fields.insert(
                "entries".to_string(),
                Value::Array(map.entries.iter().map(map_entry_to_json).collect()),
            );
        }
        Expr::MapEntry(entry) => map_entry_fields(entry, &mut fields),
    }
    Value::Object(fields)
}

fn function_fields(function: &Function, fields: &mut Fields<String, Value>) {
    fields.insert("subtype".to_string(), json!(function.subtype().as_str()));
    if let Some(operator) = &function.operator {
        let operator = match operator {
            Callee::Identifier(identifier) => {
                expr_to_json(&Expr::Identifier(identifier.clone()))
            }
            Callee::Param(literal) => literal_to_json(literal),
        };
        fields.insert("operator".to_string(), operator);
    }
    fields.insert("args".to_string(), items(function.args()));
}

fn source_fields(source: &Source, fields: &mut Fields<String, Value>) {
    fields.insert("sourceType".to_string(), json!(source.source_type.as_str()));
    for (name, part) in [
        ("prefix", &source.prefix),
        ("index", &source.index),
        ("selector", &source.selector),
    ] {
        if let Some(literal) = part {
            fields.insert(name.to_string(), literal_to_json(literal));
        }
    }
}

fn column_fields(column: &Column, fields: &mut Fields<String, Value>) {
    let args = column
        .args
        .iter()
        .map(|part| match part {
            ColumnPart::Identifier(identifier) => {
                expr_to_json(&Expr::Identifier(identifier.clone()))
            }
            ColumnPart::Param(literal) => literal_to_json(literal),
        })
        .collect();
    fields.insert("args".to_string(), Value::Array(args));
    fields.insert("parts".to_string(), json!(column.parts));
    fields.insert("quoted".to_string(), json!(column.quoted));
}

fn map_entry_to_json(entry: &MapEntry) -> Value {
    let mut fields = base(NodeType::MapEntry, &entry.meta);
    map_entry_fields(entry, &mut fields);
    Value::Object(fields)
}

fn map_entry_fields(entry: &MapEntry, fields: &mut Fields<String, Value>) {
    fields.insert("key".to_string(), literal_to_json(&entry.key));
    fields.insert("value".to_string(), expr_to_json(&entry.value));
}

fn literal_to_json(literal: &Literal) -> Value {
    let mut fields = base(NodeType::Literal, &literal.meta);
    literal_fields(literal, &mut fields);
    Value::Object(fields)
}

fn literal_fields(literal: &Literal, fields: &mut Fields<String, Value>) {
    fields.insert(
        "literalType".to_string(),
        json!(literal.literal_type().as_str()),
    );
    match &literal.value {
        LiteralValue::Double(n) => {
            fields.insert("value".to_string(), number(*n));
        }
        LiteralValue::Integer(n) => {
            fields.insert("value".to_string(), json!(n));
        }
        LiteralValue::Boolean(b) => {
            fields.insert("value".to_string(), json!(b.to_string()));
        }
        LiteralValue::Null => {
            fields.insert("value".to_string(), json!("null"));
        }
        LiteralValue::Keyword {
            value,
            value_unquoted,
            unquoted,
        } => {
            fields.insert("value".to_string(), json!(value));
            fields.insert("valueUnquoted".to_string(), json!(value_unquoted));
            if *unquoted {
                fields.insert("unquoted".to_string(), json!(true));
            }
        }
        LiteralValue::Param(param) => {
            fields.insert("paramKind".to_string(), json!(param.kind.as_str()));
            fields.insert("paramType".to_string(), json!(param.param_type.tag()));
            let value = match &param.param_type {
                ParamType::Unnamed => json!(""),
                ParamType::Named(name) => json!(name),
                ParamType::Positional(position) => json!(position),
            };
            fields.insert("value".to_string(), value);
        }
    }
}

fn items(items: &[Item]) -> Value {
    Value::Array(items.iter().map(item_to_json).collect())
}

fn base(node_type: NodeType, meta: &NodeMeta) -> Fields<String, Value> {
    let mut fields = Fields::new();
    fields.insert("type".to_string(), json!(node_type.as_str()));
    fields.insert("name".to_string(), json!(meta.name));
    fields.insert("text".to_string(), json!(meta.text));
    fields.insert("location".to_string(), location(&meta.location));
    fields.insert("incomplete".to_string(), json!(meta.incomplete));
    if let Some(formatting) = meta.formatting.as_ref().filter(|f| !f.is_empty()) {
        fields.insert("formatting".to_string(), formatting_to_json(formatting));
    }
    fields
}

fn location(location: &Location) -> Value {
    json!({ "min": location.min, "max": location.max })
}

fn formatting_to_json(formatting: &Formatting) -> Value {
    let mut fields = Fields::new();
    for (name, comments) in [
        ("top", &formatting.top),
        ("left", &formatting.left),
        ("right", &formatting.right),
        ("bottom", &formatting.bottom),
    ] {
        if !comments.is_empty() {
            fields.insert(
                name.to_string(),
                Value::Array(comments.iter().map(comment_to_json).collect()),
            );
        }
    }
    if let Some(comment) = &formatting.right_single_line {
        fields.insert("rightSingleLine".to_string(), comment_to_json(comment));
    }
    Value::Object(fields)
}

fn comment_to_json(comment: &Comment) -> Value {
    let mut fields = Fields::new();
    fields.insert("type".to_string(), json!("comment"));
    fields.insert("subtype".to_string(), json!(comment.kind.as_str()));
    fields.insert("text".to_string(), json!(comment.text));
    if let Some(location) = &comment.location {
        fields.insert("location".to_string(), self::location(location));
    }
    Value::Object(fields)
}

/// Non-finite numbers have no JSON form and come out as `null`, which
/// the decoder rejects.
fn number(n: f64) -> Value {
    Number::from_f64(n).map(Value::Number).unwrap_or_else(|| {
        log::warn!("encoding non-finite number {} as null", n);
        Value::Null
    })
}
