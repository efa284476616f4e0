use serde_json::{Map as Fields, Value};

use super::{DecodeError, DecodeErrorKind, ROOT_PATH, field_path, index_path};
use crate::ast::{
    Callee, CastType, Column, ColumnPart, Command, CommandOption, Comment, CommentKind, Expr,
    Formatting, Function, FunctionKind, FunctionSubtype, Identifier, InlineCast, Item, List,
    ListSubtype, Literal, LiteralType, LiteralValue, Location, Map, MapEntry, NodeMeta, NodeType,
    NullsOrder, Order, Param, ParamKind, ParamType, Query, SortOrder, Source, SourceType,
    TimeInterval, Unknown,
};
use crate::guards::is_unknown_node;

type DecodeResult<T> = Result<T, DecodeError>;

/// Lowers a `query` node, or the legacy bare array of commands, into a
/// [`Query`].
pub fn json_to_query(value: &Value) -> DecodeResult<Query> {
    let query = decode_query(value, ROOT_PATH)?;
    log::debug!("decoded query with {} command(s)", query.commands.len());
    Ok(query)
}

pub fn json_to_command(value: &Value) -> DecodeResult<Command> {
    decode_command(value, ROOT_PATH)
}

pub fn json_to_item(value: &Value) -> DecodeResult<Item> {
    decode_item(value, ROOT_PATH)
}

pub fn json_to_expr(value: &Value) -> DecodeResult<Expr> {
    decode_expr(value, ROOT_PATH)
}

fn decode_query(value: &Value, path: &str) -> DecodeResult<Query> {
    if let Value::Array(commands) = value {
        log::trace!("decoding legacy command array at {}", path);
        let commands = decode_commands(commands, path)?;
        let location = commands
            .iter()
            .map(|command| command.meta.location)
            .reduce(|a, b| a.merge(&b))
            .unwrap_or_default();
        return Ok(Query {
            meta: NodeMeta::new("", "", location),
            commands,
        });
    }

    let fields = object(value, path)?;
    expect_type(fields, NodeType::Query, path)?;
    let meta = decode_meta(fields, path)?;
    let commands = array_field(fields, "commands", path)?;
    let commands = decode_commands(commands, &field_path(path, "commands"))?;
    Ok(Query { meta, commands })
}

/// `unknown` nodes in command position are dropped.
fn decode_commands(values: &[Value], path: &str) -> DecodeResult<Vec<Command>> {
    values
        .iter()
        .enumerate()
        .filter(|(i, value)| !skip_unknown(value, &index_path(path, *i)))
        .map(|(i, value)| decode_command(value, &index_path(path, i)))
        .collect()
}

fn decode_command(value: &Value, path: &str) -> DecodeResult<Command> {
    let fields = object(value, path)?;
    expect_type(fields, NodeType::Command, path)?;
    Ok(Command {
        meta: decode_meta(fields, path)?,
        command_type: opt_string_field(fields, "commandType", path)?,
        args: decode_args(fields, path)?,
    })
}

fn decode_args(fields: &Fields<String, Value>, path: &str) -> DecodeResult<Vec<Item>> {
    let args = array_field(fields, "args", path)?;
    decode_items(args, &field_path(path, "args"))
}

fn decode_items(values: &[Value], path: &str) -> DecodeResult<Vec<Item>> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| decode_item(value, &index_path(path, i)))
        .collect()
}

fn decode_item(value: &Value, path: &str) -> DecodeResult<Item> {
    match value {
        Value::Array(items) => Ok(Item::Group(decode_items(items, path)?)),
        _ => Ok(Item::Expr(decode_expr(value, path)?)),
    }
}

fn decode_expr(value: &Value, path: &str) -> DecodeResult<Expr> {
    let fields = object(value, path)?;
    let node_type = node_type(fields, path)?;
    if node_type == NodeType::Unknown {
        return Ok(Expr::Unknown(Unknown {
            meta: decode_meta(fields, path).unwrap_or_else(|_| unknown_meta(fields)),
        }));
    }
    let meta = decode_meta(fields, path)?;

    let expr = match node_type {
        NodeType::Command => {
            return Err(DecodeError::new(
                path,
                DecodeErrorKind::UnexpectedNode {
                    expected: "expression",
                    found: "command".to_string(),
                },
            ));
        }
        NodeType::Query => {
            let commands = array_field(fields, "commands", path)?;
            let commands = decode_commands(commands, &field_path(path, "commands"))?;
            Expr::Query(Box::new(Query { meta, commands }))
        }
        NodeType::Function => Expr::Function(decode_function(fields, meta, path)?),
        NodeType::Option => Expr::Option(CommandOption {
            meta,
            args: decode_args(fields, path)?,
        }),
        NodeType::Order => Expr::Order(decode_order(fields, meta, path)?),
        NodeType::InlineCast => {
            let value = field(fields, "value", path)?;
            let cast_type = string_field(fields, "castType", path)?;
            Expr::InlineCast(InlineCast {
                meta,
                value: Box::new(decode_item(value, &field_path(path, "value"))?),
                cast_type: CastType::from_name(&cast_type)
                    .ok_or_else(|| invalid(path, "castType", "a known cast type"))?,
            })
        }
        NodeType::Unknown => Expr::Unknown(Unknown { meta }),
        NodeType::TimeInterval => Expr::TimeInterval(TimeInterval {
            meta,
            unit: string_field(fields, "unit", path)?,
            quantity: field(fields, "quantity", path)?
                .as_f64()
                .ok_or_else(|| invalid(path, "quantity", "a number"))?,
        }),
        NodeType::Source => Expr::Source(decode_source(fields, meta, path)?),
        NodeType::Column => Expr::Column(decode_column(fields, meta, path)?),
        NodeType::List => {
            let subtype = match opt_string_field(fields, "subtype", path)? {
                Some(name) => ListSubtype::from_name(&name)
                    .ok_or_else(|| invalid(path, "subtype", "`literal` or `tuple`"))?,
                None => ListSubtype::default(),
            };
            let values_path = field_path(path, "values");
            let values = array_field(fields, "values", path)?
                .iter()
                .enumerate()
                .map(|(i, value)| decode_expr(value, &index_path(&values_path, i)))
                .collect::<DecodeResult<Vec<_>>>()?;
            Expr::List(List {
                meta,
                subtype,
                values,
            })
        }
        NodeType::Map => {
            let entries_path = field_path(path, "entries");
            let mut entries = Vec::new();
            for (i, value) in array_field(fields, "entries", path)?.iter().enumerate() {
                let entry_path = index_path(&entries_path, i);
                if skip_unknown(value, &entry_path) {
                    continue;
                }
                entries.extend(decode_map_entry(value, &entry_path)?);
            }
            Expr::Map(Map { meta, entries })
        }
        NodeType::MapEntry => match decode_map_entry_fields(fields, meta.clone(), path)? {
            Some(entry) => Expr::MapEntry(entry),
            None => Expr::Unknown(Unknown { meta }),
        },
        NodeType::Literal => Expr::Literal(Literal {
            value: decode_literal_value(fields, path)?,
            meta,
        }),
        NodeType::Identifier => Expr::Identifier(Identifier { meta }),
    };
    Ok(expr)
}

fn decode_function(
    fields: &Fields<String, Value>,
    meta: NodeMeta,
    path: &str,
) -> DecodeResult<Function> {
    let subtype = match opt_string_field(fields, "subtype", path)? {
        Some(name) => FunctionSubtype::from_name(&name)
            .ok_or_else(|| invalid(path, "subtype", "a function subtype"))?,
        None => FunctionSubtype::VariadicCall,
    };

    let operator_path = field_path(path, "operator");
    let operator = match fields.get("operator") {
        None | Some(Value::Null) => None,
        Some(value) if skip_unknown(value, &operator_path) => None,
        Some(value) => Some(decode_callee(value, &operator_path)?),
    };

    let args = decode_args(fields, path)?;
    let found = args.len();
    let arity = |expected| {
        DecodeError::new(
            path,
            DecodeErrorKind::Arity {
                node: subtype.as_str(),
                expected,
                found,
            },
        )
    };

    let kind = match subtype {
        FunctionSubtype::VariadicCall => FunctionKind::VariadicCall(args),
        FunctionSubtype::UnaryExpression => {
            let [arg]: [Item; 1] = args.try_into().map_err(|_| arity(1))?;
            FunctionKind::Unary(Box::new(arg))
        }
        FunctionSubtype::PostfixUnaryExpression => {
            let [arg]: [Item; 1] = args.try_into().map_err(|_| arity(1))?;
            FunctionKind::PostfixUnary(Box::new(arg))
        }
        FunctionSubtype::BinaryExpression => {
            let pair: [Item; 2] = args.try_into().map_err(|_| arity(2))?;
            FunctionKind::Binary(Box::new(pair))
        }
    };

    Ok(Function {
        meta,
        operator,
        kind,
    })
}

fn decode_callee(value: &Value, path: &str) -> DecodeResult<Callee> {
    match decode_expr(value, path)? {
        Expr::Identifier(identifier) => Ok(Callee::Identifier(identifier)),
        Expr::Literal(literal) if literal.param().is_some() => Ok(Callee::Param(literal)),
        other => Err(unexpected(path, "identifier or parameter", &other)),
    }
}

fn decode_order(fields: &Fields<String, Value>, meta: NodeMeta, path: &str) -> DecodeResult<Order> {
    let order = opt_string_field(fields, "order", path)?.unwrap_or_default();
    let nulls = opt_string_field(fields, "nulls", path)?.unwrap_or_default();
    let args = decode_args(fields, path)?;
    let found = args.len();
    let [field]: [Item; 1] = args.try_into().map_err(|_| {
        DecodeError::new(
            path,
            DecodeErrorKind::Arity {
                node: "order",
                expected: 1,
                found,
            },
        )
    })?;

    Ok(Order {
        meta,
        order: SortOrder::from_name(&order)
            .ok_or_else(|| invalid(path, "order", "``, `ASC` or `DESC`"))?,
        nulls: NullsOrder::from_name(&nulls)
            .ok_or_else(|| invalid(path, "nulls", "``, `NULLS FIRST` or `NULLS LAST`"))?,
        field: Box::new(field),
    })
}

fn decode_source(
    fields: &Fields<String, Value>,
    meta: NodeMeta,
    path: &str,
) -> DecodeResult<Source> {
    let source_type = string_field(fields, "sourceType", path)?;
    let part = |name: &'static str| -> DecodeResult<Option<Literal>> {
        match fields.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) if skip_unknown(value, &field_path(path, name)) => Ok(None),
            Some(value) => decode_string_literal(value, &field_path(path, name)).map(Some),
        }
    };

    Ok(Source {
        source_type: SourceType::from_name(&source_type)
            .ok_or_else(|| invalid(path, "sourceType", "`index` or `policy`"))?,
        prefix: part("prefix")?,
        index: part("index")?,
        selector: part("selector")?,
        meta,
    })
}

fn decode_column(
    fields: &Fields<String, Value>,
    meta: NodeMeta,
    path: &str,
) -> DecodeResult<Column> {
    let args_path = field_path(path, "args");
    let args = array_field(fields, "args", path)?
        .iter()
        .enumerate()
        .filter(|(i, value)| !skip_unknown(value, &index_path(&args_path, *i)))
        .map(|(i, value)| {
            let part_path = index_path(&args_path, i);
            match decode_expr(value, &part_path)? {
                Expr::Identifier(identifier) => Ok(ColumnPart::Identifier(identifier)),
                Expr::Literal(literal) if literal.param().is_some() => {
                    Ok(ColumnPart::Param(literal))
                }
                other => Err(unexpected(&part_path, "identifier or parameter", &other)),
            }
        })
        .collect::<DecodeResult<Vec<_>>>()?;

    let parts = match fields.get("parts") {
        None | Some(Value::Null) => args
            .iter()
            .map(|part| match part {
                ColumnPart::Identifier(identifier) => identifier.meta.name.clone(),
                ColumnPart::Param(literal) => literal.meta.name.clone(),
            })
            .collect(),
        Some(Value::Array(parts)) => parts
            .iter()
            .map(|part| {
                part.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| invalid(path, "parts", "an array of strings"))
            })
            .collect::<DecodeResult<Vec<_>>>()?,
        Some(_) => return Err(invalid(path, "parts", "an array of strings")),
    };

    Ok(Column {
        meta,
        args,
        parts,
        quoted: opt_bool_field(fields, "quoted", path)?.unwrap_or(false),
    })
}

fn decode_map_entry(value: &Value, path: &str) -> DecodeResult<Option<MapEntry>> {
    let fields = object(value, path)?;
    expect_type(fields, NodeType::MapEntry, path)?;
    let meta = decode_meta(fields, path)?;
    decode_map_entry_fields(fields, meta, path)
}

/// `None` when the key is an `unknown` node.
fn decode_map_entry_fields(
    fields: &Fields<String, Value>,
    meta: NodeMeta,
    path: &str,
) -> DecodeResult<Option<MapEntry>> {
    let key = field(fields, "key", path)?;
    let value = field(fields, "value", path)?;
    let key_path = field_path(path, "key");
    let value = decode_expr(value, &field_path(path, "value"))?;
    if skip_unknown(key, &key_path) {
        return Ok(None);
    }
    Ok(Some(MapEntry {
        meta,
        key: decode_string_literal(key, &key_path)?,
        value: Box::new(value),
    }))
}

fn decode_string_literal(value: &Value, path: &str) -> DecodeResult<Literal> {
    match decode_expr(value, path)? {
        Expr::Literal(literal) if literal.literal_type() == LiteralType::Keyword => Ok(literal),
        other => Err(unexpected(path, "string literal", &other)),
    }
}

fn decode_literal_value(fields: &Fields<String, Value>, path: &str) -> DecodeResult<LiteralValue> {
    let literal_type = string_field(fields, "literalType", path)?;
    let literal_type = LiteralType::from_name(&literal_type)
        .ok_or_else(|| invalid(path, "literalType", "a literal type"))?;

    let value = match literal_type {
        LiteralType::Double => LiteralValue::Double(
            field(fields, "value", path)?
                .as_f64()
                .ok_or_else(|| invalid(path, "value", "a number"))?,
        ),
        LiteralType::Integer => LiteralValue::Integer(
            integer_value(field(fields, "value", path)?)
                .ok_or_else(|| invalid(path, "value", "an integer"))?,
        ),
        LiteralType::Boolean => LiteralValue::Boolean(
            boolean_value(field(fields, "value", path)?)
                .ok_or_else(|| invalid(path, "value", "`true` or `false`"))?,
        ),
        LiteralType::Null => LiteralValue::Null,
        LiteralType::Keyword => {
            let value = string_field(fields, "value", path)?;
            let value_unquoted = match opt_string_field(fields, "valueUnquoted", path)? {
                Some(unquoted) => unquoted,
                None => strip_quotes(&value).to_string(),
            };
            LiteralValue::Keyword {
                value,
                value_unquoted,
                unquoted: opt_bool_field(fields, "unquoted", path)?.unwrap_or(false),
            }
        }
        LiteralType::Param => LiteralValue::Param(decode_param(fields, path)?),
    };
    Ok(value)
}

fn decode_param(fields: &Fields<String, Value>, path: &str) -> DecodeResult<Param> {
    let kind = string_field(fields, "paramKind", path)?;
    let kind =
        ParamKind::from_name(&kind).ok_or_else(|| invalid(path, "paramKind", "`?` or `??`"))?;

    let param_type = match string_field(fields, "paramType", path)?.as_str() {
        "unnamed" => ParamType::Unnamed,
        "named" => ParamType::Named(string_field(fields, "value", path)?),
        "positional" => {
            let position = param_position(field(fields, "value", path)?)
                .ok_or_else(|| invalid(path, "value", "a parameter position"))?;
            ParamType::Positional(position)
        }
        _ => {
            return Err(invalid(
                path,
                "paramType",
                "`named`, `positional` or `unnamed`",
            ));
        }
    };
    Ok(Param { kind, param_type })
}

/// An `i64`, given either as a JSON integer or as a whole float in range.
pub(crate) fn integer_value(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|n| n.fract() == 0.0 && n.abs() < i64::MAX as f64)
            .map(|n| n as i64)
    })
}

/// A JSON boolean, or `"true"` / `"false"` in any case.
pub(crate) fn boolean_value(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

pub(crate) fn param_position(value: &Value) -> Option<u32> {
    value.as_u64().and_then(|n| u32::try_from(n).ok())
}

fn skip_unknown(value: &Value, path: &str) -> bool {
    let unknown = is_unknown_node(value);
    if unknown {
        log::debug!("dropping unknown node at {}", path);
    }
    unknown
}

fn strip_quotes(value: &str) -> &str {
    for quote in ["\"\"\"", "\"", "'"] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

fn decode_meta(fields: &Fields<String, Value>, path: &str) -> DecodeResult<NodeMeta> {
    let location = field(fields, "location", path)?;
    let formatting = match fields.get("formatting") {
        None | Some(Value::Null) => None,
        Some(value) => Some(decode_formatting(value, &field_path(path, "formatting"))?),
    };

    Ok(NodeMeta {
        name: string_field(fields, "name", path)?,
        text: string_field(fields, "text", path)?,
        location: decode_location(location, &field_path(path, "location"))?,
        incomplete: opt_bool_field(fields, "incomplete", path)?
            .ok_or_else(|| DecodeError::new(path, DecodeErrorKind::MissingField("incomplete")))?,
        formatting,
    })
}

/// Whatever can be salvaged from an `unknown` node with broken fields.
fn unknown_meta(fields: &Fields<String, Value>) -> NodeMeta {
    let text = |name: &str| fields.get(name).and_then(Value::as_str).unwrap_or_default();
    let location = fields
        .get("location")
        .and_then(|value| decode_location(value, ROOT_PATH).ok())
        .unwrap_or_default();
    NodeMeta {
        incomplete: fields
            .get("incomplete")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        ..NodeMeta::new(text("name"), text("text"), location)
    }
}

fn decode_location(value: &Value, path: &str) -> DecodeResult<Location> {
    let fields = object(value, path)?;
    let bound = |name: &'static str| -> DecodeResult<usize> {
        field(fields, name, path)?
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| invalid(path, name, "a non-negative integer"))
    };
    Ok(Location::new(bound("min")?, bound("max")?))
}

pub(crate) fn decode_formatting(value: &Value, path: &str) -> DecodeResult<Formatting> {
    let fields = object(value, path)?;
    let comments = |name: &'static str| -> DecodeResult<Vec<Comment>> {
        match fields.get(name) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(values)) => {
                let list_path = field_path(path, name);
                values
                    .iter()
                    .enumerate()
                    .map(|(i, value)| decode_comment(value, &index_path(&list_path, i)))
                    .collect()
            }
            Some(_) => Err(invalid(path, name, "an array of comments")),
        }
    };
    let right_single_line = match fields.get("rightSingleLine") {
        None | Some(Value::Null) => None,
        Some(value) => Some(decode_comment(value, &field_path(path, "rightSingleLine"))?),
    };

    Ok(Formatting {
        top: comments("top")?,
        left: comments("left")?,
        right: comments("right")?,
        right_single_line,
        bottom: comments("bottom")?,
    })
}

fn decode_comment(value: &Value, path: &str) -> DecodeResult<Comment> {
    let fields = object(value, path)?;
    let kind = string_field(fields, "subtype", path)?;
    let location = match fields.get("location") {
        None | Some(Value::Null) => None,
        Some(value) => Some(decode_location(value, &field_path(path, "location"))?),
    };
    Ok(Comment {
        kind: CommentKind::from_name(&kind)
            .ok_or_else(|| invalid(path, "subtype", "`single-line` or `multi-line`"))?,
        text: string_field(fields, "text", path)?,
        location,
    })
}

fn object<'a>(value: &'a Value, path: &str) -> DecodeResult<&'a Fields<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| DecodeError::new(path, DecodeErrorKind::NotAnObject))
}

fn node_type(fields: &Fields<String, Value>, path: &str) -> DecodeResult<NodeType> {
    let tag = string_field(fields, "type", path)?;
    NodeType::from_name(&tag)
        .ok_or_else(|| DecodeError::new(path, DecodeErrorKind::UnknownNodeType(tag)))
}

fn expect_type(fields: &Fields<String, Value>, expected: NodeType, path: &str) -> DecodeResult<()> {
    let found = string_field(fields, "type", path)?;
    if found == expected.as_str() {
        Ok(())
    } else {
        Err(DecodeError::new(
            path,
            DecodeErrorKind::UnexpectedNode {
                expected: expected.as_str(),
                found,
            },
        ))
    }
}

fn field<'a>(
    fields: &'a Fields<String, Value>,
    name: &'static str,
    path: &str,
) -> DecodeResult<&'a Value> {
    fields
        .get(name)
        .ok_or_else(|| DecodeError::new(path, DecodeErrorKind::MissingField(name)))
}

fn string_field(fields: &Fields<String, Value>, name: &'static str, path: &str) -> DecodeResult<String> {
    field(fields, name, path)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(path, name, "a string"))
}

fn opt_string_field(
    fields: &Fields<String, Value>,
    name: &'static str,
    path: &str,
) -> DecodeResult<Option<String>> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(invalid(path, name, "a string")),
    }
}

fn opt_bool_field(
    fields: &Fields<String, Value>,
    name: &'static str,
    path: &str,
) -> DecodeResult<Option<bool>> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(invalid(path, name, "a boolean")),
    }
}

fn array_field<'a>(
    fields: &'a Fields<String, Value>,
    name: &'static str,
    path: &str,
) -> DecodeResult<&'a Vec<Value>> {
    field(fields, name, path)?
        .as_array()
        .ok_or_else(|| invalid(path, name, "an array"))
}

fn invalid(path: &str, field: &'static str, expected: &'static str) -> DecodeError {
    DecodeError::new(path, DecodeErrorKind::InvalidField { field, expected })
}

fn unexpected(path: &str, expected: &'static str, found: &Expr) -> DecodeError {
    DecodeError::new(
        path,
        DecodeErrorKind::UnexpectedNode {
            expected,
            found: found.node_type().as_str().to_string(),
        },
    )
}
