//! Constructors for trees that are not parsed from text.
//!
//! Built nodes carry an empty `text` and a zero [`Location`](crate::ast::Location).
//!
//! ```
//! use esql_ast::ast::{BinaryOperator, Builder};
//! use esql_ast::printer::Printer;
//!
//! let query = Builder::query(vec![
//!     Builder::command("from", vec![Builder::index("logs").into()]),
//!     Builder::command(
//!         "where",
//!         vec![Builder::binary(BinaryOperator::GreaterThan, Builder::column(&["status"]), Builder::integer(499)).into()],
//!     ),
//! ]);
//!
//! assert_eq!(Printer::default().print_query(&query), "FROM logs | WHERE status > 499");
//! ```

use crate::ast::{
    BinaryOperator, Callee, CastType, Column, ColumnPart, Command, CommandOption, Expr, Function,
    FunctionKind, Identifier, InlineCast, Item, List, ListSubtype, Literal, LiteralValue, Map,
    MapEntry, NodeMeta, NullsOrder, Order, Param, ParamKind, ParamType, Query, SortOrder, Source,
    SourceType, TimeInterval, Unknown,
};

pub struct Builder;

impl Builder {
    pub fn query(commands: Vec<Command>) -> Query {
        Query {
            meta: NodeMeta::synthetic(""),
            commands,
        }
    }

    pub fn command(name: &str, args: Vec<Item>) -> Command {
        Command {
            meta: NodeMeta::synthetic(name.to_ascii_lowercase()),
            command_type: None,
            args,
        }
    }

    pub fn option(name: &str, args: Vec<Item>) -> Expr {
        Expr::Option(CommandOption {
            meta: NodeMeta::synthetic(name.to_ascii_lowercase()),
            args,
        })
    }

    pub fn identifier(name: &str) -> Identifier {
        Identifier {
            meta: NodeMeta::synthetic(name),
        }
    }

    /// Column from its unquoted name parts.
    pub fn column(parts: &[&str]) -> Expr {
        Expr::Column(Column {
            meta: NodeMeta::synthetic(parts.join(".")),
            args: parts
                .iter()
                .map(|part| ColumnPart::Identifier(Builder::identifier(part)))
                .collect(),
            parts: parts.iter().map(|part| part.to_string()).collect(),
            quoted: false,
        })
    }

    /// `[prefix:]index` source.
    pub fn index(name: &str) -> Expr {
        let (prefix, index) = match name.split_once(':') {
            Some((prefix, index)) => (Some(prefix), index),
            None => (None, name),
        };
        Expr::Source(Source {
            meta: NodeMeta::synthetic(name),
            source_type: SourceType::Index,
            prefix: prefix.map(Builder::unquoted_string),
            index: Some(Builder::unquoted_string(index)),
            selector: None,
        })
    }

    pub fn integer(value: i64) -> Expr {
        Builder::literal(value.to_string(), LiteralValue::Integer(value))
    }

    /// `value` should be finite: JSON has no form for `NaN` or infinities.
    pub fn double(value: f64) -> Expr {
        Builder::literal(value.to_string(), LiteralValue::Double(value))
    }

    pub fn boolean(value: bool) -> Expr {
        Builder::literal(value.to_string(), LiteralValue::Boolean(value))
    }

    pub fn null() -> Expr {
        Builder::literal("null".to_string(), LiteralValue::Null)
    }

    pub fn string(value: &str) -> Expr {
        Expr::Literal(Builder::string_literal(value))
    }

    /// Double-quoted string literal.
    pub fn string_literal(value: &str) -> Literal {
        let quoted = quote_string(value);
        Literal {
            meta: NodeMeta::synthetic(quoted.clone()),
            value: LiteralValue::Keyword {
                value: quoted,
                value_unquoted: value.to_string(),
                unquoted: false,
            },
        }
    }

    fn unquoted_string(value: &str) -> Literal {
        Literal {
            meta: NodeMeta::synthetic(value),
            value: LiteralValue::Keyword {
                value: value.to_string(),
                value_unquoted: value.to_string(),
                unquoted: true,
            },
        }
    }

    pub fn param(kind: ParamKind, param_type: ParamType) -> Literal {
        let name = match &param_type {
            ParamType::Unnamed => String::new(),
            ParamType::Named(name) => name.clone(),
            ParamType::Positional(position) => position.to_string(),
        };
        Literal {
            meta: NodeMeta::synthetic(format!("{}{}", kind.as_str(), name)),
            value: LiteralValue::Param(Param { kind, param_type }),
        }
    }

    pub fn named_param(name: &str) -> Expr {
        Expr::Literal(Builder::param(
            ParamKind::Single,
            ParamType::Named(name.to_string()),
        ))
    }

    pub fn call(name: &str, args: Vec<Item>) -> Expr {
        Expr::Function(Function {
            meta: NodeMeta::synthetic(name.to_ascii_lowercase()),
            operator: Some(Callee::Identifier(Builder::identifier(name))),
            kind: FunctionKind::VariadicCall(args),
        })
    }

    pub fn binary(op: BinaryOperator, left: impl Into<Item>, right: impl Into<Item>) -> Expr {
        Builder::operator(
            op.as_str(),
            FunctionKind::Binary(Box::new([left.into(), right.into()])),
        )
    }

    /// Prefix operator, `name` is `-`, `+` or `not`.
    pub fn unary(name: &str, arg: impl Into<Item>) -> Expr {
        Builder::operator(name, FunctionKind::Unary(Box::new(arg.into())))
    }

    /// Postfix operator, `name` is `is null` or `is not null`.
    pub fn postfix(name: &str, arg: impl Into<Item>) -> Expr {
        Builder::operator(name, FunctionKind::PostfixUnary(Box::new(arg.into())))
    }

    fn operator(name: &str, kind: FunctionKind) -> Expr {
        Expr::Function(Function {
            meta: NodeMeta::synthetic(name),
            operator: Some(Callee::Identifier(Builder::identifier(name))),
            kind,
        })
    }

    pub fn list(values: Vec<Expr>) -> Expr {
        Builder::list_of(ListSubtype::Literal, values)
    }

    pub fn tuple(values: Vec<Expr>) -> Expr {
        Builder::list_of(ListSubtype::Tuple, values)
    }

    fn list_of(subtype: ListSubtype, values: Vec<Expr>) -> Expr {
        Expr::List(List {
            meta: NodeMeta::synthetic(""),
            subtype,
            values,
        })
    }

    pub fn map(entries: Vec<(&str, Expr)>) -> Expr {
        Expr::Map(Map {
            meta: NodeMeta::synthetic(""),
            entries: entries
                .into_iter()
                .map(|(key, value)| MapEntry {
                    meta: NodeMeta::synthetic(""),
                    key: Builder::string_literal(key),
                    value: Box::new(value),
                })
                .collect(),
        })
    }

    pub fn order(field: impl Into<Item>, order: SortOrder, nulls: NullsOrder) -> Expr {
        Expr::Order(Order {
            meta: NodeMeta::synthetic(""),
            order,
            nulls,
            field: Box::new(field.into()),
        })
    }

    pub fn cast(value: impl Into<Item>, cast_type: CastType) -> Expr {
        Expr::InlineCast(InlineCast {
            meta: NodeMeta::synthetic(""),
            value: Box::new(value.into()),
            cast_type,
        })
    }

    /// Like [`Builder::double`], `quantity` should be finite.
    pub fn interval(quantity: f64, unit: &str) -> Expr {
        Expr::TimeInterval(TimeInterval {
            meta: NodeMeta::synthetic(unit),
            unit: unit.to_string(),
            quantity,
        })
    }

    /// Unrecognised input, kept verbatim.
    pub fn unknown(text: &str) -> Expr {
        let mut meta = NodeMeta::synthetic("unknown");
        meta.text = text.to_string();
        Expr::Unknown(Unknown { meta })
    }

    fn literal(name: String, value: LiteralValue) -> Expr {
        Expr::Literal(Literal {
            meta: NodeMeta::synthetic(name),
            value,
        })
    }
}

/// Wraps `value` in double quotes, escaping quotes, backslashes and
/// control characters.
pub fn quote_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
