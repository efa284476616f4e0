// tests/convert_tests.rs

use esql_ast::ast::{
    BinaryOperator, Builder, CastType, Expr, FunctionKind, Item, LiteralValue, NullsOrder,
    ParamKind, ParamType, SortOrder,
};
use esql_ast::convert::{
    DecodeErrorKind, expr_to_json, item_to_json, json_to_expr, json_to_item, json_to_query,
    query_to_json,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn node(node_type: &str, name: &str, extra: Value) -> Value {
    let mut fields = json!({
        "type": node_type,
        "name": name,
        "text": name,
        "location": { "min": 0, "max": 0 },
        "incomplete": false,
    });
    if let (Some(fields), Value::Object(extra)) = (fields.as_object_mut(), extra) {
        fields.extend(extra);
    }
    fields
}

fn column(name: &str) -> Value {
    node(
        "column",
        name,
        json!({ "args": [node("identifier", name, json!({}))], "parts": [name] }),
    )
}

fn integer(n: i64) -> Value {
    node(
        "literal",
        &n.to_string(),
        json!({ "literalType": "integer", "value": n }),
    )
}

fn binary(op: &str, args: Vec<Value>) -> Value {
    node(
        "function",
        op,
        json!({ "subtype": "binary-expression", "args": args }),
    )
}

fn query(commands: Vec<Value>) -> Value {
    node("query", "", json!({ "commands": commands }))
}

fn command(name: &str, args: Vec<Value>) -> Value {
    node("command", name, json!({ "args": args }))
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_decode_binary_expression() {
    let tree = binary(">", vec![column("status"), integer(499)]);
    let expr = json_to_expr(&tree).unwrap();

    let function = expr.as_function().expect("function node");
    assert_eq!(function.binary_operator(), Some(BinaryOperator::GreaterThan));
    let (left, right) = function.operands().unwrap();
    assert!(matches!(left, Item::Expr(Expr::Column(_))));
    assert!(matches!(
        right,
        Item::Expr(Expr::Literal(literal)) if literal.value == LiteralValue::Integer(499)
    ));
}

#[test]
fn test_decode_binary_with_one_arg_is_rejected() {
    let tree = query(vec![command(
        "where",
        vec![binary(">", vec![column("status")])],
    )]);

    let error = json_to_query(&tree).unwrap_err();
    assert_eq!(error.path, "$.commands[0].args[0]");
    assert_eq!(
        error.kind,
        DecodeErrorKind::Arity {
            node: "binary-expression",
            expected: 2,
            found: 1,
        }
    );
}

#[test]
fn test_decode_unary_with_two_args_is_rejected() {
    let tree = node(
        "function",
        "-",
        json!({ "subtype": "unary-expression", "args": [integer(1), integer(2)] }),
    );
    let error = json_to_expr(&tree).unwrap_err();
    assert!(matches!(
        error.kind,
        DecodeErrorKind::Arity {
            expected: 1,
            found: 2,
            ..
        }
    ));
}

#[test]
fn test_decode_function_without_subtype_is_a_call() {
    let tree = node(
        "function",
        "abs",
        json!({
            "operator": node("identifier", "abs", json!({})),
            "args": [integer(-3)],
        }),
    );
    let expr = json_to_expr(&tree).unwrap();
    let function = expr.as_function().unwrap();
    assert!(matches!(function.kind, FunctionKind::VariadicCall(ref args) if args.len() == 1));
}

#[test]
fn test_decode_legacy_command_array() {
    let mut from = command("from", vec![]);
    from["location"] = json!({ "min": 0, "max": 10 });
    let mut limit = command("limit", vec![integer(5)]);
    limit["location"] = json!({ "min": 13, "max": 20 });

    let query = json_to_query(&json!([from, limit])).unwrap();
    assert_eq!(query.commands.len(), 2);
    assert_eq!(query.commands[1].name(), "limit");
    assert_eq!(query.meta.location.min, 0);
    assert_eq!(query.meta.location.max, 20);
}

#[test]
fn test_decode_group_and_encode_back() {
    let group = json!([column("a"), column("b")]);
    let item = json_to_item(&group).unwrap();

    match &item {
        Item::Group(items) => assert_eq!(items.len(), 2),
        Item::Expr(_) => panic!("expected a group"),
    }
    assert!(item_to_json(&item).is_array());
}

#[test]
fn test_decode_missing_incomplete() {
    let mut tree = integer(1);
    tree.as_object_mut().unwrap().remove("incomplete");

    let error = json_to_expr(&tree).unwrap_err();
    assert_eq!(error.kind, DecodeErrorKind::MissingField("incomplete"));
    assert_eq!(error.to_string(), "missing field `incomplete` at $");
}

#[test]
fn test_decode_unknown_node_type() {
    let tree = node("spaceship", "x", json!({}));
    let error = json_to_expr(&tree).unwrap_err();
    assert_eq!(
        error.kind,
        DecodeErrorKind::UnknownNodeType("spaceship".to_string())
    );
}

#[test]
fn test_decode_command_in_expression_position() {
    let tree = command("where", vec![command("limit", vec![])]);
    let error = esql_ast::convert::json_to_command(&tree).unwrap_err();
    assert_eq!(error.path, "$.args[0]");
    assert!(matches!(error.kind, DecodeErrorKind::UnexpectedNode { .. }));
}

#[test]
fn test_decode_unknown_node_is_lenient() {
    let tree = json!({ "type": "unknown", "text": "???" });
    let expr = json_to_expr(&tree).unwrap();
    assert!(expr.is_unknown());
    assert_eq!(expr.meta().text, "???");
}

#[test]
fn test_decode_keyword_literal_without_unquoted_value() {
    let tree = node(
        "literal",
        "\"abc\"",
        json!({ "literalType": "keyword", "value": "\"abc\"" }),
    );
    let expr = json_to_expr(&tree).unwrap();
    assert_eq!(expr.as_literal().unwrap().string_value(), Some("abc"));
}

#[test]
fn test_decode_boolean_from_string() {
    let tree = node(
        "literal",
        "TRUE",
        json!({ "literalType": "boolean", "value": "TRUE" }),
    );
    let expr = json_to_expr(&tree).unwrap();
    assert_eq!(
        expr.as_literal().unwrap().value,
        LiteralValue::Boolean(true)
    );
}

#[test]
fn test_decode_named_param() {
    let tree = node(
        "literal",
        "?threshold",
        json!({
            "literalType": "param",
            "paramKind": "?",
            "paramType": "named",
            "value": "threshold",
        }),
    );
    let expr = json_to_expr(&tree).unwrap();
    let literal = expr.as_literal().unwrap();
    assert!(literal.is_named_param());
    assert_eq!(literal.param().unwrap().kind, ParamKind::Single);
}

#[test]
fn test_decode_formatting_comments() {
    let tree = node(
        "command",
        "limit",
        json!({
            "args": [integer(1)],
            "formatting": {
                "top": [{ "type": "comment", "subtype": "single-line", "text": " first" }],
                "right": [{ "type": "comment", "subtype": "multi-line", "text": " x " }],
            },
        }),
    );
    let command = esql_ast::convert::json_to_command(&tree).unwrap();
    let formatting = command.meta.formatting.unwrap();
    assert_eq!(formatting.top.len(), 1);
    assert_eq!(formatting.right[0].text, " x ");
}

// ============================================================================
// Encoding
// ============================================================================

#[test]
fn test_encode_binary_expression_shape() {
    let expr = Builder::binary(
        BinaryOperator::Add,
        Builder::column(&["a"]),
        Builder::integer(1),
    );
    let encoded = expr_to_json(&expr);

    assert_eq!(encoded["type"], json!("function"));
    assert_eq!(encoded["subtype"], json!("binary-expression"));
    assert_eq!(encoded["name"], json!("+"));
    assert_eq!(encoded["args"].as_array().unwrap().len(), 2);
    assert_eq!(encoded["incomplete"], json!(false));
}

#[test]
fn test_encode_literals() {
    let boolean = expr_to_json(&Builder::boolean(false));
    assert_eq!(boolean["literalType"], json!("boolean"));
    assert_eq!(boolean["value"], json!("false"));

    let string = expr_to_json(&Builder::string("hi"));
    assert_eq!(string["value"], json!("\"hi\""));
    assert_eq!(string["valueUnquoted"], json!("hi"));

    let positional = expr_to_json(&Expr::Literal(Builder::param(
        ParamKind::Double,
        ParamType::Positional(2),
    )));
    assert_eq!(positional["paramKind"], json!("??"));
    assert_eq!(positional["paramType"], json!("positional"));
    assert_eq!(positional["value"], json!(2));
}

#[test]
fn test_round_trip_preserves_tree() {
    let query = Builder::query(vec![
        Builder::command("from", vec![Builder::index("remote:logs-*").into()]),
        Builder::command(
            "where",
            vec![
                Builder::binary(
                    BinaryOperator::And,
                    Builder::binary(
                        BinaryOperator::In,
                        Builder::column(&["host", "name"]),
                        Builder::tuple(vec![Builder::string("a"), Builder::string("b")]),
                    ),
                    Builder::postfix("is not null", Builder::column(&["user"])),
                )
                .into(),
            ],
        ),
        Builder::command(
            "eval",
            vec![
                Builder::binary(
                    BinaryOperator::Assign,
                    Builder::column(&["x"]),
                    Builder::call(
                        "round",
                        vec![
                            Builder::cast(Builder::column(&["y"]), CastType::Double).into(),
                            Builder::double(1.5).into(),
                            Builder::map(vec![("mode", Builder::named_param("mode"))]).into(),
                        ],
                    ),
                )
                .into(),
            ],
        ),
        Builder::command(
            "sort",
            vec![Builder::order(Builder::column(&["x"]), SortOrder::Desc, NullsOrder::Last).into()],
        ),
        Builder::command(
            "stats",
            vec![
                Builder::call("count", vec![Builder::unknown("*?").into()]).into(),
                Builder::option("by", vec![Builder::interval(1.0, "hour").into()]).into(),
            ],
        ),
        Builder::command("limit", vec![Builder::null().into(), Builder::boolean(true).into()]),
    ]);

    let decoded = json_to_query(&query_to_json(&query)).unwrap();
    assert_eq!(decoded, query);
}

#[test]
fn test_non_finite_double_does_not_survive_round_trip() {
    let encoded = expr_to_json(&Builder::double(f64::NAN));
    assert_eq!(encoded["value"], Value::Null);

    let error = json_to_expr(&encoded).unwrap_err();
    assert_eq!(
        error.kind,
        DecodeErrorKind::InvalidField {
            field: "value",
            expected: "a number",
        }
    );
}

// ============================================================================
// Unknown nodes
// ============================================================================

#[test]
fn test_decode_drops_unknown_where_no_node_fits() {
    let unknown = json!({ "type": "unknown", "text": "??" });
    let source = node(
        "source",
        "logs",
        json!({ "sourceType": "index", "index": unknown.clone() }),
    );
    let mut column = column("a");
    column["args"] = json!([unknown.clone(), node("identifier", "a", json!({}))]);
    let map = node(
        "map",
        "",
        json!({ "entries": [node("map-entry", "", json!({ "key": unknown.clone(), "value": integer(1) }))] }),
    );
    let tree = query(vec![
        unknown.clone(),
        command("from", vec![source]),
        command("keep", vec![column, map]),
    ]);

    let decoded = json_to_query(&tree).unwrap();
    assert_eq!(decoded.commands.len(), 2);
    assert_eq!(decoded.commands[0].name(), "from");
    match &decoded.commands[0].args[0] {
        Item::Expr(Expr::Source(source)) => assert_eq!(source.index, None),
        other => panic!("expected a source, found {:?}", other),
    }
    match &decoded.commands[1].args[..] {
        [Item::Expr(Expr::Column(column)), Item::Expr(Expr::Map(map))] => {
            assert_eq!(column.args.len(), 1);
            assert!(map.entries.is_empty());
        }
        other => panic!("unexpected args {:?}", other),
    }
}
