// tests/ast_tests.rs

use esql_ast::ast::{
    Arity, BinaryOperator, Builder, CastType, Expr, FunctionKind, FunctionSubtype, Literal,
    LiteralValue, Location, NOT_PRECEDENCE, NodeType, OperatorGroup, UNARY_PRECEDENCE,
    builder::quote_string,
};

// ============================================================================
// Vocabulary
// ============================================================================

#[test]
fn test_node_type_tags_round_trip() {
    for node_type in NodeType::ALL {
        assert_eq!(NodeType::from_name(node_type.as_str()), Some(node_type));
    }
    assert_eq!(NodeType::from_name("Function"), None);
}

#[test]
fn test_binary_operator_lookup() {
    for op in BinaryOperator::ALL {
        assert_eq!(BinaryOperator::from_name(op.as_str()), Some(op));
    }
    assert_eq!(BinaryOperator::from_name("NOT LIKE"), Some(BinaryOperator::NotLike));
    assert_eq!(BinaryOperator::from_name("<>"), None);
}

#[test]
fn test_operator_precedence_order() {
    assert!(BinaryOperator::Multiply.precedence() > BinaryOperator::Add.precedence());
    assert!(BinaryOperator::Add.precedence() > BinaryOperator::GreaterThan.precedence());
    assert!(BinaryOperator::GreaterThan.precedence() > NOT_PRECEDENCE);
    assert!(NOT_PRECEDENCE > BinaryOperator::And.precedence());
    assert!(BinaryOperator::And.precedence() > BinaryOperator::Or.precedence());
    assert!(UNARY_PRECEDENCE > BinaryOperator::Multiply.precedence());
}

#[test]
fn test_operator_groups() {
    assert_eq!(BinaryOperator::Rlike.group(), OperatorGroup::Regex);
    assert_eq!(BinaryOperator::NotIn.group(), OperatorGroup::In);
    assert_eq!(BinaryOperator::Modulo.group(), OperatorGroup::Arithmetic);
    assert!(BinaryOperator::And.is_keyword());
    assert!(!BinaryOperator::LessEqual.is_keyword());
}

#[test]
fn test_function_subtype_arity() {
    assert_eq!(FunctionSubtype::BinaryExpression.arity(), Arity::Exact(2));
    assert_eq!(FunctionSubtype::PostfixUnaryExpression.arity(), Arity::Exact(1));
    assert!(FunctionSubtype::VariadicCall.arity().accepts(0));
    assert!(!Arity::Exact(2).accepts(1));
}

#[test]
fn test_cast_types() {
    for cast_type in CastType::ALL {
        assert_eq!(CastType::from_name(cast_type.as_str()), Some(cast_type));
    }
}

// ============================================================================
// Locations
// ============================================================================

#[test]
fn test_location_slice() {
    let source = "FROM logs";
    assert_eq!(Location::new(5, 9).slice(source), Some("logs"));
    assert_eq!(Location::new(5, 10).slice(source), None);
    assert_eq!(Location::new(6, 5).slice(source), None);
    assert!(Location::new(3, 3).is_empty());
}

#[test]
fn test_location_slice_counts_utf16_units() {
    let source = "FROM é | LIMIT 1";
    assert_eq!(Location::source_len(source), 16);
    assert_eq!(Location::new(5, 6).slice(source), Some("é"));
    assert_eq!(Location::new(15, 16).slice(source), Some("1"));
    assert_eq!(Location::new(15, 17).slice(source), None);

    let emoji = "a😀b";
    assert_eq!(Location::source_len(emoji), 4);
    assert_eq!(Location::new(1, 3).slice(emoji), Some("😀"));
    assert_eq!(Location::new(1, 2).slice(emoji), Some("😀"));
    assert_eq!(Location::new(3, 4).slice(emoji), Some("b"));
}

#[test]
fn test_location_merge_and_contains() {
    let merged = Location::new(4, 9).merge(&Location::new(0, 6));
    assert_eq!(merged, Location::new(0, 9));
    assert!(merged.contains(&Location::new(2, 9)));
    assert!(!merged.contains(&Location::new(2, 10)));
}

// ============================================================================
// Builder
// ============================================================================

#[test]
fn test_builder_binary_is_typed() {
    let expr = Builder::binary(BinaryOperator::Or, Builder::boolean(true), Builder::null());
    let function = expr.as_function().unwrap();

    assert_eq!(function.subtype(), FunctionSubtype::BinaryExpression);
    assert!(matches!(function.kind, FunctionKind::Binary(_)));
    assert_eq!(function.args().len(), 2);
    assert_eq!(function.name(), "or");
}

#[test]
fn test_builder_index_prefix() {
    let Expr::Source(source) = Builder::index("cluster:metrics") else {
        panic!("expected a source");
    };
    let part = |literal: Option<Literal>| literal.and_then(|l| l.string_value().map(str::to_string));
    assert_eq!(part(source.prefix), Some("cluster".to_string()));
    assert_eq!(part(source.index), Some("metrics".to_string()));
    assert_eq!(source.selector, None);
}

#[test]
fn test_builder_call_keeps_callee_spelling() {
    let expr = Builder::call("DATE_TRUNC", vec![]);
    assert_eq!(expr.name(), "date_trunc");
    assert_eq!(expr.node_type(), NodeType::Function);
}

#[test]
fn test_builder_string_literal() {
    let literal = Builder::string_literal("a\tb");
    assert_eq!(
        literal.value,
        LiteralValue::Keyword {
            value: "\"a\\tb\"".to_string(),
            value_unquoted: "a\tb".to_string(),
            unquoted: false,
        }
    );
    assert_eq!(quote_string("back\\slash"), "\"back\\\\slash\"");
}

#[test]
fn test_query_command_lookup() {
    let query = Builder::query(vec![
        Builder::command("FROM", vec![]),
        Builder::command("limit", vec![Builder::integer(1).into()]),
    ]);
    assert_eq!(query.command("LIMIT").map(|c| c.args.len()), Some(1));
    assert_eq!(query.command("from").map(|c| c.name()), Some("from"));
    assert!(query.command("where").is_none());
}
