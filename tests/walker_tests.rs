// tests/walker_tests.rs

use esql_ast::ast::{BinaryOperator, Builder, Item, NodeType, NullsOrder, Query, SortOrder};
use esql_ast::walker::{self, NodeRef};
use pretty_assertions::assert_eq;

fn sample() -> Query {
    Builder::query(vec![
        Builder::command("from", vec![Builder::index("logs").into()]),
        Builder::command(
            "where",
            vec![
                Builder::binary(
                    BinaryOperator::GreaterThan,
                    Builder::call("length", vec![Builder::column(&["message"]).into()]),
                    Builder::integer(10),
                )
                .into(),
            ],
        ),
        Builder::command(
            "keep",
            vec![Item::Group(vec![
                Builder::column(&["a"]).into(),
                Builder::column(&["b"]).into(),
            ])],
        ),
        Builder::command(
            "sort",
            vec![Builder::order(Builder::column(&["a"]), SortOrder::Asc, NullsOrder::Unspecified).into()],
        ),
    ])
}

#[test]
fn test_walk_is_pre_order() {
    let query = sample();
    let mut types = Vec::new();
    walker::walk_query(&query, &mut |node| types.push(node.node_type()));

    assert_eq!(
        types,
        vec![
            NodeType::Query,
            NodeType::Command,
            NodeType::Source,
            NodeType::Literal,
            NodeType::Command,
            NodeType::Function,
            NodeType::Identifier,
            NodeType::Function,
            NodeType::Identifier,
            NodeType::Column,
            NodeType::Identifier,
            NodeType::Literal,
            NodeType::Command,
            NodeType::Column,
            NodeType::Identifier,
            NodeType::Column,
            NodeType::Identifier,
            NodeType::Command,
            NodeType::Order,
            NodeType::Column,
            NodeType::Identifier,
        ]
    );
}

#[test]
fn test_functions_helper() {
    let query = sample();
    let names: Vec<&str> = walker::functions(&query).iter().map(|f| f.name()).collect();
    assert_eq!(names, vec![">", "length"]);
}

#[test]
fn test_find_by_name_is_case_insensitive() {
    let query = sample();
    let commands = walker::find_by_name(&query, NodeType::Command, "WHERE");
    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], NodeRef::Command(command) if command.name() == "where"));

    let columns = walker::find_by_name(&query, NodeType::Column, "a");
    assert_eq!(columns.len(), 2);
}

#[test]
fn test_collect_with_predicate() {
    let query = sample();
    let literals = walker::collect(&query, |node| matches!(node, NodeRef::Literal(_)));
    let names: Vec<&str> = literals.iter().map(|node| node.name()).collect();
    assert_eq!(names, vec!["logs", "10"]);
}

#[test]
fn test_walk_expr_visits_map_entries() {
    let map = Builder::map(vec![("a", Builder::integer(1)), ("b", Builder::list(vec![Builder::integer(2)]))]);
    let mut types = Vec::new();
    walker::walk_expr(&map, &mut |node| types.push(node.node_type()));

    assert_eq!(
        types,
        vec![
            NodeType::Map,
            NodeType::MapEntry,
            NodeType::Literal,
            NodeType::Literal,
            NodeType::MapEntry,
            NodeType::Literal,
            NodeType::List,
            NodeType::Literal,
        ]
    );
}
