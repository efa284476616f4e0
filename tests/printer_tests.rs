// tests/printer_tests.rs

use esql_ast::ast::{
    BinaryOperator, Builder, CastType, Comment, Expr, Formatting, Item, NullsOrder, ParamKind,
    ParamType, Query, SortOrder,
};
use esql_ast::convert::{json_to_query, query_to_json};
use esql_ast::printer::{Printer, PrinterOptions, quote_identifier};
use pretty_assertions::assert_eq;

fn print(expr: Expr) -> String {
    Printer::default().print_expr(&expr)
}

fn col(name: &str) -> Expr {
    Builder::column(&[name])
}

// ============================================================================
// Queries and commands
// ============================================================================

#[test]
fn test_print_simple_query() {
    let query = Builder::query(vec![
        Builder::command("from", vec![Builder::index("index").into()]),
        Builder::command(
            "where",
            vec![
                Builder::binary(
                    BinaryOperator::GreaterThan,
                    Builder::binary(BinaryOperator::Add, col("a"), col("b")),
                    Builder::integer(1),
                )
                .into(),
            ],
        ),
    ]);

    assert_eq!(
        Printer::default().print_query(&query),
        "FROM index | WHERE a + b > 1"
    );
}

#[test]
fn test_print_multiline() {
    let query = Builder::query(vec![
        Builder::command("from", vec![Builder::index("a").into(), Builder::index("b").into()]),
        Builder::command("limit", vec![Builder::integer(10).into()]),
    ]);
    let printer = Printer::new(PrinterOptions {
        multiline: true,
        pipe_tab: "    ".to_string(),
        ..PrinterOptions::default()
    });

    assert_eq!(printer.print_query(&query), "FROM a, b\n    | LIMIT 10");
}

#[test]
fn test_print_lowercase() {
    let query = Builder::query(vec![Builder::command(
        "where",
        vec![
            Builder::binary(
                BinaryOperator::And,
                Builder::postfix("is null", col("a")),
                Builder::call("STARTS_WITH", vec![col("b").into(), Builder::string("x").into()]),
            )
            .into(),
        ],
    )]);

    assert_eq!(
        Printer::new(PrinterOptions::lowercase()).print_query(&query),
        "where a is null and starts_with(b, \"x\")"
    );
    assert_eq!(
        Printer::default().print_query(&query),
        "WHERE a IS NULL AND STARTS_WITH(b, \"x\")"
    );
}

#[test]
fn test_print_options_after_arguments() {
    let command = Builder::command(
        "stats",
        vec![
            Builder::option("by", vec![col("host").into()]).into(),
            Builder::binary(
                BinaryOperator::Assign,
                col("total"),
                Builder::call("count", vec![col("*").into()]),
            )
            .into(),
        ],
    );

    assert_eq!(
        Printer::default().print_command(&command),
        "STATS total = COUNT(*) BY host"
    );
}

#[test]
fn test_print_join_command_type() {
    let mut command = Builder::command(
        "join",
        vec![
            Builder::index("lookup_hosts").into(),
            Builder::option("on", vec![col("host").into()]).into(),
        ],
    );
    command.command_type = Some("lookup".to_string());

    assert_eq!(
        Printer::default().print_command(&command),
        "LOOKUP JOIN lookup_hosts ON host"
    );
}

#[test]
fn test_print_nested_query() {
    let inner = Builder::query(vec![Builder::command("from", vec![Builder::index("x").into()])]);
    assert_eq!(print(Expr::Query(Box::new(inner))), "(FROM x)");
}

// ============================================================================
// Operators and precedence
// ============================================================================

#[test]
fn test_parenthesizes_lower_precedence_operands() {
    let sum = Builder::binary(BinaryOperator::Add, col("a"), col("b"));
    let product = Builder::binary(BinaryOperator::Multiply, sum, col("c"));
    assert_eq!(print(product), "(a + b) * c");

    let product = Builder::binary(BinaryOperator::Multiply, col("a"), col("b"));
    let sum = Builder::binary(BinaryOperator::Add, product, col("c"));
    assert_eq!(print(sum), "a * b + c");
}

#[test]
fn test_operators_associate_left() {
    let left = Builder::binary(
        BinaryOperator::Subtract,
        Builder::binary(BinaryOperator::Subtract, col("a"), col("b")),
        col("c"),
    );
    assert_eq!(print(left), "a - b - c");

    let right = Builder::binary(
        BinaryOperator::Subtract,
        col("a"),
        Builder::binary(BinaryOperator::Subtract, col("b"), col("c")),
    );
    assert_eq!(print(right), "a - (b - c)");
}

#[test]
fn test_logical_precedence() {
    let or = Builder::binary(BinaryOperator::Or, col("a"), col("b"));
    let and = Builder::binary(BinaryOperator::And, or, col("c"));
    assert_eq!(print(and), "(a OR b) AND c");

    let not = Builder::unary("not", Builder::binary(BinaryOperator::And, col("a"), col("b")));
    assert_eq!(print(not), "NOT (a AND b)");

    let not = Builder::unary("not", Builder::binary(BinaryOperator::Equal, col("a"), col("b")));
    assert_eq!(print(not), "NOT a == b");
}

#[test]
fn test_unary_minus() {
    assert_eq!(print(Builder::unary("-", col("a"))), "-a");
    let negated_sum = Builder::unary("-", Builder::binary(BinaryOperator::Add, col("a"), col("b")));
    assert_eq!(print(negated_sum), "-(a + b)");
}

#[test]
fn test_keyword_operators() {
    let in_list = Builder::binary(
        BinaryOperator::NotIn,
        col("status"),
        Builder::tuple(vec![Builder::integer(200), Builder::integer(204)]),
    );
    assert_eq!(print(in_list), "status NOT IN (200, 204)");

    let like = Builder::binary(BinaryOperator::Like, col("host"), Builder::string("web-*"));
    assert_eq!(print(like), "host LIKE \"web-*\"");
}

// ============================================================================
// Leaves
// ============================================================================

#[test]
fn test_print_literals() {
    assert_eq!(print(Builder::integer(-5)), "-5");
    assert_eq!(print(Builder::double(2.0)), "2.0");
    assert_eq!(print(Builder::double(0.25)), "0.25");
    assert_eq!(print(Builder::boolean(true)), "TRUE");
    assert_eq!(print(Builder::null()), "NULL");
    assert_eq!(print(Builder::string("say \"hi\"")), "\"say \\\"hi\\\"\"");
}

#[test]
fn test_print_params() {
    assert_eq!(print(Builder::named_param("limit")), "?limit");
    let positional = Builder::param(ParamKind::Single, ParamType::Positional(1));
    assert_eq!(print(Expr::Literal(positional)), "?1");
    let unnamed = Builder::param(ParamKind::Single, ParamType::Unnamed);
    assert_eq!(print(Expr::Literal(unnamed)), "?");
    let field = Builder::param(ParamKind::Double, ParamType::Named("field".to_string()));
    assert_eq!(print(Expr::Literal(field)), "??field");
}

#[test]
fn test_print_columns() {
    assert_eq!(print(Builder::column(&["host", "name"])), "host.name");
    assert_eq!(print(Builder::column(&["@timestamp"])), "@timestamp");
    assert_eq!(print(Builder::column(&["my field"])), "`my field`");
    assert_eq!(print(Builder::column(&["1st"])), "`1st`");
    assert_eq!(quote_identifier("odd`name"), "`odd``name`");
}

#[test]
fn test_print_lists_and_maps() {
    let list = Builder::list(vec![Builder::integer(1), Builder::integer(2)]);
    assert_eq!(print(list), "[1, 2]");

    let map = Builder::map(vec![
        ("boost", Builder::double(1.5)),
        ("fuzzy", Builder::boolean(false)),
    ]);
    assert_eq!(print(map), "{\"boost\": 1.5, \"fuzzy\": FALSE}");
}

#[test]
fn test_print_cast_order_interval() {
    assert_eq!(print(Builder::cast(col("a"), CastType::Integer)), "a::integer");
    let sum = Builder::binary(BinaryOperator::Add, col("a"), col("b"));
    assert_eq!(print(Builder::cast(sum, CastType::Long)), "(a + b)::long");

    let order = Builder::order(col("a"), SortOrder::Desc, NullsOrder::First);
    assert_eq!(print(order), "a DESC NULLS FIRST");
    let order = Builder::order(col("a"), SortOrder::Unspecified, NullsOrder::Unspecified);
    assert_eq!(print(order), "a");

    assert_eq!(print(Builder::interval(1.0, "hour")), "1 hour");
}

#[test]
fn test_print_source_parts() {
    assert_eq!(print(Builder::index("remote:logs-*")), "remote:logs-*");
}

#[test]
fn test_unknown_prints_text() {
    assert_eq!(print(Builder::unknown("%$#")), "%$#");
}

#[test]
fn test_group_prints_members() {
    let group = Item::Group(vec![col("a").into(), col("b").into()]);
    assert_eq!(Printer::default().print_item(&group), "a, b");
}

// ============================================================================
// Comments
// ============================================================================

#[test]
fn test_inline_comments() {
    let mut expr = col("a");
    expr.meta_mut().formatting = Some(Formatting {
        left: vec![Comment::multi_line(" l ")],
        right: vec![Comment::multi_line(" r "), Comment::single_line(" dropped")],
        ..Formatting::default()
    });
    assert_eq!(print(expr), "/* l */ a /* r */");
}

#[test]
fn test_multiline_comments() {
    let mut limit = Builder::command("limit", vec![Builder::integer(1).into()]);
    limit.meta.formatting = Some(Formatting {
        top: vec![Comment::single_line(" cap the output")],
        right_single_line: Some(Comment::single_line(" rows")),
        ..Formatting::default()
    });
    let query = Builder::query(vec![
        Builder::command("from", vec![Builder::index("a").into()]),
        limit,
    ]);
    let printer = Printer::new(PrinterOptions {
        multiline: true,
        ..PrinterOptions::default()
    });

    assert_eq!(
        printer.print_query(&query),
        "FROM a\n  | // cap the output\n  LIMIT 1 // rows"
    );
}

#[test]
fn test_multiline_top_comment_on_first_command() {
    let mut from = Builder::command("from", vec![Builder::index("a").into()]);
    from.meta.formatting = Some(Formatting {
        top: vec![Comment::single_line(" source")],
        bottom: vec![Comment::single_line(" after")],
        ..Formatting::default()
    });
    let query = Builder::query(vec![
        from,
        Builder::command("limit", vec![Builder::integer(1).into()]),
    ]);
    let printer = Printer::new(PrinterOptions {
        multiline: true,
        ..PrinterOptions::default()
    });

    assert_eq!(
        printer.print_query(&query),
        "// source\nFROM a\n// after\n  | LIMIT 1"
    );
}

// ============================================================================
// Printing decoded trees
// ============================================================================

#[test]
fn test_print_after_round_trip() {
    let query: Query = Builder::query(vec![
        Builder::command("from", vec![Builder::index("logs").into()]),
        Builder::command(
            "eval",
            vec![
                Builder::binary(
                    BinaryOperator::Assign,
                    col("kb"),
                    Builder::binary(BinaryOperator::Divide, col("bytes"), Builder::integer(1024)),
                )
                .into(),
            ],
        ),
    ]);
    let decoded = json_to_query(&query_to_json(&query)).unwrap();

    assert_eq!(
        Printer::default().print_query(&decoded),
        "FROM logs | EVAL kb = bytes / 1024"
    );
}
