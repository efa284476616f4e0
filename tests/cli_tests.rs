// tests/cli_tests.rs

use esql_ast::ast::{BinaryOperator, Builder};
use esql_ast::cli::{CheckOptions, CliError, PrintOptions, execute_check, execute_print};
use esql_ast::convert::query_to_json;
use serde_json::Value;

fn sample_tree() -> String {
    let query = Builder::query(vec![
        Builder::command("from", vec![Builder::index("logs").into()]),
        Builder::command(
            "where",
            vec![
                Builder::binary(
                    BinaryOperator::GreaterEqual,
                    Builder::column(&["status"]),
                    Builder::integer(500),
                )
                .into(),
            ],
        ),
    ]);
    query_to_json(&query).to_string()
}

fn broken_tree() -> String {
    let mut tree: Value = serde_json::from_str(&sample_tree()).unwrap();
    tree["commands"][1]["args"][0]["args"]
        .as_array_mut()
        .unwrap()
        .pop();
    tree.to_string()
}

// ============================================================================
// check
// ============================================================================

#[test]
fn test_check_valid_tree() {
    let options = CheckOptions {
        ast: Some(sample_tree()),
        ..CheckOptions::default()
    };
    let result = execute_check(&options).unwrap();

    assert!(result.is_valid());
    assert_eq!(result.render().unwrap(), "Syntax tree is valid");
}

#[test]
fn test_check_reports_arity_error() {
    let options = CheckOptions {
        ast: Some(broken_tree()),
        ..CheckOptions::default()
    };
    let result = execute_check(&options).unwrap();

    assert!(!result.is_valid());
    let rendered = result.render().unwrap();
    assert!(rendered.starts_with("error: "));
    assert!(rendered.contains("$.commands[1].args[0]"));
}

#[test]
fn test_check_json_output() {
    let options = CheckOptions {
        ast: Some(broken_tree()),
        json: true,
        ..CheckOptions::default()
    };
    let rendered = execute_check(&options).unwrap().render().unwrap();
    let report: Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(report["messages"][0]["code"], "arityMismatch");
    assert_eq!(report["messages"][0]["type"], "error");
}

#[test]
fn test_check_with_source_text() {
    let options = CheckOptions {
        ast: Some(sample_tree()),
        source: Some("FROM logs | WHERE status >= 500".to_string()),
        json: false,
    };
    // Synthetic nodes carry no text, so there is nothing to compare.
    assert!(execute_check(&options).unwrap().is_valid());
}

#[test]
fn test_check_without_input() {
    let result = execute_check(&CheckOptions::default());
    assert!(matches!(result, Err(CliError::NoInput)));
}

#[test]
fn test_check_invalid_json() {
    let options = CheckOptions {
        ast: Some("{ not json".to_string()),
        ..CheckOptions::default()
    };
    let error = execute_check(&options).unwrap_err();
    assert!(matches!(error, CliError::Json(_)));
    assert!(error.to_string().starts_with("Invalid JSON"));
    assert!(std::error::Error::source(&error).is_some());
}

// ============================================================================
// print
// ============================================================================

#[test]
fn test_print_tree() {
    let options = PrintOptions {
        ast: Some(sample_tree()),
        ..PrintOptions::default()
    };
    assert_eq!(execute_print(&options).unwrap(), "FROM logs | WHERE status >= 500");
}

#[test]
fn test_print_multiline_lowercase() {
    let options = PrintOptions {
        ast: Some(sample_tree()),
        multiline: true,
        lowercase: true,
    };
    assert_eq!(
        execute_print(&options).unwrap(),
        "from logs\n  | where status >= 500"
    );
}

#[test]
fn test_print_rejects_malformed_tree() {
    let options = PrintOptions {
        ast: Some(broken_tree()),
        ..PrintOptions::default()
    };
    let error = execute_print(&options).unwrap_err();
    assert!(matches!(error, CliError::Decode(_)));
    assert!(error.to_string().contains("at $.commands[1].args[0]"));
}
