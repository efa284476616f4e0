//! Query text from a syntax tree.
//!
//! The printer does not reproduce the original layout: it prints a
//! canonical form with keywords uppercased, operators spaced and
//! parentheses only where precedence needs them.
//!
//! # Examples
//!
//! ```
//! use esql_ast::ast::{BinaryOperator, Builder};
//! use esql_ast::printer::{Printer, PrinterOptions};
//!
//! let sum = Builder::binary(BinaryOperator::Add, Builder::column(&["a"]), Builder::column(&["b"]));
//! let query = Builder::query(vec![
//!     Builder::command("from", vec![Builder::index("index").into()]),
//!     Builder::command("where", vec![Builder::binary(BinaryOperator::GreaterThan, sum, Builder::integer(1)).into()]),
//! ]);
//!
//! assert_eq!(Printer::default().print_query(&query), "FROM index | WHERE a + b > 1");
//!
//! let multiline = Printer::new(PrinterOptions { multiline: true, ..PrinterOptions::default() });
//! assert_eq!(multiline.print_query(&query), "FROM index\n  | WHERE a + b > 1");
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{
    BinaryOperator, Callee, Column, ColumnPart, Command, Comment, CommentKind, Expr, Function,
    FunctionKind, Item, ListSubtype, Literal, LiteralValue, NOT_PRECEDENCE, NodeMeta,
    NullsOrder, ParamType, Query, Source, SortOrder, UNARY_PRECEDENCE, builder::quote_string,
};

/// Column name parts that print without backticks.
static PLAIN_IDENTIFIER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(?:[a-zA-Z_@][a-zA-Z0-9_]*|\*)$").ok());

/// Binding power of operands that never need parentheses.
const ATOM_PRECEDENCE: u8 = u8::MAX;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterOptions {
    /// One command per line, each after the first starting with `pipe_tab` and `|`
    pub multiline: bool,
    pub pipe_tab: String,
    pub lowercase_commands: bool,
    pub lowercase_functions: bool,
    /// Applies to operators such as `AND`, `NOT`, `IS NULL`, option names and sort orders
    pub lowercase_keywords: bool,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        PrinterOptions {
            multiline: false,
            pipe_tab: "  ".to_string(),
            lowercase_commands: false,
            lowercase_functions: false,
            lowercase_keywords: false,
        }
    }
}

impl PrinterOptions {
    /// Everything lowercase.
    pub fn lowercase() -> Self {
        PrinterOptions {
            lowercase_commands: true,
            lowercase_functions: true,
            lowercase_keywords: true,
            ..PrinterOptions::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Printer {
    options: PrinterOptions,
}

impl Printer {
    pub fn new(options: PrinterOptions) -> Self {
        Printer { options }
    }

    pub fn options(&self) -> &PrinterOptions {
        &self.options
    }

    pub fn print_query(&self, query: &Query) -> String {
        // The first command has no pipe, so lines below its top comments
        // are not indented.
        let commands: Vec<String> = query
            .commands
            .iter()
            .enumerate()
            .map(|(i, command)| {
                let indent = if i == 0 { "" } else { self.options.pipe_tab.as_str() };
                self.print_command_indented(command, indent)
            })
            .collect();

        if !self.options.multiline {
            return self.decorate(&query.meta, commands.join(" | "));
        }

        let separator = format!("\n{}| ", self.options.pipe_tab);
        let mut text = String::new();
        for comment in top_comments(&query.meta) {
            text.push_str(&print_comment(comment));
            text.push('\n');
        }
        text.push_str(&commands.join(&separator));
        for comment in bottom_comments(&query.meta) {
            text.push('\n');
            text.push_str(&print_comment(comment));
        }
        text
    }

    /// In multiline mode, lines after top comments start with `pipe_tab`,
    /// lining the command up after a `| `.
    pub fn print_command(&self, command: &Command) -> String {
        self.print_command_indented(command, &self.options.pipe_tab)
    }

    fn print_command_indented(&self, command: &Command, indent: &str) -> String {
        let mut text = match &command.command_type {
            Some(command_type) => format!("{} {}", command_type, command.name()),
            None => command.name().to_string(),
        };
        text = self.case(text, self.options.lowercase_commands);

        let mut args = Vec::new();
        let mut options = Vec::new();
        for arg in &command.args {
            match arg {
                Item::Expr(option @ Expr::Option(_)) => options.push(self.print_expr(option)),
                _ => args.push(self.print_item(arg)),
            }
        }
        if !args.is_empty() {
            text.push(' ');
            text.push_str(&args.join(", "));
        }
        for option in options {
            text.push(' ');
            text.push_str(&option);
        }

        if !self.options.multiline {
            return self.decorate(&command.meta, text);
        }

        let mut line = String::new();
        for comment in top_comments(&command.meta) {
            line.push_str(&print_comment(comment));
            line.push('\n');
            line.push_str(indent);
        }
        line.push_str(&self.decorate(&command.meta, text));
        if let Some(comment) = command
            .meta
            .formatting
            .as_ref()
            .and_then(|formatting| formatting.right_single_line.as_ref())
        {
            line.push(' ');
            line.push_str(&print_comment(comment));
        }
        for comment in bottom_comments(&command.meta) {
            line.push('\n');
            line.push_str(indent);
            line.push_str(&print_comment(comment));
        }
        line
    }

    /// A group prints as its comma-separated members.
    pub fn print_item(&self, item: &Item) -> String {
        match item {
            Item::Expr(expr) => self.print_expr(expr),
            Item::Group(items) => self.print_items(items),
        }
    }

    pub fn print_expr(&self, expr: &Expr) -> String {
        let text = match expr {
            Expr::Query(query) => return format!("({})", self.print_query(query)),
            Expr::Function(function) => self.print_function(function),
            Expr::Option(option) => {
                let name = self.keyword(option.meta.name.clone());
                if option.args.is_empty() {
                    name
                } else {
                    format!("{} {}", name, self.print_items(&option.args))
                }
            }
            Expr::Source(source) => self.print_source(source),
            Expr::Column(column) => self.print_column(column),
            Expr::TimeInterval(interval) => {
                format!("{} {}", print_number(interval.quantity), interval.unit)
            }
            Expr::List(list) => {
                let values: Vec<String> =
                    list.values.iter().map(|value| self.print_expr(value)).collect();
                match list.subtype {
                    ListSubtype::Literal => format!("[{}]", values.join(", ")),
                    ListSubtype::Tuple => format!("({})", values.join(", ")),
                }
            }
            Expr::Literal(literal) => self.print_literal(literal),
            Expr::Identifier(identifier) => quote_identifier(identifier.name()),
            Expr::InlineCast(cast) => {
                let value = self.print_item(&cast.value);
                let value = if precedence(&cast.value) < ATOM_PRECEDENCE {
                    format!("({})", value)
                } else {
                    value
                };
                format!("{}::{}", value, cast.cast_type.as_str())
            }
            Expr::Order(order) => {
                let mut text = self.print_item(&order.field);
                if order.order != SortOrder::Unspecified {
                    text.push(' ');
                    text.push_str(&self.keyword(order.order.as_str().to_string()));
                }
                if order.nulls != NullsOrder::Unspecified {
                    text.push(' ');
                    text.push_str(&self.keyword(order.nulls.as_str().to_string()));
                }
                text
            }
            Expr::Unknown(unknown) => unknown.meta.text.clone(),
            Expr::Map(map) => {
                let entries: Vec<String> = map
                    .entries
                    .iter()
                    .map(|entry| {
                        format!(
                            "{}: {}",
                            self.print_literal(&entry.key),
                            self.print_expr(&entry.value)
                        )
                    })
                    .collect();
                format!("{{{}}}", entries.join(", "))
            }
            Expr::MapEntry(entry) => format!(
                "{}: {}",
                self.print_literal(&entry.key),
                self.print_expr(&entry.value)
            ),
        };
        self.decorate(expr.meta(), text)
    }

    fn print_items(&self, items: &[Item]) -> String {
        items
            .iter()
            .map(|item| self.print_item(item))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn print_function(&self, function: &Function) -> String {
        match &function.kind {
            FunctionKind::VariadicCall(args) => {
                let name = match &function.operator {
                    Some(Callee::Identifier(identifier)) => identifier.name().to_string(),
                    Some(Callee::Param(param)) => self.print_literal(param),
                    None => function.name().to_string(),
                };
                let name = match &function.operator {
                    Some(Callee::Param(_)) => name,
                    _ => self.case(name, self.options.lowercase_functions),
                };
                format!("{}({})", name, self.print_items(args))
            }
            FunctionKind::Unary(arg) => {
                let operator = function.name();
                if operator.eq_ignore_ascii_case("not") {
                    let arg = self.operand(arg, NOT_PRECEDENCE, false);
                    format!("{} {}", self.keyword(operator.to_string()), arg)
                } else {
                    format!("{}{}", operator, self.operand(arg, UNARY_PRECEDENCE, false))
                }
            }
            FunctionKind::PostfixUnary(arg) => format!(
                "{} {}",
                self.operand(arg, UNARY_PRECEDENCE, false),
                self.keyword(function.name().to_string())
            ),
            FunctionKind::Binary(args) => {
                let [left, right] = &**args;
                let (operator, binding) = match function.binary_operator() {
                    Some(operator) => {
                        let text = if operator.is_keyword() {
                            self.keyword(operator.as_str().to_string())
                        } else {
                            operator.as_str().to_string()
                        };
                        (text, operator.precedence())
                    }
                    None => (function.name().to_string(), ATOM_PRECEDENCE - 1),
                };
                format!(
                    "{} {} {}",
                    self.operand(left, binding, false),
                    operator,
                    self.operand(right, binding, true)
                )
            }
        }
    }

    /// Prints `item` as the operand of an operator binding with
    /// `binding`. Right operands of equal precedence are parenthesised,
    /// operators associate to the left.
    fn operand(&self, item: &Item, binding: u8, right: bool) -> String {
        let text = self.print_item(item);
        let inner = precedence(item);
        if inner < binding || (right && inner == binding) {
            format!("({})", text)
        } else {
            text
        }
    }

    fn print_source(&self, source: &Source) -> String {
        let Some(index) = &source.index else {
            return source.meta.name.clone();
        };
        let mut text = String::new();
        if let Some(prefix) = &source.prefix {
            text.push_str(&self.print_literal(prefix));
            text.push(':');
        }
        text.push_str(&self.print_literal(index));
        if let Some(selector) = &source.selector {
            text.push_str("::");
            text.push_str(&self.print_literal(selector));
        }
        text
    }

    fn print_column(&self, column: &Column) -> String {
        if column.args.is_empty() {
            return column
                .parts
                .iter()
                .map(|part| quote_identifier(part))
                .collect::<Vec<_>>()
                .join(".");
        }
        column
            .args
            .iter()
            .map(|part| match part {
                ColumnPart::Identifier(identifier) => quote_identifier(identifier.name()),
                ColumnPart::Param(param) => self.print_literal(param),
            })
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn print_literal(&self, literal: &Literal) -> String {
        match &literal.value {
            LiteralValue::Integer(n) => n.to_string(),
            LiteralValue::Double(n) => print_double(*n),
            LiteralValue::Boolean(b) => self.keyword(b.to_string()),
            LiteralValue::Null => self.keyword("null".to_string()),
            LiteralValue::Keyword {
                value,
                value_unquoted,
                unquoted,
            } => {
                if *unquoted {
                    value_unquoted.clone()
                } else if value.starts_with('"') {
                    value.clone()
                } else {
                    quote_string(value_unquoted)
                }
            }
            LiteralValue::Param(param) => match &param.param_type {
                ParamType::Unnamed => param.kind.as_str().to_string(),
                ParamType::Named(name) => format!("{}{}", param.kind.as_str(), name),
                ParamType::Positional(position) => {
                    format!("{}{}", param.kind.as_str(), position)
                }
            },
        }
    }

    /// Surrounds `text` with the node's inline `/* */` comments.
    fn decorate(&self, meta: &NodeMeta, text: String) -> String {
        let Some(formatting) = &meta.formatting else {
            return text;
        };
        let inline = |comment: &&Comment| comment.kind == CommentKind::MultiLine;
        let mut decorated = String::new();
        for comment in formatting.left.iter().filter(inline) {
            decorated.push_str(&print_comment(comment));
            decorated.push(' ');
        }
        decorated.push_str(&text);
        for comment in formatting.right.iter().filter(inline) {
            decorated.push(' ');
            decorated.push_str(&print_comment(comment));
        }
        decorated
    }

    fn case(&self, text: String, lowercase: bool) -> String {
        if lowercase {
            text.to_lowercase()
        } else {
            text.to_uppercase()
        }
    }

    fn keyword(&self, text: String) -> String {
        self.case(text, self.options.lowercase_keywords)
    }
}

fn top_comments(meta: &NodeMeta) -> &[Comment] {
    meta.formatting
        .as_ref()
        .map(|formatting| formatting.top.as_slice())
        .unwrap_or_default()
}

fn bottom_comments(meta: &NodeMeta) -> &[Comment] {
    meta.formatting
        .as_ref()
        .map(|formatting| formatting.bottom.as_slice())
        .unwrap_or_default()
}

fn print_comment(comment: &Comment) -> String {
    match comment.kind {
        CommentKind::SingleLine => format!("//{}", comment.text),
        CommentKind::MultiLine => format!("/*{}*/", comment.text),
    }
}

/// How tightly `item` binds when it appears as an operand.
fn precedence(item: &Item) -> u8 {
    let Item::Expr(Expr::Function(function)) = item else {
        return ATOM_PRECEDENCE;
    };
    match &function.kind {
        FunctionKind::VariadicCall(_) => ATOM_PRECEDENCE,
        FunctionKind::Unary(_) if function.name().eq_ignore_ascii_case("not") => NOT_PRECEDENCE,
        FunctionKind::Unary(_) | FunctionKind::PostfixUnary(_) => UNARY_PRECEDENCE,
        FunctionKind::Binary(_) => function
            .binary_operator()
            .map_or(ATOM_PRECEDENCE - 1, |operator: BinaryOperator| {
                operator.precedence()
            }),
    }
}

/// Backtick-quotes a name part unless it is a plain word, doubling inner backticks.
pub fn quote_identifier(name: &str) -> String {
    let plain = PLAIN_IDENTIFIER
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(name));
    if plain {
        name.to_string()
    } else {
        format!("`{}`", name.replace('`', "``"))
    }
}

/// Doubles keep a decimal point so they read back as doubles.
fn print_double(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e16 {
        format!("{:.1}", n)
    } else {
        n.to_string()
    }
}

fn print_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e16 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
