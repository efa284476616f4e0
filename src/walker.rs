//! Depth-first, pre-order traversal of a syntax tree.
//!
//! ```
//! use esql_ast::ast::{BinaryOperator, Builder};
//! use esql_ast::walker;
//!
//! let query = Builder::query(vec![Builder::command(
//!     "eval",
//!     vec![Builder::binary(BinaryOperator::Add, Builder::column(&["a"]), Builder::call("abs", vec![Builder::integer(-1).into()])).into()],
//! )]);
//!
//! let names: Vec<&str> = walker::functions(&query).iter().map(|f| f.name()).collect();
//! assert_eq!(names, ["+", "abs"]);
//! ```

use crate::ast::{
    Callee, Column, ColumnPart, Command, CommandOption, Expr, Function, Identifier, InlineCast,
    Item, List, Literal, Map, MapEntry, NodeMeta, NodeType, Order, Query, Source, TimeInterval,
    Unknown,
};

/// Borrowed view of any node in the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Query(&'a Query),
    Command(&'a Command),
    Option(&'a CommandOption),
    Function(&'a Function),
    Order(&'a Order),
    InlineCast(&'a InlineCast),
    Unknown(&'a Unknown),
    TimeInterval(&'a TimeInterval),
    Source(&'a Source),
    Column(&'a Column),
    List(&'a List),
    Map(&'a Map),
    MapEntry(&'a MapEntry),
    Literal(&'a Literal),
    Identifier(&'a Identifier),
}

impl<'a> NodeRef<'a> {
    pub fn meta(&self) -> &'a NodeMeta {
        match *self {
            NodeRef::Query(node) => &node.meta,
            NodeRef::Command(node) => &node.meta,
            NodeRef::Option(node) => &node.meta,
            NodeRef::Function(node) => &node.meta,
            NodeRef::Order(node) => &node.meta,
            NodeRef::InlineCast(node) => &node.meta,
            NodeRef::Unknown(node) => &node.meta,
            NodeRef::TimeInterval(node) => &node.meta,
            NodeRef::Source(node) => &node.meta,
            NodeRef::Column(node) => &node.meta,
            NodeRef::List(node) => &node.meta,
            NodeRef::Map(node) => &node.meta,
            NodeRef::MapEntry(node) => &node.meta,
            NodeRef::Literal(node) => &node.meta,
            NodeRef::Identifier(node) => &node.meta,
        }
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            NodeRef::Query(_) => NodeType::Query,
            NodeRef::Command(_) => NodeType::Command,
            NodeRef::Option(_) => NodeType::Option,
            NodeRef::Function(_) => NodeType::Function,
            NodeRef::Order(_) => NodeType::Order,
            NodeRef::InlineCast(_) => NodeType::InlineCast,
            NodeRef::Unknown(_) => NodeType::Unknown,
            NodeRef::TimeInterval(_) => NodeType::TimeInterval,
            NodeRef::Source(_) => NodeType::Source,
            NodeRef::Column(_) => NodeType::Column,
            NodeRef::List(_) => NodeType::List,
            NodeRef::Map(_) => NodeType::Map,
            NodeRef::MapEntry(_) => NodeType::MapEntry,
            NodeRef::Literal(_) => NodeType::Literal,
            NodeRef::Identifier(_) => NodeType::Identifier,
        }
    }

    pub fn name(&self) -> &'a str {
        &self.meta().name
    }
}

impl<'a> From<&'a Expr> for NodeRef<'a> {
    fn from(expr: &'a Expr) -> Self {
        match expr {
            Expr::Query(node) => NodeRef::Query(node),
            Expr::Function(node) => NodeRef::Function(node),
            Expr::Option(node) => NodeRef::Option(node),
            Expr::Source(node) => NodeRef::Source(node),
            Expr::Column(node) => NodeRef::Column(node),
            Expr::TimeInterval(node) => NodeRef::TimeInterval(node),
            Expr::List(node) => NodeRef::List(node),
            Expr::Literal(node) => NodeRef::Literal(node),
            Expr::Identifier(node) => NodeRef::Identifier(node),
            Expr::InlineCast(node) => NodeRef::InlineCast(node),
            Expr::Order(node) => NodeRef::Order(node),
            Expr::Unknown(node) => NodeRef::Unknown(node),
            Expr::Map(node) => NodeRef::Map(node),
            Expr::MapEntry(node) => NodeRef::MapEntry(node),
        }
    }
}

/// Visits the query node, then every node below it.
pub fn walk_query<'a>(query: &'a Query, visit: &mut impl FnMut(NodeRef<'a>)) {
    visit(NodeRef::Query(query));
    for command in &query.commands {
        walk_command(command, visit);
    }
}

pub fn walk_command<'a>(command: &'a Command, visit: &mut impl FnMut(NodeRef<'a>)) {
    visit(NodeRef::Command(command));
    walk_items(&command.args, visit);
}

/// Groups are entered without being visited themselves.
pub fn walk_item<'a>(item: &'a Item, visit: &mut impl FnMut(NodeRef<'a>)) {
    match item {
        Item::Expr(expr) => walk_expr(expr, visit),
        Item::Group(items) => walk_items(items, visit),
    }
}

fn walk_items<'a>(items: &'a [Item], visit: &mut impl FnMut(NodeRef<'a>)) {
    for item in items {
        walk_item(item, visit);
    }
}

pub fn walk_expr<'a>(expr: &'a Expr, visit: &mut impl FnMut(NodeRef<'a>)) {
    match expr {
        Expr::Query(query) => walk_query(query, visit),
        Expr::Function(function) => {
            visit(NodeRef::Function(function));
            match &function.operator {
                Some(Callee::Identifier(identifier)) => visit(NodeRef::Identifier(identifier)),
                Some(Callee::Param(literal)) => visit(NodeRef::Literal(literal)),
                None => {}
            }
            walk_items(function.args(), visit);
        }
        Expr::Option(option) => {
            visit(NodeRef::Option(option));
            walk_items(&option.args, visit);
        }
        Expr::Source(source) => {
            visit(NodeRef::Source(source));
            for literal in [&source.prefix, &source.index, &source.selector]
                .into_iter()
                .flatten()
            {
                visit(NodeRef::Literal(literal));
            }
        }
        Expr::Column(column) => {
            visit(NodeRef::Column(column));
            for part in &column.args {
                match part {
                    ColumnPart::Identifier(identifier) => visit(NodeRef::Identifier(identifier)),
                    ColumnPart::Param(literal) => visit(NodeRef::Literal(literal)),
                }
            }
        }
        Expr::List(list) => {
            visit(NodeRef::List(list));
            for value in &list.values {
                walk_expr(value, visit);
            }
        }
        Expr::InlineCast(cast) => {
            visit(NodeRef::InlineCast(cast));
            walk_item(&cast.value, visit);
        }
        Expr::Order(order) => {
            visit(NodeRef::Order(order));
            walk_item(&order.field, visit);
        }
        Expr::Map(map) => {
            visit(NodeRef::Map(map));
            for entry in &map.entries {
                walk_map_entry(entry, visit);
            }
        }
        Expr::MapEntry(entry) => walk_map_entry(entry, visit),
        Expr::TimeInterval(_) | Expr::Literal(_) | Expr::Identifier(_) | Expr::Unknown(_) => {
            visit(NodeRef::from(expr))
        }
    }
}

fn walk_map_entry<'a>(entry: &'a MapEntry, visit: &mut impl FnMut(NodeRef<'a>)) {
    visit(NodeRef::MapEntry(entry));
    visit(NodeRef::Literal(&entry.key));
    walk_expr(&entry.value, visit);
}

/// Every node for which `predicate` holds, in pre-order.
pub fn collect<'a>(query: &'a Query, mut predicate: impl FnMut(&NodeRef<'a>) -> bool) -> Vec<NodeRef<'a>> {
    let mut found = Vec::new();
    walk_query(query, &mut |node| {
        if predicate(&node) {
            found.push(node);
        }
    });
    found
}

/// Every `function` node: calls and operator applications alike.
pub fn functions(query: &Query) -> Vec<&Function> {
    let mut found = Vec::new();
    walk_query(query, &mut |node| {
        if let NodeRef::Function(function) = node {
            found.push(function);
        }
    });
    found
}

/// Nodes of the given type whose name matches case-insensitively.
pub fn find_by_name<'a>(query: &'a Query, node_type: NodeType, name: &str) -> Vec<NodeRef<'a>> {
    collect(query, |node| {
        node.node_type() == node_type && node.name().eq_ignore_ascii_case(name)
    })
}
