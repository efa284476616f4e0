//! # Query Syntax Tree
//!
//! This module defines the typed syntax tree for piped ES|QL-style queries:
//!
//! ```text
//! FROM logs-* | WHERE status >= 500 | STATS count = COUNT(*) BY host | SORT count DESC
//! ```
//!
//! ## Architecture Overview
//!
//! - **[location]** - Source ranges, comments and the fields every node carries
//! - **[query]** - The root [`Query`] and its pipeline of [`Command`]s
//! - **[expressions]** - Every node kind that can appear below a command
//! - **[literals]** - Literal values and query parameters
//! - **[operators]** - Function subtypes, binary operators, cast types
//! - **[builder]** - Constructors for synthetic trees
//!
//! ## Core Concepts
//!
//! ### Proper Nodes
//!
//! Every node has a `type` tag (see [`NodeType`]) and a [`NodeMeta`]:
//! `name`, raw `text`, `location` and the `incomplete` flag. For nodes
//! produced by a parser, `text` is the slice of the query at `location`.
//!
//! ### Coalesced Calls
//!
//! Function calls and all operators are `function` nodes. The
//! [`FunctionKind`] distinguishes `fn(a, b)`, `-a`, `a IS NULL` and `a + b`
//! and fixes how many arguments each of them holds.
//!
//! ### Groups
//!
//! Command arguments may be grouped without a node of their own
//! ([`Item::Group`]). In JSON such a group is a bare array.
//!
//! ### Unknown Nodes
//!
//! [`Unknown`] marks input the tree producer did not recognise. It is not
//! an error: validation and analysis skip it.
pub mod builder;
pub mod expressions;
pub mod literals;
pub mod location;
pub mod operators;
pub mod query;

pub use builder::Builder;
pub use expressions::{
    Callee, Column, ColumnPart, CommandOption, Expr, Function, FunctionKind, Identifier,
    InlineCast, Item, List, ListSubtype, Map, MapEntry, NodeType, NullsOrder, Order, SortOrder,
    Source, SourceType, TimeInterval, Unknown,
};
pub use literals::{Literal, LiteralType, LiteralValue, Param, ParamKind, ParamType};
pub use location::{Comment, CommentKind, Formatting, Location, NodeMeta};
pub use operators::{
    Arity, BinaryOperator, CastType, FunctionSubtype, NOT_PRECEDENCE, OperatorGroup,
    UNARY_PRECEDENCE,
};
pub use query::{Command, Query};
