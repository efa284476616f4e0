//! Typed syntax tree for piped ES|QL-style queries, with JSON conversion,
//! validation, traversal and printing, and the [`Outcome`] combinators used
//! by the surrounding tooling.
//!
//! ```
//! use esql_ast::{Printer, json_to_query, validate};
//! use serde_json::json;
//!
//! let tree = json!({
//!     "type": "query", "name": "", "text": "", "incomplete": false,
//!     "location": { "min": 0, "max": 0 },
//!     "commands": [{
//!         "type": "command", "name": "limit", "text": "", "incomplete": false,
//!         "location": { "min": 0, "max": 0 },
//!         "args": [{
//!             "type": "literal", "literalType": "integer", "value": 10,
//!             "name": "10", "text": "", "incomplete": false,
//!             "location": { "min": 0, "max": 0 }
//!         }]
//!     }]
//! });
//!
//! assert!(!validate(&tree).has_errors());
//! let query = json_to_query(&tree).unwrap();
//! assert_eq!(Printer::default().print_query(&query), "LIMIT 10");
//! ```

pub mod ast;
pub mod cli;
pub mod convert;
pub mod guards;
pub mod outcome;
pub mod printer;
pub mod validate;
pub mod walker;

pub use ast::{Builder, Command, Expr, Item, Query};
pub use convert::{DecodeError, json_to_query, query_to_json};
pub use outcome::{Outcome, Panic, Rejection};
pub use printer::{Printer, PrinterOptions};
pub use validate::{Report, Validator, validate};
