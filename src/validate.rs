//! Structural validation of trees handed over as JSON.
//!
//! The node model does not stop a producer from emitting a binary
//! expression with one argument, a literal whose value does not match its
//! `literalType`, or a `location` that points outside the query. The
//! [`Validator`] finds those and reports every one of them as a
//! [`Message`], instead of stopping at the first problem the way
//! [`json_to_query`] does.
//!
//! `unknown` nodes below the root are never reported: they mark input the
//! producer did not recognise and are skipped, wherever they appear. The
//! report only counts them. [`json_to_query`] drops the ones the typed
//! tree has no room for, so a tree without errors always decodes.
//!
//! [`json_to_query`]: crate::convert::json_to_query

use serde::Serialize;
use serde_json::{Map as Fields, Value};

use crate::{
    ast::{
        Arity, CastType, FunctionSubtype, ListSubtype, Location, NodeType, NullsOrder,
        ParamKind, SortOrder, SourceType,
    },
    convert::{
        DecodeError, DecodeErrorKind, ROOT_PATH, boolean_value, decode_formatting, field_path,
        index_path, integer_value, param_position,
    },
    guards::is_unknown_node,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageCode {
    /// A value where a node or group was expected
    NotANode,
    MissingField,
    InvalidField,
    UnknownNodeType,
    /// A node of the wrong type for its position
    UnexpectedNode,
    /// Argument count does not fit the function subtype
    ArityMismatch,
    InvertedLocation,
    LocationOutOfBounds,
    /// `text` differs from the source slice at `location`
    TextMismatch,
}

/// One finding, shaped after the editor diagnostics of the query language.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    pub code: MessageCode,
    /// Path of the offending value, e.g. `$.commands[0].args[1]`
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub messages: Vec<Message>,
    /// Number of `unknown` nodes skipped
    pub unknown_nodes: usize,
}

impl Report {
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Message> {
        self.messages
            .iter()
            .filter(|message| message.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Message> {
        self.messages
            .iter()
            .filter(|message| message.severity == Severity::Warning)
    }

    pub fn with_code(&self, code: MessageCode) -> impl Iterator<Item = &Message> {
        self.messages
            .iter()
            .filter(move |message| message.code == code)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Validator<'s> {
    source: Option<&'s str>,
}

impl<'s> Validator<'s> {
    pub fn new() -> Self {
        Validator { source: None }
    }

    /// Also checks every node's `location` and `text` against the query
    /// text the tree was parsed from.
    pub fn with_source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    /// Validates a `query` node or a legacy array of commands.
    pub fn validate(&self, tree: &Value) -> Report {
        let mut checker = Checker::default();
        checker.query(tree, ROOT_PATH);
        let mut report = Report {
            messages: checker.messages,
            unknown_nodes: checker.unknown_nodes,
        };

        if let Some(source) = self.source {
            if report.has_errors() {
                log::debug!("skipping location checks on a structurally invalid tree");
            } else {
                let mut locations = LocationChecker::new(source);
                locations.visit(tree, ROOT_PATH);
                report.messages.extend(locations.messages);
            }
        }

        log::debug!(
            "validation finished: {} error(s), {} warning(s), {} unknown node(s)",
            report.errors().count(),
            report.warnings().count(),
            report.unknown_nodes
        );
        report
    }
}

/// Validates without a source text.
pub fn validate(tree: &Value) -> Report {
    Validator::new().validate(tree)
}

#[derive(Default)]
struct Checker {
    messages: Vec<Message>,
    unknown_nodes: usize,
}

impl Checker {
    fn report(
        &mut self,
        severity: Severity,
        code: MessageCode,
        path: &str,
        location: Option<Location>,
        text: String,
    ) {
        log::trace!("{:?} {:?} at {}: {}", severity, code, path, text);
        self.messages.push(Message {
            severity,
            text,
            location,
            code,
            path: path.to_string(),
        });
    }

    fn error(&mut self, code: MessageCode, path: &str, location: Option<Location>, text: String) {
        self.report(Severity::Error, code, path, location, text);
    }

    fn query(&mut self, value: &Value, path: &str) {
        if let Value::Array(commands) = value {
            for (i, command) in commands.iter().enumerate() {
                self.command(command, &index_path(path, i));
            }
            return;
        }

        let Some(fields) = self.node(value, path) else {
            return;
        };
        let location = self.base(fields, path);
        if !self.expect_type(fields, NodeType::Query, path, location) {
            return;
        }
        self.commands(fields, path, location);
    }

    fn commands(&mut self, fields: &Fields<String, Value>, path: &str, location: Option<Location>) {
        if let Some(commands) = self.array(fields, "commands", path, location) {
            let commands_path = field_path(path, "commands");
            for (i, command) in commands.iter().enumerate() {
                self.command(command, &index_path(&commands_path, i));
            }
        }
    }

    fn command(&mut self, value: &Value, path: &str) {
        if is_unknown_node(value) {
            self.skip_unknown(path);
            return;
        }
        let Some(fields) = self.node(value, path) else {
            return;
        };
        let location = self.base(fields, path);
        if !self.expect_type(fields, NodeType::Command, path, location) {
            return;
        }
        self.optional_string(fields, "commandType", path, location);
        self.args(fields, path, location);
    }

    fn args(
        &mut self,
        fields: &Fields<String, Value>,
        path: &str,
        location: Option<Location>,
    ) -> Option<usize> {
        let args = self.array(fields, "args", path, location)?;
        let args_path = field_path(path, "args");
        for (i, arg) in args.iter().enumerate() {
            self.item(arg, &index_path(&args_path, i));
        }
        Some(args.len())
    }

    fn item(&mut self, value: &Value, path: &str) {
        match value {
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    self.item(item, &index_path(path, i));
                }
            }
            _ => {
                self.expr(value, path);
            }
        }
    }

    /// Checks a proper node below a command. Returns its type when the tag
    /// could be read.
    fn expr(&mut self, value: &Value, path: &str) -> Option<NodeType> {
        let fields = self.node(value, path)?;
        let Some(tag) = fields.get("type") else {
            let location = self.base(fields, path);
            self.missing("type", path, location);
            return None;
        };
        let Some(tag) = tag.as_str() else {
            self.invalid("type", "a string", path, None);
            return None;
        };
        let Some(node_type) = NodeType::from_name(tag) else {
            self.error(
                MessageCode::UnknownNodeType,
                path,
                None,
                format!("Unknown node type `{}`", tag),
            );
            return None;
        };
        if node_type == NodeType::Unknown {
            self.skip_unknown(path);
            return Some(node_type);
        }

        let location = self.base(fields, path);
        match node_type {
            NodeType::Command => self.error(
                MessageCode::UnexpectedNode,
                path,
                location,
                "Command nodes are only allowed at the top of a query".to_string(),
            ),
            NodeType::Query => self.commands(fields, path, location),
            NodeType::Function => self.function(fields, path, location),
            NodeType::Option => {
                self.args(fields, path, location);
            }
            NodeType::Order => self.order(fields, path, location),
            NodeType::InlineCast => {
                if let Some(value) = self.require(fields, "value", path, location) {
                    self.item(value, &field_path(path, "value"));
                }
                self.tag(fields, "castType", path, location, |name| {
                    CastType::from_name(name).is_some()
                });
            }
            NodeType::TimeInterval => {
                self.string(fields, "unit", path, location);
                if let Some(quantity) = self.require(fields, "quantity", path, location) {
                    if !quantity.is_number() {
                        self.invalid("quantity", "a number", path, location);
                    }
                }
            }
            NodeType::Source => self.source(fields, path, location),
            NodeType::Column => self.column(fields, path, location),
            NodeType::List => self.list(fields, path, location),
            NodeType::Map => {
                if let Some(entries) = self.array(fields, "entries", path, location) {
                    let entries_path = field_path(path, "entries");
                    for (i, entry) in entries.iter().enumerate() {
                        let entry_path = index_path(&entries_path, i);
                        self.expect_expr(entry, &entry_path, "map entry", |ty| {
                            ty == NodeType::MapEntry
                        });
                    }
                }
            }
            NodeType::MapEntry => {
                if let Some(key) = self.require(fields, "key", path, location) {
                    self.string_literal(key, &field_path(path, "key"));
                }
                if let Some(value) = self.require(fields, "value", path, location) {
                    self.expr(value, &field_path(path, "value"));
                }
            }
            NodeType::Literal => self.literal(fields, path, location),
            NodeType::Identifier | NodeType::Unknown => {}
        }
        Some(node_type)
    }

    fn function(&mut self, fields: &Fields<String, Value>, path: &str, location: Option<Location>) {
        let subtype = match fields.get("subtype") {
            None | Some(Value::Null) => Some(FunctionSubtype::VariadicCall),
            Some(value) => {
                let subtype = value.as_str().and_then(FunctionSubtype::from_name);
                if subtype.is_none() {
                    self.invalid("subtype", "a function subtype", path, location);
                }
                subtype
            }
        };

        if let Some(operator) = fields.get("operator").filter(|value| !value.is_null()) {
            self.callee(operator, &field_path(path, "operator"));
        }

        let Some(found) = self.args(fields, path, location) else {
            return;
        };
        let Some(subtype) = subtype else {
            return;
        };
        if !subtype.arity().accepts(found) {
            let incomplete = fields.get("incomplete").and_then(Value::as_bool) == Some(true);
            let severity = if incomplete {
                Severity::Warning
            } else {
                Severity::Error
            };
            let expected = match subtype.arity() {
                Arity::Exact(n) => n,
                Arity::Variadic => found,
            };
            let name = fields.get("name").and_then(Value::as_str).unwrap_or("");
            self.report(
                severity,
                MessageCode::ArityMismatch,
                path,
                location,
                format!(
                    "`{}` is a {} and takes {} argument(s), found {}",
                    name,
                    subtype.as_str(),
                    expected,
                    found
                ),
            );
        }
    }

    fn order(&mut self, fields: &Fields<String, Value>, path: &str, location: Option<Location>) {
        self.optional_tag(fields, "order", path, location, |name| {
            SortOrder::from_name(name).is_some()
        });
        self.optional_tag(fields, "nulls", path, location, |name| {
            NullsOrder::from_name(name).is_some()
        });
        if let Some(found) = self.args(fields, path, location) {
            if found != 1 {
                self.error(
                    MessageCode::ArityMismatch,
                    path,
                    location,
                    format!("An order expression takes exactly one field, found {}", found),
                );
            }
        }
    }

    fn source(&mut self, fields: &Fields<String, Value>, path: &str, location: Option<Location>) {
        self.tag(fields, "sourceType", path, location, |name| {
            SourceType::from_name(name).is_some()
        });
        for part in ["prefix", "index", "selector"] {
            if let Some(value) = fields.get(part).filter(|value| !value.is_null()) {
                self.string_literal(value, &field_path(path, part));
            }
        }
    }

    fn column(&mut self, fields: &Fields<String, Value>, path: &str, location: Option<Location>) {
        self.optional_bool(fields, "quoted", path, location);
        if let Some(args) = self.array(fields, "args", path, location) {
            let args_path = field_path(path, "args");
            for (i, part) in args.iter().enumerate() {
                self.callee(part, &index_path(&args_path, i));
            }
        }
        match fields.get("parts") {
            None | Some(Value::Null) => {}
            Some(Value::Array(parts)) if parts.iter().all(Value::is_string) => {}
            Some(_) => self.invalid("parts", "an array of strings", path, location),
        }
    }

    fn list(&mut self, fields: &Fields<String, Value>, path: &str, location: Option<Location>) {
        self.optional_tag(fields, "subtype", path, location, |name| {
            ListSubtype::from_name(name).is_some()
        });
        if let Some(values) = self.array(fields, "values", path, location) {
            let values_path = field_path(path, "values");
            for (i, value) in values.iter().enumerate() {
                let value_path = index_path(&values_path, i);
                if value.is_array() {
                    self.error(
                        MessageCode::NotANode,
                        &value_path,
                        None,
                        "List values cannot be groups".to_string(),
                    );
                } else {
                    self.expr(value, &value_path);
                }
            }
        }
    }

    fn literal(&mut self, fields: &Fields<String, Value>, path: &str, location: Option<Location>) {
        let Some(literal_type) = self.string(fields, "literalType", path, location) else {
            return;
        };
        let value = fields.get("value");
        let shape_ok = match literal_type.as_str() {
            "double" => value.is_some_and(Value::is_number),
            "integer" => value.and_then(integer_value).is_some(),
            "boolean" => value.and_then(boolean_value).is_some(),
            "null" => true,
            "keyword" => {
                self.optional_string(fields, "valueUnquoted", path, location);
                self.optional_bool(fields, "unquoted", path, location);
                value.is_some_and(Value::is_string)
            }
            "param" => {
                self.param(fields, path, location);
                return;
            }
            _ => {
                self.invalid("literalType", "a literal type", path, location);
                return;
            }
        };
        if !shape_ok {
            let expected = match literal_type.as_str() {
                "double" => "a number",
                "integer" => "an integer",
                "boolean" => "`true` or `false`",
                _ => "a string",
            };
            self.invalid("value", expected, path, location);
        }
    }

    fn param(&mut self, fields: &Fields<String, Value>, path: &str, location: Option<Location>) {
        self.tag(fields, "paramKind", path, location, |name| {
            ParamKind::from_name(name).is_some()
        });
        let Some(param_type) = self.string(fields, "paramType", path, location) else {
            return;
        };
        let value = fields.get("value");
        match param_type.as_str() {
            "named" if !value.is_some_and(Value::is_string) => {
                self.invalid("value", "a parameter name", path, location)
            }
            "positional" if value.and_then(param_position).is_none() => {
                self.invalid("value", "a parameter position", path, location)
            }
            "named" | "positional" | "unnamed" => {}
            _ => self.invalid(
                "paramType",
                "`named`, `positional` or `unnamed`",
                path,
                location,
            ),
        }
    }

    /// A keyword literal. An `unknown` node here is skipped like anywhere
    /// else.
    fn string_literal(&mut self, value: &Value, path: &str) {
        let is_keyword = value.get("literalType").and_then(Value::as_str) == Some("keyword");
        match self.expr(value, path) {
            None | Some(NodeType::Unknown) => {}
            Some(NodeType::Literal) if is_keyword => {}
            Some(_) => self.error(
                MessageCode::UnexpectedNode,
                path,
                None,
                "Expected a string literal".to_string(),
            ),
        }
    }

    /// An identifier, or a parameter literal in its place.
    fn callee(&mut self, value: &Value, path: &str) {
        let is_param = value.get("literalType").and_then(Value::as_str) == Some("param");
        self.expect_expr(value, path, "identifier or parameter", |ty| {
            ty == NodeType::Identifier || (ty == NodeType::Literal && is_param)
        });
    }

    /// Checks `value` as a node and that its type is one `accept` allows.
    /// `unknown` is always allowed.
    fn expect_expr(
        &mut self,
        value: &Value,
        path: &str,
        expected: &str,
        accept: impl Fn(NodeType) -> bool,
    ) {
        if value.is_array() {
            self.error(
                MessageCode::NotANode,
                path,
                None,
                format!("Expected {}, found a group", expected),
            );
            return;
        }
        if let Some(node_type) = self.expr(value, path) {
            if node_type != NodeType::Unknown && !accept(node_type) {
                self.error(
                    MessageCode::UnexpectedNode,
                    path,
                    None,
                    format!("Expected {}, found `{}`", expected, node_type.as_str()),
                );
            }
        }
    }

    fn node<'v>(&mut self, value: &'v Value, path: &str) -> Option<&'v Fields<String, Value>> {
        let fields = value.as_object();
        if fields.is_none() {
            self.error(
                MessageCode::NotANode,
                path,
                None,
                "Expected a node object".to_string(),
            );
        }
        fields
    }

    /// Checks the fields every proper node carries; returns the node's
    /// location when it is readable.
    fn base(&mut self, fields: &Fields<String, Value>, path: &str) -> Option<Location> {
        let location = match fields.get("location") {
            None => {
                self.missing("location", path, None);
                None
            }
            Some(value) => {
                let bound = |name| {
                    value
                        .get(name)
                        .and_then(Value::as_u64)
                        .and_then(|n| usize::try_from(n).ok())
                };
                match (bound("min"), bound("max")) {
                    (Some(min), Some(max)) => Some(Location::new(min, max)),
                    _ => {
                        self.invalid("location", "`{min, max}` offsets", path, None);
                        None
                    }
                }
            }
        };
        self.string(fields, "name", path, location);
        self.string(fields, "text", path, location);
        match fields.get("incomplete") {
            Some(Value::Bool(_)) => {}
            Some(_) => self.invalid("incomplete", "a boolean", path, location),
            None => self.missing("incomplete", path, location),
        }
        if let Some(formatting) = fields.get("formatting").filter(|value| !value.is_null()) {
            if let Err(error) = decode_formatting(formatting, &field_path(path, "formatting")) {
                self.decode_error(error, location);
            }
        }
        location
    }

    fn skip_unknown(&mut self, path: &str) {
        log::debug!("skipping unknown node at {}", path);
        self.unknown_nodes += 1;
    }

    fn decode_error(&mut self, error: DecodeError, location: Option<Location>) {
        let code = match error.kind {
            DecodeErrorKind::Arity { .. } => MessageCode::ArityMismatch,
            DecodeErrorKind::MissingField(_) => MessageCode::MissingField,
            DecodeErrorKind::UnknownNodeType(_) => MessageCode::UnknownNodeType,
            DecodeErrorKind::UnexpectedNode { .. } => MessageCode::UnexpectedNode,
            DecodeErrorKind::NotAnObject => MessageCode::NotANode,
            DecodeErrorKind::InvalidField { .. } => MessageCode::InvalidField,
        };
        let text = error.kind.to_string();
        self.error(code, &error.path, location, text);
    }

    fn expect_type(
        &mut self,
        fields: &Fields<String, Value>,
        expected: NodeType,
        path: &str,
        location: Option<Location>,
    ) -> bool {
        let found = fields.get("type").and_then(Value::as_str);
        if found == Some(expected.as_str()) {
            return true;
        }
        self.error(
            MessageCode::UnexpectedNode,
            path,
            location,
            format!(
                "Expected a `{}` node, found `{}`",
                expected.as_str(),
                found.unwrap_or("<untyped>")
            ),
        );
        false
    }

    fn require<'v>(
        &mut self,
        fields: &'v Fields<String, Value>,
        name: &'static str,
        path: &str,
        location: Option<Location>,
    ) -> Option<&'v Value> {
        let value = fields.get(name);
        if value.is_none() {
            self.missing(name, path, location);
        }
        value
    }

    fn string(
        &mut self,
        fields: &Fields<String, Value>,
        name: &'static str,
        path: &str,
        location: Option<Location>,
    ) -> Option<String> {
        let value = self.require(fields, name, path, location)?;
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.invalid(name, "a string", path, location);
                None
            }
        }
    }

    fn optional_string(
        &mut self,
        fields: &Fields<String, Value>,
        name: &'static str,
        path: &str,
        location: Option<Location>,
    ) {
        if fields
            .get(name)
            .is_some_and(|value| !value.is_null() && !value.is_string())
        {
            self.invalid(name, "a string", path, location);
        }
    }

    fn optional_bool(
        &mut self,
        fields: &Fields<String, Value>,
        name: &'static str,
        path: &str,
        location: Option<Location>,
    ) {
        if fields
            .get(name)
            .is_some_and(|value| !value.is_null() && !value.is_boolean())
        {
            self.invalid(name, "a boolean", path, location);
        }
    }

    fn array<'v>(
        &mut self,
        fields: &'v Fields<String, Value>,
        name: &'static str,
        path: &str,
        location: Option<Location>,
    ) -> Option<&'v Vec<Value>> {
        let value = self.require(fields, name, path, location)?;
        let array = value.as_array();
        if array.is_none() {
            self.invalid(name, "an array", path, location);
        }
        array
    }

    /// Required string field restricted to a closed set of names.
    fn tag(
        &mut self,
        fields: &Fields<String, Value>,
        name: &'static str,
        path: &str,
        location: Option<Location>,
        known: impl Fn(&str) -> bool,
    ) {
        if let Some(value) = self.string(fields, name, path, location) {
            if !known(&value) {
                self.invalid(name, "a known value", path, location);
            }
        }
    }

    fn optional_tag(
        &mut self,
        fields: &Fields<String, Value>,
        name: &'static str,
        path: &str,
        location: Option<Location>,
        known: impl Fn(&str) -> bool,
    ) {
        match fields.get(name) {
            None | Some(Value::Null) => {}
            Some(Value::String(value)) if known(value) => {}
            Some(_) => self.invalid(name, "a known value", path, location),
        }
    }

    fn missing(&mut self, field: &str, path: &str, location: Option<Location>) {
        self.error(
            MessageCode::MissingField,
            path,
            location,
            format!("Missing field `{}`", field),
        );
    }

    fn invalid(&mut self, field: &str, expected: &str, path: &str, location: Option<Location>) {
        self.error(
            MessageCode::InvalidField,
            path,
            location,
            format!("Field `{}` must be {}", field, expected),
        );
    }
}

/// Fields that hold child nodes or groups.
const CHILD_FIELDS: [&str; 10] = [
    "commands", "args", "values", "entries", "key", "value", "operator", "prefix", "index",
    "selector",
];

/// Compares every node's `location` and `text` with the source text.
struct LocationChecker<'s> {
    source: &'s str,
    source_len: usize,
    messages: Vec<Message>,
}

impl<'s> LocationChecker<'s> {
    fn new(source: &'s str) -> Self {
        LocationChecker {
            source,
            source_len: Location::source_len(source),
            messages: Vec::new(),
        }
    }

    fn visit(&mut self, value: &Value, path: &str) {
        match value {
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    self.visit(item, &index_path(path, i));
                }
            }
            Value::Object(fields) if !is_unknown_node(value) => {
                if fields.contains_key("type") {
                    self.check(fields, path);
                }
                for (name, child) in fields {
                    if CHILD_FIELDS.contains(&name.as_str()) {
                        self.visit(child, &field_path(path, name));
                    }
                }
            }
            _ => {}
        }
    }

    fn check(&mut self, fields: &Fields<String, Value>, path: &str) {
        let bound = |name: &str| {
            fields
                .get("location")
                .and_then(|location| location.get(name))
                .and_then(Value::as_u64)
                .and_then(|n| usize::try_from(n).ok())
        };
        let (Some(min), Some(max)) = (bound("min"), bound("max")) else {
            return;
        };
        let location = Location::new(min, max);
        let text = fields.get("text").and_then(Value::as_str).unwrap_or_default();
        if text.is_empty() && location == Location::default() {
            return;
        }

        if location.min > location.max {
            self.push(
                Severity::Error,
                MessageCode::InvertedLocation,
                path,
                location,
                format!("Location {}..{} is inverted", location.min, location.max),
            );
            return;
        }
        let slice = match location.slice(self.source) {
            Some(slice) if location.max <= self.source_len => slice,
            _ => {
                let text = format!(
                    "Location {}..{} does not fit a query of length {}",
                    location.min, location.max, self.source_len
                );
                self.push(
                    Severity::Error,
                    MessageCode::LocationOutOfBounds,
                    path,
                    location,
                    text,
                );
                return;
            }
        };
        if without_whitespace(slice) != without_whitespace(text) {
            let text = format!("Text `{}` does not match the source `{}`", text, slice);
            self.push(
                Severity::Warning,
                MessageCode::TextMismatch,
                path,
                location,
                text,
            );
        }
    }

    fn push(
        &mut self,
        severity: Severity,
        code: MessageCode,
        path: &str,
        location: Location,
        text: String,
    ) {
        log::trace!("{:?} {:?} at {}: {}", severity, code, path, text);
        self.messages.push(Message {
            severity,
            text,
            location: Some(location),
            code,
            path: path.to_string(),
        });
    }
}

fn without_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
