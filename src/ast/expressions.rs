use crate::ast::{
    Arity, BinaryOperator, CastType, FunctionSubtype, Literal, NodeMeta, Query,
};

/// The closed set of node `type` tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Command,
    Option,
    Query,
    Function,
    Order,
    InlineCast,
    Unknown,
    TimeInterval,
    Source,
    Column,
    List,
    Map,
    MapEntry,
    Literal,
    Identifier,
}

impl NodeType {
    pub const ALL: [NodeType; 15] = [
        NodeType::Command,
        NodeType::Option,
        NodeType::Query,
        NodeType::Function,
        NodeType::Order,
        NodeType::InlineCast,
        NodeType::Unknown,
        NodeType::TimeInterval,
        NodeType::Source,
        NodeType::Column,
        NodeType::List,
        NodeType::Map,
        NodeType::MapEntry,
        NodeType::Literal,
        NodeType::Identifier,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Command => "command",
            NodeType::Option => "option",
            NodeType::Query => "query",
            NodeType::Function => "function",
            NodeType::Order => "order",
            NodeType::InlineCast => "inlineCast",
            NodeType::Unknown => "unknown",
            NodeType::TimeInterval => "timeInterval",
            NodeType::Source => "source",
            NodeType::Column => "column",
            NodeType::List => "list",
            NodeType::Map => "map",
            NodeType::MapEntry => "map-entry",
            NodeType::Literal => "literal",
            NodeType::Identifier => "identifier",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        NodeType::ALL.into_iter().find(|ty| ty.as_str() == name)
    }
}

/// An argument position in a command, option or function.
///
/// `Group` is an implicit grouping of several items (for example the
/// assignment list of a command). It has no tag and no location of its own.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Expr(Expr),
    Group(Vec<Item>),
}

impl Item {
    pub fn as_expr(&self) -> Option<&Expr> {
        match self {
            Item::Expr(expr) => Some(expr),
            Item::Group(_) => None,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Item::Group(_))
    }
}

impl From<Expr> for Item {
    fn from(expr: Expr) -> Self {
        Item::Expr(expr)
    }
}

/// Every proper node that can appear below a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Nested query
    Query(Box<Query>),
    Function(Function),
    Option(CommandOption),
    Source(Source),
    Column(Column),
    TimeInterval(TimeInterval),
    List(List),
    Literal(Literal),
    Identifier(Identifier),
    InlineCast(InlineCast),
    Order(Order),
    /// Something the tree producer did not recognise. Consumers skip it.
    Unknown(Unknown),
    Map(Map),
    MapEntry(MapEntry),
}

impl Expr {
    pub fn meta(&self) -> &NodeMeta {
        match self {
            Expr::Query(node) => &node.meta,
            Expr::Function(node) => &node.meta,
            Expr::Option(node) => &node.meta,
            Expr::Source(node) => &node.meta,
            Expr::Column(node) => &node.meta,
            Expr::TimeInterval(node) => &node.meta,
            Expr::List(node) => &node.meta,
            Expr::Literal(node) => &node.meta,
            Expr::Identifier(node) => &node.meta,
            Expr::InlineCast(node) => &node.meta,
            Expr::Order(node) => &node.meta,
            Expr::Unknown(node) => &node.meta,
            Expr::Map(node) => &node.meta,
            Expr::MapEntry(node) => &node.meta,
        }
    }

    pub fn meta_mut(&mut self) -> &mut NodeMeta {
        match self {
            Expr::Query(node) => &mut node.meta,
            Expr::Function(node) => &mut node.meta,
            Expr::Option(node) => &mut node.meta,
            Expr::Source(node) => &mut node.meta,
            Expr::Column(node) => &mut node.meta,
            Expr::TimeInterval(node) => &mut node.meta,
            Expr::List(node) => &mut node.meta,
            Expr::Literal(node) => &mut node.meta,
            Expr::Identifier(node) => &mut node.meta,
            Expr::InlineCast(node) => &mut node.meta,
            Expr::Order(node) => &mut node.meta,
            Expr::Unknown(node) => &mut node.meta,
            Expr::Map(node) => &mut node.meta,
            Expr::MapEntry(node) => &mut node.meta,
        }
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            Expr::Query(_) => NodeType::Query,
            Expr::Function(_) => NodeType::Function,
            Expr::Option(_) => NodeType::Option,
            Expr::Source(_) => NodeType::Source,
            Expr::Column(_) => NodeType::Column,
            Expr::TimeInterval(_) => NodeType::TimeInterval,
            Expr::List(_) => NodeType::List,
            Expr::Literal(_) => NodeType::Literal,
            Expr::Identifier(_) => NodeType::Identifier,
            Expr::InlineCast(_) => NodeType::InlineCast,
            Expr::Order(_) => NodeType::Order,
            Expr::Unknown(_) => NodeType::Unknown,
            Expr::Map(_) => NodeType::Map,
            Expr::MapEntry(_) => NodeType::MapEntry,
        }
    }

    pub fn name(&self) -> &str {
        &self.meta().name
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Expr::Function(_))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Expr::Unknown(_))
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Expr::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Expr::Literal(literal) => Some(literal),
            _ => None,
        }
    }
}

/// Named argument list that follows a command's main arguments,
/// e.g. `BY host` in `STATS count = COUNT(*) BY host`.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOption {
    pub meta: NodeMeta,
    pub args: Vec<Item>,
}

/// What is being called: a plain name, or a `??` parameter in place of it.
#[derive(Debug, Clone, PartialEq)]
pub enum Callee {
    Identifier(Identifier),
    Param(Literal),
}

/// Function calls and every operator application.
///
/// The node `name` is the function name or the operator (`+`, `not like`,
/// `is null`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub meta: NodeMeta,
    pub operator: Option<Callee>,
    pub kind: FunctionKind,
}

/// Arguments of a [`Function`], shaped by its subtype so the argument count
/// of operators cannot be wrong.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionKind {
    VariadicCall(Vec<Item>),
    Unary(Box<Item>),
    PostfixUnary(Box<Item>),
    Binary(Box<[Item; 2]>),
}

impl FunctionKind {
    pub fn subtype(&self) -> FunctionSubtype {
        match self {
            FunctionKind::VariadicCall(_) => FunctionSubtype::VariadicCall,
            FunctionKind::Unary(_) => FunctionSubtype::UnaryExpression,
            FunctionKind::PostfixUnary(_) => FunctionSubtype::PostfixUnaryExpression,
            FunctionKind::Binary(_) => FunctionSubtype::BinaryExpression,
        }
    }

    pub fn args(&self) -> &[Item] {
        match self {
            FunctionKind::VariadicCall(args) => args,
            FunctionKind::Unary(arg) | FunctionKind::PostfixUnary(arg) => {
                std::slice::from_ref(arg.as_ref())
            }
            FunctionKind::Binary(args) => args.as_slice(),
        }
    }
}

impl Function {
    pub fn subtype(&self) -> FunctionSubtype {
        self.kind.subtype()
    }

    pub fn args(&self) -> &[Item] {
        self.kind.args()
    }

    pub fn arity(&self) -> Arity {
        self.subtype().arity()
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    /// The operator of a binary expression.
    pub fn binary_operator(&self) -> Option<BinaryOperator> {
        match self.kind {
            FunctionKind::Binary(_) => BinaryOperator::from_name(&self.meta.name),
            _ => None,
        }
    }

    /// Left and right operand of a binary expression.
    pub fn operands(&self) -> Option<(&Item, &Item)> {
        match &self.kind {
            FunctionKind::Binary(args) => Some((&args[0], &args[1])),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Unspecified,
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Unspecified => "",
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "" => Some(SortOrder::Unspecified),
            "ASC" => Some(SortOrder::Asc),
            "DESC" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NullsOrder {
    #[default]
    Unspecified,
    First,
    Last,
}

impl NullsOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            NullsOrder::Unspecified => "",
            NullsOrder::First => "NULLS FIRST",
            NullsOrder::Last => "NULLS LAST",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "" => Some(NullsOrder::Unspecified),
            "NULLS FIRST" => Some(NullsOrder::First),
            "NULLS LAST" => Some(NullsOrder::Last),
            _ => None,
        }
    }
}

/// Sort key of a `SORT` command: `field ASC NULLS FIRST`.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub meta: NodeMeta,
    pub order: SortOrder,
    pub nulls: NullsOrder,
    pub field: Box<Item>,
}

/// `value::type`
#[derive(Debug, Clone, PartialEq)]
pub struct InlineCast {
    pub meta: NodeMeta,
    pub value: Box<Item>,
    pub cast_type: CastType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unknown {
    pub meta: NodeMeta,
}

/// `1 hour`, `30 minutes`
#[derive(Debug, Clone, PartialEq)]
pub struct TimeInterval {
    pub meta: NodeMeta,
    pub unit: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceType {
    Index,
    Policy,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Index => "index",
            SourceType::Policy => "policy",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "index" => Some(SourceType::Index),
            "policy" => Some(SourceType::Policy),
            _ => None,
        }
    }
}

/// Index pattern or enrich policy: `[prefix:]index[::selector]`.
///
/// The three parts are string literals. `prefix` is the remote cluster of
/// an index, or the mode of an enrich policy.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub meta: NodeMeta,
    pub source_type: SourceType,
    pub prefix: Option<Literal>,
    pub index: Option<Literal>,
    pub selector: Option<Literal>,
}

/// One dot-separated part of a column name.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnPart {
    Identifier(Identifier),
    Param(Literal),
}

/// Column reference such as ``a.b.`c d`.?param``.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub meta: NodeMeta,
    pub args: Vec<ColumnPart>,
    /// Unquoted name parts
    pub parts: Vec<String>,
    /// Whether any part was quoted. `parts` is authoritative.
    pub quoted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ListSubtype {
    /// `[1, 2, 3]`
    #[default]
    Literal,
    /// `("abc", "def")`, right side of `IN`
    Tuple,
}

impl ListSubtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListSubtype::Literal => "literal",
            ListSubtype::Tuple => "tuple",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "literal" => Some(ListSubtype::Literal),
            "tuple" => Some(ListSubtype::Tuple),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct List {
    pub meta: NodeMeta,
    pub subtype: ListSubtype,
    pub values: Vec<Expr>,
}

/// `{"key": value, ...}`, usually the last argument of a function.
#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    pub meta: NodeMeta,
    pub entries: Vec<MapEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
    pub meta: NodeMeta,
    /// String literal key
    pub key: Literal,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub meta: NodeMeta,
}

impl Identifier {
    pub fn name(&self) -> &str {
        &self.meta.name
    }
}
