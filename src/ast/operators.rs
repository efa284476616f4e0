/// Secondary tag of a `function` node.
///
/// Calls and operators share the one node kind; the subtype recovers the
/// calling convention and the number of arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionSubtype {
    /// `fn(a, b, c, ...)`
    VariadicCall,
    /// `-a`, `+a`, `NOT a`
    UnaryExpression,
    /// `a IS NULL`, `a IS NOT NULL`
    PostfixUnaryExpression,
    /// `a + b`, `a == b`, `a AND b`, ...
    BinaryExpression,
}

/// Number of arguments a function subtype takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Variadic,
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => *n == count,
            Arity::Variadic => true,
        }
    }
}

impl FunctionSubtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionSubtype::VariadicCall => "variadic-call",
            FunctionSubtype::UnaryExpression => "unary-expression",
            FunctionSubtype::PostfixUnaryExpression => "postfix-unary-expression",
            FunctionSubtype::BinaryExpression => "binary-expression",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "variadic-call" => Some(FunctionSubtype::VariadicCall),
            "unary-expression" => Some(FunctionSubtype::UnaryExpression),
            "postfix-unary-expression" => Some(FunctionSubtype::PostfixUnaryExpression),
            "binary-expression" => Some(FunctionSubtype::BinaryExpression),
            _ => None,
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            FunctionSubtype::VariadicCall => Arity::Variadic,
            FunctionSubtype::UnaryExpression | FunctionSubtype::PostfixUnaryExpression => {
                Arity::Exact(1)
            }
            FunctionSubtype::BinaryExpression => Arity::Exact(2),
        }
    }
}

/// Families of binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorGroup {
    Arithmetic,
    Assignment,
    Comparison,
    Regex,
    Rename,
    Where,
    Match,
    In,
    Logical,
}

/// The closed set of binary operator names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,

    /// `=`
    Assign,

    // Comparison
    Equal,
    /// `=~`, case-insensitive equality
    EqualInsensitive,
    NotEqual,
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,

    // Regex
    Like,
    NotLike,
    Rlike,
    NotRlike,

    /// `as`
    Rename,
    /// `where`
    Where,
    /// `:`
    Match,

    In,
    NotIn,

    And,
    Or,
}

impl BinaryOperator {
    pub const ALL: [BinaryOperator; 24] = [
        BinaryOperator::Add,
        BinaryOperator::Subtract,
        BinaryOperator::Multiply,
        BinaryOperator::Divide,
        BinaryOperator::Modulo,
        BinaryOperator::Assign,
        BinaryOperator::Equal,
        BinaryOperator::EqualInsensitive,
        BinaryOperator::NotEqual,
        BinaryOperator::LessThan,
        BinaryOperator::LessEqual,
        BinaryOperator::GreaterThan,
        BinaryOperator::GreaterEqual,
        BinaryOperator::Like,
        BinaryOperator::NotLike,
        BinaryOperator::Rlike,
        BinaryOperator::NotRlike,
        BinaryOperator::Rename,
        BinaryOperator::Where,
        BinaryOperator::Match,
        BinaryOperator::In,
        BinaryOperator::NotIn,
        BinaryOperator::And,
        BinaryOperator::Or,
    ];

    /// Node name of the operator, as stored in `function` nodes.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Assign => "=",
            BinaryOperator::Equal => "==",
            BinaryOperator::EqualInsensitive => "=~",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::Like => "like",
            BinaryOperator::NotLike => "not like",
            BinaryOperator::Rlike => "rlike",
            BinaryOperator::NotRlike => "not rlike",
            BinaryOperator::Rename => "as",
            BinaryOperator::Where => "where",
            BinaryOperator::Match => ":",
            BinaryOperator::In => "in",
            BinaryOperator::NotIn => "not in",
            BinaryOperator::And => "and",
            BinaryOperator::Or => "or",
        }
    }

    /// Looks an operator up by node name. Keyword operators match
    /// case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        BinaryOperator::ALL
            .into_iter()
            .find(|op| op.as_str() == name)
    }

    pub fn group(&self) -> OperatorGroup {
        use BinaryOperator::*;
        match self {
            Add | Subtract | Multiply | Divide | Modulo => OperatorGroup::Arithmetic,
            Assign => OperatorGroup::Assignment,
            Equal | EqualInsensitive | NotEqual | LessThan | LessEqual | GreaterThan
            | GreaterEqual => OperatorGroup::Comparison,
            Like | NotLike | Rlike | NotRlike => OperatorGroup::Regex,
            Rename => OperatorGroup::Rename,
            Where => OperatorGroup::Where,
            Match => OperatorGroup::Match,
            In | NotIn => OperatorGroup::In,
            And | Or => OperatorGroup::Logical,
        }
    }

    /// Binding power; higher binds tighter.
    pub fn precedence(&self) -> u8 {
        use BinaryOperator::*;
        match self {
            Assign | Rename | Where => 1,
            Or => 2,
            And => 3,
            Equal | EqualInsensitive | NotEqual | LessThan | LessEqual | GreaterThan
            | GreaterEqual | Like | NotLike | Rlike | NotRlike | In | NotIn | Match => 5,
            Add | Subtract => 6,
            Multiply | Divide | Modulo => 7,
        }
    }

    /// Whether the operator is spelled with letters (`and`, `not like`, ...).
    pub fn is_keyword(&self) -> bool {
        self.as_str().starts_with(|c: char| c.is_ascii_alphabetic())
    }
}

/// Binding power of prefix `NOT`, between `AND` and the comparisons.
pub const NOT_PRECEDENCE: u8 = 4;

/// Binding power of prefix `-`/`+` and postfix `IS [NOT] NULL`.
pub const UNARY_PRECEDENCE: u8 = 8;

/// Target types of `value::type` inline casts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastType {
    Bool,
    Boolean,
    CartesianPoint,
    CartesianShape,
    DateNanos,
    DatePeriod,
    Datetime,
    Double,
    GeoPoint,
    GeoShape,
    Int,
    Integer,
    Ip,
    Keyword,
    Long,
    String,
    Text,
    TimeDuration,
    UnsignedLong,
    Version,
}

impl CastType {
    pub const ALL: [CastType; 20] = [
        CastType::Bool,
        CastType::Boolean,
        CastType::CartesianPoint,
        CastType::CartesianShape,
        CastType::DateNanos,
        CastType::DatePeriod,
        CastType::Datetime,
        CastType::Double,
        CastType::GeoPoint,
        CastType::GeoShape,
        CastType::Int,
        CastType::Integer,
        CastType::Ip,
        CastType::Keyword,
        CastType::Long,
        CastType::String,
        CastType::Text,
        CastType::TimeDuration,
        CastType::UnsignedLong,
        CastType::Version,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CastType::Bool => "bool",
            CastType::Boolean => "boolean",
            CastType::CartesianPoint => "cartesian_point",
            CastType::CartesianShape => "cartesian_shape",
            CastType::DateNanos => "date_nanos",
            CastType::DatePeriod => "date_period",
            CastType::Datetime => "datetime",
            CastType::Double => "double",
            CastType::GeoPoint => "geo_point",
            CastType::GeoShape => "geo_shape",
            CastType::Int => "int",
            CastType::Integer => "integer",
            CastType::Ip => "ip",
            CastType::Keyword => "keyword",
            CastType::Long => "long",
            CastType::String => "string",
            CastType::Text => "text",
            CastType::TimeDuration => "time_duration",
            CastType::UnsignedLong => "unsigned_long",
            CastType::Version => "version",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        CastType::ALL.into_iter().find(|ty| ty.as_str() == name)
    }
}
