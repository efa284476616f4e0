use crate::ast::NodeMeta;

/// `literalType` tag of a `literal` node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralType {
    Double,
    Integer,
    Boolean,
    Null,
    /// String literal. The tag name is historical.
    Keyword,
    Param,
}

impl LiteralType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LiteralType::Double => "double",
            LiteralType::Integer => "integer",
            LiteralType::Boolean => "boolean",
            LiteralType::Null => "null",
            LiteralType::Keyword => "keyword",
            LiteralType::Param => "param",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "double" => Some(LiteralType::Double),
            "integer" => Some(LiteralType::Integer),
            "boolean" => Some(LiteralType::Boolean),
            "null" => Some(LiteralType::Null),
            "keyword" => Some(LiteralType::Keyword),
            "param" => Some(LiteralType::Param),
            _ => None,
        }
    }
}

/// Literal node. The shape of the value follows the literal type.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub meta: NodeMeta,
    pub value: LiteralValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Any number written with a fraction or exponent, e.g. `32.12`
    Double(f64),
    Integer(i64),
    Boolean(bool),
    Null,
    Keyword {
        /// Value as written, quotes included
        value: String,
        /// Value with quotes and escapes removed
        value_unquoted: String,
        /// Written without any quotes (cluster and selector parts of a source)
        unquoted: bool,
    },
    Param(Param),
}

impl LiteralValue {
    pub fn literal_type(&self) -> LiteralType {
        match self {
            LiteralValue::Double(_) => LiteralType::Double,
            LiteralValue::Integer(_) => LiteralType::Integer,
            LiteralValue::Boolean(_) => LiteralType::Boolean,
            LiteralValue::Null => LiteralType::Null,
            LiteralValue::Keyword { .. } => LiteralType::Keyword,
            LiteralValue::Param(_) => LiteralType::Param,
        }
    }
}

impl Literal {
    pub fn literal_type(&self) -> LiteralType {
        self.value.literal_type()
    }

    pub fn param(&self) -> Option<&Param> {
        match &self.value {
            LiteralValue::Param(param) => Some(param),
            _ => None,
        }
    }

    /// The unquoted value of a string literal.
    pub fn string_value(&self) -> Option<&str> {
        match &self.value {
            LiteralValue::Keyword { value_unquoted, .. } => Some(value_unquoted),
            _ => None,
        }
    }

    /// `?name` or `??name`
    pub fn is_named_param(&self) -> bool {
        matches!(
            &self.value,
            LiteralValue::Param(Param {
                param_type: ParamType::Named(_),
                ..
            })
        )
    }
}

/// `?` is a value parameter, `??` a parameter standing in for an
/// identifier or function name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Single,
    Double,
}

impl ParamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::Single => "?",
            ParamKind::Double => "??",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "?" => Some(ParamKind::Single),
            "??" => Some(ParamKind::Double),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// `?`
    Unnamed,
    /// `?name`
    Named(String),
    /// `?1`
    Positional(u32),
}

impl ParamType {
    /// `paramType` tag on the wire.
    pub fn tag(&self) -> &'static str {
        match self {
            ParamType::Unnamed => "unnamed",
            ParamType::Named(_) => "named",
            ParamType::Positional(_) => "positional",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    pub kind: ParamKind,
    pub param_type: ParamType,
}
