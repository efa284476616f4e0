use serde::{Deserialize, Serialize};

/// Range `[min, max)` of a node in the query text it was parsed from.
///
/// Offsets count UTF-16 code units, the way editors and JavaScript-hosted
/// parsers index strings. For ASCII text they equal byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Location {
    pub min: usize,
    pub max: usize,
}

impl Location {
    pub fn new(min: usize, max: usize) -> Self {
        Location { min, max }
    }

    pub fn len(&self) -> usize {
        self.max.saturating_sub(self.min)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `other` lies entirely inside this range.
    pub fn contains(&self, other: &Location) -> bool {
        self.min <= other.min && other.max <= self.max
    }

    /// Smallest range covering both.
    pub fn merge(&self, other: &Location) -> Location {
        Location {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// The source text this range points at, or `None` when the range is
    /// inverted or ends past `source`.
    ///
    /// An offset inside a surrogate pair widens the slice to the whole char.
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        if self.min > self.max {
            return None;
        }
        let start = byte_offset(source, self.min, false)?;
        let end = byte_offset(source, self.max, true)?;
        source.get(start..end)
    }

    /// Length of `source` in the units locations are measured in.
    pub fn source_len(source: &str) -> usize {
        source.encode_utf16().count()
    }
}

fn byte_offset(source: &str, units: usize, round_up: bool) -> Option<usize> {
    let mut seen = 0;
    for (byte, c) in source.char_indices() {
        if seen == units {
            return Some(byte);
        }
        let width = c.len_utf16();
        if seen + width > units {
            return Some(if round_up { byte + c.len_utf8() } else { byte });
        }
        seen += width;
    }
    (seen == units).then_some(source.len())
}

/// Non-semantic data attached to nodes by a pretty printer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Formatting {
    /// Comments on the lines above the node
    pub top: Vec<Comment>,
    /// Inline comments before the node
    pub left: Vec<Comment>,
    /// Inline comments after the node
    pub right: Vec<Comment>,
    /// A `//` comment closing the node's line
    pub right_single_line: Option<Comment>,
    /// Comments on the lines below the node
    pub bottom: Vec<Comment>,
}

impl Formatting {
    pub fn is_empty(&self) -> bool {
        self.top.is_empty()
            && self.left.is_empty()
            && self.right.is_empty()
            && self.right_single_line.is_none()
            && self.bottom.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKind {
    /// `// ...`
    SingleLine,
    /// `/* ... */`
    MultiLine,
}

impl CommentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentKind::SingleLine => "single-line",
            CommentKind::MultiLine => "multi-line",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "single-line" => Some(CommentKind::SingleLine),
            "multi-line" => Some(CommentKind::MultiLine),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub kind: CommentKind,
    /// Comment body without the `//` or `/* */` markers
    pub text: String,
    pub location: Option<Location>,
}

impl Comment {
    pub fn single_line(text: impl Into<String>) -> Self {
        Comment {
            kind: CommentKind::SingleLine,
            text: text.into(),
            location: None,
        }
    }

    pub fn multi_line(text: impl Into<String>) -> Self {
        Comment {
            kind: CommentKind::MultiLine,
            text: text.into(),
            location: None,
        }
    }
}

/// Fields shared by every proper node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeMeta {
    pub name: String,
    /// Raw source text of the node
    pub text: String,
    pub location: Location,
    /// Set by the parser when the node was recovered from partial input
    pub incomplete: bool,
    pub formatting: Option<Formatting>,
}

impl NodeMeta {
    pub fn new(name: impl Into<String>, text: impl Into<String>, location: Location) -> Self {
        NodeMeta {
            name: name.into(),
            text: text.into(),
            location,
            incomplete: false,
            formatting: None,
        }
    }

    /// Meta for a node that was not parsed from any text.
    pub fn synthetic(name: impl Into<String>) -> Self {
        NodeMeta::new(name, "", Location::default())
    }
}
