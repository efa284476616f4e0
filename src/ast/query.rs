use crate::ast::{Item, NodeMeta};

/// Root of a tree: the pipeline of commands.
///
/// The node name of a query is always empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    pub meta: NodeMeta,
    pub commands: Vec<Command>,
}

impl Query {
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands
            .iter()
            .find(|command| command.meta.name.eq_ignore_ascii_case(name))
    }
}

/// One pipeline stage: `FROM ...`, `WHERE ...`, `LOOKUP JOIN ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub meta: NodeMeta,
    /// Variant of the command, e.g. `lookup`, `left` or `right` for `JOIN`
    pub command_type: Option<String>,
    pub args: Vec<Item>,
}

impl Command {
    pub fn name(&self) -> &str {
        &self.meta.name
    }
}
