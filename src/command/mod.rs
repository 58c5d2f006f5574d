mod commands;
mod context;
mod history;

use crate::document::FormTree;
use crate::event::FormEvent;

pub use commands::Command;
pub use context::CommandContext;
pub use history::{CommandHistory, DEFAULT_HISTORY_LIMIT};

/// The tree a command produced and the event describing the change
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub tree: FormTree,
    pub event: FormEvent,
}

/// `None` when the command left the tree unchanged
pub type CommandResult = Option<Applied>;
