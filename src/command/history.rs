use super::Command;
use crate::document::FormTree;

pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Undo/redo of tree snapshots.
///
/// Each entry pairs a command with the tree on the other side of it, so
/// undoing never has to compute an inverse.
#[derive(Debug)]
pub struct CommandHistory {
    /// Commands paired with the tree before they ran
    undo_stack: Vec<(Command, FormTree)>,
    /// Undone commands paired with the tree after they ran
    redo_stack: Vec<(Command, FormTree)>,
    limit: usize,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// A limit of zero disables history.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit,
        }
    }

    /// Record an applied command together with the tree it replaced
    pub fn record(&mut self, command: Command, before: FormTree) {
        if self.limit == 0 {
            return;
        }
        self.undo_stack.push((command, before));
        if self.undo_stack.len() > self.limit {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear(); // a new command invalidates redo
    }

    /// Pop the last command, returning the tree to restore
    pub fn undo(&mut self, current: &FormTree) -> Option<FormTree> {
        let (command, before) = self.undo_stack.pop()?;
        self.redo_stack.push((command, current.clone()));
        Some(before)
    }

    /// Re-apply the last undone command, returning the tree to restore
    pub fn redo(&mut self, current: &FormTree) -> Option<FormTree> {
        let (command, after) = self.redo_stack.pop()?;
        self.undo_stack.push((command, current.clone()));
        Some(after)
    }

    /// The command the next undo would revert
    pub fn last_command(&self) -> Option<&Command> {
        self.undo_stack.last().map(|(command, _)| command)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
