//! Undo/redo history

use super::EditCommand;

/// Ordered list of executed commands plus a cursor splitting applied
/// commands (before the cursor) from redoable ones (after it)
#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    commands: Vec<EditCommand>,
    applied: usize,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an already executed command, dropping every redoable entry
    ///
    /// Returns how many redo entries were discarded.
    pub fn push(&mut self, command: EditCommand) -> usize {
        let discarded = self.commands.len() - self.applied;
        self.commands.truncate(self.applied);
        self.commands.push(command);
        self.applied += 1;
        discarded
    }

    /// Move the cursor back one step and return the command to revert
    pub fn step_back(&mut self) -> Option<&mut EditCommand> {
        if self.applied == 0 {
            return None;
        }
        self.applied -= 1;
        self.commands.get_mut(self.applied)
    }

    /// Move the cursor forward one step and return the command to re-execute
    pub fn step_forward(&mut self) -> Option<&mut EditCommand> {
        if self.applied >= self.commands.len() {
            return None;
        }
        self.applied += 1;
        self.commands.get_mut(self.applied - 1)
    }

    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    pub fn can_redo(&self) -> bool {
        self.applied < self.commands.len()
    }

    /// Number of commands currently applied
    pub fn applied(&self) -> usize {
        self.applied
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Description of the command `undo` would revert
    pub fn undo_description(&self) -> Option<&'static str> {
        self.applied
            .checked_sub(1)
            .and_then(|i| self.commands.get(i))
            .map(EditCommand::description)
    }

    /// Description of the command `redo` would re-apply
    pub fn redo_description(&self) -> Option<&'static str> {
        self.commands.get(self.applied).map(EditCommand::description)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.applied = 0;
    }
}
