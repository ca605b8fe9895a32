use tracing::instrument;

use crate::{
    Model,
    command::{CommandResult, Error},
    domain::history,
};

/// Reverts the task book to the state before the last change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Undo;

impl Undo {
    /// Runs the command.
    ///
    /// The result asks for all filters to be cleared, so entities brought
    /// back by the undo are not hidden.
    ///
    /// # Errors
    ///
    /// Fails if there is nothing to undo.
    #[instrument(level = "debug", skip(model))]
    pub fn execute(self, model: &mut Model) -> Result<CommandResult, Error> {
        if !model.can_undo() {
            return Err(history::Error::NoUndoableState.into());
        }

        model.undo()?;
        Ok(CommandResult::new("Reverted to the previous state.").with_show_all())
    }
}

/// Reapplies the most recently undone change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Redo;

impl Redo {
    /// Runs the command.
    ///
    /// # Errors
    ///
    /// Fails if there is nothing to redo.
    #[instrument(level = "debug", skip(model))]
    pub fn execute(self, model: &mut Model) -> Result<CommandResult, Error> {
        if !model.can_redo() {
            return Err(history::Error::NoRedoableState.into());
        }

        model.redo()?;
        Ok(CommandResult::new("Restored the next state.").with_show_all())
    }
}
