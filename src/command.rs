//! Commands: discrete, undoable units of work over a [`Model`].
//!
//! A command is constructed from already-parsed values, validated against the
//! live state and then applied with exactly one model mutation. Validation
//! always happens before mutation, so a failed command leaves the model and
//! its history untouched.

use tracing::instrument;

use crate::{
    Model,
    domain::{Index, Name, history, unique_list},
};

/// Contact commands.
pub mod contact;
/// Undo and redo.
pub mod history_ops;
/// Task commands.
pub mod task;

pub use history_ops::{Redo, Undo};

/// The outcome of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Human-readable summary of what happened.
    pub message: String,

    /// Whether the displayed lists should be reset to show everything.
    pub show_all: bool,
}

impl CommandResult {
    /// A result carrying just a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            show_all: false,
        }
    }

    /// Requests that the filters be reset to show every entity.
    #[must_use]
    pub const fn with_show_all(mut self) -> Self {
        self.show_all = true;
        self
    }
}

/// Errors returned by commands.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The change would violate a uniqueness rule, or its target is missing.
    #[error(transparent)]
    Book(#[from] unique_list::Error),

    /// Undo or redo went past the end of the history.
    #[error(transparent)]
    History(#[from] history::Error),

    /// The index does not refer to a displayed entry.
    #[error("the {kind} index {index} is invalid: {len} {kind}(s) displayed")]
    InvalidIndex {
        /// The kind of entity the index refers to.
        kind: &'static str,
        /// The index given.
        index: Index,
        /// How many entries are displayed.
        len: usize,
    },

    /// A task named a contact that does not exist.
    #[error("there is no contact named '{0}'")]
    ReferencedEntityMissing(Name),

    /// A command-specific precondition was not met.
    #[error("{0}")]
    ValidationFailure(String),
}

/// Resolves `index` against a displayed list.
pub(crate) fn resolve<'a, T>(
    kind: &'static str,
    index: Index,
    displayed: &[&'a T],
) -> Result<&'a T, Error> {
    index.get(displayed).copied().ok_or(Error::InvalidIndex {
        kind,
        index,
        len: displayed.len(),
    })
}

/// Every command the task book understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a contact.
    AddContact(contact::Add),
    /// Delete a displayed contact.
    DeleteContact(contact::Delete),
    /// Edit a displayed contact.
    EditContact(contact::Edit),
    /// Show all contacts.
    ListContacts(contact::List),
    /// Show contacts whose names contain a keyword.
    FindContacts(contact::Find),
    /// Add a deadline.
    AddDeadline(task::AddDeadline),
    /// Add an event.
    AddEvent(task::AddEvent),
    /// Delete a displayed task.
    DeleteTask(task::Delete),
    /// Mark a displayed task as done.
    MarkTask(task::Mark),
    /// Mark a displayed task as not done.
    UnmarkTask(task::Unmark),
    /// Edit a displayed task.
    EditTask(task::Edit),
    /// Show all tasks.
    ListTasks(task::List),
    /// Show tasks whose descriptions contain a keyword.
    FindTasks(task::Find),
    /// Revert to the previous state.
    Undo(Undo),
    /// Reapply an undone state.
    Redo(Redo),
}

impl Command {
    /// Runs the command against `model`.
    ///
    /// If the result asks for it, the model's filters are reset afterwards.
    ///
    /// # Errors
    ///
    /// Returns the command's error. The model is unchanged when this fails.
    #[instrument(level = "debug", skip(model))]
    pub fn execute(self, model: &mut Model) -> Result<CommandResult, Error> {
        let result = match self {
            Self::AddContact(command) => command.execute(model),
            Self::DeleteContact(command) => command.execute(model),
            Self::EditContact(command) => command.execute(model),
            Self::ListContacts(command) => Ok(command.execute(model)),
            Self::FindContacts(command) => Ok(command.execute(model)),
            Self::AddDeadline(command) => command.execute(model),
            Self::AddEvent(command) => command.execute(model),
            Self::DeleteTask(command) => command.execute(model),
            Self::MarkTask(command) => command.execute(model),
            Self::UnmarkTask(command) => command.execute(model),
            Self::EditTask(command) => command.execute(model),
            Self::ListTasks(command) => Ok(command.execute(model)),
            Self::FindTasks(command) => Ok(command.execute(model)),
            Self::Undo(command) => command.execute(model),
            Self::Redo(command) => command.execute(model),
        }
        .inspect_err(|e| tracing::debug!("command failed: {e}"))?;

        if result.show_all {
            model.show_all();
        }

        Ok(result)
    }

    /// Whether a successful run changes the task book.
    ///
    /// Undo and redo count: they replace the live state.
    #[must_use]
    pub const fn is_mutating(&self) -> bool {
        !matches!(
            self,
            Self::ListContacts(_) | Self::FindContacts(_) | Self::ListTasks(_) | Self::FindTasks(_)
        )
    }
}

macro_rules! impl_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Command {
                fn from(command: $ty) -> Self {
                    Self::$variant(command)
                }
            }
        )*
    };
}

impl_from!(
    AddContact(contact::Add),
    DeleteContact(contact::Delete),
    EditContact(contact::Edit),
    ListContacts(contact::List),
    FindContacts(contact::Find),
    AddDeadline(task::AddDeadline),
    AddEvent(task::AddEvent),
    DeleteTask(task::Delete),
    MarkTask(task::Mark),
    UnmarkTask(task::Unmark),
    EditTask(task::Edit),
    ListTasks(task::List),
    FindTasks(task::Find),
    Undo(Undo),
    Redo(Redo),
);
