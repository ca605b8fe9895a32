use chrono::NaiveDate;
use nonempty::NonEmpty;
use tracing::instrument;

use crate::{
    Model,
    command::{CommandResult, Error, resolve},
    domain::{Assignment, Description, Index, Name, Task, TaskChanges, unique_list},
    model::Predicate,
};

const KIND: &str = "task";

/// Fails unless `name` belongs to an existing contact.
fn check_contact_exists(model: &Model, name: &Name) -> Result<(), Error> {
    if model.find_contact(name).is_none() {
        return Err(Error::ReferencedEntityMissing(name.clone()));
    }
    Ok(())
}

/// Validates and adds a freshly built task.
fn add_task(model: &mut Model, task: Task, label: &str) -> Result<CommandResult, Error> {
    check_contact_exists(model, task.name())?;
    if model.has_task(&task) {
        return Err(unique_list::Error::DuplicateEntity(KIND).into());
    }

    let message = format!("New {label} added: {task}");
    model.add_task(task)?;
    Ok(CommandResult::new(message))
}

/// Adds a deadline linked to an existing contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddDeadline {
    name: Name,
    assignment: Assignment,
    description: Description,
    date: NaiveDate,
}

impl AddDeadline {
    /// Creates the command.
    #[must_use]
    pub const fn new(
        name: Name,
        assignment: Assignment,
        description: Description,
        date: NaiveDate,
    ) -> Self {
        Self {
            name,
            assignment,
            description,
            date,
        }
    }

    /// Runs the command.
    ///
    /// # Errors
    ///
    /// - [`Error::ReferencedEntityMissing`] if no contact has the given name
    /// - [`Error::Book`] if the same deadline already exists
    #[instrument(level = "debug", skip(model))]
    pub fn execute(self, model: &mut Model) -> Result<CommandResult, Error> {
        let task = Task::deadline(self.name, self.assignment, self.description, self.date);
        add_task(model, task, "deadline")
    }
}

/// Adds an event linked to an existing contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddEvent {
    name: Name,
    assignment: Assignment,
    description: Description,
    date: NaiveDate,
}

impl AddEvent {
    /// Creates the command.
    #[must_use]
    pub const fn new(
        name: Name,
        assignment: Assignment,
        description: Description,
        date: NaiveDate,
    ) -> Self {
        Self {
            name,
            assignment,
            description,
            date,
        }
    }

    /// Runs the command.
    ///
    /// # Errors
    ///
    /// - [`Error::ReferencedEntityMissing`] if no contact has the given name
    /// - [`Error::Book`] if the same event already exists
    #[instrument(level = "debug", skip(model))]
    pub fn execute(self, model: &mut Model) -> Result<CommandResult, Error> {
        let task = Task::event(self.name, self.assignment, self.description, self.date);
        add_task(model, task, "event")
    }
}

/// Deletes a task by its position in the displayed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delete {
    index: Index,
}

impl Delete {
    /// Creates the command.
    #[must_use]
    pub const fn new(index: Index) -> Self {
        Self { index }
    }

    /// Runs the command.
    ///
    /// # Errors
    ///
    /// Fails if the index is outside the displayed list.
    #[instrument(level = "debug", skip(model))]
    pub fn execute(self, model: &mut Model) -> Result<CommandResult, Error> {
        let target = resolve(KIND, self.index, &model.filtered_tasks())?.clone();

        model.remove_task(&target)?;
        Ok(CommandResult::new(format!("Deleted task: {target}")))
    }
}

fn set_done(model: &mut Model, index: Index, done: bool) -> Result<CommandResult, Error> {
    let target = resolve(KIND, index, &model.filtered_tasks())?.clone();
    if target.is_done() == done {
        let state = if done { "done" } else { "not done" };
        return Err(Error::ValidationFailure(format!(
            "task {index} is already marked as {state}"
        )));
    }

    let edited = target.clone().with_done(done);
    let verb = if done { "Marked" } else { "Unmarked" };
    let message = format!("{verb} task: {edited}");
    model.set_task(&target, edited)?;
    Ok(CommandResult::new(message))
}

/// Marks a displayed task as done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mark {
    index: Index,
}

impl Mark {
    /// Creates the command.
    #[must_use]
    pub const fn new(index: Index) -> Self {
        Self { index }
    }

    /// Runs the command.
    ///
    /// # Errors
    ///
    /// Fails if the index is outside the displayed list or the task is
    /// already done.
    #[instrument(level = "debug", skip(model))]
    pub fn execute(self, model: &mut Model) -> Result<CommandResult, Error> {
        set_done(model, self.index, true)
    }
}

/// Marks a displayed task as not done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unmark {
    index: Index,
}

impl Unmark {
    /// Creates the command.
    #[must_use]
    pub const fn new(index: Index) -> Self {
        Self { index }
    }

    /// Runs the command.
    ///
    /// # Errors
    ///
    /// Fails if the index is outside the displayed list or the task is not
    /// done.
    #[instrument(level = "debug", skip(model))]
    pub fn execute(self, model: &mut Model) -> Result<CommandResult, Error> {
        set_done(model, self.index, false)
    }
}

/// Edits a displayed task.
///
/// The kind (deadline or event) and completion flag are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    index: Index,
    changes: TaskChanges,
}

impl Edit {
    /// Creates the command.
    #[must_use]
    pub const fn new(index: Index, changes: TaskChanges) -> Self {
        Self { index, changes }
    }

    /// Runs the command.
    ///
    /// # Errors
    ///
    /// - [`Error::ValidationFailure`] if no field is being changed
    /// - [`Error::InvalidIndex`] if the index is outside the displayed list
    /// - [`Error::ReferencedEntityMissing`] if the new contact does not exist
    /// - [`Error::Book`] if the edit duplicates another task
    #[instrument(level = "debug", skip(model))]
    pub fn execute(self, model: &mut Model) -> Result<CommandResult, Error> {
        if self.changes.is_empty() {
            return Err(Error::ValidationFailure(
                "at least one field to edit must be provided".to_string(),
            ));
        }
        if let Some(name) = &self.changes.name {
            check_contact_exists(model, name)?;
        }

        let target = resolve(KIND, self.index, &model.filtered_tasks())?.clone();
        let edited = target.edited(self.changes);

        let message = format!("Edited task: {edited}");
        model.set_task(&target, edited)?;
        Ok(CommandResult::new(message))
    }
}

/// Shows every task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct List;

impl List {
    /// Runs the command. Never fails and never commits.
    pub fn execute(self, model: &mut Model) -> CommandResult {
        model.update_filtered_task_list(Predicate::all());
        CommandResult::new("Listed all tasks")
    }
}

/// Shows tasks whose description contains any of the keywords.
///
/// Matching is a case-insensitive substring search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Find {
    keywords: NonEmpty<String>,
}

impl Find {
    /// Creates the command.
    #[must_use]
    pub const fn new(keywords: NonEmpty<String>) -> Self {
        Self { keywords }
    }

    /// Runs the command. Never fails and never commits.
    pub fn execute(self, model: &mut Model) -> CommandResult {
        let keywords: Vec<String> = self.keywords.iter().map(|k| k.to_lowercase()).collect();
        model.update_filtered_task_list(Predicate::new(move |task: &Task| {
            let description = task.description().as_str().to_lowercase();
            keywords.iter().any(|k| description.contains(k.as_str()))
        }));

        let count = model.filtered_tasks().len();
        CommandResult::new(format!("{count} task(s) listed"))
    }
}
