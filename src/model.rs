//! The versioned model that commands operate on.
//!
//! The [`Model`] owns the live [`TaskBook`], its undo [`History`] and the
//! predicates that decide which contacts and tasks are currently displayed.
//! Every mutating method commits exactly one snapshot on success and nothing
//! on failure.

use std::{fmt, num::NonZeroUsize, rc::Rc};

use tracing::instrument;

use crate::domain::{
    Contact, History, Name, Task, TaskBook,
    history::{self, Error as HistoryError},
    unique_list::Error as BookError,
};

/// A filter over displayed entities.
pub struct Predicate<T>(Rc<dyn Fn(&T) -> bool>);

impl<T> Predicate<T> {
    /// Wraps a closure as a predicate.
    pub fn new(f: impl Fn(&T) -> bool + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// A predicate that accepts everything.
    #[must_use]
    pub fn all() -> Self {
        Self::new(|_| true)
    }

    /// Whether `item` passes the filter.
    #[must_use]
    pub fn matches(&self, item: &T) -> bool {
        (self.0)(item)
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> Default for Predicate<T> {
    fn default() -> Self {
        Self::all()
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate")
    }
}

/// The live task book together with its history and view filters.
#[derive(Debug)]
pub struct Model {
    book: TaskBook,
    history: History<TaskBook>,
    contact_filter: Predicate<Contact>,
    task_filter: Predicate<Task>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new(TaskBook::default())
    }
}

impl Model {
    /// Creates a model over `book` with the default history limit.
    #[must_use]
    pub fn new(book: TaskBook) -> Self {
        Self::with_history_limit(book, history::DEFAULT_LIMIT)
    }

    /// Creates a model over `book` keeping at most `limit` snapshots.
    ///
    /// The history starts with `book` as its only snapshot.
    #[must_use]
    pub fn with_history_limit(book: TaskBook, limit: NonZeroUsize) -> Self {
        Self {
            history: History::new(book.clone(), limit),
            book,
            contact_filter: Predicate::all(),
            task_filter: Predicate::all(),
        }
    }

    /// The live task book.
    #[must_use]
    pub const fn book(&self) -> &TaskBook {
        &self.book
    }

    fn commit(&mut self) {
        self.history.commit(self.book.clone());
        tracing::debug!(
            snapshots = self.history.len(),
            cursor = self.history.cursor(),
            "committed {}",
            self.book
        );
    }

    // contacts

    /// Whether a contact with the same name exists.
    #[must_use]
    pub fn has_contact(&self, contact: &Contact) -> bool {
        self.book.has_contact(contact)
    }

    /// Looks up a contact by name.
    #[must_use]
    pub fn find_contact(&self, name: &Name) -> Option<&Contact> {
        self.book.find_contact(name)
    }

    /// Adds a contact and commits.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::DuplicateEntity`] if a contact with that name
    /// exists.
    #[instrument(level = "debug", skip(self), fields(name = %contact.name()))]
    pub fn add_contact(&mut self, contact: Contact) -> Result<(), BookError> {
        self.book.add_contact(contact)?;
        self.commit();
        Ok(())
    }

    /// Replaces `target` with `edited` and commits.
    ///
    /// # Errors
    ///
    /// See [`TaskBook::set_contact`].
    #[instrument(level = "debug", skip(self, edited), fields(name = %target.name()))]
    pub fn set_contact(&mut self, target: &Contact, edited: Contact) -> Result<(), BookError> {
        self.book.set_contact(target, edited)?;
        self.commit();
        Ok(())
    }

    /// Removes a contact and commits. Tasks referring to it are kept.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::EntityNotFound`] if the contact is absent.
    #[instrument(level = "debug", skip(self), fields(name = %contact.name()))]
    pub fn remove_contact(&mut self, contact: &Contact) -> Result<Contact, BookError> {
        let removed = self.book.remove_contact(contact)?;
        self.commit();
        Ok(removed)
    }

    // tasks

    /// Whether the same task already exists.
    #[must_use]
    pub fn has_task(&self, task: &Task) -> bool {
        self.book.has_task(task)
    }

    /// Adds a task and commits.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::DuplicateEntity`] if the same task exists.
    #[instrument(level = "debug", skip(self), fields(task = %task))]
    pub fn add_task(&mut self, task: Task) -> Result<(), BookError> {
        self.book.add_task(task)?;
        self.commit();
        Ok(())
    }

    /// Replaces `target` with `edited` and commits.
    ///
    /// # Errors
    ///
    /// See [`TaskBook::set_task`].
    #[instrument(level = "debug", skip(self, edited), fields(task = %target))]
    pub fn set_task(&mut self, target: &Task, edited: Task) -> Result<(), BookError> {
        self.book.set_task(target, edited)?;
        self.commit();
        Ok(())
    }

    /// Removes a task and commits.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::EntityNotFound`] if the task is absent.
    #[instrument(level = "debug", skip(self), fields(task = %task))]
    pub fn remove_task(&mut self, task: &Task) -> Result<Task, BookError> {
        let removed = self.book.remove_task(task)?;
        self.commit();
        Ok(removed)
    }

    // history

    /// Whether there is a state to go back to.
    #[must_use]
    pub const fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Restores the previous snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::NoUndoableState`] at the start of the history.
    #[instrument(level = "debug", skip(self))]
    pub fn undo(&mut self) -> Result<(), HistoryError> {
        self.book = self.history.undo()?.clone();
        Ok(())
    }

    /// Whether there is an undone state to go forward to.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Restores the next snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::NoRedoableState`] at the end of the history.
    #[instrument(level = "debug", skip(self))]
    pub fn redo(&mut self) -> Result<(), HistoryError> {
        self.book = self.history.redo()?.clone();
        Ok(())
    }

    /// Forgets all history; the live book becomes the only snapshot.
    pub fn reset_history(&mut self) {
        self.history.reset(self.book.clone());
    }

    /// Number of snapshots in the history.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Position of the live state within the history.
    #[must_use]
    pub const fn history_cursor(&self) -> usize {
        self.history.cursor()
    }

    // views

    /// Contacts passing the current contact filter, in book order.
    #[must_use]
    pub fn filtered_contacts(&self) -> Vec<&Contact> {
        self.book
            .contacts()
            .iter()
            .filter(|c| self.contact_filter.matches(c))
            .collect()
    }

    /// Tasks passing the current task filter, in book order.
    #[must_use]
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        self.book
            .tasks()
            .iter()
            .filter(|t| self.task_filter.matches(t))
            .collect()
    }

    /// Replaces the contact filter. Does not commit.
    pub fn update_filtered_contact_list(&mut self, predicate: Predicate<Contact>) {
        self.contact_filter = predicate;
    }

    /// Replaces the task filter. Does not commit.
    pub fn update_filtered_task_list(&mut self, predicate: Predicate<Task>) {
        self.task_filter = predicate;
    }

    /// Resets both filters to show everything.
    pub fn show_all(&mut self) {
        self.update_filtered_contact_list(Predicate::all());
        self.update_filtered_task_list(Predicate::all());
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{Assignment, Description, NameMatch, unique_list::Error};

    fn contact(name: &str) -> Contact {
        Contact::new(Name::new(name).unwrap())
    }

    fn deadline(name: &str, description: &str) -> Task {
        Task::deadline(
            Name::new(name).unwrap(),
            Assignment::Assignee,
            Description::new(description).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    #[test]
    fn initial_state_has_one_snapshot() {
        let model = Model::default();

        assert_eq!(model.history_len(), 1);
        assert!(!model.can_undo());
        assert!(!model.can_redo());
    }

    #[test]
    fn each_mutation_commits_once() {
        let mut model = Model::default();
        model.add_contact(contact("Alice")).unwrap();
        model.add_task(deadline("Alice", "Report")).unwrap();
        model
            .set_task(&deadline("Alice", "Report"), deadline("Alice", "Report").with_done(true))
            .unwrap();
        model.remove_contact(&contact("Alice")).unwrap();

        assert_eq!(model.history_len(), 5);
    }

    #[test]
    fn failed_mutation_does_not_commit() {
        let mut model = Model::default();
        model.add_contact(contact("Bob")).unwrap();

        assert_eq!(
            model.add_contact(contact("Bob")),
            Err(Error::DuplicateEntity("contact"))
        );
        assert_eq!(
            model.remove_task(&deadline("Bob", "Nothing")),
            Err(Error::EntityNotFound("task"))
        );
        assert_eq!(model.history_len(), 2);
    }

    #[test]
    fn undo_redo_restore_snapshots() {
        let mut model = Model::default();
        model.add_contact(contact("Alice")).unwrap();
        let s1 = model.book().clone();
        model.add_contact(contact("Bob")).unwrap();
        let s2 = model.book().clone();

        model.undo().unwrap();
        assert_eq!(model.book(), &s1);
        model.redo().unwrap();
        assert_eq!(model.book(), &s2);
    }

    #[test]
    fn undo_and_redo_do_not_commit() {
        let mut model = Model::default();
        model.add_contact(contact("Alice")).unwrap();

        model.undo().unwrap();
        model.redo().unwrap();

        assert_eq!(model.history_len(), 2);
    }

    #[test]
    fn snapshots_are_independent_of_live_state() {
        let mut model = Model::default();
        model.add_contact(contact("Alice")).unwrap();
        model.add_contact(contact("Bob")).unwrap();
        model.undo().unwrap();

        // mutate the live book after undo; the redo state is discarded, but
        // the earlier snapshot must not have changed
        model.add_contact(contact("Carol")).unwrap();
        model.undo().unwrap();

        let names: Vec<_> = model
            .book()
            .contacts()
            .iter()
            .map(|c| c.name().as_str())
            .collect();
        assert_eq!(names, ["Alice"]);
        assert!(model.can_redo());
    }

    #[test]
    fn filters_do_not_commit_and_follow_mutations() {
        let mut model = Model::default();
        model.add_contact(contact("Alice")).unwrap();
        model.add_contact(contact("Bob")).unwrap();

        model.update_filtered_contact_list(Predicate::new(|c: &Contact| {
            c.name().starts_with('A')
        }));
        assert_eq!(model.filtered_contacts(), [&contact("Alice")]);
        assert_eq!(model.history_len(), 3);

        model.add_contact(contact("Amir")).unwrap();
        assert_eq!(
            model.filtered_contacts(),
            [&contact("Alice"), &contact("Amir")]
        );

        model.show_all();
        assert_eq!(model.filtered_contacts().len(), 3);
    }

    #[test]
    fn history_limit_is_respected() {
        let mut model =
            Model::with_history_limit(TaskBook::default(), NonZeroUsize::new(2).unwrap());
        model.add_contact(contact("Alice")).unwrap();
        model.add_contact(contact("Bob")).unwrap();

        assert_eq!(model.history_len(), 2);
        assert_eq!(model.history_cursor(), 1);
        model.undo().unwrap();
        assert_eq!(model.history_cursor(), 0);
        assert!(!model.can_undo());
        assert_eq!(model.book().contacts(), [contact("Alice")]);
    }

    #[test]
    fn reset_history_keeps_live_book() {
        let mut model = Model::new(TaskBook::new(NameMatch::Exact));
        model.add_contact(contact("Alice")).unwrap();

        model.reset_history();

        assert_eq!(model.history_len(), 1);
        assert!(!model.can_undo());
        assert_eq!(model.book().contacts().len(), 1);
    }
}
