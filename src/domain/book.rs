//! The task book: every contact and task the user is tracking.

use std::fmt;

use crate::domain::{
    Contact, Name, NameMatch, Task,
    unique_list::{Error, UniqueList},
};

/// Aggregates the contacts and tasks.
///
/// Contacts are unique by name, tasks by [`Identity`](super::Identity).
/// Every operation either applies fully or fails without changing anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskBook {
    contacts: UniqueList<Contact>,
    tasks: UniqueList<Task>,
}

impl TaskBook {
    /// Creates an empty task book comparing names with `policy`.
    #[must_use]
    pub const fn new(policy: NameMatch) -> Self {
        Self {
            contacts: UniqueList::new(policy),
            tasks: UniqueList::new(policy),
        }
    }

    /// Builds a task book from complete contact and task lists.
    ///
    /// This is how persisted state is restored: unlike
    /// [`reset_data`](Self::reset_data), it populates tasks as well.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateList`] if either list contains duplicates.
    pub fn from_parts(
        policy: NameMatch,
        contacts: Vec<Contact>,
        tasks: Vec<Task>,
    ) -> Result<Self, Error> {
        let mut book = Self::new(policy);
        book.contacts.set_all(contacts)?;
        book.tasks.set_all(tasks)?;
        Ok(book)
    }

    /// The name comparison policy in force.
    #[must_use]
    pub const fn policy(&self) -> NameMatch {
        self.contacts.policy()
    }

    /// Replaces the contacts with those of `other`.
    ///
    /// Tasks are left untouched. Use [`from_parts`](Self::from_parts) to
    /// rebuild a whole book.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateList`] if `other`'s contacts collide under
    /// this book's policy.
    pub fn reset_data(&mut self, other: &Self) -> Result<(), Error> {
        self.contacts.set_all(other.contacts.as_slice().to_vec())
    }

    // contacts

    /// All contacts, in insertion order.
    #[must_use]
    pub fn contacts(&self) -> &[Contact] {
        self.contacts.as_slice()
    }

    /// Whether a contact with the same name as `contact` exists.
    #[must_use]
    pub fn has_contact(&self, contact: &Contact) -> bool {
        self.contacts.contains(contact)
    }

    /// Looks up a contact by name.
    #[must_use]
    pub fn find_contact(&self, name: &Name) -> Option<&Contact> {
        let policy = self.policy();
        self.contacts.find(|c| c.name().matches(name, policy))
    }

    /// Adds a contact.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateEntity`] if a contact with that name exists.
    pub fn add_contact(&mut self, contact: Contact) -> Result<(), Error> {
        self.contacts.add(contact)
    }

    /// Replaces `target` with `edited`.
    ///
    /// Tasks that refer to the old name are not updated.
    ///
    /// # Errors
    ///
    /// - [`Error::EntityNotFound`] if `target` is not in the book
    /// - [`Error::DuplicateEntity`] if `edited` has the name of another
    ///   contact
    pub fn set_contact(&mut self, target: &Contact, edited: Contact) -> Result<(), Error> {
        self.contacts.set(target, edited)
    }

    /// Removes a contact. Tasks that refer to it are kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntityNotFound`] if `contact` is not in the book.
    pub fn remove_contact(&mut self, contact: &Contact) -> Result<Contact, Error> {
        self.contacts.remove(contact)
    }

    // tasks

    /// All tasks, in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        self.tasks.as_slice()
    }

    /// Whether the same task already exists.
    #[must_use]
    pub fn has_task(&self, task: &Task) -> bool {
        self.tasks.contains(task)
    }

    /// Adds a task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateEntity`] if the same task already exists.
    pub fn add_task(&mut self, task: Task) -> Result<(), Error> {
        self.tasks.add(task)
    }

    /// Replaces `target` with `edited`.
    ///
    /// # Errors
    ///
    /// - [`Error::EntityNotFound`] if `target` is not in the book
    /// - [`Error::DuplicateEntity`] if `edited` duplicates another task
    pub fn set_task(&mut self, target: &Task, edited: Task) -> Result<(), Error> {
        self.tasks.set(target, edited)
    }

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntityNotFound`] if `task` is not in the book.
    pub fn remove_task(&mut self, task: &Task) -> Result<Task, Error> {
        self.tasks.remove(task)
    }
}

impl fmt::Display for TaskBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} contacts, {} tasks",
            self.contacts.len(),
            self.tasks.len()
        )
    }
}
