// Serialized forms of the task book.
//
// These mirror the domain types with plain strings so that the on-disk format
// can evolve independently of the domain model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        Assignment, Contact, Description, InvalidDescriptionError, InvalidNameError, Name,
        NameMatch, Task, TaskBook, TaskKind,
    },
    storage::LoadError,
};

/// The serialized versions of the data file.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
pub enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        contacts: Vec<ContactRecord>,
        #[serde(default)]
        tasks: Vec<TaskRecord>,
    },
}

impl Versions {
    pub fn into_book(self, policy: NameMatch) -> Result<TaskBook, LoadError> {
        match self {
            Self::V1 { contacts, tasks } => {
                let contacts = contacts
                    .into_iter()
                    .map(Contact::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                let tasks = tasks
                    .into_iter()
                    .map(Task::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TaskBook::from_parts(policy, contacts, tasks)?)
            }
        }
    }
}

impl From<&TaskBook> for Versions {
    fn from(book: &TaskBook) -> Self {
        Self::V1 {
            contacts: book.contacts().iter().map(ContactRecord::from).collect(),
            tasks: book.tasks().iter().map(TaskRecord::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<String>,
}

impl From<&Contact> for ContactRecord {
    fn from(contact: &Contact) -> Self {
        Self {
            name: contact.name().to_string(),
            phone: contact.phone().map(ToString::to_string),
            email: contact.email().map(ToString::to_string),
            address: contact.address().map(ToString::to_string),
        }
    }
}

impl TryFrom<ContactRecord> for Contact {
    type Error = InvalidNameError;

    fn try_from(record: ContactRecord) -> Result<Self, Self::Error> {
        let mut contact = Self::new(Name::new(record.name)?);
        if let Some(phone) = record.phone {
            contact = contact.with_phone(phone);
        }
        if let Some(email) = record.email {
            contact = contact.with_email(email);
        }
        if let Some(address) = record.address {
            contact = contact.with_address(address);
        }
        Ok(contact)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TaskRecord {
    Deadline(TaskFields),
    Event(TaskFields),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFields {
    name: String,
    assignment: Assignment,
    description: String,
    #[serde(default)]
    done: bool,
    date: NaiveDate,
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        let fields = TaskFields {
            name: task.name().to_string(),
            assignment: task.assignment(),
            description: task.description().to_string(),
            done: task.is_done(),
            date: task.date(),
        };
        match task.kind() {
            TaskKind::Deadline { .. } => Self::Deadline(fields),
            TaskKind::Event { .. } => Self::Event(fields),
        }
    }
}

/// A stored task with an invalid field.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidTaskError {
    /// The contact name is blank.
    #[error(transparent)]
    Name(#[from] InvalidNameError),
    /// The description is blank.
    #[error(transparent)]
    Description(#[from] InvalidDescriptionError),
}

impl TryFrom<TaskRecord> for Task {
    type Error = InvalidTaskError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let (kind, fields) = match record {
            TaskRecord::Deadline(fields) => (TaskKind::Deadline { date: fields.date }, fields),
            TaskRecord::Event(fields) => (TaskKind::Event { date: fields.date }, fields),
        };

        let task = Self::new(
            Name::new(fields.name)?,
            fields.assignment,
            Description::new(fields.description)?,
            kind,
        );
        Ok(task.with_done(fields.done))
    }
}
