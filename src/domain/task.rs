use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};

use crate::domain::{Identity, Name, NameMatch};

/// Who a task is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Assignment {
    /// The user assigned the task to the contact; the contact does the work.
    Assignee,
    /// The contact assigned the task to the user; the user does the work.
    Assignor,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assignee => f.write_str("ASSIGNEE"),
            Self::Assignor => f.write_str("ASSIGNOR"),
        }
    }
}

impl FromStr for Assignment {
    type Err = InvalidAssignmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ASSIGNEE" => Ok(Self::Assignee),
            "ASSIGNOR" => Ok(Self::Assignor),
            _ => Err(InvalidAssignmentError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown assignment.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid assignment '{0}': expected ASSIGNEE or ASSIGNOR")]
pub struct InvalidAssignmentError(String);

/// The free-text description of a task. Never blank.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Description(NonEmptyString);

impl Description {
    /// Creates a new description, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDescriptionError`] if the text is blank.
    pub fn new(s: impl Into<String>) -> Result<Self, InvalidDescriptionError> {
        let s = s.into();
        NonEmptyString::new(s.trim().to_string())
            .map(Self)
            .map_err(|_| InvalidDescriptionError(s))
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for Description {
    type Err = InvalidDescriptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a description is blank.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid description '{0}': descriptions must not be blank")]
pub struct InvalidDescriptionError(String);

/// The variant-specific part of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Something that must be done by a date.
    Deadline {
        /// The due date.
        date: NaiveDate,
    },
    /// Something that happens on a date.
    Event {
        /// The date of the event.
        date: NaiveDate,
    },
}

impl TaskKind {
    /// The date attached to the task, whatever its kind.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        match self {
            Self::Deadline { date } | Self::Event { date } => *date,
        }
    }

    /// Returns the same kind with a different date.
    #[must_use]
    pub const fn with_date(self, date: NaiveDate) -> Self {
        match self {
            Self::Deadline { .. } => Self::Deadline { date },
            Self::Event { .. } => Self::Event { date },
        }
    }

    const fn tag(&self) -> char {
        match self {
            Self::Deadline { .. } => 'D',
            Self::Event { .. } => 'E',
        }
    }
}

/// A task linked to a contact.
///
/// The contact is referenced by name only. Deleting the contact leaves the
/// task in place with a dangling reference.
///
/// Two tasks are the *same task* when their kind, contact, assignment,
/// description and date match; the completion flag is ignored. Full equality
/// ([`PartialEq`]) also compares the completion flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    name: Name,
    assignment: Assignment,
    description: Description,
    done: bool,
    kind: TaskKind,
}

impl Task {
    /// Creates an unfinished task.
    #[must_use]
    pub const fn new(
        name: Name,
        assignment: Assignment,
        description: Description,
        kind: TaskKind,
    ) -> Self {
        Self {
            name,
            assignment,
            description,
            done: false,
            kind,
        }
    }

    /// Creates an unfinished deadline.
    #[must_use]
    pub const fn deadline(
        name: Name,
        assignment: Assignment,
        description: Description,
        date: NaiveDate,
    ) -> Self {
        Self::new(name, assignment, description, TaskKind::Deadline { date })
    }

    /// Creates an unfinished event.
    #[must_use]
    pub const fn event(
        name: Name,
        assignment: Assignment,
        description: Description,
        date: NaiveDate,
    ) -> Self {
        Self::new(name, assignment, description, TaskKind::Event { date })
    }

    /// Returns a copy of this task with the completion flag set to `done`.
    #[must_use]
    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    /// The name of the contact this task is linked to.
    #[must_use]
    pub const fn name(&self) -> &Name {
        &self.name
    }

    /// Who the task is for.
    #[must_use]
    pub const fn assignment(&self) -> Assignment {
        self.assignment
    }

    /// What the task is about.
    #[must_use]
    pub const fn description(&self) -> &Description {
        &self.description
    }

    /// Whether the task has been completed.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// The kind of the task and its date.
    #[must_use]
    pub const fn kind(&self) -> TaskKind {
        self.kind
    }

    /// The date attached to the task.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.kind.date()
    }

    /// Applies `changes`, returning the edited task.
    ///
    /// The kind and completion flag are preserved.
    #[must_use]
    pub fn edited(&self, changes: TaskChanges) -> Self {
        Self {
            name: changes.name.unwrap_or_else(|| self.name.clone()),
            assignment: changes.assignment.unwrap_or(self.assignment),
            description: changes
                .description
                .unwrap_or_else(|| self.description.clone()),
            done: self.done,
            kind: changes
                .date
                .map_or(self.kind, |date| self.kind.with_date(date)),
        }
    }
}

impl Identity for Task {
    const KIND: &'static str = "task";

    fn is_same(&self, other: &Self, policy: NameMatch) -> bool {
        self.kind == other.kind
            && self.name.matches(&other.name, policy)
            && self.assignment == other.assignment
            && self.description == other.description
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.done { 'X' } else { ' ' };
        let relation = match self.assignment {
            Assignment::Assignee => "for",
            Assignment::Assignor => "from",
        };
        let when = match self.kind {
            TaskKind::Deadline { date } => format!("by {date}"),
            TaskKind::Event { date } => format!("on {date}"),
        };
        write!(
            f,
            "[{}][{status}] {} ({relation} {}, {when})",
            self.kind.tag(),
            self.description,
            self.name
        )
    }
}

/// A set of field updates for a task. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// Replacement contact name.
    pub name: Option<Name>,
    /// Replacement assignment.
    pub assignment: Option<Assignment>,
    /// Replacement description.
    pub description: Option<Description>,
    /// Replacement date.
    pub date: Option<NaiveDate>,
}

impl TaskChanges {
    /// Whether no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.assignment.is_none()
            && self.description.is_none()
            && self.date.is_none()
    }
}
