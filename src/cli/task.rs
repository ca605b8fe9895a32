use anyhow::Context;
use chrono::NaiveDate;
use nonempty::NonEmpty;
use taskbook::{
    Index, Name,
    command::{self, task},
    domain::{Assignment, Description, TaskChanges},
};

use super::View;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Add a task due by a date
    Deadline(NewTask),

    /// Add a task taking place on a date
    Event(NewTask),

    /// Delete the task at a position in the list
    Delete {
        /// Position in the task list, starting at 1. In the shell this is the
        /// last displayed list; otherwise the full list shown by `task list`
        index: Index,
    },

    /// Mark the task at a position in the list as done
    Mark {
        /// Position in the task list, starting at 1. In the shell this is the
        /// last displayed list; otherwise the full list shown by `task list`
        index: Index,
    },

    /// Mark the task at a position in the list as not done
    Unmark {
        /// Position in the task list, starting at 1. In the shell this is the
        /// last displayed list; otherwise the full list shown by `task list`
        index: Index,
    },

    /// Edit the task at a position in the list
    Edit {
        /// Position in the task list, starting at 1. In the shell this is the
        /// last displayed list; otherwise the full list shown by `task list`
        index: Index,

        #[command(flatten)]
        contact: Counterpart,

        #[arg(short, long)]
        description: Option<Description>,

        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show every task
    List,

    /// Show tasks whose descriptions contain any of the given words
    Find {
        #[arg(required = true)]
        keywords: Vec<String>,
    },
}

/// The contact a task is shared with, and in which direction.
#[derive(Debug, clap::Args)]
pub struct Counterpart {
    /// Assign the task to this contact
    #[arg(long, conflicts_with = "from")]
    to: Option<Name>,

    /// The task was assigned to you by this contact
    #[arg(long)]
    from: Option<Name>,
}

impl Counterpart {
    fn into_parts(self) -> Option<(Name, Assignment)> {
        match (self.to, self.from) {
            (Some(name), _) => Some((name, Assignment::Assignee)),
            (None, Some(name)) => Some((name, Assignment::Assignor)),
            (None, None) => None,
        }
    }
}

#[derive(Debug, clap::Args)]
pub struct NewTask {
    #[command(flatten)]
    contact: Counterpart,

    #[arg(short, long)]
    description: Description,

    /// The date (YYYY-MM-DD)
    #[arg(long)]
    date: NaiveDate,
}

impl NewTask {
    fn into_parts(self) -> anyhow::Result<(Name, Assignment, Description, NaiveDate)> {
        let (name, assignment) = self
            .contact
            .into_parts()
            .context("a task needs a contact: pass --to or --from")?;
        Ok((name, assignment, self.description, self.date))
    }
}

impl Command {
    pub(super) const fn view(&self) -> Option<View> {
        match self {
            Self::List => Some(View::Tasks),
            Self::Find { .. } => Some(View::TaskMatches),
            _ => None,
        }
    }

    pub(super) fn into_command(self) -> anyhow::Result<command::Command> {
        Ok(match self {
            Self::Deadline(new) => {
                let (name, assignment, description, date) = new.into_parts()?;
                task::AddDeadline::new(name, assignment, description, date).into()
            }
            Self::Event(new) => {
                let (name, assignment, description, date) = new.into_parts()?;
                task::AddEvent::new(name, assignment, description, date).into()
            }
            Self::Delete { index } => task::Delete::new(index).into(),
            Self::Mark { index } => task::Mark::new(index).into(),
            Self::Unmark { index } => task::Unmark::new(index).into(),
            Self::Edit {
                index,
                contact,
                description,
                date,
            } => {
                let (name, assignment) = contact.into_parts().unzip();
                let changes = TaskChanges {
                    name,
                    assignment,
                    description,
                    date,
                };
                task::Edit::new(index, changes).into()
            }
            Self::List => task::List.into(),
            Self::Find { keywords } => {
                let keywords = NonEmpty::from_vec(keywords).context("no keywords given")?;
                task::Find::new(keywords).into()
            }
        })
    }
}
