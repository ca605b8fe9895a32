//! Domain models for the task book.
//!
//! This module contains the entity types (contacts and tasks), the collections
//! that keep them unique, the task book itself and its undo history.

/// The task book aggregate.
pub mod book;
pub use book::TaskBook;

mod config;
pub use config::Config;

mod contact;
pub use contact::{Contact, ContactChanges};

/// Undo/redo history of snapshots.
pub mod history;
pub use history::History;

mod index;
pub use index::{Index, InvalidIndexError};

mod name;
pub use name::{InvalidNameError, Name, NameMatch};

mod task;
pub use task::{
    Assignment, Description, InvalidAssignmentError, InvalidDescriptionError, Task, TaskChanges,
    TaskKind,
};

/// Ordered collections that reject duplicate entities.
pub mod unique_list;
pub use unique_list::{Identity, UniqueList};
