//! Contact and Task Book
//!
//! Keeps a list of contacts and the tasks shared with them. Every change is
//! made by a [`Command`] and can be undone or redone.

pub mod command;
pub use command::{Command, CommandResult};

pub mod domain;
pub use domain::{Config, Contact, Index, Name, Task, TaskBook};

pub mod model;
pub use model::{Model, Predicate};

pub mod storage;
pub use storage::JsonFile;
