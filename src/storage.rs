//! A JSON file backed store for the task book.
//!
//! The [`JsonFile`] only reads and writes whole [`TaskBook`] snapshots; it is
//! called before the first command runs and after each mutating command
//! returns, never while a command is executing.

use std::{
    fs::{self, File},
    io::{self, BufReader, Write},
    path::{Path, PathBuf},
};

use tracing::instrument;

use crate::domain::{InvalidNameError, NameMatch, TaskBook, unique_list};

mod records;
pub use records::InvalidTaskError;
use records::Versions;

/// Errors that can occur when loading the task book.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The data file.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// The file is not valid JSON in a known format.
    #[error("failed to parse {path}: {source}")]
    Json {
        /// The data file.
        path: PathBuf,
        /// The underlying error.
        source: serde_json::Error,
    },

    /// A stored contact is invalid.
    #[error("invalid contact: {0}")]
    Contact(#[from] InvalidNameError),

    /// A stored task is invalid.
    #[error("invalid task: {0}")]
    Task(#[from] InvalidTaskError),

    /// The stored contacts or tasks contain duplicates.
    #[error(transparent)]
    Duplicates(#[from] unique_list::Error),
}

/// Errors that can occur when saving the task book.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The file or its parent directory could not be written.
    #[error("failed to write {path}: {source}")]
    Io {
        /// The data file.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// The task book could not be serialized.
    #[error("failed to serialize task book: {0}")]
    Json(#[from] serde_json::Error),
}

/// A task book stored as a single JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    /// Creates a store at the given path. Nothing is read or written yet.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The path of the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the task book.
    ///
    /// A missing file yields an empty task book.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if its
    /// contents violate the task book's rules (blank names, duplicates).
    #[instrument(level = "debug")]
    pub fn load(&self, policy: NameMatch) -> Result<TaskBook, LoadError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No data file at {}, starting empty", self.path.display());
                return Ok(TaskBook::new(policy));
            }
            Err(source) => {
                return Err(LoadError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let versions: Versions =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| LoadError::Json {
                path: self.path.clone(),
                source,
            })?;

        let book = versions.into_book(policy)?;
        tracing::debug!("Loaded {book} from {}", self.path.display());
        Ok(book)
    }

    /// Writes the task book, creating parent directories as needed.
    ///
    /// The JSON goes to a sibling `.tmp` file that is then renamed over the
    /// data file, so a failed write leaves the previous contents in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    #[instrument(level = "debug", skip(book))]
    pub fn save(&self, book: &TaskBook) -> Result<(), SaveError> {
        let io_err = |source: io::Error| SaveError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut json = serde_json::to_vec_pretty(&Versions::from(book))?;
        json.push(b'\n');

        let tmp = self.tmp_path();
        let mut file = File::create(&tmp).map_err(io_err)?;
        file.write_all(&json).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        drop(file);
        fs::rename(&tmp, &self.path).map_err(io_err)?;

        tracing::debug!("Saved {book} to {}", self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use super::*;
    use crate::domain::{Assignment, Contact, Description, Name, Task};

    fn sample_book() -> TaskBook {
        let alice = Contact::new(Name::new("Alice").unwrap())
            .with_phone("91234567")
            .with_address("1 Main St");
        let bob = Contact::new(Name::new("Bob").unwrap()).with_email("bob@example.com");
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let tasks = vec![
            Task::deadline(
                Name::new("Alice").unwrap(),
                Assignment::Assignee,
                Description::new("Report").unwrap(),
                date,
            )
            .with_done(true),
            Task::event(
                Name::new("Bob").unwrap(),
                Assignment::Assignor,
                Description::new("Dinner").unwrap(),
                date,
            ),
        ];
        TaskBook::from_parts(NameMatch::IgnoreCase, vec![alice, bob], tasks).unwrap()
    }

    #[test]
    fn missing_file_is_empty_book() {
        let tmp = tempdir().unwrap();
        let store = JsonFile::new(tmp.path().join("taskbook.json"));

        let book = store.load(NameMatch::IgnoreCase).unwrap();

        assert_eq!(book, TaskBook::default());
    }

    #[test]
    fn saved_book_loads_back_with_tasks() {
        let tmp = tempdir().unwrap();
        let store = JsonFile::new(tmp.path().join("nested").join("taskbook.json"));
        let book = sample_book();

        store.save(&book).unwrap();
        let loaded = store.load(NameMatch::IgnoreCase).unwrap();

        assert_eq!(loaded, book);
        assert!(loaded.tasks()[0].is_done());
    }

    #[test]
    fn failed_save_keeps_previous_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("taskbook.json");
        let store = JsonFile::new(path.clone());
        store.save(&sample_book()).unwrap();
        assert!(!tmp.path().join("taskbook.json.tmp").exists());

        // A directory in the way of the temporary file makes the write fail.
        fs::create_dir(tmp.path().join("taskbook.json.tmp")).unwrap();
        let err = store.save(&TaskBook::default()).unwrap_err();

        assert!(matches!(err, SaveError::Io { .. }));
        assert_eq!(store.load(NameMatch::IgnoreCase).unwrap(), sample_book());
    }

    #[test]
    fn reads_documented_format() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("taskbook.json");
        fs::write(
            &path,
            r#"{
  "_version": "1",
  "contacts": [{ "name": "Carol" }],
  "tasks": [
    {
      "type": "event",
      "name": "Carol",
      "assignment": "ASSIGNOR",
      "description": "Team lunch",
      "date": "2024-05-20"
    }
  ]
}"#,
        )
        .unwrap();

        let book = JsonFile::new(path).load(NameMatch::Exact).unwrap();

        assert_eq!(book.contacts().len(), 1);
        let task = &book.tasks()[0];
        assert_eq!(task.description().as_str(), "Team lunch");
        assert_eq!(task.assignment(), Assignment::Assignor);
        assert!(!task.is_done());
    }

    #[test]
    fn duplicate_contacts_are_rejected() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("taskbook.json");
        fs::write(
            &path,
            r#"{"_version": "1", "contacts": [{"name": "Dan"}, {"name": "DAN"}]}"#,
        )
        .unwrap();

        let err = JsonFile::new(path).load(NameMatch::IgnoreCase).unwrap_err();

        assert!(matches!(
            err,
            LoadError::Duplicates(unique_list::Error::DuplicateList("contact"))
        ));
    }

    #[test]
    fn blank_description_is_rejected() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("taskbook.json");
        fs::write(
            &path,
            r#"{"_version": "1", "tasks": [{"type": "deadline", "name": "Eve",
                "assignment": "ASSIGNEE", "description": " ", "date": "2024-01-01"}]}"#,
        )
        .unwrap();

        let err = JsonFile::new(path).load(NameMatch::IgnoreCase).unwrap_err();

        assert!(matches!(
            err,
            LoadError::Task(InvalidTaskError::Description(_))
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("taskbook.json");
        fs::write(&path, "not json").unwrap();

        let err = JsonFile::new(path).load(NameMatch::IgnoreCase).unwrap_err();

        assert!(matches!(err, LoadError::Json { .. }));
    }
}
