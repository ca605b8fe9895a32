use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::domain::{NameMatch, history};

/// Configuration for the task book.
///
/// Loaded from `config.toml` in the task book root. Every field has a default,
/// so an absent or partial file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// How contact names are compared when checking for duplicates and
    /// resolving the contact a task refers to.
    name_matching: NameMatch,

    /// How many snapshots the undo history keeps, including the current one.
    history_limit: NonZeroUsize,

    /// Where the task book is stored, relative to the root.
    data_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name_matching: NameMatch::default(),
            history_limit: history::DEFAULT_LIMIT,
            data_file: default_data_file(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads `config.toml` from `root`, falling back to the defaults.
    #[must_use]
    pub fn load_or_default(root: &Path) -> Self {
        let path = root.join("config.toml");
        Self::load(&path).unwrap_or_else(|e| {
            tracing::debug!("Failed to load config: {e}");
            Self::default()
        })
    }

    /// The name comparison policy.
    #[must_use]
    pub const fn name_matching(&self) -> NameMatch {
        self.name_matching
    }

    /// Maximum number of snapshots in the undo history.
    #[must_use]
    pub const fn history_limit(&self) -> NonZeroUsize {
        self.history_limit
    }

    /// The data file path, relative to the task book root.
    #[must_use]
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from("taskbook.json")
}

const fn default_history_limit() -> NonZeroUsize {
    history::DEFAULT_LIMIT
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        name_matching: NameMatch,

        #[serde(default = "default_history_limit")]
        history_limit: NonZeroUsize,

        #[serde(default = "default_data_file")]
        data_file: PathBuf,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                name_matching,
                history_limit,
                data_file,
            } => Self {
                name_matching,
                history_limit,
                data_file,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        let Config {
            name_matching,
            history_limit,
            data_file,
        } = config;

        Self::V1 {
            name_matching,
            history_limit,
            data_file,
        }
    }
}
