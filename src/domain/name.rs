use std::{fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};

/// The name of a contact.
///
/// Names are trimmed and must not be empty. A name is also the identity of a
/// contact, and tasks refer to contacts by name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(NonEmptyString);

impl Name {
    /// Creates a new `Name`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidNameError`] if the name is blank after trimming.
    pub fn new(s: impl Into<String>) -> Result<Self, InvalidNameError> {
        let s = s.into();
        let trimmed = s.trim();
        NonEmptyString::new(trimmed.to_string())
            .map(Self)
            .map_err(|_| InvalidNameError(s))
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether two names identify the same contact under the given policy.
    #[must_use]
    pub fn matches(&self, other: &Self, policy: NameMatch) -> bool {
        match policy {
            NameMatch::Exact => self.as_str() == other.as_str(),
            NameMatch::IgnoreCase => self.as_str().to_lowercase() == other.as_str().to_lowercase(),
        }
    }

    /// Iterates over the whitespace-separated words of the name.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.as_str().split_whitespace()
    }
}

impl TryFrom<String> for Name {
    type Error = InvalidNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Name {
    type Error = InvalidNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for Name {
    type Err = InvalidNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Deref for Name {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a name is empty or contains only whitespace.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid name '{0}': names must not be blank")]
pub struct InvalidNameError(String);

/// How two names are compared when deciding whether they identify the same
/// contact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameMatch {
    /// Names must be byte-for-byte identical.
    Exact,
    /// Names are compared without regard to letter case.
    #[default]
    IgnoreCase,
}
