use std::{fmt, num::NonZeroUsize, str::FromStr};

/// A 1-based position in a displayed list.
///
/// Users refer to entries by the number shown next to them, so indices are
/// always resolved against the list as currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Index(NonZeroUsize);

impl Index {
    /// Creates an index from a 1-based position.
    #[must_use]
    pub const fn from_one_based(position: usize) -> Option<Self> {
        match NonZeroUsize::new(position) {
            Some(position) => Some(Self(position)),
            None => None,
        }
    }

    /// The 1-based position.
    #[must_use]
    pub const fn one_based(self) -> usize {
        self.0.get()
    }

    /// The 0-based offset.
    #[must_use]
    pub const fn zero_based(self) -> usize {
        self.0.get() - 1
    }

    /// Looks up this index in `items`.
    #[must_use]
    pub fn get<T>(self, items: &[T]) -> Option<&T> {
        items.get(self.zero_based())
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.one_based())
    }
}

impl FromStr for Index {
    type Err = InvalidIndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .ok()
            .and_then(Self::from_one_based)
            .ok_or_else(|| InvalidIndexError(s.to_string()))
    }
}

/// Error returned when an index is not a positive integer.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid index '{0}': expected a positive integer")]
pub struct InvalidIndexError(String);
