//! An ordered collection that rejects duplicate entities.
//!
//! "Duplicate" is decided by [`Identity::is_same`], which is narrower than
//! full equality: two contacts with the same name but different phone numbers
//! are the same contact.

use std::slice;

use crate::domain::NameMatch;

/// Entities that can be stored in a [`UniqueList`].
pub trait Identity {
    /// Human-readable name of the entity kind, used in error messages.
    const KIND: &'static str;

    /// Whether `self` and `other` represent the same entity.
    fn is_same(&self, other: &Self, policy: NameMatch) -> bool;
}

/// Errors returned by [`UniqueList`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The entity (or its replacement) would duplicate an existing entity.
    #[error("this {0} already exists in the task book")]
    DuplicateEntity(&'static str),

    /// The target entity is not in the list.
    #[error("the {0} could not be found in the task book")]
    EntityNotFound(&'static str),

    /// A bulk replacement contained two entities with the same identity.
    #[error("the {0} list contains duplicate entries")]
    DuplicateList(&'static str),
}

/// An ordered list of entities in which no two elements share an identity.
///
/// Insertion order is preserved. Mutations either apply fully or leave the
/// list untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueList<T> {
    items: Vec<T>,
    policy: NameMatch,
}

impl<T> Default for UniqueList<T> {
    fn default() -> Self {
        Self::new(NameMatch::default())
    }
}

impl<T> UniqueList<T> {
    /// Creates an empty list comparing names with the given policy.
    #[must_use]
    pub const fn new(policy: NameMatch) -> Self {
        Self {
            items: Vec::new(),
            policy,
        }
    }

    /// The name comparison policy used for identity checks.
    #[must_use]
    pub const fn policy(&self) -> NameMatch {
        self.policy
    }

    /// A read-only view of the elements, in order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterates over the elements in order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Number of elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the first element satisfying `predicate`.
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|item| predicate(item))
    }
}

impl<T: Identity + PartialEq> UniqueList<T> {
    /// Whether an element with the same identity as `item` is present.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.items.iter().any(|x| x.is_same(item, self.policy))
    }

    /// Appends `item`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateEntity`] if an element with the same identity
    /// is already present.
    pub fn add(&mut self, item: T) -> Result<(), Error> {
        if self.contains(&item) {
            return Err(Error::DuplicateEntity(T::KIND));
        }
        self.items.push(item);
        Ok(())
    }

    /// Replaces `target` with `replacement`, keeping its position.
    ///
    /// # Errors
    ///
    /// - [`Error::EntityNotFound`] if `target` is not in the list
    /// - [`Error::DuplicateEntity`] if `replacement` has the same identity as
    ///   an element other than `target`
    pub fn set(&mut self, target: &T, replacement: T) -> Result<(), Error> {
        let index = self.position(target)?;

        let collides = self
            .items
            .iter()
            .enumerate()
            .any(|(i, x)| i != index && x.is_same(&replacement, self.policy));
        if collides {
            return Err(Error::DuplicateEntity(T::KIND));
        }

        self.items[index] = replacement;
        Ok(())
    }

    /// Removes `item` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntityNotFound`] if `item` is not in the list.
    pub fn remove(&mut self, item: &T) -> Result<T, Error> {
        let index = self.position(item)?;
        Ok(self.items.remove(index))
    }

    /// Replaces the whole contents with `items`, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateList`] if two of `items` share an identity.
    pub fn set_all(&mut self, items: Vec<T>) -> Result<(), Error> {
        if !self.all_unique(&items) {
            return Err(Error::DuplicateList(T::KIND));
        }
        self.items = items;
        Ok(())
    }

    fn all_unique(&self, items: &[T]) -> bool {
        items.iter().enumerate().all(|(i, a)| {
            items[i + 1..]
                .iter()
                .all(|b| !a.is_same(b, self.policy))
        })
    }

    fn position(&self, item: &T) -> Result<usize, Error> {
        self.items
            .iter()
            .position(|x| x == item)
            .ok_or(Error::EntityNotFound(T::KIND))
    }
}

impl<'a, T> IntoIterator for &'a UniqueList<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A minimal entity: identity is the key, equality covers the value too.
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Entry {
        key: &'static str,
        value: u32,
    }

    impl Identity for Entry {
        const KIND: &'static str = "entry";

        fn is_same(&self, other: &Self, policy: NameMatch) -> bool {
            match policy {
                NameMatch::Exact => self.key == other.key,
                NameMatch::IgnoreCase => self.key.eq_ignore_ascii_case(other.key),
            }
        }
    }

    const fn entry(key: &'static str, value: u32) -> Entry {
        Entry { key, value }
    }

    fn keys(list: &UniqueList<Entry>) -> Vec<&'static str> {
        list.iter().map(|e| e.key).collect()
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut list = UniqueList::default();
        list.add(entry("b", 1)).unwrap();
        list.add(entry("a", 2)).unwrap();
        list.add(entry("c", 3)).unwrap();

        assert_eq!(keys(&list), ["b", "a", "c"]);
    }

    #[test]
    fn add_rejects_same_identity() {
        let mut list = UniqueList::default();
        list.add(entry("a", 1)).unwrap();

        assert_eq!(
            list.add(entry("A", 2)),
            Err(Error::DuplicateEntity("entry"))
        );
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn exact_policy_treats_case_as_distinct() {
        let mut list = UniqueList::new(NameMatch::Exact);
        list.add(entry("a", 1)).unwrap();
        list.add(entry("A", 1)).unwrap();

        assert_eq!(list.len(), 2);
    }

    #[test]
    fn set_replaces_in_place() {
        let mut list = UniqueList::default();
        list.add(entry("a", 1)).unwrap();
        list.add(entry("b", 2)).unwrap();
        list.add(entry("c", 3)).unwrap();

        list.set(&entry("b", 2), entry("d", 4)).unwrap();

        assert_eq!(keys(&list), ["a", "d", "c"]);
    }

    #[test]
    fn set_allows_replacement_with_same_identity() {
        let mut list = UniqueList::default();
        list.add(entry("a", 1)).unwrap();

        list.set(&entry("a", 1), entry("a", 9)).unwrap();

        assert_eq!(list.as_slice(), [entry("a", 9)]);
    }

    #[test]
    fn set_rejects_collision_with_other_element() {
        let mut list = UniqueList::default();
        list.add(entry("a", 1)).unwrap();
        list.add(entry("b", 2)).unwrap();

        let err = list.set(&entry("a", 1), entry("b", 5)).unwrap_err();

        assert_eq!(err, Error::DuplicateEntity("entry"));
        assert_eq!(list.as_slice(), [entry("a", 1), entry("b", 2)]);
    }

    #[test]
    fn set_missing_target_fails() {
        let mut list = UniqueList::default();
        list.add(entry("a", 1)).unwrap();

        let err = list.set(&entry("a", 2), entry("z", 0)).unwrap_err();

        assert_eq!(err, Error::EntityNotFound("entry"));
    }

    #[test]
    fn remove_returns_element() {
        let mut list = UniqueList::default();
        list.add(entry("a", 1)).unwrap();
        list.add(entry("b", 2)).unwrap();

        assert_eq!(list.remove(&entry("a", 1)), Ok(entry("a", 1)));
        assert_eq!(keys(&list), ["b"]);
        assert_eq!(
            list.remove(&entry("a", 1)),
            Err(Error::EntityNotFound("entry"))
        );
    }

    #[test]
    fn set_all_rejects_internal_duplicates() {
        let mut list = UniqueList::default();
        list.add(entry("x", 0)).unwrap();

        let err = list
            .set_all(vec![entry("a", 1), entry("b", 2), entry("A", 3)])
            .unwrap_err();

        assert_eq!(err, Error::DuplicateList("entry"));
        assert_eq!(keys(&list), ["x"]);
    }

    #[test]
    fn set_all_replaces_contents_in_order() {
        let mut list = UniqueList::default();
        list.add(entry("x", 0)).unwrap();

        list.set_all(vec![entry("c", 1), entry("a", 2)]).unwrap();

        assert_eq!(keys(&list), ["c", "a"]);
    }

    #[test]
    fn no_two_elements_share_identity_after_mixed_operations() {
        let mut list = UniqueList::default();
        let ops: [(&'static str, u32); 6] =
            [("a", 1), ("B", 2), ("b", 3), ("c", 4), ("A", 5), ("d", 6)];
        for (key, value) in ops {
            let _ = list.add(entry(key, value));
        }
        let _ = list.set(&entry("c", 4), entry("d", 7));
        let _ = list.set(&entry("c", 4), entry("e", 8));

        let items = list.as_slice();
        for (i, a) in items.iter().enumerate() {
            for b in &items[i + 1..] {
                assert!(!a.is_same(b, list.policy()), "{a:?} and {b:?} collide");
            }
        }
        assert_eq!(keys(&list), ["a", "B", "e", "d"]);
    }
}
