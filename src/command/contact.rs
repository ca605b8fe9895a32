use nonempty::NonEmpty;
use tracing::instrument;

use crate::{
    Model,
    command::{CommandResult, Error, resolve},
    domain::{Contact, ContactChanges, Index, unique_list},
    model::Predicate,
};

const KIND: &str = "contact";

/// Adds a new contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Add {
    contact: Contact,
}

impl Add {
    /// Creates the command.
    #[must_use]
    pub const fn new(contact: Contact) -> Self {
        Self { contact }
    }

    /// Runs the command.
    ///
    /// # Errors
    ///
    /// Fails if a contact with the same name already exists.
    #[instrument(level = "debug", skip(model))]
    pub fn execute(self, model: &mut Model) -> Result<CommandResult, Error> {
        if model.has_contact(&self.contact) {
            return Err(unique_list::Error::DuplicateEntity(KIND).into());
        }

        let message = format!("New contact added: {}", self.contact);
        model.add_contact(self.contact)?;
        Ok(CommandResult::new(message))
    }
}

/// Deletes a contact by its position in the displayed list.
///
/// Tasks that refer to the contact are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delete {
    index: Index,
}

impl Delete {
    /// Creates the command.
    #[must_use]
    pub const fn new(index: Index) -> Self {
        Self { index }
    }

    /// Runs the command.
    ///
    /// # Errors
    ///
    /// Fails if the index is outside the displayed list.
    #[instrument(level = "debug", skip(model))]
    pub fn execute(self, model: &mut Model) -> Result<CommandResult, Error> {
        let target = resolve(KIND, self.index, &model.filtered_contacts())?.clone();

        model.remove_contact(&target)?;
        Ok(CommandResult::new(format!("Deleted contact: {target}")))
    }
}

/// Edits a contact by its position in the displayed list.
///
/// Renaming a contact does not rename the contact on its tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    index: Index,
    changes: ContactChanges,
}

impl Edit {
    /// Creates the command.
    #[must_use]
    pub const fn new(index: Index, changes: ContactChanges) -> Self {
        Self { index, changes }
    }

    /// Runs the command.
    ///
    /// # Errors
    ///
    /// - [`Error::ValidationFailure`] if no field is being changed
    /// - [`Error::InvalidIndex`] if the index is outside the displayed list
    /// - [`Error::Book`] if the new name belongs to another contact
    #[instrument(level = "debug", skip(model))]
    pub fn execute(self, model: &mut Model) -> Result<CommandResult, Error> {
        if self.changes.is_empty() {
            return Err(Error::ValidationFailure(
                "at least one field to edit must be provided".to_string(),
            ));
        }

        let target = resolve(KIND, self.index, &model.filtered_contacts())?.clone();
        let edited = target.edited(self.changes);

        let renamed = !target.name().matches(edited.name(), model.book().policy());
        if renamed && model.has_contact(&edited) {
            return Err(unique_list::Error::DuplicateEntity(KIND).into());
        }

        let message = format!("Edited contact: {edited}");
        model.set_contact(&target, edited)?;
        Ok(CommandResult::new(message))
    }
}

/// Shows every contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct List;

impl List {
    /// Runs the command. Never fails and never commits.
    pub fn execute(self, model: &mut Model) -> CommandResult {
        model.update_filtered_contact_list(Predicate::all());
        CommandResult::new("Listed all contacts")
    }
}

/// Shows contacts with a name containing any of the keywords as a whole word.
///
/// Matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Find {
    keywords: NonEmpty<String>,
}

impl Find {
    /// Creates the command.
    #[must_use]
    pub const fn new(keywords: NonEmpty<String>) -> Self {
        Self { keywords }
    }

    /// Runs the command. Never fails and never commits.
    pub fn execute(self, model: &mut Model) -> CommandResult {
        let keywords: Vec<String> = self.keywords.iter().map(|k| k.to_lowercase()).collect();
        model.update_filtered_contact_list(Predicate::new(move |contact: &Contact| {
            contact
                .name()
                .words()
                .any(|word| keywords.contains(&word.to_lowercase()))
        }));

        let count = model.filtered_contacts().len();
        CommandResult::new(format!("{count} contact(s) listed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::test_support::*;

    fn assert_unchanged(model: &Model, before: &crate::domain::TaskBook, snapshots: usize) {
        assert_eq!(model.book(), before);
        assert_eq!(model.history_len(), snapshots);
    }

    #[test]
    fn add_reports_new_contact() {
        let mut model = Model::default();

        let result = Add::new(contact("Alice").with_phone("555"))
            .execute(&mut model)
            .unwrap();

        assert_eq!(result.message, "New contact added: Alice; Phone: 555");
        assert!(!result.show_all);
        assert_eq!(model.history_len(), 2);
    }

    #[test]
    fn add_duplicate_under_ignore_case() {
        let mut model = populated_model();
        let before = model.book().clone();

        let err = Add::new(contact("aLiCe")).execute(&mut model).unwrap_err();

        assert_eq!(err, Error::Book(unique_list::Error::DuplicateEntity("contact")));
        assert_unchanged(&model, &before, 1);
    }

    #[test]
    fn delete_valid_index_unfiltered() {
        let mut model = populated_model();

        let result = Delete::new(index(1)).execute(&mut model).unwrap();

        assert_eq!(result.message, "Deleted contact: Alice");
        assert_eq!(model.filtered_contacts(), [&contact("Bob"), &contact("Carol")]);
        assert!(model.can_undo());
    }

    #[test]
    fn delete_invalid_index_unfiltered() {
        let mut model = populated_model();
        let before = model.book().clone();

        let err = Delete::new(index(4)).execute(&mut model).unwrap_err();

        assert_eq!(
            err,
            Error::InvalidIndex {
                kind: "contact",
                index: index(4),
                len: 3
            }
        );
        assert_unchanged(&model, &before, 1);
    }

    #[test]
    fn delete_resolves_against_filtered_list() {
        let mut model = populated_model();
        Find::new(NonEmpty::new("carol".to_string())).execute(&mut model);

        Delete::new(index(1)).execute(&mut model).unwrap();

        assert_eq!(
            model.book().contacts(),
            [contact("Alice"), contact("Bob")]
        );
        assert!(model.filtered_contacts().is_empty());
    }

    #[test]
    fn delete_index_outside_filtered_list_but_inside_book() {
        let mut model = populated_model();
        Find::new(NonEmpty::new("bob".to_string())).execute(&mut model);

        let err = Delete::new(index(2)).execute(&mut model).unwrap_err();

        assert!(matches!(err, Error::InvalidIndex { len: 1, .. }));
        assert_eq!(model.book().contacts().len(), 3);
    }

    #[test]
    fn edit_updates_fields_in_place() {
        let mut model = populated_model();

        Edit::new(
            index(2),
            ContactChanges {
                email: Some("bob@example.com".to_string()),
                ..ContactChanges::default()
            },
        )
        .execute(&mut model)
        .unwrap();

        let bob = &model.book().contacts()[1];
        assert_eq!(bob.name().as_str(), "Bob");
        assert_eq!(bob.email(), Some("bob@example.com"));
    }

    #[test]
    fn edit_to_existing_name_fails() {
        let mut model = populated_model();
        let before = model.book().clone();

        let err = Edit::new(
            index(1),
            ContactChanges {
                name: Some(name("BOB")),
                ..ContactChanges::default()
            },
        )
        .execute(&mut model)
        .unwrap_err();

        assert_eq!(err, Error::Book(unique_list::Error::DuplicateEntity("contact")));
        assert_unchanged(&model, &before, 1);
    }

    #[test]
    fn edit_changing_only_case_of_own_name() {
        let mut model = populated_model();

        Edit::new(
            index(1),
            ContactChanges {
                name: Some(name("ALICE")),
                ..ContactChanges::default()
            },
        )
        .execute(&mut model)
        .unwrap();

        assert_eq!(model.book().contacts()[0].name().as_str(), "ALICE");
    }

    #[test]
    fn edit_without_changes_fails() {
        let mut model = populated_model();

        let err = Edit::new(index(1), ContactChanges::default())
            .execute(&mut model)
            .unwrap_err();

        assert!(matches!(err, Error::ValidationFailure(_)));
        assert_eq!(model.history_len(), 1);
    }

    #[test]
    fn find_matches_whole_words_case_insensitively() {
        let mut model = Model::default();
        for person in ["Alice Tan", "Bob Lim", "Tanya Ng"] {
            model.add_contact(contact(person)).unwrap();
        }
        let snapshots = model.history_len();

        let result = Find::new(NonEmpty::new("TAN".to_string())).execute(&mut model);

        assert_eq!(result.message, "1 contact(s) listed");
        assert_eq!(model.filtered_contacts(), [&contact("Alice Tan")]);
        assert_eq!(model.history_len(), snapshots);

        List.execute(&mut model);
        assert_eq!(model.filtered_contacts().len(), 3);
    }
}
