use std::fmt;

use crate::domain::{Identity, Name, NameMatch};

/// A person the user keeps in the task book.
///
/// The name is the contact's identity. Phone, email and address are free-form
/// text and are not interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    name: Name,
    phone: Option<String>,
    email: Option<String>,
    address: Option<String>,
}

impl Contact {
    /// Creates a contact with only a name.
    #[must_use]
    pub const fn new(name: Name) -> Self {
        Self {
            name,
            phone: None,
            email: None,
            address: None,
        }
    }

    /// Returns a copy of this contact with the given phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Returns a copy of this contact with the given email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Returns a copy of this contact with the given postal address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// The contact's name.
    #[must_use]
    pub const fn name(&self) -> &Name {
        &self.name
    }

    /// The contact's phone number, if known.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// The contact's email address, if known.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// The contact's postal address, if known.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Applies `changes`, returning the edited contact.
    ///
    /// Fields not present in `changes` are carried over unchanged.
    #[must_use]
    pub fn edited(&self, changes: ContactChanges) -> Self {
        Self {
            name: changes.name.unwrap_or_else(|| self.name.clone()),
            phone: changes.phone.or_else(|| self.phone.clone()),
            email: changes.email.or_else(|| self.email.clone()),
            address: changes.address.or_else(|| self.address.clone()),
        }
    }
}

impl Identity for Contact {
    const KIND: &'static str = "contact";

    fn is_same(&self, other: &Self, policy: NameMatch) -> bool {
        self.name.matches(&other.name, policy)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(phone) = &self.phone {
            write!(f, "; Phone: {phone}")?;
        }
        if let Some(email) = &self.email {
            write!(f, "; Email: {email}")?;
        }
        if let Some(address) = &self.address {
            write!(f, "; Address: {address}")?;
        }
        Ok(())
    }
}

/// A set of field updates for a contact. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactChanges {
    /// Replacement name.
    pub name: Option<Name>,
    /// Replacement phone number.
    pub phone: Option<String>,
    /// Replacement email address.
    pub email: Option<String>,
    /// Replacement postal address.
    pub address: Option<String>,
}

impl ContactChanges {
    /// Whether no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.email.is_none() && self.address.is_none()
    }
}
