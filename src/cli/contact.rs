use anyhow::Context;
use nonempty::NonEmpty;
use taskbook::{
    Contact, Index, Name,
    command::{self, contact},
    domain::ContactChanges,
};

use super::View;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Add a contact
    Add {
        /// The contact's name (must be unique)
        name: Name,

        #[arg(short, long)]
        phone: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        address: Option<String>,
    },

    /// Delete the contact at a position in the list
    Delete {
        /// Position in the contact list, starting at 1. In the shell this is the
        /// last displayed list; otherwise the full list shown by `contact list`
        index: Index,
    },

    /// Edit the contact at a position in the list
    Edit {
        /// Position in the contact list, starting at 1. In the shell this is the
        /// last displayed list; otherwise the full list shown by `contact list`
        index: Index,

        /// A new name (must be unique)
        #[arg(short, long)]
        name: Option<Name>,

        #[arg(short, long)]
        phone: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        address: Option<String>,
    },

    /// Show every contact
    List,

    /// Show contacts whose names contain any of the given words
    Find {
        #[arg(required = true)]
        keywords: Vec<String>,
    },
}

impl Command {
    pub(super) const fn view(&self) -> Option<View> {
        match self {
            Self::List => Some(View::Contacts),
            Self::Find { .. } => Some(View::ContactMatches),
            Self::Add { .. } | Self::Delete { .. } | Self::Edit { .. } => None,
        }
    }

    pub(super) fn into_command(self) -> anyhow::Result<command::Command> {
        Ok(match self {
            Self::Add {
                name,
                phone,
                email,
                address,
            } => {
                let mut contact = Contact::new(name);
                if let Some(phone) = phone {
                    contact = contact.with_phone(phone);
                }
                if let Some(email) = email {
                    contact = contact.with_email(email);
                }
                if let Some(address) = address {
                    contact = contact.with_address(address);
                }
                contact::Add::new(contact).into()
            }
            Self::Delete { index } => contact::Delete::new(index).into(),
            Self::Edit {
                index,
                name,
                phone,
                email,
                address,
            } => contact::Edit::new(
                index,
                ContactChanges {
                    name,
                    phone,
                    email,
                    address,
                },
            )
            .into(),
            Self::List => contact::List.into(),
            Self::Find { keywords } => {
                let keywords = NonEmpty::from_vec(keywords).context("no keywords given")?;
                contact::Find::new(keywords).into()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use test_case::test_case;

    use super::*;

    #[derive(Debug, clap::Parser)]
    #[command(no_binary_name = true)]
    struct Harness {
        #[command(subcommand)]
        command: Command,
    }

    fn parse(args: &[&str]) -> Result<Command, clap::Error> {
        Harness::try_parse_from(args).map(|h| h.command)
    }

    #[test]
    fn add_with_details() {
        let command = parse(&["add", "Alice Tan", "-p", "91234567", "--email", "a@b.c"])
            .unwrap()
            .into_command()
            .unwrap();

        let expected = Contact::new(Name::new("Alice Tan").unwrap())
            .with_phone("91234567")
            .with_email("a@b.c");
        assert_eq!(command, contact::Add::new(expected).into());
    }

    #[test]
    fn edit_collects_changes() {
        let command = parse(&["edit", "2", "--name", "Bobby"])
            .unwrap()
            .into_command()
            .unwrap();

        let changes = ContactChanges {
            name: Some(Name::new("Bobby").unwrap()),
            ..ContactChanges::default()
        };
        assert_eq!(
            command,
            contact::Edit::new(Index::from_one_based(2).unwrap(), changes).into()
        );
    }

    #[test_case(&["add", "  "]; "blank name")]
    #[test_case(&["delete", "0"]; "zero index")]
    #[test_case(&["delete", "-1"]; "negative index")]
    #[test_case(&["find"]; "no keywords")]
    fn rejected(args: &[&str]) {
        assert!(parse(args).is_err());
    }

    #[test_case(&["list"], Some(View::Contacts))]
    #[test_case(&["find", "ali"], Some(View::ContactMatches))]
    #[test_case(&["delete", "1"], None)]
    fn views(args: &[&str], view: Option<View>) {
        assert_eq!(parse(args).unwrap().view(), view);
    }
}
