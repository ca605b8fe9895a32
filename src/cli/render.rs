//! Printing the displayed contact and task lists.
//!
//! Entries are numbered from 1; these are the indices that `delete`, `edit`,
//! `mark` and `unmark` accept. Lists whose positions would not match those
//! indices are bulleted instead.

use taskbook::{Contact, Model, Task};

use super::terminal::{self, Colorize};

pub fn contacts(model: &Model, numbered: bool) {
    for line in contact_lines(model, numbered, terminal::is_narrow()) {
        println!("{line}");
    }
}

pub fn tasks(model: &Model, numbered: bool) {
    for line in task_lines(model, numbered) {
        println!("{line}");
    }
}

fn marker(position: usize, numbered: bool) -> String {
    if numbered {
        format!("{position:>3}.")
    } else {
        "  -".to_string()
    }
}

fn contact_lines(model: &Model, numbered: bool, narrow: bool) -> Vec<String> {
    let contacts = model.filtered_contacts();
    if contacts.is_empty() {
        return vec!["No contacts to show.".dim()];
    }

    let mut lines = Vec::with_capacity(contacts.len());
    for (position, contact) in (1..).zip(contacts) {
        let details = details(contact);
        let name = contact.name().info();
        let marker = marker(position, numbered);
        if details.is_empty() {
            lines.push(format!("{marker} {name}"));
        } else if narrow {
            lines.push(format!("{marker} {name}"));
            lines.extend(details.into_iter().map(|d| format!("     {}", d.dim())));
        } else {
            lines.push(format!("{marker} {name}  {}", details.join(", ").dim()));
        }
    }
    lines
}

fn details(contact: &Contact) -> Vec<String> {
    [
        ("phone", contact.phone()),
        ("email", contact.email()),
        ("address", contact.address()),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.map(|v| format!("{label}: {v}")))
    .collect()
}

fn task_lines(model: &Model, numbered: bool) -> Vec<String> {
    let tasks = model.filtered_tasks();
    if tasks.is_empty() {
        return vec!["No tasks to show.".dim()];
    }

    (1..)
        .zip(tasks)
        .map(|(position, task)| {
            let mut line = format!("{} {}", marker(position, numbered), task_text(task));
            // Deleting or renaming a contact leaves its tasks pointing at nothing.
            if model.find_contact(task.name()).is_none() {
                line.push_str(&format!(" {}", "(not in contacts)".dim()));
            }
            line
        })
        .collect()
}

fn task_text(task: &Task) -> String {
    if task.is_done() {
        task.success()
    } else {
        task.to_string()
    }
}
