use std::path::{Path, PathBuf};

mod contact;
mod render;
mod shell;
mod task;
mod terminal;

use anyhow::{Context, bail};
use clap::ArgAction;
use taskbook::{Config, JsonFile, Model, command};
use terminal::Colorize;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The directory holding the task book and its config.toml
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    /// Run a single command; without one, start an interactive shell
    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        match self.command {
            Some(command) => Session::open(&self.root, Mode::OneShot)?.run(command),
            None => shell::run(&mut Session::open(&self.root, Mode::Shell)?),
        }
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Add, edit, remove and look up contacts
    #[command(subcommand)]
    Contact(contact::Command),

    /// Add, edit, remove and look up tasks
    #[command(subcommand)]
    Task(task::Command),

    /// Revert the last change (shell only)
    Undo,

    /// Reapply the last undone change (shell only)
    Redo,
}

/// Which list to print after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Contacts,
    ContactMatches,
    Tasks,
    TaskMatches,
}

impl Command {
    const fn view(&self) -> Option<View> {
        match self {
            Self::Contact(command) => command.view(),
            Self::Task(command) => command.view(),
            Self::Undo | Self::Redo => None,
        }
    }

    /// Whether the command walks the undo history, which only outlives a
    /// single command inside the shell.
    const fn uses_history(&self) -> bool {
        matches!(self, Self::Undo | Self::Redo)
    }

    fn into_command(self) -> anyhow::Result<command::Command> {
        Ok(match self {
            Self::Contact(command) => command.into_command()?,
            Self::Task(command) => command.into_command()?,
            Self::Undo => command::Undo.into(),
            Self::Redo => command::Redo.into(),
        })
    }
}

/// How long a [`Session`] lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// A single command from the command line. Filters and history start
    /// fresh, so indices refer to the full lists.
    OneShot,
    /// Every line of the interactive shell, sharing filters and history.
    Shell,
}

/// The loaded task book and where it is saved.
pub struct Session {
    model: Model,
    store: JsonFile,
    mode: Mode,
}

impl Session {
    #[instrument]
    fn open(root: &Path, mode: Mode) -> anyhow::Result<Self> {
        let config = Config::load_or_default(root);
        let store = JsonFile::new(root.join(config.data_file()));
        let book = store
            .load(config.name_matching())
            .with_context(|| format!("Failed to load task book from {}", store.path().display()))?;

        Ok(Self {
            model: Model::with_history_limit(book, config.history_limit()),
            store,
            mode,
        })
    }

    /// Executes one command, prints its outcome and saves if anything changed.
    fn run(&mut self, command: Command) -> anyhow::Result<()> {
        if self.mode == Mode::OneShot && command.uses_history() {
            bail!("undo and redo only work inside the shell: run `tb` with no command to start it");
        }

        let view = command.view();
        let command = command.into_command()?;
        let mutating = command.is_mutating();

        let result = command.execute(&mut self.model)?;

        if mutating {
            self.store
                .save(self.model.book())
                .with_context(|| format!("Failed to save to {}", self.store.path().display()))?;
        }

        println!("{}", result.message.success());
        // Outside the shell a filtered view is gone once the process exits,
        // so its positions must not look like usable indices.
        let numbered = self.mode == Mode::Shell;
        match view {
            Some(View::Contacts) => render::contacts(&self.model, true),
            Some(View::ContactMatches) => render::contacts(&self.model, numbered),
            Some(View::Tasks) => render::tasks(&self.model, true),
            Some(View::TaskMatches) => render::tasks(&self.model, numbered),
            None => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tempfile::tempdir;

    use super::*;

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(std::iter::once("tb").chain(args.iter().copied()))
            .unwrap()
            .command
            .unwrap()
    }

    #[test]
    fn one_shot_commands_persist() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();

        let mut session = Session::open(root, Mode::OneShot).unwrap();
        session
            .run(parse(&["contact", "add", "Alice", "--phone", "555"]))
            .unwrap();
        session
            .run(parse(&[
                "task",
                "deadline",
                "--to",
                "Alice",
                "-d",
                "Quarterly report",
                "--date",
                "2024-01-01",
            ]))
            .unwrap();

        let reopened = Session::open(root, Mode::OneShot).unwrap();
        assert_eq!(reopened.model.book().contacts().len(), 1);
        assert_eq!(reopened.model.book().tasks().len(), 1);
        assert!(!reopened.model.can_undo());
    }

    #[test]
    fn undo_is_saved() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();

        let mut session = Session::open(root, Mode::Shell).unwrap();
        session.run(parse(&["contact", "add", "Bob"])).unwrap();
        session.run(parse(&["undo"])).unwrap();

        let reopened = Session::open(root, Mode::OneShot).unwrap();
        assert!(reopened.model.book().contacts().is_empty());
    }

    fn contact_names(root: &Path) -> Vec<String> {
        Session::open(root, Mode::OneShot)
            .unwrap()
            .model
            .book()
            .contacts()
            .iter()
            .map(|c| c.name().to_string())
            .collect()
    }

    #[test]
    fn one_shot_indices_ignore_an_earlier_find() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        for name in ["Alice", "Bob", "Carol"] {
            Session::open(root, Mode::OneShot)
                .unwrap()
                .run(parse(&["contact", "add", name]))
                .unwrap();
        }

        Session::open(root, Mode::OneShot)
            .unwrap()
            .run(parse(&["contact", "find", "carol"]))
            .unwrap();
        Session::open(root, Mode::OneShot)
            .unwrap()
            .run(parse(&["contact", "delete", "3"]))
            .unwrap();

        assert_eq!(contact_names(root), ["Alice", "Bob"]);
    }

    #[test]
    fn shell_indices_follow_the_last_find() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        let mut session = Session::open(root, Mode::Shell).unwrap();
        for name in ["Alice", "Bob", "Carol"] {
            session.run(parse(&["contact", "add", name])).unwrap();
        }

        session.run(parse(&["contact", "find", "carol"])).unwrap();
        session.run(parse(&["contact", "delete", "1"])).unwrap();

        assert_eq!(contact_names(root), ["Alice", "Bob"]);
    }

    #[test]
    fn one_shot_undo_and_redo_point_to_the_shell() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        Session::open(root, Mode::OneShot)
            .unwrap()
            .run(parse(&["contact", "add", "Bob"]))
            .unwrap();

        for command in ["undo", "redo"] {
            let err = Session::open(root, Mode::OneShot)
                .unwrap()
                .run(parse(&[command]))
                .unwrap_err();
            assert!(err.to_string().contains("only work inside the shell"));
        }
        assert_eq!(contact_names(root), ["Bob"]);
    }

    #[test]
    fn failed_command_is_not_saved() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();

        let mut session = Session::open(root, Mode::OneShot).unwrap();
        let err = session
            .run(parse(&[
                "task",
                "event",
                "--from",
                "Nobody",
                "-d",
                "Lunch",
                "--date",
                "2024-01-01",
            ]))
            .unwrap_err();

        assert!(err.to_string().contains("Nobody"));
        assert!(!root.join("taskbook.json").exists());
    }

    #[test]
    fn config_selects_data_file() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        std::fs::write(
            root.join("config.toml"),
            "_version = \"1\"\ndata_file = \"data/book.json\"\n",
        )
        .unwrap();

        let mut session = Session::open(root, Mode::OneShot).unwrap();
        session.run(parse(&["contact", "add", "Carol"])).unwrap();

        assert!(root.join("data").join("book.json").exists());
    }
}
