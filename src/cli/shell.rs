//! The interactive shell.
//!
//! Each line is split into words (single or double quotes group words) and
//! parsed with the same grammar as the command line, minus the global flags.

use std::{
    io::{self, BufRead, Write},
    mem,
};

use anyhow::bail;
use clap::Parser;

use super::{Command, Session, terminal::Colorize};

const PROMPT: &str = "tb> ";

#[derive(Debug, clap::Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

pub fn run(session: &mut Session) -> anyhow::Result<()> {
    println!("Type 'help' for a list of commands, 'exit' to leave.");
    let mut stdout = io::stdout();
    let mut lines = io::stdin().lock().lines();

    loop {
        write!(stdout, "{PROMPT}")?;
        stdout.flush()?;

        let Some(line) = lines.next().transpose()? else {
            break;
        };
        let line = line.trim();

        match line {
            "" => {}
            "exit" | "quit" => break,
            _ => handle(session, line)?,
        }
    }

    tracing::debug!("Shell closed");
    Ok(())
}

/// Runs one line. Parse and command errors are reported and the shell carries
/// on; only I/O failures on the terminal itself end the session.
fn handle(session: &mut Session, line: &str) -> anyhow::Result<()> {
    let words = match split(line) {
        Ok(words) => words,
        Err(e) => {
            println!("{}", e.warning());
            return Ok(());
        }
    };

    match Line::try_parse_from(words) {
        Ok(Line { command }) => {
            if let Err(e) = session.run(command) {
                println!("{}", format!("{e:#}").warning());
            }
        }
        // Covers `help` and `--help` as well as genuine mistakes.
        Err(e) => e.print()?,
    }

    Ok(())
}

fn split(line: &str) -> anyhow::Result<Vec<String>> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut quote = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => word.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(mem::take(&mut word));
                    in_word = false;
                }
            }
            None => {
                word.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        bail!("Unclosed {q} quote");
    }
    if in_word {
        words.push(word);
    }
    Ok(words)
}
