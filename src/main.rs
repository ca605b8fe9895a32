//! `tb`: keep track of contacts and the tasks you share with them.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
