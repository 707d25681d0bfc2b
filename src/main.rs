mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let command = args.command.unwrap_or(cli::Command::Tui);
    match command {
        cli::Command::Init { force } => commands::init(force),
        cli::Command::Replay {
            script,
            yaml,
            verbose,
        } => commands::replay(script, yaml, verbose),
        cli::Command::Tui => commands::tui(),
    }
}
