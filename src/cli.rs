use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dragboard", version, about = "Drag-and-drop kanban board")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a project config in the current directory
    Init {
        /// Overwrite an existing config with defaults
        #[arg(long)]
        force: bool,
    },
    /// Run a YAML script of board commands and drag events
    Replay {
        /// Path to the script file
        script: PathBuf,
        /// Print the final board as YAML instead of text
        #[arg(long)]
        yaml: bool,
        /// Print each step's outcome and mirror logs to stderr
        #[arg(long, short = 'v')]
        verbose: bool,
    },
    /// Launch the interactive TUI
    Tui,
}
