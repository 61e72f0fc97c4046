use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hirumeshi")]
#[command(about = "Decide what to eat: a few questions, nearby picks and a log of past decisions")]
#[command(version)]
pub struct Cli {
    /// Data directory (defaults to $HIRUMESHI_DATA_DIR, then the config dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Walk through the questionnaire interactively (default)
    Decide,
    /// Skip the questions and pick everything at random
    Surprise {
        /// Open a map search for the result and record it in the log
        #[arg(long)]
        go: bool,
    },
    /// List every candidate place
    Candidates,
    /// Show past decisions, newest first
    Log {
        /// Print the raw entries as JSON
        #[arg(long)]
        json: bool,
        #[command(subcommand)]
        command: Option<LogCommands>,
    },
}

#[derive(Subcommand)]
pub enum LogCommands {
    /// Delete every entry
    Clear {
        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },
}
