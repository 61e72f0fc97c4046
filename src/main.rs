// main.rs
mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands, LogCommands};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Logs go to stderr so prompts and results keep stdout to themselves
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    match args.command.unwrap_or(Commands::Decide) {
        Commands::Decide => cli::handle_decide(args.data_dir).await,
        Commands::Surprise { go } => cli::handle_surprise(go, args.data_dir).await,
        Commands::Candidates => cli::handle_candidates(),
        Commands::Log { json, command } => match command {
            Some(LogCommands::Clear { yes }) => cli::handle_log_clear(yes, args.data_dir),
            None => cli::handle_log(json, args.data_dir),
        },
    }
}
