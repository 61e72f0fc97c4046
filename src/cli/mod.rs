use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use colored::*;
use dialoguer::Confirm;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;
use url::Url;

use hirumeshi::config::Config;
use hirumeshi::core::{
    candidate, plan_map_search, ConfiguredLocation, Event, FlowController, Geolocator, HistoryLog,
    HistoryStore, JsonFileStore, MapSearch,
};
use hirumeshi::formatter::Formatter;

pub use commands::{Cli, Commands, LogCommands};

mod commands;
mod session;

type Flow = FlowController<JsonFileStore, StdRng>;

fn open_flow(config: &Config) -> Flow {
    let history = HistoryLog::open(config.history_store());
    FlowController::new(history, StdRng::from_entropy())
}

fn geolocator(config: &Config) -> Geolocator<ConfiguredLocation> {
    Geolocator::new(config.location.clone())
}

pub async fn handle_decide(data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir).context("Failed to load configuration")?;
    let mut flow = open_flow(&config);
    let geo = geolocator(&config);

    session::run(&config, &mut flow, &geo).await
}

pub async fn handle_surprise(go: bool, data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir).context("Failed to load configuration")?;
    let mut flow = open_flow(&config);

    flow.handle(Event::LongPress)?;
    let tags = flow.derived_tags().clone();
    println!("🎲 {}", Formatter::format_result(flow.preference(), &tags));
    println!();
    print!("{}", Formatter::format_recommendations(&flow.recommendations()));

    let query = flow.query();
    println!("\n🔎 Search: {}", query.bold());

    if go {
        let geo = geolocator(&config);
        if let Err(e) = go_out(&config, &geo, &query).await {
            println!("{}", format!("{:#}", e).yellow());
            return Ok(());
        }
        flow.handle(Event::ShowNearby)?;
        flow.handle(Event::GoOut)?;
        println!("✅ Saved to log");
    }

    Ok(())
}

pub fn handle_candidates() -> Result<()> {
    println!("{}", "Candidates".cyan().bold());
    for c in candidate::all() {
        println!("  {}", Formatter::format_candidate(c));
    }
    Ok(())
}

pub fn handle_log(json: bool, data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir).context("Failed to load configuration")?;
    let log = HistoryLog::open(config.history_store());

    if json {
        println!("{}", serde_json::to_string_pretty(log.entries())?);
        return Ok(());
    }

    print_log(&log);
    Ok(())
}

pub fn handle_log_clear(yes: bool, data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir).context("Failed to load configuration")?;
    let mut log = HistoryLog::open(config.history_store());

    if log.is_empty() {
        println!("Log is already empty.");
        return Ok(());
    }

    let confirmed = yes
        || Confirm::new()
            .with_prompt(format!("Delete all {} entries?", log.len()))
            .default(false)
            .interact()?;
    if !confirmed {
        println!("Nothing deleted.");
        return Ok(());
    }

    log.clear();
    println!("🗑️  Log cleared");
    Ok(())
}

pub(crate) fn print_log<S: HistoryStore>(log: &HistoryLog<S>) {
    if log.is_empty() {
        println!("No decisions yet.");
        return;
    }

    println!("📜 {} ({}):", "Decision log".cyan().bold(), log.len());
    for entry in log.entries() {
        println!("  {}", Formatter::format_entry(entry));
    }
}

/// Resolve the location, build the map search and hand it to the browser.
pub(crate) async fn go_out(
    config: &Config,
    geo: &Geolocator<ConfiguredLocation>,
    query: &str,
) -> Result<MapSearch> {
    let search = plan_map_search(geo, &config.map_base_url, config.map_zoom, query)
        .await
        .context("Failed to build map search URL")?;

    if let Some(notice) = &search.notice {
        println!("📍 {}", notice.to_string().yellow());
    }
    println!("🗺️  {}", search.url);

    if config.open_browser {
        if let Err(e) = open_url(&search.url) {
            println!("{}", format!("Could not open a browser: {}", e).yellow());
        }
    }
    Ok(search)
}

fn open_url(url: &Url) -> std::io::Result<()> {
    let mut cmd = opener()?;
    debug!(url = %url, "opening map search");
    cmd.arg(url.as_str())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}

#[cfg(target_os = "macos")]
fn opener() -> std::io::Result<Command> {
    Ok(Command::new("open"))
}

#[cfg(target_os = "windows")]
fn opener() -> std::io::Result<Command> {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]);
    Ok(cmd)
}

#[cfg(all(unix, not(target_os = "macos")))]
fn opener() -> std::io::Result<Command> {
    Ok(Command::new("xdg-open"))
}

#[cfg(not(any(unix, target_os = "windows")))]
fn opener() -> std::io::Result<Command> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "no URL opener for this platform",
    ))
}
