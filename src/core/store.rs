use std::cell::RefCell;
use std::path::{Path, PathBuf};

use super::error::Result;
use super::history::LogEntry;

/// File name of the history slot inside the data directory.
pub const HISTORY_FILE: &str = "history.json";

/// A single named slot holding the whole history.
///
/// `save` always replaces the entire collection; implementations must never
/// merge with what is already stored.
pub trait HistoryStore {
    fn load(&self) -> Result<Vec<LogEntry>>;
    fn save(&self, entries: &[LogEntry]) -> Result<()>;
}

/// JSON file storage
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store `history.json` under the given data directory
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(HISTORY_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonFileStore {
    fn load(&self) -> Result<Vec<LogEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, entries: &[LogEntry]) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(entries)?;

        // Write beside the target, then swap it in with one rename.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-process storage
#[derive(Default)]
pub struct MemoryStore {
    slot: RefCell<Vec<LogEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<LogEntry>) -> Self {
        Self {
            slot: RefCell::new(entries),
        }
    }
}

impl HistoryStore for MemoryStore {
    fn load(&self) -> Result<Vec<LogEntry>> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&self, entries: &[LogEntry]) -> Result<()> {
        *self.slot.borrow_mut() = entries.to_vec();
        Ok(())
    }
}
