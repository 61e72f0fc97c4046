use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use super::preference::{Form, Pace, Preference, Tag, Temperature};
use super::store::HistoryStore;

/// Mode recorded in every signature.
pub const SIGNATURE_MODE: &str = "meal";

/// Description stored when the user went out to look instead of picking a
/// specific place.
pub const GO_OUT_DESCRIPTION: &str = "";

/// Snapshot of the raw answers behind a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    /// Richness rounded to two decimals
    pub warmth: f32,
    pub mode: String,
    pub temperature: Option<Temperature>,
    pub form: Option<Form>,
    pub pace: Option<Pace>,
}

impl Signature {
    pub fn capture(pref: &Preference) -> Self {
        Self {
            warmth: (pref.richness() * 100.0).round() / 100.0,
            mode: SIGNATURE_MODE.to_string(),
            temperature: pref.temperature,
            form: pref.form,
            pace: pref.pace,
        }
    }
}

/// One committed decision. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// UUID v7, so ids sort by creation time
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<Tag>,
    /// Empty when no specific place was chosen
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<Signature>,
}

impl LogEntry {
    pub fn new(pref: &Preference, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            created_at: Utc::now(),
            tags: pref.derive_tags().tags,
            description: description.into(),
            signature: Some(Signature::capture(pref)),
        }
    }

    pub fn went_out(&self) -> bool {
        self.description.is_empty()
    }
}

/// Newest-first list of past decisions, mirrored to a [`HistoryStore`].
///
/// The store is best effort: unreadable data starts an empty log and failed
/// writes leave the in-memory log as the source of truth for the session.
pub struct HistoryLog<S: HistoryStore> {
    entries: Vec<LogEntry>,
    store: S,
}

impl<S: HistoryStore> HistoryLog<S> {
    pub fn open(store: S) -> Self {
        let entries = match store.load() {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "could not read history, starting empty");
                Vec::new()
            }
        };
        debug!(count = entries.len(), "history loaded");
        Self { entries, store }
    }

    pub fn append(&mut self, entry: LogEntry) {
        self.entries.insert(0, entry);
        self.persist();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.entries) {
            warn!(error = %e, "could not write history, keeping it in memory");
        }
    }
}
