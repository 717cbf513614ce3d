//! Bounded, persisted log of completed translations.
//!
//! Newest entries sit at the front. The log is capped at
//! [`HISTORY_CAPACITY`] records and rewritten in full to a single JSON file
//! on every accepted append; the file uses the same camelCase field names as
//! the history the reference web app kept in browser storage.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::language::Language;

/// Maximum number of records kept in the log.
pub const HISTORY_CAPACITY: usize = 50;

/// How many records the compact history display shows.
pub const VISIBLE_HISTORY: usize = 6;

/// One completed translation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRecord {
    pub id: String,
    pub source_text: String,
    pub translated_text: String,
    pub source_lang: Language,
    pub target_lang: Language,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

impl TranslationRecord {
    pub fn new(
        source_text: impl Into<String>,
        translated_text: impl Into<String>,
        source_lang: Language,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            source_text: source_text.into(),
            translated_text: translated_text.into(),
            source_lang,
            target_lang: Language::Odia,
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

/// Owner of the history log and its on-disk copy.
pub struct HistoryStore {
    entries: Vec<TranslationRecord>,
    path: PathBuf,
}

impl HistoryStore {
    /// Read the persisted log, or start empty when the file is missing or
    /// unreadable. Never fails: a corrupt file costs the old history, not
    /// the session.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(body) => match serde_json::from_str::<Vec<TranslationRecord>>(&body) {
                Ok(mut entries) => {
                    entries.truncate(HISTORY_CAPACITY);
                    entries
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Discarding unreadable history file");
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Self { entries, path }
    }

    /// Insert `record` at the front, evicting beyond the cap, and persist.
    ///
    /// A record whose source text equals the current front entry's source
    /// text is rejected as a no-op; only the single most recent entry is
    /// checked, so the same text may recur deeper in the log.
    pub fn append(&mut self, record: TranslationRecord) {
        if self
            .entries
            .first()
            .is_some_and(|front| front.source_text == record.source_text)
        {
            return;
        }
        self.entries.insert(0, record);
        self.entries.truncate(HISTORY_CAPACITY);
        self.persist();
    }

    /// Empty the log and remove the persisted file.
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), error = %e, "Failed to remove history file");
            }
        }
    }

    /// All records, newest first.
    pub fn entries(&self) -> &[TranslationRecord] {
        &self.entries
    }

    /// The records the compact history panel shows.
    pub fn visible(&self) -> &[TranslationRecord] {
        &self.entries[..self.entries.len().min(VISIBLE_HISTORY)]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) {
        match serde_json::to_string(&self.entries) {
            Ok(body) => {
                if let Err(e) = fs::write(&self.path, body) {
                    warn!(path = %self.path.display(), error = %e, "Failed to write history file");
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to serialize history");
            }
        }
    }
}
