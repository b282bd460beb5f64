//! # History Persistence
//!
//! Save/load the exchange history to `~/.askai/responses.json`.
//!
//! The whole history is one JSON array under a single file — every change is
//! a full serialize-and-overwrite, no diffing or partial writes. Writes use
//! atomic rename (write `.tmp`, then `rename()`) for crash safety.
//!
//! A missing or corrupt file is treated as an empty history; loading never
//! surfaces an error to the caller.

use std::fs;
use std::io;
use std::path::PathBuf;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// One prompt/response pair. Immutable once created; only a full reset
/// removes exchanges. Field names match the stored JSON representation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Exchange {
    #[serde(rename = "userPrompt")]
    pub user_prompt: String,
    #[serde(rename = "promptResponse")]
    pub prompt_response: String,
    /// Server-reported creation time (unix seconds).
    pub created: i64,
}

/// Returns `~/.askai/responses.json`, creating the parent directory if needed.
pub fn store_path() -> io::Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?;
    let dir = home.join(".askai");
    fs::create_dir_all(&dir)?;
    Ok(dir.join("responses.json"))
}

/// File-backed store for the exchange history.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Opens the default store at `~/.askai/responses.json`.
    pub fn open_default() -> io::Result<Self> {
        Ok(Self { path: store_path()? })
    }

    /// Opens a store at an explicit path (used by tests).
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the history, most-recent-first as stored.
    ///
    /// A missing file or unparsable contents yields an empty history.
    pub fn load(&self) -> Vec<Exchange> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&json) {
            Ok(history) => history,
            Err(e) => {
                warn!("Stored history is not valid JSON, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Serializes the whole history and overwrites the store file
    /// (via `.tmp` + rename).
    pub fn save(&self, history: &[Exchange]) -> io::Result<()> {
        let tmp_path = self.path.with_extension("tmp");
        let json = serde_json::to_string_pretty(history)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

/// Persist the history to the store, logging instead of failing.
///
/// This is the single entry point for history persistence — called from the
/// TUI whenever the reducer reports the history changed.
pub fn persist(store: &HistoryStore, history: &[Exchange]) {
    if let Err(e) = store.save(history) {
        warn!("Failed to save history: {}", e);
    } else {
        debug!("History saved ({} exchanges)", history.len());
    }
}
