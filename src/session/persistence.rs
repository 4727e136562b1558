//! Durable storage for conversation histories
//!
//! The whole `histories` collection lives under one named slot in an
//! embedded `sled` database: it is read once at startup and rewritten
//! wholesale on every history mutation. There is no partial write and no
//! concurrent-writer coordination; last write wins.

use crate::error::{KaiwaError, Result};
use crate::session::ChatHistory;
use directories::ProjectDirs;
use sled::Db;
use std::path::PathBuf;

/// Key of the single slot holding the serialized histories array
const SLOT_KEY: &str = "chat_histories";

/// Single-slot history store
///
/// # Examples
///
/// ```no_run
/// use kaiwa::session::HistorySlot;
///
/// # fn main() -> kaiwa::error::Result<()> {
/// let slot = HistorySlot::open_default()?;
/// let histories = slot.load();
/// slot.save(&histories)?;
/// # Ok(())
/// # }
/// ```
pub struct HistorySlot {
    db: Db,
}

impl HistorySlot {
    /// Open the slot at its default location
    ///
    /// The database lives in the user data directory. `KAIWA_HISTORY_DB`
    /// overrides the location, which keeps callers unchanged while tests
    /// or scripts point the binary at an alternate database.
    ///
    /// # Errors
    ///
    /// Returns `KaiwaError::Storage` if the data directory cannot be
    /// determined or the database cannot be opened
    pub fn open_default() -> Result<Self> {
        if let Ok(override_path) = std::env::var("KAIWA_HISTORY_DB") {
            return Self::open(override_path);
        }

        let proj_dirs = ProjectDirs::from("com", "kaiwa", "kaiwa")
            .ok_or_else(|| KaiwaError::Storage("Could not determine data directory".into()))?;
        Self::open(proj_dirs.data_dir().join("history"))
    }

    /// Open the slot at the given path
    ///
    /// Primarily useful for tests and for the `--storage-path` override.
    ///
    /// # Errors
    ///
    /// Returns `KaiwaError::Storage` if the database cannot be opened
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    KaiwaError::Storage(format!("Failed to create data directory: {}", e))
                })?;
            }
        }

        let db = sled::open(&path)
            .map_err(|e| KaiwaError::Storage(format!("Failed to open database: {}", e)))?;

        tracing::debug!("Opened history slot at {}", path.display());

        Ok(Self { db })
    }

    /// Load the persisted histories
    ///
    /// Reads the slot once. A missing slot yields an empty set. A
    /// malformed blob also yields an empty set with a logged warning
    /// rather than propagating a parse failure; the next save overwrites
    /// the corrupt value.
    pub fn load(&self) -> Vec<ChatHistory> {
        let bytes = match self.db.get(SLOT_KEY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read history slot: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(histories) => histories,
            Err(e) => {
                tracing::warn!("Persisted history is malformed, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Overwrite the slot with the given histories
    ///
    /// # Errors
    ///
    /// Returns `KaiwaError::Storage` if serialization or the write fails
    pub fn save(&self, histories: &[ChatHistory]) -> Result<()> {
        let value = serde_json::to_vec(histories)
            .map_err(|e| KaiwaError::Storage(format!("Serialization failed: {}", e)))?;

        self.db
            .insert(SLOT_KEY, value)
            .map_err(|e| KaiwaError::Storage(format!("Insert failed: {}", e)))?;

        self.db
            .flush()
            .map_err(|e| KaiwaError::Storage(format!("Flush failed: {}", e)))?;

        Ok(())
    }
}
