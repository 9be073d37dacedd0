use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::utils::app_paths::AppPaths;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
    pub duration_ms: Option<u64>,
}

/// Names submitted to the server, persisted across sessions for recall.
pub struct RequestHistory {
    entries: Vec<HistoryEntry>,
    history_file: PathBuf,
    max_entries: usize,
}

impl RequestHistory {
    pub fn new(max_entries: usize) -> Result<Self> {
        Self::with_file(AppPaths::history_file()?, max_entries)
    }

    pub fn with_file(history_file: PathBuf, max_entries: usize) -> Result<Self> {
        let mut history = Self {
            entries: Vec::new(),
            history_file,
            max_entries,
        };
        history.load_from_file()?;
        Ok(history)
    }

    fn load_from_file(&mut self) -> Result<()> {
        if !self.history_file.exists() {
            return Ok(());
        }

        let contents = fs::read_to_string(&self.history_file)?;
        if contents.trim().is_empty() {
            return Ok(());
        }

        self.entries = serde_json::from_str(&contents)?;
        Ok(())
    }

    fn save_to_file(&self) -> Result<()> {
        if let Some(parent) = self.history_file.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.history_file, contents)?;
        Ok(())
    }

    pub fn add_entry(
        &mut self,
        name: String,
        success: bool,
        duration_ms: Option<u64>,
    ) -> Result<()> {
        // Don't record empty names or a repeat of the last submission
        if name.is_empty() {
            return Ok(());
        }
        if let Some(last) = self.entries.last() {
            if last.name == name {
                return Ok(());
            }
        }

        self.entries.push(HistoryEntry {
            name,
            timestamp: Utc::now(),
            success,
            duration_ms,
        });

        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }

        self.save_to_file()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Name at `offset` steps back from the most recent entry; offset 1 is
    /// the last submission.
    pub fn recall(&self, offset: usize) -> Option<&str> {
        if offset == 0 || offset > self.entries.len() {
            return None;
        }
        self.entries
            .get(self.entries.len() - offset)
            .map(|e| e.name.as_str())
    }
}
