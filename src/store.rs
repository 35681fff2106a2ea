//! In-memory journal store
//!
//! Holds the mood and sleep logs for one user. Hosts that persist state
//! themselves round-trip the store through `to_json`/`from_json`; the logs
//! keep their most-recent-first ordering across the round trip.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::types::{EntryFilter, EntryLog, MoodEntry, SleepEntry, SleepLog};

/// Journal record store for a single user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JournalStore {
    entries: EntryLog,
    sleep: SleepLog,
}

impl JournalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already-fetched record batches
    pub fn with_records(entries: Vec<MoodEntry>, sleep: Vec<SleepEntry>) -> Self {
        JournalStore {
            entries: EntryLog::new(entries),
            sleep: SleepLog::new(sleep),
        }
    }

    pub fn add_entry(&mut self, entry: MoodEntry) {
        self.entries.insert(entry);
    }

    pub fn add_sleep(&mut self, entry: SleepEntry) {
        self.sleep.insert(entry);
    }

    /// Remove a mood entry by record id
    pub fn remove_entry(&mut self, id: &str) -> bool {
        self.entries.remove(id)
    }

    /// Remove a sleep entry by record id
    pub fn remove_sleep(&mut self, id: &str) -> bool {
        self.sleep.remove(id)
    }

    /// Current mood snapshot, most recent first
    pub fn entries(&self) -> &EntryLog {
        &self.entries
    }

    /// Current sleep snapshot, most recent first
    pub fn sleep(&self) -> &SleepLog {
        &self.sleep
    }

    /// Filtered mood snapshot (phase and/or inclusive date range)
    pub fn entries_matching(&self, filter: &EntryFilter) -> EntryLog {
        self.entries.filtered(filter)
    }

    /// Serialize the store state to JSON
    pub fn to_json(&self) -> Result<String, AnalysisError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore store state from JSON
    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        Ok(serde_json::from_str(json)?)
    }
}
