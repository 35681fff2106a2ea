//! Pipeline orchestration
//!
//! This module provides the public API for Moodlens. It orchestrates the
//! full pass from journal records (or their JSON exports) to a versioned
//! insight report.

use chrono::{DateTime, Utc};

use crate::correlation::QualityBands;
use crate::error::AnalysisError;
use crate::record::JournalAdapter;
use crate::report::InsightEncoder;
use crate::store::JournalStore;
use crate::types::{InsightReport, MoodEntry, SleepEntry};

/// Analyze in-memory journal records.
///
/// # Arguments
/// * `entries` - Mood journal records, any order
/// * `sleep` - Sleep journal records, any order; pass an empty vector when
///   the sleep fetch failed or the user keeps no sleep journal
///
/// # Returns
/// A complete insight report; never fails, whatever the collection sizes
///
/// # Example
/// ```ignore
/// let report = analyze(mood_records, sleep_records);
/// println!("{} entries analyzed", report.stats.counts.total);
/// ```
pub fn analyze(entries: Vec<MoodEntry>, sleep: Vec<SleepEntry>) -> InsightReport {
    analyze_at(entries, sleep, Utc::now())
}

/// Analyze with the clock pinned, for reproducible reports
pub fn analyze_at(
    entries: Vec<MoodEntry>,
    sleep: Vec<SleepEntry>,
    now: DateTime<Utc>,
) -> InsightReport {
    let store = JournalStore::with_records(entries, sleep);
    InsightEncoder::new().encode_at(store.entries(), store.sleep(), now)
}

/// Analyze raw journal JSON.
///
/// Accepts either a bare record array or the `{"success":…,"data":[…]}`
/// envelope the journal API responds with.
///
/// # Arguments
/// * `entries_json` - Mood entry export
/// * `sleep_json` - Sleep entry export, or `None` when unavailable
///
/// # Returns
/// The insight report, or a parse error when either document is malformed
///
/// # Example
/// ```ignore
/// let report = analyze_json(&mood_export, Some(&sleep_export))?;
/// ```
pub fn analyze_json(
    entries_json: &str,
    sleep_json: Option<&str>,
) -> Result<InsightReport, AnalysisError> {
    let entries = JournalAdapter::parse_entries(entries_json)?;
    let sleep = match sleep_json {
        Some(json) => JournalAdapter::parse_sleep(json)?,
        None => Vec::new(),
    };
    Ok(analyze(entries, sleep))
}

/// Stateful engine holding a journal snapshot across runs.
///
/// Use this when records arrive incrementally or the snapshot should be
/// persisted between sessions.
pub struct InsightEngine {
    store: JournalStore,
    encoder: InsightEncoder,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with an empty journal and default quality bands
    pub fn new() -> Self {
        Self {
            store: JournalStore::new(),
            encoder: InsightEncoder::new(),
        }
    }

    /// Create an engine over an existing journal snapshot
    pub fn with_store(store: JournalStore) -> Self {
        Self {
            store,
            encoder: InsightEncoder::new(),
        }
    }

    /// Create an engine with specific sleep quality bands
    pub fn with_bands(bands: QualityBands) -> Self {
        Self {
            store: JournalStore::new(),
            encoder: InsightEncoder::with_bands(bands),
        }
    }

    /// Load a journal snapshot from JSON
    pub fn load_store(&mut self, json: &str) -> Result<(), AnalysisError> {
        self.store = JournalStore::from_json(json)?;
        Ok(())
    }

    /// Save the journal snapshot to JSON
    pub fn save_store(&self) -> Result<String, AnalysisError> {
        self.store.to_json()
    }

    pub fn add_entry(&mut self, entry: MoodEntry) {
        self.store.add_entry(entry);
    }

    pub fn add_sleep(&mut self, entry: SleepEntry) {
        self.store.add_sleep(entry);
    }

    pub fn store(&self) -> &JournalStore {
        &self.store
    }

    /// Run the full analytics pass over the current snapshot
    pub fn run(&self) -> InsightReport {
        self.encoder
            .encode(self.store.entries(), self.store.sleep())
    }

    /// Run with the clock pinned
    pub fn run_at(&self, now: DateTime<Utc>) -> InsightReport {
        self.encoder
            .encode_at(self.store.entries(), self.store.sleep(), now)
    }
}
