//! Moodlens - Analytics and early-warning engine for mood and sleep journals
//!
//! Moodlens turns raw journal records into a versioned insight report
//! through a deterministic pass: record adaptation → aggregation and rule
//! evaluation → report encoding.
//!
//! ## Modules
//!
//! - **Analyzers**: statistics, episode segmentation, trigger/symptom
//!   frequency, seasonal distribution, sleep correlation, pattern
//!   detection, early warnings, chart timelines
//! - **Pipeline**: one-shot and stateful entry points over journal records
//!   or their JSON exports

pub mod correlation;
pub mod episodes;
pub mod error;
pub mod frequency;
pub mod patterns;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod seasonal;
pub mod stats;
pub mod store;
pub mod timeline;
pub mod types;
pub mod warnings;

pub use error::AnalysisError;
pub use pipeline::{analyze, analyze_at, analyze_json, InsightEngine};
pub use report::{InsightEncoder, REPORT_SCHEMA_VERSION};
pub use store::JournalStore;
pub use types::{EntryLog, InsightReport, MoodEntry, MoodPhase, SleepEntry, SleepLog};

/// Moodlens version embedded in every report
pub const MOODLENS_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for report payloads
pub const PRODUCER_NAME: &str = "moodlens";
