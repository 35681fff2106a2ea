//! Journal record loading and validation
//!
//! The journal produces two JSON shapes: the export file (a bare record
//! array) and the API list envelope `{ "success": ..., "count": ..., "data":
//! [...] }`. Both parse here, for both record kinds. Validation mirrors the
//! journal's submission rules and reports per-record findings instead of
//! failing the batch.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::types::{parse_wall_clock, MoodEntry, SleepEntry};

/// Maximum note length the journal accepts
pub const MAX_NOTE_CHARS: usize = 1000;

/// Largest tolerated gap between a stored duration and the duration derived
/// from the wall-clock times (one rounding step).
pub const DURATION_TOLERANCE_HOURS: f64 = 0.5;

/// Either JSON shape the journal emits for a record list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordsJson<T> {
    Bare(Vec<T>),
    Envelope { data: Vec<T> },
}

impl<T> RecordsJson<T> {
    fn into_records(self) -> Vec<T> {
        match self {
            RecordsJson::Bare(records) => records,
            RecordsJson::Envelope { data } => data,
        }
    }
}

/// A single validation finding, indexed into the input batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordIssue {
    pub index: usize,
    /// Record id when the batch carries one
    pub id: Option<String>,
    /// Journal field name the finding refers to
    pub field: &'static str,
    pub reason: String,
}

/// Loader for journal record files
pub struct JournalAdapter;

impl JournalAdapter {
    /// Parse mood entries from a bare array or an API envelope
    pub fn parse_entries(json: &str) -> Result<Vec<MoodEntry>, AnalysisError> {
        let records: RecordsJson<MoodEntry> = serde_json::from_str(json)
            .map_err(|e| AnalysisError::ParseError(format!("mood entries: {}", e)))?;
        Ok(records.into_records())
    }

    /// Parse sleep entries from a bare array or an API envelope
    pub fn parse_sleep(json: &str) -> Result<Vec<SleepEntry>, AnalysisError> {
        let records: RecordsJson<SleepEntry> = serde_json::from_str(json)
            .map_err(|e| AnalysisError::ParseError(format!("sleep entries: {}", e)))?;
        Ok(records.into_records())
    }

    /// Validate a batch of mood entries against the journal's submission
    /// rules. Returns one issue per violated field; an empty vec means the
    /// batch is clean.
    pub fn validate_entries(entries: &[MoodEntry]) -> Vec<RecordIssue> {
        let mut issues = Vec::new();
        for (index, entry) in entries.iter().enumerate() {
            let mut push = |field: &'static str, reason: String| {
                issues.push(RecordIssue {
                    index,
                    id: entry.id.clone(),
                    field,
                    reason,
                });
            };

            if !(1..=10).contains(&entry.intensity) {
                push(
                    "intensity",
                    format!("must be 1-10, got {}", entry.intensity),
                );
            }
            if let Some(v) = entry.aggressiveness {
                if !(1..=10).contains(&v) {
                    push("aggressiveness", format!("must be 1-10, got {}", v));
                }
            }
            if let Some(v) = entry.irritability {
                if !(1..=10).contains(&v) {
                    push("irritability", format!("must be 1-10, got {}", v));
                }
            }
            let note_len = entry.notes.chars().count();
            if note_len > MAX_NOTE_CHARS {
                push(
                    "notes",
                    format!("must not exceed {} chars, got {}", MAX_NOTE_CHARS, note_len),
                );
            }
        }
        issues
    }

    /// Validate a batch of mood entries, rejecting it on the first
    /// violation. Hosts that want the full finding list call
    /// `validate_entries` instead.
    pub fn require_valid_entries(entries: &[MoodEntry]) -> Result<(), AnalysisError> {
        reject_first(Self::validate_entries(entries))
    }

    /// Validate a batch of sleep entries, rejecting it on the first
    /// violation
    pub fn require_valid_sleep(entries: &[SleepEntry]) -> Result<(), AnalysisError> {
        reject_first(Self::validate_sleep(entries))
    }

    /// Validate a batch of sleep entries
    pub fn validate_sleep(entries: &[SleepEntry]) -> Vec<RecordIssue> {
        let mut issues = Vec::new();
        for (index, entry) in entries.iter().enumerate() {
            let mut push = |field: &'static str, reason: String| {
                issues.push(RecordIssue {
                    index,
                    id: entry.id.clone(),
                    field,
                    reason,
                });
            };

            if !(1..=10).contains(&entry.quality) {
                push("quality", format!("must be 1-10, got {}", entry.quality));
            }
            if !(0.0..=24.0).contains(&entry.duration) {
                push(
                    "duration",
                    format!("must be 0-24 hours, got {}", entry.duration),
                );
            } else if !is_half_hour_step(entry.duration) {
                push(
                    "duration",
                    format!("must be a multiple of 0.5, got {}", entry.duration),
                );
            }
            if parse_wall_clock(&entry.bed_time).is_none() {
                push(
                    "bedTime",
                    format!("must be HH:MM, got {:?}", entry.bed_time),
                );
            }
            if parse_wall_clock(&entry.wake_time).is_none() {
                push(
                    "wakeTime",
                    format!("must be HH:MM, got {:?}", entry.wake_time),
                );
            }
            if let Some(derived) = entry.derived_duration() {
                if (derived - entry.duration).abs() > DURATION_TOLERANCE_HOURS {
                    push(
                        "duration",
                        format!(
                            "stored {}h disagrees with {}h derived from bed/wake times",
                            entry.duration, derived
                        ),
                    );
                }
            }
            let note_len = entry.notes.chars().count();
            if note_len > MAX_NOTE_CHARS {
                push(
                    "notes",
                    format!("must not exceed {} chars, got {}", MAX_NOTE_CHARS, note_len),
                );
            }
        }
        issues
    }
}

fn reject_first(issues: Vec<RecordIssue>) -> Result<(), AnalysisError> {
    match issues.into_iter().next() {
        Some(issue) => Err(AnalysisError::InvalidRecord {
            index: issue.index,
            reason: format!("{} {}", issue.field, issue.reason),
        }),
        None => Ok(()),
    }
}

fn is_half_hour_step(hours: f64) -> bool {
    let doubled = hours * 2.0;
    (doubled - doubled.round()).abs() < 1e-9
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DepressiveSymptoms, ManicSymptoms, MoodPhase, TriggerFlags};
    use pretty_assertions::assert_eq;

    fn make_entry(intensity: u8) -> MoodEntry {
        MoodEntry {
            id: Some("abc123".to_string()),
            date: "2024-01-15T10:30:00Z".parse().unwrap(),
            mood: MoodPhase::Depressive,
            intensity,
            aggressiveness: None,
            irritability: None,
            mood_stability: false,
            depressive_symptoms: DepressiveSymptoms::default(),
            manic_symptoms: ManicSymptoms::default(),
            triggers: TriggerFlags::default(),
            notes: String::new(),
            voice_note: None,
        }
    }

    fn make_sleep(duration: f64, quality: u8) -> SleepEntry {
        SleepEntry {
            id: None,
            date: "2024-01-15T07:00:00Z".parse().unwrap(),
            bed_time: "23:00".to_string(),
            wake_time: "07:00".to_string(),
            duration,
            quality,
            interruptions: 0,
            felt_rested: true,
            notes: String::new(),
        }
    }

    #[test]
    fn test_parse_bare_array() {
        let json = r#"[
            { "date": "2024-01-15T10:30:00Z", "mood": "depressive", "intensity": 7 },
            { "date": "2024-01-16T10:30:00Z", "mood": "interfase", "intensity": 4 }
        ]"#;
        let entries = JournalAdapter::parse_entries(json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].mood, MoodPhase::Interphase);
    }

    #[test]
    fn test_parse_api_envelope() {
        let json = r#"{
            "success": true,
            "count": 1,
            "data": [
                { "date": "2024-01-15T10:30:00Z", "mood": "manic", "intensity": 8 }
            ]
        }"#;
        let entries = JournalAdapter::parse_entries(json).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].mood, MoodPhase::Manic);
    }

    #[test]
    fn test_parse_sleep_envelope() {
        let json = r#"{
            "success": true,
            "count": 1,
            "data": [{
                "date": "2024-01-15T07:00:00Z",
                "bedTime": "23:30",
                "wakeTime": "06:30",
                "duration": 7.0,
                "quality": 8
            }]
        }"#;
        let sleep = JournalAdapter::parse_sleep(json).unwrap();
        assert_eq!(sleep.len(), 1);
        assert_eq!(sleep[0].bed_time, "23:30");
        assert_eq!(sleep[0].interruptions, 0);
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let err = JournalAdapter::parse_entries("{not json").unwrap_err();
        assert!(err.to_string().contains("mood entries"));
    }

    #[test]
    fn test_validate_entries_flags_out_of_range() {
        let mut bad = make_entry(11);
        bad.aggressiveness = Some(0);
        let issues = JournalAdapter::validate_entries(&[make_entry(5), bad]);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].index, 1);
        assert_eq!(issues[0].field, "intensity");
        assert_eq!(issues[1].field, "aggressiveness");
        assert_eq!(issues[0].id.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_validate_entries_flags_overlong_notes() {
        let mut entry = make_entry(5);
        entry.notes = "x".repeat(MAX_NOTE_CHARS + 1);
        let issues = JournalAdapter::validate_entries(&[entry]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "notes");
    }

    #[test]
    fn test_validate_clean_batch_is_empty() {
        let issues = JournalAdapter::validate_entries(&[make_entry(1), make_entry(10)]);
        assert!(issues.is_empty());
        let issues = JournalAdapter::validate_sleep(&[make_sleep(8.0, 7)]);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_validate_sleep_flags_bad_times_and_steps() {
        let mut bad_step = make_sleep(7.25, 5);
        bad_step.bed_time = "23:45".to_string();
        bad_step.wake_time = "07:00".to_string();
        let mut bad_time = make_sleep(8.0, 5);
        bad_time.wake_time = "7am".to_string();

        let issues = JournalAdapter::validate_sleep(&[bad_step, bad_time]);
        let fields: Vec<&str> = issues.iter().map(|i| i.field).collect();
        assert!(fields.contains(&"duration"));
        assert!(fields.contains(&"wakeTime"));
    }

    #[test]
    fn test_validate_sleep_flags_duration_mismatch() {
        // 23:00 -> 07:00 derives 8.0; stored 5.0 is more than one step off
        let issues = JournalAdapter::validate_sleep(&[make_sleep(5.0, 5)]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "duration");
        assert!(issues[0].reason.contains("disagrees"));
    }

    #[test]
    fn test_require_valid_rejects_on_first_violation() {
        let err =
            JournalAdapter::require_valid_entries(&[make_entry(5), make_entry(0)]).unwrap_err();
        match err {
            AnalysisError::InvalidRecord { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("intensity"));
            }
            other => panic!("expected InvalidRecord, got {:?}", other),
        }

        let err = JournalAdapter::require_valid_sleep(&[make_sleep(8.0, 11)]).unwrap_err();
        assert!(err.to_string().contains("index 0"));
    }

    #[test]
    fn test_require_valid_accepts_clean_batches() {
        assert!(JournalAdapter::require_valid_entries(&[make_entry(5)]).is_ok());
        assert!(JournalAdapter::require_valid_sleep(&[make_sleep(8.0, 7)]).is_ok());
        assert!(JournalAdapter::require_valid_entries(&[]).is_ok());
    }

    #[test]
    fn test_validate_sleep_quality_bounds() {
        let issues = JournalAdapter::validate_sleep(&[make_sleep(8.0, 0), make_sleep(8.0, 11)]);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.field == "quality"));
    }
}
