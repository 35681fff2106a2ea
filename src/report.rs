//! Insight report encoding
//!
//! Assembles every analyzer's output into one versioned, self-describing
//! report payload. All nondeterminism (report id, clock) lives here so the
//! analyzers themselves stay pure.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::correlation::{CorrelationAnalyzer, QualityBands};
use crate::episodes::EpisodeSegmenter;
use crate::error::AnalysisError;
use crate::frequency::FrequencyAnalyzer;
use crate::patterns::PatternDetector;
use crate::seasonal::SeasonalAggregator;
use crate::stats::StatsAggregator;
use crate::timeline::{TimelineBuilder, MOOD_TIMELINE_DAYS, SLEEP_TIMELINE_DAYS};
use crate::types::{EntryLog, InsightReport, ReportProducer, SleepLog};
use crate::warnings::WarningEvaluator;
use crate::{MOODLENS_VERSION, PRODUCER_NAME};

/// Current report schema version
pub const REPORT_SCHEMA_VERSION: &str = "insight.report.v1";

/// Encoder producing versioned insight reports
pub struct InsightEncoder {
    bands: QualityBands,
}

impl Default for InsightEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEncoder {
    /// Create an encoder with the default quality bands
    pub fn new() -> Self {
        Self {
            bands: QualityBands::default(),
        }
    }

    /// Create an encoder with specific quality bands
    pub fn with_bands(bands: QualityBands) -> Self {
        Self { bands }
    }

    /// Run every analyzer over the snapshot and stamp the result
    pub fn encode(&self, entries: &EntryLog, sleep: &SleepLog) -> InsightReport {
        self.encode_at(entries, sleep, Utc::now())
    }

    /// Encode with the clock pinned. Apart from the fresh report id the
    /// output is fully determined by the snapshot and `now`.
    pub fn encode_at(
        &self,
        entries: &EntryLog,
        sleep: &SleepLog,
        now: DateTime<Utc>,
    ) -> InsightReport {
        InsightReport {
            schema_version: REPORT_SCHEMA_VERSION.to_string(),
            report_id: Uuid::new_v4().to_string(),
            generated_at: now,
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: MOODLENS_VERSION.to_string(),
            },
            stats: StatsAggregator::summary(entries),
            sleep_stats: StatsAggregator::sleep_summary(sleep),
            episodes: EpisodeSegmenter::segment_at(entries, now),
            frequency: FrequencyAnalyzer::breakdown(entries),
            seasons: SeasonalAggregator::aggregate(entries),
            sleep_correlation: CorrelationAnalyzer::correlate_with(entries, sleep, &self.bands),
            patterns: PatternDetector::detect(entries),
            warnings: WarningEvaluator::evaluate(entries),
            mood_timeline: TimelineBuilder::mood_series(entries, now, MOOD_TIMELINE_DAYS),
            sleep_timeline: TimelineBuilder::sleep_series(
                sleep,
                now,
                SLEEP_TIMELINE_DAYS,
                &self.bands,
            ),
        }
    }

    /// Encode to pretty-printed JSON
    pub fn encode_to_json(
        &self,
        entries: &EntryLog,
        sleep: &SleepLog,
    ) -> Result<String, AnalysisError> {
        let report = self.encode(entries, sleep);
        serde_json::to_string_pretty(&report).map_err(AnalysisError::JsonError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        DepressiveSymptoms, ManicSymptoms, MoodEntry, MoodPhase, SleepEntry, TriggerFlags,
    };
    use pretty_assertions::assert_eq;

    fn make_entry(day: u32, mood: MoodPhase, intensity: u8) -> MoodEntry {
        MoodEntry {
            id: None,
            date: format!("2024-05-{:02}T08:00:00Z", day).parse().unwrap(),
            mood,
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

    fn make_sleep(day: u32, quality: u8) -> SleepEntry {
        SleepEntry {
            id: None,
            date: format!("2024-05-{:02}T07:00:00Z", day).parse().unwrap(),
            bed_time: "23:00".to_string(),
            wake_time: "07:00".to_string(),
            duration: 8.0,
            quality,
            interruptions: 0,
            felt_rested: quality >= 7,
            notes: String::new(),
        }
    }

    fn make_journal() -> (EntryLog, SleepLog) {
        let entries = EntryLog::new(vec![
            make_entry(22, MoodPhase::Interphase, 4),
            make_entry(23, MoodPhase::Interphase, 5),
            make_entry(24, MoodPhase::Interphase, 4),
            make_entry(25, MoodPhase::Depressive, 6),
            make_entry(26, MoodPhase::Depressive, 7),
            make_entry(27, MoodPhase::Interphase, 4),
            make_entry(28, MoodPhase::Manic, 6),
        ]);
        let sleep = SleepLog::new(vec![make_sleep(27, 8), make_sleep(28, 3)]);
        (entries, sleep)
    }

    fn fixed_now() -> DateTime<Utc> {
        "2024-05-28T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_encode_stamps_metadata() {
        let (entries, sleep) = make_journal();
        let report = InsightEncoder::new().encode_at(&entries, &sleep, fixed_now());

        assert_eq!(report.schema_version, REPORT_SCHEMA_VERSION);
        assert_eq!(report.producer.name, PRODUCER_NAME);
        assert_eq!(report.producer.version, MOODLENS_VERSION);
        assert_eq!(report.generated_at, fixed_now());
        assert!(!report.report_id.is_empty());
    }

    #[test]
    fn test_encode_runs_every_analyzer() {
        let (entries, sleep) = make_journal();
        let report = InsightEncoder::new().encode_at(&entries, &sleep, fixed_now());

        assert_eq!(report.stats.counts.total, 7);
        assert_eq!(report.sleep_stats.total, 2);
        assert_eq!(report.seasons.len(), 1);
        assert_eq!(report.sleep_correlation.matched, 2);
        assert!(!report.warnings.is_empty());
        assert_eq!(report.mood_timeline.len(), MOOD_TIMELINE_DAYS as usize);
        assert_eq!(report.sleep_timeline.len(), SLEEP_TIMELINE_DAYS as usize);
    }

    #[test]
    fn test_encode_is_deterministic_apart_from_report_id() {
        let (entries, sleep) = make_journal();
        let encoder = InsightEncoder::new();
        let a = encoder.encode_at(&entries, &sleep, fixed_now());
        let b = encoder.encode_at(&entries, &sleep, fixed_now());

        assert_ne!(a.report_id, b.report_id);

        let mut a_val = serde_json::to_value(&a).unwrap();
        let mut b_val = serde_json::to_value(&b).unwrap();
        a_val["report_id"] = serde_json::Value::Null;
        b_val["report_id"] = serde_json::Value::Null;
        assert_eq!(a_val, b_val);
    }

    #[test]
    fn test_encode_to_json_is_valid() {
        let (entries, sleep) = make_journal();
        let json = InsightEncoder::new().encode_to_json(&entries, &sleep).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed.get("schema_version").is_some());
        assert!(parsed.get("producer").is_some());
        assert!(parsed.get("stats").is_some());
        assert!(parsed.get("warnings").is_some());
        assert!(parsed.get("mood_timeline").is_some());
    }

    #[test]
    fn test_empty_journal_still_encodes() {
        let report =
            InsightEncoder::new().encode_at(&EntryLog::default(), &SleepLog::default(), fixed_now());
        assert_eq!(report.stats.counts.total, 0);
        assert_eq!(report.sleep_correlation.percentage, None);
        assert_eq!(report.patterns.len(), 1);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.mood_timeline.len(), MOOD_TIMELINE_DAYS as usize);
    }
}
