//! Core types for moodlens
//!
//! Journal records (mood and sleep entries) use the journal's camelCase wire
//! naming so exported files round-trip unchanged. Derived analysis types use
//! snake_case and belong to the `insight.report.v1` envelope.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The three clinical phase labels the journal tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodPhase {
    Depressive,
    /// Euthymic/stable phase between episodes. Older exports spell this
    /// `interfase`; both spellings deserialize, only `interphase` is written.
    #[serde(alias = "interfase")]
    Interphase,
    Manic,
}

impl MoodPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodPhase::Depressive => "depressive",
            MoodPhase::Interphase => "interphase",
            MoodPhase::Manic => "manic",
        }
    }
}

/// Depressive-presentation symptom flags. Absent flags deserialize as false,
/// so a record missing the whole sub-object is treated as all-clear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepressiveSymptoms {
    #[serde(default)]
    pub insomnia: bool,
    #[serde(default)]
    pub oversleeping: bool,
    #[serde(default)]
    pub energy_loss: bool,
    #[serde(default)]
    pub loss_of_interest: bool,
    #[serde(default)]
    pub suicidal_thoughts: bool,
    #[serde(default)]
    pub appetite_changes: bool,
}

impl DepressiveSymptoms {
    /// Either of the two sleep-disruption flags is set.
    pub fn sleep_disrupted(&self) -> bool {
        self.insomnia || self.oversleeping
    }
}

/// Manic/hypomanic-presentation symptom flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManicSymptoms {
    #[serde(default)]
    pub reduced_sleep: bool,
    #[serde(default)]
    pub rapid_speech: bool,
    #[serde(default)]
    pub racing_thoughts: bool,
    #[serde(default)]
    pub impulsivity: bool,
    #[serde(default)]
    pub excessive_spending: bool,
}

impl ManicSymptoms {
    /// Either of the two impulse-control flags is set.
    pub fn impulse_flagged(&self) -> bool {
        self.impulsivity || self.excessive_spending
    }
}

/// Suspected contributing-factor flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerFlags {
    #[serde(default)]
    pub stress: bool,
    #[serde(default)]
    pub lack_of_sleep: bool,
    #[serde(default)]
    pub conflict: bool,
    #[serde(default)]
    pub alcohol: bool,
    #[serde(default)]
    pub seasonal_changes: bool,
}

impl TriggerFlags {
    pub fn is_set(&self, trigger: Trigger) -> bool {
        match trigger {
            Trigger::Stress => self.stress,
            Trigger::LackOfSleep => self.lack_of_sleep,
            Trigger::Conflict => self.conflict,
            Trigger::Alcohol => self.alcohol,
            Trigger::SeasonalChanges => self.seasonal_changes,
        }
    }
}

/// Closed trigger enumeration. `ALL` fixes the tally and tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Trigger {
    Stress,
    LackOfSleep,
    Conflict,
    Alcohol,
    SeasonalChanges,
}

impl Trigger {
    pub const ALL: [Trigger; 5] = [
        Trigger::Stress,
        Trigger::LackOfSleep,
        Trigger::Conflict,
        Trigger::Alcohol,
        Trigger::SeasonalChanges,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Trigger::Stress => "stress",
            Trigger::LackOfSleep => "lackOfSleep",
            Trigger::Conflict => "conflict",
            Trigger::Alcohol => "alcohol",
            Trigger::SeasonalChanges => "seasonalChanges",
        }
    }

    /// Human-readable label for message text
    pub fn label(&self) -> &'static str {
        match self {
            Trigger::Stress => "stress",
            Trigger::LackOfSleep => "lack of sleep",
            Trigger::Conflict => "conflict",
            Trigger::Alcohol => "alcohol",
            Trigger::SeasonalChanges => "seasonal changes",
        }
    }
}

/// Closed symptom enumeration across both presentations (11 keys).
///
/// `ALL` lists the six depressive keys in record order, then the five manic
/// keys, which fixes the tally tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Symptom {
    Insomnia,
    Oversleeping,
    EnergyLoss,
    LossOfInterest,
    SuicidalThoughts,
    AppetiteChanges,
    ReducedSleep,
    RapidSpeech,
    RacingThoughts,
    Impulsivity,
    ExcessiveSpending,
}

impl Symptom {
    pub const ALL: [Symptom; 11] = [
        Symptom::Insomnia,
        Symptom::Oversleeping,
        Symptom::EnergyLoss,
        Symptom::LossOfInterest,
        Symptom::SuicidalThoughts,
        Symptom::AppetiteChanges,
        Symptom::ReducedSleep,
        Symptom::RapidSpeech,
        Symptom::RacingThoughts,
        Symptom::Impulsivity,
        Symptom::ExcessiveSpending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Symptom::Insomnia => "insomnia",
            Symptom::Oversleeping => "oversleeping",
            Symptom::EnergyLoss => "energyLoss",
            Symptom::LossOfInterest => "lossOfInterest",
            Symptom::SuicidalThoughts => "suicidalThoughts",
            Symptom::AppetiteChanges => "appetiteChanges",
            Symptom::ReducedSleep => "reducedSleep",
            Symptom::RapidSpeech => "rapidSpeech",
            Symptom::RacingThoughts => "racingThoughts",
            Symptom::Impulsivity => "impulsivity",
            Symptom::ExcessiveSpending => "excessiveSpending",
        }
    }
}

/// A single mood journal record.
///
/// Symptom sets are evaluated independently of the entry's phase: nothing
/// prevents a depressive entry from carrying manic flags, and the analyzers
/// count whatever is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    /// Record id as persisted by the journal, when present
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Event date/time (UTC)
    pub date: DateTime<Utc>,
    pub mood: MoodPhase,
    /// Intensity rating (1-10)
    pub intensity: u8,
    /// Phase scale recorded during depressive entries (1-10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggressiveness: Option<u8>,
    /// Phase scale recorded during manic entries (1-10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub irritability: Option<u8>,
    /// Stability self-assessment recorded during interphase entries
    #[serde(default)]
    pub mood_stability: bool,
    #[serde(default)]
    pub depressive_symptoms: DepressiveSymptoms,
    #[serde(default)]
    pub manic_symptoms: ManicSymptoms,
    #[serde(default)]
    pub triggers: TriggerFlags,
    /// Free-text note (max 1000 chars)
    #[serde(default)]
    pub notes: String,
    /// Opaque voice-note payload; never interpreted by the analyzers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_note: Option<String>,
}

impl MoodEntry {
    /// UTC calendar date with the time-of-day dropped. Join key for sleep
    /// correlation and timeline bucketing.
    pub fn calendar_date(&self) -> NaiveDate {
        self.date.date_naive()
    }

    pub fn has_symptom(&self, symptom: Symptom) -> bool {
        match symptom {
            Symptom::Insomnia => self.depressive_symptoms.insomnia,
            Symptom::Oversleeping => self.depressive_symptoms.oversleeping,
            Symptom::EnergyLoss => self.depressive_symptoms.energy_loss,
            Symptom::LossOfInterest => self.depressive_symptoms.loss_of_interest,
            Symptom::SuicidalThoughts => self.depressive_symptoms.suicidal_thoughts,
            Symptom::AppetiteChanges => self.depressive_symptoms.appetite_changes,
            Symptom::ReducedSleep => self.manic_symptoms.reduced_sleep,
            Symptom::RapidSpeech => self.manic_symptoms.rapid_speech,
            Symptom::RacingThoughts => self.manic_symptoms.racing_thoughts,
            Symptom::Impulsivity => self.manic_symptoms.impulsivity,
            Symptom::ExcessiveSpending => self.manic_symptoms.excessive_spending,
        }
    }
}

/// A single sleep journal record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepEntry {
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Night the sleep belongs to (UTC)
    pub date: DateTime<Utc>,
    /// Wall-clock bedtime, "HH:MM", no timezone
    pub bed_time: String,
    /// Wall-clock wake time, "HH:MM", no timezone
    pub wake_time: String,
    /// Duration in hours (0-24, half-hour granularity)
    pub duration: f64,
    /// Subjective quality rating (1-10)
    pub quality: u8,
    /// Number of awakenings during the night
    #[serde(default)]
    pub interruptions: u32,
    #[serde(default)]
    pub felt_rested: bool,
    #[serde(default)]
    pub notes: String,
}

impl SleepEntry {
    pub fn calendar_date(&self) -> NaiveDate {
        self.date.date_naive()
    }

    /// Duration recomputed from the wall-clock times, if both parse
    pub fn derived_duration(&self) -> Option<f64> {
        duration_between(&self.bed_time, &self.wake_time)
    }
}

/// Sleep duration in hours between two "HH:MM" wall-clock times, crossing
/// midnight when the wake time is earlier than the bedtime, rounded to the
/// nearest half hour.
pub fn duration_between(bed_time: &str, wake_time: &str) -> Option<f64> {
    let bed = parse_wall_clock(bed_time)?;
    let wake = parse_wall_clock(wake_time)?;
    let mut minutes = wake as i64 - bed as i64;
    if minutes < 0 {
        minutes += 24 * 60;
    }
    let hours = minutes as f64 / 60.0;
    Some((hours * 2.0).round() / 2.0)
}

/// Parse "HH:MM" into minutes since midnight
pub(crate) fn parse_wall_clock(s: &str) -> Option<u32> {
    let (h, m) = s.split_once(':')?;
    let hours: u32 = h.parse().ok()?;
    let minutes: u32 = m.parse().ok()?;
    if hours < 24 && minutes < 60 {
        Some(hours * 60 + minutes)
    } else {
        None
    }
}

/// Snapshot filter for mood entries: exact phase match and an inclusive
/// date range, matching the journal's list endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<MoodPhase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

impl EntryFilter {
    pub fn matches(&self, entry: &MoodEntry) -> bool {
        if let Some(mood) = self.mood {
            if entry.mood != mood {
                return false;
            }
        }
        if let Some(start) = self.start_date {
            if entry.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if entry.date > end {
                return false;
            }
        }
        true
    }
}

/// Ordered snapshot of mood entries.
///
/// Sorted most-recent-first on construction, so ordering is an invariant of
/// the type rather than a caller convention. Serializes as a bare record
/// array; deserializing re-establishes the sort.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<MoodEntry>", into = "Vec<MoodEntry>")]
pub struct EntryLog {
    entries: Vec<MoodEntry>,
}

impl EntryLog {
    pub fn new(mut entries: Vec<MoodEntry>) -> Self {
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        EntryLog { entries }
    }

    /// All entries, most recent first
    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    /// The `n` most recent entries (all of them if fewer exist)
    pub fn recent(&self, n: usize) -> &[MoodEntry] {
        &self.entries[..self.entries.len().min(n)]
    }

    /// Entries in ascending date order
    pub fn chronological(&self) -> impl Iterator<Item = &MoodEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert preserving the most-recent-first order. A new entry sorts
    /// ahead of existing entries with the same date.
    pub fn insert(&mut self, entry: MoodEntry) {
        let at = self.entries.partition_point(|e| e.date > entry.date);
        self.entries.insert(at, entry);
    }

    /// Remove by record id. Returns whether a record was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id.as_deref() != Some(id));
        self.entries.len() != before
    }

    /// New log containing only the entries the filter accepts
    pub fn filtered(&self, filter: &EntryFilter) -> EntryLog {
        EntryLog {
            entries: self
                .entries
                .iter()
                .filter(|e| filter.matches(e))
                .cloned()
                .collect(),
        }
    }
}

impl From<Vec<MoodEntry>> for EntryLog {
    fn from(entries: Vec<MoodEntry>) -> Self {
        EntryLog::new(entries)
    }
}

impl From<EntryLog> for Vec<MoodEntry> {
    fn from(log: EntryLog) -> Self {
        log.entries
    }
}

/// Ordered snapshot of sleep entries, most recent first.
///
/// A correlation pass with no sleep data (including a failed fetch upstream)
/// is represented by an empty log, never by an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<SleepEntry>", into = "Vec<SleepEntry>")]
pub struct SleepLog {
    entries: Vec<SleepEntry>,
}

impl SleepLog {
    pub fn new(mut entries: Vec<SleepEntry>) -> Self {
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        SleepLog { entries }
    }

    pub fn entries(&self) -> &[SleepEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn insert(&mut self, entry: SleepEntry) {
        let at = self.entries.partition_point(|e| e.date > entry.date);
        self.entries.insert(at, entry);
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id.as_deref() != Some(id));
        self.entries.len() != before
    }

    /// First (most recent) sleep entry on the given calendar date
    pub fn on_date(&self, date: NaiveDate) -> Option<&SleepEntry> {
        self.entries.iter().find(|e| e.calendar_date() == date)
    }
}

impl From<Vec<SleepEntry>> for SleepLog {
    fn from(entries: Vec<SleepEntry>) -> Self {
        SleepLog::new(entries)
    }
}

impl From<SleepLog> for Vec<SleepEntry> {
    fn from(log: SleepLog) -> Self {
        log.entries
    }
}

/// Message severity, ordered from least to most urgent. `Success` marks
/// positive/commendation messages, not a failure grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// Display color from the journal UI palette
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Info => "#2196F3",
            Severity::Success => "#4CAF50",
            Severity::Warning => "#FFC107",
            Severity::High => "#FF9800",
            Severity::Critical => "#f44336",
        }
    }
}

/// Categorical sleep quality band derived from the 1-10 quality scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityBand {
    Poor,
    Fair,
    Good,
}

// ---------------------------------------------------------------------------
// Derived analysis types (insight.report.v1)
// ---------------------------------------------------------------------------

/// Entry counts by phase. The three phase counts always sum to `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodCounts {
    pub total: usize,
    pub depressive: usize,
    pub interphase: usize,
    pub manic: usize,
}

impl MoodCounts {
    pub fn for_phase(&self, phase: MoodPhase) -> usize {
        match phase {
            MoodPhase::Depressive => self.depressive,
            MoodPhase::Interphase => self.interphase,
            MoodPhase::Manic => self.manic,
        }
    }
}

/// Statistics summary over the full journal.
///
/// Recent averages operate on the last n *entries*, not calendar days, and
/// are named accordingly. `None` means the window was empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodStats {
    pub counts: MoodCounts,
    /// Mean intensity over all entries, one decimal; 0.0 for an empty journal
    pub average_intensity: f64,
    /// Mean intensity over the 3 most recent entries
    pub recent_3: Option<f64>,
    /// Mean intensity over the 7 most recent entries
    pub recent_7: Option<f64>,
    /// Mean intensity over the 30 most recent entries
    pub recent_30: Option<f64>,
}

/// Sleep statistics summary; all averages one decimal, zeros when empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepStats {
    pub total: usize,
    pub avg_duration: f64,
    pub avg_quality: f64,
    pub avg_interruptions: f64,
}

/// Episode aggregate for one phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseEpisodes {
    /// Number of episodes that contributed a positive duration
    pub episodes: usize,
    /// Mean episode duration in whole days, one decimal; `None` when no
    /// episode of this phase has been collected (insufficient data)
    pub mean_duration_days: Option<f64>,
}

/// Episode durations by phase, the segmenter's output
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub depressive: PhaseEpisodes,
    pub interphase: PhaseEpisodes,
    pub manic: PhaseEpisodes,
}

impl EpisodeSummary {
    pub fn for_phase(&self, phase: MoodPhase) -> &PhaseEpisodes {
        match phase {
            MoodPhase::Depressive => &self.depressive,
            MoodPhase::Interphase => &self.interphase,
            MoodPhase::Manic => &self.manic,
        }
    }
}

/// One row of the ranked trigger tally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerFrequency {
    pub trigger: Trigger,
    pub count: usize,
    /// Share of all set trigger flags, percent, nearest integer
    pub percentage: u32,
}

/// One row of the ranked symptom tally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomFrequency {
    pub symptom: Symptom,
    pub count: usize,
    /// Share of all entries, percent, nearest integer
    pub percentage: u32,
}

/// Full ranked frequency lists; callers truncate for display
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrequencyBreakdown {
    pub triggers: Vec<TriggerFrequency>,
    pub symptoms: Vec<SymptomFrequency>,
}

/// Calendar season (meteorological bucketing)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub const ALL: [Season; 4] = [
        Season::Winter,
        Season::Spring,
        Season::Summer,
        Season::Fall,
    ];

    /// Season for a 0-based month index (January = 0)
    pub fn from_month0(month0: u32) -> Season {
        match month0 {
            11 | 0 | 1 => Season::Winter,
            2..=4 => Season::Spring,
            5..=7 => Season::Summer,
            _ => Season::Fall,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
        }
    }
}

/// Per-season mood tally with the dominant phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub season: Season,
    pub counts: MoodCounts,
    pub dominant: MoodPhase,
}

/// Sleep/mood co-occurrence summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepCorrelation {
    /// Mood entries that had a sleep record on the same calendar date
    pub matched: usize,
    /// Matches with poor-band sleep and a depressive entry
    pub poor_sleep_depression: usize,
    /// Matches with good-band sleep and an interphase entry
    pub good_sleep_stable: usize,
    /// (poor_sleep_depression + good_sleep_stable) / matched, percent,
    /// nearest integer; `None` when nothing matched
    pub percentage: Option<u32>,
}

/// Advisory message from the pattern detector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternMessage {
    pub severity: Severity,
    pub text: String,
}

/// Prioritized alert from the early-warning evaluator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarlyWarning {
    pub severity: Severity,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
}

/// One day of the mood timeline. `value` is the day's mean signed intensity
/// (depressive negative, interphase zero, manic positive); `None` marks a day
/// without entries so charts can show a gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<MoodPhase>,
}

/// One day of the sleep timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepTimelinePoint {
    pub date: NaiveDate,
    pub duration: Option<f64>,
    pub quality: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<QualityBand>,
}

/// Software that produced a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
}

/// Complete analytics pass over one journal snapshot (insight.report.v1)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightReport {
    /// Report schema identifier
    pub schema_version: String,
    /// Unique id for this report instance
    pub report_id: String,
    /// When the report was generated (UTC)
    pub generated_at: DateTime<Utc>,
    pub producer: ReportProducer,
    pub stats: MoodStats,
    pub sleep_stats: SleepStats,
    pub episodes: EpisodeSummary,
    pub frequency: FrequencyBreakdown,
    /// Seasons with at least one entry, in winter/spring/summer/fall order
    pub seasons: Vec<SeasonSummary>,
    pub sleep_correlation: SleepCorrelation,
    pub patterns: Vec<PatternMessage>,
    pub warnings: Vec<EarlyWarning>,
    pub mood_timeline: Vec<TimelinePoint>,
    pub sleep_timeline: Vec<SleepTimelinePoint>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};
    use pretty_assertions::assert_eq;

    fn make_entry(date: &str, mood: MoodPhase, intensity: u8) -> MoodEntry {
        MoodEntry {
            id: None,
            date: date.parse().unwrap(),
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

    #[test]
    fn test_mood_phase_wire_names() {
        assert_eq!(
            serde_json::to_string(&MoodPhase::Interphase).unwrap(),
            "\"interphase\""
        );
        let legacy: MoodPhase = serde_json::from_str("\"interfase\"").unwrap();
        assert_eq!(legacy, MoodPhase::Interphase);
        let current: MoodPhase = serde_json::from_str("\"interphase\"").unwrap();
        assert_eq!(current, MoodPhase::Interphase);
    }

    #[test]
    fn test_entry_missing_flag_sets_default_to_false() {
        let json = r#"{
            "date": "2024-01-15T10:30:00Z",
            "mood": "depressive",
            "intensity": 7
        }"#;
        let entry: MoodEntry = serde_json::from_str(json).unwrap();
        assert!(!entry.depressive_symptoms.insomnia);
        assert!(!entry.manic_symptoms.reduced_sleep);
        assert!(!entry.triggers.stress);
        assert_eq!(entry.notes, "");
        assert!(!entry.mood_stability);
    }

    #[test]
    fn test_entry_camel_case_round_trip() {
        let json = r#"{
            "_id": "65a1b2c3",
            "date": "2024-01-15T10:30:00Z",
            "mood": "manic",
            "intensity": 8,
            "irritability": 6,
            "manicSymptoms": { "reducedSleep": true, "racingThoughts": true },
            "triggers": { "lackOfSleep": true }
        }"#;
        let entry: MoodEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id.as_deref(), Some("65a1b2c3"));
        assert!(entry.manic_symptoms.reduced_sleep);
        assert!(entry.triggers.lack_of_sleep);

        let out = serde_json::to_string(&entry).unwrap();
        assert!(out.contains("manicSymptoms"));
        assert!(out.contains("reducedSleep"));
        assert!(out.contains("\"_id\""));
    }

    #[test]
    fn test_entry_log_orders_most_recent_first() {
        let log = EntryLog::new(vec![
            make_entry("2024-01-10T08:00:00Z", MoodPhase::Manic, 5),
            make_entry("2024-01-12T08:00:00Z", MoodPhase::Depressive, 6),
            make_entry("2024-01-11T08:00:00Z", MoodPhase::Interphase, 3),
        ]);
        let dates: Vec<u32> = log.entries().iter().map(|e| e.date.day()).collect();
        assert_eq!(dates, vec![12, 11, 10]);

        let chrono_dates: Vec<u32> = log.chronological().map(|e| e.date.day()).collect();
        assert_eq!(chrono_dates, vec![10, 11, 12]);
    }

    #[test]
    fn test_entry_log_recent_caps_at_len() {
        let log = EntryLog::new(vec![make_entry(
            "2024-01-10T08:00:00Z",
            MoodPhase::Manic,
            5,
        )]);
        assert_eq!(log.recent(7).len(), 1);
        assert_eq!(log.recent(0).len(), 0);
    }

    #[test]
    fn test_entry_log_serializes_as_bare_array() {
        let log = EntryLog::new(vec![make_entry(
            "2024-01-10T08:00:00Z",
            MoodPhase::Manic,
            5,
        )]);
        let json = serde_json::to_string(&log).unwrap();
        assert!(json.starts_with('['));

        let back: EntryLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
    }

    #[test]
    fn test_entry_filter_date_range_inclusive() {
        let filter = EntryFilter {
            mood: None,
            start_date: Some(Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap()),
            end_date: Some(Utc.with_ymd_and_hms(2024, 1, 12, 0, 0, 0).unwrap()),
        };
        let log = EntryLog::new(vec![
            make_entry("2024-01-09T12:00:00Z", MoodPhase::Manic, 5),
            make_entry("2024-01-10T00:00:00Z", MoodPhase::Manic, 5),
            make_entry("2024-01-12T00:00:00Z", MoodPhase::Depressive, 6),
            make_entry("2024-01-12T00:00:01Z", MoodPhase::Depressive, 6),
        ]);
        assert_eq!(log.filtered(&filter).len(), 2);
    }

    #[test]
    fn test_entry_filter_by_mood() {
        let filter = EntryFilter {
            mood: Some(MoodPhase::Manic),
            ..EntryFilter::default()
        };
        let log = EntryLog::new(vec![
            make_entry("2024-01-09T12:00:00Z", MoodPhase::Manic, 5),
            make_entry("2024-01-10T00:00:00Z", MoodPhase::Depressive, 5),
        ]);
        let filtered = log.filtered(&filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.entries()[0].mood, MoodPhase::Manic);
    }

    #[test]
    fn test_duration_between_crosses_midnight() {
        assert_eq!(duration_between("23:00", "07:00"), Some(8.0));
        // 8h15m rounds up to 8.5
        assert_eq!(duration_between("01:15", "09:30"), Some(8.5));
    }

    #[test]
    fn test_duration_between_rounds_to_half_hour() {
        // 22:50 -> 06:30 is 7h40m
        assert_eq!(duration_between("22:50", "06:30"), Some(7.5));
        // 23:00 -> 06:10 is 7h10m
        assert_eq!(duration_between("23:00", "06:10"), Some(7.0));
    }

    #[test]
    fn test_duration_between_rejects_bad_input() {
        assert_eq!(duration_between("25:00", "07:00"), None);
        assert_eq!(duration_between("23:61", "07:00"), None);
        assert_eq!(duration_between("bedtime", "07:00"), None);
    }

    #[test]
    fn test_severity_palette() {
        assert_eq!(Severity::Critical.color(), "#f44336");
        assert_eq!(Severity::Success.color(), "#4CAF50");
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), "\"high\"");
    }

    #[test]
    fn test_season_from_month0() {
        assert_eq!(Season::from_month0(11), Season::Winter);
        assert_eq!(Season::from_month0(0), Season::Winter);
        assert_eq!(Season::from_month0(2), Season::Spring);
        assert_eq!(Season::from_month0(7), Season::Summer);
        assert_eq!(Season::from_month0(10), Season::Fall);
    }

    #[test]
    fn test_sleep_log_on_date_prefers_most_recent() {
        let mk = |date: &str, quality: u8| SleepEntry {
            id: None,
            date: date.parse().unwrap(),
            bed_time: "23:00".to_string(),
            wake_time: "07:00".to_string(),
            duration: 8.0,
            quality,
            interruptions: 0,
            felt_rested: true,
            notes: String::new(),
        };
        let log = SleepLog::new(vec![
            mk("2024-01-10T06:00:00Z", 3),
            mk("2024-01-10T22:00:00Z", 9),
        ]);
        let found = log
            .on_date(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap())
            .unwrap();
        assert_eq!(found.quality, 9);
        assert!(log
            .on_date(NaiveDate::from_ymd_opt(2024, 1, 11).unwrap())
            .is_none());
    }
}
