//! Weekly pattern detection
//!
//! Advisory rules over the 7 most recent entries. Each rule contributes at
//! most one message and the rules are independent, so the output keeps the
//! fixed rule order. Below 3 total entries the detector reports
//! insufficient data instead of evaluating anything; with no rule hits the
//! list is simply empty.

use crate::stats::mean_intensity;
use crate::types::{EntryLog, MoodPhase, PatternMessage, Severity};

/// Fewer total entries than this and no rule runs
pub const MIN_ENTRIES_FOR_PATTERNS: usize = 3;
/// Rules look at this many most-recent entries
const PATTERN_WINDOW: usize = 7;
/// Total history size that unlocks the distribution breakdown
const BREAKDOWN_HISTORY: usize = 20;
/// The distribution breakdown covers this many most-recent entries
const BREAKDOWN_WINDOW: usize = 30;

/// Evaluates the weekly advisory rules
pub struct PatternDetector;

impl PatternDetector {
    pub fn detect(log: &EntryLog) -> Vec<PatternMessage> {
        if log.len() < MIN_ENTRIES_FOR_PATTERNS {
            return vec![PatternMessage {
                severity: Severity::Info,
                text: format!(
                    "Not enough entries yet for pattern detection. Log at least {} to see weekly insights.",
                    MIN_ENTRIES_FOR_PATTERNS
                ),
            }];
        }

        let window = log.recent(PATTERN_WINDOW);
        let mut messages = Vec::new();

        let depressive = window
            .iter()
            .filter(|e| e.mood == MoodPhase::Depressive)
            .count();
        if depressive >= 4 {
            messages.push(PatternMessage {
                severity: Severity::Warning,
                text: format!(
                    "{} of your last {} entries were depressive. Consider sharing this stretch with your clinician.",
                    depressive,
                    window.len()
                ),
            });
        }

        let manic = window.iter().filter(|e| e.mood == MoodPhase::Manic).count();
        if manic >= 3 {
            messages.push(PatternMessage {
                severity: Severity::Warning,
                text: format!(
                    "{} of your last {} entries were manic. Keep an eye on sleep and spending.",
                    manic,
                    window.len()
                ),
            });
        }

        // Adjacent pairs in most-recent-first order
        let changes = window.windows(2).filter(|w| w[0].mood != w[1].mood).count();
        if changes >= 5 {
            messages.push(PatternMessage {
                severity: Severity::Info,
                text: format!(
                    "Your mood changed {} times over your last {} entries, which suggests an unsettled stretch.",
                    changes,
                    window.len()
                ),
            });
        }

        let interphase = window
            .iter()
            .filter(|e| e.mood == MoodPhase::Interphase)
            .count();
        if interphase >= 5 {
            messages.push(PatternMessage {
                severity: Severity::Success,
                text: format!(
                    "{} of your last {} entries were stable. Keep up whatever is working.",
                    interphase,
                    window.len()
                ),
            });
        }

        if let Some(mean) = mean_intensity(window) {
            if mean >= 8.0 {
                messages.push(PatternMessage {
                    severity: Severity::Warning,
                    text: format!(
                        "Your average intensity over the last {} entries is {:.1}. Sustained high intensity is worth flagging to your care team.",
                        window.len(),
                        mean
                    ),
                });
            }
        }

        if log.len() >= BREAKDOWN_HISTORY {
            let recent = log.recent(BREAKDOWN_WINDOW);
            let dep = recent
                .iter()
                .filter(|e| e.mood == MoodPhase::Depressive)
                .count();
            let inter = recent
                .iter()
                .filter(|e| e.mood == MoodPhase::Interphase)
                .count();
            let man = recent.iter().filter(|e| e.mood == MoodPhase::Manic).count();
            messages.push(PatternMessage {
                severity: Severity::Info,
                text: format!(
                    "Phase distribution over your last {} entries: {} depressive, {} interphase, {} manic.",
                    recent.len(),
                    dep,
                    inter,
                    man
                ),
            });
        }

        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DepressiveSymptoms, ManicSymptoms, MoodEntry, TriggerFlags};
    use pretty_assertions::assert_eq;

    fn make_entry(day: u32, mood: MoodPhase) -> MoodEntry {
        MoodEntry {
            id: None,
            date: format!("2024-05-{:02}T08:00:00Z", day).parse().unwrap(),
            mood,
            intensity: 5,
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

    /// Most-recent-first moods mapped onto descending May dates
    fn log_of(moods: &[MoodPhase]) -> EntryLog {
        let entries = moods
            .iter()
            .enumerate()
            .map(|(i, &mood)| make_entry(28 - i as u32, mood))
            .collect();
        EntryLog::new(entries)
    }

    #[test]
    fn test_below_gate_reports_insufficient_data() {
        let log = log_of(&[MoodPhase::Depressive, MoodPhase::Manic]);
        let messages = PatternDetector::detect(&log);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].severity, Severity::Info);
        assert!(messages[0].text.contains("Not enough entries"));
    }

    #[test]
    fn test_exactly_three_entries_runs_the_rules() {
        // Gate is strictly below 3, so 3 mixed entries evaluate and
        // produce no messages at all.
        let log = log_of(&[
            MoodPhase::Depressive,
            MoodPhase::Interphase,
            MoodPhase::Manic,
        ]);
        assert!(PatternDetector::detect(&log).is_empty());
    }

    #[test]
    fn test_depressive_streak_warns() {
        let log = log_of(&[
            MoodPhase::Depressive,
            MoodPhase::Depressive,
            MoodPhase::Depressive,
            MoodPhase::Depressive,
            MoodPhase::Interphase,
            MoodPhase::Interphase,
            MoodPhase::Interphase,
        ]);
        let messages = PatternDetector::detect(&log);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].severity, Severity::Warning);
        assert!(messages[0].text.contains("4 of your last 7"));
    }

    #[test]
    fn test_manic_streak_warns() {
        let log = log_of(&[
            MoodPhase::Manic,
            MoodPhase::Manic,
            MoodPhase::Manic,
            MoodPhase::Interphase,
            MoodPhase::Interphase,
            MoodPhase::Interphase,
            MoodPhase::Interphase,
        ]);
        let messages = PatternDetector::detect(&log);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].severity, Severity::Warning);
        assert!(messages[0].text.contains("manic"));
    }

    #[test]
    fn test_frequent_changes_reported_after_streak_rules() {
        // Alternating moods: 6 adjacent changes, and 4 depressive entries,
        // so the depressive warning precedes the change notice.
        let log = log_of(&[
            MoodPhase::Depressive,
            MoodPhase::Interphase,
            MoodPhase::Depressive,
            MoodPhase::Interphase,
            MoodPhase::Depressive,
            MoodPhase::Interphase,
            MoodPhase::Depressive,
        ]);
        let messages = PatternDetector::detect(&log);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].severity, Severity::Warning);
        assert_eq!(messages[1].severity, Severity::Info);
        assert!(messages[1].text.contains("changed 6 times"));
    }

    #[test]
    fn test_stable_week_commended() {
        let log = log_of(&[
            MoodPhase::Interphase,
            MoodPhase::Interphase,
            MoodPhase::Interphase,
            MoodPhase::Interphase,
            MoodPhase::Interphase,
            MoodPhase::Depressive,
            MoodPhase::Manic,
        ]);
        let messages = PatternDetector::detect(&log);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].severity, Severity::Success);
        assert!(messages[0].text.contains("5 of your last 7"));
    }

    #[test]
    fn test_high_mean_intensity_warns() {
        let mut entries = vec![
            make_entry(26, MoodPhase::Interphase),
            make_entry(27, MoodPhase::Interphase),
            make_entry(28, MoodPhase::Interphase),
        ];
        entries[0].intensity = 9;
        entries[1].intensity = 8;
        entries[2].intensity = 8;
        let messages = PatternDetector::detect(&EntryLog::new(entries));
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].severity, Severity::Warning);
        assert!(messages[0].text.contains("8.3"));
    }

    #[test]
    fn test_mean_intensity_boundary_inclusive() {
        let mut entries = vec![
            make_entry(26, MoodPhase::Interphase),
            make_entry(27, MoodPhase::Interphase),
            make_entry(28, MoodPhase::Interphase),
        ];
        for e in &mut entries {
            e.intensity = 8;
        }
        let messages = PatternDetector::detect(&EntryLog::new(entries));
        assert_eq!(messages.len(), 1);
        assert!(messages[0].text.contains("8.0"));
    }

    #[test]
    fn test_long_history_always_gets_breakdown() {
        let entries = (1..=20)
            .map(|day| make_entry(day, MoodPhase::Interphase))
            .collect();
        let messages = PatternDetector::detect(&EntryLog::new(entries));
        // Stable-week commendation plus the unconditional breakdown
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].severity, Severity::Success);
        let breakdown = &messages[1];
        assert_eq!(breakdown.severity, Severity::Info);
        assert!(breakdown.text.contains("20 entries"));
        assert!(breakdown.text.contains("20 interphase"));
    }
}
