//! Trigger and symptom frequency analysis
//!
//! Two independent tallies over the full journal. Triggers are ranked by how
//! often each flag is set, with percentages relative to all set trigger
//! flags. Symptoms span both presentations (11 keys) and are counted
//! wherever set, whatever the entry's phase, with percentages relative to
//! the entry count. Both rankings are returned in full; display truncation
//! is the caller's job.

use crate::types::{
    EntryLog, FrequencyBreakdown, Symptom, SymptomFrequency, Trigger, TriggerFrequency,
};

/// Tallies trigger and symptom occurrences
pub struct FrequencyAnalyzer;

impl FrequencyAnalyzer {
    /// Ranked trigger tally, descending by count; ties keep the
    /// `Trigger::ALL` enumeration order. Empty when no entry has any
    /// trigger set, so no percentage is ever divided by zero.
    pub fn triggers(log: &EntryLog) -> Vec<TriggerFrequency> {
        let counts: Vec<(Trigger, usize)> = Trigger::ALL
            .iter()
            .map(|&trigger| {
                let count = log
                    .entries()
                    .iter()
                    .filter(|e| e.triggers.is_set(trigger))
                    .count();
                (trigger, count)
            })
            .collect();

        let total: usize = counts.iter().map(|(_, c)| c).sum();
        if total == 0 {
            return Vec::new();
        }

        let mut rows: Vec<TriggerFrequency> = counts
            .into_iter()
            .map(|(trigger, count)| TriggerFrequency {
                trigger,
                count,
                percentage: percentage(count, total),
            })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows
    }

    /// Ranked symptom tally across all 11 keys, descending by count; ties
    /// keep the `Symptom::ALL` enumeration order. Empty for an empty
    /// journal.
    pub fn symptoms(log: &EntryLog) -> Vec<SymptomFrequency> {
        if log.is_empty() {
            return Vec::new();
        }
        let total = log.len();
        let mut rows: Vec<SymptomFrequency> = Symptom::ALL
            .iter()
            .map(|&symptom| {
                let count = log
                    .entries()
                    .iter()
                    .filter(|e| e.has_symptom(symptom))
                    .count();
                SymptomFrequency {
                    symptom,
                    count,
                    percentage: percentage(count, total),
                }
            })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows
    }

    /// Both tallies bundled for the report
    pub fn breakdown(log: &EntryLog) -> FrequencyBreakdown {
        FrequencyBreakdown {
            triggers: Self::triggers(log),
            symptoms: Self::symptoms(log),
        }
    }
}

fn percentage(count: usize, total: usize) -> u32 {
    (count as f64 / total as f64 * 100.0).round() as u32
}
