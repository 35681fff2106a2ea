//! Journal statistics
//!
//! Counts and intensity averages over the full journal plus fixed recent
//! windows, and the sleep summary. The windows operate on the last n
//! *entries*, not calendar days, and every name says so.

use crate::types::{EntryLog, MoodCounts, MoodEntry, MoodPhase, MoodStats, SleepLog, SleepStats};

/// Short recent window (entries) surfaced in the summary
pub const RECENT_SHORT: usize = 3;
/// Week-sized recent window (entries)
pub const RECENT_WEEK: usize = 7;
/// Month-sized recent window (entries)
pub const RECENT_MONTH: usize = 30;

/// Statistics over an ordered journal snapshot
pub struct StatsAggregator;

impl StatsAggregator {
    /// Total and per-phase entry counts. The phase counts always sum to
    /// `total`; an empty journal yields all zeros.
    pub fn counts(log: &EntryLog) -> MoodCounts {
        let mut counts = MoodCounts::default();
        for entry in log.entries() {
            counts.total += 1;
            match entry.mood {
                MoodPhase::Depressive => counts.depressive += 1,
                MoodPhase::Interphase => counts.interphase += 1,
                MoodPhase::Manic => counts.manic += 1,
            }
        }
        counts
    }

    /// Mean intensity over the `n` most recent entries, or over all of them
    /// if fewer exist. `None` when the window is empty (the defined
    /// sentinel; callers render it as 0 or a dash).
    pub fn windowed_average_intensity(log: &EntryLog, n: usize) -> Option<f64> {
        mean_intensity(log.recent(n))
    }

    /// Full statistics summary. Averages are rounded to one decimal for
    /// parity with the journal's stats endpoint; the overall average is 0.0
    /// for an empty journal.
    pub fn summary(log: &EntryLog) -> MoodStats {
        MoodStats {
            counts: Self::counts(log),
            average_intensity: mean_intensity(log.entries()).map(round1).unwrap_or(0.0),
            recent_3: Self::windowed_average_intensity(log, RECENT_SHORT).map(round1),
            recent_7: Self::windowed_average_intensity(log, RECENT_WEEK).map(round1),
            recent_30: Self::windowed_average_intensity(log, RECENT_MONTH).map(round1),
        }
    }

    /// Sleep summary: averages of duration, quality, and interruptions to
    /// one decimal, all zeros when the sleep log is empty.
    pub fn sleep_summary(log: &SleepLog) -> SleepStats {
        if log.is_empty() {
            return SleepStats {
                total: 0,
                avg_duration: 0.0,
                avg_quality: 0.0,
                avg_interruptions: 0.0,
            };
        }
        let n = log.len() as f64;
        let duration: f64 = log.entries().iter().map(|e| e.duration).sum();
        let quality: f64 = log.entries().iter().map(|e| e.quality as f64).sum();
        let interruptions: f64 = log.entries().iter().map(|e| e.interruptions as f64).sum();
        SleepStats {
            total: log.len(),
            avg_duration: round1(duration / n),
            avg_quality: round1(quality / n),
            avg_interruptions: round1(interruptions / n),
        }
    }
}

/// Mean intensity over a slice of entries; `None` when the slice is empty
pub(crate) fn mean_intensity(entries: &[MoodEntry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let sum: u32 = entries.iter().map(|e| e.intensity as u32).sum();
    Some(sum as f64 / entries.len() as f64)
}

/// Round to one decimal place for display parity with the journal
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
