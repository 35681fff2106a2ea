//! Sleep/mood correlation
//!
//! Joins each mood entry against the sleep record on the same calendar date
//! and counts two co-occurrences: poor sleep on depressive days and good
//! sleep on stable days. The 1-10 quality scale is collapsed into
//! poor/fair/good bands first; the band thresholds are adjustable because
//! the heuristic predates the numeric scale.

use serde::{Deserialize, Serialize};

use crate::types::{EntryLog, MoodPhase, QualityBand, SleepCorrelation, SleepLog};

/// Band thresholds on the 1-10 sleep quality scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityBands {
    /// Highest quality still counted as poor
    pub poor_max: u8,
    /// Lowest quality counted as good
    pub good_min: u8,
}

impl Default for QualityBands {
    fn default() -> Self {
        QualityBands {
            poor_max: 4,
            good_min: 7,
        }
    }
}

impl QualityBands {
    pub fn band(&self, quality: u8) -> QualityBand {
        if quality <= self.poor_max {
            QualityBand::Poor
        } else if quality >= self.good_min {
            QualityBand::Good
        } else {
            QualityBand::Fair
        }
    }
}

/// Correlates mood entries with same-date sleep records
pub struct CorrelationAnalyzer;

impl CorrelationAnalyzer {
    /// Correlation under the default poor <= 4 / good >= 7 bands
    pub fn correlate(entries: &EntryLog, sleep: &SleepLog) -> SleepCorrelation {
        Self::correlate_with(entries, sleep, &QualityBands::default())
    }

    /// Joins on the calendar date; time of day is ignored on both sides.
    /// When a date carries several sleep records the most recent one wins.
    /// `percentage` is `None` when no entry matched a sleep record.
    pub fn correlate_with(
        entries: &EntryLog,
        sleep: &SleepLog,
        bands: &QualityBands,
    ) -> SleepCorrelation {
        let mut matched = 0usize;
        let mut poor_sleep_depression = 0usize;
        let mut good_sleep_stable = 0usize;

        for entry in entries.entries() {
            if let Some(night) = sleep.on_date(entry.calendar_date()) {
                matched += 1;
                match (bands.band(night.quality), entry.mood) {
                    (QualityBand::Poor, MoodPhase::Depressive) => poor_sleep_depression += 1,
                    (QualityBand::Good, MoodPhase::Interphase) => good_sleep_stable += 1,
                    _ => {}
                }
            }
        }

        let percentage = if matched > 0 {
            let hits = (poor_sleep_depression + good_sleep_stable) as f64;
            Some((hits / matched as f64 * 100.0).round() as u32)
        } else {
            None
        };

        SleepCorrelation {
            matched,
            poor_sleep_depression,
            good_sleep_stable,
            percentage,
        }
    }
}
