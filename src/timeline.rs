//! Chart timelines
//!
//! Day-by-day series for the mood chart (last 30 days) and the sleep chart
//! (last 14 days), oldest day first, today included. Days without records
//! produce a point with empty values so a chart can render the gap instead
//! of interpolating over it.

use chrono::{DateTime, Utc};

use crate::correlation::QualityBands;
use crate::types::{EntryLog, MoodEntry, MoodPhase, SleepLog, SleepTimelinePoint, TimelinePoint};

/// Days covered by the mood timeline
pub const MOOD_TIMELINE_DAYS: u32 = 30;
/// Days covered by the sleep timeline
pub const SLEEP_TIMELINE_DAYS: u32 = 14;

/// Builds the daily chart series
pub struct TimelineBuilder;

impl TimelineBuilder {
    /// Signed daily mood series: depressive entries pull the value below
    /// zero, manic entries push it above, interphase entries hold it at
    /// zero. Several entries on one day average out; the phase shown for
    /// the day is the most recent entry's.
    pub fn mood_series(log: &EntryLog, now: DateTime<Utc>, days: u32) -> Vec<TimelinePoint> {
        let today = now.date_naive();
        let mut points = Vec::with_capacity(days as usize);
        for offset in (0..days as i64).rev() {
            let date = today - chrono::Duration::days(offset);
            let day_entries: Vec<&MoodEntry> = log
                .entries()
                .iter()
                .filter(|e| e.calendar_date() == date)
                .collect();
            if day_entries.is_empty() {
                points.push(TimelinePoint {
                    date,
                    value: None,
                    phase: None,
                });
            } else {
                let sum: f64 = day_entries.iter().map(|e| signed_intensity(e)).sum();
                points.push(TimelinePoint {
                    date,
                    value: Some(sum / day_entries.len() as f64),
                    phase: Some(day_entries[0].mood),
                });
            }
        }
        points
    }

    /// Daily sleep series carrying the quality band charts color by. When
    /// a date has several sleep records the most recent one wins.
    pub fn sleep_series(
        log: &SleepLog,
        now: DateTime<Utc>,
        days: u32,
        bands: &QualityBands,
    ) -> Vec<SleepTimelinePoint> {
        let today = now.date_naive();
        let mut points = Vec::with_capacity(days as usize);
        for offset in (0..days as i64).rev() {
            let date = today - chrono::Duration::days(offset);
            if let Some(night) = log.on_date(date) {
                points.push(SleepTimelinePoint {
                    date,
                    duration: Some(night.duration),
                    quality: Some(night.quality),
                    band: Some(bands.band(night.quality)),
                });
            } else {
                points.push(SleepTimelinePoint {
                    date,
                    duration: None,
                    quality: None,
                    band: None,
                });
            }
        }
        points
    }
}

fn signed_intensity(entry: &MoodEntry) -> f64 {
    match entry.mood {
        MoodPhase::Depressive => -(entry.intensity as f64),
        MoodPhase::Interphase => 0.0,
        MoodPhase::Manic => entry.intensity as f64,
    }
}
