//! Episode segmentation
//!
//! Walks the journal chronologically and splits it into maximal runs of
//! same-phase entries. A run's duration is the whole-day distance from its
//! first entry to the entry that broke it, or to `now` for the final still
//! open run. Only strictly positive durations count, so a phase change
//! logged at the same timestamp contributes nothing.

use chrono::{DateTime, Utc};

use crate::stats::round1;
use crate::types::{EntryLog, EpisodeSummary, MoodPhase, PhaseEpisodes};

/// Segments a journal into same-phase episodes
pub struct EpisodeSegmenter;

impl EpisodeSegmenter {
    /// Segment with the current time closing the open episode
    pub fn segment(log: &EntryLog) -> EpisodeSummary {
        Self::segment_at(log, Utc::now())
    }

    /// Segment with an explicit end boundary for the open episode, keeping
    /// the operation reproducible
    pub fn segment_at(log: &EntryLog, now: DateTime<Utc>) -> EpisodeSummary {
        let mut buckets = PhaseDurations::default();
        let mut current: Option<MoodPhase> = None;
        let mut episode_start: Option<DateTime<Utc>> = None;

        for entry in log.chronological() {
            if current != Some(entry.mood) {
                if let (Some(phase), Some(start)) = (current, episode_start) {
                    buckets.push(phase, duration_days(start, entry.date));
                }
                current = Some(entry.mood);
                episode_start = Some(entry.date);
            }
        }
        // The final episode is still open; `now` is its end boundary.
        if let (Some(phase), Some(start)) = (current, episode_start) {
            buckets.push(phase, duration_days(start, now));
        }

        buckets.summarize()
    }
}

/// Whole days elapsed between two instants, truncated
fn duration_days(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_days()
}

/// Collected episode durations per phase
#[derive(Debug, Default)]
struct PhaseDurations {
    depressive: Vec<i64>,
    interphase: Vec<i64>,
    manic: Vec<i64>,
}

impl PhaseDurations {
    fn push(&mut self, phase: MoodPhase, days: i64) {
        if days <= 0 {
            return;
        }
        match phase {
            MoodPhase::Depressive => self.depressive.push(days),
            MoodPhase::Interphase => self.interphase.push(days),
            MoodPhase::Manic => self.manic.push(days),
        }
    }

    fn summarize(&self) -> EpisodeSummary {
        EpisodeSummary {
            depressive: phase_summary(&self.depressive),
            interphase: phase_summary(&self.interphase),
            manic: phase_summary(&self.manic),
        }
    }
}

fn phase_summary(durations: &[i64]) -> PhaseEpisodes {
    if durations.is_empty() {
        return PhaseEpisodes {
            episodes: 0,
            mean_duration_days: None,
        };
    }
    let sum: i64 = durations.iter().sum();
    PhaseEpisodes {
        episodes: durations.len(),
        mean_duration_days: Some(round1(sum as f64 / durations.len() as f64)),
    }
}
