//! Seasonal mood distribution
//!
//! Buckets the journal by meteorological season (Dec-Feb winter, Mar-May
//! spring, Jun-Aug summer, Sep-Nov fall) and reports per-season phase
//! counts together with a dominant phase. Seasons with no entries are
//! omitted from the output.

use chrono::Datelike;

use crate::types::{EntryLog, MoodCounts, MoodPhase, Season, SeasonSummary};

/// Buckets entries by season and picks each season's dominant phase
pub struct SeasonalAggregator;

impl SeasonalAggregator {
    /// Per-season summaries in winter/spring/summer/fall order, skipping
    /// seasons without entries. Year boundaries are ignored; only the
    /// calendar month matters.
    pub fn aggregate(log: &EntryLog) -> Vec<SeasonSummary> {
        let mut buckets = [MoodCounts::default(); 4];
        for entry in log.entries() {
            let counts = &mut buckets[Season::from_month0(entry.date.month0()) as usize];
            counts.total += 1;
            match entry.mood {
                MoodPhase::Depressive => counts.depressive += 1,
                MoodPhase::Interphase => counts.interphase += 1,
                MoodPhase::Manic => counts.manic += 1,
            }
        }

        Season::ALL
            .iter()
            .map(|&season| (season, buckets[season as usize]))
            .filter(|(_, counts)| counts.total > 0)
            .map(|(season, counts)| SeasonSummary {
                season,
                counts,
                dominant: dominant_phase(&counts),
            })
            .collect()
    }
}

/// Dominant phase for one season's tally.
///
/// Interphase holds unless another phase strictly exceeds it; when
/// depressive and manic tie at the top, manic wins.
fn dominant_phase(counts: &MoodCounts) -> MoodPhase {
    let mut dominant = MoodPhase::Interphase;
    let mut max = counts.interphase;
    if counts.depressive > max {
        dominant = MoodPhase::Depressive;
        max = counts.depressive;
    }
    if counts.manic > max || (counts.manic == max && dominant == MoodPhase::Depressive) {
        dominant = MoodPhase::Manic;
    }
    dominant
}
