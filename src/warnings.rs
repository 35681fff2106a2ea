//! Early-warning evaluation
//!
//! Prioritized alerts over the most recent entries. The evaluator compares
//! the last 3 entries against the preceding window, looks for phase
//! transitions after a stable run, and checks symptom and trigger streaks.
//! Rules fire independently and the output keeps the fixed rule order;
//! when nothing fires a single all-clear message is returned. Below 7
//! total entries the evaluator reports insufficient data instead.

use crate::stats::mean_intensity;
use crate::types::{EarlyWarning, EntryLog, MoodPhase, Severity, Trigger};

/// Fewer total entries than this and no rule runs
pub const MIN_ENTRIES_FOR_WARNINGS: usize = 7;
/// Recent-mean window for spikes, streaks, and trigger tallies
const RECENT_WINDOW: usize = 3;
/// Streak rules fire over this many most-recent entries
const ALERT_WINDOW: usize = 7;
/// Prior-window baseline covers entries at these positions
const PRIOR_START: usize = 3;
const PRIOR_END: usize = 10;
/// Recent mean must exceed the prior mean by more than this to spike
const SPIKE_DELTA: f64 = 2.0;

/// Evaluates the early-warning rules
pub struct WarningEvaluator;

impl WarningEvaluator {
    pub fn evaluate(log: &EntryLog) -> Vec<EarlyWarning> {
        if log.len() < MIN_ENTRIES_FOR_WARNINGS {
            return vec![EarlyWarning {
                severity: Severity::Info,
                title: "Insufficient data".to_string(),
                message: format!(
                    "Early warnings need at least {} entries. Keep logging to activate them.",
                    MIN_ENTRIES_FOR_WARNINGS
                ),
                recommendations: Vec::new(),
            }];
        }

        let entries = log.entries();
        let current = &entries[0];
        let last_3 = log.recent(RECENT_WINDOW);
        let last_7 = log.recent(ALERT_WINDOW);
        let mut warnings = Vec::new();

        // Rule 1: intensity spike against the prior window. The gate
        // guarantees at least 4 prior entries; the self-comparison fallback
        // keeps the rule total even if the gate ever changes.
        if let Some(recent_mean) = mean_intensity(last_3) {
            let prior = &entries[PRIOR_START..entries.len().min(PRIOR_END)];
            let prior_mean = mean_intensity(prior).unwrap_or(recent_mean);
            if recent_mean - prior_mean > SPIKE_DELTA {
                warnings.push(EarlyWarning {
                    severity: Severity::Warning,
                    title: "Intensity spike".to_string(),
                    message: format!(
                        "Your average intensity jumped from {:.1} to {:.1} over your last {} entries.",
                        prior_mean, recent_mean, RECENT_WINDOW
                    ),
                    recommendations: vec![
                        "Review what changed over the last few days".to_string(),
                        "Contact your care team if the rise continues".to_string(),
                    ],
                });
            }
        }

        // Rule 2: phase transition after a stable run
        let transition_window = &entries[PRIOR_START..PRIOR_START + 4];
        let was_stable = transition_window
            .iter()
            .all(|e| e.mood == MoodPhase::Interphase);
        if was_stable && current.mood != MoodPhase::Interphase {
            warnings.push(EarlyWarning {
                severity: Severity::High,
                title: "Possible phase shift".to_string(),
                message: format!(
                    "After a stable stretch your most recent mood is {}.",
                    current.mood.as_str()
                ),
                recommendations: vec![
                    "Log daily while this develops".to_string(),
                    "Share the change with your clinician".to_string(),
                ],
            });
        }

        // Rule 3: suicidal ideation during a depressive phase
        let ideation = last_7
            .iter()
            .filter(|e| e.depressive_symptoms.suicidal_thoughts)
            .count();
        if current.mood == MoodPhase::Depressive && ideation >= 2 {
            warnings.push(EarlyWarning {
                severity: Severity::Critical,
                title: "Crisis support recommended".to_string(),
                message: format!(
                    "Suicidal thoughts appear in {} of your last {} entries during a depressive phase.",
                    ideation,
                    last_7.len()
                ),
                recommendations: vec![
                    "Contact your clinician or a crisis line today".to_string(),
                    "If you are in immediate danger, call your local emergency number".to_string(),
                    "Stay with someone you trust until you feel safe".to_string(),
                ],
            });
        }

        // Rule 4: sleep disruption throughout a depressive stretch
        let all_disrupted = last_3.iter().all(|e| e.depressive_symptoms.sleep_disrupted());
        if current.mood == MoodPhase::Depressive && all_disrupted {
            warnings.push(EarlyWarning {
                severity: Severity::Warning,
                title: "Sleep disruption".to_string(),
                message: format!(
                    "All of your last {} entries report insomnia or oversleeping alongside a depressive phase.",
                    last_3.len()
                ),
                recommendations: vec![
                    "Keep a fixed wake time".to_string(),
                    "Mention the sleep change to your clinician".to_string(),
                ],
            });
        }

        // Rule 5: reduced sleep during mania
        let reduced = last_3
            .iter()
            .filter(|e| e.manic_symptoms.reduced_sleep)
            .count();
        if current.mood == MoodPhase::Manic && reduced >= 2 {
            warnings.push(EarlyWarning {
                severity: Severity::Warning,
                title: "Reduced sleep".to_string(),
                message: format!(
                    "{} of your last {} entries report reduced sleep during a manic phase.",
                    reduced,
                    last_3.len()
                ),
                recommendations: vec![
                    "Protect a full sleep window tonight".to_string(),
                    "Avoid stimulants late in the day".to_string(),
                ],
            });
        }

        // Rule 6: impulsive behavior during mania
        let impulsive = last_3
            .iter()
            .filter(|e| e.manic_symptoms.impulse_flagged())
            .count();
        if current.mood == MoodPhase::Manic && impulsive >= 2 {
            warnings.push(EarlyWarning {
                severity: Severity::Warning,
                title: "Impulsivity".to_string(),
                message: format!(
                    "{} of your last {} entries flag impulsivity or excessive spending.",
                    impulsive,
                    last_3.len()
                ),
                recommendations: vec![
                    "Delay large purchases for a few days".to_string(),
                    "Ask someone you trust to hold the budget".to_string(),
                ],
            });
        }

        // Rule 7: recurring triggers, one combined message
        let recurring: Vec<&'static str> = Trigger::ALL
            .iter()
            .filter(|&&trigger| {
                last_3.iter().filter(|e| e.triggers.is_set(trigger)).count() >= 2
            })
            .map(|t| t.label())
            .collect();
        if !recurring.is_empty() {
            warnings.push(EarlyWarning {
                severity: Severity::Info,
                title: "Recurring triggers".to_string(),
                message: format!(
                    "Recurring triggers in your last {} entries: {}.",
                    last_3.len(),
                    recurring.join(", ")
                ),
                recommendations: vec![
                    "Plan around the trigger where you can".to_string(),
                ],
            });
        }

        // Rule 8: stable week with low intensity
        let all_stable = last_7.iter().all(|e| e.mood == MoodPhase::Interphase);
        if all_stable {
            if let Some(recent_mean) = mean_intensity(last_3) {
                if recent_mean < 5.0 {
                    warnings.push(EarlyWarning {
                        severity: Severity::Success,
                        title: "Stable stretch".to_string(),
                        message: format!(
                            "All of your last {} entries are stable with low intensity. Well done.",
                            last_7.len()
                        ),
                        recommendations: Vec::new(),
                    });
                }
            }
        }

        if warnings.is_empty() {
            warnings.push(EarlyWarning {
                severity: Severity::Info,
                title: "No concerns detected".to_string(),
                message: "Nothing in your recent entries needs attention right now.".to_string(),
                recommendations: Vec::new(),
            });
        }

        warnings
    }
}
