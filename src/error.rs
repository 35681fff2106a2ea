//! Error types for moodlens

use thiserror::Error;

/// Errors that can occur while loading or emitting journal data.
///
/// Analytic shortfalls (too few entries for a rule, a record missing its
/// symptom sub-objects) are not errors: analyzers report them as sentinel
/// values in their results and absent flags deserialize as `false`. Only
/// malformed input bytes, serialization failures, and strict-validation
/// rejections surface here.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Failed to parse journal records: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// First violation found by the strict validation entry points
    #[error("Invalid record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },
}
