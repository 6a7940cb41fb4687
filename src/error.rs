//! Error types for configuration and the headless runner.
//!
//! The simulation itself has no recoverable failures: invalid transitions are
//! ignored and bookkeeping violations are debug assertions. Only loading a
//! [`Tuning`](crate::Tuning) can fail; runner flags are validated by clap.

use std::fmt;
use std::path::PathBuf;

/// Top-level error enum for skater-run.
#[derive(Debug)]
pub enum SkaterError {
    /// A tuning value is outside the range the simulation can work with.
    InvalidTuning {
        /// Name of the tuning field.
        field: &'static str,
        /// The value that was rejected.
        value: f64,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },

    /// The tuning document was not valid JSON for [`Tuning`](crate::Tuning).
    TuningParse(serde_json::Error),

    /// Reading a file from disk failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for SkaterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkaterError::InvalidTuning {
                field,
                value,
                expected,
            } => write!(f, "invalid tuning value {field} = {value} (expected {expected})"),
            SkaterError::TuningParse(err) => write!(f, "could not parse tuning: {err}"),
            SkaterError::Io { path, source } => {
                write!(f, "could not read {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SkaterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SkaterError::TuningParse(err) => Some(err),
            SkaterError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SkaterError {
    fn from(err: serde_json::Error) -> Self {
        SkaterError::TuningParse(err)
    }
}
