/*!
 * Error types for the karatime application.
 *
 * This module contains custom error types for the karaoke timing pipeline and
 * the application layer around it, using the thiserror crate for ergonomic
 * error definitions.
 */

use thiserror::Error;

/// Ways a line can fail the duration parity check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParityIssue {
    /// Summed syllable durations drift too far from the line's own span
    SumMismatch {
        line_start: i64,
        line_end: i64,
        sum_durations: i64,
        tolerance: i64,
    },
    /// A syllable still carries a negative duration after folding
    NegativeDuration {
        text: String,
        duration: i64,
    },
    /// Syllable durations add up past the representable range
    DurationOverflow {
        line_start: i64,
        line_end: i64,
    },
}

impl std::fmt::Display for ParityIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParityIssue::SumMismatch { line_start, line_end, sum_durations, tolerance } => {
                write!(
                    f,
                    "syllables sum to {}cs but line spans {}cs ({}..{}, tolerance {}cs)",
                    sum_durations,
                    line_end - line_start,
                    line_start,
                    line_end,
                    tolerance
                )
            }
            ParityIssue::NegativeDuration { text, duration } => {
                write!(f, "syllable {:?} has negative duration {}cs", text, duration)
            }
            ParityIssue::DurationOverflow { line_start, line_end } => {
                write!(f, "syllable durations overflow for line {}..{}", line_start, line_end)
            }
        }
    }
}

/// Errors that discard a whole document during karaoke timing extraction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KaraokeError {
    /// The document has no `[Events]` section marker
    #[error("No [Events] section found")]
    MissingEventsSection,

    /// A start or end timestamp could not be read
    #[error("Invalid timestamp: {0:?}")]
    TimestampInvalid(String),

    /// A karaoke tag's duration code is missing, duplicated or unparseable
    #[error("Malformed karaoke tag {tag:?}: {reason}")]
    TagMalformed {
        /// The offending tag text
        tag: String,
        /// What was wrong with it
        reason: String,
    },

    /// Leading silence could not be absorbed into the line start
    #[error("Unresolvable leading delay: {0}")]
    DelayUnresolvable(String),

    /// Syllable durations do not agree with the line's timestamps
    #[error("Parity violation: {0}")]
    ParityViolation(ParityIssue),
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or unreadable configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Error from the karaoke pipeline
    #[error("Karaoke error: {0}")]
    Karaoke(#[from] KaraokeError),
}

// Utility functions for error conversion

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Config(error.to_string())
    }
}
