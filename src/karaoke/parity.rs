/*!
 * Duration parity validation.
 *
 * Karaoke durations are authored independently of a line's own start and end
 * timestamps. This module checks that the two agree:
 * - the folded durations sum to the line span, within a tolerance
 * - no syllable keeps a negative duration after folding
 */

use crate::errors::{KaraokeError, ParityIssue};
use crate::karaoke::model::{Centiseconds, Line};

/// Default allowed drift between summed durations and the line span
pub const DEFAULT_TOLERANCE_CS: Centiseconds = 20;

/// Validator for a line's duration parity
#[derive(Debug, Clone, Copy)]
pub struct ParityValidator {
    tolerance: Centiseconds,
}

impl Default for ParityValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ParityValidator {
    /// Create a validator with the default tolerance
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE_CS,
        }
    }

    /// Create a validator with a custom tolerance in centiseconds
    pub fn with_tolerance(tolerance: Centiseconds) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> Centiseconds {
        self.tolerance
    }

    /// Find the first parity issue of a folded line, if any
    pub fn check_line(&self, line: &Line) -> Option<ParityIssue> {
        if let Some((text, duration)) = line
            .texts
            .iter()
            .zip(&line.durations)
            .find(|(_, duration)| **duration < 0)
        {
            return Some(ParityIssue::NegativeDuration {
                text: text.clone(),
                duration: *duration,
            });
        }

        let Some(sum_durations) = line.total_duration() else {
            return Some(ParityIssue::DurationOverflow {
                line_start: line.start,
                line_end: line.end,
            });
        };
        let drift = sum_durations.abs_diff(line.end.saturating_sub(line.start));
        if i64::try_from(drift).map_or(true, |drift| drift > self.tolerance) {
            return Some(ParityIssue::SumMismatch {
                line_start: line.start,
                line_end: line.end,
                sum_durations,
                tolerance: self.tolerance,
            });
        }

        None
    }

    /// Accept a folded line or reject it with a parity violation
    pub fn validate_line(&self, line: &Line) -> Result<(), KaraokeError> {
        match self.check_line(line) {
            Some(issue) => Err(KaraokeError::ParityViolation(issue)),
            None => Ok(()),
        }
    }
}
