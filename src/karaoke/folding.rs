use crate::errors::{KaraokeError, ParityIssue};
use crate::karaoke::model::{Centiseconds, Syllable};

// @module: Blank-syllable folding

/// Fold blank syllables into their neighbours and drop them.
///
/// Each maximal run of blanks adds its total duration once to the nearest
/// preceding non-blank syllable. A run at the head of the sequence, which
/// has no predecessor, is added to the first non-blank syllable instead.
/// A sequence of only blanks folds to nothing.
pub fn fold_blank_syllables(syllables: Vec<Syllable>) -> Result<Vec<Syllable>, KaraokeError> {
    let mut folded: Vec<Syllable> = Vec::with_capacity(syllables.len());
    let mut orphaned: Centiseconds = 0;

    for mut syllable in syllables {
        let (line_start, line_end) = (syllable.line_start, syllable.line_end);
        let overflow = || KaraokeError::ParityViolation(ParityIssue::DurationOverflow { line_start, line_end });
        if syllable.is_blank() {
            let target = match folded.last_mut() {
                Some(previous) => &mut previous.duration,
                None => &mut orphaned,
            };
            *target = target.checked_add(syllable.duration).ok_or_else(overflow)?;
            continue;
        }
        if folded.is_empty() {
            syllable.duration = syllable.duration.checked_add(orphaned).ok_or_else(overflow)?;
            orphaned = 0;
        }
        folded.push(syllable);
    }

    Ok(folded)
}
