use log::debug;

use crate::errors::KaraokeError;
use crate::karaoke::model::{Centiseconds, EventRecord, RawSyllable, Syllable};
use crate::karaoke::timestamp::{format_centiseconds, parse_centiseconds};
use crate::karaoke::tokenizer::{karaoke_duration, strip_markup, tokenize};

// @module: Syllable expansion with leading-delay absorption

/// Absorb blank syllables at the head of a line as silence.
///
/// Returns the accumulated delay and the raw syllables that remain, the first
/// of which has displayable text. Leading delays must be non-negative so the
/// shifted line start never moves backwards.
pub fn absorb_leading_delay<'r, 'a>(
    raw: &'r [RawSyllable<'a>],
) -> Result<(Centiseconds, &'r [RawSyllable<'a>]), KaraokeError> {
    let mut delay: Centiseconds = 0;
    let mut consumed = 0;

    for syllable in raw {
        if !strip_markup(syllable.text).is_empty() {
            break;
        }
        let silence = karaoke_duration(syllable.tag)?;
        if silence < 0 {
            return Err(KaraokeError::DelayUnresolvable(format!(
                "negative leading delay {}cs in {}",
                silence, syllable.tag
            )));
        }
        delay = delay.checked_add(silence).ok_or_else(|| {
            KaraokeError::DelayUnresolvable(format!("leading delay overflows at {}", syllable.tag))
        })?;
        consumed += 1;
    }

    if consumed == raw.len() {
        return Err(KaraokeError::DelayUnresolvable(format!(
            "all {} syllables are blank",
            raw.len()
        )));
    }

    Ok((delay, &raw[consumed..]))
}

/// Expand one event into timed syllables.
///
/// Every syllable carries the line's bounds: the start shifted by any
/// leading delay, and the unmodified end. An event without karaoke tags
/// expands to nothing.
pub fn expand_event(event: &EventRecord) -> Result<Vec<Syllable>, KaraokeError> {
    let start = parse_centiseconds(&event.start)?;
    let end = parse_centiseconds(&event.end)?;

    let raw: Vec<RawSyllable<'_>> = tokenize(&event.text).collect();
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let (delay, audible) = absorb_leading_delay(&raw)?;
    let line_start = start.checked_add(delay).ok_or_else(|| {
        KaraokeError::DelayUnresolvable(format!(
            "leading delay {}cs pushes start {} out of range",
            delay, event.start
        ))
    })?;
    if delay > 0 {
        debug!(
            "Absorbed {}cs of leading silence, line now starts at {}",
            delay,
            format_centiseconds(line_start)
        );
    }

    audible
        .iter()
        .map(|syllable| -> Result<Syllable, KaraokeError> {
            Ok(Syllable::new(
                line_start,
                end,
                karaoke_duration(syllable.tag)?,
                strip_markup(syllable.text),
            ))
        })
        .collect()
}
