/*!
 * Karaoke tag tokenizer.
 *
 * Splits one event's dialogue text into (karaoke tag, following text) pairs.
 * The grammar has two tokens: a brace-delimited override block that carries
 * a `\k`, `\K`, `\kf` or `\fk` code, and the run of text up to the next such
 * block. Override blocks without a karaoke code stay inside the text run and
 * are removed later by [`strip_markup`].
 */

use once_cell::sync::Lazy;
use regex::{Match, Matches, Regex};
use std::iter::Filter;

use crate::errors::KaraokeError;
use crate::karaoke::model::{Centiseconds, RawSyllable};

// @const: Override block starting with a backslash
static OVERRIDE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\\[^{}]*\}").unwrap());

// @const: Karaoke duration code inside an override block
static KARAOKE_CODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\(?:[kK][fF]?|[fF][kK])([+-]?\d+)").unwrap()
});

// @const: Any brace block, override or comment
static MARKUP_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[^{}]*\}").unwrap());

fn is_karaoke_tag(tag: &Match<'_>) -> bool {
    KARAOKE_CODE_REGEX.is_match(tag.as_str())
}

/// Lazy, single-pass sequence of [`RawSyllable`]s over one dialogue text.
///
/// Text before the first karaoke tag is dropped; it has no duration.
pub struct TagTokenizer<'a> {
    text: &'a str,
    tags: Filter<Matches<'static, 'a>, fn(&Match<'a>) -> bool>,
    current: Option<Match<'a>>,
}

impl<'a> TagTokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut tags = OVERRIDE_TAG_REGEX
            .find_iter(text)
            .filter(is_karaoke_tag as fn(&Match<'a>) -> bool);
        let current = tags.next();
        Self { text, tags, current }
    }
}

impl<'a> Iterator for TagTokenizer<'a> {
    type Item = RawSyllable<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.current.take()?;
        self.current = self.tags.next();
        let end = self.current.map_or(self.text.len(), |next| next.start());
        Some(RawSyllable {
            tag: tag.as_str(),
            text: &self.text[tag.end()..end],
        })
    }
}

/// Tokenize a dialogue text into raw syllables
pub fn tokenize(text: &str) -> TagTokenizer<'_> {
    TagTokenizer::new(text)
}

/// Read the signed duration carried by a tag's karaoke code.
///
/// Other override codes in the same block are ignored. A block with no
/// karaoke code, more than one, or an out-of-range value is malformed.
pub fn karaoke_duration(tag: &str) -> Result<Centiseconds, KaraokeError> {
    let malformed = |reason: &str| KaraokeError::TagMalformed {
        tag: tag.to_string(),
        reason: reason.to_string(),
    };

    let mut codes = KARAOKE_CODE_REGEX.captures_iter(tag);
    let caps = codes.next().ok_or_else(|| malformed("no karaoke duration code"))?;
    if codes.next().is_some() {
        return Err(malformed("more than one karaoke duration code"));
    }

    caps[1]
        .parse::<Centiseconds>()
        .map_err(|e| malformed(&format!("invalid duration {:?}: {}", &caps[1], e)))
}

/// Remove every brace block from a text run, leaving only what is displayed
pub fn strip_markup(text: &str) -> String {
    MARKUP_REGEX.replace_all(text, "").into_owned()
}
