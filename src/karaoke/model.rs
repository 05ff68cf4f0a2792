use serde::{Deserialize, Serialize};

// @module: Data types shared by the karaoke pipeline stages

/// Centiseconds, the unit every karaoke duration and line bound is kept in
pub type Centiseconds = i64;

/// One eligible event, reduced to its timestamps and dialogue payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    // @field: Raw start timestamp (H:MM:SS.ff)
    pub start: String,

    // @field: Raw end timestamp (H:MM:SS.ff)
    pub end: String,

    // @field: Dialogue text, commas included
    pub text: String,
}

impl EventRecord {
    pub fn new(start: impl Into<String>, end: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            text: text.into(),
        }
    }
}

/// A karaoke tag together with the text that runs until the next karaoke tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSyllable<'a> {
    /// The full `{...}` tag, braces included
    pub tag: &'a str,
    /// Following text, which may still contain non-karaoke markup
    pub text: &'a str,
}

/// A timed syllable carrying its line's absolute bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Syllable {
    pub line_start: Centiseconds,
    pub line_end: Centiseconds,
    pub duration: Centiseconds,
    pub text: String,
}

impl Syllable {
    pub fn new(line_start: Centiseconds, line_end: Centiseconds, duration: Centiseconds, text: impl Into<String>) -> Self {
        Self {
            line_start,
            line_end,
            duration,
            text: text.into(),
        }
    }

    /// A syllable with no audible content
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

/// One line's timing envelope with index-aligned syllable durations and texts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub start: Centiseconds,
    pub end: Centiseconds,
    pub durations: Vec<Centiseconds>,
    pub texts: Vec<String>,
}

impl Line {
    /// Group a line's folded syllables back into a single record.
    ///
    /// Returns `None` for an empty syllable sequence, since such a line has
    /// no timing to report.
    pub fn from_syllables(syllables: &[Syllable]) -> Option<Self> {
        let first = syllables.first()?;
        Some(Self {
            start: first.line_start,
            end: first.line_end,
            durations: syllables.iter().map(|s| s.duration).collect(),
            texts: syllables.iter().map(|s| s.text.clone()).collect(),
        })
    }

    /// The line's full text, syllables joined without separators
    pub fn text(&self) -> String {
        self.texts.concat()
    }

    /// Sum of the syllable durations, or `None` if it overflows
    pub fn total_duration(&self) -> Option<Centiseconds> {
        self.durations
            .iter()
            .try_fold(0 as Centiseconds, |total, duration| total.checked_add(*duration))
    }
}
