/*!
 * Event selection for ASS documents.
 *
 * Locates the `[Events]` section of a document and picks the event records
 * that carry karaoke timing. Records whose effect matches one of the
 * configured effect names win; when a document has none of those, the
 * untagged (empty effect) dialogue channel is used instead.
 */

use log::debug;

use crate::errors::KaraokeError;
use crate::karaoke::model::EventRecord;

/// Section marker that opens the event list
pub const EVENTS_SECTION_MARKER: &str = "[Events]";

/// Effect name used by karaoke-timed lines
pub const DEFAULT_KARAOKE_EFFECT: &str = "karaoke";

/// Zero-based index of the effect field in an event record
const EFFECT_FIELD: usize = 8;

/// Number of fields before the dialogue text
const TEXT_FIELD: usize = 9;

/// The raw event section of one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventsSection<'a> {
    /// The `Format:` line right after the marker
    pub header: &'a str,
    /// Every following line, blank ones included
    pub records: Vec<&'a str>,
}

impl<'a> EventsSection<'a> {
    /// Find the `[Events]` section in a full document
    pub fn locate(document: &'a str) -> Result<Self, KaraokeError> {
        let mut lines = document
            .lines()
            .skip_while(|line| line.trim() != EVENTS_SECTION_MARKER);

        if lines.next().is_none() {
            return Err(KaraokeError::MissingEventsSection);
        }

        let header = lines.next().unwrap_or_default();
        Ok(Self {
            header,
            records: lines.collect(),
        })
    }

    /// Select the eligible events of this section
    pub fn select(&self, effects: &[String]) -> Vec<EventRecord> {
        select_events(&self.records, effects)
    }
}

/// Read the effect field of a record, if the record has one
fn effect_of(record: &str) -> Option<&str> {
    record.split(',').nth(EFFECT_FIELD)
}

/// Reduce a record to its start/end timestamps and dialogue text.
///
/// The text is everything after the ninth comma, so commas inside the
/// dialogue survive.
fn reduce_record(record: &str) -> EventRecord {
    let fields: Vec<&str> = record.splitn(TEXT_FIELD + 1, ',').collect();
    EventRecord::new(
        fields.get(1).copied().unwrap_or_default(),
        fields.get(2).copied().unwrap_or_default(),
        fields.get(TEXT_FIELD).copied().unwrap_or_default(),
    )
}

/// Pick the records that carry karaoke timing, in document order.
///
/// Blank records are skipped and records without an effect field are never
/// eligible. An empty result is valid.
pub fn select_events<S: AsRef<str>>(records: &[S], effects: &[String]) -> Vec<EventRecord> {
    let candidates: Vec<(&str, &str)> = records
        .iter()
        .map(|r| r.as_ref())
        .filter(|r| !r.trim().is_empty())
        .filter_map(|r| match effect_of(r) {
            Some(effect) => Some((r, effect)),
            None => {
                debug!("Skipping event record without an effect field: {}", r);
                None
            }
        })
        .collect();

    let tagged: Vec<&str> = candidates
        .iter()
        .filter(|(_, effect)| effects.iter().any(|e| e == effect))
        .map(|(r, _)| *r)
        .collect();

    let selected: Vec<&str> = if tagged.is_empty() {
        debug!("No events tagged with {:?}, falling back to untagged events", effects);
        candidates
            .iter()
            .filter(|(_, effect)| effect.is_empty())
            .map(|(r, _)| *r)
            .collect()
    } else {
        tagged
    };

    selected.into_iter().map(reduce_record).collect()
}
