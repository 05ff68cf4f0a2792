/*!
 * Karaoke timing extraction for ASS subtitle documents.
 *
 * The pipeline runs per event, leaves first:
 * - `events`: locates the `[Events]` section and selects eligible records
 * - `tokenizer`: splits dialogue text into (karaoke tag, text) pairs
 * - `expander`: turns pairs into timed syllables, absorbing leading silence
 * - `folding`: merges blank syllables into their neighbours
 * - `parity`: checks summed durations against the line's own span
 *
 * Everything here is pure text-in, data-out; see `corpus` for the
 * per-document driver.
 */

pub mod model;
pub mod timestamp;
pub mod events;
pub mod tokenizer;
pub mod expander;
pub mod folding;
pub mod parity;

// Re-export main types
pub use model::{Centiseconds, EventRecord, Line, RawSyllable, Syllable};
pub use events::{EventsSection, select_events};
pub use tokenizer::{TagTokenizer, tokenize};
pub use expander::expand_event;
pub use folding::fold_blank_syllables;
pub use parity::ParityValidator;
