/*!
 * Line aggregation and corpus building.
 *
 * Runs the karaoke pipeline over whole documents. A document either passes
 * in full or is discarded in full: any malformed tag, unresolvable delay or
 * parity violation on one of its lines drops every line of it and records
 * its name in the discard list. Accepted documents contribute one entry to
 * each of four index-aligned corpora.
 */

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::app_config::KaraokeConfig;
use crate::errors::KaraokeError;
use crate::karaoke::events::EventsSection;
use crate::karaoke::expander::expand_event;
use crate::karaoke::folding::fold_blank_syllables;
use crate::karaoke::model::{Line, Syllable};
use crate::karaoke::parity::ParityValidator;

/// Timing data extracted from one accepted document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTimings {
    /// Every folded syllable of the document, in order
    pub syllables: Vec<Syllable>,
    /// One record per timed line
    pub lines: Vec<Line>,
}

impl DocumentTimings {
    pub fn syllable_texts(&self) -> Vec<String> {
        self.syllables.iter().map(|s| s.text.clone()).collect()
    }

    pub fn line_texts(&self) -> Vec<String> {
        self.lines.iter().map(Line::text).collect()
    }
}

/// Outcome of running the pipeline over one document
pub type DocumentResult = Result<DocumentTimings, KaraokeError>;

/// Run the full pipeline over one document's text
pub fn process_document(text: &str, settings: &KaraokeConfig) -> DocumentResult {
    let section = EventsSection::locate(text)?;
    let events = section.select(&settings.effects);
    debug!("Selected {} of {} event records", events.len(), section.records.len());

    let validator = ParityValidator::with_tolerance(settings.tolerance_cs);
    let mut timings = DocumentTimings::default();

    for event in &events {
        let folded = fold_blank_syllables(expand_event(event)?)?;
        let Some(line) = Line::from_syllables(&folded) else {
            continue;
        };
        validator.validate_line(&line)?;
        timings.syllables.extend(folded);
        timings.lines.push(line);
    }

    Ok(timings)
}

/// The four aligned corpora plus the names of discarded documents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    /// Names of accepted documents, aligned with the four corpora
    pub documents: Vec<String>,
    pub syllable_texts: Vec<Vec<String>>,
    pub syllable_records: Vec<Vec<Syllable>>,
    pub line_texts: Vec<Vec<String>>,
    pub line_records: Vec<Vec<Line>>,
    /// Names of documents that failed, in processing order
    pub discarded: Vec<String>,
}

impl Corpus {
    /// Number of accepted documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn syllable_count(&self) -> usize {
        self.syllable_records.iter().map(Vec::len).sum()
    }

    pub fn line_count(&self) -> usize {
        self.line_records.iter().map(Vec::len).sum()
    }
}

/// Incrementally builds a [`Corpus`], one document at a time
#[derive(Debug, Clone)]
pub struct CorpusBuilder {
    settings: KaraokeConfig,
    corpus: Corpus,
}

impl CorpusBuilder {
    pub fn new(settings: KaraokeConfig) -> Self {
        Self {
            settings,
            corpus: Corpus::default(),
        }
    }

    /// Run the pipeline over a document and record the outcome.
    ///
    /// Returns whether the document was accepted.
    pub fn add_document(&mut self, name: impl Into<String>, text: &str) -> bool {
        let result = process_document(text, &self.settings);
        self.record(name, result)
    }

    /// Record an outcome that was computed elsewhere, e.g. on another thread
    pub fn record(&mut self, name: impl Into<String>, result: DocumentResult) -> bool {
        let name = name.into();
        match result {
            Ok(timings) => {
                debug!(
                    "Accepted {}: {} lines, {} syllables",
                    name,
                    timings.lines.len(),
                    timings.syllables.len()
                );
                self.corpus.syllable_texts.push(timings.syllable_texts());
                self.corpus.line_texts.push(timings.line_texts());
                self.corpus.syllable_records.push(timings.syllables);
                self.corpus.line_records.push(timings.lines);
                self.corpus.documents.push(name);
                true
            }
            Err(e) => {
                self.discard(name, e);
                false
            }
        }
    }

    /// Record a document as discarded without contributing to any corpus
    pub fn discard(&mut self, name: impl Into<String>, reason: impl std::fmt::Display) {
        let name = name.into();
        warn!("Discarding {}: {}", name, reason);
        self.corpus.discarded.push(name);
    }

    pub fn accepted_count(&self) -> usize {
        self.corpus.documents.len()
    }

    pub fn discarded_count(&self) -> usize {
        self.corpus.discarded.len()
    }

    pub fn finish(self) -> Corpus {
        self.corpus
    }
}

/// Build a corpus from (name, text) pairs, in order, on the current thread
pub fn build_corpus<I, N, T>(documents: I, settings: &KaraokeConfig) -> Corpus
where
    I: IntoIterator<Item = (N, T)>,
    N: Into<String>,
    T: AsRef<str>,
{
    let mut builder = CorpusBuilder::new(settings.clone());
    for (name, text) in documents {
        builder.add_document(name, text.as_ref());
    }
    builder.finish()
}
