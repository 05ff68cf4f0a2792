/*!
 * # karatime - karaoke timing corpora from ASS subtitles
 *
 * A Rust library that reconstructs per-syllable timing from the inline
 * karaoke tags of ASS subtitle documents and checks it for consistency
 * before it is used as alignment training data.
 *
 * ## Features
 *
 * - Effect-based event selection with an untagged fallback
 * - Lazy karaoke tag tokenization (`\k`, `\K`, `\kf`, `\fk`)
 * - Leading-silence absorption and blank-syllable folding
 * - Duration parity validation with a configurable tolerance
 * - All-or-nothing document acceptance into four aligned corpora
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `karaoke`: the pure per-event pipeline:
 *   - `karaoke::events`: `[Events]` section lookup and event selection
 *   - `karaoke::tokenizer`: tag/text tokenization
 *   - `karaoke::expander`: syllable expansion and leading-delay absorption
 *   - `karaoke::folding`: blank-syllable folding
 *   - `karaoke::parity`: duration parity validation
 * - `corpus`: per-document driver and corpus builder
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `app_controller`: Folder runs, concurrency and output
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod karaoke;
pub mod corpus;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::{Config, KaraokeConfig};
pub use corpus::{Corpus, CorpusBuilder, DocumentResult, DocumentTimings, build_corpus, process_document};
pub use karaoke::{Line, Syllable};
pub use errors::{AppError, KaraokeError, ParityIssue};
