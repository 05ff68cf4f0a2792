/*!
 * Common test utilities for the karatime test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

/// Script header shared by every generated document
pub const SCRIPT_HEADER: &str = "[Script Info]
Title: test
ScriptType: v4.00+

[V4+ Styles]
Format: Name, Fontname, Fontsize
Style: Default,Arial,20

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Builds one event record line
pub fn event(kind: &str, start: &str, end: &str, effect: &str, text: &str) -> String {
    format!("{}: 0,{},{},Default,,0,0,0,{},{}", kind, start, end, effect, text)
}

/// Builds an untagged dialogue event
pub fn dialogue(start: &str, end: &str, text: &str) -> String {
    event("Dialogue", start, end, "", text)
}

/// Builds a full ASS document around the given event records
pub fn ass_document(events: &[String]) -> String {
    let mut document = SCRIPT_HEADER.to_string();
    for event in events {
        document.push_str(event);
        document.push('\n');
    }
    document
}

/// A document that passes every check
pub fn valid_document() -> String {
    ass_document(&[
        dialogue("0:00:01.00", "0:00:02.00", "{\\k50}Hi{\\k50}!"),
        dialogue("0:00:03.00", "0:00:04.50", "{\\k20}{\\k60}ka{\\k40}ra{\\k10}{\\k20}o"),
    ])
}

/// A document whose second line fails the parity check
pub fn invalid_document() -> String {
    ass_document(&[
        dialogue("0:00:01.00", "0:00:02.00", "{\\k50}Hi{\\k50}!"),
        dialogue("0:00:03.00", "0:00:04.00", "{\\k50}too{\\k200}long"),
    ])
}
