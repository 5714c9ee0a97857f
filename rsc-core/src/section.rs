use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::trace;

use crate::lines::{logical_lines, LogicalLine};
use crate::record::Record;
use crate::tokenizer::parse_record;

/// Delimiter that starts every RouterOS section path.
pub const PATH_DELIMITER: char = '/';

/// Errors that can occur while reading an export file.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to read the export from disk.
    #[error("failed to read export {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Which section and entry keyword to collect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionFilter {
    /// Section path prefix, e.g. `/interface wireguard peers`.
    pub path: String,
    /// Keyword that introduces an entry, e.g. `add`.
    pub entry_keyword: String,
}

impl SectionFilter {
    pub fn new(path: impl Into<String>, entry_keyword: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            entry_keyword: entry_keyword.into(),
        }
    }
}

impl Default for SectionFilter {
    fn default() -> Self {
        Self::new("/interface wireguard peers", "add")
    }
}

/// One entry found inside the target section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Physical line number where the entry starts.
    pub line: usize,
    pub fields: Record,
}

/// Read an export file into memory.
pub fn read_export(path: &Path) -> Result<String, ExportError> {
    fs::read_to_string(path).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Collect every entry of the section selected by `filter`.
///
/// Lines outside the section, blank lines, comments and unrecognised
/// commands inside the section are skipped. This never fails: a malformed
/// entry simply produces a sparse [`Record`].
pub fn scan_section(text: &str, filter: &SectionFilter) -> Vec<Entry> {
    scan_lines(&logical_lines(text), filter)
}

fn scan_lines(lines: &[LogicalLine], filter: &SectionFilter) -> Vec<Entry> {
    let entry_prefix = format!("{} ", filter.entry_keyword);
    let mut active = false;
    let mut entries = Vec::new();

    for line in lines {
        let text = line.text.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        if text.starts_with(filter.path.as_str()) {
            active = true;
            continue;
        }
        if text.starts_with(PATH_DELIMITER) {
            active = false;
        }
        if !active {
            continue;
        }
        match text.strip_prefix(entry_prefix.as_str()) {
            Some(body) => entries.push(Entry {
                line: line.number,
                fields: parse_record(body),
            }),
            None => trace!(line = line.number, "ignoring non-entry line in section"),
        }
    }

    entries
}
