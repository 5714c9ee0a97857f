//! Tolerant parsing primitives for RouterOS `/export` scripts.
//!
//! Nothing in this crate knows about WireGuard: it joins continued lines,
//! finds the `add` entries of one section path and turns each entry into a
//! [`Record`] of lower-cased keys.

pub mod lines;
pub mod record;
pub mod section;
pub mod tokenizer;

pub use lines::{join_continuations, logical_lines, split_lines, LogicalLine};
pub use record::Record;
pub use section::{read_export, scan_section, Entry, ExportError, SectionFilter};
pub use tokenizer::{combine_fields, is_key_token, parse_record, split_fields, trim_quotes};
