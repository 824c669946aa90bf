//! Best-effort parser for `.cin`-style input-method mapping tables.
//!
//! A `.cin` table is a two-column text file associating a phonetic code with a
//! character, plus `#`/`%` comment and metadata lines. This crate parses such
//! a table into a character → code lookup and records how many distinct codes
//! the whole table defines, which is the denominator for phonetic-coverage
//! reports.
//!
//! Parsing is deliberately tolerant: malformed lines are skipped with a
//! warning instead of failing the load, because real-world tables mix
//! directives and oddities that a coverage tool has no business rejecting.
//!
//! # Example
//! ```rust
//! use cin_table::CinTable;
//!
//! # fn main() -> Result<(), cin_table::TableError> {
//! let table = CinTable::parse("ㄅㄚ 八\nㄅㄚ4 爸\n", &["4".to_string()])?;
//! assert_eq!(table.code_for('爸'), Some("ㄅㄚ"));
//! assert_eq!(table.distinct_code_count(), 1);
//! # Ok(()) }
//! ```

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read mapping table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("mapping table contains no usable entries")]
    NoEntries,
}

/// Parsed mapping table: character → phonetic code.
#[derive(Clone, Debug)]
pub struct CinTable {
    codes: HashMap<char, String>,
    distinct_code_count: usize,
}

impl CinTable {
    /// Read and parse a table file.
    ///
    /// `ignore_markers` are literal substrings (typically tone digits such as
    /// `3,4,6,7` for Zhuyin) stripped from each code before it is stored.
    pub fn load(path: impl AsRef<Path>, ignore_markers: &[String]) -> Result<Self, TableError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, ignore_markers)
    }

    /// Parse table text.
    ///
    /// Rules, per line:
    /// - empty lines and lines starting with `#` or `%` are skipped;
    /// - the rest must split on whitespace into exactly two fields,
    ///   `code character`, where the second field is a single character.
    ///   Anything else is logged and skipped;
    /// - with ignore markers present, the first matching marker occurrence is
    ///   removed from the code (one substitution pass per code);
    /// - a later line for the same character overwrites the earlier one, but
    ///   every parsed line's code still counts toward the distinct-code total.
    pub fn parse(text: &str, ignore_markers: &[String]) -> Result<Self, TableError> {
        let ignore = build_ignore_regex(ignore_markers);

        let mut codes: HashMap<char, String> = HashMap::new();
        let mut all_codes: HashSet<String> = HashSet::new();
        for (lineno, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('%') {
                continue;
            }

            let mut fields = line.split_whitespace();
            let (Some(code), Some(character)) = (fields.next(), fields.next()) else {
                warn!("table line {}: expected two fields, skipping", lineno + 1);
                continue;
            };
            if fields.next().is_some() {
                warn!("table line {}: trailing fields, skipping", lineno + 1);
                continue;
            }
            let mut chars = character.chars();
            let (Some(key), None) = (chars.next(), chars.next()) else {
                warn!(
                    "table line {}: second field is not a single character, skipping",
                    lineno + 1
                );
                continue;
            };

            let code = match &ignore {
                Some(re) => re.replace(code, "").into_owned(),
                None => code.to_string(),
            };
            all_codes.insert(code.clone());
            codes.insert(key, code);
        }

        if codes.is_empty() {
            return Err(TableError::NoEntries);
        }
        Ok(Self {
            codes,
            distinct_code_count: all_codes.len(),
        })
    }

    /// Phonetic code for a character, if the table maps it.
    pub fn code_for(&self, character: char) -> Option<&str> {
        self.codes.get(&character).map(String::as_str)
    }

    /// Number of character entries.
    pub fn entry_count(&self) -> usize {
        self.codes.len()
    }

    /// Number of distinct (post-filtering) codes across the entire table.
    ///
    /// Table-wide statistic, independent of any query text: codes from lines
    /// whose character was later overwritten are still counted.
    pub fn distinct_code_count(&self) -> usize {
        self.distinct_code_count
    }
}

/// One alternation regex over all markers, each escaped to match literally.
fn build_ignore_regex(markers: &[String]) -> Option<Regex> {
    if markers.is_empty() {
        return None;
    }
    let pattern = markers
        .iter()
        .map(|m| regex::escape(m))
        .collect::<Vec<_>>()
        .join("|");
    // Escaped literals always form a valid pattern.
    Some(Regex::new(&pattern).expect("escaped ignore pattern"))
}
