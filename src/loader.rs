//! Readers for the three input files: the document, its section index and a
//! stop-word list.
//!
//! Each file has a `load_*` function taking a path and a `read_*`/`parse_*`
//! function taking any [`BufRead`], which is what the tests use.
//!
//! # Examples
//!
//! ```
//! use concordance::loader::{parse_sections, read_document};
//!
//! let lines = read_document("\u{feff}The Sonnets\nFrom fairest creatures".as_bytes()).unwrap();
//! assert_eq!(lines, vec!["the sonnets", "from fairest creatures"]);
//!
//! let sections = parse_sections("the sonnets,1\nall's well, that ends well,9\n".as_bytes()).unwrap();
//! assert_eq!(sections.resolve("All's Well, That Ends Well").unwrap().start_line, 9);
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::analysis::stop::StopWords;
use crate::error::{ConcordanceError, Result};
use crate::index::section::SectionTable;

const BYTE_ORDER_MARK: char = '\u{feff}';

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path).map(BufReader::new).map_err(|e| {
        ConcordanceError::Io(io::Error::new(
            e.kind(),
            format!("{}: {e}", path.display()),
        ))
    })
}

/// Read a document file: one entry per line, lowercased.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let lines = read_document(open(path)?)?;
    debug!("read {} lines from {}", lines.len(), path.display());
    Ok(lines)
}

/// Read document lines from `reader`, dropping a leading byte-order mark and
/// lowercasing every line.
pub fn read_document<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = if lines.is_empty() {
            line.strip_prefix(BYTE_ORDER_MARK).unwrap_or(&line)
        } else {
            &line
        };
        lines.push(line.to_lowercase());
    }
    Ok(lines)
}

/// Read a section index file.
pub fn load_sections<P: AsRef<Path>>(path: P) -> Result<SectionTable> {
    let path = path.as_ref();
    let sections = parse_sections(open(path)?)?;
    debug!("read {} sections from {}", sections.len(), path.display());
    Ok(sections)
}

/// Parse `title,start_line` entries, one per line.
///
/// Each line is split on its last comma so titles may contain commas. Blank
/// lines are skipped.
pub fn parse_sections<R: BufRead>(reader: R) -> Result<SectionTable> {
    let mut entries = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        let line = line.trim_start_matches(BYTE_ORDER_MARK).trim();
        if line.is_empty() {
            continue;
        }

        let Some((title, start)) = line.rsplit_once(',') else {
            return Err(ConcordanceError::parse(format!(
                "line {number}: expected 'title,start_line', got '{line}'"
            )));
        };
        let start: u32 = start.trim().parse().map_err(|_| {
            ConcordanceError::parse(format!(
                "line {number}: '{}' is not a line number",
                start.trim()
            ))
        })?;

        entries.push((title.to_string(), start));
    }

    SectionTable::new(entries)
}

/// Read a stop-word file.
pub fn load_stop_words<P: AsRef<Path>>(path: P) -> Result<StopWords> {
    let path = path.as_ref();
    let stop_words = read_stop_words(open(path)?)?;
    debug!("read {} stop words from {}", stop_words.len(), path.display());
    Ok(stop_words)
}

/// Read one stop word per line. Words are trimmed and lowercased; blank lines
/// are skipped.
pub fn read_stop_words<R: BufRead>(reader: R) -> Result<StopWords> {
    let words = reader
        .lines()
        .map(|line| line.map(|l| l.trim_start_matches(BYTE_ORDER_MARK).to_string()))
        .collect::<io::Result<Vec<String>>>()?;
    Ok(StopWords::from_words(words))
}
