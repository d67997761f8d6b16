//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::cli::args::{ConcordanceArgs, LineMode, OutputFormat, SectionMode};
use crate::error::Result;
use crate::index::posting::Posting;
use crate::query::WordHit;

/// Types that know how to print themselves for a person.
pub trait HumanOutput {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// Result structure for a word count.
#[derive(Debug, Serialize, Deserialize)]
pub struct CountResult {
    pub word: String,
    pub count: usize,
}

/// Result structure for phrase and prefix lookups.
#[derive(Debug, Serialize, Deserialize)]
pub struct OccurrenceResult {
    pub query: String,
    pub total: usize,
    pub occurrences: Vec<Posting>,
}

/// Result structure for line queries.
#[derive(Debug, Serialize, Deserialize)]
pub struct LinesResult {
    pub mode: LineMode,
    pub words: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub exclude: Vec<String>,
    pub lines: Vec<u32>,
}

/// Result structure for section queries.
#[derive(Debug, Serialize, Deserialize)]
pub struct SectionsResult {
    pub mode: SectionMode,
    pub titles: Vec<String>,
    pub words: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub exclude: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub or_words: Vec<String>,
    pub hits: Vec<WordHit>,
}

/// Index statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexStats {
    pub lines: usize,
    pub distinct_words: usize,
    pub occurrences: usize,
    pub trie_nodes: usize,
    pub stop_words: usize,
    pub sections: Vec<SectionStats>,
}

/// Per-section statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct SectionStats {
    pub title: String,
    pub start_line: u32,
}

impl HumanOutput for CountResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}: {}", self.word, self.count)
    }
}

impl HumanOutput for OccurrenceResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            "'{}': {} {}",
            self.query,
            self.total,
            plural(self.total, "occurrence")
        )?;
        for posting in &self.occurrences {
            writeln!(out, "  line {:>6}, column {:>3}", posting.line, posting.column)?;
        }
        Ok(())
    }
}

impl HumanOutput for LinesResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        write!(out, "{:?} {}", self.mode, self.words.join(" "))?;
        if !self.exclude.is_empty() {
            write!(out, " excluding {}", self.exclude.join(" "))?;
        }
        writeln!(
            out,
            ": {} {}",
            self.lines.len(),
            plural(self.lines.len(), "line")
        )?;
        if !self.lines.is_empty() {
            writeln!(out, "  {}", join_numbers(&self.lines))?;
        }
        Ok(())
    }
}

impl HumanOutput for SectionsResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        let scope = if self.titles.is_empty() {
            "all sections".to_string()
        } else {
            self.titles.join(", ")
        };
        writeln!(
            out,
            "{:?} {} in {}: {} {}",
            self.mode,
            self.words.join(" "),
            scope,
            self.hits.len(),
            plural(self.hits.len(), "hit")
        )?;
        for hit in &self.hits {
            writeln!(
                out,
                "  line {:>6}, column {:>3}  {}",
                hit.line, hit.column, hit.word
            )?;
        }
        Ok(())
    }
}

impl HumanOutput for IndexStats {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Index Statistics:")?;
        writeln!(out, "═════════════════")?;
        writeln!(out, "Lines:          {}", self.lines)?;
        writeln!(out, "Distinct words: {}", self.distinct_words)?;
        writeln!(out, "Occurrences:    {}", self.occurrences)?;
        writeln!(out, "Trie nodes:     {}", self.trie_nodes)?;
        writeln!(out, "Stop words:     {}", self.stop_words)?;
        writeln!(out, "Sections:       {}", self.sections.len())?;
        for section in &self.sections {
            writeln!(out, "  {:>6}  {}", section.start_line, section.title)?;
        }
        Ok(())
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(result: &T, args: &ConcordanceArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result(result, args.output_format, args.pretty, &mut out)
}

/// Write a result to `out` in `format`.
pub fn write_result<T>(
    result: &T,
    format: OutputFormat,
    pretty: bool,
    out: &mut dyn Write,
) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match format {
        OutputFormat::Human => result.write_human(out)?,
        OutputFormat::Json => output_json(result, pretty, out)?,
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, pretty: bool, out: &mut dyn Write) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    writeln!(out, "{json}")?;
    Ok(())
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}

fn join_numbers(numbers: &[u32]) -> String {
    numbers
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
