//! Command line argument parsing for the concordance CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{ConcordanceError, Result};

/// Concordance - word, phrase and boolean lookups over a single document
#[derive(Parser, Debug, Clone)]
#[command(name = "concordance")]
#[command(about = "Word, phrase, prefix and boolean lookups over a single document")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ConcordanceArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// JSON configuration file naming the input files
    #[arg(short, long, env = "CONCORDANCE_CONFIG", value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Document to index (overrides the configuration file)
    #[arg(short, long, value_name = "DOCUMENT")]
    pub document: Option<PathBuf>,

    /// Section index file with one `title,start_line` entry per line
    #[arg(short = 'i', long = "index", value_name = "INDEX_FILE")]
    pub section_index: Option<PathBuf>,

    /// Stop-word file with one word per line
    #[arg(short, long, value_name = "STOP_WORDS_FILE")]
    pub stop_words: Option<PathBuf>,

    /// Use the built-in English stop words when no stop-word file is given
    #[arg(long)]
    pub english_stop_words: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl ConcordanceArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Combine the configuration file, if any, with the path options given on
    /// the command line. Command line paths win.
    pub fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match (&self.config, &self.document) {
            (Some(path), _) => EngineConfig::from_file(path)?,
            (None, Some(document)) => EngineConfig::new(document),
            (None, None) => {
                return Err(ConcordanceError::invalid_argument(
                    "no document given: pass --document or --config",
                ));
            }
        };

        if let Some(document) = &self.document {
            config.document = document.clone();
        }
        if let Some(path) = &self.section_index {
            config.section_index = Some(path.clone());
        }
        if let Some(path) = &self.stop_words {
            config.stop_words = Some(path.clone());
        }
        if self.english_stop_words {
            config.english_stop_words = true;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Count the occurrences of a word
    Count(CountArgs),

    /// Find where a phrase occurs
    Phrase(PhraseArgs),

    /// Find every word starting with a prefix
    Prefix(PrefixArgs),

    /// Find lines by a boolean combination of words
    Lines(LinesArgs),

    /// Find word occurrences by a boolean combination scoped to sections
    Sections(SectionsArgs),

    /// Show index statistics
    Stats,
}

/// Arguments for counting a word
#[derive(Parser, Debug, Clone)]
pub struct CountArgs {
    /// Word to count
    #[arg(value_name = "WORD")]
    pub word: String,
}

/// Arguments for a phrase lookup
#[derive(Parser, Debug, Clone)]
pub struct PhraseArgs {
    /// Phrase to find; several arguments are joined with spaces
    #[arg(value_name = "PHRASE", required = true, num_args = 1..)]
    pub phrase: Vec<String>,
}

/// Arguments for a prefix lookup
#[derive(Parser, Debug, Clone)]
pub struct PrefixArgs {
    /// Prefix to expand
    #[arg(value_name = "PREFIX")]
    pub prefix: String,
}

/// Arguments for a line query
#[derive(Parser, Debug, Clone)]
pub struct LinesArgs {
    /// How the words are combined
    #[arg(value_name = "MODE")]
    pub mode: LineMode,

    /// Query words
    #[arg(value_name = "WORD", required = true, num_args = 1..)]
    pub words: Vec<String>,

    /// Words that must not appear on the line (`not` mode)
    #[arg(short = 'x', long = "exclude", value_name = "WORD")]
    pub exclude: Vec<String>,
}

/// Arguments for a section query
#[derive(Parser, Debug, Clone)]
pub struct SectionsArgs {
    /// How the words are combined
    #[arg(value_name = "MODE")]
    pub mode: SectionMode,

    /// Query words (the required words in `not` and `and-or` modes)
    #[arg(value_name = "WORD", required = true, num_args = 1..)]
    pub words: Vec<String>,

    /// Restrict the search to a section; may be repeated. Default: everywhere
    #[arg(short = 't', long = "title", value_name = "TITLE")]
    pub titles: Vec<String>,

    /// Words that must not appear in the section (`not` mode)
    #[arg(short = 'x', long = "exclude", value_name = "WORD")]
    pub exclude: Vec<String>,

    /// Alternatives of which at least one must appear (`and-or` mode)
    #[arg(short = 'o', long = "or-word", value_name = "WORD")]
    pub or_words: Vec<String>,
}

/// Line query modes
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineMode {
    /// Lines containing every word
    And,
    /// Lines containing any word
    Or,
    /// Lines containing every word and no excluded word
    Not,
}

/// Section query modes
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionMode {
    /// Sections containing every word
    And,
    /// Sections containing any word
    Or,
    /// Sections containing every word and no excluded word
    Not,
    /// Sections containing every word and at least one or-word
    AndOr,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_count_command() {
        let args =
            ConcordanceArgs::try_parse_from(["concordance", "-d", "doc.txt", "count", "Thee"])
                .unwrap();

        assert_eq!(args.document, Some(PathBuf::from("doc.txt")));
        if let Command::Count(count_args) = args.command {
            assert_eq!(count_args.word, "Thee");
        } else {
            panic!("Expected count command");
        }
    }

    #[test]
    fn test_phrase_command_joins_words() {
        let args = ConcordanceArgs::try_parse_from([
            "concordance",
            "-d",
            "doc.txt",
            "phrase",
            "to",
            "be",
        ])
        .unwrap();

        if let Command::Phrase(phrase_args) = args.command {
            assert_eq!(phrase_args.phrase, vec!["to", "be"]);
        } else {
            panic!("Expected phrase command");
        }
    }

    #[test]
    fn test_lines_not_command() {
        let args = ConcordanceArgs::try_parse_from([
            "concordance",
            "-d",
            "doc.txt",
            "lines",
            "not",
            "love",
            "-x",
            "war",
            "--exclude",
            "peace",
        ])
        .unwrap();

        if let Command::Lines(lines_args) = args.command {
            assert_eq!(lines_args.mode, LineMode::Not);
            assert_eq!(lines_args.words, vec!["love"]);
            assert_eq!(lines_args.exclude, vec!["war", "peace"]);
        } else {
            panic!("Expected lines command");
        }
    }

    #[test]
    fn test_sections_and_or_command() {
        let args = ConcordanceArgs::try_parse_from([
            "concordance",
            "-d",
            "doc.txt",
            "sections",
            "and-or",
            "king",
            "--title",
            "hamlet",
            "-t",
            "macbeth",
            "-o",
            "ghost",
            "-o",
            "witch",
        ])
        .unwrap();

        if let Command::Sections(section_args) = args.command {
            assert_eq!(section_args.mode, SectionMode::AndOr);
            assert_eq!(section_args.titles, vec!["hamlet", "macbeth"]);
            assert_eq!(section_args.or_words, vec!["ghost", "witch"]);
        } else {
            panic!("Expected sections command");
        }
    }

    #[test]
    fn test_lines_requires_words() {
        assert!(ConcordanceArgs::try_parse_from(["concordance", "lines", "and"]).is_err());
    }

    #[test]
    fn test_verbosity_levels() {
        let args = ConcordanceArgs::try_parse_from(["concordance", "stats"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = ConcordanceArgs::try_parse_from(["concordance", "-vv", "stats"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args = ConcordanceArgs::try_parse_from(["concordance", "-q", "-vvv", "stats"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args =
            ConcordanceArgs::try_parse_from(["concordance", "stats", "-f", "json", "--pretty"])
                .unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
        assert!(args.pretty);
    }

    #[test]
    fn test_engine_config_from_flags() {
        let args = ConcordanceArgs::try_parse_from([
            "concordance",
            "-d",
            "doc.txt",
            "-i",
            "doc.index",
            "--english-stop-words",
            "stats",
        ])
        .unwrap();

        let config = args.engine_config().unwrap();
        assert_eq!(config.document, PathBuf::from("doc.txt"));
        assert_eq!(config.section_index, Some(PathBuf::from("doc.index")));
        assert!(config.english_stop_words);
    }

    #[test]
    fn test_engine_config_requires_document() {
        let mut args = ConcordanceArgs::try_parse_from(["concordance", "stats"]).unwrap();
        args.config = None;
        assert!(args.engine_config().unwrap_err().is_invalid_argument());
    }
}
