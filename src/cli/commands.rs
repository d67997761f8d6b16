//! Command implementations for the concordance CLI.

use std::time::Instant;

use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::engine::QueryEngine;
use crate::error::Result;

/// Execute a CLI command.
pub fn execute_command(args: ConcordanceArgs) -> Result<()> {
    let config = args.engine_config()?;

    let start_time = Instant::now();
    let engine = QueryEngine::open(&config)?;
    info!(
        "indexed {} in {} ms",
        config.document.display(),
        start_time.elapsed().as_millis()
    );

    run_command(&engine, &args)
}

/// Run a command against an already built engine.
pub fn run_command(engine: &QueryEngine, args: &ConcordanceArgs) -> Result<()> {
    match &args.command {
        Command::Count(count_args) => output_result(&count_word(engine, count_args), args),
        Command::Phrase(phrase_args) => output_result(&find_phrase(engine, phrase_args)?, args),
        Command::Prefix(prefix_args) => output_result(&find_prefix(engine, prefix_args)?, args),
        Command::Lines(lines_args) => output_result(&search_lines(engine, lines_args)?, args),
        Command::Sections(section_args) => {
            output_result(&search_sections(engine, section_args)?, args)
        }
        Command::Stats => output_result(&show_stats(engine), args),
    }
}

/// Count a word.
pub fn count_word(engine: &QueryEngine, args: &CountArgs) -> CountResult {
    CountResult {
        word: args.word.trim().to_lowercase(),
        count: engine.word_count(&args.word),
    }
}

/// Look up a phrase.
pub fn find_phrase(engine: &QueryEngine, args: &PhraseArgs) -> Result<OccurrenceResult> {
    let phrase = args.phrase.join(" ");
    let occurrences = engine.phrase_occurrence(&phrase)?;
    Ok(OccurrenceResult {
        query: phrase,
        total: occurrences.len(),
        occurrences,
    })
}

/// Expand a prefix.
pub fn find_prefix(engine: &QueryEngine, args: &PrefixArgs) -> Result<OccurrenceResult> {
    let occurrences = engine.prefix_occurrence(&args.prefix)?;
    Ok(OccurrenceResult {
        query: args.prefix.clone(),
        total: occurrences.len(),
        occurrences,
    })
}

/// Run a line query.
pub fn search_lines(engine: &QueryEngine, args: &LinesArgs) -> Result<LinesResult> {
    let lines = match args.mode {
        LineMode::And => engine.words_on_line(&args.words)?,
        LineMode::Or => engine.some_words_on_line(&args.words)?,
        LineMode::Not => engine.words_not_on_line(&args.words, &args.exclude)?,
    };

    Ok(LinesResult {
        mode: args.mode,
        words: args.words.clone(),
        exclude: args.exclude.clone(),
        lines,
    })
}

/// Run a section query.
pub fn search_sections(engine: &QueryEngine, args: &SectionsArgs) -> Result<SectionsResult> {
    let titles = &args.titles;
    let hits = match args.mode {
        SectionMode::And => engine.simple_and_search(titles, &args.words)?,
        SectionMode::Or => engine.simple_or_search(titles, &args.words)?,
        SectionMode::Not => engine.simple_not_search(titles, &args.words, &args.exclude)?,
        SectionMode::AndOr => {
            engine.compound_and_or_search(titles, &args.words, &args.or_words)?
        }
    };

    Ok(SectionsResult {
        mode: args.mode,
        titles: args.titles.clone(),
        words: args.words.clone(),
        exclude: args.exclude.clone(),
        or_words: args.or_words.clone(),
        hits,
    })
}

/// Collect index statistics.
pub fn show_stats(engine: &QueryEngine) -> IndexStats {
    let index = engine.index();
    let trie = index.trie();

    IndexStats {
        lines: index.lines().len(),
        distinct_words: trie.word_count(),
        occurrences: trie.posting_count(),
        trie_nodes: trie.node_count(),
        stop_words: engine.stop_words().len(),
        sections: index
            .sections()
            .iter()
            .map(|section| SectionStats {
                title: section.title.clone(),
                start_line: section.start_line,
            })
            .collect(),
    }
}
