//! Candidate generators
//!
//! One generator per completion context. Generators do not sort; ordering is
//! the assembler's job.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::io;

use super::path::PathQuery;
use super::registry::{CommandRegistry, WorkingDirectory};
use super::tokenizer::tokenize;
use crate::error::Result;

/// Complete git command and alias names
pub fn command_names(partial_word: &str, registry: &CommandRegistry) -> Vec<String> {
    registry
        .command_names
        .iter()
        .chain(registry.command_aliases.iter())
        .filter(|name| name.starts_with(partial_word))
        .map(|name| format!("{name} "))
        .collect()
}

/// Complete internal directive names
///
/// A word that carries the marker is matched against the full directive
/// text. A word without it (the marker was typed as a separate word) is
/// matched against the names with the marker stripped.
pub fn directive_names(partial_word: &str, registry: &CommandRegistry, marker: char) -> Vec<String> {
    if partial_word.starts_with(marker) {
        return registry
            .internal_directives
            .iter()
            .filter(|name| name.starts_with(partial_word))
            .map(|name| format!("{name} "))
            .collect();
    }

    registry
        .internal_directives
        .iter()
        .filter_map(|name| name.strip_prefix(marker))
        .filter(|name| name.starts_with(partial_word))
        .map(|name| format!("{name} "))
        .collect()
}

/// Complete reference names, keeping everything up to the last delimiter
pub fn references(
    partial_word: &str,
    known_references: &BTreeSet<String>,
    delimiters: &[char],
) -> Vec<String> {
    let token = tokenize(partial_word, delimiters);

    known_references
        .iter()
        .filter(|name| name.starts_with(token.match_segment))
        .map(|name| format!("{}{name} ", token.literal_prefix))
        .collect()
}

/// Complete filesystem paths
///
/// A directory that is missing or is not a directory yields no candidates.
/// Any other I/O failure is returned to the caller.
pub fn paths(
    partial_word: &str,
    dirs: &dyn WorkingDirectory,
    escape_chars: &[char],
) -> Result<Vec<String>> {
    let Some(query) = PathQuery::parse(partial_word, dirs)? else {
        return Ok(Vec::new());
    };

    let entries = match fs::read_dir(&query.resolved_directory) {
        Ok(entries) => entries,
        Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    // `is_dir` follows symlinks, so a link to a directory completes like one
    let listing = entries.map(|entry| entry.map(|e| (e.file_name(), e.path().is_dir())));
    matching_entries(&query, listing, escape_chars)
}

/// Turn directory entries `(file name, is directory)` into candidates
///
/// Hidden entries are kept only when the typed basename starts with `.`;
/// names that are not UTF-8 are skipped. The first failing entry aborts the
/// listing.
fn matching_entries<I>(
    query: &PathQuery<'_>,
    entries: I,
    escape_chars: &[char],
) -> Result<Vec<String>>
where
    I: IntoIterator<Item = io::Result<(OsString, bool)>>,
{
    let show_hidden = query.search_basename.starts_with('.');
    let mut candidates = Vec::new();

    for entry in entries {
        let (file_name, is_dir) = entry?;
        let Some(name) = file_name.to_str() else {
            continue;
        };

        if !name.starts_with(query.search_basename.as_str()) {
            continue;
        }
        if name.starts_with('.') && !show_hidden {
            continue;
        }

        candidates.push(query.candidate(name, is_dir, escape_chars));
    }

    Ok(candidates)
}
