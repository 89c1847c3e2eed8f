//! Completion engine - orchestrates the completion flow
//!
//! This module provides the main completion engine that ties together all the
//! completion components: registry snapshot, context classification,
//! candidate generation and result assembly.

use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::Arc;

use tracing::debug;

use super::assembler::assemble;
use super::context::{CompletionContext, LineState, classify};
use super::generators;
use super::registry::{
    ArgumentKind, CommandRegistry, DirectiveProvider, ProcessDirectories, VcsStateProvider,
    WorkingDirectory,
};
use crate::config::CompletionConfig;
use crate::error::Result;

/// Main completion engine
pub struct CompletionEngine {
    /// Source of git command, alias and reference names
    vcs: Arc<dyn VcsStateProvider>,
    /// Source of internal directive names
    directives: Arc<dyn DirectiveProvider>,
    /// Source of the working and home directories
    dirs: Arc<dyn WorkingDirectory>,
    /// Completion settings
    settings: CompletionConfig,
    /// Command name to argument kind mapping
    argument_kinds: BTreeMap<String, ArgumentKind>,
}

impl CompletionEngine {
    /// Create a new completion engine
    ///
    /// Paths are resolved against the process working directory unless
    /// [`CompletionEngine::with_working_directory`] says otherwise.
    ///
    /// # Arguments
    /// * `vcs` - Git state provider
    /// * `directives` - Internal directive provider
    /// * `settings` - Completion configuration
    pub fn new(
        vcs: Arc<dyn VcsStateProvider>,
        directives: Arc<dyn DirectiveProvider>,
        settings: CompletionConfig,
    ) -> Self {
        let argument_kinds = settings.argument_kinds();
        Self {
            vcs,
            directives,
            dirs: Arc::new(ProcessDirectories),
            settings,
            argument_kinds,
        }
    }

    /// Use a different source for the working and home directories
    pub fn with_working_directory(mut self, dirs: Arc<dyn WorkingDirectory>) -> Self {
        self.dirs = dirs;
        self
    }

    /// Complete the partial word that follows `line_so_far`
    ///
    /// # Arguments
    /// * `line_so_far` - Text typed before the word under the cursor
    /// * `partial_word` - The word under the cursor
    ///
    /// # Returns
    /// * `Result<Vec<String>>` - Sorted, unique replacements for `partial_word`
    pub fn complete(&self, line_so_far: &str, partial_word: &str) -> Result<Vec<String>> {
        // 1. Fresh snapshot on every call
        let registry = CommandRegistry::snapshot(
            self.vcs.as_ref(),
            self.directives.as_ref(),
            &self.argument_kinds,
        )?;

        // 2. Decide what is being completed
        let marker = self.settings.directive_marker;
        let context = classify(line_so_far, &registry, marker).refine(partial_word, marker);
        debug!("Completing {:?} as {:?}", partial_word, context);

        // 3. Run the single generator for this context
        let candidates = match &context {
            CompletionContext::CommandStart => generators::command_names(partial_word, &registry),
            CompletionContext::InternalDirectiveName => {
                generators::directive_names(partial_word, &registry, marker)
            }
            CompletionContext::ReferenceArgument { .. } => generators::references(
                partial_word,
                &self.vcs.reference_names()?,
                &self.settings.reference_punctuation,
            ),
            CompletionContext::PathArgument { .. } => generators::paths(
                partial_word,
                self.dirs.as_ref(),
                &self.settings.escape_chars,
            )?,
        };

        // 4. Sort and deduplicate
        let result = assemble([candidates]);
        debug!("{} completion candidate(s)", result.len());
        Ok(result)
    }

    /// Complete the word under the cursor of a whole line buffer
    ///
    /// # Arguments
    /// * `line` - The input line
    /// * `pos` - Cursor position (byte index)
    ///
    /// # Returns
    /// * `Result<(Range<usize>, Vec<String>)>` - Byte range of the replaced
    ///   word, ending at the clamped cursor, and the candidates
    pub fn complete_line(&self, line: &str, pos: usize) -> Result<(Range<usize>, Vec<String>)> {
        let (start, state) = LineState::from_buffer(line, pos);
        let candidates = self.complete(state.line_so_far, state.partial_word)?;
        Ok((start..start + state.partial_word.len(), candidates))
    }
}
