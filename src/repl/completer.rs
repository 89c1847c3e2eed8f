//! Completer for reedline - provides completion suggestions

use std::sync::Arc;

use reedline::{Completer, Span, Suggestion};
use tracing::warn;

use super::completion::CompletionEngine;

/// gitsh completer for reedline
pub struct GitshCompleter {
    /// Completion engine for context-aware suggestions
    completion_engine: Arc<CompletionEngine>,
}

impl GitshCompleter {
    /// Create a new completer
    ///
    /// # Arguments
    /// * `completion_engine` - Engine producing the candidates
    pub fn new(completion_engine: Arc<CompletionEngine>) -> Self {
        Self { completion_engine }
    }
}

impl Completer for GitshCompleter {
    /// Complete the input at the given cursor position
    ///
    /// Candidates already carry their trailing space or separator, so
    /// reedline is told not to append whitespace. A failing collaborator
    /// produces no suggestions rather than an error.
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let (span, candidates) = match self.completion_engine.complete_line(line, pos) {
            Ok(result) => result,
            Err(e) => {
                warn!("Completion failed: {}", e);
                return Vec::new();
            }
        };

        candidates
            .into_iter()
            .map(|value| Suggestion {
                value,
                span: Span::new(span.start, span.end),
                append_whitespace: false,
                ..Suggestion::default()
            })
            .collect()
    }
}
