//! Completion context definitions
//!
//! This module defines the line state handed to the engine and the context
//! types that decide which candidate generator runs.

use super::registry::{ArgumentKind, CommandRegistry};

/// Text before the word under the cursor, and the word itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineState<'a> {
    /// Text typed before the word under the cursor
    pub line_so_far: &'a str,
    /// The partial word under the cursor
    pub partial_word: &'a str,
}

impl<'a> LineState<'a> {
    /// Split a line buffer at the cursor
    ///
    /// The word under the cursor begins after the last whitespace that is
    /// not escaped with a backslash.
    ///
    /// # Arguments
    /// * `buffer` - The whole input line
    /// * `cursor` - Cursor position (byte index)
    ///
    /// # Returns
    /// * `(usize, Self)` - Byte offset where the partial word starts, and the state
    pub fn from_buffer(buffer: &'a str, cursor: usize) -> (usize, Self) {
        let mut cursor = cursor.min(buffer.len());
        while !buffer.is_char_boundary(cursor) {
            cursor -= 1;
        }

        let before = &buffer[..cursor];
        let mut start = 0;
        let mut escaped = false;
        for (idx, c) in before.char_indices() {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c.is_whitespace() {
                start = idx + c.len_utf8();
            }
        }

        (
            start,
            Self {
                line_so_far: &before[..start],
                partial_word: &before[start..],
            },
        )
    }
}

/// Represents the type of completion needed based on the current context
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionContext {
    /// Complete a git command or alias name
    CommandStart,

    /// Complete an internal directive name
    InternalDirectiveName,

    /// Complete a reference argument of a command
    ReferenceArgument {
        /// Command the argument belongs to
        command: String,
    },

    /// Complete a path argument of a command
    PathArgument {
        /// Command the argument belongs to
        command: String,
    },
}

impl CompletionContext {
    /// Route a command-start word that begins with the directive marker to
    /// directive completion
    pub fn refine(self, partial_word: &str, marker: char) -> Self {
        match self {
            Self::CommandStart if partial_word.starts_with(marker) => Self::InternalDirectiveName,
            other => other,
        }
    }

    /// Command whose argument is being completed, if any
    pub fn command(&self) -> Option<&str> {
        match self {
            Self::ReferenceArgument { command } | Self::PathArgument { command } => Some(command),
            Self::CommandStart | Self::InternalDirectiveName => None,
        }
    }
}

/// Decide what kind of word is being completed from the text before it
///
/// Empty input completes the command itself; a lone directive marker
/// completes a directive name; anything else completes an argument of the
/// first word, by reference when the registry says so and by path otherwise.
pub fn classify(line_so_far: &str, registry: &CommandRegistry, marker: char) -> CompletionContext {
    let mut tokens = line_so_far.split_whitespace();

    let Some(command) = tokens.next() else {
        return CompletionContext::CommandStart;
    };

    if command.chars().eq([marker]) && tokens.next().is_none() {
        return CompletionContext::InternalDirectiveName;
    }

    let command = command.to_string();
    match registry.argument_kind(&command) {
        ArgumentKind::Reference => CompletionContext::ReferenceArgument { command },
        ArgumentKind::Path => CompletionContext::PathArgument { command },
    }
}
