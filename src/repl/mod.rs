//! REPL (Read-Eval-Print Loop) for gitsh
//!
//! This module provides the interactive shell interface:
//! - Line editing and history with reedline
//! - Context-aware Tab completion (see [`completion`])
//! - A prompt showing the current directory and branch

pub mod completer;
pub mod completion;
pub mod engine;
pub mod prompt;

pub use completer::GitshCompleter;
pub use completion::CompletionEngine;
pub use engine::ReplEngine;
pub use prompt::GitshPrompt;
