//! Intelligent completion system for gitsh
//!
//! This module provides context-aware completion for the shell line:
//! - Git command and alias names at the start of a line
//! - Internal `:` directive names
//! - Branch, tag and remote references for commands that take them
//! - Filesystem paths for everything else
//!
//! Architecture:
//! 1. Registry: fresh snapshot of known names from the collaborators
//! 2. Context: classify the line before the cursor
//! 3. Generators: one candidate strategy per context
//! 4. Assembler: deduplicate and sort
//! 5. Engine: orchestrate the above

pub mod assembler;
pub mod context;
pub mod engine;
pub mod generators;
pub mod path;
pub mod registry;
pub mod tokenizer;

pub use context::{CompletionContext, LineState, classify};
pub use engine::CompletionEngine;
pub use path::PathQuery;
pub use registry::{
    ArgumentKind, CommandRegistry, DirectiveProvider, ProcessDirectories, VcsStateProvider,
    WorkingDirectory,
};
pub use tokenizer::{ReferenceToken, tokenize};
