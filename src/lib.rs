//! gitsh Library
//!
//! This library provides the core functionality of gitsh, an interactive
//! shell for git. The completion engine in [`repl::completion`] can be used
//! on its own with any line editor.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `directives`: Internal `:`-prefixed shell commands
//! - `environment`: Shell variables and repository state
//! - `error`: Error types and handling
//! - `git`: Running the git executable
//! - `parser`: Splitting input lines into commands
//! - `repl`: Interactive REPL engine and tab completion
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use gitsh::{config::Config, directives::InternalCommands, environment::GitEnvironment};
//! use gitsh::git::GitRunner;
//! use gitsh::repl::CompletionEngine;
//!
//! let config = Config::default();
//! let env = Arc::new(GitEnvironment::new(GitRunner::new(&config.git.executable)));
//! let directives = Arc::new(InternalCommands::new(config.completion.directive_marker));
//! let engine = CompletionEngine::new(env, directives, config.completion);
//!
//! let candidates = engine.complete("checkout ", "ma").unwrap();
//! println!("{:?}", candidates);
//! ```

pub mod cli;
pub mod config;
pub mod directives;
pub mod environment;
pub mod error;
pub mod git;
pub mod parser;
pub mod repl;

// Re-export commonly used types
pub use config::Config;
pub use error::{GitshError, Result};
pub use parser::{Command, Parser};
pub use repl::{CompletionEngine, ReplEngine};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}
