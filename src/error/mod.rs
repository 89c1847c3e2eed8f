//! Error handling module for gitsh.
//!
//! All fallible operations in the crate return [`Result`], whose error type
//! [`GitshError`] wraps the more specific kinds below:
//! - [`ConfigError`] for configuration loading and validation
//! - [`GitError`] for failures running the git executable
//! - [`DirectiveError`] for misuse of internal `:` directives
//! - [`ParseError`] for malformed input lines
//!
//! # Example
//!
//! ```rust,no_run
//! use gitsh::error::{GitshError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(GitshError::Generic("nothing to do".to_string()))
//! }
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{ConfigError, DirectiveError, GitError, GitshError, ParseError, Result};
