use std::{fmt, io};

/// Crate-wide `Result` type using [`GitshError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, GitshError>;

/// Top-level error type for gitsh operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum GitshError {
    /// Configuration errors.
    Config(ConfigError),

    /// Errors raised while talking to git.
    Git(GitError),

    /// Internal directive errors.
    Directive(DirectiveError),

    /// Command line parsing errors.
    Parse(ParseError),

    /// I/O errors.
    Io(io::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file could not be parsed.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },

    /// Config could not be serialized.
    SerializeFailed(String),
}

/// Parsing-specific errors.
#[derive(Debug)]
pub enum ParseError {
    /// A quote was opened but never closed.
    UnterminatedQuote(char),
}

/// Git-specific errors.
#[derive(Debug)]
pub enum GitError {
    /// The git executable could not be started.
    SpawnFailed { program: String, source: io::Error },

    /// Git output was not valid UTF-8.
    InvalidOutput(String),
}

/// Internal directive errors.
#[derive(Debug)]
pub enum DirectiveError {
    /// Directive name is not known.
    Unknown(String),

    /// Directive was given the wrong arguments.
    Usage { directive: String, usage: String },

    /// Target directory for `:cd` is unusable.
    ChangeDirectory { path: String, source: io::Error },
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for GitshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitshError::Config(e) => write!(f, "Configuration error: {e}"),
            GitshError::Git(e) => write!(f, "{e}"),
            GitshError::Directive(e) => write!(f, "{e}"),
            GitshError::Parse(e) => write!(f, "{e}"),
            GitshError::Io(e) => write!(f, "I/O error: {e}"),
            GitshError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
            ConfigError::SerializeFailed(msg) => write!(f, "Failed to serialize config: {msg}"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnterminatedQuote(q) => write!(f, "Syntax error: unterminated {q} quote"),
        }
    }
}

impl fmt::Display for GitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitError::SpawnFailed { program, source } => {
                write!(f, "Failed to run '{program}': {source}")
            }
            GitError::InvalidOutput(msg) => write!(f, "Unreadable git output: {msg}"),
        }
    }
}

impl fmt::Display for DirectiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectiveError::Unknown(name) => write!(f, "gitsh: {name}: command not found"),
            DirectiveError::Usage { directive, usage } => {
                write!(f, "usage: {directive} {usage}")
            }
            DirectiveError::ChangeDirectory { path, source } => {
                write!(f, "gitsh: {path}: {source}")
            }
        }
    }
}

impl std::error::Error for GitshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GitshError::Io(e) => Some(e),
            _ => None,
        }
    }
}
impl std::error::Error for ConfigError {}
impl std::error::Error for ParseError {}
impl std::error::Error for GitError {}
impl std::error::Error for DirectiveError {}

/* ========================= Conversions to GitshError ========================= */

impl From<io::Error> for GitshError {
    fn from(err: io::Error) -> Self {
        GitshError::Io(err)
    }
}

impl From<ConfigError> for GitshError {
    fn from(err: ConfigError) -> Self {
        GitshError::Config(err)
    }
}

impl From<GitError> for GitshError {
    fn from(err: GitError) -> Self {
        GitshError::Git(err)
    }
}

impl From<DirectiveError> for GitshError {
    fn from(err: DirectiveError) -> Self {
        GitshError::Directive(err)
    }
}

impl From<ParseError> for GitshError {
    fn from(err: ParseError) -> Self {
        GitshError::Parse(err)
    }
}

impl From<toml::de::Error> for GitshError {
    fn from(err: toml::de::Error) -> Self {
        GitshError::Config(ConfigError::InvalidFormat(err.to_string()))
    }
}

impl From<toml::ser::Error> for GitshError {
    fn from(err: toml::ser::Error) -> Self {
        GitshError::Config(ConfigError::SerializeFailed(err.to_string()))
    }
}

impl From<String> for GitshError {
    fn from(msg: String) -> Self {
        GitshError::Generic(msg)
    }
}

impl From<&str> for GitshError {
    fn from(msg: &str) -> Self {
        GitshError::Generic(msg.to_owned())
    }
}

impl From<reedline::ReedlineError> for GitshError {
    fn from(err: reedline::ReedlineError) -> Self {
        GitshError::Generic(format!("Line editor error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err: GitshError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err.to_string(), "I/O error: denied");
    }

    #[test]
    fn test_spawn_failure_names_program() {
        let err: GitshError = GitError::SpawnFailed {
            program: "/opt/git".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        }
        .into();
        assert_eq!(err.to_string(), "Failed to run '/opt/git': not found");
    }

    #[test]
    fn test_directive_usage_display() {
        let err = DirectiveError::Usage {
            directive: ":set".to_string(),
            usage: "NAME VALUE".to_string(),
        };
        assert_eq!(err.to_string(), "usage: :set NAME VALUE");
    }

    #[test]
    fn test_generic_from_str() {
        let err: GitshError = "boom".into();
        assert!(matches!(err, GitshError::Generic(ref m) if m == "boom"));
    }
}
