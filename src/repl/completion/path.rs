//! Path resolution for filesystem completion
//!
//! A typed path prefix is carried in two forms through the whole pipeline:
//! the display prefix, reproduced byte for byte in candidates, and the
//! resolved directory, used only to list entries. The resolved form never
//! reaches the output.

use std::path::{Component, Path, PathBuf};

use super::registry::WorkingDirectory;
use crate::error::Result;

/// Path separator recognized in typed words
pub const SEPARATOR: char = '/';

/// A partial path word split into its display and resolved forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathQuery<'a> {
    /// Verbatim text up to and including the last separator
    pub display_prefix: &'a str,
    /// Absolute, normalized directory to enumerate
    pub resolved_directory: PathBuf,
    /// Unescaped file name prefix to match entries against
    pub search_basename: String,
}

impl<'a> PathQuery<'a> {
    /// Split and resolve a partial path word
    ///
    /// # Arguments
    /// * `word` - Partial word as typed, possibly with backslash escapes
    /// * `dirs` - Source of the working and home directories
    ///
    /// # Returns
    /// * `Result<Option<Self>>` - The query, or `None` when `~` is used but
    ///   no home directory is known
    pub fn parse(word: &'a str, dirs: &dyn WorkingDirectory) -> Result<Option<Self>> {
        let (display_prefix, basename) = match word.rfind(SEPARATOR) {
            Some(idx) => word.split_at(idx + SEPARATOR.len_utf8()),
            None => ("", word),
        };

        let Some(resolved_directory) = resolve_directory(display_prefix, dirs)? else {
            return Ok(None);
        };

        Ok(Some(Self {
            display_prefix,
            resolved_directory,
            search_basename: unescape(basename),
        }))
    }

    /// Build the candidate text for a matched entry
    pub fn candidate(&self, file_name: &str, is_dir: bool, escape_chars: &[char]) -> String {
        let mut out = String::with_capacity(self.display_prefix.len() + file_name.len() + 2);
        out.push_str(self.display_prefix);
        out.push_str(&escape(file_name, escape_chars));
        out.push(if is_dir { SEPARATOR } else { ' ' });
        out
    }
}

/// Map a display prefix to the directory it denotes
fn resolve_directory(display_prefix: &str, dirs: &dyn WorkingDirectory) -> Result<Option<PathBuf>> {
    let typed = unescape(display_prefix);

    let base = if typed.is_empty() {
        dirs.current_dir()?
    } else if let Some(rest) = typed.strip_prefix("~/") {
        match dirs.home_dir() {
            Some(home) => home.join(rest),
            None => return Ok(None),
        }
    } else if Path::new(&typed).is_absolute() {
        PathBuf::from(&typed)
    } else {
        dirs.current_dir()?.join(&typed)
    };

    Ok(Some(normalize(&base)))
}

/// Resolve `.` and `..` components without touching the filesystem
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Backslash-escape every character in `escape_chars`
pub fn escape(name: &str, escape_chars: &[char]) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if escape_chars.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Remove backslash escapes typed by the user
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push(c),
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedDirs {
        cwd: PathBuf,
        home: Option<PathBuf>,
    }

    impl WorkingDirectory for FixedDirs {
        fn current_dir(&self) -> Result<PathBuf> {
            Ok(self.cwd.clone())
        }

        fn home_dir(&self) -> Option<PathBuf> {
            self.home.clone()
        }
    }

    fn dirs() -> FixedDirs {
        FixedDirs {
            cwd: PathBuf::from("/work/repo"),
            home: Some(PathBuf::from("/home/alice")),
        }
    }

    #[test]
    fn test_bare_word_searches_cwd() {
        let query = PathQuery::parse("REA", &dirs()).unwrap().unwrap();
        assert_eq!(query.display_prefix, "");
        assert_eq!(query.resolved_directory, PathBuf::from("/work/repo"));
        assert_eq!(query.search_basename, "REA");
    }

    #[test]
    fn test_tilde_expands_but_display_is_kept() {
        let query = PathQuery::parse("~/doc", &dirs()).unwrap().unwrap();
        assert_eq!(query.display_prefix, "~/");
        assert_eq!(query.resolved_directory, PathBuf::from("/home/alice"));
        assert_eq!(query.search_basename, "doc");
    }

    #[test]
    fn test_tilde_without_home() {
        let dirs = FixedDirs {
            cwd: PathBuf::from("/work"),
            home: None,
        };
        assert!(PathQuery::parse("~/x", &dirs).unwrap().is_none());
    }

    #[test]
    fn test_dot_segments_resolve() {
        let query = PathQuery::parse("src/./lib/../bin/ma", &dirs()).unwrap().unwrap();
        assert_eq!(query.display_prefix, "src/./lib/../bin/");
        assert_eq!(query.resolved_directory, PathBuf::from("/work/repo/src/bin"));
        assert_eq!(query.search_basename, "ma");
    }

    #[test]
    fn test_parent_of_cwd() {
        let query = PathQuery::parse("../", &dirs()).unwrap().unwrap();
        assert_eq!(query.resolved_directory, PathBuf::from("/work"));
        assert_eq!(query.search_basename, "");
    }

    #[test]
    fn test_absolute_prefix() {
        let query = PathQuery::parse("/etc/../usr/", &dirs()).unwrap().unwrap();
        assert_eq!(query.resolved_directory, PathBuf::from("/usr"));
    }

    #[test]
    fn test_escaped_space_in_prefix_and_basename() {
        let query = PathQuery::parse(r"my\ dir/some\ te", &dirs()).unwrap().unwrap();
        assert_eq!(query.display_prefix, r"my\ dir/");
        assert_eq!(query.resolved_directory, PathBuf::from("/work/repo/my dir"));
        assert_eq!(query.search_basename, "some te");
    }

    #[test]
    fn test_normalize_does_not_climb_above_root() {
        assert_eq!(normalize(Path::new("/../..")), PathBuf::from("/"));
    }

    #[test]
    fn test_escape_and_unescape() {
        let chars = [' ', '\''];
        assert_eq!(escape("some text file.txt", &chars), r"some\ text\ file.txt");
        assert_eq!(escape("it's", &chars), r"it\'s");
        assert_eq!(unescape(r"some\ text"), "some text");
        assert_eq!(unescape("trailing\\"), "trailing\\");
    }

    #[test]
    fn test_candidate_terminators() {
        let query = PathQuery::parse("~/", &dirs()).unwrap().unwrap();
        assert_eq!(query.candidate("notes.txt", false, &[' ']), "~/notes.txt ");
        assert_eq!(query.candidate("src", true, &[' ']), "~/src/");
        assert_eq!(query.candidate("a b", false, &[' ']), r"~/a\ b ");
    }
}
