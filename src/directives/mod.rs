//! Internal directives
//!
//! Commands handled by the shell itself rather than by git. Each name
//! starts with the directive marker (`:` by default).

use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use crate::environment::GitEnvironment;
use crate::error::{DirectiveError, Result};
use crate::repl::completion::DirectiveProvider;

/// Built-in directives: name without marker, usage, summary
const DIRECTIVES: &[(&str, &str, &str)] = &[
    ("cd", "[DIR]", "Change the working directory"),
    ("echo", "[ARG...]", "Print the arguments"),
    ("exit", "", "Leave the shell"),
    ("help", "", "List internal commands"),
    (
        "set",
        "[NAME VALUE]",
        "Set a variable; dotted names are passed to git as config",
    ),
];

/// What the shell should do after a directive ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep reading input
    Continue,
    /// End the session
    Exit,
}

/// The set of internal directives
#[derive(Debug, Clone, Copy)]
pub struct InternalCommands {
    /// Leading character of every directive
    marker: char,
}

impl InternalCommands {
    /// Create the directive set using `marker` as prefix
    pub fn new(marker: char) -> Self {
        Self { marker }
    }

    /// Run a directive
    ///
    /// # Arguments
    /// * `name` - Directive name including its marker
    /// * `args` - Arguments after the name
    /// * `env` - Shell environment
    /// * `out` - Where output is written
    ///
    /// # Returns
    /// * `Result<Outcome>` - Whether the session continues
    pub fn execute(
        &self,
        name: &str,
        args: &[String],
        env: &GitEnvironment,
        out: &mut dyn Write,
    ) -> Result<Outcome> {
        let bare = name
            .strip_prefix(self.marker)
            .ok_or_else(|| DirectiveError::Unknown(name.to_string()))?;
        debug!("Running directive {} with {} argument(s)", name, args.len());

        match bare {
            "exit" => Ok(Outcome::Exit),
            "echo" => {
                writeln!(out, "{}", args.join(" "))?;
                Ok(Outcome::Continue)
            }
            "help" => {
                for (directive, usage, summary) in DIRECTIVES {
                    let call = format!("{}{directive} {usage}", self.marker);
                    writeln!(out, "  {:<22}{summary}", call.trim_end())?;
                }
                Ok(Outcome::Continue)
            }
            "set" => self.set(args, env, out),
            "cd" => {
                self.change_directory(args)?;
                Ok(Outcome::Continue)
            }
            _ => Err(DirectiveError::Unknown(name.to_string()).into()),
        }
    }

    fn set(&self, args: &[String], env: &GitEnvironment, out: &mut dyn Write) -> Result<Outcome> {
        match args {
            [] => {
                for (name, value) in env.variables() {
                    writeln!(out, "{name}={value}")?;
                }
            }
            [name, value @ ..] if !value.is_empty() => env.set(name.clone(), value.join(" ")),
            _ => {
                return Err(DirectiveError::Usage {
                    directive: format!("{}set", self.marker),
                    usage: "NAME VALUE".to_string(),
                }
                .into());
            }
        }
        Ok(Outcome::Continue)
    }

    fn change_directory(&self, args: &[String]) -> Result<()> {
        let usage = || DirectiveError::Usage {
            directive: format!("{}cd", self.marker),
            usage: "[DIR]".to_string(),
        };

        if args.len() > 1 {
            return Err(usage().into());
        }

        let arg = args.first().map(String::as_str);
        let target = cd_target(arg, dirs::home_dir()).ok_or_else(usage)?;

        std::env::set_current_dir(&target).map_err(|source| DirectiveError::ChangeDirectory {
            path: arg.unwrap_or("~").to_string(),
            source,
        })?;
        Ok(())
    }
}

/// Directory `:cd` should move to; `None` when the home directory is needed
/// but unknown
fn cd_target(arg: Option<&str>, home: Option<PathBuf>) -> Option<PathBuf> {
    match arg {
        None | Some("~") => home,
        Some(path) => match path.strip_prefix("~/") {
            Some(rest) => home.map(|h| h.join(rest)),
            None => Some(PathBuf::from(path)),
        },
    }
}

impl DirectiveProvider for InternalCommands {
    fn directive_names(&self) -> Result<BTreeSet<String>> {
        Ok(DIRECTIVES
            .iter()
            .map(|(name, _, _)| format!("{}{name}", self.marker))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::GitRunner;

    fn run(name: &str, args: &[&str], env: &GitEnvironment) -> (Result<Outcome>, String) {
        let commands = InternalCommands::new(':');
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let mut out = Vec::new();
        let result = commands.execute(name, &args, env, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_directive_names_carry_marker() {
        let names = InternalCommands::new(':').directive_names().unwrap();
        assert!(names.contains(":set"));
        assert!(names.contains(":exit"));
        assert!(names.contains(":cd"));
        assert!(names.iter().all(|n| n.starts_with(':')));
    }

    #[test]
    fn test_custom_marker() {
        let names = InternalCommands::new('!').directive_names().unwrap();
        assert!(names.contains("!set"));
    }

    #[test]
    fn test_exit() {
        let env = GitEnvironment::new(GitRunner::default());
        let (result, _) = run(":exit", &[], &env);
        assert_eq!(result.unwrap(), Outcome::Exit);
    }

    #[test]
    fn test_echo() {
        let env = GitEnvironment::new(GitRunner::default());
        let (result, out) = run(":echo", &["hello", "world"], &env);
        assert_eq!(result.unwrap(), Outcome::Continue);
        assert_eq!(out, "hello world\n");
    }

    #[test]
    fn test_set_and_list() {
        let env = GitEnvironment::new(GitRunner::default());
        run(":set", &["core.editor", "vim"], &env).0.unwrap();
        assert_eq!(env.get("core.editor").as_deref(), Some("vim"));

        let (_, out) = run(":set", &[], &env);
        assert_eq!(out, "core.editor=vim\n");
    }

    #[test]
    fn test_set_without_value_is_usage_error() {
        let env = GitEnvironment::new(GitRunner::default());
        let (result, _) = run(":set", &["only-name"], &env);
        assert_eq!(result.unwrap_err().to_string(), "usage: :set NAME VALUE");
    }

    #[test]
    fn test_unknown_directive() {
        let env = GitEnvironment::new(GitRunner::default());
        let (result, _) = run(":frob", &[], &env);
        assert_eq!(
            result.unwrap_err().to_string(),
            "gitsh: :frob: command not found"
        );
    }

    #[test]
    fn test_cd_to_missing_directory_fails() {
        let env = GitEnvironment::new(GitRunner::default());
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let (result, _) = run(":cd", &[missing.to_str().unwrap()], &env);
        assert!(result.is_err());
    }

    #[test]
    fn test_cd_target() {
        let home = Some(PathBuf::from("/home/ada"));
        assert_eq!(cd_target(None, home.clone()), Some(PathBuf::from("/home/ada")));
        assert_eq!(
            cd_target(Some("~/src"), home.clone()),
            Some(PathBuf::from("/home/ada/src"))
        );
        assert_eq!(cd_target(Some("lib"), home), Some(PathBuf::from("lib")));
        assert_eq!(cd_target(Some("~"), None), None);
    }

    #[test]
    fn test_help_lists_every_directive() {
        let env = GitEnvironment::new(GitRunner::default());
        let (_, out) = run(":help", &[], &env);
        assert!(out.contains(":cd [DIR]"));
        assert!(out.contains(":exit"));
        assert_eq!(out.lines().count(), DIRECTIVES.len());
    }
}
