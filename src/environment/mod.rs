//! Shell environment
//!
//! Holds the state the shell keeps between commands: variables set with
//! `:set`, and the git runner used to look up commands, aliases and
//! references. Completion reads it through [`VcsStateProvider`]; nothing is
//! cached, so new aliases or branches show up on the next Tab.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{PoisonError, RwLock};

use crate::error::Result;
use crate::git::GitRunner;
use crate::repl::completion::VcsStateProvider;

/// Shared state of one shell session
#[derive(Debug)]
pub struct GitEnvironment {
    /// Runner for git invocations
    git: GitRunner,
    /// Variables set with `:set`
    variables: RwLock<BTreeMap<String, String>>,
}

impl GitEnvironment {
    /// Create an environment using the given git runner
    pub fn new(git: GitRunner) -> Self {
        Self {
            git,
            variables: RwLock::new(BTreeMap::new()),
        }
    }

    /// Git runner of this environment
    pub fn git(&self) -> &GitRunner {
        &self.git
    }

    /// Set a variable
    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        self.variables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), value.into());
    }

    /// Get a variable
    pub fn get(&self, name: &str) -> Option<String> {
        self.variables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// All variables, sorted by name
    pub fn variables(&self) -> Vec<(String, String)> {
        self.variables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Variables that look like git config keys (`section.key`), passed to
    /// every git invocation with `-c`
    pub fn git_config_overrides(&self) -> Vec<(String, String)> {
        self.variables()
            .into_iter()
            .filter(|(name, _)| name.contains('.'))
            .collect()
    }

    /// Short name of the checked-out branch, if any
    pub fn current_branch(&self) -> Option<String> {
        self.git
            .query(&["symbolic-ref", "--short", "-q", "HEAD"])
            .ok()
            .flatten()
            .map(|out| out.trim().to_string())
            .filter(|branch| !branch.is_empty())
    }
}

/// One name per non-empty line
fn parse_lines(output: &str) -> BTreeSet<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Alias names from `git config --get-regexp ^alias\.` output
fn parse_aliases(output: &str) -> BTreeSet<String> {
    output
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .filter_map(alias_name)
        .map(String::from)
        .collect()
}

/// Name of the alias a config key defines, e.g. `co` for `alias.co`
fn alias_name(key: &str) -> Option<&str> {
    key.strip_prefix("alias.").filter(|name| !name.is_empty())
}

impl VcsStateProvider for GitEnvironment {
    fn command_names(&self) -> Result<BTreeSet<String>> {
        let output = self
            .git
            .query(&["--list-cmds=main,others,nohelpers"])?
            .unwrap_or_default();
        Ok(parse_lines(&output))
    }

    fn aliases(&self) -> Result<BTreeSet<String>> {
        // Exits with status 1 when no alias is configured
        let output = self
            .git
            .query(&["config", "--get-regexp", r"^alias\."])?
            .unwrap_or_default();

        // `:set alias.NAME ...` only reaches git as `-c`, so add those too
        let mut names = parse_aliases(&output);
        names.extend(
            self.git_config_overrides()
                .into_iter()
                .filter_map(|(key, _)| alias_name(&key).map(String::from)),
        );
        Ok(names)
    }

    fn reference_names(&self) -> Result<BTreeSet<String>> {
        // Fails outside a repository, which simply means no references
        let output = self
            .git
            .query(&[
                "for-each-ref",
                "--format=%(refname:short)",
                "refs/heads",
                "refs/tags",
                "refs/remotes",
            ])?
            .unwrap_or_default();
        Ok(parse_lines(&output))
    }
}
