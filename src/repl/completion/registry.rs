//! Command registry for completion
//!
//! This module defines the traits the completion engine uses to query its
//! collaborators, and the per-call snapshot assembled from them.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use crate::error::Result;

/// Trait for providing git state needed by completion
pub trait VcsStateProvider: Send + Sync {
    /// Get the names of git commands (porcelain and plumbing)
    fn command_names(&self) -> Result<BTreeSet<String>>;

    /// Get the names of configured git aliases
    fn aliases(&self) -> Result<BTreeSet<String>>;

    /// Get branch, tag and remote-tracking reference names
    fn reference_names(&self) -> Result<BTreeSet<String>>;
}

/// Trait for providing internal directive names (including their marker)
pub trait DirectiveProvider: Send + Sync {
    /// Get the names of internal directives, e.g. `:set`
    fn directive_names(&self) -> Result<BTreeSet<String>>;
}

/// Trait for locating the directories relative paths are resolved against
pub trait WorkingDirectory: Send + Sync {
    /// Current working directory of the shell
    fn current_dir(&self) -> Result<PathBuf>;

    /// Home directory used to expand a leading `~`
    fn home_dir(&self) -> Option<PathBuf>;
}

/// Working directory backed by the process state
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessDirectories;

impl WorkingDirectory for ProcessDirectories {
    fn current_dir(&self) -> Result<PathBuf> {
        Ok(std::env::current_dir()?)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
}

/// Kind of argument a command expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    /// Branch, tag or other reference names
    Reference,
    /// Filesystem paths
    Path,
}

/// Read-only view of the names known at the moment of a completion call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandRegistry {
    /// Git command names
    pub command_names: BTreeSet<String>,
    /// Git alias names
    pub command_aliases: BTreeSet<String>,
    /// Internal directive names, marker included
    pub internal_directives: BTreeSet<String>,
    /// Commands whose arguments are references
    pub reference_commands: BTreeSet<String>,
}

impl CommandRegistry {
    /// Build a fresh snapshot from the collaborators
    ///
    /// # Arguments
    /// * `vcs` - Git state provider
    /// * `directives` - Internal directive provider
    /// * `argument_kinds` - Command name to argument kind mapping
    ///
    /// # Returns
    /// * `Result<Self>` - Snapshot, or the first collaborator failure
    pub fn snapshot(
        vcs: &dyn VcsStateProvider,
        directives: &dyn DirectiveProvider,
        argument_kinds: &BTreeMap<String, ArgumentKind>,
    ) -> Result<Self> {
        let reference_commands = argument_kinds
            .iter()
            .filter(|(_, kind)| **kind == ArgumentKind::Reference)
            .map(|(name, _)| name.clone())
            .collect();

        Ok(Self {
            command_names: vcs.command_names()?,
            command_aliases: vcs.aliases()?,
            internal_directives: directives.directive_names()?,
            reference_commands,
        })
    }

    /// Argument kind for a command, defaulting to paths when unknown
    pub fn argument_kind(&self, command: &str) -> ArgumentKind {
        if self.reference_commands.contains(command) {
            ArgumentKind::Reference
        } else {
            ArgumentKind::Path
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GitshError;

    struct FixedVcs;

    impl VcsStateProvider for FixedVcs {
        fn command_names(&self) -> Result<BTreeSet<String>> {
            Ok(["add", "commit"].into_iter().map(String::from).collect())
        }

        fn aliases(&self) -> Result<BTreeSet<String>> {
            Ok(["co"].into_iter().map(String::from).collect())
        }

        fn reference_names(&self) -> Result<BTreeSet<String>> {
            Ok(BTreeSet::new())
        }
    }

    struct BrokenDirectives;

    impl DirectiveProvider for BrokenDirectives {
        fn directive_names(&self) -> Result<BTreeSet<String>> {
            Err(GitshError::Generic("unavailable".to_string()))
        }
    }

    struct FixedDirectives;

    impl DirectiveProvider for FixedDirectives {
        fn directive_names(&self) -> Result<BTreeSet<String>> {
            Ok([":set"].into_iter().map(String::from).collect())
        }
    }

    #[test]
    fn test_snapshot_collects_all_sources() {
        let mut kinds = BTreeMap::new();
        kinds.insert("push".to_string(), ArgumentKind::Reference);
        kinds.insert("add".to_string(), ArgumentKind::Path);

        let registry = CommandRegistry::snapshot(&FixedVcs, &FixedDirectives, &kinds).unwrap();

        assert!(registry.command_names.contains("commit"));
        assert!(registry.command_aliases.contains("co"));
        assert!(registry.internal_directives.contains(":set"));
        assert_eq!(registry.reference_commands.len(), 1);
        assert!(registry.reference_commands.contains("push"));
    }

    #[test]
    fn test_snapshot_propagates_collaborator_failure() {
        let result = CommandRegistry::snapshot(&FixedVcs, &BrokenDirectives, &BTreeMap::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_command_defaults_to_path() {
        let registry = CommandRegistry::default();
        assert_eq!(registry.argument_kind("frobnicate"), ArgumentKind::Path);
    }
}
