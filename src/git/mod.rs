//! Running the git executable
//!
//! Two modes are supported:
//! - `query`: short, synchronous invocations whose output is captured, used
//!   to list commands, aliases and references for completion
//! - `run`: interactive invocations with inherited stdio, run on the tokio
//!   runtime so Ctrl+C can stop the child without ending the shell

use std::process::{ExitStatus, Stdio};

use tracing::{debug, info};

use crate::error::{GitError, Result};

/// Handle for invoking git
#[derive(Debug, Clone)]
pub struct GitRunner {
    /// Program name or path of the git executable
    executable: String,
}

impl GitRunner {
    /// Create a runner for the given executable
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Program name or path of the git executable
    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// Run git and capture its standard output
    ///
    /// # Arguments
    /// * `args` - Arguments passed to git
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Output on success, `None` when git exits
    ///   with a failure status, error when git cannot be started
    pub fn query(&self, args: &[&str]) -> Result<Option<String>> {
        let output = std::process::Command::new(&self.executable)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| GitError::SpawnFailed {
                program: self.executable.clone(),
                source,
            })?;

        if !output.status.success() {
            debug!(
                "git {} exited with {}: {}",
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim_end()
            );
            return Ok(None);
        }

        String::from_utf8(output.stdout)
            .map(Some)
            .map_err(|e| GitError::InvalidOutput(e.to_string()).into())
    }

    /// Run git interactively with inherited stdio
    ///
    /// A Ctrl+C received while git runs is delivered to the child by the
    /// terminal; the shell only waits for it to exit.
    ///
    /// # Arguments
    /// * `config` - `name=value` pairs passed to git with `-c`
    /// * `args` - Arguments passed to git
    ///
    /// # Returns
    /// * `Result<ExitStatus>` - Exit status of git
    pub async fn run(&self, config: &[(String, String)], args: &[String]) -> Result<ExitStatus> {
        let mut command = tokio::process::Command::new(&self.executable);
        for (name, value) in config {
            command.arg("-c").arg(format!("{name}={value}"));
        }
        command.args(args).kill_on_drop(true);

        info!("Running {} {}", self.executable, args.join(" "));
        let mut child = command.spawn().map_err(|source| GitError::SpawnFailed {
            program: self.executable.clone(),
            source,
        })?;

        loop {
            tokio::select! {
                status = child.wait() => return Ok(status?),
                signal = tokio::signal::ctrl_c() => {
                    signal?;
                    debug!("Interrupt received while git was running");
                }
            }
        }
    }
}

impl Default for GitRunner {
    fn default() -> Self {
        Self::new("git")
    }
}
