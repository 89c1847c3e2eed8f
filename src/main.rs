//! gitsh - an interactive shell for git
//!
//! Type git commands without the leading `git`, use `:`-prefixed directives
//! for shell features, and press Tab to complete commands, branch names and
//! paths.
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode
//! gitsh
//!
//! # Use another git binary
//! gitsh --git /usr/local/bin/git
//! ```

use std::sync::Arc;
use tracing::{Level, info};

use gitsh::cli::CliInterface;
use gitsh::directives::InternalCommands;
use gitsh::environment::GitEnvironment;
use gitsh::error::Result;
use gitsh::git::GitRunner;
use gitsh::repl::{CompletionEngine, ReplEngine};

/// Application entry point
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// This function orchestrates the application startup:
/// 1. Parse command-line arguments
/// 2. Load configuration
/// 3. Initialize logging
/// 4. Handle subcommands or start the shell
///
/// # Returns
/// * `Result<()>` - Success or error
async fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    if cli.handle_subcommand()? {
        return Ok(());
    }

    run_interactive_mode(&cli).await
}

/// Run application in interactive REPL mode
async fn run_interactive_mode(cli: &CliInterface) -> Result<()> {
    let mut repl = create_repl_engine(cli)?;
    info!("gitsh {} started", gitsh::version());

    run_repl_loop(&mut repl).await
}

/// Wire the environment, directives and completion engine into a REPL
fn create_repl_engine(cli: &CliInterface) -> Result<ReplEngine> {
    let config = cli.config();
    let marker = config.completion.directive_marker;

    let env = Arc::new(GitEnvironment::new(GitRunner::new(
        config.git.executable.clone(),
    )));
    let completion_engine = CompletionEngine::new(
        env.clone(),
        Arc::new(InternalCommands::new(marker)),
        config.completion.clone(),
    );

    ReplEngine::new(
        env,
        Arc::new(completion_engine),
        &config.history,
        marker,
        cli.color_enabled(),
    )
}

/// Main REPL loop
async fn run_repl_loop(repl: &mut ReplEngine) -> Result<()> {
    while repl.is_running() {
        let input = match repl.read_line()? {
            Some(line) if !line.trim().is_empty() => line,
            Some(_) => continue,
            None => break,
        };

        let command = match repl.process_input(&input) {
            Ok(cmd) => cmd,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        if let Err(e) = repl.execute(command).await {
            eprintln!("{}", e);
        }
    }

    Ok(())
}

/// Initialize logging system based on verbosity level
///
/// # Arguments
/// * `cli` - CLI interface with verbosity settings
fn initialize_logging(cli: &CliInterface) {
    let level = if cli.args().very_verbose {
        Level::TRACE
    } else if cli.args().verbose {
        Level::DEBUG
    } else {
        cli.config().logging.level.to_tracing_level()
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
