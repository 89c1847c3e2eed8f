use std::io;
use std::sync::Arc;

use nu_ansi_term::{Color, Style};
use reedline::{
    ColumnarMenu, DefaultHinter, Emacs, FileBackedHistory, KeyCode, KeyModifiers, MenuBuilder,
    Reedline, ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use tracing::debug;

use crate::config::HistoryConfig;
use crate::directives::{InternalCommands, Outcome};
use crate::environment::GitEnvironment;
use crate::error::Result;
use crate::parser::{Command, Parser};

use super::completer::GitshCompleter;
use super::completion::CompletionEngine;
use super::prompt::GitshPrompt;

const COMPLETION_MENU: &str = "completion_menu";

/// REPL engine for interactive command execution
pub struct ReplEngine {
    /// Line editor for command input
    editor: Reedline,

    /// Shared shell environment
    env: Arc<GitEnvironment>,

    /// Parser for input lines
    parser: Parser,

    /// Internal directives
    directives: InternalCommands,

    /// Whether the prompt is colored
    color: bool,

    /// Whether to continue running
    running: bool,
}

impl ReplEngine {
    /// Create a new REPL engine
    ///
    /// # Arguments
    /// * `env` - Shared shell environment
    /// * `completion_engine` - Engine backing Tab completion
    /// * `history_config` - History configuration
    /// * `marker` - Leading character of internal directives
    /// * `color` - Whether the prompt is colored
    ///
    /// # Returns
    /// * `Result<Self>` - New REPL engine or error
    pub fn new(
        env: Arc<GitEnvironment>,
        completion_engine: Arc<CompletionEngine>,
        history_config: &HistoryConfig,
        marker: char,
        color: bool,
    ) -> Result<Self> {
        let history = if history_config.persist {
            FileBackedHistory::with_file(history_config.max_size, history_config.file_path.clone())?
        } else {
            FileBackedHistory::new(history_config.max_size)?
        };

        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let menu = ColumnarMenu::default().with_name(COMPLETION_MENU);
        let hinter = DefaultHinter::default().with_style(if color {
            Style::new().italic().fg(Color::DarkGray)
        } else {
            Style::new()
        });
        let editor = Reedline::create()
            .with_history(Box::new(history))
            .with_hinter(Box::new(hinter))
            .with_completer(Box::new(GitshCompleter::new(completion_engine)))
            .with_menu(ReedlineMenu::EngineCompleter(Box::new(menu)))
            .with_edit_mode(Box::new(Emacs::new(keybindings)));

        Ok(Self {
            editor,
            env,
            parser: Parser::new(marker),
            directives: InternalCommands::new(marker),
            color,
            running: true,
        })
    }

    /// Read a single line of input
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Input line, empty on Ctrl-C, `None` on EOF
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let prompt = self.prompt();
        match self.editor.read_line(&prompt)? {
            Signal::Success(line) => Ok(Some(line)),
            Signal::CtrlC => Ok(Some(String::new())),
            _ => Ok(None),
        }
    }

    /// Parse user input into a command
    pub fn process_input(&self, input: &str) -> Result<Command> {
        self.parser.parse(input)
    }

    /// Execute a parsed command
    ///
    /// Internal directives run in-process; anything else is handed to git
    /// together with the dotted `:set` variables as `-c` overrides.
    pub async fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Empty => Ok(()),
            Command::Internal { name, args } => {
                let outcome = self
                    .directives
                    .execute(&name, &args, &self.env, &mut io::stdout())?;
                if outcome == Outcome::Exit {
                    self.stop();
                }
                Ok(())
            }
            Command::Git(args) => {
                let overrides = self.env.git_config_overrides();
                let status = self.env.git().run(&overrides, &args).await?;
                if !status.success() {
                    debug!("git exited with {}", status);
                }
                Ok(())
            }
        }
    }

    /// Stop the REPL
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Check if REPL is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Build the prompt from the current directory and branch
    fn prompt(&self) -> GitshPrompt {
        let directory = std::env::current_dir()
            .ok()
            .and_then(|dir| dir.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "/".to_string());

        GitshPrompt::new(directory, self.env.current_branch(), self.color)
    }
}
