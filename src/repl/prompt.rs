//! Custom prompt implementation for gitsh

use std::borrow::Cow;

use nu_ansi_term::{Color, Style};
use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

/// Prompt showing the current directory and branch, e.g. `gitsh master@ `
pub struct GitshPrompt {
    /// Name of the current directory
    directory: String,
    /// Checked-out branch, if any
    branch: Option<String>,
    /// Whether to color the prompt
    color: bool,
}

impl GitshPrompt {
    /// Create a new prompt
    ///
    /// # Arguments
    /// * `directory` - Name of the current directory
    /// * `branch` - Checked-out branch, if any
    /// * `color` - Whether to color the prompt
    pub fn new(directory: String, branch: Option<String>, color: bool) -> Self {
        Self {
            directory,
            branch,
            color,
        }
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.color {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl Prompt for GitshPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        let directory = self.paint(Style::new().fg(Color::Blue), &self.directory);
        match &self.branch {
            Some(branch) => {
                let branch = self.paint(Style::new().fg(Color::Yellow), branch);
                format!("{directory} {branch}@ ").into()
            }
            // Outside a repository
            None => format!("{directory} !! ").into(),
        }
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        "".into()
    }

    /// The indicator is part of the left prompt
    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> Cow<'_, str> {
        "".into()
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        "> ".into()
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };

        format!("({}reverse-search: {}) ", prefix, history_search.term).into()
    }
}
