//! Input line parsing for gitsh
//!
//! Splits a line into words the way the completer escapes them: whitespace
//! separates words, a backslash escapes the next character, and single or
//! double quotes group text containing whitespace.

use crate::error::{ParseError, Result};

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Nothing but whitespace
    Empty,
    /// An internal directive, e.g. `:cd src`
    Internal {
        /// Directive name including its marker
        name: String,
        /// Remaining words
        args: Vec<String>,
    },
    /// Arguments passed to git
    Git(Vec<String>),
}

/// Parser for shell input lines
#[derive(Debug, Clone, Copy)]
pub struct Parser {
    /// Leading character of internal directives
    marker: char,
}

impl Parser {
    /// Create a parser recognizing `marker` as the directive prefix
    pub fn new(marker: char) -> Self {
        Self { marker }
    }

    /// Parse one input line
    pub fn parse(&self, input: &str) -> Result<Command> {
        let mut words = split_words(input)?.into_iter();

        let Some(first) = words.next() else {
            return Ok(Command::Empty);
        };

        if first.starts_with(self.marker) {
            return Ok(Command::Internal {
                name: first,
                args: words.collect(),
            });
        }

        Ok(Command::Git(std::iter::once(first).chain(words).collect()))
    }
}

/// Split a line into words, honoring backslash escapes and quotes
pub fn split_words(input: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                in_word = true;
                // A trailing backslash is kept literally
                current.push(chars.next().unwrap_or('\\'));
            }
            '\'' | '"' => {
                in_word = true;
                let quote = c;
                loop {
                    match chars.next() {
                        Some(q) if q == quote => break,
                        Some('\\') if quote == '"' => match chars.next() {
                            Some(escaped) => current.push(escaped),
                            None => return Err(ParseError::UnterminatedQuote(quote).into()),
                        },
                        Some(other) => current.push(other),
                        None => return Err(ParseError::UnterminatedQuote(quote).into()),
                    }
                }
            }
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            other => {
                in_word = true;
                current.push(other);
            }
        }
    }

    if in_word {
        words.push(current);
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_words() {
        assert_eq!(
            split_words("  commit  -m msg ").unwrap(),
            vec!["commit", "-m", "msg"]
        );
    }

    #[test]
    fn test_split_escaped_space() {
        assert_eq!(
            split_words(r"add some\ text\ file.txt").unwrap(),
            vec!["add", "some text file.txt"]
        );
    }

    #[test]
    fn test_split_quotes() {
        assert_eq!(
            split_words(r#"commit -m "fix \"it\"" 'a b'"#).unwrap(),
            vec!["commit", "-m", "fix \"it\"", "a b"]
        );
    }

    #[test]
    fn test_empty_quotes_make_a_word() {
        assert_eq!(split_words("echo ''").unwrap(), vec!["echo", ""]);
    }

    #[test]
    fn test_unterminated_quote() {
        let err = split_words("commit -m \"oops").unwrap_err();
        assert_eq!(err.to_string(), "Syntax error: unterminated \" quote");
    }

    #[test]
    fn test_parse_internal_and_git() {
        let parser = Parser::new(':');
        assert_eq!(parser.parse("   ").unwrap(), Command::Empty);
        assert_eq!(
            parser.parse(":cd src").unwrap(),
            Command::Internal {
                name: ":cd".to_string(),
                args: vec!["src".to_string()]
            }
        );
        assert_eq!(
            parser.parse("status -s").unwrap(),
            Command::Git(vec!["status".to_string(), "-s".to_string()])
        );
    }
}
