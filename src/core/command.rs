use std::fmt;

use crate::errors::{Error, Result};

/// Trailing token that requests background execution.
pub const BACKGROUND_MARKER: &str = "&";

/// A program name followed by its arguments, ready for dispatch.
#[derive(Clone, Debug, PartialEq)]
pub struct Command {
    argv: Vec<String>,
    background: bool,
}

impl Command {
    /// Builds a command from tokenizer output.
    ///
    /// Returns `None` for an empty token list. A trailing `&` is stripped and
    /// marks the command as background; a line holding nothing but `&` is a
    /// syntax error.
    pub fn from_tokens(mut tokens: Vec<String>) -> Result<Option<Command>> {
        if tokens.is_empty() {
            return Ok(None);
        }

        let background = tokens.last().map(String::as_str) == Some(BACKGROUND_MARKER);
        if background {
            tokens.pop();
            if tokens.is_empty() {
                return Err(Error::syntax(BACKGROUND_MARKER));
            }
        }

        Ok(Some(Command {
            argv: tokens,
            background,
        }))
    }

    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn is_background(&self) -> bool {
        self.background
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.argv.join(" "))?;
        if self.background {
            write!(f, " {}", BACKGROUND_MARKER)?;
        }
        Ok(())
    }
}
