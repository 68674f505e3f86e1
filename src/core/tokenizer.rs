//! Msh Tokenizer
//!
//! Splits an input line into whitespace-separated words. There is no quoting
//! or expansion: a token is any run of characters other than space, tab, or
//! newline.

use regex::Regex;

use crate::errors::{ErrorKind, Result};

/// Historical limit on the number of words in a command line.
pub const DEFAULT_MAX_TOKENS: usize = 20;

const COMMENT_PREFIX: char = '#';

lazy_static! {
    static ref SEPARATORS: Regex = Regex::new(r"[ \t\n]+").expect("separator pattern is valid");
}

#[derive(Clone, Debug)]
pub struct Tokenizer {
    max_tokens: usize,
}

impl Tokenizer {
    pub fn new(max_tokens: usize) -> Self {
        Self { max_tokens }
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Splits `line` into tokens.
    ///
    /// Blank lines and lines starting with `#` produce no tokens. A line with
    /// more than `max_tokens` tokens is rejected rather than truncated.
    pub fn tokenize(&self, line: &str) -> Result<Vec<String>> {
        if is_skippable(line) {
            return Ok(Vec::new());
        }

        let tokens: Vec<String> = SEPARATORS
            .split(line)
            .filter(|token| !token.is_empty())
            .map(ToOwned::to_owned)
            .collect();

        if tokens.len() > self.max_tokens {
            return Err(ErrorKind::TooManyArguments(tokens.len(), self.max_tokens).into());
        }

        debug!("tokenized {:?}", tokens);
        Ok(tokens)
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOKENS)
    }
}

fn is_skippable(line: &str) -> bool {
    match line.chars().next() {
        None | Some('\n') | Some('\0') => true,
        Some(COMMENT_PREFIX) => true,
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(line: &str) -> Vec<String> {
        Tokenizer::default().tokenize(line).unwrap()
    }

    #[test]
    fn test_simple_command() {
        assert_eq!(tokenize("echo hi\n"), vec!["echo", "hi"]);
    }

    #[test]
    fn test_mixed_separators() {
        assert_eq!(
            tokenize("  ls\t-l \t /tmp  \n"),
            vec!["ls", "-l", "/tmp"]
        );
    }

    #[test]
    fn test_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("\n").is_empty());
        assert!(tokenize("   \t \n").is_empty());
        assert!(tokenize("# comment\n").is_empty());
        assert!(tokenize("#echo hi").is_empty());
    }

    #[test]
    fn test_background_marker_is_a_token() {
        assert_eq!(tokenize("sleep 5 &\n"), vec!["sleep", "5", "&"]);
        assert_eq!(tokenize("sleep 5&\n"), vec!["sleep", "5&"]);
    }

    #[test]
    fn test_token_bound() {
        let tokenizer = Tokenizer::new(3);
        assert_eq!(tokenizer.tokenize("a b c").unwrap().len(), 3);

        let err = tokenizer.tokenize("a b c d").unwrap_err();
        match *err.kind() {
            ErrorKind::TooManyArguments(count, max) => {
                assert_eq!(count, 4);
                assert_eq!(max, 3);
            }
            ref kind => panic!("unexpected error: {:?}", kind),
        }
    }

    #[test]
    fn test_default_bound_preserves_order() {
        let words: Vec<String> = (0..DEFAULT_MAX_TOKENS).map(|i| format!("w{}", i)).collect();
        let line = format!("{}\n", words.join(" "));
        assert_eq!(tokenize(&line), words);
    }
}
