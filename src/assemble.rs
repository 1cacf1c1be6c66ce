//! Joining quoted tokens into a single command line.

use itertools::Itertools;

use crate::quote::{DialectQuoter, QuoteMode, Token};

/// Render each token through `quoter` and join them with single spaces, in
/// input order. Plain tokens default to strong quoting. No token is dropped —
/// an empty-string token still renders as an empty delimiter pair — and an
/// empty token sequence yields an empty string.
pub fn assemble(tokens: &[Token], quoter: &DialectQuoter) -> String {
    tokens
        .iter()
        .map(|token| match token {
            Token::Plain(s) => quoter.quote(QuoteMode::Strong, s),
            Token::Quoted(q) => quoter.quote(q.mode, &q.value),
        })
        .join(" ")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::quote::Quoted;

    #[test]
    fn test_empty_sequence() {
        assert_eq!(assemble(&[], &DialectQuoter::bash()), "");
    }

    #[test]
    fn test_plain_tokens_default_to_strong() {
        let tokens: Vec<Token> = vec!["echo".into(), "hello world".into()];
        assert_eq!(
            assemble(&tokens, &DialectQuoter::bash()),
            "'echo' 'hello world'"
        );
    }

    #[test]
    fn test_explicit_modes_are_honored() {
        let tokens: Vec<Token> = vec![
            "grep".into(),
            Quoted::new("$PATTERN", QuoteMode::Weak).into(),
            Quoted::new("some file", QuoteMode::Escape).into(),
        ];
        assert_eq!(
            assemble(&tokens, &DialectQuoter::bash()),
            "'grep' \"$PATTERN\" some\\ file"
        );
    }

    #[test]
    fn test_empty_token_is_kept() {
        let tokens: Vec<Token> = vec!["printf".into(), "".into(), "x".into()];
        assert_eq!(
            assemble(&tokens, &DialectQuoter::bash()),
            "'printf' '' 'x'"
        );
    }

    #[test]
    fn test_embedded_backticks_and_spaces_survive() {
        let tokens: Vec<Token> = vec![
            "node".into(),
            "-e".into(),
            "console.log(`[${'ABC'}|${'DEF'}]`)".into(),
        ];
        assert_eq!(
            assemble(&tokens, &DialectQuoter::bash()),
            r#"'node' '-e' 'console.log(`[${'"'"'ABC'"'"'}|${'"'"'DEF'"'"'}]`)'"#
        );
    }
}
