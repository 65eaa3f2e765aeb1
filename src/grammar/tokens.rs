//! Token definitions for the rule notation
//!
//! One grammar rule is written as `LHS -> EXPR [: WEIGHT]` where EXPR uses
//! identifiers, the meta characters `? * + |`, parentheses and bounded
//! repetition braces `{m,n}`. The tokens are defined using the logos derive
//! macro; whitespace is skipped, and any character outside the notation is a
//! lexical error.

use super::error::LexicalError;
use logos::Logos;
use std::ops::Range;

/// All possible tokens in a rule notation line
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    #[token("->")]
    Arrow,

    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,

    #[token("|")]
    Pipe,
    #[token("?")]
    Question,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,

    /// Bounded repetition `{m,n}`, with optional spaces after the comma
    #[regex(r"\{[0-9]+, *[0-9]+\}", parse_repetition)]
    Repetition((usize, usize)),

    /// Trailing rule weight `: n`
    #[regex(r": *[0-9]+", parse_weight)]
    Weight(u32),

    /// Terminal or nonterminal name
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),
}

fn parse_repetition(lex: &mut logos::Lexer<Token>) -> Option<(usize, usize)> {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];
    let (min, max) = inner.split_once(',')?;
    Some((min.trim().parse().ok()?, max.trim().parse().ok()?))
}

fn parse_weight(lex: &mut logos::Lexer<Token>) -> Option<u32> {
    lex.slice()[1..].trim().parse().ok()
}

impl Token {
    /// Human-readable rendering, used in syntax error messages
    pub fn describe(&self) -> String {
        match self {
            Token::Arrow => "->".to_string(),
            Token::OpenParen => "(".to_string(),
            Token::CloseParen => ")".to_string(),
            Token::Pipe => "|".to_string(),
            Token::Question => "?".to_string(),
            Token::Star => "*".to_string(),
            Token::Plus => "+".to_string(),
            Token::Repetition((min, max)) => format!("{{{},{}}}", min, max),
            Token::Weight(w) => format!(": {}", w),
            Token::Ident(name) => name.clone(),
        }
    }
}

/// Tokenize one notation line, collecting tokens with their byte spans.
///
/// The first unrecognized character aborts tokenization with a
/// [`LexicalError`] carrying the character and its offset.
pub fn tokenize(source: &str) -> Result<Vec<(Token, Range<usize>)>, LexicalError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                let span = lexer.span();
                return Err(LexicalError {
                    found: source[span.start..].chars().next().unwrap_or('\u{fffd}'),
                    offset: span.start,
                });
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_spans(pairs: Vec<(Token, Range<usize>)>) -> Vec<Token> {
        pairs.into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_simple_rule_tokenization() {
        let tokens = strip_spans(tokenize("S -> NOUN VERB NOUN : 5").unwrap());
        assert_eq!(
            tokens,
            vec![
                Token::Ident("S".to_string()),
                Token::Arrow,
                Token::Ident("NOUN".to_string()),
                Token::Ident("VERB".to_string()),
                Token::Ident("NOUN".to_string()),
                Token::Weight(5),
            ]
        );
    }

    #[test]
    fn test_meta_characters() {
        let tokens = strip_spans(tokenize("a? b* c+ (d | e)").unwrap());
        assert_eq!(
            tokens,
            vec![
                Token::Ident("a".to_string()),
                Token::Question,
                Token::Ident("b".to_string()),
                Token::Star,
                Token::Ident("c".to_string()),
                Token::Plus,
                Token::OpenParen,
                Token::Ident("d".to_string()),
                Token::Pipe,
                Token::Ident("e".to_string()),
                Token::CloseParen,
            ]
        );
    }

    #[test]
    fn test_repetition_braces() {
        let tokens = strip_spans(tokenize("a{2,4}").unwrap());
        assert_eq!(
            tokens,
            vec![
                Token::Ident("a".to_string()),
                Token::Repetition((2, 4)),
            ]
        );
    }

    #[test]
    fn test_repetition_braces_with_space() {
        let tokens = strip_spans(tokenize("a{2, 4}").unwrap());
        assert_eq!(
            tokens,
            vec![
                Token::Ident("a".to_string()),
                Token::Repetition((2, 4)),
            ]
        );
    }

    #[test]
    fn test_weight_without_space() {
        let tokens = strip_spans(tokenize("a :3").unwrap());
        assert_eq!(
            tokens,
            vec![Token::Ident("a".to_string()), Token::Weight(3)]
        );
    }

    #[test]
    fn test_underscore_is_an_identifier() {
        let tokens = strip_spans(tokenize("_").unwrap());
        assert_eq!(tokens, vec![Token::Ident("_".to_string())]);
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("S -> a & b").unwrap_err();
        assert_eq!(err.found, '&');
        assert_eq!(err.offset, 7);
    }

    #[test]
    fn test_lone_dash_is_lexical_error() {
        let err = tokenize("S - > a").unwrap_err();
        assert_eq!(err.found, '-');
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(tokenize("").unwrap(), vec![]);
    }
}
