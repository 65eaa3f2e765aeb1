//! Compiles one notation line into concrete rules
//!
//! A line `LHS -> EXPR [: WEIGHT]` compiles to one [`Rule`] per concrete
//! symbol sequence accepted by EXPR. All rules from one line share the lhs
//! and the explicit weight, if any; without an explicit weight each rule
//! defaults to the length of its own sequence.

use super::error::{CompileError, SyntaxError};
use super::expression::{expand, parse_expression, DEFAULT_REPETITION_CAP};
use super::rules::Rule;
use super::tokens::{tokenize, Token};

/// Compile a notation line with the default repetition cap.
pub fn compile_rule(line: &str) -> Result<Vec<Rule>, CompileError> {
    compile_rule_with(line, DEFAULT_REPETITION_CAP)
}

/// Compile a notation line with an explicit repetition cap.
pub fn compile_rule_with(line: &str, cap: usize) -> Result<Vec<Rule>, CompileError> {
    let tokens: Vec<Token> = tokenize(line)?.into_iter().map(|(t, _)| t).collect();

    let lhs = match tokens.first() {
        Some(Token::Ident(name)) => name.clone(),
        _ => return Err(SyntaxError::MissingArrow.into()),
    };
    if !matches!(tokens.get(1), Some(Token::Arrow)) {
        return Err(SyntaxError::MissingArrow.into());
    }

    // an optional weight closes the line; anywhere else it is rejected by
    // the expression parser
    let (body, weight) = match tokens.last() {
        Some(&Token::Weight(w)) => (&tokens[2..tokens.len() - 1], Some(w)),
        _ => (&tokens[2..], None),
    };
    if body.is_empty() {
        return Err(SyntaxError::EmptyExpression.into());
    }

    let expr = parse_expression(body, cap)?;
    let rules = expand(&expr, cap)
        .into_iter()
        .map(|rhs| match weight {
            Some(w) => Rule::with_weight(lhs.clone(), rhs, w),
            None => Rule::new(lhs.clone(), rhs),
        })
        .collect();

    Ok(rules)
}
