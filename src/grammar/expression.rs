//! Rule expression parsing and expansion
//!
//! A rule's right-hand side is parsed by recursive descent into a single
//! expression sum type, then expanded into the finite set of concrete symbol
//! sequences the rule accepts. Quantifiers are postfix and bind to the
//! immediately preceding unit; `|` folds left-to-right over the two adjacent
//! units, binding tighter than sequence (so `a | b c` accepts `a c` and
//! `b c`). Every repetition range is bounded by the repetition cap, which
//! guarantees that expansion terminates.

use super::error::SyntaxError;
use super::tokens::Token;
use std::collections::HashSet;

/// The fixed finite bound standing in for "unbounded" repetition (`*`, `+`).
pub const DEFAULT_REPETITION_CAP: usize = 10;

/// A parsed rule expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleExpr {
    /// A terminal or nonterminal name
    Symbol(String),
    /// Ordered concatenation of sub-expressions
    Sequence(Vec<RuleExpr>),
    /// Bounded repetition of one unit; `min <= max <= cap` holds after parsing
    Repeat {
        inner: Box<RuleExpr>,
        min: usize,
        max: usize,
    },
    /// Two or more alternative branches
    Alternation(Vec<RuleExpr>),
}

/// Parse the expression tokens of one rule body.
///
/// `tokens` must not contain the leading `LHS ->` or the trailing weight;
/// the caller strips those. `cap` bounds `*` and `+` and clamps explicit
/// `{m,n}` ranges.
pub fn parse_expression(tokens: &[Token], cap: usize) -> Result<RuleExpr, SyntaxError> {
    let mut parser = Parser { tokens, pos: 0, cap };
    let items = parser.parse_items(false)?;
    if parser.pos < tokens.len() {
        // only a stray `)` can leave tokens behind at top level
        return Err(SyntaxError::UnbalancedGroup);
    }
    Ok(RuleExpr::Sequence(items))
}

/// An element of a partially-parsed sequence: either a finished unit or a
/// not-yet-folded alternation bar.
enum Item {
    Expr(RuleExpr),
    Bar,
}

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    cap: usize,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    /// Parse a run of units until end of input or, inside a group, the
    /// closing parenthesis. Returns the fully folded sequence children.
    fn parse_items(&mut self, in_group: bool) -> Result<Vec<RuleExpr>, SyntaxError> {
        let mut items: Vec<Item> = Vec::new();

        loop {
            match self.peek() {
                None => {
                    if in_group {
                        return Err(SyntaxError::UnbalancedGroup);
                    }
                    break;
                }
                Some(Token::CloseParen) => {
                    if !in_group {
                        break;
                    }
                    self.bump();
                    break;
                }
                Some(Token::OpenParen) => {
                    self.bump();
                    let inner = self.parse_items(true)?;
                    items.push(Item::Expr(RuleExpr::Sequence(inner)));
                }
                Some(Token::Ident(name)) => {
                    let symbol = RuleExpr::Symbol(name.clone());
                    self.bump();
                    items.push(Item::Expr(symbol));
                }
                Some(Token::Question) => {
                    self.bump();
                    self.apply_repetition(&mut items, 0, 1, "?")?;
                }
                Some(Token::Star) => {
                    self.bump();
                    self.apply_repetition(&mut items, 0, self.cap, "*")?;
                }
                Some(Token::Plus) => {
                    self.bump();
                    self.apply_repetition(&mut items, 1, self.cap, "+")?;
                }
                Some(&Token::Repetition((min, max))) => {
                    self.bump();
                    let max = max.min(self.cap);
                    if min > max {
                        return Err(SyntaxError::InvalidRepetition { min, max });
                    }
                    self.apply_repetition(&mut items, min, max, "{m,n}")?;
                }
                Some(Token::Pipe) => {
                    match items.last() {
                        Some(Item::Expr(_)) => {}
                        _ => return Err(SyntaxError::DanglingOperator("|".to_string())),
                    }
                    self.bump();
                    items.push(Item::Bar);
                }
                Some(token @ (Token::Arrow | Token::Weight(_))) => {
                    return Err(SyntaxError::UnexpectedToken(token.describe()));
                }
            }
        }

        fold_alternations(items)
    }

    /// Wrap the most recent unit in a repetition range.
    fn apply_repetition(
        &self,
        items: &mut [Item],
        min: usize,
        max: usize,
        operator: &str,
    ) -> Result<(), SyntaxError> {
        match items.last_mut() {
            Some(Item::Expr(target)) => {
                let inner = std::mem::replace(target, RuleExpr::Sequence(Vec::new()));
                *target = RuleExpr::Repeat {
                    inner: Box::new(inner),
                    min,
                    max,
                };
                Ok(())
            }
            _ => Err(SyntaxError::DanglingOperator(operator.to_string())),
        }
    }
}

/// Fold bar markers into binary alternations, left to right. Each bar
/// combines the unit before it with the unit after it; chained bars
/// left-associate, so `a | b | c` becomes `((a | b) | c)`.
fn fold_alternations(items: Vec<Item>) -> Result<Vec<RuleExpr>, SyntaxError> {
    let mut out: Vec<RuleExpr> = Vec::new();
    let mut iter = items.into_iter();

    while let Some(item) = iter.next() {
        match item {
            Item::Expr(expr) => out.push(expr),
            Item::Bar => {
                // parse_items only pushes a bar after a unit
                let left = match out.pop() {
                    Some(expr) => expr,
                    None => return Err(SyntaxError::DanglingOperator("|".to_string())),
                };
                let right = match iter.next() {
                    Some(Item::Expr(expr)) => expr,
                    _ => return Err(SyntaxError::DanglingOperator("|".to_string())),
                };
                out.push(RuleExpr::Alternation(vec![left, right]));
            }
        }
    }

    Ok(out)
}

/// Expand an expression into its concrete symbol sequences.
///
/// The result is deduplicated preserving first-seen order, so compilation is
/// deterministic. `cap` re-clamps repetition upper bounds; parsed expressions
/// already satisfy the bound, so this matters only for hand-built trees.
pub fn expand(expr: &RuleExpr, cap: usize) -> Vec<Vec<String>> {
    let sequences = match expr {
        RuleExpr::Symbol(name) => vec![vec![name.clone()]],
        RuleExpr::Sequence(children) => {
            let mut acc: Vec<Vec<String>> = vec![Vec::new()];
            for child in children {
                acc = cartesian(acc, &expand(child, cap));
            }
            acc
        }
        RuleExpr::Alternation(branches) => branches
            .iter()
            .flat_map(|branch| expand(branch, cap))
            .collect(),
        RuleExpr::Repeat { inner, min, max } => {
            let inner_sequences = expand(inner, cap);
            let mut out = Vec::new();
            for count in *min..=(*max).min(cap) {
                let mut acc: Vec<Vec<String>> = vec![Vec::new()];
                for _ in 0..count {
                    acc = cartesian(acc, &inner_sequences);
                }
                out.extend(acc);
            }
            out
        }
    };

    dedup_preserving_order(sequences)
}

/// Concatenate every prefix with every suffix.
fn cartesian(prefixes: Vec<Vec<String>>, suffixes: &[Vec<String>]) -> Vec<Vec<String>> {
    let mut out = Vec::with_capacity(prefixes.len() * suffixes.len().max(1));
    for prefix in &prefixes {
        for suffix in suffixes {
            let mut sequence = prefix.clone();
            sequence.extend_from_slice(suffix);
            out.push(sequence);
        }
    }
    out
}

fn dedup_preserving_order(sequences: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let mut seen = HashSet::new();
    sequences
        .into_iter()
        .filter(|sequence| seen.insert(sequence.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::tokens::tokenize;

    const CAP: usize = DEFAULT_REPETITION_CAP;

    fn parse(source: &str) -> Result<RuleExpr, SyntaxError> {
        let tokens: Vec<Token> = tokenize(source)
            .unwrap()
            .into_iter()
            .map(|(t, _)| t)
            .collect();
        parse_expression(&tokens, CAP)
    }

    fn expansions(source: &str) -> Vec<Vec<String>> {
        expand(&parse(source).unwrap(), CAP)
    }

    fn seq(symbols: &[&str]) -> Vec<String> {
        symbols.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_plain_sequence_is_single_expansion() {
        assert_eq!(expansions("a b c"), vec![seq(&["a", "b", "c"])]);
    }

    #[test]
    fn test_optional_expands_to_two() {
        assert_eq!(expansions("a?"), vec![seq(&[]), seq(&["a"])]);
    }

    #[test]
    fn test_star_expands_to_all_lengths_up_to_cap() {
        let result = expansions("a*");
        assert_eq!(result.len(), CAP + 1);
        for (count, sequence) in result.iter().enumerate() {
            assert_eq!(sequence.len(), count);
            assert!(sequence.iter().all(|symbol| symbol == "a"));
        }
    }

    #[test]
    fn test_plus_expands_from_one_to_cap() {
        let result = expansions("a+");
        assert_eq!(result.len(), CAP);
        assert_eq!(result[0], seq(&["a"]));
        assert_eq!(result[CAP - 1].len(), CAP);
    }

    #[test]
    fn test_alternation_expands_to_branches() {
        assert_eq!(expansions("a | b"), vec![seq(&["a"]), seq(&["b"])]);
    }

    #[test]
    fn test_alternation_binds_tighter_than_sequence() {
        // `a | b c` alternates only the units adjacent to the bar
        assert_eq!(
            expansions("a | b c"),
            vec![seq(&["a", "c"]), seq(&["b", "c"])]
        );
    }

    #[test]
    fn test_chained_alternation_left_associates() {
        assert_eq!(
            expansions("a | b | c"),
            vec![seq(&["a"]), seq(&["b"]), seq(&["c"])]
        );
    }

    #[test]
    fn test_group_is_one_unit() {
        assert_eq!(
            expansions("(a b) | c"),
            vec![seq(&["a", "b"]), seq(&["c"])]
        );
    }

    #[test]
    fn test_bounded_repetition() {
        assert_eq!(
            expansions("a{2,4}"),
            vec![
                seq(&["a", "a"]),
                seq(&["a", "a", "a"]),
                seq(&["a", "a", "a", "a"]),
            ]
        );
    }

    #[test]
    fn test_repeated_group() {
        assert_eq!(
            expansions("(a b){1,2}"),
            vec![seq(&["a", "b"]), seq(&["a", "b", "a", "b"])]
        );
    }

    #[test]
    fn test_repeated_alternation_deduplicates() {
        // (a | a){1,1} collapses to one sequence
        assert_eq!(expansions("(a | a)"), vec![seq(&["a"])]);
    }

    #[test]
    fn test_optional_group_in_context() {
        assert_eq!(
            expansions("a (b c)? d"),
            vec![seq(&["a", "d"]), seq(&["a", "b", "c", "d"])]
        );
    }

    #[test]
    fn test_nested_groups() {
        assert_eq!(
            expansions("((a | b) c)?"),
            vec![seq(&[]), seq(&["a", "c"]), seq(&["b", "c"])]
        );
    }

    #[test]
    fn test_quantifier_after_alternation_applies_to_the_fold() {
        // the bar folds as soon as its right unit is parsed, so a trailing
        // quantifier sees the whole alternation
        assert_eq!(
            expansions("(a | b){2,2}"),
            vec![
                seq(&["a", "a"]),
                seq(&["a", "b"]),
                seq(&["b", "a"]),
                seq(&["b", "b"]),
            ]
        );
    }

    #[test]
    fn test_leading_quantifier_is_dangling() {
        assert_eq!(
            parse("* a").unwrap_err(),
            SyntaxError::DanglingOperator("*".to_string())
        );
    }

    #[test]
    fn test_quantifier_after_bar_is_dangling() {
        assert_eq!(
            parse("a | * b").unwrap_err(),
            SyntaxError::DanglingOperator("*".to_string())
        );
    }

    #[test]
    fn test_trailing_bar_is_dangling() {
        assert_eq!(
            parse("a |").unwrap_err(),
            SyntaxError::DanglingOperator("|".to_string())
        );
    }

    #[test]
    fn test_leading_bar_is_dangling() {
        assert_eq!(
            parse("| a").unwrap_err(),
            SyntaxError::DanglingOperator("|".to_string())
        );
    }

    #[test]
    fn test_unclosed_group() {
        assert_eq!(parse("(a b").unwrap_err(), SyntaxError::UnbalancedGroup);
    }

    #[test]
    fn test_stray_close_paren() {
        assert_eq!(parse("a b)").unwrap_err(), SyntaxError::UnbalancedGroup);
    }

    #[test]
    fn test_empty_repetition_range() {
        assert_eq!(
            parse("a{3,1}").unwrap_err(),
            SyntaxError::InvalidRepetition { min: 3, max: 1 }
        );
    }

    #[test]
    fn test_explicit_range_clamps_to_cap() {
        let result = expansions("a{9,99}");
        assert_eq!(result.len(), CAP - 9 + 1);
        assert_eq!(result.last().unwrap().len(), CAP);
    }
}
