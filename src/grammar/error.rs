//! Error types for grammar notation compilation

use std::fmt;

/// An unrecognized character in a grammar notation line.
///
/// Lexical errors are fatal; there is no recovery or resynchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalError {
    /// The offending character
    pub found: char,
    /// Byte offset of the character within the line
    pub offset: usize,
}

impl fmt::Display for LexicalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unexpected character '{}' at offset {}",
            self.found, self.offset
        )
    }
}

impl std::error::Error for LexicalError {}

/// A structurally malformed rule notation line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// The line does not begin with `LHS ->`
    MissingArrow,
    /// No expression between the arrow and the optional weight
    EmptyExpression,
    /// A `)` without a matching `(`, or end of line inside a group
    UnbalancedGroup,
    /// A quantifier or `|` with no operand to attach to
    DanglingOperator(String),
    /// A repetition range whose lower bound exceeds its (cap-clamped) upper bound
    InvalidRepetition { min: usize, max: usize },
    /// A token that cannot appear at this position (e.g. a second arrow,
    /// or anything after the trailing weight)
    UnexpectedToken(String),
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::MissingArrow => {
                write!(f, "rule must begin with a symbol followed by '->'")
            }
            SyntaxError::EmptyExpression => write!(f, "rule has no right-hand side expression"),
            SyntaxError::UnbalancedGroup => write!(f, "unbalanced parentheses"),
            SyntaxError::DanglingOperator(op) => {
                write!(f, "operator '{}' has nothing to apply to", op)
            }
            SyntaxError::InvalidRepetition { min, max } => {
                write!(f, "repetition range {{{},{}}} is empty", min, max)
            }
            SyntaxError::UnexpectedToken(token) => write!(f, "unexpected '{}'", token),
        }
    }
}

impl std::error::Error for SyntaxError {}

/// Any failure while compiling a single notation line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    Lexical(LexicalError),
    Syntax(SyntaxError),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Lexical(e) => write!(f, "{}", e),
            CompileError::Syntax(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CompileError {}

impl From<LexicalError> for CompileError {
    fn from(e: LexicalError) -> Self {
        CompileError::Lexical(e)
    }
}

impl From<SyntaxError> for CompileError {
    fn from(e: SyntaxError) -> Self {
        CompileError::Syntax(e)
    }
}

/// A grammar whose nonterminal dependencies admit no application order.
///
/// Detected while constructing the [`Grammar`](super::Grammar), before any
/// graph work begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The named nonterminals depend on each other cyclically
    CyclicDependency { symbols: Vec<String> },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::CyclicDependency { symbols } => {
                write!(
                    f,
                    "cyclic dependency among nonterminals: {}",
                    symbols.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// Top-level error for building a grammar from notation source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// A notation line failed to compile; `line` is 1-based
    Compile { line: usize, error: CompileError },
    Configuration(ConfigurationError),
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::Compile { line, error } => write!(f, "line {}: {}", line, error),
            GrammarError::Configuration(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for GrammarError {}

impl From<ConfigurationError> for GrammarError {
    fn from(e: ConfigurationError) -> Self {
        GrammarError::Configuration(e)
    }
}
