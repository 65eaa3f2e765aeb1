//! Grammar notation compiler and compiled grammars
//!
//! This module turns the compact regex-like rule notation into concrete
//! rules and grammars:
//!
//! - **tokens**: logos-based tokenization of one notation line
//! - **expression**: recursive-descent parsing into a rule expression, and
//!   expansion of that expression into concrete symbol sequences
//! - **compiler**: `LHS -> EXPR [: WEIGHT]` lines into [`Rule`] sets
//! - **rules**: [`Rule`] and [`Grammar`], including the nonterminal
//!   application order with explicit cycle rejection

pub mod compiler;
pub mod error;
pub mod expression;
pub mod rules;
pub mod tokens;

pub use compiler::{compile_rule, compile_rule_with};
pub use error::{CompileError, ConfigurationError, GrammarError, LexicalError, SyntaxError};
pub use expression::{RuleExpr, DEFAULT_REPETITION_CAP};
pub use rules::{Grammar, Rule};
