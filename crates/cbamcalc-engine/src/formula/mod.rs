//! Formula engine API.
//!
//! This module provides the arithmetic formula pipeline:
//!
//! - [`tokenize`] - Split a formula string into tokens
//! - [`Expr`] - Tagged-union AST built by the recursive-descent parser
//! - [`evaluate`] / [`try_evaluate`] - Evaluate a formula over named variables
//! - [`validate_formula`] - Check a formula against a set of known parameter keys
//! - [`extract_variables`] - List identifiers in order of first appearance

mod ast;
mod eval;
mod parse;
mod token;

pub use ast::{BinOp, Expr};
pub use eval::{
    Evaluation, Validation, evaluate, extract_variables, try_evaluate, validate_formula,
};
pub use parse::parse;
pub use token::{Token, tokenize};

use thiserror::Error;

/// Errors raised while tokenizing, parsing or evaluating a formula.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("malformed number '{text}' at position {pos}")]
    MalformedNumber { text: String, pos: usize },

    #[error("unexpected end of formula")]
    UnexpectedEnd,

    #[error("unexpected token '{token}'")]
    UnexpectedToken { token: String },

    #[error("unknown variable '{name}'")]
    UnknownVariable { name: String },

    #[error("formula result is not a finite number")]
    NonFinite,
}
