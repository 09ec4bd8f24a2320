//! Formula evaluation entry points.
//!
//! [`evaluate`] is the outcome-shaped API the emission engine consumes: a
//! serializable value-or-error pair that never panics and never returns a
//! non-finite number. [`try_evaluate`] is the typed inner entry point.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::FormulaError;
use super::parse::parse;
use super::token::{Token, scan, tokenize};

/// Result of evaluating a formula: exactly one of `value` and `error` is
/// set. An empty or all-whitespace formula is a deliberately inert block
/// and evaluates to 0 with no error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub value: Option<f64>,
    pub error: Option<String>,
}

impl Evaluation {
    /// The computed value, or 0 when the formula failed.
    pub fn value_or_zero(&self) -> f64 {
        self.value.unwrap_or(0.0)
    }
}

/// Result of validating a formula against a set of known parameter keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validation {
    pub valid: bool,
    pub error: Option<String>,
    /// Identifiers referenced by the formula that are not known keys,
    /// in order of first appearance.
    pub unknown_variables: Vec<String>,
}

/// Evaluate a formula over named variables.
pub fn try_evaluate(
    formula: &str,
    variables: &HashMap<String, f64>,
) -> Result<f64, FormulaError> {
    if formula.trim().is_empty() {
        return Ok(0.0);
    }
    let tokens = tokenize(formula)?;
    let expr = parse(&tokens)?;
    let value = expr.eval(variables)?;
    if !value.is_finite() {
        return Err(FormulaError::NonFinite);
    }
    Ok(value)
}

/// Evaluate a formula, folding any error into the outcome rather than
/// propagating it.
pub fn evaluate(formula: &str, variables: &HashMap<String, f64>) -> Evaluation {
    match try_evaluate(formula, variables) {
        Ok(value) => Evaluation {
            value: Some(value),
            error: None,
        },
        Err(err) => Evaluation {
            value: None,
            error: Some(err.to_string()),
        },
    }
}

/// Validate a formula against known parameter keys by evaluating it with a
/// dummy value of 1 substituted for every known key. Identifiers outside
/// `known_keys` are reported separately.
pub fn validate_formula(formula: &str, known_keys: &[&str]) -> Validation {
    let dummies: HashMap<String, f64> =
        known_keys.iter().map(|k| (k.to_string(), 1.0)).collect();
    let unknown_variables: Vec<String> = extract_variables(formula)
        .into_iter()
        .filter(|name| !dummies.contains_key(name))
        .collect();

    match try_evaluate(formula, &dummies) {
        Ok(_) => Validation {
            valid: true,
            error: None,
            unknown_variables,
        },
        Err(err) => Validation {
            valid: false,
            error: Some(err.to_string()),
            unknown_variables,
        },
    }
}

/// Extract the identifiers a formula references, de-duplicated, in order of
/// first appearance. Tolerates broken formulas: identifiers read before the
/// first tokenizer error are still returned.
pub fn extract_variables(formula: &str) -> Vec<String> {
    let (tokens, _) = scan(formula);
    let mut seen = Vec::new();
    for token in tokens {
        if let Token::Ident(name) = token
            && !seen.contains(&name)
        {
            seen.push(name);
        }
    }
    seen
}
