//! cbamcalc-engine - closed arithmetic formula engine.
//!
//! Evaluates user-authored arithmetic formulas over named variables without
//! any host-language execution path: only the four arithmetic operators,
//! exponentiation and named lookups are interpretable.

pub mod formula;

pub use formula::{
    Evaluation, FormulaError, Validation, evaluate, extract_variables, try_evaluate,
    validate_formula,
};
