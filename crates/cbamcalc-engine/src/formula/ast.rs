//! Formula AST and its post-order evaluator.

use std::collections::HashMap;

use super::FormulaError;

/// Binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// A parsed formula expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(String),
    /// Unary negation.
    Neg(Box<Expr>),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    /// Evaluate the expression with a post-order walk over the tree.
    ///
    /// Division by zero is not trapped here; the resulting infinity or NaN
    /// is caught by the caller's finiteness check on the final value.
    pub fn eval(&self, variables: &HashMap<String, f64>) -> Result<f64, FormulaError> {
        match self {
            Expr::Number(n) => Ok(*n),
            Expr::Variable(name) => variables.get(name).copied().ok_or_else(|| {
                FormulaError::UnknownVariable { name: name.clone() }
            }),
            Expr::Neg(inner) => Ok(-inner.eval(variables)?),
            Expr::Binary { op, lhs, rhs } => {
                let l = lhs.eval(variables)?;
                let r = rhs.eval(variables)?;
                Ok(match op {
                    BinOp::Add => l + r,
                    BinOp::Sub => l - r,
                    BinOp::Mul => l * r,
                    BinOp::Div => l / r,
                    BinOp::Pow => l.powf(r),
                })
            }
        }
    }
}
