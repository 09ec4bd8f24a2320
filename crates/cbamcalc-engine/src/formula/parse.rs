//! Recursive-descent formula parser.
//!
//! Grammar, left-associative except exponentiation:
//!
//! ```text
//! expression := term (('+'|'-') term)*
//! term       := unary (('*'|'/') unary)*
//! unary      := '-' unary | power
//! power      := primary ('^' unary)?     // right-associative
//! primary    := NUMBER | IDENT | '(' expression ')'
//! ```
//!
//! Unary minus binds looser than the exponent, so `-2^2` parses as
//! `-(2^2)`.

use super::FormulaError;
use super::ast::{BinOp, Expr};
use super::token::Token;

/// Parse a token stream into an expression tree. The whole stream must be
/// consumed; a trailing token is an error.
pub fn parse(tokens: &[Token]) -> Result<Expr, FormulaError> {
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.expression()?;
    match parser.peek() {
        Some(token) => Err(FormulaError::UnexpectedToken {
            token: token.to_string(),
        }),
        None => Ok(expr),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expression(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, FormulaError> {
        if self.eat(&Token::Minus) {
            let inner = self.unary()?;
            return Ok(Expr::Neg(Box::new(inner)));
        }
        self.power()
    }

    fn power(&mut self) -> Result<Expr, FormulaError> {
        let base = self.primary()?;
        if self.eat(&Token::Caret) {
            // The exponent re-enters `unary` so `2^-3` parses and `2^3^2`
            // associates to the right.
            let exponent = self.unary()?;
            return Ok(Expr::Binary {
                op: BinOp::Pow,
                lhs: Box::new(base),
                rhs: Box::new(exponent),
            });
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, FormulaError> {
        let Some(token) = self.advance().cloned() else {
            return Err(FormulaError::UnexpectedEnd);
        };
        match token {
            Token::Number(n) => Ok(Expr::Number(n)),
            Token::Ident(name) => Ok(Expr::Variable(name)),
            Token::LParen => {
                let expr = self.expression()?;
                if self.eat(&Token::RParen) {
                    Ok(expr)
                } else {
                    match self.peek() {
                        Some(token) => Err(FormulaError::UnexpectedToken {
                            token: token.to_string(),
                        }),
                        None => Err(FormulaError::UnexpectedEnd),
                    }
                }
            }
            token => Err(FormulaError::UnexpectedToken {
                token: token.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::token::tokenize;
    use super::*;

    fn parse_str(formula: &str) -> Result<Expr, FormulaError> {
        parse(&tokenize(formula)?)
    }

    #[test]
    fn test_parse_precedence() {
        // 2+3*4 must parse as 2+(3*4)
        let expr = parse_str("2+3*4").unwrap();
        match expr {
            Expr::Binary {
                op: BinOp::Add,
                rhs,
                ..
            } => assert!(matches!(*rhs, Expr::Binary { op: BinOp::Mul, .. })),
            other => panic!("expected addition at root, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_unary_minus_binds_looser_than_power() {
        let expr = parse_str("-2^2").unwrap();
        match expr {
            Expr::Neg(inner) => assert!(matches!(*inner, Expr::Binary { op: BinOp::Pow, .. })),
            other => panic!("expected negation at root, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_dangling_operator() {
        assert_eq!(parse_str("a+"), Err(FormulaError::UnexpectedEnd));
    }

    #[test]
    fn test_parse_trailing_token() {
        assert_eq!(
            parse_str("1 2"),
            Err(FormulaError::UnexpectedToken { token: "2".into() })
        );
    }

    #[test]
    fn test_parse_unbalanced_paren() {
        assert_eq!(parse_str("(1+2"), Err(FormulaError::UnexpectedEnd));
        assert_eq!(
            parse_str("1+2)"),
            Err(FormulaError::UnexpectedToken { token: ")".into() })
        );
    }
}
