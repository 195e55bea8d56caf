//! Recursive-descent evaluator for keypad arithmetic.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := unary (('*' | '/') unary)*
//! unary      := ('+' | '-') unary | primary
//! primary    := number | '(' expression ')'
//! number     := digits ['.' digits] | '.' digits
//! ```
//!
//! Nothing outside this grammar is accepted, so there are no identifiers,
//! function calls or other ways to reach past plain arithmetic.

use super::error::EvaluationError;

/// Maximum nesting of parentheses and unary signs.
const MAX_DEPTH: usize = 256;

/// Parse and evaluate an arithmetic expression.
///
/// The returned value may be infinite or NaN (for example `1/(0)`);
/// callers decide how to treat non-finite results.
pub fn parse_and_evaluate(input: &str) -> Result<f64, EvaluationError> {
    let mut parser = Parser::new(input);
    let value = parser.expression()?;

    match parser.peek() {
        None => Ok(value),
        Some(found) => Err(EvaluationError::UnexpectedChar {
            found,
            position: parser.pos,
        }),
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn expression(&mut self) -> Result<f64, EvaluationError> {
        let mut value = self.term()?;

        loop {
            match self.peek() {
                Some('+') => {
                    self.bump();
                    value += self.term()?;
                }
                Some('-') => {
                    self.bump();
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, EvaluationError> {
        let mut value = self.unary()?;

        loop {
            match self.peek() {
                Some('*') => {
                    self.bump();
                    value *= self.unary()?;
                }
                Some('/') => {
                    self.bump();
                    value /= self.unary()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> Result<f64, EvaluationError> {
        match self.peek() {
            Some('+') => {
                self.bump();
                self.nested(Self::unary)
            }
            Some('-') => {
                self.bump();
                self.nested(Self::unary).map(|v| -v)
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<f64, EvaluationError> {
        match self.peek() {
            Some('(') => {
                self.bump();
                let value = self.nested(Self::expression)?;
                match self.peek() {
                    Some(')') => {
                        self.bump();
                        Ok(value)
                    }
                    Some(found) => Err(EvaluationError::UnexpectedChar {
                        found,
                        position: self.pos,
                    }),
                    None => Err(EvaluationError::UnexpectedEnd),
                }
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(found) => Err(EvaluationError::UnexpectedChar {
                found,
                position: self.pos,
            }),
            None => Err(EvaluationError::UnexpectedEnd),
        }
    }

    fn number(&mut self) -> Result<f64, EvaluationError> {
        let start = self.pos;
        self.skip_digits();
        if self.peek() == Some('.') {
            self.bump();
            self.skip_digits();
        }

        let literal = &self.input[start..self.pos];
        literal
            .parse::<f64>()
            .map_err(|_| EvaluationError::InvalidNumber(literal.to_string()))
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
    }

    fn nested(
        &mut self,
        rule: fn(&mut Self) -> Result<f64, EvaluationError>,
    ) -> Result<f64, EvaluationError> {
        if self.depth >= MAX_DEPTH {
            return Err(EvaluationError::TooDeep);
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(input: &str) -> f64 {
        parse_and_evaluate(input).unwrap()
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("2+3*4"), 14.0);
        assert_eq!(eval("2*3+4"), 10.0);
        assert_eq!(eval("10-6/2"), 7.0);
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(eval("8-3-2"), 3.0);
        assert_eq!(eval("8/4/2"), 1.0);
        assert_eq!(eval("2*3/4"), 1.5);
    }

    #[test]
    fn test_parentheses() {
        assert_eq!(eval("(2+3)*4"), 20.0);
        assert_eq!(eval("((1))"), 1.0);
        assert_eq!(eval("2*(3-(4+1))"), -4.0);
    }

    #[test]
    fn test_unary_signs() {
        assert_eq!(eval("-5"), -5.0);
        assert_eq!(eval("5+-3"), 2.0);
        assert_eq!(eval("5*-3"), -15.0);
        assert_eq!(eval("-(2+3)"), -5.0);
        assert_eq!(eval("+4"), 4.0);
    }

    #[test]
    fn test_decimal_literals() {
        assert_eq!(eval("2.5*2"), 5.0);
        assert_eq!(eval(".5+.5"), 1.0);
        assert_eq!(eval("5.+1"), 6.0);
        assert_eq!(eval("01"), 1.0);
    }

    #[test]
    fn test_non_finite_values_are_returned() {
        assert!(eval("1/(0)").is_infinite());
        assert!(eval("(0)/(0)").is_nan());
    }

    #[test]
    fn test_syntax_errors() {
        assert_eq!(parse_and_evaluate("5+"), Err(EvaluationError::UnexpectedEnd));
        assert_eq!(parse_and_evaluate(""), Err(EvaluationError::UnexpectedEnd));
        assert_eq!(parse_and_evaluate("(5"), Err(EvaluationError::UnexpectedEnd));
        assert_eq!(
            parse_and_evaluate("5)"),
            Err(EvaluationError::UnexpectedChar {
                found: ')',
                position: 1
            })
        );
        assert_eq!(
            parse_and_evaluate("()"),
            Err(EvaluationError::UnexpectedChar {
                found: ')',
                position: 1
            })
        );
        assert!(parse_and_evaluate("2(3)").is_err());
        assert!(parse_and_evaluate("1.2.3").is_err());
        assert_eq!(
            parse_and_evaluate("."),
            Err(EvaluationError::InvalidNumber(".".to_string()))
        );
    }

    #[test]
    fn test_rejects_non_arithmetic_text() {
        assert!(parse_and_evaluate("alert(1)").is_err());
        assert!(parse_and_evaluate("2^3").is_err());
    }

    #[test]
    fn test_deep_nesting_is_bounded() {
        let deep = format!("{}1{}", "(".repeat(1000), ")".repeat(1000));
        assert_eq!(parse_and_evaluate(&deep), Err(EvaluationError::TooDeep));

        let shallow = format!("{}1{}", "(".repeat(50), ")".repeat(50));
        assert_eq!(parse_and_evaluate(&shallow), Ok(1.0));
    }
}
