//! Scalar evaluation during parsing.
use crate::{BinOp, ProdID, SemanticAction, StateID, TokenID};
use lrpost::{ActionError, ConversionError, ParserEvent};

/// Computes the value of an expression directly, without building a tree.
///
/// Every category is an `i64`. Arithmetic is checked: overflow and division
/// by zero make the constructor fail, which ends the parse with
/// [`CalcError::Action`](crate::CalcError::Action).
///
/// ```rust
/// # use lrpost_calc::{CalcParser, Evaluator};
/// let mut parser = CalcParser::new(Evaluator::new());
/// assert_eq!(parser.parse("2 * (3 + 4)"), Ok(14));
/// assert_eq!(parser.parse("10 / 3 - 1"), Ok(2));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    fn binary(
        &self,
        action: &'static str,
        op: BinOp,
        lhs: i64,
        rhs: i64,
    ) -> Result<i64, ActionError> {
        let value = op
            .apply(lhs, rhs)
            .map_err(|err| ActionError::failed(action, err.to_string()))?;
        log::debug!("{} {} {} = {}", lhs, op, rhs, value);
        Ok(value)
    }
}

impl SemanticAction for Evaluator {
    type Value = i64;
    type Expr = i64;
    type Term = i64;
    type Factor = i64;

    fn from_expr(&self, expr: i64) -> i64 {
        expr
    }
    fn to_expr(&self, value: i64) -> Result<i64, ConversionError> {
        Ok(value)
    }
    fn from_term(&self, term: i64) -> i64 {
        term
    }
    fn to_term(&self, value: i64) -> Result<i64, ConversionError> {
        Ok(value)
    }
    fn from_factor(&self, factor: i64) -> i64 {
        factor
    }
    fn to_factor(&self, value: i64) -> Result<i64, ConversionError> {
        Ok(value)
    }
    fn from_number(&self, value: i64) -> i64 {
        value
    }
    fn to_number(&self, value: i64) -> Result<i64, ConversionError> {
        Ok(value)
    }

    fn make_add(&mut self, lhs: i64, rhs: i64) -> Result<i64, ActionError> {
        self.binary("add", BinOp::Add, lhs, rhs)
    }

    fn make_sub(&mut self, lhs: i64, rhs: i64) -> Result<i64, ActionError> {
        self.binary("sub", BinOp::Sub, lhs, rhs)
    }

    fn make_expr(&mut self, term: i64) -> Result<i64, ActionError> {
        Ok(term)
    }

    fn make_mul(&mut self, lhs: i64, rhs: i64) -> Result<i64, ActionError> {
        self.binary("mul", BinOp::Mul, lhs, rhs)
    }

    fn make_div(&mut self, lhs: i64, rhs: i64) -> Result<i64, ActionError> {
        self.binary("div", BinOp::Div, lhs, rhs)
    }

    fn make_term(&mut self, factor: i64) -> Result<i64, ActionError> {
        Ok(factor)
    }

    fn make_number(&mut self, value: i64) -> Result<i64, ActionError> {
        log::debug!("number {}", value);
        Ok(value)
    }

    fn make_group(&mut self, expr: i64) -> Result<i64, ActionError> {
        Ok(expr)
    }

    fn syntax_error(&mut self, token_id: TokenID, expected: &[TokenID]) {
        log::debug!("syntax error on {:?}, expected {:?}", token_id, expected);
    }

    fn stack_overflow(&mut self) {
        log::debug!("stack overflow");
    }

    fn log(&mut self, event: &ParserEvent<StateID, TokenID, ProdID>) {
        log::trace!("{:?}", event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CalcError, evaluate};

    #[test]
    fn evaluates_with_precedence_and_associativity() {
        assert_eq!(evaluate("3+4*2"), Ok(11));
        assert_eq!(evaluate("(3+4)*2"), Ok(14));
        assert_eq!(evaluate("10-4-3"), Ok(3));
        assert_eq!(evaluate("64/4/2"), Ok(8));
        assert_eq!(evaluate("7 / 2 * 2"), Ok(6));
    }

    #[test]
    fn division_by_zero_fails_the_action() {
        assert_eq!(
            evaluate("1 / (3 - 3)"),
            Err(CalcError::Action(ActionError::failed(
                "div",
                "division by zero"
            )))
        );
    }

    #[test]
    fn overflow_fails_the_action() {
        let err = evaluate("9223372036854775807 + 1").unwrap_err();
        assert_eq!(err.to_string(), "add: integer overflow in `+`");
    }
}
