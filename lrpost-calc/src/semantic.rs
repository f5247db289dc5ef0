//! Typed semantic actions for the calculator grammar.
//!
//! [`SemanticAction`] is the grammar-specific contract: one constructor per
//! production plus the conversions between the stack carrier and each
//! category. [`CalcDriver`] adapts any implementation to the engine's
//! [`ParserDriver`], popping and converting the right-hand-side values for
//! each reduction.
use crate::parser_data::{ParData, ProdID, StateID, TokenID};
use lrpost::{ActionError, Args, ConversionError, ParserDriver, ParserEvent, ParserTokenID};
use std::fmt::Debug;

/// Semantic actions for
///
/// ```text
/// Expr   -> Expr + Term | Expr - Term | Term
/// Term   -> Term * Factor | Term / Factor | Factor
/// Factor -> number | ( Expr )
/// ```
///
/// `Value` is the carrier stored on the parser stack; `Expr`, `Term` and
/// `Factor` are the concrete types of each nonterminal. Number literals are
/// plain `i64`s.
pub trait SemanticAction {
    type Value: Debug;
    type Expr;
    type Term;
    type Factor;

    fn from_expr(&self, expr: Self::Expr) -> Self::Value;
    fn to_expr(&self, value: Self::Value) -> Result<Self::Expr, ConversionError>;
    fn from_term(&self, term: Self::Term) -> Self::Value;
    fn to_term(&self, value: Self::Value) -> Result<Self::Term, ConversionError>;
    fn from_factor(&self, factor: Self::Factor) -> Self::Value;
    fn to_factor(&self, value: Self::Value) -> Result<Self::Factor, ConversionError>;
    fn from_number(&self, value: i64) -> Self::Value;
    fn to_number(&self, value: Self::Value) -> Result<i64, ConversionError>;

    /// `Expr -> Expr + Term`
    fn make_add(&mut self, lhs: Self::Expr, rhs: Self::Term) -> Result<Self::Expr, ActionError>;
    /// `Expr -> Expr - Term`
    fn make_sub(&mut self, lhs: Self::Expr, rhs: Self::Term) -> Result<Self::Expr, ActionError>;
    /// `Expr -> Term`
    fn make_expr(&mut self, term: Self::Term) -> Result<Self::Expr, ActionError>;
    /// `Term -> Term * Factor`
    fn make_mul(&mut self, lhs: Self::Term, rhs: Self::Factor) -> Result<Self::Term, ActionError>;
    /// `Term -> Term / Factor`
    fn make_div(&mut self, lhs: Self::Term, rhs: Self::Factor) -> Result<Self::Term, ActionError>;
    /// `Term -> Factor`
    fn make_term(&mut self, factor: Self::Factor) -> Result<Self::Term, ActionError>;
    /// `Factor -> number`
    fn make_number(&mut self, value: i64) -> Result<Self::Factor, ActionError>;
    /// `Factor -> ( Expr )`
    fn make_group(&mut self, expr: Self::Expr) -> Result<Self::Factor, ActionError>;

    fn syntax_error(&mut self, token_id: TokenID, expected: &[TokenID]);
    fn stack_overflow(&mut self);
    fn log(&mut self, _event: &ParserEvent<StateID, TokenID, ProdID>) {}
}

/// Runs a [`SemanticAction`] as the parser's [`ParserDriver`].
#[derive(Debug, Default)]
pub struct CalcDriver<A> {
    actions: A,
}

impl<A> CalcDriver<A> {
    pub fn new(actions: A) -> Self {
        Self { actions }
    }

    pub fn actions(&self) -> &A {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut A {
        &mut self.actions
    }

    pub fn into_actions(self) -> A {
        self.actions
    }
}

impl<A> ParserDriver for CalcDriver<A>
where
    A: SemanticAction,
{
    type ParserData = ParData;
    type Value = A::Value;
    type Payload = i64;

    fn shift(
        &mut self,
        token_id: TokenID,
        payload: Option<i64>,
    ) -> Result<Option<A::Value>, ActionError> {
        match token_id {
            TokenID::Number => {
                let value = payload.ok_or(ConversionError::MissingPayload {
                    token: token_id.label(),
                })?;
                Ok(Some(self.actions.from_number(value)))
            }
            _ => Ok(None),
        }
    }

    fn reduce(
        &mut self,
        prod_id: ProdID,
        mut args: Args<A::Value>,
    ) -> Result<A::Value, ActionError> {
        let actions = &mut self.actions;
        let value = match prod_id {
            ProdID::Start => {
                // Start -> Expr
                // Accept - does not get reduced
                args.take(0)?
            }
            ProdID::Add => {
                // Expr -> Expr + Term
                let lhs = actions.to_expr(args.take(0)?)?;
                let rhs = actions.to_term(args.take(2)?)?;
                let expr = actions.make_add(lhs, rhs)?;
                actions.from_expr(expr)
            }
            ProdID::Sub => {
                // Expr -> Expr - Term
                let lhs = actions.to_expr(args.take(0)?)?;
                let rhs = actions.to_term(args.take(2)?)?;
                let expr = actions.make_sub(lhs, rhs)?;
                actions.from_expr(expr)
            }
            ProdID::Expr => {
                // Expr -> Term
                let term = actions.to_term(args.take(0)?)?;
                let expr = actions.make_expr(term)?;
                actions.from_expr(expr)
            }
            ProdID::Mul => {
                // Term -> Term * Factor
                let lhs = actions.to_term(args.take(0)?)?;
                let rhs = actions.to_factor(args.take(2)?)?;
                let term = actions.make_mul(lhs, rhs)?;
                actions.from_term(term)
            }
            ProdID::Div => {
                // Term -> Term / Factor
                let lhs = actions.to_term(args.take(0)?)?;
                let rhs = actions.to_factor(args.take(2)?)?;
                let term = actions.make_div(lhs, rhs)?;
                actions.from_term(term)
            }
            ProdID::Term => {
                // Term -> Factor
                let factor = actions.to_factor(args.take(0)?)?;
                let term = actions.make_term(factor)?;
                actions.from_term(term)
            }
            ProdID::Number => {
                // Factor -> number
                let value = actions.to_number(args.take(0)?)?;
                let factor = actions.make_number(value)?;
                actions.from_factor(factor)
            }
            ProdID::Group => {
                // Factor -> ( Expr )
                let expr = actions.to_expr(args.take(1)?)?;
                let factor = actions.make_group(expr)?;
                actions.from_factor(factor)
            }
        };
        Ok(value)
    }

    fn syntax_error(&mut self, _state: StateID, token_id: TokenID, expected: &[TokenID]) {
        self.actions.syntax_error(token_id, expected);
    }

    fn stack_overflow(&mut self) {
        self.actions.stack_overflow();
    }

    fn trace(&mut self, event: &ParserEvent<StateID, TokenID, ProdID>) {
        self.actions.log(event);
    }
}
