//! # Calculator Error Types
//!
//! This module defines [`CalcError`], the single error surface of
//! [`CalcParser::parse`](crate::CalcParser::parse), and [`EvalError`], the
//! arithmetic failures of evaluating a syntax tree.
//!
//! [`CalcError`] keeps the stages apart:
//!
//! - **Lexical**: [`CalcError::Scan`] wraps the scanner's [`ScanError`].
//! - **Parser-level**: [`CalcError::Syntax`], [`CalcError::StackOverflow`],
//!   [`CalcError::Action`] (a semantic action refused, e.g. division by zero
//!   in the scalar evaluator) and [`CalcError::Table`].
//! - **Evaluation**: [`CalcError::Eval`] from the AST [`Calculator`].
//!
//! Conversions from the underlying error types are derived with `#[from]`, so
//! `?` works at call sites returning `Result<T, CalcError>`.
//!
//! [`Calculator`]: crate::Calculator
use crate::{BinOp, CalcToken, ScanError, TokenID};
use lrpost::{ActionError, ParserTokenID, TableError};
use thiserror::Error;

/// Arithmetic failure while evaluating an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,

    /// The result of `op` does not fit in an `i64`.
    #[error("integer overflow in `{op}`")]
    Overflow { op: BinOp },
}

/// Represents every way parsing or evaluating a calculator expression can
/// fail.
///
/// # Examples
/// ```rust
/// # use lrpost_calc::{evaluate, CalcError, TokenID};
/// let err = evaluate("1 + * 2").unwrap_err();
/// let CalcError::Syntax { token, expected } = &err else {
///     panic!("expected a syntax error");
/// };
/// assert_eq!(token.token_id, TokenID::Asterisk);
/// assert_eq!(expected, &[TokenID::LeftParen, TokenID::Number]);
/// assert_eq!(
///     err.to_string(),
///     "unexpected `*` at span 0:4 to 0:5, expected `(` or `number`"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// The input could not be tokenized.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// The parser found no action for `token`.
    #[error(
        "unexpected `{token}` at {}, expected {}",
        token.span.display(),
        expected_labels(expected)
    )]
    Syntax {
        token: CalcToken,
        expected: Vec<TokenID>,
    },

    /// The expression is nested deeper than the parser stack allows.
    #[error("expression nested too deeply (parser stack limit {max_depth})")]
    StackOverflow { max_depth: usize },

    /// A semantic action or value conversion failed.
    #[error(transparent)]
    Action(#[from] ActionError),

    /// The parser tables are inconsistent.
    #[error(transparent)]
    Table(#[from] TableError),

    /// Evaluating a syntax tree failed.
    #[error(transparent)]
    Eval(#[from] EvalError),
}

fn expected_labels(expected: &[TokenID]) -> String {
    if expected.is_empty() {
        return "nothing".into();
    }
    expected
        .iter()
        .map(|token_id| format!("`{}`", token_id.label()))
        .collect::<Vec<_>>()
        .join(" or ")
}
