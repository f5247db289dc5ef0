//! # Calculator Tokens
//!
//! This module defines the token type produced by [`CalcScanner`] and fed to
//! the parser. It provides:
//!
//! - [`Position`] and [`Span`]: 0-based line/column locations used in
//!   diagnostics,
//! - [`CalcToken`]: a [`TokenID`] paired with an optional integer payload and
//!   the span of source text it was read from.
//!
//! [`CalcScanner`]: crate::CalcScanner
use crate::TokenID;
use std::fmt;

/// A location in the source text. Both fields are 0-based.
#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open range `[start, end)` of source text.
#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn display(&self) -> String {
        format!("span {} to {}", self.start, self.end)
    }
}

/// Builds a [`Span`] from `start_line, start_column, end_line, end_column`.
///
/// ```rust
/// # use lrpost_calc::{span, Position, Span};
/// assert_eq!(
///     span!(0, 1, 0, 4),
///     Span::new(Position::new(0, 1), Position::new(0, 4))
/// );
/// ```
#[macro_export]
macro_rules! span {
    ($sl:expr, $sc:expr, $el:expr, $ec:expr) => {
        $crate::Span::new(
            $crate::Position::new($sl, $sc),
            $crate::Position::new($el, $ec),
        )
    };
}

/// A lexical token of the calculator language.
///
/// Only [`TokenID::Number`] carries a payload: the literal's value.
/// Operators, parentheses and end of input have `value: None`.
///
/// # Example
/// ```rust
/// # use lrpost_calc::{span, CalcToken, TokenID};
/// let tok = CalcToken {
///     token_id: TokenID::Number,
///     value: Some(99),
///     span: span!(0, 0, 0, 2),
/// };
/// assert_eq!(tok.token_id, TokenID::Number);
/// assert_eq!(tok.span.display(), "span 0:0 to 0:2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalcToken {
    /// The token's kind.
    pub token_id: TokenID,
    /// Literal value of a number token.
    pub value: Option<i64>,
    /// Where the token was read from.
    pub span: Span,
}

impl CalcToken {
    pub fn new(token_id: TokenID, value: Option<i64>, span: Span) -> Self {
        Self {
            token_id,
            value,
            span,
        }
    }

    pub fn is_end(&self) -> bool {
        self.token_id == TokenID::End
    }
}

impl fmt::Display for CalcToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use lrpost::ParserTokenID;
        match self.value {
            Some(value) => write!(f, "{value}"),
            None => f.write_str(self.token_id.label()),
        }
    }
}
