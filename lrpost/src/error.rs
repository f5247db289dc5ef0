//! Fault types raised inside the parser engine.
//!
//! The engine never panics and never returns `Err` from
//! [`Parser::post`](crate::Parser::post). Every failure is recorded as a
//! [`ParserFault`] and moves the parser into its terminal
//! [`Errored`](crate::ParserStatus::Errored) state:
//!
//! - [`ParserFault::SyntaxError`] and [`ParserFault::StackOverflow`] are the
//!   ordinary grammar/resource faults, also announced to the driver through
//!   its callbacks.
//! - [`ActionError`] is returned by a driver when a carrier conversion or a
//!   semantic action fails.
//! - [`TableError`] signals tables that contradict the engine's invariants
//!   (a generator bug, not a user error).
//!
//! # Examples
//!
//! ```rust
//! # use lrpost::{ActionError, ConversionError};
//! let err: ActionError = ConversionError::Mismatch {
//!     expected: "Expr",
//!     found: "Term",
//! }
//! .into();
//! assert_eq!(err.to_string(), "expected a Expr value, found Term");
//!
//! let err = ActionError::failed("div", "division by zero");
//! assert_eq!(err.to_string(), "div: division by zero");
//! ```

use smartstring::alias::String;
use std::fmt::Debug;
use thiserror::Error;

/// A carrier value could not be converted to or from a concrete category.
///
/// With correctly generated tables these conversions cannot fail; the type
/// exists so a mismatched carrier surfaces as a value instead of a panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// The carrier held a value of a different category.
    #[error("expected a {expected} value, found {found}")]
    Mismatch {
        /// Category the conversion asked for.
        expected: &'static str,
        /// Category actually stored in the carrier.
        found: &'static str,
    },

    /// A reduction argument slot was empty or out of range.
    #[error("production {production:?} has no value at position {index}")]
    MissingArgument {
        /// Label of the production being reduced.
        production: &'static str,
        /// Right-hand-side position that was requested.
        index: usize,
    },

    /// A terminal that must carry a payload was posted without one.
    #[error("token {token:?} requires a payload")]
    MissingPayload {
        /// Label of the terminal.
        token: &'static str,
    },
}

/// Failure reported by a [`ParserDriver`](crate::ParserDriver) callback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// A carrier conversion failed.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// A semantic action refused to build its result.
    #[error("{action}: {message}")]
    Failed {
        /// Name of the semantic action.
        action: &'static str,
        /// Human-readable reason.
        message: String,
    },
}

impl ActionError {
    /// Shorthand for [`ActionError::Failed`].
    pub fn failed(action: &'static str, message: impl AsRef<str>) -> Self {
        Self::Failed {
            action,
            message: String::from(message.as_ref()),
        }
    }
}

/// The action/goto tables disagree with the engine's invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A reduction would have to pop the start entry.
    #[error("production {production:?} pops {needed} entries but only {available} are on the stack")]
    StackUnderflow {
        production: &'static str,
        needed: usize,
        available: usize,
    },

    /// No goto entry exists for the nonterminal exposed by a reduction.
    #[error("state {state} has no goto for nonterminal {token:?}")]
    MissingGoto { state: usize, token: &'static str },

    /// The tables asked to shift the end-of-input token.
    #[error("state {state} shifts the end-of-input token")]
    ShiftOnEnd { state: usize },

    /// A goto entry was found where an action was expected.
    #[error("state {state} has a goto entry for terminal {token:?}")]
    UnexpectedGoto { state: usize, token: &'static str },

    /// The accept action found no value on top of the stack.
    #[error("accept reached with no value on top of the stack")]
    MissingAcceptValue,
}

/// Why a parse ended in the [`Errored`](crate::ParserStatus::Errored) state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserFault<S, T>
where
    S: Debug,
    T: Debug,
{
    /// No table action exists for the current state and token.
    #[error("syntax error in state {state:?} on token {token_id:?}, expected one of {expected:?}")]
    SyntaxError {
        state: S,
        token_id: T,
        expected: Vec<T>,
    },

    /// A push would have exceeded the configured stack depth.
    #[error("parser stack overflow (maximum depth {max_depth})")]
    StackOverflow { max_depth: usize },

    /// A driver conversion or semantic action failed.
    #[error(transparent)]
    Action(#[from] ActionError),

    /// The tables are inconsistent.
    #[error(transparent)]
    Table(#[from] TableError),
}
