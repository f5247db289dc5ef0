//! The callback surface the engine invokes while parsing.
//!
//! A [`ParserDriver`] fixes the tables, the semantic value carrier and the
//! scanner payload type for one grammar, and receives:
//!
//! - [`shift`](ParserDriver::shift) for every terminal pushed on the stack,
//! - [`reduce`](ParserDriver::reduce) for every production reduced,
//! - [`syntax_error`](ParserDriver::syntax_error) or
//!   [`stack_overflow`](ParserDriver::stack_overflow) once, when the parse
//!   fails for either reason,
//! - [`trace`](ParserDriver::trace) for every shift, reduce and accept.
//!
//! The engine consults the driver only for values. Parsing decisions come
//! from the tables alone.

use crate::{ActionError, Args, ParserData};
use std::fmt::Debug;

pub type StateOf<D> = <<D as ParserDriver>::ParserData as ParserData>::StateID;
pub type TokenOf<D> = <<D as ParserDriver>::ParserData as ParserData>::TokenID;
pub type ProdOf<D> = <<D as ParserDriver>::ParserData as ParserData>::ProdID;

/// One step of the stack machine, reported through [`ParserDriver::trace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserEvent<S, T, P> {
    /// `token_id` was pushed and the machine moved to `state`.
    Shift { state: S, token_id: T },
    /// `prod_id` was reduced and the machine moved to `goto`.
    Reduce { prod_id: P, goto: S },
    /// The input was accepted.
    Accept,
}

pub trait ParserDriver: Sized {
    type ParserData: ParserData;

    /// Carrier type for every value on the stack.
    type Value: Debug;

    /// Raw payload attached to a terminal by the scanner.
    type Payload;

    /// Converts a terminal's payload into the carrier.
    ///
    /// `Ok(None)` leaves the terminal's stack slot empty, which is the usual
    /// result for punctuation.
    fn shift(
        &mut self,
        token_id: TokenOf<Self>,
        payload: Option<Self::Payload>,
    ) -> Result<Option<Self::Value>, ActionError>;

    /// Runs the constructor for `prod_id` on the popped values.
    fn reduce(
        &mut self,
        prod_id: ProdOf<Self>,
        args: Args<Self::Value>,
    ) -> Result<Self::Value, ActionError>;

    /// No action exists for `token_id` in `state`. `expected` lists the
    /// terminals that would have been accepted there.
    fn syntax_error(
        &mut self,
        state: StateOf<Self>,
        token_id: TokenOf<Self>,
        expected: &[TokenOf<Self>],
    );

    /// The configured maximum stack depth was about to be exceeded.
    fn stack_overflow(&mut self);

    fn trace(&mut self, _event: &ParserEvent<StateOf<Self>, TokenOf<Self>, ProdOf<Self>>) {}
}
