//! Action/goto table interface.
//!
//! Tables are produced offline and consumed here as opaque data. A table
//! module implements [`ParserData`] together with its own identifier types:
//! [`ParserStateID`], [`ParserTokenID`] and [`ParserProdID`]. Token ids list
//! nonterminals first and terminals after, the layout a table generator
//! emits; one terminal is the distinguished end-of-input token.

use std::fmt::Debug;

/// One cell of the action/goto table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParserAction<US, UP>
where
    US: ParserStateID,
    UP: ParserProdID,
{
    Error,
    Accept,
    Shift(US),
    Reduce(UP),
    Goto(US),
}

pub trait ParserStateID: Copy + Debug + Eq + Into<usize> {
    const COUNT: usize;
}

pub trait ParserTokenID: Copy + Debug + Eq + Into<usize> + 'static {
    const COUNT_NONTERMINALS: usize;
    const COUNT_TERMINALS: usize;
    const COUNT: usize;

    /// The end-of-input terminal.
    const END: Self;

    /// All terminals, in index order.
    const TERMINALS: &'static [Self];

    fn label(&self) -> &'static str;

    fn is_terminal(&self) -> bool {
        Into::<usize>::into(*self) >= Self::COUNT_NONTERMINALS
    }
}

pub trait ParserProdID: Copy + Debug + Eq + Into<usize> {
    type TokenID: ParserTokenID;

    const COUNT: usize;

    fn label(&self) -> &'static str;

    /// The nonterminal on the left-hand side.
    fn lhs_token_id(&self) -> Self::TokenID;

    /// Number of right-hand-side symbols.
    fn size(&self) -> usize;
}

pub trait ParserData {
    type StateID: ParserStateID;
    type TokenID: ParserTokenID;
    type ProdID: ParserProdID<TokenID = Self::TokenID>;

    fn start_state() -> Self::StateID;

    fn lookup(
        state_id: Self::StateID,
        token_id: Self::TokenID,
    ) -> ParserAction<Self::StateID, Self::ProdID>;

    /// Terminals that have a non-error action in `state_id`, in index order.
    fn expected_tokens(state_id: Self::StateID) -> Vec<Self::TokenID> {
        Self::TokenID::TERMINALS
            .iter()
            .copied()
            .filter(|&token_id| !matches!(Self::lookup(state_id, token_id), ParserAction::Error))
            .collect()
    }
}
