// SLR(1) tables for the calculator grammar:
//
//     Start  -> Expr
//     Expr   -> Expr + Term     [add]
//     Expr   -> Expr - Term     [sub]
//     Expr   -> Term            [expr]
//     Term   -> Term * Factor   [mul]
//     Term   -> Term / Factor   [div]
//     Term   -> Factor          [term]
//     Factor -> number          [number]
//     Factor -> ( Expr )        [group]

use lrpost::{ParserAction, ParserData, ParserProdID, ParserStateID, ParserTokenID};
use num_enum::IntoPrimitive;

pub const N_TOKENS: usize = 12;
pub const N_NONTERMINALS: usize = 4;
pub const N_TERMINALS: usize = 8;
pub const N_PRODUCTIONS: usize = 9;
pub const N_STATES: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateID(u8);

impl ParserStateID for StateID {
    const COUNT: usize = N_STATES;
}

impl From<StateID> for usize {
    fn from(s: StateID) -> Self {
        s.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive)]
#[repr(usize)]
pub enum ProdID {
    Start = 0,
    Add = 1,
    Sub = 2,
    Expr = 3,
    Mul = 4,
    Div = 5,
    Term = 6,
    Number = 7,
    Group = 8,
}

pub const PRODUCTION_LABELS: [&str; N_PRODUCTIONS] = [
    "start",  // 0
    "add",    // 1
    "sub",    // 2
    "expr",   // 3
    "mul",    // 4
    "div",    // 5
    "term",   // 6
    "number", // 7
    "group",  // 8
];

pub const PRODUCTION_LHS: [TokenID; N_PRODUCTIONS] = [
    TokenID::Start,  // 0
    TokenID::Expr,   // 1
    TokenID::Expr,   // 2
    TokenID::Expr,   // 3
    TokenID::Term,   // 4
    TokenID::Term,   // 5
    TokenID::Term,   // 6
    TokenID::Factor, // 7
    TokenID::Factor, // 8
];

pub const PRODUCTION_SIZES: [usize; N_PRODUCTIONS] = [
    1, // 0
    3, // 1
    3, // 2
    1, // 3
    3, // 4
    3, // 5
    1, // 6
    1, // 7
    3, // 8
];

impl ParserProdID for ProdID {
    type TokenID = TokenID;

    const COUNT: usize = N_PRODUCTIONS;

    fn label(&self) -> &'static str {
        PRODUCTION_LABELS[Into::<usize>::into(*self)]
    }
    fn lhs_token_id(&self) -> TokenID {
        PRODUCTION_LHS[Into::<usize>::into(*self)]
    }
    fn size(&self) -> usize {
        PRODUCTION_SIZES[Into::<usize>::into(*self)]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive)]
#[repr(usize)]
pub enum TokenID {
    // Nonterminals:
    Start = 0,
    Expr = 1,
    Term = 2,
    Factor = 3,

    // Terminals:
    End = 4,
    Plus = 5,
    Minus = 6,
    Asterisk = 7,
    Slash = 8,
    LeftParen = 9,
    RightParen = 10,
    Number = 11,
}

pub const TOKEN_LABELS: [&str; N_TOKENS] = [
    "Start",  // 0
    "Expr",   // 1
    "Term",   // 2
    "Factor", // 3
    "end",    // 4
    "+",      // 5
    "-",      // 6
    "*",      // 7
    "/",      // 8
    "(",      // 9
    ")",      // 10
    "number", // 11
];

impl ParserTokenID for TokenID {
    const COUNT_NONTERMINALS: usize = N_NONTERMINALS;
    const COUNT_TERMINALS: usize = N_TERMINALS;
    const COUNT: usize = N_TOKENS;

    const END: Self = TokenID::End;
    const TERMINALS: &'static [Self] = &[
        TokenID::End,
        TokenID::Plus,
        TokenID::Minus,
        TokenID::Asterisk,
        TokenID::Slash,
        TokenID::LeftParen,
        TokenID::RightParen,
        TokenID::Number,
    ];

    fn label(&self) -> &'static str {
        TOKEN_LABELS[Into::<usize>::into(*self)]
    }
}

pub type Action = ParserAction<StateID, ProdID>;

const E: Action = Action::Error;

pub const TAB: [[Action; N_TOKENS]; N_STATES] = [
    /* STATE 0 */ [
        E, /* 0(Start) */
        Action::Goto(StateID(1)), /* 1(Expr) */
        Action::Goto(StateID(2)), /* 2(Term) */
        Action::Goto(StateID(3)), /* 3(Factor) */
        E, /* 4(end) */
        E, /* 5(+) */
        E, /* 6(-) */
        E, /* 7(*) */
        E, /* 8(/) */
        Action::Shift(StateID(5)), /* 9(() */
        E, /* 10()) */
        Action::Shift(StateID(4)), /* 11(number) */
    ],
    /* STATE 1 */ [
        E, /* 0(Start) */
        E, /* 1(Expr) */
        E, /* 2(Term) */
        E, /* 3(Factor) */
        Action::Accept, /* 4(end) */
        Action::Shift(StateID(6)), /* 5(+) */
        Action::Shift(StateID(7)), /* 6(-) */
        E, /* 7(*) */
        E, /* 8(/) */
        E, /* 9(() */
        E, /* 10()) */
        E, /* 11(number) */
    ],
    /* STATE 2 */ [
        E, /* 0(Start) */
        E, /* 1(Expr) */
        E, /* 2(Term) */
        E, /* 3(Factor) */
        Action::Reduce(ProdID::Expr), /* 4(end) */
        Action::Reduce(ProdID::Expr), /* 5(+) */
        Action::Reduce(ProdID::Expr), /* 6(-) */
        Action::Shift(StateID(8)), /* 7(*) */
        Action::Shift(StateID(9)), /* 8(/) */
        E, /* 9(() */
        Action::Reduce(ProdID::Expr), /* 10()) */
        E, /* 11(number) */
    ],
    /* STATE 3 */ [
        E, /* 0(Start) */
        E, /* 1(Expr) */
        E, /* 2(Term) */
        E, /* 3(Factor) */
        Action::Reduce(ProdID::Term), /* 4(end) */
        Action::Reduce(ProdID::Term), /* 5(+) */
        Action::Reduce(ProdID::Term), /* 6(-) */
        Action::Reduce(ProdID::Term), /* 7(*) */
        Action::Reduce(ProdID::Term), /* 8(/) */
        E, /* 9(() */
        Action::Reduce(ProdID::Term), /* 10()) */
        E, /* 11(number) */
    ],
    /* STATE 4 */ [
        E, /* 0(Start) */
        E, /* 1(Expr) */
        E, /* 2(Term) */
        E, /* 3(Factor) */
        Action::Reduce(ProdID::Number), /* 4(end) */
        Action::Reduce(ProdID::Number), /* 5(+) */
        Action::Reduce(ProdID::Number), /* 6(-) */
        Action::Reduce(ProdID::Number), /* 7(*) */
        Action::Reduce(ProdID::Number), /* 8(/) */
        E, /* 9(() */
        Action::Reduce(ProdID::Number), /* 10()) */
        E, /* 11(number) */
    ],
    /* STATE 5 */ [
        E, /* 0(Start) */
        Action::Goto(StateID(10)), /* 1(Expr) */
        Action::Goto(StateID(2)), /* 2(Term) */
        Action::Goto(StateID(3)), /* 3(Factor) */
        E, /* 4(end) */
        E, /* 5(+) */
        E, /* 6(-) */
        E, /* 7(*) */
        E, /* 8(/) */
        Action::Shift(StateID(5)), /* 9(() */
        E, /* 10()) */
        Action::Shift(StateID(4)), /* 11(number) */
    ],
    /* STATE 6 */ [
        E, /* 0(Start) */
        E, /* 1(Expr) */
        Action::Goto(StateID(11)), /* 2(Term) */
        Action::Goto(StateID(3)), /* 3(Factor) */
        E, /* 4(end) */
        E, /* 5(+) */
        E, /* 6(-) */
        E, /* 7(*) */
        E, /* 8(/) */
        Action::Shift(StateID(5)), /* 9(() */
        E, /* 10()) */
        Action::Shift(StateID(4)), /* 11(number) */
    ],
    /* STATE 7 */ [
        E, /* 0(Start) */
        E, /* 1(Expr) */
        Action::Goto(StateID(12)), /* 2(Term) */
        Action::Goto(StateID(3)), /* 3(Factor) */
        E, /* 4(end) */
        E, /* 5(+) */
        E, /* 6(-) */
        E, /* 7(*) */
        E, /* 8(/) */
        Action::Shift(StateID(5)), /* 9(() */
        E, /* 10()) */
        Action::Shift(StateID(4)), /* 11(number) */
    ],
    /* STATE 8 */ [
        E, /* 0(Start) */
        E, /* 1(Expr) */
        E, /* 2(Term) */
        Action::Goto(StateID(13)), /* 3(Factor) */
        E, /* 4(end) */
        E, /* 5(+) */
        E, /* 6(-) */
        E, /* 7(*) */
        E, /* 8(/) */
        Action::Shift(StateID(5)), /* 9(() */
        E, /* 10()) */
        Action::Shift(StateID(4)), /* 11(number) */
    ],
    /* STATE 9 */ [
        E, /* 0(Start) */
        E, /* 1(Expr) */
        E, /* 2(Term) */
        Action::Goto(StateID(14)), /* 3(Factor) */
        E, /* 4(end) */
        E, /* 5(+) */
        E, /* 6(-) */
        E, /* 7(*) */
        E, /* 8(/) */
        Action::Shift(StateID(5)), /* 9(() */
        E, /* 10()) */
        Action::Shift(StateID(4)), /* 11(number) */
    ],
    /* STATE 10 */ [
        E, /* 0(Start) */
        E, /* 1(Expr) */
        E, /* 2(Term) */
        E, /* 3(Factor) */
        E, /* 4(end) */
        Action::Shift(StateID(6)), /* 5(+) */
        Action::Shift(StateID(7)), /* 6(-) */
        E, /* 7(*) */
        E, /* 8(/) */
        E, /* 9(() */
        Action::Shift(StateID(15)), /* 10()) */
        E, /* 11(number) */
    ],
    /* STATE 11 */ [
        E, /* 0(Start) */
        E, /* 1(Expr) */
        E, /* 2(Term) */
        E, /* 3(Factor) */
        Action::Reduce(ProdID::Add), /* 4(end) */
        Action::Reduce(ProdID::Add), /* 5(+) */
        Action::Reduce(ProdID::Add), /* 6(-) */
        Action::Shift(StateID(8)), /* 7(*) */
        Action::Shift(StateID(9)), /* 8(/) */
        E, /* 9(() */
        Action::Reduce(ProdID::Add), /* 10()) */
        E, /* 11(number) */
    ],
    /* STATE 12 */ [
        E, /* 0(Start) */
        E, /* 1(Expr) */
        E, /* 2(Term) */
        E, /* 3(Factor) */
        Action::Reduce(ProdID::Sub), /* 4(end) */
        Action::Reduce(ProdID::Sub), /* 5(+) */
        Action::Reduce(ProdID::Sub), /* 6(-) */
        Action::Shift(StateID(8)), /* 7(*) */
        Action::Shift(StateID(9)), /* 8(/) */
        E, /* 9(() */
        Action::Reduce(ProdID::Sub), /* 10()) */
        E, /* 11(number) */
    ],
    /* STATE 13 */ [
        E, /* 0(Start) */
        E, /* 1(Expr) */
        E, /* 2(Term) */
        E, /* 3(Factor) */
        Action::Reduce(ProdID::Mul), /* 4(end) */
        Action::Reduce(ProdID::Mul), /* 5(+) */
        Action::Reduce(ProdID::Mul), /* 6(-) */
        Action::Reduce(ProdID::Mul), /* 7(*) */
        Action::Reduce(ProdID::Mul), /* 8(/) */
        E, /* 9(() */
        Action::Reduce(ProdID::Mul), /* 10()) */
        E, /* 11(number) */
    ],
    /* STATE 14 */ [
        E, /* 0(Start) */
        E, /* 1(Expr) */
        E, /* 2(Term) */
        E, /* 3(Factor) */
        Action::Reduce(ProdID::Div), /* 4(end) */
        Action::Reduce(ProdID::Div), /* 5(+) */
        Action::Reduce(ProdID::Div), /* 6(-) */
        Action::Reduce(ProdID::Div), /* 7(*) */
        Action::Reduce(ProdID::Div), /* 8(/) */
        E, /* 9(() */
        Action::Reduce(ProdID::Div), /* 10()) */
        E, /* 11(number) */
    ],
    /* STATE 15 */ [
        E, /* 0(Start) */
        E, /* 1(Expr) */
        E, /* 2(Term) */
        E, /* 3(Factor) */
        Action::Reduce(ProdID::Group), /* 4(end) */
        Action::Reduce(ProdID::Group), /* 5(+) */
        Action::Reduce(ProdID::Group), /* 6(-) */
        Action::Reduce(ProdID::Group), /* 7(*) */
        Action::Reduce(ProdID::Group), /* 8(/) */
        E, /* 9(() */
        Action::Reduce(ProdID::Group), /* 10()) */
        E, /* 11(number) */
    ],
];

pub struct ParData;

impl ParserData for ParData {
    type StateID = StateID;
    type TokenID = TokenID;
    type ProdID = ProdID;

    #[inline]
    fn start_state() -> StateID {
        StateID(0)
    }

    #[inline]
    fn lookup(state_id: StateID, token_id: TokenID) -> Action {
        TAB[Into::<usize>::into(state_id)][Into::<usize>::into(token_id)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_reduce_has_a_goto() {
        for (state, row) in TAB.iter().enumerate() {
            for action in row {
                if let ParserAction::Reduce(prod_id) = action {
                    let lhs: usize = prod_id.lhs_token_id().into();
                    assert!(lhs < N_NONTERMINALS, "state {state}");
                    // Some state must go somewhere on the lhs.
                    assert!(
                        TAB.iter()
                            .any(|row| matches!(row[lhs], ParserAction::Goto(_))),
                        "no goto for {:?}",
                        prod_id
                    );
                }
            }
        }
    }

    #[test]
    fn gotos_only_on_nonterminals() {
        for row in TAB.iter() {
            for (column, action) in row.iter().enumerate() {
                let is_goto = matches!(action, ParserAction::Goto(_));
                assert!(!is_goto || column < N_NONTERMINALS);
                if let ParserAction::Goto(s) | ParserAction::Shift(s) = action {
                    assert!(Into::<usize>::into(*s) < N_STATES);
                }
            }
        }
    }

    #[test]
    fn terminals_follow_nonterminals() {
        assert_eq!(TokenID::TERMINALS.len(), N_TERMINALS);
        for (i, token_id) in TokenID::TERMINALS.iter().enumerate() {
            assert_eq!(Into::<usize>::into(*token_id), N_NONTERMINALS + i);
            assert!(token_id.is_terminal());
        }
        assert!(!TokenID::Factor.is_terminal());
    }

    #[test]
    fn initial_state_expects_operand() {
        assert_eq!(
            ParData::expected_tokens(ParData::start_state()),
            vec![TokenID::LeftParen, TokenID::Number]
        );
        assert_eq!(ProdID::Group.label(), "group");
        assert_eq!(ProdID::Group.size(), 3);
        assert_eq!(TokenID::Slash.label(), "/");
    }
}
