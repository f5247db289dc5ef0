// Tables for the grammar
//
//     Start -> S
//     S     -> ( S )     [paren]
//     S     -> x         [x]

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateID(u8);
impl ParserStateID for StateID {
    const COUNT: usize = 6;
}

impl From<StateID> for usize {
    fn from(s: StateID) -> Self {
        s.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ProdID {
    Start = 0,
    Paren = 1,
    X = 2,
}

impl ParserProdID for ProdID {
    type TokenID = TokenID;

    const COUNT: usize = 3;

    fn label(&self) -> &'static str {
        ProdID::LABELS[Into::<usize>::into(*self)]
    }
    fn lhs_token_id(&self) -> Self::TokenID {
        ProdID::LHS_TOKENS[Into::<usize>::into(*self)]
    }
    fn size(&self) -> usize {
        ProdID::SIZES[Into::<usize>::into(*self)]
    }
}

impl From<ProdID> for usize {
    fn from(p: ProdID) -> Self {
        p as usize
    }
}

impl ProdID {
    pub const LABELS: &'static [&str] = &[
        "start", // 0
        "paren", // 1
        "x",     // 2
    ];

    pub const LHS_TOKENS: &[TokenID] = &[
        TokenID::Start, // 0
        TokenID::S,     // 1
        TokenID::S,     // 2
    ];

    pub const SIZES: &[usize] = &[
        1, // 0
        3, // 1
        1, // 2
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TokenID {
    // Nonterminals:
    Start = 0,
    S = 1,

    // Terminals:
    End = 2,
    LParen = 3,
    RParen = 4,
    X = 5,
}

impl ParserTokenID for TokenID {
    const COUNT_NONTERMINALS: usize = 2;
    const COUNT_TERMINALS: usize = 4;
    const COUNT: usize = Self::COUNT_NONTERMINALS + Self::COUNT_TERMINALS;

    const END: Self = TokenID::End;
    const TERMINALS: &'static [Self] = &[
        TokenID::End,
        TokenID::LParen,
        TokenID::RParen,
        TokenID::X,
    ];

    fn label(&self) -> &'static str {
        TokenID::LABELS[Into::<usize>::into(*self)]
    }
}

impl From<TokenID> for usize {
    fn from(t: TokenID) -> Self {
        t as usize
    }
}

impl TokenID {
    pub const LABELS: &'static [&str] = &[
        "Start", // 0
        "S",     // 1
        "end",   // 2
        "(",     // 3
        ")",     // 4
        "x",     // 5
    ];
}

pub type Action = ParserAction<StateID, ProdID>;

pub struct ParData;
impl ParData {
    const TAB: &'static [[Action; TokenID::COUNT]] = &[
        /* STATE 0 */ [
            Action::Error, /* 0(Start) */
            Action::Goto(StateID(1)), /* 1(S) */
            Action::Error, /* 2(end) */
            Action::Shift(StateID(2)), /* 3(() */
            Action::Error, /* 4()) */
            Action::Shift(StateID(3)), /* 5(x) */
        ],
        /* STATE 1 */ [
            Action::Error, /* 0(Start) */
            Action::Error, /* 1(S) */
            Action::Accept, /* 2(end) */
            Action::Error, /* 3(() */
            Action::Error, /* 4()) */
            Action::Error, /* 5(x) */
        ],
        /* STATE 2 */ [
            Action::Error, /* 0(Start) */
            Action::Goto(StateID(4)), /* 1(S) */
            Action::Error, /* 2(end) */
            Action::Shift(StateID(2)), /* 3(() */
            Action::Error, /* 4()) */
            Action::Shift(StateID(3)), /* 5(x) */
        ],
        /* STATE 3 */ [
            Action::Error, /* 0(Start) */
            Action::Error, /* 1(S) */
            Action::Reduce(ProdID::X), /* 2(end) */
            Action::Error, /* 3(() */
            Action::Reduce(ProdID::X), /* 4()) */
            Action::Error, /* 5(x) */
        ],
        /* STATE 4 */ [
            Action::Error, /* 0(Start) */
            Action::Error, /* 1(S) */
            Action::Error, /* 2(end) */
            Action::Error, /* 3(() */
            Action::Shift(StateID(5)), /* 4()) */
            Action::Error, /* 5(x) */
        ],
        /* STATE 5 */ [
            Action::Error, /* 0(Start) */
            Action::Error, /* 1(S) */
            Action::Reduce(ProdID::Paren), /* 2(end) */
            Action::Error, /* 3(() */
            Action::Reduce(ProdID::Paren), /* 4()) */
            Action::Error, /* 5(x) */
        ],
    ];
}

impl ParserData for ParData {
    type StateID = StateID;
    type TokenID = TokenID;
    type ProdID = ProdID;

    #[inline]
    fn start_state() -> Self::StateID {
        StateID(0)
    }
    #[inline]
    fn lookup(state_id: StateID, token_id: TokenID) -> Action {
        Self::TAB[Into::<usize>::into(state_id)][Into::<usize>::into(token_id)]
    }
}
