use crate::driver::{ProdOf, StateOf, TokenOf};
use crate::{
    Args, ParserAction, ParserData, ParserDriver, ParserEvent, ParserFault, ParserProdID,
    ParserTokenID, TableError,
};
use smartstring::alias::String;

/// Stack depth used by [`ParserConfig::default`].
pub const DEFAULT_MAX_DEPTH: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum number of stack entries, the start entry included.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserStatus {
    #[default]
    Running,
    Accepted,
    Errored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserStats {
    pub tokens: usize,
    pub shifts: usize,
    pub reductions: usize,
    /// Deepest the stack has been since the last reset.
    pub max_depth: usize,
}

/// Fault type for parsers driven by `D`.
pub type Fault<D> = ParserFault<StateOf<D>, TokenOf<D>>;

struct StackEntry<S, V> {
    state: S,
    value: Option<V>,
}

/// Incremental LR parser.
///
/// Tokens are pushed one at a time with [`post`](Parser::post). The parser
/// performs every reduction the tables call for, hands values to its
/// [`ParserDriver`], and returns control as soon as the token has been
/// shifted or the parse has concluded.
///
/// Once [`Accepted`](ParserStatus::Accepted) or
/// [`Errored`](ParserStatus::Errored), the parser ignores further input until
/// [`reset`](Parser::reset).
pub struct Parser<D>
where
    D: ParserDriver,
{
    driver: D,
    stack: Vec<StackEntry<StateOf<D>, D::Value>>,
    status: ParserStatus,
    accepted: Option<D::Value>,
    fault: Option<Fault<D>>,
    config: ParserConfig,
    stats: ParserStats,
}

impl<D> Parser<D>
where
    D: ParserDriver,
{
    pub fn new(driver: D) -> Self {
        Self::with_config(driver, ParserConfig::default())
    }

    /// Creates a parser with an explicit configuration.
    ///
    /// A `max_depth` of 0 leaves no room for the start entry: the driver is
    /// told about the overflow right away and the parser starts out
    /// [`Errored`](ParserStatus::Errored).
    pub fn with_config(driver: D, config: ParserConfig) -> Self {
        let mut parser = Self {
            driver,
            stack: Vec::new(),
            status: ParserStatus::Running,
            accepted: None,
            fault: None,
            config,
            stats: ParserStats::default(),
        };
        parser.reset();
        parser
    }

    /// Returns the parser to its initial state, keeping the driver and the
    /// configuration.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.status = ParserStatus::Running;
        self.accepted = None;
        self.fault = None;
        self.stats = ParserStats::default();
        if let Err(fault) = self.check_depth(1) {
            self.fail(fault);
            return;
        }
        self.push(D::ParserData::start_state(), None);
    }

    /// Feeds one token to the parser.
    ///
    /// Returns `true` once the parse has concluded, either accepted or
    /// errored, and `false` while more input is expected. Posting the
    /// end-of-input token always concludes the parse.
    pub fn post(&mut self, token_id: TokenOf<D>, payload: Option<D::Payload>) -> bool {
        if self.status != ParserStatus::Running {
            return true;
        }
        self.stats.tokens += 1;
        let mut payload = payload;
        loop {
            let state = self.top_state();
            if log::log_enabled!(log::Level::Trace) {
                self.dump_state(token_id);
            }
            match D::ParserData::lookup(state, token_id) {
                ParserAction::Shift(new_state) => {
                    if token_id == <TokenOf<D> as ParserTokenID>::END {
                        return self.fail(
                            TableError::ShiftOnEnd {
                                state: state.into(),
                            }
                            .into(),
                        );
                    }
                    if let Err(fault) = self.check_depth(self.stack.len() + 1) {
                        return self.fail(fault);
                    }
                    log::trace!("Shift {:?}", new_state);
                    let value = match self.driver.shift(token_id, payload.take()) {
                        Ok(value) => value,
                        Err(err) => return self.fail(err.into()),
                    };
                    self.push(new_state, value);
                    self.stats.shifts += 1;
                    self.driver.trace(&ParserEvent::Shift {
                        state: new_state,
                        token_id,
                    });
                    return false;
                }

                ParserAction::Reduce(prod_id) => {
                    if let Err(fault) = self.reduce(prod_id) {
                        return self.fail(fault);
                    }
                }

                ParserAction::Accept => {
                    log::trace!("Accept");
                    let Some(value) = self.stack.last_mut().and_then(|entry| entry.value.take())
                    else {
                        return self.fail(TableError::MissingAcceptValue.into());
                    };
                    self.accepted = Some(value);
                    self.status = ParserStatus::Accepted;
                    self.driver.trace(&ParserEvent::Accept);
                    return true;
                }

                ParserAction::Error => {
                    let expected = D::ParserData::expected_tokens(state);
                    return self.fail(ParserFault::SyntaxError {
                        state,
                        token_id,
                        expected,
                    });
                }

                ParserAction::Goto(_) => {
                    return self.fail(
                        TableError::UnexpectedGoto {
                            state: state.into(),
                            token: token_id.label(),
                        }
                        .into(),
                    );
                }
            }
        }
    }

    /// The synthesized value, if the parse was accepted and the value has not
    /// been taken.
    pub fn accept(&self) -> Option<&D::Value> {
        self.accepted.as_ref()
    }

    pub fn take_accepted(&mut self) -> Option<D::Value> {
        self.accepted.take()
    }

    pub fn status(&self) -> ParserStatus {
        self.status
    }

    pub fn is_error(&self) -> bool {
        self.status == ParserStatus::Errored
    }

    pub fn is_accepted(&self) -> bool {
        self.status == ParserStatus::Accepted
    }

    /// Why the parse ended in [`Errored`](ParserStatus::Errored).
    pub fn fault(&self) -> Option<&Fault<D>> {
        self.fault.as_ref()
    }

    /// Current number of stack entries, the start entry included.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn stats(&self) -> ParserStats {
        self.stats.clone()
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    pub fn dump_state(&self, incoming: TokenOf<D>) {
        if self.stack.is_empty() {
            log::trace!("<>  <-  {:?}", incoming);
            return;
        }
        let mut output = String::new();
        for entry in self.stack.iter() {
            match &entry.value {
                Some(value) => output.push_str(&format!("<{:?}>  {:?}  ", entry.state, value)),
                None => output.push_str(&format!("<{:?}>  ", entry.state)),
            }
        }
        output.push_str(&format!("<-  {:?}", incoming));
        log::trace!("{}", output);
    }

    fn top_state(&self) -> StateOf<D> {
        self.stack
            .last()
            .map_or_else(D::ParserData::start_state, |entry| entry.state)
    }

    fn push(&mut self, state: StateOf<D>, value: Option<D::Value>) {
        self.stack.push(StackEntry { state, value });
        self.stats.max_depth = self.stats.max_depth.max(self.stack.len());
    }

    fn check_depth(&self, depth: usize) -> Result<(), Fault<D>> {
        if depth > self.config.max_depth {
            return Err(ParserFault::StackOverflow {
                max_depth: self.config.max_depth,
            });
        }
        Ok(())
    }

    fn reduce(&mut self, prod_id: ProdOf<D>) -> Result<(), Fault<D>> {
        let size = prod_id.size();
        let len = self.stack.len();
        if size >= len {
            return Err(TableError::StackUnderflow {
                production: prod_id.label(),
                needed: size,
                available: len.saturating_sub(1),
            }
            .into());
        }
        self.check_depth(len - size + 1)?;
        log::trace!("Reduce {:?}", prod_id);

        let values = self
            .stack
            .drain(len - size..)
            .map(|entry| entry.value)
            .collect();
        let value = self
            .driver
            .reduce(prod_id, Args::new(prod_id.label(), values))?;

        let state = self.top_state();
        let lhs_id = prod_id.lhs_token_id();
        let ParserAction::Goto(new_state) = D::ParserData::lookup(state, lhs_id) else {
            return Err(TableError::MissingGoto {
                state: state.into(),
                token: lhs_id.label(),
            }
            .into());
        };
        log::trace!("Goto {:?}", new_state);
        self.push(new_state, Some(value));
        self.stats.reductions += 1;
        self.driver.trace(&ParserEvent::Reduce {
            prod_id,
            goto: new_state,
        });
        Ok(())
    }

    /// Moves into [`Errored`](ParserStatus::Errored), telling the driver about
    /// syntax errors and overflows. Always returns `true`.
    fn fail(&mut self, fault: Fault<D>) -> bool {
        log::debug!("parse failed: {}", fault);
        match &fault {
            ParserFault::SyntaxError {
                state,
                token_id,
                expected,
            } => self.driver.syntax_error(*state, *token_id, expected),
            ParserFault::StackOverflow { .. } => self.driver.stack_overflow(),
            ParserFault::Action(_) | ParserFault::Table(_) => {}
        }
        self.status = ParserStatus::Errored;
        self.fault = Some(fault);
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ActionError, Args, ConversionError, ParserAction, ParserConfig, ParserData, ParserDriver,
        ParserEvent, ParserFault, ParserProdID, ParserStateID, ParserStatus, ParserStats,
        ParserTokenID, TableError,
    };
    use std::marker::PhantomData;

    use super::Parser;

    include!("test_parser_data.rs");

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Shift(TokenID, Option<i64>),
        Reduce(ProdID, usize),
        SyntaxError(StateID, TokenID, Vec<TokenID>),
        StackOverflow,
        Trace(ParserEvent<StateID, TokenID, ProdID>),
    }

    struct TestDriver<T> {
        calls: Vec<Call>,
        _data: PhantomData<T>,
    }

    impl<T> TestDriver<T> {
        fn new() -> Self {
            Self {
                calls: Vec::new(),
                _data: PhantomData,
            }
        }

        fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
            self.calls.iter().filter(|call| pred(call)).count()
        }
    }

    impl<T> ParserDriver for TestDriver<T>
    where
        T: ParserData<StateID = StateID, TokenID = TokenID, ProdID = ProdID>,
    {
        type ParserData = T;
        type Value = i64;
        type Payload = i64;

        fn shift(
            &mut self,
            token_id: TokenID,
            payload: Option<i64>,
        ) -> Result<Option<i64>, ActionError> {
            self.calls.push(Call::Shift(token_id, payload));
            match token_id {
                TokenID::X => payload
                    .map(Some)
                    .ok_or(ConversionError::MissingPayload { token: "x" }.into()),
                _ => Ok(None),
            }
        }

        fn reduce(&mut self, prod_id: ProdID, mut args: Args<i64>) -> Result<i64, ActionError> {
            self.calls.push(Call::Reduce(prod_id, args.len()));
            match prod_id {
                ProdID::Start | ProdID::X => Ok(args.take(0)?),
                ProdID::Paren => Ok(args.take(1)? + 1),
            }
        }

        fn syntax_error(&mut self, state: StateID, token_id: TokenID, expected: &[TokenID]) {
            self.calls
                .push(Call::SyntaxError(state, token_id, expected.to_vec()));
        }

        fn stack_overflow(&mut self) {
            self.calls.push(Call::StackOverflow);
        }

        fn trace(&mut self, event: &ParserEvent<StateID, TokenID, ProdID>) {
            self.calls.push(Call::Trace(*event));
        }
    }

    fn parser() -> Parser<TestDriver<ParData>> {
        init_logger();
        Parser::new(TestDriver::new())
    }

    fn parser_with_depth(max_depth: usize) -> Parser<TestDriver<ParData>> {
        init_logger();
        Parser::with_config(TestDriver::new(), ParserConfig { max_depth })
    }

    /// `(`, `)` and digits (an `x` carrying the digit), then end of input.
    fn tokens(src: &str) -> Vec<(TokenID, Option<i64>)> {
        src.bytes()
            .map(|b| match b {
                b'(' => (TokenID::LParen, None),
                b')' => (TokenID::RParen, None),
                b'0'..=b'9' => (TokenID::X, Some(i64::from(b - b'0'))),
                _ => panic!("unexpected test input {:?}", b as char),
            })
            .chain(std::iter::once((TokenID::End, None)))
            .collect()
    }

    /// Posts every token of `src`, returning what each `post` reported.
    fn feed<T>(parser: &mut Parser<TestDriver<T>>, src: &str) -> Vec<bool>
    where
        T: ParserData<StateID = StateID, TokenID = TokenID, ProdID = ProdID>,
    {
        tokens(src)
            .into_iter()
            .map(|(token_id, payload)| parser.post(token_id, payload))
            .collect()
    }

    fn nested(depth: usize) -> String {
        format!("{}7{}", "(".repeat(depth), ")".repeat(depth))
    }

    #[test]
    fn accepts_nested_input() {
        let mut parser = parser();
        let done = feed(&mut parser, "((7))");
        assert_eq!(done, vec![false, false, false, false, false, true]);
        assert_eq!(parser.status(), ParserStatus::Accepted);
        assert!(parser.is_accepted());
        assert_eq!(parser.accept(), Some(&9));
        assert_eq!(parser.take_accepted(), Some(9));
        assert_eq!(parser.accept(), None);
        assert!(parser.fault().is_none());
    }

    #[test]
    fn reductions_run_in_order() {
        let mut parser = parser();
        feed(&mut parser, "(3)");
        let reductions: Vec<_> = parser
            .driver()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Reduce(prod_id, n) => Some((*prod_id, *n)),
                _ => None,
            })
            .collect();
        assert_eq!(reductions, vec![(ProdID::X, 1), (ProdID::Paren, 3)]);
        assert_eq!(
            parser.driver().calls.last(),
            Some(&Call::Trace(ParserEvent::Accept))
        );
    }

    #[test]
    fn syntax_error_is_reported_once() {
        let mut parser = parser();
        assert!(parser.post(TokenID::RParen, None));
        assert!(parser.is_error());
        assert_eq!(parser.accept(), None);
        let expected = vec![TokenID::LParen, TokenID::X];
        assert_eq!(
            parser.driver().calls,
            vec![Call::SyntaxError(StateID(0), TokenID::RParen, expected.clone())]
        );
        assert_eq!(
            parser.fault(),
            Some(&ParserFault::SyntaxError {
                state: StateID(0),
                token_id: TokenID::RParen,
                expected,
            })
        );

        // Inert from here on.
        assert!(parser.post(TokenID::X, Some(1)));
        assert!(parser.post(TokenID::End, None));
        assert_eq!(parser.driver().calls.len(), 1);
    }

    #[test]
    fn syntax_error_after_reductions() {
        let mut parser = parser();
        let done = feed(&mut parser, "(1");
        assert_eq!(done, vec![false, false, true]);
        // `x` is reduced to S before end is found wanting a `)`.
        assert_eq!(
            parser
                .driver()
                .count(|call| matches!(call, Call::Reduce(ProdID::X, 1))),
            1
        );
        assert_eq!(
            parser.fault(),
            Some(&ParserFault::SyntaxError {
                state: StateID(4),
                token_id: TokenID::End,
                expected: vec![TokenID::RParen],
            })
        );
    }

    #[test]
    fn post_after_accept_is_noop() {
        let mut parser = parser();
        feed(&mut parser, "5");
        let calls = parser.driver().calls.len();
        assert!(parser.post(TokenID::LParen, None));
        assert!(parser.post(TokenID::End, None));
        assert_eq!(parser.driver().calls.len(), calls);
        assert_eq!(parser.stats().tokens, 2);
    }

    #[test]
    fn nesting_within_bound_succeeds() {
        // Nesting k needs k + 3 entries.
        for k in 0..=3 {
            let mut parser = parser_with_depth(6);
            feed(&mut parser, &nested(k));
            assert!(parser.is_accepted(), "depth {k}");
            assert_eq!(parser.accept(), Some(&(7 + k as i64)));
            assert_eq!(
                parser
                    .driver()
                    .count(|call| matches!(call, Call::StackOverflow)),
                0
            );
        }
    }

    #[test]
    fn nesting_beyond_bound_overflows_once() {
        let mut parser = parser_with_depth(6);
        let done = feed(&mut parser, &nested(4));
        assert_eq!(done.iter().filter(|&&d| d).count(), 5);
        assert!(parser.is_error());
        assert_eq!(
            parser.fault(),
            Some(&ParserFault::StackOverflow { max_depth: 6 })
        );
        assert_eq!(
            parser
                .driver()
                .count(|call| matches!(call, Call::StackOverflow)),
            1
        );
        // The `)` that would have overflowed was never shifted.
        assert_eq!(
            parser
                .driver()
                .count(|call| matches!(call, Call::Shift(TokenID::RParen, _))),
            0
        );
        assert_eq!(parser.stats().max_depth, 6);
    }

    #[test]
    fn overflow_precedes_shift_callback() {
        // Reducing `x` keeps the depth at two.
        let mut parser = parser_with_depth(2);
        feed(&mut parser, "7");
        assert!(parser.is_accepted());

        let mut parser = parser_with_depth(1);
        assert!(parser.post(TokenID::X, Some(7)));
        assert_eq!(parser.driver().calls, vec![Call::StackOverflow]);
    }

    #[test]
    fn zero_depth_overflows_on_reset() {
        let mut parser = parser_with_depth(0);
        assert!(parser.is_error());
        assert_eq!(parser.depth(), 0);
        assert_eq!(parser.driver().calls, vec![Call::StackOverflow]);
        assert!(parser.post(TokenID::X, Some(1)));
        assert_eq!(parser.driver().calls.len(), 1);
    }

    #[test]
    fn end_of_input_always_concludes() {
        for src in ["", "(", "((", "(4", "((4)", "4)", "()", ")", "4", "(4)"] {
            let mut parser = parser();
            for (token_id, payload) in tokens(src) {
                let done = parser.post(token_id, payload);
                if token_id == TokenID::End {
                    assert!(done, "input {src:?}");
                }
            }
            assert_ne!(parser.status(), ParserStatus::Running, "input {src:?}");
        }
    }

    #[test]
    fn identical_inputs_give_identical_calls() {
        let run = |src: &str| {
            let mut parser = parser();
            feed(&mut parser, src);
            parser.into_driver().calls
        };
        assert_eq!(run("((2))"), run("((2))"));
        assert_eq!(run("((2)"), run("((2)"));
        assert_ne!(run("((2))"), run("((3))"));
    }

    #[test]
    fn reset_allows_reuse() {
        let mut parser = parser();
        feed(&mut parser, ")");
        assert!(parser.is_error());

        parser.reset();
        assert_eq!(parser.status(), ParserStatus::Running);
        assert!(parser.fault().is_none());
        assert_eq!(parser.depth(), 1);
        assert_eq!(
            parser.stats(),
            ParserStats {
                max_depth: 1,
                ..ParserStats::default()
            }
        );

        feed(&mut parser, "(8)");
        assert_eq!(parser.take_accepted(), Some(9));
    }

    #[test]
    fn stats_count_steps() {
        let mut parser = parser();
        feed(&mut parser, "(1)");
        assert_eq!(
            parser.stats(),
            ParserStats {
                tokens: 4,
                shifts: 3,
                reductions: 2,
                max_depth: 4,
            }
        );
    }

    #[test]
    fn missing_payload_is_an_action_fault() {
        let mut parser = parser();
        assert!(!parser.post(TokenID::LParen, None));
        assert!(parser.post(TokenID::X, None));
        assert_eq!(
            parser.fault(),
            Some(&ParserFault::Action(ActionError::Conversion(
                ConversionError::MissingPayload { token: "x" }
            )))
        );
        // Action faults are not syntax errors.
        assert_eq!(
            parser
                .driver()
                .count(|call| matches!(call, Call::SyntaxError(..) | Call::StackOverflow)),
            0
        );
    }

    struct ReduceEverywhere;
    impl ParserData for ReduceEverywhere {
        type StateID = StateID;
        type TokenID = TokenID;
        type ProdID = ProdID;

        fn start_state() -> StateID {
            StateID(0)
        }
        fn lookup(_state_id: StateID, _token_id: TokenID) -> Action {
            Action::Reduce(ProdID::Paren)
        }
    }

    struct ShiftEverywhere;
    impl ParserData for ShiftEverywhere {
        type StateID = StateID;
        type TokenID = TokenID;
        type ProdID = ProdID;

        fn start_state() -> StateID {
            StateID(0)
        }
        fn lookup(_state_id: StateID, _token_id: TokenID) -> Action {
            Action::Shift(StateID(1))
        }
    }

    /// [`ParData`] with the goto on `S` from the start state removed.
    struct NoStartGoto;
    impl ParserData for NoStartGoto {
        type StateID = StateID;
        type TokenID = TokenID;
        type ProdID = ProdID;

        fn start_state() -> StateID {
            ParData::start_state()
        }
        fn lookup(state_id: StateID, token_id: TokenID) -> Action {
            match (state_id, token_id) {
                (StateID(0), TokenID::S) => Action::Error,
                _ => ParData::lookup(state_id, token_id),
            }
        }
    }

    /// Gotos where actions belong.
    struct GotoOnTerminal;
    impl ParserData for GotoOnTerminal {
        type StateID = StateID;
        type TokenID = TokenID;
        type ProdID = ProdID;

        fn start_state() -> StateID {
            StateID(0)
        }
        fn lookup(_state_id: StateID, _token_id: TokenID) -> Action {
            Action::Goto(StateID(1))
        }
    }

    fn table_fault<T>(src: &str) -> Option<TableError>
    where
        T: ParserData<StateID = StateID, TokenID = TokenID, ProdID = ProdID>,
    {
        init_logger();
        let mut parser: Parser<TestDriver<T>> = Parser::new(TestDriver::new());
        feed(&mut parser, src);
        assert!(parser.is_error());
        match parser.fault() {
            Some(ParserFault::Table(err)) => Some(err.clone()),
            _ => None,
        }
    }

    #[test]
    fn malformed_tables_are_faults() {
        assert_eq!(
            table_fault::<ReduceEverywhere>("1"),
            Some(TableError::StackUnderflow {
                production: "paren",
                needed: 3,
                available: 0,
            })
        );
        assert_eq!(
            table_fault::<ShiftEverywhere>(""),
            Some(TableError::ShiftOnEnd { state: 0 })
        );
        assert_eq!(
            table_fault::<NoStartGoto>("1"),
            Some(TableError::MissingGoto {
                state: 0,
                token: "S",
            })
        );
        assert_eq!(
            table_fault::<GotoOnTerminal>("1"),
            Some(TableError::UnexpectedGoto {
                state: 0,
                token: "x",
            })
        );
    }

    #[test]
    fn expected_tokens_follow_index_order() {
        assert_eq!(
            ParData::expected_tokens(StateID(0)),
            vec![TokenID::LParen, TokenID::X]
        );
        assert_eq!(
            ParData::expected_tokens(StateID(3)),
            vec![TokenID::End, TokenID::RParen]
        );
        assert_eq!(ParData::expected_tokens(StateID(1)), vec![TokenID::End]);
        assert!(TokenID::X.is_terminal());
        assert!(!TokenID::S.is_terminal());
        assert_eq!(ProdID::Paren.lhs_token_id(), TokenID::S);
        assert_eq!(StateID::COUNT, 6);
        assert!(matches!(
            ParData::lookup(StateID(1), TokenID::End),
            ParserAction::Accept
        ));
    }
}
