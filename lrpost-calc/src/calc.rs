//! The scanner → parser loop.
use crate::{
    Ast, AstBuilder, CalcDriver, CalcError, CalcScanner, CalcToken, Evaluator, SemanticAction,
};
use lrpost::{ActionError, Parser, ParserConfig, ParserFault, ParserStats, TableError};

/// Parses calculator expressions with a given [`SemanticAction`].
///
/// One `CalcParser` can parse any number of inputs; every call to
/// [`parse`](CalcParser::parse) starts from a fresh parser state.
///
/// ```rust
/// # use lrpost_calc::{AstBuilder, CalcParser};
/// let mut parser = CalcParser::new(AstBuilder::new());
/// let expr = parser.parse("1 + 2").unwrap();
/// assert_eq!(expr.into_ast().to_string(), "1 + 2");
/// assert!(parser.parse("1 +").is_err());
/// ```
pub struct CalcParser<A>
where
    A: SemanticAction,
{
    parser: Parser<CalcDriver<A>>,
}

impl<A> CalcParser<A>
where
    A: SemanticAction,
{
    pub fn new(actions: A) -> Self {
        Self::with_config(actions, ParserConfig::default())
    }

    pub fn with_config(actions: A, config: ParserConfig) -> Self {
        Self {
            parser: Parser::with_config(CalcDriver::new(actions), config),
        }
    }

    pub fn parse(&mut self, input: &str) -> Result<A::Expr, CalcError> {
        self.parse_bytes(input.bytes())
    }

    /// Parses one expression read from `input`. Scanning stops at the first
    /// end of input or `0x04`.
    pub fn parse_bytes<I>(&mut self, input: I) -> Result<A::Expr, CalcError>
    where
        I: Iterator<Item = u8>,
    {
        self.parser.reset();
        let mut scanner = CalcScanner::new(input);
        let last = loop {
            let token = scanner.next_token()?;
            if self.parser.post(token.token_id, token.value) {
                break token;
            }
        };
        match self.parser.take_accepted() {
            Some(value) => {
                let expr = self.actions().to_expr(value).map_err(ActionError::from)?;
                Ok(expr)
            }
            None => Err(self.fault_error(last)),
        }
    }

    pub fn actions(&self) -> &A {
        self.parser.driver().actions()
    }

    pub fn actions_mut(&mut self) -> &mut A {
        self.parser.driver_mut().actions_mut()
    }

    pub fn into_actions(self) -> A {
        self.parser.into_driver().into_actions()
    }

    /// Statistics of the most recent parse.
    pub fn stats(&self) -> ParserStats {
        self.parser.stats()
    }

    fn fault_error(&self, token: CalcToken) -> CalcError {
        match self.parser.fault() {
            Some(ParserFault::SyntaxError { expected, .. }) => CalcError::Syntax {
                token,
                expected: expected.clone(),
            },
            Some(ParserFault::StackOverflow { max_depth }) => CalcError::StackOverflow {
                max_depth: *max_depth,
            },
            Some(ParserFault::Action(err)) => CalcError::Action(err.clone()),
            Some(ParserFault::Table(err)) => CalcError::Table(err.clone()),
            None => CalcError::Table(TableError::MissingAcceptValue),
        }
    }
}

/// Evaluates `src` with the default configuration.
///
/// ```rust
/// assert_eq!(lrpost_calc::evaluate("3 + 4 * 2"), Ok(11));
/// ```
pub fn evaluate(src: &str) -> Result<i64, CalcError> {
    CalcParser::new(Evaluator::new()).parse(src)
}

/// Parses `src` into a syntax tree with the default configuration.
pub fn parse_ast(src: &str) -> Result<Ast, CalcError> {
    CalcParser::new(AstBuilder::new())
        .parse(src)
        .map(|expr| expr.into_ast())
}
