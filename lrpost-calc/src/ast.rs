//! Syntax trees for calculator expressions.
//!
//! [`Ast`] is a strict tree: every node owns its children. Operations on it
//! are [`Visitor`]s. [`Calculator`] evaluates a tree with checked arithmetic
//! and [`Printer`] renders it back to source form (it also backs
//! `Display for Ast`).
//!
//! [`AstBuilder`] is the [`SemanticAction`] that builds trees while parsing.
//! Each grammar category gets its own newtype ([`Expr`], [`Term`],
//! [`Factor`]) and all of them travel through the parser inside one
//! [`Node`].
//!
//! ```rust
//! # use lrpost_calc::{parse_ast, Ast, BinOp};
//! let ast = parse_ast("(1 + 2) * 3").unwrap();
//! assert!(matches!(ast, Ast::Binary { op: BinOp::Mul, .. }));
//! assert_eq!(ast.to_string(), "(1 + 2) * 3");
//! assert_eq!(ast.eval(), Ok(9));
//! ```
use crate::{EvalError, ProdID, SemanticAction, StateID, TokenID};
use lrpost::{ActionError, ConversionError, FromCarrier, IntoCarrier, ParserEvent};
use smartstring::alias::String;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    /// Applies the operator with overflow and division-by-zero checks.
    pub fn apply(self, lhs: i64, rhs: i64) -> Result<i64, EvalError> {
        let result = match self {
            BinOp::Add => lhs.checked_add(rhs),
            BinOp::Sub => lhs.checked_sub(rhs),
            BinOp::Mul => lhs.checked_mul(rhs),
            BinOp::Div if rhs == 0 => return Err(EvalError::DivisionByZero),
            BinOp::Div => lhs.checked_div(rhs),
        };
        result.ok_or(EvalError::Overflow { op: self })
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    Number(i64),
    /// A parenthesized expression.
    Group(Box<Ast>),
    Binary {
        op: BinOp,
        lhs: Box<Ast>,
        rhs: Box<Ast>,
    },
}

impl Ast {
    pub fn group(inner: Ast) -> Self {
        Ast::Group(Box::new(inner))
    }

    pub fn binary(op: BinOp, lhs: Ast, rhs: Ast) -> Self {
        Ast::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Ast::Number(n) => visitor.visit_number(*n),
            Ast::Group(inner) => visitor.visit_group(inner),
            Ast::Binary { op, lhs, rhs } => visitor.visit_binary(*op, lhs, rhs),
        }
    }

    pub fn eval(&self) -> Result<i64, EvalError> {
        self.accept(&mut Calculator)
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Printer::print(self))
    }
}

pub trait Visitor {
    type Output;

    fn visit_number(&mut self, value: i64) -> Self::Output;
    fn visit_group(&mut self, inner: &Ast) -> Self::Output;
    fn visit_binary(&mut self, op: BinOp, lhs: &Ast, rhs: &Ast) -> Self::Output;
}

/// Evaluates a tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct Calculator;

impl Visitor for Calculator {
    type Output = Result<i64, EvalError>;

    fn visit_number(&mut self, value: i64) -> Self::Output {
        Ok(value)
    }

    fn visit_group(&mut self, inner: &Ast) -> Self::Output {
        inner.accept(self)
    }

    fn visit_binary(&mut self, op: BinOp, lhs: &Ast, rhs: &Ast) -> Self::Output {
        let lhs = lhs.accept(self)?;
        let rhs = rhs.accept(self)?;
        op.apply(lhs, rhs)
    }
}

/// Renders a tree as source text, one space around each operator.
#[derive(Debug, Default)]
pub struct Printer {
    out: String,
}

impl Printer {
    pub fn print(ast: &Ast) -> String {
        let mut printer = Printer::default();
        ast.accept(&mut printer);
        printer.out
    }
}

impl Visitor for Printer {
    type Output = ();

    fn visit_number(&mut self, value: i64) {
        self.out.push_str(&value.to_string());
    }

    fn visit_group(&mut self, inner: &Ast) {
        self.out.push('(');
        inner.accept(self);
        self.out.push(')');
    }

    fn visit_binary(&mut self, op: BinOp, lhs: &Ast, rhs: &Ast) {
        lhs.accept(self);
        self.out.push(' ');
        self.out.push_str(op.symbol());
        self.out.push(' ');
        rhs.accept(self);
    }
}

/// Trees deeper than this are rejected by [`AstBuilder::new`].
pub const DEFAULT_MAX_TREE_DEPTH: usize = 1024;

/// An expression tree and its depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    ast: Ast,
    depth: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    ast: Ast,
    depth: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factor {
    ast: Ast,
    depth: usize,
}

impl Expr {
    pub fn into_ast(self) -> Ast {
        self.ast
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Carrier for every value on the parser stack while building trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Expr(Expr),
    Term(Term),
    Factor(Factor),
    Number(i64),
}

impl Node {
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Expr(_) => "Expr",
            Node::Term(_) => "Term",
            Node::Factor(_) => "Factor",
            Node::Number(_) => "Number",
        }
    }

    fn mismatch(&self, expected: &'static str) -> ConversionError {
        ConversionError::Mismatch {
            expected,
            found: self.kind(),
        }
    }
}

macro_rules! node_category {
    ($ty:ty, $variant:ident) => {
        impl FromCarrier<Node> for $ty {
            fn from_carrier(value: Node) -> Result<Self, ConversionError> {
                match value {
                    Node::$variant(inner) => Ok(inner),
                    other => Err(other.mismatch(stringify!($variant))),
                }
            }
        }

        impl IntoCarrier<Node> for $ty {
            fn into_carrier(self) -> Node {
                Node::$variant(self)
            }
        }
    };
}

node_category!(Expr, Expr);
node_category!(Term, Term);
node_category!(Factor, Factor);
node_category!(i64, Number);

/// Builds an [`Ast`] from the parse.
///
/// Left-associative chains such as `1 + 1 + ... + 1` never deepen the parser
/// stack but do deepen the tree, so the builder bounds tree depth on its own.
/// A constructor that would exceed the bound fails the parse.
#[derive(Debug)]
pub struct AstBuilder {
    max_depth: usize,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_TREE_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn check_depth(&self, action: &'static str, depth: usize) -> Result<usize, ActionError> {
        if depth > self.max_depth {
            return Err(ActionError::failed(
                action,
                format!("expression nested deeper than {}", self.max_depth),
            ));
        }
        Ok(depth)
    }
}

impl Default for AstBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticAction for AstBuilder {
    type Value = Node;
    type Expr = Expr;
    type Term = Term;
    type Factor = Factor;

    fn from_expr(&self, expr: Expr) -> Node {
        expr.into_carrier()
    }

    fn to_expr(&self, value: Node) -> Result<Expr, ConversionError> {
        Expr::from_carrier(value)
    }

    fn from_term(&self, term: Term) -> Node {
        term.into_carrier()
    }

    fn to_term(&self, value: Node) -> Result<Term, ConversionError> {
        Term::from_carrier(value)
    }

    fn from_factor(&self, factor: Factor) -> Node {
        factor.into_carrier()
    }

    fn to_factor(&self, value: Node) -> Result<Factor, ConversionError> {
        Factor::from_carrier(value)
    }

    fn from_number(&self, value: i64) -> Node {
        value.into_carrier()
    }

    fn to_number(&self, value: Node) -> Result<i64, ConversionError> {
        i64::from_carrier(value)
    }

    fn make_add(&mut self, lhs: Expr, rhs: Term) -> Result<Expr, ActionError> {
        log::debug!("make_add");
        let depth = self.check_depth("add", 1 + lhs.depth.max(rhs.depth))?;
        let ast = Ast::binary(BinOp::Add, lhs.ast, rhs.ast);
        Ok(Expr { ast, depth })
    }

    fn make_sub(&mut self, lhs: Expr, rhs: Term) -> Result<Expr, ActionError> {
        log::debug!("make_sub");
        let depth = self.check_depth("sub", 1 + lhs.depth.max(rhs.depth))?;
        let ast = Ast::binary(BinOp::Sub, lhs.ast, rhs.ast);
        Ok(Expr { ast, depth })
    }

    fn make_expr(&mut self, term: Term) -> Result<Expr, ActionError> {
        Ok(Expr {
            ast: term.ast,
            depth: term.depth,
        })
    }

    fn make_mul(&mut self, lhs: Term, rhs: Factor) -> Result<Term, ActionError> {
        log::debug!("make_mul");
        let depth = self.check_depth("mul", 1 + lhs.depth.max(rhs.depth))?;
        let ast = Ast::binary(BinOp::Mul, lhs.ast, rhs.ast);
        Ok(Term { ast, depth })
    }

    fn make_div(&mut self, lhs: Term, rhs: Factor) -> Result<Term, ActionError> {
        log::debug!("make_div");
        let depth = self.check_depth("div", 1 + lhs.depth.max(rhs.depth))?;
        let ast = Ast::binary(BinOp::Div, lhs.ast, rhs.ast);
        Ok(Term { ast, depth })
    }

    fn make_term(&mut self, factor: Factor) -> Result<Term, ActionError> {
        Ok(Term {
            ast: factor.ast,
            depth: factor.depth,
        })
    }

    fn make_number(&mut self, value: i64) -> Result<Factor, ActionError> {
        log::debug!("make_number {}", value);
        let depth = self.check_depth("number", 1)?;
        Ok(Factor {
            ast: Ast::Number(value),
            depth,
        })
    }

    fn make_group(&mut self, expr: Expr) -> Result<Factor, ActionError> {
        log::debug!("make_group");
        let depth = self.check_depth("group", expr.depth + 1)?;
        Ok(Factor {
            ast: Ast::group(expr.ast),
            depth,
        })
    }

    fn syntax_error(&mut self, token_id: TokenID, expected: &[TokenID]) {
        log::debug!("syntax error on {:?}, expected {:?}", token_id, expected);
    }

    fn stack_overflow(&mut self) {
        log::debug!("stack overflow");
    }

    fn log(&mut self, event: &ParserEvent<StateID, TokenID, ProdID>) {
        log::trace!("{:?}", event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CalcError, CalcParser, evaluate, parse_ast};

    fn num(n: i64) -> Ast {
        Ast::Number(n)
    }

    #[test]
    fn builds_left_associative_trees() {
        assert_eq!(
            parse_ast("8 - 3 - 2").unwrap(),
            Ast::binary(
                BinOp::Sub,
                Ast::binary(BinOp::Sub, num(8), num(3)),
                num(2)
            )
        );
    }

    #[test]
    fn multiplication_binds_tighter() {
        assert_eq!(
            parse_ast("3+4*2").unwrap(),
            Ast::binary(
                BinOp::Add,
                num(3),
                Ast::binary(BinOp::Mul, num(4), num(2))
            )
        );
    }

    #[test]
    fn groups_are_kept() {
        let ast = parse_ast("((5))").unwrap();
        assert_eq!(ast, Ast::group(Ast::group(num(5))));
        assert_eq!(ast.to_string(), "((5))");
        assert_eq!(ast.eval(), Ok(5));
    }

    #[test]
    fn printer_normalizes_spacing() {
        let ast = parse_ast(" 1+(2 -3)*  4/5 ").unwrap();
        assert_eq!(ast.to_string(), "1 + (2 - 3) * 4 / 5");
        // -1 * 4 = -4, -4 / 5 = 0 (truncating), 1 + 0 = 1
        assert_eq!(ast.eval(), Ok(1));
        assert_eq!(parse_ast(&ast.to_string()).unwrap(), ast);
    }

    #[test]
    fn calculator_reports_arithmetic_errors() {
        assert_eq!(
            parse_ast("1 / (2 - 2)").unwrap().eval(),
            Err(EvalError::DivisionByZero)
        );
        let big = Ast::binary(BinOp::Mul, num(i64::MAX), num(2));
        assert_eq!(big.eval(), Err(EvalError::Overflow { op: BinOp::Mul }));
    }

    #[test]
    fn binop_apply() {
        assert_eq!(BinOp::Add.apply(2, 3), Ok(5));
        assert_eq!(BinOp::Sub.apply(2, 3), Ok(-1));
        assert_eq!(BinOp::Mul.apply(-2, 3), Ok(-6));
        assert_eq!(BinOp::Div.apply(7, 2), Ok(3));
        assert_eq!(BinOp::Div.apply(7, 0), Err(EvalError::DivisionByZero));
        assert_eq!(
            BinOp::Div.apply(i64::MIN, -1),
            Err(EvalError::Overflow { op: BinOp::Div })
        );
    }

    #[test]
    fn conversions_reject_other_categories() {
        let builder = AstBuilder::new();
        assert_eq!(
            builder.to_expr(Node::Term(Term {
                ast: num(1),
                depth: 1,
            })),
            Err(ConversionError::Mismatch {
                expected: "Expr",
                found: "Term",
            })
        );
        assert_eq!(builder.to_number(Node::Number(4)), Ok(4));
        assert_eq!(
            builder.to_factor(builder.from_expr(Expr {
                ast: num(1),
                depth: 1,
            })),
            Err(ConversionError::Mismatch {
                expected: "Factor",
                found: "Expr",
            })
        );
    }

    fn chain(terms: usize) -> std::string::String {
        vec!["1"; terms].join("+")
    }

    #[test]
    fn tree_depth_is_bounded_while_building() {
        let ast = parse_ast(&chain(DEFAULT_MAX_TREE_DEPTH)).unwrap();
        assert_eq!(ast.eval(), Ok(DEFAULT_MAX_TREE_DEPTH as i64));
        assert_eq!(parse_ast(&ast.to_string()), Ok(ast));

        assert_eq!(
            parse_ast(&chain(DEFAULT_MAX_TREE_DEPTH + 1)),
            Err(CalcError::Action(ActionError::failed(
                "add",
                "expression nested deeper than 1024"
            )))
        );
    }

    #[test]
    fn long_chain_fails_instead_of_building_a_deep_tree() {
        assert!(matches!(
            parse_ast(&chain(200_000)),
            Err(CalcError::Action(ActionError::Failed { action: "add", .. }))
        ));
        // The scalar evaluator builds no tree and has no such bound.
        assert_eq!(evaluate(&chain(200_000)), Ok(200_000));
    }

    #[test]
    fn groups_count_toward_tree_depth() {
        let mut parser = CalcParser::new(AstBuilder::with_max_depth(3));
        let expr = parser.parse("(1 + 2)").unwrap();
        assert_eq!(expr.depth(), 3);
        assert!(matches!(
            parser.parse("((1))"),
            Err(CalcError::Action(ActionError::Failed { action: "group", .. }))
        ));
        assert!(parser.parse("(1) * 2").is_ok());
    }

    struct Depth;
    impl Visitor for Depth {
        type Output = usize;
        fn visit_number(&mut self, _value: i64) -> usize {
            1
        }
        fn visit_group(&mut self, inner: &Ast) -> usize {
            1 + inner.accept(self)
        }
        fn visit_binary(&mut self, _op: BinOp, lhs: &Ast, rhs: &Ast) -> usize {
            1 + lhs.accept(self).max(rhs.accept(self))
        }
    }

    #[test]
    fn custom_visitor() {
        let ast = parse_ast("1 + (2 * 3)").unwrap();
        assert_eq!(ast.accept(&mut Depth), 4);
    }
}
