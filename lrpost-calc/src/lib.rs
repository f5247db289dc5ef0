//! # lrpost-calc
//!
//! A calculator built on **lrpost**: a complete, minimal client of the push
//! parser, from bytes to values.
//!
//! ## Overview
//!
//! - [`parser_data`]: the SLR(1) tables for the grammar below, in the shape a
//!   table generator emits.
//! - [`scanner`]: [`CalcScanner`] turns bytes into [`CalcToken`]s with
//!   [`Span`]s.
//! - [`semantic`]: the typed [`SemanticAction`] contract and [`CalcDriver`],
//!   which adapts it to [`lrpost::ParserDriver`].
//! - [`eval`]: [`Evaluator`], which computes an `i64` while parsing.
//! - [`ast`]: [`AstBuilder`], which builds an [`Ast`] instead, plus the
//!   [`Calculator`] and [`Printer`] visitors.
//! - [`calc`]: [`CalcParser`], the scanner → parser loop.
//!
//! ```text
//! Expr   -> Expr + Term | Expr - Term | Term
//! Term   -> Term * Factor | Term / Factor | Factor
//! Factor -> number | ( Expr )
//! ```
//!
//! ## Example
//!
//! ```rust
//! use lrpost_calc::{evaluate, parse_ast, CalcError};
//!
//! assert_eq!(evaluate("3 + 4 * 2"), Ok(11));
//!
//! let ast = parse_ast("(3 + 4) * 2").unwrap();
//! assert_eq!(ast.to_string(), "(3 + 4) * 2");
//! assert_eq!(ast.eval(), Ok(14));
//!
//! assert!(matches!(evaluate("3 +"), Err(CalcError::Syntax { .. })));
//! ```
pub mod ast;
pub mod calc;
pub mod error;
pub mod eval;
pub mod parser_data;
pub mod scanner;
pub mod semantic;
pub mod token;

pub use ast::{
    Ast, AstBuilder, BinOp, Calculator, DEFAULT_MAX_TREE_DEPTH, Expr, Factor, Node, Printer, Term,
    Visitor,
};
pub use calc::{CalcParser, evaluate, parse_ast};
pub use error::{CalcError, EvalError};
pub use eval::Evaluator;
pub use parser_data::{ParData, ProdID, StateID, TokenID};
pub use scanner::{CalcScanner, ScanError};
pub use semantic::{CalcDriver, SemanticAction};
pub use token::{CalcToken, Position, Span};
