//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! Incremental, table-driven LR parser runtime.
//!
//! `lrpost` runs precomputed SLR/LALR action and goto tables as a *push*
//! parser: the caller owns the scanner and hands the parser one token at a
//! time with [`Parser::post`]. Every reduction is delegated to a
//! [`ParserDriver`], which turns the popped values into the value of the
//! left-hand-side nonterminal.
//!
//! The pieces:
//!  * **[`ParserData`]**: the tables, with their state, token and production
//!    id types. Usually emitted by a generator as a data module.
//!  * **[`ParserDriver`]**: semantic actions and error notifications.
//!  * **[`Parser`]**: the stack machine.
//!
//! Failures never panic. A syntax error, a stack overflow, a failed semantic
//! action or an inconsistent table moves the parser to
//! [`ParserStatus::Errored`] and is recorded as a [`ParserFault`].
//!
//! # Example
//!
//! ```rust,ignore
//! let mut parser = Parser::new(MyDriver::default());
//! for (token_id, payload) in scanner {
//!     if parser.post(token_id, payload) {
//!         break;
//!     }
//! }
//! match parser.take_accepted() {
//!     Some(value) => println!("{value:?}"),
//!     None => eprintln!("{}", parser.fault().map(|f| f.to_string()).unwrap_or_default()),
//! }
//! ```
//!
//! The `lrpost-calc` crate in this workspace is a complete client: tables for
//! an arithmetic grammar, a scanner, an evaluator and an AST builder.

mod data;
mod driver;
mod error;
mod parser;
mod value;

pub use crate::data::{ParserAction, ParserData, ParserProdID, ParserStateID, ParserTokenID};
pub use crate::driver::{ParserDriver, ParserEvent, ProdOf, StateOf, TokenOf};
pub use crate::error::{ActionError, ConversionError, ParserFault, TableError};
pub use crate::parser::{
    DEFAULT_MAX_DEPTH, Fault, Parser, ParserConfig, ParserStats, ParserStatus,
};
pub use crate::value::{Args, FromCarrier, IntoCarrier};
