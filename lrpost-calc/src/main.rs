//! Command-line interface for lrpost-calc.
//!
//! Evaluates arithmetic expressions or prints their syntax trees. Expressions
//! are taken from the command line or, if none are given, read from standard
//! input one per line. A malformed expression prints a diagnostic and is
//! skipped.
//!
//! ```text
//! $ lrpost-calc eval '3 + 4 * 2' '(1'
//! 11
//! error: (1: unexpected `end` at span 0:2 to 0:2, expected `+` or `-` or `)`
//! ```
//!
//! Set `RUST_LOG=trace` to watch the parser's shifts and reductions.

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use lrpost::{DEFAULT_MAX_DEPTH, ParserConfig};
use lrpost_calc::{AstBuilder, CalcParser, Evaluator};
use std::io::BufRead;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maximum parser stack depth
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluates expressions
    Eval {
        /// Expressions; read from stdin, one per line, if none are given
        exprs: Vec<String>,
    },
    /// Prints the syntax tree and value of expressions
    Ast {
        /// Expressions; read from stdin, one per line, if none are given
        exprs: Vec<String>,
    },
}

fn for_each_expr(exprs: Vec<String>, mut f: impl FnMut(&str)) -> Result<()> {
    if !exprs.is_empty() {
        exprs.iter().for_each(|src| f(src));
        return Ok(());
    }
    for line in std::io::stdin().lock().lines() {
        let line = line.context("can't read stdin")?;
        if !line.trim().is_empty() {
            f(&line);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = ParserConfig {
        max_depth: args.max_depth,
    };

    match args.command {
        Commands::Eval { exprs } => {
            let mut parser = CalcParser::with_config(Evaluator::new(), config);
            for_each_expr(exprs, |src| match parser.parse(src) {
                Ok(value) => println!("{value}"),
                Err(err) => eprintln!("error: {src}: {err}"),
            })?;
        }
        Commands::Ast { exprs } => {
            let mut parser = CalcParser::with_config(AstBuilder::new(), config);
            for_each_expr(exprs, |src| {
                let ast = match parser.parse(src) {
                    Ok(expr) => expr.into_ast(),
                    Err(err) => {
                        eprintln!("error: {src}: {err}");
                        return;
                    }
                };
                log::debug!("{:?}", ast);
                match ast.eval() {
                    Ok(value) => println!("{ast} = {value}"),
                    Err(err) => println!("{ast} = error: {err}"),
                }
            })?;
        }
    }
    Ok(())
}
