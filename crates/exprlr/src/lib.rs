//! An LR(1) shift-reduce parser for a small arithmetic expression language.
//!
//! The crate pairs a character-level scanner with a table-driven shift-reduce
//! driver. The [`Scanner`] turns a character source into a lookahead-of-one
//! stream of [`Lexeme`]s; the [`Parser`] consults hand-authored ACTION/GOTO
//! tables and materializes the parse tree in lockstep with its reductions.

pub mod error;
pub mod grammar;
pub mod lexeme;
pub mod parser;
pub mod scanner;
pub mod tree;

mod table;

pub use crate::{
    error::{ParseError, TableFault},
    lexeme::{Lexeme, Terminal},
    parser::{parse_str, Parser},
    scanner::Scanner,
    tree::TreeNode,
};
