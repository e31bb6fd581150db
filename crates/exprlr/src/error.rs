//! Error types.

use crate::grammar::Nonterminal;
use std::io;
use thiserror::Error;

/// Errors produced while scanning or parsing an input stream.
///
/// The first error aborts the parse; there is no recovery.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The scanner produced an `ERROR` or `ILLEGAL_OP` lexeme.
    #[error("lexical error at line {line}, column {col}: {text:?}")]
    Lexical { line: u32, col: u32, text: String },

    /// The ACTION table has no entry for the current state and lookahead.
    #[error("syntax error at line {line}, column {col}")]
    Syntax { line: u32, col: u32 },

    /// The underlying character source failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The tables or the driver invariants are broken; a bug, not bad input.
    #[error("parse table fault: {0}")]
    Table(#[from] TableFault),
}

/// Corruption of the hand-authored tables or of the driver's stack
/// discipline, detected at runtime.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableFault {
    #[error("no GOTO entry for state {state} and nonterminal {nonterminal}")]
    MissingGoto { state: usize, nonterminal: Nonterminal },

    #[error("reduce action references unknown rule {0}")]
    UnknownRule(usize),

    #[error("parse stack underflow")]
    StackUnderflow,

    #[error("no lookahead lexeme available")]
    NoLookahead,

    #[error("malformed stack configuration at accept")]
    BadAcceptState,
}
