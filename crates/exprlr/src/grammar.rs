//! The expression grammar: symbols and production rules.

use crate::lexeme::Terminal;
use std::fmt;

/// Nonterminal categories of the grammar.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Nonterminal {
    Expr,
    Term,
    Fact,
}

impl Nonterminal {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Expr => "EXPR",
            Self::Term => "TERM",
            Self::Fact => "FACT",
        }
    }
}

impl fmt::Display for Nonterminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A terminal or nonterminal, as it appears on the parse stack and in rules.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GrammarSymbol {
    Terminal(Terminal),
    Nonterminal(Nonterminal),
}

impl fmt::Display for GrammarSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal(terminal) => terminal.fmt(f),
            Self::Nonterminal(nonterminal) => nonterminal.fmt(f),
        }
    }
}

/// A production rule of the grammar.
#[derive(Debug, Copy, Clone)]
pub struct Rule {
    pub lhs: Nonterminal,
    pub rhs: &'static [GrammarSymbol],
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.lhs)?;
        for symbol in self.rhs {
            write!(f, " {}", symbol)?;
        }
        Ok(())
    }
}

const EXPR: GrammarSymbol = GrammarSymbol::Nonterminal(Nonterminal::Expr);
const TERM: GrammarSymbol = GrammarSymbol::Nonterminal(Nonterminal::Term);
const FACT: GrammarSymbol = GrammarSymbol::Nonterminal(Nonterminal::Fact);
const ADD_OP: GrammarSymbol = GrammarSymbol::Terminal(Terminal::AddOp);
const MULT_OP: GrammarSymbol = GrammarSymbol::Terminal(Terminal::MultOp);
const LEFT_PAREN: GrammarSymbol = GrammarSymbol::Terminal(Terminal::LeftParen);
const RIGHT_PAREN: GrammarSymbol = GrammarSymbol::Terminal(Terminal::RightParen);
const IDENTIFIER: GrammarSymbol = GrammarSymbol::Terminal(Terminal::Identifier);

/// The production rules. Reduce actions in the table reference these by
/// 1-based number, in this order.
pub const RULES: [Rule; 6] = [
    Rule { lhs: Nonterminal::Expr, rhs: &[EXPR, ADD_OP, TERM] },
    Rule { lhs: Nonterminal::Expr, rhs: &[TERM] },
    Rule { lhs: Nonterminal::Term, rhs: &[TERM, MULT_OP, FACT] },
    Rule { lhs: Nonterminal::Term, rhs: &[FACT] },
    Rule { lhs: Nonterminal::Fact, rhs: &[LEFT_PAREN, EXPR, RIGHT_PAREN] },
    Rule { lhs: Nonterminal::Fact, rhs: &[IDENTIFIER] },
];

/// Terminals that participate in parsing, in ACTION-table column order.
/// Anything else the scanner can produce is rejected by the driver.
pub const PARSE_TERMINALS: [Terminal; 6] = [
    Terminal::Identifier,
    Terminal::AddOp,
    Terminal::MultOp,
    Terminal::LeftParen,
    Terminal::RightParen,
    Terminal::Eof,
];
