//! The table-driven shift-reduce driver.
//!
//! The driver keeps two stacks in lockstep — automaton states and grammar
//! symbols — plus a working list holding one tree node per stacked symbol.
//! Shifts append a leaf; a reduce by a rule with `n` right-hand-side symbols
//! pops `n` entries from each stack, pushes the rule's left-hand side and the
//! GOTO state, and folds the last `n` working-list nodes into one interior
//! node. Accept hands the single remaining node to the caller.

use crate::{
    error::{ParseError, TableFault},
    grammar::{GrammarSymbol, Nonterminal, Rule, RULES},
    lexeme::Terminal,
    scanner::Scanner,
    table::{self, Action, StateId},
    tree::TreeNode,
};
use std::io::Read;

/// The LR(1) parser for the expression grammar.
#[derive(Debug)]
pub struct Parser<R> {
    scanner: Scanner<R>,
    states: Vec<StateId>,
    symbols: Vec<GrammarSymbol>,
    nodes: Vec<TreeNode>,
}

impl<R: Read> Parser<R> {
    /// Create a parser over the given scanner.
    pub fn new(scanner: Scanner<R>) -> Self {
        Self {
            scanner,
            states: vec![table::INITIAL_STATE],
            symbols: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// Run the parse to completion, returning the root of the parse tree.
    ///
    /// The first unparsable lookahead aborts with [`ParseError::Syntax`]; an
    /// `ERROR` or `ILLEGAL_OP` lexeme aborts with [`ParseError::Lexical`].
    pub fn parse(mut self) -> Result<TreeNode, ParseError> {
        let span = tracing::trace_span!("parse");
        let _entered = span.enter();

        self.scanner.advance()?;
        loop {
            debug_assert_eq!(self.symbols.len(), self.nodes.len());

            let state = *self.states.last().ok_or(TableFault::StackUnderflow)?;
            match self.next_action(state)? {
                Action::Shift(next) => self.shift(next)?,
                Action::Reduce(rule_no) => self.reduce(rule_no)?,
                Action::Accept => break,
            }
        }
        self.accept()
    }

    /// Resolve the table action for `state` under the current lookahead.
    fn next_action(&self, state: StateId) -> Result<Action, ParseError> {
        let lookahead = self.scanner.current().ok_or(TableFault::NoLookahead)?;
        if matches!(lookahead.kind, Terminal::Error | Terminal::IllegalOp) {
            return Err(ParseError::Lexical {
                line: lookahead.line,
                col: lookahead.col,
                text: lookahead.text.clone(),
            });
        }
        table::action(state, lookahead.kind).ok_or(ParseError::Syntax {
            line: lookahead.line,
            col: lookahead.col,
        })
    }

    fn shift(&mut self, next: StateId) -> Result<(), ParseError> {
        let lexeme = self.scanner.take_current().ok_or(TableFault::NoLookahead)?;
        tracing::trace!("shift {} -> state {}", lexeme.kind, next);
        self.symbols.push(GrammarSymbol::Terminal(lexeme.kind));
        self.states.push(next);
        self.nodes.push(TreeNode::Leaf(lexeme));
        self.scanner.advance()?;
        Ok(())
    }

    fn reduce(&mut self, rule_no: usize) -> Result<(), ParseError> {
        let rule: &Rule = rule_no
            .checked_sub(1)
            .and_then(|index| RULES.get(index))
            .ok_or(TableFault::UnknownRule(rule_no))?;
        tracing::trace!("reduce by rule {}: {}", rule_no, rule);

        let arity = rule.rhs.len();
        if self.symbols.len() < arity || self.states.len() <= arity {
            return Err(TableFault::StackUnderflow.into());
        }
        self.symbols.truncate(self.symbols.len() - arity);
        self.states.truncate(self.states.len() - arity);

        let exposed = *self.states.last().ok_or(TableFault::StackUnderflow)?;
        let next = table::goto(exposed, rule.lhs).ok_or(TableFault::MissingGoto {
            state: exposed,
            nonterminal: rule.lhs,
        })?;
        self.symbols.push(GrammarSymbol::Nonterminal(rule.lhs));
        self.states.push(next);

        let children = self.nodes.split_off(self.nodes.len() - arity);
        self.nodes.push(TreeNode::internal(rule.lhs, children));
        Ok(())
    }

    /// Validate the final configuration and hand the tree to the caller.
    fn accept(mut self) -> Result<TreeNode, ParseError> {
        tracing::trace!("accept");
        let root = self.nodes.pop().ok_or(TableFault::BadAcceptState)?;
        let shape_ok = self.nodes.is_empty()
            && self.states == [table::INITIAL_STATE, table::ACCEPT_STATE]
            && self.symbols == [GrammarSymbol::Nonterminal(Nonterminal::Expr)]
            && root.label() == Some(Nonterminal::Expr);
        if !shape_ok {
            return Err(TableFault::BadAcceptState.into());
        }
        Ok(root)
    }
}

/// Parse an in-memory expression string.
pub fn parse_str(input: &str) -> Result<TreeNode, ParseError> {
    let scanner = Scanner::from_text(input)?;
    Parser::new(scanner).parse()
}
