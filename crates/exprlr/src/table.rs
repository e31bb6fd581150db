//! The hand-authored LR(1) parse tables.
//!
//! Actions are data, not strings: each ACTION cell is an `Option<Action>`,
//! each GOTO cell an `Option<StateId>`, and a blank cell means error (or,
//! for GOTO, a table fault, since GOTO is only consulted after a reduce).

use crate::{
    grammar::{Nonterminal, PARSE_TERMINALS},
    lexeme::Terminal,
};

/// State number of the LR(1) automaton.
pub(crate) type StateId = usize;

pub(crate) const INITIAL_STATE: StateId = 0;
/// The state whose `EOF` action accepts.
pub(crate) const ACCEPT_STATE: StateId = 1;
pub(crate) const NUM_STATES: usize = 12;

/// A single parse action.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    Shift(StateId),
    /// Reduce by the 1-based rule number into [`crate::grammar::RULES`].
    Reduce(usize),
    Accept,
}

const fn s(next: StateId) -> Option<Action> {
    Some(Action::Shift(next))
}

const fn r(rule: usize) -> Option<Action> {
    Some(Action::Reduce(rule))
}

const ACC: Option<Action> = Some(Action::Accept);

/// ACTION, rows by state, columns in [`PARSE_TERMINALS`] order.
#[rustfmt::skip]
const ACTION: [[Option<Action>; 6]; NUM_STATES] = [
    //  ID     +      *      (      )      $
    [ s(5), None,  None,  s(4), None,  None ], // 0
    [ None, s(6),  None,  None, None,  ACC  ], // 1
    [ None, r(2),  s(7),  None, r(2),  r(2) ], // 2
    [ None, r(4),  r(4),  None, r(4),  r(4) ], // 3
    [ s(5), None,  None,  s(4), None,  None ], // 4
    [ None, r(6),  r(6),  None, r(6),  r(6) ], // 5
    [ s(5), None,  None,  s(4), None,  None ], // 6
    [ s(5), None,  None,  s(4), None,  None ], // 7
    [ None, s(6),  None,  None, s(11), None ], // 8
    [ None, r(1),  s(7),  None, r(1),  r(1) ], // 9
    [ None, r(3),  r(3),  None, r(3),  r(3) ], // 10
    [ None, r(5),  r(5),  None, r(5),  r(5) ], // 11
];

/// GOTO, rows by state, columns EXPR / TERM / FACT.
#[rustfmt::skip]
const GOTO: [[Option<StateId>; 3]; NUM_STATES] = [
    //  EXPR     TERM     FACT
    [ Some(1), Some(2), Some(3)  ], // 0
    [ None,    None,    None     ], // 1
    [ None,    None,    None     ], // 2
    [ None,    None,    None     ], // 3
    [ Some(8), Some(2), Some(3)  ], // 4
    [ None,    None,    None     ], // 5
    [ None,    Some(9), Some(3)  ], // 6
    [ None,    None,    Some(10) ], // 7
    [ None,    None,    None     ], // 8
    [ None,    None,    None     ], // 9
    [ None,    None,    None     ], // 10
    [ None,    None,    None     ], // 11
];

/// Column of `terminal` in the ACTION table, if it participates in parsing.
fn action_column(terminal: Terminal) -> Option<usize> {
    PARSE_TERMINALS.iter().position(|t| *t == terminal)
}

pub(crate) fn action(state: StateId, lookahead: Terminal) -> Option<Action> {
    let column = action_column(lookahead)?;
    ACTION.get(state).and_then(|row| row[column])
}

pub(crate) fn goto(state: StateId, nonterminal: Nonterminal) -> Option<StateId> {
    let column = match nonterminal {
        Nonterminal::Expr => 0,
        Nonterminal::Term => 1,
        Nonterminal::Fact => 2,
    };
    GOTO.get(state).and_then(|row| row[column])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::RULES;

    #[test]
    fn shift_targets_are_valid_states() {
        for row in &ACTION {
            for cell in row {
                if let Some(Action::Shift(next)) = cell {
                    assert!(*next < NUM_STATES);
                }
            }
        }
        for row in &GOTO {
            for cell in row {
                if let Some(next) = cell {
                    assert!(*next < NUM_STATES);
                }
            }
        }
    }

    #[test]
    fn reduce_numbers_reference_real_rules() {
        for row in &ACTION {
            for cell in row {
                if let Some(Action::Reduce(rule)) = cell {
                    assert!((1..=RULES.len()).contains(rule));
                }
            }
        }
    }

    #[test]
    fn accept_appears_exactly_once() {
        let mut accepts = Vec::new();
        for (state, row) in ACTION.iter().enumerate() {
            for (column, cell) in row.iter().enumerate() {
                if matches!(cell, Some(Action::Accept)) {
                    accepts.push((state, PARSE_TERMINALS[column]));
                }
            }
        }
        assert_eq!(accepts, [(ACCEPT_STATE, Terminal::Eof)]);
    }

    #[test]
    fn non_grammar_terminals_never_resolve() {
        for terminal in [
            Terminal::IntLit,
            Terminal::DblLit,
            Terminal::StrLit,
            Terminal::Keyword,
            Terminal::AssignOp,
            Terminal::SubOp,
            Terminal::DivOp,
            Terminal::Comma,
            Terminal::Semicolon,
            Terminal::Error,
            Terminal::IllegalOp,
        ] {
            for state in 0..NUM_STATES {
                assert_eq!(action(state, terminal), None);
            }
        }
    }

    #[test]
    fn initial_state_shifts_factor_starters() {
        assert_eq!(action(INITIAL_STATE, Terminal::Identifier), Some(Action::Shift(5)));
        assert_eq!(action(INITIAL_STATE, Terminal::LeftParen), Some(Action::Shift(4)));
        assert_eq!(action(INITIAL_STATE, Terminal::Eof), None);
    }
}
