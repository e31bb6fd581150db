//! Parse tree representation.

use crate::{grammar::Nonterminal, lexeme::Lexeme};
use std::fmt;

/// A node of the parse tree.
///
/// Leaves are terminal occurrences; interior nodes are reductions, with one
/// child per right-hand-side symbol in rule order. The driver owns nodes
/// while parsing; the accepted root is handed to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Leaf(Lexeme),
    Internal {
        label: Nonterminal,
        children: Vec<TreeNode>,
    },
}

impl TreeNode {
    pub(crate) fn internal(label: Nonterminal, children: Vec<TreeNode>) -> Self {
        Self::Internal { label, children }
    }

    /// The nonterminal label of an interior node.
    pub fn label(&self) -> Option<Nonterminal> {
        match self {
            Self::Leaf(_) => None,
            Self::Internal { label, .. } => Some(*label),
        }
    }

    pub fn children(&self) -> &[TreeNode] {
        match self {
            Self::Leaf(_) => &[],
            Self::Internal { children, .. } => children,
        }
    }

    /// In-order traversal of the leaf lexemes.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves { stack: vec![self] }
    }

    fn print(&self, f: &mut fmt::Formatter<'_>, prefix: &str, children_prefix: &str) -> fmt::Result {
        f.write_str(prefix)?;
        match self {
            Self::Leaf(lexeme) => writeln!(f, "[{}]", lexeme.text),
            Self::Internal { label, children } => {
                writeln!(f, "{}", label)?;
                for (index, child) in children.iter().enumerate() {
                    if index + 1 == children.len() {
                        child.print(
                            f,
                            &format!("{}└── ", children_prefix),
                            &format!("{}    ", children_prefix),
                        )?;
                    } else {
                        child.print(
                            f,
                            &format!("{}├── ", children_prefix),
                            &format!("{}│   ", children_prefix),
                        )?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Renders the tree top to bottom with box-drawing connectors.
impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.print(f, "", "")
    }
}

/// Iterator over a tree's leaf lexemes, left to right.
#[derive(Debug)]
pub struct Leaves<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a Lexeme;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                TreeNode::Leaf(lexeme) => return Some(lexeme),
                TreeNode::Internal { children, .. } => {
                    self.stack.extend(children.iter().rev());
                }
            }
        }
        None
    }
}
