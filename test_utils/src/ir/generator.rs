//! Module for generating random query patterns for property-based testing.
//!
//! `PatternExpr` is a plain description of a pattern clause: concept and
//! variable leaves under ordered, unordered and quoting links. Names are
//! drawn from small pools so that the same atom recurs at several positions,
//! which is the case the pattern-term tree exists to disambiguate.
//!
//! Generation uses a depth parameter to bound the tree size.

use quickcheck::{Arbitrary, Gen};
use std::fmt;

const MAX_DEPTH: usize = 6;
const MAX_ARITY: u32 = 4;
const VARIABLE_NAMES: &[&str] = &["$a", "$b", "$c", "$x"];
const CONCEPT_NAMES: &[&str] = &["cat", "dog", "pet", "owner"];

/// Link constructors available to generated patterns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkKind {
    List,
    Set,
    And,
    Evaluation,
    Quote,
    Unquote,
    LocalQuote,
}

impl LinkKind {
    /// Quoting links always wrap exactly one body.
    pub fn is_quoting(self) -> bool {
        matches!(self, LinkKind::Quote | LinkKind::Unquote | LinkKind::LocalQuote)
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkKind::List => write!(f, "List"),
            LinkKind::Set => write!(f, "Set"),
            LinkKind::And => write!(f, "And"),
            LinkKind::Evaluation => write!(f, "Evaluation"),
            LinkKind::Quote => write!(f, "Quote"),
            LinkKind::Unquote => write!(f, "Unquote"),
            LinkKind::LocalQuote => write!(f, "LocalQuote"),
        }
    }
}

/// A generated pattern clause.
#[derive(Clone, Debug)]
pub enum PatternExpr {
    Concept(String),
    Variable(String),
    Link { kind: LinkKind, outgoing: Vec<PatternExpr> },
}

impl PatternExpr {
    /// Number of occurrences (leaves and links) in the expression.
    pub fn size(&self) -> usize {
        match self {
            PatternExpr::Link { outgoing, .. } => 1 + outgoing.iter().map(PatternExpr::size).sum::<usize>(),
            _ => 1,
        }
    }

    /// Distinct variable names, in first-occurrence order.
    pub fn variable_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_variable_names(&mut names);
        names
    }

    fn collect_variable_names(&self, names: &mut Vec<String>) {
        match self {
            PatternExpr::Variable(name) => {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
            PatternExpr::Link { outgoing, .. } => {
                for child in outgoing {
                    child.collect_variable_names(names);
                }
            }
            PatternExpr::Concept(_) => {}
        }
    }

    /// True if any link in the expression is a quoting link.
    pub fn has_quoting(&self) -> bool {
        match self {
            PatternExpr::Link { kind, outgoing } => kind.is_quoting() || outgoing.iter().any(PatternExpr::has_quoting),
            _ => false,
        }
    }
}

impl fmt::Display for PatternExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternExpr::Concept(name) => write!(f, "(Concept {:?})", name),
            PatternExpr::Variable(name) => write!(f, "(Variable {:?})", name),
            PatternExpr::Link { kind, outgoing } => {
                write!(f, "({}", kind)?;
                for child in outgoing {
                    write!(f, " {}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Generates a random number in the range [min, max] inclusive.
fn gen_range(g: &mut Gen, min: u32, max: u32) -> u32 {
    min + (u32::arbitrary(g) % (max - min + 1))
}

fn gen_name(g: &mut Gen, pool: &[&str]) -> String {
    pool[gen_range(g, 0, pool.len() as u32 - 1) as usize].to_string()
}

fn gen_leaf(g: &mut Gen) -> PatternExpr {
    if bool::arbitrary(g) {
        PatternExpr::Variable(gen_name(g, VARIABLE_NAMES))
    } else {
        PatternExpr::Concept(gen_name(g, CONCEPT_NAMES))
    }
}

fn gen_link(g: &mut Gen, depth: usize) -> PatternExpr {
    const KINDS: &[LinkKind] = &[
        LinkKind::List,
        LinkKind::Set,
        LinkKind::And,
        LinkKind::Evaluation,
        LinkKind::Quote,
        LinkKind::Unquote,
        LinkKind::LocalQuote,
    ];
    let kind = KINDS[gen_range(g, 0, KINDS.len() as u32 - 1) as usize];
    let arity = if kind.is_quoting() { 1 } else { gen_range(g, 0, MAX_ARITY) };
    let outgoing = (0..arity).map(|_| gen_expr(g, depth - 1)).collect();
    PatternExpr::Link { kind, outgoing }
}

/// Generates a random pattern expression no deeper than `depth`.
pub fn gen_expr(g: &mut Gen, depth: usize) -> PatternExpr {
    let depth = depth.min(MAX_DEPTH);
    if depth == 0 || gen_range(g, 0, 3) == 0 {
        gen_leaf(g)
    } else {
        gen_link(g, depth)
    }
}

impl Arbitrary for PatternExpr {
    fn arbitrary(g: &mut Gen) -> Self {
        // Clauses are links; a bare leaf is not an interesting pattern
        let depth = g.size().clamp(1, MAX_DEPTH);
        gen_link(g, depth)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            PatternExpr::Link { kind, outgoing } => {
                let kind = *kind;
                let mut smaller: Vec<PatternExpr> = outgoing
                    .iter()
                    .filter(|child| matches!(child, PatternExpr::Link { .. }))
                    .cloned()
                    .collect();
                if !kind.is_quoting() {
                    for skip in 0..outgoing.len() {
                        let mut fewer = outgoing.clone();
                        fewer.remove(skip);
                        smaller.push(PatternExpr::Link { kind, outgoing: fewer });
                    }
                }
                Box::new(smaller.into_iter())
            }
            _ => Box::new(std::iter::empty()),
        }
    }
}
