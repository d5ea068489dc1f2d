#![allow(dead_code)]

use pattern_term_tree::ir::atom::{AtomType, Handle};
use pattern_term_tree::ir::atom_space::AtomSpace;
use pattern_term_tree::ir::pattern_term::PatternTermPtr;
use pattern_term_tree::ir::variables::Variables;
use test_utils::ir::generator::{LinkKind, PatternExpr};

pub fn link_type(kind: LinkKind) -> AtomType {
    match kind {
        LinkKind::List => AtomType::List,
        LinkKind::Set => AtomType::Set,
        LinkKind::And => AtomType::And,
        LinkKind::Evaluation => AtomType::Evaluation,
        LinkKind::Quote => AtomType::Quote,
        LinkKind::Unquote => AtomType::Unquote,
        LinkKind::LocalQuote => AtomType::LocalQuote,
    }
}

/// Interns a generated expression into `space`.
pub fn to_atom(space: &AtomSpace, expr: &PatternExpr) -> Handle {
    match expr {
        PatternExpr::Concept(name) => space.add_node(AtomType::Concept, name),
        PatternExpr::Variable(name) => space.add_node(AtomType::Variable, name),
        PatternExpr::Link { kind, outgoing } => {
            let children: Vec<Handle> = outgoing.iter().map(|child| to_atom(space, child)).collect();
            space.add_link(link_type(*kind), children)
        }
    }
}

/// Every variable of `expr`, declared as bound.
pub fn variables_of(space: &AtomSpace, expr: &PatternExpr) -> Variables {
    expr.variable_names()
        .iter()
        .map(|name| space.add_node(AtomType::Variable, name))
        .collect()
}

/// All positions of the subtree rooted at `ptm`, pre-order.
pub fn subtree(ptm: &PatternTermPtr) -> Vec<PatternTermPtr> {
    let mut out = Vec::new();
    let mut stack = vec![ptm.clone()];
    while let Some(current) = stack.pop() {
        let mut children = current.get_children();
        children.reverse();
        stack.extend(children);
        out.push(current);
    }
    out
}
