//! Builds pattern-term trees from query clauses.
//!
//! The builder walks each clause top-down, allocating one `PatternTerm` per
//! occurrence of an atom, and marks the positions of variables bound by the
//! query. Positions only hold weak references to their children, so the
//! builder keeps every position it creates; `finish` hands that index over as
//! a `PatternTermTree`, which must outlive any traversal of the trees.

use tracing::{debug, trace};

use crate::config::TreeConfig;
use crate::ir::atom::Handle;
use crate::ir::pattern_term::PatternTermPtr;
use crate::ir::variables::Variables;

#[derive(Debug)]
pub struct PatternTermBuilder {
    variables: Variables,
    config: TreeConfig,
    roots: Vec<PatternTermPtr>,
    terms: Vec<PatternTermPtr>,
    bound: Vec<PatternTermPtr>,
}

impl PatternTermBuilder {
    pub fn new(variables: Variables) -> Self {
        Self::with_config(variables, TreeConfig::default())
    }

    pub fn with_config(variables: Variables, config: TreeConfig) -> Self {
        PatternTermBuilder {
            variables,
            config,
            roots: Vec::new(),
            terms: Vec::new(),
            bound: Vec::new(),
        }
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Builds the tree for one top-level clause. Returns `UNDEFINED` for an
    /// undefined clause.
    pub fn build_root(&mut self, term: &Handle) -> PatternTermPtr {
        self.build_child(&PatternTermPtr::UNDEFINED, term)
    }

    /// Builds the subtree for `term` as the next child of `parent`.
    ///
    /// Children are created depth-first in outgoing-set order using an
    /// explicit stack, so deep patterns do not grow the call stack.
    pub fn build_child(&mut self, parent: &PatternTermPtr, term: &Handle) -> PatternTermPtr {
        let first_new = self.terms.len();
        let top = self.create(parent, term);
        if top.is_undefined() {
            return top;
        }
        if parent.is_undefined() {
            self.roots.push(top.clone());
        }

        let mut stack: Vec<(PatternTermPtr, usize)> = vec![(top.clone(), 0)];
        while let Some((ptm, next)) = stack.last_mut() {
            if *next >= ptm.get_term().get_arity() {
                stack.pop();
                continue;
            }
            let h = ptm.get_term().outgoing_atom(*next);
            *next += 1;
            let ptm = ptm.clone();
            if h.is_undefined() {
                // Keep the slot so child indices line up with the outgoing set
                ptm.add_empty_slot();
                continue;
            }
            let child = self.create(&ptm, &h);
            stack.push((child, 0));
        }

        debug!(
            "Built pattern term tree for {} ({} positions)",
            top.get_term(),
            self.terms.len() - first_new
        );
        top
    }

    /// Creates one position, records it in the index and marks it if it is
    /// a bound variable leaf.
    fn create(&mut self, parent: &PatternTermPtr, term: &Handle) -> PatternTermPtr {
        let ptm = PatternTermPtr::create(parent, term);
        if ptm.is_undefined() {
            return ptm;
        }
        if self.is_bound_variable(&ptm) {
            trace!("Marking bound variable {} at {}", ptm.get_term(), ptm);
            ptm.mark_bound_variable();
            self.bound.push(ptm.clone());
        }
        self.terms.push(ptm.clone());
        ptm
    }

    fn is_bound_variable(&self, ptm: &PatternTermPtr) -> bool {
        let h = ptm.get_term();
        h.get_arity() == 0
            && self.variables.contains(h)
            && (self.config.bind_quoted_variables || !ptm.is_quoted())
    }

    pub fn finish(self) -> PatternTermTree {
        PatternTermTree {
            roots: self.roots,
            terms: self.terms,
            bound: self.bound,
        }
    }
}

/// Strong index over every position of a pattern.
///
/// Dropping the tree releases every position nobody else holds; afterwards
/// the parents that remain report those children as expired.
#[derive(Debug, Default)]
pub struct PatternTermTree {
    roots: Vec<PatternTermPtr>,
    terms: Vec<PatternTermPtr>,
    bound: Vec<PatternTermPtr>,
}

impl PatternTermTree {
    /// One root per clause, in build order.
    pub fn roots(&self) -> &[PatternTermPtr] {
        &self.roots
    }

    /// Every position, in creation (pre-)order.
    pub fn terms(&self) -> &[PatternTermPtr] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// All positions instantiating `term`, in creation order.
    pub fn positions_of(&self, term: &Handle) -> Vec<PatternTermPtr> {
        self.terms.iter().filter(|ptm| ptm.get_term() == term).cloned().collect()
    }

    /// Positions that were marked as bound variables.
    pub fn bound_variable_positions(&self) -> &[PatternTermPtr] {
        &self.bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::atom::{Atom, AtomType};
    use crate::ir::atom_space::AtomSpace;

    #[test]
    fn test_one_position_per_occurrence() {
        let _ = crate::logging::init_logger(false, Some("debug"), false);
        let space = AtomSpace::new();
        let a = space.add_node(AtomType::Variable, "$a");
        let b = space.add_node(AtomType::Variable, "$b");
        let eval = space.add_link(AtomType::Evaluation, [a.clone(), b.clone()]);
        let clause = space.add_link(AtomType::Set, [a.clone(), eval]);

        let mut builder = PatternTermBuilder::new([a.clone(), b].into_iter().collect());
        let root = builder.build_root(&clause);
        let tree = builder.finish();

        assert_eq!(tree.len(), 5);
        assert_eq!(tree.roots().len(), 1);
        assert!(tree.roots()[0].ptr_eq(&root));
        assert_eq!(tree.positions_of(&a).len(), 2);
        assert_eq!(tree.bound_variable_positions().len(), 3);
    }

    #[test]
    fn test_preorder_creation() {
        let space = AtomSpace::new();
        let x = space.add_node(AtomType::Concept, "x");
        let y = space.add_node(AtomType::Concept, "y");
        let inner = space.add_link(AtomType::List, [x.clone()]);
        let clause = space.add_link(AtomType::List, [inner.clone(), y.clone()]);

        let mut builder = PatternTermBuilder::new(Variables::new());
        builder.build_root(&clause);
        let tree = builder.finish();

        let order: Vec<Handle> = tree.terms().iter().map(|p| p.get_term().clone()).collect();
        assert_eq!(order, vec![clause, inner, x, y]);
    }

    #[test]
    fn test_undefined_clause() {
        let mut builder = PatternTermBuilder::new(Variables::new());
        assert!(builder.build_root(&Handle::UNDEFINED).is_undefined());
        let tree = builder.finish();
        assert!(tree.is_empty());
        assert!(tree.roots().is_empty());
    }

    #[test]
    fn test_undefined_outgoing_element_keeps_its_slot() {
        let a = Atom::node(AtomType::Concept, "a");
        let clause = Atom::link(AtomType::List, [Handle::UNDEFINED, a.clone()]);

        let mut builder = PatternTermBuilder::new(Variables::new());
        let root = builder.build_root(&clause);
        let tree = builder.finish();

        assert_eq!(clause.get_arity(), 2);
        assert_eq!(root.arity(), 2);
        assert!(root.get_child(0).is_undefined());
        assert_eq!(root.get_child(1).get_term(), &a);
        assert_eq!(root.get_children().len(), 1);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_build_child_extends_existing_tree() {
        let space = AtomSpace::new();
        let x = space.add_node(AtomType::Variable, "$x");
        let clause = space.add_link(AtomType::And, [x.clone()]);
        let extra = space.add_link(AtomType::List, [x.clone()]);

        let mut builder = PatternTermBuilder::new([x.clone()].into_iter().collect());
        let root = builder.build_root(&clause);
        let added = builder.build_child(&root, &extra);
        let tree = builder.finish();

        assert_eq!(root.arity(), 2);
        assert!(root.get_child(1).ptr_eq(&added));
        assert!(added.get_child(0).has_bound_var());
        assert_eq!(tree.roots().len(), 1);
        assert_eq!(tree.len(), 4);
    }
}
