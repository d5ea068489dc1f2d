use std::cmp::Ordering;
use std::sync::{Arc, Weak};
use std::sync::atomic::Ordering as MemoryOrdering;

use super::node_types::*;

impl PatternTermPtr {
    /// True if `candidate` (by identity) is a proper ancestor of this position.
    ///
    /// Used to keep a variable from being bound across a scope boundary.
    pub fn is_descendant_of(&self, candidate: &PatternTermPtr) -> bool {
        let mut current = self.get_parent();
        while current.is_defined() {
            if current.ptr_eq(candidate) {
                return true;
            }
            current = current.get_parent();
        }
        false
    }

    /// Registers `child` for traversal. `child` must already have this
    /// position as its parent; only a weak reference is kept.
    pub fn add_child(&self, child: &PatternTermPtr) {
        let (Some(term), Some(child_term)) = (&self.0, &child.0) else {
            return;
        };
        debug_assert!(
            child.get_parent().ptr_eq(self),
            "add_child called with a position belonging to another parent"
        );
        term.outgoing.write().push(Arc::downgrade(child_term));
    }

    /// Reserves a child slot with nothing in it, for an undefined element of
    /// the term's outgoing set. It reads as expired.
    pub(crate) fn add_empty_slot(&self) {
        if let Some(term) = &self.0 {
            term.outgoing.write().push(Weak::new());
        }
    }

    /// The children that are still alive, in order. Expired slots are skipped.
    pub fn get_children(&self) -> Vec<PatternTermPtr> {
        match &self.0 {
            Some(term) => term
                .outgoing
                .read()
                .iter()
                .filter_map(|w| w.upgrade().map(|t| PatternTermPtr(Some(t))))
                .collect(),
            None => Vec::new(),
        }
    }

    /// The child at `pos`, or `UNDEFINED` if out of range or expired.
    pub fn get_child(&self, pos: usize) -> PatternTermPtr {
        self.0
            .as_ref()
            .and_then(|term| term.outgoing.read().get(pos).and_then(|w| w.upgrade()))
            .map_or(PatternTermPtr::UNDEFINED, |t| PatternTermPtr(Some(t)))
    }

    /// Number of child slots, expired ones included.
    pub fn arity(&self) -> usize {
        self.0.as_ref().map_or(0, |term| term.outgoing.read().len())
    }

    pub fn has_bound_var(&self) -> bool {
        self.0
            .as_ref()
            .is_some_and(|term| term.has_bound_var.load(MemoryOrdering::Acquire))
    }

    pub fn has_any_bound_var(&self) -> bool {
        self.0
            .as_ref()
            .is_some_and(|term| term.has_any_bound_var.load(MemoryOrdering::Acquire))
    }

    /// Records that this position is a variable bound by the query.
    ///
    /// Sets the shallow flag here and on the parent (which now has a bound
    /// variable among its direct children), then propagates the deep flag.
    pub fn mark_bound_variable(&self) {
        let Some(term) = &self.0 else { return };
        term.has_bound_var.store(true, MemoryOrdering::Release);
        if let Some(parent) = &term.parent.0 {
            parent.has_bound_var.store(true, MemoryOrdering::Release);
        }
        self.propagate_any_bound_var();
    }

    /// Sets `has_any_bound_var` here and on every ancestor, stopping at the
    /// first position that already had it.
    pub fn propagate_any_bound_var(&self) {
        let mut current = self;
        while let Some(term) = &current.0 {
            if term.has_any_bound_var.swap(true, MemoryOrdering::AcqRel) {
                break;
            }
            current = &term.parent;
        }
    }

    /// Total order over positions: by term, then by the parents' order,
    /// walking up until the terms differ. A root sorts before any position
    /// with the same term that has a parent.
    ///
    /// When the two ancestor chains hold the same atoms all the way up, the
    /// parents are ordered by creation, so occurrences under distinct parent
    /// positions never compare `Equal`. Only siblings of one parent holding
    /// the same atom (the two `$a` in `(List $a $a)`) do.
    pub fn position_cmp(&self, other: &PatternTermPtr) -> Ordering {
        let mut lhs = self;
        let mut rhs = other;
        loop {
            if lhs.ptr_eq(rhs) {
                break;
            }
            let (l_term, r_term) = (lhs.get_term(), rhs.get_term());
            if l_term != r_term {
                return l_term.cmp(r_term);
            }
            lhs = lhs.get_parent();
            rhs = rhs.get_parent();
        }

        if self.ptr_eq(other) {
            return Ordering::Equal;
        }
        match (&self.get_parent().0, &other.get_parent().0) {
            (Some(l), Some(r)) => l.sequence.cmp(&r.sequence),
            _ => Ordering::Equal,
        }
    }
}
