use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

use super::node_types::*;

// Content equality: two positions are equal when they hold the same atom,
// wherever they sit in their trees. Hash agrees with it.
impl PartialEq for PatternTermPtr {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.get_term() == other.get_term()
    }
}

impl Eq for PatternTermPtr {}

impl Hash for PatternTermPtr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.get_term().get_hash());
    }
}

/// Root-first path of short term hashes, e.g. `3f2a...:9c01...`; `-` for the sentinel.
impl fmt::Display for PatternTermPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_undefined() {
            return f.write_str("-");
        }
        let mut path = Vec::new();
        let mut current = self;
        while current.is_defined() {
            path.push(current.get_term().get_hash());
            current = current.get_parent();
        }
        let rendered: Vec<String> = path.iter().rev().map(|hash| format!("{:016x}", hash)).collect();
        f.write_str(&rendered.join(":"))
    }
}

impl fmt::Debug for PatternTermPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_undefined() {
            return f.write_str("PatternTermPtr::UNDEFINED");
        }
        f.debug_struct("PatternTerm")
            .field("path", &self.to_string())
            .field("term", &format_args!("{}", self.get_term()))
            .field("quotation", &self.get_quotation())
            .field("arity", &self.arity())
            .field("has_bound_var", &self.has_bound_var())
            .field("has_any_bound_var", &self.has_any_bound_var())
            .finish()
    }
}

impl PartialEq for TermPosition {
    fn eq(&self, other: &Self) -> bool {
        self.0.position_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for TermPosition {}

impl PartialOrd for TermPosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TermPosition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.position_cmp(&other.0)
    }
}

impl From<PatternTermPtr> for TermPosition {
    fn from(ptm: PatternTermPtr) -> Self {
        TermPosition(ptm)
    }
}

impl PatternTermSeq {
    /// Wrapping sum of the element term hashes; independent of element order.
    pub fn seq_hash(&self) -> u64 {
        self.0
            .iter()
            .fold(0u64, |acc, ptm| acc.wrapping_add(ptm.get_term().get_hash()))
    }
}

impl Hash for PatternTermSeq {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.seq_hash());
    }
}

impl Deref for PatternTermSeq {
    type Target = [PatternTermPtr];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<PatternTermPtr>> for PatternTermSeq {
    fn from(terms: Vec<PatternTermPtr>) -> Self {
        PatternTermSeq(terms)
    }
}

impl FromIterator<PatternTermPtr> for PatternTermSeq {
    fn from_iter<I: IntoIterator<Item = PatternTermPtr>>(iter: I) -> Self {
        PatternTermSeq(iter.into_iter().collect())
    }
}
