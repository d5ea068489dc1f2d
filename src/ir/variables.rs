use rustc_hash::FxHashSet;

use super::atom::Handle;

/// The variables bound by the query that owns a pattern.
///
/// Keeps declaration order alongside a set for membership tests.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    varseq: Vec<Handle>,
    varset: FxHashSet<Handle>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `var`; returns false if it was already declared.
    pub fn insert(&mut self, var: Handle) -> bool {
        if var.is_undefined() || !self.varset.insert(var.clone()) {
            return false;
        }
        self.varseq.push(var);
        true
    }

    pub fn contains(&self, h: &Handle) -> bool {
        self.varset.contains(h)
    }

    /// Declared variables, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Handle> {
        self.varseq.iter()
    }

    pub fn len(&self) -> usize {
        self.varseq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.varseq.is_empty()
    }
}

impl FromIterator<Handle> for Variables {
    fn from_iter<I: IntoIterator<Item = Handle>>(iter: I) -> Self {
        let mut vars = Variables::new();
        for var in iter {
            vars.insert(var);
        }
        vars
    }
}
