//! Content-addressed atom store.
//!
//! Adding an atom whose content is already present returns the existing
//! handle, so every distinct term is allocated once and shared by all the
//! links (and pattern positions) that refer to it.

use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use tracing::trace;

use super::atom::{Atom, AtomType, Handle};

#[derive(Debug, Default)]
pub struct AtomSpace {
    atoms: DashMap<Handle, (), FxBuildHasher>,
}

impl AtomSpace {
    pub fn new() -> Self {
        AtomSpace {
            atoms: DashMap::with_hasher(FxBuildHasher),
        }
    }

    /// Returns the interned copy of `h`, inserting it (and, for links, its
    /// outgoing set) if not yet present.
    pub fn add_atom(&self, h: &Handle) -> Handle {
        let Some(atom) = h.atom() else {
            return Handle::UNDEFINED;
        };
        if let Some(existing) = self.atoms.get(h) {
            return existing.key().clone();
        }
        let candidate = match atom {
            Atom::Node { .. } => h.clone(),
            Atom::Link { atom_type, outgoing, .. } => {
                let interned: Vec<Handle> = outgoing.iter().map(|o| self.add_atom(o)).collect();
                Atom::link(*atom_type, interned)
            }
        };
        let entry = self.atoms.entry(candidate).or_insert(());
        trace!("Interned {}", entry.key());
        entry.key().clone()
    }

    pub fn add_node(&self, atom_type: AtomType, name: &str) -> Handle {
        self.add_atom(&Atom::node(atom_type, name))
    }

    pub fn add_link(&self, atom_type: AtomType, outgoing: impl IntoIterator<Item = Handle>) -> Handle {
        self.add_atom(&Atom::link(atom_type, outgoing))
    }

    pub fn contains(&self, h: &Handle) -> bool {
        self.atoms.contains_key(h)
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_content_is_shared() {
        let space = AtomSpace::new();
        let a1 = space.add_node(AtomType::Concept, "a");
        let a2 = space.add_node(AtomType::Concept, "a");
        assert!(a1.ptr_eq(&a2));
        assert_eq!(space.len(), 1);
    }

    #[test]
    fn test_links_intern_their_outgoing_set() {
        let space = AtomSpace::new();
        let outside = Atom::node(AtomType::Variable, "$x");
        let link = space.add_link(AtomType::List, [outside.clone()]);
        let x = space.add_node(AtomType::Variable, "$x");

        assert!(link.outgoing_atom(0).ptr_eq(&x));
        assert!(!link.outgoing_atom(0).ptr_eq(&outside));
        assert_eq!(space.len(), 2);
        assert!(space.contains(&outside));
    }

    #[test]
    fn test_undefined_is_not_stored() {
        let space = AtomSpace::new();
        assert!(space.add_atom(&Handle::UNDEFINED).is_undefined());
        assert!(space.is_empty());
    }
}
