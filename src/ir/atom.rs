//! Atoms: the immutable, content-addressed terms that patterns are made of.
//!
//! An atom is either a node (a type and a name) or a link (a type and an
//! ordered outgoing set of handles). Every atom caches a content hash, so
//! unequal atoms are nearly always told apart without walking the term.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use archery::ArcK;
use rpds::Vector;

pub type HandleVector = Vector<Handle, ArcK>;

/// Type tag of an atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AtomType {
    // Nodes
    Concept,
    Predicate,
    Number,
    Variable,
    Glob,

    // Links
    List,
    Set,
    And,
    Or,
    Evaluation,
    Present,
    Quote,
    Unquote,
    LocalQuote,
}

impl AtomType {
    pub fn is_node(self) -> bool {
        matches!(
            self,
            AtomType::Concept | AtomType::Predicate | AtomType::Number | AtomType::Variable | AtomType::Glob
        )
    }

    pub fn is_link(self) -> bool {
        !self.is_node()
    }

    /// Links whose outgoing set is a multiset rather than a sequence.
    pub fn is_unordered(self) -> bool {
        matches!(self, AtomType::Set | AtomType::And | AtomType::Or | AtomType::Present)
    }

    pub fn is_variable(self) -> bool {
        matches!(self, AtomType::Variable | AtomType::Glob)
    }

    /// Quotation markers: `Quote`, `Unquote` and `LocalQuote`.
    pub fn is_quoting(self) -> bool {
        matches!(self, AtomType::Quote | AtomType::Unquote | AtomType::LocalQuote)
    }

    pub fn name(self) -> &'static str {
        match self {
            AtomType::Concept => "Concept",
            AtomType::Predicate => "Predicate",
            AtomType::Number => "Number",
            AtomType::Variable => "Variable",
            AtomType::Glob => "Glob",
            AtomType::List => "List",
            AtomType::Set => "Set",
            AtomType::And => "And",
            AtomType::Or => "Or",
            AtomType::Evaluation => "Evaluation",
            AtomType::Present => "Present",
            AtomType::Quote => "Quote",
            AtomType::Unquote => "Unquote",
            AtomType::LocalQuote => "LocalQuote",
        }
    }
}

impl fmt::Display for AtomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An immutable term. Construct through `Atom::node`/`Atom::link`, or
/// through an `AtomSpace` to get interned handles.
#[derive(Debug)]
pub enum Atom {
    Node {
        atom_type: AtomType,
        name: String,
        hash: u64,
    },
    Link {
        atom_type: AtomType,
        outgoing: HandleVector,
        hash: u64,
    },
}

fn digest_to_u64(hasher: &blake3::Hasher) -> u64 {
    let digest = hasher.finalize();
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(prefix)
}

fn node_hash(atom_type: AtomType, name: &str) -> u64 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&[b'N', atom_type as u8]);
    hasher.update(name.as_bytes());
    digest_to_u64(&hasher)
}

fn link_hash(atom_type: AtomType, outgoing: &HandleVector) -> u64 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&[b'L', atom_type as u8]);
    for h in outgoing.iter() {
        hasher.update(&h.get_hash().to_le_bytes());
    }
    digest_to_u64(&hasher)
}

impl Atom {
    /// Create an un-interned node.
    pub fn node(atom_type: AtomType, name: &str) -> Handle {
        debug_assert!(atom_type.is_node(), "{} is not a node type", atom_type);
        Handle::new(Atom::Node {
            atom_type,
            name: name.to_string(),
            hash: node_hash(atom_type, name),
        })
    }

    /// Create an un-interned link over `outgoing`, in order.
    pub fn link(atom_type: AtomType, outgoing: impl IntoIterator<Item = Handle>) -> Handle {
        debug_assert!(atom_type.is_link(), "{} is not a link type", atom_type);
        let outgoing: HandleVector = outgoing.into_iter().collect();
        let hash = link_hash(atom_type, &outgoing);
        Handle::new(Atom::Link { atom_type, outgoing, hash })
    }

    pub fn get_type(&self) -> AtomType {
        match self {
            Atom::Node { atom_type, .. } | Atom::Link { atom_type, .. } => *atom_type,
        }
    }

    pub fn get_hash(&self) -> u64 {
        match self {
            Atom::Node { hash, .. } | Atom::Link { hash, .. } => *hash,
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Atom::Node { .. })
    }

    pub fn is_link(&self) -> bool {
        matches!(self, Atom::Link { .. })
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Atom::Node { name, .. } => Some(name),
            Atom::Link { .. } => None,
        }
    }

    /// Outgoing set; `None` for nodes.
    pub fn outgoing(&self) -> Option<&HandleVector> {
        match self {
            Atom::Link { outgoing, .. } => Some(outgoing),
            Atom::Node { .. } => None,
        }
    }

    pub fn get_arity(&self) -> usize {
        self.outgoing().map_or(0, |o| o.len())
    }

    fn content_cmp(&self, other: &Atom) -> Ordering {
        self.get_hash()
            .cmp(&other.get_hash())
            .then_with(|| self.get_type().cmp(&other.get_type()))
            .then_with(|| match (self, other) {
                (Atom::Node { name: l, .. }, Atom::Node { name: r, .. }) => l.cmp(r),
                (Atom::Link { outgoing: l, .. }, Atom::Link { outgoing: r, .. }) => l.iter().cmp(r.iter()),
                (Atom::Node { .. }, Atom::Link { .. }) => Ordering::Less,
                (Atom::Link { .. }, Atom::Node { .. }) => Ordering::Greater,
            })
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        self.content_cmp(other) == Ordering::Equal
    }
}

impl Eq for Atom {}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Node { atom_type, name, .. } => write!(f, "({} {:?})", atom_type, name),
            Atom::Link { atom_type, outgoing, .. } => {
                write!(f, "({}", atom_type)?;
                for h in outgoing.iter() {
                    write!(f, " {}", h)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Nullable shared reference to an atom.
///
/// Equality is content equality (with a pointer fast path) and the total
/// order agrees with it: content hash first, then type, then name or
/// outgoing set. `Handle::UNDEFINED` compares below every defined handle.
#[derive(Debug, Clone, Default)]
pub struct Handle(Option<Arc<Atom>>);

impl Handle {
    pub const UNDEFINED: Handle = Handle(None);

    pub fn new(atom: Atom) -> Self {
        Handle(Some(Arc::new(atom)))
    }

    pub fn atom(&self) -> Option<&Atom> {
        self.0.as_deref()
    }

    pub fn is_defined(&self) -> bool {
        self.0.is_some()
    }

    pub fn is_undefined(&self) -> bool {
        self.0.is_none()
    }

    /// True when both handles point at the same allocation (or are both undefined).
    pub fn ptr_eq(&self, other: &Handle) -> bool {
        match (&self.0, &other.0) {
            (Some(l), Some(r)) => Arc::ptr_eq(l, r),
            (None, None) => true,
            _ => false,
        }
    }

    pub fn get_type(&self) -> Option<AtomType> {
        self.atom().map(Atom::get_type)
    }

    /// Content hash; 0 for `UNDEFINED`.
    pub fn get_hash(&self) -> u64 {
        self.atom().map_or(0, Atom::get_hash)
    }

    pub fn get_arity(&self) -> usize {
        self.atom().map_or(0, Atom::get_arity)
    }

    pub fn name(&self) -> Option<&str> {
        self.atom().and_then(Atom::name)
    }

    /// Iterates the outgoing set in order (nothing for nodes and `UNDEFINED`).
    pub fn outgoing(&self) -> impl Iterator<Item = &Handle> {
        self.atom().and_then(Atom::outgoing).into_iter().flat_map(|o| o.iter())
    }

    /// The outgoing element at `pos`, or `UNDEFINED` if out of range.
    pub fn outgoing_atom(&self, pos: usize) -> Handle {
        self.atom()
            .and_then(Atom::outgoing)
            .and_then(|o| o.get(pos))
            .cloned()
            .unwrap_or(Handle::UNDEFINED)
    }

    pub fn is_node(&self) -> bool {
        self.atom().is_some_and(Atom::is_node)
    }

    pub fn is_link(&self) -> bool {
        self.atom().is_some_and(Atom::is_link)
    }
}

impl PartialEq for Handle {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Some(l), Some(r)) => Arc::ptr_eq(l, r) || **l == **r,
            (None, None) => true,
            _ => false,
        }
    }
}

impl Eq for Handle {}

impl Hash for Handle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.get_hash());
    }
}

impl PartialOrd for Handle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Handle {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.0, &other.0) {
            (Some(l), Some(r)) if Arc::ptr_eq(l, r) => Ordering::Equal,
            (Some(l), Some(r)) => l.content_cmp(r),
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.atom() {
            Some(atom) => fmt::Display::fmt(atom, f),
            None => f.write_str("<undefined>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_creation() {
        let a = Atom::node(AtomType::Concept, "a");
        assert!(a.is_node());
        assert_eq!(a.name(), Some("a"));
        assert_eq!(a.get_type(), Some(AtomType::Concept));
        assert_eq!(a.get_arity(), 0);
    }

    #[test]
    fn test_content_equality_across_allocations() {
        let a1 = Atom::node(AtomType::Concept, "a");
        let a2 = Atom::node(AtomType::Concept, "a");
        assert!(!a1.ptr_eq(&a2));
        assert_eq!(a1, a2);
        assert_eq!(a1.get_hash(), a2.get_hash());
        assert_eq!(a1.cmp(&a2), Ordering::Equal);

        let l1 = Atom::link(AtomType::List, [a1.clone(), Atom::node(AtomType::Variable, "$x")]);
        let l2 = Atom::link(AtomType::List, [a2, Atom::node(AtomType::Variable, "$x")]);
        assert_eq!(l1, l2);
    }

    #[test]
    fn test_type_and_order_matter() {
        let concept = Atom::node(AtomType::Concept, "a");
        let predicate = Atom::node(AtomType::Predicate, "a");
        assert_ne!(concept, predicate);

        let x = Atom::node(AtomType::Variable, "$x");
        let y = Atom::node(AtomType::Variable, "$y");
        let xy = Atom::link(AtomType::List, [x.clone(), y.clone()]);
        let yx = Atom::link(AtomType::List, [y, x]);
        assert_ne!(xy, yx);
        assert_ne!(xy.cmp(&yx), Ordering::Equal);
    }

    #[test]
    fn test_undefined_handle() {
        let undefined = Handle::UNDEFINED;
        assert!(undefined.is_undefined());
        assert_eq!(undefined.get_hash(), 0);
        assert_eq!(undefined.get_arity(), 0);
        assert_eq!(undefined.outgoing().count(), 0);
        assert!(undefined < Atom::node(AtomType::Concept, "a"));
        assert_eq!(undefined.to_string(), "<undefined>");
    }

    #[test]
    fn test_outgoing_access() {
        let a = Atom::node(AtomType::Concept, "a");
        let b = Atom::node(AtomType::Concept, "b");
        let link = Atom::link(AtomType::Evaluation, [a.clone(), b.clone()]);
        assert_eq!(link.get_arity(), 2);
        assert_eq!(link.outgoing_atom(0), a);
        assert_eq!(link.outgoing_atom(1), b);
        assert!(link.outgoing_atom(2).is_undefined());
    }

    #[test]
    fn test_display() {
        let link = Atom::link(
            AtomType::List,
            [Atom::node(AtomType::Variable, "$x"), Atom::node(AtomType::Concept, "a")],
        );
        assert_eq!(link.to_string(), r#"(List (Variable "$x") (Concept "a"))"#);
    }

    #[test]
    fn test_type_classification() {
        assert!(AtomType::Set.is_unordered());
        assert!(!AtomType::List.is_unordered());
        assert!(AtomType::Glob.is_variable());
        assert!(AtomType::LocalQuote.is_quoting());
        assert!(AtomType::Quote.is_link());
        assert!(AtomType::Number.is_node());
    }
}
