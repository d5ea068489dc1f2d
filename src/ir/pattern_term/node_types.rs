use std::sync::atomic::{AtomicBool, AtomicU64, Ordering as MemoryOrdering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::warn;

use crate::ir::atom::Handle;
use crate::ir::quotation::Quotation;

pub(crate) static UNDEFINED_HANDLE: Handle = Handle::UNDEFINED;
pub(crate) static UNDEFINED_TERM: PatternTermPtr = PatternTermPtr::UNDEFINED;

static NEXT_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// One occurrence of an atom at one fixed location in a query pattern.
///
/// Given the pattern
///
/// ```text
/// (Set (Variable "$a")
///      (Evaluation (Variable "$a") (Variable "$b")))
/// ```
///
/// `$a` occurs twice, so it gets two `PatternTerm`s, both referring to the
/// same atom. Positions own their parent and only weakly reference their
/// children: holding any position keeps its ancestors alive, while the
/// children stay alive only as long as someone else (normally the
/// `PatternTermTree` produced by the builder) holds them.
///
/// After construction only the quotation state, the child list and the two
/// bound-variable flags change, and the flags only ever go from false to true.
pub struct PatternTerm {
    /// The atom at this position, with any consumed quotation marker stripped.
    pub(crate) handle: Handle,
    /// The `Quote`/`Unquote`/`LocalQuote` link consumed to reach `handle`.
    pub(crate) quote: Handle,
    pub(crate) parent: PatternTermPtr,
    /// Process-wide creation counter; breaks ties between content-identical parents.
    pub(crate) sequence: u64,
    pub(crate) outgoing: RwLock<Vec<Weak<PatternTerm>>>,
    pub(crate) quotation: RwLock<Quotation>,
    /// Set when any position in the subtree rooted here is a bound variable.
    pub(crate) has_any_bound_var: AtomicBool,
    /// Set on a bound variable and on its parent: the shallow flag.
    pub(crate) has_bound_var: AtomicBool,
}

/// Shared pointer to a `PatternTerm`, or the `UNDEFINED` sentinel.
///
/// Every accessor accepts the sentinel: its term is `Handle::UNDEFINED`, its
/// parent is `UNDEFINED`, and it has no children.
#[derive(Clone, Default)]
pub struct PatternTermPtr(pub(crate) Option<Arc<PatternTerm>>);

impl PatternTermPtr {
    pub const UNDEFINED: PatternTermPtr = PatternTermPtr(None);

    /// Creates the position for `h` beneath `parent` (a root when `parent` is
    /// `UNDEFINED`) and registers it in the parent's child list.
    ///
    /// A quotation marker that is doing its job at this depth is consumed:
    /// the position refers to the marker's single body atom and remembers the
    /// marker as its quote.
    pub(crate) fn create(parent: &PatternTermPtr, h: &Handle) -> PatternTermPtr {
        let Some(atom_type) = h.get_type() else {
            return PatternTermPtr::UNDEFINED;
        };

        // A local quote covers only the atom it was consumed at
        let mut quotation = Quotation::new(parent.get_quotation().level(), false);
        let (handle, quote) = if quotation.consumable(atom_type) {
            if h.get_arity() == 1 {
                (h.outgoing_atom(0), h.clone())
            } else {
                warn!("{} expects exactly one body atom, found {}; not consuming it", atom_type, h.get_arity());
                (h.clone(), Handle::UNDEFINED)
            }
        } else {
            (h.clone(), Handle::UNDEFINED)
        };
        quotation.update(atom_type);

        let ptm = PatternTermPtr(Some(Arc::new(PatternTerm {
            handle,
            quote,
            parent: parent.clone(),
            sequence: NEXT_SEQUENCE.fetch_add(1, MemoryOrdering::Relaxed),
            outgoing: RwLock::new(Vec::new()),
            quotation: RwLock::new(quotation),
            has_any_bound_var: AtomicBool::new(false),
            has_bound_var: AtomicBool::new(false),
        })));
        parent.add_child(&ptm);
        ptm
    }

    pub fn is_defined(&self) -> bool {
        self.0.is_some()
    }

    pub fn is_undefined(&self) -> bool {
        self.0.is_none()
    }

    /// Reference identity; the sentinel is identical only to itself.
    pub fn ptr_eq(&self, other: &PatternTermPtr) -> bool {
        match (&self.0, &other.0) {
            (Some(l), Some(r)) => Arc::ptr_eq(l, r),
            (None, None) => true,
            _ => false,
        }
    }

    /// The atom this position instantiates.
    pub fn get_term(&self) -> &Handle {
        self.0.as_ref().map_or(&UNDEFINED_HANDLE, |t| &t.handle)
    }

    /// The quotation marker consumed at this position, if any.
    pub fn get_quote(&self) -> &Handle {
        self.0.as_ref().map_or(&UNDEFINED_HANDLE, |t| &t.quote)
    }

    pub fn get_parent(&self) -> &PatternTermPtr {
        self.0.as_ref().map_or(&UNDEFINED_TERM, |t| &t.parent)
    }

    pub fn get_quotation(&self) -> Quotation {
        self.0.as_ref().map_or_else(Quotation::default, |t| *t.quotation.read())
    }

    /// Runs `f` on this position's quotation state. No-op on the sentinel.
    pub fn with_quotation_mut<R>(&self, f: impl FnOnce(&mut Quotation) -> R) -> Option<R> {
        self.0.as_ref().map(|t| f(&mut *t.quotation.write()))
    }

    pub fn is_quoted(&self) -> bool {
        self.get_quotation().is_quoted()
    }
}

/// Key wrapper ordering positions by term and then by ancestry.
///
/// `PatternTermPtr` compares equal whenever two positions hold the same atom.
/// During permutation search two occurrences of the same variable under
/// different parent positions must be distinct keys, even when those parents
/// hold the same atom, so ordered containers key on
/// `TermPosition`, whose `Eq` and `Ord` both come from
/// `PatternTermPtr::position_cmp`.
#[derive(Clone, Debug)]
pub struct TermPosition(pub PatternTermPtr);

/// An ordered sequence of positions usable as a hash-map key.
///
/// Equality is element-wise term equality, in order. The hash is the sum of
/// the element term hashes, so permutations of one multiset of terms share a
/// bucket while still comparing unequal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatternTermSeq(pub Vec<PatternTermPtr>);
