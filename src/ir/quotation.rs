use std::fmt;

use super::atom::AtomType;

/// Quotation state of a pattern position.
///
/// `Quote` raises the level and `Unquote` lowers it; `LocalQuote` quotes only
/// the link directly beneath it, and only at level 0. Anything at a level
/// above 0, or locally quoted, is matched literally instead of being
/// interpreted as pattern syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Quotation {
    level: i32,
    local: bool,
}

impl Quotation {
    pub fn new(level: i32, local: bool) -> Self {
        Quotation { level, local }
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn is_locally_quoted(&self) -> bool {
        self.local
    }

    pub fn is_quoted(&self) -> bool {
        self.local || self.level > 0
    }

    pub fn is_unquoted(&self) -> bool {
        self.level == 0
    }

    /// True if an atom of type `t` is acting as a quotation marker at this
    /// state, i.e. it changes the quotation of its body rather than being
    /// quoted content itself.
    pub fn consumable(&self, t: AtomType) -> bool {
        match t {
            AtomType::Quote | AtomType::LocalQuote => self.level == 0,
            AtomType::Unquote => self.level == 1,
            _ => false,
        }
    }

    /// Descend through an atom of type `t`.
    pub fn update(&mut self, t: AtomType) {
        let was_local = self.local;
        self.local = self.level == 0 && t == AtomType::LocalQuote;

        // A locally quoted link is taken literally, markers included
        if !was_local {
            match t {
                AtomType::Quote => self.level += 1,
                AtomType::Unquote => self.level -= 1,
                _ => {}
            }
        }
    }
}

impl fmt::Display for Quotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level={} local={}", self.level, self.local)
    }
}
