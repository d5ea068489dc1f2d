//! Context-disambiguation trees for graph-pattern matching.
//!
//! A query pattern shares sub-terms, but quotation, bound-variable presence
//! and placement under unordered links are properties of each occurrence.
//! `ir::builder` turns each pattern clause into a tree of `PatternTerm`
//! positions, one per occurrence, ready to be used as keys while a matcher
//! enumerates permutations.

pub mod config;
pub mod error;
pub mod ir;
pub mod logging;
