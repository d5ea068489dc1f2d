// Pattern Term Module
//
// Positional IR for query patterns. A pattern shares sub-terms, but matching
// needs to know where each occurrence sits, so every occurrence of an atom
// gets its own PatternTerm:
//
// - node_types: PatternTerm, the PatternTermPtr handle and its sentinel, key wrappers
// - node_operations: tree navigation, child registration, bound-variable propagation
// - node_impl: Trait implementations (PartialEq, Hash, Ord, Display, etc.)

pub mod node_types;
pub mod node_operations;
pub mod node_impl;

pub use node_types::*;
