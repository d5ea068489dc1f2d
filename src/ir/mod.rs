pub mod atom;
pub mod atom_space;
pub mod builder;
pub mod formatter;
pub mod pattern_term;
pub mod quotation;
pub mod variables;
