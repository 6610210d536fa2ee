//! Semantic analysis for minic, a single-function procedural language with
//! `int` and `bool` variables, declarations, assignment and return.
//!
//! The parser is external: it hands over a [`ast::Program`], either built in
//! code or deserialized from JSON. [`semantic::analyze`] walks it once,
//! type-checking, folding constants and filling a nested-scope symbol table.

pub mod ast;
pub mod semantic;
