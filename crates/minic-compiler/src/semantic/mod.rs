pub mod analyzer;
pub mod scope;
pub mod type_checker;
pub mod types;

pub use analyzer::{Analysis, AnalysisOutcome, SemanticAnalyzer, Summary};
pub use scope::{Scope, ScopeError, ScopeId, Statistics, Symbol, SymbolTable};
pub use types::{Type, Value};

use crate::ast::nodes::Program;

/// Run semantic analysis on the given program.
///
/// Returns the finished symbol table together with all errors and warnings.
/// A fresh analyzer is used per call, so separate programs never share state.
pub fn analyze(program: &Program) -> Analysis {
    SemanticAnalyzer::new().analyze(program)
}
