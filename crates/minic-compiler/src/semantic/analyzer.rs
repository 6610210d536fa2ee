use std::fmt;

use minic_common::{Diagnostic, DiagnosticBag, DiagnosticKind, Span};
use tracing::debug;

use crate::ast::nodes::*;
use crate::ast::TypeName;

use super::scope::SymbolTable;
use super::type_checker::{self, types_compatible};
use super::types::{display_value, Type, Value};

/// What analysis learned about one expression.
///
/// Type inference and constant evaluation are independent: an expression can
/// type-check while its value stays unknown (for example when it reads an
/// uninitialized variable).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOutcome {
    pub static_type: Type,
    pub constant_value: Option<Value>,
}

impl AnalysisOutcome {
    fn new(static_type: Type, constant_value: Option<Value>) -> Self {
        Self {
            static_type,
            constant_value,
        }
    }

    fn error() -> Self {
        Self::new(Type::Error, None)
    }
}

/// Result of analyzing one program: the finished symbol table and every
/// diagnostic in report order.
#[derive(Debug)]
pub struct Analysis {
    symbols: SymbolTable,
    diagnostics: DiagnosticBag,
}

impl Analysis {
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn diagnostics(&self) -> &DiagnosticBag {
        &self.diagnostics
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.errors()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.warnings()
    }

    /// Whether the program is rejected.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            errors: self.errors().count(),
            warnings: self.warnings().count(),
        }
    }

    pub fn into_parts(self) -> (SymbolTable, DiagnosticBag) {
        (self.symbols, self.diagnostics)
    }
}

/// Error/warning counts with the pass/fail verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
}

impl Summary {
    pub fn passed(&self) -> bool {
        self.errors == 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== SEMANTIC ANALYSIS SUMMARY ===")?;
        writeln!(f, "Errors: {}", self.errors)?;
        writeln!(f, "Warnings: {}", self.warnings)?;
        if self.passed() {
            write!(f, "Semantic analysis PASSED successfully!")
        } else {
            write!(f, "Semantic analysis FAILED due to errors.")
        }
    }
}

/// Single-pass type checker, constant folder, and symbol table builder.
///
/// Every problem is recorded as a diagnostic and analysis carries on with a
/// placeholder (the `error` type, a zero value, or a skipped declaration), so
/// one run reports everything it can find.
pub struct SemanticAnalyzer {
    symbols: SymbolTable,
    diagnostics: DiagnosticBag,
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self {
            symbols: SymbolTable::new(),
            diagnostics: DiagnosticBag::new(),
        }
    }

    /// Analyze `program` and hand back the symbol table and diagnostics.
    pub fn analyze(mut self, program: &Program) -> Analysis {
        debug!("semantic analysis started");
        self.analyze_function(&program.function);
        debug!(
            errors = self.diagnostics.errors().count(),
            warnings = self.diagnostics.warnings().count(),
            "semantic analysis completed"
        );
        Analysis {
            symbols: self.symbols,
            diagnostics: self.diagnostics,
        }
    }

    fn error(&mut self, kind: DiagnosticKind, message: String, span: Span) {
        self.diagnostics.push(kind, message, span);
    }

    // ====================================================================
    // Function and parameters
    // ====================================================================

    fn analyze_function(&mut self, func: &FunctionDef) {
        debug!(function = %func.name, return_type = %func.return_type, "analyzing function");
        self.symbols.enter_scope(&format!("function_{}", func.name));

        for param in &func.params {
            self.analyze_param(param);
        }

        for stmt in &func.body {
            if let Some(ty) = self.analyze_stmt(stmt) {
                debug!(function = %func.name, ty = %ty, "return statement");
            }
        }

        if func.return_type != TypeName::Void && !func.has_return() {
            self.error(
                DiagnosticKind::MissingReturn,
                format!(
                    "Function '{}' with return type '{}' must have a return statement",
                    func.name, func.return_type
                ),
                func.span,
            );
        }

        // The function scope is always current here: nothing else enters one.
        if let Err(err) = self.symbols.exit_scope() {
            debug!(error = %err, "function scope already closed");
        }
    }

    fn analyze_param(&mut self, param: &Param) {
        if let Some(existing) = self.symbols.lookup_local(&param.name) {
            let previous = Span::new(existing.declared_at, existing.declared_at);
            self.diagnostics.report(
                Diagnostic::new(
                    DiagnosticKind::StructuralDuplicate,
                    format!("Parameter '{}' is already declared in this scope", param.name),
                )
                .with_span(param.span)
                .with_related(previous, "previously declared here"),
            );
            return;
        }

        let ty = Type::from_annotation(param.ty);
        // Checked above, so the insert cannot collide.
        let _ = self
            .symbols
            .declare_with_value(&param.name, ty, ty.default_value(), param.span.start);
        debug!(name = %param.name, ty = %ty, "declared parameter");
    }

    // ====================================================================
    // Statements
    // ====================================================================

    /// Analyze one statement. Returns the static type of a `return`.
    fn analyze_stmt(&mut self, stmt: &Stmt) -> Option<Type> {
        match &stmt.kind {
            StmtKind::Declaration { ty, vars } => {
                self.analyze_declaration(*ty, vars);
                None
            }
            StmtKind::Assignment { target, value } => {
                self.analyze_assignment(target, value, stmt.span);
                None
            }
            StmtKind::Return { value } => Some(match value {
                Some(expr) => {
                    let outcome = self.analyze_expr(expr);
                    debug!(value = %display_value(outcome.constant_value), "return with value");
                    outcome.static_type
                }
                None => Type::Void,
            }),
            StmtKind::Expr { expr } => {
                self.analyze_expr(expr);
                None
            }
        }
    }

    fn analyze_declaration(&mut self, ty: TypeName, vars: &[VarDecl]) {
        let declared = Type::from_annotation(ty);

        for var in vars {
            if let Some(existing) = self.symbols.lookup_local(&var.name) {
                let previous = Span::new(existing.declared_at, existing.declared_at);
                self.diagnostics.report(
                    Diagnostic::new(
                        DiagnosticKind::StructuralDuplicate,
                        format!("Variable '{}' is already declared in this scope", var.name),
                    )
                    .with_span(var.span)
                    .with_related(previous, "previously declared here"),
                );
                continue;
            }

            match &var.init {
                Some(init) => {
                    let outcome = self.analyze_expr(init);
                    if !types_compatible(declared, outcome.static_type) {
                        self.error(
                            DiagnosticKind::TypeMismatch,
                            format!(
                                "Cannot assign {} to variable '{}' of type {}",
                                outcome.static_type, var.name, declared
                            ),
                            init.span,
                        );
                    }
                    let _ = self.symbols.declare_with_value(
                        &var.name,
                        declared,
                        outcome.constant_value,
                        var.span.start,
                    );
                    debug!(
                        name = %var.name,
                        value = %display_value(outcome.constant_value),
                        "declared and initialized variable"
                    );
                }
                None => {
                    let _ = self.symbols.declare(&var.name, declared, var.span.start);
                    debug!(name = %var.name, ty = %declared, "declared uninitialized variable");
                    self.diagnostics.push(
                        DiagnosticKind::UninitializedDeclaration,
                        format!("Variable '{}' declared but not initialized", var.name),
                        var.span,
                    );
                }
            }
        }
    }

    fn analyze_assignment(&mut self, target: &str, value: &Expr, span: Span) {
        let Some(declared) = self.symbols.get_type(target) else {
            self.error(
                DiagnosticKind::UnknownIdentifier,
                format!("Variable '{}' is not declared", target),
                span,
            );
            return;
        };

        let outcome = self.analyze_expr(value);
        if !types_compatible(declared, outcome.static_type) {
            self.error(
                DiagnosticKind::TypeMismatch,
                format!(
                    "Cannot assign {} to variable '{}' of type {}",
                    outcome.static_type, target, declared
                ),
                value.span,
            );
        }

        self.symbols.assign(target, outcome.constant_value);
        debug!(name = %target, value = %display_value(outcome.constant_value), "assigned");
    }

    // ====================================================================
    // Expressions
    // ====================================================================

    fn analyze_expr(&mut self, expr: &Expr) -> AnalysisOutcome {
        match &expr.kind {
            ExprKind::Number { value } => AnalysisOutcome::new(Type::Int, Some(Value::Int(*value))),
            ExprKind::Boolean { value } => {
                AnalysisOutcome::new(Type::Bool, Some(Value::Bool(*value)))
            }
            ExprKind::Variable { name } => self.analyze_variable(name, expr.span),
            ExprKind::Binary { left, op, right } => {
                let left = self.analyze_expr(left);
                let right = self.analyze_expr(right);

                let static_type =
                    match type_checker::check_binary_op(left.static_type, right.static_type) {
                        Ok(ty) => ty,
                        Err(msg) => {
                            self.error(DiagnosticKind::TypeMismatch, msg, expr.span);
                            Type::Error
                        }
                    };

                let constant_value =
                    match type_checker::fold_binary(left.constant_value, *op, right.constant_value)
                    {
                        Ok(value) => value,
                        Err(err) => {
                            self.error(DiagnosticKind::ArithmeticFault, err.to_string(), expr.span);
                            Some(Value::Int(0))
                        }
                    };

                AnalysisOutcome::new(static_type, constant_value)
            }
        }
    }

    fn analyze_variable(&mut self, name: &str, span: Span) -> AnalysisOutcome {
        let Some(symbol) = self.symbols.lookup(name) else {
            self.error(
                DiagnosticKind::UnknownIdentifier,
                format!("Variable '{}' is not declared", name),
                span,
            );
            return AnalysisOutcome::error();
        };

        let outcome = AnalysisOutcome::new(symbol.ty, symbol.value);
        if !symbol.initialized {
            self.diagnostics.push(
                DiagnosticKind::UninitializedUse,
                format!("Variable '{}' is used before being initialized", name),
                span,
            );
        }
        outcome
    }
}
