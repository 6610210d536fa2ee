//! Indented tree dump of a program, one node per line.

use super::nodes::*;
use super::visitor::Visitor;
use super::TypeName;

/// Renders the AST as an indented tree.
///
/// ```text
/// Program
///   FunctionDef: int main
///     Statements:
///       Return
///         BinaryOp: plus
///           Left: Number: 2
///           Right: Number: 3
/// ```
#[derive(Debug, Default)]
pub struct AstPrinter {
    out: String,
    depth: usize,
    label: Option<&'static str>,
}

impl AstPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `program` and return the text.
    pub fn print(program: &Program) -> String {
        let mut printer = Self::new();
        program.accept(&mut printer);
        printer.out
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        if let Some(label) = self.label.take() {
            self.out.push_str(label);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }
}

impl Visitor for AstPrinter {
    fn visit_program(&mut self, program: &Program) {
        self.line("Program");
        self.nested(|p| program.function.accept(p));
    }

    fn visit_function(&mut self, func: &FunctionDef) {
        self.line(&format!("FunctionDef: {} {}", func.return_type, func.name));
        self.nested(|p| {
            if !func.params.is_empty() {
                p.line("Parameters:");
                p.nested(|p| {
                    for param in &func.params {
                        param.accept(p);
                    }
                });
            }
            p.line("Statements:");
            p.nested(|p| {
                for stmt in &func.body {
                    stmt.accept(p);
                }
            });
        });
    }

    fn visit_param(&mut self, param: &Param) {
        self.line(&format!("Parameter: {} {}", param.ty, param.name));
    }

    fn visit_declaration(&mut self, _stmt: &Stmt, ty: TypeName, vars: &[VarDecl]) {
        self.line(&format!("Declaration: {}", ty));
        self.nested(|p| {
            for var in vars {
                var.accept(p);
            }
        });
    }

    fn visit_var_decl(&mut self, var: &VarDecl) {
        self.line(&format!("Variable: {}", var.name));
        if let Some(ref init) = var.init {
            self.nested(|p| {
                p.label = Some("= ");
                init.accept(p);
            });
        }
    }

    fn visit_assignment(&mut self, _stmt: &Stmt, target: &str, value: &Expr) {
        self.line(&format!("Assignment: {}", target));
        self.nested(|p| {
            p.label = Some("= ");
            value.accept(p);
        });
    }

    fn visit_return(&mut self, _stmt: &Stmt, value: Option<&Expr>) {
        match value {
            Some(value) => {
                self.line("Return");
                self.nested(|p| value.accept(p));
            }
            None => self.line("Return (void)"),
        }
    }

    fn visit_expr_stmt(&mut self, _stmt: &Stmt, expr: &Expr) {
        self.line("ExpressionStatement");
        self.nested(|p| expr.accept(p));
    }

    fn visit_binary(&mut self, _expr: &Expr, left: &Expr, op: BinaryOp, right: &Expr) {
        self.line(&format!("BinaryOp: {}", op.name()));
        self.nested(|p| {
            p.label = Some("Left: ");
            left.accept(p);
            p.label = Some("Right: ");
            right.accept(p);
        });
    }

    fn visit_number(&mut self, _expr: &Expr, value: i64) {
        self.line(&format!("Number: {}", value));
    }

    fn visit_boolean(&mut self, _expr: &Expr, value: bool) {
        self.line(&format!("Boolean: {}", value));
    }

    fn visit_variable(&mut self, _expr: &Expr, name: &str) {
        self.line(&format!("Variable: {}", name));
    }
}
