use super::nodes::*;

/// Visitor trait for walking the AST.
///
/// Default implementations walk children in source order; override specific
/// methods to add behavior at particular node types. Nodes forward to the
/// matching method through their `accept` hook.
pub trait Visitor {
    fn visit_program(&mut self, program: &Program) {
        program.function.accept(self);
    }

    fn visit_function(&mut self, func: &FunctionDef) {
        for param in &func.params {
            param.accept(self);
        }
        for stmt in &func.body {
            stmt.accept(self);
        }
    }

    fn visit_param(&mut self, _param: &Param) {}

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Declaration { ty, vars } => self.visit_declaration(stmt, *ty, vars),
            StmtKind::Assignment { target, value } => self.visit_assignment(stmt, target, value),
            StmtKind::Return { value } => self.visit_return(stmt, value.as_ref()),
            StmtKind::Expr { expr } => self.visit_expr_stmt(stmt, expr),
        }
    }

    fn visit_declaration(&mut self, _stmt: &Stmt, _ty: super::TypeName, vars: &[VarDecl]) {
        for var in vars {
            var.accept(self);
        }
    }

    fn visit_var_decl(&mut self, var: &VarDecl) {
        if let Some(ref init) = var.init {
            init.accept(self);
        }
    }

    fn visit_assignment(&mut self, _stmt: &Stmt, _target: &str, value: &Expr) {
        value.accept(self);
    }

    fn visit_return(&mut self, _stmt: &Stmt, value: Option<&Expr>) {
        if let Some(value) = value {
            value.accept(self);
        }
    }

    fn visit_expr_stmt(&mut self, _stmt: &Stmt, expr: &Expr) {
        expr.accept(self);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Binary { left, op, right } => self.visit_binary(expr, left, *op, right),
            ExprKind::Number { value } => self.visit_number(expr, *value),
            ExprKind::Boolean { value } => self.visit_boolean(expr, *value),
            ExprKind::Variable { name } => self.visit_variable(expr, name),
        }
    }

    fn visit_binary(&mut self, _expr: &Expr, left: &Expr, _op: BinaryOp, right: &Expr) {
        left.accept(self);
        right.accept(self);
    }

    fn visit_number(&mut self, _expr: &Expr, _value: i64) {}

    fn visit_boolean(&mut self, _expr: &Expr, _value: bool) {}

    fn visit_variable(&mut self, _expr: &Expr, _name: &str) {}
}

impl Program {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_program(self);
    }
}

impl FunctionDef {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_function(self);
    }
}

impl Param {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_param(self);
    }
}

impl Stmt {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_stmt(self);
    }
}

impl VarDecl {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_var_decl(self);
    }
}

impl Expr {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_expr(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TypeName;

    /// Records the tag of every node it reaches, in visit order.
    #[derive(Default)]
    struct Trace(Vec<String>);

    impl Visitor for Trace {
        fn visit_param(&mut self, param: &Param) {
            self.0.push(format!("Param {}", param.name));
        }

        fn visit_stmt(&mut self, stmt: &Stmt) {
            self.0.push(stmt.kind.tag().to_string());
            match &stmt.kind {
                StmtKind::Declaration { ty, vars } => self.visit_declaration(stmt, *ty, vars),
                StmtKind::Assignment { target, value } => {
                    self.visit_assignment(stmt, target, value)
                }
                StmtKind::Return { value } => self.visit_return(stmt, value.as_ref()),
                StmtKind::Expr { expr } => self.visit_expr_stmt(stmt, expr),
            }
        }

        fn visit_var_decl(&mut self, var: &VarDecl) {
            self.0.push(format!("VarDecl {}", var.name));
            if let Some(ref init) = var.init {
                init.accept(self);
            }
        }

        fn visit_number(&mut self, _expr: &Expr, value: i64) {
            self.0.push(format!("Number {}", value));
        }

        fn visit_variable(&mut self, _expr: &Expr, name: &str) {
            self.0.push(format!("Variable {}", name));
        }
    }

    #[test]
    fn default_walk_visits_in_source_order() {
        let program = Program::new(FunctionDef::new(
            TypeName::Int,
            "main",
            vec![Param::new(TypeName::Int, "a")],
            vec![
                Stmt::declaration(
                    TypeName::Int,
                    vec![VarDecl::new(
                        "x",
                        Some(Expr::binary(
                            Expr::number(1),
                            BinaryOp::Plus,
                            Expr::variable("a"),
                        )),
                    )],
                ),
                Stmt::ret(Some(Expr::variable("x"))),
            ],
        ));

        let mut trace = Trace::default();
        program.accept(&mut trace);
        assert_eq!(
            trace.0,
            [
                "Param a",
                "Declaration",
                "VarDecl x",
                "Number 1",
                "Variable a",
                "ReturnStmt",
                "Variable x",
            ]
        );
    }
}
