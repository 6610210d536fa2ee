use std::fmt;

use minic_common::Span;
use serde::{Deserialize, Serialize};

use super::types::TypeName;

// ============================================================================
// Program (top-level)
// ============================================================================

/// A complete program: exactly one function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub function: FunctionDef,
    #[serde(default)]
    pub span: Span,
}

impl Program {
    pub fn new(function: FunctionDef) -> Self {
        Self {
            function,
            span: Span::dummy(),
        }
    }
}

// ============================================================================
// Function definition
// ============================================================================

/// The single function of a program.
///
/// ```text
/// int main(int a, bool b) { ... }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    pub return_type: TypeName,
    pub name: String,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub body: Vec<Stmt>,
    #[serde(default)]
    pub span: Span,
}

impl FunctionDef {
    pub fn new(
        return_type: TypeName,
        name: impl Into<String>,
        params: Vec<Param>,
        body: Vec<Stmt>,
    ) -> Self {
        Self {
            return_type,
            name: name.into(),
            params,
            body,
            span: Span::dummy(),
        }
    }

    /// Whether any top-level statement of the body is a `return`.
    ///
    /// Only direct children count; reachability is not considered.
    pub fn has_return(&self) -> bool {
        self.body
            .iter()
            .any(|stmt| matches!(stmt.kind, StmtKind::Return { .. }))
    }
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    #[serde(rename = "type")]
    pub ty: TypeName,
    pub name: String,
    #[serde(default)]
    pub span: Span,
}

impl Param {
    pub fn new(ty: TypeName, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: name.into(),
            span: Span::dummy(),
        }
    }
}

// ============================================================================
// Statements
// ============================================================================

/// A statement node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stmt {
    #[serde(flatten)]
    pub kind: StmtKind,
    #[serde(default)]
    pub span: Span,
}

/// All statement variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node")]
pub enum StmtKind {
    /// `int x, y = 5;`
    Declaration {
        #[serde(rename = "type")]
        ty: TypeName,
        vars: Vec<VarDecl>,
    },

    /// `x = expr;`
    Assignment { target: String, value: Expr },

    /// `return;` or `return expr;`
    #[serde(rename = "ReturnStmt")]
    Return {
        #[serde(default)]
        value: Option<Expr>,
    },

    /// `expr;`
    #[serde(rename = "ExprStmt")]
    Expr { expr: Expr },
}

impl StmtKind {
    /// Node name used in diagnostics and tree dumps.
    pub fn tag(&self) -> &'static str {
        match self {
            StmtKind::Declaration { .. } => "Declaration",
            StmtKind::Assignment { .. } => "Assignment",
            StmtKind::Return { .. } => "ReturnStmt",
            StmtKind::Expr { .. } => "ExprStmt",
        }
    }
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn declaration(ty: TypeName, vars: Vec<VarDecl>) -> Self {
        Self::new(StmtKind::Declaration { ty, vars }, Span::dummy())
    }

    pub fn assignment(target: impl Into<String>, value: Expr) -> Self {
        Self::new(
            StmtKind::Assignment {
                target: target.into(),
                value,
            },
            Span::dummy(),
        )
    }

    pub fn ret(value: Option<Expr>) -> Self {
        Self::new(StmtKind::Return { value }, Span::dummy())
    }

    pub fn expr(expr: Expr) -> Self {
        Self::new(StmtKind::Expr { expr }, Span::dummy())
    }
}

/// One variable in a declaration group, with its optional initializer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDecl {
    pub name: String,
    #[serde(default)]
    pub init: Option<Expr>,
    #[serde(default)]
    pub span: Span,
}

impl VarDecl {
    pub fn new(name: impl Into<String>, init: Option<Expr>) -> Self {
        Self {
            name: name.into(),
            init,
            span: Span::dummy(),
        }
    }
}

// ============================================================================
// Expressions
// ============================================================================

/// An expression node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    #[serde(flatten)]
    pub kind: ExprKind,
    #[serde(default)]
    pub span: Span,
}

/// All expression variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node")]
pub enum ExprKind {
    /// Binary arithmetic: `a + b`, `x / 2`
    #[serde(rename = "BinaryOp")]
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },

    /// Integer literal: `42`
    Number { value: i64 },

    /// Truth literal: `true`, `false`
    Boolean { value: bool },

    /// A variable reference: `x`
    Variable { name: String },
}

impl ExprKind {
    /// Node name used in diagnostics and tree dumps.
    pub fn tag(&self) -> &'static str {
        match self {
            ExprKind::Binary { .. } => "BinaryOp",
            ExprKind::Number { .. } => "Number",
            ExprKind::Boolean { .. } => "Boolean",
            ExprKind::Variable { .. } => "Variable",
        }
    }
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn number(value: i64) -> Self {
        Self::new(ExprKind::Number { value }, Span::dummy())
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(ExprKind::Boolean { value }, Span::dummy())
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::new(ExprKind::Variable { name: name.into() }, Span::dummy())
    }

    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        let span = left.span.merge(&right.span);
        Self::new(
            ExprKind::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            span,
        )
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BinaryOp {
    #[serde(alias = "+")]
    Plus,
    #[serde(alias = "-")]
    Minus,
    #[serde(alias = "*")]
    Times,
    #[serde(alias = "/")]
    Divide,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Plus => "+",
            BinaryOp::Minus => "-",
            BinaryOp::Times => "*",
            BinaryOp::Divide => "/",
        }
    }

    /// Lowercase operator name, as shown in tree dumps.
    pub fn name(self) -> &'static str {
        match self {
            BinaryOp::Plus => "plus",
            BinaryOp::Minus => "minus",
            BinaryOp::Times => "times",
            BinaryOp::Divide => "divide",
        }
    }

    /// Parse an operator token. Returns `None` for anything but `+ - * /`.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(BinaryOp::Plus),
            "-" => Some(BinaryOp::Minus),
            "*" => Some(BinaryOp::Times),
            "/" => Some(BinaryOp::Divide),
            _ => None,
        }
    }
}

// ============================================================================
// Source-like rendering
// ============================================================================

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.function)
    }
}

impl fmt::Display for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}(", self.return_type, self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", param)?;
        }
        f.write_str(") {")?;
        for stmt in &self.body {
            write!(f, " {};", stmt)?;
        }
        f.write_str(" }")
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.name)
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StmtKind::Declaration { ty, vars } => {
                write!(f, "{} ", ty)?;
                for (i, var) in vars.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", var)?;
                }
                Ok(())
            }
            StmtKind::Assignment { target, value } => write!(f, "{} = {}", target, value),
            StmtKind::Return { value: Some(value) } => write!(f, "return {}", value),
            StmtKind::Return { value: None } => f.write_str("return"),
            StmtKind::Expr { expr } => write!(f, "{}", expr),
        }
    }
}

impl fmt::Display for VarDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.init {
            Some(init) => write!(f, "{} = {}", self.name, init),
            None => f.write_str(&self.name),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Binary { left, op, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            ExprKind::Number { value } => write!(f, "{}", value),
            ExprKind::Boolean { value } => write!(f, "{}", value),
            ExprKind::Variable { name } => f.write_str(name),
        }
    }
}
