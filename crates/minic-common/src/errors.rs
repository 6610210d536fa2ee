use crate::span::Span;

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// What went wrong, independent of the message wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Re-declaration of a variable or parameter in the same scope.
    StructuralDuplicate,
    /// Use of, or assignment to, a name no enclosing scope declares.
    UnknownIdentifier,
    /// Initializer, assignment, or operand types disagree, or non-int arithmetic.
    TypeMismatch,
    /// Non-void function without any return statement.
    MissingReturn,
    /// Constant division by zero.
    ArithmeticFault,
    /// Variable declared without an initializer.
    UninitializedDeclaration,
    /// Variable read before anything was stored in it.
    UninitializedUse,
}

impl DiagnosticKind {
    /// The severity this kind is always reported with.
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticKind::UninitializedDeclaration | DiagnosticKind::UninitializedUse => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }
}

/// A related source location providing additional context for a diagnostic.
#[derive(Debug, Clone)]
pub struct RelatedSpan {
    pub span: Span,
    pub message: String,
}

/// A compiler diagnostic (error or warning).
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
    pub span: Option<Span>,
    pub related: Vec<RelatedSpan>,
}

impl Diagnostic {
    /// Build a diagnostic whose severity follows from `kind`.
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            message: message.into(),
            span: None,
            related: Vec::new(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_related(mut self, span: Span, message: impl Into<String>) -> Self {
        self.related.push(RelatedSpan {
            span,
            message: message.into(),
        });
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", prefix, self.message)?;
        if let Some(ref span) = self.span {
            if span.start.is_known() {
                write!(f, "\n  --> {}", span)?;
            }
        }
        for related in &self.related {
            if related.span.start.is_known() {
                write!(f, "\n  note: {} at {}", related.message, related.span)?;
            }
        }
        Ok(())
    }
}

/// Append-only collector for diagnostics during analysis.
#[derive(Debug, Default)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Report `message` as `kind` at `span`.
    pub fn push(&mut self, kind: DiagnosticKind, message: impl Into<String>, span: Span) {
        self.report(Diagnostic::new(kind, message).with_span(span));
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.is_error())
    }

    /// Errors in the order they were reported.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    /// Warnings in the order they were reported.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }

    /// Number of diagnostics of the given kind.
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
