use serde::Serialize;

use crate::ast::TypeName;

/// Internal type representation for semantic analysis.
///
/// Separate from the AST `TypeName` so the semantic layer can carry the
/// `Error` sentinel produced during recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    Int,
    Bool,
    Void,
    /// Error sentinel: the result of an expression that failed to type-check.
    Error,
}

impl Type {
    /// Convert an AST `TypeName` to the internal `Type`.
    pub fn from_annotation(name: TypeName) -> Self {
        match name {
            TypeName::Int => Type::Int,
            TypeName::Bool => Type::Bool,
            TypeName::Void => Type::Void,
        }
    }

    pub fn is_error(self) -> bool {
        self == Type::Error
    }

    /// The value a parameter of this type starts with.
    pub fn default_value(self) -> Option<Value> {
        match self {
            Type::Int => Some(Value::Int(0)),
            Type::Bool => Some(Value::Bool(false)),
            Type::Void | Type::Error => None,
        }
    }

    /// Human-readable name for error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Type::Int => "int",
            Type::Bool => "bool",
            Type::Void => "void",
            Type::Error => "error",
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A value known at analysis time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Bool(bool),
}

impl Value {
    pub fn as_int(self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(v),
            Value::Bool(_) => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Render an optional value the way reports show it (`null` when absent).
pub fn display_value(value: Option<Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "null".to_string(),
    }
}
