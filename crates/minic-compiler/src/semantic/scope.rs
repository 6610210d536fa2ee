use std::collections::BTreeMap;
use std::fmt;

use minic_common::Position;
use serde::Serialize;
use thiserror::Error;

use super::types::{display_value, Type, Value};

/// Stable handle to a scope inside a [`SymbolTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ScopeId(usize);

impl ScopeId {
    /// The global scope, present in every table.
    pub const GLOBAL: ScopeId = ScopeId(0);
}

/// Failures of the symbol table itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    #[error("symbol '{name}' is already declared in scope '{scope}'")]
    DuplicateInScope { name: String, scope: String },

    #[error("cannot exit the global scope")]
    CannotExitGlobal,
}

/// A declared identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Symbol {
    pub name: String,
    pub ty: Type,
    pub value: Option<Value>,
    pub initialized: bool,
    pub declared_at: Position,
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Symbol{{name='{}', type='{}', value={}, initialized={}, line={}, col={}}}",
            self.name,
            self.ty,
            display_value(self.value),
            self.initialized,
            self.declared_at.line,
            self.declared_at.column
        )
    }
}

/// A lexical scope containing symbol declarations.
#[derive(Debug, Serialize)]
pub struct Scope {
    name: String,
    symbols: BTreeMap<String, Symbol>,
    parent: Option<ScopeId>,
    children: Vec<ScopeId>,
}

impl Scope {
    fn new(name: String, parent: Option<ScopeId>) -> Self {
        Self {
            name,
            symbols: BTreeMap::new(),
            parent,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// Child scopes in the order they were entered.
    pub fn children(&self) -> &[ScopeId] {
        &self.children
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Symbols of this scope, sorted by name.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Aggregate counts over the whole scope tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub total_scopes: usize,
    pub total_symbols: usize,
    pub current_scope: String,
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== SYMBOL TABLE STATISTICS ===")?;
        writeln!(f, "Total scopes: {}", self.total_scopes)?;
        writeln!(f, "Total symbols: {}", self.total_symbols)?;
        write!(f, "Current scope: {}", self.current_scope)
    }
}

/// Tree of nested scopes for lexical scoping.
///
/// Scopes are stored in a flat `Vec` and linked by parent/child handles.
/// `enter_scope` creates a child of the current scope; `exit_scope` returns to
/// the parent. Exited scopes stay in the arena so the whole tree can be
/// reported after analysis.
#[derive(Debug, Serialize)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    current: ScopeId,
    counter: usize,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new("global".to_string(), None)],
            current: ScopeId::GLOBAL,
            counter: 0,
        }
    }

    /// Discard every scope and symbol, leaving only an empty global scope.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    // ====================================================================
    // Scope navigation
    // ====================================================================

    /// Push a new child of the current scope named `{label}_{n}` and make it
    /// current.
    pub fn enter_scope(&mut self, label: &str) -> ScopeId {
        self.counter += 1;
        let name = format!("{}_{}", label, self.counter);
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope::new(name, Some(self.current)));
        self.scopes[self.current.0].children.push(id);
        self.current = id;
        id
    }

    /// Return to the parent of the current scope, yielding the scope that was
    /// left.
    pub fn exit_scope(&mut self) -> Result<ScopeId, ScopeError> {
        let old = self.current;
        let parent = self.scopes[old.0]
            .parent
            .ok_or(ScopeError::CannotExitGlobal)?;
        self.current = parent;
        Ok(old)
    }

    pub fn global(&self) -> &Scope {
        &self.scopes[ScopeId::GLOBAL.0]
    }

    pub fn current(&self) -> &Scope {
        &self.scopes[self.current.0]
    }

    pub fn current_id(&self) -> ScopeId {
        self.current
    }

    /// Get a scope by handle (valid for exited scopes too).
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    /// Find a scope by its full name, e.g. `function_main_1`.
    pub fn find_scope(&self, name: &str) -> Option<ScopeId> {
        self.scopes
            .iter()
            .position(|s| s.name == name)
            .map(ScopeId)
    }

    // ====================================================================
    // Declaration
    // ====================================================================

    /// Declare an uninitialized symbol in the current scope.
    pub fn declare(&mut self, name: &str, ty: Type, at: Position) -> Result<(), ScopeError> {
        self.insert(Symbol {
            name: name.to_string(),
            ty,
            value: None,
            initialized: false,
            declared_at: at,
        })
    }

    /// Declare an initialized symbol in the current scope.
    ///
    /// `value` is `None` when the initializer could not be folded; the symbol
    /// still counts as initialized.
    pub fn declare_with_value(
        &mut self,
        name: &str,
        ty: Type,
        value: Option<Value>,
        at: Position,
    ) -> Result<(), ScopeError> {
        self.insert(Symbol {
            name: name.to_string(),
            ty,
            value,
            initialized: true,
            declared_at: at,
        })
    }

    fn insert(&mut self, symbol: Symbol) -> Result<(), ScopeError> {
        let scope = &mut self.scopes[self.current.0];
        if scope.symbols.contains_key(&symbol.name) {
            return Err(ScopeError::DuplicateInScope {
                name: symbol.name,
                scope: scope.name.clone(),
            });
        }
        scope.symbols.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    // ====================================================================
    // Lookup
    // ====================================================================

    /// Look up a symbol by name, walking up the scope chain.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        let idx = self.resolve(name)?;
        self.scopes[idx.0].symbols.get(name)
    }

    /// Look up a symbol in the current scope only.
    pub fn lookup_local(&self, name: &str) -> Option<&Symbol> {
        self.scopes[self.current.0].symbols.get(name)
    }

    /// Look up a symbol mutably by name, walking up the scope chain.
    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        let idx = self.resolve(name)?;
        self.scopes[idx.0].symbols.get_mut(name)
    }

    /// The innermost scope on the active chain that declares `name`.
    fn resolve(&self, name: &str) -> Option<ScopeId> {
        let mut idx = self.current;
        loop {
            if self.scopes[idx.0].symbols.contains_key(name) {
                return Some(idx);
            }
            idx = self.scopes[idx.0].parent?;
        }
    }

    /// Store `value` in the innermost `name` and mark it initialized.
    /// Returns `false` if no enclosing scope declares `name`.
    pub fn assign(&mut self, name: &str, value: Option<Value>) -> bool {
        match self.lookup_mut(name) {
            Some(symbol) => {
                symbol.value = value;
                symbol.initialized = true;
                true
            }
            None => false,
        }
    }

    pub fn exists(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn exists_local(&self, name: &str) -> bool {
        self.lookup_local(name).is_some()
    }

    pub fn get_value(&self, name: &str) -> Option<Value> {
        self.lookup(name).and_then(|s| s.value)
    }

    pub fn get_type(&self, name: &str) -> Option<Type> {
        self.lookup(name).map(|s| s.ty)
    }

    pub fn is_initialized(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(|s| s.initialized)
    }

    // ====================================================================
    // Reporting
    // ====================================================================

    pub fn statistics(&self) -> Statistics {
        Statistics {
            total_scopes: self.scopes.len(),
            total_symbols: self.scopes.iter().map(Scope::len).sum(),
            current_scope: self.current().name.clone(),
        }
    }

    fn fmt_scope(&self, f: &mut fmt::Formatter<'_>, id: ScopeId, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        let scope = &self.scopes[id.0];
        write!(f, "\n{}Scope: {}", indent, scope.name)?;
        for symbol in scope.symbols() {
            write!(f, "\n{}  {}", indent, symbol)?;
        }
        for &child in &scope.children {
            self.fmt_scope(f, child, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "=== SYMBOL TABLE ===")?;
        self.fmt_scope(f, ScopeId::GLOBAL, 0)
    }
}
