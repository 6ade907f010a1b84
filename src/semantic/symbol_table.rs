//! Symbol table for tracking declarations during parsing.
//!
//! Declarations live in one flat table per compilation unit: blocks and
//! function bodies share it, so a name can be declared only once. Loop
//! variables and function parameters are block-local bindings kept on a
//! separate scope stack and never enter the table.

use std::collections::{HashMap, HashSet};

use super::types::PrimitiveType;

/// Array metadata of a declared variable
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayInfo {
    pub size: usize,
    /// Literal initializer values, in order
    pub values: Vec<String>,
}

/// Kind of symbol
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolKind {
    Variable {
        is_constant: bool,
        array: Option<ArrayInfo>,
    },
    Function {
        arity: usize,
    },
}

/// A symbol in the symbol table
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub ty: PrimitiveType,
    pub kind: SymbolKind,
}

impl Symbol {
    pub fn variable(name: &str, ty: PrimitiveType, is_constant: bool, array: Option<ArrayInfo>) -> Self {
        Self {
            name: name.to_string(),
            ty,
            kind: SymbolKind::Variable { is_constant, array },
        }
    }

    pub fn function(name: &str, return_type: PrimitiveType, arity: usize) -> Self {
        Self {
            name: name.to_string(),
            ty: return_type,
            kind: SymbolKind::Function { arity },
        }
    }

    pub fn is_constant(&self) -> bool {
        match self.kind {
            SymbolKind::Variable { is_constant, .. } => is_constant,
            SymbolKind::Function { .. } => true,
        }
    }

    pub fn array(&self) -> Option<&ArrayInfo> {
        match &self.kind {
            SymbolKind::Variable { array, .. } => array.as_ref(),
            SymbolKind::Function { .. } => None,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self.kind, SymbolKind::Function { .. })
    }

    /// Parameter count of a function
    pub fn arity(&self) -> Option<usize> {
        match self.kind {
            SymbolKind::Function { arity } => Some(arity),
            SymbolKind::Variable { .. } => None,
        }
    }
}

/// A block-local name: loop variable or function parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binding {
    pub ty: PrimitiveType,
}

/// Anything a name can resolve to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    Symbol(&'a Symbol),
    Binding(Binding),
}

impl Resolved<'_> {
    pub fn ty(&self) -> PrimitiveType {
        match self {
            Resolved::Symbol(symbol) => symbol.ty,
            Resolved::Binding(binding) => binding.ty,
        }
    }
}

/// A single binding scope
#[derive(Debug, Clone, Default)]
struct Scope {
    bindings: HashMap<String, Binding>,
}

/// Flat declaration table plus a stack of binding scopes
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, Symbol>,
    scopes: Vec<Scope>,
    /// Names saved with `back` so far
    backups: HashSet<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a symbol, handing it back if the name is taken
    pub fn define(&mut self, symbol: Symbol) -> Result<(), Symbol> {
        if self.is_defined(&symbol.name) {
            return Err(symbol);
        }
        self.symbols.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    /// Whether a name is taken by a declaration or a live binding
    pub fn is_defined(&self, name: &str) -> bool {
        self.symbols.contains_key(name) || self.binding(name).is_some()
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    fn binding(&self, name: &str) -> Option<Binding> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.bindings.get(name).copied())
    }

    /// Look a name up in the live bindings first, then in the table
    pub fn resolve(&self, name: &str) -> Option<Resolved<'_>> {
        if let Some(binding) = self.binding(name) {
            return Some(Resolved::Binding(binding));
        }
        self.symbols.get(name).map(Resolved::Symbol)
    }

    /// Enter a binding scope
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Bind a name in the innermost scope, handing it back if the name is taken
    pub fn bind(&mut self, name: &str, ty: PrimitiveType) -> Result<(), String> {
        if self.is_defined(name) {
            return Err(name.to_string());
        }
        match self.scopes.last_mut() {
            Some(scope) => {
                scope.bindings.insert(name.to_string(), Binding { ty });
                Ok(())
            }
            None => Err(name.to_string()),
        }
    }

    pub fn record_backup(&mut self, name: &str) {
        self.backups.insert(name.to_string());
    }

    pub fn has_backup(&self, name: &str) -> bool {
        self.backups.contains(name)
    }
}
