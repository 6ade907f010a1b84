//! Semantic model: primitive types and the symbol table.

mod symbol_table;
mod types;

pub use symbol_table::{ArrayInfo, Binding, Resolved, Symbol, SymbolKind, SymbolTable};
pub use types::{Literal, PrimitiveType};
