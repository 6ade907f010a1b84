//! Maple - a small scripting language that transpiles to C++
//!
//! Source text goes through the lexer, the parser (which checks declarations
//! as it goes), library resolution, and finally the C++ emitter. The legacy
//! "Josh" dialect shares the whole pipeline.

pub mod codegen;
pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod semantic;
pub mod toolchain;

// Re-export commonly used types
pub use codegen::{CppEmitter, EmitMode};
pub use diagnostics::{Diagnostic, DiagnosticLevel, SourceLocation};
pub use driver::{compile_module, compile_unit, CompileOptions, CompiledUnit, Driver};
pub use error::{CompileError, ErrorKind, Warning};
pub use lexer::Dialect;
