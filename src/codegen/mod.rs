//! Code generation from the Maple AST.

mod cpp_emitter;

pub use cpp_emitter::{CppEmitter, EmitMode};
