//! Compile errors and warnings raised by the pipeline.
//!
//! Every error is fatal to the compilation unit: the first one raised aborts
//! the pipeline and is handed to the caller for reporting.

use thiserror::Error;

use crate::diagnostics::codes;
use crate::lexer::Token;

/// Source span for tracking positions in error messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    /// Byte offset from start of source
    pub offset: usize,
    /// Length in bytes
    pub length: usize,
    /// 1-based line
    pub line: usize,
    /// 1-based column
    pub column: usize,
}

impl Span {
    pub fn new(offset: usize, length: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            length,
            line,
            column,
        }
    }
}

impl From<&Token> for Span {
    fn from(token: &Token) -> Self {
        Span::new(token.offset, token.width().max(1), token.line, token.column)
    }
}

/// What went wrong
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorKind {
    // Lexical
    #[error("illegal character '{0}'")]
    IllegalCharacter(char),

    // Syntactic
    #[error("expected {expected}, found '{found}'")]
    UnexpectedToken { expected: String, found: String },

    #[error("unexpected end of file, expected {0}")]
    UnexpectedEof(String),

    #[error("expected ':' after function name '{name}', found '{found}'")]
    MalformedFunctionHeader { name: String, found: String },

    #[error("expected 'end' to close the body of function '{0}'")]
    MalformedFunctionBody(String),

    #[error("'init' must be the first statement of the file")]
    MissingNamespaceInit,

    #[error("expected a namespace name ('@name') after 'init'")]
    MissingNamespaceName,

    #[error("function '{0}' must be defined at the top level")]
    NestedFunction(String),

    #[error("return outside of a function body")]
    ReturnOutsideFunction,

    #[error("'{0}' cannot appear at the top level of a library")]
    LibraryStatement(String),

    // Semantic
    #[error("variable '{0}' already exists")]
    RedeclaredVariable(String),

    #[error("invalid type '{0}'")]
    InvalidType(String),

    #[error("index {index} out of range for array '{name}' of size {size}")]
    IndexOutOfRange { name: String, index: String, size: usize },

    #[error("variable '{0}' not declared")]
    UndeclaredVariable(String),

    #[error("cannot set constant variable '{0}' (variables are constant unless declared with 'ch')")]
    AssignToConstant(String),

    #[error("type mismatch for '{target}': expected {expected}, found {found}")]
    TypeMismatch {
        target: String,
        expected: String,
        found: String,
    },

    #[error("'{0}' is not an array")]
    NotAnArray(String),

    #[error("function '{function}' takes {expected} argument(s), found {found}")]
    ArgumentCount {
        function: String,
        expected: usize,
        found: usize,
    },

    // Environmental
    #[error("library '{0}' does not exist")]
    ModuleNotFound(String),

    #[error("library '{0}' is already imported")]
    DuplicateModule(String),

    #[error("library '{0}' is not imported")]
    UnknownModule(String),

    #[error("library '{0}' imports itself through a cycle")]
    CyclicImport(String),

    #[error("could not read library '{name}': {message}")]
    ModuleUnreadable { name: String, message: String },
}

impl ErrorKind {
    /// Diagnostic code of this error
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::IllegalCharacter(_) => codes::ILLEGAL_CHARACTER,
            ErrorKind::UnexpectedToken { .. } => codes::UNEXPECTED_TOKEN,
            ErrorKind::UnexpectedEof(_) => codes::UNEXPECTED_EOF,
            ErrorKind::MalformedFunctionHeader { .. } => codes::MALFORMED_FUNCTION_HEADER,
            ErrorKind::MalformedFunctionBody(_) => codes::MALFORMED_FUNCTION_BODY,
            ErrorKind::MissingNamespaceInit => codes::MISSING_NAMESPACE_INIT,
            ErrorKind::MissingNamespaceName => codes::MISSING_NAMESPACE_NAME,
            ErrorKind::NestedFunction(_) => codes::NESTED_FUNCTION,
            ErrorKind::ReturnOutsideFunction => codes::RETURN_OUTSIDE_FUNCTION,
            ErrorKind::LibraryStatement(_) => codes::LIBRARY_STATEMENT,
            ErrorKind::RedeclaredVariable(_) => codes::REDECLARED_VARIABLE,
            ErrorKind::InvalidType(_) => codes::INVALID_TYPE,
            ErrorKind::IndexOutOfRange { .. } => codes::INDEX_OUT_OF_RANGE,
            ErrorKind::UndeclaredVariable(_) => codes::UNDECLARED_VARIABLE,
            ErrorKind::AssignToConstant(_) => codes::ASSIGN_TO_CONSTANT,
            ErrorKind::TypeMismatch { .. } => codes::TYPE_MISMATCH,
            ErrorKind::NotAnArray(_) => codes::NOT_AN_ARRAY,
            ErrorKind::ArgumentCount { .. } => codes::ARGUMENT_COUNT,
            ErrorKind::ModuleNotFound(_) => codes::MODULE_NOT_FOUND,
            ErrorKind::DuplicateModule(_) => codes::DUPLICATE_MODULE,
            ErrorKind::UnknownModule(_) => codes::UNKNOWN_MODULE,
            ErrorKind::CyclicImport(_) => codes::CYCLIC_IMPORT,
            ErrorKind::ModuleUnreadable { .. } => codes::MODULE_UNREADABLE,
        }
    }
}

/// A fatal error with its position and, for imported code, the library it came from
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind}")]
pub struct CompileError {
    pub kind: ErrorKind,
    pub span: Option<Span>,
    /// Library the error was raised in, `None` for the unit being compiled
    pub module: Option<String>,
}

impl CompileError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            span: None,
            module: None,
        }
    }

    pub fn at(kind: ErrorKind, span: Span) -> Self {
        Self {
            kind,
            span: Some(span),
            module: None,
        }
    }

    /// Attribute the error to a library unless an inner library already claimed it
    pub fn in_module(mut self, name: &str) -> Self {
        if self.module.is_none() {
            self.module = Some(name.to_string());
        }
        self
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

/// A non-fatal finding reported alongside the generated code
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub code: &'static str,
    pub message: String,
    pub span: Span,
}

pub type Result<T> = std::result::Result<T, CompileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_formatting() {
        let err = CompileError::new(ErrorKind::IndexOutOfRange {
            name: "arr".into(),
            index: "3".into(),
            size: 3,
        });
        assert_eq!(err.to_string(), "index 3 out of range for array 'arr' of size 3");
    }

    #[test]
    fn test_inner_module_wins() {
        let err = CompileError::new(ErrorKind::UndeclaredVariable("x".into()))
            .in_module("inner")
            .in_module("outer");
        assert_eq!(err.module.as_deref(), Some("inner"));
    }

    #[test]
    fn test_span_from_token_is_never_empty() {
        let token = Token::eof(10, 2, 4);
        let span = Span::from(&token);
        assert_eq!(span.length, 1);
        assert_eq!((span.line, span.column), (2, 4));
    }
}
