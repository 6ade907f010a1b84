//! Token definitions for the Maple lexer.

use std::fmt;

use crate::semantic::PrimitiveType;

/// A token with its kind, lexeme, and position
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub offset: usize,
    /// 1-based line
    pub line: usize,
    /// 1-based column
    pub column: usize,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        offset: usize,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            offset,
            line,
            column,
        }
    }

    pub fn eof(offset: usize, line: usize, column: usize) -> Self {
        Self::new(TokenKind::Eof, "", offset, line, column)
    }

    /// Width of the lexeme in bytes
    pub fn width(&self) -> usize {
        self.lexeme.len()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}('{}') @ {}:{}", self.kind, self.lexeme, self.line, self.column)
    }
}

/// All token kinds in Maple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    Number,
    Identifier,

    // Statement keywords
    Run,
    Dec,
    Set,
    Ch,
    Out,
    If,
    Elif,
    Else,
    End,
    Loop,
    Roll,
    Back,
    Load,
    Fnc,
    Rtn,
    Lib,
    Init,

    // Arithmetic mutation keywords
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    True,
    False,

    // Type keywords
    I8,
    I16,
    I32,
    I64,
    Bool,
    Str,
    F32,
    F64,
    Char,
    Empty,

    // Library names
    ModuleName,     // @name
    QualifiedName,  // @name::

    // Punctuation
    Colon,          // :
    Comma,          // ,
    LeftBracket,    // [
    RightBracket,   // ]
    LeftBrace,      // {
    RightBrace,     // }
    Arrow,          // ->
    Into,           // =>
    DotDot,         // ..

    // Comparisons
    Greater,        // >
    Less,           // <
    EqualEqual,     // ==
    GreaterEqual,   // >=
    LessEqual,      // <=
    BangEqual,      // !=

    Operator,       // + - * /

    Eof,
}

impl TokenKind {
    /// The primitive type named by a type keyword
    pub fn primitive_type(&self) -> Option<PrimitiveType> {
        let ty = match self {
            TokenKind::I8 => PrimitiveType::I8,
            TokenKind::I16 => PrimitiveType::I16,
            TokenKind::I32 => PrimitiveType::I32,
            TokenKind::I64 => PrimitiveType::I64,
            TokenKind::Bool => PrimitiveType::Bool,
            TokenKind::Str => PrimitiveType::Str,
            TokenKind::F32 => PrimitiveType::F32,
            TokenKind::F64 => PrimitiveType::F64,
            TokenKind::Char => PrimitiveType::Char,
            TokenKind::Empty => PrimitiveType::Empty,
            _ => return None,
        };
        Some(ty)
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            TokenKind::Greater
                | TokenKind::Less
                | TokenKind::EqualEqual
                | TokenKind::GreaterEqual
                | TokenKind::LessEqual
                | TokenKind::BangEqual
        )
    }

    /// Tokens that close a block and can never start a statement
    pub fn is_block_terminator(&self) -> bool {
        matches!(
            self,
            TokenKind::End | TokenKind::Elif | TokenKind::Else | TokenKind::Roll
        )
    }

    /// Tokens usable as a plain operand: a name or a literal
    pub fn is_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier | TokenKind::Number | TokenKind::True | TokenKind::False
        )
    }
}
