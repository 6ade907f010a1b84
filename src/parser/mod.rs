//! Parser module for building the AST from tokens.
//!
//! Recursive descent with one token of lookahead. Semantic checks run while
//! parsing against the unit's symbol table, so the first invalid statement
//! aborts the parse with a positioned error.

mod ast;
mod declaration;
mod expression;
mod statement;

pub use ast::*;

use std::collections::HashSet;

use crate::diagnostics::codes;
use crate::error::{CompileError, ErrorKind, Result, Span, Warning};
use crate::lexer::{Dialect, Token, TokenKind};
use crate::semantic::{PrimitiveType, SymbolTable};

/// Function whose body is being parsed
#[derive(Debug, Clone)]
struct FunctionContext {
    name: String,
    return_type: PrimitiveType,
}

/// Recursive descent parser for Maple
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    dialect: Dialect,
    symbols: SymbolTable,
    /// Libraries imported by this unit
    imported: HashSet<String>,
    /// Nesting depth of statement blocks
    block_depth: usize,
    function: Option<FunctionContext>,
    /// Parsing a library: only declarations, functions and imports at the top level
    library: bool,
    warnings: Vec<Warning>,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>, dialect: Dialect) -> Self {
        if tokens.last().map_or(true, |t| t.kind != TokenKind::Eof) {
            let (offset, line, column) = tokens
                .last()
                .map_or((0, 1, 1), |t| (t.offset + t.width(), t.line, t.column + t.width()));
            tokens.push(Token::eof(offset, line, column));
        }

        Self {
            tokens,
            current: 0,
            dialect,
            symbols: SymbolTable::new(),
            imported: HashSet::new(),
            block_depth: 0,
            function: None,
            library: false,
            warnings: Vec::new(),
        }
    }

    /// Parse the unit as a library header
    pub fn for_library(mut self) -> Self {
        self.library = true;
        self
    }

    /// Parse the entire unit
    pub fn parse(&mut self) -> Result<Program> {
        let mut nodes = Vec::new();

        while !self.is_at_end() {
            if self.peek().kind.is_block_terminator() {
                return Err(self.unexpected("a statement"));
            }
            if self.library && !self.at_library_statement() {
                let statement = self.peek().lexeme.clone();
                return Err(self.error_at_current(ErrorKind::LibraryStatement(statement)));
            }
            self.statement(&mut nodes)?;
        }

        Ok(Program { nodes })
    }

    /// Warnings collected so far
    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    /// Parse one statement, appending its node(s) to `nodes`
    fn statement(&mut self, nodes: &mut Vec<Node>) -> Result<()> {
        if self.is_function_call() {
            let callee = self.peek().clone();
            let call = self.call()?;
            self.check_arity(&callee, &call)?;
            nodes.push(Node::Call(call));
            return Ok(());
        }

        match self.peek().kind {
            TokenKind::Run => self.run_statement(nodes),
            TokenKind::Dec => self.declaration(nodes),
            TokenKind::Set => self.set_statement(nodes),
            TokenKind::Out => self.out_statement(nodes),
            TokenKind::If => self.if_statement(nodes),
            TokenKind::Loop => self.loop_statement(nodes),
            TokenKind::Back => self.back_statement(nodes),
            TokenKind::Load => self.load_statement(nodes),
            TokenKind::Fnc => self.function_declaration(nodes),
            TokenKind::Rtn => self.return_statement(nodes),
            TokenKind::Add
            | TokenKind::Sub
            | TokenKind::Mul
            | TokenKind::Div
            | TokenKind::Mod => self.expression_statement(nodes),
            TokenKind::Lib => self.library_import(nodes),
            TokenKind::Init => self.namespace_init(nodes),
            TokenKind::QualifiedName => self.qualified_call(nodes),
            _ => Err(self.unexpected("a statement")),
        }
    }

    /// Parse statements into a fresh list until one of `terminators`.
    ///
    /// The terminator itself is left for the caller to consume.
    fn parse_block(&mut self, terminators: &[TokenKind], on_eof: ErrorKind) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();
        self.block_depth += 1;

        loop {
            let kind = self.peek().kind;
            if terminators.contains(&kind) {
                break;
            }
            if kind == TokenKind::Eof {
                return Err(self.error_at_current(on_eof));
            }
            if kind.is_block_terminator() {
                return Err(self.unexpected(&self.describe_terminators(terminators)));
            }
            self.statement(&mut nodes)?;
        }

        self.block_depth -= 1;
        Ok(nodes)
    }

    fn at_library_statement(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Dec | TokenKind::Fnc | TokenKind::Lib | TokenKind::Init
        )
    }

    fn describe_terminators(&self, terminators: &[TokenKind]) -> String {
        terminators
            .iter()
            .filter_map(|kind| self.dialect.spelling(*kind))
            .map(|word| format!("'{}'", word))
            .collect::<Vec<_>>()
            .join(" or ")
    }

    fn warn(&mut self, code: &'static str, message: String, span: Span) {
        self.warnings.push(Warning { code, message, span });
    }

    fn warn_restore_without_backup(&mut self, name: &str, span: Span) {
        self.warn(
            codes::RESTORE_WITHOUT_BACKUP,
            format!("'{}' is restored before any backup of it was taken", name),
            span,
        );
    }

    // === Helper methods ===

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn peek_next(&self) -> Option<&Token> {
        self.tokens.get(self.current + 1)
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_identifier(&mut self, expected: &str) -> Result<Token> {
        self.expect(TokenKind::Identifier, expected)
    }

    /// An identifier directly followed by ':' starts a call
    fn is_function_call(&self) -> bool {
        self.check(TokenKind::Identifier)
            && self.peek_next().map_or(false, |t| t.kind == TokenKind::Colon)
    }

    fn error_at_current(&self, kind: ErrorKind) -> CompileError {
        CompileError::at(kind, Span::from(self.peek()))
    }

    fn error_at(&self, kind: ErrorKind, token: &Token) -> CompileError {
        CompileError::at(kind, Span::from(token))
    }

    fn unexpected(&self, expected: &str) -> CompileError {
        let token = self.peek();
        let kind = if token.kind == TokenKind::Eof {
            ErrorKind::UnexpectedEof(expected.to_string())
        } else {
            ErrorKind::UnexpectedToken {
                expected: expected.to_string(),
                found: token.lexeme.clone(),
            }
        };
        self.error_at_current(kind)
    }
}

/// Lex-free entry point: parse a token stream into a program and its warnings
pub fn parse(tokens: Vec<Token>, dialect: Dialect) -> Result<(Program, Vec<Warning>)> {
    finish(Parser::new(tokens, dialect))
}

/// Like [`parse`], for a library whose top level becomes a header
pub fn parse_library(tokens: Vec<Token>, dialect: Dialect) -> Result<(Program, Vec<Warning>)> {
    finish(Parser::new(tokens, dialect).for_library())
}

fn finish(mut parser: Parser) -> Result<(Program, Vec<Warning>)> {
    let program = parser.parse()?;
    Ok((program, parser.take_warnings()))
}
