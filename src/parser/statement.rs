//! Statement parsing: control flow, output, state backups, and returns.

use super::{ConditionalNode, LoopNode, Node, Parser};
use crate::error::{ErrorKind, Result, Span};
use crate::lexer::{Token, TokenKind};
use crate::semantic::{PrimitiveType, Resolved};

const IF_TERMINATORS: &[TokenKind] = &[TokenKind::End, TokenKind::Elif, TokenKind::Else];

impl Parser {
    /// Parse `run COUNT` and every statement up to the next terminator
    pub(super) fn run_statement(&mut self, nodes: &mut Vec<Node>) -> Result<()> {
        self.advance();
        let count = self.checked_operand("a repeat count")?;

        let mut body = Vec::new();
        self.block_depth += 1;
        while !self.is_at_end() && !self.peek().kind.is_block_terminator() {
            self.statement(&mut body)?;
        }
        self.block_depth -= 1;

        nodes.push(Node::Run {
            count: count.lexeme,
            body,
        });
        Ok(())
    }

    /// Parse `out NAME[[IDX]]`
    pub(super) fn out_statement(&mut self, nodes: &mut Vec<Node>) -> Result<()> {
        self.advance();
        let name = self.checked_operand("a value to print")?;
        let index = self.optional_index()?;

        if let Some(index) = &index {
            let array = match self.symbols.resolve(&name.lexeme) {
                Some(Resolved::Symbol(symbol)) => symbol.array().cloned(),
                _ => None,
            };
            let array = array
                .ok_or_else(|| self.error_at(ErrorKind::NotAnArray(name.lexeme.clone()), &name))?;
            self.check_index(&name.lexeme, &array, index)?;
        }

        nodes.push(Node::Output {
            name: name.lexeme,
            index: index.map(|index| index.lexeme),
        });
        Ok(())
    }

    /// Parse `if COND BODY {elif COND BODY} [else BODY] end`.
    ///
    /// Appends the conditional nodes followed by the closing `End`.
    pub(super) fn if_statement(&mut self, nodes: &mut Vec<Node>) -> Result<()> {
        self.advance();
        let condition = self.condition()?;
        let body = self.parse_block(IF_TERMINATORS, ErrorKind::UnexpectedEof("'end'".into()))?;
        nodes.push(Node::If(ConditionalNode { condition, body }));

        loop {
            match self.peek().kind {
                TokenKind::Elif => {
                    self.advance();
                    let condition = self.condition()?;
                    let body =
                        self.parse_block(IF_TERMINATORS, ErrorKind::UnexpectedEof("'end'".into()))?;
                    nodes.push(Node::Elif(ConditionalNode { condition, body }));
                }
                TokenKind::Else => {
                    self.advance();
                    let body = self
                        .parse_block(&[TokenKind::End], ErrorKind::UnexpectedEof("'end'".into()))?;
                    nodes.push(Node::Else { body });
                }
                _ => break,
            }
        }

        self.expect(TokenKind::End, "'end'")?;
        nodes.push(Node::End);
        Ok(())
    }

    /// Parse `loop VAR [START ..] END BODY roll`.
    ///
    /// Appends the loop node followed by the closing `Roll`.
    pub(super) fn loop_statement(&mut self, nodes: &mut Vec<Node>) -> Result<()> {
        self.advance();
        let variable = self.expect_identifier("a loop variable")?;
        let first = self.checked_operand("a loop bound")?;
        let (start, end) = if self.match_token(TokenKind::DotDot) {
            let end = self.checked_operand("a loop bound after '..'")?;
            (first.lexeme, end.lexeme)
        } else {
            ("0".to_string(), first.lexeme)
        };

        self.symbols.push_scope();
        if self.symbols.bind(&variable.lexeme, PrimitiveType::I32).is_err() {
            return Err(
                self.error_at(ErrorKind::RedeclaredVariable(variable.lexeme.clone()), &variable)
            );
        }

        let closing = self.dialect.spelling(TokenKind::Roll).unwrap_or("roll");
        let body = self.parse_block(
            &[TokenKind::Roll],
            ErrorKind::UnexpectedEof(format!("'{}'", closing)),
        )?;
        self.symbols.pop_scope();
        self.advance();

        nodes.push(Node::Loop(LoopNode {
            variable: variable.lexeme,
            start,
            end,
            body,
        }));
        nodes.push(Node::Roll);
        Ok(())
    }

    /// Resolve the variable named by `back`/`load`
    fn backup_target(&mut self) -> Result<(Token, bool)> {
        let name = self.expect_identifier("a variable name")?;
        let resolved = self.symbols.resolve(&name.lexeme).ok_or_else(|| {
            self.error_at(ErrorKind::UndeclaredVariable(name.lexeme.clone()), &name)
        })?;

        let is_constant = match resolved {
            Resolved::Symbol(symbol) => {
                if symbol.is_function() || symbol.array().is_some() {
                    return Err(self.error_at(
                        ErrorKind::TypeMismatch {
                            target: name.lexeme.clone(),
                            expected: "a scalar variable".to_string(),
                            found: (if symbol.is_function() { "a function" } else { "an array" })
                                .to_string(),
                        },
                        &name,
                    ));
                }
                symbol.is_constant()
            }
            Resolved::Binding(_) => false,
        };

        let ty = resolved.ty();
        if !ty.is_backup_compatible() {
            return Err(self.error_at(
                ErrorKind::TypeMismatch {
                    target: name.lexeme.clone(),
                    expected: "a numeric or bool variable".to_string(),
                    found: format!("type '{}'", ty),
                },
                &name,
            ));
        }
        Ok((name, is_constant))
    }

    /// Parse `back NAME`
    pub(super) fn back_statement(&mut self, nodes: &mut Vec<Node>) -> Result<()> {
        self.advance();
        let (name, _) = self.backup_target()?;
        self.symbols.record_backup(&name.lexeme);
        nodes.push(Node::SaveState { name: name.lexeme });
        Ok(())
    }

    /// Parse `load NAME`
    pub(super) fn load_statement(&mut self, nodes: &mut Vec<Node>) -> Result<()> {
        self.advance();
        let (name, is_constant) = self.backup_target()?;
        if is_constant {
            return Err(self.error_at(ErrorKind::AssignToConstant(name.lexeme.clone()), &name));
        }
        if !self.symbols.has_backup(&name.lexeme) {
            self.warn_restore_without_backup(&name.lexeme, Span::from(&name));
        }
        nodes.push(Node::RestoreState { name: name.lexeme });
        Ok(())
    }

    /// Parse `rtn [VALUE]`
    pub(super) fn return_statement(&mut self, nodes: &mut Vec<Node>) -> Result<()> {
        let keyword = self.advance();
        let function = self
            .function
            .clone()
            .ok_or_else(|| self.error_at(ErrorKind::ReturnOutsideFunction, &keyword))?;

        let value = if self.peek().kind.is_operand() && !self.is_function_call() {
            Some(self.operand("a return value")?)
        } else {
            None
        };

        match (&value, function.return_type) {
            (Some(value), PrimitiveType::Empty) => {
                return Err(self.error_at(
                    ErrorKind::TypeMismatch {
                        target: function.name,
                        expected: "no return value".to_string(),
                        found: format!("'{}'", value.lexeme),
                    },
                    value,
                ))
            }
            (Some(value), ty) => self.check_value(&function.name, ty, value)?,
            (None, PrimitiveType::Empty) => {}
            (None, ty) => {
                return Err(self.error_at(
                    ErrorKind::TypeMismatch {
                        target: function.name,
                        expected: format!("a '{}' return value", ty),
                        found: "nothing".to_string(),
                    },
                    &keyword,
                ))
            }
        }

        nodes.push(Node::Return {
            value: value.map(|value| value.lexeme),
        });
        Ok(())
    }
}
