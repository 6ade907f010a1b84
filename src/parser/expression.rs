//! Operand, condition, call, and arithmetic parsing.

use super::{Arithmetic, CallNode, Comparison, Condition, ExpressionNode, Node, Parser};
use crate::error::{ErrorKind, Result};
use crate::lexer::{Token, TokenKind};
use crate::semantic::{Literal, PrimitiveType, Resolved};

impl Parser {
    /// Consume a name or literal
    pub(super) fn operand(&mut self, expected: &str) -> Result<Token> {
        if self.peek().kind.is_operand() {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Consume an operand whose names must already be in scope
    pub(super) fn checked_operand(&mut self, expected: &str) -> Result<Token> {
        let token = self.operand(expected)?;
        self.require_declared(&token)?;
        Ok(token)
    }

    /// Fail if `token` is a name that resolves to nothing
    pub(super) fn require_declared(&self, token: &Token) -> Result<()> {
        if token.kind == TokenKind::Identifier && self.symbols.resolve(&token.lexeme).is_none() {
            return Err(self.error_at(ErrorKind::UndeclaredVariable(token.lexeme.clone()), token));
        }
        Ok(())
    }

    /// Check that `token` can be stored in `target` of type `ty`
    pub(super) fn check_value(&self, target: &str, ty: PrimitiveType, token: &Token) -> Result<()> {
        let mismatch = |found: String| {
            self.error_at(
                ErrorKind::TypeMismatch {
                    target: target.to_string(),
                    expected: format!("'{}'", ty),
                    found,
                },
                token,
            )
        };

        if let Some(literal) = Literal::classify(&token.lexeme) {
            if ty.accepts(literal) {
                return Ok(());
            }
            return Err(mismatch(format!("{} '{}'", literal.describe(), token.lexeme)));
        }

        let resolved = self.symbols.resolve(&token.lexeme).ok_or_else(|| {
            self.error_at(ErrorKind::UndeclaredVariable(token.lexeme.clone()), token)
        })?;

        if let Resolved::Symbol(symbol) = resolved {
            if symbol.is_function() {
                return Err(mismatch(format!("function '{}'", symbol.name)));
            }
            if let Some(array) = symbol.array() {
                return Err(mismatch(format!("array '{}' of size {}", symbol.name, array.size)));
            }
        }

        if resolved.ty() != ty {
            return Err(mismatch(format!("'{}' of type '{}'", token.lexeme, resolved.ty())));
        }
        Ok(())
    }

    /// Parse `LEFT OP RIGHT`
    pub(super) fn condition(&mut self) -> Result<Condition> {
        let left = self.checked_operand("a condition operand")?;

        let op = match self.peek().kind {
            TokenKind::Greater => Comparison::Greater,
            TokenKind::Less => Comparison::Less,
            TokenKind::EqualEqual => Comparison::Equal,
            TokenKind::GreaterEqual => Comparison::GreaterEqual,
            TokenKind::LessEqual => Comparison::LessEqual,
            TokenKind::BangEqual => Comparison::NotEqual,
            _ => return Err(self.unexpected("a comparison operator")),
        };
        self.advance();

        let right = self.checked_operand("a condition operand")?;

        Ok(Condition {
            left: left.lexeme,
            op,
            right: right.lexeme,
        })
    }

    /// Parse `NAME : [ARG {, ARG}] :`
    pub(super) fn call(&mut self) -> Result<CallNode> {
        let name = self.expect_identifier("a function name")?;
        self.expect(TokenKind::Colon, "':' after the function name")?;

        let mut args = Vec::new();
        while !self.check(TokenKind::Colon) {
            let arg = self.checked_operand("a call argument or ':'")?;
            args.push(arg.lexeme);

            if !self.match_token(TokenKind::Comma) && !self.check(TokenKind::Colon) {
                return Err(self.unexpected("',' or ':'"));
            }
        }
        self.advance();

        Ok(CallNode {
            function: name.lexeme,
            args,
        })
    }

    /// A call to one of this unit's functions must pass every parameter
    pub(super) fn check_arity(&self, callee: &Token, call: &CallNode) -> Result<()> {
        let expected = match self.symbols.lookup(&callee.lexeme).and_then(|s| s.arity()) {
            Some(arity) => arity,
            None => return Ok(()),
        };
        if call.args.len() != expected {
            return Err(self.error_at(
                ErrorKind::ArgumentCount {
                    function: call.function.clone(),
                    expected,
                    found: call.args.len(),
                },
                callee,
            ));
        }
        Ok(())
    }

    /// Parse `add|sub|mul|div|mod LEFT RIGHT [=> DEST]`
    pub(super) fn expression_statement(&mut self, nodes: &mut Vec<Node>) -> Result<()> {
        let op = match self.advance().kind {
            TokenKind::Add => Arithmetic::Add,
            TokenKind::Sub => Arithmetic::Sub,
            TokenKind::Mul => Arithmetic::Mul,
            TokenKind::Div => Arithmetic::Div,
            _ => Arithmetic::Mod,
        };

        let left = self.checked_operand("an arithmetic operand")?;
        let right = self.checked_operand("an arithmetic operand")?;

        let destination = if self.match_token(TokenKind::Into) {
            Some(self.expect_identifier("a destination variable after '=>'")?)
        } else {
            None
        };

        // Without a destination the left operand is updated in place
        let target = match &destination {
            Some(dest) => dest.clone(),
            None if left.kind == TokenKind::Identifier => left.clone(),
            None => {
                return Err(self.error_at(
                    ErrorKind::UnexpectedToken {
                        expected: "a variable to update".to_string(),
                        found: left.lexeme.clone(),
                    },
                    &left,
                ))
            }
        };
        self.check_arithmetic_target(op, &target)?;

        nodes.push(Node::Expression(ExpressionNode {
            op,
            left: left.lexeme,
            right: right.lexeme,
            destination: destination.map(|dest| dest.lexeme),
        }));
        Ok(())
    }

    fn check_arithmetic_target(&self, op: Arithmetic, target: &Token) -> Result<()> {
        let resolved = self.symbols.resolve(&target.lexeme).ok_or_else(|| {
            self.error_at(ErrorKind::UndeclaredVariable(target.lexeme.clone()), target)
        })?;

        if let Resolved::Symbol(symbol) = resolved {
            if symbol.is_constant() {
                return Err(self.error_at(ErrorKind::AssignToConstant(symbol.name.clone()), target));
            }
            if symbol.array().is_some() {
                return Err(self.error_at(
                    ErrorKind::TypeMismatch {
                        target: symbol.name.clone(),
                        expected: "a numeric variable".to_string(),
                        found: "an array".to_string(),
                    },
                    target,
                ));
            }
        }

        let ty = resolved.ty();
        let numeric = match op {
            Arithmetic::Mod => ty.is_integer(),
            _ => ty.is_integer() || ty.is_float(),
        };
        if !numeric {
            return Err(self.error_at(
                ErrorKind::TypeMismatch {
                    target: target.lexeme.clone(),
                    expected: format!("a numeric variable for '{}'", op.as_str()),
                    found: format!("type '{}'", ty),
                },
                target,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{parse_err, parse_maple};
    use super::super::*;

    #[test]
    fn test_condition_operators() {
        let program = parse_maple("dec i32 x 1\nif x >= 2\nend\nif x != 3\nend").unwrap();
        match (&program.nodes[1], &program.nodes[3]) {
            (Node::If(first), Node::If(second)) => {
                assert_eq!(first.condition.op, Comparison::GreaterEqual);
                assert_eq!(second.condition.op, Comparison::NotEqual);
                assert_eq!(second.condition.right, "3");
            }
            other => panic!("expected two ifs, got {:?}", other),
        }
    }

    #[test]
    fn test_condition_requires_operator() {
        assert!(matches!(
            parse_err("dec i32 x 1\nif x 2\nend"),
            ErrorKind::UnexpectedToken { .. }
        ));
    }

    #[test]
    fn test_condition_checks_names() {
        assert_eq!(parse_err("if y > 2\nend"), ErrorKind::UndeclaredVariable("y".into()));
    }

    #[test]
    fn test_call_arguments() {
        let program =
            parse_maple("dec i32 a 1\nfnc empty f : i32 x, i32 y :\nend\nf : a, 2 :").unwrap();
        assert_eq!(
            program.nodes[2],
            Node::Call(CallNode {
                function: "f".into(),
                args: vec!["a".into(), "2".into()]
            })
        );
    }

    #[test]
    fn test_call_without_arguments() {
        let program = parse_maple("fnc empty f : :\nend\nf : :").unwrap();
        assert_eq!(
            program.nodes[1],
            Node::Call(CallNode {
                function: "f".into(),
                args: vec![]
            })
        );
    }

    #[test]
    fn test_call_trailing_comma() {
        let program = parse_maple("g : 1, 2, :").unwrap();
        assert!(matches!(&program.nodes[0], Node::Call(call) if call.args.len() == 2));
    }

    #[test]
    fn test_call_argument_count() {
        let function = "fnc i32 f : i32 a :\nrtn a\nend\n";
        let too_many = parse_maple(&format!("{}f : 1, 2, 3 :", function)).unwrap_err();
        assert_eq!(
            too_many.kind,
            ErrorKind::ArgumentCount {
                function: "f".into(),
                expected: 1,
                found: 3
            }
        );
        assert_eq!(too_many.span.map(|s| (s.line, s.column)), Some((4, 1)));

        assert_eq!(
            parse_err(&format!("{}dec i32 x f : :", function)),
            ErrorKind::ArgumentCount {
                function: "f".into(),
                expected: 1,
                found: 0
            }
        );
        assert!(parse_maple(&format!("{}dec i32 x f : 4 :\nf : x :", function)).is_ok());
    }

    #[test]
    fn test_recursive_call_argument_count() {
        let source = "fnc i32 f : i32 n :\nf : n, n :\nrtn n\nend";
        assert!(matches!(parse_err(source), ErrorKind::ArgumentCount { found: 2, .. }));
    }

    #[test]
    fn test_unterminated_call() {
        assert!(matches!(parse_err("g : 1, 2"), ErrorKind::UnexpectedEof(_)));
    }

    #[test]
    fn test_call_argument_must_exist() {
        assert_eq!(parse_err("g : nope :"), ErrorKind::UndeclaredVariable("nope".into()));
    }

    #[test]
    fn test_in_place_arithmetic() {
        let program = parse_maple("dec ch i32 x 1\nmul x 3").unwrap();
        assert_eq!(
            program.nodes[1],
            Node::Expression(ExpressionNode {
                op: Arithmetic::Mul,
                left: "x".into(),
                right: "3".into(),
                destination: None
            })
        );
    }

    #[test]
    fn test_arithmetic_into_destination() {
        let program = parse_maple("dec i32 a 1\ndec ch i32 b 0\nsub a 4 => b").unwrap();
        match &program.nodes[2] {
            Node::Expression(expr) => assert_eq!(expr.destination.as_deref(), Some("b")),
            other => panic!("expected expression, got {:?}", other),
        }
    }

    #[test]
    fn test_arithmetic_on_constant() {
        assert_eq!(parse_err("dec i32 x 1\nadd x 1"), ErrorKind::AssignToConstant("x".into()));
    }

    #[test]
    fn test_arithmetic_on_literal() {
        assert!(matches!(parse_err("add 1 2"), ErrorKind::UnexpectedToken { .. }));
    }

    #[test]
    fn test_modulo_needs_integers() {
        assert!(matches!(
            parse_err("dec ch f64 x 1.5\nmod x 2"),
            ErrorKind::TypeMismatch { .. }
        ));
    }

    #[test]
    fn test_arithmetic_on_bool() {
        assert!(matches!(
            parse_err("dec ch bool b true\nadd b 1"),
            ErrorKind::TypeMismatch { .. }
        ));
    }
}
