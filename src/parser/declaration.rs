//! Declaration parsing: variables, assignments, functions, and libraries.

use super::{
    DeclareNode, FunctionContext, FunctionNode, Initializer, Node, Parser, SetNode, SetValue,
};
use crate::error::{ErrorKind, Result, Span};
use crate::lexer::{Token, TokenKind};
use crate::semantic::{ArrayInfo, Literal, PrimitiveType, Resolved, Symbol};

impl Parser {
    /// Parse a type keyword usable for values
    fn value_type(&mut self) -> Result<PrimitiveType> {
        if self.is_at_end() {
            return Err(self.unexpected("a type"));
        }
        let token = self.advance();
        match token.kind.primitive_type() {
            Some(ty) if ty.is_value_type() => Ok(ty),
            _ => Err(self.error_at(ErrorKind::InvalidType(token.lexeme.clone()), &token)),
        }
    }

    /// Parse `dec [ch] TYPE NAME INIT`
    pub(super) fn declaration(&mut self, nodes: &mut Vec<Node>) -> Result<()> {
        self.advance();
        let is_constant = !self.match_token(TokenKind::Ch);
        let ty = self.value_type()?;
        let name = self.expect_identifier("a variable name")?;

        if self.symbols.is_defined(&name.lexeme) {
            return Err(self.error_at(ErrorKind::RedeclaredVariable(name.lexeme.clone()), &name));
        }

        let (init, array) = if self.is_function_call() {
            let callee = self.peek().clone();
            let call = self.call()?;
            self.check_call_result(&name.lexeme, ty, &callee)?;
            self.check_arity(&callee, &call)?;
            (Initializer::Call(call), None)
        } else if self.match_token(TokenKind::LeftBracket) {
            let array = self.array_initializer(&name.lexeme, ty)?;
            let init = Initializer::Array {
                size: array.size,
                values: array.values.clone(),
            };
            (init, Some(array))
        } else {
            let value = self.operand("an initial value")?;
            self.check_value(&name.lexeme, ty, &value)?;
            (Initializer::Value(value.lexeme), None)
        };

        let symbol = Symbol::variable(&name.lexeme, ty, is_constant, array);
        if self.symbols.define(symbol).is_err() {
            return Err(self.error_at(ErrorKind::RedeclaredVariable(name.lexeme.clone()), &name));
        }

        nodes.push(Node::Declare(DeclareNode {
            ty,
            name: name.lexeme,
            init,
            is_constant,
        }));
        Ok(())
    }

    /// A known function must return the declared type
    fn check_call_result(&self, target: &str, ty: PrimitiveType, callee: &Token) -> Result<()> {
        match self.symbols.lookup(&callee.lexeme) {
            Some(symbol) if symbol.is_function() && symbol.ty != ty => Err(self.error_at(
                ErrorKind::TypeMismatch {
                    target: target.to_string(),
                    expected: format!("'{}'", ty),
                    found: format!("result of '{}' of type '{}'", symbol.name, symbol.ty),
                },
                callee,
            )),
            Some(symbol) if !symbol.is_function() => Err(self.error_at(
                ErrorKind::UnexpectedToken {
                    expected: "a function name".to_string(),
                    found: symbol.name.clone(),
                },
                callee,
            )),
            _ => Ok(()),
        }
    }

    /// Parse `] SIZE [-> { LIT {, LIT} }]` after the opening bracket
    fn array_initializer(&mut self, name: &str, ty: PrimitiveType) -> Result<ArrayInfo> {
        self.expect(TokenKind::RightBracket, "']'")?;
        let size_token = self.expect(TokenKind::Number, "an array size")?;
        let size = Literal::as_index(&size_token.lexeme)
            .filter(|size| *size > 0)
            .ok_or_else(|| {
                self.error_at(
                    ErrorKind::UnexpectedToken {
                        expected: "a positive integer array size".to_string(),
                        found: size_token.lexeme.clone(),
                    },
                    &size_token,
                )
            })?;

        let mut values = Vec::new();
        if self.match_token(TokenKind::Arrow) {
            self.expect(TokenKind::LeftBrace, "'{'")?;
            while !self.check(TokenKind::RightBrace) {
                if !matches!(
                    self.peek().kind,
                    TokenKind::Number | TokenKind::True | TokenKind::False
                ) {
                    return Err(self.unexpected("a literal array value or '}'"));
                }
                let value = self.advance();
                self.check_value(name, ty, &value)?;
                if values.len() == size {
                    return Err(self.error_at(
                        ErrorKind::IndexOutOfRange {
                            name: name.to_string(),
                            index: values.len().to_string(),
                            size,
                        },
                        &value,
                    ));
                }
                values.push(value.lexeme);

                if !self.match_token(TokenKind::Comma) && !self.check(TokenKind::RightBrace) {
                    return Err(self.unexpected("',' or '}'"));
                }
            }
            self.advance();
        }

        Ok(ArrayInfo { size, values })
    }

    /// Parse `set NAME[[IDX]] VALUE[[IDX]]`
    pub(super) fn set_statement(&mut self, nodes: &mut Vec<Node>) -> Result<()> {
        self.advance();
        let target = self.expect_identifier("a variable name")?;
        let target_index = self.optional_index()?;
        let value = self.operand("a value")?;
        let value_index = self.optional_index()?;

        let resolved = self.symbols.resolve(&target.lexeme).ok_or_else(|| {
            self.error_at(ErrorKind::UndeclaredVariable(target.lexeme.clone()), &target)
        })?;
        let ty = resolved.ty();
        let target_array = match resolved {
            Resolved::Symbol(symbol) => {
                if symbol.is_constant() {
                    return Err(
                        self.error_at(ErrorKind::AssignToConstant(symbol.name.clone()), &target)
                    );
                }
                symbol.array().cloned()
            }
            Resolved::Binding(_) => None,
        };

        match (&target_index, &target_array) {
            (Some(index), Some(array)) => self.check_index(&target.lexeme, array, index)?,
            (Some(_), None) => {
                return Err(self.error_at(ErrorKind::NotAnArray(target.lexeme.clone()), &target))
            }
            (None, Some(array)) => {
                return Err(self.error_at(
                    ErrorKind::TypeMismatch {
                        target: target.lexeme.clone(),
                        expected: "an element index".to_string(),
                        found: format!("array of size {}", array.size),
                    },
                    &target,
                ))
            }
            (None, None) => {}
        }

        let value = match value_index {
            Some(index) => self.indexed_value(&target.lexeme, ty, &value, &index)?,
            None => {
                self.check_value(&target.lexeme, ty, &value)?;
                SetValue::Plain(value.lexeme)
            }
        };

        nodes.push(Node::Set(SetNode {
            target: target.lexeme,
            target_index: target_index.map(|index| index.lexeme),
            value,
        }));
        Ok(())
    }

    /// Parse an optional `[IDX]`
    pub(super) fn optional_index(&mut self) -> Result<Option<Token>> {
        if !self.match_token(TokenKind::LeftBracket) {
            return Ok(None);
        }
        let index = self.operand("an array index")?;
        self.expect(TokenKind::RightBracket, "']'")?;
        Ok(Some(index))
    }

    /// Literal indices are bounds-checked, named ones must be in scope
    pub(super) fn check_index(&self, name: &str, array: &ArrayInfo, index: &Token) -> Result<()> {
        if index.kind == TokenKind::Identifier {
            return self.require_declared(index);
        }
        match Literal::as_index(&index.lexeme) {
            Some(i) if i < array.size => Ok(()),
            Some(_) => Err(self.error_at(
                ErrorKind::IndexOutOfRange {
                    name: name.to_string(),
                    index: index.lexeme.clone(),
                    size: array.size,
                },
                index,
            )),
            None => Err(self.error_at(
                ErrorKind::UnexpectedToken {
                    expected: "an integer index".to_string(),
                    found: index.lexeme.clone(),
                },
                index,
            )),
        }
    }

    /// Resolve `ARR[IDX]` on the right of a `set`
    fn indexed_value(
        &self,
        target: &str,
        ty: PrimitiveType,
        source: &Token,
        index: &Token,
    ) -> Result<SetValue> {
        let symbol = match self.symbols.resolve(&source.lexeme) {
            Some(Resolved::Symbol(symbol)) => symbol,
            Some(Resolved::Binding(_)) => {
                return Err(self.error_at(ErrorKind::NotAnArray(source.lexeme.clone()), source))
            }
            None if source.kind == TokenKind::Identifier => {
                return Err(
                    self.error_at(ErrorKind::UndeclaredVariable(source.lexeme.clone()), source)
                )
            }
            None => {
                return Err(self.error_at(ErrorKind::NotAnArray(source.lexeme.clone()), source))
            }
        };
        let array = symbol
            .array()
            .ok_or_else(|| self.error_at(ErrorKind::NotAnArray(symbol.name.clone()), source))?;

        if symbol.ty != ty {
            return Err(self.error_at(
                ErrorKind::TypeMismatch {
                    target: target.to_string(),
                    expected: format!("'{}'", ty),
                    found: format!("element of '{}' of type '{}'", symbol.name, symbol.ty),
                },
                source,
            ));
        }

        self.check_index(&symbol.name, array, index)?;
        if index.kind == TokenKind::Identifier {
            return Ok(SetValue::Indexed {
                array: symbol.name.clone(),
                index: index.lexeme.clone(),
            });
        }

        // Only literal initializer values can be copied at compile time
        let position = Literal::as_index(&index.lexeme).unwrap_or(array.size);
        match array.values.get(position) {
            Some(literal) => Ok(SetValue::Copied {
                array: symbol.name.clone(),
                index: position,
                literal: literal.clone(),
            }),
            None => Err(self.error_at(
                ErrorKind::IndexOutOfRange {
                    name: symbol.name.clone(),
                    index: index.lexeme.clone(),
                    size: array.values.len(),
                },
                index,
            )),
        }
    }

    /// Parse `fnc TYPE NAME : [TYPE P {, TYPE P}] : BODY end`
    pub(super) fn function_declaration(&mut self, nodes: &mut Vec<Node>) -> Result<()> {
        self.advance();
        if self.is_at_end() {
            return Err(self.unexpected("a return type"));
        }
        let type_token = self.advance();
        let return_type = type_token.kind.primitive_type().ok_or_else(|| {
            self.error_at(ErrorKind::InvalidType(type_token.lexeme.clone()), &type_token)
        })?;
        let name = self.expect_identifier("a function name")?;

        if self.block_depth > 0 || self.function.is_some() {
            return Err(self.error_at(ErrorKind::NestedFunction(name.lexeme.clone()), &name));
        }

        if !self.match_token(TokenKind::Colon) {
            let found = self.peek().lexeme.clone();
            return Err(self.error_at_current(ErrorKind::MalformedFunctionHeader {
                name: name.lexeme.clone(),
                found,
            }));
        }

        let mut params: Vec<(String, PrimitiveType)> = Vec::new();
        let mut param_tokens = Vec::new();
        while !self.check(TokenKind::Colon) {
            if self.is_at_end() {
                let found = self.peek().lexeme.clone();
                return Err(self.error_at_current(ErrorKind::MalformedFunctionHeader {
                    name: name.lexeme.clone(),
                    found,
                }));
            }
            let ty = self.value_type()?;
            let param = self.expect_identifier("a parameter name")?;
            if params.iter().any(|(existing, _)| *existing == param.lexeme) {
                return Err(
                    self.error_at(ErrorKind::RedeclaredVariable(param.lexeme.clone()), &param)
                );
            }
            params.push((param.lexeme.clone(), ty));
            param_tokens.push(param);

            if !self.match_token(TokenKind::Comma) && !self.check(TokenKind::Colon) {
                return Err(self.unexpected("',' or ':'"));
            }
        }
        self.advance();

        // Defined before the body so it can call itself
        let symbol = Symbol::function(&name.lexeme, return_type, params.len());
        if self.symbols.define(symbol).is_err() {
            return Err(self.error_at(ErrorKind::RedeclaredVariable(name.lexeme.clone()), &name));
        }

        self.symbols.push_scope();
        for (param, (_, ty)) in param_tokens.iter().zip(&params) {
            if self.symbols.bind(&param.lexeme, *ty).is_err() {
                return Err(
                    self.error_at(ErrorKind::RedeclaredVariable(param.lexeme.clone()), param)
                );
            }
        }

        self.function = Some(FunctionContext {
            name: name.lexeme.clone(),
            return_type,
        });
        let body = self.parse_block(
            &[TokenKind::End],
            ErrorKind::MalformedFunctionBody(name.lexeme.clone()),
        )?;
        self.function = None;
        self.symbols.pop_scope();
        self.advance();

        nodes.push(Node::Function(FunctionNode {
            return_type,
            name: name.lexeme,
            params,
            body,
        }));
        Ok(())
    }

    /// Parse `lib @name`
    pub(super) fn library_import(&mut self, nodes: &mut Vec<Node>) -> Result<()> {
        let keyword = self.advance();
        if self.block_depth > 0 || self.function.is_some() {
            return Err(self.error_at(
                ErrorKind::UnexpectedToken {
                    expected: "a statement (libraries are imported at the top level)".to_string(),
                    found: keyword.lexeme.clone(),
                },
                &keyword,
            ));
        }

        let module = self.expect(TokenKind::ModuleName, "a library name ('@name')")?;
        let name = module.lexeme.trim_start_matches('@').to_string();
        if !self.imported.insert(name.clone()) {
            return Err(self.error_at(ErrorKind::DuplicateModule(name), &module));
        }

        nodes.push(Node::LibraryImport {
            module: name,
            span: Span::from(&module),
        });
        Ok(())
    }

    /// Parse `init @name`; only valid as the very first statement
    pub(super) fn namespace_init(&mut self, nodes: &mut Vec<Node>) -> Result<()> {
        if self.current != 0 {
            return Err(self.error_at_current(ErrorKind::MissingNamespaceInit));
        }
        self.advance();

        if !self.check(TokenKind::ModuleName) {
            return Err(self.error_at_current(ErrorKind::MissingNamespaceName));
        }
        let namespace = self.advance().lexeme.trim_start_matches('@').to_string();

        nodes.push(Node::NamespaceInit { namespace });
        Ok(())
    }

    /// Parse `@lib::NAME : args :`
    pub(super) fn qualified_call(&mut self, nodes: &mut Vec<Node>) -> Result<()> {
        let qualifier = self.advance();
        let module = qualifier
            .lexeme
            .trim_start_matches('@')
            .trim_end_matches("::")
            .to_string();

        if !self.imported.contains(&module) {
            return Err(self.error_at(ErrorKind::UnknownModule(module), &qualifier));
        }
        if !self.is_function_call() {
            return Err(self.unexpected("a function call after the library qualifier"));
        }

        let call = self.call()?;
        nodes.push(Node::QualifiedCall { module, call });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{parse_err, parse_maple};
    use super::super::*;
    use crate::semantic::PrimitiveType;

    #[test]
    fn test_constant_declaration() {
        let program = parse_maple("dec i32 x 5").unwrap();
        assert_eq!(
            program.nodes,
            vec![Node::Declare(DeclareNode {
                ty: PrimitiveType::I32,
                name: "x".into(),
                init: Initializer::Value("5".into()),
                is_constant: true,
            })]
        );
    }

    #[test]
    fn test_changeable_declaration() {
        let program = parse_maple("dec ch f64 y 2.5").unwrap();
        assert!(matches!(&program.nodes[0], Node::Declare(d) if !d.is_constant));
    }

    #[test]
    fn test_array_declaration() {
        let program = parse_maple("dec ch i32 [] 3 -> {1, 2, 3} arr");
        // the name comes before the brackets
        assert!(program.is_err());

        let program = parse_maple("dec ch i32 arr [] 3 -> {1, 2, 3}").unwrap();
        assert_eq!(
            program.nodes[0],
            Node::Declare(DeclareNode {
                ty: PrimitiveType::I32,
                name: "arr".into(),
                init: Initializer::Array {
                    size: 3,
                    values: vec!["1".into(), "2".into(), "3".into()]
                },
                is_constant: false,
            })
        );
    }

    #[test]
    fn test_array_without_values() {
        let program = parse_maple("dec ch f32 buf [] 8").unwrap();
        assert!(matches!(
            &program.nodes[0],
            Node::Declare(DeclareNode { init: Initializer::Array { size: 8, values }, .. })
                if values.is_empty()
        ));
    }

    #[test]
    fn test_array_size_must_be_positive() {
        let err = parse_maple("dec ch i32 a [] 0").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::UnexpectedToken {
                expected: "a positive integer array size".into(),
                found: "0".into()
            }
        );
        assert_eq!(err.span.map(|s| s.column), Some(17));
    }

    #[test]
    fn test_array_too_many_values() {
        assert!(matches!(
            parse_err("dec i32 a [] 2 -> {1, 2, 3}"),
            ErrorKind::IndexOutOfRange { size: 2, .. }
        ));
    }

    #[test]
    fn test_array_value_types() {
        assert!(matches!(
            parse_err("dec i32 a [] 2 -> {1, 2.5}"),
            ErrorKind::TypeMismatch { .. }
        ));
    }

    #[test]
    fn test_declaration_from_call() {
        let source = "fnc i32 seven : :\nrtn 7\nend\ndec i32 s seven : :";
        let program = parse_maple(source).unwrap();
        assert!(matches!(
            &program.nodes[1],
            Node::Declare(DeclareNode { init: Initializer::Call(call), .. }) if call.function == "seven"
        ));
    }

    #[test]
    fn test_declaration_from_call_wrong_type() {
        let source = "fnc i32 seven : :\nrtn 7\nend\ndec bool s seven : :";
        assert!(matches!(parse_err(source), ErrorKind::TypeMismatch { .. }));
    }

    #[test]
    fn test_redeclaration() {
        assert_eq!(
            parse_err("dec i32 x 5\ndec i32 x 6"),
            ErrorKind::RedeclaredVariable("x".into())
        );
        // regardless of type
        assert_eq!(
            parse_err("dec i32 x 5\ndec f64 x 6.5"),
            ErrorKind::RedeclaredVariable("x".into())
        );
    }

    #[test]
    fn test_invalid_type() {
        assert_eq!(parse_err("dec u32 x 5"), ErrorKind::InvalidType("u32".into()));
        assert_eq!(parse_err("dec empty x 5"), ErrorKind::InvalidType("empty".into()));
    }

    #[test]
    fn test_declaration_type_mismatch() {
        let kind = parse_err("dec i32 x 2.5");
        assert_eq!(
            kind,
            ErrorKind::TypeMismatch {
                target: "x".into(),
                expected: "'i32'".into(),
                found: "decimal literal '2.5'".into()
            }
        );
    }

    #[test]
    fn test_declaration_from_variable() {
        assert!(parse_maple("dec i32 a 1\ndec i32 b a").is_ok());
        assert!(matches!(
            parse_err("dec i32 a 1\ndec f64 b a"),
            ErrorKind::TypeMismatch { .. }
        ));
    }

    #[test]
    fn test_set_after_changeable_declaration() {
        let program = parse_maple("dec ch i32 x 5\nset x 7").unwrap();
        assert_eq!(
            program.nodes[1],
            Node::Set(SetNode {
                target: "x".into(),
                target_index: None,
                value: SetValue::Plain("7".into())
            })
        );
    }

    #[test]
    fn test_set_constant() {
        assert_eq!(
            parse_err("dec i32 x 5\nset x 7"),
            ErrorKind::AssignToConstant("x".into())
        );
    }

    #[test]
    fn test_set_undeclared() {
        assert_eq!(parse_err("set x 7"), ErrorKind::UndeclaredVariable("x".into()));
    }

    #[test]
    fn test_set_copies_array_literal() {
        let source = "dec i32 arr [] 3 -> {4, 5, 6}\ndec ch i32 x 0\nset x arr[1]";
        let program = parse_maple(source).unwrap();
        assert_eq!(
            program.nodes[2],
            Node::Set(SetNode {
                target: "x".into(),
                target_index: None,
                value: SetValue::Copied {
                    array: "arr".into(),
                    index: 1,
                    literal: "5".into()
                }
            })
        );
    }

    #[test]
    fn test_set_index_out_of_range() {
        let source = "dec i32 arr [] 3 -> {4, 5, 6}\ndec ch i32 x 0\nset x arr[3]";
        assert!(matches!(
            parse_err(source),
            ErrorKind::IndexOutOfRange { index, size: 3, .. } if index == "3"
        ));
    }

    #[test]
    fn test_set_index_beyond_literals() {
        let source = "dec i32 arr [] 3 -> {4}\ndec ch i32 x 0\nset x arr[2]";
        assert!(matches!(parse_err(source), ErrorKind::IndexOutOfRange { .. }));
    }

    #[test]
    fn test_set_runtime_index() {
        let source = "dec i32 arr [] 3\ndec i32 i 1\ndec ch i32 x 0\nset x arr[i]";
        let program = parse_maple(source).unwrap();
        assert!(matches!(
            &program.nodes[3],
            Node::Set(SetNode { value: SetValue::Indexed { index, .. }, .. }) if index == "i"
        ));
    }

    #[test]
    fn test_set_array_element() {
        let program = parse_maple("dec ch i32 arr [] 3\nset arr[2] 9").unwrap();
        assert!(matches!(
            &program.nodes[1],
            Node::Set(SetNode { target_index: Some(index), .. }) if index == "2"
        ));
        assert!(matches!(
            parse_err("dec ch i32 arr [] 3\nset arr[5] 9"),
            ErrorKind::IndexOutOfRange { .. }
        ));
    }

    #[test]
    fn test_set_index_on_scalar() {
        assert_eq!(
            parse_err("dec ch i32 x 0\nset x[0] 1"),
            ErrorKind::NotAnArray("x".into())
        );
        assert_eq!(
            parse_err("dec i32 y 0\ndec ch i32 x 0\nset x y[0]"),
            ErrorKind::NotAnArray("y".into())
        );
    }

    #[test]
    fn test_function_definition() {
        let source = "fnc i32 twice : i32 n :\nmul n 2\nrtn n\nend";
        let program = parse_maple(source).unwrap();
        match &program.nodes[0] {
            Node::Function(function) => {
                assert_eq!(function.name, "twice");
                assert_eq!(function.return_type, PrimitiveType::I32);
                assert_eq!(function.params, vec![("n".to_string(), PrimitiveType::I32)]);
                assert_eq!(function.body.len(), 2);
            }
            other => panic!("expected function, got {:?}", other),
        }
        assert_eq!(program.nodes.len(), 1);
    }

    #[test]
    fn test_parameters_are_function_local() {
        let source = "fnc empty f : i32 n :\nend\nout n";
        assert_eq!(parse_err(source), ErrorKind::UndeclaredVariable("n".into()));
    }

    #[test]
    fn test_duplicate_parameter() {
        assert_eq!(
            parse_err("fnc empty f : i32 a, i32 a :\nend"),
            ErrorKind::RedeclaredVariable("a".into())
        );
    }

    #[test]
    fn test_malformed_function_header() {
        assert!(matches!(
            parse_err("fnc i32 f i32 n :\nend"),
            ErrorKind::MalformedFunctionHeader { name, .. } if name == "f"
        ));
    }

    #[test]
    fn test_malformed_function_body() {
        assert_eq!(
            parse_err("fnc i32 f : :\nrtn 1"),
            ErrorKind::MalformedFunctionBody("f".into())
        );
    }

    #[test]
    fn test_nested_function() {
        let source = "fnc empty outer : :\nfnc empty inner : :\nend\nend";
        assert_eq!(parse_err(source), ErrorKind::NestedFunction("inner".into()));
    }

    #[test]
    fn test_library_import() {
        let program = parse_maple("lib @math\n@math::square : 3 :").unwrap();
        assert!(matches!(
            &program.nodes[0],
            Node::LibraryImport { module, span } if module == "math" && span.column == 5
        ));
        assert_eq!(
            program.nodes[1],
            Node::QualifiedCall {
                module: "math".into(),
                call: CallNode {
                    function: "square".into(),
                    args: vec!["3".into()]
                }
            }
        );
        assert_eq!(program.imports().collect::<Vec<_>>(), vec!["math"]);
    }

    #[test]
    fn test_duplicate_import() {
        assert_eq!(
            parse_err("lib @math\nlib @math"),
            ErrorKind::DuplicateModule("math".into())
        );
    }

    #[test]
    fn test_unknown_module() {
        assert_eq!(
            parse_err("@math::square : 3 :"),
            ErrorKind::UnknownModule("math".into())
        );
    }

    #[test]
    fn test_namespace_init() {
        let program = parse_maple("init @geo\nfnc i32 one : :\nrtn 1\nend").unwrap();
        assert_eq!(program.namespace(), Some("geo"));
        assert_eq!(program.functions().count(), 1);
    }

    #[test]
    fn test_init_must_be_first() {
        assert_eq!(
            parse_err("dec i32 x 1\ninit @geo"),
            ErrorKind::MissingNamespaceInit
        );
    }

    #[test]
    fn test_init_needs_name() {
        assert_eq!(parse_err("init geo"), ErrorKind::MissingNamespaceName);
        assert_eq!(parse_err("init"), ErrorKind::MissingNamespaceName);
    }
}
