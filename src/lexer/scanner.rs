//! Scanner for Maple source code tokenization.

use super::dialect::{Dialect, Feature};
use super::token::{Token, TokenKind};
use crate::error::{CompileError, ErrorKind, Result, Span};

/// Scanner that produces tokens from source code
pub struct Scanner<'a> {
    source: &'a str,
    dialect: Dialect,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_offset: usize,
    start_offset: usize,
    line: usize,
    line_start: usize,
    start_line: usize,
    start_column: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str, dialect: Dialect) -> Self {
        Self {
            source,
            dialect,
            chars: source.char_indices().peekable(),
            current_offset: 0,
            start_offset: 0,
            line: 1,
            line_start: 0,
            start_line: 1,
            start_column: 1,
        }
    }

    /// Tokenize the entire source
    pub fn scan_tokens(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.scan_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        Ok(tokens)
    }

    /// Scan a single token
    fn scan_token(&mut self) -> Result<Token> {
        self.skip_whitespace_and_comments();
        self.start_offset = self.current_offset;
        self.start_line = self.line;
        self.start_column = self.current_offset - self.line_start + 1;

        let c = match self.advance() {
            None => {
                return Ok(Token::eof(self.current_offset, self.start_line, self.start_column))
            }
            Some((_, c)) => c,
        };

        let token = match c {
            // Numbers take priority over every word rule
            '0'..='9' => self.scan_number(),

            '@' if self.dialect.supports(Feature::Libraries) => self.scan_module_name()?,

            c if is_word_start(c) => self.scan_word(),

            ':' => self.make_token(TokenKind::Colon),
            ',' => self.make_token(TokenKind::Comma),
            '[' => self.make_token(TokenKind::LeftBracket),
            ']' => self.make_token(TokenKind::RightBracket),
            '{' => self.make_token(TokenKind::LeftBrace),
            '}' => self.make_token(TokenKind::RightBrace),

            '>' => {
                if self.dialect.supports(Feature::ExtendedComparisons) && self.match_char('=') {
                    self.make_token(TokenKind::GreaterEqual)
                } else {
                    self.make_token(TokenKind::Greater)
                }
            }

            '<' => {
                if self.dialect.supports(Feature::ExtendedComparisons) && self.match_char('=') {
                    self.make_token(TokenKind::LessEqual)
                } else {
                    self.make_token(TokenKind::Less)
                }
            }

            '!' if self.dialect.supports(Feature::ExtendedComparisons) => {
                if self.match_char('=') {
                    self.make_token(TokenKind::BangEqual)
                } else {
                    return Err(self.illegal(c));
                }
            }

            '=' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::EqualEqual)
                } else if self.dialect.supports(Feature::Arithmetic) && self.match_char('>') {
                    self.make_token(TokenKind::Into)
                } else {
                    return Err(self.illegal(c));
                }
            }

            '-' => {
                if self.match_char('>') {
                    self.make_token(TokenKind::Arrow)
                } else {
                    self.make_token(TokenKind::Operator)
                }
            }

            '.' => {
                if self.match_char('.') {
                    self.make_token(TokenKind::DotDot)
                } else {
                    return Err(self.illegal(c));
                }
            }

            '+' | '*' | '/' => self.make_token(TokenKind::Operator),

            _ => return Err(self.illegal(c)),
        };

        Ok(token)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(' ' | '\t' | '\r') => {
                    self.advance();
                }
                Some('\n') => {
                    self.advance();
                    self.line += 1;
                    self.line_start = self.current_offset;
                }
                Some('/') if self.dialect.supports(Feature::Comments) => {
                    let mut chars = self.chars.clone();
                    chars.next(); // consume '/'
                    if !matches!(chars.peek(), Some((_, '/'))) {
                        break;
                    }
                    while self.peek().map_or(false, |c| c != '\n') {
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn advance(&mut self) -> Option<(usize, char)> {
        let result = self.chars.next();
        if let Some((_, c)) = result {
            self.current_offset += c.len_utf8();
        }
        result
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        let lexeme = &self.source[self.start_offset..self.current_offset];
        Token::new(kind, lexeme, self.start_offset, self.start_line, self.start_column)
    }

    fn illegal(&self, c: char) -> CompileError {
        CompileError::at(
            ErrorKind::IllegalCharacter(c),
            Span::new(self.start_offset, c.len_utf8(), self.start_line, self.start_column),
        )
    }

    fn consume_word_chars(&mut self) {
        while self.peek().map_or(false, is_word_continue) {
            self.advance();
        }
    }

    fn scan_word(&mut self) -> Token {
        self.consume_word_chars();
        let word = &self.source[self.start_offset..self.current_offset];
        let kind = self.dialect.keyword(word).unwrap_or(TokenKind::Identifier);
        self.make_token(kind)
    }

    fn scan_number(&mut self) -> Token {
        while self.peek().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }

        // A fraction needs a digit after the dot so `0..5` stays a range
        if self.peek() == Some('.') {
            let mut chars = self.chars.clone();
            chars.next(); // consume '.'
            if chars.peek().map_or(false, |(_, c)| c.is_ascii_digit()) {
                self.advance();
                while self.peek().map_or(false, |c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        self.make_token(TokenKind::Number)
    }

    /// `@name` or `@name::`
    fn scan_module_name(&mut self) -> Result<Token> {
        if !self.peek().map_or(false, is_word_continue) {
            return Err(self.illegal('@'));
        }
        self.consume_word_chars();

        let mut chars = self.chars.clone();
        if matches!(chars.next(), Some((_, ':'))) && matches!(chars.next(), Some((_, ':'))) {
            self.advance();
            self.advance();
            return Ok(self.make_token(TokenKind::QualifiedName));
        }

        Ok(self.make_token(TokenKind::ModuleName))
    }
}

fn is_word_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_word_continue(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

/// Tokenize `source` under the rules of `dialect`
pub fn tokenize(source: &str, dialect: Dialect) -> Result<Vec<Token>> {
    Scanner::new(source, dialect).scan_tokens()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source, Dialect::Maple)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds("  \t\n\n "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_declaration() {
        assert_eq!(
            kinds("dec ch i32 counter 0"),
            vec![
                TokenKind::Dec,
                TokenKind::Ch,
                TokenKind::I32,
                TokenKind::Identifier,
                TokenKind::Number,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_range_is_not_a_decimal() {
        let tokens = tokenize("loop i 0..5", Dialect::Maple).unwrap();
        let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["loop", "i", "0", "..", "5", ""]);
        assert_eq!(tokens[3].kind, TokenKind::DotDot);
    }

    #[test]
    fn test_decimal_number() {
        let tokens = tokenize("3.25", Dialect::Maple).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].lexeme, "3.25");
    }

    #[test]
    fn test_two_char_operators_win() {
        assert_eq!(
            kinds(">= > <= < != == -> - =>"),
            vec![
                TokenKind::GreaterEqual,
                TokenKind::Greater,
                TokenKind::LessEqual,
                TokenKind::Less,
                TokenKind::BangEqual,
                TokenKind::EqualEqual,
                TokenKind::Arrow,
                TokenKind::Operator,
                TokenKind::Into,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        let tokens = tokenize("output decimal", Dialect::Maple).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_module_names() {
        let tokens = tokenize("lib @math\n@math::square : x :", Dialect::Maple).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Lib);
        assert_eq!(tokens[1].kind, TokenKind::ModuleName);
        assert_eq!(tokens[1].lexeme, "@math");
        assert_eq!(tokens[2].kind, TokenKind::QualifiedName);
        assert_eq!(tokens[2].lexeme, "@math::");
        assert_eq!(tokens[3].kind, TokenKind::Identifier);
        assert_eq!(tokens[3].lexeme, "square");
    }

    #[test]
    fn test_line_and_column() {
        let tokens = tokenize("dec i32 x 5\n  out x", Dialect::Maple).unwrap();
        let out = &tokens[4];
        assert_eq!(out.kind, TokenKind::Out);
        assert_eq!((out.line, out.column), (2, 3));
        assert_eq!((tokens[3].line, tokens[3].column), (1, 11));
    }

    #[test]
    fn test_comments_skipped() {
        assert_eq!(
            kinds("// header\nout x // trailing"),
            vec![TokenKind::Out, TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn test_illegal_character() {
        let err = tokenize("dec i32 x 5\nout $", Dialect::Maple).unwrap_err();
        assert_eq!(err.kind, ErrorKind::IllegalCharacter('$'));
        let span = err.span.unwrap();
        assert_eq!((span.line, span.column), (2, 5));
    }

    #[test]
    fn test_single_equals_is_illegal() {
        let err = tokenize("set x = 5", Dialect::Maple).unwrap_err();
        assert_eq!(err.kind, ErrorKind::IllegalCharacter('='));
    }

    #[test]
    fn test_legacy_dialect() {
        let tokens = tokenize("around i 3\nroll\nloop", Dialect::Legacy).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Loop);
        assert_eq!(tokens[4].kind, TokenKind::Identifier);

        let err = tokenize("lib @math", Dialect::Legacy).unwrap_err();
        assert_eq!(err.kind, ErrorKind::IllegalCharacter('@'));

        let err = tokenize("if x >= 3", Dialect::Legacy).unwrap_err();
        assert_eq!(err.kind, ErrorKind::IllegalCharacter('='));
    }

    #[test]
    fn test_legacy_has_no_comments() {
        let tokens = tokenize("// note", Dialect::Legacy).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Operator);
        assert_eq!(tokens[1].kind, TokenKind::Operator);
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
    }
}
