//! Lexer module for tokenizing Maple source code.

mod dialect;
mod scanner;
mod token;

pub use dialect::{Dialect, Feature};
pub use scanner::{tokenize, Scanner};
pub use token::{Token, TokenKind};
