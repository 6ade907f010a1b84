//! Language dialects: keyword tables and feature gates.
//!
//! The earlier "Josh" dialect and the extended Maple dialect share one
//! pipeline. A dialect only decides which words are reserved and which
//! punctuation is legal; the parser and emitter never branch on it directly.

use std::fmt;

use super::token::TokenKind;

/// A concrete keyword/feature configuration of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// The first, minimal dialect (`.josh` sources)
    Legacy,
    /// The extended dialect (`.mpl` programs, `.mal` libraries)
    Maple,
}

/// Optional language features
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// `// ...` line comments
    Comments,
    /// `>=`, `<=` and `!=`
    ExtendedComparisons,
    /// `add`/`sub`/... keywords and the `=>` destination arrow
    Arithmetic,
    /// `lib @x`, `init @x` and `@x::f` qualified calls
    Libraries,
}

const SHARED_KEYWORDS: &[(&str, TokenKind)] = &[
    ("run", TokenKind::Run),
    ("dec", TokenKind::Dec),
    ("set", TokenKind::Set),
    ("ch", TokenKind::Ch),
    ("out", TokenKind::Out),
    ("if", TokenKind::If),
    ("end", TokenKind::End),
    ("roll", TokenKind::Roll),
    ("back", TokenKind::Back),
    ("load", TokenKind::Load),
    ("fnc", TokenKind::Fnc),
    ("i8", TokenKind::I8),
    ("i16", TokenKind::I16),
    ("i32", TokenKind::I32),
    ("i64", TokenKind::I64),
    ("bool", TokenKind::Bool),
    ("str", TokenKind::Str),
    ("f32", TokenKind::F32),
    ("f64", TokenKind::F64),
];

const LEGACY_KEYWORDS: &[(&str, TokenKind)] = &[
    ("around", TokenKind::Loop),
    ("return", TokenKind::Rtn),
];

const MAPLE_KEYWORDS: &[(&str, TokenKind)] = &[
    ("loop", TokenKind::Loop),
    ("rtn", TokenKind::Rtn),
    ("elif", TokenKind::Elif),
    ("else", TokenKind::Else),
    ("char", TokenKind::Char),
    ("empty", TokenKind::Empty),
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("add", TokenKind::Add),
    ("sub", TokenKind::Sub),
    ("mul", TokenKind::Mul),
    ("div", TokenKind::Div),
    ("mod", TokenKind::Mod),
    ("lib", TokenKind::Lib),
    ("init", TokenKind::Init),
];

impl Dialect {
    /// Pick the dialect for a source file extension
    pub fn from_extension(ext: &str) -> Option<Dialect> {
        match ext {
            "mpl" | "mal" => Some(Dialect::Maple),
            "josh" => Some(Dialect::Legacy),
            _ => None,
        }
    }

    /// Extension of program sources in this dialect
    pub fn source_extension(&self) -> &'static str {
        match self {
            Dialect::Legacy => "josh",
            Dialect::Maple => "mpl",
        }
    }

    fn keywords(&self) -> &'static [(&'static str, TokenKind)] {
        match self {
            Dialect::Legacy => LEGACY_KEYWORDS,
            Dialect::Maple => MAPLE_KEYWORDS,
        }
    }

    /// Map a word to its keyword kind, if it is reserved in this dialect
    pub fn keyword(&self, word: &str) -> Option<TokenKind> {
        SHARED_KEYWORDS
            .iter()
            .chain(self.keywords())
            .find(|(text, _)| *text == word)
            .map(|(_, kind)| *kind)
    }

    /// Spelling of a keyword kind in this dialect (for messages)
    pub fn spelling(&self, kind: TokenKind) -> Option<&'static str> {
        SHARED_KEYWORDS
            .iter()
            .chain(self.keywords())
            .find(|(_, k)| *k == kind)
            .map(|(text, _)| *text)
    }

    pub fn supports(&self, feature: Feature) -> bool {
        match self {
            Dialect::Maple => true,
            Dialect::Legacy => match feature {
                Feature::Comments
                | Feature::ExtendedComparisons
                | Feature::Arithmetic
                | Feature::Libraries => false,
            },
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Legacy => write!(f, "legacy"),
            Dialect::Maple => write!(f, "maple"),
        }
    }
}
