//! Primitive types and literal classification.

use std::fmt;

/// The closed set of Maple value types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    I8,
    I16,
    I32,
    I64,
    Bool,
    F32,
    F64,
    Char,
    Str,
    /// Only valid as a function return type
    Empty,
}

impl PrimitiveType {
    /// Look up a type by its source keyword
    pub fn from_keyword(word: &str) -> Option<Self> {
        let ty = match word {
            "i8" => PrimitiveType::I8,
            "i16" => PrimitiveType::I16,
            "i32" => PrimitiveType::I32,
            "i64" => PrimitiveType::I64,
            "bool" => PrimitiveType::Bool,
            "f32" => PrimitiveType::F32,
            "f64" => PrimitiveType::F64,
            "char" => PrimitiveType::Char,
            "str" => PrimitiveType::Str,
            "empty" => PrimitiveType::Empty,
            _ => return None,
        };
        Some(ty)
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            PrimitiveType::I8 => "i8",
            PrimitiveType::I16 => "i16",
            PrimitiveType::I32 => "i32",
            PrimitiveType::I64 => "i64",
            PrimitiveType::Bool => "bool",
            PrimitiveType::F32 => "f32",
            PrimitiveType::F64 => "f64",
            PrimitiveType::Char => "char",
            PrimitiveType::Str => "str",
            PrimitiveType::Empty => "empty",
        }
    }

    /// Get the C++ equivalent type name
    pub fn to_cpp_type(&self) -> &'static str {
        match self {
            PrimitiveType::I8 => "int8_t",
            PrimitiveType::I16 => "int16_t",
            PrimitiveType::I32 => "int32_t",
            PrimitiveType::I64 => "int64_t",
            PrimitiveType::Bool => "bool",
            PrimitiveType::F32 => "float",
            PrimitiveType::F64 => "double",
            PrimitiveType::Char => "char",
            PrimitiveType::Str => "std::string",
            PrimitiveType::Empty => "void",
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            PrimitiveType::I8 | PrimitiveType::I16 | PrimitiveType::I32 | PrimitiveType::I64
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(self, PrimitiveType::F32 | PrimitiveType::F64)
    }

    /// Whether a variable or parameter may have this type
    pub fn is_value_type(&self) -> bool {
        !matches!(self, PrimitiveType::Empty)
    }

    /// Values of this type round-trip through the numeric backup map
    pub fn is_backup_compatible(&self) -> bool {
        self.is_integer() || self.is_float() || matches!(self, PrimitiveType::Bool)
    }

    /// Whether a literal can initialize or be assigned to this type
    pub fn accepts(&self, literal: Literal) -> bool {
        match literal {
            Literal::Integer => self.is_integer() || self.is_float(),
            Literal::Decimal => self.is_float(),
            Literal::Boolean => matches!(self, PrimitiveType::Bool),
            Literal::Bit => {
                self.is_integer() || self.is_float() || matches!(self, PrimitiveType::Bool)
            }
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// Lexical category of a literal operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal {
    /// `0` or `1`, valid for numbers and booleans
    Bit,
    Integer,
    Decimal,
    Boolean,
}

impl Literal {
    /// Classify raw operand text; `None` means the text is a name
    pub fn classify(text: &str) -> Option<Literal> {
        match text {
            "true" | "false" => return Some(Literal::Boolean),
            "0" | "1" => return Some(Literal::Bit),
            _ => {}
        }

        let mut parts = text.splitn(2, '.');
        let whole = parts.next().unwrap_or_default();
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        match parts.next() {
            None => Some(Literal::Integer),
            Some(frac) if !frac.is_empty() && frac.bytes().all(|b| b.is_ascii_digit()) => {
                Some(Literal::Decimal)
            }
            Some(_) => None,
        }
    }

    /// The literal as a non-negative index, if it is one
    pub fn as_index(text: &str) -> Option<usize> {
        match Literal::classify(text)? {
            Literal::Integer | Literal::Bit => text.parse().ok(),
            _ => None,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Literal::Bit | Literal::Integer => "integer literal",
            Literal::Decimal => "decimal literal",
            Literal::Boolean => "boolean literal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_table_is_closed() {
        for word in ["i8", "i16", "i32", "i64", "bool", "f32", "f64", "char", "str", "empty"] {
            let ty = PrimitiveType::from_keyword(word).unwrap();
            assert_eq!(ty.keyword(), word);
        }
        assert_eq!(PrimitiveType::from_keyword("u32"), None);
        assert_eq!(PrimitiveType::from_keyword("int"), None);
    }

    #[test]
    fn test_cpp_names() {
        assert_eq!(PrimitiveType::I64.to_cpp_type(), "int64_t");
        assert_eq!(PrimitiveType::F32.to_cpp_type(), "float");
        assert_eq!(PrimitiveType::Str.to_cpp_type(), "std::string");
        assert_eq!(PrimitiveType::Empty.to_cpp_type(), "void");
    }

    #[test]
    fn test_classify() {
        assert_eq!(Literal::classify("42"), Some(Literal::Integer));
        assert_eq!(Literal::classify("1"), Some(Literal::Bit));
        assert_eq!(Literal::classify("2.5"), Some(Literal::Decimal));
        assert_eq!(Literal::classify("true"), Some(Literal::Boolean));
        assert_eq!(Literal::classify("x"), None);
        assert_eq!(Literal::classify("x1"), None);
        assert_eq!(Literal::classify("2."), None);
    }

    #[test]
    fn test_compatibility() {
        assert!(PrimitiveType::I32.accepts(Literal::Integer));
        assert!(!PrimitiveType::I32.accepts(Literal::Decimal));
        assert!(PrimitiveType::F64.accepts(Literal::Integer));
        assert!(PrimitiveType::Bool.accepts(Literal::Boolean));
        assert!(PrimitiveType::Bool.accepts(Literal::Bit));
        assert!(!PrimitiveType::Bool.accepts(Literal::Integer));
        assert!(!PrimitiveType::Str.accepts(Literal::Integer));
        assert!(!PrimitiveType::Char.accepts(Literal::Bit));
    }

    #[test]
    fn test_as_index() {
        assert_eq!(Literal::as_index("3"), Some(3));
        assert_eq!(Literal::as_index("0"), Some(0));
        assert_eq!(Literal::as_index("1.5"), None);
        assert_eq!(Literal::as_index("i"), None);
    }
}
