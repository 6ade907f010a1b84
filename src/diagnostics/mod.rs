//! Diagnostic reporting system for rich, actionable error messages.

mod reporter;

pub use reporter::DiagnosticReporter;

use colored::Colorize;
use std::fmt;

/// Location in source code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub length: usize,
}

impl SourceLocation {
    pub fn new(file: &str, line: usize, column: usize, length: usize) -> Self {
        Self {
            file: file.to_string(),
            line,
            column,
            length,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Error,
    Warning,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Error => write!(f, "{}", "error".red().bold()),
            DiagnosticLevel::Warning => write!(f, "{}", "warning".yellow().bold()),
        }
    }
}

/// A rendered compiler finding
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub code: &'static str,
    pub message: String,
    pub location: Option<SourceLocation>,
    pub source_line: Option<String>,
    pub help: Option<String>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    fn with_level(level: DiagnosticLevel, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            level,
            code,
            message: message.into(),
            location: None,
            source_line: None,
            help: None,
            notes: Vec::new(),
        }
    }

    pub fn error(code: &'static str, message: impl Into<String>) -> Self {
        Self::with_level(DiagnosticLevel::Error, code, message)
    }

    pub fn warning(code: &'static str, message: impl Into<String>) -> Self {
        Self::with_level(DiagnosticLevel::Warning, code, message)
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_source_line(mut self, line: impl Into<String>) -> Self {
        self.source_line = Some(line.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_error(&self) -> bool {
        matches!(self.level, DiagnosticLevel::Error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Header: error[E201]: message
        writeln!(f, "{}[{}]: {}", self.level, self.code.cyan(), self.message)?;

        if let Some(ref loc) = self.location {
            let padding = " ".repeat(loc.line.to_string().len());

            writeln!(f, "{}--> {}", padding, loc.to_string().blue())?;
            writeln!(f, "{} {}", padding, "|".blue())?;

            if let Some(ref source) = self.source_line {
                writeln!(f, "{} {} {}", loc.line.to_string().blue().bold(), "|".blue(), source)?;

                let underline = format!(
                    "{}{}",
                    " ".repeat(loc.column.saturating_sub(1)),
                    "^".repeat(loc.length.max(1))
                );
                let underline = match self.level {
                    DiagnosticLevel::Error => underline.red().bold(),
                    DiagnosticLevel::Warning => underline.yellow().bold(),
                };
                writeln!(f, "{} {} {}", padding, "|".blue(), underline)?;
            }

            writeln!(f, "{} {}", padding, "|".blue())?;
        }

        if let Some(ref help) = self.help {
            writeln!(f, "   {} {}: {}", "=".blue(), "help".green().bold(), help)?;
        }

        for note in &self.notes {
            writeln!(f, "   {} {}: {}", "=".blue(), "note".cyan().bold(), note)?;
        }

        Ok(())
    }
}

/// Error codes for Maple diagnostics
pub mod codes {
    // Lexer errors (E0xx)
    pub const ILLEGAL_CHARACTER: &str = "E001";

    // Syntax errors (E1xx)
    pub const UNEXPECTED_TOKEN: &str = "E100";
    pub const UNEXPECTED_EOF: &str = "E101";
    pub const MALFORMED_FUNCTION_HEADER: &str = "E102";
    pub const MALFORMED_FUNCTION_BODY: &str = "E103";
    pub const MISSING_NAMESPACE_INIT: &str = "E104";
    pub const MISSING_NAMESPACE_NAME: &str = "E105";
    pub const NESTED_FUNCTION: &str = "E106";
    pub const RETURN_OUTSIDE_FUNCTION: &str = "E107";
    pub const LIBRARY_STATEMENT: &str = "E108";

    // Semantic errors (E2xx)
    pub const REDECLARED_VARIABLE: &str = "E200";
    pub const INVALID_TYPE: &str = "E201";
    pub const INDEX_OUT_OF_RANGE: &str = "E202";
    pub const UNDECLARED_VARIABLE: &str = "E203";
    pub const ASSIGN_TO_CONSTANT: &str = "E204";
    pub const TYPE_MISMATCH: &str = "E205";
    pub const NOT_AN_ARRAY: &str = "E206";
    pub const ARGUMENT_COUNT: &str = "E207";

    // Library errors (E3xx)
    pub const MODULE_NOT_FOUND: &str = "E300";
    pub const DUPLICATE_MODULE: &str = "E301";
    pub const UNKNOWN_MODULE: &str = "E302";
    pub const CYCLIC_IMPORT: &str = "E303";
    pub const MODULE_UNREADABLE: &str = "E304";

    // Warning codes (W0xx)
    pub const RESTORE_WITHOUT_BACKUP: &str = "W001";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_with_source() {
        colored::control::set_override(false);
        let diagnostic = Diagnostic::error(codes::UNDECLARED_VARIABLE, "variable 'y' not declared")
            .with_location(SourceLocation::new("main.mpl", 2, 5, 1))
            .with_source_line("set y 3")
            .with_help("declare it with 'dec' first");

        let rendered = diagnostic.to_string();
        assert!(rendered.starts_with("error[E203]: variable 'y' not declared\n"));
        assert!(rendered.contains("--> main.mpl:2:5"));
        assert!(rendered.contains("2 | set y 3"));
        assert!(rendered.contains("  |     ^\n"));
        assert!(rendered.contains("= help: declare it with 'dec' first"));
    }

    #[test]
    fn test_render_without_location() {
        colored::control::set_override(false);
        let diagnostic = Diagnostic::warning(codes::RESTORE_WITHOUT_BACKUP, "nothing saved")
            .with_note("in library 'math'");
        let rendered = diagnostic.to_string();
        assert!(rendered.starts_with("warning[W001]: nothing saved\n"));
        assert!(rendered.contains("= note: in library 'math'"));
        assert!(!diagnostic.is_error());
    }
}
