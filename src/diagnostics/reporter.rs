//! Diagnostic reporter that turns compile errors into rendered diagnostics.

use super::{Diagnostic, SourceLocation};
use crate::error::{CompileError, ErrorKind, Span, Warning};

/// Collects diagnostics for one source file
#[derive(Debug, Default)]
pub struct DiagnosticReporter {
    diagnostics: Vec<Diagnostic>,
    file: String,
    lines: Vec<String>,
}

impl DiagnosticReporter {
    pub fn new(file: &str, source: &str) -> Self {
        Self {
            diagnostics: Vec::new(),
            file: file.to_string(),
            lines: source.lines().map(str::to_string).collect(),
        }
    }

    /// Get a specific line's content
    pub fn get_line(&self, line_num: usize) -> Option<&str> {
        line_num
            .checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .map(String::as_str)
    }

    fn locate(&self, mut diagnostic: Diagnostic, span: Span) -> Diagnostic {
        let location = SourceLocation::new(&self.file, span.line, span.column, span.length);
        diagnostic = diagnostic.with_location(location);
        if let Some(line) = self.get_line(span.line) {
            diagnostic = diagnostic.with_source_line(line);
        }
        diagnostic
    }

    /// Report a fatal compile error
    pub fn report_error(&mut self, error: &CompileError) {
        let mut diagnostic = Diagnostic::error(error.code(), error.to_string());
        if let Some(span) = error.span {
            diagnostic = self.locate(diagnostic, span);
        }
        if let Some(help) = help_for(&error.kind) {
            diagnostic = diagnostic.with_help(help);
        }
        if let Some(module) = &error.module {
            diagnostic = diagnostic.with_note(format!("raised while compiling library '{}'", module));
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn report_warning(&mut self, warning: &Warning) {
        let diagnostic = Diagnostic::warning(warning.code, warning.message.clone());
        let diagnostic = self.locate(diagnostic, warning.span);
        self.diagnostics.push(diagnostic);
    }

    /// Consume and return all diagnostics
    pub fn take_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Suggested fix for common mistakes
fn help_for(kind: &ErrorKind) -> Option<&'static str> {
    let help = match kind {
        ErrorKind::AssignToConstant(_) => "declare it with 'dec ch' to make it changeable",
        ErrorKind::UndeclaredVariable(_) => "declare it with 'dec' before using it",
        ErrorKind::RedeclaredVariable(_) => "pick a different name or use 'set' to change the value",
        ErrorKind::InvalidType(_) => "valid types are i8, i16, i32, i64, f32, f64, bool, char and str",
        ErrorKind::MissingNamespaceInit => "move 'init' to the top of the file",
        ErrorKind::UnknownModule(_) => "import it first with 'lib @name'",
        ErrorKind::LibraryStatement(_) => {
            "libraries hold only 'dec', 'fnc' and 'lib'; move other statements into a function"
        }
        ErrorKind::ModuleNotFound(_) => "libraries are looked up as '<name>.mal' in the library directory",
        ErrorKind::MalformedFunctionHeader { .. } => {
            "function headers look like 'fnc TYPE NAME : TYPE PARAM, ... :'"
        }
        _ => return None,
    };
    Some(help)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::codes;

    #[test]
    fn test_report_error_with_source_line() {
        let mut reporter = DiagnosticReporter::new("main.mpl", "dec i32 x 5\nset x 7\n");
        let error = CompileError::at(ErrorKind::AssignToConstant("x".into()), Span::new(16, 1, 2, 5));
        reporter.report_error(&error);

        let diagnostics = reporter.take_diagnostics();
        let diagnostic = &diagnostics[0];
        assert!(diagnostic.is_error());
        assert_eq!(diagnostic.code, codes::ASSIGN_TO_CONSTANT);
        assert_eq!(diagnostic.source_line.as_deref(), Some("set x 7"));
        assert_eq!(diagnostic.location.as_ref().map(|l| l.column), Some(5));
        assert!(diagnostic.help.is_some());
    }

    #[test]
    fn test_module_errors_carry_a_note() {
        let mut reporter = DiagnosticReporter::new("main.mpl", "lib @geo\n");
        let error = CompileError::new(ErrorKind::ModuleNotFound("shapes".into())).in_module("geo");
        reporter.report_error(&error);

        let diagnostics = reporter.take_diagnostics();
        let diagnostic = &diagnostics[0];
        assert!(diagnostic.location.is_none());
        assert_eq!(diagnostic.notes, vec!["raised while compiling library 'geo'".to_string()]);
    }

    #[test]
    fn test_warning_keeps_its_level() {
        let mut reporter = DiagnosticReporter::new("main.mpl", "load x");
        reporter.report_warning(&Warning {
            code: codes::RESTORE_WITHOUT_BACKUP,
            message: "no backup".into(),
            span: Span::new(5, 1, 1, 6),
        });
        let diagnostics = reporter.take_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert!(!diagnostics[0].is_error());
        assert_eq!(diagnostics[0].code, codes::RESTORE_WITHOUT_BACKUP);
    }

    #[test]
    fn test_line_out_of_range() {
        let reporter = DiagnosticReporter::new("main.mpl", "out 1");
        assert_eq!(reporter.get_line(0), None);
        assert_eq!(reporter.get_line(2), None);
        assert_eq!(reporter.get_line(1), Some("out 1"));
    }
}
