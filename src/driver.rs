//! Driver that orchestrates the compilation pipeline.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::codegen::{CppEmitter, EmitMode};
use crate::diagnostics::{Diagnostic, DiagnosticReporter};
use crate::error::{CompileError, ErrorKind, Result, Warning};
use crate::lexer::{tokenize, Dialect};
use crate::parser;
use crate::resolver::{CompiledModule, FsModuleLoader, ModuleLoader, Resolver};

/// Suffix appended to the input stem for the generated program
pub const OUTPUT_SUFFIX: &str = "_Maple";

/// Per-compilation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    pub dialect: Dialect,
    pub mode: EmitMode,
    /// Print tokens to stderr
    pub dump_tokens: bool,
    /// Print the AST to stderr
    pub dump_ast: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::Maple,
            mode: EmitMode::Program,
            dump_tokens: false,
            dump_ast: false,
        }
    }
}

/// Everything produced by compiling one unit
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledUnit {
    pub code: String,
    /// Imported libraries, dependencies first
    pub modules: Vec<CompiledModule>,
    pub warnings: Vec<Warning>,
}

impl CompiledUnit {
    /// File name of the generated program for an input stem
    pub fn output_name(stem: &str) -> String {
        format!("{}{}.cpp", stem, OUTPUT_SUFFIX)
    }

    /// Write the program and its library headers into `out_dir`.
    ///
    /// Returns the path of the generated program.
    pub fn write_to(&self, out_dir: &Path, stem: &str) -> io::Result<PathBuf> {
        fs::create_dir_all(out_dir)?;

        for module in &self.modules {
            fs::write(out_dir.join(module.header_name()), &module.code)?;
        }

        let output = out_dir.join(Self::output_name(stem));
        fs::write(&output, &self.code)?;
        Ok(output)
    }
}

/// Compile one source text, resolving its imports through `loader`
pub fn compile_unit(
    source: &str,
    options: &CompileOptions,
    loader: &dyn ModuleLoader,
) -> Result<CompiledUnit> {
    // === Lexical Analysis ===
    let tokens = tokenize(source, options.dialect)?;

    if options.dump_tokens {
        eprintln!("=== Tokens ===");
        for token in &tokens {
            eprintln!("  {}", token);
        }
        eprintln!();
    }

    // === Parsing ===
    let (program, warnings) = match options.mode {
        EmitMode::Program => parser::parse(tokens, options.dialect)?,
        EmitMode::Library => parser::parse_library(tokens, options.dialect)?,
    };

    if options.dump_ast {
        eprintln!("=== AST ===");
        eprintln!("{:#?}", program);
        eprintln!();
    }

    // === Module Resolution ===
    let modules = Resolver::new(loader).resolve(&program)?;

    // === Code Generation ===
    let code = CppEmitter::new(options.mode).emit(&program);

    Ok(CompiledUnit {
        code,
        modules,
        warnings,
    })
}

/// Compile a single library to its header text
pub fn compile_module(name: &str, loader: &dyn ModuleLoader) -> Result<String> {
    let mut modules = Resolver::new(loader).resolve_module(name)?;
    // The requested module finishes last
    modules
        .pop()
        .map(|module| module.code)
        .ok_or_else(|| CompileError::new(ErrorKind::ModuleNotFound(name.to_string())))
}

/// The compilation driver
pub struct Driver {
    file: String,
    source: String,
    options: CompileOptions,
    loader: Box<dyn ModuleLoader>,
}

impl Driver {
    pub fn new(file: String, source: String) -> Self {
        Self {
            file,
            source,
            options: CompileOptions::default(),
            loader: Box::new(FsModuleLoader::default()),
        }
    }

    pub fn set_dialect(&mut self, dialect: Dialect) {
        self.options.dialect = dialect;
    }

    pub fn set_mode(&mut self, mode: EmitMode) {
        self.options.mode = mode;
    }

    pub fn set_dump_ast(&mut self, enabled: bool) {
        self.options.dump_ast = enabled;
    }

    pub fn set_dump_tokens(&mut self, enabled: bool) {
        self.options.dump_tokens = enabled;
    }

    pub fn set_loader(&mut self, loader: Box<dyn ModuleLoader>) {
        self.loader = loader;
    }

    /// Run the compilation pipeline
    pub fn compile(&self) -> std::result::Result<CompiledUnit, Vec<Diagnostic>> {
        match compile_unit(&self.source, &self.options, self.loader.as_ref()) {
            Ok(unit) => {
                // Warnings are allowed
                for diagnostic in self.warnings(&unit) {
                    eprintln!("{}", diagnostic);
                }
                Ok(unit)
            }
            Err(error) => Err(vec![self.render_error(&error)]),
        }
    }

    /// Render the warnings of a unit and of its libraries
    pub fn warnings(&self, unit: &CompiledUnit) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for module in &unit.modules {
            let mut reporter =
                DiagnosticReporter::new(&self.loader.describe(&module.name), &module.source);
            for warning in &module.warnings {
                reporter.report_warning(warning);
            }
            diagnostics.extend(reporter.take_diagnostics());
        }

        let mut reporter = DiagnosticReporter::new(&self.file, &self.source);
        for warning in &unit.warnings {
            reporter.report_warning(warning);
        }
        diagnostics.extend(reporter.take_diagnostics());
        diagnostics
    }

    /// Render an error against the file it was raised in
    fn render_error(&self, error: &CompileError) -> Diagnostic {
        let mut reporter = match &error.module {
            Some(module) => {
                let source = self.loader.load(module).unwrap_or_default();
                DiagnosticReporter::new(&self.loader.describe(module), &source)
            }
            None => DiagnosticReporter::new(&self.file, &self.source),
        };
        reporter.report_error(error);

        let mut diagnostics = reporter.take_diagnostics();
        diagnostics
            .pop()
            .unwrap_or_else(|| Diagnostic::error(error.code(), error.to_string()))
    }
}
