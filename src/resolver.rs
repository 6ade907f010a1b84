//! Library import resolution.
//!
//! The parser only records `lib @name` requests. This phase loads each
//! requested library, compiles it (and its own imports) into a C++ header, and
//! hands the headers back in dependency order.

use std::io;
use std::path::{Path, PathBuf};

use crate::codegen::{CppEmitter, EmitMode};
use crate::error::{CompileError, ErrorKind, Result, Span, Warning};
use crate::lexer::{tokenize, Dialect};
use crate::parser::{self, Node, Program};

/// Extension of library sources
pub const LIBRARY_EXTENSION: &str = "mal";

/// Where library sources come from
pub trait ModuleLoader {
    fn exists(&self, name: &str) -> bool;
    fn load(&self, name: &str) -> io::Result<String>;

    /// Human-readable location of a library, for messages
    fn describe(&self, name: &str) -> String {
        format!("{}.{}", name, LIBRARY_EXTENSION)
    }
}

/// Loads `<lib_dir>/<name>.mal` from disk
#[derive(Debug, Clone)]
pub struct FsModuleLoader {
    lib_dir: PathBuf,
}

impl FsModuleLoader {
    pub fn new(lib_dir: impl Into<PathBuf>) -> Self {
        Self {
            lib_dir: lib_dir.into(),
        }
    }

    pub fn lib_dir(&self) -> &Path {
        &self.lib_dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.lib_dir.join(format!("{}.{}", name, LIBRARY_EXTENSION))
    }
}

impl Default for FsModuleLoader {
    fn default() -> Self {
        Self::new("lib")
    }
}

impl ModuleLoader for FsModuleLoader {
    fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_file()
    }

    fn load(&self, name: &str) -> io::Result<String> {
        std::fs::read_to_string(self.path_for(name))
    }

    fn describe(&self, name: &str) -> String {
        self.path_for(name).display().to_string()
    }
}

/// A library compiled to a header
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledModule {
    pub name: String,
    pub source: String,
    pub code: String,
    pub warnings: Vec<Warning>,
}

impl CompiledModule {
    /// File name of the generated header
    pub fn header_name(&self) -> String {
        format!("{}.hpp", self.name)
    }
}

/// Compiles the libraries a program imports
pub struct Resolver<'a> {
    loader: &'a dyn ModuleLoader,
    /// Finished modules, dependencies first
    compiled: Vec<CompiledModule>,
    /// Modules being compiled, outermost first
    in_progress: Vec<String>,
}

impl<'a> Resolver<'a> {
    pub fn new(loader: &'a dyn ModuleLoader) -> Self {
        Self {
            loader,
            compiled: Vec::new(),
            in_progress: Vec::new(),
        }
    }

    /// Compile every library `program` imports, directly or transitively
    pub fn resolve(mut self, program: &Program) -> Result<Vec<CompiledModule>> {
        self.resolve_imports(program)?;
        Ok(self.compiled)
    }

    /// Compile a single library and everything it imports
    pub fn resolve_module(mut self, name: &str) -> Result<Vec<CompiledModule>> {
        self.compile_module(name, None)?;
        Ok(self.compiled)
    }

    fn resolve_imports(&mut self, program: &Program) -> Result<()> {
        for node in &program.nodes {
            if let Node::LibraryImport { module, span } = node {
                self.compile_module(module, Some(*span))?;
            }
        }
        Ok(())
    }

    /// `import` is the position of the `lib` request, when there is one
    fn compile_module(&mut self, name: &str, import: Option<Span>) -> Result<()> {
        let error = |kind: ErrorKind| match import {
            Some(span) => CompileError::at(kind, span),
            None => CompileError::new(kind),
        };

        if self.compiled.iter().any(|module| module.name == name) {
            return Ok(());
        }
        if self.in_progress.iter().any(|module| module == name) {
            return Err(error(ErrorKind::CyclicImport(name.to_string())));
        }
        if !self.loader.exists(name) {
            return Err(error(ErrorKind::ModuleNotFound(name.to_string())));
        }

        let source = self.loader.load(name).map_err(|err| {
            error(ErrorKind::ModuleUnreadable {
                name: self.loader.describe(name),
                message: err.to_string(),
            })
        })?;

        self.in_progress.push(name.to_string());
        let built = self.build(&source);
        self.in_progress.pop();
        let (code, warnings) = built.map_err(|err| err.in_module(name))?;

        self.compiled.push(CompiledModule {
            name: name.to_string(),
            source,
            code,
            warnings,
        });
        Ok(())
    }

    fn build(&mut self, source: &str) -> Result<(String, Vec<Warning>)> {
        let tokens = tokenize(source, Dialect::Maple)?;
        let (program, warnings) = parser::parse_library(tokens, Dialect::Maple)?;
        self.resolve_imports(&program)?;
        let code = CppEmitter::new(EmitMode::Library).emit(&program);
        Ok((code, warnings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// In-memory library store
    #[derive(Default)]
    struct MemoryLoader {
        modules: HashMap<String, String>,
    }

    impl MemoryLoader {
        fn with(mut self, name: &str, source: &str) -> Self {
            self.modules.insert(name.to_string(), source.to_string());
            self
        }
    }

    impl ModuleLoader for MemoryLoader {
        fn exists(&self, name: &str) -> bool {
            self.modules.contains_key(name)
        }

        fn load(&self, name: &str) -> io::Result<String> {
            self.modules
                .get(name)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_string()))
        }
    }

    fn program(source: &str) -> Program {
        let tokens = tokenize(source, Dialect::Maple).unwrap();
        parser::parse(tokens, Dialect::Maple).unwrap().0
    }

    #[test]
    fn test_no_imports() {
        let loader = MemoryLoader::default();
        let modules = Resolver::new(&loader).resolve(&program("out 1")).unwrap();
        assert!(modules.is_empty());
    }

    #[test]
    fn test_compiles_imported_library() {
        let loader = MemoryLoader::default()
            .with("math", "init @math\nfnc i32 square : i32 n :\nmul n n\nrtn n\nend");
        let modules = Resolver::new(&loader)
            .resolve(&program("lib @math\n@math::square : 3 :"))
            .unwrap();

        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "math");
        assert_eq!(modules[0].header_name(), "math.hpp");
        assert!(modules[0].code.starts_with("#pragma once\n"));
        assert!(modules[0].code.contains("namespace math {"));
        assert!(!modules[0].code.contains("int main()"));
    }

    #[test]
    fn test_dependencies_come_first() {
        let loader = MemoryLoader::default()
            .with("shapes", "init @shapes\nlib @math\nfnc i32 area : i32 s :\nrtn s\nend")
            .with("math", "init @math\nfnc i32 one : :\nrtn 1\nend");
        let modules = Resolver::new(&loader)
            .resolve(&program("lib @shapes\nlib @math"))
            .unwrap();

        let names: Vec<_> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["math", "shapes"]);
        assert!(modules[1].code.contains("#include \"math.hpp\""));
    }

    #[test]
    fn test_missing_module() {
        let loader = MemoryLoader::default();
        let err = Resolver::new(&loader)
            .resolve(&program("lib @nowhere"))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ModuleNotFound("nowhere".into()));
        assert_eq!(err.module, None);
        assert_eq!(err.span.map(|s| (s.line, s.column)), Some((1, 5)));
    }

    #[test]
    fn test_errors_are_attributed_to_the_module() {
        let loader = MemoryLoader::default().with("bad", "dec i32 x ghost");
        let err = Resolver::new(&loader).resolve(&program("lib @bad")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UndeclaredVariable("ghost".into()));
        assert_eq!(err.module.as_deref(), Some("bad"));
        assert_eq!(err.span.map(|s| s.line), Some(1));
    }

    #[test]
    fn test_nested_missing_module() {
        let loader = MemoryLoader::default().with("outer", "lib @inner");
        let err = Resolver::new(&loader).resolve(&program("lib @outer")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ModuleNotFound("inner".into()));
        assert_eq!(err.module.as_deref(), Some("outer"));
        assert_eq!(err.span.map(|s| s.line), Some(1));
    }

    #[test]
    fn test_library_rejects_top_level_statements() {
        let loader = MemoryLoader::default().with("m", "init @m\ndec ch i32 c 0\nout c");
        let err = Resolver::new(&loader).resolve(&program("lib @m")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::LibraryStatement("out".into()));
        assert_eq!(err.module.as_deref(), Some("m"));
        assert_eq!(err.span.map(|s| (s.line, s.column)), Some((3, 1)));
    }

    #[test]
    fn test_import_cycle() {
        let loader = MemoryLoader::default()
            .with("a", "lib @b")
            .with("b", "dec i32 x 1\nlib @a");
        let err = Resolver::new(&loader).resolve(&program("lib @a")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::CyclicImport("a".into()));
        assert_eq!(err.module.as_deref(), Some("b"));
        assert_eq!(err.span.map(|s| s.line), Some(2));
    }

    #[test]
    fn test_resolve_single_module() {
        let loader = MemoryLoader::default().with("util", "dec i32 answer 42");
        let modules = Resolver::new(&loader).resolve_module("util").unwrap();
        let err = Resolver::new(&loader).resolve_module("gone").unwrap_err();
        assert_eq!(err.span, None);
        assert_eq!(modules.len(), 1);
        assert!(modules[0].code.contains("const int32_t answer = 42;"));
    }

    #[test]
    fn test_fs_loader_paths() {
        let loader = FsModuleLoader::new("libs");
        assert_eq!(loader.path_for("math"), Path::new("libs").join("math.mal"));
        assert_eq!(FsModuleLoader::default().lib_dir(), Path::new("lib"));
        assert!(!loader.exists("definitely_not_here"));
    }
}
