//! External C++ compiler invocation for `--run`.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use thiserror::Error;

/// Compiler used when none is configured
pub const DEFAULT_COMPILER: &str = "g++";

#[derive(Error, Debug)]
pub enum ToolchainError {
    #[error("could not start '{compiler}': {source}")]
    Spawn {
        compiler: String,
        #[source]
        source: io::Error,
    },

    #[error("'{compiler}' failed to build '{input}' ({status})")]
    BuildFailed {
        compiler: String,
        input: String,
        status: ExitStatus,
    },

    #[error("could not run '{binary}': {source}")]
    Run {
        binary: String,
        #[source]
        source: io::Error,
    },
}

/// A C++ compiler on the host
#[derive(Debug, Clone)]
pub struct Toolchain {
    compiler: String,
}

impl Toolchain {
    pub fn new(compiler: impl Into<String>) -> Self {
        Self {
            compiler: compiler.into(),
        }
    }

    pub fn compiler(&self) -> &str {
        &self.compiler
    }

    /// Executable produced for a generated source: `out/x_Maple.cpp` -> `out/x_Maple`
    pub fn binary_path(source: &Path) -> PathBuf {
        let binary = source.with_extension("");
        match std::env::consts::EXE_EXTENSION {
            "" => binary,
            ext => binary.with_extension(ext),
        }
    }

    /// Compile a generated program; library headers are found next to it
    pub fn build(&self, source: &Path) -> Result<PathBuf, ToolchainError> {
        let binary = Self::binary_path(source);
        let include_dir = source
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let status = Command::new(&self.compiler)
            .arg("-std=c++17")
            .arg("-I")
            .arg(include_dir)
            .arg(source)
            .arg("-o")
            .arg(&binary)
            .status()
            .map_err(|source| ToolchainError::Spawn {
                compiler: self.compiler.clone(),
                source,
            })?;

        if !status.success() {
            return Err(ToolchainError::BuildFailed {
                compiler: self.compiler.clone(),
                input: source.display().to_string(),
                status,
            });
        }
        Ok(binary)
    }

    /// Run a built program, inheriting stdio
    pub fn run(&self, binary: &Path) -> Result<ExitStatus, ToolchainError> {
        Command::new(binary)
            .status()
            .map_err(|source| ToolchainError::Run {
                binary: binary.display().to_string(),
                source,
            })
    }
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::new(DEFAULT_COMPILER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_path() {
        let binary = Toolchain::binary_path(Path::new("out/hello_Maple.cpp"));
        assert_eq!(binary.file_stem().unwrap(), "hello_Maple");
        assert_eq!(binary.parent().unwrap(), Path::new("out"));
    }

    #[test]
    fn test_missing_compiler() {
        let toolchain = Toolchain::new("maplec-no-such-compiler");
        let err = toolchain.build(Path::new("hello_Maple.cpp")).unwrap_err();
        assert!(matches!(err, ToolchainError::Spawn { ref compiler, .. } if compiler == "maplec-no-such-compiler"));
        assert!(err.to_string().starts_with("could not start 'maplec-no-such-compiler'"));
    }

    #[test]
    fn test_missing_binary() {
        let err = Toolchain::default()
            .run(Path::new("./definitely/not/a/binary"))
            .unwrap_err();
        assert!(matches!(err, ToolchainError::Run { .. }));
    }

    #[test]
    fn test_default_compiler() {
        assert_eq!(Toolchain::default().compiler(), DEFAULT_COMPILER);
    }
}
