//! Maple Compiler CLI
//!
//! Usage: maplec <input.mpl> [-o out_dir] [--run]

use clap::Parser;
use colored::Colorize;
use maple::resolver::{FsModuleLoader, LIBRARY_EXTENSION};
use maple::toolchain::{Toolchain, DEFAULT_COMPILER};
use maple::{Dialect, Diagnostic, Driver};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "maplec")]
#[command(author = "Maple Team")]
#[command(version = "0.1.0")]
#[command(about = "Maple Compiler - transpiles Maple and Josh scripts to C++", long_about = None)]
struct Args {
    /// Input source file (.mpl, or .josh for the legacy dialect)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Directory for the generated files (defaults to the input's directory)
    #[arg(short, long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Directory searched for `lib @name` imports
    #[arg(long, value_name = "DIR", default_value = "lib")]
    lib_dir: PathBuf,

    /// Build the generated C++ and run it
    #[arg(long, default_value_t = false)]
    run: bool,

    /// C++ compiler used by --run
    #[arg(long, value_name = "COMPILER", default_value = DEFAULT_COMPILER)]
    cxx: String,

    /// Print the AST for debugging
    #[arg(long, default_value_t = false)]
    dump_ast: bool,

    /// Print tokens for debugging
    #[arg(long, default_value_t = false)]
    dump_tokens: bool,
}

fn error(message: impl std::fmt::Display) -> ExitCode {
    eprintln!("{}: {}", "error".red().bold(), message);
    ExitCode::FAILURE
}

fn plural(count: usize, word: &str) -> String {
    format!("{} {}{}", count, word, if count == 1 { "" } else { "s" })
}

fn print_summary(diagnostics: &[Diagnostic]) {
    let error_count = diagnostics.iter().filter(|d| d.is_error()).count();
    let warning_count = diagnostics.len() - error_count;

    eprintln!(
        "\n{} generated{}",
        plural(error_count, "error").red().bold(),
        if warning_count > 0 {
            format!(", {}", plural(warning_count, "warning"))
        } else {
            String::new()
        }
    );
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Validate input file extension; libraries only compile through imports
    let dialect = match args.input.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext != LIBRARY_EXTENSION => Dialect::from_extension(ext),
        _ => None,
    };
    let Some(dialect) = dialect else {
        return error(format!(
            "input file must have a .{} or .{} extension: {}",
            Dialect::Maple.source_extension(),
            Dialect::Legacy.source_extension(),
            args.input.display()
        ));
    };

    let stem = match args.input.file_stem().and_then(|stem| stem.to_str()) {
        Some(stem) => stem.to_string(),
        None => return error(format!("invalid input file name: {}", args.input.display())),
    };

    // Determine output directory
    let out_dir = args.out_dir.clone().unwrap_or_else(|| {
        args.input
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf()
    });

    // Read source file
    let source = match std::fs::read_to_string(&args.input) {
        Ok(s) => s,
        Err(e) => {
            return error(format!("could not read file '{}': {}", args.input.display(), e))
        }
    };

    // Create driver and compile
    let mut driver = Driver::new(args.input.to_string_lossy().to_string(), source);
    driver.set_dialect(dialect);
    driver.set_dump_ast(args.dump_ast);
    driver.set_dump_tokens(args.dump_tokens);
    driver.set_loader(Box::new(FsModuleLoader::new(&args.lib_dir)));

    let unit = match driver.compile() {
        Ok(unit) => unit,
        Err(diagnostics) => {
            for diag in &diagnostics {
                eprintln!("{}", diag);
            }
            print_summary(&diagnostics);
            return ExitCode::FAILURE;
        }
    };

    // Write output
    let output = match unit.write_to(&out_dir, &stem) {
        Ok(output) => output,
        Err(e) => {
            return error(format!(
                "could not write output to '{}': {}",
                out_dir.display(),
                e
            ))
        }
    };

    println!(
        "{}: {} -> {}",
        "compiled".green().bold(),
        args.input.display(),
        output.display()
    );
    for module in &unit.modules {
        println!(
            "{}: @{} -> {}",
            "library".green().bold(),
            module.name,
            out_dir.join(module.header_name()).display()
        );
    }

    if !args.run {
        return ExitCode::SUCCESS;
    }

    let toolchain = Toolchain::new(args.cxx);
    let binary = match toolchain.build(&output) {
        Ok(binary) => binary,
        Err(e) => return error(e),
    };
    println!("{}: {}", "built".green().bold(), binary.display());

    match toolchain.run(&binary) {
        Ok(status) if status.success() => ExitCode::SUCCESS,
        Ok(status) => {
            eprintln!("{}: program exited with {}", "warning".yellow().bold(), status);
            ExitCode::FAILURE
        }
        Err(e) => error(e),
    }
}
