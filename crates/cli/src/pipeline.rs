//! Pipeline for compiling HAL files.
//!
//! One run reads the primitives file (if any) into a function table, parses
//! the input against that table and writes the rendered program next to the
//! input. Every failure maps to exit status 1 in `main`.

use crate::cli::Cli;
use hal_codegen::{CodegenError, backend_for, compile_program};
use hal_parser::{DiagnosticFormatter, ErrorConfig, FunctionTable, ParseOutput, parse_with_functions};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info_span};

/// Name of the declarations file looked up next to the input.
pub const DEFAULT_PRIMITIVES: &str = "primitives.hal";

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Pipeline error type
#[derive(Debug, Error)]
pub enum PipelineError {
    /// File I/O error
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Input without the `.hal` extension
    #[error("{}: expected a .hal file", .0.display())]
    NotHalFile(PathBuf),
    /// Lexing, parsing or checking failed in `file`
    #[error("{}: {error}", file.display())]
    Parse {
        file: PathBuf,
        text: String,
        error: Box<hal_parser::Error>,
    },
    /// Rendering hit a malformed program
    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

impl PipelineError {
    /// Human-readable report; parse errors get the full source excerpt.
    pub fn render(&self, colors: bool) -> String {
        match self {
            PipelineError::Parse { file, text, error } => {
                let config = if colors {
                    ErrorConfig::default()
                } else {
                    ErrorConfig::default().without_colors()
                };
                let diagnostic = error
                    .to_diagnostic(text)
                    .with_filename(file.display().to_string());
                DiagnosticFormatter::new(config).format(&diagnostic)
            }
            other => format!("error: {}", other),
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Generated code was written to this path
    Written(PathBuf),
    /// `--emit-ast` dump of the parsed program
    Ast(String),
}

/// Run the whole pipeline for the parsed command line.
pub fn run(cli: &Cli) -> PipelineResult<Outcome> {
    check_extension(&cli.input)?;

    let functions = load_primitives(&cli.input, cli.primitives.as_deref())?;
    let source = read_source(&cli.input)?;
    let output = {
        let _span = info_span!("pipeline.parse", file = %cli.input.display()).entered();
        parse_file(&cli.input, &source, functions)?
    };
    debug!(
        items = output.program.items.len(),
        functions = output.functions.len(),
        "parsed input"
    );

    if cli.emit_ast {
        return Ok(Outcome::Ast(format!("{:#?}", output.program)));
    }

    let options = cli.compile_options();
    let code = compile_program(&output.program, &output.functions, &options)?;

    let path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(&cli.input, &options.target));
    {
        let _span = info_span!("pipeline.write", path = %path.display()).entered();
        fs::write(&path, code).map_err(|source| PipelineError::Io {
            path: path.clone(),
            source,
        })?;
    }
    Ok(Outcome::Written(path))
}

/// Reject inputs that do not end in `.hal`.
pub fn check_extension(input: &Path) -> PipelineResult<()> {
    let is_hal = input
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("hal"));
    if is_hal {
        Ok(())
    } else {
        Err(PipelineError::NotHalFile(input.to_path_buf()))
    }
}

/// `<input stem>.<ext>` beside the input.
pub fn default_output(input: &Path, target: &hal_codegen::Target) -> PathBuf {
    input.with_extension(backend_for(*target).file_extension())
}

/// Parse the primitives file into a function table.
///
/// An explicit path must exist. The implicit `primitives.hal` beside the
/// input is optional and yields an empty table when absent.
pub fn load_primitives(input: &Path, explicit: Option<&Path>) -> PipelineResult<FunctionTable> {
    let _span = info_span!("pipeline.primitives").entered();
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = input.with_file_name(DEFAULT_PRIMITIVES);
            if !path.is_file() {
                debug!(path = %path.display(), "no primitives file");
                return Ok(FunctionTable::new());
            }
            path
        }
    };

    let source = read_source(&path)?;
    let output = parse_file(&path, &source, FunctionTable::new())?;
    debug!(
        path = %path.display(),
        functions = output.functions.len(),
        "loaded primitives"
    );
    Ok(output.functions)
}

fn read_source(path: &Path) -> PipelineResult<String> {
    fs::read_to_string(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_file(path: &Path, source: &str, functions: FunctionTable) -> PipelineResult<ParseOutput> {
    parse_with_functions(source, functions).map_err(|error| PipelineError::Parse {
        file: path.to_path_buf(),
        text: source.to_string(),
        error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    const FOO: &str = "function integer foo(integer x, integer y)
begin
    integer z;
    z = x + y;
    return z;
end;";

    fn write(dir: &TempDir, name: &str, text: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, text).unwrap();
        path
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("halc").chain(args.iter().copied())).unwrap()
    }

    // ===== Output paths =====

    #[test]
    fn test_writes_next_to_input() {
        let dir = TempDir::new().unwrap();
        let input = write(&dir, "foo.hal", FOO);
        let outcome = run(&cli(&["-t", "python", input.to_str().unwrap()])).unwrap();

        let expected = dir.path().join("foo.py");
        assert_eq!(outcome, Outcome::Written(expected.clone()));
        let code = fs::read_to_string(expected).unwrap();
        assert!(code.starts_with("def foo(x: int, y: int) -> int:\n"), "{}", code);
    }

    #[test]
    fn test_explicit_output_path() {
        let dir = TempDir::new().unwrap();
        let input = write(&dir, "foo.hal", FOO);
        let out = dir.path().join("out.js");
        let outcome = run(&cli(&[
            "-o",
            out.to_str().unwrap(),
            input.to_str().unwrap(),
        ]))
        .unwrap();

        assert_eq!(outcome, Outcome::Written(out.clone()));
        assert!(fs::read_to_string(out).unwrap().contains("function foo(x, y) {"));
    }

    #[test]
    fn test_rust_target_extension() {
        assert_eq!(
            default_output(Path::new("dir/prog.hal"), &hal_codegen::Target::Rust),
            PathBuf::from("dir/prog.rs")
        );
    }

    // ===== Primitives =====

    #[test]
    fn test_default_primitives_are_picked_up() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            DEFAULT_PRIMITIVES,
            "external function integer len(string s);",
        );
        let input = write(
            &dir,
            "size.hal",
            "function integer size(string s) begin return len(s); end;",
        );
        let outcome = run(&cli(&["-t", "js", input.to_str().unwrap()])).unwrap();
        let Outcome::Written(path) = outcome else {
            panic!("expected written output");
        };
        let code = fs::read_to_string(path).unwrap();
        assert!(code.contains("return s.length;"), "{}", code);
    }

    #[test]
    fn test_missing_default_primitives_is_empty() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("prog.hal");
        let functions = load_primitives(&input, None).unwrap();
        assert_eq!(functions.len(), 0);
    }

    #[test]
    fn test_missing_explicit_primitives_is_an_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("prog.hal");
        let missing = dir.path().join("nope.hal");
        let err = load_primitives(&input, Some(&missing)).unwrap_err();
        assert!(matches!(err, PipelineError::Io { ref path, .. } if *path == missing));
    }

    #[test]
    fn test_undeclared_call_without_primitives_fails() {
        let dir = TempDir::new().unwrap();
        let input = write(
            &dir,
            "size.hal",
            "function integer size(string s) begin return len(s); end;",
        );
        let err = run(&cli(&[input.to_str().unwrap()])).unwrap_err();
        assert!(matches!(err, PipelineError::Parse { .. }));
    }

    // ===== Failures =====

    #[test]
    fn test_wrong_extension() {
        let err = run(&cli(&["prog.txt"])).unwrap_err();
        assert!(matches!(err, PipelineError::NotHalFile(_)));
        assert_eq!(err.render(false), "error: prog.txt: expected a .hal file");
    }

    #[test]
    fn test_missing_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("absent.hal");
        let err = run(&cli(&[input.to_str().unwrap()])).unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
    }

    #[test]
    fn test_parse_error_renders_with_filename() {
        let dir = TempDir::new().unwrap();
        let input = write(&dir, "bad.hal", "procedure p begin x = 1; end;");
        let err = run(&cli(&[input.to_str().unwrap()])).unwrap_err();
        let report = err.render(false);
        assert!(report.contains("bad.hal"), "{}", report);
        assert!(!report.contains("\u{1b}["), "{}", report);
        assert!(!dir.path().join("bad.js").exists());
    }

    #[test]
    fn test_demos_compile_for_every_target() {
        let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos");
        let dir = TempDir::new().unwrap();
        for demo in ["foo.hal", "count.hal", "classify.hal"] {
            let input = demos.join(demo);
            for target in hal_codegen::Target::ALL {
                let out = dir.path().join(format!("{}.{}", demo, target));
                let outcome = run(&cli(&[
                    "-t",
                    target.as_str(),
                    "-o",
                    out.to_str().unwrap(),
                    input.to_str().unwrap(),
                ]))
                .unwrap_or_else(|err| panic!("{} ({}): {}", demo, target, err.render(false)));
                assert_eq!(outcome, Outcome::Written(out));
            }
        }
    }

    #[test]
    fn test_emit_ast_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let input = write(&dir, "foo.hal", FOO);
        let outcome = run(&cli(&["--emit-ast", input.to_str().unwrap()])).unwrap();
        let Outcome::Ast(dump) = outcome else {
            panic!("expected an AST dump");
        };
        assert!(dump.contains("\"foo\""), "{}", dump);
        assert!(!dir.path().join("foo.js").exists());
    }
}
