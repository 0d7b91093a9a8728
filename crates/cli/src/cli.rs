//! Command-line interface for halc.

use clap::Parser;
use hal_codegen::{CompileOptions, Target};
use std::path::PathBuf;

/// halc - translate HAL sources into JavaScript, Python or Rust
#[derive(Parser, Debug)]
#[command(name = "halc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the `.hal` file to compile
    pub input: PathBuf,

    /// Output language (js, python, rust)
    #[arg(short, long, default_value = "js")]
    pub target: Target,

    /// Fold single-use temporaries and drop unreachable subprograms
    #[arg(short = 'O', long)]
    pub optimize: bool,

    /// Declarations parsed before the input (default: primitives.hal next to it)
    #[arg(long, value_name = "PATH")]
    pub primitives: Option<PathBuf>,

    /// Where to write the generated code (default: input with the target's extension)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Disable colored diagnostics
    #[arg(long)]
    pub no_color: bool,

    /// Log pipeline stages to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the parsed program instead of generating code
    #[arg(long)]
    pub emit_ast: bool,
}

impl Cli {
    /// Codegen settings selected by the flags.
    pub fn compile_options(&self) -> CompileOptions {
        let options = CompileOptions::new(self.target);
        if self.optimize {
            options.optimized()
        } else {
            options
        }
    }
}
