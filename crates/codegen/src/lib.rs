//! # HAL Code Generation
//!
//! This crate turns a checked HAL program into JavaScript, Python or Rust
//! source text.
//!
//! ## Architecture
//!
//! The pipeline:
//! 1. **Input**: [`Program`] and [`FunctionTable`] from `hal_parser`
//! 2. **Optimization** (optional): dead-item pruning, then straight-line
//!    constant and copy propagation
//! 3. **Lowering**: each body is split into basic blocks at labels, gotos
//!    and returns
//! 4. **Emission**: one shared walk renders the blocks as a dispatch loop,
//!    asking a [`Backend`] for every piece of target syntax
//!
//! ## Usage
//!
//! ```
//! use hal_codegen::{CompileOptions, Target, compile_program};
//! use hal_parser::parse;
//!
//! let output = parse(
//!     "function integer foo(integer x, integer y) begin integer z; z = x + y; return z; end;",
//! )
//! .unwrap();
//! let code = compile_program(
//!     &output.program,
//!     &output.functions,
//!     &CompileOptions::new(Target::Python),
//! )
//! .unwrap();
//!
//! assert!(code.contains("def foo(x: int, y: int) -> int:"));
//! ```

pub mod backend;
pub mod emit;
pub mod error;
pub mod lowering;
pub mod optimize;
pub mod options;

pub use backend::{Backend, JsBackend, PythonBackend, RustBackend, backend_for};
pub use emit::generate;
pub use error::{CodegenError, CodegenResult};
pub use optimize::{OptimizationStats, optimize_program};
pub use options::{CompileOptions, EmitOptions, OptimizeOptions, Target};

use hal_parser::{FunctionTable, Program};
use tracing::info_span;

/// Optimize (if requested) and render `program` for `options.target`.
pub fn compile_program(
    program: &Program,
    functions: &FunctionTable,
    options: &CompileOptions,
) -> CodegenResult<String> {
    let _span = info_span!("codegen", lang = %options.target).entered();
    let backend = backend_for(options.target);

    if options.optimize {
        let optimized = {
            let _span = info_span!("optimize").entered();
            optimize_program(program, &options.optimize_options)
        };
        let _span = info_span!("emit").entered();
        generate(&optimized, functions, backend.as_ref(), &options.emit)
    } else {
        let _span = info_span!("emit").entered();
        generate(program, functions, backend.as_ref(), &options.emit)
    }
}
