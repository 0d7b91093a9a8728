//! Compile options for the optimizer and emitter.

use std::fmt;
use std::str::FromStr;

/// Output language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Target {
    #[default]
    JavaScript,
    Python,
    Rust,
}

impl Target {
    pub const ALL: [Target; 3] = [Target::JavaScript, Target::Python, Target::Rust];

    pub fn as_str(self) -> &'static str {
        match self {
            Target::JavaScript => "js",
            Target::Python => "python",
            Target::Rust => "rust",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "js" | "javascript" => Ok(Target::JavaScript),
            "py" | "python" => Ok(Target::Python),
            "rs" | "rust" => Ok(Target::Rust),
            other => Err(format!("unknown target '{}'", other)),
        }
    }
}

/// Which optimizer passes run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimizeOptions {
    /// Straight-line constant/copy propagation.
    pub propagate: bool,
    /// Drop subprograms unreachable from any `global` item.
    pub prune: bool,
}

impl OptimizeOptions {
    pub fn all() -> Self {
        OptimizeOptions {
            propagate: true,
            prune: true,
        }
    }

    pub fn none() -> Self {
        OptimizeOptions {
            propagate: false,
            prune: false,
        }
    }
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self::all()
    }
}

/// Rendering knobs shared by every backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitOptions {
    /// Spaces per indentation level.
    pub indent_width: usize,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions { indent_width: 4 }
    }
}

/// Everything one compile needs besides its input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    pub target: Target,
    /// Run the optimizer before rendering.
    pub optimize: bool,
    pub optimize_options: OptimizeOptions,
    pub emit: EmitOptions,
}

impl CompileOptions {
    pub fn new(target: Target) -> Self {
        CompileOptions {
            target,
            ..Self::default()
        }
    }

    pub fn optimized(mut self) -> Self {
        self.optimize = true;
        self
    }
}
