//! Source-level optimizations
//!
//! This module provides the optimizer passes run before rendering:
//! - Straight-line constant/copy propagation
//! - Dead-item pruning
//!
//! Neither pass changes what a global item does.

pub mod passes;
pub mod prune;

pub use passes::propagate;
pub use prune::{prune_unreachable, reachable_from_globals};

use crate::options::OptimizeOptions;
use hal_parser::ast::Program;
use tracing::debug;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OptimizationStats {
    /// Bodies rewritten by propagation.
    pub propagated: usize,
    /// Subprograms removed by pruning.
    pub pruned: usize,
}

/// Optimize a copy of `program`.
pub fn optimize_program(program: &Program, options: &OptimizeOptions) -> Program {
    optimize_program_with_stats(program, options).0
}

pub fn optimize_program_with_stats(
    program: &Program,
    options: &OptimizeOptions,
) -> (Program, OptimizationStats) {
    let mut program = program.clone();
    let mut stats = OptimizationStats::default();

    if options.prune {
        stats.pruned = prune_unreachable(&mut program);
        if stats.pruned > 0 {
            debug!(removed = stats.pruned, "pruned unreachable subprograms");
        }
    }

    if options.propagate {
        for sub in program.items.iter_mut().filter_map(|item| item.as_subprogram_mut()) {
            if let Some(body) = propagate(sub) {
                debug!(subprogram = %sub.name, "propagated straight-line body");
                sub.body = body;
                stats.propagated += 1;
            }
        }
    }

    (program, stats)
}
