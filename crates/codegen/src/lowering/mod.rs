//! Lowering of subprogram bodies into dispatch-loop form.

pub mod control_flow;

pub use control_flow::{
    BasicBlock, Exit, LabelMap, Linearized, contains_goto, has_goto_in_loop, has_jumps, linearize,
};
