//! Goto/label linearization
//!
//! Splits the top-level statement list of a body into basic blocks so that
//! every backend can re-express arbitrary jumps as an index-driven dispatch
//! loop:
//! - Top-level declarations are hoisted out in order
//! - A label closes the open block and starts a new labeled one
//! - A goto or return ends the open block
//! - Nested constructs stay intact inside their block

use hal_parser::ast::{Block, Stmt, VarDecl};
use hal_parser::visitor::{Visitor, walk};
use indexmap::IndexMap;

/// Label name to block index.
pub type LabelMap = IndexMap<String, usize>;

/// How control leaves a basic block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit<'a> {
    /// Ends with a top-level goto.
    Goto(&'a str),
    /// Ends with a top-level return.
    Return,
    /// Runs into the next block, or out of the loop after the last one.
    FallThrough,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BasicBlock<'a> {
    pub label: Option<&'a str>,
    pub stmts: Vec<&'a Stmt>,
}

impl<'a> BasicBlock<'a> {
    fn new(label: Option<&'a str>) -> Self {
        BasicBlock {
            label,
            stmts: Vec::new(),
        }
    }

    fn is_worth_keeping(&self) -> bool {
        self.label.is_some() || !self.stmts.is_empty()
    }

    pub fn exit(&self) -> Exit<'a> {
        match self.stmts.last().copied() {
            Some(Stmt::Goto(goto)) => Exit::Goto(&goto.label),
            Some(Stmt::Return(_)) => Exit::Return,
            _ => Exit::FallThrough,
        }
    }
}

/// A body in dispatch-loop form.
#[derive(Debug, Clone, PartialEq)]
pub struct Linearized<'a> {
    pub hoisted: Vec<&'a VarDecl>,
    pub blocks: Vec<BasicBlock<'a>>,
    pub labels: LabelMap,
}

impl Linearized<'_> {
    pub fn target(&self, label: &str) -> Option<usize> {
        self.labels.get(label).copied()
    }

    /// Index of the block after `index`, if any.
    pub fn next(&self, index: usize) -> Option<usize> {
        (index + 1 < self.blocks.len()).then_some(index + 1)
    }
}

/// Split `body`'s top-level statements into hoisted declarations and basic
/// blocks. Block 0 is the entry point.
pub fn linearize(body: &Block) -> Linearized<'_> {
    let mut hoisted = Vec::new();
    let mut blocks = Vec::new();
    let mut current = BasicBlock::new(None);

    for stmt in &body.stmts {
        match stmt {
            Stmt::VarDecl(decl) => hoisted.push(decl),
            Stmt::Label(label) => {
                let finished = std::mem::replace(&mut current, BasicBlock::new(Some(&label.name)));
                if finished.is_worth_keeping() {
                    blocks.push(finished);
                }
            }
            Stmt::Goto(_) | Stmt::Return(_) => {
                current.stmts.push(stmt);
                blocks.push(std::mem::replace(&mut current, BasicBlock::new(None)));
            }
            _ => current.stmts.push(stmt),
        }
    }
    if current.is_worth_keeping() {
        blocks.push(current);
    }

    let labels = blocks
        .iter()
        .enumerate()
        .filter_map(|(index, block)| block.label.map(|label| (label.to_string(), index)))
        .collect();

    Linearized {
        hoisted,
        blocks,
        labels,
    }
}

#[derive(Default)]
struct JumpFinder {
    labels: bool,
    gotos: bool,
}

impl Visitor for JumpFinder {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Label(_) => self.labels = true,
            Stmt::Goto(_) => self.gotos = true,
            _ => walk::walk_stmt(self, stmt),
        }
    }
}

fn find_jumps(block: &Block) -> JumpFinder {
    let mut finder = JumpFinder::default();
    finder.visit_block(block);
    finder
}

/// Whether a label or goto appears anywhere in `block`.
pub fn has_jumps(block: &Block) -> bool {
    let finder = find_jumps(block);
    finder.labels || finder.gotos
}

/// Whether a goto appears anywhere in `block`.
pub fn contains_goto(block: &Block) -> bool {
    find_jumps(block).gotos
}

#[derive(Default)]
struct LoopGotoFinder {
    depth: usize,
    found: bool,
}

impl Visitor for LoopGotoFinder {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::While(_) | Stmt::For(_) => {
                self.depth += 1;
                walk::walk_stmt(self, stmt);
                self.depth -= 1;
            }
            Stmt::Goto(_) if self.depth > 0 => self.found = true,
            _ => walk::walk_stmt(self, stmt),
        }
    }
}

/// Whether a goto appears inside a `while` or `for` body within `block`.
pub fn has_goto_in_loop(block: &Block) -> bool {
    let mut finder = LoopGotoFinder::default();
    finder.visit_block(block);
    finder.found
}
