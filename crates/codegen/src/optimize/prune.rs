//! Dead-item pruning
//!
//! When a program exports something (`global`), subprograms that no global
//! item can reach through calls are dropped. Queue calls count as calls.

use hal_parser::ast::{CallExpr, Item, Program};
use hal_parser::visitor::{Visitor, walk};
use indexmap::{IndexMap, IndexSet};

#[derive(Default)]
struct CallCollector {
    callees: IndexSet<String>,
}

impl Visitor for CallCollector {
    fn visit_call(&mut self, call: &CallExpr) {
        self.callees.insert(call.callee.to_ascii_lowercase());
        walk::walk_call(self, call);
    }
}

/// Lowercase names of the subprograms reachable from a global item.
pub fn reachable_from_globals(program: &Program) -> IndexSet<String> {
    let mut calls: IndexMap<String, IndexSet<String>> = IndexMap::new();
    for sub in program.subprograms() {
        let mut collector = CallCollector::default();
        collector.visit_block(&sub.body);
        calls.insert(sub.name.to_ascii_lowercase(), collector.callees);
    }

    let mut reachable: IndexSet<String> = program
        .items
        .iter()
        .filter(|item| item.is_global())
        .map(|item| item.name().to_ascii_lowercase())
        .collect();
    let mut worklist: Vec<String> = reachable.iter().cloned().collect();

    while let Some(name) = worklist.pop() {
        let Some(callees) = calls.get(&name) else {
            continue;
        };
        for callee in callees {
            if reachable.insert(callee.clone()) {
                worklist.push(callee.clone());
            }
        }
    }
    reachable
}

/// Drop unreachable non-global subprograms. Returns how many were removed.
///
/// External declarations are always kept, and a program without any global
/// item is left intact.
pub fn prune_unreachable(program: &mut Program) -> usize {
    if !program.has_global() {
        return 0;
    }
    let reachable = reachable_from_globals(program);
    let before = program.items.len();
    program.items.retain(|item: &Item| {
        item.is_external() || reachable.contains(&item.name().to_ascii_lowercase())
    });
    before - program.items.len()
}
