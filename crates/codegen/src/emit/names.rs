//! Target-side names for one subprogram

use hal_parser::ast::Subprogram;
use hal_parser::symbol::{ScopeId, SymbolKind};
use hal_parser::FunctionTable;
use indexmap::{IndexMap, IndexSet};

/// Append `_` to a name the target reserves.
pub fn escape(name: &str, reserved: &[&str]) -> String {
    if reserved.contains(&name) {
        format!("{}_", name)
    } else {
        name.to_string()
    }
}

/// Maps every variable of a subprogram to a unique target name.
///
/// Shadowing declarations are flattened into one target scope, so a name
/// that is already taken gets a numeric suffix. Function names are taken
/// up front and the compiler-introduced locals are allocated last.
#[derive(Debug)]
pub struct Names {
    taken: IndexSet<String>,
    reserved: &'static [&'static str],
    vars: IndexMap<ScopeId, IndexMap<String, String>>,
    result: Option<String>,
    pc: String,
    jump: String,
}

impl Names {
    pub fn new(
        sub: &Subprogram,
        functions: &FunctionTable,
        reserved: &'static [&'static str],
    ) -> Self {
        let mut names = Names {
            taken: IndexSet::new(),
            reserved,
            vars: IndexMap::new(),
            result: None,
            pc: String::new(),
            jump: String::new(),
        };
        for sig in functions.iter() {
            names.taken.insert(escape(&sig.name, reserved));
        }
        names.taken.insert(escape(&sub.name, reserved));

        if sub.is_function() {
            let result = names.fresh(&format!("{}_result", sub.name));
            names.result = Some(result);
        }
        for scope in sub.symbols.scope_ids() {
            for (name, info) in sub.symbols.symbols(scope) {
                if info.kind == SymbolKind::ReturnValue {
                    continue;
                }
                let target = names.fresh(name);
                names
                    .vars
                    .entry(scope)
                    .or_default()
                    .insert(name.to_string(), target);
            }
        }
        names.pc = names.fresh("pc");
        names.jump = names.fresh("jump");
        names
    }

    /// Target name of `name` as declared in `scope`.
    pub fn variable(&self, scope: ScopeId, name: &str) -> Option<&str> {
        self.vars.get(&scope)?.get(name).map(String::as_str)
    }

    /// Name of the return accumulator, for functions.
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// Dispatch index variable.
    pub fn pc(&self) -> &str {
        &self.pc
    }

    /// Flag set when a goto leaves a nested loop.
    pub fn jump(&self) -> &str {
        &self.jump
    }

    pub fn escape(&self, name: &str) -> String {
        escape(name, self.reserved)
    }

    fn fresh(&mut self, base: &str) -> String {
        let base = escape(base, self.reserved);
        let mut candidate = base.clone();
        let mut n = 1;
        while self.taken.contains(&candidate) {
            candidate = format!("{}_{}", base, n);
            n += 1;
        }
        self.taken.insert(candidate.clone());
        candidate
    }
}
