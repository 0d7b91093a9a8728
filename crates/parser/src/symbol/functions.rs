// Per-compile registry of subprogram signatures

use crate::ast::{Param, TypeRef};
use crate::error::{ErrorKind, ParseResult, error};
use indexmap::IndexMap;
use text_size::TextRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Function,
    Procedure,
    ExternalFunction,
    ExternalProcedure,
}

impl FunctionKind {
    pub fn is_external(self) -> bool {
        matches!(
            self,
            FunctionKind::ExternalFunction | FunctionKind::ExternalProcedure
        )
    }

    pub fn returns_value(self) -> bool {
        matches!(
            self,
            FunctionKind::Function | FunctionKind::ExternalFunction
        )
    }
}

/// Signature of a declared function or procedure.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSig {
    /// Name as spelled at the declaration.
    pub name: String,
    pub kind: FunctionKind,
    pub return_type: Option<TypeRef>,
    pub params: Vec<Param>,
    pub span: TextRange,
}

impl FunctionSig {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Case-insensitive map from subprogram name to signature.
///
/// One value lives for a whole compile: it is filled by the primitives file
/// first and then by the user file, so later declarations can call anything
/// registered before them. Entries are never replaced.
#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    entries: IndexMap<String, FunctionSig>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a signature, failing if the name is already taken.
    pub fn register(&mut self, sig: FunctionSig) -> ParseResult<()> {
        let key = sig.name.to_ascii_lowercase();
        if self.entries.contains_key(&key) {
            return Err(error(
                ErrorKind::DuplicateFunction { name: sig.name },
                sig.span,
            ));
        }
        self.entries.insert(key, sig);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FunctionSig> {
        self.entries.get(&name.to_ascii_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Signatures in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &FunctionSig> {
        self.entries.values()
    }

    pub fn externals(&self) -> impl Iterator<Item = &FunctionSig> {
        self.iter().filter(|sig| sig.kind.is_external())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(name: &str, kind: FunctionKind) -> FunctionSig {
        FunctionSig {
            name: name.to_string(),
            kind,
            return_type: None,
            params: Vec::new(),
            span: TextRange::default(),
        }
    }

    #[test]
    fn test_lookup_ignores_case() {
        let mut table = FunctionTable::new();
        table.register(sig("LogText", FunctionKind::ExternalProcedure)).unwrap();
        assert_eq!(table.get("logtext").unwrap().name, "LogText");
        assert!(table.contains("LOGTEXT"));
    }

    #[test]
    fn test_duplicate_is_rejected_and_first_kept() {
        let mut table = FunctionTable::new();
        table.register(sig("f", FunctionKind::Function)).unwrap();
        let err = table.register(sig("F", FunctionKind::Procedure)).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::DuplicateFunction { .. }));
        assert_eq!(table.get("f").unwrap().kind, FunctionKind::Function);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_externals_filter() {
        let mut table = FunctionTable::new();
        table.register(sig("len", FunctionKind::ExternalFunction)).unwrap();
        table.register(sig("main", FunctionKind::Procedure)).unwrap();
        let names: Vec<_> = table.externals().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["len"]);
    }
}
