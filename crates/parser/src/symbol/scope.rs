// Block-scoped variable tables

use crate::ast::TypeRef;
use crate::error::{ErrorKind, ParseResult, error};
use indexmap::IndexMap;
use text_size::TextRange;

/// Index of a scope inside a [`SymbolTable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u32);

impl ScopeId {
    pub const ROOT: ScopeId = ScopeId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The kind of symbol binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// Subprogram parameter
    Parameter,
    /// Local variable declaration
    Local,
    /// Implicit return accumulator of a function
    ReturnValue,
}

/// Information about a name binding in a scope
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolInfo {
    pub ty: TypeRef,
    pub kind: SymbolKind,
    /// Where the binding was declared
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
struct Scope {
    parent: Option<ScopeId>,
    symbols: IndexMap<String, SymbolInfo>,
}

/// All scopes of one subprogram, stored as an arena with parent links.
///
/// Scope 0 is the subprogram's root scope holding its parameters and, for
/// functions, the return accumulator. Every nested block opens a child.
/// Names are case-sensitive.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

impl SymbolTable {
    /// Create a table containing only the root scope.
    pub fn new() -> Self {
        SymbolTable {
            scopes: vec![Scope {
                parent: None,
                symbols: IndexMap::new(),
            }],
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId::ROOT
    }

    /// Open a new scope nested in `parent`.
    pub fn push_scope(&mut self, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            parent: Some(parent),
            symbols: IndexMap::new(),
        });
        id
    }

    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes[scope.index()].parent
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Declare `name` in `scope`.
    ///
    /// Fails only when the name already exists in that same scope; shadowing
    /// an outer declaration is allowed. An existing entry is never replaced.
    pub fn declare(&mut self, scope: ScopeId, name: &str, info: SymbolInfo) -> ParseResult<()> {
        let symbols = &mut self.scopes[scope.index()].symbols;
        if symbols.contains_key(name) {
            return Err(error(
                ErrorKind::DuplicateDeclaration {
                    name: name.to_string(),
                },
                info.span,
            ));
        }
        symbols.insert(name.to_string(), info);
        Ok(())
    }

    /// Find `name` in `scope` only.
    pub fn lookup_local(&self, scope: ScopeId, name: &str) -> Option<&SymbolInfo> {
        self.scopes[scope.index()].symbols.get(name)
    }

    /// Find `name` in `scope` or any enclosing scope.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<&SymbolInfo> {
        self.find(scope, name).map(|(_, info)| info)
    }

    /// The scope that declares the binding `name` visible from `scope`.
    pub fn resolve(&self, scope: ScopeId, name: &str) -> Option<ScopeId> {
        self.find(scope, name).map(|(id, _)| id)
    }

    /// Innermost binding of `name` visible from `scope`, with its scope.
    pub fn find(&self, scope: ScopeId, name: &str) -> Option<(ScopeId, &SymbolInfo)> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let entry = &self.scopes[id.index()];
            if let Some(info) = entry.symbols.get(name) {
                return Some((id, info));
            }
            current = entry.parent;
        }
        None
    }

    /// Bindings declared directly in `scope`, in declaration order.
    pub fn symbols(&self, scope: ScopeId) -> impl Iterator<Item = (&str, &SymbolInfo)> {
        self.scopes[scope.index()]
            .symbols
            .iter()
            .map(|(name, info)| (name.as_str(), info))
    }

    /// All scope ids, root first, in creation order.
    pub fn scope_ids(&self) -> impl Iterator<Item = ScopeId> {
        (0..self.scopes.len() as u32).map(ScopeId)
    }

    /// The return accumulator, if this table belongs to a function.
    pub fn return_value(&self) -> Option<(&str, &SymbolInfo)> {
        self.scopes[ScopeId::ROOT.index()]
            .symbols
            .iter()
            .find(|(_, info)| info.kind == SymbolKind::ReturnValue)
            .map(|(name, info)| (name.as_str(), info))
    }

    /// Every declared name across all scopes, in declaration order per scope.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scopes
            .iter()
            .flat_map(|scope| scope.symbols.keys().map(String::as_str))
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(ty: TypeRef) -> SymbolInfo {
        SymbolInfo {
            ty,
            kind: SymbolKind::Local,
            span: TextRange::default(),
        }
    }

    #[test]
    fn test_shadowing_in_child_scope() {
        let mut table = SymbolTable::new();
        let root = table.root();
        table.declare(root, "x", local(TypeRef::INTEGER)).unwrap();

        let inner = table.push_scope(root);
        table
            .declare(inner, "x", local(TypeRef::String(Some(10))))
            .unwrap();

        assert_eq!(table.lookup(inner, "x").unwrap().ty, TypeRef::String(Some(10)));
        assert_eq!(table.lookup(root, "x").unwrap().ty, TypeRef::INTEGER);
    }

    #[test]
    fn test_duplicate_in_same_scope_keeps_first() {
        let mut table = SymbolTable::new();
        let root = table.root();
        table.declare(root, "x", local(TypeRef::INTEGER)).unwrap();

        let err = table
            .declare(root, "x", local(TypeRef::String(Some(5))))
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::DuplicateDeclaration { ref name } if name == "x"));
        assert_eq!(table.lookup(root, "x").unwrap().ty, TypeRef::INTEGER);
    }

    #[test]
    fn test_lookup_walks_parents_not_siblings() {
        let mut table = SymbolTable::new();
        let root = table.root();
        let a = table.push_scope(root);
        let b = table.push_scope(root);
        table.declare(a, "only_a", local(TypeRef::INTEGER)).unwrap();

        assert!(table.lookup(a, "only_a").is_some());
        assert!(table.lookup(b, "only_a").is_none());
        assert!(table.lookup_local(root, "only_a").is_none());
    }

    #[test]
    fn test_resolve_finds_declaring_scope() {
        let mut table = SymbolTable::new();
        let root = table.root();
        table.declare(root, "x", local(TypeRef::INTEGER)).unwrap();
        let inner = table.push_scope(root);
        let deeper = table.push_scope(inner);
        table.declare(inner, "x", local(TypeRef::INTEGER)).unwrap();

        assert_eq!(table.resolve(deeper, "x"), Some(inner));
        assert_eq!(table.resolve(root, "x"), Some(root));
        assert_eq!(table.resolve(deeper, "y"), None);
        assert_eq!(table.scope_ids().collect::<Vec<_>>(), vec![root, inner, deeper]);
        assert_eq!(table.symbols(inner).count(), 1);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut table = SymbolTable::new();
        let root = table.root();
        table.declare(root, "Count", local(TypeRef::INTEGER)).unwrap();
        assert!(table.lookup(root, "count").is_none());
        table.declare(root, "count", local(TypeRef::INTEGER)).unwrap();
        assert_eq!(table.names().count(), 2);
    }
}
