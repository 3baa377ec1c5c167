//! Per-function type scoping (§4.2): each function gets its own scope of
//! local variable types, isolated from every other function's scope so
//! that two functions can reuse the same local name without interference
//! (§3.3 invariant 5).

use dashmap::DashMap;

use crate::ty::{Fqn, TypeInfo};

/// A single function's locally-known variable types, keyed by bare name
/// (not FQN — names are only ever compared within one scope).
#[derive(Debug, Default, Clone)]
pub struct FunctionScope {
    variables: std::collections::HashMap<String, TypeInfo>,
}

impl FunctionScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or overwrite) a variable's inferred type. Later assignments
    /// in source order replace earlier ones, matching ordinary variable
    /// shadowing/rebinding semantics rather than keeping a union across
    /// every assignment in the function body.
    pub fn set(&mut self, name: impl Into<String>, info: TypeInfo) {
        self.variables.insert(name.into(), info);
    }

    pub fn get(&self, name: &str) -> Option<&TypeInfo> {
        self.variables.get(name)
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }
}

/// `function FQN -> FunctionScope`, concurrent because passes 2a/2b/3
/// populate distinct functions' scopes in parallel and never touch the
/// same entry from two threads at once.
#[derive(Debug, Default)]
pub struct TypeStore {
    scopes: DashMap<Fqn, FunctionScope>,
}

impl TypeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_variable(&self, function_fqn: impl Into<Fqn>, name: impl Into<String>, info: TypeInfo) {
        self.scopes
            .entry(function_fqn.into())
            .or_default()
            .set(name, info);
    }

    pub fn get_variable(&self, function_fqn: &str, name: &str) -> Option<TypeInfo> {
        self.scopes.get(function_fqn)?.get(name).cloned()
    }

    pub fn scope_of(&self, function_fqn: &str) -> Option<FunctionScope> {
        self.scopes.get(function_fqn).map(|r| r.value().clone())
    }

    pub fn function_count(&self) -> usize {
        self.scopes.len()
    }

    /// Every `(function FQN, variable name, TypeInfo)` currently holding a
    /// placeholder encoding, for the placeholder-rewriting pass to walk.
    pub fn placeholders(&self) -> Vec<(Fqn, String, TypeInfo)> {
        self.scopes
            .iter()
            .flat_map(|entry| {
                let function_fqn = entry.key().clone();
                entry
                    .value()
                    .variables
                    .iter()
                    .filter(|(_, info)| info.is_placeholder())
                    .map(|(name, info)| (function_fqn.clone(), name.clone(), info.clone()))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Unconditionally replace a variable's type, bypassing the normal
    /// "later assignment wins" rule — used only by the placeholder
    /// resolver, which is rewriting a known-stale placeholder rather than
    /// recording a new assignment.
    pub fn overwrite_variable(&self, function_fqn: &str, name: &str, info: TypeInfo) {
        if let Some(mut scope) = self.scopes.get_mut(function_fqn) {
            scope.variables.insert(name.to_string(), info);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confidence::source;
    use crate::ty::Type;

    fn info(ty: Type) -> TypeInfo {
        TypeInfo::new(ty, source::LITERAL, "literal")
    }

    #[test]
    fn scopes_do_not_leak_across_functions() {
        let store = TypeStore::new();
        store.set_variable("pkg.f", "x", info(Type::Concrete("int".into())));
        store.set_variable("pkg.g", "x", info(Type::Concrete("str".into())));

        assert_eq!(
            store.get_variable("pkg.f", "x").unwrap().ty,
            Type::Concrete("int".to_string())
        );
        assert_eq!(
            store.get_variable("pkg.g", "x").unwrap().ty,
            Type::Concrete("str".to_string())
        );
    }

    #[test]
    fn later_assignment_replaces_earlier_one() {
        let store = TypeStore::new();
        store.set_variable("pkg.f", "x", info(Type::Concrete("int".into())));
        store.set_variable("pkg.f", "x", info(Type::Concrete("str".into())));
        assert_eq!(
            store.get_variable("pkg.f", "x").unwrap().ty,
            Type::Concrete("str".to_string())
        );
    }

    #[test]
    fn unknown_variable_is_none() {
        let store = TypeStore::new();
        assert!(store.get_variable("pkg.f", "missing").is_none());
    }
}
