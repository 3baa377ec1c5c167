//! Per-file import alias -> target FQN mapping. Written only during pass 1;
//! every later pass treats it as read-only, matching the concurrency model's
//! reader-preferring discipline for structures that stop mutating early.

use std::path::{Path, PathBuf};

use dashmap::DashMap;

use crate::ty::Fqn;

/// What an import resolved to, kept alongside the FQN so the resolver can
/// tell a genuinely unresolved import from one that legitimately has no
/// local file (stdlib).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportTarget {
    /// Resolved to a project-local module FQN.
    Local(Fqn),
    /// Resolved to a stdlib package import path (see `registry::stdlib`).
    Stdlib(String),
    /// Could not be resolved at all.
    Unknown,
}

#[derive(Debug, Default)]
pub struct ImportMap {
    entries: DashMap<(PathBuf, String), ImportTarget>,
}

impl ImportMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record what `alias` resolves to within `file`, e.g. `import foo as
    /// bar` records `(file, "bar") -> Local("foo")`.
    pub fn insert(&self, file: impl Into<PathBuf>, alias: impl Into<String>, target: ImportTarget) {
        self.entries.insert((file.into(), alias.into()), target);
    }

    pub fn resolve(&self, file: &Path, alias: &str) -> Option<ImportTarget> {
        self.entries
            .get(&(file.to_path_buf(), alias.to_string()))
            .map(|r| r.value().clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_aliased_local_import() {
        let map = ImportMap::new();
        map.insert("main.py", "bar", ImportTarget::Local("pkg.foo".to_string()));
        assert_eq!(
            map.resolve(Path::new("main.py"), "bar"),
            Some(ImportTarget::Local("pkg.foo".to_string()))
        );
    }

    #[test]
    fn unresolved_alias_returns_none() {
        let map = ImportMap::new();
        assert_eq!(map.resolve(Path::new("main.py"), "nope"), None);
    }

    #[test]
    fn same_alias_is_scoped_per_file() {
        let map = ImportMap::new();
        map.insert("a.py", "json", ImportTarget::Stdlib("json".to_string()));
        map.insert("b.py", "json", ImportTarget::Local("pkg.json_shim".to_string()));
        assert_eq!(
            map.resolve(Path::new("a.py"), "json"),
            Some(ImportTarget::Stdlib("json".to_string()))
        );
        assert_eq!(
            map.resolve(Path::new("b.py"), "json"),
            Some(ImportTarget::Local("pkg.json_shim".to_string()))
        );
    }
}
