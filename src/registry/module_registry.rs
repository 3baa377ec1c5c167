//! Maps source file paths to their fully-qualified module name and back.
//! Populated entirely during pass 1 (indexing) and read-only afterward, so
//! reads never contend with writes past that point.

use std::path::{Path, PathBuf};

use dashmap::DashMap;

use crate::ty::Fqn;

/// Path <-> module FQN bookkeeping for every file in the project.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    by_path: DashMap<PathBuf, Fqn>,
    by_fqn: DashMap<Fqn, PathBuf>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file's module FQN. Called once per file during pass 1;
    /// re-registering the same path with a different FQN overwrites the
    /// stale mapping in both directions.
    pub fn register(&self, path: impl Into<PathBuf>, fqn: impl Into<Fqn>) {
        let path = path.into();
        let fqn = fqn.into();
        if let Some(old_fqn) = self.by_path.insert(path.clone(), fqn.clone()) {
            self.by_fqn.remove(&old_fqn);
        }
        self.by_fqn.insert(fqn, path);
    }

    pub fn fqn_for_path(&self, path: &Path) -> Option<Fqn> {
        self.by_path.get(path).map(|r| r.value().clone())
    }

    pub fn path_for_fqn(&self, fqn: &str) -> Option<PathBuf> {
        self.by_fqn.get(fqn).map(|r| r.value().clone())
    }

    pub fn contains_path(&self, path: &Path) -> bool {
        self.by_path.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_path_and_fqn() {
        let reg = ModuleRegistry::new();
        reg.register("pkg/mod.py", "pkg.mod");
        assert_eq!(reg.fqn_for_path(Path::new("pkg/mod.py")).as_deref(), Some("pkg.mod"));
        assert_eq!(reg.path_for_fqn("pkg.mod"), Some(PathBuf::from("pkg/mod.py")));
    }

    #[test]
    fn re_registering_drops_stale_reverse_mapping() {
        let reg = ModuleRegistry::new();
        reg.register("pkg/mod.py", "pkg.mod");
        reg.register("pkg/mod.py", "pkg.renamed");
        assert_eq!(reg.path_for_fqn("pkg.mod"), None);
        assert_eq!(reg.path_for_fqn("pkg.renamed"), Some(PathBuf::from("pkg/mod.py")));
    }
}
