//! The stdlib registry (§4.4): a lazily-populated, CDN-backed cache of
//! stdlib package exports, shared read-mostly across every worker once
//! warm.

pub mod client;
pub mod manifest;
pub mod package;

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::Mutex;

pub use client::StdlibClient;
pub use manifest::{Manifest, ManifestEntry};
pub use package::{Package, PackageMember};

use crate::error::StdlibError;

/// Caches fetched packages and, when network access is enabled, lazily
/// fetches the manifest and any package not yet seen. Uses double-checked
/// locking on both the manifest and per-package fetch locks so concurrent
/// callers asking for the same package only trigger one HTTP request
/// (§5 "suspension points").
pub struct StdlibRegistry {
    client: Option<StdlibClient>,
    manifest: Mutex<Option<Manifest>>,
    packages: DashMap<String, Arc<Package>>,
    fetch_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl StdlibRegistry {
    /// Build a registry backed by a live CDN client.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client builder with a fixed timeout never fails");
        Self {
            client: Some(StdlibClient::new(http, base_url)),
            manifest: Mutex::new(None),
            packages: DashMap::new(),
            fetch_locks: DashMap::new(),
        }
    }

    /// Build a registry with network access disabled. Resolution only
    /// ever sees what's been pre-seeded via [`Self::seed_package`]; anything
    /// else resolves to `PackageNotFound`.
    pub fn offline() -> Self {
        Self {
            client: None,
            manifest: Mutex::new(Some(Manifest::default())),
            packages: DashMap::new(),
            fetch_locks: DashMap::new(),
        }
    }

    /// Pre-populate the cache for a package without touching the network.
    /// Used by offline callers and by tests.
    pub fn seed_package(&self, package: Package) {
        self.packages.insert(package.import_path.clone(), Arc::new(package));
    }

    async fn ensure_manifest(&self) -> Result<(), StdlibError> {
        {
            let guard = self.manifest.lock().await;
            if guard.is_some() {
                return Ok(());
            }
        }
        let Some(client) = &self.client else {
            return Ok(());
        };
        let mut guard = self.manifest.lock().await;
        if guard.is_some() {
            return Ok(());
        }
        let fetched = client.fetch_manifest().await?;
        *guard = Some(fetched);
        Ok(())
    }

    /// Resolve a member of a stdlib package, fetching and caching the
    /// package on first use. Returns `PackageNotFound` immediately (no
    /// network I/O) when running offline with nothing seeded.
    pub async fn resolve_member(
        &self,
        import_path: &str,
        member: &str,
    ) -> Result<PackageMember, StdlibError> {
        let package = self.resolve_package(import_path).await?;
        package
            .member(member)
            .cloned()
            .ok_or_else(|| StdlibError::MemberNotFound {
                import_path: import_path.to_string(),
                member: member.to_string(),
            })
    }

    async fn resolve_package(&self, import_path: &str) -> Result<Arc<Package>, StdlibError> {
        if let Some(cached) = self.packages.get(import_path) {
            return Ok(cached.clone());
        }

        let Some(client) = &self.client else {
            return Err(StdlibError::PackageNotFound {
                import_path: import_path.to_string(),
            });
        };

        self.ensure_manifest().await?;

        let lock = self
            .fetch_locks
            .entry(import_path.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().await;

        if let Some(cached) = self.packages.get(import_path) {
            return Ok(cached.clone());
        }

        let manifest_guard = self.manifest.lock().await;
        let entry = manifest_guard
            .as_ref()
            .and_then(|m| m.find(import_path))
            .cloned()
            .ok_or_else(|| StdlibError::PackageNotFound {
                import_path: import_path.to_string(),
            })?;
        drop(manifest_guard);

        let package = Arc::new(client.fetch_package(&entry).await?);
        self.packages.insert(import_path.to_string(), package.clone());
        Ok(package)
    }

    pub fn cached_package_count(&self) -> usize {
        self.packages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_registry_finds_seeded_package() {
        let reg = StdlibRegistry::offline();
        reg.seed_package(Package {
            import_path: "os".to_string(),
            members: vec![PackageMember {
                name: "getenv".to_string(),
                type_fqn: "str".to_string(),
                is_callable: true,
            }],
        });
        assert_eq!(reg.cached_package_count(), 1);
    }

    #[tokio::test]
    async fn offline_registry_rejects_unseeded_package() {
        let reg = StdlibRegistry::offline();
        let err = reg.resolve_member("os", "getenv").await.unwrap_err();
        assert!(matches!(err, StdlibError::PackageNotFound { .. }));
    }

    #[tokio::test]
    async fn seeded_member_resolves_without_network() {
        let reg = StdlibRegistry::offline();
        reg.seed_package(Package {
            import_path: "os".to_string(),
            members: vec![PackageMember {
                name: "getenv".to_string(),
                type_fqn: "str".to_string(),
                is_callable: true,
            }],
        });
        let member = reg.resolve_member("os", "getenv").await.expect("resolve");
        assert_eq!(member.type_fqn, "str");
    }

    #[tokio::test]
    async fn seeded_missing_member_is_member_not_found() {
        let reg = StdlibRegistry::offline();
        reg.seed_package(Package {
            import_path: "os".to_string(),
            members: vec![],
        });
        let err = reg.resolve_member("os", "getenv").await.unwrap_err();
        assert!(matches!(err, StdlibError::MemberNotFound { .. }));
    }
}
