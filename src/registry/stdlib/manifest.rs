//! The stdlib CDN's manifest format (§6.1): one entry per importable
//! package, giving the CDN-relative path to its package JSON and the
//! SHA-256 checksum that JSON must hash to.

use serde::{Deserialize, Serialize};

/// One row of the manifest, keyed by the import path callers would write
/// in source (`"os"`, `"net/http"`, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub import_path: String,
    pub package_path: String,
    pub sha256: String,
}

/// The whole manifest, as fetched once per process and cached for the
/// lifetime of the registry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn find(&self, import_path: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|e| e.import_path == import_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let manifest = Manifest {
            entries: vec![ManifestEntry {
                import_path: "os".to_string(),
                package_path: "/packages/os.json".to_string(),
                sha256: "deadbeef".to_string(),
            }],
        };
        let json = serde_json::to_string(&manifest).expect("serialize");
        let back: Manifest = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(manifest, back);
    }

    #[test]
    fn find_looks_up_by_import_path() {
        let manifest = Manifest {
            entries: vec![ManifestEntry {
                import_path: "net/http".to_string(),
                package_path: "/packages/net_http.json".to_string(),
                sha256: "abc123".to_string(),
            }],
        };
        assert!(manifest.find("net/http").is_some());
        assert!(manifest.find("net/nope").is_none());
    }
}
