//! HTTP plumbing for the stdlib CDN: fetch-and-verify for the manifest and
//! for individual packages. Contains no caching; that's the registry's job.

use sha2::{Digest, Sha256};

use super::manifest::{Manifest, ManifestEntry};
use super::package::Package;
use crate::error::StdlibError;

pub struct StdlibClient {
    http: reqwest::Client,
    base_url: String,
}

impl StdlibClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub async fn fetch_manifest(&self) -> Result<Manifest, StdlibError> {
        let url = format!("{}/manifest.json", self.base_url.trim_end_matches('/'));
        let response =
            self.http
                .get(&url)
                .send()
                .await
                .map_err(|source| StdlibError::Network {
                    import_path: "<manifest>".to_string(),
                    source,
                })?;

        if !response.status().is_success() {
            return Err(StdlibError::HttpStatus {
                import_path: "<manifest>".to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| StdlibError::BodyRead {
                import_path: "<manifest>".to_string(),
                source,
            })?;

        serde_json::from_str(&body).map_err(|source| StdlibError::JsonParse {
            import_path: "<manifest>".to_string(),
            source,
        })
    }

    /// Fetch a single package's JSON and verify it hashes to the manifest
    /// entry's recorded SHA-256 before handing it back. A mismatch is a
    /// hard error, never a silent fall-through to a stale cache entry.
    pub async fn fetch_package(&self, entry: &ManifestEntry) -> Result<Package, StdlibError> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            entry.package_path.trim_start_matches('/')
        );
        let response =
            self.http
                .get(&url)
                .send()
                .await
                .map_err(|source| StdlibError::Network {
                    import_path: entry.import_path.clone(),
                    source,
                })?;

        if !response.status().is_success() {
            return Err(StdlibError::HttpStatus {
                import_path: entry.import_path.clone(),
                status: response.status().as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| StdlibError::BodyRead {
                import_path: entry.import_path.clone(),
                source,
            })?;

        let actual = hex::encode(Sha256::digest(body.as_bytes()));
        if actual != entry.sha256 {
            return Err(StdlibError::ChecksumMismatch {
                import_path: entry.import_path.clone(),
                expected: entry.sha256.clone(),
                actual,
            });
        }

        serde_json::from_str(&body).map_err(|source| StdlibError::JsonParse {
            import_path: entry.import_path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::stdlib::package::PackageMember;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_http() -> reqwest::Client {
        reqwest::Client::builder()
            .build()
            .expect("build http client")
    }

    #[tokio::test]
    async fn fetch_manifest_parses_body() {
        let server = MockServer::start().await;
        let manifest = Manifest {
            entries: vec![ManifestEntry {
                import_path: "os".to_string(),
                package_path: "/packages/os.json".to_string(),
                sha256: "irrelevant".to_string(),
            }],
        };
        Mock::given(method("GET"))
            .and(path("/manifest.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&manifest))
            .mount(&server)
            .await;

        let client = StdlibClient::new(test_http(), server.uri());
        let fetched = client.fetch_manifest().await.expect("fetch");
        assert_eq!(fetched, manifest);
    }

    #[tokio::test]
    async fn fetch_manifest_surfaces_non_200_as_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/manifest.json"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = StdlibClient::new(test_http(), server.uri());
        let err = client.fetch_manifest().await.unwrap_err();
        assert!(matches!(err, StdlibError::HttpStatus { status: 503, .. }));
    }

    #[tokio::test]
    async fn fetch_package_verifies_checksum() {
        let server = MockServer::start().await;
        let pkg = Package {
            import_path: "os".to_string(),
            members: vec![PackageMember {
                name: "getenv".to_string(),
                type_fqn: "str".to_string(),
                is_callable: true,
            }],
        };
        let body = serde_json::to_string(&pkg).unwrap();
        let sha256 = hex::encode(Sha256::digest(body.as_bytes()));

        Mock::given(method("GET"))
            .and(path("/packages/os.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let client = StdlibClient::new(test_http(), server.uri());
        let entry = ManifestEntry {
            import_path: "os".to_string(),
            package_path: "/packages/os.json".to_string(),
            sha256,
        };
        let fetched = client.fetch_package(&entry).await.expect("fetch");
        assert_eq!(fetched, pkg);
    }

    #[tokio::test]
    async fn fetch_package_rejects_checksum_mismatch() {
        let server = MockServer::start().await;
        let body = r#"{"import_path":"os","members":[]}"#;

        Mock::given(method("GET"))
            .and(path("/packages/os.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let client = StdlibClient::new(test_http(), server.uri());
        let entry = ManifestEntry {
            import_path: "os".to_string(),
            package_path: "/packages/os.json".to_string(),
            sha256: "0000000000000000000000000000000000000000000000000000000000000000".to_string(),
        };
        let err = client.fetch_package(&entry).await.unwrap_err();
        assert!(matches!(err, StdlibError::ChecksumMismatch { .. }));
    }
}
