//! Engine-wide configuration.
//!
//! Mirrors the teacher's `Options` in shape: a plain `Clone` struct with a
//! `Default` impl, passed by reference into the pieces that need it rather
//! than threaded as individual parameters.

use std::time::Duration;

/// Tunables for the whole pipeline. Constructed once per analysis run.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Override for the per-file worker pool size. `None` uses the
    /// 75%-of-logical-CPUs-capped-at-8 policy from the concurrency model.
    pub worker_pool_size: Option<usize>,
    /// Base URL for the stdlib CDN, e.g. `https://cdn.example.com`.
    pub stdlib_base_url: String,
    /// Per-request timeout for stdlib fetches.
    pub stdlib_fetch_timeout: Duration,
    /// When false, the stdlib registry never performs network I/O; callers
    /// must pre-seed it (`StdlibRegistry::seed_package`) or resolution
    /// simply returns `PackageNotFound`.
    pub stdlib_network_enabled: bool,
    /// Maximum chain depth before a chain aborts and returns `Any` (§3.3).
    pub max_chain_depth: usize,
    /// Confidence floor below which a chain aborts and returns `Any` (§3.3).
    pub min_chain_confidence: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_pool_size: None,
            stdlib_base_url: "https://cdn.calltrace.dev".to_string(),
            stdlib_fetch_timeout: Duration::from_secs(30),
            stdlib_network_enabled: true,
            max_chain_depth: 10,
            min_chain_confidence: 0.3,
        }
    }
}
