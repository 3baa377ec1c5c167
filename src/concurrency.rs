//! Worker-pool sizing policy (§5): 75% of logical CPUs, clamped to
//! `[1, 8]`. Shared by every parallel pass so they agree on a single pool
//! size instead of each picking their own.

use crate::config::EngineConfig;

const MIN_WORKERS: usize = 1;
const MAX_WORKERS: usize = 8;

/// Resolve the worker count to use for this run: the config override if
/// set, otherwise 75% of logical CPUs clamped into `[1, 8]`.
pub fn worker_pool_size(config: &EngineConfig) -> usize {
    config
        .worker_pool_size
        .unwrap_or_else(|| default_worker_pool_size(num_cpus::get()))
}

fn default_worker_pool_size(logical_cpus: usize) -> usize {
    let target = (logical_cpus * 3) / 4;
    target.clamp(MIN_WORKERS, MAX_WORKERS)
}

/// Build a dedicated rayon pool sized per [`worker_pool_size`], so parallel
/// passes don't contend with rayon's global pool (which other embedders of
/// this crate may also be using).
pub fn build_pool(config: &EngineConfig) -> rayon::ThreadPool {
    rayon::ThreadPoolBuilder::new()
        .num_threads(worker_pool_size(config))
        .build()
        .expect("rayon pool with a positive thread count never fails to build")
}
