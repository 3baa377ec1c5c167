//! Typed error surface for the core engine.
//!
//! Each component with first-class failure modes in the error-handling
//! design gets its own enum so callers can match on failure category
//! instead of string-sniffing. Nothing here panics; these are the values
//! returned at every public boundary.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the stdlib registry's CDN fetch path.
#[derive(Debug, Error)]
pub enum StdlibError {
    #[error("stdlib registry: manifest not loaded yet for {import_path}")]
    ManifestNotLoaded { import_path: String },

    #[error("stdlib registry: network error fetching {import_path}: {source}")]
    Network {
        import_path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("stdlib registry: HTTP {status} fetching {import_path}")]
    HttpStatus { import_path: String, status: u16 },

    #[error("stdlib registry: failed to read response body for {import_path}: {source}")]
    BodyRead {
        import_path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("stdlib registry: failed to parse JSON for {import_path}: {source}")]
    JsonParse {
        import_path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "stdlib registry: checksum mismatch for {import_path}: expected {expected}, got {actual}"
    )]
    ChecksumMismatch {
        import_path: String,
        expected: String,
        actual: String,
    },

    #[error("stdlib registry: package {import_path} not found in manifest")]
    PackageNotFound { import_path: String },

    #[error("stdlib registry: member {member} not found in package {import_path}")]
    MemberNotFound { import_path: String, member: String },

    #[error("stdlib registry: fetch cancelled for {import_path}")]
    Cancelled { import_path: String },
}

/// Errors surfaced while extracting statements/assignments/attributes from
/// an AST. Parse errors never abort a whole-project run; the caller moves
/// on to the next file.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("{path} is not registered in the module registry")]
    FileNotInRegistry { path: PathBuf },
}

/// Errors from call-site / placeholder resolution. Resolution failures are
/// not hard errors in the pipeline (a `CallSite` just stays unresolved with
/// a failure-reason tag) — this enum is for cases an API caller needs to be
/// told about directly, such as looking up a FQN that was never indexed.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("no function indexed under {fqn}")]
    UnknownFunction { fqn: String },

    #[error("no scope recorded for function {fqn}")]
    NoScope { fqn: String },
}

/// Top-level error type returned by the pipeline orchestration (wiring
/// passes 1 through 5 together). Everything else is a `#[from]` conversion
/// so call sites can just use `?`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Stdlib(#[from] StdlibError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("invalid engine configuration: {0}")]
    Config(String),
}
