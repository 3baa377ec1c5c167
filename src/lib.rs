//! # calltrace
//!
//! Intra-procedural call-graph construction and confidence-weighted type
//! inference for Python and Go source trees — the core subsystem that
//! feeds downstream taint and data-flow analysis.
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,no_run
//! use calltrace::callgraph::{build, SourceFile};
//! use calltrace::config::EngineConfig;
//! use calltrace::registry::builtin_registry::Language;
//! use std::path::PathBuf;
//!
//! let files = vec![SourceFile {
//!     path: PathBuf::from("pkg/mod.py"),
//!     source: "def greet():\n    return 'hi'\n".to_string(),
//!     language: Language::Python,
//! }];
//!
//! let config = EngineConfig::default();
//! let (graph, report) = build(&files, &config);
//! println!("{} functions indexed, {} call sites resolved", report.functions_indexed, report.call_sites_resolved);
//! ```
//!
//! See the [project README](https://github.com/calltrace/calltrace) for full
//! documentation.

#![doc(html_root_url = "https://docs.rs/calltrace/0.1.0")]

// ============================================================================
// Core Modules
// ============================================================================

/// Source locations shared by every extracted and inferred item.
pub mod location;

/// The fixed confidence table and chain-combination rule (§3.1).
pub mod confidence;

/// The language-independent type model: `Type`, `TypeInfo`, placeholder
/// encodings.
pub mod ty;

/// Engine-wide configuration (worker pool size, stdlib CDN, chain-depth and
/// confidence-floor cutoffs).
pub mod config;

/// Typed error surface for the core engine (`thiserror`-backed, one enum
/// per component with first-class failure modes).
pub mod error;

/// Project-level shared registries: modules, imports, attributes, builtins,
/// and the stdlib package cache.
///
/// # Submodules
///
/// - [`registry::module_registry`] - path <-> module FQN bookkeeping
/// - [`registry::import_map`] - per-file import alias resolution
/// - [`registry::attribute_registry`] - per-class attribute types
/// - [`registry::builtin_registry`] - Python/Go builtin type names
/// - [`registry::stdlib`] - CDN-backed stdlib package manifest and cache
pub mod registry;

/// Per-function local variable type scoping (§4.2).
pub mod type_store;

/// Worker-pool sizing policy shared by every parallel pass (§5).
pub mod concurrency;

/// Static catalog of recognized Python/Go framework and library prefixes.
pub mod frameworks;

/// Statement-level def-use chains.
pub mod defuse;

/// AST extraction for Python and Go source files into the shared
/// language-independent raw shapes.
///
/// # Submodules
///
/// - [`extractor::python`] - tree-sitter-python walker
/// - [`extractor::go`] - tree-sitter-go walker
pub mod extractor;

/// Confidence-weighted, priority-ordered type inference strategies (§4.3).
///
/// # Submodules
///
/// - [`inference::context`] - shared read-only state every strategy consults
/// - [`inference::strategy`] - the `Strategy` trait and `StrategyRegistry`
/// - [`inference::strategies`] - the nine concrete strategies, annotation
///   through function-call, in priority order
pub mod inference;

/// Call-graph construction: five passes over a project's files turning raw
/// extraction output into a resolved [`callgraph::CallGraph`] (§4.5).
///
/// # Submodules
///
/// - [`callgraph::builder`] - orchestrates passes 1 through 5
/// - [`callgraph::graph`] - the graph itself, with forward/reverse adjacency
/// - [`callgraph::resolver`] - pass 4, call-site resolution
/// - [`callgraph::placeholder`] - pass 5, fixed-point placeholder rewriting
pub mod callgraph;

// ============================================================================
// Re-exports for convenience
// ============================================================================

/// Build a full call graph for a project.
pub use callgraph::build;

/// One input file to [`build`].
pub use callgraph::builder::SourceFile;

/// Summary counts returned alongside a built call graph.
pub use callgraph::BuildReport;

/// The resolved call graph itself.
pub use callgraph::CallGraph;

/// Engine-wide tunables.
pub use config::EngineConfig;

/// Top-level error type for pipeline orchestration.
pub use error::CoreError;

/// The language-independent type sum.
pub use ty::Type;

/// One inference result: a type, its confidence, and the strategy that
/// produced it.
pub use ty::TypeInfo;
