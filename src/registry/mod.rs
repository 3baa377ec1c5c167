//! Project-level registries (§3.2): the shared state every pass reads from
//! and, in passes 1-4, writes into. Each registry picks its own locking
//! discipline based on its read/write pattern (see §5).

pub mod attribute_registry;
pub mod builtin_registry;
pub mod import_map;
pub mod module_registry;
pub mod stdlib;

pub use attribute_registry::AttributeRegistry;
pub use builtin_registry::BuiltinRegistry;
pub use import_map::ImportMap;
pub use module_registry::ModuleRegistry;
pub use stdlib::StdlibRegistry;
