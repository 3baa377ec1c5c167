//! Shared read access every strategy needs: what classes/functions exist,
//! what's already been inferred for attributes and local variables. Built
//! once per project and handed to every strategy by reference, never
//! owned by one.

use std::collections::HashMap;

use crate::extractor::RawFunction;
use crate::registry::builtin_registry::Language;
use crate::registry::{AttributeRegistry, ModuleRegistry};
use crate::type_store::TypeStore;

/// `simple name -> candidate declarations`, built from every function and
/// class seen during extraction. Lookups by simple name can be ambiguous
/// (the same name declared in two modules); callers that need a single
/// answer narrow by import map or fall back to the first candidate,
/// consistent with the ambiguous-short-name handling used for classes.
#[derive(Debug, Default)]
pub struct CallableIndex {
    functions_by_name: HashMap<String, Vec<RawFunction>>,
    classes_by_name: HashMap<String, Vec<String>>,
}

impl CallableIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_function(&mut self, function: RawFunction) {
        self.functions_by_name
            .entry(function.name.clone())
            .or_default()
            .push(function);
    }

    pub fn add_class(&mut self, simple_name: impl Into<String>, qualified_name: impl Into<String>) {
        self.classes_by_name
            .entry(simple_name.into())
            .or_default()
            .push(qualified_name.into());
    }

    pub fn function_candidates(&self, simple_name: &str) -> &[RawFunction] {
        self.functions_by_name
            .get(simple_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn class_candidates(&self, simple_name: &str) -> &[String] {
        self.classes_by_name
            .get(simple_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_known_class(&self, simple_name: &str) -> bool {
        !self.class_candidates(simple_name).is_empty()
    }
}

/// Everything a [`crate::inference::Strategy`] can read while inferring
/// one assignment's type.
pub struct InferenceContext<'a> {
    pub language: Language,
    pub modules: &'a ModuleRegistry,
    pub attributes: &'a AttributeRegistry,
    pub types: &'a TypeStore,
    pub callables: &'a CallableIndex,
    /// Chain steps beyond this depth abort to `Any` (§3.3).
    pub max_chain_depth: usize,
    /// Chains whose folded confidence drops below this floor abort to `Any`
    /// (§3.3), even if shallower than `max_chain_depth`.
    pub min_chain_confidence: f64,
}
