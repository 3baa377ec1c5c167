//! Per-class attribute types, populated by Python class-attribute
//! extraction (§4.1.3) and consulted by the attribute-copy placeholder
//! resolver (open question 1) and the attribute inference strategy (§4.3.6).

use dashmap::DashMap;

use crate::ty::{Fqn, TypeInfo};

/// `class FQN -> attribute name -> inferred type`. The outer map is keyed
/// by class rather than by file because attribute lookups during
/// resolution are always "what type is `self.x` on class `C`", never
/// file-scoped.
#[derive(Debug, Default)]
pub struct AttributeRegistry {
    classes: DashMap<Fqn, DashMap<String, TypeInfo>>,
}

impl AttributeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an attribute's inferred type. If the attribute was already
    /// recorded (e.g. assigned in both `__init__` and another method) the
    /// higher-confidence inference wins, per the resolution rule shared
    /// with variable assignment in §4.1.3.
    pub fn set_attribute(&self, class_fqn: impl Into<Fqn>, attr: impl Into<String>, info: TypeInfo) {
        let attrs = self.classes.entry(class_fqn.into()).or_default();
        let attr = attr.into();
        match attrs.get(&attr) {
            Some(existing) if existing.confidence >= info.confidence => {}
            _ => {
                attrs.insert(attr, info);
            }
        }
    }

    pub fn get_attribute(&self, class_fqn: &str, attr: &str) -> Option<TypeInfo> {
        self.classes.get(class_fqn)?.get(attr).map(|r| r.value().clone())
    }

    pub fn attributes_of(&self, class_fqn: &str) -> Vec<(String, TypeInfo)> {
        self.classes
            .get(class_fqn)
            .map(|attrs| attrs.iter().map(|e| (e.key().clone(), e.value().clone())).collect())
            .unwrap_or_default()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Every `(class FQN, attribute name, TypeInfo)` currently holding a
    /// placeholder encoding, for the placeholder-rewriting pass to walk.
    pub fn placeholders(&self) -> Vec<(Fqn, String, TypeInfo)> {
        self.classes
            .iter()
            .flat_map(|entry| {
                let class_fqn = entry.key().clone();
                entry
                    .value()
                    .iter()
                    .filter(|e| e.value().is_placeholder())
                    .map(|e| (class_fqn.clone(), e.key().clone(), e.value().clone()))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Unconditionally replace an attribute's type. See
    /// [`crate::type_store::TypeStore::overwrite_variable`] for why this
    /// bypasses the higher-confidence-wins rule.
    pub fn overwrite_attribute(&self, class_fqn: &str, attr: &str, info: TypeInfo) {
        if let Some(attrs) = self.classes.get(class_fqn) {
            attrs.insert(attr.to_string(), info);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confidence::source;
    use crate::ty::Type;

    #[test]
    fn higher_confidence_wins_on_conflict() {
        let reg = AttributeRegistry::new();
        reg.set_attribute(
            "pkg.Foo",
            "x",
            TypeInfo::new(Type::Any(None), source::FLUENT_HEURISTIC, "fluent"),
        );
        reg.set_attribute(
            "pkg.Foo",
            "x",
            TypeInfo::new(Type::Concrete("int".into()), source::LITERAL, "literal"),
        );
        let got = reg.get_attribute("pkg.Foo", "x").unwrap();
        assert_eq!(got.ty, Type::Concrete("int".to_string()));
    }

    #[test]
    fn lower_confidence_does_not_overwrite() {
        let reg = AttributeRegistry::new();
        reg.set_attribute(
            "pkg.Foo",
            "x",
            TypeInfo::new(Type::Concrete("int".into()), source::LITERAL, "literal"),
        );
        reg.set_attribute(
            "pkg.Foo",
            "x",
            TypeInfo::new(Type::Any(None), source::FLUENT_HEURISTIC, "fluent"),
        );
        let got = reg.get_attribute("pkg.Foo", "x").unwrap();
        assert_eq!(got.ty, Type::Concrete("int".to_string()));
    }
}
