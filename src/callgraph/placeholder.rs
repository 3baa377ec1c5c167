//! Pass 5 - placeholder rewriting (§4.5, open question 1). Every
//! `class:`/`call:`/`param:`/`attr:` placeholder left behind by the
//! inference strategies gets one more attempt at resolution now that the
//! whole project has been indexed. Run to a fixed point (bounded by the
//! number of placeholders, so it always terminates) rather than exactly
//! once, which is what keeps §8.1 invariant 7 true by construction.

use tracing::debug;

use crate::inference::context::CallableIndex;
use crate::registry::AttributeRegistry;
use crate::ty::{Type, TypeInfo};
use crate::type_store::TypeStore;

use crate::confidence::source;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderResolutionReport {
    pub resolved: usize,
    pub ambiguous: usize,
}

fn owner_class_of(function_fqn: &str) -> Option<&str> {
    function_fqn.rsplit_once('.').map(|(owner, _)| owner)
}

enum Outcome {
    Resolved(TypeInfo),
    StillAmbiguous,
    NoProgress,
}

/// `owner_function` is the FQN of the function this placeholder lives in
/// (used to resolve `param:`); `owner_class` is the FQN of the class the
/// placeholder's attribute belongs to (used to resolve `attr:`). For a
/// `TypeStore` placeholder these are the function itself and its
/// enclosing class respectively; for an `AttributeRegistry` placeholder
/// there is no enclosing function, only the class.
fn try_resolve(
    ty: &Type,
    owner_function: Option<&str>,
    owner_class: Option<&str>,
    attributes: &AttributeRegistry,
    callables: &CallableIndex,
) -> Outcome {
    let Type::Variable(encoded) = ty else {
        return Outcome::NoProgress;
    };
    if let Some(name) = encoded.strip_prefix("class:") {
        let candidates = callables.class_candidates(name);
        return match candidates.len() {
            1 => Outcome::Resolved(TypeInfo::new(Type::Concrete(candidates[0].clone()), source::CONSTRUCTOR, "class_placeholder")),
            0 => Outcome::NoProgress,
            _ => Outcome::StillAmbiguous,
        };
    }
    if let Some(callee) = encoded.strip_prefix("call:") {
        let simple_name = callee.rsplit('.').next().unwrap_or(callee);
        let candidates = callables.function_candidates(simple_name);
        return match candidates.len() {
            1 => match &candidates[0].return_type_annotation {
                Some(rt) if !rt.is_empty() => {
                    let first = rt.split(',').next().unwrap_or(rt).trim().to_string();
                    Outcome::Resolved(TypeInfo::new(Type::Concrete(first), source::RETURN_TYPE, "call_placeholder"))
                }
                _ => Outcome::NoProgress,
            },
            0 => Outcome::NoProgress,
            _ => Outcome::StillAmbiguous,
        };
    }
    if let Some(param_name) = encoded.strip_prefix("param:") {
        let Some(owner_function) = owner_function else {
            return Outcome::NoProgress;
        };
        return Outcome::NoProgress.or_owner_param(owner_function, param_name, callables);
    }
    if let Some(attr_name) = encoded.strip_prefix("attr:") {
        let Some(owner) = owner_class else {
            return Outcome::NoProgress;
        };
        return match attributes.get_attribute(owner, attr_name) {
            Some(existing) if !existing.is_placeholder() => Outcome::Resolved(TypeInfo::new(
                existing.ty,
                existing.confidence * source::ATTRIBUTE,
                "attribute_copy",
            )),
            _ => Outcome::NoProgress,
        };
    }
    Outcome::NoProgress
}

impl Outcome {
    /// `param:` placeholders resolve through the owning function's own
    /// parameter list, not through the callable-by-name index (a
    /// parameter is never itself a callable).
    fn or_owner_param(self, owner_function: &str, param_name: &str, callables: &CallableIndex) -> Outcome {
        let method_name = owner_function.rsplit('.').next().unwrap_or(owner_function);
        let candidates = callables.function_candidates(method_name);
        let Some(function) = candidates.iter().find(|f| f.qualified_name == owner_function) else {
            return self;
        };
        let Some(param) = function.params.iter().find(|p| p.name == param_name) else {
            return self;
        };
        match &param.type_annotation {
            Some(annotation) => Outcome::Resolved(TypeInfo::new(
                Type::Concrete(annotation.clone()),
                source::ANNOTATION,
                "param_placeholder",
            )),
            None => self,
        }
    }
}

/// Run pass 5 to a fixed point. `types` placeholders resolve using the
/// enclosing function's FQN as owner context (for `param:`/`attr:`);
/// `attributes` placeholders resolve using the attribute's own class FQN
/// as owner context.
pub fn resolve_placeholders(
    types: &TypeStore,
    attributes: &AttributeRegistry,
    callables: &CallableIndex,
) -> PlaceholderResolutionReport {
    let mut report = PlaceholderResolutionReport::default();

    loop {
        let mut progressed = false;

        for (function_fqn, name, info) in types.placeholders() {
            match try_resolve(&info.ty, Some(function_fqn.as_str()), owner_class_of(&function_fqn), attributes, callables) {
                Outcome::Resolved(resolved) => {
                    types.overwrite_variable(&function_fqn, &name, resolved);
                    report.resolved += 1;
                    progressed = true;
                }
                Outcome::StillAmbiguous | Outcome::NoProgress => {}
            }
        }

        for (class_fqn, attr, info) in attributes.placeholders() {
            match try_resolve(&info.ty, None, Some(class_fqn.as_str()), attributes, callables) {
                Outcome::Resolved(resolved) => {
                    attributes.overwrite_attribute(&class_fqn, &attr, resolved);
                    report.resolved += 1;
                    progressed = true;
                }
                Outcome::StillAmbiguous | Outcome::NoProgress => {}
            }
        }

        if !progressed {
            break;
        }
    }

    for (function_fqn, name, info) in types.placeholders() {
        debug!(function = %function_fqn, variable = %name, ty = ?info.ty, "unresolved placeholder after pass 5");
        report.ambiguous += 1;
    }
    for (class_fqn, attr, info) in attributes.placeholders() {
        debug!(class = %class_fqn, attribute = %attr, ty = ?info.ty, "unresolved placeholder after pass 5");
        report.ambiguous += 1;
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{RawFunction, RawParameter};
    use crate::location::SourceLocation;

    #[test]
    fn resolves_class_placeholder_with_single_candidate() {
        let types = TypeStore::new();
        types.set_variable("pkg.mod.main", "g", TypeInfo::new(Type::Variable("class:Greeter".into()), source::CONSTRUCTOR, "class_instantiation"));
        let attributes = AttributeRegistry::new();
        let mut callables = CallableIndex::new();
        callables.add_class("Greeter", "pkg.mod.Greeter");

        let report = resolve_placeholders(&types, &attributes, &callables);
        assert_eq!(report.resolved, 1);
        assert_eq!(report.ambiguous, 0);
        assert_eq!(types.get_variable("pkg.mod.main", "g").unwrap().ty, Type::Concrete("pkg.mod.Greeter".to_string()));
    }

    #[test]
    fn leaves_ambiguous_class_placeholder_and_reports_it() {
        let types = TypeStore::new();
        types.set_variable("pkg.mod.main", "g", TypeInfo::new(Type::Variable("class:Handler".into()), source::CONSTRUCTOR, "class_instantiation"));
        let attributes = AttributeRegistry::new();
        let mut callables = CallableIndex::new();
        callables.add_class("Handler", "pkg.a.Handler");
        callables.add_class("Handler", "pkg.b.Handler");

        let report = resolve_placeholders(&types, &attributes, &callables);
        assert_eq!(report.resolved, 0);
        assert_eq!(report.ambiguous, 1);
        assert!(types.get_variable("pkg.mod.main", "g").unwrap().is_placeholder());
    }

    #[test]
    fn resolves_param_placeholder_through_owning_function() {
        let types = TypeStore::new();
        types.set_variable("pkg.mod.Greeter.__init__", "name", TypeInfo::new(Type::Variable("param:name".into()), source::ASSIGNMENT, "chain"));
        let attributes = AttributeRegistry::new();
        let mut callables = CallableIndex::new();
        callables.add_function(RawFunction {
            name: "__init__".to_string(),
            qualified_name: "pkg.mod.Greeter.__init__".to_string(),
            params: vec![RawParameter {
                name: "name".to_string(),
                type_annotation: Some("str".to_string()),
                default_literal: None,
            }],
            receiver: Some("self".to_string()),
            return_type_annotation: None,
            location: SourceLocation::new(1, 0),
        });

        let report = resolve_placeholders(&types, &attributes, &callables);
        assert_eq!(report.resolved, 1);
        assert_eq!(types.get_variable("pkg.mod.Greeter.__init__", "name").unwrap().ty, Type::Concrete("str".to_string()));
    }

    #[test]
    fn resolves_attribute_copy_in_a_single_fixed_point_pass() {
        let types = TypeStore::new();
        let attributes = AttributeRegistry::new();
        attributes.set_attribute("pkg.mod.Greeter", "name", TypeInfo::new(Type::Concrete("str".into()), source::LITERAL, "literal"));
        attributes.set_attribute("pkg.mod.Greeter", "alias", TypeInfo::new(Type::Variable("attr:name".into()), source::ATTRIBUTE, "attribute_copy"));
        let callables = CallableIndex::new();

        let report = resolve_placeholders(&types, &attributes, &callables);
        assert_eq!(report.resolved, 1);
        assert_eq!(
            attributes.get_attribute("pkg.mod.Greeter", "alias").unwrap().ty,
            Type::Concrete("str".to_string())
        );
    }
}
