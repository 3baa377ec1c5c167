//! The concrete strategies from §4.3.2-§4.3.9, in priority order from
//! most to least certain: an explicit annotation always wins; a bare
//! fallback (fluent heuristic) never fires here and instead lives in the
//! call-graph builder as the default when every strategy below returns
//! `None`.

use crate::confidence::{combine_sequential, source};
use crate::extractor::{ChainStep, RawAssignment, RhsKind};
use crate::inference::context::InferenceContext;
use crate::inference::strategy::Strategy;
use crate::registry::builtin_registry::{BuiltinRegistry, Language};
use crate::ty::{Type, TypeInfo};

fn owner_class_of(function_qualified_name: &str) -> Option<String> {
    let (owner, _method) = function_qualified_name.rsplit_once('.')?;
    Some(owner.to_string())
}

/// §4.3.2 - an explicit type annotation is authoritative.
pub struct AnnotationStrategy;
impl Strategy for AnnotationStrategy {
    fn name(&self) -> &'static str {
        "annotation"
    }
    fn priority(&self) -> u8 {
        95
    }
    fn can_handle(&self, assignment: &RawAssignment) -> bool {
        assignment.type_annotation.is_some()
    }
    fn synthesize(&self, _ctx: &InferenceContext, assignment: &RawAssignment) -> Option<TypeInfo> {
        let annotation = assignment.type_annotation.as_ref()?;
        Some(TypeInfo::new(
            Type::Concrete(annotation.clone()),
            source::ANNOTATION,
            self.name(),
        ))
    }
}

/// §4.3.3 - a literal RHS carries its type in its own syntax. Builtin type
/// names are namespaced the way each language's own standard library
/// namespaces them (§4.1.4); `None` maps to the distinguished [`Type::None`]
/// singleton rather than a concrete `"NoneType"`.
pub struct LiteralStrategy;
impl Strategy for LiteralStrategy {
    fn name(&self) -> &'static str {
        "literal"
    }
    fn priority(&self) -> u8 {
        65
    }
    fn can_handle(&self, assignment: &RawAssignment) -> bool {
        matches!(assignment.rhs, RhsKind::Literal { .. })
    }
    fn synthesize(&self, ctx: &InferenceContext, assignment: &RawAssignment) -> Option<TypeInfo> {
        let RhsKind::Literal { type_hint } = &assignment.rhs else {
            return None;
        };
        if type_hint == "None" {
            return Some(TypeInfo::new(Type::None, source::LITERAL, self.name()));
        }
        let ty = if BuiltinRegistry::is_builtin(ctx.language, type_hint) {
            BuiltinRegistry::concrete_type(ctx.language, type_hint)
        } else {
            Type::Concrete(type_hint.clone())
        };
        Some(TypeInfo::new(ty, source::LITERAL, self.name()))
    }
}

/// §4.3.4 - a call whose callee looks like a constructor: a known class,
/// or (heuristically, absent other evidence) a capitalized name.
pub struct ClassInstantiationStrategy;
impl Strategy for ClassInstantiationStrategy {
    fn name(&self) -> &'static str {
        "class_instantiation"
    }
    fn priority(&self) -> u8 {
        70
    }
    fn can_handle(&self, assignment: &RawAssignment) -> bool {
        matches!(&assignment.rhs, RhsKind::Call { callee } if !callee.contains('.'))
    }
    fn synthesize(&self, ctx: &InferenceContext, assignment: &RawAssignment) -> Option<TypeInfo> {
        let RhsKind::Call { callee } = &assignment.rhs else {
            return None;
        };
        if callee.contains('.') {
            return None;
        }
        let candidates = ctx.callables.class_candidates(callee);
        if let Some(fqn) = candidates.first() {
            return Some(TypeInfo::new(Type::Concrete(fqn.clone()), source::CONSTRUCTOR, self.name()));
        }
        if BuiltinRegistry::is_builtin(ctx.language, callee) {
            return Some(TypeInfo::new(
                BuiltinRegistry::concrete_type(ctx.language, callee),
                source::CONSTRUCTOR,
                self.name(),
            ));
        }
        let starts_uppercase = callee.chars().next().is_some_and(|c| c.is_uppercase());
        if starts_uppercase {
            return Some(TypeInfo::new(
                Type::Variable(format!("class:{callee}")),
                source::CONSTRUCTOR,
                self.name(),
            ));
        }
        None
    }
}

/// §4.3.5 - `self.attr = param`, where `param` is one of the constructor's
/// own annotated parameters: the attribute inherits the parameter's
/// declared type directly, without going through a variable lookup.
pub struct ConstructorParameterStrategy;
impl Strategy for ConstructorParameterStrategy {
    fn name(&self) -> &'static str {
        "constructor_parameter"
    }
    fn priority(&self) -> u8 {
        75
    }
    fn can_handle(&self, assignment: &RawAssignment) -> bool {
        assignment.owner_class.is_some() && matches!(assignment.rhs, RhsKind::NameRef { .. })
    }
    fn synthesize(&self, ctx: &InferenceContext, assignment: &RawAssignment) -> Option<TypeInfo> {
        assignment.owner_class.as_ref()?;
        let RhsKind::NameRef { name } = &assignment.rhs else {
            return None;
        };
        let method_name = assignment.function_qualified_name.rsplit('.').next()?;
        let candidates = ctx.callables.function_candidates(method_name);
        let function = candidates
            .iter()
            .find(|f| f.qualified_name == assignment.function_qualified_name)?;
        let param = function.params.iter().find(|p| &p.name == name)?;
        let annotation = param.type_annotation.as_ref()?;
        Some(TypeInfo::new(Type::Concrete(annotation.clone()), source::ANNOTATION, self.name()))
    }
}

/// §4.3.9 - comparisons and logical expressions always produce a boolean,
/// independent of their operands.
pub struct BooleanOperatorStrategy;
impl Strategy for BooleanOperatorStrategy {
    fn name(&self) -> &'static str {
        "boolean_operator"
    }
    fn priority(&self) -> u8 {
        55
    }
    fn can_handle(&self, assignment: &RawAssignment) -> bool {
        assignment.rhs == RhsKind::BooleanExpr
    }
    fn synthesize(&self, ctx: &InferenceContext, assignment: &RawAssignment) -> Option<TypeInfo> {
        if assignment.rhs != RhsKind::BooleanExpr {
            return None;
        }
        let bool_name = match ctx.language {
            Language::Python => "bool",
            Language::Go => "bool",
        };
        Some(TypeInfo::new(
            BuiltinRegistry::concrete_type(ctx.language, bool_name),
            source::LITERAL,
            self.name(),
        ))
    }
}

/// §4.3.6 - `x = self.attr`: copy whatever the attribute registry
/// currently knows about that attribute on the enclosing class.
pub struct SelfReferenceStrategy;
impl Strategy for SelfReferenceStrategy {
    fn name(&self) -> &'static str {
        "self_reference"
    }
    fn priority(&self) -> u8 {
        90
    }
    fn can_handle(&self, assignment: &RawAssignment) -> bool {
        matches!(&assignment.rhs, RhsKind::Attribute { base, .. } if base == "self")
    }
    fn synthesize(&self, ctx: &InferenceContext, assignment: &RawAssignment) -> Option<TypeInfo> {
        let RhsKind::Attribute { base, attr } = &assignment.rhs else {
            return None;
        };
        if base != "self" {
            return None;
        }
        let owner = owner_class_of(&assignment.function_qualified_name)?;
        match ctx.attributes.get_attribute(&owner, attr) {
            Some(existing) => Some(TypeInfo::new(
                existing.ty,
                combine_sequential(source::ATTRIBUTE, existing.confidence),
                self.name(),
            )),
            None => Some(TypeInfo::any_because("attribute not found", self.name())),
        }
    }
}

/// §4.3.5 - a multi-step dotted/call chain (`a.b.c.method()`,
/// `Builder().x().y()`), walked one [`ChainStep`] at a time. Confidences
/// fold multiplicatively across steps (§3.3); the walk aborts to `Any` if it
/// runs past `max_chain_depth` steps or the folded confidence drops below
/// `min_chain_confidence` at any point, whichever comes first.
pub struct ChainStrategy;
impl Strategy for ChainStrategy {
    fn name(&self) -> &'static str {
        "chain"
    }
    fn priority(&self) -> u8 {
        85
    }
    fn can_handle(&self, assignment: &RawAssignment) -> bool {
        matches!(assignment.rhs, RhsKind::Chain(_))
    }
    fn synthesize(&self, ctx: &InferenceContext, assignment: &RawAssignment) -> Option<TypeInfo> {
        let RhsKind::Chain(steps) = &assignment.rhs else {
            return None;
        };
        Some(walk_chain(ctx, assignment, steps))
    }
}

fn walk_chain(ctx: &InferenceContext, assignment: &RawAssignment, steps: &[ChainStep]) -> TypeInfo {
    if steps.len() > ctx.max_chain_depth {
        return TypeInfo::any_because("chain depth exceeded", "chain");
    }
    let Some((first, rest)) = steps.split_first() else {
        return TypeInfo::any_because("empty chain", "chain");
    };
    let mut current = resolve_chain_base(ctx, assignment, first);
    if current.ty.is_any() {
        return current;
    }
    if current.confidence < ctx.min_chain_confidence {
        return TypeInfo::any_because("chain confidence below floor", "chain");
    }
    for step in rest {
        current = step_chain(ctx, &current, step);
        if current.ty.is_any() {
            return current;
        }
        if current.confidence < ctx.min_chain_confidence {
            return TypeInfo::any_because("chain confidence below floor", "chain");
        }
    }
    TypeInfo::new(current.ty, current.confidence, "chain")
}

fn resolve_chain_base(ctx: &InferenceContext, assignment: &RawAssignment, step: &ChainStep) -> TypeInfo {
    match step {
        ChainStep::Identifier(name) if name == "self" => match owner_class_of(&assignment.function_qualified_name) {
            Some(owner) => TypeInfo::new(Type::Concrete(owner), source::ANNOTATION, "chain"),
            None => TypeInfo::any_because("self outside a method", "chain"),
        },
        ChainStep::Identifier(name) => match ctx.types.get_variable(&assignment.function_qualified_name, name) {
            Some(existing) => existing,
            None => TypeInfo::any_because("unresolved chain base", "chain"),
        },
        ChainStep::Instantiation { class_name, .. } => resolve_instantiation(ctx, class_name),
        ChainStep::Attribute(_) | ChainStep::MethodCall { .. } => {
            TypeInfo::any_because("chain does not start with a base", "chain")
        }
    }
}

/// Shared between the chain walker's base step and [`InstanceCallStrategy`]'s
/// uppercase-callee receiver: an unresolved (unknown to `CallableIndex`)
/// capitalized name still gets the constructor heuristic outside a chain,
/// but only the weaker fluent-heuristic confidence when folded as one hop of
/// a longer chain — `0.70^3 ≈ 0.33` is what keeps a three-hop unresolved
/// builder chain (§8.4.2) from landing at near-certain confidence.
fn resolve_instantiation(ctx: &InferenceContext, class_name: &str) -> TypeInfo {
    if let Some(fqn) = ctx.callables.class_candidates(class_name).first() {
        return TypeInfo::new(Type::Concrete(fqn.clone()), source::CONSTRUCTOR, "chain");
    }
    if BuiltinRegistry::is_builtin(ctx.language, class_name) {
        return TypeInfo::new(BuiltinRegistry::concrete_type(ctx.language, class_name), source::CONSTRUCTOR, "chain");
    }
    TypeInfo::new(Type::Variable(format!("class:{class_name}")), source::FLUENT_HEURISTIC, "chain")
}

fn step_chain(ctx: &InferenceContext, current: &TypeInfo, step: &ChainStep) -> TypeInfo {
    match step {
        ChainStep::Attribute(attr) => {
            let Type::Concrete(fqn) = &current.ty else {
                return TypeInfo::any_because("attribute not found", "chain");
            };
            match ctx.attributes.get_attribute(fqn, attr) {
                Some(found) => TypeInfo::new(found.ty, combine_sequential(current.confidence, found.confidence), "chain"),
                None => TypeInfo::any_because("attribute not found", "chain"),
            }
        }
        ChainStep::MethodCall { name, .. } => {
            let fqn = match &current.ty {
                Type::Concrete(fqn) => fqn.as_str(),
                _ => return chain_method_fallback(ctx, "", name, current.confidence),
            };
            chain_method_fallback(ctx, fqn, name, current.confidence)
        }
        // Only ever the first step; walk_chain never reaches here with these.
        ChainStep::Identifier(_) | ChainStep::Instantiation { .. } => current.clone(),
    }
}

/// A chain's method-call step never produces `Any` (§4.3.5) — unlike
/// [`instance_call_method_return`], which has a "method not found" case, a
/// chain link that isn't a known builtin or indexed method just falls all
/// the way through to the fluent heuristic.
fn chain_method_fallback(ctx: &InferenceContext, fqn: &str, method: &str, receiver_confidence: f64) -> TypeInfo {
    if let Some(returns) = builtin_method_return(ctx, fqn, method) {
        return TypeInfo::new(returns, combine_sequential(receiver_confidence, source::RETURN_TYPE), "chain");
    }
    let candidates = ctx.callables.function_candidates(method);
    let qualified = format!("{fqn}.{method}");
    if let Some(function) = candidates.iter().find(|f| f.qualified_name == qualified) {
        if let Some(ty) = annotated_return(function) {
            return TypeInfo::new(ty, combine_sequential(receiver_confidence, source::RETURN_TYPE), "chain");
        }
    }
    TypeInfo::new(
        Type::Variable(format!("call:{qualified}")),
        combine_sequential(receiver_confidence, source::FLUENT_HEURISTIC),
        "chain",
    )
}

fn builtin_method_return(ctx: &InferenceContext, fqn: &str, method: &str) -> Option<Type> {
    let bare = BuiltinRegistry::strip_namespace(ctx.language, fqn)?;
    let returns = BuiltinRegistry::method_return_type(ctx.language, bare, method)?;
    Some(if BuiltinRegistry::is_builtin(ctx.language, returns) {
        BuiltinRegistry::concrete_type(ctx.language, returns)
    } else {
        Type::Concrete(returns.to_string())
    })
}

fn annotated_return(function: &crate::extractor::RawFunction) -> Option<Type> {
    let return_type = function.return_type_annotation.as_ref()?;
    let first = return_type.split(',').next().unwrap_or(return_type).trim();
    (!first.is_empty()).then(|| Type::Concrete(first.to_string()))
}

/// §4.3.7 - `x = obj.method(...)`: resolve the receiver's own type first
/// (store lookup for a bare identifier, constructor heuristic for a
/// capitalized callee, `self` to the owner class), then dispatch to the
/// builtin registry or a fluent-heuristic "the class registers this method"
/// check, and only then give up with reason "method not found".
pub struct InstanceCallStrategy;
impl Strategy for InstanceCallStrategy {
    fn name(&self) -> &'static str {
        "instance_call"
    }
    fn priority(&self) -> u8 {
        80
    }
    fn can_handle(&self, assignment: &RawAssignment) -> bool {
        matches!(&assignment.rhs, RhsKind::Call { callee } if callee.contains('.'))
    }
    fn synthesize(&self, ctx: &InferenceContext, assignment: &RawAssignment) -> Option<TypeInfo> {
        let RhsKind::Call { callee } = &assignment.rhs else {
            return None;
        };
        let (receiver_text, method) = callee.rsplit_once('.')?;
        let receiver = resolve_receiver(ctx, assignment, receiver_text);
        Some(instance_call_method_return(ctx, &receiver, method))
    }
}

fn resolve_receiver(ctx: &InferenceContext, assignment: &RawAssignment, receiver: &str) -> TypeInfo {
    if receiver == "self" {
        return match owner_class_of(&assignment.function_qualified_name) {
            Some(owner) => TypeInfo::new(Type::Concrete(owner), source::ANNOTATION, "instance_call"),
            None => TypeInfo::any_because("method not found", "instance_call"),
        };
    }
    let starts_uppercase = receiver.chars().next().is_some_and(|c| c.is_uppercase());
    if starts_uppercase && !receiver.contains('.') {
        return resolve_instantiation(ctx, receiver);
    }
    if !receiver.contains('.') {
        return match ctx.types.get_variable(&assignment.function_qualified_name, receiver) {
            Some(existing) => existing,
            None => TypeInfo::any_because("method not found", "instance_call"),
        };
    }
    // A dotted receiver not already captured as `RhsKind::Chain` upstream —
    // only reachable when its own base is a call to an unresolvable
    // lowercase function. Narrow, known limitation: resolve just the first
    // segment rather than re-walking the whole expression.
    let first = receiver.split('.').next().unwrap_or(receiver);
    match ctx.types.get_variable(&assignment.function_qualified_name, first) {
        Some(existing) => existing,
        None => TypeInfo::any_because("method not found", "instance_call"),
    }
}

fn instance_call_method_return(ctx: &InferenceContext, receiver: &TypeInfo, method: &str) -> TypeInfo {
    let Type::Concrete(fqn) = &receiver.ty else {
        return TypeInfo::any_because("method not found", "instance_call");
    };
    if let Some(ty) = builtin_method_return(ctx, fqn, method) {
        return TypeInfo::new(ty, receiver.confidence * 0.9, "instance_call");
    }
    let qualified = format!("{fqn}.{method}");
    if let Some(function) = ctx.callables.function_candidates(method).iter().find(|f| f.qualified_name == qualified) {
        let ty = annotated_return(function).unwrap_or_else(|| Type::Variable(format!("call:{qualified}")));
        return TypeInfo::new(ty, receiver.confidence * source::FLUENT_HEURISTIC, "instance_call");
    }
    TypeInfo::any_because("method not found", "instance_call")
}

/// §4.3.8 - `x = function(...)`: resolve a plain function call by name.
pub struct FunctionCallStrategy;
impl Strategy for FunctionCallStrategy {
    fn name(&self) -> &'static str {
        "function_call"
    }
    fn priority(&self) -> u8 {
        60
    }
    fn can_handle(&self, assignment: &RawAssignment) -> bool {
        matches!(&assignment.rhs, RhsKind::Call { callee } if !callee.contains('.'))
    }
    fn synthesize(&self, ctx: &InferenceContext, assignment: &RawAssignment) -> Option<TypeInfo> {
        let RhsKind::Call { callee } = &assignment.rhs else {
            return None;
        };
        if callee.contains('.') {
            return None;
        }
        resolve_call_return(ctx, callee, callee, self.name())
    }
}

fn resolve_call_return(
    ctx: &InferenceContext,
    simple_name: &str,
    full_callee: &str,
    strategy_name: &'static str,
) -> Option<TypeInfo> {
    let candidates = ctx.callables.function_candidates(simple_name);
    if let Some(function) = candidates.first() {
        if let Some(ty) = annotated_return(function) {
            return Some(TypeInfo::new(ty, source::RETURN_TYPE, strategy_name));
        }
    }
    Some(TypeInfo::new(
        Type::Variable(format!("call:{full_callee}")),
        source::RETURN_TYPE,
        strategy_name,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::RawParameter;
    use crate::inference::context::CallableIndex;
    use crate::location::SourceLocation;
    use crate::registry::{AttributeRegistry, ModuleRegistry};
    use crate::type_store::TypeStore;

    fn ctx<'a>(
        modules: &'a ModuleRegistry,
        attributes: &'a AttributeRegistry,
        types: &'a TypeStore,
        callables: &'a CallableIndex,
    ) -> InferenceContext<'a> {
        InferenceContext {
            language: Language::Python,
            modules,
            attributes,
            types,
            callables,
            max_chain_depth: 10,
            min_chain_confidence: 0.3,
        }
    }

    fn assignment(rhs: RhsKind) -> RawAssignment {
        RawAssignment {
            function_qualified_name: "pkg.mod.main".to_string(),
            target: "x".to_string(),
            owner_class: None,
            type_annotation: None,
            rhs,
            location: SourceLocation::new(1, 0),
        }
    }

    #[test]
    fn literal_strategy_infers_namespaced_builtin_type() {
        let (modules, attributes, types, callables) =
            (ModuleRegistry::new(), AttributeRegistry::new(), TypeStore::new(), CallableIndex::new());
        let c = ctx(&modules, &attributes, &types, &callables);
        let a = assignment(RhsKind::Literal { type_hint: "int".to_string() });
        let info = LiteralStrategy.synthesize(&c, &a).expect("literal matches");
        assert_eq!(info.ty, Type::Concrete("builtins.int".to_string()));
        assert_eq!(info.confidence, source::LITERAL);
    }

    #[test]
    fn literal_strategy_maps_none_sentinel_to_the_none_type() {
        let (modules, attributes, types, callables) =
            (ModuleRegistry::new(), AttributeRegistry::new(), TypeStore::new(), CallableIndex::new());
        let c = ctx(&modules, &attributes, &types, &callables);
        let a = assignment(RhsKind::Literal { type_hint: "None".to_string() });
        let info = LiteralStrategy.synthesize(&c, &a).expect("literal matches");
        assert_eq!(info.ty, Type::None);
    }

    #[test]
    fn class_instantiation_resolves_known_class() {
        let (modules, attributes, types) = (ModuleRegistry::new(), AttributeRegistry::new(), TypeStore::new());
        let mut callables = CallableIndex::new();
        callables.add_class("Greeter", "pkg.mod.Greeter");
        let c = ctx(&modules, &attributes, &types, &callables);
        let a = assignment(RhsKind::Call { callee: "Greeter".to_string() });
        let info = ClassInstantiationStrategy.synthesize(&c, &a).expect("matches");
        assert_eq!(info.ty, Type::Concrete("pkg.mod.Greeter".to_string()));
    }

    #[test]
    fn class_instantiation_defers_unknown_capitalized_name() {
        let (modules, attributes, types, callables) =
            (ModuleRegistry::new(), AttributeRegistry::new(), TypeStore::new(), CallableIndex::new());
        let c = ctx(&modules, &attributes, &types, &callables);
        let a = assignment(RhsKind::Call { callee: "Mystery".to_string() });
        let info = ClassInstantiationStrategy.synthesize(&c, &a).expect("matches as placeholder");
        assert_eq!(info.ty, Type::Variable("class:Mystery".to_string()));
        assert_eq!(info.confidence, source::CONSTRUCTOR);
    }

    #[test]
    fn class_instantiation_does_not_fire_for_lowercase_call() {
        let (modules, attributes, types, callables) =
            (ModuleRegistry::new(), AttributeRegistry::new(), TypeStore::new(), CallableIndex::new());
        let c = ctx(&modules, &attributes, &types, &callables);
        let a = assignment(RhsKind::Call { callee: "compute".to_string() });
        assert!(ClassInstantiationStrategy.synthesize(&c, &a).is_none());
    }

    #[test]
    fn constructor_parameter_copies_param_annotation() {
        let (modules, attributes, types) = (ModuleRegistry::new(), AttributeRegistry::new(), TypeStore::new());
        let mut callables = CallableIndex::new();
        callables.add_function(crate::extractor::RawFunction {
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
        let c = ctx(&modules, &attributes, &types, &callables);
        let mut a = assignment(RhsKind::NameRef { name: "name".to_string() });
        a.function_qualified_name = "pkg.mod.Greeter.__init__".to_string();
        a.owner_class = Some("pkg.mod.Greeter".to_string());
        let info = ConstructorParameterStrategy.synthesize(&c, &a).expect("matches");
        assert_eq!(info.ty, Type::Concrete("str".to_string()));
        assert_eq!(info.confidence, source::ANNOTATION);
    }

    #[test]
    fn boolean_operator_strategy_always_yields_bool() {
        let (modules, attributes, types, callables) =
            (ModuleRegistry::new(), AttributeRegistry::new(), TypeStore::new(), CallableIndex::new());
        let c = ctx(&modules, &attributes, &types, &callables);
        let a = assignment(RhsKind::BooleanExpr);
        let info = BooleanOperatorStrategy.synthesize(&c, &a).expect("matches");
        assert_eq!(info.ty, Type::Concrete("builtins.bool".to_string()));
    }

    #[test]
    fn self_reference_copies_known_attribute_with_combined_confidence() {
        let (modules, types) = (ModuleRegistry::new(), TypeStore::new());
        let attributes = AttributeRegistry::new();
        attributes.set_attribute(
            "pkg.mod.Greeter",
            "name",
            TypeInfo::new(Type::Concrete("str".into()), source::LITERAL, "literal"),
        );
        let callables = CallableIndex::new();
        let c = ctx(&modules, &attributes, &types, &callables);
        let mut a = assignment(RhsKind::Attribute {
            base: "self".to_string(),
            attr: "name".to_string(),
        });
        a.function_qualified_name = "pkg.mod.Greeter.greet".to_string();
        let info = SelfReferenceStrategy.synthesize(&c, &a).expect("matches");
        assert_eq!(info.ty, Type::Concrete("str".to_string()));
        assert_eq!(info.confidence, source::ATTRIBUTE * source::LITERAL);
    }

    #[test]
    fn self_reference_reports_reason_for_unknown_attribute() {
        let (modules, types, callables) = (ModuleRegistry::new(), TypeStore::new(), CallableIndex::new());
        let attributes = AttributeRegistry::new();
        let c = ctx(&modules, &attributes, &types, &callables);
        let mut a = assignment(RhsKind::Attribute {
            base: "self".to_string(),
            attr: "mystery".to_string(),
        });
        a.function_qualified_name = "pkg.mod.Greeter.greet".to_string();
        let info = SelfReferenceStrategy.synthesize(&c, &a).expect("matches with a reason");
        assert_eq!(info.ty, Type::Any(Some("attribute not found")));
    }

    #[test]
    fn chain_strategy_resolves_self_attribute_method_call() {
        // self.name.upper() on a class whose `name` attribute is `str`.
        let (modules, types, callables) = (ModuleRegistry::new(), TypeStore::new(), CallableIndex::new());
        let attributes = AttributeRegistry::new();
        attributes.set_attribute(
            "pkg.mod.Greeter",
            "name",
            TypeInfo::new(Type::Concrete("builtins.str".into()), source::LITERAL, "literal"),
        );
        let c = ctx(&modules, &attributes, &types, &callables);
        let mut a = assignment(RhsKind::Chain(vec![
            ChainStep::Identifier("self".to_string()),
            ChainStep::Attribute("name".to_string()),
            ChainStep::MethodCall { name: "upper".to_string(), arg_count: 0 },
        ]));
        a.function_qualified_name = "pkg.mod.Greeter.greet".to_string();
        let info = ChainStrategy.synthesize(&c, &a).expect("matches");
        assert_eq!(info.ty, Type::Concrete("builtins.str".to_string()));
    }

    #[test]
    fn chain_strategy_folds_unresolved_builder_confidence_toward_a_third() {
        // result = B().x().y() — B is an unknown capitalized name.
        let (modules, attributes, types, callables) =
            (ModuleRegistry::new(), AttributeRegistry::new(), TypeStore::new(), CallableIndex::new());
        let c = ctx(&modules, &attributes, &types, &callables);
        let a = assignment(RhsKind::Chain(vec![
            ChainStep::Instantiation { class_name: "B".to_string(), arg_count: 0 },
            ChainStep::MethodCall { name: "x".to_string(), arg_count: 0 },
            ChainStep::MethodCall { name: "y".to_string(), arg_count: 0 },
        ]));
        let info = ChainStrategy.synthesize(&c, &a).expect("matches");
        match &info.ty {
            Type::Variable(encoded) => assert!(encoded.ends_with(".B") || encoded == "class:B" || encoded.contains("B")),
            other => panic!("expected an unresolved placeholder ending in B, got {other:?}"),
        }
        assert!((info.confidence - 0.343).abs() < 0.01, "confidence was {}", info.confidence);
    }

    #[test]
    fn chain_strategy_aborts_past_max_depth() {
        let (modules, attributes, types, callables) =
            (ModuleRegistry::new(), AttributeRegistry::new(), TypeStore::new(), CallableIndex::new());
        let mut c = ctx(&modules, &attributes, &types, &callables);
        c.max_chain_depth = 2;
        let a = assignment(RhsKind::Chain(vec![
            ChainStep::Identifier("self".to_string()),
            ChainStep::Attribute("a".to_string()),
            ChainStep::Attribute("b".to_string()),
        ]));
        let info = ChainStrategy.synthesize(&c, &a).expect("matches with a reason");
        assert_eq!(info.ty, Type::Any(Some("chain depth exceeded")));
    }

    #[test]
    fn instance_call_resolves_builtin_method_return_type() {
        let (modules, attributes, types) = (ModuleRegistry::new(), AttributeRegistry::new(), TypeStore::new());
        types.set_variable(
            "pkg.mod.main",
            "name",
            TypeInfo::new(Type::Concrete("builtins.str".into()), source::LITERAL, "literal"),
        );
        let callables = CallableIndex::new();
        let c = ctx(&modules, &attributes, &types, &callables);
        let a = assignment(RhsKind::Call { callee: "name.upper".to_string() });
        let info = InstanceCallStrategy.synthesize(&c, &a).expect("matches");
        assert_eq!(info.ty, Type::Concrete("builtins.str".to_string()));
    }

    #[test]
    fn instance_call_resolves_by_receiver_class_method() {
        let (modules, attributes, types) = (ModuleRegistry::new(), AttributeRegistry::new(), TypeStore::new());
        types.set_variable(
            "pkg.mod.main",
            "g",
            TypeInfo::new(Type::Concrete("pkg.mod.Greeter".into()), source::CONSTRUCTOR, "class_instantiation"),
        );
        let mut callables = CallableIndex::new();
        callables.add_function(crate::extractor::RawFunction {
            name: "greet".to_string(),
            qualified_name: "pkg.mod.Greeter.greet".to_string(),
            params: vec![],
            receiver: Some("self".to_string()),
            return_type_annotation: Some("str".to_string()),
            location: SourceLocation::new(1, 0),
        });
        let c = ctx(&modules, &attributes, &types, &callables);
        let a = assignment(RhsKind::Call { callee: "g.greet".to_string() });
        let info = InstanceCallStrategy.synthesize(&c, &a).expect("matches");
        assert_eq!(info.ty, Type::Concrete("str".to_string()));
    }

    #[test]
    fn instance_call_gives_up_with_reason_when_receiver_is_unresolved() {
        let (modules, attributes, types, callables) =
            (ModuleRegistry::new(), AttributeRegistry::new(), TypeStore::new(), CallableIndex::new());
        let c = ctx(&modules, &attributes, &types, &callables);
        let a = assignment(RhsKind::Call { callee: "mystery.frobnicate".to_string() });
        let info = InstanceCallStrategy.synthesize(&c, &a).expect("matches with a reason");
        assert_eq!(info.ty, Type::Any(Some("method not found")));
    }

    #[test]
    fn function_call_defers_to_placeholder_when_unindexed() {
        let (modules, attributes, types, callables) =
            (ModuleRegistry::new(), AttributeRegistry::new(), TypeStore::new(), CallableIndex::new());
        let c = ctx(&modules, &attributes, &types, &callables);
        let a = assignment(RhsKind::Call { callee: "compute".to_string() });
        let info = FunctionCallStrategy.synthesize(&c, &a).expect("matches as placeholder");
        assert_eq!(info.ty, Type::Variable("call:compute".to_string()));
    }
}
