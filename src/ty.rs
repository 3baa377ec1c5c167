//! The language-independent type model (§3.1).
//!
//! Every inference strategy produces a [`TypeInfo`]: a [`Type`], a
//! confidence in `[0.0, 1.0]`, and the strategy name that produced it. The
//! `Type` itself is a small tagged union shared by both the Python and Go
//! extractors, which is what lets the call-graph builder and the inference
//! strategies stay language-agnostic.

use serde::{Deserialize, Serialize};

/// A fully-qualified name, e.g. `pkg.mod.ClassName` or `net/http.Client`.
pub type Fqn = String;

/// The result of one inference: what was inferred, how confident the
/// strategy that produced it was, and which strategy that was (kept for
/// diagnostics and for the §8 testable-property checks, not consulted by
/// any resolution logic).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypeInfo {
    pub ty: Type,
    pub confidence: f64,
    pub strategy: &'static str,
}

impl TypeInfo {
    pub fn new(ty: Type, confidence: f64, strategy: &'static str) -> Self {
        Self {
            ty,
            confidence,
            strategy,
        }
    }

    pub fn any(strategy: &'static str) -> Self {
        Self::new(Type::Any(None), crate::confidence::source::UNKNOWN, strategy)
    }

    /// Same as [`Self::any`], but records why resolution gave up — the
    /// reason strings strategies are required to attach (§3.1), e.g.
    /// `"attribute not found"`, `"method not found"`.
    pub fn any_because(reason: &'static str, strategy: &'static str) -> Self {
        Self::new(Type::Any(Some(reason)), crate::confidence::source::UNKNOWN, strategy)
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(&self.ty, Type::Variable(name) if is_placeholder_encoding(name))
    }
}

/// A deferred reference produced before its target could be resolved.
/// Pass 5 rewrites these in place once the rest of the project has been
/// indexed. The four prefixes are the complete encoding; anything else
/// inside `Type::Variable` is a genuine (non-placeholder) type variable.
pub fn is_placeholder_encoding(name: &str) -> bool {
    name.starts_with("class:")
        || name.starts_with("call:")
        || name.starts_with("param:")
        || name.starts_with("attr:")
}

/// The type sum itself. `Union` is always canonicalized on construction
/// (see [`Type::union`]) so equality and the invariants in §3.3/§8.1 hold
/// without every call site re-deriving them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Type {
    /// A concrete, fully-qualified type, e.g. a resolved class or struct.
    Concrete(Fqn),
    /// A placeholder awaiting resolution, or a genuine type variable if it
    /// does not match one of the four placeholder prefixes.
    Variable(String),
    /// Two or more distinct concrete possibilities. Never nests, never
    /// contains a duplicate FQN, never contains `Any`, and is never a
    /// singleton — construct via [`Type::union`] to keep those guarantees.
    Union(Vec<Fqn>),
    /// The Python `None` / absence of a value.
    None,
    /// Top type: unknown, or deliberately erased (e.g. past the chain-depth
    /// or confidence-floor cutoff). Carries why, when a strategy gave up
    /// rather than never having an opinion at all (`None`).
    Any(Option<&'static str>),
    /// A callable's shape, used when the callable itself (not its result)
    /// is the value being tracked, e.g. a function passed as an argument.
    Function(FunctionType),
}

impl Type {
    /// Build a union from a set of FQNs, applying the canonicalization
    /// rules from §3.3: dedup, flatten nested unions, drop to a bare
    /// `Concrete` if only one member remains, collapse to `Any` if any
    /// member is `Any` (handled by [`Type::union_with`] instead — this
    /// constructor only ever sees concrete FQNs).
    pub fn union(members: impl IntoIterator<Item = Fqn>) -> Type {
        let mut seen = Vec::new();
        for fqn in members {
            if !seen.contains(&fqn) {
                seen.push(fqn);
            }
        }
        match seen.len() {
            0 => Type::Any(None),
            1 => Type::Concrete(seen.into_iter().next().unwrap()),
            _ => Type::Union(seen),
        }
    }

    /// Merge two already-canonical types into one canonical type, used when
    /// a variable is assigned from two different branches. Flattens nested
    /// unions and collapses to `Any` if either side is `Any`.
    pub fn union_with(self, other: Type) -> Type {
        match (self, other) {
            (Type::Any(reason), _) | (_, Type::Any(reason)) => Type::Any(reason),
            (Type::None, Type::None) => Type::None,
            (a, b) => {
                let mut members = Vec::new();
                flatten_into(a, &mut members);
                flatten_into(b, &mut members);
                Type::union(members)
            }
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Type::Any(_))
    }
}

fn flatten_into(ty: Type, out: &mut Vec<Fqn>) {
    match ty {
        Type::Concrete(fqn) => out.push(fqn),
        Type::Union(members) => out.extend(members),
        Type::Variable(v) => out.push(format!("?{v}")),
        Type::None => out.push("None".to_string()),
        Type::Function(f) => out.push(format!("fn({})", f.name)),
        Type::Any(_) => {}
    }
}

/// A callable's recorded shape. Generic specialization is out of scope
/// (§1 non-goals) — type parameters are kept as opaque strings for
/// display, never substituted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionType {
    pub name: Fqn,
    pub type_params: Vec<String>,
    pub return_type: Option<Box<Type>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_dedups_by_fqn() {
        let ty = Type::union(["pkg.A".to_string(), "pkg.A".to_string(), "pkg.B".to_string()]);
        assert_eq!(ty, Type::Union(vec!["pkg.A".to_string(), "pkg.B".to_string()]));
    }

    #[test]
    fn union_of_one_collapses_to_concrete() {
        let ty = Type::union(["pkg.A".to_string()]);
        assert_eq!(ty, Type::Concrete("pkg.A".to_string()));
    }

    #[test]
    fn union_with_flattens_nested_unions() {
        let a = Type::Union(vec!["pkg.A".to_string(), "pkg.B".to_string()]);
        let b = Type::Concrete("pkg.C".to_string());
        let merged = a.union_with(b);
        match merged {
            Type::Union(members) => {
                assert_eq!(members, vec!["pkg.A", "pkg.B", "pkg.C"]);
            }
            other => panic!("expected a flattened union, got {other:?}"),
        }
    }

    #[test]
    fn union_with_any_collapses_to_any() {
        let a = Type::Concrete("pkg.A".to_string());
        assert_eq!(a.union_with(Type::Any(Some("method not found"))), Type::Any(Some("method not found")));
    }

    #[test]
    fn placeholder_prefixes_are_recognized() {
        assert!(is_placeholder_encoding("class:Foo"));
        assert!(is_placeholder_encoding("call:bar"));
        assert!(is_placeholder_encoding("param:x"));
        assert!(is_placeholder_encoding("attr:y"));
        assert!(!is_placeholder_encoding("T"));
    }

    #[test]
    fn type_info_any_has_unknown_confidence() {
        let info = TypeInfo::any("fallback");
        assert_eq!(info.ty, Type::Any(None));
        assert_eq!(info.confidence, 0.0);
    }

    #[test]
    fn any_because_carries_its_reason() {
        let info = TypeInfo::any_because("attribute not found", "self_reference");
        assert_eq!(info.ty, Type::Any(Some("attribute not found")));
    }
}
