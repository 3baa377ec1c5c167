//! The strategy trait and a priority-ordered registry of them (§4.3.1).
//! Priority is a construction-order concern only: strategies are tried
//! highest-priority first and the first one to return `Some` wins. No
//! strategy consults another strategy's result, only the shared registries
//! in [`InferenceContext`].

use crate::extractor::RawAssignment;
use crate::inference::context::InferenceContext;
use crate::ty::{Type, TypeInfo};

/// One recognizable assignment shape and the confidence it's entitled to
/// claim. Implementors are stateless; all state lives in the shared
/// registries passed through [`InferenceContext`].
///
/// Synthesize is forward: given an assignment, produce its type. Check is
/// backward: given an assignment and an expected type, does this strategy's
/// own synthesized answer agree with it? Most callers only need synthesize;
/// check exists for callers (e.g. a redundant-annotation lint) that already
/// have an expected type in hand and want to validate it rather than derive
/// a fresh one.
pub trait Strategy: Send + Sync {
    /// Stable name recorded on the [`TypeInfo`] this strategy produces,
    /// used for diagnostics only.
    fn name(&self) -> &'static str;

    /// Higher runs first. Ties are broken by registration order.
    fn priority(&self) -> u8;

    /// Coarse shape check: does this assignment even look like something
    /// this strategy handles? Mirrors the early-return guard at the top of
    /// `synthesize`, so a caller can filter candidates without actually
    /// running inference.
    fn can_handle(&self, assignment: &RawAssignment) -> bool;

    /// Attempt to infer a type for this assignment. `None` means "not my
    /// shape", not "inference failed" — a genuine failure is
    /// `Some(TypeInfo::any(..))`.
    fn synthesize(&self, ctx: &InferenceContext, assignment: &RawAssignment) -> Option<TypeInfo>;

    /// Does this strategy's own synthesized type agree with `expected`?
    /// `Any` on either side is treated as compatible (an unresolved type
    /// can't contradict anything). Strategies that need a different
    /// compatibility rule can override this; none currently do.
    fn check(&self, ctx: &InferenceContext, assignment: &RawAssignment, expected: &Type) -> bool {
        match self.synthesize(ctx, assignment) {
            Some(info) => types_compatible(&info.ty, expected),
            None => false,
        }
    }
}

/// Structural equality, except `Any` is compatible with anything (§3.1 —
/// `Any` means "no opinion", not "definitely not this").
pub fn types_compatible(a: &Type, b: &Type) -> bool {
    a.is_any() || b.is_any() || a == b
}

/// An ordered list of strategies, tried in priority order until one
/// matches.
pub struct StrategyRegistry {
    strategies: Vec<Box<dyn Strategy>>,
}

impl StrategyRegistry {
    pub fn new(mut strategies: Vec<Box<dyn Strategy>>) -> Self {
        strategies.sort_by(|a, b| b.priority().cmp(&a.priority()));
        Self { strategies }
    }

    /// The full, priority-ordered set of strategies described in §4.3.
    pub fn default_strategies() -> Self {
        use crate::inference::strategies::*;
        Self::new(vec![
            Box::new(AnnotationStrategy),
            Box::new(SelfReferenceStrategy),
            Box::new(ChainStrategy),
            Box::new(InstanceCallStrategy),
            Box::new(ConstructorParameterStrategy),
            Box::new(ClassInstantiationStrategy),
            Box::new(LiteralStrategy),
            Box::new(FunctionCallStrategy),
            Box::new(BooleanOperatorStrategy),
        ])
    }

    /// Run every strategy in priority order, returning the first match or
    /// `None` if nothing recognized this assignment's shape at all (the
    /// caller decides whether that becomes `Type::Any` or stays
    /// unresolved).
    pub fn infer(&self, ctx: &InferenceContext, assignment: &RawAssignment) -> Option<TypeInfo> {
        self.strategies.iter().find_map(|s| s.synthesize(ctx, assignment))
    }
}
