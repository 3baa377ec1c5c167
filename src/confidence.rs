//! The fixed confidence table (§3.1) and the combination rule used when a
//! chain of inferences feeds into one another.

/// Confidence contributed by each inference source, highest first. These
/// values are fixed by design, not configurable — only the chain-depth and
/// confidence-floor cutoffs in [`crate::config::EngineConfig`] are tunable.
pub mod source {
    pub const ANNOTATION: f64 = 1.0;
    pub const LITERAL: f64 = 0.95;
    pub const CONSTRUCTOR: f64 = 0.95;
    pub const RETURN_TYPE: f64 = 0.9;
    pub const ASSIGNMENT: f64 = 0.85;
    pub const ATTRIBUTE: f64 = 0.80;
    pub const FLUENT_HEURISTIC: f64 = 0.70;
    pub const UNKNOWN: f64 = 0.0;
}

/// Combine two confidences from a sequential chain of inferences (e.g. "the
/// variable's type came from an assignment whose RHS was itself inferred at
/// some confidence"). Per §3.1 this is multiplicative, not additive — a
/// chain can only get less certain as it lengthens.
pub fn combine_sequential(a: f64, b: f64) -> f64 {
    a * b
}

/// Fold a chain of confidences left to right with [`combine_sequential`].
/// An empty chain has no information at all and is treated as certain
/// (the identity of multiplication), matching the semantics of folding a
/// single confidence value unchanged.
pub fn combine_chain(confidences: impl IntoIterator<Item = f64>) -> f64 {
    confidences.into_iter().fold(1.0, combine_sequential)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_combination_is_multiplicative() {
        let combined = combine_sequential(source::ASSIGNMENT, source::LITERAL);
        assert!((combined - (0.85 * 0.95)).abs() < f64::EPSILON);
    }

    #[test]
    fn chain_of_one_is_unchanged() {
        assert_eq!(combine_chain([source::RETURN_TYPE]), source::RETURN_TYPE);
    }

    #[test]
    fn longer_chains_never_increase_confidence() {
        let two = combine_chain([source::ASSIGNMENT, source::ATTRIBUTE]);
        let three = combine_chain([source::ASSIGNMENT, source::ATTRIBUTE, source::FLUENT_HEURISTIC]);
        assert!(three <= two);
    }
}
