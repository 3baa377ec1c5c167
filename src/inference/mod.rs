//! Type inference (§4.2, §4.3): turns a [`crate::extractor::RawAssignment`]
//! into a [`crate::ty::TypeInfo`] via a priority-ordered registry of
//! strategies, each responsible for one recognizable assignment shape.

pub mod context;
pub mod strategies;
pub mod strategy;

pub use context::{CallableIndex, InferenceContext};
pub use strategy::{Strategy, StrategyRegistry};
