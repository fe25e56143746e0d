//! Classifier implementations
//!
//! `logistic` and `forest` are read from training artifacts; `fixed` is a
//! deterministic stand-in for exercising the decision path without a model.

pub mod fixed;
pub mod forest;
pub mod logistic;
