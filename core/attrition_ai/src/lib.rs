//! Attrition risk assessment
//!
//! Wires the feature encoder to an opaque classifier and turns the
//! positive-class probability into a [`RiskLabel`] with guidance and a summary
//! of the submitted values.

pub mod decision;
pub mod guidance;
pub mod pipeline;
pub mod summary;

pub use decision::{decide, Decision, DecisionError, DecisionThreshold, RiskLabel};
pub use guidance::{guidance_for, Guidance};
pub use pipeline::{assess, Assessment, Predictor, StartupError};
pub use summary::{InputSummary, SummaryBar};
