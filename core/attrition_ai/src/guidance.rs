//! Retention guidance shown alongside a decision

use serde::Serialize;

use crate::decision::{Decision, RiskLabel};

/// Headline and suggested retention actions for a decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Guidance {
    pub headline: &'static str,
    pub actions: &'static [&'static str],
}

const HIGH_RISK_ACTIONS: [&str; 4] = [
    "Schedule a 1:1 meeting to understand concerns.",
    "Review compensation & benefits.",
    "Evaluate workload and satisfaction.",
    "Discuss career development plans.",
];

const LOW_RISK_ACTIONS: [&str; 4] = [
    "Continue current strategies.",
    "Provide appreciation & feedback.",
    "Offer growth opportunities.",
    "Monitor engagement levels.",
];

pub fn guidance_for(label: RiskLabel) -> Guidance {
    match label {
        RiskLabel::High => Guidance {
            headline: "High Attrition Risk!",
            actions: &HIGH_RISK_ACTIONS,
        },
        RiskLabel::Low => Guidance {
            headline: "Low Attrition Risk",
            actions: &LOW_RISK_ACTIONS,
        },
    }
}

impl Guidance {
    /// Headline line, then the probability to two decimals on its own line
    pub fn banner(&self, decision: &Decision) -> String {
        format!("{}\nProbability: {:.2}", self.headline, decision.probability)
    }
}
