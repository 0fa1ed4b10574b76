mod membership;
mod policy;
mod rules;

pub use membership::{breakpoints, degree, fuzzify};
pub use policy::{decide, Defuzzification, ACCEPTANCE_THRESHOLD};
pub use rules::{fire_rules, Consequent, FiredRule, Rule, ACCEPTANCE_RULES, REJECTION_RULES};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{CriterionScores, Decision};

/// Stateless fuzzy evaluator over the fixed acceptance and rejection tables.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyCreditEngine {
    acceptance: &'static [Rule],
    rejection: &'static [Rule],
}

impl Default for FuzzyCreditEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl FuzzyCreditEngine {
    pub fn standard() -> Self {
        Self {
            acceptance: &ACCEPTANCE_RULES,
            rejection: &REJECTION_RULES,
        }
    }

    pub fn acceptance_rules(&self) -> &'static [Rule] {
        self.acceptance
    }

    pub fn rejection_rules(&self) -> &'static [Rule] {
        self.rejection
    }

    pub fn evaluate(&self, scores: &CriterionScores) -> EvaluationResult {
        let accepted = fire_rules(scores, self.acceptance);
        let rejected = fire_rules(scores, self.rejection);
        let outcome = decide(&accepted, &rejected);

        debug!(
            accept_fired = accepted.len(),
            reject_fired = rejected.len(),
            z = outcome.z,
            decision = outcome.decision.label(),
            "credit evaluation complete"
        );

        EvaluationResult {
            scores: *scores,
            accepted,
            rejected,
            outcome,
        }
    }
}

/// Full trail of one evaluation: fired rules per class and the defuzzified outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub scores: CriterionScores,
    pub accepted: Vec<FiredRule>,
    pub rejected: Vec<FiredRule>,
    #[serde(flatten)]
    pub outcome: Defuzzification,
}

impl EvaluationResult {
    pub fn decision(&self) -> Decision {
        self.outcome.decision
    }

    pub fn z(&self) -> f64 {
        self.outcome.z
    }

    pub fn summary(&self) -> String {
        format!(
            "{} (z = {:.2}, {} acceptance / {} rejection rule(s) fired)",
            self.outcome.decision.label(),
            self.outcome.z,
            self.accepted.len(),
            self.rejected.len()
        )
    }
}
