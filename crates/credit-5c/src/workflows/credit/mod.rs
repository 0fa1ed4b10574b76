//! 5C credit evaluation: score intake, fuzzy inference, and the HTTP surface.

pub mod batch;
pub mod domain;
pub mod evaluation;
pub mod intake;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use batch::{ApplicantScores, ScoreBatchImporter};
pub use domain::{Criterion, CriterionScores, Decision, ScoreError, CRITERIA_COUNT};
pub use evaluation::{
    decide, degree, fire_rules, fuzzify, Consequent, Defuzzification, EvaluationResult,
    FiredRule, FuzzyCreditEngine, Rule, ACCEPTANCE_RULES, ACCEPTANCE_THRESHOLD, REJECTION_RULES,
};
pub use intake::{ComponentRatings, ComponentSpec, IntakeError, COMPONENTS};
pub use router::credit_router;
pub use service::{Assessment, BatchEntry, CreditEvaluationService, DEFAULT_BATCH_LIMIT};
