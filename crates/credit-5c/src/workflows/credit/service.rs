use std::io::Read;

use serde::Serialize;
use tracing::warn;

use super::batch::{ApplicantScores, ScoreBatchImporter};
use super::domain::CriterionScores;
use super::evaluation::{EvaluationResult, FuzzyCreditEngine};
use super::intake::{ComponentRatings, IntakeError};

/// Default cap on applicants accepted in one batch.
pub const DEFAULT_BATCH_LIMIT: usize = 500;

/// Facade combining intake normalization with the fuzzy engine.
#[derive(Debug, Clone)]
pub struct CreditEvaluationService {
    engine: FuzzyCreditEngine,
    batch_limit: usize,
}

impl Default for CreditEvaluationService {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_LIMIT)
    }
}

impl CreditEvaluationService {
    pub fn new(batch_limit: usize) -> Self {
        Self {
            engine: FuzzyCreditEngine::standard(),
            batch_limit,
        }
    }

    pub fn engine(&self) -> &FuzzyCreditEngine {
        &self.engine
    }

    pub fn batch_limit(&self) -> usize {
        self.batch_limit
    }

    pub fn evaluate(&self, scores: &CriterionScores) -> EvaluationResult {
        self.engine.evaluate(scores)
    }

    /// Normalize component ratings, then evaluate the resulting scores.
    pub fn assess(&self, ratings: &ComponentRatings) -> Result<Assessment, IntakeError> {
        let scores = ratings.normalize().inspect_err(|error| {
            warn!(%error, "rejected component ratings");
        })?;
        let evaluation = self.engine.evaluate(&scores);
        Ok(Assessment { scores, evaluation })
    }

    /// Import a CSV batch and evaluate every applicant in file order.
    pub fn evaluate_batch<R: Read>(&self, reader: R) -> Result<Vec<BatchEntry>, IntakeError> {
        let applicants = ScoreBatchImporter::from_reader(reader).inspect_err(|error| {
            warn!(%error, "rejected score batch");
        })?;
        self.evaluate_applicants(applicants)
    }

    pub fn evaluate_applicants(
        &self,
        applicants: Vec<ApplicantScores>,
    ) -> Result<Vec<BatchEntry>, IntakeError> {
        if applicants.len() > self.batch_limit {
            return Err(IntakeError::BatchTooLarge {
                size: applicants.len(),
                limit: self.batch_limit,
            });
        }

        Ok(applicants
            .into_iter()
            .map(|ApplicantScores { applicant, scores }| BatchEntry {
                applicant,
                evaluation: self.engine.evaluate(&scores),
            })
            .collect())
    }
}

/// Scores derived from component ratings together with their evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub scores: CriterionScores,
    pub evaluation: EvaluationResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEntry {
    pub applicant: String,
    pub evaluation: EvaluationResult,
}
