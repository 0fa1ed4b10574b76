use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{Criterion, CriterionScores};
use super::intake::IntakeError;

/// Applicant identifier paired with validated scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantScores {
    pub applicant: String,
    pub scores: CriterionScores,
}

#[derive(Debug, Deserialize)]
struct ScoreRow {
    #[serde(alias = "Applicant", alias = "APPLICANT")]
    applicant: String,
    #[serde(alias = "Character", alias = "CHARACTER")]
    character: f64,
    #[serde(alias = "Capital", alias = "CAPITAL")]
    capital: f64,
    #[serde(alias = "Capacity", alias = "CAPACITY")]
    capacity: f64,
    #[serde(alias = "Collateral", alias = "COLLATERAL")]
    collateral: f64,
    #[serde(alias = "Condition", alias = "CONDITION")]
    condition: f64,
}

impl ScoreRow {
    fn pairs(&self) -> [(Criterion, f64); 5] {
        [
            (Criterion::Character, self.character),
            (Criterion::Capital, self.capital),
            (Criterion::Capacity, self.capacity),
            (Criterion::Collateral, self.collateral),
            (Criterion::Condition, self.condition),
        ]
    }
}

/// CSV reader for `applicant,character,capital,capacity,collateral,condition` exports.
pub struct ScoreBatchImporter;

impl ScoreBatchImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ApplicantScores>, IntakeError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parse every row; the first invalid row aborts the import.
    ///
    /// Row numbers in errors count data rows from 1, excluding the header.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ApplicantScores>, IntakeError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut applicants = Vec::new();

        for (offset, record) in csv_reader.deserialize::<ScoreRow>().enumerate() {
            let row = record?;
            let scores = CriterionScores::from_pairs(row.pairs()).map_err(|source| {
                IntakeError::Row {
                    row: offset + 1,
                    source,
                }
            })?;
            applicants.push(ApplicantScores {
                applicant: row.applicant,
                scores,
            });
        }

        Ok(applicants)
    }
}
