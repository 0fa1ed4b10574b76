use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of criteria every applicant is scored on.
pub const CRITERIA_COUNT: usize = 5;

/// Lower bound of a normalized criterion score.
pub const SCORE_MIN: f64 = 0.0;

/// Upper bound of a normalized criterion score.
pub const SCORE_MAX: f64 = 100.0;

/// The five credit criteria, in the fixed order used by every rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Criterion {
    Character,
    Capital,
    Capacity,
    Collateral,
    Condition,
}

impl Criterion {
    pub const ALL: [Criterion; CRITERIA_COUNT] = [
        Criterion::Character,
        Criterion::Capital,
        Criterion::Capacity,
        Criterion::Collateral,
        Criterion::Condition,
    ];

    /// Position of the criterion inside a rule tuple.
    pub fn index(self) -> usize {
        match self {
            Criterion::Character => 0,
            Criterion::Capital => 1,
            Criterion::Capacity => 2,
            Criterion::Collateral => 3,
            Criterion::Condition => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Criterion::Character => "Character",
            Criterion::Capital => "Capital",
            Criterion::Capacity => "Capacity",
            Criterion::Collateral => "Collateral",
            Criterion::Condition => "Condition",
        }
    }

    /// Number of linguistic levels defined for the criterion.
    pub fn level_count(self) -> u8 {
        match self {
            Criterion::Collateral => 2,
            _ => 3,
        }
    }

    /// Linguistic label for a level index, or `None` when the level is undefined.
    pub fn level_label(self, level: u8) -> Option<&'static str> {
        let labels: &[&'static str] = match self {
            Criterion::Character => &["Bad", "Fair", "Good"],
            Criterion::Capital => &["Low", "Medium", "High"],
            Criterion::Capacity => &["Incapable", "Fairly capable", "Capable"],
            Criterion::Collateral => &["Unsafe", "Safe"],
            Criterion::Condition => &["Unstable", "Fairly stable", "Stable"],
        };
        usize::from(level)
            .checked_sub(1)
            .and_then(|slot| labels.get(slot))
            .copied()
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Criterion {
    type Err = ScoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Criterion::ALL
            .into_iter()
            .find(|criterion| criterion.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ScoreError::UnknownCriterion(trimmed.to_string()))
    }
}

/// Validated set of five normalized scores, one per criterion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct CriterionScores {
    values: [f64; CRITERIA_COUNT],
}

impl CriterionScores {
    /// Build scores from values listed in criterion order.
    pub fn new(values: [f64; CRITERIA_COUNT]) -> Result<Self, ScoreError> {
        for criterion in Criterion::ALL {
            check_range(criterion, values[criterion.index()])?;
        }
        Ok(Self { values })
    }

    /// Scores where every criterion carries the same value.
    pub fn uniform(value: f64) -> Result<Self, ScoreError> {
        Self::new([value; CRITERIA_COUNT])
    }

    pub fn from_pairs<I>(pairs: I) -> Result<Self, ScoreError>
    where
        I: IntoIterator<Item = (Criterion, f64)>,
    {
        let mut slots: [Option<f64>; CRITERIA_COUNT] = [None; CRITERIA_COUNT];
        for (criterion, value) in pairs {
            check_range(criterion, value)?;
            let slot = &mut slots[criterion.index()];
            if slot.is_some() {
                return Err(ScoreError::DuplicateCriterion(criterion));
            }
            *slot = Some(value);
        }

        let mut values = [SCORE_MIN; CRITERIA_COUNT];
        for criterion in Criterion::ALL {
            values[criterion.index()] =
                slots[criterion.index()].ok_or(ScoreError::MissingCriterion(criterion))?;
        }
        Ok(Self { values })
    }

    pub fn get(&self, criterion: Criterion) -> f64 {
        self.values[criterion.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Criterion, f64)> + '_ {
        Criterion::ALL
            .into_iter()
            .map(move |criterion| (criterion, self.get(criterion)))
    }
}

impl TryFrom<BTreeMap<String, f64>> for CriterionScores {
    type Error = ScoreError;

    fn try_from(raw: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        let pairs = raw
            .into_iter()
            .map(|(key, value)| key.parse::<Criterion>().map(|criterion| (criterion, value)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_pairs(pairs)
    }
}

impl From<CriterionScores> for BTreeMap<String, f64> {
    fn from(scores: CriterionScores) -> Self {
        scores
            .iter()
            .map(|(criterion, value)| (criterion.label().to_string(), value))
            .collect()
    }
}

fn check_range(criterion: Criterion, value: f64) -> Result<(), ScoreError> {
    if (SCORE_MIN..=SCORE_MAX).contains(&value) {
        Ok(())
    } else {
        Err(ScoreError::OutOfRange { criterion, value })
    }
}

/// Final credit decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Accepted,
    Rejected,
}

impl Decision {
    pub fn label(self) -> &'static str {
        match self {
            Decision::Accepted => "accepted",
            Decision::Rejected => "rejected",
        }
    }
}

/// Input domain violations detected before any evaluation runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoreError {
    #[error("{criterion} score {value} is outside the allowed range [0, 100]")]
    OutOfRange { criterion: Criterion, value: f64 },
    #[error("{0} score is missing")]
    MissingCriterion(Criterion),
    #[error("{0} score is given more than once")]
    DuplicateCriterion(Criterion),
    #[error("unknown criterion '{0}'")]
    UnknownCriterion(String),
}
