//! Normalization of 1–5 component ratings into criterion scores.
//!
//! Each criterion is assessed through a fixed set of components. A criterion
//! score is the mean of its component ratings scaled from the 1–5 rating range
//! onto 0–100 as `mean / 5 * 100`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{Criterion, CriterionScores, ScoreError};

pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

/// One rated aspect of a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComponentSpec {
    pub criterion: Criterion,
    pub key: &'static str,
    pub label: &'static str,
    pub guidance: &'static str,
}

pub const COMPONENTS: [ComponentSpec; 14] = [
    ComponentSpec {
        criterion: Criterion::Character,
        key: "good_faith",
        label: "Good faith",
        guidance: "Good faith and sense of responsibility (1: very poor - 5: very good)",
    },
    ComponentSpec {
        criterion: Criterion::Character,
        key: "lifestyle",
        label: "Lifestyle",
        guidance: "Spending habits (1: very wasteful - 5: very frugal)",
    },
    ComponentSpec {
        criterion: Criterion::Character,
        key: "commitment",
        label: "Commitment",
        guidance: "Commitment to repayment (1: none - 5: very high)",
    },
    ComponentSpec {
        criterion: Criterion::Capital,
        key: "fixed_income",
        label: "Fixed income",
        guidance: "Monthly income (1: <2M, 2: 2-3.5M, 3: 3.5-5M, 4: 5-7.5M, 5: >7.5M)",
    },
    ComponentSpec {
        criterion: Criterion::Capital,
        key: "side_income",
        label: "Side income",
        guidance: "Additional income (1: none, 2: <1M, 3: 1-2M, 4: 2-3M, 5: >3M)",
    },
    ComponentSpec {
        criterion: Criterion::Capital,
        key: "savings",
        label: "Savings",
        guidance: "Savings balance (1: <3M, 2: 3-5M, 3: 5-20M, 4: 20-50M, 5: >50M)",
    },
    ComponentSpec {
        criterion: Criterion::Capacity,
        key: "installment_ratio",
        label: "Installment ratio",
        guidance: "Installment to income ratio (1: >70%, 2: 51-70%, 3: 31-50%, 4: 20-30%, 5: <20%)",
    },
    ComponentSpec {
        criterion: Criterion::Capacity,
        key: "reserve_fund",
        label: "Reserve fund",
        guidance: "Reserve fund (1: none, 2: 1-2x, 3: 2-4x, 4: 4-6x, 5: >6x installment)",
    },
    ComponentSpec {
        criterion: Criterion::Collateral,
        key: "credit_history",
        label: "Credit history",
        guidance: "Credit history (1: defaulted - 5: always current)",
    },
    ComponentSpec {
        criterion: Criterion::Collateral,
        key: "collateral_value",
        label: "Collateral value",
        guidance: "Collateral value (1: none - 5: premium physical asset)",
    },
    ComponentSpec {
        criterion: Criterion::Collateral,
        key: "documentation",
        label: "Documentation",
        guidance: "Document completeness (1: none - 5: complete)",
    },
    ComponentSpec {
        criterion: Criterion::Condition,
        key: "business_stability",
        label: "Business stability",
        guidance: "Business stability (1: unstable - 5: very stable)",
    },
    ComponentSpec {
        criterion: Criterion::Condition,
        key: "industry_outlook",
        label: "Industry outlook",
        guidance: "Industry outlook (1: declining - 5: growing fast)",
    },
    ComponentSpec {
        criterion: Criterion::Condition,
        key: "external_factors",
        label: "External factors",
        guidance: "External influences (1: very negative - 5: very positive)",
    },
];

pub fn components_for(criterion: Criterion) -> impl Iterator<Item = &'static ComponentSpec> {
    COMPONENTS
        .iter()
        .filter(move |component| component.criterion == criterion)
}

/// Component ratings keyed by component key (see [`COMPONENTS`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentRatings(pub BTreeMap<String, u8>);

impl ComponentRatings {
    pub fn with(mut self, key: &str, rating: u8) -> Self {
        self.0.insert(key.to_string(), rating);
        self
    }

    /// Every component rated with the same value.
    pub fn uniform(rating: u8) -> Self {
        Self(
            COMPONENTS
                .iter()
                .map(|component| (component.key.to_string(), rating))
                .collect(),
        )
    }

    pub fn normalize(&self) -> Result<CriterionScores, IntakeError> {
        if let Some(unknown) = self
            .0
            .keys()
            .find(|key| !COMPONENTS.iter().any(|component| component.key == key.as_str()))
        {
            return Err(IntakeError::UnknownComponent(unknown.clone()));
        }

        let mut pairs = Vec::with_capacity(Criterion::ALL.len());
        for criterion in Criterion::ALL {
            let mut total = 0u32;
            let mut count = 0u32;
            for component in components_for(criterion) {
                let rating = *self
                    .0
                    .get(component.key)
                    .ok_or(IntakeError::MissingComponent(component.key))?;
                if !(RATING_MIN..=RATING_MAX).contains(&rating) {
                    return Err(IntakeError::RatingOutOfRange {
                        component: component.key,
                        rating,
                    });
                }
                total += u32::from(rating);
                count += 1;
            }

            let mean = f64::from(total) / f64::from(count);
            pairs.push((criterion, mean / f64::from(RATING_MAX) * 100.0));
        }

        Ok(CriterionScores::from_pairs(pairs)?)
    }
}

/// Failures while turning raw applicant input into criterion scores.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("unknown rating component '{0}'")]
    UnknownComponent(String),
    #[error("rating component '{0}' is missing")]
    MissingComponent(&'static str),
    #[error("rating {rating} for '{component}' is outside 1-5")]
    RatingOutOfRange { component: &'static str, rating: u8 },
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error("failed to read score batch: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid score batch CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: {source}")]
    Row { row: usize, source: ScoreError },
    #[error("batch of {size} applicants exceeds the limit of {limit}")]
    BatchTooLarge { size: usize, limit: usize },
}
