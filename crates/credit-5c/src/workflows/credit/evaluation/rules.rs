use serde::{Deserialize, Serialize};

use super::super::domain::{Criterion, CriterionScores, CRITERIA_COUNT};
use super::membership::degree;

/// Crisp conclusion attached to a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Consequent {
    Accept,
    Reject,
}

impl Consequent {
    /// Sugeno output value of the rule class.
    pub fn value(self) -> f64 {
        match self {
            Consequent::Accept => 1.0,
            Consequent::Reject => 0.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Consequent::Accept => "accept",
            Consequent::Reject => "reject",
        }
    }
}

/// Premise levels for the five criteria plus the conclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub levels: [u8; CRITERIA_COUNT],
    pub consequent: Consequent,
}

impl Rule {
    pub fn level(&self, criterion: Criterion) -> u8 {
        self.levels[criterion.index()]
    }

    /// `IF Character is Good AND ... THEN accept`.
    pub fn describe(&self) -> String {
        let premise = Criterion::ALL
            .into_iter()
            .map(|criterion| {
                let level = self.level(criterion);
                let label = criterion.level_label(level).unwrap_or("undefined");
                format!("{criterion} is {label}")
            })
            .collect::<Vec<_>>()
            .join(" AND ");
        format!("IF {premise} THEN {}", self.consequent.label())
    }
}

const fn accept(levels: [u8; CRITERIA_COUNT]) -> Rule {
    Rule {
        levels,
        consequent: Consequent::Accept,
    }
}

const fn reject(levels: [u8; CRITERIA_COUNT]) -> Rule {
    Rule {
        levels,
        consequent: Consequent::Reject,
    }
}

/// Rules concluding acceptance. Repeated entries are part of the table and
/// each contributes its own weight.
pub const ACCEPTANCE_RULES: [Rule; 19] = [
    accept([3, 3, 3, 2, 3]),
    accept([3, 3, 3, 2, 2]),
    accept([3, 3, 2, 2, 3]),
    accept([3, 2, 3, 2, 3]),
    accept([3, 3, 2, 2, 2]),
    accept([3, 2, 3, 2, 2]),
    accept([3, 2, 2, 2, 3]),
    accept([2, 3, 3, 2, 3]),
    accept([2, 2, 2, 2, 2]),
    accept([2, 2, 2, 2, 3]),
    accept([2, 2, 3, 2, 2]),
    accept([2, 3, 2, 2, 2]),
    accept([3, 2, 2, 2, 2]),
    accept([2, 2, 3, 2, 3]),
    accept([2, 3, 2, 2, 3]),
    accept([3, 2, 2, 2, 3]),
    accept([2, 3, 3, 2, 2]),
    accept([3, 2, 3, 2, 2]),
    accept([3, 3, 2, 2, 2]),
];

/// Rules concluding rejection.
pub const REJECTION_RULES: [Rule; 29] = [
    reject([1, 1, 1, 1, 1]),
    reject([1, 1, 1, 1, 2]),
    reject([1, 1, 2, 1, 1]),
    reject([1, 2, 1, 1, 1]),
    reject([2, 1, 1, 1, 1]),
    reject([1, 1, 2, 2, 1]),
    reject([1, 2, 1, 2, 1]),
    reject([2, 1, 1, 2, 1]),
    reject([2, 2, 1, 1, 1]),
    reject([2, 1, 2, 1, 1]),
    reject([1, 2, 2, 1, 1]),
    reject([2, 1, 1, 1, 2]),
    reject([1, 2, 1, 1, 2]),
    reject([1, 1, 2, 1, 2]),
    reject([2, 2, 1, 1, 2]),
    reject([2, 1, 2, 1, 2]),
    reject([1, 2, 2, 1, 2]),
    reject([1, 1, 1, 2, 1]),
    reject([1, 1, 2, 2, 2]),
    reject([2, 1, 1, 2, 2]),
    reject([1, 2, 1, 2, 2]),
    reject([2, 2, 1, 2, 1]),
    reject([2, 1, 2, 2, 1]),
    reject([1, 2, 2, 2, 1]),
    reject([2, 2, 1, 2, 2]),
    reject([2, 1, 2, 2, 2]),
    reject([1, 2, 2, 2, 2]),
    reject([1, 1, 1, 2, 2]),
    reject([1, 1, 1, 1, 3]),
];

/// A rule whose premise held to a non-zero degree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiredRule {
    /// 1-based position of the rule in its table.
    pub position: usize,
    pub rule: Rule,
    /// Membership degree per criterion, in criterion order.
    pub degrees: [f64; CRITERIA_COUNT],
    /// Firing strength, the minimum of `degrees`.
    pub alpha: f64,
}

/// Fire every rule of `table` against `scores`, keeping table order.
///
/// A rule stops being evaluated at the first criterion whose degree is not
/// strictly positive.
pub fn fire_rules(scores: &CriterionScores, table: &[Rule]) -> Vec<FiredRule> {
    table
        .iter()
        .enumerate()
        .filter_map(|(offset, rule)| {
            fire(scores, rule).map(|(degrees, alpha)| FiredRule {
                position: offset + 1,
                rule: *rule,
                degrees,
                alpha,
            })
        })
        .collect()
}

fn fire(scores: &CriterionScores, rule: &Rule) -> Option<([f64; CRITERIA_COUNT], f64)> {
    let mut degrees = [0.0; CRITERIA_COUNT];
    for criterion in Criterion::ALL {
        let strength = degree(criterion, rule.level(criterion), scores.get(criterion));
        if strength <= 0.0 {
            return None;
        }
        degrees[criterion.index()] = strength;
    }

    let alpha = degrees.iter().copied().fold(f64::INFINITY, f64::min);
    Some((degrees, alpha))
}
