use serde::{Deserialize, Serialize};

use super::super::domain::Decision;
use super::rules::FiredRule;

/// Crisp output must exceed this value for an application to be accepted.
pub const ACCEPTANCE_THRESHOLD: f64 = 0.5;

/// Weighted-average aggregation of the fired rules and the resulting decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Defuzzification {
    /// Sum of α over fired acceptance rules (A).
    pub accept_weight: f64,
    /// Sum of α over fired rejection rules (R).
    pub reject_weight: f64,
    /// A + R.
    pub total_weight: f64,
    /// Σ(α·z) / Σα rounded to two decimals; 0 when nothing fired.
    pub z: f64,
    pub decision: Decision,
}

pub fn decide(accept_fired: &[FiredRule], reject_fired: &[FiredRule]) -> Defuzzification {
    let accept_weight: f64 = accept_fired.iter().map(|fired| fired.alpha).sum();
    let reject_weight: f64 = reject_fired.iter().map(|fired| fired.alpha).sum();
    let total_weight = accept_weight + reject_weight;

    let z = if total_weight > 0.0 {
        let numerator: f64 = accept_fired
            .iter()
            .chain(reject_fired)
            .map(|fired| fired.alpha * fired.rule.consequent.value())
            .sum();
        round_hundredths(numerator / total_weight)
    } else {
        0.0
    };

    let decision = if z > ACCEPTANCE_THRESHOLD {
        Decision::Accepted
    } else {
        Decision::Rejected
    };

    Defuzzification {
        accept_weight,
        reject_weight,
        total_weight,
        z,
        decision,
    }
}

/// Round to two decimal places on the exact decimal value of `value`.
///
/// Exact ties go to the even digit (0.625 -> 0.62); values just above a tie
/// round up (0.505 is stored as 0.50500000000000000444 -> 0.51).
pub(crate) fn round_hundredths(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round_hundredths(0.666_666), 0.67);
        assert_eq!(round_hundredths(0.333_333), 0.33);
        assert_eq!(round_hundredths(1.0), 1.0);
        assert_eq!(round_hundredths(0.0), 0.0);
    }

    #[test]
    fn exact_ties_round_to_the_even_digit() {
        assert_eq!(round_hundredths(0.625), 0.62);
        assert_eq!(round_hundredths(0.125), 0.12);
        assert_eq!(round_hundredths(0.375), 0.38);
        assert_eq!(round_hundredths(0.875), 0.88);
    }

    #[test]
    fn inexact_ties_follow_the_stored_value() {
        // 0.505 is stored slightly above the tie, 0.015 slightly below it.
        assert_eq!(round_hundredths(0.505), 0.51);
        assert_eq!(round_hundredths(0.015), 0.01);
    }

    #[test]
    fn empty_inputs_reject_with_zero_score() {
        let outcome = decide(&[], &[]);
        assert_eq!(outcome.total_weight, 0.0);
        assert_eq!(outcome.z, 0.0);
        assert_eq!(outcome.decision, Decision::Rejected);
    }
}
