use super::super::domain::Criterion;

/// Piecewise-linear membership shape over a 0–100 score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Shape {
    /// 1 up to `full`, linear down to 0 at `zero`.
    Falling { full: f64, zero: f64 },
    /// 0 outside (`rise`, `fall`), linear up to 1 at `peak`, then linear down.
    Peak { rise: f64, peak: f64, fall: f64 },
    /// 0 up to `zero`, linear up to 1 at `full`.
    Rising { zero: f64, full: f64 },
}

impl Shape {
    pub(crate) fn evaluate(self, value: f64) -> f64 {
        match self {
            Shape::Falling { full, zero } => {
                if value <= full {
                    1.0
                } else if value >= zero {
                    0.0
                } else {
                    (zero - value) / (zero - full)
                }
            }
            Shape::Peak { rise, peak, fall } => {
                if value <= rise || value >= fall {
                    0.0
                } else if value <= peak {
                    (value - rise) / (peak - rise)
                } else {
                    (fall - value) / (fall - peak)
                }
            }
            Shape::Rising { zero, full } => {
                if value <= zero {
                    0.0
                } else if value >= full {
                    1.0
                } else {
                    (value - zero) / (full - zero)
                }
            }
        }
    }

    /// Score values where the shape changes slope.
    pub(crate) fn breakpoints(self) -> Vec<f64> {
        match self {
            Shape::Falling { full, zero } => vec![full, zero],
            Shape::Peak { rise, peak, fall } => vec![rise, peak, fall],
            Shape::Rising { zero, full } => vec![zero, full],
        }
    }
}

/// Low / Medium / High over breakpoints 25, 35, 40, 55, 70, 75, 85.
const THREE_LEVEL: [Shape; 3] = [
    Shape::Falling {
        full: 25.0,
        zero: 40.0,
    },
    Shape::Peak {
        rise: 35.0,
        peak: 55.0,
        fall: 75.0,
    },
    Shape::Rising {
        zero: 70.0,
        full: 85.0,
    },
];

/// Unsafe / Safe over breakpoints 45, 55.
const TWO_LEVEL: [Shape; 2] = [
    Shape::Falling {
        full: 45.0,
        zero: 55.0,
    },
    Shape::Rising {
        zero: 45.0,
        full: 55.0,
    },
];

/// Membership shapes of a criterion, indexed by `level - 1`.
pub(crate) fn shapes(criterion: Criterion) -> &'static [Shape] {
    match criterion {
        Criterion::Collateral => &TWO_LEVEL,
        Criterion::Character | Criterion::Capital | Criterion::Capacity | Criterion::Condition => {
            &THREE_LEVEL
        }
    }
}

/// Degree in [0, 1] to which `value` belongs to `level` of `criterion`.
///
/// Levels are 1-based. A level the criterion does not define (0, anything past
/// its level count) has no members and yields 0.0.
pub fn degree(criterion: Criterion, level: u8, value: f64) -> f64 {
    usize::from(level)
        .checked_sub(1)
        .and_then(|slot| shapes(criterion).get(slot))
        .map(|shape| shape.evaluate(value).clamp(0.0, 1.0))
        .unwrap_or(0.0)
}

/// Every level's degree for one criterion score, in level order.
pub fn fuzzify(criterion: Criterion, value: f64) -> Vec<f64> {
    (1..=criterion.level_count())
        .map(|level| degree(criterion, level, value))
        .collect()
}

/// Sorted, de-duplicated breakpoints of every shape the criterion uses.
pub fn breakpoints(criterion: Criterion) -> Vec<f64> {
    let mut points: Vec<f64> = shapes(criterion)
        .iter()
        .flat_map(|shape| shape.breakpoints())
        .collect();
    points.sort_by(f64::total_cmp);
    points.dedup();
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_cover_declared_level_counts() {
        for criterion in Criterion::ALL {
            assert_eq!(
                shapes(criterion).len(),
                usize::from(criterion.level_count()),
                "{criterion} shape count"
            );
        }
    }

    #[test]
    fn peak_reaches_one_at_its_midpoint() {
        assert_eq!(THREE_LEVEL[1].evaluate(55.0), 1.0);
        assert_eq!(THREE_LEVEL[1].breakpoints(), vec![35.0, 55.0, 75.0]);
    }

    #[test]
    fn undefined_levels_have_no_members() {
        assert_eq!(degree(Criterion::Collateral, 3, 100.0), 0.0);
        assert_eq!(degree(Criterion::Character, 0, 0.0), 0.0);
        assert_eq!(degree(Criterion::Capital, 4, 90.0), 0.0);
    }
}
