use serde::{Deserialize, Serialize};

/// Tie-breaking rule for decimal rounding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingRule {
    /// Banker's rounding: 0.125 -> 0.12
    #[default]
    HalfEven,
    /// Commercial rounding: 0.125 -> 0.13, -0.125 -> -0.13
    HalfAwayFromZero,
}

impl RoundingRule {
    pub fn round(self, value: f64, decimals: u32) -> f64 {
        round_to(value, decimals, self)
    }
}

/// Most decimal places an f64 can meaningfully be rounded to
pub const MAX_DECIMALS: u32 = 15;

/// Round `value` to `decimals` places.
///
/// The value is scaled, rounded to an integer under `rule`, and scaled back,
/// so ties are judged on the binary value after scaling. Requests beyond
/// [`MAX_DECIMALS`] are below f64 precision and leave the value unchanged.
pub fn round_to(value: f64, decimals: u32, rule: RoundingRule) -> f64 {
    if decimals > MAX_DECIMALS {
        return value;
    }

    let scale = 10f64.powi(decimals as i32);
    let scaled = value * scale;
    let rounded = match rule {
        RoundingRule::HalfEven => scaled.round_ties_even(),
        RoundingRule::HalfAwayFromZero => scaled.round(),
    };
    rounded / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_even_ties() {
        assert_eq!(round_to(0.125, 2, RoundingRule::HalfEven), 0.12);
        assert_eq!(round_to(0.375, 2, RoundingRule::HalfEven), 0.38);
        assert_eq!(round_to(-0.125, 2, RoundingRule::HalfEven), -0.12);
    }

    #[test]
    fn test_half_away_from_zero_ties() {
        assert_eq!(round_to(0.125, 2, RoundingRule::HalfAwayFromZero), 0.13);
        assert_eq!(round_to(0.375, 2, RoundingRule::HalfAwayFromZero), 0.38);
        assert_eq!(round_to(-0.125, 2, RoundingRule::HalfAwayFromZero), -0.13);
    }

    #[test]
    fn test_non_ties_agree() {
        for rule in [RoundingRule::HalfEven, RoundingRule::HalfAwayFromZero] {
            assert_eq!(rule.round(100.0 / 3.0, 2), 33.33);
            assert_eq!(rule.round(200.0 / 3.0, 2), 66.67);
            assert_eq!(rule.round(5.0, 2), 5.0);
            assert_eq!(rule.round(0.0, 2), 0.0);
        }
    }

    #[test]
    fn test_zero_decimals() {
        assert_eq!(round_to(2.5, 0, RoundingRule::HalfEven), 2.0);
        assert_eq!(round_to(2.5, 0, RoundingRule::HalfAwayFromZero), 3.0);
    }

    #[test]
    fn test_excess_decimals_leave_value_unchanged() {
        for decimals in [MAX_DECIMALS + 1, i32::MAX as u32 + 1, u32::MAX] {
            let rounded = round_to(1.0 / 3.0, decimals, RoundingRule::HalfEven);
            assert_eq!(rounded, 1.0 / 3.0);
        }
        assert_eq!(round_to(0.5, MAX_DECIMALS, RoundingRule::HalfEven), 0.5);
    }

    #[test]
    fn test_default_is_half_even() {
        assert_eq!(RoundingRule::default(), RoundingRule::HalfEven);
    }
}
