//! Return on investment
//!
//! ROI is reported as a percentage: `(payout - investment) / investment * 100`.
//!
//! An investment of zero (or less) has no meaningful ROI. Display code
//! downstream expects a number that never fails, so by convention the ROI of
//! a non-positive investment is exactly `0`. This is a sentinel, not a
//! derived value.

use coverpool_common::PERCENT;
use rust_decimal::Decimal;

/// ROI of `payout` against `investment`, in percent
pub fn compute_roi(payout: Decimal, investment: Decimal) -> Decimal {
    if investment <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let gain = payout.saturating_sub(investment);
    gain.checked_div(investment)
        .and_then(|ratio| ratio.checked_mul(PERCENT))
        .unwrap_or(if gain.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_roi_gain() {
        assert_eq!(compute_roi(dec!(1500), dec!(1000)), dec!(50));
        assert_eq!(compute_roi(dec!(2000), dec!(1000)), dec!(100));
    }

    #[test]
    fn test_roi_loss() {
        assert_eq!(compute_roi(dec!(250), dec!(1000)), dec!(-75));
        assert_eq!(compute_roi(Decimal::ZERO, dec!(1000)), dec!(-100));
    }

    #[test]
    fn test_roi_break_even() {
        assert_eq!(compute_roi(dec!(1000), dec!(1000)), Decimal::ZERO);
    }

    #[test]
    fn test_roi_zero_investment_sentinel() {
        assert_eq!(compute_roi(dec!(500), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(compute_roi(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
        assert_eq!(compute_roi(dec!(-20), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(compute_roi(dec!(500), dec!(-10)), Decimal::ZERO);
    }

    #[test]
    fn test_roi_saturates() {
        let tiny = dec!(0.0000000000000000000000000001);
        assert_eq!(compute_roi(Decimal::MAX, tiny), Decimal::MAX);
    }
}
