//! Risk level of a position, derived from its payout ratio

use crate::config::RiskThresholds;
use coverpool_common::{InsurancePosition, InsuranceType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk level shown alongside a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Fixed positions settle 1:1
    Standard,
    /// Variable, ratio below the medium threshold
    Low,
    /// Variable, ratio below the high threshold
    Medium,
    /// Variable, ratio at or above the high threshold
    High,
}

impl RiskLevel {
    /// Classify a position
    pub fn classify(position: &InsurancePosition, thresholds: &RiskThresholds) -> Self {
        match position.insurance_type {
            InsuranceType::Fixed => RiskLevel::Standard,
            InsuranceType::Variable => Self::for_ratio(position.payout_ratio, thresholds),
        }
    }

    /// Level of a variable ratio
    pub fn for_ratio(ratio: Decimal, thresholds: &RiskThresholds) -> Self {
        if ratio < thresholds.medium_ratio {
            RiskLevel::Low
        } else if ratio < thresholds.high_ratio {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    /// Trading posture the level corresponds to
    pub fn posture(&self) -> &'static str {
        match self {
            RiskLevel::Standard => "Standard",
            RiskLevel::Low => "Conservative",
            RiskLevel::Medium => "Moderate",
            RiskLevel::High => "Aggressive",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Standard => "Fixed",
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        f.write_str(label)
    }
}

/// Ratio as `N.N:1`; fixed positions always read `1:1`
pub fn ratio_label(position: &InsurancePosition) -> String {
    match position.insurance_type {
        InsuranceType::Fixed => "1:1".to_string(),
        InsuranceType::Variable => format!("{:.1}:1", position.payout_ratio),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn variable(ratio: Decimal) -> InsurancePosition {
        InsurancePosition::variable(dec!(1000), ratio, dec!(2000), dec!(1000))
    }

    #[test]
    fn test_ratio_boundaries() {
        let thresholds = RiskThresholds::default();
        assert_eq!(RiskLevel::for_ratio(dec!(1.0), &thresholds), RiskLevel::Low);
        assert_eq!(RiskLevel::for_ratio(dec!(1.9), &thresholds), RiskLevel::Low);
        assert_eq!(RiskLevel::for_ratio(dec!(2.0), &thresholds), RiskLevel::Medium);
        assert_eq!(RiskLevel::for_ratio(dec!(3.4), &thresholds), RiskLevel::Medium);
        assert_eq!(RiskLevel::for_ratio(dec!(3.5), &thresholds), RiskLevel::High);
        assert_eq!(RiskLevel::for_ratio(dec!(5.0), &thresholds), RiskLevel::High);
    }

    #[test]
    fn test_conservative_ratios_are_low() {
        let thresholds = RiskThresholds::default();
        assert_eq!(
            RiskLevel::classify(&variable(dec!(0.5)), &thresholds),
            RiskLevel::Low
        );
    }

    #[test]
    fn test_fixed_is_standard() {
        let position = InsurancePosition::fixed(dec!(1000), dec!(850), dec!(100));
        let level = RiskLevel::classify(&position, &RiskThresholds::default());
        assert_eq!(level, RiskLevel::Standard);
        assert_eq!(level.to_string(), "Fixed");
        assert_eq!(level.posture(), "Standard");
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = RiskThresholds {
            medium_ratio: dec!(1.5),
            high_ratio: dec!(2.5),
        };
        assert_eq!(
            RiskLevel::classify(&variable(dec!(2.0)), &thresholds),
            RiskLevel::Medium
        );
        assert_eq!(RiskLevel::High.posture(), "Aggressive");
    }

    #[test]
    fn test_ratio_label() {
        assert_eq!(ratio_label(&variable(dec!(2))), "2.0:1");
        assert_eq!(ratio_label(&variable(dec!(1.5))), "1.5:1");
        let fixed = InsurancePosition::fixed(dec!(1000), dec!(2000), dec!(1000));
        assert_eq!(ratio_label(&fixed), "1:1");
    }
}
