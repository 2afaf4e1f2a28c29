//! Insurance position - the input to every payout calculation
//!
//! A position is a transient view of the numbers a buyer or staker is looking
//! at: it is rebuilt on every recalculation and never mutated in place.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Settlement style of an insurance position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsuranceType {
    /// All-or-nothing: the pool pays the full coverage on claim, the buyer
    /// forfeits to the pool otherwise
    Fixed,
    /// Ratio-bounded settlement, each side capped by the other's capital
    Variable,
}

impl InsuranceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsuranceType::Fixed => "fixed",
            InsuranceType::Variable => "variable",
        }
    }
}

impl Default for InsuranceType {
    fn default() -> Self {
        InsuranceType::Variable
    }
}

impl fmt::Display for InsuranceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsuranceType::Fixed => write!(f, "Fixed"),
            InsuranceType::Variable => write!(f, "Variable"),
        }
    }
}

fn default_payout_ratio() -> Decimal {
    crate::DEFAULT_PAYOUT_RATIO
}

/// Parameters of one insurance position
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InsurancePosition {
    /// Amount the buyer insures (also the premium the buyer locks)
    pub coverage_amount: Decimal,

    /// Fixed or variable settlement
    pub insurance_type: InsuranceType,

    /// Payout multiplier, only read for variable positions
    #[serde(default = "default_payout_ratio")]
    pub payout_ratio: Decimal,

    /// Capital contributed by all insurers
    pub pool_total: Decimal,

    /// Stake of the insurer whose earnings are being previewed
    pub my_stake: Decimal,
}

impl InsurancePosition {
    pub fn new(
        coverage_amount: Decimal,
        insurance_type: InsuranceType,
        payout_ratio: Decimal,
        pool_total: Decimal,
        my_stake: Decimal,
    ) -> Self {
        Self {
            coverage_amount,
            insurance_type,
            payout_ratio,
            pool_total,
            my_stake,
        }
    }

    /// Fixed position; the ratio is pinned to 1:1
    pub fn fixed(coverage_amount: Decimal, pool_total: Decimal, my_stake: Decimal) -> Self {
        Self::new(
            coverage_amount,
            InsuranceType::Fixed,
            crate::DEFAULT_PAYOUT_RATIO,
            pool_total,
            my_stake,
        )
    }

    /// Variable position with the given payout ratio
    pub fn variable(
        coverage_amount: Decimal,
        payout_ratio: Decimal,
        pool_total: Decimal,
        my_stake: Decimal,
    ) -> Self {
        Self::new(
            coverage_amount,
            InsuranceType::Variable,
            payout_ratio,
            pool_total,
            my_stake,
        )
    }

    /// Position as a buyer sees it before any insurer has joined: the pool
    /// is assumed to fill to twice the coverage and the previewed stake
    /// matches the coverage.
    pub fn buyer_preview(
        coverage_amount: Decimal,
        insurance_type: InsuranceType,
        payout_ratio: Decimal,
    ) -> Self {
        let pool_total = coverage_amount.saturating_mul(crate::BUYER_PREVIEW_POOL_MULTIPLE);
        Self::new(
            coverage_amount,
            insurance_type,
            payout_ratio,
            pool_total,
            coverage_amount,
        )
    }

    /// Replace the previewed stake
    pub fn with_stake(mut self, my_stake: Decimal) -> Self {
        self.my_stake = my_stake;
        self
    }

    /// Ratio as displayed: fixed positions always settle 1:1
    pub fn effective_ratio(&self) -> Decimal {
        match self.insurance_type {
            InsuranceType::Fixed => crate::DEFAULT_PAYOUT_RATIO,
            InsuranceType::Variable => self.payout_ratio,
        }
    }

    pub fn is_overstaked(&self) -> bool {
        self.my_stake > self.pool_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fixed_pins_ratio() {
        let position = InsurancePosition::fixed(dec!(1000), dec!(2000), dec!(1000));
        assert_eq!(position.insurance_type, InsuranceType::Fixed);
        assert_eq!(position.payout_ratio, dec!(1));
        assert_eq!(position.effective_ratio(), dec!(1));
    }

    #[test]
    fn test_effective_ratio_ignores_fixed_input() {
        let position = InsurancePosition::new(
            dec!(1000),
            InsuranceType::Fixed,
            dec!(3.5),
            dec!(2000),
            dec!(500),
        );
        assert_eq!(position.effective_ratio(), dec!(1));
        assert_eq!(position.payout_ratio, dec!(3.5));
    }

    #[test]
    fn test_buyer_preview() {
        let position =
            InsurancePosition::buyer_preview(dec!(750), InsuranceType::Variable, dec!(2.0));
        assert_eq!(position.pool_total, dec!(1500));
        assert_eq!(position.my_stake, dec!(750));
        assert!(!position.is_overstaked());
    }

    #[test]
    fn test_with_stake_overstake() {
        let position = InsurancePosition::variable(dec!(150), dec!(3.0), dec!(100), dec!(50))
            .with_stake(dec!(300));
        assert!(position.is_overstaked());
    }

    #[test]
    fn test_deserialize_defaults_ratio() {
        let json = r#"{
            "coverage_amount": "1000",
            "insurance_type": "fixed",
            "pool_total": "850",
            "my_stake": "100"
        }"#;
        let position: InsurancePosition = serde_json::from_str(json).unwrap();
        assert_eq!(position.insurance_type, InsuranceType::Fixed);
        assert_eq!(position.payout_ratio, dec!(1));
        assert_eq!(position.pool_total, dec!(850));
    }

    #[test]
    fn test_insurance_type_display() {
        assert_eq!(InsuranceType::Fixed.to_string(), "Fixed");
        assert_eq!(InsuranceType::Variable.as_str(), "variable");
        assert_eq!(InsuranceType::default(), InsuranceType::Variable);
    }
}
