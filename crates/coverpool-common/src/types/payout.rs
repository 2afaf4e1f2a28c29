//! Payout figures derived from an insurance position

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What each party receives for one position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutResult {
    /// Total the insurer pool pays out if a claim occurs
    pub insurer_pool_payout: Decimal,

    /// Total the buyer receives if a claim occurs
    pub buyer_payout: Decimal,

    /// The previewed staker's share of `insurer_pool_payout`, realized
    /// when no claim fires
    pub my_earnings: Decimal,

    /// `my_stake / pool_total * 100`
    pub my_pool_share_pct: Decimal,
}

impl PayoutResult {
    /// Earnings per unit staked
    pub fn earnings_per_stake(&self, my_stake: Decimal) -> Option<Decimal> {
        if my_stake > Decimal::ZERO {
            self.my_earnings.checked_div(my_stake)
        } else {
            None
        }
    }
}

/// Uncapped variable-type maxima, before each side is limited by the
/// counterparty's capital
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutCaps {
    /// `pool_total / payout_ratio`
    pub insurer_max_payout: Decimal,
    /// `coverage_amount * payout_ratio`
    pub buyer_max_payout: Decimal,
}
