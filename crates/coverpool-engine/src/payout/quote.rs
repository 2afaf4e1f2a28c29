//! Position quotes: payouts together with ROI, loss and risk per party

use crate::config::EngineConfig;
use crate::payout::engine::pro_rata;
use crate::payout::risk::{ratio_label, RiskLevel};
use crate::payout::roi::compute_roi;
use coverpool_common::{InsurancePosition, InsuranceType, PayoutError, PayoutResult, PERCENT};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether the insured event fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Claim,
    NoClaim,
}

/// Signed net amount each party gains (positive) or gives up (negative)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyFlows {
    pub buyer: Decimal,
    pub pool: Decimal,
    pub staker: Decimal,
}

/// Everything a buyer or staker is shown for one position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionQuote {
    pub insurance_type: InsuranceType,
    pub coverage_amount: Decimal,
    pub my_stake: Decimal,
    /// `N.N:1`, or `1:1` for fixed positions
    pub ratio_label: String,
    pub payout: PayoutResult,
    /// Buyer payout against the locked coverage
    pub buyer_roi: Decimal,
    /// Staker earnings against the stake
    pub staker_roi: Decimal,
    /// Staker loss against the stake when a claim fires (never positive)
    pub staker_claim_roi: Decimal,
    /// Pool payout against the pool total
    pub pool_roi: Decimal,
    /// What the previewed staker gives up when a claim fires
    pub my_loss_if_claim: Decimal,
    /// `pool_total / coverage_amount`
    pub pool_coverage_ratio: Decimal,
    /// Fee the buyer pays to open the request
    pub service_fee: Decimal,
    pub risk_level: RiskLevel,
}

impl PositionQuote {
    /// Derive a quote from a validated position and its payouts
    pub fn build(
        position: &InsurancePosition,
        payout: PayoutResult,
        config: &EngineConfig,
    ) -> Result<Self, PayoutError> {
        let my_loss_if_claim = match position.insurance_type {
            // Winner takes all: the whole stake goes to the buyer
            InsuranceType::Fixed => position.my_stake,
            InsuranceType::Variable => {
                pro_rata(position.my_stake, payout.buyer_payout, position.pool_total)
                    .or_else(|| {
                        payout
                            .buyer_payout
                            .checked_div(position.pool_total)?
                            .checked_mul(position.my_stake)
                    })
                    .ok_or(PayoutError::Overflow)?
            }
        };

        let lost_pct = my_loss_if_claim
            .checked_div(position.my_stake)
            .and_then(|fraction| fraction.checked_mul(PERCENT))
            .ok_or(PayoutError::Overflow)?;
        let staker_claim_roi = Decimal::ZERO - lost_pct;

        let service_fee = position
            .coverage_amount
            .checked_mul(config.service_fee_rate)
            .ok_or(PayoutError::Overflow)?;

        let pool_coverage_ratio = position
            .pool_total
            .checked_div(position.coverage_amount)
            .ok_or(PayoutError::Overflow)?;

        Ok(Self {
            insurance_type: position.insurance_type,
            coverage_amount: position.coverage_amount,
            my_stake: position.my_stake,
            ratio_label: ratio_label(position),
            buyer_roi: compute_roi(payout.buyer_payout, position.coverage_amount),
            staker_roi: compute_roi(payout.my_earnings, position.my_stake),
            staker_claim_roi,
            pool_roi: compute_roi(payout.insurer_pool_payout, position.pool_total),
            my_loss_if_claim,
            pool_coverage_ratio,
            service_fee,
            risk_level: RiskLevel::classify(position, &config.risk),
            payout,
        })
    }

    /// Net flows for each party under an outcome
    pub fn flows(&self, outcome: Outcome) -> PartyFlows {
        match outcome {
            Outcome::Claim => PartyFlows {
                buyer: self.payout.buyer_payout,
                pool: -self.payout.buyer_payout,
                staker: -self.my_loss_if_claim,
            },
            Outcome::NoClaim => PartyFlows {
                buyer: -self.coverage_amount,
                pool: self.payout.insurer_pool_payout,
                staker: self.payout.my_earnings,
            },
        }
    }
}
