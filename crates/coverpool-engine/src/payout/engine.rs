//! Payout engine
//!
//! Converts an [`InsurancePosition`] into what the insurer pool, the buyer and
//! one previewed staker receive:
//!
//! ```text
//! Fixed:     pool pays = coverage            buyer gets = pool
//! Variable:  pool pays = min(pool / ratio, coverage)
//!            buyer gets = min(coverage × ratio, pool)
//! Both:      share = stake / pool
//!            my earnings = share × pool pays       (no-claim outcome)
//!            my pool share % = share × 100
//! ```
//!
//! The calculation is pure: identical positions always yield identical
//! results, which is what makes the optional quote cache safe.

use crate::config::{EngineConfig, OverstakePolicy};
use crate::payout::cache::{CacheStats, QuoteCache};
use crate::payout::quote::PositionQuote;
use coverpool_common::{
    InsurancePosition, InsuranceType, PayoutCaps, PayoutError, PayoutResult, PERCENT,
};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Payout calculator with its overstake and risk policy
pub struct PayoutEngine {
    config: EngineConfig,
    cache: Option<QuoteCache>,
}

impl PayoutEngine {
    /// Create an engine; a cache is attached when `cache_entries > 0`
    pub fn new(config: EngineConfig) -> Self {
        let cache = (config.cache_entries > 0).then(|| QuoteCache::new(config.cache_entries));
        Self { config, cache }
    }

    /// Attach a quote cache holding up to `max_entries` quotes (0 detaches it)
    pub fn with_cache(mut self, max_entries: usize) -> Self {
        self.config.cache_entries = max_entries;
        self.cache = (max_entries > 0).then(|| QuoteCache::new(max_entries));
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compute payouts for both counterparties.
    ///
    /// All four result fields are produced together or the call fails.
    #[instrument(level = "debug", skip(self))]
    pub fn compute_payouts(
        &self,
        position: &InsurancePosition,
    ) -> Result<PayoutResult, PayoutError> {
        validate_position(position)?;
        self.check_stake(position)?;

        let share = self.stake_share(position)?;

        let (insurer_pool_payout, buyer_payout) = match position.insurance_type {
            InsuranceType::Fixed => (position.coverage_amount, position.pool_total),
            InsuranceType::Variable => {
                // An overflowing maximum is above any cap, so saturating is exact here.
                let insurer_max = position
                    .pool_total
                    .checked_div(position.payout_ratio)
                    .unwrap_or(Decimal::MAX);
                let buyer_max = position
                    .coverage_amount
                    .saturating_mul(position.payout_ratio);
                (
                    insurer_max.min(position.coverage_amount),
                    buyer_max.min(position.pool_total),
                )
            }
        };

        // A whole-pool share earns exactly the pool payout
        let my_earnings = if share == Decimal::ONE {
            insurer_pool_payout
        } else {
            pro_rata(position.my_stake, insurer_pool_payout, position.pool_total)
                .or_else(|| share.checked_mul(insurer_pool_payout))
                .ok_or(PayoutError::Overflow)?
        };
        let my_pool_share_pct = share.checked_mul(PERCENT).ok_or(PayoutError::Overflow)?;

        debug!(
            insurance_type = %position.insurance_type,
            %insurer_pool_payout,
            %buyer_payout,
            %my_earnings,
            %my_pool_share_pct,
            "Computed payouts"
        );

        Ok(PayoutResult {
            insurer_pool_payout,
            buyer_payout,
            my_earnings,
            my_pool_share_pct,
        })
    }

    /// Payouts plus ROI, loss and risk figures for every party
    #[instrument(level = "debug", skip(self))]
    pub fn quote(&self, position: &InsurancePosition) -> Result<PositionQuote, PayoutError> {
        if let Some(cache) = &self.cache {
            if let Some(quote) = cache.get(position) {
                return Ok(quote);
            }
        }

        let payout = self.compute_payouts(position)?;
        let quote = PositionQuote::build(position, payout, &self.config)?;

        if let Some(cache) = &self.cache {
            cache.insert(position, &quote);
        }
        Ok(quote)
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(QuoteCache::stats)
    }

    /// Apply the configured stake limits
    fn check_stake(&self, position: &InsurancePosition) -> Result<(), PayoutError> {
        if let Some(multiple) = self.config.max_stake_to_coverage {
            let ceiling = position.coverage_amount.saturating_mul(multiple);
            if position.my_stake > ceiling {
                return Err(PayoutError::invalid(
                    "my_stake",
                    format!(
                        "stake {} exceeds {}x the coverage amount ({})",
                        position.my_stake, multiple, ceiling
                    ),
                ));
            }
        }

        if self.config.overstake == OverstakePolicy::Reject && position.is_overstaked() {
            return Err(PayoutError::invalid(
                "my_stake",
                format!(
                    "stake {} exceeds pool total {}",
                    position.my_stake, position.pool_total
                ),
            ));
        }
        Ok(())
    }

    /// Fraction of the pool the previewed stake represents
    fn stake_share(&self, position: &InsurancePosition) -> Result<Decimal, PayoutError> {
        let share = position
            .my_stake
            .checked_div(position.pool_total)
            .ok_or(PayoutError::Overflow)?;

        if self.config.overstake == OverstakePolicy::Clamp && share > Decimal::ONE {
            debug!(%share, "Clamping overstaked share to the whole pool");
            return Ok(Decimal::ONE);
        }
        Ok(share)
    }
}

impl Default for PayoutEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Compute payouts with the default policy
pub fn compute_payouts(position: &InsurancePosition) -> Result<PayoutResult, PayoutError> {
    PayoutEngine::default().compute_payouts(position)
}

/// Uncapped variable-type maxima for a coverage, pool and ratio
pub fn max_payouts(
    coverage_amount: Decimal,
    pool_total: Decimal,
    payout_ratio: Decimal,
) -> Result<PayoutCaps, PayoutError> {
    if coverage_amount <= Decimal::ZERO {
        return Err(PayoutError::invalid(
            "coverage_amount",
            format!("must be positive, got {}", coverage_amount),
        ));
    }
    if payout_ratio < Decimal::ZERO {
        return Err(PayoutError::invalid(
            "payout_ratio",
            format!("must not be negative, got {}", payout_ratio),
        ));
    }
    if pool_total < Decimal::ZERO {
        return Err(PayoutError::invalid(
            "pool_total",
            format!("must not be negative, got {}", pool_total),
        ));
    }
    if payout_ratio.is_zero() {
        return Err(PayoutError::DivisionByZero {
            divisor: "payout_ratio",
        });
    }

    Ok(PayoutCaps {
        insurer_max_payout: pool_total
            .checked_div(payout_ratio)
            .ok_or(PayoutError::Overflow)?,
        buyer_max_payout: coverage_amount
            .checked_mul(payout_ratio)
            .ok_or(PayoutError::Overflow)?,
    })
}

/// Pool a new request needs to be fully matched: coverage × ratio, or the
/// coverage itself for a fixed (1:1) request
pub fn estimated_pool(
    coverage_amount: Decimal,
    insurance_type: InsuranceType,
    payout_ratio: Decimal,
) -> Result<Decimal, PayoutError> {
    if coverage_amount <= Decimal::ZERO {
        return Err(PayoutError::invalid(
            "coverage_amount",
            format!("must be positive, got {}", coverage_amount),
        ));
    }

    match insurance_type {
        InsuranceType::Fixed => Ok(coverage_amount),
        InsuranceType::Variable => {
            if payout_ratio <= Decimal::ZERO {
                return Err(PayoutError::invalid(
                    "payout_ratio",
                    format!("must be positive, got {}", payout_ratio),
                ));
            }
            coverage_amount
                .checked_mul(payout_ratio)
                .ok_or(PayoutError::Overflow)
        }
    }
}

/// `part × amount / whole`, multiplying first so exact quotients stay exact
pub(crate) fn pro_rata(part: Decimal, amount: Decimal, whole: Decimal) -> Option<Decimal> {
    part.checked_mul(amount)?.checked_div(whole)
}

/// Structural checks first, then zero divisors
fn validate_position(position: &InsurancePosition) -> Result<(), PayoutError> {
    if position.coverage_amount <= Decimal::ZERO {
        return Err(PayoutError::invalid(
            "coverage_amount",
            format!("must be positive, got {}", position.coverage_amount),
        ));
    }
    if position.payout_ratio < Decimal::ZERO {
        return Err(PayoutError::invalid(
            "payout_ratio",
            format!("must not be negative, got {}", position.payout_ratio),
        ));
    }
    if position.my_stake <= Decimal::ZERO {
        return Err(PayoutError::invalid(
            "my_stake",
            format!("must be positive, got {}", position.my_stake),
        ));
    }
    if position.pool_total < Decimal::ZERO {
        return Err(PayoutError::invalid(
            "pool_total",
            format!("must not be negative, got {}", position.pool_total),
        ));
    }

    if position.pool_total.is_zero() {
        return Err(PayoutError::DivisionByZero {
            divisor: "pool_total",
        });
    }
    // The ratio is never read for fixed positions
    if position.insurance_type == InsuranceType::Variable && position.payout_ratio.is_zero() {
        return Err(PayoutError::DivisionByZero {
            divisor: "payout_ratio",
        });
    }
    Ok(())
}
