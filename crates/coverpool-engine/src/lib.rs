//! # Coverpool Engine
//!
//! Payout and ROI calculation for fixed and variable insurance pools.
//!
//! ## Payout Formula
//!
//! ```text
//! Fixed:     pool pays coverage, buyer takes the pool
//! Variable:  pool pays min(pool / ratio, coverage)
//!            buyer takes min(coverage × ratio, pool)
//! ROI:       (payout - investment) / investment × 100, or 0 without investment
//! ```
//!
//! A staker's earnings are their `stake / pool` share of what the pool
//! collects when no claim fires.

pub mod config;
pub mod payout;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub use config::{EngineConfig, OverstakePolicy, RiskThresholds};
pub use payout::{
    compute_payouts, compute_roi, estimated_pool, max_payouts, Outcome, PartyFlows, PayoutEngine,
    PositionQuote, RiskLevel,
};

/// Variable ratios at or above this are Medium risk
pub const DEFAULT_MEDIUM_RISK_RATIO: Decimal = dec!(2.0);

/// Variable ratios at or above this are High risk
pub const DEFAULT_HIGH_RISK_RATIO: Decimal = dec!(3.5);

/// Service fee charged on a new request, as a fraction of the coverage
pub const DEFAULT_SERVICE_FEE_RATE: Decimal = dec!(0.01);
