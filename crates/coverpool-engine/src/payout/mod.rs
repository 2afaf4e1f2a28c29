//! Payout module
//!
//! Provides the payout calculation with:
//! - Fixed and variable settlement formulas
//! - Configurable overstake handling
//! - ROI, loss and risk figures per party
//! - Optional in-memory quote caching

pub mod cache;
pub mod engine;
pub mod quote;
pub mod risk;
pub mod roi;

pub use cache::{CacheStats, QuoteCache};
pub use engine::{compute_payouts, estimated_pool, max_payouts, PayoutEngine};
pub use quote::{Outcome, PartyFlows, PositionQuote};
pub use risk::{ratio_label, RiskLevel};
pub use roi::compute_roi;
