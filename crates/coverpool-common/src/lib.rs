//! # Coverpool Common
//!
//! Shared types and errors for the Coverpool payout engine.
//!
//! ## Core Types
//!
//! - [`InsurancePosition`]: coverage, settlement type, ratio, pool and stake
//! - [`PayoutResult`]: what the pool, the buyer and the previewed staker get
//! - [`PayoutCaps`]: uncapped variable-type maxima
//!
//! ## Errors
//!
//! - [`PayoutError`]: `InvalidArgument`, `DivisionByZero`, `Overflow`
//! - [`CoverpoolError`]: crate-wide wrapper adding configuration errors

pub mod error;
pub mod types;

use rust_decimal::Decimal;

// Re-export commonly used types at crate root
pub use error::{CoverpoolError, ErrorKind, PayoutError, Result};
pub use types::{
    payout::{PayoutCaps, PayoutResult},
    position::{InsurancePosition, InsuranceType},
};

/// Coverpool version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Ratio a fixed position settles at
pub const DEFAULT_PAYOUT_RATIO: Decimal = Decimal::ONE;

/// Pool size assumed by a buyer preview, as a multiple of the coverage
pub const BUYER_PREVIEW_POOL_MULTIPLE: Decimal = Decimal::TWO;

/// Scale for percentage figures
pub const PERCENT: Decimal = Decimal::ONE_HUNDRED;
