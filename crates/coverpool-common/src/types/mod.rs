//! Core domain types

pub mod payout;
pub mod position;
