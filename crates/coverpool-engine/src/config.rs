//! Engine configuration

use coverpool_common::{CoverpoolError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// How the engine treats a stake larger than the pool it is staked in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverstakePolicy {
    /// Use the raw `stake / pool` share, which may exceed 100%
    Allow,
    /// Cap the share at 100%: a stake at or above the pool owns all of it
    Clamp,
    /// Fail with `InvalidArgument`
    Reject,
}

impl Default for OverstakePolicy {
    fn default() -> Self {
        OverstakePolicy::Allow
    }
}

impl FromStr for OverstakePolicy {
    type Err = CoverpoolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(OverstakePolicy::Allow),
            "clamp" => Ok(OverstakePolicy::Clamp),
            "reject" => Ok(OverstakePolicy::Reject),
            other => Err(CoverpoolError::Config(format!(
                "unknown overstake policy '{}' (expected allow, clamp or reject)",
                other
            ))),
        }
    }
}

/// Ratio boundaries between risk levels of a variable position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Ratios at or above this are Medium
    pub medium_ratio: Decimal,
    /// Ratios at or above this are High
    pub high_ratio: Decimal,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            medium_ratio: crate::DEFAULT_MEDIUM_RISK_RATIO,
            high_ratio: crate::DEFAULT_HIGH_RISK_RATIO,
        }
    }
}

/// Payout engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Treatment of stakes above the pool total
    pub overstake: OverstakePolicy,
    /// Largest accepted stake as a multiple of the coverage amount
    pub max_stake_to_coverage: Option<Decimal>,
    /// Risk level boundaries
    pub risk: RiskThresholds,
    /// Service fee as a fraction of the coverage amount
    pub service_fee_rate: Decimal,
    /// Quote cache capacity, 0 disables caching
    pub cache_entries: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            overstake: OverstakePolicy::default(),
            max_stake_to_coverage: None,
            risk: RiskThresholds::default(),
            service_fee_rate: crate::DEFAULT_SERVICE_FEE_RATE,
            cache_entries: 0,
        }
    }
}

impl EngineConfig {
    /// `true` allows overstaking, `false` rejects it
    pub fn allow_overstake(mut self, allow: bool) -> Self {
        self.overstake = if allow {
            OverstakePolicy::Allow
        } else {
            OverstakePolicy::Reject
        };
        self
    }

    pub fn with_overstake_policy(mut self, policy: OverstakePolicy) -> Self {
        self.overstake = policy;
        self
    }

    pub fn with_max_stake_to_coverage(mut self, multiple: Decimal) -> Self {
        self.max_stake_to_coverage = Some(multiple);
        self
    }

    pub fn with_risk_thresholds(mut self, risk: RiskThresholds) -> Self {
        self.risk = risk;
        self
    }

    pub fn with_service_fee_rate(mut self, rate: Decimal) -> Self {
        self.service_fee_rate = rate;
        self
    }

    pub fn with_cache_entries(mut self, entries: usize) -> Self {
        self.cache_entries = entries;
        self
    }

    /// Load configuration from `.env` and the process environment
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from a variable lookup.
    ///
    /// `COVERPOOL_OVERSTAKE_POLICY` wins over `COVERPOOL_ALLOW_OVERSTAKE`
    /// when both are set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(val) = lookup("COVERPOOL_ALLOW_OVERSTAKE") {
            let allow: bool = parse_var("COVERPOOL_ALLOW_OVERSTAKE", &val)?;
            cfg = cfg.allow_overstake(allow);
        }
        if let Some(val) = lookup("COVERPOOL_OVERSTAKE_POLICY") {
            cfg.overstake = val.parse()?;
        }

        if let Some(val) = lookup("COVERPOOL_MAX_STAKE_TO_COVERAGE") {
            let val = val.trim();
            cfg.max_stake_to_coverage = if val.is_empty() || val.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(parse_var("COVERPOOL_MAX_STAKE_TO_COVERAGE", val)?)
            };
        }

        // Risk thresholds
        if let Some(val) = lookup("COVERPOOL_RISK_MEDIUM_RATIO") {
            cfg.risk.medium_ratio = parse_var("COVERPOOL_RISK_MEDIUM_RATIO", &val)?;
        }
        if let Some(val) = lookup("COVERPOOL_RISK_HIGH_RATIO") {
            cfg.risk.high_ratio = parse_var("COVERPOOL_RISK_HIGH_RATIO", &val)?;
        }

        if let Some(val) = lookup("COVERPOOL_SERVICE_FEE_RATE") {
            cfg.service_fee_rate = parse_var("COVERPOOL_SERVICE_FEE_RATE", &val)?;
        }

        if let Some(val) = lookup("COVERPOOL_CACHE_ENTRIES") {
            cfg.cache_entries = parse_var("COVERPOOL_CACHE_ENTRIES", &val)?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject settings the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if let Some(multiple) = self.max_stake_to_coverage {
            if multiple <= Decimal::ZERO {
                return Err(CoverpoolError::Config(format!(
                    "max_stake_to_coverage must be positive, got {}",
                    multiple
                )));
            }
        }
        if self.risk.medium_ratio <= Decimal::ZERO || self.risk.high_ratio < self.risk.medium_ratio
        {
            return Err(CoverpoolError::Config(format!(
                "risk thresholds must satisfy 0 < medium ({}) <= high ({})",
                self.risk.medium_ratio, self.risk.high_ratio
            )));
        }
        if self.service_fee_rate < Decimal::ZERO || self.service_fee_rate > Decimal::ONE {
            return Err(CoverpoolError::Config(format!(
                "service_fee_rate must be within [0, 1], got {}",
                self.service_fee_rate
            )));
        }
        Ok(())
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| CoverpoolError::Config(format!("invalid {} '{}': {}", key, raw, e)))
}
