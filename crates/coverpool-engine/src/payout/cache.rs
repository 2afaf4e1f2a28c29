//! In-memory quote cache
//!
//! Quotes are pure functions of the position, so a cached quote never goes
//! stale for the engine that produced it. Entries are keyed by a blake3
//! digest of the position fields as written. The scale is part of the key:
//! `750` and `750.00` compare equal but render differently in a quote.

use crate::payout::quote::PositionQuote;
use coverpool_common::InsurancePosition;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cached entries
    pub entry_count: u64,
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that had to compute
    pub misses: u64,
}

/// Capacity-bounded quote cache using DashMap
pub struct QuoteCache {
    cache: DashMap<String, PositionQuote>,
    max_entries: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl QuoteCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            cache: DashMap::new(),
            max_entries: max_entries.max(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, position: &InsurancePosition) -> Option<PositionQuote> {
        let key = cache_key(position);
        match self.cache.get(&key) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, "Cache hit");
                Some(entry.value().clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, "Cache miss");
                None
            }
        }
    }

    pub fn insert(&self, position: &InsurancePosition, quote: &PositionQuote) {
        let key = cache_key(position);

        // Evict an arbitrary entry if at capacity
        if self.cache.len() >= self.max_entries && !self.cache.contains_key(&key) {
            // Bind first so the shard read guard is released before removing
            let victim = self.cache.iter().next().map(|e| e.key().clone());
            if let Some(victim) = victim {
                self.cache.remove(&victim);
                debug!(key = %victim, "Evicted cached quote");
            }
        }

        self.cache.insert(key, quote.clone());
    }

    pub fn clear(&self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.cache.len() as u64,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

/// Deterministic key; `1.0` and `1.00` are distinct entries
fn cache_key(position: &InsurancePosition) -> String {
    let hash = blake3::hash(
        format!(
            "{}:{}:{}:{}:{}",
            position.coverage_amount,
            position.insurance_type.as_str(),
            position.payout_ratio,
            position.pool_total,
            position.my_stake
        )
        .as_bytes(),
    );
    format!("quote:{}", hash.to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::payout::engine::compute_payouts;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn quote_for(position: &InsurancePosition) -> PositionQuote {
        let payout = compute_payouts(position).unwrap();
        PositionQuote::build(position, payout, &EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_cache_key_generation() {
        let position = InsurancePosition::variable(dec!(750), dec!(2.0), dec!(1200), dec!(300));
        let key = cache_key(&position);

        assert!(key.starts_with("quote:"));
        assert_eq!(key.len(), "quote:".len() + 64);
    }

    #[test]
    fn test_cache_key_keeps_scale() {
        let a = InsurancePosition::variable(dec!(750), dec!(2.0), dec!(1200), dec!(300));
        let b = InsurancePosition::variable(dec!(750.00), dec!(2.0), dec!(1200), dec!(300));
        assert_eq!(a, b);
        assert_ne!(cache_key(&a), cache_key(&b));
        assert_eq!(cache_key(&a), cache_key(&a.clone()));

        let c = a.clone().with_stake(dec!(301));
        assert_ne!(cache_key(&a), cache_key(&c));
    }

    #[test]
    fn test_in_memory_cache() {
        let cache = QuoteCache::new(100);
        let position = InsurancePosition::fixed(dec!(1000), dec!(850), dec!(340));

        // Should be empty initially
        assert!(cache.get(&position).is_none());

        let quote = quote_for(&position);
        cache.insert(&position, &quote);

        // Should be cached now
        assert_eq!(cache.get(&position), Some(quote));
        assert_eq!(
            cache.stats(),
            CacheStats {
                entry_count: 1,
                hits: 1,
                misses: 1,
            }
        );
    }

    #[test]
    fn test_rescaled_position_misses() {
        let cache = QuoteCache::new(10);
        let padded = InsurancePosition::variable(dec!(750.00), dec!(2.0), dec!(1200), dec!(300));
        cache.insert(&padded, &quote_for(&padded));

        let plain = InsurancePosition::variable(dec!(750), dec!(2.0), dec!(1200), dec!(300));
        assert!(cache.get(&plain).is_none());
        assert_eq!(
            cache.get(&padded).unwrap().coverage_amount.to_string(),
            "750.00"
        );
    }

    #[test]
    fn test_in_memory_cache_eviction() {
        let cache = QuoteCache::new(2);

        for i in 1..=5 {
            let position =
                InsurancePosition::variable(dec!(1000), dec!(2), dec!(2000), Decimal::from(i));
            cache.insert(&position, &quote_for(&position));
        }

        // Should have evicted old entries
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }
}
