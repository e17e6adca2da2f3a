//! Per-provider usage counters
//!
//! Process-wide, zeroed at start, never persisted. Increments are atomic so
//! concurrent in-flight requests lose no updates; `stats()` is a read-only
//! snapshot.

use dashmap::DashMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one provider
#[derive(Debug, Default)]
struct ProviderCounters {
    total_requests: AtomicU64,
    error_count: AtomicU64,
}

/// Process-wide usage tracker
#[derive(Debug, Default)]
pub struct UsageTracker {
    counters: DashMap<String, ProviderCounters>,
}

impl UsageTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-register a provider so it appears in stats with zero counters
    pub fn register(&self, provider: &str) {
        self.counters.entry(provider.to_string()).or_default();
    }

    /// Record one dispatched request
    pub fn record_request(&self, provider: &str) {
        self.counters
            .entry(provider.to_string())
            .or_default()
            .total_requests
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Record one failed provider call
    pub fn record_error(&self, provider: &str) {
        self.counters
            .entry(provider.to_string())
            .or_default()
            .error_count
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Read-only snapshot of all counters
    pub fn stats(&self) -> UsageStats {
        let mut providers = BTreeMap::new();
        let mut total_requests = 0;
        let mut total_errors = 0;

        for entry in self.counters.iter() {
            let requests = entry.total_requests.load(Ordering::Relaxed);
            let errors = entry.error_count.load(Ordering::Relaxed);
            total_requests += requests;
            total_errors += errors;

            providers.insert(
                entry.key().clone(),
                ProviderUsage {
                    total_requests: requests,
                    error_count: errors,
                    success_rate: success_rate(requests, errors),
                },
            );
        }

        UsageStats {
            providers,
            total_requests,
            total_errors,
        }
    }

    /// Zero all counters; explicit operator action only
    pub fn reset(&self) {
        for entry in self.counters.iter() {
            entry.total_requests.store(0, Ordering::Relaxed);
            entry.error_count.store(0, Ordering::Relaxed);
        }
    }
}

/// Snapshot of one provider's counters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderUsage {
    pub total_requests: u64,
    pub error_count: u64,
    /// Share of requests that did not degrade to fallback, percent
    pub success_rate: f64,
}

/// Snapshot of all usage counters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageStats {
    pub providers: BTreeMap<String, ProviderUsage>,
    pub total_requests: u64,
    pub total_errors: u64,
}

fn success_rate(requests: u64, errors: u64) -> f64 {
    if requests == 0 {
        return 100.0;
    }
    ((requests - errors) as f64 / requests as f64 * 100.0).round()
}
