//! Monitoring for the gateway

pub mod usage;

pub use usage::{ProviderUsage, UsageStats, UsageTracker};
