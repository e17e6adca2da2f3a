//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::attack::AttackSimulator;
use crate::core::dispatcher::ResilientDispatcher;
use crate::monitoring::UsageTracker;
use crate::utils::error::Result;
use std::sync::Arc;

/// Shared resources available to every request handler
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (read-only)
    pub config: Arc<Config>,
    /// Resilient AI dispatcher over all providers
    pub dispatcher: Arc<ResilientDispatcher>,
    /// Process-wide usage counters
    pub usage: Arc<UsageTracker>,
    /// Attack simulator
    pub simulator: Arc<AttackSimulator>,
}

impl AppState {
    /// Build the full state from configuration
    pub fn from_config(config: Config) -> Result<Self> {
        let usage = Arc::new(UsageTracker::new());
        let dispatcher = Arc::new(ResilientDispatcher::from_config(
            &config.providers,
            Arc::clone(&usage),
        )?);

        Ok(Self {
            config: Arc::new(config),
            dispatcher,
            usage,
            simulator: Arc::new(AttackSimulator::from_entropy()),
        })
    }
}
