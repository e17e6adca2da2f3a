//! Configuration data models
//!
//! This module defines all configuration structures used throughout the gateway.

pub mod provider;
pub mod server;

pub use provider::*;
pub use server::*;

/// Default bind host
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    7939
}

/// Default per-provider request timeout in milliseconds
pub fn default_timeout_ms() -> u64 {
    30_000
}

/// Read a non-empty environment variable
pub(crate) fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Read and parse an environment variable, falling back to a default
pub(crate) fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
