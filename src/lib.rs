//! # Red-Team Gateway
//!
//! An AI-assisted red-team penetration testing gateway for eKYC systems.
//! The gateway fronts multiple hosted generative-AI providers (Gemini,
//! Grok/xAI, Vertex AI) behind one resilient dispatch pipeline: prompt
//! construction, a single bounded provider attempt, and deterministic
//! fallback on any failure, with per-provider usage counters.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use redteam_gateway::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let gateway = Gateway::new(config)?;
//!     gateway.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! A provider without credentials does not prevent startup; every call to
//! it degrades to a well-formed fallback result with `is_fallback: true`.

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod monitoring;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::dispatcher::ResilientDispatcher;
pub use core::prompt::{PromptBuilder, PromptPair, RequestCategory};
pub use core::providers::{ChatProvider, ProviderError, ProviderKind};
pub use core::types::{CallOptions, ChatResult, TokenUsage};
pub use monitoring::UsageTracker;
pub use utils::error::{GatewayError, Result};

use tracing::info;

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// A minimal gateway wrapper over the HTTP server
pub struct Gateway {
    server: server::HttpServer,
}

impl Gateway {
    /// Create a new gateway instance
    pub fn new(config: Config) -> Result<Self> {
        info!("Creating new gateway instance");

        let server = server::HttpServer::new(&config)?;

        Ok(Self { server })
    }

    /// Run the gateway server
    pub async fn run(self) -> Result<()> {
        info!("Starting red-team gateway v{}", VERSION);

        self.server.start().await?;

        Ok(())
    }
}
