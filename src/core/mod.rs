//! Core functionality for the gateway
//!
//! This module contains the dispatch pipeline: prompt construction,
//! provider adapters, resilient dispatch, and the attack catalog.

pub mod attack;
pub mod dispatcher;
pub mod prompt;
pub mod providers;
pub mod types;

pub use dispatcher::ResilientDispatcher;
pub use prompt::{PromptBuilder, PromptPair, RequestCategory};
pub use providers::{ChatProvider, ProviderError, ProviderKind};
pub use types::{CallOptions, ChatResult, TokenUsage};
