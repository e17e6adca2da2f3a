//! Core request and response types

pub mod requests;
pub mod responses;

pub use requests::{CallOptions, ChatRequest};
pub use responses::{ChatResult, TokenUsage};
