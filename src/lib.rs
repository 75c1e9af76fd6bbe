//! llm-bridge: expose a language-model client to an orchestration host
//!
//! A caller-owned [`client::LlmClient`] is wrapped in
//! [`wrapper::LlmClientWrapper`], which implements the host's
//! [`host::Llm`] plugin interface by forwarding each call to the client.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::too_many_lines)]

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
#[cfg(feature = "host")]
pub mod host;
pub mod support;
#[cfg(feature = "host")]
pub mod wrapper;

// Re-exports for convenience
pub use client::LlmClient;
pub use error::{BridgeError, Result};
#[cfg(feature = "host")]
pub use host::Llm;
#[cfg(feature = "host")]
pub use wrapper::LlmClientWrapper;
