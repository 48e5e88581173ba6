//! LLM — chat-completions client behind a mockable seam.
//!
//! DESIGN
//! ======
//! The response generator only talks to the [`LlmChat`] trait.
//! [`AzureOpenAiClient`] is the one real implementation, reaching the
//! deployment either directly or through the pass-through relay.

pub mod azure;
pub mod types;

pub use azure::{AzureOpenAiClient, Transport};
pub use types::{LlmChat, LlmError, Message};
