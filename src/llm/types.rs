//! Chat types — messages and errors shared by the chat transports.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by the chat client.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A required AI setting is absent.
    #[error("AI not configured: {0} is not set")]
    NotConfigured(&'static str),

    /// The HTTP request failed before any response arrived.
    #[error("chat request failed: {0}")]
    ApiRequest(String),

    /// The chat endpoint returned a non-success HTTP status. `message` is
    /// the endpoint's nested `error.message` when the body carries one,
    /// else the raw status code.
    #[error("chat endpoint error: {message}")]
    ApiResponse { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("chat response parse failed: {0}")]
    ApiParse(String),
}

// =============================================================================
// MESSAGES
// =============================================================================

/// A single chat message on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

// =============================================================================
// CHAT SEAM
// =============================================================================

/// Async chat seam between the response generator and the real endpoint.
/// Enables mocking in tests.
#[async_trait::async_trait]
pub trait LlmChat: Send + Sync {
    /// Send one chat request and return the generated text.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails or the response is
    /// malformed.
    async fn chat(&self, messages: &[Message]) -> Result<String, LlmError>;
}
