//! Azure OpenAI chat-completions client.
//!
//! DESIGN
//! ======
//! One POST per generation, no streaming, fixed sampling parameters. Two
//! transports: `Direct` talks to the configured deployment with a bearer
//! token; `Relay` posts the same payload to a fixed pass-through address
//! with the endpoint, deployment and token embedded in the request body
//! instead of headers. The relay is trusted to forward the request
//! verbatim; its internals are out of scope here.

use serde::Serialize;
use serde_json::Value;

use super::types::{LlmChat, LlmError, Message};
use crate::services::settings::Settings;

pub const API_VERSION: &str = "2024-02-15-preview";
pub const DEFAULT_RELAY_URL: &str = "https://dcr-proxy.a-reitterjr.workers.dev";
pub const MAX_TOKENS: u32 = 1500;
pub const TEMPERATURE: f32 = 0.7;

const NO_CHOICES_PLACEHOLDER: &str = "No response generated.";

// =============================================================================
// TRANSPORT
// =============================================================================

/// How the chat request reaches the endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    /// POST straight to the configured deployment with a bearer token.
    Direct,
    /// POST to a pass-through relay, credentials embedded in the body.
    Relay(String),
}

impl Transport {
    /// Relay transport at the fixed pass-through address.
    #[must_use]
    pub fn relay() -> Self {
        Self::Relay(DEFAULT_RELAY_URL.to_string())
    }
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Debug)]
pub struct AzureOpenAiClient {
    http: reqwest::Client,
    endpoint: String,
    deployment: String,
    token: String,
    transport: Transport,
}

impl AzureOpenAiClient {
    /// Build a client from the saved settings.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::NotConfigured`] when the AI endpoint or AI
    /// token is unset.
    pub fn from_settings(settings: &Settings, transport: Transport) -> Result<Self, LlmError> {
        if settings.ai_endpoint.trim().is_empty() {
            return Err(LlmError::NotConfigured("AI endpoint"));
        }
        if settings.ai_token.trim().is_empty() {
            return Err(LlmError::NotConfigured("AI token"));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: settings.ai_endpoint.trim().trim_end_matches('/').to_string(),
            deployment: settings.ai_deployment.trim().to_string(),
            token: settings.ai_token.trim().to_string(),
            transport,
        })
    }

    fn direct_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={API_VERSION}",
            self.endpoint, self.deployment
        )
    }

    async fn send(&self, messages: &[Message]) -> Result<String, LlmError> {
        let request = match &self.transport {
            Transport::Direct => self
                .http
                .post(self.direct_url())
                .bearer_auth(&self.token)
                .json(&DirectRequest { messages, max_tokens: MAX_TOKENS, temperature: TEMPERATURE }),
            Transport::Relay(url) => self.http.post(url).json(&RelayRequest {
                endpoint: &self.endpoint,
                deployment: &self.deployment,
                token: &self.token,
                messages,
                max_tokens: MAX_TOKENS,
                temperature: TEMPERATURE,
            }),
        };

        tracing::info!(transport = transport_name(&self.transport), "sending chat request");
        let response = request
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if !status.is_success() {
            return Err(LlmError::ApiResponse {
                status: status.as_u16(),
                message: extract_error_message(&text, status.as_u16()),
            });
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl LlmChat for AzureOpenAiClient {
    async fn chat(&self, messages: &[Message]) -> Result<String, LlmError> {
        let text = self.send(messages).await?;
        parse_chat_response(&text)
    }
}

fn transport_name(transport: &Transport) -> &'static str {
    match transport {
        Transport::Direct => "direct",
        Transport::Relay(_) => "relay",
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct DirectRequest<'a> {
    messages: &'a [Message],
    max_tokens: u32,
    temperature: f32,
}

/// Relay body: the direct payload plus the credentials the relay injects
/// toward the real endpoint.
#[derive(Serialize)]
struct RelayRequest<'a> {
    endpoint: &'a str,
    deployment: &'a str,
    token: &'a str,
    messages: &'a [Message],
    max_tokens: u32,
    temperature: f32,
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

/// First choice's message content, or a fixed placeholder when the
/// response carries no choices.
pub(crate) fn parse_chat_response(json_text: &str) -> Result<String, LlmError> {
    let root: Value =
        serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    Ok(root
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .unwrap_or(NO_CHOICES_PLACEHOLDER)
        .to_string())
}

/// Nested `error.message` from an error body when present, else the raw
/// status code.
pub(crate) fn extract_error_message(body: &str, status: u16) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|root| {
            root.get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| format!("HTTP {status}"))
}

#[cfg(test)]
#[path = "azure_test.rs"]
mod tests;
