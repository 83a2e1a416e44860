use std::fmt;

use async_trait::async_trait;

use super::types::Conversation;

/// Errors that can occur during a completion request.
#[derive(Debug)]
pub enum CompletionError {
    /// Provider misconfigured (missing API key, bad URL).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Endpoint returned an error response.
    Api { status: u16, message: String },
    /// Response arrived but did not contain a usable reply.
    Malformed(String),
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionError::Config(msg) => write!(f, "config error: {msg}"),
            CompletionError::Network(msg) => write!(f, "network error: {msg}"),
            CompletionError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            CompletionError::Malformed(msg) => write!(f, "malformed response: {msg}"),
        }
    }
}

impl std::error::Error for CompletionError {}

/// Everything a provider needs to fulfill a completion request.
pub struct CompletionRequest<'a> {
    pub conversation: &'a Conversation,
    pub model: &'a str,
    pub max_tokens: u32,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Sends the full conversation and returns the assistant's reply text.
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, CompletionError>;
}
