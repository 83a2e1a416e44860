//! OpenAI-compatible provider using the Chat Completions API.
//!
//! One POST per turn, no streaming. The reply is the first choice's message
//! content; any other response shape is treated as malformed.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::completion::provider::{CompletionError, CompletionProvider, CompletionRequest};
use crate::completion::types::Message;

// ============================================================================
// Chat Completions API Types
// ============================================================================

/// The request body for the chat completions endpoint.
#[derive(Serialize, Debug)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: u32,
}

/// The response body. Every level is optional so that a missing field
/// surfaces as `Malformed` rather than a deserialization failure.
#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug, Default)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Extracts the first choice's message content from a parsed response.
fn extract_reply(response: ChatResponse) -> Result<String, CompletionError> {
    response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CompletionError::Malformed("response contained no choices".to_string()))?
        .message
        .ok_or_else(|| CompletionError::Malformed("first choice had no message".to_string()))?
        .content
        .ok_or_else(|| CompletionError::Malformed("message had no content".to_string()))
}

// ============================================================================
// Provider Implementation
// ============================================================================

pub struct OpenAiProvider {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// Creates a new provider.
    ///
    /// # Arguments
    /// * `api_key` - Bearer credential for the endpoint
    /// * `base_url` - Optional custom base URL (defaults to OpenAI's API)
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, CompletionError> {
        let body = ChatRequest {
            model: request.model,
            messages: &request.conversation.messages,
            max_tokens: request.max_tokens,
        };

        info!(
            "Chat completion request: model={}, messages={}, max_tokens={}",
            request.model,
            body.messages.len(),
            request.max_tokens
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        debug!("Chat completion response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Chat completion API error: {} - {}", status, message);
            return Err(CompletionError::Api { status, message });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Malformed(e.to_string()))?;
        let reply = extract_reply(parsed)?;

        info!("Chat completion reply: {} bytes", reply.len());
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::types::{Conversation, Role};

    #[test]
    fn test_extract_reply_first_choice_content() {
        let response = ChatResponse {
            choices: vec![
                Choice {
                    message: Some(ChoiceMessage {
                        content: Some("first".to_string()),
                    }),
                },
                Choice {
                    message: Some(ChoiceMessage {
                        content: Some("second".to_string()),
                    }),
                },
            ],
        };
        assert_eq!(extract_reply(response).unwrap(), "first");
    }

    #[test]
    fn test_extract_reply_empty_choices_is_malformed() {
        let response = ChatResponse { choices: vec![] };
        assert!(matches!(
            extract_reply(response),
            Err(CompletionError::Malformed(_))
        ));
    }

    #[test]
    fn test_extract_reply_missing_message_is_malformed() {
        let response = ChatResponse {
            choices: vec![Choice { message: None }],
        };
        assert!(matches!(
            extract_reply(response),
            Err(CompletionError::Malformed(_))
        ));
    }

    #[test]
    fn test_extract_reply_missing_content_is_malformed() {
        let response = ChatResponse {
            choices: vec![Choice {
                message: Some(ChoiceMessage { content: None }),
            }],
        };
        assert!(matches!(
            extract_reply(response),
            Err(CompletionError::Malformed(_))
        ));
    }

    #[test]
    fn test_chat_response_deserializes_without_choices_key() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"error": "overloaded"}"#).unwrap();
        assert!(parsed.choices.is_empty());
    }

    #[test]
    fn test_chat_request_serialization() {
        let mut conversation = Conversation::new();
        conversation.push_user("What moisturizer should I use?".to_string());

        let body = ChatRequest {
            model: "gpt-4o",
            messages: &conversation.messages,
            max_tokens: 400,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains(r#""model":"gpt-4o""#));
        assert!(json.contains(r#""max_tokens":400"#));
        assert!(json.contains(r#""role":"system""#));
        assert!(json.contains(r#""role":"user""#));
    }

    #[test]
    fn test_conversation_roles_survive_round_trip() {
        let message = Message {
            role: Role::Assistant,
            content: "Cleanse first.".to_string(),
        };
        let json = serde_json::to_string(&message).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, message);
    }
}
