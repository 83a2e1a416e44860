use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// Message role on the completion wire.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One entry in the conversation log.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// The persona and topic restriction for the advisor. Seeds every
/// conversation; never mutated afterwards.
pub const ADVISOR_DIRECTIVE: &str = "You are a helpful beauty advisor. Only answer questions \
     about routines, skincare, haircare, makeup, fragrance, and related beauty topics. If asked \
     about something else, politely say you can only help with beauty advice.";

/// Conversation history sent to the completion endpoint.
///
/// Append-only: no truncation, summarization, or token budgeting — the full
/// history goes out on every request. The first message is always the system
/// directive.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Conversation {
    pub messages: Vec<Message>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// Creates a new Conversation seeded with the default advisor directive.
    pub fn new() -> Self {
        Self::with_directive(ADVISOR_DIRECTIVE)
    }

    /// Creates a new Conversation seeded with a custom system directive.
    pub fn with_directive(directive: &str) -> Self {
        Conversation {
            messages: vec![Message {
                role: Role::System,
                content: directive.to_string(),
            }],
        }
    }

    pub fn push_user(&mut self, content: String) {
        self.messages.push(Message {
            role: Role::User,
            content,
        });
    }

    pub fn push_assistant(&mut self, content: String) {
        self.messages.push(Message {
            role: Role::Assistant,
            content,
        });
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Builds the routine-request prompt from the selected products.
///
/// Only the fields the advisor needs (name, brand, category, description) go
/// into the prompt, as pretty-printed JSON.
pub fn routine_prompt(selected: &[Product]) -> String {
    #[derive(Serialize)]
    struct ProductSummary<'a> {
        name: &'a str,
        brand: &'a str,
        category: &'a str,
        description: &'a str,
    }

    let summaries: Vec<ProductSummary<'_>> = selected
        .iter()
        .map(|p| ProductSummary {
            name: &p.name,
            brand: &p.brand,
            category: &p.category,
            description: &p.description,
        })
        .collect();
    let data = serde_json::to_string_pretty(&summaries).unwrap_or_else(|_| "[]".to_string());

    format!(
        "Here are my selected products:\n{data}\nPlease generate a personalized beauty routine for me."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_seeded_with_system_directive() {
        let conversation = Conversation::new();
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.messages[0].role, Role::System);
        assert!(
            conversation.messages[0]
                .content
                .starts_with("You are a helpful beauty advisor")
        );
    }

    #[test]
    fn test_with_directive_uses_custom_seed() {
        let conversation = Conversation::with_directive("Custom directive.");
        assert_eq!(conversation.messages[0].content, "Custom directive.");
        assert_eq!(conversation.messages[0].role, Role::System);
    }

    #[test]
    fn test_length_after_successful_turns() {
        let mut conversation = Conversation::new();
        for n in 1..=3 {
            conversation.push_user(format!("question {n}"));
            conversation.push_assistant(format!("answer {n}"));
            assert_eq!(conversation.len(), 1 + 2 * n);
        }
        // Seed is still first and untouched
        assert_eq!(conversation.messages[0].role, Role::System);
    }

    #[test]
    fn test_failed_turn_leaves_only_user_message() {
        let mut conversation = Conversation::new();
        conversation.push_user("first".to_string());
        conversation.push_assistant("reply".to_string());
        // Second turn fails: the user message stays, no assistant entry
        conversation.push_user("second".to_string());
        assert_eq!(conversation.len(), 4); // 1 + 2 + 1
        assert_eq!(conversation.messages.last().unwrap().role, Role::User);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn test_routine_prompt_embeds_product_fields() {
        let products = vec![Product {
            id: 1,
            name: "Hydra Boost Gel".to_string(),
            brand: "Glow Labs".to_string(),
            category: "moisturizer".to_string(),
            description: "Lightweight water gel.".to_string(),
            image: "https://example.com/hydra.png".to_string(),
        }];
        let prompt = routine_prompt(&products);
        assert!(prompt.starts_with("Here are my selected products:"));
        assert!(prompt.contains("Hydra Boost Gel"));
        assert!(prompt.contains("Glow Labs"));
        assert!(prompt.contains("moisturizer"));
        assert!(prompt.ends_with("Please generate a personalized beauty routine for me."));
        // The image URL is display data; it never goes to the advisor
        assert!(!prompt.contains("example.com/hydra.png"));
    }
}
