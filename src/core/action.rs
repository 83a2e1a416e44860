//! # Actions
//!
//! Everything that can happen in Lumi becomes an `Action`.
//! User presses Enter? That's `Action::SubmitChat`.
//! Completion endpoint responds? That's `Action::CompletionFinished`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an `Effect` describing any I/O the UI adapter must
//! spawn. No network calls happen here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: apply an action, assert on the state and
//! the returned effect.

use log::{info, warn};

use crate::catalog::{CatalogError, Product};
use crate::completion::{CompletionError, Role, routine_prompt};
use crate::core::state::{App, TranscriptEntry};

/// Transcript notice shown when the endpoint fails or misbehaves.
pub const GENERIC_FAILURE_NOTICE: &str = "Sorry, something went wrong. Please try again.";

/// Transcript notice shown when a routine is requested with nothing selected.
pub const EMPTY_SELECTION_NOTICE: &str = "Please select products to generate a routine.";

#[derive(Debug)]
pub enum Action {
    /// Free-text submission from the input box.
    SubmitChat(String),
    /// Routine request over the current selection.
    GenerateRoutine,
    /// Completion call finished with a reply or an error.
    CompletionFinished(Result<String, CompletionError>),
    /// Toggle a product in or out of the selection.
    ToggleProduct(Product),
    /// Remove a product from the selection by id.
    RemoveSelected(u32),
    /// Set (or clear) the active category filter.
    SelectCategory(Option<String>),
    /// Re-fetch the catalog.
    ReloadCatalog,
    /// Catalog fetch finished.
    CatalogLoaded(Result<Vec<Product>, CatalogError>),
    Quit,
}

/// Follow-up work the UI adapter must perform after an update.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    /// Spawn a completion request carrying the current conversation.
    SpawnCompletion,
    /// Spawn a catalog fetch.
    LoadCatalog,
    Quit,
}

/// Applies an action to the state and returns the follow-up effect.
pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SubmitChat(text) => {
            let text = text.trim().to_string();
            if text.is_empty() {
                return Effect::None;
            }
            // Turns are serialized: while a request is in flight, further
            // submissions are dropped so replies cannot interleave.
            if app.is_loading {
                return Effect::None;
            }
            app.conversation.push_user(text.clone());
            app.transcript.push(TranscriptEntry::Message {
                role: Role::User,
                content: text,
            });
            app.is_loading = true;
            app.status_message = String::from("Thinking...");
            Effect::SpawnCompletion
        }
        Action::GenerateRoutine => {
            if app.is_loading {
                return Effect::None;
            }
            if app.selection.is_empty() {
                app.transcript
                    .push(TranscriptEntry::Notice(EMPTY_SELECTION_NOTICE.to_string()));
                return Effect::None;
            }
            let prompt = routine_prompt(app.selection.items());
            app.conversation.push_user(prompt);
            app.is_loading = true;
            app.status_message = String::from("Generating your personalized routine...");
            Effect::SpawnCompletion
        }
        Action::CompletionFinished(Ok(reply)) => {
            app.conversation.push_assistant(reply.clone());
            app.transcript.push(TranscriptEntry::Message {
                role: Role::Assistant,
                content: reply,
            });
            app.is_loading = false;
            app.status_message = String::from("Ready");
            Effect::None
        }
        Action::CompletionFinished(Err(e)) => {
            warn!("Completion failed: {e}");
            // The failed turn keeps its user message; no assistant entry is
            // appended.
            app.transcript
                .push(TranscriptEntry::Notice(GENERIC_FAILURE_NOTICE.to_string()));
            app.is_loading = false;
            app.status_message = format!("Request failed: {e}");
            Effect::None
        }
        Action::ToggleProduct(product) => {
            app.selection.toggle(product);
            Effect::None
        }
        Action::RemoveSelected(id) => {
            app.selection.remove(id);
            Effect::None
        }
        Action::SelectCategory(category) => {
            app.status_message = match &category {
                Some(c) => format!("Category: {c}"),
                None => String::from("All categories"),
            };
            app.active_category = category;
            Effect::None
        }
        Action::ReloadCatalog => {
            app.status_message = String::from("Loading catalog...");
            Effect::LoadCatalog
        }
        Action::CatalogLoaded(Ok(products)) => {
            info!("Catalog loaded: {} products", products.len());
            app.status_message = format!("{} products", products.len());
            app.catalog = products;
            app.catalog_error = None;
            Effect::None
        }
        Action::CatalogLoaded(Err(e)) => {
            warn!("Catalog load failed: {e}");
            // Previously loaded products stay in place.
            app.catalog_error = Some(e.to_string());
            app.status_message = String::from("Catalog load failed");
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_catalog, sample_product, test_app};

    #[test]
    fn test_submit_chat_appends_user_and_spawns() {
        let mut app = test_app();
        let effect = update(&mut app, Action::SubmitChat("What cleanser?".to_string()));
        assert_eq!(effect, Effect::SpawnCompletion);
        assert_eq!(app.conversation.len(), 2);
        assert!(app.is_loading);
        assert_eq!(
            app.transcript.last(),
            Some(&TranscriptEntry::Message {
                role: Role::User,
                content: "What cleanser?".to_string()
            })
        );
    }

    #[test]
    fn test_submit_chat_blank_is_ignored() {
        let mut app = test_app();
        let effect = update(&mut app, Action::SubmitChat("   ".to_string()));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.conversation.len(), 1);
        assert!(app.transcript.is_empty());
    }

    #[test]
    fn test_submit_while_loading_is_dropped() {
        let mut app = test_app();
        update(&mut app, Action::SubmitChat("first".to_string()));
        let effect = update(&mut app, Action::SubmitChat("second".to_string()));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.conversation.len(), 2); // seed + first only
    }

    #[test]
    fn test_generate_routine_with_empty_selection() {
        let mut app = test_app();
        let effect = update(&mut app, Action::GenerateRoutine);
        // No network call, just an inline notice
        assert_eq!(effect, Effect::None);
        assert!(!app.is_loading);
        assert_eq!(app.conversation.len(), 1);
        assert_eq!(
            app.transcript.last(),
            Some(&TranscriptEntry::Notice(EMPTY_SELECTION_NOTICE.to_string()))
        );
    }

    #[test]
    fn test_generate_routine_with_selection_spawns() {
        let mut app = test_app();
        app.selection.toggle(sample_product(1, "skincare"));
        let effect = update(&mut app, Action::GenerateRoutine);
        assert_eq!(effect, Effect::SpawnCompletion);
        assert!(app.is_loading);
        assert_eq!(app.conversation.len(), 2);
        let prompt = &app.conversation.messages[1].content;
        assert!(prompt.starts_with("Here are my selected products:"));
    }

    #[test]
    fn test_generate_routine_while_loading_is_dropped() {
        let mut app = test_app();
        app.selection.toggle(sample_product(1, "skincare"));
        update(&mut app, Action::GenerateRoutine);
        let effect = update(&mut app, Action::GenerateRoutine);
        assert_eq!(effect, Effect::None);
        assert_eq!(app.conversation.len(), 2);
    }

    #[test]
    fn test_conversation_length_after_turns() {
        let mut app = test_app();
        for n in 1..=2 {
            update(&mut app, Action::SubmitChat(format!("question {n}")));
            update(
                &mut app,
                Action::CompletionFinished(Ok(format!("answer {n}"))),
            );
            assert_eq!(app.conversation.len(), 1 + 2 * n);
        }
        assert!(!app.is_loading);
    }

    #[test]
    fn test_failed_turn_appends_notice_not_assistant() {
        let mut app = test_app();
        update(&mut app, Action::SubmitChat("hello".to_string()));
        let effect = update(
            &mut app,
            Action::CompletionFinished(Err(CompletionError::Malformed(
                "response contained no choices".to_string(),
            ))),
        );
        assert_eq!(effect, Effect::None);
        assert!(!app.is_loading);
        // History keeps only the user's own message for the failed turn
        assert_eq!(app.conversation.len(), 2);
        assert_eq!(app.conversation.messages.last().unwrap().role, Role::User);
        assert_eq!(
            app.transcript.last(),
            Some(&TranscriptEntry::Notice(GENERIC_FAILURE_NOTICE.to_string()))
        );
    }

    #[test]
    fn test_toggle_and_remove_flow_through_reducer() {
        let mut app = test_app();
        update(&mut app, Action::ToggleProduct(sample_product(1, "skincare")));
        assert!(app.selection.contains(1));
        update(&mut app, Action::ToggleProduct(sample_product(1, "skincare")));
        assert!(!app.selection.contains(1));
        update(&mut app, Action::RemoveSelected(1)); // no-op
        assert!(app.selection.is_empty());
    }

    #[test]
    fn test_select_category_updates_filter() {
        let mut app = test_app();
        app.catalog = sample_catalog();
        let effect = update(&mut app, Action::SelectCategory(Some("makeup".to_string())));
        assert_eq!(effect, Effect::None);
        assert!(app.visible_products().iter().all(|p| p.category == "makeup"));
        update(&mut app, Action::SelectCategory(None));
        assert_eq!(app.visible_products(), app.catalog);
    }

    #[test]
    fn test_catalog_load_failure_keeps_prior_products() {
        let mut app = test_app();
        update(&mut app, Action::CatalogLoaded(Ok(sample_catalog())));
        let before = app.catalog.clone();
        update(
            &mut app,
            Action::CatalogLoaded(Err(CatalogError::Network("connection refused".to_string()))),
        );
        assert_eq!(app.catalog, before);
        assert!(app.catalog_error.is_some());
    }

    #[test]
    fn test_reload_catalog_returns_load_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::ReloadCatalog), Effect::LoadCatalog);
    }

    #[test]
    fn test_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }

    #[tokio::test]
    async fn test_full_turn_appends_assistant_reply() {
        use crate::completion::CompletionRequest;
        use crate::test_support::CannedProvider;
        use std::sync::Arc;

        let mut app = test_app();
        app.provider = Arc::new(CannedProvider {
            reply: "Cleanse first, then moisturize.".to_string(),
        });

        let effect = update(&mut app, Action::SubmitChat("What order?".to_string()));
        assert_eq!(effect, Effect::SpawnCompletion);

        let result = app
            .provider
            .complete(CompletionRequest {
                conversation: &app.conversation,
                model: &app.model_name,
                max_tokens: app.max_reply_tokens,
            })
            .await;
        update(&mut app, Action::CompletionFinished(result));

        assert_eq!(app.conversation.len(), 3); // seed + user + assistant
        assert_eq!(
            app.conversation.messages.last().unwrap().content,
            "Cleanse first, then moisturize."
        );
        assert!(!app.is_loading);
    }

    #[tokio::test]
    async fn test_full_turn_with_failing_provider_shows_notice() {
        use crate::completion::CompletionRequest;
        use crate::test_support::FailingProvider;
        use std::sync::Arc;

        let mut app = test_app();
        app.provider = Arc::new(FailingProvider);

        update(&mut app, Action::SubmitChat("What order?".to_string()));
        let result = app
            .provider
            .complete(CompletionRequest {
                conversation: &app.conversation,
                model: &app.model_name,
                max_tokens: app.max_reply_tokens,
            })
            .await;
        update(&mut app, Action::CompletionFinished(result));

        assert_eq!(app.conversation.len(), 2); // seed + user only
        assert_eq!(
            app.transcript.last(),
            Some(&TranscriptEntry::Notice(GENERIC_FAILURE_NOTICE.to_string()))
        );
        assert!(!app.is_loading);
    }
}
