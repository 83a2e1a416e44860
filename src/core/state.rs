//! # Application State
//!
//! Core business state for Lumi. This module contains domain data only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── provider: Arc<dyn CompletionProvider>  // completion endpoint
//! ├── catalog: Vec<Product>          // full catalog, last successful fetch
//! ├── catalog_error: Option<String>  // inline grid placeholder
//! ├── active_category: Option<String> // current filter
//! ├── selection: SelectionSet        // chosen products
//! ├── conversation: Conversation     // API-facing message history
//! ├── transcript: Vec<TranscriptEntry> // render-facing chat log
//! ├── status_message: String         // title bar text
//! ├── model_name: String             // completion model
//! ├── max_reply_tokens: u32          // per-reply token cap
//! └── is_loading: bool               // completion turn in flight
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use crate::catalog::{Product, distinct_categories, filter_by_category};
use crate::completion::{CompletionProvider, Conversation, Role};
use crate::core::config::ResolvedConfig;
use crate::core::selection::SelectionSet;

/// One renderable entry in the chat panel.
///
/// Notices are inline placeholders (failure text, hints). They are part of
/// the visible transcript but never sent to the completion endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptEntry {
    Message { role: Role, content: String },
    Notice(String),
}

pub struct App {
    pub provider: Arc<dyn CompletionProvider>,
    pub catalog: Vec<Product>,
    pub catalog_error: Option<String>,
    pub active_category: Option<String>,
    pub selection: SelectionSet,
    pub conversation: Conversation,
    pub transcript: Vec<TranscriptEntry>,
    pub status_message: String,
    pub model_name: String,
    pub max_reply_tokens: u32,
    pub is_loading: bool,
}

impl App {
    pub fn new(provider: Arc<dyn CompletionProvider>, model_name: String) -> Self {
        Self {
            provider,
            catalog: Vec::new(),
            catalog_error: None,
            active_category: None,
            selection: SelectionSet::new(),
            conversation: Conversation::new(),
            transcript: Vec::new(),
            status_message: String::from("Welcome to Lumi!"),
            model_name,
            max_reply_tokens: crate::core::config::DEFAULT_MAX_REPLY_TOKENS,
            is_loading: false,
        }
    }

    pub fn from_config(provider: Arc<dyn CompletionProvider>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(provider, config.model_name.clone());
        app.max_reply_tokens = config.max_reply_tokens;
        app.active_category = config.initial_category.clone();
        app.conversation = Conversation::with_directive(&config.system_prompt);
        app
    }

    /// Products visible under the active category filter, catalog order
    /// preserved. Recomputed on every frame, so the grid always reflects the
    /// current filter.
    pub fn visible_products(&self) -> Vec<Product> {
        filter_by_category(&self.catalog, self.active_category.as_deref())
    }

    /// Distinct catalog categories for the picker overlay.
    pub fn categories(&self) -> Vec<String> {
        distinct_categories(&self.catalog)
    }
}
