//! Communication view state
//!
//! Active conversation, per-conversation drafts and inbox filters of the
//! secure messenger. A cleared draft is removed from the map, so "has a
//! draft" is key presence.

use crate::config::ViewsConfig;
use crate::types::ViewMode;
use lex_store::{define_state, Binding, Store, StoreConfig};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Conversation id to unsent text
pub type DraftMap = im::OrdMap<String, String>;

/// Inbox filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationFilter {
    /// Every conversation
    #[default]
    All,
    /// With unread messages
    Unread,
    /// Flagged for follow-up
    Flagged,
    /// Archived
    Archived,
}

define_state! {
    /// Secure messenger view state
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct CommunicationState, patch CommunicationPatch {
        /// Conversation shown in the thread pane
        pub active_conversation_id: Option<String>,
        /// Unsent text per conversation
        pub drafts: DraftMap,
        /// Inbox filter
        pub conversation_filter: ConversationFilter,
        /// Inbox search text
        pub search_query: String,
        /// Message being replied to in the active conversation
        pub reply_to_message_id: Option<String>,
        /// Sidebar collapsed
        pub is_sidebar_collapsed: bool,
        /// Notification panel open
        pub is_notifications_open: bool,
        /// Inbox layout
        pub view_mode: ViewMode,
    }
}

impl CommunicationState {
    /// Draft text of a conversation
    #[inline]
    #[must_use]
    pub fn draft(&self, conversation_id: &str) -> Option<&str> {
        self.drafts.get(conversation_id).map(String::as_str)
    }
}

/// Store for the communication area
#[derive(Debug, Clone)]
pub struct CommunicationStore {
    store: Store<CommunicationState>,
}

impl CommunicationStore {
    /// Store name used in logs
    pub const NAME: &'static str = "communication";

    /// Create store with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&ViewsConfig::default())
    }

    /// Create store from view configuration
    #[must_use]
    pub fn with_config(config: &ViewsConfig) -> Self {
        Self::from_state(CommunicationState::default(), config.store_config())
    }

    /// Create store with an explicit initial state
    #[must_use]
    pub fn from_state(initial: CommunicationState, config: StoreConfig) -> Self {
        Self {
            store: Store::with_config(Self::NAME, initial, config),
        }
    }

    /// Underlying store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &Store<CommunicationState> {
        &self.store
    }

    /// Current snapshot, without subscribing
    #[inline]
    #[must_use]
    pub fn get_state(&self) -> Arc<CommunicationState> {
        self.store.get_state()
    }

    /// Mount a view on this store
    pub fn bind<F>(&self, schedule_render: F) -> Binding<CommunicationState>
    where
        F: Fn() + Send + Sync + 'static,
    {
        Binding::mount(&self.store, schedule_render)
    }

    /// Open a conversation; any pending reply target is dropped
    pub fn set_active_conversation(&self, conversation_id: Option<String>) {
        self.store.set_state(CommunicationPatch {
            active_conversation_id: Some(conversation_id),
            reply_to_message_id: Some(None),
            ..Default::default()
        });
    }

    /// Insert or replace the draft of a conversation
    pub fn save_draft(&self, conversation_id: impl Into<String>, text: impl Into<String>) {
        let (conversation_id, text) = (conversation_id.into(), text.into());
        self.store.update(|s| CommunicationPatch {
            drafts: Some(s.drafts.update(conversation_id, text)),
            ..Default::default()
        });
    }

    /// Remove the draft of a conversation
    pub fn clear_draft(&self, conversation_id: &str) {
        self.store.update(|s| CommunicationPatch {
            drafts: Some(s.drafts.without(conversation_id)),
            ..Default::default()
        });
    }

    /// Remove the draft only while it still reads `expected`
    ///
    /// Returns whether it was removed.
    pub fn clear_draft_if(&self, conversation_id: &str, expected: &str) -> bool {
        let mut cleared = false;
        self.store.update(|s| {
            if s.draft(conversation_id) != Some(expected) {
                return CommunicationPatch::default();
            }
            cleared = true;
            CommunicationPatch {
                drafts: Some(s.drafts.without(conversation_id)),
                ..Default::default()
            }
        });
        cleared
    }

    /// Draft text; `None` when the conversation has no draft
    #[must_use]
    pub fn get_draft(&self, conversation_id: &str) -> Option<String> {
        self.store.get_state().draft(conversation_id).map(str::to_string)
    }

    /// Whether a draft exists for the conversation
    #[must_use]
    pub fn has_draft(&self, conversation_id: &str) -> bool {
        self.store.get_state().drafts.contains_key(conversation_id)
    }

    /// Number of conversations with a draft
    #[must_use]
    pub fn draft_count(&self) -> usize {
        self.store.get_state().drafts.len()
    }

    /// Switch inbox filter
    pub fn set_conversation_filter(&self, filter: ConversationFilter) {
        self.store.set_state(CommunicationPatch {
            conversation_filter: Some(filter),
            ..Default::default()
        });
    }

    /// Update inbox search text
    pub fn set_search_query(&self, query: impl Into<String>) {
        self.store.set_state(CommunicationPatch {
            search_query: Some(query.into()),
            ..Default::default()
        });
    }

    /// Reply to a message in the active conversation
    pub fn start_reply(&self, message_id: impl Into<String>) {
        self.store.set_state(CommunicationPatch {
            reply_to_message_id: Some(Some(message_id.into())),
            ..Default::default()
        });
    }

    /// Drop the reply target
    pub fn cancel_reply(&self) {
        self.store.set_state(CommunicationPatch {
            reply_to_message_id: Some(None),
            ..Default::default()
        });
    }

    /// Switch inbox layout
    pub fn set_view_mode(&self, mode: ViewMode) {
        self.store.set_state(CommunicationPatch {
            view_mode: Some(mode),
            ..Default::default()
        });
    }

    /// Collapse or expand the sidebar
    pub fn toggle_sidebar(&self) {
        self.store.update(|s| CommunicationPatch {
            is_sidebar_collapsed: Some(!s.is_sidebar_collapsed),
            ..Default::default()
        });
    }

    /// Open or close the notification panel
    pub fn toggle_notifications(&self) {
        self.store.update(|s| CommunicationPatch {
            is_notifications_open: Some(!s.is_notifications_open),
            ..Default::default()
        });
    }

    /// Back to the initial state
    pub fn reset(&self) {
        self.store.reset();
    }
}

impl Default for CommunicationStore {
    fn default() -> Self {
        Self::new()
    }
}
