//! Secure messenger facade
//!
//! Drafts live in the [`CommunicationStore`] keyed by conversation, so
//! switching conversations never loses typed text. A draft is cleared only
//! after the backend accepted it.

use crate::analytics::{AnalyticsEvent, AnalyticsSink};
use crate::error::FeatureError;
use crate::remote::{Message, MessagesApi, SendMessageRequest};
use lex_views::{CommunicationStore, StoreContext};
use std::sync::Arc;

/// Secure messenger feature
pub struct SecureMessenger {
    store: CommunicationStore,
    api: Arc<dyn MessagesApi>,
    analytics: Arc<dyn AnalyticsSink>,
}

impl SecureMessenger {
    /// Create facade over the context's communication store
    pub fn new(
        context: &StoreContext,
        api: Arc<dyn MessagesApi>,
        analytics: Arc<dyn AnalyticsSink>,
    ) -> Self {
        Self {
            store: context.communication().clone(),
            api,
            analytics,
        }
    }

    /// View store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &CommunicationStore {
        &self.store
    }

    /// Show a conversation in the thread pane
    pub fn open_conversation(&self, conversation_id: impl Into<String>) {
        self.store.set_active_conversation(Some(conversation_id.into()));
    }

    /// Close the thread pane
    pub fn close_conversation(&self) {
        self.store.set_active_conversation(None);
    }

    /// Draft of the active conversation
    #[must_use]
    pub fn current_draft(&self) -> Option<String> {
        let state = self.store.get_state();
        let conversation_id = state.active_conversation_id.as_deref()?;
        state.draft(conversation_id).map(str::to_string)
    }

    /// Store typed text as the active conversation's draft
    ///
    /// # Errors
    /// Returns [`FeatureError::NoActiveConversation`] if no conversation is open.
    pub fn type_draft(&self, text: impl Into<String>) -> Result<(), FeatureError> {
        let conversation_id = self.active_conversation()?;
        self.store.save_draft(conversation_id, text);
        Ok(())
    }

    /// Throw away the active conversation's draft
    ///
    /// # Errors
    /// Returns [`FeatureError::NoActiveConversation`] if no conversation is open.
    pub fn discard_draft(&self) -> Result<(), FeatureError> {
        let conversation_id = self.active_conversation()?;
        self.store.clear_draft(&conversation_id);
        Ok(())
    }

    /// Send the active conversation's draft
    ///
    /// The draft is cleared on success unless it was edited while the
    /// request was in flight. On failure it is kept for a retry.
    ///
    /// # Errors
    /// - [`FeatureError::NoActiveConversation`] if no conversation is open
    /// - [`FeatureError::EmptyMessage`] if the draft is missing or blank
    /// - [`FeatureError::Api`] if delivery failed
    pub async fn send(&self) -> Result<Message, FeatureError> {
        let state = self.store.get_state();
        let conversation_id = state
            .active_conversation_id
            .clone()
            .ok_or(FeatureError::NoActiveConversation)?;
        let draft = state.draft(&conversation_id).unwrap_or_default().to_string();
        let body = draft.trim();
        if body.is_empty() {
            return Err(FeatureError::EmptyMessage);
        }

        let reply_to = state.reply_to_message_id.clone();
        let is_reply = reply_to.is_some();
        let request = SendMessageRequest::new(conversation_id.clone(), body, reply_to);
        tracing::debug!(
            conversation = %conversation_id,
            client_id = %request.client_message_id,
            "sending message"
        );

        let message = match self.api.send_message(request).await {
            Ok(message) => message,
            Err(err) => {
                tracing::warn!(conversation = %conversation_id, error = %err, "message not delivered");
                return Err(err.into());
            }
        };

        self.store.clear_draft_if(&conversation_id, &draft);
        if self.store.get_state().active_conversation_id.as_deref() == Some(conversation_id.as_str()) {
            self.store.cancel_reply();
        }
        self.analytics.track(AnalyticsEvent::MessageSent {
            conversation_id,
            is_reply,
        });
        Ok(message)
    }

    fn active_conversation(&self) -> Result<String, FeatureError> {
        self.store
            .get_state()
            .active_conversation_id
            .clone()
            .ok_or(FeatureError::NoActiveConversation)
    }
}

impl std::fmt::Debug for SecureMessenger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureMessenger")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
