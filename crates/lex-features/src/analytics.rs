//! Product analytics
//!
//! Facades report user actions as [`AnalyticsEvent`]s. Where they go is the
//! embedding application's concern; the default sink writes them to the
//! `lexdesk::analytics` tracing target.

use lex_views::{SearchType, ViewMode};
use parking_lot::Mutex;
use serde::Serialize;

/// User action worth counting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnalyticsEvent {
    /// Layout switched in a feature area
    ViewModeChanged {
        /// Feature area
        area: &'static str,
        /// New layout
        mode: ViewMode,
    },
    /// Document search text changed
    DocumentSearch {
        /// Query length, the text itself is never recorded
        query_len: usize,
        /// Active filter count after the change
        active_filters: usize,
    },
    /// Document opened in the preview pane
    DocumentOpened {
        /// Document
        document_id: String,
    },
    /// Selected documents deleted
    DocumentsDeleted {
        /// Deleted count
        count: usize,
    },
    /// Research search submitted
    ResearchSearch {
        /// Interpretation of the query
        search_type: SearchType,
        /// Whether filters narrowed the search
        filtered: bool,
    },
    /// Result bookmark flipped
    ResultSaved {
        /// Result
        result_id: String,
        /// New bookmark state
        saved: bool,
    },
    /// Message delivered
    MessageSent {
        /// Conversation
        conversation_id: String,
        /// Whether it answered another message
        is_reply: bool,
    },
}

impl AnalyticsEvent {
    /// Event name as serialized
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            AnalyticsEvent::ViewModeChanged { .. } => "view_mode_changed",
            AnalyticsEvent::DocumentSearch { .. } => "document_search",
            AnalyticsEvent::DocumentOpened { .. } => "document_opened",
            AnalyticsEvent::DocumentsDeleted { .. } => "documents_deleted",
            AnalyticsEvent::ResearchSearch { .. } => "research_search",
            AnalyticsEvent::ResultSaved { .. } => "result_saved",
            AnalyticsEvent::MessageSent { .. } => "message_sent",
        }
    }
}

/// Destination of analytics events
pub trait AnalyticsSink: Send + Sync {
    /// Record one event
    fn track(&self, event: AnalyticsEvent);
}

/// Sink writing events to tracing
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalytics;

impl AnalyticsSink for TracingAnalytics {
    fn track(&self, event: AnalyticsEvent) {
        tracing::info!(target: "lexdesk::analytics", event = event.name(), detail = ?event);
    }
}

/// Sink keeping events in memory
#[derive(Debug, Default)]
pub struct RecordingAnalytics {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl RecordingAnalytics {
    /// Create empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far
    #[must_use]
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().clone()
    }

    /// Names of recorded events, in order
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(AnalyticsEvent::name).collect()
    }

    /// Drop recorded events
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl AnalyticsSink for RecordingAnalytics {
    fn track(&self, event: AnalyticsEvent) {
        self.events.lock().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_tag_matches_name() {
        let event = AnalyticsEvent::ResultSaved {
            result_id: "r1".into(),
            saved: true,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], event.name());
        assert_eq!(json["saved"], true);
    }

    #[test]
    fn recorder_keeps_order() {
        let sink = RecordingAnalytics::new();
        sink.track(AnalyticsEvent::DocumentsDeleted { count: 2 });
        sink.track(AnalyticsEvent::DocumentOpened {
            document_id: "d1".into(),
        });

        assert_eq!(sink.names(), vec!["documents_deleted", "document_opened"]);
        sink.clear();
        assert!(sink.events().is_empty());
    }
}
