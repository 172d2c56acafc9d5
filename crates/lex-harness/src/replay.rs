//! Script replay
//!
//! Applies a [`Script`] to a fresh [`StoreContext`] while counting the
//! notifications each store delivers, then reports the final states.

use crate::error::HarnessError;
use crate::script::Script;
use lex_views::{CommunicationState, DocumentState, ResearchState, StoreContext, ViewsConfig};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Notifications delivered per store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NotificationCounts {
    /// Documents store
    pub documents: u64,
    /// Research store
    pub research: u64,
    /// Communication store
    pub communication: u64,
}

impl NotificationCounts {
    /// Sum over all stores
    #[must_use]
    pub fn total(&self) -> u64 {
        self.documents + self.research + self.communication
    }
}

/// Outcome of a replay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    /// Actions applied
    pub actions_applied: usize,
    /// Transitions across all stores
    pub transitions: u64,
    /// Listener calls per store
    pub notifications: NotificationCounts,
    /// Final documents state
    pub documents: DocumentState,
    /// Final research state
    pub research: ResearchState,
    /// Final communication state
    pub communication: CommunicationState,
}

impl ReplayReport {
    /// Pretty JSON rendering
    ///
    /// # Errors
    /// Returns [`HarnessError::Render`] if serialization fails.
    pub fn to_json(&self) -> Result<String, HarnessError> {
        serde_json::to_string_pretty(self).map_err(HarnessError::Render)
    }

    /// Short human-readable summary
    #[must_use]
    pub fn generate_text(&self) -> String {
        format!(
            "Replay Report:\n  Actions: {}\n  Transitions: {}\n  Notifications: {} (documents {}, research {}, communication {})\n  Selected documents: {}\n  Folder path: /{}\n  Saved results: {}\n  Drafts: {}",
            self.actions_applied,
            self.transitions,
            self.notifications.total(),
            self.notifications.documents,
            self.notifications.research,
            self.notifications.communication,
            self.documents.selected_document_ids.len(),
            self.documents.folder_path.join("/"),
            self.research.saved_result_ids.len(),
            self.communication.drafts.len(),
        )
    }
}

/// Replay `script` on stores built from `config`
///
/// # Errors
/// Returns [`HarnessError::Config`] if `config` is invalid.
pub fn replay(script: &Script, config: ViewsConfig) -> Result<ReplayReport, HarnessError> {
    config.validate()?;
    let context = StoreContext::new(config);

    let documents = Arc::new(AtomicU64::new(0));
    let research = Arc::new(AtomicU64::new(0));
    let communication = Arc::new(AtomicU64::new(0));
    let _subscriptions = [
        context.documents().store().subscribe(counter(&documents)),
        context.research().store().subscribe(counter(&research)),
        context.communication().store().subscribe(counter(&communication)),
    ];

    for (index, action) in script.actions.iter().enumerate() {
        tracing::debug!(index, target_store = action.target(), ?action, "applying action");
        action.apply(&context);
    }

    let report = ReplayReport {
        actions_applied: script.len(),
        transitions: context.total_transitions(),
        notifications: NotificationCounts {
            documents: documents.load(Ordering::SeqCst),
            research: research.load(Ordering::SeqCst),
            communication: communication.load(Ordering::SeqCst),
        },
        documents: (*context.documents().get_state()).clone(),
        research: (*context.research().get_state()).clone(),
        communication: (*context.communication().get_state()).clone(),
    };
    tracing::info!(
        actions = report.actions_applied,
        notifications = report.notifications.total(),
        "replay finished"
    );
    Ok(report)
}

fn counter(count: &Arc<AtomicU64>) -> impl Fn() + Send + Sync + 'static {
    let count = Arc::clone(count);
    move || {
        count.fetch_add(1, Ordering::SeqCst);
    }
}
