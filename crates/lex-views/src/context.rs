//! Application-root store context
//!
//! One [`StoreContext`] is built at startup and handed down to the feature
//! layer. Each test builds its own, so no state leaks between cases.

use crate::communication::CommunicationStore;
use crate::config::ViewsConfig;
use crate::documents::DocumentStore;
use crate::research::ResearchStore;

/// The three domain stores of one client session
#[derive(Debug, Clone)]
pub struct StoreContext {
    config: ViewsConfig,
    documents: DocumentStore,
    research: ResearchStore,
    communication: CommunicationStore,
}

impl StoreContext {
    /// Build every store from `config`
    #[must_use]
    pub fn new(config: ViewsConfig) -> Self {
        tracing::info!(
            reentrancy = ?config.reentrancy,
            max_recent_searches = config.max_recent_searches,
            "creating store context"
        );
        Self {
            documents: DocumentStore::with_config(&config),
            research: ResearchStore::with_config(&config),
            communication: CommunicationStore::with_config(&config),
            config,
        }
    }

    /// Configuration the stores were built with
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ViewsConfig {
        &self.config
    }

    /// Documents store
    #[inline]
    #[must_use]
    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    /// Research store
    #[inline]
    #[must_use]
    pub fn research(&self) -> &ResearchStore {
        &self.research
    }

    /// Communication store
    #[inline]
    #[must_use]
    pub fn communication(&self) -> &CommunicationStore {
        &self.communication
    }

    /// Listeners registered across all stores
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.documents.store().listener_count()
            + self.research.store().listener_count()
            + self.communication.store().listener_count()
    }

    /// Transitions applied across all stores
    #[must_use]
    pub fn total_transitions(&self) -> u64 {
        self.documents.store().version()
            + self.research.store().version()
            + self.communication.store().version()
    }

    /// Reset every store, e.g. on sign-out
    pub fn reset_all(&self) {
        tracing::info!("resetting all view stores");
        self.documents.reset();
        self.research.reset();
        self.communication.reset();
    }
}

impl Default for StoreContext {
    fn default() -> Self {
        Self::new(ViewsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ViewMode;

    #[test]
    fn contexts_are_independent() {
        let first = StoreContext::default();
        let second = StoreContext::default();

        first.documents().select_document("d1");

        assert!(second.documents().get_state().selected_document_ids.is_empty());
        assert!(!first.documents().store().ptr_eq(second.documents().store()));
    }

    #[test]
    fn clones_share_stores() {
        let context = StoreContext::default();
        let handed_down = context.clone();

        handed_down.research().add_saved_result("r1");
        assert!(context.research().is_result_saved("r1"));
    }

    #[test]
    fn reset_all_restores_configured_initial_state() {
        let context = StoreContext::new(ViewsConfig::new().with_default_document_view(ViewMode::Grid));
        context.documents().set_view_mode(ViewMode::List);
        context.communication().save_draft("c1", "hi");
        context.research().set_search_query("tort");

        context.reset_all();

        assert_eq!(context.documents().get_state().view_mode, ViewMode::Grid);
        assert_eq!(context.communication().draft_count(), 0);
        assert!(context.research().get_state().search_query.is_empty());
        assert_eq!(context.total_transitions(), 6);
    }
}
