//! Document manager facade
//!
//! Combines the [`DocumentStore`] view state with the document listing
//! fetched from the backend. The listing is refetched explicitly; the view
//! store never holds server data.

use crate::analytics::{AnalyticsEvent, AnalyticsSink};
use crate::error::{ApiError, FeatureError};
use crate::remote::{DocumentQuery, DocumentSummary, DocumentsApi, Page, QueryState};
use lex_views::{DocumentStore, StoreContext, ViewMode};
use parking_lot::Mutex;
use std::sync::Arc;

/// Document listing outcome
pub type DocumentListing = QueryState<Page<DocumentSummary>>;

/// Document manager feature
pub struct DocumentManager {
    store: DocumentStore,
    api: Arc<dyn DocumentsApi>,
    analytics: Arc<dyn AnalyticsSink>,
    page_size: u32,
    listing: Mutex<DocumentListing>,
}

impl DocumentManager {
    /// Create facade over the context's document store
    pub fn new(
        context: &StoreContext,
        api: Arc<dyn DocumentsApi>,
        analytics: Arc<dyn AnalyticsSink>,
    ) -> Self {
        Self {
            store: context.documents().clone(),
            api,
            analytics,
            page_size: context.config().page_size,
            listing: Mutex::new(QueryState::Idle),
        }
    }

    /// View store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Listing parameters for the current view
    #[must_use]
    pub fn query(&self) -> DocumentQuery {
        DocumentQuery::from_state(&self.store.get_state(), self.page_size)
    }

    /// Latest listing outcome
    #[must_use]
    pub fn listing(&self) -> DocumentListing {
        self.listing.lock().clone()
    }

    /// Fetch the first page for the current view
    ///
    /// # Errors
    /// Returns the backend error; it is also kept in [`Self::listing`].
    pub async fn refresh(&self) -> Result<Page<DocumentSummary>, ApiError> {
        let query = self.query();
        tracing::debug!(folder = ?query.folder_id, search = ?query.search, "fetching documents");
        *self.listing.lock() = QueryState::Loading;

        let result = self.api.list_documents(query).await;
        if let Err(err) = &result {
            tracing::warn!(error = %err, "document listing failed");
        }
        *self.listing.lock() = QueryState::settle(&result);
        result
    }

    /// Switch layout
    pub fn set_view_mode(&self, mode: ViewMode) {
        self.store.set_view_mode(mode);
        self.analytics.track(AnalyticsEvent::ViewModeChanged {
            area: DocumentStore::NAME,
            mode,
        });
    }

    /// Change search text
    pub fn search(&self, text: &str) {
        self.store.set_search(text);
        let state = self.store.get_state();
        self.analytics.track(AnalyticsEvent::DocumentSearch {
            query_len: state.filters.search.as_deref().map_or(0, str::len),
            active_filters: state.filters.active_count(),
        });
    }

    /// Open a document in the preview pane
    pub fn open_document(&self, document_id: impl Into<String>) {
        let document_id = document_id.into();
        self.store.open_preview(document_id.clone());
        self.analytics
            .track(AnalyticsEvent::DocumentOpened { document_id });
    }

    /// Delete every selected document
    ///
    /// Deleted ids leave the selection one by one; failed ones stay
    /// selected so the user can retry. Returns the deleted count.
    ///
    /// # Errors
    /// Returns [`FeatureError::PartialDelete`] if any deletion failed.
    pub async fn delete_selected(&self) -> Result<usize, FeatureError> {
        let selected: Vec<String> = self
            .store
            .get_state()
            .selected_document_ids
            .iter()
            .cloned()
            .collect();
        if selected.is_empty() {
            return Ok(0);
        }

        let attempted = selected.len();
        let mut deleted = 0;
        let mut first_failure = None;
        for id in selected {
            match self.api.delete_document(id.clone()).await {
                Ok(()) => {
                    self.store.deselect_document(&id);
                    self.store.close_preview_of(&id);
                    deleted += 1;
                }
                Err(err) => {
                    tracing::warn!(document = %id, error = %err, "delete failed");
                    first_failure.get_or_insert(err);
                }
            }
        }

        if deleted > 0 {
            self.analytics
                .track(AnalyticsEvent::DocumentsDeleted { count: deleted });
        }
        match first_failure {
            None => Ok(deleted),
            Some(first) => Err(FeatureError::PartialDelete {
                attempted,
                failed: attempted - deleted,
                first,
            }),
        }
    }
}

impl std::fmt::Debug for DocumentManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentManager")
            .field("store", &self.store)
            .field("page_size", &self.page_size)
            .field("listing", &*self.listing.lock())
            .finish_non_exhaustive()
    }
}
