//! Research workspace facade
//!
//! Searches are built from the [`ResearchStore`] query and filters. Bookmarks
//! are applied to the store optimistically and rolled back when the backend
//! refuses them.

use crate::analytics::{AnalyticsEvent, AnalyticsSink};
use crate::error::ApiError;
use crate::remote::{Page, QueryState, ResearchApi, SearchRequest, SearchResult};
use lex_views::{ResearchStore, StoreContext, ViewMode};
use parking_lot::Mutex;
use std::sync::Arc;

/// Search results outcome
pub type SearchResults = QueryState<Page<SearchResult>>;

/// Research workspace feature
pub struct ResearchWorkspace {
    store: ResearchStore,
    api: Arc<dyn ResearchApi>,
    analytics: Arc<dyn AnalyticsSink>,
    page_size: u32,
    results: Mutex<SearchResults>,
}

impl ResearchWorkspace {
    /// Create facade over the context's research store
    pub fn new(
        context: &StoreContext,
        api: Arc<dyn ResearchApi>,
        analytics: Arc<dyn AnalyticsSink>,
    ) -> Self {
        Self {
            store: context.research().clone(),
            api,
            analytics,
            page_size: context.config().page_size,
            results: Mutex::new(QueryState::Idle),
        }
    }

    /// View store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &ResearchStore {
        &self.store
    }

    /// Latest search outcome
    #[must_use]
    pub fn results(&self) -> SearchResults {
        self.results.lock().clone()
    }

    /// Run the search described by the current view
    ///
    /// A blank query resets the results to idle and returns `Ok(None)`
    /// without calling the backend. Otherwise the query is recorded as a
    /// recent search before the request goes out.
    ///
    /// # Errors
    /// Returns the backend error; it is also kept in [`Self::results`].
    pub async fn search(&self) -> Result<Option<Page<SearchResult>>, ApiError> {
        let state = self.store.get_state();
        let Some(request) = SearchRequest::from_state(&state, self.page_size) else {
            *self.results.lock() = QueryState::Idle;
            return Ok(None);
        };

        self.store.add_recent_search(&request.query);
        self.analytics.track(AnalyticsEvent::ResearchSearch {
            search_type: request.search_type,
            filtered: state.filters.is_active(),
        });
        tracing::debug!(search_type = ?request.search_type, "running research search");
        *self.results.lock() = QueryState::Loading;

        let result = self.api.search(request).await;
        if let Err(err) = &result {
            tracing::warn!(error = %err, "research search failed");
        }
        *self.results.lock() = QueryState::settle(&result);
        result.map(Some)
    }

    /// Set the query text and search
    ///
    /// # Errors
    /// See [`Self::search`].
    pub async fn search_for(&self, query: &str) -> Result<Option<Page<SearchResult>>, ApiError> {
        self.store.set_search_query(query);
        self.search().await
    }

    /// Re-run a recent search
    ///
    /// # Errors
    /// See [`Self::search`].
    pub async fn rerun_recent(&self, index: usize) -> Result<Option<Page<SearchResult>>, ApiError> {
        let Some(query) = self.store.get_state().recent_searches.get(index).cloned() else {
            return Ok(None);
        };
        self.search_for(&query).await
    }

    /// Flip a bookmark, returning the new state
    ///
    /// # Errors
    /// Returns the backend error after restoring the previous bookmark state.
    pub async fn toggle_saved(&self, result_id: &str) -> Result<bool, ApiError> {
        let saved = self.store.toggle_saved_result(result_id);
        match self.api.set_saved(result_id.to_string(), saved).await {
            Ok(()) => {
                self.analytics.track(AnalyticsEvent::ResultSaved {
                    result_id: result_id.to_string(),
                    saved,
                });
                Ok(saved)
            }
            Err(err) => {
                tracing::warn!(result = %result_id, error = %err, "bookmark rejected, rolling back");
                if saved {
                    self.store.remove_saved_result(result_id);
                } else {
                    self.store.add_saved_result(result_id);
                }
                Err(err)
            }
        }
    }

    /// Switch result layout
    pub fn set_view_mode(&self, mode: ViewMode) {
        self.store.set_view_mode(mode);
        self.analytics.track(AnalyticsEvent::ViewModeChanged {
            area: ResearchStore::NAME,
            mode,
        });
    }
}

impl std::fmt::Debug for ResearchWorkspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResearchWorkspace")
            .field("store", &self.store)
            .field("page_size", &self.page_size)
            .field("results", &*self.results.lock())
            .finish_non_exhaustive()
    }
}
