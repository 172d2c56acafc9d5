//! Research view state
//!
//! Query, filters, saved results and recent searches of the legal research
//! workspace. Saved results live in a persistent set, so a snapshot taken
//! before `add_saved_result` never sees the new id.

use crate::config::ViewsConfig;
use crate::types::{DateRange, IdSet, ViewMode};
use lex_store::{define_state, Binding, Merge, Store, StoreConfig};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How the query text is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    /// Term matching
    #[default]
    Keyword,
    /// Embedding similarity
    Semantic,
    /// Citation lookup
    Citation,
}

/// Court tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourtLevel {
    /// Courts of last resort
    Supreme,
    /// Intermediate appellate courts
    Appellate,
    /// Trial courts
    Trial,
    /// Agencies and tribunals
    Administrative,
}

/// Panel shown next to the results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResearchPanel {
    /// Result list
    #[default]
    Results,
    /// Citation graph
    Citations,
    /// Saved results
    Saved,
    /// AI assistant
    Assistant,
}

define_state! {
    /// Filters applied to research queries
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct ResearchFilters, patch ResearchFiltersPatch {
        /// Jurisdiction codes
        pub jurisdictions: IdSet,
        /// Court tiers
        pub court_levels: im::OrdSet<CourtLevel>,
        /// Practice areas
        pub practice_areas: IdSet,
        /// Decision date window
        pub date_range: DateRange,
    }
}

impl ResearchFilters {
    /// Whether any filter is set
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.jurisdictions.is_empty()
            || !self.court_levels.is_empty()
            || !self.practice_areas.is_empty()
            || !self.date_range.is_unbounded()
    }
}

define_state! {
    /// Research workspace view state
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct ResearchState, patch ResearchPatch {
        /// Result layout
        pub view_mode: ViewMode,
        /// Query text as typed
        pub search_query: String,
        /// Query interpretation
        pub search_type: SearchType,
        /// Query filters
        pub filters: ResearchFilters,
        /// Bookmarked results
        pub saved_result_ids: IdSet,
        /// Result open in the detail pane
        pub selected_result_id: Option<String>,
        /// Most recent first, no duplicates
        pub recent_searches: Vec<String>,
        /// Side panel
        pub active_panel: ResearchPanel,
        /// Filter panel visible
        pub show_filters: bool,
        /// Sidebar collapsed
        pub is_sidebar_collapsed: bool,
    }
}

/// Recent searches after running `query`, capped at `max`
#[must_use]
pub fn recent_searches_after(recent: &[String], query: &str, max: usize) -> Vec<String> {
    std::iter::once(query.to_string())
        .chain(recent.iter().filter(|q| q.as_str() != query).cloned())
        .take(max)
        .collect()
}

/// Store for the research area
#[derive(Debug, Clone)]
pub struct ResearchStore {
    store: Store<ResearchState>,
    max_recent_searches: usize,
}

impl ResearchStore {
    /// Store name used in logs
    pub const NAME: &'static str = "research";

    /// Create store with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&ViewsConfig::default())
    }

    /// Create store from view configuration
    #[must_use]
    pub fn with_config(config: &ViewsConfig) -> Self {
        let initial = ResearchState {
            view_mode: config.default_research_view,
            ..ResearchState::default()
        };
        Self {
            store: Store::with_config(Self::NAME, initial, config.store_config()),
            max_recent_searches: config.max_recent_searches.max(1),
        }
    }

    /// Create store with an explicit initial state
    #[must_use]
    pub fn from_state(initial: ResearchState, config: StoreConfig, max_recent_searches: usize) -> Self {
        Self {
            store: Store::with_config(Self::NAME, initial, config),
            max_recent_searches: max_recent_searches.max(1),
        }
    }

    /// Underlying store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &Store<ResearchState> {
        &self.store
    }

    /// Current snapshot, without subscribing
    #[inline]
    #[must_use]
    pub fn get_state(&self) -> Arc<ResearchState> {
        self.store.get_state()
    }

    /// Mount a view on this store
    pub fn bind<F>(&self, schedule_render: F) -> Binding<ResearchState>
    where
        F: Fn() + Send + Sync + 'static,
    {
        Binding::mount(&self.store, schedule_render)
    }

    /// Update the query text
    pub fn set_search_query(&self, query: impl Into<String>) {
        self.store.set_state(ResearchPatch {
            search_query: Some(query.into()),
            ..Default::default()
        });
    }

    /// Change query interpretation
    pub fn set_search_type(&self, search_type: SearchType) {
        self.store.set_state(ResearchPatch {
            search_type: Some(search_type),
            ..Default::default()
        });
    }

    /// Merge filter changes
    pub fn set_filters(&self, patch: ResearchFiltersPatch) {
        self.store.update(|s| ResearchPatch {
            filters: Some(s.filters.merge(patch)),
            ..Default::default()
        });
    }

    /// Remove every filter
    pub fn clear_filters(&self) {
        self.store.set_state(ResearchPatch {
            filters: Some(ResearchFilters::default()),
            ..Default::default()
        });
    }

    /// Bookmark a result
    pub fn add_saved_result(&self, id: impl Into<String>) {
        let id = id.into();
        self.store.update(|s| ResearchPatch {
            saved_result_ids: Some(s.saved_result_ids.update(id)),
            ..Default::default()
        });
    }

    /// Remove a bookmark
    pub fn remove_saved_result(&self, id: &str) {
        self.store.update(|s| ResearchPatch {
            saved_result_ids: Some(s.saved_result_ids.without(id)),
            ..Default::default()
        });
    }

    /// Flip a bookmark; returns whether the result is now saved
    pub fn toggle_saved_result(&self, id: &str) -> bool {
        let mut saved = false;
        self.store.update(|s| {
            let ids = if s.saved_result_ids.contains(id) {
                s.saved_result_ids.without(id)
            } else {
                saved = true;
                s.saved_result_ids.update(id.to_string())
            };
            ResearchPatch {
                saved_result_ids: Some(ids),
                ..Default::default()
            }
        });
        saved
    }

    /// Whether a result is bookmarked
    #[must_use]
    pub fn is_result_saved(&self, id: &str) -> bool {
        self.store.get_state().saved_result_ids.contains(id)
    }

    /// Open a result in the detail pane, or close it with `None`
    pub fn select_result(&self, id: Option<String>) {
        self.store.set_state(ResearchPatch {
            selected_result_id: Some(id),
            ..Default::default()
        });
    }

    /// Record a query at the front of the recent list
    ///
    /// Blank queries are ignored.
    pub fn add_recent_search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        let max = self.max_recent_searches;
        self.store.update(|s| ResearchPatch {
            recent_searches: Some(recent_searches_after(&s.recent_searches, query, max)),
            ..Default::default()
        });
    }

    /// Forget recent queries
    pub fn clear_recent_searches(&self) {
        self.store.set_state(ResearchPatch {
            recent_searches: Some(Vec::new()),
            ..Default::default()
        });
    }

    /// Switch side panel
    pub fn set_active_panel(&self, panel: ResearchPanel) {
        self.store.set_state(ResearchPatch {
            active_panel: Some(panel),
            ..Default::default()
        });
    }

    /// Switch result layout
    pub fn set_view_mode(&self, mode: ViewMode) {
        self.store.set_state(ResearchPatch {
            view_mode: Some(mode),
            ..Default::default()
        });
    }

    /// Show or hide the filter panel
    pub fn toggle_filters(&self) {
        self.store.update(|s| ResearchPatch {
            show_filters: Some(!s.show_filters),
            ..Default::default()
        });
    }

    /// Collapse or expand the sidebar
    pub fn toggle_sidebar(&self) {
        self.store.update(|s| ResearchPatch {
            is_sidebar_collapsed: Some(!s.is_sidebar_collapsed),
            ..Default::default()
        });
    }

    /// Recent search capacity
    #[inline]
    #[must_use]
    pub fn max_recent_searches(&self) -> usize {
        self.max_recent_searches
    }

    /// Back to the initial state
    pub fn reset(&self) {
        self.store.reset();
    }
}

impl Default for ResearchStore {
    fn default() -> Self {
        Self::new()
    }
}
