//! Documents view state
//!
//! Selection, folder navigation, filters and layout toggles of the document
//! manager. Folder navigation follows breadcrumb semantics: revisiting a
//! folder already on the path truncates the path back to it.

use crate::config::ViewsConfig;
use crate::types::{DateRange, IdSet, SortDirection, ViewMode};
use lex_store::{define_state, Binding, Merge, Store, StoreConfig};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Document category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Agreements
    Contract,
    /// Court filings
    Pleading,
    /// Briefs and motions
    Brief,
    /// Letters and email
    Correspondence,
    /// Exhibits and discovery material
    Evidence,
    /// Internal memos
    Memo,
    /// Anything else
    Other,
}

/// Review status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Being written
    Draft,
    /// Awaiting review
    Review,
    /// Signed off
    Final,
    /// Archived
    Archived,
}

/// Column a document list is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Title
    Name,
    /// Creation time
    CreatedAt,
    /// Last modification
    #[default]
    UpdatedAt,
    /// File size
    Size,
}

impl SortField {
    /// Stable name
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::Size => "size",
        }
    }
}

/// Sort column and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DocumentSort {
    /// Column
    pub field: SortField,
    /// Direction
    pub direction: SortDirection,
}

define_state! {
    /// Filters applied to the document list
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct DocumentFilters, patch DocumentFiltersPatch {
        /// Free-text search
        pub search: Option<String>,
        /// Category
        pub document_type: Option<DocumentType>,
        /// Review status
        pub status: Option<DocumentStatus>,
        /// Owning matter
        pub matter_id: Option<String>,
        /// Required tags (all must match)
        pub tags: IdSet,
        /// Modification window
        pub date_range: DateRange,
    }
}

impl DocumentFilters {
    /// Number of filters that restrict the list
    #[must_use]
    pub fn active_count(&self) -> usize {
        [
            self.search.is_some(),
            self.document_type.is_some(),
            self.status.is_some(),
            self.matter_id.is_some(),
            !self.tags.is_empty(),
            !self.date_range.is_unbounded(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Whether any filter is set
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active_count() > 0
    }
}

define_state! {
    /// Document manager view state
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct DocumentState, patch DocumentPatch {
        /// Layout
        pub view_mode: ViewMode,
        /// Multi-selection
        pub selected_document_ids: IdSet,
        /// Folder being shown; `None` is the root
        pub current_folder_id: Option<String>,
        /// Breadcrumb from the root to the current folder
        pub folder_path: Vec<String>,
        /// List filters
        pub filters: DocumentFilters,
        /// List order
        pub sort: DocumentSort,
        /// Sidebar collapsed
        pub is_sidebar_collapsed: bool,
        /// Filter panel visible
        pub show_filters: bool,
        /// Document open in the preview pane
        pub preview_document_id: Option<String>,
        /// Upload dialog visible
        pub is_upload_dialog_open: bool,
    }
}

impl DocumentState {
    /// Whether `id` is selected
    #[inline]
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_document_ids.contains(id)
    }

    /// Whether the root folder is shown
    #[inline]
    #[must_use]
    pub fn is_at_root(&self) -> bool {
        self.current_folder_id.is_none()
    }
}

/// Breadcrumb after opening `folder_id` from `path`
///
/// An id already on the path truncates the path to it (going back);
/// anything else is appended (going forward).
#[must_use]
pub fn folder_path_after_navigate(path: &[String], folder_id: &str) -> Vec<String> {
    match path.iter().position(|segment| segment == folder_id) {
        Some(idx) => path[..=idx].to_vec(),
        None => {
            let mut next = path.to_vec();
            next.push(folder_id.to_string());
            next
        }
    }
}

/// Store for the documents area
#[derive(Debug, Clone)]
pub struct DocumentStore {
    store: Store<DocumentState>,
}

impl DocumentStore {
    /// Store name used in logs
    pub const NAME: &'static str = "documents";

    /// Create store with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&ViewsConfig::default())
    }

    /// Create store from view configuration
    #[must_use]
    pub fn with_config(config: &ViewsConfig) -> Self {
        let initial = DocumentState {
            view_mode: config.default_document_view,
            ..DocumentState::default()
        };
        Self::from_state(initial, config.store_config())
    }

    /// Create store with an explicit initial state
    #[must_use]
    pub fn from_state(initial: DocumentState, config: StoreConfig) -> Self {
        Self {
            store: Store::with_config(Self::NAME, initial, config),
        }
    }

    /// Underlying store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &Store<DocumentState> {
        &self.store
    }

    /// Current snapshot, without subscribing
    #[inline]
    #[must_use]
    pub fn get_state(&self) -> Arc<DocumentState> {
        self.store.get_state()
    }

    /// Mount a view on this store
    pub fn bind<F>(&self, schedule_render: F) -> Binding<DocumentState>
    where
        F: Fn() + Send + Sync + 'static,
    {
        Binding::mount(&self.store, schedule_render)
    }

    /// Switch layout
    pub fn set_view_mode(&self, mode: ViewMode) {
        self.store.set_state(DocumentPatch {
            view_mode: Some(mode),
            ..Default::default()
        });
    }

    /// Add a document to the selection
    pub fn select_document(&self, id: impl Into<String>) {
        let id = id.into();
        self.store.update(|s| DocumentPatch {
            selected_document_ids: Some(s.selected_document_ids.update(id)),
            ..Default::default()
        });
    }

    /// Remove a document from the selection
    pub fn deselect_document(&self, id: &str) {
        self.store.update(|s| DocumentPatch {
            selected_document_ids: Some(s.selected_document_ids.without(id)),
            ..Default::default()
        });
    }

    /// Flip selection of one document
    pub fn toggle_document_selection(&self, id: impl Into<String>) {
        let id = id.into();
        self.store.update(|s| {
            let selected = if s.selected_document_ids.contains(&id) {
                s.selected_document_ids.without(&id)
            } else {
                s.selected_document_ids.update(id)
            };
            DocumentPatch {
                selected_document_ids: Some(selected),
                ..Default::default()
            }
        });
    }

    /// Replace the selection with `ids`
    pub fn select_all<I, S>(&self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let selected: IdSet = ids.into_iter().map(Into::into).collect();
        self.store.set_state(DocumentPatch {
            selected_document_ids: Some(selected),
            ..Default::default()
        });
    }

    /// Empty the selection
    pub fn clear_selection(&self) {
        self.store.set_state(DocumentPatch {
            selected_document_ids: Some(IdSet::new()),
            ..Default::default()
        });
    }

    /// Open a folder with breadcrumb semantics
    pub fn navigate_to_folder(&self, folder_id: impl Into<String>) {
        let folder_id = folder_id.into();
        tracing::debug!(folder = %folder_id, "navigate to folder");
        self.store.update(|s| DocumentPatch {
            folder_path: Some(folder_path_after_navigate(&s.folder_path, &folder_id)),
            current_folder_id: Some(Some(folder_id)),
            ..Default::default()
        });
    }

    /// Go up one breadcrumb segment; at depth one or less, go to the root
    pub fn go_back(&self) {
        self.store.update(|s| {
            if s.folder_path.len() <= 1 {
                return root_patch();
            }
            let path = s.folder_path[..s.folder_path.len() - 1].to_vec();
            DocumentPatch {
                current_folder_id: Some(path.last().cloned()),
                folder_path: Some(path),
                ..Default::default()
            }
        });
    }

    /// Jump to the root folder
    pub fn navigate_to_root(&self) {
        self.store.set_state(root_patch());
    }

    /// Merge filter changes
    pub fn set_filters(&self, patch: DocumentFiltersPatch) {
        self.store.update(|s| DocumentPatch {
            filters: Some(s.filters.merge(patch)),
            ..Default::default()
        });
    }

    /// Set free-text search; blank text clears it
    pub fn set_search(&self, text: &str) {
        let text = text.trim();
        self.set_filters(DocumentFiltersPatch {
            search: Some((!text.is_empty()).then(|| text.to_string())),
            ..Default::default()
        });
    }

    /// Remove every filter
    pub fn clear_filters(&self) {
        self.store.set_state(DocumentPatch {
            filters: Some(DocumentFilters::default()),
            ..Default::default()
        });
    }

    /// Set sort column and direction
    pub fn set_sort(&self, field: SortField, direction: SortDirection) {
        self.store.set_state(DocumentPatch {
            sort: Some(DocumentSort { field, direction }),
            ..Default::default()
        });
    }

    /// Reverse sort direction
    pub fn toggle_sort_direction(&self) {
        self.store.update(|s| DocumentPatch {
            sort: Some(DocumentSort {
                field: s.sort.field,
                direction: s.sort.direction.toggled(),
            }),
            ..Default::default()
        });
    }

    /// Collapse or expand the sidebar
    pub fn toggle_sidebar(&self) {
        self.store.update(|s| DocumentPatch {
            is_sidebar_collapsed: Some(!s.is_sidebar_collapsed),
            ..Default::default()
        });
    }

    /// Show or hide the filter panel
    pub fn toggle_filters(&self) {
        self.store.update(|s| DocumentPatch {
            show_filters: Some(!s.show_filters),
            ..Default::default()
        });
    }

    /// Show a document in the preview pane
    pub fn open_preview(&self, id: impl Into<String>) {
        self.store.set_state(DocumentPatch {
            preview_document_id: Some(Some(id.into())),
            ..Default::default()
        });
    }

    /// Close the preview pane
    pub fn close_preview(&self) {
        self.store.set_state(DocumentPatch {
            preview_document_id: Some(None),
            ..Default::default()
        });
    }

    /// Close the preview pane if it shows `id`
    pub fn close_preview_of(&self, id: &str) {
        self.store.update(|s| {
            if s.preview_document_id.as_deref() != Some(id) {
                return DocumentPatch::default();
            }
            DocumentPatch {
                preview_document_id: Some(None),
                ..Default::default()
            }
        });
    }

    /// Open or close the upload dialog
    pub fn set_upload_dialog_open(&self, open: bool) {
        self.store.set_state(DocumentPatch {
            is_upload_dialog_open: Some(open),
            ..Default::default()
        });
    }

    /// Back to the initial state
    pub fn reset(&self) {
        self.store.reset();
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn root_patch() -> DocumentPatch {
    DocumentPatch {
        current_folder_id: Some(None),
        folder_path: Some(Vec::new()),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn revisiting_folder_truncates_path() {
        let store = DocumentStore::new();
        store.navigate_to_folder("A");
        store.navigate_to_folder("B");
        store.navigate_to_folder("A");

        let state = store.get_state();
        assert_eq!(state.current_folder_id.as_deref(), Some("A"));
        assert_eq!(state.folder_path, path(&["A"]));
    }

    #[test]
    fn go_back_pops_one_segment() {
        let store = DocumentStore::new();
        for folder in ["A", "B", "C"] {
            store.navigate_to_folder(folder);
        }
        store.go_back();

        let state = store.get_state();
        assert_eq!(state.current_folder_id.as_deref(), Some("B"));
        assert_eq!(state.folder_path, path(&["A", "B"]));
    }

    #[test]
    fn go_back_at_shallow_depth_returns_to_root() {
        let store = DocumentStore::new();
        store.go_back();
        assert!(store.get_state().is_at_root());

        store.navigate_to_folder("A");
        store.go_back();
        let state = store.get_state();
        assert_eq!(state.current_folder_id, None);
        assert!(state.folder_path.is_empty());
    }

    #[test]
    fn selection_scenario() {
        let store = DocumentStore::new();
        store.select_document("d1");
        store.select_document("d2");
        store.toggle_document_selection("d1");
        assert_eq!(store.get_state().selected_document_ids, IdSet::unit("d2".to_string()));

        store.select_all(["d1", "d2", "d3"]);
        let expected: IdSet = ["d1", "d2", "d3"].into_iter().map(String::from).collect();
        assert_eq!(store.get_state().selected_document_ids, expected);

        store.clear_selection();
        assert!(store.get_state().selected_document_ids.is_empty());
    }

    #[test]
    fn selecting_twice_keeps_one_entry() {
        let store = DocumentStore::new();
        store.select_document("d1");
        store.select_document("d1");
        assert_eq!(store.get_state().selected_document_ids.len(), 1);

        store.deselect_document("d1");
        store.deselect_document("d1");
        assert!(!store.get_state().is_selected("d1"));
    }

    #[test]
    fn filters_merge_and_clear() {
        let store = DocumentStore::new();
        store.set_filters(DocumentFiltersPatch {
            document_type: Some(Some(DocumentType::Contract)),
            ..Default::default()
        });
        store.set_search("  indemnity ");

        let filters = store.get_state().filters.clone();
        assert_eq!(filters.document_type, Some(DocumentType::Contract));
        assert_eq!(filters.search.as_deref(), Some("indemnity"));
        assert_eq!(filters.active_count(), 2);

        store.set_search("   ");
        assert_eq!(store.get_state().filters.search, None);

        store.clear_filters();
        assert!(!store.get_state().filters.is_active());
    }

    #[test]
    fn sort_and_toggles() {
        let store = DocumentStore::new();
        store.set_sort(SortField::Name, SortDirection::Asc);
        store.toggle_sort_direction();
        store.toggle_sidebar();
        store.toggle_filters();
        store.toggle_filters();

        let state = store.get_state();
        assert_eq!(state.sort.field, SortField::Name);
        assert_eq!(state.sort.direction, SortDirection::Desc);
        assert!(state.is_sidebar_collapsed);
        assert!(!state.show_filters);
    }

    #[test]
    fn preview_and_upload_dialog() {
        let store = DocumentStore::new();
        store.open_preview("d9");
        store.set_upload_dialog_open(true);
        assert_eq!(store.get_state().preview_document_id.as_deref(), Some("d9"));
        assert!(store.get_state().is_upload_dialog_open);

        store.close_preview();
        assert_eq!(store.get_state().preview_document_id, None);
    }

    #[test]
    fn configured_view_mode_survives_reset() {
        let store = DocumentStore::with_config(&ViewsConfig::new().with_default_document_view(ViewMode::Grid));
        store.set_view_mode(ViewMode::Preview);
        store.select_document("d1");
        store.reset();

        let state = store.get_state();
        assert_eq!(state.view_mode, ViewMode::Grid);
        assert!(state.selected_document_ids.is_empty());
    }

    #[test]
    fn state_serializes_with_snake_case_enums() {
        let store = DocumentStore::new();
        store.set_sort(SortField::UpdatedAt, SortDirection::Asc);
        let json = serde_json::to_value(&*store.get_state()).unwrap();

        assert_eq!(json["view_mode"], "list");
        assert_eq!(json["sort"]["field"], "updated_at");
        let back: DocumentState = serde_json::from_value(json).unwrap();
        assert_eq!(back, *store.get_state());
    }
}
