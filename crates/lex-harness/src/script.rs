//! Scripted store actions
//!
//! A script is a JSON array of actions, each tagged by name:
//!
//! ```json
//! [
//!   { "action": "navigate_to_folder", "folder_id": "matters" },
//!   { "action": "select_document", "id": "d1" },
//!   { "action": "save_draft", "conversation_id": "c1", "text": "hi" }
//! ]
//! ```

use crate::error::HarnessError;
use lex_views::{
    ConversationFilter, ResearchPanel, SearchType, SortDirection, SortField, StoreContext,
    ViewMode,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One user action against a store
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    // Documents
    SetDocumentViewMode { mode: ViewMode },
    SelectDocument { id: String },
    DeselectDocument { id: String },
    ToggleDocumentSelection { id: String },
    SelectAllDocuments { ids: Vec<String> },
    ClearSelection,
    NavigateToFolder { folder_id: String },
    GoBack,
    NavigateToRoot,
    SetDocumentSearch { text: String },
    ClearDocumentFilters,
    SetSort { field: SortField, direction: SortDirection },
    ToggleSortDirection,
    OpenPreview { id: String },
    ClosePreview,

    // Research
    SetSearchQuery { query: String },
    SetSearchType { search_type: SearchType },
    AddSavedResult { id: String },
    RemoveSavedResult { id: String },
    ToggleSavedResult { id: String },
    SelectResult { id: Option<String> },
    AddRecentSearch { query: String },
    ClearRecentSearches,
    SetActivePanel { panel: ResearchPanel },

    // Communication
    SetActiveConversation { conversation_id: Option<String> },
    SaveDraft { conversation_id: String, text: String },
    ClearDraft { conversation_id: String },
    SetConversationFilter { filter: ConversationFilter },
    StartReply { message_id: String },
    CancelReply,

    ResetAll,
}

impl Action {
    /// Store the action targets
    #[must_use]
    pub fn target(&self) -> &'static str {
        use Action::*;
        match self {
            SetDocumentViewMode { .. }
            | SelectDocument { .. }
            | DeselectDocument { .. }
            | ToggleDocumentSelection { .. }
            | SelectAllDocuments { .. }
            | ClearSelection
            | NavigateToFolder { .. }
            | GoBack
            | NavigateToRoot
            | SetDocumentSearch { .. }
            | ClearDocumentFilters
            | SetSort { .. }
            | ToggleSortDirection
            | OpenPreview { .. }
            | ClosePreview => "documents",
            SetSearchQuery { .. }
            | SetSearchType { .. }
            | AddSavedResult { .. }
            | RemoveSavedResult { .. }
            | ToggleSavedResult { .. }
            | SelectResult { .. }
            | AddRecentSearch { .. }
            | ClearRecentSearches
            | SetActivePanel { .. } => "research",
            SetActiveConversation { .. }
            | SaveDraft { .. }
            | ClearDraft { .. }
            | SetConversationFilter { .. }
            | StartReply { .. }
            | CancelReply => "communication",
            ResetAll => "all",
        }
    }

    /// Apply to the stores of `context`
    pub fn apply(&self, context: &StoreContext) {
        let documents = context.documents();
        let research = context.research();
        let communication = context.communication();

        match self {
            Action::SetDocumentViewMode { mode } => documents.set_view_mode(*mode),
            Action::SelectDocument { id } => documents.select_document(id.as_str()),
            Action::DeselectDocument { id } => documents.deselect_document(id),
            Action::ToggleDocumentSelection { id } => documents.toggle_document_selection(id.as_str()),
            Action::SelectAllDocuments { ids } => documents.select_all(ids.iter().map(String::as_str)),
            Action::ClearSelection => documents.clear_selection(),
            Action::NavigateToFolder { folder_id } => documents.navigate_to_folder(folder_id.as_str()),
            Action::GoBack => documents.go_back(),
            Action::NavigateToRoot => documents.navigate_to_root(),
            Action::SetDocumentSearch { text } => documents.set_search(text),
            Action::ClearDocumentFilters => documents.clear_filters(),
            Action::SetSort { field, direction } => documents.set_sort(*field, *direction),
            Action::ToggleSortDirection => documents.toggle_sort_direction(),
            Action::OpenPreview { id } => documents.open_preview(id.as_str()),
            Action::ClosePreview => documents.close_preview(),

            Action::SetSearchQuery { query } => research.set_search_query(query.as_str()),
            Action::SetSearchType { search_type } => research.set_search_type(*search_type),
            Action::AddSavedResult { id } => research.add_saved_result(id.as_str()),
            Action::RemoveSavedResult { id } => research.remove_saved_result(id),
            Action::ToggleSavedResult { id } => {
                research.toggle_saved_result(id);
            }
            Action::SelectResult { id } => research.select_result(id.clone()),
            Action::AddRecentSearch { query } => research.add_recent_search(query),
            Action::ClearRecentSearches => research.clear_recent_searches(),
            Action::SetActivePanel { panel } => research.set_active_panel(*panel),

            Action::SetActiveConversation { conversation_id } => {
                communication.set_active_conversation(conversation_id.clone());
            }
            Action::SaveDraft {
                conversation_id,
                text,
            } => communication.save_draft(conversation_id.as_str(), text.as_str()),
            Action::ClearDraft { conversation_id } => communication.clear_draft(conversation_id),
            Action::SetConversationFilter { filter } => communication.set_conversation_filter(*filter),
            Action::StartReply { message_id } => communication.start_reply(message_id.as_str()),
            Action::CancelReply => communication.cancel_reply(),

            Action::ResetAll => context.reset_all(),
        }
    }
}

/// Ordered list of actions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    /// Actions in application order
    pub actions: Vec<Action>,
}

impl Script {
    /// Parse script JSON
    ///
    /// # Errors
    /// Returns [`HarnessError::Script`] if the text is not an action list.
    pub fn from_json_str(s: &str) -> Result<Self, HarnessError> {
        serde_json::from_str(s).map_err(HarnessError::Script)
    }

    /// Load script file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let text = std::fs::read_to_string(path).map_err(|e| HarnessError::io_error(path, e))?;
        Self::from_json_str(&text)
    }

    /// Number of actions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the script has no actions
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
