//! Remote data contracts
//!
//! Server data never lives in the view stores. The facades fetch it through
//! these traits and keep the latest outcome in a [`QueryState`]; the view
//! stores only contribute the parameters of each request.

use crate::error::ApiError;
use chrono::{DateTime, NaiveDate, Utc};
use lex_views::{
    CourtLevel, DocumentState, DocumentStatus, DocumentType, ResearchState, SearchType,
    SortDirection, SortField,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of the latest remote fetch
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryState<T> {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Request in flight
    Loading,
    /// Last request succeeded
    Success(T),
    /// Last request failed
    Error(ApiError),
}

impl<T> QueryState<T> {
    /// Data of the last successful fetch
    #[inline]
    #[must_use]
    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Error of the last failed fetch
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            QueryState::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Whether a request is in flight
    #[inline]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    /// Record the result of a fetch
    pub(crate) fn settle(result: &Result<T, ApiError>) -> Self
    where
        T: Clone,
    {
        match result {
            Ok(data) => QueryState::Success(data.clone()),
            Err(err) => QueryState::Error(err.clone()),
        }
    }
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Items across all pages
    pub total: u64,
    /// Zero-based page index
    pub page: u32,
    /// Requested page size
    pub page_size: u32,
}

impl<T> Page<T> {
    /// Empty first page
    #[must_use]
    pub fn empty(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 0,
            page_size,
        }
    }

    /// Whether more pages follow
    #[must_use]
    pub fn has_more(&self) -> bool {
        let seen = u64::from(self.page) * u64::from(self.page_size) + self.items.len() as u64;
        seen < self.total
    }
}

/// Document row of a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// Document id
    pub id: String,
    /// Title
    pub title: String,
    /// Category
    pub document_type: DocumentType,
    /// Review status
    pub status: DocumentStatus,
    /// Owning matter
    pub matter_id: Option<String>,
    /// Containing folder; `None` at the root
    pub folder_id: Option<String>,
    /// Tags
    pub tags: Vec<String>,
    /// Last modification
    pub updated_at: DateTime<Utc>,
    /// File size
    pub size_bytes: u64,
}

/// Parameters of a document listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentQuery {
    /// Folder being browsed
    pub folder_id: Option<String>,
    /// Free-text search
    pub search: Option<String>,
    /// Category filter
    pub document_type: Option<DocumentType>,
    /// Status filter
    pub status: Option<DocumentStatus>,
    /// Matter filter
    pub matter_id: Option<String>,
    /// Required tags, sorted
    pub tags: Vec<String>,
    /// Earliest modification date
    pub updated_from: Option<NaiveDate>,
    /// Latest modification date
    pub updated_to: Option<NaiveDate>,
    /// Sort column
    pub sort: SortField,
    /// Sort direction
    pub direction: SortDirection,
    /// Zero-based page index
    pub page: u32,
    /// Page size
    pub page_size: u32,
}

impl DocumentQuery {
    /// First page of the listing the document view currently shows
    #[must_use]
    pub fn from_state(state: &DocumentState, page_size: u32) -> Self {
        let filters = &state.filters;
        Self {
            folder_id: state.current_folder_id.clone(),
            search: filters.search.clone(),
            document_type: filters.document_type,
            status: filters.status,
            matter_id: filters.matter_id.clone(),
            tags: filters.tags.iter().cloned().collect(),
            updated_from: filters.date_range.from,
            updated_to: filters.date_range.to,
            sort: state.sort.field,
            direction: state.sort.direction,
            page: 0,
            page_size,
        }
    }
}

/// Case-law search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result id
    pub id: String,
    /// Case name
    pub title: String,
    /// Reporter citation
    pub citation: String,
    /// Deciding court
    pub court: String,
    /// Decision date
    pub decided_on: Option<NaiveDate>,
    /// Matching excerpt
    pub snippet: String,
    /// Relevance
    pub score: f32,
}

/// Parameters of a research search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Trimmed query text
    pub query: String,
    /// Interpretation of the query
    pub search_type: SearchType,
    /// Jurisdiction codes, sorted
    pub jurisdictions: Vec<String>,
    /// Court tiers, sorted
    pub court_levels: Vec<CourtLevel>,
    /// Practice areas, sorted
    pub practice_areas: Vec<String>,
    /// Earliest decision date
    pub decided_from: Option<NaiveDate>,
    /// Latest decision date
    pub decided_to: Option<NaiveDate>,
    /// Page size
    pub page_size: u32,
}

impl SearchRequest {
    /// Request for the current research view; `None` when the query is blank
    #[must_use]
    pub fn from_state(state: &ResearchState, page_size: u32) -> Option<Self> {
        let query = state.search_query.trim();
        if query.is_empty() {
            return None;
        }
        let filters = &state.filters;
        Some(Self {
            query: query.to_string(),
            search_type: state.search_type,
            jurisdictions: filters.jurisdictions.iter().cloned().collect(),
            court_levels: filters.court_levels.iter().copied().collect(),
            practice_areas: filters.practice_areas.iter().cloned().collect(),
            decided_from: filters.date_range.from,
            decided_to: filters.date_range.to,
            page_size,
        })
    }
}

/// Delivered message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Server-assigned id
    pub id: String,
    /// Conversation
    pub conversation_id: String,
    /// Text
    pub body: String,
    /// Server receive time
    pub sent_at: DateTime<Utc>,
    /// Message replied to
    pub reply_to: Option<String>,
}

/// Outgoing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    /// Client-side id, lets the backend drop duplicate submissions
    pub client_message_id: Uuid,
    /// Conversation
    pub conversation_id: String,
    /// Text, trimmed
    pub body: String,
    /// Message replied to
    pub reply_to: Option<String>,
}

impl SendMessageRequest {
    /// New request with a fresh client id
    pub fn new(
        conversation_id: impl Into<String>,
        body: impl Into<String>,
        reply_to: Option<String>,
    ) -> Self {
        Self {
            client_message_id: Uuid::new_v4(),
            conversation_id: conversation_id.into(),
            body: body.into(),
            reply_to,
        }
    }
}

/// Document service
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DocumentsApi: Send + Sync {
    /// List one page of documents
    async fn list_documents(&self, query: DocumentQuery) -> Result<Page<DocumentSummary>, ApiError>;

    /// Delete a document
    async fn delete_document(&self, document_id: String) -> Result<(), ApiError>;
}

/// Research service
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ResearchApi: Send + Sync {
    /// Run a search
    async fn search(&self, request: SearchRequest) -> Result<Page<SearchResult>, ApiError>;

    /// Bookmark or un-bookmark a result
    async fn set_saved(&self, result_id: String, saved: bool) -> Result<(), ApiError>;
}

/// Messaging service
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MessagesApi: Send + Sync {
    /// Deliver a message
    async fn send_message(&self, request: SendMessageRequest) -> Result<Message, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use lex_views::{DateRange, DocumentFilters, IdSet, ResearchFilters};
    use pretty_assertions::assert_eq;

    #[test]
    fn query_state_accessors() {
        let idle: QueryState<u32> = QueryState::default();
        assert_eq!(idle.data(), None);
        assert!(!idle.is_loading());

        assert_eq!(QueryState::settle(&Ok(3)).data(), Some(&3));
        let failed: QueryState<u32> = QueryState::settle(&Err(ApiError::Unauthorized));
        assert_eq!(failed.error(), Some(&ApiError::Unauthorized));
        assert!(QueryState::<u32>::Loading.is_loading());
    }

    #[test]
    fn page_has_more() {
        let page = Page {
            items: vec![1, 2],
            total: 5,
            page: 1,
            page_size: 2,
        };
        assert!(page.has_more());
        assert!(!Page::<u8>::empty(10).has_more());
    }

    #[test]
    fn document_query_mirrors_view() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1);
        let state = DocumentState {
            current_folder_id: Some("f1".into()),
            filters: DocumentFilters {
                search: Some("lease".into()),
                status: Some(DocumentStatus::Final),
                tags: ["b".to_string(), "a".to_string()].into_iter().collect::<IdSet>(),
                date_range: DateRange::new(date, None),
                ..Default::default()
            },
            ..Default::default()
        };

        let query = DocumentQuery::from_state(&state, 50);

        assert_eq!(query.folder_id.as_deref(), Some("f1"));
        assert_eq!(query.search.as_deref(), Some("lease"));
        assert_eq!(query.tags, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(query.updated_from, date);
        assert_eq!(query.sort, SortField::UpdatedAt);
        assert_eq!(query.direction, SortDirection::Desc);
        assert_eq!((query.page, query.page_size), (0, 50));
    }

    #[test]
    fn blank_research_query_builds_no_request() {
        let state = ResearchState {
            search_query: "   ".into(),
            ..Default::default()
        };
        assert_eq!(SearchRequest::from_state(&state, 20), None);
    }

    #[test]
    fn search_request_trims_and_sorts() {
        let state = ResearchState {
            search_query: "  duty of care ".into(),
            search_type: SearchType::Semantic,
            filters: ResearchFilters {
                court_levels: [CourtLevel::Trial, CourtLevel::Supreme].into_iter().collect(),
                ..Default::default()
            },
            ..Default::default()
        };

        let request = SearchRequest::from_state(&state, 20).unwrap();

        assert_eq!(request.query, "duty of care");
        assert_eq!(request.search_type, SearchType::Semantic);
        assert_eq!(request.court_levels, vec![CourtLevel::Supreme, CourtLevel::Trial]);
    }

    #[test]
    fn send_requests_get_distinct_client_ids() {
        let first = SendMessageRequest::new("c1", "hi", None);
        let second = SendMessageRequest::new("c1", "hi", None);
        assert_ne!(first.client_message_id, second.client_message_id);
    }
}
