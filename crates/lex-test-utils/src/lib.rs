//! Testing utilities for the lexdesk workspace
//!
//! In-memory backends, listener probes and store fixtures.

#![allow(missing_docs)]

use chrono::{TimeZone, Utc};
use lex_features::{
    ApiError, DocumentQuery, DocumentSummary, DocumentsApi, Message, MessagesApi, Page,
    RecordingAnalytics, ResearchApi, SearchRequest, SearchResult, SendMessageRequest,
};
use lex_store::{Merge, Store, Subscription};
use lex_views::{DocumentStatus, DocumentType, StoreContext, ViewsConfig};
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts notifications of one store
pub struct NotificationProbe {
    count: Arc<AtomicUsize>,
    subscription: Subscription,
}

impl NotificationProbe {
    pub fn attach<T>(store: &Store<T>) -> Self
    where
        T: Merge + Clone + Send + Sync + 'static,
    {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let subscription = store.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        Self {
            count,
            subscription,
        }
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }
}

/// Records the state each notification observed
pub struct SnapshotRecorder<T> {
    seen: Arc<Mutex<Vec<T>>>,
    _subscription: Subscription,
}

impl<T> SnapshotRecorder<T>
where
    T: Merge + Clone + Send + Sync + 'static,
{
    pub fn attach(store: &Store<T>) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let reader = store.clone();
        let subscription = store.subscribe(move || {
            sink.lock().push((*reader.get_state()).clone());
        });
        Self {
            seen,
            _subscription: subscription,
        }
    }

    pub fn snapshots(&self) -> Vec<T> {
        self.seen.lock().clone()
    }
}

pub fn test_context() -> StoreContext {
    StoreContext::new(ViewsConfig::default())
}

pub fn test_context_with(config: ViewsConfig) -> StoreContext {
    StoreContext::new(config)
}

pub fn recording_analytics() -> Arc<RecordingAnalytics> {
    Arc::new(RecordingAnalytics::new())
}

pub fn document(id: &str, folder_id: Option<&str>) -> DocumentSummary {
    DocumentSummary {
        id: id.to_string(),
        title: format!("Document {id}"),
        document_type: DocumentType::Contract,
        status: DocumentStatus::Draft,
        matter_id: None,
        folder_id: folder_id.map(str::to_string),
        tags: Vec::new(),
        updated_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        size_bytes: 1024,
    }
}

pub fn search_result(id: &str, title: &str) -> SearchResult {
    SearchResult {
        id: id.to_string(),
        title: title.to_string(),
        citation: format!("{id} F.3d 1"),
        court: "Court of Appeals".to_string(),
        decided_on: None,
        snippet: String::new(),
        score: 1.0,
    }
}

/// Document backend over a fixed set of rows
#[derive(Default)]
pub struct InMemoryDocuments {
    documents: Mutex<Vec<DocumentSummary>>,
    queries: Mutex<Vec<DocumentQuery>>,
    locked: Mutex<BTreeSet<String>>,
}

impl InMemoryDocuments {
    pub fn with_documents(documents: Vec<DocumentSummary>) -> Self {
        Self {
            documents: Mutex::new(documents),
            ..Default::default()
        }
    }

    /// Make deletes of `id` fail
    pub fn lock_document(&self, id: &str) {
        self.locked.lock().insert(id.to_string());
    }

    pub fn queries(&self) -> Vec<DocumentQuery> {
        self.queries.lock().clone()
    }

    pub fn ids(&self) -> Vec<String> {
        self.documents.lock().iter().map(|d| d.id.clone()).collect()
    }
}

#[async_trait::async_trait]
impl DocumentsApi for InMemoryDocuments {
    async fn list_documents(&self, query: DocumentQuery) -> Result<Page<DocumentSummary>, ApiError> {
        let items: Vec<DocumentSummary> = self
            .documents
            .lock()
            .iter()
            .filter(|d| d.folder_id == query.folder_id)
            .filter(|d| {
                query
                    .search
                    .as_deref()
                    .map_or(true, |s| d.title.to_lowercase().contains(&s.to_lowercase()))
            })
            .cloned()
            .collect();
        self.queries.lock().push(query.clone());
        Ok(Page {
            total: items.len() as u64,
            items: items.into_iter().take(query.page_size as usize).collect(),
            page: 0,
            page_size: query.page_size,
        })
    }

    async fn delete_document(&self, document_id: String) -> Result<(), ApiError> {
        if self.locked.lock().contains(&document_id) {
            return Err(ApiError::rejected(409, "document is locked"));
        }
        let mut documents = self.documents.lock();
        let before = documents.len();
        documents.retain(|d| d.id != document_id);
        if documents.len() == before {
            return Err(ApiError::NotFound(document_id));
        }
        Ok(())
    }
}

/// Research backend with canned results
#[derive(Default)]
pub struct InMemoryResearch {
    results: Mutex<Vec<SearchResult>>,
    requests: Mutex<Vec<SearchRequest>>,
    saved: Mutex<BTreeSet<String>>,
    offline: Mutex<bool>,
}

impl InMemoryResearch {
    pub fn with_results(results: Vec<SearchResult>) -> Self {
        Self {
            results: Mutex::new(results),
            ..Default::default()
        }
    }

    pub fn set_offline(&self, offline: bool) {
        *self.offline.lock() = offline;
    }

    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().clone()
    }

    pub fn saved(&self) -> BTreeSet<String> {
        self.saved.lock().clone()
    }

    fn check_online(&self) -> Result<(), ApiError> {
        if *self.offline.lock() {
            return Err(ApiError::Network("offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ResearchApi for InMemoryResearch {
    async fn search(&self, request: SearchRequest) -> Result<Page<SearchResult>, ApiError> {
        self.check_online()?;
        let needle = request.query.to_lowercase();
        let items: Vec<SearchResult> = self
            .results
            .lock()
            .iter()
            .filter(|r| r.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        self.requests.lock().push(request.clone());
        Ok(Page {
            total: items.len() as u64,
            items,
            page: 0,
            page_size: request.page_size,
        })
    }

    async fn set_saved(&self, result_id: String, saved: bool) -> Result<(), ApiError> {
        self.check_online()?;
        let mut set = self.saved.lock();
        if saved {
            set.insert(result_id);
        } else {
            set.remove(&result_id);
        }
        Ok(())
    }
}

/// Message backend keeping delivered messages per conversation
#[derive(Default)]
pub struct InMemoryMessages {
    delivered: Mutex<BTreeMap<String, Vec<Message>>>,
    offline: Mutex<bool>,
}

impl InMemoryMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        *self.offline.lock() = offline;
    }

    pub fn delivered(&self, conversation_id: &str) -> Vec<Message> {
        self.delivered
            .lock()
            .get(conversation_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl MessagesApi for InMemoryMessages {
    async fn send_message(&self, request: SendMessageRequest) -> Result<Message, ApiError> {
        if *self.offline.lock() {
            return Err(ApiError::Network("offline".to_string()));
        }
        let mut delivered = self.delivered.lock();
        let thread = delivered.entry(request.conversation_id.clone()).or_default();
        let message = Message {
            id: format!("{}-{}", request.conversation_id, thread.len() + 1),
            conversation_id: request.conversation_id,
            body: request.body,
            sent_at: Utc::now(),
            reply_to: request.reply_to,
        };
        thread.push(message.clone());
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_counts_and_releases() {
        let context = test_context();
        let probe = NotificationProbe::attach(context.documents().store());

        context.documents().toggle_sidebar();
        context.documents().toggle_sidebar();
        assert_eq!(probe.count(), 2);

        drop(probe);
        assert_eq!(context.listener_count(), 0);
    }

    #[test]
    fn recorder_sees_post_update_state() {
        let context = test_context();
        let recorder = SnapshotRecorder::attach(context.research().store());

        context.research().set_search_query("estoppel");

        assert_eq!(recorder.snapshots()[0].search_query, "estoppel");
    }

    #[tokio::test]
    async fn in_memory_documents_delete() {
        let api = InMemoryDocuments::with_documents(vec![document("d1", None), document("d2", None)]);
        api.lock_document("d2");

        assert_eq!(api.delete_document("d1".to_string()).await, Ok(()));
        assert!(api.delete_document("d2".to_string()).await.is_err());
        assert_eq!(
            api.delete_document("d1".to_string()).await,
            Err(ApiError::NotFound("d1".to_string()))
        );
        assert_eq!(api.ids(), vec!["d2".to_string()]);
    }
}
