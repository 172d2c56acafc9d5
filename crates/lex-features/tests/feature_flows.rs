use lex_features::{
    AnalyticsEvent, DocumentManager, FeatureError, QueryState, ResearchWorkspace, SecureMessenger,
};
use lex_test_utils::{
    document, recording_analytics, search_result, test_context, InMemoryDocuments,
    InMemoryMessages, InMemoryResearch, NotificationProbe,
};
use lex_views::ViewMode;
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[tokio::test]
async fn browsing_folders_refetches_matching_documents() {
    let context = test_context();
    let api = Arc::new(InMemoryDocuments::with_documents(vec![
        document("root-1", None),
        document("lease-1", Some("leases")),
        document("lease-2", Some("leases")),
    ]));
    let manager = DocumentManager::new(&context, api.clone(), recording_analytics());

    let root = manager.refresh().await.unwrap();
    assert_eq!(root.items.len(), 1);

    manager.store().navigate_to_folder("leases");
    let leases = manager.refresh().await.unwrap();
    assert_eq!(leases.total, 2);

    manager.search("lease-2");
    let hits = manager.refresh().await.unwrap();
    assert_eq!(hits.items[0].id, "lease-2");

    let queries = api.queries();
    assert_eq!(queries.len(), 3);
    assert_eq!(queries[2].search.as_deref(), Some("lease-2"));
}

#[tokio::test]
async fn bulk_delete_reports_locked_documents() {
    let context = test_context();
    let api = Arc::new(InMemoryDocuments::with_documents(vec![
        document("d1", None),
        document("d2", None),
    ]));
    api.lock_document("d2");
    let manager = DocumentManager::new(&context, api.clone(), recording_analytics());

    context.documents().select_all(["d1", "d2"]);
    let err = manager.delete_selected().await.unwrap_err();

    assert!(matches!(err, FeatureError::PartialDelete { failed: 1, .. }));
    assert_eq!(api.ids(), vec!["d2".to_string()]);
    assert!(context.documents().get_state().is_selected("d2"));
}

#[tokio::test]
async fn research_round_trip() {
    let context = test_context();
    let api = Arc::new(InMemoryResearch::with_results(vec![
        search_result("r1", "Donoghue v Stevenson"),
        search_result("r2", "Caparo v Dickman"),
    ]));
    let analytics = recording_analytics();
    let workspace = ResearchWorkspace::new(&context, api.clone(), analytics.clone());

    let page = workspace.search_for("caparo").await.unwrap().unwrap();
    assert_eq!(page.items[0].id, "r2");

    assert_eq!(workspace.toggle_saved("r2").await, Ok(true));
    assert_eq!(api.saved().into_iter().collect::<Vec<_>>(), vec!["r2".to_string()]);

    api.set_offline(true);
    assert!(workspace.toggle_saved("r2").await.is_err());
    assert!(context.research().is_result_saved("r2"));
    assert!(workspace.search_for("donoghue").await.is_err());
    assert!(matches!(workspace.results(), QueryState::Error(_)));

    assert_eq!(
        context.research().get_state().recent_searches,
        vec!["donoghue".to_string(), "caparo".to_string()]
    );
    assert_eq!(
        analytics.names(),
        vec!["research_search", "result_saved", "research_search"]
    );
}

#[tokio::test]
async fn messenger_keeps_drafts_across_conversations() {
    let context = test_context();
    let api = Arc::new(InMemoryMessages::new());
    let messenger = SecureMessenger::new(&context, api.clone(), recording_analytics());
    let probe = NotificationProbe::attach(context.communication().store());

    messenger.open_conversation("client-a");
    messenger.type_draft("Please sign page 4").unwrap();
    messenger.open_conversation("client-b");
    messenger.type_draft("Hearing moved").unwrap();

    api.set_offline(true);
    assert!(messenger.send().await.is_err());
    assert_eq!(messenger.current_draft().as_deref(), Some("Hearing moved"));

    api.set_offline(false);
    let sent = messenger.send().await.unwrap();
    assert_eq!(sent.id, "client-b-1");
    assert_eq!(messenger.current_draft(), None);

    messenger.open_conversation("client-a");
    assert_eq!(messenger.current_draft().as_deref(), Some("Please sign page 4"));
    assert_eq!(api.delivered("client-b").len(), 1);
    assert!(probe.count() >= 6);
}

#[test]
fn view_mode_changes_are_tracked_per_area() {
    let context = test_context();
    let analytics = recording_analytics();
    let documents = DocumentManager::new(
        &context,
        Arc::new(InMemoryDocuments::default()),
        analytics.clone(),
    );
    let research = ResearchWorkspace::new(
        &context,
        Arc::new(InMemoryResearch::default()),
        analytics.clone(),
    );

    documents.set_view_mode(ViewMode::Preview);
    research.set_view_mode(ViewMode::Grid);

    assert_eq!(
        analytics.events(),
        vec![
            AnalyticsEvent::ViewModeChanged {
                area: "documents",
                mode: ViewMode::Preview,
            },
            AnalyticsEvent::ViewModeChanged {
                area: "research",
                mode: ViewMode::Grid,
            },
        ]
    );
}
