use lex_views::documents::folder_path_after_navigate;
use lex_views::research::recent_searches_after;
use lex_views::{IdSet, StoreContext, ViewMode, ViewsConfig};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::Arc;

#[test]
fn folder_navigation_round_trip() {
    let context = StoreContext::default();
    let documents = context.documents();

    documents.navigate_to_folder("A");
    documents.navigate_to_folder("B");
    documents.navigate_to_folder("A");

    let state = documents.get_state();
    assert_eq!(state.current_folder_id.as_deref(), Some("A"));
    assert_eq!(state.folder_path, vec!["A".to_string()]);
}

#[test]
fn document_selection_end_to_end() {
    let context = StoreContext::default();
    let documents = context.documents();

    documents.select_document("d1");
    documents.select_document("d2");
    documents.toggle_document_selection("d1");
    assert_eq!(documents.get_state().selected_document_ids, IdSet::unit("d2".to_string()));

    documents.select_all(["d1", "d2", "d3"]);
    assert_eq!(documents.get_state().selected_document_ids.len(), 3);

    documents.clear_selection();
    assert!(documents.get_state().selected_document_ids.is_empty());
}

#[test]
fn views_unmounting_releases_every_listener() {
    let context = StoreContext::default();
    let bindings = (
        context.documents().bind(|| {}),
        context.documents().bind(|| {}),
        context.research().bind(|| {}),
        context.communication().bind(|| {}),
    );
    assert_eq!(context.listener_count(), 4);

    context.documents().set_view_mode(ViewMode::Grid);
    assert_eq!(bindings.0.render_requests(), 1);
    assert_eq!(bindings.1.render_requests(), 1);
    assert_eq!(bindings.2.render_requests(), 0);

    drop(bindings);
    assert_eq!(context.listener_count(), 0);
}

#[test]
fn non_reactive_read_does_not_subscribe() {
    let context = StoreContext::default();
    context.research().set_search_query("adverse possession");

    let query = context.research().get_state().search_query.clone();
    assert_eq!(query, "adverse possession");
    assert_eq!(context.listener_count(), 0);
}

#[test]
fn every_action_replaces_snapshot() {
    let context = StoreContext::default();
    let before = context.communication().get_state();

    context.communication().clear_draft("absent");
    let after = context.communication().get_state();

    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(*before, *after);
}

#[test]
fn recurse_policy_flows_from_config() {
    let config = ViewsConfig::new().with_reentrancy(lex_store::ReentrancyPolicy::Recurse);
    let context = StoreContext::new(config);

    assert_eq!(
        context.documents().store().config().reentrancy,
        lex_store::ReentrancyPolicy::Recurse
    );
}

#[test]
fn concurrent_bookmark_toggles_alternate() {
    let context = StoreContext::default();
    let research = context.research();
    let saved_returns = std::sync::atomic::AtomicUsize::new(0);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..50 {
                    if research.toggle_saved_result("x") {
                        saved_returns.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                    }
                }
            });
        }
    });

    assert_eq!(saved_returns.into_inner(), 100);
    assert!(!research.is_result_saved("x"));
    assert_eq!(research.store().version(), 200);
}

#[test]
fn conditional_draft_clear_keeps_edited_text() {
    let context = StoreContext::default();
    let communication = context.communication();
    communication.save_draft("c1", "first");
    communication.save_draft("c1", "first, edited");

    assert!(!communication.clear_draft_if("c1", "first"));
    assert_eq!(communication.get_draft("c1").as_deref(), Some("first, edited"));

    assert!(communication.clear_draft_if("c1", "first, edited"));
    assert!(!communication.has_draft("c1"));
}

#[test]
fn closing_preview_of_other_document_keeps_pane() {
    let context = StoreContext::default();
    let documents = context.documents();
    documents.open_preview("d2");

    documents.close_preview_of("d1");
    assert_eq!(documents.get_state().preview_document_id.as_deref(), Some("d2"));

    documents.close_preview_of("d2");
    assert_eq!(documents.get_state().preview_document_id, None);
}

fn folder_id() -> impl Strategy<Value = String> {
    prop_oneof![Just("A"), Just("B"), Just("C"), Just("D")].prop_map(String::from)
}

proptest! {
    #[test]
    fn prop_breadcrumb_never_repeats_and_ends_at_current(ids in prop::collection::vec(folder_id(), 0..30)) {
        let context = StoreContext::default();
        let documents = context.documents();
        let mut model: Vec<String> = Vec::new();

        for id in &ids {
            documents.navigate_to_folder(id.clone());
            model = folder_path_after_navigate(&model, id);
        }

        let state = documents.get_state();
        prop_assert_eq!(&state.folder_path, &model);
        prop_assert_eq!(state.current_folder_id.as_ref(), state.folder_path.last());

        let mut seen = std::collections::HashSet::new();
        prop_assert!(state.folder_path.iter().all(|segment| seen.insert(segment.clone())));
    }

    #[test]
    fn prop_go_back_from_shallow_path_is_root(ids in prop::collection::vec(folder_id(), 0..2)) {
        let context = StoreContext::default();
        let documents = context.documents();
        for id in ids.into_iter().take(1) {
            documents.navigate_to_folder(id);
        }

        documents.go_back();

        let state = documents.get_state();
        prop_assert_eq!(state.current_folder_id.clone(), None);
        prop_assert!(state.folder_path.is_empty());
    }

    #[test]
    fn prop_selection_has_no_duplicates(ops in prop::collection::vec((0u8..3, folder_id()), 0..40)) {
        let context = StoreContext::default();
        let documents = context.documents();
        let mut model = std::collections::BTreeSet::new();

        for (op, id) in ops {
            match op {
                0 => {
                    documents.select_document(id.clone());
                    model.insert(id);
                }
                1 => {
                    documents.deselect_document(&id);
                    model.remove(&id);
                }
                _ => {
                    documents.toggle_document_selection(id.clone());
                    if !model.remove(&id) {
                        model.insert(id);
                    }
                }
            }
        }

        let selected: Vec<String> = documents.get_state().selected_document_ids.iter().cloned().collect();
        let expected: Vec<String> = model.into_iter().collect();
        prop_assert_eq!(selected, expected);
    }

    #[test]
    fn prop_recent_searches_bounded(queries in prop::collection::vec("[a-c]{1,2}", 0..30), max in 1usize..6) {
        let mut recent = Vec::new();
        for query in &queries {
            recent = recent_searches_after(&recent, query, max);
            prop_assert_eq!(recent.first(), Some(query));
        }
        prop_assert!(recent.len() <= max);

        let mut seen = std::collections::HashSet::new();
        prop_assert!(recent.iter().all(|q| seen.insert(q.clone())));
    }
}
