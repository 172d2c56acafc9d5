use lex_harness::{replay, HarnessError, Script};
use lex_test_utils::test_context;
use lex_views::{IdSet, ViewMode, ViewsConfig};
use pretty_assertions::assert_eq;
use std::io::Write;

const SESSION: &str = r#"[
    {"action": "set_document_view_mode", "mode": "grid"},
    {"action": "navigate_to_folder", "folder_id": "matters"},
    {"action": "navigate_to_folder", "folder_id": "smith"},
    {"action": "select_all_documents", "ids": ["d1", "d2", "d3"]},
    {"action": "toggle_document_selection", "id": "d2"},
    {"action": "go_back"},
    {"action": "set_search_query", "query": "adverse possession"},
    {"action": "add_recent_search", "query": "adverse possession"},
    {"action": "toggle_saved_result", "id": "r9"},
    {"action": "set_active_conversation", "conversation_id": "c1"},
    {"action": "save_draft", "conversation_id": "c1", "text": "Call me"},
    {"action": "start_reply", "message_id": "m3"}
]"#;

#[test]
fn replay_reports_final_states() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SESSION.as_bytes()).unwrap();

    let script = Script::load(file.path()).unwrap();
    let report = replay(&script, ViewsConfig::default()).unwrap();

    assert_eq!(report.actions_applied, 12);
    assert_eq!(report.notifications.total(), 12);

    assert_eq!(report.documents.view_mode, ViewMode::Grid);
    assert_eq!(report.documents.folder_path, vec!["matters".to_string()]);
    assert_eq!(
        report.documents.selected_document_ids,
        ["d1", "d3"].into_iter().map(String::from).collect::<IdSet>()
    );
    assert_eq!(report.research.recent_searches, vec!["adverse possession".to_string()]);
    assert!(report.research.saved_result_ids.contains("r9"));
    assert_eq!(report.communication.draft("c1"), Some("Call me"));
    assert_eq!(report.communication.reply_to_message_id.as_deref(), Some("m3"));
}

#[test]
fn replay_matches_direct_store_calls() {
    let script = Script::from_json_str(SESSION).unwrap();
    let report = replay(&script, ViewsConfig::default()).unwrap();

    let context = test_context();
    for action in &script.actions {
        action.apply(&context);
    }

    assert_eq!(report.documents, *context.documents().get_state());
    assert_eq!(report.research, *context.research().get_state());
    assert_eq!(report.communication, *context.communication().get_state());
}

#[test]
fn report_json_has_every_store() {
    let script = Script::from_json_str(SESSION).unwrap();
    let json = replay(&script, ViewsConfig::default()).unwrap().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["documents"]["view_mode"], "grid");
    assert_eq!(value["communication"]["drafts"]["c1"], "Call me");
    assert_eq!(value["notifications"]["research"], 3);
}

#[test]
fn reset_all_restores_defaults() {
    let script = Script::from_json_str(
        r#"[
            {"action": "select_document", "id": "d1"},
            {"action": "save_draft", "conversation_id": "c1", "text": "x"},
            {"action": "reset_all"}
        ]"#,
    )
    .unwrap();

    let report = replay(&script, ViewsConfig::default()).unwrap();

    assert!(report.documents.selected_document_ids.is_empty());
    assert!(report.communication.drafts.is_empty());
    assert_eq!(report.transitions, 5);
}

#[test]
fn missing_script_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Script::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, HarnessError::Io { .. }));
}
