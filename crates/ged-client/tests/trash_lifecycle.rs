//! Trash lifecycle against the fake API: listing, restore, purge, empty,
//! confirmation gates, and cancellation.

mod common;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio_util::sync::CancellationToken;

use common::{TestApp, node};
use ged_client::view::{ActionOutcome, ScriptedPrompter, TrashView};
use ged_core::error::ErrorKind;
use ged_core::types::NodeId;

async fn app_with_trash() -> TestApp {
    let app = TestApp::new().await;
    app.as_collaborator(json!({"manage_files": true})).await;
    {
        let mut state = app.fake.state();
        state.trash_node(node(10, "Contrato.pdf", false, Some(1)), vec![]);
        state.trash_node(
            node(20, "Notas Fiscais", true, None),
            vec![
                node(21, "jan.pdf", false, Some(20)),
                node(22, "fev.pdf", false, Some(20)),
                node(23, "Anexos", true, Some(20)),
            ],
        );
    }
    app
}

fn view(app: &TestApp, answers: Vec<bool>) -> (Arc<ScriptedPrompter>, TrashView) {
    let prompter = Arc::new(ScriptedPrompter::new(answers));
    let view = TrashView::new(app.services.trash.clone(), prompter.clone());
    (prompter, view)
}

#[tokio::test]
async fn test_list_fills_scope_from_session() {
    let app = app_with_trash().await;
    let cancel = CancellationToken::new();

    let entries = app.services.trash.list(None, &cancel).await.unwrap();
    assert_eq!(entries.len(), 2);
    let folder = entries.iter().find(|e| e.id() == NodeId(20)).unwrap();
    assert!(folder.is_folder());
    assert_eq!(folder.children_count, 3);

    let requests = app.fake.state().requests_to("/api/v1/nodes/trash");
    assert_eq!(requests.len(), 1);
    let query = &requests[0].query;
    assert_eq!(query.get("business_id").map(String::as_str), Some("3"));
    assert_eq!(query.get("tipo_usuario").map(String::as_str), Some("pj"));
    assert_eq!(query.get("user_id").map(String::as_str), Some("12"));
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some("Bearer collaborator-12")
    );
}

#[tokio::test]
async fn test_empty_listing_is_valid() {
    let app = TestApp::new().await;
    app.as_owner().await;
    let entries = app
        .services
        .trash
        .list(None, &CancellationToken::new())
        .await
        .unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_restore_removes_entry_from_listing() {
    let app = app_with_trash().await;
    let (prompter, view) = view(&app, vec![true]);
    let cancel = CancellationToken::new();

    view.refresh(&cancel).await.unwrap();
    let entry = view.find(NodeId(10)).await.unwrap();
    let outcome = view.restore(&entry, None, &cancel).await.unwrap();

    assert!(outcome.is_completed());
    assert_eq!(prompter.confirmations().len(), 1);
    assert_eq!(prompter.alerts(), vec!["Item restaurado com sucesso"]);
    assert!(view.find(NodeId(10)).await.is_none());
    assert_eq!(app.fake.state().live.get(&10).unwrap().parent_id, Some(1));
}

#[tokio::test]
async fn test_restore_to_other_parent() {
    let app = app_with_trash().await;
    let response = app
        .services
        .trash
        .restore(NodeId(10), Some(NodeId(99)), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(response.node.parent_id, Some(NodeId(99)));

    let requests = app.fake.state().requests_to("/api/v1/nodes/trash/10/restore");
    assert_eq!(
        requests[0].query.get("restore_to_parent").map(String::as_str),
        Some("99")
    );
}

#[tokio::test]
async fn test_purge_folder_asks_twice_and_removes_subtree() {
    let app = app_with_trash().await;
    let (prompter, view) = view(&app, vec![true, true]);
    let cancel = CancellationToken::new();

    view.refresh(&cancel).await.unwrap();
    let folder = view.find(NodeId(20)).await.unwrap();
    let outcome = view.purge(&folder, &cancel).await.unwrap();
    assert!(outcome.is_completed());

    let confirmations = prompter.confirmations();
    assert_eq!(confirmations.len(), 2);
    assert!(confirmations[0].contains("\"Notas Fiscais\""));
    assert!(confirmations[0].contains("3 item(s)"));
    assert!(confirmations[1].contains("ABSOLUTELY SURE"));
    assert!(confirmations[1].contains("\"Notas Fiscais\" and its 3 item(s)"));

    let state = app.fake.state();
    for id in [20, 21, 22, 23] {
        assert!(!state.in_trash(id), "node {id} should be gone");
        assert!(!state.live.contains_key(&id));
    }
    drop(state);
    assert!(view.find(NodeId(20)).await.is_none());
}

#[tokio::test]
async fn test_declined_confirmation_sends_nothing() {
    let app = app_with_trash().await;
    let cancel = CancellationToken::new();

    let (_, view_first) = view(&app, vec![false]);
    view_first.refresh(&cancel).await.unwrap();
    let entry = view_first.find(NodeId(10)).await.unwrap();
    assert!(matches!(
        view_first.purge(&entry, &cancel).await.unwrap(),
        ActionOutcome::Declined
    ));

    let (_, view_second) = view(&app, vec![true, false]);
    assert!(matches!(
        view_second.purge(&entry, &cancel).await.unwrap(),
        ActionOutcome::Declined
    ));

    let state = app.fake.state();
    assert!(state.requests_to("/api/v1/nodes/trash/10").is_empty());
    assert!(state.in_trash(10));
}

#[tokio::test]
async fn test_purge_missing_entry_fails_with_not_found() {
    let app = app_with_trash().await;
    let err = app
        .services
        .trash
        .purge(NodeId(404), &CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.message, "Item não encontrado na lixeira");
}

#[tokio::test]
async fn test_failed_action_alerts_server_message() {
    let app = app_with_trash().await;
    let (prompter, view) = view(&app, vec![true, true]);
    let cancel = CancellationToken::new();
    view.refresh(&cancel).await.unwrap();
    let entry = view.find(NodeId(10)).await.unwrap();

    app.fake.state().trash.remove(&10);
    let outcome = view.purge(&entry, &cancel).await.unwrap();
    match outcome {
        ActionOutcome::Failed(err) => assert_eq!(err.kind, ErrorKind::NotFound),
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(prompter.alerts(), vec!["Item não encontrado na lixeira"]);
    // The listing is only reloaded after success.
    assert!(view.find(NodeId(10)).await.is_some());
}

#[tokio::test]
async fn test_empty_all_on_empty_listing_makes_no_request() {
    let app = TestApp::new().await;
    app.as_owner().await;
    let (prompter, view) = view(&app, vec![]);
    let cancel = CancellationToken::new();

    view.refresh(&cancel).await.unwrap();
    let outcome = view.empty_all(None, &cancel).await.unwrap();
    assert!(matches!(outcome, ActionOutcome::AlreadyEmpty));
    assert!(prompter.confirmations().is_empty());
    assert!(
        app.fake
            .state()
            .requests_to("/api/v1/nodes/trash/empty")
            .is_empty()
    );
}

#[tokio::test]
async fn test_empty_all_restates_count_and_clears() {
    let app = app_with_trash().await;
    let (prompter, view) = view(&app, vec![true, true]);
    let cancel = CancellationToken::new();

    view.refresh(&cancel).await.unwrap();
    let outcome = view.empty_all(Some(30), &cancel).await.unwrap();
    match outcome {
        ActionOutcome::Completed(message) => {
            assert_eq!(message, "5 itens deletados permanentemente")
        }
        other => panic!("expected completion, got {other:?}"),
    }
    assert!(prompter.confirmations()[1].contains("ALL 2 item(s)"));
    assert!(view.entries().await.is_empty());

    let requests = app.fake.state().requests_to("/api/v1/nodes/trash/empty");
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].query.get("older_than_days").map(String::as_str),
        Some("30")
    );
    assert_eq!(
        requests[0].query.get("business_id").map(String::as_str),
        Some("3")
    );
}

#[tokio::test]
async fn test_search_filters_visible_entries() {
    let app = app_with_trash().await;
    let (_, view) = view(&app, vec![]);
    view.refresh(&CancellationToken::new()).await.unwrap();

    view.set_search("notas").await;
    let visible = view.visible().await;
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name(), "Notas Fiscais");

    view.set_search("").await;
    assert_eq!(view.visible().await.len(), 2);
}

#[tokio::test]
async fn test_second_action_while_one_runs_is_rejected() {
    let app = app_with_trash().await;
    app.fake.state().restore_delay = Some(Duration::from_millis(500));
    let (_, view) = view(&app, vec![true, true, true]);
    let view = Arc::new(view);
    let cancel = CancellationToken::new();
    view.refresh(&cancel).await.unwrap();
    let first = view.find(NodeId(10)).await.unwrap();
    let second = view.find(NodeId(20)).await.unwrap();

    let running = {
        let view = view.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { view.restore(&first, None, &cancel).await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(view.is_busy());

    let err = view.purge(&second, &cancel).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    assert!(running.await.unwrap().unwrap().is_completed());
    assert!(!view.is_busy());
    assert!(app.fake.state().in_trash(20));
}

#[tokio::test]
async fn test_cancelled_listing_resolves_to_cancelled() {
    let app = app_with_trash().await;
    app.fake.state().list_delay = Some(Duration::from_secs(5));
    let cancel = CancellationToken::new();

    let trash = app.services.trash.clone();
    let token = cancel.clone();
    let task = tokio::spawn(async move { trash.list(None, &token).await });
    tokio::time::sleep(Duration::from_millis(100)).await;
    cancel.cancel();

    let err = tokio::time::timeout(Duration::from_secs(2), task)
        .await
        .expect("cancellation should end the call promptly")
        .unwrap()
        .unwrap_err();
    assert!(err.is_cancelled());
}

#[tokio::test]
async fn test_already_cancelled_token_sends_nothing() {
    let app = app_with_trash().await;
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = app
        .services
        .trash
        .purge(NodeId(10), &cancel)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Cancelled);
    assert!(app.fake.state().requests.is_empty());
}

#[tokio::test]
async fn test_deleted_folder_lands_in_trash_with_subtree() {
    let app = TestApp::new().await;
    app.as_collaborator(json!({"manage_files": true})).await;
    {
        let mut state = app.fake.state();
        state.add_live(node(30, "Contratos", true, None));
        state.add_live(node(31, "aluguel.pdf", false, Some(30)));
        state.add_live(node(32, "Antigos", true, Some(30)));
        state.add_live(node(33, "2019.pdf", false, Some(32)));
    }
    let cancel = CancellationToken::new();

    let message = app.services.nodes.delete(NodeId(30), &cancel).await.unwrap();
    assert_eq!(message.as_deref(), Some("Item movido para a lixeira"));

    let delete = app.fake.state().requests_to("/api/v1/nodes/30");
    assert_eq!(delete[0].method, "DELETE");
    assert_eq!(delete[0].query.get("user_id").map(String::as_str), Some("12"));
    assert_eq!(
        delete[0].query.get("tipo_usuario").map(String::as_str),
        Some("collaborator")
    );

    let (prompter, view) = view(&app, vec![true]);
    view.refresh(&cancel).await.unwrap();
    let entry = view.find(NodeId(30)).await.unwrap();
    assert!(entry.is_folder());
    assert_eq!(entry.children_count, 3);
    assert!(app.fake.state().live.is_empty());

    let outcome = view.restore(&entry, None, &cancel).await.unwrap();
    assert!(outcome.is_completed());
    assert_eq!(prompter.confirmations().len(), 1);

    let live = app.services.nodes.list(&Default::default(), &cancel).await.unwrap();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].id, NodeId(30));
    assert_eq!(app.fake.state().live.len(), 4);
}
