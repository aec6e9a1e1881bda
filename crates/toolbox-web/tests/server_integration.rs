//! Integration tests for the toolbox web server.
//!
//! These tests start a real axum server on a random port and exercise
//! the REST endpoints.

use std::sync::Arc;

use tokio::sync::broadcast;
use toolbox::context::AppContext;
use toolbox::nav::MenuMode;
use toolbox::prefs::MemoryStore;
use toolbox::theme::Theme;
use toolbox_web::{WebConfig, WsMessage, spawn_web};

/// Helper: spawn a test server on port 0 (random available port).
async fn spawn_test_server() -> (AppContext, String, broadcast::Receiver<WsMessage>) {
    let ctx = AppContext::new(Arc::new(MemoryStore::new()));
    let (tx, rx) = broadcast::channel::<WsMessage>(64);

    let config = WebConfig {
        bind_addr: ([127, 0, 0, 1], 0).into(),
        ..Default::default()
    };

    let addr = spawn_web(ctx.clone(), tx, config).await.unwrap();
    (ctx, format!("http://{addr}"), rx)
}

async fn post_json(url: String, body: serde_json::Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(url)
        .json(&body)
        .send()
        .await
        .unwrap()
}

// ── Menu and search ──────────────────────────────────────────────────

#[tokio::test]
async fn get_menu_lists_groups_in_order() {
    let (_ctx, base, _rx) = spawn_test_server().await;

    let resp = reqwest::get(format!("{base}/api/menu")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["categories"].as_array().unwrap().len(), 4);

    let groups = json["groups"].as_array().unwrap();
    assert_eq!(groups[0]["category"]["id"], "text-tools");
    assert_eq!(groups[0]["items"].as_array().unwrap().len(), 2);
    assert_eq!(groups[3]["items"][1]["id"], "document-viewer");
}

#[tokio::test]
async fn search_matches_aliases() {
    let (_ctx, base, _rx) = spawn_test_server().await;

    let json: serde_json::Value = reqwest::get(format!("{base}/api/search?q=PWD"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["query"], "PWD");
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "password-generator");
}

#[tokio::test]
async fn empty_search_returns_everything() {
    let (_ctx, base, _rx) = spawn_test_server().await;

    let json: serde_json::Value = reqwest::get(format!("{base}/api/search"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["items"].as_array().unwrap().len(), 6);
}

// ── State and controls ───────────────────────────────────────────────

#[tokio::test]
async fn get_state_returns_snapshot() {
    let (ctx, base, _rx) = spawn_test_server().await;
    ctx.navigate("/tool/toon-converter").unwrap();

    let json: serde_json::Value = reqwest::get(format!("{base}/api/state"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["theme"], "light");
    assert_eq!(json["nav"]["collapsed"], false);
    assert_eq!(json["current"]["path"], "/tool/toon-converter");
    assert_eq!(json["title"], "TOON 轉換 - 開發者工具箱");
}

#[tokio::test]
async fn post_nav_focus_search_expands_sidebar() {
    let (ctx, base, mut rx) = spawn_test_server().await;
    ctx.nav().toggle_collapsed();
    let _ = rx.try_recv().unwrap();

    let resp = post_json(
        format!("{base}/api/nav"),
        serde_json::json!({"action": "focus_search"}),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["collapsed"], false);
    assert_eq!(json["mode"], "search");
    assert_eq!(json["search_focused"], true);

    // One broadcast for the whole transition.
    assert!(matches!(rx.try_recv().unwrap(), WsMessage::Nav { .. }));
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn post_nav_rejects_unknown_action() {
    let (_ctx, base, _rx) = spawn_test_server().await;
    let resp = post_json(
        format!("{base}/api/nav"),
        serde_json::json!({"action": "explode"}),
    )
    .await;
    assert!(resp.status().is_client_error());
}

#[tokio::test]
async fn post_navigate_sets_title_and_list_mode() {
    let (ctx, base, _rx) = spawn_test_server().await;
    ctx.nav().focus_search();

    let resp = post_json(
        format!("{base}/api/navigate"),
        serde_json::json!({"path": "/tool/markdown-tool"}),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["entry"]["name"], "markdown-tool");
    assert_eq!(json["redirected"], false);
    assert_eq!(json["title"], "Markdown 編輯 - 開發者工具箱");
    assert_eq!(ctx.nav().mode(), MenuMode::List);
}

#[tokio::test]
async fn post_navigate_root_redirects() {
    let (_ctx, base, _rx) = spawn_test_server().await;

    let json: serde_json::Value = post_json(
        format!("{base}/api/navigate"),
        serde_json::json!({"path": "/"}),
    )
    .await
    .json()
    .await
    .unwrap();
    assert_eq!(json["requested"], "/");
    assert_eq!(json["entry"]["path"], "/tool/json-tool");
    assert_eq!(json["redirected"], true);
}

#[tokio::test]
async fn post_open_unknown_id_is_404() {
    let (_ctx, base, _rx) = spawn_test_server().await;
    let resp = post_json(
        format!("{base}/api/open"),
        serde_json::json!({"id": "nope"}),
    )
    .await;
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn post_theme_cycle_persists_and_broadcasts() {
    let (ctx, base, mut rx) = spawn_test_server().await;

    let json: serde_json::Value = post_json(format!("{base}/api/theme/cycle"), serde_json::json!({}))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(json["theme"], "dark");
    assert_eq!(json["icon"], "bi-moon-fill");

    assert_eq!(ctx.theme().current(), Theme::Dark);
    assert_eq!(ctx.store().get("theme").unwrap().as_deref(), Some("dark"));
    assert!(matches!(
        rx.try_recv().unwrap(),
        WsMessage::Theme {
            theme: Theme::Dark,
            ..
        }
    ));
}
