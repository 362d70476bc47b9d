use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use audioscroll_api::state::AppStateInner;
use audioscroll_content::spotlight::SNIPPETS_COLLECTION;
use audioscroll_store::{DocumentStore, MemoryStore};

fn app() -> (Arc<MemoryStore>, Router) {
    let store = Arc::new(MemoryStore::new());
    let state = AppStateInner::new(store.clone());
    (store, audioscroll_api::router(state))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        // Rejections produced by axum itself (e.g. bad query strings)
        // are plain text, not JSON.
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

#[tokio::test]
async fn health_reports_ok() {
    let (_, app) = app();
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn fresh_deployment_listings_are_empty_not_errors() {
    let (_, app) = app();

    let (status, body) = send(&app, "GET", "/api/banners", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send(&app, "GET", "/api/spotlight", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn listings_stay_empty_when_the_store_is_down() {
    let (store, app) = app();
    store.set_unavailable(true);

    let (status, body) = send(&app, "GET", "/api/banners", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn banner_lifecycle() {
    let (_, app) = app();

    // Create with minimal fields; the rest come from the default table.
    let (status, created) = send(
        &app,
        "POST",
        "/api/banners",
        Some(json!({ "title": "Sale", "imageUrl": "https://x/y.png", "priority": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(created["isActive"], json!(true));
    assert_eq!(created["priority"], json!(5));
    assert_eq!(created["targetAudience"], json!("all"));
    assert_eq!(created["platform"], json!("all"));

    // Listed while active.
    let (status, listed) = send(&app, "GET", "/api/banners", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], json!(id));

    // Push the start date into the future; the banner disappears from
    // the listing but still exists.
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/banners/{}", id),
        Some(json!({ "startDate": "2099-01-01T00:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, listed) = send(&app, "GET", "/api/banners", None).await;
    assert_eq!(listed, json!([]));

    let (status, _) = send(&app, "GET", &format!("/api/banners/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);

    // Delete, then the point read 404s.
    let (status, body) = send(&app, "DELETE", &format!("/api/banners/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, body) = send(&app, "GET", &format!("/api/banners/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("Banner not found"));
}

#[tokio::test]
async fn platform_filter_applies_to_listing() {
    let (_, app) = app();

    send(
        &app,
        "POST",
        "/api/banners",
        Some(json!({ "title": "ios", "imageUrl": "https://x/i.png", "platform": "ios" })),
    )
    .await;

    let (_, for_android) = send(&app, "GET", "/api/banners?platform=android", None).await;
    assert_eq!(for_android, json!([]));

    let (_, for_ios) = send(&app, "GET", "/api/banners?platform=ios", None).await;
    assert_eq!(for_ios.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn create_banner_validation_reports_fields() {
    let (_, app) = app();

    let (status, body) = send(&app, "POST", "/api/banners", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"imageUrl"));

    let (status, body) = send(
        &app,
        "POST",
        "/api/banners",
        Some(json!({ "title": "Sale", "imageUrl": "not a url", "priority": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"imageUrl"));
    assert!(fields.contains(&"priority"));
}

#[tokio::test]
async fn malformed_body_is_a_400() {
    let (_, app) = app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/banners")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unknown fields are an invalid body shape too.
    let (status, _) = send(
        &app,
        "PUT",
        "/api/config",
        Some(json!({ "banner": { "title": "nope" } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_platform_value_is_a_400() {
    let (_, app) = app();
    let (status, _) = send(&app, "GET", "/api/banners?platform=web", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn config_roundtrip_merges_and_bumps_version() {
    let (_, app) = app();

    let (status, initial) = send(&app, "GET", "/api/config", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(initial["version"], json!(1));
    assert_eq!(initial["theme"]["primaryColor"], json!("#1A1A2E"));
    assert!(initial["createdAt"].is_string());

    let (status, updated) = send(
        &app,
        "PUT",
        "/api/config",
        Some(json!({ "theme": { "primaryColor": "#FF0000" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["version"], json!(2));
    assert_eq!(updated["theme"]["primaryColor"], json!("#FF0000"));
    // Untouched slots keep their defaults.
    assert_eq!(updated["theme"]["secondaryColor"], initial["theme"]["secondaryColor"]);
    assert_eq!(updated["features"], initial["features"]);
}

#[tokio::test]
async fn config_put_on_a_dead_store_is_a_500() {
    let (store, app) = app();
    store.set_unavailable(true);

    let (status, body) = send(
        &app,
        "PUT",
        "/api/config",
        Some(json!({ "theme": { "primaryColor": "#FF0000" } })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], json!("Internal server error"));

    // But reads still serve the default theme.
    let (status, config) = send(&app, "GET", "/api/config", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(config["theme"]["primaryColor"], json!("#1A1A2E"));
}

#[tokio::test]
async fn spotlight_requires_resolvable_snippet() {
    let (store, app) = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/spotlight",
        Some(json!({ "audiobookSnippetId": "missing", "title": "Feature" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("Audiobook snippet not found"));

    store
        .put(SNIPPETS_COLLECTION, "snip-1", json!({ "title": "Chapter One", "duration": 60 }))
        .await
        .unwrap();

    let (status, created) = send(
        &app,
        "POST",
        "/api/spotlight",
        Some(json!({ "audiobookSnippetId": "snip-1", "title": "Feature" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(!created["id"].as_str().unwrap().is_empty());

    let (status, listed) = send(&app, "GET", "/api/spotlight", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["snippet"]["title"], json!("Chapter One"));
    assert_eq!(listed[0]["snippet"]["id"], json!("snip-1"));
}

#[tokio::test]
async fn missing_spotlight_update_is_a_404() {
    let (_, app) = app();
    let (status, body) = send(
        &app,
        "PUT",
        "/api/spotlight/no-such-id",
        Some(json!({ "title": "renamed" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("Spotlight not found"));
}
