//! Integration tests for stats, liveness routes, and CORS.

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use helpers::TestApp;

#[tokio::test]
async fn test_stats_track_uploads_and_downloads() {
    let app = TestApp::new();

    let empty = app.get("/api/stats").await;
    assert_eq!(
        empty.body,
        serde_json::json!({
            "totalUploads": 0,
            "totalDownloads": 0,
            "avgSize": 0,
            "activeLinks": 0,
        })
    );

    let a = app.upload_file("a.bin", &[0u8; 10], None).await;
    let b = app.upload_file("b.bin", &[0u8; 20], Some("1")).await;

    app.get(&format!("/d/{a}")).await;
    app.get(&format!("/d/{b}")).await;
    // Rejected; must not count.
    app.get(&format!("/d/{b}")).await;

    let stats = app.get("/api/stats").await;
    assert_eq!(stats.status, StatusCode::OK);
    assert_eq!(stats.body["totalUploads"], 2);
    assert_eq!(stats.body["totalDownloads"], 2);
    assert_eq!(stats.body["avgSize"], 15);
    assert_eq!(stats.body["activeLinks"], 1);

    app.lock(&a, "pw").await;
    let stats = app.get("/api/stats").await;
    assert_eq!(stats.body["activeLinks"], 0);
}

#[tokio::test]
async fn test_sweep_keeps_live_links_reachable() {
    let app = TestApp::new();
    let live = app.upload_file("live.txt", b"live", None).await;
    let spent = app.upload_file("spent.txt", b"spent", Some("1")).await;
    app.get(&format!("/d/{spent}")).await;

    assert_eq!(app.registry.sweep(), 1);

    assert_eq!(app.get(&format!("/d/{spent}")).await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get(&format!("/d/{live}")).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_liveness_routes() {
    let app = TestApp::new();

    let root = app.get("/").await;
    assert_eq!(root.status, StatusCode::OK);
    assert_eq!(root.body["ok"], true);
    assert!(root.body["service"].as_str().unwrap().contains("ImpactQR"));

    let ping = app.get("/__ping").await;
    assert_eq!(ping.status, StatusCode::OK);
    assert_eq!(ping.body, serde_json::json!({ "ok": true }));
}

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    let app = TestApp::new();

    let req = Request::builder()
        .method("GET")
        .uri("/api/stats")
        .header(header::ORIGIN, "https://example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
}
