//! Integration tests for locking and unlocking links.

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use helpers::TestApp;

#[tokio::test]
async fn test_lock_unlock_flow() {
    let app = TestApp::new();
    let token = app.upload_file("secret.pdf", b"%PDF", None).await;

    let response = app.lock(&token, "hunter2").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["ok"], true);

    let download = app.get(&format!("/d/{token}")).await;
    assert_eq!(download.status, StatusCode::UNAUTHORIZED);
    assert!(download.header(header::CONTENT_TYPE).starts_with("text/html"));
    assert!(download.text().contains("secret.pdf"));

    let probe = app.get(&format!("/api/exists/{token}")).await;
    assert_eq!(probe.body["ok"], false);

    let info = app.get(&format!("/api/file/{token}")).await;
    assert_eq!(info.body["locked"], true);

    let wrong = app.unlock(&token, "hunter3").await;
    assert_eq!(wrong.status, StatusCode::FORBIDDEN);
    assert_eq!(wrong.body["error"], "WRONG_SECRET");

    let right = app.unlock(&token, "hunter2").await;
    assert_eq!(right.status, StatusCode::OK);

    let download = app.get(&format!("/d/{token}")).await;
    assert_eq!(download.status, StatusCode::OK);
    assert_eq!(&download.bytes[..], b"%PDF");
}

#[tokio::test]
async fn test_locked_download_is_not_counted() {
    let app = TestApp::new();
    let token = app.upload_file("once.txt", b"1", Some("1")).await;
    app.lock(&token, "pw").await;

    for _ in 0..3 {
        let response = app.get(&format!("/d/{token}")).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    app.unlock(&token, "pw").await;
    let response = app.get(&format!("/d/{token}")).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_lock_requires_password() {
    let app = TestApp::new();
    let token = app.upload_file("a.txt", b"a", None).await;

    let response = app.lock(&token, "").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.lock(&token, "   ").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request("POST", &format!("/api/lock/{token}"), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let info = app.get(&format!("/api/file/{token}")).await;
    assert_eq!(info.body["locked"], false);
}

#[tokio::test]
async fn test_lock_unknown_token() {
    let app = TestApp::new();

    let response = app.lock("nothere1", "pw").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.unlock("nothere1", "pw").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_passwords_are_trimmed() {
    let app = TestApp::new();
    let token = app.upload_file("a.txt", b"a", None).await;

    assert_eq!(app.lock(&token, "  pw  ").await.status, StatusCode::OK);
    assert_eq!(app.unlock(&token, "pw").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_unlock_without_password_is_rejected() {
    let app = TestApp::new();
    let token = app.upload_file("a.txt", b"a", None).await;
    app.lock(&token, "pw").await;

    let response = app
        .request("DELETE", &format!("/api/lock/{token}"), None)
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.get(&format!("/d/{token}")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unlock_of_unlocked_link_is_rejected() {
    let app = TestApp::new();
    let token = app.upload_file("a.txt", b"a", None).await;

    let response = app.unlock(&token, "anything").await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_relock_replaces_password() {
    let app = TestApp::new();
    let token = app.upload_file("a.txt", b"a", None).await;

    app.lock(&token, "first").await;
    app.lock(&token, "second").await;

    assert_eq!(app.unlock(&token, "first").await.status, StatusCode::FORBIDDEN);
    assert_eq!(app.unlock(&token, "second").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_header_unlock_fallback() {
    let app = TestApp::new();
    let token = app.upload_file("a.txt", b"a", None).await;
    app.lock(&token, "pw").await;

    let wrong = Request::builder()
        .method("POST")
        .uri(format!("/api/lock/{token}?unlock=1"))
        .header("x-password", "nope")
        .body(Body::empty())
        .unwrap();
    assert_eq!(app.send(wrong).await.status, StatusCode::FORBIDDEN);

    let right = Request::builder()
        .method("POST")
        .uri(format!("/api/lock/{token}?unlock=1"))
        .header("x-password", " pw ")
        .body(Body::empty())
        .unwrap();
    let response = app.send(right).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["ok"], true);

    let download = app.get(&format!("/d/{token}")).await;
    assert_eq!(download.status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_lock_body() {
    let app = TestApp::new();
    let token = app.upload_file("a.txt", b"a", None).await;

    let req = Request::builder()
        .method("POST")
        .uri(format!("/api/lock/{token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.send(req).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");
}
