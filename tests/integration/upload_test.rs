//! Integration tests for single and multi-file uploads.

mod helpers;

use std::io::{Cursor, Read};

use axum::http::StatusCode;
use helpers::{Part, TestApp};

#[tokio::test]
async fn test_single_upload_response_shape() {
    let app = TestApp::new();
    let response = app
        .upload("/api/upload", &[Part::file("file", "hello.txt", b"hello world")])
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = &response.body;
    let token = body["token"].as_str().unwrap();

    assert_eq!(body["ok"], true);
    assert_eq!(token.len(), 8);
    assert_eq!(body["filename"], "hello.txt");
    assert_eq!(body["size"], 11);
    assert!(body["createdAt"].as_i64().unwrap() > 0);
    assert_eq!(body["url"], format!("/d/{token}"));
    assert!(body["maxDownloads"].is_null());
}

#[tokio::test]
async fn test_max_downloads_parsing() {
    let app = TestApp::new();

    for (raw, expected) in [
        ("3", serde_json::json!(3)),
        ("2.2", serde_json::json!(3)),
        ("abc", serde_json::Value::Null),
        ("0", serde_json::Value::Null),
        ("", serde_json::Value::Null),
    ] {
        let response = app
            .upload(
                "/api/upload",
                &[
                    Part::text("maxDownloads", raw),
                    Part::file("file", "a.txt", b"a"),
                ],
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["maxDownloads"], expected, "maxDownloads={raw:?}");
    }
}

#[tokio::test]
async fn test_upload_without_file_is_rejected() {
    let app = TestApp::new();

    let response = app
        .upload("/api/upload", &[Part::text("maxDownloads", "1")])
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["ok"], false);
    assert_eq!(response.body["error"], "VALIDATION");

    let response = app
        .upload("/api/upload", &[Part::file("file", "empty.txt", b"")])
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    assert!(app.registry.is_empty());
}

#[tokio::test]
async fn test_oversized_file_is_rejected() {
    let app = TestApp::new();
    let big = vec![0u8; 1024 * 1024 + 1];

    let response = app
        .upload("/api/upload", &[Part::file("file", "big.bin", &big)])
        .await;

    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.body["error"], "SIZE_EXCEEDED");
    assert!(app.registry.is_empty());
}

#[tokio::test]
async fn test_body_over_hard_limit_is_rejected() {
    let app = TestApp::new();
    let huge = vec![0u8; 4 * 1024 * 1024];

    let response = app
        .upload("/api/upload", &[Part::file("file", "huge.bin", &huge)])
        .await;

    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(app.registry.is_empty());
}

#[tokio::test]
async fn test_multi_upload_bundles_zip() {
    let app = TestApp::new();
    let response = app
        .upload(
            "/api/upload-multi",
            &[
                Part::file("files", "one.txt", b"first"),
                Part::file("files", "two.txt", b"second"),
                Part::text("maxDownloads", "1"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let token = response.body["token"].as_str().unwrap().to_string();
    assert_eq!(response.body["filename"], format!("impactqr-{token}.zip"));
    assert_eq!(response.body["maxDownloads"], 1);

    let download = app.get(&format!("/d/{token}")).await;
    assert_eq!(download.status, StatusCode::OK);

    let mut archive = zip::ZipArchive::new(Cursor::new(download.bytes.to_vec())).unwrap();
    assert_eq!(archive.len(), 2);

    let mut contents = String::new();
    archive
        .by_name("two.txt")
        .unwrap()
        .read_to_string(&mut contents)
        .unwrap();
    assert_eq!(contents, "second");
}

#[tokio::test]
async fn test_multi_upload_budgets() {
    let app = TestApp::new();

    let response = app.upload("/api/upload-multi", &[]).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let too_many: Vec<Part<'_>> = ["a", "b", "c", "d"]
        .into_iter()
        .map(|name| Part::file("files", name, b"x"))
        .collect();
    let response = app.upload("/api/upload-multi", &too_many).await;
    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);

    let mb = vec![1u8; 1024 * 1024];
    let response = app
        .upload(
            "/api/upload-multi",
            &[
                Part::file("files", "a", &mb),
                Part::file("files", "b", &mb),
                Part::file("files", "c", b"!"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.body["error"], "SIZE_EXCEEDED");

    assert!(app.registry.is_empty());
}

#[tokio::test]
async fn test_empty_parts_do_not_count_toward_file_limit() {
    let app = TestApp::new();
    let response = app
        .upload(
            "/api/upload-multi",
            &[
                Part::file("files", "a.txt", b"a"),
                Part::file("files", "b.txt", b"b"),
                Part::file("files", "c.txt", b"c"),
                Part::file("files", "empty.txt", b""),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let token = response.body["token"].as_str().unwrap().to_string();
    let download = app.get(&format!("/d/{token}")).await;
    let archive = zip::ZipArchive::new(Cursor::new(download.bytes.to_vec())).unwrap();
    assert_eq!(archive.len(), 3);
}
