//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use bytes::Bytes;
use serde_json::Value;
use tower::ServiceExt;

use impactqr_api::AppState;
use impactqr_core::config::AppConfig;
use impactqr_store::BlobRegistry;

const BOUNDARY: &str = "impactqr-test-boundary";

/// Test application context
pub struct TestApp {
    /// The fully layered Axum app
    pub router: Router,
    /// Registry behind the app, for seeding and inspection
    pub registry: Arc<BlobRegistry>,
    /// Application config
    pub config: AppConfig,
}

/// One multipart part.
pub enum Part<'a> {
    /// A file field.
    File {
        field: &'a str,
        filename: &'a str,
        data: &'a [u8],
    },
    /// A plain text field.
    Text { field: &'a str, value: &'a str },
}

impl<'a> Part<'a> {
    /// A file part.
    pub fn file(field: &'a str, filename: &'a str, data: &'a [u8]) -> Self {
        Self::File {
            field,
            filename,
            data,
        }
    }

    /// A text part.
    pub fn text(field: &'a str, value: &'a str) -> Self {
        Self::Text { field, value }
    }
}

impl TestApp {
    /// Create a test application with small upload budgets and cheap hashing
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Create a test application from an explicit config
    pub fn with_config(config: AppConfig) -> Self {
        let state = AppState::new(config.clone()).expect("Failed to build state");
        let registry = Arc::clone(&state.registry);
        let router = impactqr_api::build_app(state);

        Self {
            router,
            registry,
            config,
        }
    }

    /// Send a request built by the caller
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            bytes,
            body,
        }
    }

    /// Make a JSON request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// GET a path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// POST a multipart form
    pub async fn upload(&self, path: &str, parts: &[Part<'_>]) -> TestResponse {
        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Upload one file and return its token
    pub async fn upload_file(&self, filename: &str, data: &[u8], max_downloads: Option<&str>) -> String {
        let mut parts = vec![Part::file("file", filename, data)];
        if let Some(max) = max_downloads {
            parts.push(Part::text("maxDownloads", max));
        }

        let response = self.upload("/api/upload", &parts).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Upload failed: {:?}",
            response.body
        );

        response.body["token"]
            .as_str()
            .expect("No token in upload response")
            .to_string()
    }

    /// Lock a link
    pub async fn lock(&self, token: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            &format!("/api/lock/{token}"),
            Some(serde_json::json!({ "password": password })),
        )
        .await
    }

    /// Unlock a link via DELETE
    pub async fn unlock(&self, token: &str, password: &str) -> TestResponse {
        self.request(
            "DELETE",
            &format!("/api/lock/{token}"),
            Some(serde_json::json!({ "password": password })),
        )
        .await
    }
}

/// Config with small budgets and cheap Argon2 parameters.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.uploads.max_file_mb = 1;
    config.uploads.max_total_mb = 2;
    config.uploads.max_files = 3;
    config.links.secret.memory_kib = 8;
    config.links.secret.iterations = 1;
    config.links.secret.parallelism = 1;
    config
}

/// Encode `parts` as a multipart/form-data body.
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::File {
                field,
                filename,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
            Part::Text { field, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{field}\"\r\n\r\n{value}")
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub bytes: Bytes,
    /// Parsed JSON body, `Null` when not JSON
    pub body: Value,
}

impl TestResponse {
    /// A header as a string, empty when absent.
    pub fn header(&self, name: header::HeaderName) -> &str {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    /// Body as UTF-8 text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}
