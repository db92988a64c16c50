use std::collections::HashMap;

use axum::extract::{Multipart, Query};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use inkpage_shared::DocumentFile;
use inkpage_upload::{HttpUploadService, UploadConfig, UploadError, UploadService};

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api")
}

async fn provide_token(
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    match params.get("email").map(String::as_str) {
        Some("test@example.com") => Ok(Json(json!({
            "access_token": "test-token",
            "token_type": "bearer",
        }))),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn upload_pdf(headers: HeaderMap, mut multipart: Multipart) -> Result<Json<Value>, StatusCode> {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some("Bearer test-token");
    if !authorized {
        return Err(StatusCode::UNAUTHORIZED);
    }
    while let Some(field) = multipart.next_field().await.map_err(|_| StatusCode::BAD_REQUEST)? {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
        if name.as_deref() != Some("test.pdf")
            || content_type.as_deref() != Some("application/pdf")
            || !bytes.starts_with(b"%PDF")
        {
            return Err(StatusCode::UNPROCESSABLE_ENTITY);
        }
        return Ok(Json(json!({ "file_id": "file-123", "message": "stored" })));
    }
    Err(StatusCode::BAD_REQUEST)
}

fn api() -> Router {
    Router::new()
        .route("/api/provide-token", post(provide_token))
        .route("/api/upload-pdf", post(upload_pdf))
}

fn service(api_url: &str) -> HttpUploadService {
    HttpUploadService::new(&UploadConfig::new(api_url)).unwrap()
}

fn pdf() -> DocumentFile {
    DocumentFile::new("test.pdf", "application/pdf", b"%PDF-1.7 body".to_vec())
}

#[tokio::test]
async fn issues_token_and_uploads() {
    let api_url = serve(api()).await;
    let service = service(&api_url);

    let token = service.get_token("test@example.com").await.unwrap();
    assert_eq!(token, "test-token");

    let result = service.upload_pdf(&pdf(), &token).await.unwrap();
    assert!(result.success);
    assert_eq!(result.message, "PDF upload successful");
    assert_eq!(result.file_id.as_deref(), Some("file-123"));
    assert_eq!(result.error, None);
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_ignored() {
    let api_url = serve(api()).await;
    let service = service(&format!("{api_url}/"));

    assert_eq!(service.get_token("test@example.com").await.unwrap(), "test-token");
}

#[tokio::test]
async fn rejected_token_request_is_an_error() {
    let api_url = serve(api()).await;
    let service = service(&api_url);

    let error = service.get_token("intruder@example.com").await.unwrap_err();
    assert!(matches!(error, UploadError::Status { status: 401, .. }));
    assert_eq!(error.to_string(), "HTTP 401: Unauthorized");
}

#[tokio::test]
async fn server_fault_on_upload_is_a_failed_result() {
    let router = Router::new().route(
        "/api/upload-pdf",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let api_url = serve(router).await;
    let service = service(&api_url);

    let result = service.upload_pdf(&pdf(), "test-token").await.unwrap();
    assert!(!result.success);
    assert_eq!(result.message, "Upload failed");
    assert_eq!(result.error.as_deref(), Some("HTTP 500: Internal Server Error"));
}

#[tokio::test]
async fn wrong_token_on_upload_is_a_failed_result() {
    let api_url = serve(api()).await;
    let service = service(&api_url);

    let result = service.upload_pdf(&pdf(), "stale-token").await.unwrap();
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("HTTP 401: Unauthorized"));
}

#[tokio::test]
async fn unreachable_server_is_a_failed_result() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let service = service(&format!("http://{addr}/api"));

    let result = service.upload_pdf(&pdf(), "test-token").await.unwrap();
    assert!(!result.success);
    assert!(result.error.is_some_and(|error| !error.is_empty()));
}
