//! Command-line upload flow against a live router on a loopback port.

mod helpers;

use std::io::Write;
use std::sync::Arc;

use gemini_image_analyzer::client::{analyze_file, AnalyzeClient};
use gemini_image_analyzer::config::DEFAULT_MAX_UPLOAD_BYTES;
use gemini_image_analyzer::{router, AppState, ImageAnalyzer};
use tempfile::NamedTempFile;

use helpers::{StubAnalyzer, JPEG_BYTES};

async fn spawn_server(analyzer: Option<Arc<dyn ImageAnalyzer>>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(AppState::new(analyzer), DEFAULT_MAX_UPLOAD_BYTES);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn temp_file(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file
}

#[tokio::test]
async fn test_analyze_file_returns_text() {
    let stub = StubAnalyzer::replying("**Objects:** a red apple");
    let base = spawn_server(Some(stub.clone())).await;
    let file = temp_file(JPEG_BYTES);

    let analysis = analyze_file(&AnalyzeClient::new(base), file.path())
        .await
        .unwrap();
    assert_eq!(analysis, "**Objects:** a red apple");
    assert_eq!(stub.seen()[0].mime_type, "image/jpeg");
}

#[tokio::test]
async fn test_analyze_file_surfaces_server_error() {
    let stub = StubAnalyzer::failing("quota exceeded");
    let base = spawn_server(Some(stub)).await;
    let file = temp_file(JPEG_BYTES);

    let err = analyze_file(&AnalyzeClient::new(base), file.path())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Error: Gemini API error: quota exceeded");
}

#[tokio::test]
async fn test_analyze_file_without_api_key() {
    let base = spawn_server(None).await;
    let file = temp_file(JPEG_BYTES);

    let err = analyze_file(&AnalyzeClient::new(base), file.path())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Error: API key not configured");
}

#[tokio::test]
async fn test_non_image_file_is_rejected_locally() {
    let stub = StubAnalyzer::replying("unused");
    let base = spawn_server(Some(stub.clone())).await;
    let file = temp_file(b"plain text, not an image");

    let err = analyze_file(&AnalyzeClient::new(base), file.path())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not a supported image"));
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn test_health_through_client() {
    let base = spawn_server(None).await;
    let health = AnalyzeClient::new(format!("{}/", base)).health().await.unwrap();
    assert_eq!(health.message, "API route is working");
}
