//! HTTP surface: the upload page, `POST /api/analyze` and its liveness probe.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    response::Json,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, error, info, warn};

use crate::dto::{AnalyzeResponse, HealthResponse, IMAGE_FIELD};
use crate::encoder::{self, UploadedImage};
use crate::error::{Error, Result};
use crate::gemini::ImageAnalyzer;
use crate::ui;

/// Shared, read-only request state. `analyzer` is `None` when no API key was configured.
#[derive(Clone)]
pub struct AppState {
    analyzer: Option<Arc<dyn ImageAnalyzer>>,
}

impl AppState {
    pub fn new(analyzer: Option<Arc<dyn ImageAnalyzer>>) -> Self {
        Self { analyzer }
    }
}

pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(ui::page::index))
        .route("/api/analyze", post(analyze).get(health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

async fn analyze(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>> {
    info!("Analyze request received");

    let result = run_analysis(&state, multipart).await;
    if let Err(e) = &result {
        if e.status().is_client_error() {
            warn!(error = %e, "Analyze request rejected");
        } else {
            error!(error = %e, "Analyze request failed");
        }
    }
    result.map(|analysis| Json(AnalyzeResponse { analysis }))
}

async fn run_analysis(
    state: &AppState,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<String> {
    let analyzer = state.analyzer.as_ref().ok_or(Error::MissingApiKey)?;

    let mut multipart = multipart.map_err(|rejection| {
        warn!(%rejection, "Request body is not multipart form data");
        Error::NoImage
    })?;

    let image = next_image(&mut multipart).await?.ok_or(Error::NoImage)?;

    info!(
        file_name = image.file_name.as_deref().unwrap_or("(unnamed)"),
        mime_type = %image.mime_type,
        size = image.size(),
        "File received"
    );

    let encoded = image.encode();
    analyzer.describe(&encoded).await
}

/// Returns the first non-empty `image` field; other fields and empty
/// `image` parts are skipped.
async fn next_image(multipart: &mut Multipart) -> Result<Option<UploadedImage>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            debug!(field = ?field.name(), "Skipping form field");
            continue;
        }

        let image = encoder::read_field(field).await?;
        if image.bytes.is_empty() {
            debug!("Skipping empty image field");
            continue;
        }
        return Ok(Some(image));
    }

    Ok(None)
}
