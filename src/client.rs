//! HTTP client for a running analyzer, used by the `analyze` subcommand.

use std::path::Path;

use anyhow::{anyhow, bail, Context};
use reqwest::multipart::{Form, Part};
use thiserror::Error;
use tracing::info;

use crate::dto::{AnalyzeResponse, ErrorBody, HealthResponse, IMAGE_FIELD};
use crate::encoder::sniff_mime_type;
use crate::error::GENERIC_FAILURE;
use crate::ui::{SelectedImage, UploadSession};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to analyze image: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an `{error}` body.
    #[error("Error: {0}")]
    Server(String),
}

pub struct AnalyzeClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnalyzeClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/analyze", self.base_url)
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self.http.get(self.endpoint()).send().await?;
        Ok(response.error_for_status()?.json().await?)
    }

    /// Posts the image as multipart field `image` and returns the analysis text.
    pub async fn analyze(&self, image: &SelectedImage) -> Result<String, ClientError> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let response = self.http.post(self.endpoint()).multipart(form).send().await?;
        let status = response.status();

        if status.is_success() {
            let body: AnalyzeResponse = response.json().await?;
            return Ok(body.analysis);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("{} ({})", GENERIC_FAILURE, status),
        };
        Err(ClientError::Server(message))
    }
}

/// Runs one file through the upload flow against `client`.
pub async fn analyze_file(client: &AnalyzeClient, path: &Path) -> anyhow::Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mime_type = sniff_mime_type(&bytes)
        .ok_or_else(|| anyhow!("{} is not a supported image", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    let mut session = UploadSession::new();
    session.start();
    if !session.select(file_name, mime_type, bytes) {
        bail!("{} was not accepted as an image", path.display());
    }

    let image = session
        .begin_analysis()
        .context("No image selected for analysis")?;
    info!(file_name = %image.file_name, size_kb = image.size_kb(), "Submitting image");

    let outcome = client.analyze(&image).await.map_err(|e| e.to_string());
    if let Some(message) = session.finish(outcome) {
        bail!(message);
    }

    session
        .analysis()
        .map(str::to_owned)
        .context("No analysis was stored")
}
