//! JSON bodies exchanged between the upload page and `/api/analyze`.

use serde::{Deserialize, Serialize};

/// Multipart field carrying the uploaded image.
pub const IMAGE_FIELD: &str = "image";

pub const HEALTH_MESSAGE: &str = "API route is working";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            message: HEALTH_MESSAGE.to_string(),
        }
    }
}
