//! Error types for the analyzer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use crate::dto::ErrorBody;

/// Result type alias using the analyzer's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Fallback shown to clients when a failure carries no description.
pub const GENERIC_FAILURE: &str = "Failed to analyze image";

#[derive(Error, Debug)]
pub enum Error {
    /// No provider credential was configured at startup.
    #[error("API key not configured")]
    MissingApiKey,

    /// The request carried no usable `image` field.
    #[error("No image provided")]
    NoImage,

    /// The uploaded byte stream could not be read in full.
    #[error("{0}")]
    Encoding(String),

    /// The inference provider call failed.
    #[error("Gemini API error: {0}")]
    ExternalService(String),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::NoImage => StatusCode::BAD_REQUEST,
            Error::MissingApiKey | Error::Encoding(_) | Error::ExternalService(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::ExternalService(e.to_string())
    }
}

impl From<axum::extract::multipart::MultipartError> for Error {
    fn from(e: axum::extract::multipart::MultipartError) -> Self {
        Error::Encoding(format!("Failed to read uploaded image: {}", e.body_text()))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut message = self.to_string();
        if message.trim().is_empty() {
            message = GENERIC_FAILURE.to_string();
        }

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
