//! Upload an image, get a Gemini-written description back.

pub mod client;
pub mod config;
pub mod dto;
pub mod encoder;
pub mod error;
pub mod gemini;
pub mod logging;
pub mod routes;
pub mod ui;

pub use config::Config;
pub use error::{Error, Result};
pub use gemini::{GeminiClient, ImageAnalyzer};
pub use routes::{router, AppState};
