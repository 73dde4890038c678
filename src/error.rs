//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.
//! Handlers never expose these to callers; see [`crate::handlers::ApiError`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error("OCR engine error: {0}")]
    Ocr(String),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
