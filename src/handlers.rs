//! Route handlers
//!
//! Each handler validates its input, calls one external dependency and
//! reshapes the result. Failures are logged in full here and flattened to a
//! generic message for the caller.

use crate::app::AppState;
use crate::models::{
    CreativePrompt, CreativePromptResponse, ErrorBody, GenerateResponse, ScreenshotResponse,
};
use crate::ocr::mime::detect_image_mime;
use crate::views::IndexView;
use crate::{prompts, Error, Result};
use axum::body::Bytes;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::{error, info, warn};
use uuid::Uuid;

pub const GENERIC_ERROR: &str = "An error occurred.";
pub const OCR_ERROR: &str = "Internal Server Error";
pub const FILE_TOO_LARGE: &str = "File too large";

/// Largest accepted `image` upload.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
pub const IMAGE_FIELD: &str = "image";

/// Error answered to the caller. Carries no detail about the cause.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    pub fn internal(message: &'static str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }

    pub fn too_large() -> Self {
        Self {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: FILE_TOO_LARGE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message.to_string(),
        };
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateQuery {
    pub input: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreativePromptQuery {
    pub topic: Option<String>,
    pub mood: Option<String>,
}

/// `GET /`
pub async fn index() -> std::result::Result<Html<String>, ApiError> {
    IndexView::default().render().map(Html).map_err(|e| {
        error!("Landing page failed to render: {}", e);
        ApiError::internal(GENERIC_ERROR)
    })
}

/// `GET /generate`
pub async fn generate(
    State(state): State<AppState>,
    query: std::result::Result<Query<GenerateQuery>, QueryRejection>,
) -> std::result::Result<Json<GenerateResponse>, ApiError> {
    let Query(query) = query.map_err(|e| {
        error!("Generation query rejected: {}", e.body_text());
        ApiError::internal(GENERIC_ERROR)
    })?;
    let Some(input) = query.input.filter(|input| !input.is_empty()) else {
        warn!("Generation requested without input");
        return Err(ApiError::internal(GENERIC_ERROR));
    };

    match state.chat.complete(&input).await {
        Ok(output) => {
            info!("Generated {} chars for {} char input", output.len(), input.len());
            Ok(Json(GenerateResponse {
                input,
                output,
                error: None,
            }))
        }
        Err(e) => {
            error!("Generation failed: {}", e);
            Err(ApiError::internal(GENERIC_ERROR))
        }
    }
}

/// `GET /creative-writing-prompt`
pub async fn creative_writing_prompt(
    State(state): State<AppState>,
    query: std::result::Result<Query<CreativePromptQuery>, QueryRejection>,
) -> std::result::Result<Json<CreativePromptResponse>, ApiError> {
    let Query(query) = query.map_err(|e| {
        error!("Creative writing prompt query rejected: {}", e.body_text());
        ApiError::internal(GENERIC_ERROR)
    })?;
    let input = prompts::creative_writing(query.topic.as_deref(), query.mood.as_deref());

    match request_creative_prompt(&state, &input).await {
        Ok(parts) => Ok(Json(CreativePromptResponse {
            input,
            parts,
            error: None,
        })),
        Err(e) => {
            error!("Creative writing prompt failed: {}", e);
            Err(ApiError::internal(GENERIC_ERROR))
        }
    }
}

async fn request_creative_prompt(state: &AppState, input: &str) -> Result<CreativePrompt> {
    let text = state.chat.complete(input).await?;
    CreativePrompt::from_completion(&text).map_err(|e| {
        warn!("Model returned an unusable creative prompt: {}", text);
        e
    })
}

/// `POST /screenshot`
pub async fn screenshot(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> std::result::Result<Json<ScreenshotResponse>, ApiError> {
    let job_id = Uuid::new_v4();

    let multipart = multipart.map_err(|e| {
        error!(%job_id, "Screenshot upload rejected: {}", e);
        ApiError::internal(OCR_ERROR)
    })?;
    let image = read_image_field(multipart).await.map_err(|e| {
        error!(%job_id, "Screenshot upload failed: {}", e.detail);
        e.response
    })?;

    info!(
        %job_id,
        bytes = image.len(),
        mime = detect_image_mime(&image),
        "Running OCR"
    );

    match state.ocr.recognize(&image, &state.ocr_language).await {
        Ok(text) => {
            info!(%job_id, chars = text.len(), "OCR finished");
            Ok(Json(ScreenshotResponse { text }))
        }
        Err(e) => {
            error!(%job_id, "OCR failed: {}", e);
            Err(ApiError::internal(OCR_ERROR))
        }
    }
}

struct UploadFailure {
    detail: Error,
    response: ApiError,
}

impl UploadFailure {
    fn new(detail: String, response: ApiError) -> Self {
        Self {
            detail: Error::Upload(detail),
            response,
        }
    }
}

/// Pull the single `image` file part into memory, enforcing [`MAX_UPLOAD_BYTES`].
///
/// A part without a filename, or a second `image` part, is rejected.
async fn read_image_field(mut multipart: Multipart) -> std::result::Result<Bytes, UploadFailure> {
    let upload_error = |e: MultipartError| {
        let response = if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::too_large()
        } else {
            ApiError::internal(OCR_ERROR)
        };
        UploadFailure::new(e.body_text(), response)
    };

    let mut image = None;
    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        if image.is_some() {
            return Err(UploadFailure::new(
                format!("Unexpected second '{}' part", IMAGE_FIELD),
                ApiError::internal(OCR_ERROR),
            ));
        }
        if field.file_name().is_none() {
            return Err(UploadFailure::new(
                format!("'{}' part is not a file", IMAGE_FIELD),
                ApiError::internal(OCR_ERROR),
            ));
        }

        let bytes = field.bytes().await.map_err(upload_error)?;
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(UploadFailure::new(
                format!("Image of {} bytes exceeds {} byte limit", bytes.len(), MAX_UPLOAD_BYTES),
                ApiError::too_large(),
            ));
        }
        image = Some(bytes);
    }

    image.ok_or_else(|| {
        UploadFailure::new(
            format!("Missing '{}' field", IMAGE_FIELD),
            ApiError::internal(OCR_ERROR),
        )
    })
}
