//! HTTP server wiring: shared state, routes and middleware.

use crate::ai::{ChatService, OpenAiChatClient};
use crate::handlers::{self, MAX_UPLOAD_BYTES};
use crate::models::Config;
use crate::ocr::{OcrService, TesseractEngine};
use crate::Result;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// State handed to every handler. Holds no per-request data.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<dyn ChatService>,
    pub ocr: Arc<dyn OcrService>,
    pub ocr_language: Arc<str>,
}

/// Injectable service bundle used to construct [`AppState`] in tests/harnesses.
pub struct AppServices {
    pub chat: Box<dyn ChatService>,
    pub ocr: Box<dyn OcrService>,
}

impl AppState {
    /// Build state from concrete service dependencies.
    pub fn with_services(services: AppServices, ocr_language: &str) -> Self {
        Self {
            chat: Arc::from(services.chat),
            ocr: Arc::from(services.ocr),
            ocr_language: Arc::from(ocr_language),
        }
    }

    /// Build state from environment configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        info!(
            "Chat provider: OpenAI (model: {}, base url: {})",
            config.chat_model, config.openai_base_url
        );
        let chat = OpenAiChatClient::new(
            config.chatgpt_api_key.clone(),
            config.chat_model.clone(),
            config.chat_timeout,
        )?
        .with_base_url(config.openai_base_url.clone());

        info!(
            "OCR engine: {} (lang: {})",
            config.tesseract_bin, config.ocr_language
        );
        let ocr = TesseractEngine::new(config.tesseract_bin.clone());

        Ok(Self::with_services(
            AppServices {
                chat: Box::new(chat),
                ocr: Box::new(ocr),
            },
            &config.ocr_language,
        ))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/generate", get(handlers::generate))
        .route(
            "/creative-writing-prompt",
            get(handlers::creative_writing_prompt),
        )
        .route(
            "/screenshot",
            post(handlers::screenshot)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES)),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Server started on {}", listener.local_addr()?);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
