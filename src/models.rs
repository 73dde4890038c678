//! Data models and structures
//!
//! Defines the JSON shapes returned by each route, the structured creative
//! prompt parsed from model output, and environment configuration.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Body of a successful `GET /generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub input: String,
    pub output: String,
    pub error: Option<String>,
}

/// Structured prompt the model is asked to produce.
///
/// Fields are echoed exactly as the model returned them; a field the model
/// left out stays out of the response.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CreativePrompt {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<Value>,
}

impl CreativePrompt {
    /// Parse the trimmed completion text. Anything but a JSON object fails.
    ///
    /// Fields are looked up by key, so arrays are never read positionally
    /// and a repeated key keeps its last value.
    pub fn from_completion(text: &str) -> crate::Result<Self> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(mut fields) => Ok(Self {
                title: fields.remove("title"),
                prompt: fields.remove("prompt"),
                topic: fields.remove("topic"),
                mood: fields.remove("mood"),
            }),
            other => Err(crate::Error::AiProvider(format!(
                "Creative prompt is not a JSON object: {}",
                other
            ))),
        }
    }
}

/// Body of a successful `GET /creative-writing-prompt`.
#[derive(Debug, Clone, Serialize)]
pub struct CreativePromptResponse {
    pub input: String,
    #[serde(flatten)]
    pub parts: CreativePrompt,
    pub error: Option<String>,
}

/// Body of a successful `POST /screenshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenshotResponse {
    pub text: String,
}

/// Body of every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_TESSERACT_BIN: &str = "tesseract";
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub chatgpt_api_key: String,
    pub port: u16,
    pub chat_model: String,
    pub openai_base_url: String,
    pub chat_timeout: Option<Duration>,
    pub tesseract_bin: String,
    pub ocr_language: String,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let chatgpt_api_key = var("CHATGPT_API_KEY")
            .ok_or_else(|| crate::Error::Config("CHATGPT_API_KEY not set".to_string()))?;

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| crate::Error::Config(format!("Invalid PORT '{}'", raw)))?,
            None => DEFAULT_PORT,
        };

        let chat_timeout = match var("CHAT_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(raw.trim().parse::<u64>().map_err(
                |_| crate::Error::Config(format!("Invalid CHAT_TIMEOUT_SECS '{}'", raw)),
            )?)),
            None => None,
        };

        Ok(Self {
            chatgpt_api_key,
            port,
            chat_model: var("CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            openai_base_url: var("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            chat_timeout,
            tesseract_bin: var("TESSERACT_BIN")
                .unwrap_or_else(|| DEFAULT_TESSERACT_BIN.to_string()),
            ocr_language: var("OCR_LANGUAGE").unwrap_or_else(|| DEFAULT_OCR_LANGUAGE.to_string()),
        })
    }
}
