//! Optical character recognition
//!
//! Turns uploaded screenshots into text. The engine sits behind
//! [`OcrService`] so any recognizer that maps raw bytes plus a language tag
//! to text can be swapped in.

pub mod mime;
pub mod mock;
pub mod tesseract;

pub use mock::MockOcrEngine;
pub use tesseract::TesseractEngine;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait OcrService: Send + Sync {
    async fn recognize(&self, image: &[u8], language: &str) -> Result<String>;
}
