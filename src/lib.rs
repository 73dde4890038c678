//! Small HTTP backend that fronts a hosted language model and an OCR engine.
//!
//! Routes render a landing page, forward free-form prompts, request
//! structured creative writing prompts, and extract text from uploaded
//! screenshots.

pub mod ai;
pub mod app;
pub mod error;
pub mod handlers;
pub mod models;
pub mod ocr;
pub mod prompts;
pub mod views;

pub use error::{Error, Result};
