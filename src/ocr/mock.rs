use super::OcrService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockOcrEngine {
    text: Arc<Mutex<String>>,
    call_count: Arc<Mutex<usize>>,
    languages: Arc<Mutex<Vec<String>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockOcrEngine {
    pub fn new() -> Self {
        Self {
            text: Arc::new(Mutex::new(String::new())),
            call_count: Arc::new(Mutex::new(0)),
            languages: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        *self.text.lock().unwrap() = text.into();
        self
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn received_languages(&self) -> Vec<String> {
        self.languages.lock().unwrap().clone()
    }
}

impl Default for MockOcrEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OcrService for MockOcrEngine {
    async fn recognize(&self, _image: &[u8], language: &str) -> Result<String> {
        *self.call_count.lock().unwrap() += 1;
        self.languages.lock().unwrap().push(language.to_string());

        if *self.should_fail.lock().unwrap() {
            return Err(Error::Ocr("Mock failure".to_string()));
        }

        Ok(self.text.lock().unwrap().clone())
    }
}
