use super::OcrService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Runs the `tesseract` CLI, one process per recognition.
///
/// Each call loads the language model from scratch; nothing is shared
/// between calls.
pub struct TesseractEngine {
    binary: String,
}

impl TesseractEngine {
    pub fn new(binary: String) -> Self {
        Self { binary }
    }
}

#[async_trait]
impl OcrService for TesseractEngine {
    async fn recognize(&self, image: &[u8], language: &str) -> Result<String> {
        tracing::debug!(
            "Starting {} for {} bytes (lang: {})",
            self.binary,
            image.len(),
            language
        );

        let mut child = Command::new(&self.binary)
            .args(["stdin", "stdout", "-l", language])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::Ocr(format!("Failed to start {}: {}", self.binary, e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Ocr("OCR process has no stdin".to_string()))?;

        let feed = async move {
            stdin.write_all(image).await?;
            stdin.shutdown().await
        };

        // Feed stdin while collecting output so a chatty engine cannot block on a full pipe.
        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Ocr(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            )));
        }
        match fed {
            // A successful exit before stdin is drained is not a failure.
            Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => {
                return Err(Error::Ocr(format!(
                    "Failed to send image to OCR process: {}",
                    e
                )));
            }
            _ => {}
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_ocr_error() {
        let engine = TesseractEngine::new("definitely-not-a-real-ocr-binary".to_string());

        let err = engine.recognize(b"image", "eng").await.unwrap_err();
        assert!(matches!(err, Error::Ocr(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_forwards_language_and_returns_stdout() {
        // `echo` ignores stdin and prints its arguments.
        let engine = TesseractEngine::new("echo".to_string());

        let text = engine.recognize(b"image", "deu").await.unwrap();
        assert_eq!(text, "stdin stdout -l deu\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_ocr_error() {
        let engine = TesseractEngine::new("false".to_string());

        let err = engine.recognize(b"image", "eng").await.unwrap_err();
        assert!(matches!(err, Error::Ocr(_)));
    }
}
