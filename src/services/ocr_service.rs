use std::io::ErrorKind;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use image::{ImageFormat, RgbImage};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

/// A text recognition backend operating on an already-normalised RGB image.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, image: RgbImage) -> AppResult<String>;

    async fn is_available(&self) -> bool;
}

/// Runs the `tesseract` binary on a temporary PNG, reading the result from stdout.
pub struct TesseractCli {
    command: String,
    language: String,
}

impl TesseractCli {
    pub fn new(command: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            language: language.into(),
        }
    }
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self::new("tesseract", "eng")
    }
}

#[async_trait]
impl OcrEngine for TesseractCli {
    async fn recognize(&self, image: RgbImage) -> AppResult<String> {
        let input = tokio::task::spawn_blocking(move || -> AppResult<tempfile::NamedTempFile> {
            let file = tempfile::Builder::new()
                .prefix("docsum-ocr-")
                .suffix(".png")
                .tempfile()
                .map_err(|e| AppError::ocr(format!("Failed to create temporary file: {}", e)))?;
            image
                .save_with_format(file.path(), ImageFormat::Png)
                .map_err(|e| AppError::ocr(format!("Failed to write OCR input image: {}", e)))?;
            Ok(file)
        })
        .await??;

        // psm 6: assume a single uniform block of text.
        let output = Command::new(&self.command)
            .arg(input.path())
            .arg("stdout")
            .args(["-l", self.language.as_str(), "--psm", "6"])
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    warn!(command = %self.command, "Tesseract binary not found");
                    AppError::ocr_engine_missing()
                } else {
                    AppError::ocr(format!("Failed to run {}: {}", self.command, e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::ocr(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn is_available(&self) -> bool {
        Command::new(&self.command)
            .arg("--version")
            .kill_on_drop(true)
            .output()
            .await
            .map(|output| output.status.success())
            .unwrap_or(false)
    }
}

/// Image text extraction: decode, normalise to RGB, recognise, trim.
#[derive(Clone)]
pub struct OcrService {
    engine: Arc<dyn OcrEngine>,
}

impl OcrService {
    pub fn new(engine: Arc<dyn OcrEngine>) -> Self {
        Self { engine }
    }

    pub async fn extract_text_from_image(&self, image_data: &[u8]) -> AppResult<String> {
        let start = Instant::now();
        info!("Starting OCR extraction from image ({} bytes)", image_data.len());

        let data = image_data.to_vec();
        let image = tokio::task::spawn_blocking(move || {
            image::load_from_memory(&data)
                .map(|decoded| decoded.to_rgb8())
                .map_err(|e| AppError::image_decode(e.to_string()))
        })
        .await??;

        debug!(
            width = image.width(),
            height = image.height(),
            "Image decoded and normalised to RGB"
        );

        let text = self.engine.recognize(image).await?;
        let text = text.trim().to_string();

        info!(
            "OCR completed in {}ms, recognised {} characters",
            start.elapsed().as_millis(),
            text.chars().count()
        );

        Ok(text)
    }

    pub async fn is_available(&self) -> bool {
        self.engine.is_available().await
    }
}
