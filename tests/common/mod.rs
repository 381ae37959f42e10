#![allow(dead_code)]

use std::io::Cursor;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use image::RgbImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

use docsum::error::{AppError, AppResult};
use docsum::models::SummaryLength;
use docsum::services::{OcrEngine, OcrService, Summarizer, SummarizerError, SummaryPipeline};
use docsum::AppState;

pub const BOUNDARY: &str = "docsum-test-boundary";

/// Builds a PDF with one page per entry; empty entries produce pages without a text layer.
pub fn build_pdf(pages: &[&str], info: Option<Dictionary>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let operations = if text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if let Some(info) = info {
        let info_id = doc.add_object(info);
        doc.trailer.set("Info", info_id);
    }

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("save pdf");
    buffer
}

pub fn png_bytes() -> Vec<u8> {
    let image = image::RgbaImage::from_pixel(16, 16, image::Rgba([255, 255, 255, 255]));
    let mut cursor = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(image)
        .write_to(&mut cursor, image::ImageOutputFormat::Png)
        .expect("encode png");
    cursor.into_inner()
}

pub fn multipart_body(filename: &str, content: &[u8], length: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(b"\r\n");

    if let Some(length) = length {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"length\"\r\n\r\n{length}\r\n"
            )
            .as_bytes(),
        );
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Records every call and answers with a canned reply.
pub struct RecordingSummarizer {
    calls: Mutex<Vec<(String, SummaryLength)>>,
    reply: Result<String, String>,
    delay: Option<Duration>,
}

impl RecordingSummarizer {
    pub fn replying(summary: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reply: Ok(summary.to_string()),
            delay: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reply: Err(message.to_string()),
            delay: None,
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reply: Ok("late summary".to_string()),
            delay: Some(delay),
        }
    }

    pub fn calls(&self) -> Vec<(String, SummaryLength)> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl Summarizer for RecordingSummarizer {
    async fn summarize(&self, text: &str, length: SummaryLength) -> Result<String, SummarizerError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((text.to_string(), length));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.reply.clone().map_err(SummarizerError::Provider)
    }
}

/// OCR engine double that returns fixed text without running tesseract.
pub struct FixedOcr {
    pub text: String,
}

impl FixedOcr {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

#[async_trait]
impl OcrEngine for FixedOcr {
    async fn recognize(&self, _image: RgbImage) -> AppResult<String> {
        Ok(self.text.clone())
    }

    async fn is_available(&self) -> bool {
        true
    }
}

/// OCR engine double that always fails with a recognition error.
pub struct BrokenOcr;

#[async_trait]
impl OcrEngine for BrokenOcr {
    async fn recognize(&self, _image: RgbImage) -> AppResult<String> {
        Err(AppError::ocr("recognition crashed"))
    }

    async fn is_available(&self) -> bool {
        true
    }
}

pub fn app_state(
    ocr: Arc<dyn OcrEngine>,
    summarizer: Arc<dyn Summarizer>,
    timeout: Duration,
) -> AppState {
    let pipeline = SummaryPipeline::new(OcrService::new(ocr), summarizer);
    AppState::new(pipeline, timeout)
}
