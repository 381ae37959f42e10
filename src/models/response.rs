use serde::{Deserialize, Serialize};

pub const OCR_SOURCE: &str = "image-ocr";
pub const NO_PDF_TEXT_PLACEHOLDER: &str = "No readable text found.";
pub const NO_IMAGE_TEXT_PLACEHOLDER: &str = "No readable text detected in the image.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
    pub meta: DocumentMeta,
}

impl SummaryResponse {
    pub fn new(summary: impl Into<String>, meta: DocumentMeta) -> Self {
        Self {
            summary: summary.into(),
            meta,
        }
    }
}

/// Metadata attached to a summary: document info for PDFs, a provenance marker for OCR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentMeta {
    Pdf(PdfMetadata),
    Ocr(OcrProvenance),
}

impl DocumentMeta {
    pub fn image_ocr() -> Self {
        DocumentMeta::Ocr(OcrProvenance::default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PdfMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
}

impl PdfMetadata {
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.author = author;
        self
    }

    pub fn with_subject(mut self, subject: Option<String>) -> Self {
        self.subject = subject;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrProvenance {
    pub source: String,
}

impl Default for OcrProvenance {
    fn default() -> Self {
        Self {
            source: OCR_SOURCE.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: String,
    pub provider: String,
}
