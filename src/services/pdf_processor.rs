use std::time::Instant;

use lopdf::{Dictionary, Document, Object};

use crate::error::{AppError, AppResult};
use crate::models::PdfMetadata;

pub struct PdfProcessor;

#[derive(Debug)]
pub struct PdfExtraction {
    pub text: String,
    pub pages: usize,
    pub metadata: PdfMetadata,
    pub processing_time_ms: u64,
}

impl PdfProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Extracts the text layer of every page, in page order, plus the document info.
    ///
    /// Bytes that do not parse as a PDF are reported as [`AppError::PdfParse`]. A page whose
    /// text cannot be decoded contributes an empty string.
    pub fn extract_text(&self, content: &[u8]) -> AppResult<PdfExtraction> {
        let start = Instant::now();

        tracing::info!("Starting PDF text extraction ({} bytes)", content.len());

        let doc = Document::load_mem(content).map_err(|e| {
            tracing::warn!("PDF structure could not be parsed: {}", e);
            AppError::pdf_parse(e.to_string())
        })?;

        let metadata = self.extract_metadata(&doc);

        let pages = doc.get_pages();
        let page_texts: Vec<String> = pages
            .keys()
            .map(|&page_number| match doc.extract_text(&[page_number]) {
                // lopdf closes every text object with a newline; the join supplies the separator.
                Ok(text) => text.strip_suffix('\n').unwrap_or(&text).to_string(),
                Err(e) => {
                    tracing::debug!("No extractable text on page {}: {}", page_number, e);
                    String::new()
                }
            })
            .collect();

        let text = page_texts.join("\n").trim().to_string();
        let processing_time = start.elapsed().as_millis() as u64;

        tracing::info!(
            "PDF processing completed in {}ms, {} pages, extracted {} characters",
            processing_time,
            pages.len(),
            text.chars().count()
        );

        Ok(PdfExtraction {
            text,
            pages: pages.len(),
            metadata,
            processing_time_ms: processing_time,
        })
    }

    fn extract_metadata(&self, doc: &Document) -> PdfMetadata {
        let Some(info) = info_dictionary(doc) else {
            return PdfMetadata::default();
        };

        PdfMetadata::default()
            .with_title(info_string(info, b"Title"))
            .with_author(info_string(info, b"Author"))
            .with_subject(info_string(info, b"Subject"))
    }
}

impl Default for PdfProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// The trailer's `/Info` entry may be inline or an indirect reference.
fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_object(*id).ok()?.as_dict().ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

fn info_string(info: &Dictionary, key: &[u8]) -> Option<String> {
    let bytes = info.get(key).ok()?.as_str().ok()?;
    let decoded = decode_pdf_string(bytes);
    let trimmed = decoded.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Decodes a PDF text string: UTF-16 with or without BOM, otherwise lossy UTF-8.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE_u8, 0xFF]) {
        decode_utf16(rest, u16::from_be_bytes)
    } else if let Some(rest) = bytes.strip_prefix(&[0xFF_u8, 0xFE]) {
        decode_utf16(rest, u16::from_le_bytes)
    } else if looks_like_utf16(bytes) {
        decode_utf16(bytes, u16::from_be_bytes)
    } else {
        String::from_utf8_lossy(bytes).to_string()
    }
}

fn looks_like_utf16(bytes: &[u8]) -> bool {
    if bytes.len() < 2 {
        return false;
    }

    // More than a third NUL bytes rarely happens in 8-bit text.
    let null_count = bytes.iter().filter(|&&b| b == 0).count();
    null_count > bytes.len() / 3
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> String {
    let units = bytes
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]));

    char::decode_utf16(units)
        .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
        .filter(|&ch| ch != '\0')
        .collect()
}
