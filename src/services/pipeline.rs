use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{
    DocumentMeta, SummaryLength, SummaryResponse, Upload, NO_IMAGE_TEXT_PLACEHOLDER,
    NO_PDF_TEXT_PLACEHOLDER,
};
use crate::services::classifier::{classify, DocumentKind};
use crate::services::ocr_service::OcrService;
use crate::services::pdf_processor::PdfProcessor;
use crate::services::summarizer::Summarizer;

/// Upload → classify → extract → summarize, for a single document.
pub struct SummaryPipeline {
    pdf_processor: Arc<PdfProcessor>,
    ocr_service: OcrService,
    summarizer: Arc<dyn Summarizer>,
}

impl SummaryPipeline {
    pub fn new(ocr_service: OcrService, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            pdf_processor: Arc::new(PdfProcessor::new()),
            ocr_service,
            summarizer,
        }
    }

    pub async fn run(&self, upload: Upload, length: SummaryLength) -> AppResult<SummaryResponse> {
        if upload.is_empty() {
            return Err(AppError::EmptyFile);
        }

        let kind = classify(&upload.filename);
        info!(
            file_name = %upload.filename,
            file_size = upload.size(),
            kind = ?kind,
            length = length.as_str(),
            "Dispatching upload"
        );

        match kind {
            DocumentKind::Pdf => self.summarize_pdf(upload, length).await,
            DocumentKind::Image => self.summarize_image(upload, length).await,
            DocumentKind::Unsupported => Err(AppError::UnsupportedFileType),
        }
    }

    pub async fn ocr_available(&self) -> bool {
        self.ocr_service.is_available().await
    }

    async fn summarize_pdf(&self, upload: Upload, length: SummaryLength) -> AppResult<SummaryResponse> {
        let processor = Arc::clone(&self.pdf_processor);
        let content = upload.content;
        let extraction =
            tokio::task::spawn_blocking(move || processor.extract_text(&content)).await??;

        debug!(
            pages = extraction.pages,
            processing_time_ms = extraction.processing_time_ms,
            "PDF extraction finished"
        );
        let meta = DocumentMeta::Pdf(extraction.metadata);

        if extraction.text.trim().is_empty() {
            warn!(pages = extraction.pages, "PDF has no readable text layer");
            return Ok(SummaryResponse::new(NO_PDF_TEXT_PLACEHOLDER, meta));
        }

        debug!(text_length = extraction.text.chars().count(), "Summarizing PDF text");
        let summary = self.summarizer.summarize(&extraction.text, length).await?;
        Ok(SummaryResponse::new(summary, meta))
    }

    async fn summarize_image(&self, upload: Upload, length: SummaryLength) -> AppResult<SummaryResponse> {
        let text = self.ocr_service.extract_text_from_image(&upload.content).await?;

        if text.trim().is_empty() {
            warn!("OCR produced no readable text");
            return Ok(SummaryResponse::new(
                NO_IMAGE_TEXT_PLACEHOLDER,
                DocumentMeta::image_ocr(),
            ));
        }

        debug!(text_length = text.chars().count(), "Summarizing OCR text");
        let summary = self.summarizer.summarize(&text, length).await?;
        Ok(SummaryResponse::new(summary, DocumentMeta::image_ocr()))
    }
}
