pub mod classifier;
pub mod ocr_service;
pub mod pdf_processor;
pub mod pipeline;
pub mod summarizer;

pub use classifier::{classify, DocumentKind};
pub use ocr_service::{OcrEngine, OcrService, TesseractCli};
pub use pdf_processor::{PdfExtraction, PdfProcessor};
pub use pipeline::SummaryPipeline;
pub use summarizer::{CohereClient, Summarizer, SummarizerError};
