use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::summarizer::SummarizerError;

pub type AppResult<T> = Result<T, AppError>;

pub const OCR_ENGINE_MISSING_MESSAGE: &str =
    "Tesseract OCR engine not found. Install it first (macOS: 'brew install tesseract').";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Empty file")]
    EmptyFile,

    #[error("Only PDF or image files allowed")]
    UnsupportedFileType,

    #[error("Missing file in request")]
    MissingFile,

    #[error("Invalid upload: {message}")]
    InvalidFile { message: String },

    #[error("Upload exceeds the size limit")]
    PayloadTooLarge,

    #[error("{message}")]
    OcrEngineMissing { message: String },

    #[error("OCR processing failed: {message}")]
    OcrError { message: String },

    #[error("PDF parsing failed: {message}")]
    PdfParse { message: String },

    #[error("Image decoding failed: {message}")]
    ImageDecode { message: String },

    #[error(transparent)]
    Provider(#[from] SummarizerError),

    #[error("Request timed out")]
    Timeout,

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::EmptyFile => "EMPTY_FILE",
            AppError::UnsupportedFileType => "UNSUPPORTED_FILE_TYPE",
            AppError::MissingFile => "MISSING_FILE",
            AppError::InvalidFile { .. } => "INVALID_FILE",
            AppError::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            AppError::OcrEngineMissing { .. } => "OCR_ENGINE_MISSING",
            AppError::OcrError { .. } => "OCR_ERROR",
            AppError::PdfParse { .. } => "PDF_PARSE_ERROR",
            AppError::ImageDecode { .. } => "IMAGE_DECODE_ERROR",
            AppError::Provider(_) => "PROVIDER_ERROR",
            AppError::Timeout => "REQUEST_TIMEOUT",
            AppError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::EmptyFile
            | AppError::UnsupportedFileType
            | AppError::MissingFile
            | AppError::InvalidFile { .. } => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::OcrEngineMissing { .. }
            | AppError::OcrError { .. }
            | AppError::PdfParse { .. }
            | AppError::ImageDecode { .. }
            | AppError::Provider(_)
            | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client errors never reach extraction or summarization.
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

// Logged inside the request span, which carries the request id.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();

        if status.is_client_error() {
            tracing::warn!(
                error_code = error_code,
                status_code = %status,
                error_message = %message,
                "Request rejected"
            );
            return (status, Json(json!({ "detail": message }))).into_response();
        }

        tracing::error!(
            error_code = error_code,
            status_code = %status,
            error_message = %message,
            "API error occurred"
        );

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal {
            message: format!("IO error: {}", err),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal {
            message: format!("Extraction task failed: {}", err),
        }
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout
    }
}

impl AppError {
    pub fn ocr_engine_missing() -> Self {
        AppError::OcrEngineMissing {
            message: OCR_ENGINE_MISSING_MESSAGE.to_string(),
        }
    }

    pub fn ocr(message: impl Into<String>) -> Self {
        AppError::OcrError {
            message: message.into(),
        }
    }

    pub fn pdf_parse(message: impl Into<String>) -> Self {
        AppError::PdfParse {
            message: message.into(),
        }
    }

    pub fn image_decode(message: impl Into<String>) -> Self {
        AppError::ImageDecode {
            message: message.into(),
        }
    }
}
