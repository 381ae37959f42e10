//! Document Summary Service
//!
//! Accepts a PDF or image upload, extracts its text (PDF text layer or Tesseract OCR)
//! and returns a length-controlled summary generated by the Cohere chat API.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
