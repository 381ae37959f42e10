use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    response::Json,
};
use std::time::Instant;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{SummaryLength, SummaryResponse, Upload};
use crate::state::AppState;

pub async fn summarize_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<SummaryResponse>> {
    let start = Instant::now();

    info!("Starting summarize request");

    let mut multipart = multipart.map_err(|rejection| AppError::InvalidFile {
        message: rejection.body_text(),
    })?;
    let (upload, length) = read_summarize_form(&mut multipart).await?;

    info!(
        file_name = %upload.filename,
        file_size = upload.size(),
        length = length.as_str(),
        "File extracted from multipart form"
    );

    let response = tokio::time::timeout(state.request_timeout, state.pipeline.run(upload, length))
        .await??;

    info!(
        total_time_ms = start.elapsed().as_millis() as u64,
        summary_length = response.summary.chars().count(),
        "Request completed successfully"
    );

    Ok(Json(response))
}

/// Collects the `file` and optional `length` fields, in whatever order they arrive.
async fn read_summarize_form(multipart: &mut Multipart) -> AppResult<(Upload, SummaryLength)> {
    let mut upload = None;
    let mut length = SummaryLength::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Failed to read multipart field", e))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error("Failed to read file data", e))?;
                upload = Some(Upload::new(file_name, data));
            }
            "length" => {
                let directive = field
                    .text()
                    .await
                    .map_err(|e| multipart_error("Failed to read length field", e))?;
                length = SummaryLength::from_directive(&directive);
            }
            other => {
                tracing::debug!(field = other, "Ignoring unexpected multipart field");
            }
        }
    }

    let upload = upload.ok_or(AppError::MissingFile)?;
    Ok((upload, length))
}

/// A body cut off by the size limit surfaces as a stream error; keep it distinct from malformed input.
fn multipart_error(context: &str, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::InvalidFile {
            message: format!("{}: {}", context, err.body_text()),
        }
    }
}
