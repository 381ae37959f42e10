use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docsum::config::Config;
use docsum::handlers::create_router;
use docsum::services::{CohereClient, OcrService, SummaryPipeline, TesseractCli};
use docsum::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing; LOG_FORMAT=json switches to JSON lines
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "docsum=debug,tower_http=debug,axum::rejection=trace".into());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|value| value.trim().eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init();
    }

    // Load configuration; a missing COHERE_API_KEY stops startup here.
    let config = Config::from_env()?;

    tracing::info!("Starting Doc Summary Assistant");
    tracing::info!("Max file size: {}MB", config.max_file_size_mb);

    let summarizer = CohereClient::new(
        config.cohere_api_key.clone(),
        config.cohere_model.clone(),
        config.cohere_base_url.clone(),
    )?;
    tracing::info!("Summarization model: {}", summarizer.model());

    let ocr_service = OcrService::new(Arc::new(TesseractCli::new(
        config.tesseract_cmd.clone(),
        config.ocr_language.clone(),
    )));
    if !ocr_service.is_available().await {
        tracing::warn!(
            "OCR engine '{}' is not available; image uploads will fail until it is installed",
            config.tesseract_cmd
        );
    }

    let pipeline = SummaryPipeline::new(ocr_service, Arc::new(summarizer));
    let state = AppState::new(pipeline, config.request_timeout());

    let app = create_router(state, config.max_body_bytes(), config.frontend_dir.as_deref());

    let addr = format!("{}:{}", config.server_host, config.server_port);
    tracing::info!("Server listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
