use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

pub const DEFAULT_COHERE_MODEL: &str = "command-r-plus-08-2024";
pub const DEFAULT_COHERE_BASE_URL: &str = "https://api.cohere.com";

#[derive(Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub max_file_size_mb: usize,
    pub request_timeout_seconds: u64,
    pub cohere_api_key: String,
    pub cohere_model: String,
    pub cohere_base_url: String,
    pub tesseract_cmd: String,
    pub ocr_language: String,
    pub frontend_dir: Option<PathBuf>,
}

// Keep the credential out of startup logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("max_file_size_mb", &self.max_file_size_mb)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("cohere_api_key", &"<redacted>")
            .field("cohere_model", &self.cohere_model)
            .field("cohere_base_url", &self.cohere_base_url)
            .field("tesseract_cmd", &self.tesseract_cmd)
            .field("ocr_language", &self.ocr_language)
            .field("frontend_dir", &self.frontend_dir)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cohere_api_key = lookup("COHERE_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .context("COHERE_API_KEY missing in environment")?;

        // PORT is set by most PaaS runtimes and takes precedence over SERVER_PORT.
        let server_port = match lookup("PORT") {
            Some(_) => Self::parse_var(&lookup, "PORT", 8000),
            None => Self::parse_var(&lookup, "SERVER_PORT", 8000),
        };

        let config = Config {
            server_host: Self::string_var(&lookup, "SERVER_HOST", "0.0.0.0"),
            server_port,
            max_file_size_mb: Self::parse_var(&lookup, "MAX_FILE_SIZE_MB", 20),
            request_timeout_seconds: Self::parse_var(&lookup, "REQUEST_TIMEOUT_SECONDS", 120),
            cohere_api_key,
            cohere_model: Self::string_var(&lookup, "COHERE_MODEL", DEFAULT_COHERE_MODEL),
            cohere_base_url: Self::string_var(&lookup, "COHERE_BASE_URL", DEFAULT_COHERE_BASE_URL),
            tesseract_cmd: Self::string_var(&lookup, "TESSERACT_CMD", "tesseract"),
            ocr_language: Self::string_var(&lookup, "OCR_LANGUAGE", "eng"),
            frontend_dir: lookup("FRONTEND_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
        };

        config.validate()?;

        info!("Configuration loaded successfully: {:?}", config);
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }

    fn string_var<F>(lookup: &F, var_name: &str, default: &str) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(var_name).filter(|val| !val.trim().is_empty()) {
            Some(val) => val.trim().to_string(),
            None => {
                info!("{} not set, using default: {}", var_name, default);
                default.to_string()
            }
        }
    }

    fn parse_var<F, T>(lookup: &F, var_name: &str, default: T) -> T
    where
        F: Fn(&str) -> Option<String>,
        T: std::str::FromStr + Copy + std::fmt::Debug,
        T::Err: std::fmt::Display,
    {
        match lookup(var_name) {
            Some(val) => match val.trim().parse() {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!("Failed to parse {}: {} (using default: {:?})", var_name, e, default);
                    default
                }
            },
            None => {
                info!("{} not set, using default: {:?}", var_name, default);
                default
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("SERVER_PORT must be greater than 0"));
        }
        if self.max_file_size_mb == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }
        if self.max_file_size_mb.checked_mul(1024 * 1024).is_none() {
            return Err(anyhow::anyhow!(
                "MAX_FILE_SIZE_MB is too large: {}",
                self.max_file_size_mb
            ));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow::anyhow!("REQUEST_TIMEOUT_SECONDS must be greater than 0"));
        }
        Ok(())
    }
}
