use anyhow::{bail, Context, Result};

/// Default watsonx.ai regional endpoint (Frankfurt).
pub const DEFAULT_WATSONX_URL: &str = "https://eu-de.ml.cloud.ibm.com";

/// Default chat model used for all advice operations.
pub const DEFAULT_MODEL_ID: &str = "meta-llama/llama-3-2-11b-vision-instruct";

/// Application configuration loaded from environment variables.
/// Startup aborts if required variables are missing or empty.
#[derive(Debug, Clone)]
pub struct Config {
    pub watsonx_url: String,
    pub watsonx_api_key: String,
    pub watsonx_project_id: String,
    pub model_id: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            watsonx_url: std::env::var("WATSONX_URL")
                .unwrap_or_else(|_| DEFAULT_WATSONX_URL.to_string()),
            watsonx_api_key: require_env("WATSONX_API_KEY")?,
            watsonx_project_id: require_env("WATSONX_PROJECT_ID")?,
            model_id: std::env::var("WATSONX_MODEL_ID")
                .unwrap_or_else(|_| DEFAULT_MODEL_ID.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads a required variable. A set-but-empty value is treated the same as
/// missing so the process never starts with blank credentials.
fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}
