use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

const DEFAULT_ENDPOINT: &str = "https://api.mistral.ai/v1/chat/completions";
const DEFAULT_MODEL: &str = "pixtral-large-latest";
const DEFAULT_TEMPERATURE: f64 = 0.9;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
const DEFAULT_CAPTIONS_FILE: &str = "captions.txt";

/// Configuration for the captioning client.
///
/// Everything the client needs is carried here explicitly so the core
/// stays testable without touching process environment.
#[derive(Debug, Clone)]
pub struct CaptionerConfig {
    /// Chat-completions endpoint URL.
    pub endpoint: String,
    /// Vision model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Directory holding `<platform>-prompt.txt` files.
    pub prompt_dir: PathBuf,
    /// API bearer token.
    pub api_key: String,
    /// Log raw response bodies at debug level.
    pub log_raw_responses: bool,
}

impl CaptionerConfig {
    /// Create a config with the given API key and defaults for
    /// everything else (Mistral endpoint, `pixtral-large-latest`,
    /// temperature 0.9, 120s timeout, prompts from the working
    /// directory).
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
            prompt_dir: PathBuf::from("."),
            api_key: api_key.into(),
            log_raw_responses: false,
        }
    }

    /// Set the endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the model identifier.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature.
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the directory prompt templates are loaded from.
    pub fn prompt_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.prompt_dir = dir.into();
        self
    }

    /// Enable or disable raw response body logging.
    pub fn log_raw_responses(mut self, enabled: bool) -> Self {
        self.log_raw_responses = enabled;
        self
    }
}

/// Process-wide settings read once at startup.
#[derive(Debug, Clone)]
pub struct EnvSettings {
    pub api_key: String,
    pub captions_file: PathBuf,
    pub debug: bool,
}

/// Load settings from the environment (a `.env` file is honored if
/// present). `MISTRAL_API_KEY` is required; `CAPTIONS_FILE` defaults
/// to `captions.txt`; `DEBUG=true` (case-insensitive) enables debug
/// logging and raw response dumps.
pub fn load_env() -> anyhow::Result<EnvSettings> {
    dotenvy::dotenv().ok();

    let api_key = std::env::var("MISTRAL_API_KEY").context("MISTRAL_API_KEY is not set")?;
    let captions_file = std::env::var("CAPTIONS_FILE")
        .unwrap_or_else(|_| DEFAULT_CAPTIONS_FILE.to_string())
        .into();
    let debug = std::env::var("DEBUG")
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false);

    Ok(EnvSettings {
        api_key,
        captions_file,
        debug,
    })
}
