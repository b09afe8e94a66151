use std::env;
use std::time::Duration;

use crate::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};

const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Process configuration, read once at startup and passed down explicitly.
#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    pub api_key: Option<String>,
    pub model: String,
    pub api_base_url: String,
    pub timeout_ms: u64,
}

impl AppConfig {
    /// Reads `.env` and `.env.local` (when present) into the environment, then
    /// builds the configuration from it.
    pub fn load() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::dotenv();
        Self::from_env()
    }

    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3000);

        let api_key = env::var("GOOGLE_API_KEY")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let api_base_url =
            env::var("GEMINI_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_ms = parse_timeout_ms(env::var("GEMINI_TIMEOUT_MS").ok().as_deref());

        Self {
            port,
            api_key,
            model,
            api_base_url,
            timeout_ms,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Milliseconds for the generator's transport timeout. Zero, garbage or an
/// unset variable fall back to the default.
fn parse_timeout_ms(value: Option<&str>) -> u64 {
    value
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .unwrap_or(DEFAULT_TIMEOUT_MS)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("api_base_url", &self.api_base_url)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}
