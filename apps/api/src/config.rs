use std::str::FromStr;

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_SNIPPET_CHARS: usize = 1000;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Request body limit for document uploads.
    pub max_upload_bytes: usize,
    /// Characters of extracted text echoed back in analysis responses.
    pub snippet_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            snippet_chars: DEFAULT_SNIPPET_CHARS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_var("PORT", std::env::var("PORT").ok(), DEFAULT_PORT)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: parse_var(
                "MAX_UPLOAD_BYTES",
                std::env::var("MAX_UPLOAD_BYTES").ok(),
                DEFAULT_MAX_UPLOAD_BYTES,
            )?,
            snippet_chars: parse_var(
                "SNIPPET_CHARS",
                std::env::var("SNIPPET_CHARS").ok(),
                DEFAULT_SNIPPET_CHARS,
            )?,
        })
    }
}

fn parse_var<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{value}'")),
        None => Ok(default),
    }
}
