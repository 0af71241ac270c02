//! Runtime configuration loaded from the environment (and `.env`).

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::document::common::{get_static_dir, get_templates_dir};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CHROME_BIN: &str = "chromium";
const DEFAULT_RENDER_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SETTLE_BUDGET_MS: u64 = 5000;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:8080";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Settings for the headless browser used to print deeds.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub binary: PathBuf,
    pub timeout: Duration,
    pub settle_budget: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub max_db_connections: u32,
    pub template_path: PathBuf,
    pub static_dir: PathBuf,
    pub browser: BrowserConfig,
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT)?,
            database_url: get("DATABASE_URL"),
            max_db_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                get("DATABASE_MAX_CONNECTIONS"),
                DEFAULT_MAX_CONNECTIONS,
            )?,
            template_path: get("DEED_TEMPLATE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| get_templates_dir().join("deed_template.html")),
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| get_static_dir().to_path_buf()),
            browser: BrowserConfig {
                binary: PathBuf::from(get("CHROME_BIN").unwrap_or_else(|| DEFAULT_CHROME_BIN.to_string())),
                timeout: Duration::from_secs(parse_or(
                    "PDF_RENDER_TIMEOUT_SECS",
                    get("PDF_RENDER_TIMEOUT_SECS"),
                    DEFAULT_RENDER_TIMEOUT_SECS,
                )?),
                settle_budget: Duration::from_millis(parse_or(
                    "PDF_SETTLE_BUDGET_MS",
                    get("PDF_SETTLE_BUDGET_MS"),
                    DEFAULT_SETTLE_BUDGET_MS,
                )?),
            },
            allowed_origins,
        })
    }
}

fn parse_or<T: FromStr>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}
