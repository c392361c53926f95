//! Configuration management for Folio Server

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::pdf::{
    PageCountConfig, DEFAULT_FULL_PARSE_TIMEOUT_SECS, DEFAULT_LARGE_FILE_THRESHOLD,
    DEFAULT_MAX_PAGE_COUNT, DEFAULT_TRAILER_READ_SIZE,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub documents: DocumentsConfig,
    pub page_count: PageCountSettings,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `None` allows any origin
    pub cors_allowed_origins: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct DocumentsConfig {
    pub root: PathBuf,
}

#[derive(Debug, Clone)]
pub struct PageCountSettings {
    pub large_file_threshold: u64,
    pub trailer_read_size: u64,
    pub max_page_count: u32,
    pub full_parse_timeout_secs: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                cors_allowed_origins: None,
            },
            documents: DocumentsConfig {
                root: PathBuf::from("./documents"),
            },
            page_count: PageCountSettings::default(),
        }
    }
}

impl Default for PageCountSettings {
    fn default() -> Self {
        PageCountSettings {
            large_file_threshold: DEFAULT_LARGE_FILE_THRESHOLD,
            trailer_read_size: DEFAULT_TRAILER_READ_SIZE,
            max_page_count: DEFAULT_MAX_PAGE_COUNT,
            full_parse_timeout_secs: DEFAULT_FULL_PARSE_TIMEOUT_SECS,
        }
    }
}

impl PageCountSettings {
    pub fn to_resolver_config(&self) -> PageCountConfig {
        PageCountConfig {
            large_file_threshold: self.large_file_threshold,
            trailer_read_size: self.trailer_read_size,
            max_page_count: self.max_page_count,
            full_parse_timeout: Duration::from_secs(self.full_parse_timeout_secs),
        }
    }
}

impl Config {
    /// Configuration rooted at an explicit documents directory
    pub fn with_documents_root(root: impl Into<PathBuf>) -> Self {
        let mut config = Config::default();
        config.documents.root = root.into();
        config
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = PageCountSettings::default();

        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_var("SERVER_PORT", 3000)?,
                cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .and_then(|raw| parse_origins(&raw)),
            },
            documents: DocumentsConfig {
                root: env::var("DOCUMENTS_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("./documents")),
            },
            page_count: PageCountSettings {
                large_file_threshold: parse_var(
                    "PAGE_COUNT_LARGE_FILE_THRESHOLD",
                    defaults.large_file_threshold,
                )?,
                trailer_read_size: parse_var(
                    "PAGE_COUNT_TRAILER_READ_SIZE",
                    defaults.trailer_read_size,
                )?,
                max_page_count: parse_var("PAGE_COUNT_MAX", defaults.max_page_count)?,
                full_parse_timeout_secs: parse_var(
                    "PAGE_COUNT_PARSE_TIMEOUT_SECS",
                    defaults.full_parse_timeout_secs,
                )?,
            },
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(default),
    }
}

/// Comma-separated origins; `*` or an empty list means any origin
fn parse_origins(raw: &str) -> Option<Vec<String>> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect();

    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        None
    } else {
        Some(origins)
    }
}
