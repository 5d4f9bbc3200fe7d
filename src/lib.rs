//! Takuhon: an offline website mirroring tool
//!
//! This crate crawls a website with a headless browser, captures every
//! network resource the rendered pages pull in, rewrites same-origin
//! references, and lays the result out as a self-contained directory tree.

pub mod config;
pub mod crawler;
pub mod frontier;
pub mod render;
pub mod sniffer;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Takuhon operations
#[derive(Debug, Error)]
pub enum TakuhonError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Render error: {0}")]
    Render(#[from] render::RenderError),

    #[error("Browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    #[error("Browser launch failed: {0}")]
    Launch(String),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Worker task failed: {0}")]
    Task(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Takuhon operations
pub type Result<T> = std::result::Result<T, TakuhonError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::frontier::Frontier;
pub use crate::storage::ResourceStore;
pub use crate::url::{clean_path, rewrite_markup, rewrite_stylesheet, Target};
