//! Sitesift: a single-page web analyzer
//!
//! This crate fetches one HTML page, derives structural metrics (heading
//! counts, HTML version, title, login-form presence, internal/external link
//! split), probes a bounded subset of the page's outbound links for liveness,
//! and persists the result plus any broken links to SQLite.

pub mod analysis;
pub mod config;
pub mod crawler;
pub mod links;
pub mod output;
pub mod state;
pub mod storage;

use thiserror::Error;

/// Main error type for sitesift operations
#[derive(Debug, Error)]
pub enum SiftError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("A crawl is already running for {0}")]
    CrawlInProgress(String),

    #[error("Crawl queue is full")]
    QueueFull,

    #[error("Crawl queue is shut down")]
    QueueClosed,
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

/// Result type alias for sitesift operations
pub type Result<T> = std::result::Result<T, SiftError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use analysis::{DocumentAnalysis, HtmlVersion};
pub use config::Config;
pub use crawler::{CrawlQueue, Orchestrator};
pub use state::CrawlStatus;
pub use storage::{BrokenLink, PageRecord, SqliteStorage, Storage};
