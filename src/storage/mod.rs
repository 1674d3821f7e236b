//! Storage module for persisting analysis results
//!
//! This module handles all database operations, including:
//! - SQLite database initialization and schema management
//! - Page record persistence with the crawl status lifecycle
//! - Broken-link rows, fully replaced per crawl attempt

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use crate::analysis::HtmlVersion;
use crate::state::CrawlStatus;
use crate::SiftError;

use std::path::Path;

/// Initializes or opens a storage database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStorage)` - Successfully initialized storage
/// * `Err(SiftError)` - Failed to initialize storage
pub fn open_storage(path: &Path) -> Result<SqliteStorage, SiftError> {
    SqliteStorage::new(path)
}

/// One analyzed URL, as stored in the database
///
/// Owned by the orchestrator during a crawl attempt; analysis and
/// verification fill in the metric fields, terminal transitions persist them.
#[derive(Debug, Clone)]
pub struct PageRecord {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub html_version: HtmlVersion,
    pub status: CrawlStatus,
    /// Counts for h1 through h6, in order
    pub heading_counts: [u32; 6],
    pub internal_links: u32,
    pub external_links: u32,
    pub inaccessible_links: u32,
    pub has_login_form: bool,
    /// Populated only when `status` is `Error`
    pub error_message: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl PageRecord {
    /// Zeroes every analysis-derived field ahead of a fresh crawl attempt
    ///
    /// Stale values from a prior run must never leak into a new one.
    pub fn reset_metrics(&mut self) {
        self.title.clear();
        self.html_version = HtmlVersion::Unknown;
        self.heading_counts = [0; 6];
        self.internal_links = 0;
        self.external_links = 0;
        self.inaccessible_links = 0;
        self.has_login_form = false;
    }
}

/// One broken link discovered during verification
///
/// Never mutated after creation; the whole set for a page is replaced on
/// re-crawl.
#[derive(Debug, Clone)]
pub struct BrokenLink {
    pub id: i64,
    /// Back-reference to the owning page record
    pub page_id: i64,
    /// Fully resolved absolute URL
    pub link_url: String,
    /// HTTP status >= 400, or 0 when the link was unreachable at the
    /// transport level
    pub status_code: u16,
    pub created_at: String,
}
