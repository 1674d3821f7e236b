//! Storage traits and error types
//!
//! This module defines the trait interface for the persistence sink and
//! associated error types. The crawl orchestrator talks to storage only
//! through this trait, so tests can substitute their own backend.

use crate::storage::{BrokenLink, PageRecord};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for the persistence sink
///
/// Defines every database operation the analyzer needs. Implementations are
/// used behind a mutex, one call at a time.
pub trait Storage {
    // ===== Page Management =====

    /// Finds the record for a URL, creating a fresh `queued` record if none
    /// exists
    fn find_or_create_page(&mut self, url: &str) -> StorageResult<PageRecord>;

    /// Gets a page by ID
    fn get_page(&self, page_id: i64) -> StorageResult<PageRecord>;

    /// Gets a page by URL
    fn get_page_by_url(&self, url: &str) -> StorageResult<Option<PageRecord>>;

    /// Persists all mutable fields of a page record and bumps `updated_at`
    fn save_page(&mut self, record: &PageRecord) -> StorageResult<()>;

    /// Deletes a page and (via cascade) its broken links
    fn delete_page(&mut self, page_id: i64) -> StorageResult<()>;

    /// Counts all page records
    fn count_pages(&self) -> StorageResult<u64>;

    // ===== Broken Link Management =====

    /// Deletes every broken-link row for a page
    ///
    /// Called before verification so a re-crawl replaces stale rows instead
    /// of accumulating them.
    fn delete_broken_links(&mut self, page_id: i64) -> StorageResult<()>;

    /// Records one broken link
    ///
    /// # Arguments
    ///
    /// * `page_id` - The owning page
    /// * `link_url` - The fully resolved link URL
    /// * `status_code` - HTTP status, or 0 for a transport-level failure
    ///
    /// # Returns
    ///
    /// The ID of the newly created row
    fn create_broken_link(
        &mut self,
        page_id: i64,
        link_url: &str,
        status_code: u16,
    ) -> StorageResult<i64>;

    /// Gets all broken links for a page in insertion order
    fn get_broken_links(&self, page_id: i64) -> StorageResult<Vec<BrokenLink>>;
}
