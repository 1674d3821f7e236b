//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.

use crate::analysis::HtmlVersion;
use crate::state::CrawlStatus;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageError, StorageResult};
use crate::storage::{BrokenLink, PageRecord};
use crate::SiftError;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(SiftError)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, SiftError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self, SiftError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn page_from_row(row: &Row) -> rusqlite::Result<PageRecord> {
        let has_login_form: i64 = row.get(15)?;
        Ok(PageRecord {
            id: row.get(0)?,
            url: row.get(1)?,
            title: row.get(2)?,
            html_version: HtmlVersion::from_db_string(&row.get::<_, String>(3)?),
            status: CrawlStatus::from_db_string(&row.get::<_, String>(4)?)
                .unwrap_or(CrawlStatus::Error),
            heading_counts: [
                row.get(5)?,
                row.get(6)?,
                row.get(7)?,
                row.get(8)?,
                row.get(9)?,
                row.get(10)?,
            ],
            internal_links: row.get(11)?,
            external_links: row.get(12)?,
            inaccessible_links: row.get(13)?,
            has_login_form: has_login_form != 0,
            error_message: row.get(14)?,
            created_at: row.get(16)?,
            updated_at: row.get(17)?,
        })
    }
}

const PAGE_COLUMNS: &str = "id, url, title, html_version, status, \
     h1_count, h2_count, h3_count, h4_count, h5_count, h6_count, \
     internal_links, external_links, inaccessible_links, \
     error_message, has_login_form, created_at, updated_at";

impl Storage for SqliteStorage {
    // ===== Page Management =====

    fn find_or_create_page(&mut self, url: &str) -> StorageResult<PageRecord> {
        if let Some(existing) = self.get_page_by_url(url)? {
            return Ok(existing);
        }

        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO pages (url, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)",
            params![url, CrawlStatus::Queued.to_db_string(), now, now],
        )?;

        self.get_page(self.conn.last_insert_rowid())
    }

    fn get_page(&self, page_id: i64) -> StorageResult<PageRecord> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM pages WHERE id = ?1",
            PAGE_COLUMNS
        ))?;

        let page = stmt
            .query_row(params![page_id], Self::page_from_row)
            .map_err(|_| StorageError::PageNotFound(format!("Page ID {}", page_id)))?;

        Ok(page)
    }

    fn get_page_by_url(&self, url: &str) -> StorageResult<Option<PageRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM pages WHERE url = ?1",
            PAGE_COLUMNS
        ))?;

        let page = stmt
            .query_row(params![url], Self::page_from_row)
            .optional()?;

        Ok(page)
    }

    fn save_page(&mut self, record: &PageRecord) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "UPDATE pages SET title = ?1, html_version = ?2, status = ?3,
             h1_count = ?4, h2_count = ?5, h3_count = ?6,
             h4_count = ?7, h5_count = ?8, h6_count = ?9,
             internal_links = ?10, external_links = ?11, inaccessible_links = ?12,
             has_login_form = ?13, error_message = ?14, updated_at = ?15
             WHERE id = ?16",
            params![
                record.title,
                record.html_version.as_str(),
                record.status.to_db_string(),
                record.heading_counts[0],
                record.heading_counts[1],
                record.heading_counts[2],
                record.heading_counts[3],
                record.heading_counts[4],
                record.heading_counts[5],
                record.internal_links,
                record.external_links,
                record.inaccessible_links,
                record.has_login_form as i64,
                record.error_message,
                now,
                record.id,
            ],
        )?;
        Ok(())
    }

    fn delete_page(&mut self, page_id: i64) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM pages WHERE id = ?1", params![page_id])?;
        Ok(())
    }

    fn count_pages(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM pages", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    // ===== Broken Link Management =====

    fn delete_broken_links(&mut self, page_id: i64) -> StorageResult<()> {
        self.conn.execute(
            "DELETE FROM broken_links WHERE page_id = ?1",
            params![page_id],
        )?;
        Ok(())
    }

    fn create_broken_link(
        &mut self,
        page_id: i64,
        link_url: &str,
        status_code: u16,
    ) -> StorageResult<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO broken_links (page_id, link_url, status_code, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![page_id, link_url, status_code, now],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_broken_links(&self, page_id: i64) -> StorageResult<Vec<BrokenLink>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, page_id, link_url, status_code, created_at
             FROM broken_links WHERE page_id = ?1 ORDER BY id ASC",
        )?;

        let links = stmt
            .query_map(params![page_id], |row| {
                Ok(BrokenLink {
                    id: row.get(0)?,
                    page_id: row.get(1)?,
                    link_url: row.get(2)?,
                    status_code: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(links)
    }
}
