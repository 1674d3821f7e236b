//! Crawl orchestration
//!
//! This module drives one URL through the full pipeline:
//! - Marking the page record `running` and clearing stale metrics
//! - Fetching the page body
//! - Analyzing the document and classifying its links
//! - Replacing the stored broken-link set via verification
//! - Landing the record in a terminal `done` or `error` state
//!
//! A per-URL single-flight guard rejects concurrent crawls of the same URL;
//! different URLs crawl freely in parallel.

use crate::analysis::analyze_document;
use crate::config::Config;
use crate::crawler::{build_http_client, fetch_page};
use crate::links::{classify_href, verify_links, LinkScope};
use crate::state::CrawlStatus;
use crate::storage::{PageRecord, Storage};
use crate::SiftError;
use reqwest::Client;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

/// Drives crawl attempts against shared storage
pub struct Orchestrator<S: Storage> {
    config: Config,
    client: Client,
    storage: Arc<Mutex<S>>,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

/// Removes its URL from the in-flight set when dropped, so the slot is
/// released on every exit path
struct FlightGuard {
    set: Arc<Mutex<HashSet<String>>>,
    url: String,
}

impl FlightGuard {
    fn acquire(set: &Arc<Mutex<HashSet<String>>>, url: &str) -> Result<Self, SiftError> {
        let mut in_flight = set.lock().unwrap();
        if !in_flight.insert(url.to_string()) {
            return Err(SiftError::CrawlInProgress(url.to_string()));
        }
        Ok(Self {
            set: Arc::clone(set),
            url: url.to_string(),
        })
    }
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.set.lock().unwrap().remove(&self.url);
    }
}

impl<S: Storage> Orchestrator<S> {
    /// Creates a new orchestrator over shared storage
    ///
    /// # Arguments
    ///
    /// * `config` - The analyzer configuration
    /// * `storage` - The shared persistence sink
    ///
    /// # Returns
    ///
    /// * `Ok(Orchestrator)` - Ready to accept crawl calls
    /// * `Err(SiftError)` - HTTP client construction failed
    pub fn new(config: Config, storage: Arc<Mutex<S>>) -> Result<Self, SiftError> {
        let client = build_http_client(&config.fetcher)?;
        Ok(Self {
            config,
            client,
            storage,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        })
    }

    /// Handle on the shared storage, for reading results after a crawl
    pub fn storage(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.storage)
    }

    /// Crawls a single URL end to end
    ///
    /// The page record always lands in a terminal state: `done` with fresh
    /// metrics and a replaced broken-link set, or `error` with a message and
    /// zeroed metrics. Fetch and parse failures are page outcomes, not
    /// errors; `Err` is reserved for invalid input, a duplicate in-flight
    /// crawl, and storage failures.
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute URL of the page to analyze
    ///
    /// # Returns
    ///
    /// * `Ok(PageRecord)` - The record in its terminal state
    /// * `Err(SiftError)` - The attempt could not run at all
    pub async fn crawl(&self, url: &str) -> Result<PageRecord, SiftError> {
        let base = Url::parse(url)?;
        let _guard = FlightGuard::acquire(&self.in_flight, url)?;

        tracing::info!("Crawling {}", url);

        let mut record = {
            let mut storage = self.storage.lock().unwrap();
            storage.find_or_create_page(url)?
        };

        record.status = CrawlStatus::Running;
        record.error_message = None;
        record.reset_metrics();
        {
            let mut storage = self.storage.lock().unwrap();
            storage.save_page(&record)?;
        }

        let page_timeout = Duration::from_secs(self.config.fetcher.page_timeout_secs);
        let body = match fetch_page(&self.client, url, page_timeout).await {
            Ok(body) => body,
            Err(e) => {
                return self.finish_with_error(record, format!("Fetch error: {}", e));
            }
        };

        let analysis = match analyze_document(&body) {
            Ok(analysis) => analysis,
            Err(e) => {
                return self.finish_with_error(record, format!("Parse error: {}", e));
            }
        };

        record.title = analysis.title.clone();
        record.html_version = analysis.html_version.clone();
        record.heading_counts = analysis.heading_counts;
        record.has_login_form = analysis.has_login_form;
        for href in &analysis.hrefs {
            match classify_href(href, &base) {
                LinkScope::Internal => record.internal_links += 1,
                LinkScope::External => record.external_links += 1,
            }
        }

        // Drop stale rows before verification so the set is replaced, not
        // accumulated
        {
            let mut storage = self.storage.lock().unwrap();
            storage.delete_broken_links(record.id)?;
        }

        let probe_timeout = Duration::from_secs(self.config.fetcher.probe_timeout_secs);
        let broken = verify_links(
            &self.client,
            &analysis.hrefs,
            &base,
            &self.config.verifier,
            probe_timeout,
            record.id,
            &self.storage,
        )
        .await;
        record.inaccessible_links = broken.len() as u32;

        record.status = CrawlStatus::Done;
        record.error_message = None;
        {
            let mut storage = self.storage.lock().unwrap();
            storage.save_page(&record)?;
        }

        tracing::info!(
            "Finished {}: {} internal, {} external, {} broken",
            url,
            record.internal_links,
            record.external_links,
            record.inaccessible_links
        );

        Ok(record)
    }

    /// Lands the record in the `error` state with a message and persists it
    fn finish_with_error(
        &self,
        mut record: PageRecord,
        message: String,
    ) -> Result<PageRecord, SiftError> {
        tracing::warn!("Crawl of {} failed: {}", record.url, message);

        record.status = CrawlStatus::Error;
        record.error_message = Some(message);
        {
            let mut storage = self.storage.lock().unwrap();
            storage.save_page(&record)?;
        }

        Ok(record)
    }
}
