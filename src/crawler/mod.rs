//! Crawler module
//!
//! This module owns the HTTP side of the analyzer and the machinery that
//! drives crawl attempts:
//! - Page fetching and link probing over a shared client
//! - The per-URL crawl pipeline (fetch, analyze, verify, persist)
//! - A bounded background queue with a fixed worker pool

mod fetcher;
mod orchestrator;
mod queue;

pub use fetcher::{build_http_client, fetch_page, probe_link, FetchError, ProbeResult};
pub use orchestrator::Orchestrator;
pub use queue::CrawlQueue;
