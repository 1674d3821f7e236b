//! State definitions for the per-URL crawl lifecycle

mod status;

pub use status::CrawlStatus;
