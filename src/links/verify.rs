//! Link liveness verification
//!
//! Resolves the raw href list against the page's base URL and probes a
//! bounded subset concurrently. A probe is a HEAD request with a short
//! timeout; a transport-level HEAD failure is retried once as GET before the
//! link is declared unreachable. Responses with status >= 400 are broken;
//! fully unreachable links are recorded with the sentinel status 0.
//!
//! Every broken link is persisted the moment it is discovered; an interrupted
//! verification leaves a consistent partial set behind.

use crate::config::VerifierConfig;
use crate::crawler::{probe_link, ProbeResult};
use crate::links::classify::{resolve_href, should_probe};
use crate::storage::Storage;
use reqwest::Client;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Sentinel status code recorded for transport-level failures
pub const UNREACHABLE_STATUS: u16 = 0;

/// One broken link found during verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenLinkHit {
    /// Fully resolved link URL
    pub link_url: String,
    /// HTTP status >= 400, or [`UNREACHABLE_STATUS`]
    pub status_code: u16,
}

/// Probes discovered links and records the broken ones
///
/// Hrefs are filtered through [`should_probe`], resolved against the base
/// URL (unresolvable references are dropped), and capped at
/// `config.max_probes`. Probes run concurrently under a semaphore sized by
/// `config.concurrency`, each with its own timeout; results funnel back
/// through this task, which is the only writer to storage.
///
/// A failed insert is logged and skipped; it never aborts the remaining
/// probes.
///
/// # Returns
///
/// The broken links that were recorded, in discovery order.
pub async fn verify_links<S: Storage>(
    client: &Client,
    hrefs: &[String],
    base: &Url,
    config: &VerifierConfig,
    probe_timeout: Duration,
    page_id: i64,
    storage: &Arc<Mutex<S>>,
) -> Vec<BrokenLinkHit> {
    let targets: Vec<String> = hrefs
        .iter()
        .filter(|href| should_probe(href))
        .filter_map(|href| resolve_href(href, base))
        .take(config.max_probes)
        .collect();

    tracing::debug!(
        "Verifying {} of {} discovered hrefs for page {}",
        targets.len(),
        hrefs.len(),
        page_id
    );

    let semaphore = Arc::new(Semaphore::new(config.concurrency));
    let mut probes = JoinSet::new();

    for link_url in targets {
        let client = client.clone();
        let semaphore = semaphore.clone();
        probes.spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return None,
            };

            match probe_link(&client, &link_url, probe_timeout).await {
                ProbeResult::Status(code) if code >= 400 => Some(BrokenLinkHit {
                    link_url,
                    status_code: code,
                }),
                ProbeResult::Status(code) => {
                    tracing::debug!("Link {} is alive (HTTP {})", link_url, code);
                    None
                }
                ProbeResult::Unreachable => Some(BrokenLinkHit {
                    link_url,
                    status_code: UNREACHABLE_STATUS,
                }),
            }
        });
    }

    let mut broken = Vec::new();
    while let Some(joined) = probes.join_next().await {
        let hit = match joined {
            Ok(Some(hit)) => hit,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!("Link probe task failed: {}", e);
                continue;
            }
        };

        // Persist each broken link as it is found
        let insert = {
            let mut storage = storage.lock().unwrap();
            storage.create_broken_link(page_id, &hit.link_url, hit.status_code)
        };
        if let Err(e) = insert {
            tracing::warn!("Failed to persist broken link {}: {}", hit.link_url, e);
        }

        broken.push(hit);
    }

    broken
}
