//! Background crawl queue
//!
//! A bounded channel feeds a fixed pool of worker tasks, each draining URLs
//! and running them through the orchestrator. Backpressure is explicit:
//! enqueueing into a full queue fails immediately instead of blocking or
//! growing without bound.
//!
//! Accepted work is not cancellable; once enqueued, a URL runs to its
//! terminal state.

use crate::crawler::Orchestrator;
use crate::storage::Storage;
use crate::SiftError;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Handle for submitting URLs to the background workers
///
/// Cloneable; all clones feed the same queue. Dropping every handle closes
/// the channel and the workers exit once it drains.
#[derive(Clone)]
pub struct CrawlQueue {
    tx: mpsc::Sender<String>,
}

impl CrawlQueue {
    /// Starts the worker pool and returns the submission handle
    ///
    /// # Arguments
    ///
    /// * `orchestrator` - Shared crawl driver
    /// * `workers` - Number of worker tasks to spawn
    /// * `capacity` - Bounded queue depth
    pub fn start<S>(orchestrator: Arc<Orchestrator<S>>, workers: usize, capacity: usize) -> Self
    where
        S: Storage + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<String>(capacity);
        let rx = Arc::new(tokio::sync::Mutex::new(rx));

        for worker_id in 0..workers {
            let rx = Arc::clone(&rx);
            let orchestrator = Arc::clone(&orchestrator);
            tokio::spawn(async move {
                loop {
                    // Hold the receiver lock only while pulling one job
                    let url = { rx.lock().await.recv().await };
                    let Some(url) = url else {
                        tracing::debug!("Worker {} shutting down", worker_id);
                        break;
                    };

                    match orchestrator.crawl(&url).await {
                        Ok(record) => {
                            tracing::info!(
                                "Worker {} finished {} with status {}",
                                worker_id,
                                url,
                                record.status
                            );
                        }
                        Err(e) => {
                            tracing::warn!("Worker {} could not crawl {}: {}", worker_id, url, e);
                        }
                    }
                }
            });
        }

        Self { tx }
    }

    /// Submits a URL for background crawling
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The URL was accepted
    /// * `Err(SiftError::QueueFull)` - The queue is at capacity
    /// * `Err(SiftError::QueueClosed)` - The workers have shut down
    pub fn enqueue(&self, url: String) -> Result<(), SiftError> {
        self.tx.try_send(url).map_err(|e| match e {
            TrySendError::Full(_) => SiftError::QueueFull,
            TrySendError::Closed(_) => SiftError::QueueClosed,
        })
    }
}
