//! Crawl worker loop
//!
//! Each worker owns one [`Renderer`] and drains the shared frontier:
//! claim a URL, render it, discover links, store the rewritten document,
//! repeat. Workers share nothing but the frontier, the store, and the run
//! stats, so any number of them can run side by side.

use crate::crawler::parser::extract_links;
use crate::crawler::stats::MirrorStats;
use crate::frontier::{Frontier, Requeue};
use crate::render::Renderer;
use crate::storage::ResourceStore;
use crate::url::{clean_path, rewrite_markup, Target};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Pause before re-checking an empty-but-not-idle frontier.
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A single crawl worker bound to one renderer
pub struct CrawlWorker<R: Renderer> {
    id: usize,
    renderer: R,
    target: Arc<Target>,
    frontier: Arc<Frontier>,
    store: Arc<ResourceStore>,
    index_file: String,
    stats: Arc<MirrorStats>,
}

impl<R: Renderer> CrawlWorker<R> {
    pub fn new(
        id: usize,
        renderer: R,
        target: Arc<Target>,
        frontier: Arc<Frontier>,
        store: Arc<ResourceStore>,
        index_file: String,
        stats: Arc<MirrorStats>,
    ) -> Self {
        Self {
            id,
            renderer,
            target,
            frontier,
            store,
            index_file,
            stats,
        }
    }

    /// Drains the frontier until the whole crawl is idle
    ///
    /// An empty pending set alone is not a stop signal: another worker may
    /// be mid-render and about to discover new links. The worker only exits
    /// once nothing is pending and nothing is in flight.
    pub async fn run(self) {
        loop {
            match self.frontier.claim_next() {
                Some(url) => self.process(url).await,
                None => {
                    if self.frontier.is_idle() {
                        break;
                    }
                    tokio::time::sleep(IDLE_POLL_INTERVAL).await;
                }
            }
        }

        tracing::debug!("Worker {} finished", self.id);
    }

    /// Renders one claimed URL and routes the outcome
    ///
    /// Render failures are transient: the URL goes back to the frontier
    /// until the attempt cap turns it into a permanent failure. Everything
    /// downstream of a successful render is best-effort.
    async fn process(&self, url: Url) {
        tracing::debug!("Worker {} rendering {}", self.id, url);

        match self.renderer.render(&url).await {
            Ok(page) => {
                self.handle_rendered(&url, &page.html).await;
                self.frontier.complete(&url);
            }
            Err(e) => match self.frontier.requeue(url.clone()) {
                Requeue::Retry { attempt } => {
                    self.stats.record_retry();
                    tracing::warn!("Render attempt {} failed for {}: {}", attempt, url, e);
                }
                Requeue::GaveUp => {
                    self.stats.record_permanent_failure();
                    tracing::warn!("Giving up on {} after repeated failures: {}", url, e);
                }
            },
        }
    }

    async fn handle_rendered(&self, url: &Url, html: &str) {
        let mut discovered = 0;
        for link in extract_links(&self.target, url, html) {
            if self.frontier.enqueue(link) {
                discovered += 1;
            }
        }
        if discovered > 0 {
            tracing::debug!("Worker {} discovered {} new links on {}", self.id, discovered, url);
        }

        let path = clean_path(&self.target, url, &self.index_file);
        let rewritten = rewrite_markup(&self.target, html);

        // The sniffer may already hold this path with the raw response
        // body; the rewritten document is the authoritative artifact, so
        // claim for bookkeeping but write unconditionally.
        self.store.claim(&path);

        match self.store.write_text(&path, &rewritten).await {
            Ok(()) => {
                self.stats.record_page();
                tracing::info!("Stored {} as {}", url, path);
            }
            Err(e) => {
                // Storage trouble loses this artifact, not the crawl.
                tracing::warn!("Could not store {} at {}: {}", url, path, e);
            }
        }
    }
}
