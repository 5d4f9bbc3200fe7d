//! Crawl orchestration
//!
//! The coordinator wires the run together: seed the frontier, launch the
//! shared browser, give every worker its own page with a sniffer attached,
//! wait for the frontier to drain, then tear the browser down and report.

use crate::config::Config;
use crate::crawler::seeder::seed_from_sitemap;
use crate::crawler::stats::MirrorStats;
use crate::crawler::worker::CrawlWorker;
use crate::frontier::Frontier;
use crate::render::{launch_browser, ChromeRenderer};
use crate::sniffer::Sniffer;
use crate::storage::ResourceStore;
use crate::url::Target;
use crate::TakuhonError;
use std::sync::Arc;
use std::time::Duration;

/// Cadence of the pending/visited progress line.
const PROGRESS_INTERVAL: Duration = Duration::from_secs(10);

/// Mirrors the target site into the configured output directory
///
/// Blocks until every reachable page has been rendered and the frontier is
/// idle. Returns the run statistics; individual page and asset failures are
/// logged and absorbed along the way.
pub async fn mirror(target: Target, config: &Config) -> crate::Result<Arc<MirrorStats>> {
    let target = Arc::new(target);
    let frontier = Arc::new(Frontier::new(config.crawler.max_retries));
    let store = Arc::new(ResourceStore::new(&config.output.root_dir));
    let stats = Arc::new(MirrorStats::new());

    frontier.enqueue(target.url().clone());

    let seeded = seed_from_sitemap(&target, &frontier).await;
    tracing::info!(
        "Starting mirror of {} with {} seed URLs, {} workers",
        target.origin(),
        frontier.pending_len(),
        config.crawler.workers
    );
    if seeded > 0 {
        tracing::info!("Sitemap contributed {} URLs", seeded);
    }

    let (mut browser, browser_handle) = launch_browser().await?;

    let mut workers = Vec::with_capacity(config.crawler.workers);
    let mut sniffers = Vec::with_capacity(config.crawler.workers);

    for id in 0..config.crawler.workers {
        let page = browser.new_page("about:blank").await?;

        let sniffer = Sniffer::new(
            target.clone(),
            store.clone(),
            config.output.index_file.clone(),
            stats.clone(),
        );
        sniffers.push(sniffer.attach(&page).await?);

        let worker = CrawlWorker::new(
            id,
            ChromeRenderer::new(page, &config.crawler),
            target.clone(),
            frontier.clone(),
            store.clone(),
            config.output.index_file.clone(),
            stats.clone(),
        );
        workers.push(tokio::spawn(worker.run()));
    }

    let progress = spawn_progress_reporter(frontier.clone(), stats.clone());

    for worker in workers {
        worker
            .await
            .map_err(|e| TakuhonError::Task(e.to_string()))?;
    }

    progress.abort();
    for sniffer in sniffers {
        sniffer.abort();
    }

    // The crawl is done at this point; a noisy browser shutdown should not
    // turn a finished mirror into an error.
    if let Err(e) = browser.close().await {
        tracing::warn!("Browser close failed: {}", e);
    }
    if let Err(e) = browser.wait().await {
        tracing::warn!("Browser did not exit cleanly: {}", e);
    }
    browser_handle.abort();

    tracing::info!(
        "Mirror of {} complete: {} ({} URLs visited)",
        target.origin(),
        stats,
        frontier.visited_len()
    );

    Ok(stats)
}

/// Periodically logs how far along the crawl is
fn spawn_progress_reporter(
    frontier: Arc<Frontier>,
    stats: Arc<MirrorStats>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(PROGRESS_INTERVAL);
        ticker.tick().await;

        loop {
            ticker.tick().await;
            tracing::info!(
                "Progress: {} pending, {} visited, {}",
                frontier.pending_len(),
                frontier.visited_len(),
                stats
            );
        }
    })
}
