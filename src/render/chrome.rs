//! Headless Chrome renderer over CDP

use crate::config::CrawlerConfig;
use crate::render::{RenderError, RenderedPage, Renderer};
use crate::TakuhonError;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use futures::StreamExt;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use url::Url;

/// Scrolls one viewport down and reports the current document height.
const SCROLL_STEP: &str = "window.scrollBy(0, window.innerHeight); document.body.scrollHeight";

/// Launches the shared headless browser instance
///
/// The returned task drives the CDP connection and must stay alive for the
/// whole run; the orchestrator aborts it after the browser is closed.
pub async fn launch_browser() -> crate::Result<(Browser, JoinHandle<()>)> {
    let config = BrowserConfig::builder()
        .no_sandbox()
        .build()
        .map_err(TakuhonError::Launch)?;

    let (browser, mut handler) = Browser::launch(config).await?;

    let handle = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                break;
            }
        }
    });

    Ok((browser, handle))
}

/// Renderer backed by one headless Chrome page
///
/// Each crawl worker owns one of these, so the page doubles as the
/// worker's browsing context: the sniffer attaches to the same page and
/// observes every exchange the renders below trigger.
pub struct ChromeRenderer {
    page: Page,
    timeout: Duration,
    scroll_rounds: u32,
    scroll_delay: Duration,
}

impl ChromeRenderer {
    /// Wraps a page with the configured timeouts and scroll bounds
    pub fn new(page: Page, config: &CrawlerConfig) -> Self {
        Self {
            page,
            timeout: Duration::from_secs(config.page_timeout_secs),
            scroll_rounds: config.scroll_rounds,
            scroll_delay: Duration::from_millis(config.scroll_delay_ms),
        }
    }

    /// Triggers lazy-loaded content by scrolling in bounded increments
    ///
    /// Stops when the document height stops growing or the round cap is
    /// hit. Without this the sniffer would miss assets that sites only
    /// request once they enter the viewport.
    async fn scroll_to_bottom(&self, url: &Url) -> Result<(), RenderError> {
        let mut last_height = 0.0_f64;

        for _ in 0..self.scroll_rounds {
            let result = self
                .page
                .evaluate(SCROLL_STEP)
                .await
                .map_err(|e| navigation_error(url, e))?;

            let height: f64 = result.into_value().unwrap_or(0.0);
            if height <= last_height {
                break;
            }

            last_height = height;
            tokio::time::sleep(self.scroll_delay).await;
        }

        // Captured markup should reflect the top-of-page state.
        let _ = self.page.evaluate("window.scrollTo(0, 0); 0").await;

        Ok(())
    }
}

impl Renderer for ChromeRenderer {
    fn render(&self, url: &Url) -> impl Future<Output = Result<RenderedPage, RenderError>> + Send {
        async move {
            let navigate = async {
                self.page.goto(url.as_str()).await?;
                self.page.wait_for_navigation().await?;
                Ok::<(), CdpError>(())
            };

            with_timeout(navigate, self.timeout, url.as_str()).await?;

            self.scroll_to_bottom(url).await?;

            let html = self
                .page
                .content()
                .await
                .map_err(|e| navigation_error(url, e))?;

            Ok(RenderedPage { html })
        }
    }
}

fn navigation_error(url: &Url, error: CdpError) -> RenderError {
    RenderError::Navigation {
        url: url.to_string(),
        message: error.to_string(),
    }
}

/// Wraps a page operation with an explicit timeout
///
/// A page that never reaches network quiescence must not hang its worker;
/// the timeout turns it into a transient render failure.
async fn with_timeout<F>(operation: F, timeout: Duration, url: &str) -> Result<(), RenderError>
where
    F: Future<Output = Result<(), CdpError>>,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(RenderError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        }),
        Err(_) => Err(RenderError::Timeout {
            url: url.to_string(),
        }),
    }
}
