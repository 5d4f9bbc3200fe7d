//! Network-exchange sniffer
//!
//! While a worker renders pages, its browsing context emits one
//! `Network.responseReceived` event per request/response pair the page
//! makes: the document itself, stylesheets, scripts, images, fonts, data
//! responses. The sniffer subscribes to that stream once per context and
//! captures every in-scope exchange, independent of explicit navigation.
//!
//! A single malformed or unreachable response must never take down the
//! sniffer or its worker, so every per-exchange failure is logged at debug
//! level and swallowed.

use crate::crawler::MirrorStats;
use crate::storage::ResourceStore;
use crate::url::{clean_path, rewrite_stylesheet, Target};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chromiumoxide::cdp::browser_protocol::network::{
    EnableParams, EventResponseReceived, GetResponseBodyParams,
};
use chromiumoxide::Page;
use futures::StreamExt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use url::Url;

/// Captures every in-scope network exchange a browsing context produces
pub struct Sniffer {
    target: Arc<Target>,
    store: Arc<ResourceStore>,
    index_file: String,
    stats: Arc<MirrorStats>,
}

impl Sniffer {
    pub fn new(
        target: Arc<Target>,
        store: Arc<ResourceStore>,
        index_file: String,
        stats: Arc<MirrorStats>,
    ) -> Self {
        Self {
            target,
            store,
            index_file,
            stats,
        }
    }

    /// Attaches to a page and spawns the capture task
    ///
    /// Enables the CDP Network domain, subscribes to response events, and
    /// drains them for as long as the page lives. The returned handle is
    /// aborted by the orchestrator at shutdown.
    pub async fn attach(self, page: &Page) -> crate::Result<JoinHandle<()>> {
        page.execute(EnableParams::default()).await?;

        let mut events = page.event_listener::<EventResponseReceived>().await?;
        let page = page.clone();

        let handle = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                self.capture_exchange(&page, &event).await;
            }
        });

        Ok(handle)
    }

    /// Processes one observed network exchange
    async fn capture_exchange(&self, page: &Page, event: &EventResponseReceived) {
        let url_str = event.response.url.as_str();

        // Out-of-scope exchanges are not failures; drop them silently.
        if !self.target.in_scope(url_str) {
            return;
        }

        let url = match Url::parse(url_str) {
            Ok(u) => u,
            Err(e) => {
                tracing::debug!("Sniffer skipping unparsable URL {}: {}", url_str, e);
                return;
            }
        };

        let path = clean_path(&self.target, &url, &self.index_file);

        // The claimed-paths set is the sole cross-request dedup: the
        // check-and-set is atomic, so concurrent exchanges for the same
        // asset cannot both get here.
        if !self.store.claim(&path) {
            return;
        }

        let body = match page
            .execute(GetResponseBodyParams::new(event.request_id.clone()))
            .await
        {
            Ok(response) => response.result,
            Err(e) => {
                tracing::debug!("Sniffer could not read body of {}: {}", url_str, e);
                return;
            }
        };

        let bytes = match decode_body(&body.body, body.base64_encoded) {
            Some(b) => b,
            None => {
                tracing::debug!("Sniffer could not decode body of {}", url_str);
                return;
            }
        };

        let result = if is_stylesheet(&path) {
            let css = String::from_utf8_lossy(&bytes);
            let rewritten = rewrite_stylesheet(&self.target, &css);
            self.store.write_text(&path, &rewritten).await
        } else {
            self.store.write(&path, &bytes).await
        };

        match result {
            Ok(()) => {
                self.stats.record_asset();
                tracing::debug!("Captured {} -> {}", url_str, path);
            }
            Err(e) => {
                tracing::warn!("Failed to store {} at {}: {}", url_str, path, e);
            }
        }
    }
}

/// Decodes a CDP response body, which arrives base64-encoded for binary
/// content and as plain text otherwise
fn decode_body(body: &str, base64_encoded: bool) -> Option<Vec<u8>> {
    if base64_encoded {
        STANDARD.decode(body).ok()
    } else {
        Some(body.as_bytes().to_vec())
    }
}

/// Stylesheets are recognized by path suffix and stored as rewritten text
fn is_stylesheet(path: &str) -> bool {
    path.ends_with(".css")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain_body() {
        assert_eq!(decode_body("hello", false), Some(b"hello".to_vec()));
    }

    #[test]
    fn test_decode_base64_body() {
        assert_eq!(decode_body("aGVsbG8=", true), Some(b"hello".to_vec()));
    }

    #[test]
    fn test_decode_invalid_base64_is_none() {
        assert_eq!(decode_body("not base64 at all!!!", true), None);
    }

    #[test]
    fn test_stylesheet_detection() {
        assert!(is_stylesheet("css/site.css"));
        assert!(!is_stylesheet("js/app.js"));
        assert!(!is_stylesheet("about/index.html"));
    }
}
