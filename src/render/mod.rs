//! Page rendering capability
//!
//! The crawl core consumes rendering through the [`Renderer`] trait: give
//! it a URL, get back the fully rendered (and fully scrolled) markup. The
//! production implementation drives a headless Chrome page over CDP; tests
//! substitute a canned renderer.

mod chrome;

pub use chrome::{launch_browser, ChromeRenderer};

use std::future::Future;
use thiserror::Error;
use url::Url;

/// Errors from a page render attempt
///
/// Both kinds are transient from the worker's point of view: the URL goes
/// back to the frontier for a capped retry.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Page render timed out for {url}")]
    Timeout { url: String },

    #[error("Navigation failed for {url}: {message}")]
    Navigation { url: String, message: String },
}

/// A fully rendered page
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// The document markup after rendering and progressive scrolling
    pub html: String,
}

/// The render-a-URL capability the crawl core depends on
///
/// Implementations render the URL in their browsing context and return the
/// resulting markup once the page has settled and lazy-loaded content has
/// been triggered.
pub trait Renderer: Send + Sync {
    /// Renders the URL and returns the final document markup
    fn render(&self, url: &Url) -> impl Future<Output = Result<RenderedPage, RenderError>> + Send;
}
