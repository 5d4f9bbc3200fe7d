//! URL handling module for Takuhon
//!
//! This module provides the immutable crawl target (origin), the URL to
//! on-disk path mapping, and the same-origin reference rewriting applied to
//! captured HTML and CSS.

mod path;
mod rewrite;

use crate::UrlError;
use url::Url;

// Re-export main functions
pub use path::clean_path;
pub use rewrite::{rewrite_markup, rewrite_stylesheet};

/// The site being mirrored, held immutable for the whole run
///
/// All scope decisions compare against the origin derived here. The origin
/// is `scheme://host[:port]` with no trailing slash.
#[derive(Debug, Clone)]
pub struct Target {
    url: Url,
    origin: String,
}

impl Target {
    /// Creates a target from the user-supplied start URL
    ///
    /// # Arguments
    ///
    /// * `raw` - The start URL as given on the command line
    ///
    /// # Returns
    ///
    /// * `Ok(Target)` - Parsed target with its origin
    /// * `Err(UrlError)` - The URL is malformed, has a non-HTTP scheme, or
    ///   has no host
    pub fn new(raw: &str) -> Result<Self, UrlError> {
        let url = Url::parse(raw).map_err(|e| UrlError::Parse(e.to_string()))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(format!(
                "Only HTTP and HTTPS schemes are supported, got: {}",
                url.scheme()
            )));
        }

        let host = url.host_str().ok_or(UrlError::MissingHost)?;

        let origin = match url.port() {
            Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
            None => format!("{}://{}", url.scheme(), host),
        };

        Ok(Self { url, origin })
    }

    /// The start URL this target was built from
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The origin string, `scheme://host[:port]` without a trailing slash
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns true if `candidate` belongs to this target's origin
    ///
    /// The check is an origin-prefix match, but the character following the
    /// origin must be `/`, `?`, `#`, or end-of-input so that
    /// `https://site.example.evil.com` does not pass for
    /// `https://site.example`.
    pub fn in_scope(&self, candidate: &str) -> bool {
        match candidate.strip_prefix(&self.origin) {
            Some(rest) => matches!(rest.chars().next(), None | Some('/') | Some('?') | Some('#')),
            None => false,
        }
    }
}
