//! Link extraction from rendered markup

use crate::url::Target;
use scraper::{Html, Selector};
use url::Url;

/// Schemes that never name a fetchable page.
const SKIPPED_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Extracts same-origin page links from rendered markup
///
/// Anchors are resolved against the page URL, stripped of fragments, and
/// filtered to the target origin. Download links and non-navigational
/// schemes are skipped. The caller owns deduplication; this function may
/// return the same URL twice.
///
/// # Arguments
///
/// * `target` - The crawl target whose origin bounds the crawl
/// * `base` - The URL of the page the markup came from
/// * `html` - The rendered document markup
pub fn extract_links(target: &Target, base: &Url, html: &str) -> Vec<Url> {
    let document = Html::parse_document(html);

    // Static selector, cannot fail.
    let selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let mut links = Vec::new();

    for element in document.select(&selector) {
        // Links that trigger a file download are assets for the sniffer,
        // not pages to render.
        if element.value().attr("download").is_some() {
            continue;
        }

        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let href = href.trim();
        if href.is_empty() || is_skipped_scheme(href) {
            continue;
        }

        let Ok(mut resolved) = base.join(href) else {
            tracing::debug!("Skipping unresolvable href {:?} on {}", href, base);
            continue;
        };

        // A fragment names a position inside a page, not a distinct page;
        // keeping it would defeat frontier deduplication.
        resolved.set_fragment(None);

        if target.in_scope(resolved.as_str()) {
            links.push(resolved);
        }
    }

    links
}

fn is_skipped_scheme(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    SKIPPED_SCHEMES.iter().any(|s| lower.starts_with(s))
}
