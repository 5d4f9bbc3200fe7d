//! Sitemap-based frontier seeding
//!
//! Before the browser launches, the frontier is primed from the site's
//! `sitemap.xml` so pages unreachable by link-walking alone still get
//! mirrored. A missing or malformed sitemap is normal and never fails the
//! run; the start URL alone is a valid seed set.

use crate::frontier::Frontier;
use crate::url::Target;
use std::time::Duration;
use url::Url;

const SITEMAP_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Seeds the frontier from the target's sitemap, if one exists
///
/// Fetches `origin/sitemap.xml` over plain HTTP (no browser involved),
/// extracts `<loc>` entries, and enqueues every in-scope URL. Returns the
/// number of URLs that entered the frontier.
pub async fn seed_from_sitemap(target: &Target, frontier: &Frontier) -> usize {
    let sitemap_url = format!("{}/sitemap.xml", target.origin());

    let client = match reqwest::Client::builder()
        .timeout(SITEMAP_FETCH_TIMEOUT)
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Could not build sitemap HTTP client: {}", e);
            return 0;
        }
    };

    let response = match client.get(&sitemap_url).send().await {
        Ok(r) => r,
        Err(e) => {
            tracing::info!("No sitemap at {}: {}", sitemap_url, e);
            return 0;
        }
    };

    if !response.status().is_success() {
        tracing::info!("No sitemap at {} (status {})", sitemap_url, response.status());
        return 0;
    }

    let body = match response.text().await {
        Ok(b) => b,
        Err(e) => {
            tracing::info!("Could not read sitemap body from {}: {}", sitemap_url, e);
            return 0;
        }
    };

    seed_from_text(target, frontier, &body)
}

/// Enqueues every in-scope location found in sitemap text
pub fn seed_from_text(target: &Target, frontier: &Frontier, xml: &str) -> usize {
    let mut seeded = 0;

    for location in extract_locations(xml) {
        if !target.in_scope(&location) {
            tracing::debug!("Sitemap location out of scope: {}", location);
            continue;
        }

        let Ok(url) = Url::parse(&location) else {
            tracing::debug!("Sitemap location unparsable: {}", location);
            continue;
        };

        if frontier.enqueue(url) {
            seeded += 1;
        }
    }

    seeded
}

/// Pulls `<loc>` entry contents out of sitemap text
///
/// Textual scan rather than a full XML parse: sitemaps in the wild carry
/// enough namespace and encoding variety that matching the tag pair
/// directly is the more robust extraction.
fn extract_locations(xml: &str) -> Vec<String> {
    let mut locations = Vec::new();
    let mut rest = xml;

    while let Some(start) = rest.find("<loc>") {
        let after = &rest[start + "<loc>".len()..];
        let Some(end) = after.find("</loc>") else {
            break;
        };

        let location = after[..end].trim();
        if !location.is_empty() {
            locations.push(location.to_string());
        }

        rest = &after[end + "</loc>".len()..];
    }

    locations
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITEMAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://site.example/</loc></url>
  <url><loc>https://site.example/about/</loc></url>
  <url>
    <loc>
      https://site.example/docs/guide
    </loc>
  </url>
  <url><loc>https://other.example/elsewhere</loc></url>
</urlset>"#;

    #[test]
    fn test_extract_locations() {
        let locations = extract_locations(SITEMAP);
        assert_eq!(
            locations,
            vec![
                "https://site.example/",
                "https://site.example/about/",
                "https://site.example/docs/guide",
                "https://other.example/elsewhere",
            ]
        );
    }

    #[test]
    fn test_extract_from_empty_text() {
        assert!(extract_locations("").is_empty());
        assert!(extract_locations("<urlset></urlset>").is_empty());
    }

    #[test]
    fn test_unterminated_loc_ignored() {
        let locations = extract_locations("<loc>https://site.example/a</loc><loc>broken");
        assert_eq!(locations, vec!["https://site.example/a"]);
    }

    #[test]
    fn test_seed_filters_out_of_scope() {
        let target = Target::new("https://site.example/").unwrap();
        let frontier = Frontier::new(3);

        let seeded = seed_from_text(&target, &frontier, SITEMAP);

        assert_eq!(seeded, 3);
        assert_eq!(frontier.pending_len(), 3);
    }

    #[test]
    fn test_seed_deduplicates_against_frontier() {
        let target = Target::new("https://site.example/").unwrap();
        let frontier = Frontier::new(3);
        frontier.enqueue(Url::parse("https://site.example/").unwrap());

        let seeded = seed_from_text(&target, &frontier, SITEMAP);

        // The root URL was already queued, so only two entries are new.
        assert_eq!(seeded, 2);
    }
}
