use serde::Deserialize;

/// Main configuration structure for Takuhon
///
/// Every field has a default so the config file is optional; command-line
/// flags override individual values after loading.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Number of concurrent crawl workers, each with its own browsing context
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Timeout for rendering a single page (seconds)
    #[serde(rename = "page-timeout-secs", default = "default_page_timeout")]
    pub page_timeout_secs: u64,

    /// Per-URL fetch attempt cap (initial attempt included)
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Upper bound on progressive-scroll rounds per page
    #[serde(rename = "scroll-rounds", default = "default_scroll_rounds")]
    pub scroll_rounds: u32,

    /// Pause between scroll increments (milliseconds)
    #[serde(rename = "scroll-delay-ms", default = "default_scroll_delay_ms")]
    pub scroll_delay_ms: u64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the mirror tree is written under
    #[serde(rename = "root-dir", default = "default_root_dir")]
    pub root_dir: String,

    /// Filename substituted for directory-style URLs
    #[serde(rename = "index-file", default = "default_index_file")]
    pub index_file: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            page_timeout_secs: default_page_timeout(),
            max_retries: default_max_retries(),
            scroll_rounds: default_scroll_rounds(),
            scroll_delay_ms: default_scroll_delay_ms(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            index_file: default_index_file(),
        }
    }
}

fn default_workers() -> usize {
    4
}

fn default_page_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_scroll_rounds() -> u32 {
    40
}

fn default_scroll_delay_ms() -> u64 {
    150
}

fn default_root_dir() -> String {
    "./mirror".to_string()
}

fn default_index_file() -> String {
    "index.html".to_string()
}
