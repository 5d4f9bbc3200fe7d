//! Crawling module for Takuhon
//!
//! Everything that drives the crawl itself: the orchestration entry point,
//! the per-worker render loop, link extraction, sitemap seeding, and the
//! run-wide statistics the pieces report into.

mod coordinator;
mod parser;
mod seeder;
mod stats;
mod worker;

pub use coordinator::mirror;
pub use parser::extract_links;
pub use seeder::{seed_from_sitemap, seed_from_text};
pub use stats::MirrorStats;
pub use worker::CrawlWorker;
