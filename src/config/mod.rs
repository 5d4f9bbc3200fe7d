//! Configuration module for Takuhon
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every setting has a default; the target URL itself
//! always comes from the command line.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
