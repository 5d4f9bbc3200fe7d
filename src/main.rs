//! Takuhon command-line interface

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use takuhon::config::{load_config_with_hash, Config};
use takuhon::crawler::mirror;
use takuhon::url::Target;
use tracing_subscriber::EnvFilter;

/// Takuhon: an offline website mirroring tool
///
/// Takuhon renders a site with a headless browser, captures every network
/// resource the pages pull in, rewrites same-origin references, and writes
/// a self-contained mirror directory tree.
#[derive(Parser, Debug)]
#[command(name = "takuhon")]
#[command(version = "0.1.0")]
#[command(about = "Mirror a website into a local directory tree", long_about = None)]
struct Cli {
    /// Start URL of the site to mirror (http or https)
    url: String,

    /// Directory the mirror is written under (overrides config)
    #[arg(short, long)]
    output: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of concurrent crawl workers (overrides config)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("takuhon=info,warn"),
            1 => EnvFilter::new("takuhon=debug,info"),
            2 => EnvFilter::new("takuhon=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn load_configuration(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            tracing::info!("Loaded config {} (sha256 {})", path.display(), hash);
            config
        }
        None => Config::default(),
    };

    if let Some(output) = &cli.output {
        config.output.root_dir = output.clone();
    }
    if let Some(workers) = cli.workers {
        config.crawler.workers = workers;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_configuration(&cli)?;

    // A bad start URL is a usage error; fail before anything launches.
    let target = Target::new(&cli.url)
        .with_context(|| format!("Invalid target URL: {}", cli.url))?;

    let stats = mirror(target, &config).await?;

    println!("Mirror written to {}: {}", config.output.root_dir, stats);

    Ok(())
}
