use crate::config::types::{Config, CrawlerConfig, OutputConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.workers < 1 || config.workers > 64 {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and 64, got {}",
            config.workers
        )));
    }

    if config.page_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "page-timeout-secs must be >= 1, got {}",
            config.page_timeout_secs
        )));
    }

    if config.max_retries < 1 {
        return Err(ConfigError::Validation(format!(
            "max-retries must be >= 1, got {}",
            config.max_retries
        )));
    }

    if config.scroll_rounds < 1 {
        return Err(ConfigError::Validation(format!(
            "scroll-rounds must be >= 1, got {}",
            config.scroll_rounds
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.root_dir.is_empty() {
        return Err(ConfigError::Validation(
            "root-dir cannot be empty".to_string(),
        ));
    }

    if config.index_file.is_empty() {
        return Err(ConfigError::Validation(
            "index-file cannot be empty".to_string(),
        ));
    }

    if config.index_file.contains('/') {
        return Err(ConfigError::Validation(format!(
            "index-file must be a bare filename, got '{}'",
            config.index_file
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut config = Config::default();
        config.crawler.workers = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_excessive_workers_rejected() {
        let mut config = Config::default();
        config.crawler.workers = 200;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.crawler.page_timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_index_file_rejected() {
        let mut config = Config::default();
        config.output.index_file = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_index_file_with_separator_rejected() {
        let mut config = Config::default();
        config.output.index_file = "sub/index.html".to_string();
        assert!(validate(&config).is_err());
    }
}
