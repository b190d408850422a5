use crate::config::types::{Config, CrawlConfig, ExtractConfig, FetchConfig, OutputConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetch_config(&config.fetch)?;
    validate_crawl_config(&config.crawl)?;
    validate_extract_config(&config.extract)?;
    validate_output_config(&config.output)?;
    Ok(())
}

fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    config.delay()?;

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.max_pages == Some(0) {
        return Err(ConfigError::Validation(
            "max-pages must be >= 1 when set".to_string(),
        ));
    }

    if config.dedup_body_prefix == 0 {
        return Err(ConfigError::Validation(
            "dedup-body-prefix must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_extract_config(config: &ExtractConfig) -> Result<(), ConfigError> {
    if config.posts_per_page == 0 {
        return Err(ConfigError::Validation(
            "posts-per-page must be >= 1".to_string(),
        ));
    }

    if config.max_author_len == 0 {
        return Err(ConfigError::Validation(
            "max-author-len must be >= 1".to_string(),
        ));
    }

    if config.marker_walk_depth == 0 || config.author_walk_depth == 0 {
        return Err(ConfigError::Validation(format!(
            "walk depths must be >= 1, got marker={} author={}",
            config.marker_walk_depth, config.author_walk_depth
        )));
    }

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.output_dir.is_empty() {
        return Err(ConfigError::Validation(
            "output-dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}
