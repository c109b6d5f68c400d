use crate::config::types::{FetchConfig, HarvestConfig, OutputConfig};
use crate::ConfigError;
use regex::Regex;
use url::Url;

/// Validates the entire configuration
///
/// Runs before any network activity so a bad setting never costs a request.
pub fn validate(config: &HarvestConfig) -> Result<(), ConfigError> {
    validate_seed(&config.seed)?;
    compile_filter(&config.regex_pages)?;
    compile_filter(&config.regex_images)?;
    validate_output_config(&config.output)?;
    validate_fetch_config(&config.fetch)?;
    Ok(())
}

/// Compiles a page or image filter
///
/// Filters are searched for anywhere in the URL, so the empty pattern accepts
/// every URL.
pub fn compile_filter(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidRegex {
        pattern: pattern.to_string(),
        source,
    })
}

/// Validates the seed URL: absolute, HTTP(S), with a host
fn validate_seed(seed: &str) -> Result<(), ConfigError> {
    let url = Url::parse(seed)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Seed URL '{}' must use HTTP or HTTPS",
            seed
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::InvalidUrl(format!(
            "Seed URL '{}' has no host",
            seed
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.folder.is_empty() {
        return Err(ConfigError::Validation(
            "output folder cannot be empty".to_string(),
        ));
    }

    if config.images_per_folder < 1 {
        return Err(ConfigError::Validation(format!(
            "images_per_folder must be >= 1, got {}",
            config.images_per_folder
        )));
    }

    if config.folder_initial_num < 1 {
        return Err(ConfigError::Validation(format!(
            "folder_initial_num must be >= 1, got {}",
            config.folder_initial_num
        )));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs == 0 || config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeouts must be at least one second".to_string(),
        ));
    }

    Ok(())
}
