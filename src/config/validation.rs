use crate::config::types::{Config, HarvestConfig, OutputConfig, SourceConfig, UserAgentConfig};
use crate::extract;
use crate::url::parse_locator;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_harvest_config(&config.harvest)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the source selection and start URL
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    if !extract::known_sources().contains(&config.name.as_str()) {
        return Err(ConfigError::Validation(format!(
            "Unknown source '{}', expected one of: {}",
            config.name,
            extract::known_sources().join(", ")
        )));
    }

    parse_locator(&config.start_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid start-url '{}': {}", config.start_url, e))
    })?;

    Ok(())
}

/// Validates harvest behavior configuration
fn validate_harvest_config(config: &HarvestConfig) -> Result<(), ConfigError> {
    if config.max_retries > 10 {
        return Err(ConfigError::Validation(format!(
            "max_retries must be <= 10, got {}",
            config.max_retries
        )));
    }

    if config.max_retries > 0 && config.retry_delay < 100 {
        return Err(ConfigError::Validation(format!(
            "retry_delay must be >= 100ms when retries are enabled, got {}ms",
            config.retry_delay
        )));
    }

    if config.max_consecutive_item_failures < 1 {
        return Err(ConfigError::Validation(format!(
            "max_consecutive_item_failures must be >= 1, got {}",
            config.max_consecutive_item_failures
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate harvester name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    // Validate contact URL
    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    // Validate contact email (basic validation)
    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    // Basic email format check: must contain @ and have text on both sides
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    // Domain part should contain at least one dot
    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            source: SourceConfig {
                name: "national-gallery".to_string(),
                start_url: "http://onlinecollection.nationalgallery.ie/collections".to_string(),
            },
            harvest: HarvestConfig {
                request_delay: 500,
                max_retries: 3,
                retry_delay: 5000,
                max_consecutive_item_failures: 5,
            },
            user_agent: UserAgentConfig {
                crawler_name: "GalleryHarvest".to_string(),
                crawler_version: "0.2".to_string(),
                contact_url: "https://example.com/about".to_string(),
                contact_email: "admin@example.com".to_string(),
            },
            output: OutputConfig {
                database_path: "./records.db".to_string(),
                csv_path: "./records.csv".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_unknown_source_rejected() {
        let mut config = valid_config();
        config.source.name = "louvre".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_bad_start_url_rejected() {
        let mut config = valid_config();
        config.source.start_url = "ftp://example.com/".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_zero_failure_limit_rejected() {
        let mut config = valid_config();
        config.harvest.max_consecutive_item_failures = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_short_retry_delay_rejected() {
        let mut config = valid_config();
        config.harvest.retry_delay = 10;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_short_retry_delay_allowed_without_retries() {
        let mut config = valid_config();
        config.harvest.max_retries = 0;
        config.harvest.retry_delay = 0;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("admin@sub.example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@domain").is_err());
    }

    #[test]
    fn test_empty_output_paths_rejected() {
        let mut config = valid_config();
        config.output.csv_path = String::new();
        assert!(validate(&config).is_err());
    }
}
