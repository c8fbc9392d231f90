use crate::config::types::{Config, MarkerConfig, SessionConfig, SiteConfig, TrackerConfig};
use crate::ConfigError;
use url::Url;

/// Smallest document bound that still covers a page header and its markers
const MIN_DOCUMENT_BYTES: usize = 1024;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_session_config(&config.session)?;
    validate_markers(&config.markers)?;
    validate_tracker_config(&config.tracker)?;
    Ok(())
}

/// Validates host knowledge about the site
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if !matches!(base.scheme(), "http" | "https") {
        return Err(ConfigError::Validation(format!(
            "base-url '{}' must use an HTTP(S) scheme",
            config.base_url
        )));
    }

    if config.primary_domains.is_empty() {
        return Err(ConfigError::Validation(
            "primary-domains cannot be empty".to_string(),
        ));
    }

    for pattern in config.primary_domains.iter().chain(&config.mirror_domains) {
        validate_domain_pattern(pattern)?;
    }

    for pattern in config
        .analytics_patterns
        .iter()
        .chain(&config.junk_path_patterns)
    {
        if pattern.is_empty() {
            return Err(ConfigError::InvalidPattern(
                "Reject patterns cannot be empty strings".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates per-run limits
fn validate_session_config(config: &SessionConfig) -> Result<(), ConfigError> {
    if config.max_total_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "max-total-attempts must be >= 1, got {}",
            config.max_total_attempts
        )));
    }

    if config.max_consecutive_failures < 1 {
        return Err(ConfigError::Validation(format!(
            "max-consecutive-failures must be >= 1, got {}",
            config.max_consecutive_failures
        )));
    }

    if config.max_document_bytes < MIN_DOCUMENT_BYTES {
        return Err(ConfigError::Validation(format!(
            "max-document-bytes must be >= {}, got {}",
            MIN_DOCUMENT_BYTES, config.max_document_bytes
        )));
    }

    Ok(())
}

/// Validates that every marker table has at least one usable phrase
fn validate_markers(markers: &MarkerConfig) -> Result<(), ConfigError> {
    let tables: [(&str, &Vec<String>); 8] = [
        ("not-found", &markers.not_found),
        ("authenticated", &markers.authenticated),
        ("logged-in", &markers.logged_in),
        ("adult-enabled", &markers.adult_enabled),
        ("no-more-items", &markers.no_more_items),
        ("full-view", &markers.full_view),
        ("flash-view", &markers.flash_view),
        ("user-disabled", &markers.user_disabled),
    ];

    for (name, phrases) in tables {
        if phrases.is_empty() {
            return Err(ConfigError::Validation(format!(
                "marker list '{}' cannot be empty",
                name
            )));
        }

        if phrases.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::Validation(format!(
                "marker list '{}' contains an empty phrase",
                name
            )));
        }
    }

    Ok(())
}

/// Validates tracker reporting settings
fn validate_tracker_config(config: &TrackerConfig) -> Result<(), ConfigError> {
    if let Some(url) = &config.url {
        Url::parse(url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid tracker url: {}", e)))?;
    }

    if config.max_tries < 1 {
        return Err(ConfigError::Validation(format!(
            "tracker max-tries must be >= 1, got {}",
            config.max_tries
        )));
    }

    Ok(())
}

/// Validates a domain pattern (supports wildcards)
fn validate_domain_pattern(pattern: &str) -> Result<(), ConfigError> {
    if pattern.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain pattern cannot be empty".to_string(),
        ));
    }

    let domain = pattern.strip_prefix("*.").unwrap_or(pattern);

    if domain.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
        || domain.contains("..")
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' is malformed",
            domain
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' must contain at least one dot (e.g., 'example.net')",
            domain
        )));
    }

    Ok(())
}
