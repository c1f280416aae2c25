use crate::config::types::{
    Config, LoaderConfig, OutputConfig, SelectorConfig, SiteConfig, UserAgentConfig,
};
use crate::ConfigError;
use reqwest::header::HeaderValue;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_loader_config(&config.loader)?;
    validate_selector_config(&config.selectors)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the target site URLs
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let root = parse_http_url("root-url", &config.root_url)?;
    let base = parse_http_url("base-url", &config.base_url)?;
    let prefix = parse_http_url("category-prefix", &config.category_prefix)?;

    if prefix.origin() != base.origin() {
        return Err(ConfigError::Validation(format!(
            "category-prefix '{}' must share the origin of base-url '{}'",
            config.category_prefix, config.base_url
        )));
    }

    if root.origin() != base.origin() {
        tracing::warn!(
            "root-url '{}' is not on base-url origin '{}'",
            config.root_url,
            config.base_url
        );
    }

    Ok(())
}

fn parse_http_url(field: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use HTTP or HTTPS",
            field, value
        )));
    }

    Ok(url)
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    let name = config.crawler_name.as_str();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ConfigError::Validation(format!(
            "crawler-name must be non-empty ASCII letters, digits or hyphens, got '{}'",
            name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler-version cannot be empty".to_string(),
        ));
    }

    parse_http_url("contact-url", &config.contact_url)?;
    validate_email(&config.contact_email)?;

    // Sent verbatim as the User-Agent header
    HeaderValue::from_str(&config.header_value()).map_err(|_| {
        ConfigError::Validation(format!(
            "user-agent fields produce an invalid header: '{}'",
            config.header_value()
        ))
    })?;

    Ok(())
}

/// Validates loader timing
fn validate_loader_config(config: &LoaderConfig) -> Result<(), ConfigError> {
    if config.settle_timeout > 0 && config.poll_interval == 0 {
        return Err(ConfigError::Validation(
            "poll-interval must be > 0 when settle-timeout is set".to_string(),
        ));
    }

    if config.request_timeout == 0 {
        return Err(ConfigError::Validation(
            "request-timeout must be >= 1s".to_string(),
        ));
    }

    Ok(())
}

/// Validates that every selector compiles
fn validate_selector_config(config: &SelectorConfig) -> Result<(), ConfigError> {
    let selectors = [
        ("l1-card", &config.l1_card),
        ("l1-title", &config.l1_title),
        ("l1-link", &config.l1_link),
        ("subcategory-link", &config.subcategory_link),
        ("product-item", &config.product_item),
        ("product-wrapper", &config.product_wrapper),
        ("product-name", &config.product_name),
        ("product-url", &config.product_url),
        ("product-image", &config.product_image),
        ("price-gross", &config.price_gross),
        ("price-net", &config.price_net),
        ("price-unit", &config.price_unit),
        ("availability", &config.availability),
        ("price-numeric", &config.price_numeric),
        ("currency", &config.currency),
    ];

    for (name, css) in selectors {
        Selector::parse(css).map_err(|e| {
            ConfigError::InvalidSelector(format!("{} '{}': {}", name, css, e))
        })?;
    }

    if config.sku_attribute.trim().is_empty() {
        return Err(ConfigError::Validation(
            "sku-attribute cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let plausible = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() >= 2
                && domain.split('.').all(|label| !label.is_empty())
        }
        None => false,
    };

    if plausible {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "contact-email is not a plausible address: '{}'",
            email
        )))
    }
}
