use crate::models::config::Config;
use crate::models::error::{DashboardError, Result};
use chrono_tz::Tz;
use log::{info, warn};
use std::path::Path;

const MIN_GMT_OFFSET: f64 = -12.0;
const MAX_GMT_OFFSET: f64 = 14.0;

/// Validates the entire configuration
pub fn validate_config(config: &Config) -> Result<()> {
    info!("Validating configuration...");

    validate_site_identity(config)?;

    validate_site_url(&config.site_url)?;

    validate_site_offset(config)?;

    check_referenced_files(config);

    info!("Configuration validation passed");
    Ok(())
}

fn validate_site_identity(config: &Config) -> Result<()> {
    if config.site_slug.trim().is_empty() {
        return Err(DashboardError::InvalidConfig(
            "site_slug must not be empty".to_string(),
        ));
    }

    if config.hostname.trim().is_empty() {
        return Err(DashboardError::InvalidConfig(
            "hostname must not be empty".to_string(),
        ));
    }

    if config.hostname.contains('/') {
        return Err(DashboardError::InvalidConfig(format!(
            "hostname must be a bare host name without scheme or path: {}",
            config.hostname
        )));
    }

    Ok(())
}

fn validate_site_url(site_url: &str) -> Result<()> {
    if !(site_url.starts_with("https://") || site_url.starts_with("http://")) {
        return Err(DashboardError::InvalidConfig(format!(
            "site_url must start with http:// or https://: {}",
            site_url
        )));
    }
    Ok(())
}

fn validate_site_offset(config: &Config) -> Result<()> {
    if let Some(timezone) = config.timezone.as_deref().filter(|tz| !tz.is_empty()) {
        if timezone.parse::<Tz>().is_err() {
            return Err(DashboardError::InvalidConfig(format!(
                "timezone is not a known IANA timezone: {}",
                timezone
            )));
        }
    }

    if !config.gmt_offset.is_finite()
        || config.gmt_offset < MIN_GMT_OFFSET
        || config.gmt_offset > MAX_GMT_OFFSET
    {
        return Err(DashboardError::InvalidConfig(format!(
            "gmt_offset must be between {} and {} hours, got {}",
            MIN_GMT_OFFSET, MAX_GMT_OFFSET, config.gmt_offset
        )));
    }

    Ok(())
}

/// Missing data files are not fatal: the dashboard falls back to an empty log
/// and the built-in English strings.
fn check_referenced_files(config: &Config) {
    if let Some(file) = &config.activity_log_file {
        if !Path::new(file).exists() {
            warn!("activity_log_file does not exist: {}", file);
        }
    }
    if let Some(file) = &config.translations_file {
        if !Path::new(file).exists() {
            warn!("translations_file does not exist: {}", file);
        }
    }
}
