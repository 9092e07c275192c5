use crate::models::config_validator::validate_config;
use crate::models::editor_env::{EditorEnvironment, SiteType};
use crate::models::error::{DashboardError, Result};
use crate::service::site_time::SiteOffset;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub site_slug: String,
    pub site_url: String,
    /// Host name used when building links back to the hosted management pages
    pub hostname: String,
    #[serde(default)]
    pub site_type: SiteType,
    /// IANA timezone name, takes precedence over `gmt_offset` when set
    #[serde(default)]
    pub timezone: Option<String>,
    /// UTC offset in hours, may be fractional (e.g. 5.5)
    #[serde(default = "f64_zero")]
    pub gmt_offset: f64,
    /// Whether the block editor runs embedded in the hosted dashboard
    #[serde(default = "bool_false")]
    pub editor_iframed: bool,
    #[serde(default = "bool_false")]
    pub has_realtime_backups: bool,
    #[serde(default = "bool_true")]
    pub allow_restore: bool,
    #[serde(default)]
    pub activity_log_file: Option<String>,
    #[serde(default)]
    pub translations_file: Option<String>,
}

const fn f64_zero() -> f64 {
    0.0
}
const fn bool_false() -> bool {
    false
}
const fn bool_true() -> bool {
    true
}

impl Config {
    pub fn editor_environment(&self) -> EditorEnvironment {
        EditorEnvironment {
            iframed: self.editor_iframed,
            site_type: self.site_type,
            hostname: self.hostname.clone(),
        }
    }

    pub fn site_offset(&self) -> SiteOffset {
        SiteOffset {
            timezone: self.timezone.clone(),
            gmt_offset: self.gmt_offset,
        }
    }
}

pub fn setup_config(config_file: String) -> Result<Config> {
    let config_path = PathBuf::from(config_file);
    info!("Loading config from: {}", config_path.display());

    let config_str = fs::read_to_string(&config_path).map_err(|cause| {
        DashboardError::ConfigRead {
            path: config_path.clone(),
            cause,
        }
    })?;

    let config: Config = serde_json::from_str(&config_str).map_err(|cause| {
        DashboardError::ConfigParse {
            path: config_path,
            cause,
        }
    })?;

    validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file.flush().unwrap();
        temp_file
    }

    #[test]
    fn test_load_valid_config_with_all_fields() {
        let temp_file = write_config(
            r#"{
            "site_slug": "example.com",
            "site_url": "https://example.com",
            "hostname": "example.com",
            "site_type": "simple",
            "timezone": "Europe/Paris",
            "gmt_offset": 2.0,
            "editor_iframed": true,
            "has_realtime_backups": true,
            "allow_restore": false,
            "activity_log_file": "activity.json",
            "translations_file": "fr.json"
        }"#,
        );

        let config = setup_config(temp_file.path().to_str().unwrap().to_string()).unwrap();

        assert_eq!(config.site_slug, "example.com");
        assert_eq!(config.site_type, SiteType::Simple);
        assert_eq!(config.timezone.as_deref(), Some("Europe/Paris"));
        assert_eq!(config.gmt_offset, 2.0);
        assert!(config.editor_iframed);
        assert!(config.has_realtime_backups);
        assert!(!config.allow_restore);
        assert_eq!(config.activity_log_file.as_deref(), Some("activity.json"));
        assert_eq!(config.translations_file.as_deref(), Some("fr.json"));
    }

    #[test]
    fn test_load_config_with_defaults() {
        let temp_file = write_config(
            r#"{
            "site_slug": "example.com",
            "site_url": "https://example.com",
            "hostname": "example.com"
        }"#,
        );

        let config = setup_config(temp_file.path().to_str().unwrap().to_string()).unwrap();

        assert_eq!(config.site_type, SiteType::Jetpack); // default
        assert_eq!(config.timezone, None);
        assert_eq!(config.gmt_offset, 0.0);
        assert!(!config.editor_iframed);
        assert!(!config.has_realtime_backups);
        assert!(config.allow_restore);
        assert!(config.activity_log_file.is_none());
    }

    #[test]
    fn test_editor_environment_reflects_config() {
        let temp_file = write_config(
            r#"{
            "site_slug": "example.com",
            "site_url": "https://example.com",
            "hostname": "example.wordpress.com",
            "site_type": "atomic",
            "editor_iframed": true
        }"#,
        );

        let config = setup_config(temp_file.path().to_str().unwrap().to_string()).unwrap();
        let env = config.editor_environment();

        assert!(env.iframed);
        assert!(!env.is_simple_site());
        assert_eq!(env.hostname, "example.wordpress.com");
    }

    #[test]
    fn test_error_on_missing_config_file() {
        let result = setup_config("/this/does/not/exist/config.json".to_string());

        match result {
            Err(DashboardError::ConfigRead { .. }) => {}
            _ => panic!("Expected ConfigRead error"),
        }
    }

    #[test]
    fn test_error_on_invalid_json() {
        let temp_file = write_config(r#"{ "site_slug": "example.com", "#);

        let result = setup_config(temp_file.path().to_str().unwrap().to_string());

        match result {
            Err(DashboardError::ConfigParse { .. }) => {}
            _ => panic!("Expected ConfigParse error"),
        }
    }

    #[test]
    fn test_error_on_missing_required_fields() {
        let temp_file = write_config(r#"{ "site_slug": "example.com" }"#);

        let result = setup_config(temp_file.path().to_str().unwrap().to_string());

        // site_url and hostname are required
        match result {
            Err(DashboardError::ConfigParse { .. }) => {}
            _ => panic!("Expected ConfigParse error for missing required field"),
        }
    }

    #[test]
    fn test_error_on_invalid_values() {
        let temp_file = write_config(
            r#"{
            "site_slug": "example.com",
            "site_url": "example.com",
            "hostname": "example.com"
        }"#,
        );

        let result = setup_config(temp_file.path().to_str().unwrap().to_string());

        match result {
            Err(DashboardError::InvalidConfig(msg)) => assert!(msg.contains("site_url")),
            _ => panic!("Expected InvalidConfig error"),
        }
    }
}
