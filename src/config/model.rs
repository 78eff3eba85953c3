//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the box.

use crate::app::state::SliceKey;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub persist: PersistSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            persist: PersistSettings::default(),
            logging: LoggingConfig::default(),
            assets: AssetsConfig::default(),
        }
    }
}

/// Target platform. Picks the auth reducer variant at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    #[default]
    Android,
    Web,
}

/// Durable persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistSettings {
    #[serde(default = "default_persist_key")]
    pub key: String,
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_whitelist")]
    pub whitelist: Vec<SliceKey>,
    #[serde(default)]
    pub throttle_ms: u64,
    /// Where file-backed storage lives. Defaults to the platform data dir.
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
}

impl Default for PersistSettings {
    fn default() -> Self {
        Self {
            key: default_persist_key(),
            version: default_version(),
            whitelist: default_whitelist(),
            throttle_ms: 0,
            storage_dir: None,
        }
    }
}

/// Diagnostic logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Build asset validation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    #[serde(default = "default_assets_root")]
    pub root: PathBuf,
    #[serde(default = "default_required_assets")]
    pub required: Vec<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: default_assets_root(),
            required: default_required_assets(),
        }
    }
}

fn default_persist_key() -> String {
    "root".to_string()
}
fn default_version() -> u32 {
    crate::persist::config::DEFAULT_VERSION
}
fn default_whitelist() -> Vec<SliceKey> {
    vec![SliceKey::Auth]
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_assets_root() -> PathBuf {
    PathBuf::from(".")
}
fn default_required_assets() -> Vec<String> {
    crate::assets::DEFAULT_REQUIRED_ASSETS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.platform, Platform::Android);
        assert_eq!(config.persist.key, "root");
        assert_eq!(config.persist.whitelist, vec![SliceKey::Auth]);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.assets.required.len(), crate::assets::DEFAULT_REQUIRED_ASSETS.len());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            platform = "web"

            [persist]
            version = 4
            whitelist = ["auth", "companyDashboard"]
            "#,
        )
        .unwrap();
        assert_eq!(config.platform, Platform::Web);
        assert_eq!(config.persist.version, 4);
        assert_eq!(config.persist.key, "root");
        assert_eq!(
            config.persist.whitelist,
            vec![SliceKey::Auth, SliceKey::CompanyDashboard]
        );
    }

    #[test]
    fn test_unknown_slice_in_whitelist_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str(
            r#"
            [persist]
            whitelist = ["profile"]
            "#,
        );
        assert!(result.is_err());
    }
}
