//! Connection settings for the HTTP catalog client.
//!
//! Layering, lowest precedence first: built-in defaults, an optional TOML
//! file, then `CATALOG_BASE_URL` / `CATALOG_TIMEOUT_SECS` from the
//! environment. The binary applies its own flags on top.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const BASE_URL_ENV: &str = "CATALOG_BASE_URL";
pub const TIMEOUT_ENV: &str = "CATALOG_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Base URL the `/genres`, `/movies` and `/movies_genres` paths are joined to
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// On-disk representation; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl SourceConfig {
    /// Load defaults, then `path` (if given), then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = path {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            config
                .apply_toml(&raw)
                .with_context(|| format!("Invalid config file {}", path.display()))?;
        }
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Override fields with the keys present in a TOML document.
    pub fn apply_toml(&mut self, raw: &str) -> Result<()> {
        let file: FileConfig = toml::from_str(raw).context("Failed to parse TOML")?;
        if let Some(base_url) = file.base_url {
            self.base_url = base_url;
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        Ok(())
    }

    /// Override fields from environment variables looked up through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            self.base_url = base_url;
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().with_context(|| {
                format!("{TIMEOUT_ENV} must be a whole number of seconds, got '{raw}'")
            })?;
            self.timeout = Duration::from_secs(secs);
        }
        Ok(())
    }

    /// Base URL without trailing slashes, ready for joining paths.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = SourceConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_toml_overrides_only_present_keys() {
        let mut config = SourceConfig::default();
        config.apply_toml("timeout_secs = 3\n").unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(3));

        config.apply_toml("base_url = \"http://catalog:9000/\"").unwrap();
        assert_eq!(config.normalized_base_url(), "http://catalog:9000");
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        let mut config = SourceConfig::default();
        assert!(config.apply_toml("base = \"x\"").is_err());
    }

    #[test]
    fn test_env_takes_precedence_over_file() {
        let mut config = SourceConfig::default();
        config.apply_toml("base_url = \"http://from-file\"").unwrap();

        let env: HashMap<&str, &str> =
            [(BASE_URL_ENV, "http://from-env"), (TIMEOUT_ENV, " 25 ")].into();
        config.apply_env(|key| env.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.base_url, "http://from-env");
        assert_eq!(config.timeout, Duration::from_secs(25));
    }

    #[test]
    fn test_invalid_timeout_env_is_an_error() {
        let mut config = SourceConfig::default();
        let err = config
            .apply_env(|key| (key == TIMEOUT_ENV).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains(TIMEOUT_ENV));
    }

    #[test]
    fn test_load_reads_file() {
        let path =
            std::env::temp_dir().join(format!("catalog-config-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "base_url = \"http://file-host:1234\"\ntimeout_secs = 2\n",
        )
        .unwrap();

        let config = SourceConfig::load(Some(&path));
        std::fs::remove_file(&path).ok();
        let config = config.unwrap();

        // The environment may override, but only if the variables are set
        if std::env::var(BASE_URL_ENV).is_err() {
            assert_eq!(config.base_url, "http://file-host:1234");
        }
        if std::env::var(TIMEOUT_ENV).is_err() {
            assert_eq!(config.timeout, Duration::from_secs(2));
        }
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let missing = Path::new("/definitely/not/here/catalog.toml");
        assert!(SourceConfig::load(Some(missing)).is_err());
    }
}
