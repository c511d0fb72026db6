//! Configuration schema for cachecarry
//!
//! Configuration is stored at `~/.config/cachecarry/config.toml`

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Cache layout settings
    pub cache: CacheConfig,
}

/// General application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Where cache roots live under a base directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Build tool name, the cache root is `<cache_dir>/<tool>-build`
    pub tool: String,

    /// Cache directory relative to a base directory
    pub cache_dir: String,

    /// Default build plan manifest path
    pub manifest: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            tool: "go".to_string(),
            cache_dir: ".cache".to_string(),
            manifest: "actiongraph.json".to_string(),
        }
    }
}

impl GeneralConfig {
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Check values that would otherwise surface as confusing lookup misses
    pub fn validate(&self) -> Result<(), String> {
        if !matches!(self.general.log_format.to_ascii_lowercase().as_str(), "text" | "json") {
            return Err(format!(
                "general.log_format must be \"text\" or \"json\", got {:?}",
                self.general.log_format
            ));
        }

        let tool = self.cache.tool.as_str();
        if tool.is_empty() || tool.contains(['/', '\\']) {
            return Err(format!("cache.tool must be a plain name, got {:?}", tool));
        }

        if self.cache.cache_dir.is_empty() {
            return Err("cache.cache_dir must not be empty".to_string());
        }
        if self.cache.manifest.is_empty() {
            return Err("cache.manifest must not be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.cache.tool, "go");
        assert_eq!(config.cache.cache_dir, ".cache");
        assert_eq!(config.cache.manifest, "actiongraph.json");
        assert!(!config.general.json_logs());
    }

    #[test]
    fn partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
[cache]
tool = "tinygo"
"#,
        )
        .unwrap();
        assert_eq!(config.cache.tool, "tinygo");
        assert_eq!(config.cache.cache_dir, ".cache");
        assert_eq!(config.general.log_format, "text");
    }

    #[test]
    fn json_log_format() {
        let config: Config = toml::from_str("[general]\nlog_format = \"JSON\"\n").unwrap();
        assert!(config.general.json_logs());
    }

    #[test]
    fn validate_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = Config::default();
        config.general.log_format = "yaml".to_string();
        assert!(config.validate().unwrap_err().contains("log_format"));

        let mut config = Config::default();
        config.cache.tool = "go/build".to_string();
        assert!(config.validate().unwrap_err().contains("cache.tool"));

        let mut config = Config::default();
        config.cache.cache_dir.clear();
        assert!(config.validate().unwrap_err().contains("cache_dir"));
    }
}
