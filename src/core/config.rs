//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Armory configuration with layered hierarchy
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the catalogue JSON files
    pub data_dir: Option<PathBuf>,

    /// Default output format for list commands
    pub default_format: Option<String>,

    /// Wrap long text columns at this width instead of truncating
    pub wrap_width: Option<usize>,

    /// Default row limit for list commands
    pub limit: Option<usize>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/armory/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read(&global_path) {
                config.merge(global);
            }
        }

        // 3. Working directory config (./armory.yaml)
        if let Some(local) = Self::read(Path::new("armory.yaml")) {
            config.merge(local);
        }

        // 4. Environment variables
        config.merge(Self::from_env(|key| std::env::var(key).ok()));

        config
    }

    /// Read one config file; missing or malformed files are skipped
    fn read(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                None
            }
        }
    }

    fn from_env(var: impl Fn(&str) -> Option<String>) -> Config {
        Config {
            data_dir: var("ARMORY_DATA_DIR").filter(|v| !v.is_empty()).map(PathBuf::from),
            default_format: var("ARMORY_FORMAT").filter(|v| !v.is_empty()),
            wrap_width: var("ARMORY_WRAP").and_then(|v| v.parse().ok()),
            limit: None,
        }
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "armory")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.data_dir.is_some() {
            self.data_dir = other.data_dir;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.wrap_width.is_some() {
            self.wrap_width = other.wrap_width;
        }
        if other.limit.is_some() {
            self.limit = other.limit;
        }
    }

    /// Data directory, with a command-line override taking precedence
    pub fn data_dir(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.data_dir.clone())
            .unwrap_or_else(|| PathBuf::from("data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_merge_prefers_later_layers() {
        let mut config = Config {
            data_dir: Some(PathBuf::from("global")),
            default_format: Some("tsv".to_string()),
            wrap_width: None,
            limit: Some(10),
        };
        config.merge(Config {
            data_dir: Some(PathBuf::from("local")),
            default_format: None,
            wrap_width: Some(40),
            limit: None,
        });

        assert_eq!(config.data_dir, Some(PathBuf::from("local")));
        assert_eq!(config.default_format.as_deref(), Some("tsv"));
        assert_eq!(config.wrap_width, Some(40));
        assert_eq!(config.limit, Some(10));
    }

    #[test]
    fn test_from_env() {
        let config = Config::from_env(|key| match key {
            "ARMORY_DATA_DIR" => Some("/srv/catalogue".to_string()),
            "ARMORY_FORMAT" => Some(String::new()),
            "ARMORY_WRAP" => Some("abc".to_string()),
            _ => None,
        });
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/catalogue")));
        assert!(config.default_format.is_none());
        assert!(config.wrap_width.is_none());
    }

    #[test]
    fn test_read_yaml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "data_dir: exports\nlimit: 25\n").unwrap();

        let config = Config::read(&path).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("exports")));
        assert_eq!(config.limit, Some(25));

        std::fs::write(&path, "limit: [oops").unwrap();
        assert!(Config::read(&path).is_none());
        assert!(Config::read(&dir.path().join("missing.yaml")).is_none());
    }

    #[test]
    fn test_data_dir_precedence() {
        let config = Config {
            data_dir: Some(PathBuf::from("from-config")),
            ..Default::default()
        };
        assert_eq!(config.data_dir(Some(Path::new("cli"))), PathBuf::from("cli"));
        assert_eq!(config.data_dir(None), PathBuf::from("from-config"));
        assert_eq!(Config::default().data_dir(None), PathBuf::from("data"));
    }
}
