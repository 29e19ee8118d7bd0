//! Configuration management for formcraft.
//!
//! Loaded with figment from defaults, then a TOML file, then environment
//! variables.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory name under the platform config and data directories.
const DATA_DIR_NAME: &str = "formcraft";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "formcraft.db";

/// Prefix for environment overrides. Nested keys are separated by `__`,
/// e.g. `FORMCRAFT_STORAGE__DATABASE_PATH`.
const ENV_PREFIX: &str = "FORMCRAFT_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FORMCRAFT_`)
/// 2. TOML config file at `~/.config/formcraft/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// CSV export configuration.
    pub export: ExportConfig,
    /// HTML rendering configuration.
    pub render: RenderConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/formcraft/formcraft.db`
    pub database_path: Option<PathBuf>,
}

/// Export-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory CSV files are written to.
    pub output_dir: PathBuf,
}

/// Render-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Directory HTML pages are written to.
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load configuration from all sources, reading the TOML file at
    /// `config_path` or the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        let config: Config = Self::figment(&config_file).extract()?;
        config.validate()?;
        Ok(config)
    }

    fn figment(config_file: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.storage.database_path {
            if path.as_os_str().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "storage.database_path cannot be empty".to_string(),
                });
            }
        }

        for (name, dir) in [
            ("export.output_dir", &self.export.output_dir),
            ("render.output_dir", &self.render.output_dir),
        ] {
            if dir.as_os_str().is_empty() {
                return Err(Error::ConfigValidation {
                    message: format!("{name} cannot be empty"),
                });
            }
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.storage.database_path.is_none());
        assert_eq!(config.export.output_dir, PathBuf::from("."));
        assert_eq!(config.render.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_database_path() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::new());

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("database_path"));
    }

    #[test]
    fn test_validate_empty_output_dir() {
        let mut config = Config::default();
        config.render.output_dir = PathBuf::new();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("render.output_dir"));
    }

    #[test]
    fn test_database_path_default() {
        let path = Config::default().database_path();
        assert!(path.to_string_lossy().contains("formcraft"));
        assert!(path.to_string_lossy().ends_with("formcraft.db"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/custom/path/forms.sqlite"));

        assert_eq!(
            config.database_path(),
            PathBuf::from("/custom/path/forms.sqlite")
        );
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("formcraft"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config.export, ExportConfig::default());
        assert_eq!(config.render, RenderConfig::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.toml");
        std::fs::write(
            &file,
            "[storage]\ndatabase_path = \"/tmp/forms.db\"\n\n[export]\noutput_dir = \"exports\"\n",
        )
        .unwrap();

        let figment = Config::figment(&file);
        let config: Config = figment.extract().unwrap();
        assert_eq!(config.database_path(), PathBuf::from("/tmp/forms.db"));
        assert_eq!(config.export.output_dir, PathBuf::from("exports"));
        assert_eq!(config.render.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.toml");
        std::fs::write(&file, "[storage]\ndatabase_path = \"\"\n").unwrap();

        assert!(matches!(
            Config::load_from(Some(file)),
            Err(Error::ConfigValidation { .. })
        ));
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("database_path"));
        assert!(json.contains("output_dir"));
    }

    #[test]
    fn test_config_deserialize_partial() {
        let json = r#"{"render": {"output_dir": "site"}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.render.output_dir, PathBuf::from("site"));
        assert_eq!(config.export, ExportConfig::default());
    }
}
