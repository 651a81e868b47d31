//! Application configuration resolution.
//!
//! Each setting is resolved independently, first match wins:
//! 1. Explicit command-line value
//! 2. Environment variable
//! 3. TOML config file
//! 4. OS-dependent default under the platform data directory

use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_DATA_FILE: &str = "CLASSBOOK_DATA_FILE";
pub const ENV_LOG_LEVEL: &str = "CLASSBOOK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "CLASSBOOK_LOG_DIR";

const APP_DIR_NAME: &str = "classbook";
const CONFIG_FILE_NAME: &str = "config.toml";
const DATA_FILE_NAME: &str = "addressbook.json";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read config file `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "malformed config file `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Settings as written in `config.toml`; every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub data_file: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub data_file: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Resolves against the process environment.
    pub fn resolve(overrides: &ConfigOverrides) -> ConfigResult<Self> {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Resolves with `env` standing in for environment lookups.
    ///
    /// An explicit `config_file` must exist; the default location may be
    /// absent.
    pub fn resolve_with<F>(overrides: &ConfigOverrides, env: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match &overrides.config_file {
            Some(path) => load_config_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => load_config_file(&path)?,
                _ => FileConfig::default(),
            },
        };
        let lookup = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let data_file = overrides
            .data_file
            .clone()
            .or_else(|| lookup(ENV_DATA_FILE).map(PathBuf::from))
            .or(file.data_file)
            .unwrap_or_else(|| default_data_dir().join(DATA_FILE_NAME));
        let log_level = overrides
            .log_level
            .clone()
            .or_else(|| lookup(ENV_LOG_LEVEL))
            .or(file.log_level)
            .unwrap_or_else(|| default_log_level().to_string());
        let log_dir = overrides
            .log_dir
            .clone()
            .or_else(|| lookup(ENV_LOG_DIR).map(PathBuf::from))
            .or(file.log_dir)
            .unwrap_or_else(|| default_data_dir().join("logs"));

        Ok(Self {
            data_file,
            log_level,
            log_dir,
        })
    }
}

/// Reads and parses one TOML config file.
pub fn load_config_file(path: &Path) -> ConfigResult<FileConfig> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// `<config_dir>/classbook/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Platform data directory for classbook files.
pub fn default_data_dir() -> PathBuf {
    if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\classbook"))
    } else {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("./classbook_data"))
    }
}

#[cfg(test)]
mod tests {
    use super::{
        load_config_file, AppConfig, ConfigError, ConfigOverrides, ENV_DATA_FILE, ENV_LOG_LEVEL,
    };
    use std::path::PathBuf;

    fn write_config(dir: &tempfile::TempDir, text: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn cli_beats_env_beats_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "data_file = \"/from/file.json\"\nlog_level = \"warn\"\nlog_dir = \"/from/file/logs\"\n",
        );
        let overrides = ConfigOverrides {
            config_file: Some(path),
            data_file: Some(PathBuf::from("/from/cli.json")),
            ..ConfigOverrides::default()
        };
        let config = AppConfig::resolve_with(&overrides, |key| match key {
            ENV_DATA_FILE => Some("/from/env.json".to_string()),
            ENV_LOG_LEVEL => Some("error".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.data_file, PathBuf::from("/from/cli.json"));
        assert_eq!(config.log_level, "error");
        assert_eq!(config.log_dir, PathBuf::from("/from/file/logs"));
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "log_level = \"warn\"\n");
        let overrides = ConfigOverrides {
            config_file: Some(path),
            ..ConfigOverrides::default()
        };
        let config =
            AppConfig::resolve_with(&overrides, |_| Some("   ".to_string())).unwrap();
        assert_eq!(config.log_level, "warn");
        assert!(config.data_file.ends_with("addressbook.json"));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "data_file = [unclosed");
        assert!(matches!(
            load_config_file(&path),
            Err(ConfigError::Parse { .. })
        ));

        let unknown = write_config(&dir, "colour = \"blue\"\n");
        assert!(matches!(
            load_config_file(&unknown),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_explicit_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = ConfigOverrides {
            config_file: Some(dir.path().join("absent.toml")),
            ..ConfigOverrides::default()
        };
        let err = AppConfig::resolve_with(&overrides, |_| None).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
