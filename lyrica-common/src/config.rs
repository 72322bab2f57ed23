//! Bootstrap configuration and its resolution order
//!
//! Settings come from (highest priority first):
//! 1. Command-line arguments (applied by the binary)
//! 2. Environment variables (`LYRICA_CONFIG`, `LYRICA_STOPWORDS`)
//! 3. TOML config file
//! 4. Compiled defaults
//!
//! A missing config file never terminates the program: a warning is logged
//! and the compiled defaults are used.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "LYRICA_CONFIG";

/// Environment variable naming the stopword source
pub const STOPWORDS_ENV_VAR: &str = "LYRICA_STOPWORDS";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Stopword source (line/space delimited words)
    #[serde(default)]
    pub stopwords_path: Option<PathBuf>,

    /// Free-text column read by the tabular parser
    #[serde(default = "default_text_column")]
    pub text_column: String,

    /// Words kept per label for link data
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Word-cloud panel grid rows
    #[serde(default = "default_grid_size")]
    pub grid_rows: usize,

    /// Word-cloud panel grid columns
    #[serde(default = "default_grid_size")]
    pub grid_cols: usize,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_text_column() -> String {
    "Lyric".to_string()
}

fn default_top_k() -> usize {
    5
}

fn default_grid_size() -> usize {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            stopwords_path: None,
            text_column: default_text_column(),
            top_k: default_top_k(),
            grid_rows: default_grid_size(),
            grid_cols: default_grid_size(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Where a resolved configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Parsed from this file
    File(PathBuf),
    /// Named by `LYRICA_CONFIG` but absent; compiled defaults used
    Missing(PathBuf),
    /// No config file anywhere; compiled defaults used
    NotFound,
}

impl ConfigOrigin {
    pub fn is_default(&self) -> bool {
        !matches!(self, Self::File(_))
    }

    /// Report the origin at `info` (file) or `warn` (fallback to defaults)
    pub fn log(&self) {
        match self {
            Self::File(path) => info!("Loaded configuration from {}", path.display()),
            Self::Missing(path) => warn!(
                "Config file {} does not exist, using compiled defaults",
                path.display()
            ),
            Self::NotFound => warn!("No config file found, using compiled defaults"),
        }
    }
}

/// Locates and loads the bootstrap configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    explicit_path: Option<PathBuf>,
}

impl ConfigResolver {
    /// Resolver that searches ENV then the platform config directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver pinned to a config file given on the command line
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            explicit_path: Some(path.into()),
        }
    }

    /// Config file to read, if any
    ///
    /// Command-line path, then `LYRICA_CONFIG`, then
    /// `<config_dir>/lyrica/config.toml` when that file exists.
    pub fn config_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.explicit_path {
            return Some(path.clone());
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }

        default_config_path().filter(|p| p.exists())
    }

    /// Load configuration, falling back to compiled defaults
    ///
    /// Logs where the configuration came from. Callers that install their
    /// subscriber only after reading the config use [`Self::resolve`] and log
    /// the returned [`ConfigOrigin`] themselves.
    ///
    /// # Errors
    /// - An explicitly requested file that does not exist
    /// - A config file that exists but cannot be read or parsed
    pub fn load(&self) -> Result<TomlConfig> {
        let (config, origin) = self.resolve()?;
        origin.log();
        Ok(config)
    }

    /// Load configuration without logging, reporting its origin
    ///
    /// # Errors
    /// Same as [`Self::load`].
    pub fn resolve(&self) -> Result<(TomlConfig, ConfigOrigin)> {
        let Some(path) = self.config_path() else {
            return Ok((TomlConfig::default(), ConfigOrigin::NotFound));
        };

        if !path.exists() {
            if self.explicit_path.is_some() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Ok((TomlConfig::default(), ConfigOrigin::Missing(path)));
        }

        let config = load_toml_config(&path)?;
        Ok((config, ConfigOrigin::File(path)))
    }

    /// Stopword source following CLI → ENV → TOML priority
    pub fn resolve_stopwords_path(
        &self,
        cli_arg: Option<&Path>,
        config: &TomlConfig,
    ) -> Option<PathBuf> {
        if let Some(path) = cli_arg {
            return Some(path.to_path_buf());
        }

        if let Ok(path) = std::env::var(STOPWORDS_ENV_VAR) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }

        config.stopwords_path.clone()
    }
}

/// Platform config file location (`~/.config/lyrica/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lyrica").join("config.toml"))
}

/// Read and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read TOML failed ({}): {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))
}

/// Write a TOML config file atomically (temp file + rename)
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Serialize TOML failed: {}", e)))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, content)?;
    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(Error::Io(e));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::default();
        assert_eq!(config.text_column, "Lyric");
        assert_eq!(config.top_k, 5);
        assert_eq!((config.grid_rows, config.grid_cols), (3, 3));
        assert_eq!(config.logging.level, "info");
        assert!(config.stopwords_path.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: TomlConfig = toml::from_str("top_k = 8\n").unwrap();
        assert_eq!(config.top_k, 8);
        assert_eq!(config.text_column, "Lyric");
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_logging_section() {
        let config: TomlConfig = toml::from_str("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_explicit_path_wins() {
        let resolver = ConfigResolver::with_path("/tmp/lyrica-explicit.toml");
        assert_eq!(
            resolver.config_path(),
            Some(PathBuf::from("/tmp/lyrica-explicit.toml"))
        );
    }

    #[test]
    fn test_origin_default_flag() {
        assert!(!ConfigOrigin::File(PathBuf::from("a.toml")).is_default());
        assert!(ConfigOrigin::Missing(PathBuf::from("a.toml")).is_default());
        assert!(ConfigOrigin::NotFound.is_default());
    }
}
