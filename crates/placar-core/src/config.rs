// Configuration loading and parsing (config/placar.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::dataset::{LoadOptions, DEFAULT_SEASON};

/// File name looked up under `<base_dir>/config/` and `<base_dir>/defaults/`.
pub const CONFIG_FILE: &str = "placar.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// placar.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// CSV path, relative to the base directory unless absolute.
    pub path: String,
    /// Season used when the file has no season column.
    #[serde(default = "default_season")]
    pub default_season: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Rows shown in the top-N panels.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Season selected at startup (latest season when omitted).
    #[serde(default)]
    pub initial_season: Option<u16>,
    /// Team selected at startup (all teams when omitted).
    #[serde(default)]
    pub initial_team: Option<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            top_n: default_top_n(),
            initial_season: None,
            initial_team: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: default_log_filter(),
        }
    }
}

fn default_season() -> u16 {
    DEFAULT_SEASON
}

fn default_top_n() -> usize {
    10
}

fn default_log_filter() -> String {
    "placar=info,warn".to_string()
}

impl Config {
    /// Resolve the data path against `base_dir`.
    pub fn data_path(&self, base_dir: &Path) -> PathBuf {
        let path = Path::new(&self.data.path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            default_season: self.data.default_season,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/placar.toml` relative to `base_dir`.
///
/// Does not copy defaults; `load_config` does.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&config)?;

    Ok(config)
}

/// Copy `defaults/placar.toml` to `config/placar.toml` unless the latter
/// already exists. Returns the path written, if any.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.exists() {
        return Ok(None);
    }

    let source = base_dir.join("defaults").join(CONFIG_FILE);
    if !source.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no config/{CONFIG_FILE} or defaults/{CONFIG_FILE} in {}; \
                 run from the project root or pass --config-dir",
                base_dir.display()
            ),
        });
    }

    std::fs::create_dir_all(base_dir.join("config"))
        .and_then(|_| std::fs::copy(&source, &target))
        .map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to copy {} to {}: {e}", source.display(), target.display()),
        })?;

    Ok(Some(target))
}

/// Copy missing defaults, then load config from `base_dir`.
pub fn load_config(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_config_file(base_dir)?;
    load_config_from(base_dir)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.data.path.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.path".into(),
            message: "must not be empty".into(),
        });
    }

    let season = config.data.default_season;
    if !(1900..=2100).contains(&season) {
        return Err(ConfigError::ValidationError {
            field: "data.default_season".into(),
            message: format!("must be between 1900 and 2100, got {season}"),
        });
    }

    if config.dashboard.top_n == 0 {
        return Err(ConfigError::ValidationError {
            field: "dashboard.top_n".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
