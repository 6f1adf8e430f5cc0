//! Configuration loading and root folder resolution
//!
//! Two-tier configuration:
//! 1. TOML bootstrap: root folder, ports, analyzer URL, logging
//! 2. Command-line / environment overrides applied by each binary
//!
//! Priority order for the root folder:
//! 1. Command-line argument (highest priority)
//! 2. `TATHYA_ROOT_FOLDER` environment variable
//! 3. TOML config file `root_folder` key
//! 4. OS-dependent compiled default (fallback)
//!
//! The original prototype hardcoded a database connection string in source;
//! this layer replaces it. The database lives at `<root>/tathya.db` and
//! uploads under `<root>/Uploaded_files`.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable overriding the root folder
pub const ENV_ROOT_FOLDER: &str = "TATHYA_ROOT_FOLDER";

/// Database filename within the root folder
pub const DATABASE_FILENAME: &str = "tathya.db";

/// Upload directory name within the root folder.
/// Kept verbatim from the original prototype's on-disk layout.
pub const UPLOAD_DIR_NAME: &str = "Uploaded_files";

/// Default backend API port
pub const DEFAULT_API_PORT: u16 = 8000;

/// Default dashboard port
pub const DEFAULT_UI_PORT: u16 = 8080;

/// Bootstrap configuration loaded from TOML file
///
/// These settings cannot change during runtime. A missing config file is not
/// an error: every field has a built-in default.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Root folder for the database and uploaded files (optional)
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// Backend API port
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Dashboard port
    #[serde(default = "default_ui_port")]
    pub ui_port: u16,

    /// Base URL of the external content-analysis service (optional)
    #[serde(default)]
    pub analyzer_url: Option<String>,

    /// Base URL the dashboard uses to reach the backend API (optional)
    #[serde(default)]
    pub api_url: Option<String>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            api_port: default_api_port(),
            ui_port: default_ui_port(),
            analyzer_url: None,
            api_url: None,
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_api_port() -> u16 {
    DEFAULT_API_PORT
}

fn default_ui_port() -> u16 {
    DEFAULT_UI_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load the TOML bootstrap configuration.
///
/// A missing file falls back to defaults with a warning; a file that exists
/// but fails to parse is a hard error (a typo should not silently become
/// default behavior).
pub fn load_toml_config(path: Option<&Path>) -> Result<TomlConfig> {
    let Some(path) = path else {
        return Ok(TomlConfig::default());
    };

    if !path.exists() {
        warn!("Config file not found: {} (using defaults)", path.display());
        return Ok(TomlConfig::default());
    }

    let toml_str = std::fs::read_to_string(path)?;
    let config: TomlConfig = toml::from_str(&toml_str)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;

    Ok(config)
}

/// Resolve the root folder following the priority order documented above
pub fn resolve_root_folder(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ENV_ROOT_FOLDER) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &config.root_folder {
        return path.clone();
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Get OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("tathya"))
        .unwrap_or_else(|| PathBuf::from("./tathya_data"))
}

/// Database path within a root folder
pub fn database_path(root_folder: &Path) -> PathBuf {
    root_folder.join(DATABASE_FILENAME)
}

/// Upload directory within a root folder
pub fn uploads_dir(root_folder: &Path) -> PathBuf {
    root_folder.join(UPLOAD_DIR_NAME)
}
