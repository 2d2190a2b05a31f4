//! Configuration loading and resolution
//!
//! Every setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing default config file is not an error. A config file that was
//! named explicitly (`--config` or `MDV_CONFIG`) must exist and parse.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const ENV_CONFIG: &str = "MDV_CONFIG";
pub const ENV_DIAGRAM_FILE: &str = "MDV_DIAGRAM_FILE";
pub const ENV_APP_NAME: &str = "MDV_APP_NAME";
pub const ENV_DEBUG: &str = "MDV_DEBUG";
pub const ENV_HOST: &str = "MDV_HOST";
pub const ENV_PORT: &str = "MDV_PORT";

const DEFAULT_DIAGRAM_FILE: &str = "static/data/mermaid_ref.txt";
const DEFAULT_APP_NAME: &str = "Mermaid Diagram Viewer";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;

/// Contents of the optional TOML config file
///
/// All fields are optional so a partial file only overrides what it names.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Path to the diagram source text file
    #[serde(default)]
    pub diagram_file: Option<PathBuf>,

    /// Display name used by the web pages
    #[serde(default)]
    pub app_name: Option<String>,

    /// Debug mode (forces debug log level)
    #[serde(default)]
    pub debug: Option<bool>,

    /// HTTP bind address
    #[serde(default)]
    pub host: Option<String>,

    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
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

fn default_log_level() -> String {
    "info".to_string()
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub diagram_file: Option<PathBuf>,
    pub app_name: Option<String>,
    pub debug: Option<bool>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Fully resolved process configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub diagram_file: PathBuf,
    pub app_name: String,
    pub debug: bool,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            diagram_file: PathBuf::from(DEFAULT_DIAGRAM_FILE),
            app_name: DEFAULT_APP_NAME.to_string(),
            debug: false,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Locate and read the TOML file (if any), then resolve every field.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        let toml_config = match locate_config_file(overrides.config_file.as_deref())? {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                Some(load_toml_config(&path)?)
            }
            None => {
                info!("No config file found, using defaults");
                None
            }
        };

        Self::resolve(overrides, toml_config.as_ref())
    }

    /// Merge CLI overrides, environment, TOML and compiled defaults.
    pub fn resolve(overrides: &ConfigOverrides, toml_config: Option<&TomlConfig>) -> Result<Self> {
        let defaults = Self::default();
        let toml_config = toml_config.cloned().unwrap_or_default();

        let diagram_file = overrides
            .diagram_file
            .clone()
            .or_else(|| env_string(ENV_DIAGRAM_FILE).map(PathBuf::from))
            .or(toml_config.diagram_file)
            .unwrap_or(defaults.diagram_file);

        let app_name = overrides
            .app_name
            .clone()
            .or_else(|| env_string(ENV_APP_NAME))
            .or(toml_config.app_name)
            .unwrap_or(defaults.app_name);

        let debug = match overrides.debug {
            Some(debug) => debug,
            None => match env_string(ENV_DEBUG) {
                Some(raw) => parse_bool(ENV_DEBUG, &raw)?,
                None => toml_config.debug.unwrap_or(defaults.debug),
            },
        };

        let host = overrides
            .host
            .clone()
            .or_else(|| env_string(ENV_HOST))
            .or(toml_config.host)
            .unwrap_or(defaults.host);

        let port = match overrides.port {
            Some(port) => port,
            None => match env_string(ENV_PORT) {
                Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                    Error::InvalidInput(format!("{} must be a port number, got {:?}", ENV_PORT, raw))
                })?,
                None => toml_config.port.unwrap_or(defaults.port),
            },
        };

        let log_level = if debug {
            "debug".to_string()
        } else {
            toml_config.logging.level
        };

        Ok(Self {
            diagram_file,
            app_name,
            debug,
            host,
            port,
            log_level,
        })
    }
}

/// Find the TOML config file to read, if any
///
/// An explicit path (argument, then `MDV_CONFIG`) must exist. Otherwise the
/// platform config directory is checked for `mdv/config.toml`.
pub fn locate_config_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    let named = explicit
        .map(Path::to_path_buf)
        .or_else(|| env_string(ENV_CONFIG).map(PathBuf::from));

    if let Some(path) = named {
        if path.exists() {
            return Ok(Some(path));
        }
        return Err(Error::NotFound(format!("Config file not found: {}", path.display())));
    }

    let default_path = dirs::config_dir().map(|d| d.join("mdv").join("config.toml"));
    match default_path {
        Some(path) if path.exists() => Ok(Some(path)),
        Some(path) => {
            debug!("Default config file {} does not exist", path.display());
            Ok(None)
        }
        None => Ok(None),
    }
}

/// Read and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str::<TomlConfig>(&content)?;
    Ok(config)
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::InvalidInput(format!(
            "{} must be a boolean, got {:?}",
            name, raw
        ))),
    }
}
