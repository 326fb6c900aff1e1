//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/notekeep/config.toml)
//! 3. Environment variables (NOTEKEEP_* prefix)
//!
//! Environment variables take precedence over config file values.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable prefix
const ENV_PREFIX: &str = "NOTEKEEP";

/// Which medium holds the slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// One JSON file per slot
    #[default]
    File,
    /// A single SQLite database
    Sqlite,
}

impl FromStr for BackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(BackendKind::File),
            "sqlite" => Ok(BackendKind::Sqlite),
            other => bail!("Unknown backend '{}'. Use 'file' or 'sqlite'.", other),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::File => f.write_str("file"),
            BackendKind::Sqlite => f.write_str("sqlite"),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory for data storage (slot files or SQLite db)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Storage backend
    #[serde(default)]
    pub backend: BackendKind,

    /// Write logs to this file instead of stderr
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Reassign notes with an unknown category when opening
    #[serde(default)]
    pub repair_orphans: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            backend: BackendKind::default(),
            log_file: None,
            repair_orphans: false,
        }
    }
}

impl Config {
    /// Load configuration from the default file and the environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (NOTEKEEP_DATA_DIR, NOTEKEEP_BACKEND, ...)
    /// 2. Config file (~/.config/notekeep/config.toml or NOTEKEEP_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring an explicit path from the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from_path(p),
            None => Self::load(),
        }
    }

    /// Load from `path`, or start from defaults when it does not exist
    ///
    /// Environment overrides apply either way and the data directory is
    /// created.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content)
                .with_context(|| format!("Invalid config file {:?}", path))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                return Err(e).with_context(|| format!("Cannot read config file {:?}", path))
            }
        };

        config.apply_env_overrides();
        std::fs::create_dir_all(&config.data_dir)
            .with_context(|| format!("Cannot create data directory {:?}", config.data_dir))?;
        Ok(config)
    }

    /// Parse a TOML document and apply environment overrides
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(toml_content).context("Invalid config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(val) = env_var("DATA_DIR") {
            self.data_dir = PathBuf::from(val);
        }

        if let Some(val) = env_var("BACKEND") {
            match val.parse() {
                Ok(kind) => self.backend = kind,
                Err(e) => tracing::warn!("Ignoring {}_BACKEND: {}", ENV_PREFIX, e),
            }
        }

        // An empty value switches file logging off.
        if let Some(val) = env_var("LOG_FILE") {
            self.log_file = Some(PathBuf::from(val)).filter(|p| !p.as_os_str().is_empty());
        }

        if let Some(val) = env_var("REPAIR_ORPHANS") {
            self.repair_orphans = val.eq_ignore_ascii_case("true") || val == "1";
        }
    }

    /// Write to the default config file
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_file_path())
    }

    /// Write as pretty TOML, creating parent directories
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create config directory {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Cannot serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Cannot write config file {:?}", config_path))
    }

    /// `NOTEKEEP_CONFIG`, else `<config dir>/notekeep/config.toml`
    pub fn config_file_path() -> PathBuf {
        match env_var("CONFIG") {
            Some(path) => PathBuf::from(path),
            None => app_dir(dirs::config_dir()).join("config.toml"),
        }
    }

    /// Database file used by the SQLite backend
    pub fn sqlite_path(&self) -> PathBuf {
        self.data_dir.join("notekeep.db")
    }
}

fn env_var(suffix: &str) -> Option<String> {
    std::env::var(format!("{}_{}", ENV_PREFIX, suffix)).ok()
}

/// `<base>/notekeep`, relative to the working directory when `base` is unknown
fn app_dir(base: Option<PathBuf>) -> PathBuf {
    base.unwrap_or_else(|| PathBuf::from(".")).join("notekeep")
}

fn default_data_dir() -> PathBuf {
    app_dir(dirs::data_local_dir())
}
