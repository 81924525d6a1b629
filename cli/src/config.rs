//! Layered configuration: CLI flag > environment > TOML file > defaults.
//!
//! The file lives at `~/.config/taskdesk/config.toml` unless `--config`
//! points elsewhere. A missing default file is fine; a missing explicit
//! file is an error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use taskdesk_core::api::http::DEFAULT_BASE_URL;
use taskdesk_core::client::messages::{DEFAULT_ERROR_TTL, DEFAULT_SUCCESS_TTL};
use taskdesk_core::{HttpConfig, Messages};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    api: ApiFileConfig,
    ui: UiFileConfig,
}

/// `[api]`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiFileConfig {
    url: Option<String>,
    timeout_secs: Option<u64>,
    connect_timeout_secs: Option<u64>,
}

/// `[ui]`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UiFileConfig {
    error_secs: Option<u64>,
    success_secs: Option<u64>,
    poll_ms: Option<u64>,
}

/// Options shared by every subcommand.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct GlobalArgs {
    /// Base URL of the task API.
    #[arg(long, env = "TASKDESK_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Path to config file (default: `~/.config/taskdesk/config.toml`).
    #[arg(short, long, env = "TASKDESK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn", env = "TASKDESK_LOG", global = true)]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/taskdesk.log`).
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub error_ttl: Duration,
    pub success_ttl: Duration,
    pub poll_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            error_ttl: DEFAULT_ERROR_TTL,
            success_ttl: DEFAULT_SUCCESS_TTL,
            poll_timeout: Duration::from_millis(250),
        }
    }
}

impl AppConfig {
    pub fn load(args: &GlobalArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(args.config.as_deref())?;
        Ok(Self::resolve(args, &file))
    }

    fn resolve(args: &GlobalArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            api_url: args
                .api_url
                .clone()
                .or_else(|| file.api.url.clone())
                .unwrap_or(defaults.api_url),
            timeout: file
                .api
                .timeout_secs
                .map_or(defaults.timeout, Duration::from_secs),
            connect_timeout: file
                .api
                .connect_timeout_secs
                .map_or(defaults.connect_timeout, Duration::from_secs),
            error_ttl: file
                .ui
                .error_secs
                .map_or(defaults.error_ttl, Duration::from_secs),
            success_ttl: file
                .ui
                .success_secs
                .map_or(defaults.success_ttl, Duration::from_secs),
            poll_timeout: file
                .ui
                .poll_ms
                .map_or(defaults.poll_timeout, Duration::from_millis),
        }
    }

    pub fn http(&self) -> HttpConfig {
        HttpConfig {
            base_url: self.api_url.clone(),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
        }
    }

    pub fn messages(&self) -> Messages {
        Messages::new(self.error_ttl, self.success_ttl)
    }
}

fn load_config_file(explicit_path: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    if let Some(path) = explicit_path {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        return Ok(toml::from_str(&contents)?);
    }

    let Some(config_dir) = dirs::config_dir() else {
        return Ok(ConfigFile::default());
    };
    let path = config_dir.join("taskdesk").join("config.toml");

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(source) => Err(ConfigError::ReadFile { path, source }),
    }
}
