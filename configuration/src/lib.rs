//! Service configuration: serde defaults, an optional TOML file pointed at
//! by `DICTATION_SERVICE_CONFIG`, and per-field `DICTATION_SERVICE_*`
//! environment overrides layered on top.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub type AppConfig = DictationConfig;

pub const ENV_PREFIX: &str = "DICTATION_SERVICE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DictationConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub codec: CodecSettings,
    #[serde(default)]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodecSettings {
    /// Injected into the codec adapter; never read from global state.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_storage_root")]
    pub root_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for CodecSettings {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            root_dir: default_storage_root(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file `{path}`: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("cannot parse config file `{path}`: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid value for `{key}`: {value}")]
    InvalidOverride { key: String, value: String },
}

pub fn load_config() -> Result<AppConfig, ConfigError> {
    let mut config = match std::env::var(format!("{ENV_PREFIX}_CONFIG")) {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            toml::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })?
        }
        Err(_) => AppConfig::default(),
    };
    apply_env_overrides(&mut config)?;
    Ok(config)
}

fn apply_env_overrides(config: &mut AppConfig) -> Result<(), ConfigError> {
    if let Ok(host) = std::env::var(format!("{ENV_PREFIX}_HOST")) {
        config.server.host = host;
    }
    if let Ok(port) = std::env::var(format!("{ENV_PREFIX}_PORT")) {
        config.server.port = port.parse().map_err(|_| ConfigError::InvalidOverride {
            key: format!("{ENV_PREFIX}_PORT"),
            value: port,
        })?;
    }
    if let Ok(level) = std::env::var(format!("{ENV_PREFIX}_LOG_LEVEL")) {
        config.logging.level = level;
    }
    if let Ok(path) = std::env::var(format!("{ENV_PREFIX}_FFMPEG_PATH")) {
        config.codec.ffmpeg_path = path;
    }
    if let Ok(root) = std::env::var(format!("{ENV_PREFIX}_STORAGE_ROOT")) {
        config.storage.root_dir = root;
    }
    Ok(())
}

/// Installs the global tracing subscriber. `RUST_LOG` wins over the
/// configured level when set.
pub fn setup_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_storage_root() -> String {
    "./data/audio".to_string()
}
