//! Configuration for the GreenPulse server.
//!
//! Layered loading (defaults, TOML file, environment), credential
//! resolution for the classification provider, and translation into
//! `greenpulse_core::MonitorConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use indexmap::IndexMap;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use greenpulse_core::MonitorConfig;
use greenpulse_core::config::DEFAULT_VISION_ENDPOINT;

/// Environment variable consulted for the provider key when the config
/// names no other variable.
pub const API_KEY_ENV: &str = "GREENPULSE_VISION_API_KEY";

const ENV_PREFIX: &str = "GREENPULSE_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no vision API key configured (set {API_KEY_ENV} or vision.api_key)")]
    NoCredentials,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        field: field.into(),
        reason: reason.into(),
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerSettings,
    pub vision: VisionSettings,
    pub images: ImageSettings,
    pub alerts: AlertSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
        }
    }
}

impl ServerSettings {
    /// `host:port`, suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Classification provider settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VisionSettings {
    /// Provider root URL.
    pub endpoint: String,

    /// API key (plaintext; prefer an environment variable).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Name of an environment variable holding the API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for VisionSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_VISION_ENDPOINT.into(),
            api_key: None,
            api_key_env: None,
            timeout: 8,
        }
    }
}

/// Reference image settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ImageSettings {
    /// Fetch timeout in seconds.
    pub timeout: u64,

    /// Warm the image cache on startup.
    pub preload: bool,

    /// Room code to image URL.
    pub rooms: IndexMap<String, String>,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            timeout: 8,
            preload: true,
            rooms: greenpulse_core::seed::default_room_images()
                .into_iter()
                .map(|(code, url)| (code, url.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AlertSettings {
    /// Maximum alerts retained, newest first.
    pub capacity: usize,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            capacity: greenpulse_core::store::DEFAULT_ALERT_CAPACITY,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "greenpulse", "greenpulse").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("greenpulse");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// The layered provider stack: defaults, then `path`, then
/// `GREENPULSE_*` variables (`__` separates sections), then a bare `PORT`.
pub fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .merge(Env::raw().only(&["PORT"]).map(|_| "server.port".into()))
}

/// Load the full Config from file + environment.
///
/// An explicit `path` must exist; the default location may be absent.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match path {
        Some(p) if !p.exists() => {
            return Err(invalid(
                "config",
                format!("file not found: {}", p.display()),
            ));
        }
        Some(p) => p.to_path_buf(),
        None => config_path(),
    };

    let config: Config = figment(&path).extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it, returning the path written.
pub fn save_config(cfg: &Config, path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(path)
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the provider API key.
///
/// Order: the variable named by `vision.api_key_env`, then
/// [`API_KEY_ENV`], then the plaintext `vision.api_key`.
pub fn resolve_api_key(vision: &VisionSettings) -> Result<SecretString, ConfigError> {
    if let Some(ref env_name) = vision.api_key_env {
        if let Some(val) = non_empty_env(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    if let Some(val) = non_empty_env(API_KEY_ENV) {
        return Ok(SecretString::from(val));
    }

    if let Some(ref key) = vision.api_key {
        if !key.is_empty() {
            return Ok(SecretString::from(key.clone()));
        }
    }

    Err(ConfigError::NoCredentials)
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

// ── Translation ─────────────────────────────────────────────────────

/// Build a `MonitorConfig`, resolving credentials and validating values.
pub fn to_monitor_config(cfg: &Config) -> Result<MonitorConfig, ConfigError> {
    let vision_endpoint: Url = cfg
        .vision
        .endpoint
        .parse()
        .map_err(|_| invalid("vision.endpoint", format!("invalid URL: {}", cfg.vision.endpoint)))?;

    if cfg.vision.timeout == 0 {
        return Err(invalid("vision.timeout", "must be at least 1 second"));
    }
    if cfg.images.timeout == 0 {
        return Err(invalid("images.timeout", "must be at least 1 second"));
    }
    if cfg.alerts.capacity == 0 {
        return Err(invalid("alerts.capacity", "must be at least 1"));
    }

    let room_images = cfg
        .images
        .rooms
        .iter()
        .map(|(code, raw)| {
            let url: Url = raw
                .parse()
                .map_err(|_| invalid(&format!("images.rooms.{code}"), format!("invalid URL: {raw}")))?;
            Ok((code.to_ascii_uppercase(), url))
        })
        .collect::<Result<IndexMap<_, _>, ConfigError>>()?;

    Ok(MonitorConfig {
        vision_endpoint,
        vision_api_key: resolve_api_key(&cfg.vision)?,
        vision_timeout: Duration::from_secs(cfg.vision.timeout),
        image_timeout: Duration::from_secs(cfg.images.timeout),
        room_images,
        preload_images: cfg.images.preload,
        alert_capacity: cfg.alerts.capacity,
    })
}
