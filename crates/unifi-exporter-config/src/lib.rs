//! Configuration for unifi-exporter.
//!
//! TOML file + environment overrides via figment, password resolution
//! (env + file + plaintext), validation, and translation to
//! `unifi_exporter_core::ControllerConfig`. The binary applies its CLI
//! flag overrides on top of the loaded [`Config`] before translating.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use unifi_exporter_core::{
    ControllerConfig, ControllerPlatform, NetworkFilter, PlatformHint, TlsVerification,
};

/// Prefix for environment overrides, e.g. `UNIFI_EXPORTER_CONTROLLER__URL`.
pub const ENV_PREFIX: &str = "UNIFI_EXPORTER_";

/// Environment variable that takes precedence over any configured password.
pub const PASSWORD_ENV: &str = "UNIFI_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no controller password configured")]
    NoCredentials,

    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read password file {}: {source}", path.display())]
    PasswordFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Config {
    /// Address the metrics endpoint binds to.
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Networks whose stations are exported. Empty exports none.
    #[serde(default)]
    pub networks: Vec<String>,

    #[serde(default)]
    pub controller: ControllerSection,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            networks: Vec::new(),
            controller: ControllerSection::default(),
        }
    }
}

/// The `[controller]` table.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ControllerSection {
    /// Controller base URL (e.g., "https://192.168.1.1").
    pub url: Option<String>,

    #[serde(default = "default_site")]
    pub site: String,

    /// "auto", "unifi-os" or "classic".
    #[serde(default = "default_platform")]
    pub platform: String,

    pub username: Option<String>,

    /// Plaintext password. Prefer `password_file` or `UNIFI_PASSWORD`.
    pub password: Option<String>,

    /// File holding the password; surrounding whitespace is trimmed.
    pub password_file: Option<PathBuf>,

    /// Accept self-signed TLS certificates.
    #[serde(default)]
    pub insecure: bool,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ControllerSection {
    fn default() -> Self {
        Self {
            url: None,
            site: default_site(),
            platform: default_platform(),
            username: None,
            password: None,
            password_file: None,
            insecure: false,
            ca_cert: None,
            timeout: default_timeout(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:9130".into()
}
fn default_site() -> String {
    "default".into()
}
fn default_platform() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    10
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "unifi-exporter", "unifi-exporter").map_or_else(
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
    p.push("unifi-exporter");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config from defaults, the TOML file and the environment.
///
/// An explicit `path` must exist. Without one, the platform config file is
/// read if present and skipped otherwise.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match path {
        Some(path) if !path.exists() => {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Some(path) => path.to_path_buf(),
        None => config_path(),
    };

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Validation & translation ────────────────────────────────────────

impl Config {
    /// Check everything that can be checked without touching the network.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.listen_addr()?;
        self.controller_url()?;
        parse_platform(&self.controller.platform)?;
        if self.controller.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "controller.timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        if self.networks.is_empty() {
            warn!("no networks configured; no station metrics will be exported");
        }
        Ok(())
    }

    /// The parsed `listen` address.
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.listen.parse().map_err(|_| ConfigError::Validation {
            field: "listen".into(),
            reason: format!("not a socket address: {}", self.listen),
        })
    }

    /// The network allow-list.
    pub fn network_filter(&self) -> NetworkFilter {
        self.networks.iter().cloned().collect()
    }

    /// Translate into the core's connection settings, resolving the password.
    pub fn to_controller_config(&self) -> Result<ControllerConfig, ConfigError> {
        self.validate()?;
        let section = &self.controller;

        let username = section
            .username
            .clone()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ConfigError::Validation {
                field: "controller.username".into(),
                reason: "missing".into(),
            })?;
        let password = resolve_password(section)?;

        let tls = if section.insecure {
            TlsVerification::DangerAcceptInvalid
        } else if let Some(ref ca_path) = section.ca_cert {
            TlsVerification::CustomCa(ca_path.clone())
        } else {
            TlsVerification::SystemDefaults
        };

        Ok(ControllerConfig {
            url: self.controller_url()?,
            site: section.site.clone(),
            platform: parse_platform(&section.platform)?,
            username,
            password,
            tls,
            timeout: Duration::from_secs(section.timeout),
        })
    }

    /// The effective config as TOML, with the plaintext password masked.
    pub fn to_redacted_toml(&self) -> Result<String, ConfigError> {
        let mut redacted = self.clone();
        if redacted.controller.password.is_some() {
            redacted.controller.password = Some("****".into());
        }
        Ok(toml::to_string_pretty(&redacted)?)
    }

    fn controller_url(&self) -> Result<url::Url, ConfigError> {
        let raw = self
            .controller
            .url
            .as_deref()
            .ok_or_else(|| ConfigError::Validation {
                field: "controller.url".into(),
                reason: "missing".into(),
            })?;
        raw.parse().map_err(|_| ConfigError::Validation {
            field: "controller.url".into(),
            reason: format!("invalid URL: {raw}"),
        })
    }
}

/// Map the `platform` setting to a core hint.
pub fn parse_platform(value: &str) -> Result<PlatformHint, ConfigError> {
    match value {
        "auto" => Ok(PlatformHint::Auto),
        "unifi-os" => Ok(PlatformHint::Fixed(ControllerPlatform::UnifiOs)),
        "classic" => Ok(PlatformHint::Fixed(ControllerPlatform::ClassicController)),
        other => Err(ConfigError::Validation {
            field: "controller.platform".into(),
            reason: format!("expected 'auto', 'unifi-os', or 'classic', got '{other}'"),
        }),
    }
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the controller password.
///
/// Order: `UNIFI_PASSWORD`, then `password_file`, then plaintext `password`.
pub fn resolve_password(section: &ControllerSection) -> Result<SecretString, ConfigError> {
    // 1. Env var
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        return Ok(SecretString::from(pw));
    }

    // 2. Password file
    if let Some(ref path) = section.password_file {
        let contents =
            std::fs::read_to_string(path).map_err(|source| ConfigError::PasswordFile {
                path: path.clone(),
                source,
            })?;
        return Ok(SecretString::from(contents.trim().to_owned()));
    }

    // 3. Plaintext in config
    if let Some(ref pw) = section.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials)
}
