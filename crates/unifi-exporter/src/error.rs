//! Exporter error types with miette diagnostics.
//!
//! Maps config and core errors into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use unifi_exporter_config::ConfigError;
use unifi_exporter_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(unifi_exporter::no_config),
        help("Pass an existing file with --config, or omit it to use {default}")
    )]
    NoConfig { path: String, default: String },

    #[error("No controller password configured")]
    #[diagnostic(
        code(unifi_exporter::no_credentials),
        help(
            "Set UNIFI_PASSWORD, or configure password_file or password\n\
             in the [controller] section of the config file."
        )
    )]
    NoCredentials,

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(unifi_exporter::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(unifi_exporter::config))]
    Config(Box<ConfigError>),

    // ── Runtime ──────────────────────────────────────────────────────
    #[error("Could not listen on {addr}")]
    #[diagnostic(
        code(unifi_exporter::bind),
        help("Check that the address is free, or pick another with --listen.")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not collect from controller at {url}")]
    #[diagnostic(
        code(unifi_exporter::controller_down),
        help(
            "Check the controller URL and credentials; run with -v for details.\n\
             Self-signed certificates need --insecure (-k) or ca_cert."
        )
    )]
    ControllerDown { url: String },

    #[error("Metric exposition failed: {message}")]
    #[diagnostic(code(unifi_exporter::exposition))]
    Exposition { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoConfig { .. } | Self::Validation { .. } => exit_code::USAGE,
            Self::NoCredentials => exit_code::AUTH,
            Self::ControllerDown { .. } => exit_code::CONNECTION,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NotFound { path } => CliError::NoConfig {
                path: path.display().to_string(),
                default: unifi_exporter_config::config_path().display().to_string(),
            },
            ConfigError::NoCredentials => CliError::NoCredentials,
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(Box::new(other)),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::Exposition {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_map_to_usage_and_auth_codes() {
        let missing: CliError = ConfigError::NotFound {
            path: "/etc/unifi-exporter.toml".into(),
        }
        .into();
        assert_eq!(missing.exit_code(), exit_code::USAGE);

        let invalid: CliError = ConfigError::Validation {
            field: "listen".into(),
            reason: "bad".into(),
        }
        .into();
        assert_eq!(invalid.exit_code(), exit_code::USAGE);

        let no_password: CliError = ConfigError::NoCredentials.into();
        assert_eq!(no_password.exit_code(), exit_code::AUTH);
    }

    #[test]
    fn controller_down_is_a_connection_failure() {
        let err = CliError::ControllerDown {
            url: "https://unifi.lan/".into(),
        };
        assert_eq!(err.exit_code(), exit_code::CONNECTION);
        assert!(err.to_string().contains("https://unifi.lan/"));
    }
}
