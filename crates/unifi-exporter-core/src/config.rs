// ── Runtime connection configuration ──
//
// These types describe *how* to connect to a UniFi controller.
// They carry credential data and connection tuning, but never touch disk.
// The binary constructs a `ControllerConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use unifi_exporter_api::{ControllerPlatform, TlsMode, TransportConfig};

/// Which controller platform to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlatformHint {
    /// Probe the controller on first authentication.
    #[default]
    Auto,
    /// Force a specific platform.
    Fixed(ControllerPlatform),
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed certs). Opt-in only.
    DangerAcceptInvalid,
}

/// Configuration for connecting to a single controller.
///
/// Built by the binary, passed to `ControllerSession` -- core never reads
/// config files.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Controller URL (e.g., `https://192.168.1.1`).
    pub url: Url,
    /// Site to read stations from (defaults to "default").
    pub site: String,
    /// Platform, or `Auto` to detect it.
    pub platform: PlatformHint,
    /// Session login user.
    pub username: String,
    /// Session login password.
    pub password: SecretString,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ControllerConfig {
    /// Transport settings for the API client.
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
            cookie_jar: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tls_verification_is_strict_by_default() {
        assert_eq!(TlsVerification::default(), TlsVerification::SystemDefaults);
    }

    #[test]
    fn transport_carries_tls_mode_and_timeout() {
        let config = ControllerConfig {
            url: Url::parse("https://unifi.lan").expect("url"),
            site: "default".into(),
            platform: PlatformHint::default(),
            username: "exporter".into(),
            password: "hunter2".to_string().into(),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(7),
        };

        let transport = config.transport();

        assert!(matches!(transport.tls, TlsMode::System));
        assert_eq!(transport.timeout, Duration::from_secs(7));
        assert!(transport.cookie_jar.is_none());
    }
}
