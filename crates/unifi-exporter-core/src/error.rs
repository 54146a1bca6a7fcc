// ── Core error types ──
//
// Errors from the collection cycle. Consumers never see HTTP status codes
// or JSON parse failures directly: the `From<unifi_exporter_api::Error>`
// impl folds transport-layer errors into these variants, and the
// collector itself absorbs them into the `up` gauge and the log.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to controller at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Controller request timed out")]
    Timeout,

    // ── Collection errors ────────────────────────────────────────────
    #[error("Failed to fetch stations: {message}")]
    FetchFailed { message: String },

    #[error("API error: {message}")]
    Api { message: String },

    // ── Output errors ────────────────────────────────────────────────
    #[error("Metric exposition failed: {0}")]
    Exposition(String),

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Whether a fresh login could clear this error.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::AuthenticationFailed { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<unifi_exporter_api::Error> for CoreError {
    fn from(err: unifi_exporter_api::Error) -> Self {
        use unifi_exporter_api::Error as ApiError;

        match err {
            ApiError::Authentication { message } => CoreError::AuthenticationFailed { message },
            ApiError::SessionExpired => CoreError::AuthenticationFailed {
                message: "Session expired -- re-authentication required".into(),
            },
            ApiError::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                    }
                }
            }
            ApiError::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            ApiError::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            ApiError::LegacyApi { message } => CoreError::Api { message },
            ApiError::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("Deserialization error: {message}"),
            },
        }
    }
}

impl From<prometheus::Error> for CoreError {
    fn from(err: prometheus::Error) -> Self {
        CoreError::Exposition(err.to_string())
    }
}
