// ── Controller session ──
//
// `StationSource` over the legacy API. Owns the one cookie session the
// exporter holds against the controller: platform detection happens on
// the first authentication, later scrapes only validate the session and
// log in again when the controller has dropped it.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use unifi_exporter_api::{Error as ApiError, LegacyClient};

use crate::config::{ControllerConfig, PlatformHint};
use crate::convert::{NetworkNames, needs_network_lookup, network_names, station_from_legacy};
use crate::error::CoreError;
use crate::model::Station;
use crate::source::StationSource;

/// A lazily connected, self-renewing session against one controller site.
pub struct ControllerSession {
    config: ControllerConfig,
    client: OnceCell<LegacyClient>,
    logged_in: AtomicBool,
}

impl ControllerSession {
    /// Create a session. No network traffic happens until the first
    /// [`authenticate`](StationSource::authenticate).
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
            logged_in: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Whether the last login is believed to still be valid.
    pub fn is_logged_in(&self) -> bool {
        self.logged_in.load(Ordering::Acquire)
    }

    /// End the controller session, if one is open. Best effort.
    pub async fn logout(&self) {
        let Some(client) = self.client.get() else {
            return;
        };
        if !self.logged_in.swap(false, Ordering::AcqRel) {
            return;
        }
        match client.logout().await {
            Ok(()) => info!("logged out of controller"),
            Err(err) => warn!(error = %err, "controller logout failed"),
        }
    }

    /// The API client, built on first use.
    async fn client(&self) -> Result<&LegacyClient, CoreError> {
        self.client
            .get_or_try_init(|| async {
                let transport = self.config.transport();
                let platform = match self.config.platform {
                    PlatformHint::Fixed(platform) => platform,
                    PlatformHint::Auto => {
                        let platform =
                            LegacyClient::detect_platform(&self.config.url, &transport).await?;
                        info!(%platform, url = %self.config.url, "detected controller platform");
                        platform
                    }
                };
                let client = LegacyClient::new(
                    self.config.url.clone(),
                    self.config.site.clone(),
                    platform,
                    &transport,
                )?;
                Ok::<_, CoreError>(client)
            })
            .await
    }

    async fn login(&self, client: &LegacyClient) -> Result<(), CoreError> {
        client
            .login(&self.config.username, &self.config.password)
            .await
            .map_err(|err| into_auth_failure(err.into()))?;
        self.logged_in.store(true, Ordering::Release);
        info!(
            username = %self.config.username,
            site = %self.config.site,
            "logged in to controller"
        );
        Ok(())
    }

    /// Record a failed request; an auth failure forces a login next scrape.
    fn fetch_failed(&self, err: &ApiError) -> CoreError {
        if err.is_auth_expired() {
            self.logged_in.store(false, Ordering::Release);
        }
        CoreError::FetchFailed {
            message: err.to_string(),
        }
    }

    async fn resolve_networks(&self, client: &LegacyClient) -> NetworkNames {
        match client.list_networks().await {
            Ok(networks) => network_names(networks),
            Err(err) => {
                warn!(error = %err, "listing networks; stations without a network name are skipped");
                NetworkNames::new()
            }
        }
    }
}

impl StationSource for ControllerSession {
    async fn authenticate(&self) -> Result<(), CoreError> {
        let client = self.client().await.map_err(into_auth_failure)?;

        if self.is_logged_in() {
            match client.self_info().await {
                Ok(_) => {
                    debug!("controller session still valid");
                    return Ok(());
                }
                Err(err) if err.is_auth_expired() => {
                    info!("controller session expired, logging in again");
                    self.logged_in.store(false, Ordering::Release);
                }
                Err(err) => return Err(into_auth_failure(err.into())),
            }
        }

        self.login(client).await
    }

    async fn stations(&self) -> Result<Vec<Station>, CoreError> {
        let client = self.client.get().ok_or_else(|| CoreError::AuthenticationFailed {
            message: "no controller session".into(),
        })?;

        let entries = client
            .list_clients()
            .await
            .map_err(|err| self.fetch_failed(&err))?;

        let names = if needs_network_lookup(&entries) {
            self.resolve_networks(client).await
        } else {
            NetworkNames::new()
        };

        debug!(count = entries.len(), "fetched stations");
        Ok(entries
            .into_iter()
            .map(|entry| station_from_legacy(entry, &names))
            .collect())
    }
}

/// A session that cannot be established is an authentication failure,
/// whether the controller refused it or could not be reached.
fn into_auth_failure(err: CoreError) -> CoreError {
    if err.is_auth() {
        err
    } else {
        CoreError::AuthenticationFailed {
            message: err.to_string(),
        }
    }
}

impl std::fmt::Debug for ControllerSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerSession")
            .field("url", &self.config.url.as_str())
            .field("site", &self.config.site)
            .field("logged_in", &self.is_logged_in())
            .finish_non_exhaustive()
    }
}
