// unifi-exporter-api: Async client for the UniFi controller's session API
//
// Only the slice of the legacy API the exporter needs: cookie login with
// platform detection, the station list, and network configuration.

pub mod auth;
pub mod error;
pub mod legacy;
pub mod transport;

pub use auth::ControllerPlatform;
pub use error::Error;
pub use legacy::LegacyClient;
pub use legacy::models::{LegacyClientEntry, LegacyNetwork, LegacySelf};
pub use transport::{TlsMode, TransportConfig};
