// Legacy API network configuration endpoints
//
// Used to resolve a station's `network_id` into a network name when
// the controller omits the `network` field from stat/sta.

use tracing::debug;

use crate::error::Error;
use crate::legacy::client::LegacyClient;
use crate::legacy::models::LegacyNetwork;

impl LegacyClient {
    /// List all configured networks for the site.
    ///
    /// `GET /api/s/{site}/rest/networkconf`
    pub async fn list_networks(&self) -> Result<Vec<LegacyNetwork>, Error> {
        let url = self.site_url("rest/networkconf")?;
        debug!("listing network configurations");
        self.get(url).await
    }
}
