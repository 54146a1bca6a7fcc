// Legacy API client (station) endpoints
//
// Read-only: the exporter only lists connected stations via stat/sta.

use tracing::debug;

use crate::error::Error;
use crate::legacy::client::LegacyClient;
use crate::legacy::models::LegacyClientEntry;

impl LegacyClient {
    /// List all currently connected clients (stations).
    ///
    /// `GET /api/s/{site}/stat/sta`
    pub async fn list_clients(&self) -> Result<Vec<LegacyClientEntry>, Error> {
        let url = self.site_url("stat/sta")?;
        debug!("listing connected clients");
        self.get(url).await
    }
}
