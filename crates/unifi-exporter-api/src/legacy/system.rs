// Legacy API session endpoints
//
// `/api/self` is controller-scoped and cheap; a successful answer means
// the session cookie is still valid.

use tracing::debug;

use crate::error::Error;
use crate::legacy::client::LegacyClient;
use crate::legacy::models::LegacySelf;

impl LegacyClient {
    /// Fetch the logged-in admin.
    ///
    /// `GET /api/self`. Fails with [`Error::Authentication`] or
    /// [`Error::SessionExpired`] when the session is no longer valid.
    pub async fn self_info(&self) -> Result<Option<LegacySelf>, Error> {
        let url = self.api_url("self")?;
        debug!("checking session");
        let mut data: Vec<LegacySelf> = self.get(url).await?;
        Ok(data.pop())
    }
}
