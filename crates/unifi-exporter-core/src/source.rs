// ── Station source seam ──
//
// The two calls the collector makes against the controller. The real
// implementation is `ControllerSession`; tests plug in fakes.

use std::future::Future;

use crate::error::CoreError;
use crate::model::Station;

/// A controller the collector can authenticate against and read stations from.
pub trait StationSource: Send + Sync {
    /// Make sure a usable session exists.
    ///
    /// Called on every scrape, so implementations must be cheap when the
    /// session is already valid and idempotent when it is not.
    fn authenticate(&self) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// The full current station list with network names resolved.
    fn stations(&self) -> impl Future<Output = Result<Vec<Station>, CoreError>> + Send;
}

impl<T: StationSource> StationSource for std::sync::Arc<T> {
    fn authenticate(&self) -> impl Future<Output = Result<(), CoreError>> + Send {
        T::authenticate(self)
    }

    fn stations(&self) -> impl Future<Output = Result<Vec<Station>, CoreError>> + Send {
        T::stations(self)
    }
}
