//! Collection cycle between `unifi-exporter-api` and the metrics endpoint.
//!
//! - **[`Collector`]** -- Runs one scrape: authenticate, fetch stations,
//!   filter them by [`NetworkFilter`], emit [`MetricSample`]s. Failures are
//!   absorbed into the `up` gauge and the log, never returned.
//!
//! - **[`StationSource`]** -- The two-call seam (`authenticate`, `stations`)
//!   the collector drives. [`ControllerSession`] implements it over the
//!   controller's cookie session; tests use fakes.
//!
//! - **[`exposition`]** -- Renders a scrape's samples in the Prometheus text
//!   format.
//!
//! - **Domain model** ([`model`]) -- [`Station`], [`MetricDescriptor`],
//!   [`MetricSet`] and friends.

pub mod collector;
pub mod config;
pub mod convert;
pub mod error;
pub mod exposition;
pub mod model;
pub mod session;
pub mod source;

// ── Primary re-exports ──────────────────────────────────────────────
pub use collector::Collector;
pub use config::{ControllerConfig, PlatformHint, TlsVerification};
pub use error::CoreError;
pub use model::{
    MetricDescriptor, MetricKind, MetricSample, MetricSet, NetworkFilter, STATION_LABELS, Station,
};
pub use session::ControllerSession;
pub use source::StationSource;

pub use unifi_exporter_api::ControllerPlatform;
