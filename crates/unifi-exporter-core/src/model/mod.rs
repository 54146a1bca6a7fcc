// ── Domain model ──
//
// Stations as the collector sees them, the network allow-list, and the
// metric descriptor/sample pair the collector emits.

pub mod filter;
pub mod metric;
pub mod station;

pub use filter::NetworkFilter;
pub use metric::{MetricDescriptor, MetricKind, MetricSample, MetricSet, STATION_LABELS};
pub use station::Station;
