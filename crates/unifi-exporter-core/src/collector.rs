// ── Collection cycle ──
//
// One scrape: authenticate, fetch stations, filter by network, emit
// samples. Failures never escape `collect()`; they end up in the `up`
// gauge and the log.

use tracing::{debug, error};

use crate::model::{MetricDescriptor, MetricSample, MetricSet, NetworkFilter, Station};
use crate::source::StationSource;

/// Runs the collection cycle against a [`StationSource`].
///
/// The collector holds no per-scrape state, but the source's session is
/// shared: callers must not run two `collect()` calls concurrently on the
/// same source. The HTTP server serializes scrapes for this reason.
#[derive(Debug)]
pub struct Collector<S> {
    source: S,
    metrics: MetricSet,
    networks: NetworkFilter,
}

impl<S: StationSource> Collector<S> {
    pub fn new(source: S, networks: NetworkFilter) -> Self {
        Self {
            source,
            metrics: MetricSet::new(),
            networks,
        }
    }

    /// The station source this collector reads from.
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn networks(&self) -> &NetworkFilter {
        &self.networks
    }

    /// The five exported descriptors, always in the same order.
    pub fn describe(&self) -> [&MetricDescriptor; 5] {
        self.metrics.all()
    }

    /// Run one collection cycle.
    ///
    /// Always returns at least the `up` sample: `up = 0` alone when
    /// authentication fails, `up = 1` followed by station samples
    /// otherwise. A station fetch failure after a successful login yields
    /// `up = 1` and nothing else.
    pub async fn collect(&self) -> Vec<MetricSample<'_>> {
        if let Err(err) = self.source.authenticate().await {
            error!(error = %err, "talking to unifi controller");
            return vec![MetricSample::unlabeled(&self.metrics.up, 0.0)];
        }

        let mut samples = vec![MetricSample::unlabeled(&self.metrics.up, 1.0)];

        let stations = match self.source.stations().await {
            Ok(stations) => stations,
            Err(err) => {
                error!(error = %err, "getting stations");
                return samples;
            }
        };

        let before = samples.len();
        samples.extend(station_samples(&self.metrics, &self.networks, &stations));
        debug!(
            stations = stations.len(),
            samples = samples.len() - before,
            "collected station metrics"
        );
        samples
    }
}

/// Map stations to samples: four per station whose network is in `networks`,
/// none for the rest. Order follows `stations`, then uptime, last-seen,
/// tx bytes, rx bytes.
pub fn station_samples<'a>(
    metrics: &'a MetricSet,
    networks: &NetworkFilter,
    stations: &[Station],
) -> Vec<MetricSample<'a>> {
    let mut samples = Vec::new();
    for station in stations {
        if !networks.contains(&station.network) {
            continue;
        }
        let labels = station.label_values();
        samples.push(MetricSample::new(
            &metrics.uptime,
            labels.clone(),
            widen(station.uptime),
        ));
        samples.push(MetricSample::new(
            &metrics.last_seen,
            labels.clone(),
            widen_signed(station.last_seen),
        ));
        samples.push(MetricSample::new(
            &metrics.tx_bytes,
            labels.clone(),
            widen(station.tx_bytes),
        ));
        samples.push(MetricSample::new(
            &metrics.rx_bytes,
            labels,
            widen(station.rx_bytes),
        ));
    }
    samples
}

// The exposition format carries f64; counters above 2^53 lose precision.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn widen(value: u64) -> f64 {
    value as f64
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn widen_signed(value: i64) -> f64 {
    value as f64
}
