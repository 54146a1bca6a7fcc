// ── Metric descriptors and samples ──

/// Label names carried by every per-station metric, in emission order.
pub const STATION_LABELS: &[&str] = &["mac", "hostname", "network", "manufacturer", "wired", "ip"];

/// Value kind of an exported metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Gauge,
    Counter,
}

/// Immutable definition of one exported metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDescriptor {
    pub name: &'static str,
    pub help: &'static str,
    pub labels: &'static [&'static str],
    pub kind: MetricKind,
}

impl MetricDescriptor {
    pub const fn new(
        name: &'static str,
        help: &'static str,
        labels: &'static [&'static str],
        kind: MetricKind,
    ) -> Self {
        Self {
            name,
            help,
            labels,
            kind,
        }
    }
}

/// One value emitted for a descriptor during a scrape.
///
/// Borrows its descriptor from the [`MetricSet`] owned by the collector.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample<'a> {
    pub descriptor: &'a MetricDescriptor,
    pub label_values: Vec<String>,
    pub value: f64,
}

impl<'a> MetricSample<'a> {
    /// Build a sample; `label_values` must line up with `descriptor.labels`.
    ///
    /// The arity check here runs in debug builds only; `render` rejects a
    /// mismatched sample in every build.
    pub fn new(descriptor: &'a MetricDescriptor, label_values: Vec<String>, value: f64) -> Self {
        debug_assert_eq!(
            label_values.len(),
            descriptor.labels.len(),
            "label arity mismatch for {}",
            descriptor.name
        );
        Self {
            descriptor,
            label_values,
            value,
        }
    }

    /// A sample for a descriptor without labels.
    pub fn unlabeled(descriptor: &'a MetricDescriptor, value: f64) -> Self {
        Self::new(descriptor, Vec::new(), value)
    }

    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    /// `(label name, label value)` pairs in declared order.
    pub fn labels(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.descriptor
            .labels
            .iter()
            .copied()
            .zip(self.label_values.iter().map(String::as_str))
    }
}

/// The fixed descriptor set exported by the collector.
///
/// Built once at startup and shared by reference with every sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSet {
    pub up: MetricDescriptor,
    pub uptime: MetricDescriptor,
    pub last_seen: MetricDescriptor,
    pub tx_bytes: MetricDescriptor,
    pub rx_bytes: MetricDescriptor,
}

impl MetricSet {
    pub fn new() -> Self {
        Self {
            up: MetricDescriptor::new(
                "up",
                "was talking to the Unifi controller successful",
                &[],
                MetricKind::Gauge,
            ),
            uptime: MetricDescriptor::new(
                "unifi_station_uptime_seconds",
                "uptime of device connected to Unifi controller's network",
                STATION_LABELS,
                MetricKind::Counter,
            ),
            last_seen: MetricDescriptor::new(
                "unifi_station_last_seen",
                "unix time when a device was last seen by the Unifi controller",
                STATION_LABELS,
                MetricKind::Counter,
            ),
            tx_bytes: MetricDescriptor::new(
                "unifi_station_tx_bytes",
                "bytes sent to the station",
                STATION_LABELS,
                MetricKind::Counter,
            ),
            rx_bytes: MetricDescriptor::new(
                "unifi_station_rx_bytes",
                "bytes received from the station",
                STATION_LABELS,
                MetricKind::Counter,
            ),
        }
    }

    /// All descriptors: availability first, then the per-station metrics
    /// in emission order.
    pub fn all(&self) -> [&MetricDescriptor; 5] {
        [
            &self.up,
            &self.uptime,
            &self.last_seen,
            &self.tx_bytes,
            &self.rx_bytes,
        ]
    }
}

impl Default for MetricSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn station_descriptors_share_label_list() {
        let set = MetricSet::new();
        for descriptor in &set.all()[1..] {
            assert_eq!(descriptor.labels, STATION_LABELS);
            assert_eq!(descriptor.kind, MetricKind::Counter);
        }
        assert!(set.up.labels.is_empty());
        assert_eq!(set.up.kind, MetricKind::Gauge);
    }

    #[test]
    fn sample_labels_pair_names_with_values() {
        let set = MetricSet::new();
        let sample = MetricSample::new(
            &set.tx_bytes,
            ["m", "h", "n", "v", "false", "ip"]
                .map(String::from)
                .to_vec(),
            1.0,
        );
        let pairs: Vec<_> = sample.labels().collect();
        assert_eq!(pairs[0], ("mac", "m"));
        assert_eq!(pairs[4], ("wired", "false"));
        assert_eq!(pairs.len(), 6);
        assert_eq!(sample.name(), "unifi_station_tx_bytes");
    }
}
