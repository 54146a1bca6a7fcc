// ── Prometheus text exposition ──
//
// Turns one scrape's samples into the text format. A fresh registry per
// scrape keeps series from previous scrapes out of the output.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use prometheus::{CounterVec, Encoder, GaugeVec, Opts, Registry, TextEncoder};
use tracing::warn;

use crate::error::CoreError;
use crate::model::{MetricDescriptor, MetricKind, MetricSample};

/// `Content-Type` of the rendered body.
pub const CONTENT_TYPE: &str = prometheus::TEXT_FORMAT;

enum Family {
    Gauge(GaugeVec),
    Counter(CounterVec),
}

impl Family {
    fn register(registry: &Registry, descriptor: &MetricDescriptor) -> Result<Self, CoreError> {
        let opts = Opts::new(descriptor.name, descriptor.help);
        let family = match descriptor.kind {
            MetricKind::Gauge => {
                let vec = GaugeVec::new(opts, descriptor.labels)?;
                registry.register(Box::new(vec.clone()))?;
                Family::Gauge(vec)
            }
            MetricKind::Counter => {
                let vec = CounterVec::new(opts, descriptor.labels)?;
                registry.register(Box::new(vec.clone()))?;
                Family::Counter(vec)
            }
        };
        Ok(family)
    }

    fn observe(&self, label_values: &[&str], value: f64) -> Result<(), CoreError> {
        match self {
            Family::Gauge(vec) => vec.get_metric_with_label_values(label_values)?.set(value),
            // Counters start at zero; a counter can only be raised.
            Family::Counter(vec) => vec
                .get_metric_with_label_values(label_values)?
                .inc_by(value.max(0.0)),
        }
        Ok(())
    }
}

/// Render samples in the Prometheus text format.
///
/// Families come out sorted by name with series sorted by label values,
/// as the encoder orders them. Counter names are written verbatim.
///
/// A sample repeating the name and label values of an earlier one is
/// dropped; only the first is exported. A sample whose label count does not
/// match its descriptor fails the render.
pub fn render(samples: &[MetricSample<'_>]) -> Result<String, CoreError> {
    let registry = Registry::new();
    let mut families: HashMap<&'static str, Family> = HashMap::new();
    let mut seen: HashSet<(&'static str, &[String])> = HashSet::new();

    for sample in samples {
        if !seen.insert((sample.name(), sample.label_values.as_slice())) {
            warn!(
                metric = sample.name(),
                labels = ?sample.label_values,
                "duplicate series, keeping the first value"
            );
            continue;
        }
        let family = match families.entry(sample.name()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(Family::register(&registry, sample.descriptor)?),
        };
        let values: Vec<&str> = sample.label_values.iter().map(String::as_str).collect();
        family.observe(&values, sample.value)?;
    }

    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| CoreError::Exposition(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::station_samples;
    use crate::model::{MetricSet, NetworkFilter, Station};

    fn scenario_a(metrics: &MetricSet) -> Vec<MetricSample<'_>> {
        let station = Station {
            mac: "AA:BB".into(),
            hostname: "h1".into(),
            network: "main".into(),
            manufacturer: "Acme".into(),
            wired: true,
            ip: "10.0.0.5".into(),
            uptime: 120,
            last_seen: 1_700_000_000,
            tx_bytes: 500,
            rx_bytes: 200,
        };
        let mut samples = vec![MetricSample::unlabeled(&metrics.up, 1.0)];
        samples.extend(station_samples(
            metrics,
            &NetworkFilter::new(["main"]),
            &[station],
        ));
        samples
    }

    fn series<'t>(text: &'t str, name: &str) -> Vec<&'t str> {
        text.lines()
            .filter(|line| {
                line.strip_prefix(name)
                    .is_some_and(|rest| rest.starts_with('{') || rest.starts_with(' '))
            })
            .collect()
    }

    #[test]
    fn availability_only() {
        let metrics = MetricSet::new();
        let text = render(&[MetricSample::unlabeled(&metrics.up, 0.0)]).expect("render");

        assert!(text.contains("# HELP up was talking to the Unifi controller successful"));
        assert!(text.contains("# TYPE up gauge"));
        assert_eq!(series(&text, "up"), ["up 0"]);
        assert!(!text.contains("unifi_station"));
    }

    #[test]
    fn station_series_carry_all_labels() {
        let metrics = MetricSet::new();
        let text = render(&scenario_a(&metrics)).expect("render");

        assert_eq!(series(&text, "up"), ["up 1"]);
        for (name, value) in [
            ("unifi_station_uptime_seconds", "120"),
            ("unifi_station_last_seen", "1700000000"),
            ("unifi_station_tx_bytes", "500"),
            ("unifi_station_rx_bytes", "200"),
        ] {
            assert!(text.contains(&format!("# TYPE {name} counter")), "{text}");
            let lines = series(&text, name);
            assert_eq!(lines.len(), 1, "{text}");
            let line = lines[0];
            assert!(line.ends_with(&format!(" {value}")), "{line}");
            for label in [
                "mac=\"AA:BB\"",
                "hostname=\"h1\"",
                "network=\"main\"",
                "manufacturer=\"Acme\"",
                "wired=\"true\"",
                "ip=\"10.0.0.5\"",
            ] {
                assert!(line.contains(label), "{line} lacks {label}");
            }
        }
    }

    #[test]
    fn repeated_station_is_exported_once() {
        let metrics = MetricSet::new();
        let mut samples = scenario_a(&metrics);
        let mut again = scenario_a(&metrics).split_off(1);
        again[0].value = 999.0;
        samples.extend(again);

        let text = render(&samples).expect("render");

        assert_eq!(series(&text, "up"), ["up 1"]);
        for (name, value) in [
            ("unifi_station_uptime_seconds", "120"),
            ("unifi_station_tx_bytes", "500"),
        ] {
            let lines = series(&text, name);
            assert_eq!(lines.len(), 1, "{text}");
            assert!(lines[0].ends_with(&format!(" {value}")), "{}", lines[0]);
        }
    }

    #[test]
    fn label_count_mismatch_fails_render() {
        let metrics = MetricSet::new();
        let sample = MetricSample {
            descriptor: &metrics.tx_bytes,
            label_values: vec!["AA:BB".into()],
            value: 1.0,
        };

        let err = render(&[sample]).expect_err("arity mismatch");
        assert!(matches!(err, CoreError::Exposition(_)), "{err:?}");
    }

    #[test]
    fn counter_names_get_no_suffix() {
        let metrics = MetricSet::new();
        let text = render(&scenario_a(&metrics)).expect("render");
        assert!(!text.contains("_total"));
    }

    #[test]
    fn nothing_to_render() {
        assert_eq!(render(&[]).expect("render"), "");
    }
}
