// ── API-to-domain type conversions ──
//
// Bridges raw `unifi_exporter_api` response types into the `Station`
// snapshot the collector consumes. Missing strings become empty,
// missing or negative counters become zero.

use std::collections::HashMap;

use unifi_exporter_api::{LegacyClientEntry, LegacyNetwork};

use crate::model::Station;

/// Network id -> network name, built from `rest/networkconf`.
pub type NetworkNames = HashMap<String, String>;

/// Index networks by id, skipping entries without a name.
pub fn network_names(networks: Vec<LegacyNetwork>) -> NetworkNames {
    networks
        .into_iter()
        .filter_map(|n| n.name.map(|name| (n.id, name)))
        .collect()
}

/// Whether any station has to have its network resolved via `network_id`.
pub fn needs_network_lookup(entries: &[LegacyClientEntry]) -> bool {
    entries
        .iter()
        .any(|e| e.network.as_deref().is_none_or(str::is_empty) && e.network_id.is_some())
}

/// Convert a `stat/sta` entry into a [`Station`].
///
/// The network name comes from the entry itself when present, otherwise
/// from `names` by `network_id`.
pub fn station_from_legacy(entry: LegacyClientEntry, names: &NetworkNames) -> Station {
    let network = entry
        .network
        .filter(|n| !n.is_empty())
        .or_else(|| {
            entry
                .network_id
                .as_ref()
                .and_then(|id| names.get(id).cloned())
        })
        .unwrap_or_default();

    Station {
        mac: entry.mac,
        hostname: entry.hostname.unwrap_or_default(),
        network,
        manufacturer: entry.oui.unwrap_or_default(),
        wired: entry.is_wired.unwrap_or(false),
        ip: entry.ip.unwrap_or_default(),
        uptime: non_negative(entry.uptime),
        last_seen: entry.last_seen.unwrap_or(0),
        tx_bytes: non_negative(entry.tx_bytes.or(entry.wired_tx_bytes)),
        rx_bytes: non_negative(entry.rx_bytes.or(entry.wired_rx_bytes)),
    }
}

fn non_negative(value: Option<i64>) -> u64 {
    value.and_then(|v| u64::try_from(v).ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn entry(value: serde_json::Value) -> LegacyClientEntry {
        serde_json::from_value(value).expect("valid stat/sta entry")
    }

    #[test]
    fn full_entry_maps_every_field() {
        let station = station_from_legacy(
            entry(json!({
                "_id": "sta1",
                "mac": "AA:BB",
                "hostname": "h1",
                "network": "main",
                "oui": "Acme",
                "is_wired": true,
                "ip": "10.0.0.5",
                "uptime": 120,
                "last_seen": 1_700_000_000,
                "tx_bytes": 500,
                "rx_bytes": 200
            })),
            &NetworkNames::new(),
        );

        assert_eq!(
            station,
            Station {
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
            }
        );
    }

    #[test]
    fn missing_fields_default_to_empty_and_zero() {
        let station = station_from_legacy(entry(json!({ "mac": "aa" })), &NetworkNames::new());
        assert_eq!(station.hostname, "");
        assert_eq!(station.network, "");
        assert_eq!(station.manufacturer, "");
        assert!(!station.wired);
        assert_eq!(station.uptime, 0);
        assert_eq!(station.last_seen, 0);
    }

    #[test]
    fn negative_counters_clamp_to_zero() {
        let station = station_from_legacy(
            entry(json!({ "mac": "aa", "uptime": -5, "tx_bytes": -1 })),
            &NetworkNames::new(),
        );
        assert_eq!(station.uptime, 0);
        assert_eq!(station.tx_bytes, 0);
    }

    #[test]
    fn wired_counters_fill_in_missing_traffic() {
        let station = station_from_legacy(
            entry(json!({
                "mac": "aa",
                "is_wired": true,
                "wired-tx_bytes": 9000,
                "wired-rx_bytes": 8000
            })),
            &NetworkNames::new(),
        );
        assert_eq!(station.tx_bytes, 9000);
        assert_eq!(station.rx_bytes, 8000);
    }

    #[test]
    fn network_resolved_by_id_when_name_missing() {
        let names = network_names(vec![
            serde_json::from_value(json!({ "_id": "net1", "name": "main" })).expect("network"),
            serde_json::from_value(json!({ "_id": "net2" })).expect("network"),
        ]);
        assert_eq!(names.len(), 1);

        let entries = vec![entry(json!({ "mac": "aa", "network_id": "net1" }))];
        assert!(needs_network_lookup(&entries));

        let station = station_from_legacy(
            entries.into_iter().next().expect("one entry"),
            &names,
        );
        assert_eq!(station.network, "main");
    }

    #[test]
    fn entry_network_wins_over_lookup() {
        let mut names = NetworkNames::new();
        names.insert("net1".into(), "other".into());
        let station = station_from_legacy(
            entry(json!({ "mac": "aa", "network": "main", "network_id": "net1" })),
            &names,
        );
        assert_eq!(station.network, "main");
    }

    #[test]
    fn lookup_not_needed_when_all_networks_present() {
        let entries = vec![
            entry(json!({ "mac": "aa", "network": "main", "network_id": "net1" })),
            entry(json!({ "mac": "bb" })),
        ];
        assert!(!needs_network_lookup(&entries));
    }
}
