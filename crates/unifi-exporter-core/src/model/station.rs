// ── Station domain type ──

/// Snapshot of one device connected to the controller.
///
/// Produced fresh on every scrape; string fields the controller omitted
/// are empty and counters it omitted are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Station {
    pub mac: String,
    pub hostname: String,
    pub network: String,
    pub manufacturer: String,
    pub wired: bool,
    pub ip: String,
    /// Seconds since the station associated.
    pub uptime: u64,
    /// Unix timestamp of the last time the controller saw the station.
    pub last_seen: i64,
    pub tx_bytes: u64,
    pub rx_bytes: u64,
}

impl Station {
    /// The `wired` label value: `"true"` or `"false"`.
    pub fn wired_label(&self) -> &'static str {
        if self.wired { "true" } else { "false" }
    }

    /// Label values in [`STATION_LABELS`](super::STATION_LABELS) order.
    pub fn label_values(&self) -> Vec<String> {
        vec![
            self.mac.clone(),
            self.hostname.clone(),
            self.network.clone(),
            self.manufacturer.clone(),
            self.wired_label().to_owned(),
            self.ip.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wired_label_is_lowercase_bool() {
        let mut station = Station::default();
        assert_eq!(station.wired_label(), "false");
        station.wired = true;
        assert_eq!(station.wired_label(), "true");
    }

    #[test]
    fn label_values_follow_declared_order() {
        let station = Station {
            mac: "AA:BB".into(),
            hostname: "h1".into(),
            network: "main".into(),
            manufacturer: "Acme".into(),
            wired: true,
            ip: "10.0.0.5".into(),
            ..Station::default()
        };
        assert_eq!(
            station.label_values(),
            ["AA:BB", "h1", "main", "Acme", "true", "10.0.0.5"]
        );
    }
}
