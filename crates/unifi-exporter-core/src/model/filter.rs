// ── Network allow-list ──

use std::collections::BTreeSet;

/// The set of network names whose stations produce metrics.
///
/// Matching is exact and case-sensitive. An empty filter matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkFilter {
    networks: BTreeSet<String>,
}

impl NetworkFilter {
    pub fn new<I, S>(networks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            networks: networks.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether stations on `network` qualify.
    pub fn contains(&self, network: &str) -> bool {
        self.networks.contains(network)
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    /// Configured names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.networks.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for NetworkFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_only() {
        let filter = NetworkFilter::new(["main"]);
        assert!(filter.contains("main"));
        assert!(!filter.contains("Main"));
        assert!(!filter.contains("main-iot"));
        assert!(!filter.contains("mai"));
        assert!(!filter.contains(""));
    }

    #[test]
    fn empty_filter_matches_nothing() {
        let filter = NetworkFilter::default();
        assert!(filter.is_empty());
        assert!(!filter.contains(""));
        assert!(!filter.contains("main"));
    }

    #[test]
    fn empty_string_can_be_configured() {
        let filter: NetworkFilter = ["", "guest"].into_iter().collect();
        assert!(filter.contains(""));
        assert_eq!(filter.iter().collect::<Vec<_>>(), ["", "guest"]);
        assert_eq!(filter.len(), 2);
    }
}
