//! Per-host request counters.

use std::collections::HashMap;

use basalt_events::Record;

use crate::topk::{bottom_k, top_k};

/// Ranking axes for the host digests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostAxis {
    /// Number of requests the host made.
    Count,
    /// Total bytes served to the host.
    Size,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HostStats {
    pub count: u64,
    pub bytes: u64,
}

/// Request count and byte totals per host.
#[derive(Debug, Default)]
pub struct HostActivity {
    hosts: HashMap<String, HostStats>,
}

impl HostActivity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, record: &Record) {
        if let Some(stats) = self.hosts.get_mut(&record.host) {
            stats.count += 1;
            stats.bytes += record.size;
        } else {
            self.hosts.insert(
                record.host.clone(),
                HostStats { count: 1, bytes: record.size },
            );
        }
    }

    pub fn get(&self, host: &str, axis: HostAxis) -> Option<u64> {
        self.hosts.get(host).map(|stats| axis_value(stats, axis))
    }

    /// `(value, host)` rows for the `n` greatest hosts on `axis`,
    /// descending. Equal values surface in an unspecified order.
    pub fn top(&self, n: usize, axis: HostAxis) -> Vec<(u64, String)> {
        top_k(n, self.rows(axis))
    }

    /// `(value, host)` rows for the `n` smallest hosts on `axis`,
    /// ascending; equal values order by host name.
    pub fn bottom(&self, n: usize, axis: HostAxis) -> Vec<(u64, String)> {
        bottom_k(n, self.rows(axis))
    }

    fn rows(&self, axis: HostAxis) -> impl Iterator<Item = (u64, String)> + '_ {
        self.hosts
            .iter()
            .map(move |(host, stats)| (axis_value(stats, axis), host.clone()))
    }
}

fn axis_value(stats: &HostStats, axis: HostAxis) -> u64 {
    match axis {
        HostAxis::Count => stats.count,
        HostAxis::Size => stats.bytes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basalt_events::{LogInstant, Method};

    fn record(host: &str, size: u64) -> Record {
        Record {
            host: host.to_string(),
            user: None,
            time: LogInstant::parse("01/Jul/1995:00:00:01 -0400").expect("test instant parses"),
            method: Method::Get,
            request: "/index.html".into(),
            status: 200,
            size,
            tz: "-0400".into(),
        }
    }

    fn populated() -> HostActivity {
        let mut hosts = HostActivity::new();
        for (host, size) in [
            ("A", 1),
            ("A", 2),
            ("A", 2),
            ("B", 20),
            ("B", 3),
            ("C", 2),
            ("C", 2),
            ("D", 2),
            ("E", 33),
            ("F", 2),
        ] {
            hosts.update(&record(host, size));
        }
        hosts
    }

    #[test]
    fn accumulates_count_and_bytes() {
        let hosts = populated();
        assert_eq!(hosts.get("A", HostAxis::Count), Some(3));
        assert_eq!(hosts.get("A", HostAxis::Size), Some(5));
        assert_eq!(hosts.get("unseen", HostAxis::Count), None);
    }

    #[test]
    fn top_by_each_axis() {
        let hosts = populated();
        assert_eq!(hosts.top(1, HostAxis::Count), vec![(3, "A".to_string())]);
        assert_eq!(hosts.top(1, HostAxis::Size), vec![(33, "E".to_string())]);
    }

    #[test]
    fn bottom_orders_ascending_with_key_tiebreak() {
        let hosts = populated();
        // D, E and F tie at one request each; name order decides
        assert_eq!(
            hosts.bottom(2, HostAxis::Count),
            vec![(1, "D".to_string()), (1, "E".to_string())]
        );
    }
}
