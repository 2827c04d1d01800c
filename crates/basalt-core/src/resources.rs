//! Per-resource request counters.

use std::cmp::Ordering;
use std::collections::HashMap;

use basalt_events::Record;

use crate::topk::{bottom_k, top_k};

/// Ranking axes for the resource digests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceAxis {
    /// Number of requests for the resource.
    Count,
    /// Mean bytes per request.
    Size,
    /// Total bytes served for the resource.
    Bandwidth,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ResourceStats {
    pub count: u64,
    pub mean_size: f64,
    pub bytes: u64,
}

// Digest row with a total order: axis value first, resource name breaking
// ties. `total_cmp` makes the f64 axis usable in the heap.
#[derive(Debug, PartialEq)]
struct Ranked {
    value: f64,
    key: String,
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .total_cmp(&other.value)
            .then_with(|| self.key.cmp(&other.key))
    }
}

/// Request count, running mean size and byte totals per resource path.
/// The bare root path is ignored.
#[derive(Debug, Default)]
pub struct ResourceActivity {
    resources: HashMap<String, ResourceStats>,
}

const ROOT_PATH: &str = "/";

impl ResourceActivity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, record: &Record) {
        if record.request == ROOT_PATH {
            return;
        }
        if let Some(stats) = self.resources.get_mut(&record.request) {
            stats.count += 1;
            stats.bytes += record.size;
            stats.mean_size = stats.bytes as f64 / stats.count as f64;
        } else {
            self.resources.insert(
                record.request.clone(),
                ResourceStats {
                    count: 1,
                    mean_size: record.size as f64,
                    bytes: record.size,
                },
            );
        }
    }

    pub fn get(&self, resource: &str, axis: ResourceAxis) -> Option<f64> {
        self.resources
            .get(resource)
            .map(|stats| axis_value(stats, axis))
    }

    /// `(value, resource)` rows for the `n` greatest resources on `axis`,
    /// descending. Equal values surface in an unspecified order.
    pub fn top(&self, n: usize, axis: ResourceAxis) -> Vec<(f64, String)> {
        unpack(top_k(n, self.rows(axis)))
    }

    /// `(value, resource)` rows for the `n` smallest resources on `axis`,
    /// ascending; equal values order by resource path.
    pub fn bottom(&self, n: usize, axis: ResourceAxis) -> Vec<(f64, String)> {
        unpack(bottom_k(n, self.rows(axis)))
    }

    fn rows(&self, axis: ResourceAxis) -> impl Iterator<Item = Ranked> + '_ {
        self.resources.iter().map(move |(key, stats)| Ranked {
            value: axis_value(stats, axis),
            key: key.clone(),
        })
    }
}

fn axis_value(stats: &ResourceStats, axis: ResourceAxis) -> f64 {
    match axis {
        ResourceAxis::Count => stats.count as f64,
        ResourceAxis::Size => stats.mean_size,
        ResourceAxis::Bandwidth => stats.bytes as f64,
    }
}

fn unpack(rows: Vec<Ranked>) -> Vec<(f64, String)> {
    rows.into_iter().map(|row| (row.value, row.key)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use basalt_events::{LogInstant, Method};

    fn record(request: &str, size: u64) -> Record {
        Record {
            host: "remote.host".into(),
            user: None,
            time: LogInstant::parse("01/Jul/1995:00:00:01 -0400").expect("test instant parses"),
            method: Method::Get,
            request: request.to_string(),
            status: 200,
            size,
            tz: "-0400".into(),
        }
    }

    fn populated() -> ResourceActivity {
        let mut resources = ResourceActivity::new();
        for (request, size) in [
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
            resources.update(&record(request, size));
        }
        resources
    }

    #[test]
    fn accumulates_count_mean_and_bytes() {
        let resources = populated();
        assert_eq!(resources.get("A", ResourceAxis::Count), Some(3.0));
        assert_eq!(resources.get("A", ResourceAxis::Size), Some(5.0 / 3.0));
        assert_eq!(resources.get("A", ResourceAxis::Bandwidth), Some(5.0));
    }

    #[test]
    fn the_root_path_is_never_counted() {
        let mut resources = ResourceActivity::new();
        resources.update(&record("/", 100));
        resources.update(&record("/index.html", 100));
        assert_eq!(resources.get("/", ResourceAxis::Count), None);
        assert_eq!(resources.get("/index.html", ResourceAxis::Count), Some(1.0));
    }

    #[test]
    fn top_by_each_axis() {
        let resources = populated();
        assert_eq!(
            resources.top(2, ResourceAxis::Count),
            vec![(3.0, "A".to_string()), (2.0, "C".to_string())]
        );
        assert_eq!(
            resources.top(2, ResourceAxis::Bandwidth),
            vec![(33.0, "E".to_string()), (23.0, "B".to_string())]
        );
        assert_eq!(
            resources.top(2, ResourceAxis::Size),
            vec![(33.0, "E".to_string()), (11.5, "B".to_string())]
        );
    }

    #[test]
    fn bottom_by_mean_size_breaks_ties_by_path() {
        let resources = populated();
        assert_eq!(
            resources.bottom(2, ResourceAxis::Size),
            vec![(5.0 / 3.0, "A".to_string()), (2.0, "C".to_string())]
        );
    }
}
