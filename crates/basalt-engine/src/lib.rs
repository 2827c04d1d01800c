//! The single-pass driver.
//!
//! One `Pipeline` owns every analyzer. Each input line is parsed once and
//! the record visits every analyzer, in a fixed order, before the next
//! line is read; a line that fails to parse is logged and costs nothing.
//! `finish` closes the windows still in flight, and [`report::write_all`]
//! serializes the digests.

use std::collections::BTreeSet;

use basalt_config::AnalyzeConfig;
use basalt_core::{BlockedHosts, HostActivity, ResourceActivity, TimeStats};
use basalt_events::{LogInstant, Record};
use basalt_util::parse_line;
use tracing::warn;

pub mod report;

pub struct Pipeline {
    pub hosts: HostActivity,
    pub resources: ResourceActivity,
    pub time: TimeStats,
    pub blocker: BlockedHosts,

    /// Input lines flagged by the blocker, verbatim, in input order.
    pub blocked_lines: Vec<String>,
    /// Input lines with a 5xx status, verbatim, in input order.
    pub server_error_lines: Vec<String>,
    /// Distinct request paths that answered 404.
    pub not_found: BTreeSet<String>,

    pub accepted: u64,
    pub skipped: u64,
    pub top_count: usize,

    last_seen: Option<LogInstant>,
}

impl Pipeline {
    pub fn new(config: &AnalyzeConfig) -> Self {
        Self {
            hosts: HostActivity::new(),
            resources: ResourceActivity::new(),
            time: TimeStats::new(config.window_hours, config.top_count),
            blocker: BlockedHosts::new(
                config.blocker.watch_seconds,
                config.blocker.block_seconds,
                config.blocker.chances,
            ),
            blocked_lines: Vec::new(),
            server_error_lines: Vec::new(),
            not_found: BTreeSet::new(),
            accepted: 0,
            skipped: 0,
            top_count: config.top_count,
            last_seen: None,
        }
    }

    /// Parses and applies one input line. A malformed line is dropped with
    /// a warning and no analyzer sees it.
    pub fn feed_line(&mut self, line: &str) {
        match parse_line(line) {
            Ok(record) => self.apply(&record, line),
            Err(err) => {
                self.skipped += 1;
                warn!("skipping line ({err}): {line}");
            }
        }
    }

    fn apply(&mut self, record: &Record, raw: &str) {
        self.hosts.update(record);
        self.resources.update(record);
        self.time.update(record);
        if self.blocker.update(record) {
            self.blocked_lines.push(raw.to_string());
        }

        if record.is_not_found() {
            self.not_found.insert(record.request.clone());
        }
        if record.is_server_error() {
            self.server_error_lines.push(raw.to_string());
        }

        self.last_seen = Some(record.time);
        self.accepted += 1;
    }

    /// Closes the windows still in flight. Call once, after the last line.
    pub fn finish(&mut self) {
        if let Some(last) = self.last_seen {
            self.time.finalize(last);
        }
    }
}
