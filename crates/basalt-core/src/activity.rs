//! Hit counts and distinct-host sets bucketed by calendar day and by hour
//! of day.

use std::collections::{HashMap, HashSet};

use basalt_events::Record;
use chrono::NaiveDate;

#[derive(Debug, Default)]
struct Bucket {
    hits: u64,
    hosts: HashSet<String>,
}

impl Bucket {
    fn record(&mut self, host: &str) {
        self.hits += 1;
        if !self.hosts.contains(host) {
            self.hosts.insert(host.to_string());
        }
    }
}

/// Per-day and per-hour activity tallies. Each accepted record counts
/// exactly once per axis; digest iteration order is unspecified.
#[derive(Debug, Default)]
pub struct PeriodActivity {
    daily: HashMap<NaiveDate, Bucket>,
    hourly: HashMap<u32, Bucket>,
}

impl PeriodActivity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: &Record) {
        self.daily
            .entry(record.time.date())
            .or_default()
            .record(&record.host);
        self.hourly
            .entry(record.time.hour())
            .or_default()
            .record(&record.host);
    }

    /// `(hits, DD/Mon/YYYY)` per day seen.
    pub fn daily_hits(&self) -> Vec<(u64, String)> {
        self.daily
            .iter()
            .map(|(day, bucket)| (bucket.hits, format_day(day)))
            .collect()
    }

    /// `(distinct hosts, DD/Mon/YYYY)` per day seen.
    pub fn daily_hosts(&self) -> Vec<(u64, String)> {
        self.daily
            .iter()
            .map(|(day, bucket)| (bucket.hosts.len() as u64, format_day(day)))
            .collect()
    }

    /// `(hits, HH:00:00)` per hour of day seen.
    pub fn hourly_hits(&self) -> Vec<(u64, String)> {
        self.hourly
            .iter()
            .map(|(hour, bucket)| (bucket.hits, format_hour(*hour)))
            .collect()
    }

    /// `(distinct hosts, HH:00:00)` per hour of day seen.
    pub fn hourly_hosts(&self) -> Vec<(u64, String)> {
        self.hourly
            .iter()
            .map(|(hour, bucket)| (bucket.hosts.len() as u64, format_hour(*hour)))
            .collect()
    }

    /// Total hits across all days; equals the number of records fed in.
    pub fn total_hits(&self) -> u64 {
        self.daily.values().map(|bucket| bucket.hits).sum()
    }
}

fn format_day(day: &NaiveDate) -> String {
    day.format("%d/%b/%Y").to_string()
}

fn format_hour(hour: u32) -> String {
    format!("{hour:02}:00:00")
}
