//! Per-feature output files.
//!
//! Each file writes independently: a failure is logged and the remaining
//! files are still attempted, so one bad path never costs the whole run
//! its results.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use basalt_core::{HostAxis, ResourceAxis};
use tracing::info;

use crate::Pipeline;

pub const HOSTS_FILE: &str = "hosts.txt";
pub const RESOURCES_FILE: &str = "resources.txt";
pub const HOURS_FILE: &str = "hours.txt";
pub const HOURS_NO_OVERLAP_FILE: &str = "hours_no_overlap.txt";
pub const BLOCKED_FILE: &str = "blocked.txt";
pub const MOST_REQUESTED_FILE: &str = "resources_most_requested.txt";
pub const LEAST_REQUESTED_FILE: &str = "resources_least_requested.txt";
pub const SERVER_ERROR_FILE: &str = "server_error.txt";
pub const NOT_FOUND_FILE: &str = "resources_not_found.txt";
pub const DAILY_HITS_FILE: &str = "daily_hits.txt";
pub const DAILY_HOSTS_FILE: &str = "daily_hosts.txt";
pub const HOURLY_HITS_FILE: &str = "hourly_hits.txt";
pub const HOURLY_HOSTS_FILE: &str = "hourly_hosts.txt";

/// Writes every digest under `dir`, creating it if needed.
pub fn write_all(dir: &Path, pipeline: &Pipeline) {
    if let Err(err) = fs::create_dir_all(dir) {
        info!("cannot create output directory {}: {err}", dir.display());
        return;
    }
    let n = pipeline.top_count;

    write_feature(
        dir,
        HOSTS_FILE,
        pipeline
            .hosts
            .top(n, HostAxis::Count)
            .into_iter()
            .map(|(count, host)| format!("{host},{count}")),
    );

    // bandwidth digest lists the resources alone
    write_feature(
        dir,
        RESOURCES_FILE,
        pipeline
            .resources
            .top(n, ResourceAxis::Bandwidth)
            .into_iter()
            .map(|(_, resource)| resource),
    );

    write_feature(
        dir,
        HOURS_FILE,
        pipeline
            .time
            .top()
            .into_iter()
            .map(|(count, start)| format!("{start},{count}")),
    );

    write_feature(
        dir,
        HOURS_NO_OVERLAP_FILE,
        pipeline
            .time
            .top_no_overlap()
            .into_iter()
            .map(|(count, start)| format!("{start},{count}")),
    );

    write_feature(dir, BLOCKED_FILE, pipeline.blocked_lines.iter());

    write_feature(
        dir,
        MOST_REQUESTED_FILE,
        pipeline
            .resources
            .top(n, ResourceAxis::Count)
            .into_iter()
            .map(|(count, resource)| format!("{resource},{}", count as u64)),
    );

    write_feature(
        dir,
        LEAST_REQUESTED_FILE,
        pipeline
            .resources
            .bottom(n, ResourceAxis::Count)
            .into_iter()
            .map(|(count, resource)| format!("{resource},{}", count as u64)),
    );

    write_feature(dir, SERVER_ERROR_FILE, pipeline.server_error_lines.iter());

    write_feature(dir, NOT_FOUND_FILE, pipeline.not_found.iter());

    let activity = pipeline.time.activity();
    write_feature(dir, DAILY_HITS_FILE, count_rows(activity.daily_hits()));
    write_feature(dir, DAILY_HOSTS_FILE, count_rows(activity.daily_hosts()));
    write_feature(dir, HOURLY_HITS_FILE, count_rows(activity.hourly_hits()));
    write_feature(dir, HOURLY_HOSTS_FILE, count_rows(activity.hourly_hosts()));
}

fn count_rows(rows: Vec<(u64, String)>) -> impl Iterator<Item = String> {
    rows.into_iter()
        .map(|(count, period)| format!("{count},{period}"))
}

fn write_feature<I>(dir: &Path, name: &str, lines: I)
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let path = dir.join(name);
    if let Err(err) = write_lines(&path, lines) {
        info!("skipping output file {}: {err}", path.display());
    }
}

fn write_lines<I>(path: &Path, lines: I) -> io::Result<()>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut out = BufWriter::new(File::create(path)?);
    for line in lines {
        out.write_all(line.as_ref().as_bytes())?;
        out.write_all(b"\n")?;
    }
    out.flush()
}
