//! Brute-force login blocking.
//!
//! A host earns a watch entry on its first failed login. Each further
//! failure inside the watch interval burns a chance and the remaining
//! interval shrinks by the time consumed; burning the last chance trades
//! the watch entry for a block entry. While blocked, every record from the
//! host is flagged and the block timer shrinks the same way. Any success
//! or non-login request ends a watch streak; an expired timer ends either
//! state.
//!
//! Timer comparisons are inclusive: a record arriving exactly when the
//! remaining time runs out still counts as inside the interval.

use std::collections::HashMap;

use basalt_events::{LogInstant, Record};

const LOGIN_PATH: &str = "/login";

/// What the blocker knows about one host. A host absent from the map is
/// unknown; the enum keeps a host from ever being watched and blocked at
/// the same time.
#[derive(Clone, Copy, Debug)]
enum HostState {
    /// Counting failed logins inside the watch interval.
    Watching {
        last_seen: LogInstant,
        time_left: i64,
        chances_left: i64,
    },
    /// Every record from the host is flagged until the timer runs dry.
    Blocked { last_seen: LogInstant, time_left: i64 },
}

/// Per-host failed-login state machine.
pub struct BlockedHosts {
    watch_seconds: i64,
    block_seconds: i64,
    chances: i64,
    hosts: HashMap<String, HostState>,
}

impl BlockedHosts {
    pub fn new(watch_seconds: i64, block_seconds: i64, chances: i64) -> Self {
        Self {
            watch_seconds,
            block_seconds,
            chances,
            hosts: HashMap::new(),
        }
    }

    /// Feeds one record; returns whether it should be reported as blocked.
    ///
    /// Only records arriving while the host is already blocked are ever
    /// flagged: the failure that burns the last chance is the trigger, and
    /// the record that outlives the block timer ends the block unflagged
    /// (a fresh failed-login streak starts on a later record).
    pub fn update(&mut self, record: &Record) -> bool {
        let mut flagged = false;
        let next = match self.hosts.remove(&record.host) {
            Some(HostState::Blocked { last_seen, time_left }) => {
                let elapsed = last_seen.seconds_until(record.time);
                if elapsed <= time_left {
                    flagged = true;
                    Some(HostState::Blocked {
                        last_seen: record.time,
                        time_left: time_left - elapsed,
                    })
                } else {
                    None
                }
            }
            Some(HostState::Watching { last_seen, time_left, chances_left }) => {
                if !is_failed_login(record) {
                    None
                } else {
                    let elapsed = last_seen.seconds_until(record.time);
                    if elapsed > time_left {
                        // the watch interval expired before the streak completed
                        None
                    } else if chances_left <= 1 {
                        // `<=`: a config of one (or zero) chances leaves no
                        // countdown to run, so the next failure triggers
                        Some(HostState::Blocked {
                            last_seen: record.time,
                            time_left: self.block_seconds,
                        })
                    } else {
                        Some(HostState::Watching {
                            last_seen: record.time,
                            time_left: time_left - elapsed,
                            chances_left: chances_left - 1,
                        })
                    }
                }
            }
            None => {
                if is_failed_login(record) {
                    Some(HostState::Watching {
                        last_seen: record.time,
                        time_left: self.watch_seconds,
                        chances_left: self.chances - 1,
                    })
                } else {
                    None
                }
            }
        };
        if let Some(state) = next {
            self.hosts.insert(record.host.clone(), state);
        }
        flagged
    }

    /// Hosts with live state, watched or blocked.
    pub fn tracked(&self) -> usize {
        self.hosts.len()
    }
}

fn is_failed_login(record: &Record) -> bool {
    record.request == LOGIN_PATH && record.status == 401
}
