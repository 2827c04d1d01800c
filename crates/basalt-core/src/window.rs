//! Sliding-window bookkeeping over a stream of non-decreasing instants.
//!
//! # Model
//!
//! A window is the half-open interval `[start, start + W)`; its count is
//! the number of events whose instant falls inside it. The queue holds the
//! events of the window currently in flight. Pushing an event at or beyond
//! `head + W` closes the head window: the head is popped and reported with
//! the number of events that sat in its window at that moment.
//!
//! # Coalescing
//!
//! Several events can share one instant. Popping them one by one would
//! report near-duplicate windows that differ only by the drained copies,
//! so equal heads are drained silently and a single window is reported for
//! the last distinct value, with the drained copies added back into its
//! count (`count = len_after_pop + same_head`).
//!
//! # Invariant
//!
//! On entry to any public operation every queued instant lies within one
//! window-length of the head. The push loop restores it before returning.

use std::collections::VecDeque;

use basalt_events::LogInstant;
use chrono::Duration;

/// A completed window: `count` events fell inside `[start, start + W)`.
///
/// The derived order is lexicographic, count first; on equal counts the
/// later start ranks higher. Both busy-period trackers sort by it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct WindowTally {
    pub count: u32,
    pub start: LogInstant,
}

/// FIFO of the event instants inside the live window.
pub struct WindowQueue {
    window: Duration,
    queue: VecDeque<LogInstant>,
}

impl WindowQueue {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            queue: VecDeque::new(),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Appends `t` and reports every window it closes, oldest first.
    ///
    /// The event just pushed is never popped here; the partial window in
    /// flight is reported only when a later push (or the caller's final
    /// synthetic instant) closes it.
    pub fn push(&mut self, t: LogInstant) -> Vec<WindowTally> {
        self.queue.push_back(t);
        let mut completed = Vec::new();

        let head = match self.queue.front() {
            Some(&head) => head,
            None => return completed,
        };
        // `>=`: an event landing exactly on head + W is outside the
        // half-open window and closes it.
        if t < head + self.window {
            return completed;
        }

        let cutoff = t - self.window;
        let mut same_head = 0u32;
        while self.queue.len() > 1 {
            let head = match self.queue.front() {
                Some(&head) if head <= cutoff => head,
                _ => break,
            };
            self.queue.pop_front();
            let next = *self
                .queue
                .front()
                .expect("an element remains after a len-guarded pop");
            if head == next {
                same_head += 1;
            } else {
                completed.push(WindowTally {
                    count: self.queue.len() as u32 + same_head,
                    start: head,
                });
                same_head = 0;
            }
        }
        completed
    }

    /// Drops everything still queued. Used once the stream is finished and
    /// the caller's synthetic instant has flushed the real events.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hms: &str) -> LogInstant {
        LogInstant::parse(&format!("01/Jul/1995:{hms} -0400")).expect("test instant parses")
    }

    fn one_hour() -> Duration {
        Duration::hours(1)
    }

    #[test]
    fn nothing_completes_inside_the_window() {
        let mut queue = WindowQueue::new(one_hour());
        assert!(queue.push(at("00:00:01")).is_empty());
        assert!(queue.push(at("00:30:00")).is_empty());
        assert!(queue.push(at("00:59:59")).is_empty());
        assert_eq!(queue.len(), 3);
    }

    /// `[start, start + W)` is half-open: an event at exactly start + W
    /// closes the head window rather than joining it.
    #[test]
    fn event_on_the_window_boundary_closes_it() {
        let mut queue = WindowQueue::new(one_hour());
        queue.push(at("00:00:01"));
        let completed = queue.push(at("01:00:01"));
        assert_eq!(
            completed,
            vec![WindowTally { count: 1, start: at("00:00:01") }]
        );
    }

    #[test]
    fn count_is_taken_as_each_head_leaves() {
        let mut queue = WindowQueue::new(one_hour());
        queue.push(at("01:00:03"));
        queue.push(at("01:00:04"));
        queue.push(at("01:00:08"));
        let completed = queue.push(at("02:00:06"));
        assert_eq!(
            completed,
            vec![
                WindowTally { count: 3, start: at("01:00:03") },
                WindowTally { count: 2, start: at("01:00:04") },
            ]
        );
        assert_eq!(queue.len(), 2);
    }

    /// Two events sharing the head instant produce one window, not two,
    /// and the drained copy still counts toward it.
    #[test]
    fn equal_heads_coalesce_into_one_window() {
        let mut queue = WindowQueue::new(one_hour());
        queue.push(at("08:00:11"));
        queue.push(at("08:00:11"));
        queue.push(at("08:00:13"));
        let completed = queue.push(at("09:00:15"));
        assert_eq!(
            completed,
            vec![
                WindowTally { count: 3, start: at("08:00:11") },
                WindowTally { count: 1, start: at("08:00:13") },
            ]
        );
    }

    #[test]
    fn the_newest_event_is_never_popped() {
        let mut queue = WindowQueue::new(one_hour());
        queue.push(at("00:00:01"));
        let completed = queue.push(at("05:00:00"));
        assert_eq!(
            completed,
            vec![WindowTally { count: 1, start: at("00:00:01") }]
        );
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn ordering_prefers_count_then_later_start() {
        let early = WindowTally { count: 3, start: at("01:00:03") };
        let late = WindowTally { count: 3, start: at("08:00:13") };
        let big = WindowTally { count: 5, start: at("00:00:01") };
        assert!(big > late);
        assert!(late > early);
    }
}
