//! Busiest-period tracking.
//!
//! Every window the queue closes is offered to two trackers of capacity K:
//! one that ranks windows freely, and one whose retained windows must be
//! pairwise disjoint.
//!
//! # The pending slot
//!
//! Completed windows arrive in start order, so a window can only overlap
//! the most recent candidate still undecided. That candidate lives in a
//! single `pending` slot outside the top-K structure: overlapping arrivals
//! compete for the slot (the greater tally wins), and the slot is committed
//! to the disjoint tracker as soon as a non-overlapping window arrives.
//! Nothing inside the tracker is ever mutated in place.

use basalt_events::{LogInstant, Record};
use chrono::Duration;

use crate::activity::PeriodActivity;
use crate::topk::TopK;
use crate::window::{WindowQueue, WindowTally};

/// Busy-window digests plus the day/hour activity tallies, fed one record
/// at a time.
pub struct TimeStats {
    queue: WindowQueue,
    top_overlap: TopK<WindowTally>,
    top_no_overlap: TopK<WindowTally>,
    pending: Option<WindowTally>,
    activity: PeriodActivity,
}

impl TimeStats {
    /// `window_hours` may be fractional; `n_top` bounds both digests.
    pub fn new(window_hours: f64, n_top: usize) -> Self {
        let window = Duration::seconds((window_hours * 3600.0).round() as i64);
        Self {
            queue: WindowQueue::new(window),
            top_overlap: TopK::new(n_top),
            top_no_overlap: TopK::new(n_top),
            pending: None,
            activity: PeriodActivity::new(),
        }
    }

    /// Feeds one record: day/hour tallies first, then the window queue.
    pub fn update(&mut self, record: &Record) {
        self.activity.record(record);
        self.advance(record.time);
    }

    /// Closes every window still in flight by advancing to `last + W`.
    ///
    /// The synthetic instant is bookkeeping only: it drives the queue and
    /// the trackers, never the day/hour tallies, so hit counts stay equal
    /// to the number of records fed in. Call once, after the last record.
    pub fn finalize(&mut self, last: LogInstant) {
        self.advance(last + self.queue.window());
        if let Some(pending) = self.pending.take() {
            self.top_no_overlap.offer(pending);
        }
        self.queue.clear();
    }

    fn advance(&mut self, t: LogInstant) {
        for tally in self.queue.push(t) {
            self.top_overlap.offer(tally);
            self.offer_no_overlap(tally);
        }
    }

    // Tallies arrive in start order; only the pending candidate can still
    // overlap a new one.
    fn offer_no_overlap(&mut self, tally: WindowTally) {
        if let Some(pending) = self.pending {
            if tally.start - self.queue.window() < pending.start {
                // overlapping candidates compete for the single slot
                if tally > pending {
                    self.pending = Some(tally);
                }
                return;
            }
            // the pending window can no longer be overlapped; commit it
            self.top_no_overlap.offer(pending);
            self.pending = None;
        }
        let worth_keeping = !self.top_no_overlap.is_full()
            || self
                .top_no_overlap
                .min()
                .is_some_and(|min| tally > *min);
        if worth_keeping {
            self.pending = Some(tally);
        }
    }

    /// `(count, formatted start)` in descending (count, start) order.
    pub fn top(&self) -> Vec<(u32, String)> {
        self.top_overlap
            .sorted()
            .into_iter()
            .map(|tally| (tally.count, tally.start.to_string()))
            .collect()
    }

    /// Same shape and order as [`top`](Self::top), but the reported
    /// windows are pairwise disjoint.
    pub fn top_no_overlap(&self) -> Vec<(u32, String)> {
        self.top_no_overlap
            .sorted()
            .into_iter()
            .map(|tally| (tally.count, tally.start.to_string()))
            .collect()
    }

    pub fn activity(&self) -> &PeriodActivity {
        &self.activity
    }

    /// Number of events still inside the live window. Zero after
    /// [`finalize`](Self::finalize).
    pub fn in_flight(&self) -> usize {
        self.queue.len()
    }
}
