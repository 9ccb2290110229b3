//! Virtual-time timer queue.
//!
//! The host advances time explicitly; timers fire in order of due time, ties
//! broken by the order they were scheduled in.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::constants::MIN_TIMER_PERIOD;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy)]
struct Timer {
    due: Duration,
    period: Option<Duration>, // None for one-shot timers
}

#[derive(Debug, Default)]
pub struct Timeline {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<TimerId, Timer>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Repeating timer. First fires `first_delay` from now, then every `period`.
    pub fn set_interval(&mut self, first_delay: Duration, period: Duration) -> TimerId {
        self.schedule(first_delay, Some(period.max(MIN_TIMER_PERIOD)))
    }

    pub fn set_timeout(&mut self, delay: Duration) -> TimerId {
        self.schedule(delay, None)
    }

    /// Returns whether the timer was still scheduled. Clearing twice is harmless.
    pub fn clear(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    #[must_use]
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Fire the earliest timer due at or before `until`, moving the clock to
    /// its due time. Repeating timers are rescheduled, one-shots removed.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerId> {
        let (id, timer) = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.due <= until)
            .min_by_key(|(id, timer)| (timer.due, **id))
            .map(|(id, timer)| (*id, *timer))?;

        self.now = self.now.max(timer.due);
        match timer.period {
            Some(period) => {
                if let Some(entry) = self.timers.get_mut(&id) {
                    entry.due = timer.due + period;
                }
            }
            None => {
                self.timers.remove(&id);
            }
        }
        Some(id)
    }

    /// Push a repeating timer past `until`, dropping the periods it would
    /// otherwise replay. Returns how many were dropped.
    pub fn skip_missed(&mut self, id: TimerId, until: Duration) -> u32 {
        let Some(timer) = self.timers.get_mut(&id) else {
            return 0;
        };
        let Some(period) = timer.period else {
            return 0;
        };
        if timer.due > until {
            return 0;
        }

        let missed = (until - timer.due).as_nanos() / period.as_nanos() + 1;
        let missed = u32::try_from(missed).unwrap_or(u32::MAX);
        timer.due = timer.due.saturating_add(period.saturating_mul(missed));
        missed
    }

    /// Move the clock forward once every due timer has been popped.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    fn schedule(&mut self, delay: Duration, period: Option<Duration>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(id, Timer { due: self.now + delay, period });
        id
    }
}
