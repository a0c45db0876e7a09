//! Periodic timer service with RAII cancellation handles.
//!
//! Components register a callback with [`Scheduler::every`] and keep the
//! returned [`TimerHandle`] for as long as they are mounted. Dropping the
//! handle unregisters the timer, so a torn-down component can never be
//! called again, whichever way it was torn down.
//!
//! The scheduler does not own a thread or a clock. The board loop asks it how
//! long to wait ([`Scheduler::time_until_next`]), sleeps using the active time
//! source, then calls [`Scheduler::run_pending`] with the current time. This
//! keeps execution on one thread and lets simulated time drive the timers.
//!
//! Guarantees:
//! - A timer fires at most once per `run_pending` call. Ticks missed while the
//!   process was busy or suspended are coalesced into that single firing.
//! - A callback is checked out of the registry while it runs, so it is never
//!   invoked re-entrantly, even if it calls back into the scheduler.
//! - A timer cancelled from inside its own callback is not fired again.

use chrono::{DateTime, Duration as ChronoDuration, Local};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration as StdDuration;

/// Identifier of a registered timer.
pub type TimerId = u64;

/// Callback invoked with the instant of the tick.
type Callback = Box<dyn FnMut(DateTime<Local>) + Send>;

struct TimerEntry {
    label: String,
    interval: ChronoDuration,
    next_due: DateTime<Local>,
    /// `None` while the callback is running
    callback: Option<Callback>,
}

#[derive(Default)]
struct Registry {
    timers: BTreeMap<TimerId, TimerEntry>,
    next_id: TimerId,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Single-threaded periodic timer service.
#[derive(Clone, Default)]
pub struct Scheduler {
    registry: Arc<Mutex<Registry>>,
}

/// Cancellation handle for a registered timer.
///
/// The timer stays registered exactly as long as the handle is alive.
#[must_use = "dropping a TimerHandle cancels its timer immediately"]
pub struct TimerHandle {
    id: TimerId,
    registry: Weak<Mutex<Registry>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` to run every `interval`, first firing one interval
    /// from the active time source's current time.
    pub fn every<F>(&self, label: &str, interval: StdDuration, callback: F) -> TimerHandle
    where
        F: FnMut(DateTime<Local>) + Send + 'static,
    {
        self.every_from(label, crate::time::source::now(), interval, callback)
    }

    /// Register `callback` to run every `interval`, first firing at
    /// `start + interval`.
    ///
    /// Intervals shorter than one millisecond are raised to one millisecond.
    pub fn every_from<F>(
        &self,
        label: &str,
        start: DateTime<Local>,
        interval: StdDuration,
        callback: F,
    ) -> TimerHandle
    where
        F: FnMut(DateTime<Local>) + Send + 'static,
    {
        let millis = interval.as_millis().clamp(1, i64::MAX as u128) as i64;
        let interval = ChronoDuration::milliseconds(millis);

        let mut registry = lock(&self.registry);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.timers.insert(
            id,
            TimerEntry {
                label: label.to_string(),
                interval,
                next_due: start + interval,
                callback: Some(Box::new(callback)),
            },
        );
        log_debug!("Timer '{}' registered every {}ms", label, millis);

        TimerHandle {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Fire every timer due at `now`, in deadline order.
    ///
    /// Returns the number of callbacks invoked.
    pub fn run_pending(&self, now: DateTime<Local>) -> usize {
        let due: Vec<TimerId> = {
            let registry = lock(&self.registry);
            let mut due: Vec<(DateTime<Local>, TimerId)> = registry
                .timers
                .iter()
                .filter(|(_, entry)| entry.callback.is_some() && entry.next_due <= now)
                .map(|(id, entry)| (entry.next_due, *id))
                .collect();
            due.sort();
            due.into_iter().map(|(_, id)| id).collect()
        };

        let mut fired = 0;
        for id in due {
            // Check the callback out; it may have been cancelled by an earlier one
            let Some(mut callback) = lock(&self.registry)
                .timers
                .get_mut(&id)
                .and_then(|entry| entry.callback.take())
            else {
                continue;
            };

            callback(now);
            fired += 1;

            let mut registry = lock(&self.registry);
            if let Some(entry) = registry.timers.get_mut(&id) {
                entry.callback = Some(callback);
                entry.next_due = next_deadline(entry.next_due, entry.interval, now);
            }
        }
        fired
    }

    /// Time until the earliest registered deadline, zero if one is overdue,
    /// `None` when nothing is registered.
    pub fn time_until_next(&self, now: DateTime<Local>) -> Option<StdDuration> {
        lock(&self.registry)
            .timers
            .values()
            .filter(|entry| entry.callback.is_some())
            .map(|entry| entry.next_due)
            .min()
            .map(|deadline| (deadline - now).to_std().unwrap_or(StdDuration::ZERO))
    }

    /// Number of registered timers.
    pub fn len(&self) -> usize {
        lock(&self.registry).timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Labels of registered timers, in registration order.
    pub fn labels(&self) -> Vec<String> {
        lock(&self.registry)
            .timers
            .values()
            .map(|entry| entry.label.clone())
            .collect()
    }
}

/// Advance `due` by whole intervals until it is after `now`.
fn next_deadline(
    due: DateTime<Local>,
    interval: ChronoDuration,
    now: DateTime<Local>,
) -> DateTime<Local> {
    if due > now {
        return due;
    }
    let interval_ms = interval.num_milliseconds().max(1);
    let behind_ms = (now - due).num_milliseconds();
    let steps = behind_ms / interval_ms + 1;
    due + ChronoDuration::milliseconds(steps * interval_ms)
}

impl TimerHandle {
    /// Whether the timer is still registered with a live scheduler.
    pub fn is_active(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        lock(&registry).timers.contains_key(&self.id)
    }

    /// Cancel the timer now. Equivalent to dropping the handle.
    pub fn cancel(self) {}
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        // Release the lock before the entry (and its callback) is dropped
        let removed = lock(&registry).timers.remove(&self.id);
        if let Some(entry) = removed {
            log_debug!("Timer '{}' cancelled", entry.label);
        }
    }
}
