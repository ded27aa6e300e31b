//! In-memory one-shot reminder timers.
//!
//! Spawns a tokio task that periodically checks the pending map and fires
//! due reminders through the [`Notifier`]. At most one pending reminder
//! exists per task id; scheduling again replaces it, firing removes it.
//! Nothing here is persisted — callers re-register from the task store on
//! reload.

use crate::error::AppError;
use crate::notify::Notifier;
use crate::timefmt;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Interval between scheduler ticks. The external contract is minute
/// granularity; the tight tick keeps firing latency within a few seconds.
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// A registered one-shot timer. Discarded after firing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReminder {
    pub task_id: i64,
    pub title: String,
    pub fire_at: NaiveDateTime,
}

type PendingMap = HashMap<i64, PendingReminder>;

/// Owns the pending-reminder table and the background tick loop.
///
/// `schedule` and `cancel` are synchronous and only touch the map; they
/// never wait for a timer to fire. The map lock serializes them against
/// the tick loop, so a cancel or reschedule that lands before a reminder
/// is claimed suppresses the old timer. A reminder already claimed by a
/// tick may still deliver its notification (accepted race), but it can
/// never fire a second time.
pub struct ReminderScheduler {
    pending: Arc<Mutex<PendingMap>>,
    notifier: Arc<dyn Notifier>,
    ticker: Option<JoinHandle<()>>,
}

impl ReminderScheduler {
    /// Start the scheduler on the current tokio runtime.
    pub fn start(notifier: Arc<dyn Notifier>) -> Self {
        let pending = Arc::new(Mutex::new(PendingMap::new()));
        let loop_pending = Arc::clone(&pending);
        let loop_notifier = Arc::clone(&notifier);

        let ticker = tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_INTERVAL);
            loop {
                interval.tick().await;
                fire_due(&loop_pending, loop_notifier.as_ref(), timefmt::now());
            }
        });

        Self {
            pending,
            notifier,
            ticker: Some(ticker),
        }
    }

    /// Register a one-shot timer for `task_id`, replacing any existing one
    /// (the replaced timer can no longer fire). A `reminder_time` that does
    /// not parse leaves prior scheduling state untouched. Times already in
    /// the past fire on the next tick.
    pub fn schedule(&self, task_id: i64, title: &str, reminder_time: &str) -> Result<(), AppError> {
        let fire_at = timefmt::parse(reminder_time)?;
        let reminder = PendingReminder {
            task_id,
            title: title.to_string(),
            fire_at,
        };

        let replaced = lock_pending(&self.pending).insert(task_id, reminder);
        if replaced.is_some() {
            debug!("rescheduled reminder for task {task_id} at {reminder_time}");
        } else {
            debug!("scheduled reminder for task {task_id} at {reminder_time}");
        }
        Ok(())
    }

    /// Remove the timer for `task_id` if one is pending. Cancelling an
    /// absent id is a silent no-op.
    pub fn cancel(&self, task_id: i64) {
        if lock_pending(&self.pending).remove(&task_id).is_some() {
            debug!("cancelled reminder for task {task_id}");
        }
    }

    pub fn pending_len(&self) -> usize {
        lock_pending(&self.pending).len()
    }

    pub fn pending_fire_at(&self, task_id: i64) -> Option<NaiveDateTime> {
        lock_pending(&self.pending)
            .get(&task_id)
            .map(|reminder| reminder.fire_at)
    }

    /// Run one firing pass as if the clock read `now`. The background loop
    /// does the same thing every tick with the real clock.
    pub fn fire_due_at(&self, now: NaiveDateTime) {
        fire_due(&self.pending, self.notifier.as_ref(), now);
    }

    /// Stop the background loop. Pending entries are dropped with the map.
    pub fn shutdown(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn lock_pending(pending: &Mutex<PendingMap>) -> MutexGuard<'_, PendingMap> {
    pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn fire_due(pending: &Mutex<PendingMap>, notifier: &dyn Notifier, now: NaiveDateTime) {
    // Claim due entries under the lock; once removed they can never fire
    // again and a concurrent cancel becomes a no-op.
    let due: Vec<PendingReminder> = {
        let mut guard = lock_pending(pending);
        let due_ids: Vec<i64> = guard
            .values()
            .filter(|reminder| reminder.fire_at <= now)
            .map(|reminder| reminder.task_id)
            .collect();
        due_ids
            .into_iter()
            .filter_map(|task_id| guard.remove(&task_id))
            .collect()
    };

    for reminder in due {
        debug!("firing reminder for task {}", reminder.task_id);
        let title = format!("Reminder: {}", reminder.title);
        if let Err(err) = notifier.notify(&title, "It's time to complete your task!") {
            warn!(
                "notification delivery failed for task {}: {err}",
                reminder.task_id
            );
        }
    }
}
