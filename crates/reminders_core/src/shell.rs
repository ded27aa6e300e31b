//! Glue between the task store and the reminder scheduler.
//!
//! Every mutation goes to the store first, then mirrors the change into
//! the scheduler (schedule, reschedule, or cancel). The two are not
//! transactional together: a task can be saved while its reminder fails to
//! register, and that failure is returned to the caller instead of being
//! swallowed.

use crate::error::AppError;
use crate::model::{Task, TaskDraft};
use crate::scheduler::ReminderScheduler;
use crate::store::TaskStore;
use tracing::info;

pub struct Shell {
    store: TaskStore,
    scheduler: ReminderScheduler,
}

impl Shell {
    pub fn new(store: TaskStore, scheduler: ReminderScheduler) -> Self {
        Self { store, scheduler }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn scheduler(&self) -> &ReminderScheduler {
        &self.scheduler
    }

    /// List every task and (re)register a reminder for each incomplete one
    /// that carries a reminder time. Scheduled reminders do not survive a
    /// restart, so this is a required startup step, and it runs again on
    /// every full reload.
    pub fn reload(&self) -> Result<Vec<Task>, AppError> {
        let tasks = self.store.list()?;

        let mut registered = 0usize;
        for task in &tasks {
            if task.completed {
                continue;
            }
            if let Some(reminder_time) = task.reminder_time.as_deref() {
                self.scheduler
                    .schedule(task.id, &task.title, reminder_time)?;
                registered += 1;
            }
        }

        info!("reloaded {} tasks, {registered} reminders pending", tasks.len());
        Ok(tasks)
    }

    pub fn add_task(&self, draft: &TaskDraft) -> Result<Task, AppError> {
        let task = self.store.create(draft)?;
        if let Some(reminder_time) = task.reminder_time.as_deref() {
            self.scheduler
                .schedule(task.id, &task.title, reminder_time)?;
        }
        Ok(task)
    }

    pub fn update_task(&self, id: i64, draft: &TaskDraft) -> Result<Task, AppError> {
        let task = self.store.update(id, draft)?;
        self.scheduler.cancel(task.id);
        if !task.completed
            && let Some(reminder_time) = task.reminder_time.as_deref()
        {
            self.scheduler
                .schedule(task.id, &task.title, reminder_time)?;
        }
        Ok(task)
    }

    pub fn delete_task(&self, id: i64) -> Result<(), AppError> {
        self.store.delete(id)?;
        self.scheduler.cancel(id);
        Ok(())
    }

    pub fn complete_task(&self, id: i64) -> Result<Task, AppError> {
        let task = self.store.mark_completed(id)?;
        self.scheduler.cancel(id);
        Ok(task)
    }
}
