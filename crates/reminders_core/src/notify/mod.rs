use crate::error::AppError;
use std::sync::Arc;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
pub use linux::LinuxNotifier;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::WindowsNotifier;

const DISABLE_ENV_VAR: &str = "REMINDERS_DISABLE_NOTIFICATIONS";

/// Surfaces a message to the user via the operating environment.
/// Fire-and-forget: callers log failures, nothing retries delivery.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, message: &str) -> Result<(), AppError>;
}

pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _title: &str, _message: &str) -> Result<(), AppError> {
        Ok(())
    }
}

/// Pick the platform notifier, falling back to a no-op when notifications
/// are disabled via `REMINDERS_DISABLE_NOTIFICATIONS` or unsupported on
/// this platform.
pub fn notifier_from_env() -> Result<Arc<dyn Notifier>, AppError> {
    if std::env::var(DISABLE_ENV_VAR).is_ok() {
        return Ok(Arc::new(NoopNotifier));
    }

    match platform_notifier() {
        Ok(notifier) => Ok(notifier),
        Err(err) => match err {
            AppError::Notification(_) => Ok(Arc::new(NoopNotifier)),
            other => Err(other),
        },
    }
}

#[cfg(target_os = "linux")]
pub fn platform_notifier() -> Result<Arc<dyn Notifier>, AppError> {
    Ok(Arc::new(LinuxNotifier))
}

#[cfg(windows)]
pub fn platform_notifier() -> Result<Arc<dyn Notifier>, AppError> {
    Ok(Arc::new(WindowsNotifier))
}

#[cfg(not(any(target_os = "linux", windows)))]
pub fn platform_notifier() -> Result<Arc<dyn Notifier>, AppError> {
    Err(AppError::notification(
        "desktop notifications are not supported on this platform",
    ))
}

#[cfg(test)]
mod tests {
    use super::{NoopNotifier, Notifier};

    #[test]
    fn noop_notifier_always_succeeds() {
        let notifier = NoopNotifier;
        assert!(notifier.notify("Reminder: x", "message").is_ok());
    }
}
