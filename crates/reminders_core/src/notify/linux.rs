use crate::error::AppError;
use crate::notify::Notifier;
use notify_rust::{Notification, Timeout};

/// Keep the toast on screen for ten seconds.
const DISPLAY_MILLIS: u32 = 10_000;

pub struct LinuxNotifier;

impl Notifier for LinuxNotifier {
    fn notify(&self, title: &str, message: &str) -> Result<(), AppError> {
        Notification::new()
            .summary(title)
            .body(message)
            .timeout(Timeout::Milliseconds(DISPLAY_MILLIS))
            .show()
            .map_err(|err| AppError::notification(err.to_string()))?;
        Ok(())
    }
}
