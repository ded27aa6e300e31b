use crate::error::AppError;
use crate::notify::Notifier;
use tauri_winrt_notification::Toast;

pub struct WindowsNotifier;

impl Notifier for WindowsNotifier {
    fn notify(&self, title: &str, message: &str) -> Result<(), AppError> {
        Toast::new(Toast::POWERSHELL_APP_ID)
            .title(title)
            .text1(message)
            .show()
            .map_err(|err| AppError::notification(err.to_string()))?;
        Ok(())
    }
}
