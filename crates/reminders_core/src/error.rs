use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    InvalidTime(String),
    Storage(String),
    Notification(String),
}

impl AppError {
    pub fn validation<M: Into<String>>(message: M) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found<M: Into<String>>(message: M) -> Self {
        Self::NotFound(message.into())
    }

    pub fn invalid_time<M: Into<String>>(message: M) -> Self {
        Self::InvalidTime(message.into())
    }

    pub fn storage<M: Into<String>>(message: M) -> Self {
        Self::Storage(message.into())
    }

    pub fn notification<M: Into<String>>(message: M) -> Self {
        Self::Notification(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound(_) => "not_found",
            Self::InvalidTime(_) => "invalid_time",
            Self::Storage(_) => "storage_error",
            Self::Notification(_) => "notification_error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation(message) => message,
            Self::NotFound(message) => message,
            Self::InvalidTime(message) => message,
            Self::Storage(message) => message,
            Self::Notification(message) => message,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<rusqlite::Error> for AppError {
    fn from(error: rusqlite::Error) -> Self {
        Self::Storage(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn errors_expose_codes() {
        assert_eq!(AppError::validation("x").code(), "validation_error");
        assert_eq!(AppError::not_found("x").code(), "not_found");
        assert_eq!(AppError::invalid_time("x").code(), "invalid_time");
        assert_eq!(AppError::storage("x").code(), "storage_error");
        assert_eq!(AppError::notification("x").code(), "notification_error");
    }

    #[test]
    fn display_includes_code_and_message() {
        let err = AppError::not_found("no task with id 7");
        assert_eq!(err.to_string(), "not_found - no task with id 7");
    }
}
