use thiserror::Error;

/// 送出前的表單驗證錯誤，每一種對應一則不同的提示訊息
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Weight must be greater than 0")]
    InvalidWeight,

    #[error("Repetitions must be greater than 0")]
    InvalidRepetitions,

    #[error("You must be signed in to record weights")]
    MissingUser,

    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    #[error("Audio file is empty")]
    EmptyAudio,
}

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("{message}")]
    RejectedError { message: String },

    #[error("{message}")]
    HistoryError { message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("Not signed in")]
    NotAuthenticated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Network,
    Server,
    Configuration,
    System,
}

impl TrackerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TrackerError::ValidationError(_) | TrackerError::NotAuthenticated => {
                ErrorCategory::Validation
            }
            TrackerError::ApiError(_) => ErrorCategory::Network,
            TrackerError::ServerError { .. }
            | TrackerError::RejectedError { .. }
            | TrackerError::HistoryError { .. } => ErrorCategory::Server,
            TrackerError::ConfigError { .. } | TrackerError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            TrackerError::CsvError(_)
            | TrackerError::IoError(_)
            | TrackerError::SerializationError(_) => ErrorCategory::System,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            TrackerError::ValidationError(e) => e.to_string(),
            TrackerError::NotAuthenticated => {
                "You are not signed in. Run `weight-tracker login <email>` first.".to_string()
            }
            TrackerError::ApiError(e) if e.is_timeout() => {
                "The server took too long to respond".to_string()
            }
            TrackerError::ApiError(e) if e.is_connect() => {
                "Could not reach the server".to_string()
            }
            TrackerError::RejectedError { message } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Validation => 1,
            ErrorCategory::Network | ErrorCategory::Server => 2,
            ErrorCategory::Configuration | ErrorCategory::System => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_are_distinct() {
        let messages = [
            ValidationError::InvalidWeight.to_string(),
            ValidationError::InvalidRepetitions.to_string(),
            ValidationError::MissingUser.to_string(),
        ];
        assert_eq!(messages[0], "Weight must be greater than 0");
        assert_ne!(messages[0], messages[1]);
        assert_ne!(messages[1], messages[2]);
    }

    #[test]
    fn test_exit_codes_follow_category() {
        let validation = TrackerError::from(ValidationError::InvalidWeight);
        assert_eq!(validation.category(), ErrorCategory::Validation);
        assert_eq!(validation.exit_code(), 1);

        let server = TrackerError::ServerError {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(server.exit_code(), 2);
        assert_eq!(server.to_string(), "Server error: 500 - boom");

        let config = TrackerError::ConfigError {
            message: "bad".to_string(),
        };
        assert_eq!(config.exit_code(), 3);
    }

    #[test]
    fn test_rejected_message_is_surfaced_verbatim() {
        let err = TrackerError::RejectedError {
            message: "Duplicate record".to_string(),
        };
        assert_eq!(err.user_friendly_message(), "Duplicate record");
    }
}
