use thiserror::Error;

/// 表單層級的驗證錯誤，訊息直接顯示給使用者
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select check-in and check-out dates")]
    MissingDates,

    #[error("Check-in date cannot be in the past")]
    CheckInInPast,

    #[error("Check-out date must be after check-in date")]
    CheckOutNotAfterCheckIn,

    #[error("Please select at least 1 room")]
    NoRooms,

    #[error("You can book at most {max} rooms at once")]
    TooManyRooms { max: u32 },

    #[error("Invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Please fill in the {field} field")]
    MissingField { field: String },

    #[error("'{value}' is not a valid email address")]
    InvalidEmail { value: String },
}

impl ValidationError {
    /// 對應的表單欄位名稱
    pub fn field(&self) -> &str {
        match self {
            ValidationError::MissingDates => "dates",
            ValidationError::CheckInInPast => "check_in",
            ValidationError::CheckOutNotAfterCheckIn => "check_out",
            ValidationError::NoRooms | ValidationError::TooManyRooms { .. } => "rooms",
            ValidationError::InvalidDate { .. } => "date",
            ValidationError::MissingField { field } => field,
            ValidationError::InvalidEmail { .. } => "email",
        }
    }
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Booking engine unreachable: {message}")]
    Unreachable { message: String },

    #[error("Gateway returned HTTP status {status}")]
    HttpStatus { status: u16 },

    #[error("Gateway rejected the request: {message}")]
    GatewayRejected { message: String },

    #[error("Gateway response could not be interpreted")]
    AmbiguousResponse,

    #[error("A booking submission is already in progress")]
    SubmissionInProgress,

    #[error("Notification relay error: {message}")]
    Notification { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Network,
    Gateway,
    Notification,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BookingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BookingError::Validation(_) | BookingError::SubmissionInProgress => {
                ErrorCategory::Validation
            }
            BookingError::Transport(_)
            | BookingError::Unreachable { .. }
            | BookingError::HttpStatus { .. } => ErrorCategory::Network,
            BookingError::GatewayRejected { .. } | BookingError::AmbiguousResponse => {
                ErrorCategory::Gateway
            }
            BookingError::Notification { .. } => ErrorCategory::Notification,
            BookingError::ConfigError { .. }
            | BookingError::InvalidConfigValueError { .. }
            | BookingError::MissingConfigError { .. } => ErrorCategory::Configuration,
            BookingError::IoError(_) | BookingError::SerializationError(_) => {
                ErrorCategory::Internal
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Notification => ErrorSeverity::Medium,
            ErrorCategory::Gateway | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    /// 給使用者看的訊息（不含技術細節）
    pub fn user_friendly_message(&self) -> String {
        match self {
            BookingError::Validation(e) => e.to_string(),
            BookingError::Transport(_)
            | BookingError::Unreachable { .. }
            | BookingError::HttpStatus { .. } => {
                crate::domain::model::TRANSPORT_FAILURE_MESSAGE.to_string()
            }
            BookingError::GatewayRejected { .. } => {
                crate::domain::model::DOMAIN_REJECTED_MESSAGE.to_string()
            }
            BookingError::AmbiguousResponse => {
                crate::domain::model::AMBIGUOUS_RESPONSE_MESSAGE.to_string()
            }
            BookingError::SubmissionInProgress => {
                "Your booking is already being processed.".to_string()
            }
            BookingError::Notification { .. } => {
                "There was an error sending your booking request. Please try again or contact us directly."
                    .to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "Check the entered dates and room count, then try again",
            ErrorCategory::Network => {
                "Check your internet connection and retry, or contact the hotel directly"
            }
            ErrorCategory::Gateway => {
                "The booking engine refused this site; contact the hotel to complete the booking"
            }
            ErrorCategory::Notification => "Verify the email relay settings and retry",
            ErrorCategory::Configuration => {
                "Review the configuration file and required environment variables"
            }
            ErrorCategory::Internal => "Re-run with --verbose and report the log output",
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_low_severity() {
        let err = BookingError::from(ValidationError::NoRooms);
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.user_friendly_message(), "Please select at least 1 room");
    }

    #[test]
    fn test_http_status_uses_generic_network_message() {
        let err = BookingError::HttpStatus { status: 502 };
        assert_eq!(err.category(), ErrorCategory::Network);
        assert!(err.user_friendly_message().starts_with("Network error"));
    }

    #[test]
    fn test_missing_field_reports_its_field() {
        let err = ValidationError::MissingField {
            field: "phone".to_string(),
        };
        assert_eq!(err.field(), "phone");
        assert_eq!(err.to_string(), "Please fill in the phone field");
    }
}
