use crate::utils::error::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 純日曆日期，不含時間與時區
pub type CalendarDate = NaiveDate;

pub const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Network error: Unable to connect to booking service. Please try again or contact us directly.";
pub const DOMAIN_REJECTED_MESSAGE: &str =
    "Booking service is not available from this site: the booking engine rejected this domain.";
pub const AMBIGUOUS_RESPONSE_MESSAGE: &str =
    "The booking service returned an unrecognised response. Please contact us directly to confirm your booking.";

pub fn parse_calendar_date(value: &str) -> Result<CalendarDate, ValidationError> {
    let trimmed = value.trim();
    // NaiveDate 也接受 "2026-1-5"，這裡只收固定寬度格式
    if trimmed.len() != 10 {
        return Err(ValidationError::InvalidDate {
            value: value.to_string(),
        });
    }
    NaiveDate::parse_from_str(trimmed, CALENDAR_DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidDate {
            value: value.to_string(),
        }
    })
}

pub fn format_calendar_date(date: CalendarDate) -> String {
    date.format(CALENDAR_DATE_FORMAT).to_string()
}

/// A check-in/check-out/room-count tuple that has passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingIntent {
    pub check_in: CalendarDate,
    pub check_out: CalendarDate,
    pub room_count: u32,
}

impl BookingIntent {
    pub fn nights(&self) -> i64 {
        crate::core::validator::compute_nights(self.check_in, self.check_out)
    }
}

/// 房間數欄位的狀態；清空欄位時保留為 Empty 而不是 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoomCountInput {
    #[default]
    Empty,
    Count(u32),
}

impl RoomCountInput {
    /// Applies a raw edit from the rooms field. Returns `false` when the edit
    /// was ignored and the previous value kept.
    pub fn apply_edit(&mut self, raw: &str) -> bool {
        let raw = raw.trim();
        if raw.is_empty() {
            *self = RoomCountInput::Empty;
            return true;
        }
        match leading_integer(raw) {
            Some(n) if n > 0 && n <= u32::MAX as i64 => {
                *self = RoomCountInput::Count(n as u32);
                true
            }
            _ => false,
        }
    }

    pub fn count(&self) -> Option<u32> {
        match self {
            RoomCountInput::Empty => None,
            RoomCountInput::Count(n) => Some(*n),
        }
    }
}

/// 取開頭的整數部分："2abc" -> 2、"3.5" -> 3、"abc" -> None
fn leading_integer(raw: &str) -> Option<i64> {
    let (sign, digits) = if let Some(rest) = raw.strip_prefix('-') {
        (-1, rest)
    } else {
        (1, raw.strip_prefix('+').unwrap_or(raw))
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

impl std::fmt::Display for RoomCountInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoomCountInput::Empty => write!(f, ""),
            RoomCountInput::Count(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    Transport,
    HttpStatus { status: u16 },
    DomainRejected,
    Ambiguous,
}

/// Normalised result of one gateway submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BookingOutcome {
    /// The gateway replied and the reply was read.
    Confirmed { redirect_url: Option<String> },
    /// The request was handed to the gateway; its reply is not observed.
    Dispatched,
    Failed {
        reason: FailureReason,
        message: String,
    },
}

impl BookingOutcome {
    pub fn failed(reason: FailureReason, message: impl Into<String>) -> Self {
        BookingOutcome::Failed {
            reason,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, BookingOutcome::Failed { .. })
    }

    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            BookingOutcome::Confirmed { redirect_url } => redirect_url.as_deref(),
            _ => None,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            BookingOutcome::Confirmed {
                redirect_url: Some(url),
            } => format!("Booking accepted! Continue your reservation at {}", url),
            BookingOutcome::Confirmed { redirect_url: None } => {
                "Booking request submitted successfully.".to_string()
            }
            BookingOutcome::Dispatched => {
                "Booking form submitted! The booking page is opening in a new tab.".to_string()
            }
            BookingOutcome::Failed { message, .. } => message.clone(),
        }
    }
}

/// 送到訂房引擎的欄位，名稱由對方 API 決定
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatewayPayload {
    pub propid: u32,
    pub fromdate: String,
    pub todate: String,
    pub noofrooms: u32,
    pub apikey: String,
}

/// A guest enquiry from the contact form, kept as raw field text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub check_in: String,
    pub check_out: String,
    pub guests: String,
    pub room_type: String,
    pub special_requests: String,
}

/// 郵件樣板參數，鍵名對應 EmailJS 樣板中的變數
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnquiryTemplate {
    pub to_name: String,
    pub to_email: String,
    pub from_name: String,
    pub from_email: String,
    pub reply_to: String,
    pub phone: String,
    pub check_in: String,
    pub check_out: String,
    pub guests: String,
    pub room_type: String,
    pub special_requests: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calendar_date_accepts_only_iso_dates() {
        let date = parse_calendar_date("2026-10-19").unwrap();
        assert_eq!(format_calendar_date(date), "2026-10-19");
        assert!(parse_calendar_date("2026-1-5").is_err());
        assert!(parse_calendar_date("19/10/2026").is_err());
        assert!(parse_calendar_date("").is_err());
        assert!(parse_calendar_date("2026-10-19T10:00:00").is_err());
    }

    #[test]
    fn test_room_count_edits() {
        let mut rooms = RoomCountInput::Count(1);
        assert!(rooms.apply_edit(""));
        assert_eq!(rooms, RoomCountInput::Empty);
        assert!(rooms.apply_edit("3"));
        assert_eq!(rooms.count(), Some(3));
        assert!(!rooms.apply_edit("0"));
        assert!(!rooms.apply_edit("-2"));
        assert!(!rooms.apply_edit("two"));
        assert_eq!(rooms, RoomCountInput::Count(3));
    }

    #[test]
    fn test_room_edit_keeps_leading_digits() {
        let mut rooms = RoomCountInput::Count(1);
        assert!(rooms.apply_edit("2abc"));
        assert_eq!(rooms, RoomCountInput::Count(2));
        assert!(rooms.apply_edit("3.5"));
        assert_eq!(rooms, RoomCountInput::Count(3));
        assert!(rooms.apply_edit("+4"));
        assert_eq!(rooms, RoomCountInput::Count(4));
        assert!(!rooms.apply_edit("-1x"));
        assert!(!rooms.apply_edit(".5"));
        assert_eq!(rooms, RoomCountInput::Count(4));
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let outcome = BookingOutcome::Confirmed {
            redirect_url: Some("https://pay.example/confirm/1".to_string()),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "confirmed");
        assert_eq!(json["redirect_url"], "https://pay.example/confirm/1");

        let failed = BookingOutcome::failed(FailureReason::HttpStatus { status: 503 }, "down");
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["reason"]["kind"], "http_status");
        assert_eq!(json["reason"]["status"], 503);
    }

    #[test]
    fn test_dispatched_is_success_without_redirect() {
        assert!(BookingOutcome::Dispatched.is_success());
        assert_eq!(BookingOutcome::Dispatched.redirect_url(), None);
        assert!(!BookingOutcome::failed(FailureReason::Transport, "x").is_success());
    }
}
