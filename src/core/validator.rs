use crate::domain::model::{CalendarDate, RoomCountInput};
use crate::domain::ports::Clock;
use crate::utils::error::ValidationError;

pub const DEFAULT_MAX_ROOMS: u32 = 10;

/// 檢查入住／退房日期。過去日期的檢查優先。
pub fn validate_dates(
    check_in: CalendarDate,
    check_out: CalendarDate,
    today: CalendarDate,
) -> Result<(), ValidationError> {
    if check_in < today {
        return Err(ValidationError::CheckInInPast);
    }

    if check_out <= check_in {
        return Err(ValidationError::CheckOutNotAfterCheckIn);
    }

    Ok(())
}

/// Whole-day difference between the two dates. Negative or zero when the
/// range is invalid; callers only display it.
pub fn compute_nights(check_in: CalendarDate, check_out: CalendarDate) -> i64 {
    check_out.signed_duration_since(check_in).num_days()
}

pub fn minimum_check_out(check_in: CalendarDate) -> CalendarDate {
    check_in.succ_opt().unwrap_or(CalendarDate::MAX)
}

pub fn minimum_check_in(clock: &impl Clock) -> CalendarDate {
    clock.today()
}

pub fn validate_room_count(rooms: &RoomCountInput, max_rooms: u32) -> Result<u32, ValidationError> {
    match rooms.count() {
        None | Some(0) => Err(ValidationError::NoRooms),
        Some(n) if n > max_rooms => Err(ValidationError::TooManyRooms { max: max_rooms }),
        Some(n) => Ok(n),
    }
}
