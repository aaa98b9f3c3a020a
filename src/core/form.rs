use crate::core::validator::{
    compute_nights, minimum_check_in, minimum_check_out, validate_dates, validate_room_count,
    DEFAULT_MAX_ROOMS,
};
use crate::domain::model::{
    format_calendar_date, parse_calendar_date, BookingIntent, BookingOutcome, CalendarDate,
    RoomCountInput,
};
use crate::domain::ports::{BookingGatewayClient, Clock};
use crate::utils::error::{BookingError, Result, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Settled(BookingOutcome),
}

/// 訂房摘要，兩個日期都有值時才顯示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSummary {
    pub check_in: CalendarDate,
    pub check_out: CalendarDate,
    pub nights: i64,
    pub rooms: u32,
    pub room_type: Option<String>,
}

impl std::fmt::Display for BookingSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {}: {} night(s), {} room(s)",
            format_calendar_date(self.check_in),
            format_calendar_date(self.check_out),
            self.nights,
            self.rooms
        )?;
        if let Some(room_type) = &self.room_type {
            write!(f, " - {}", room_type)?;
        }
        Ok(())
    }
}

/// State of one booking dialog: the fields being edited plus the
/// `Idle -> Submitting -> Settled` lifecycle around a single gateway call.
pub struct BookingForm<C: Clock> {
    clock: C,
    max_rooms: u32,
    check_in: Option<CalendarDate>,
    check_out: Option<CalendarDate>,
    rooms: RoomCountInput,
    room_type: Option<String>,
    state: SubmissionState,
    open: bool,
    message: Option<String>,
}

impl<C: Clock> BookingForm<C> {
    pub fn new(clock: C) -> Self {
        Self::with_max_rooms(clock, DEFAULT_MAX_ROOMS)
    }

    pub fn with_max_rooms(clock: C, max_rooms: u32) -> Self {
        let mut form = Self {
            clock,
            max_rooms,
            check_in: None,
            check_out: None,
            rooms: RoomCountInput::Count(1),
            room_type: None,
            state: SubmissionState::Idle,
            open: false,
            message: None,
        };
        form.reset_fields();
        form
    }

    fn reset_fields(&mut self) {
        let today = self.clock.today();
        self.check_in = Some(today);
        self.check_out = Some(minimum_check_out(today));
        self.rooms = RoomCountInput::Count(1);
    }

    pub fn open(&mut self) {
        if matches!(self.state, SubmissionState::Settled(_)) {
            self.state = SubmissionState::Idle;
        }
        self.open = true;
    }

    /// 關閉對話框不會取消送出中的請求
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, SubmissionState::Submitting)
    }

    /// Last validation or failure message shown to the guest.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn check_in(&self) -> Option<CalendarDate> {
        self.check_in
    }

    pub fn check_out(&self) -> Option<CalendarDate> {
        self.check_out
    }

    pub fn rooms(&self) -> RoomCountInput {
        self.rooms
    }

    /// 從房型卡片開啟時帶入的房型，只用於顯示，重設欄位時保留
    pub fn set_room_type(&mut self, room_type: impl Into<String>) {
        self.room_type = Some(room_type.into());
    }

    pub fn room_type(&self) -> Option<&str> {
        self.room_type.as_deref()
    }

    /// Moves check-in. When it lands on or after check-out, check-out is
    /// pushed to the day after the new check-in.
    pub fn set_check_in(&mut self, date: CalendarDate) {
        self.check_in = Some(date);
        if let Some(check_out) = self.check_out {
            if date >= check_out {
                let corrected = minimum_check_out(date);
                tracing::debug!(
                    "📅 Check-out moved from {} to {}",
                    format_calendar_date(check_out),
                    format_calendar_date(corrected)
                );
                self.check_out = Some(corrected);
            }
        }
    }

    pub fn set_check_out(&mut self, date: CalendarDate) {
        self.check_out = Some(date);
    }

    /// 日期欄位的原始輸入；空字串代表清空
    pub fn set_check_in_input(&mut self, raw: &str) -> std::result::Result<(), ValidationError> {
        if raw.trim().is_empty() {
            self.check_in = None;
            return Ok(());
        }
        let date = parse_calendar_date(raw)?;
        self.set_check_in(date);
        Ok(())
    }

    pub fn set_check_out_input(&mut self, raw: &str) -> std::result::Result<(), ValidationError> {
        if raw.trim().is_empty() {
            self.check_out = None;
            return Ok(());
        }
        let date = parse_calendar_date(raw)?;
        self.set_check_out(date);
        Ok(())
    }

    /// Raw edit of the rooms field. Returns `false` when the edit was ignored.
    pub fn set_rooms_input(&mut self, raw: &str) -> bool {
        self.rooms.apply_edit(raw)
    }

    pub fn set_room_count(&mut self, rooms: u32) {
        self.rooms = RoomCountInput::Count(rooms);
    }

    pub fn min_check_in(&self) -> CalendarDate {
        minimum_check_in(&self.clock)
    }

    pub fn min_check_out(&self) -> Option<CalendarDate> {
        self.check_in.map(minimum_check_out)
    }

    pub fn nights(&self) -> Option<i64> {
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => Some(compute_nights(check_in, check_out)),
            _ => None,
        }
    }

    pub fn summary(&self) -> Option<BookingSummary> {
        let (check_in, check_out) = (self.check_in?, self.check_out?);
        Some(BookingSummary {
            check_in,
            check_out,
            nights: compute_nights(check_in, check_out),
            rooms: self.rooms.count().unwrap_or(0),
            room_type: self.room_type.clone(),
        })
    }

    pub fn validate(&self) -> std::result::Result<BookingIntent, ValidationError> {
        let (check_in, check_out) = match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => (check_in, check_out),
            _ => return Err(ValidationError::MissingDates),
        };
        let room_count = validate_room_count(&self.rooms, self.max_rooms)?;
        validate_dates(check_in, check_out, self.clock.today())?;

        Ok(BookingIntent {
            check_in,
            check_out,
            room_count,
        })
    }

    /// Enters `Submitting` when the fields are valid. Invalid input leaves the
    /// form `Idle` with the message recorded.
    pub fn begin_submission(&mut self) -> Result<BookingIntent> {
        if self.is_submitting() {
            return Err(BookingError::SubmissionInProgress);
        }

        match self.validate() {
            Ok(intent) => {
                self.message = None;
                self.state = SubmissionState::Submitting;
                Ok(intent)
            }
            Err(e) => {
                tracing::debug!("📝 Booking form invalid ({}): {}", e.field(), e);
                self.message = Some(e.to_string());
                self.state = SubmissionState::Idle;
                Err(e.into())
            }
        }
    }

    /// Records the gateway outcome. Only a form in `Submitting` can settle;
    /// otherwise the outcome is dropped and `false` returned.
    pub fn settle(&mut self, outcome: BookingOutcome) -> bool {
        if !self.is_submitting() {
            tracing::warn!("⚠️ Ignoring booking outcome outside of a submission: {:?}", outcome);
            return false;
        }

        if outcome.is_success() {
            self.reset_fields();
            self.open = false;
            self.message = None;
        } else {
            self.message = Some(outcome.user_message());
        }
        self.state = SubmissionState::Settled(outcome);
        true
    }

    /// Validates, sends exactly one request through `gateway` and settles the
    /// form with its outcome. No retry.
    pub async fn submit(&mut self, gateway: &dyn BookingGatewayClient) -> Result<BookingOutcome> {
        let intent = self.begin_submission()?;

        tracing::info!(
            "🏨 Submitting booking: {} -> {} ({} night(s), {} room(s))",
            format_calendar_date(intent.check_in),
            format_calendar_date(intent.check_out),
            intent.nights(),
            intent.room_count
        );

        let outcome = gateway.submit(&intent).await;
        match &outcome {
            BookingOutcome::Failed { reason, message } => {
                tracing::error!("❌ Booking failed ({:?}): {}", reason, message)
            }
            other => tracing::info!("✅ Booking settled: {}", other.user_message()),
        }

        self.settle(outcome.clone());
        Ok(outcome)
    }
}
