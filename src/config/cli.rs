use crate::adapters::clock::{FixedClock, SystemClock};
use crate::config::toml_config::BookingConfig;
use crate::config::{CliConfig, EnquiryArgs, StayArgs};
use crate::core::form::BookingForm;
use crate::domain::model::{parse_calendar_date, Enquiry};
use crate::domain::ports::Clock;
use crate::utils::error::Result;

impl CliConfig {
    /// 有 --config 就讀檔，否則讀 SKYHMS_* 環境變數
    pub fn load_booking_config(&self) -> Result<BookingConfig> {
        match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                BookingConfig::from_file(path)
            }
            None => {
                tracing::debug!("No --config given, reading gateway settings from environment");
                BookingConfig::from_env()
            }
        }
    }

    /// Today is read once per invocation.
    pub fn clock(&self) -> Result<FixedClock> {
        let today = match &self.today {
            Some(raw) => parse_calendar_date(raw)?,
            None => SystemClock.today(),
        };
        Ok(FixedClock::new(today))
    }
}

impl StayArgs {
    /// Applies the arguments in the order a guest would edit the fields, so an
    /// explicit check-out wins over the check-in auto-correction.
    pub fn apply_to<C: Clock>(&self, form: &mut BookingForm<C>) -> Result<()> {
        if let Some(check_in) = &self.check_in {
            form.set_check_in_input(check_in)?;
        }
        if let Some(check_out) = &self.check_out {
            form.set_check_out_input(check_out)?;
        }
        if let Some(rooms) = &self.rooms {
            match rooms.trim().parse::<u32>() {
                Ok(n) => form.set_room_count(n),
                // 非數字視同清空，送出時會被擋下
                Err(_) => {
                    form.set_rooms_input("");
                }
            }
        }
        if let Some(room_type) = &self.room_type {
            form.set_room_type(room_type.as_str());
        }
        Ok(())
    }
}

impl From<&EnquiryArgs> for Enquiry {
    fn from(args: &EnquiryArgs) -> Self {
        Enquiry {
            name: args.name.clone(),
            email: args.email.clone(),
            phone: args.phone.clone(),
            check_in: args.check_in.clone(),
            check_out: args.check_out.clone(),
            guests: args.guests.clone(),
            room_type: args.room_type.clone(),
            special_requests: args.special_requests.clone(),
        }
    }
}
