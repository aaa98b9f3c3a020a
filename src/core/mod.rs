pub mod enquiry;
pub mod form;
pub mod response;
pub mod validator;

pub use crate::domain::model::{BookingIntent, BookingOutcome, CalendarDate, RoomCountInput};
pub use crate::domain::ports::{BookingGatewayClient, Clock, NotificationChannel};
pub use crate::utils::error::Result;
