pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{
    clock::{FixedClock, SystemClock},
    email::EmailRelay,
    gateway::HttpGateway,
    gateway_from_config,
    stub::StubGateway,
};
pub use config::toml_config::{BookingConfig, GatewayConfig, NotificationConfig, TransportStrategy};
pub use crate::core::{
    form::{BookingForm, SubmissionState},
    response::{parse_gateway_response, AmbiguousResponsePolicy},
};
pub use domain::model::{BookingIntent, BookingOutcome, CalendarDate, FailureReason};
pub use utils::error::{BookingError, Result, ValidationError};
