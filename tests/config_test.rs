use anyhow::Result;
use hotel_booking::domain::model::parse_calendar_date;
use hotel_booking::domain::ports::BookingGatewayClient;
use hotel_booking::utils::validation::Validate;
use hotel_booking::{
    gateway_from_config, BookingConfig, BookingForm, BookingIntent, BookingOutcome, FixedClock,
    TransportStrategy,
};
use tempfile::TempDir;

#[tokio::test]
async fn test_stub_transport_from_config_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("booking.toml");

    let config_content = r#"
[gateway]
endpoint = "https://bookings.example.com/bookapi"
property_id = 4021
access_key = "stub-key"
transport = "stub"

[booking]
max_rooms = 4
"#;
    tokio::fs::write(&config_path, config_content).await?;

    let config = BookingConfig::from_file(&config_path)?;
    config.validate()?;
    assert_eq!(config.gateway.transport, TransportStrategy::Stub);

    let gateway = gateway_from_config(&config.gateway)?;
    let intent = BookingIntent {
        check_in: parse_calendar_date("2026-11-01")?,
        check_out: parse_calendar_date("2026-11-02")?,
        room_count: 1,
    };
    assert_eq!(
        gateway.submit(&intent).await,
        BookingOutcome::Confirmed { redirect_url: None }
    );

    let mut form = BookingForm::with_max_rooms(
        FixedClock::new(parse_calendar_date("2026-10-19")?),
        config.max_rooms(),
    );
    form.set_room_count(5);
    assert!(form.validate().is_err());
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let result = BookingConfig::from_file("/definitely/not/here/booking.toml");
    assert!(matches!(
        result,
        Err(hotel_booking::BookingError::IoError(_))
    ));
}

#[test]
fn test_malformed_toml_is_config_error() {
    let result = BookingConfig::from_toml_str("[gateway\nproperty_id = 1");
    assert!(matches!(
        result,
        Err(hotel_booking::BookingError::ConfigError { .. })
    ));
}
