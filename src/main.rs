use clap::Parser;
use hotel_booking::adapters::gateway::error_for_outcome;
use hotel_booking::config::Command;
use hotel_booking::core::enquiry::send_enquiry;
use hotel_booking::domain::model::{format_calendar_date, Enquiry};
use hotel_booking::utils::error::ErrorSeverity;
use hotel_booking::utils::{logger, validation::Validate};
use hotel_booking::{
    gateway_from_config, AmbiguousResponsePolicy, BookingForm, BookingError, CliConfig,
    EmailRelay, Result,
};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting hotel-booking CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4,      // 輸入被拒
            ErrorSeverity::Medium => 2,   // 可重試
            ErrorSeverity::High => 1,     // 設定或對方拒絕
            ErrorSeverity::Critical => 3, // 系統錯誤
        };
        std::process::exit(exit_code);
    }
}

async fn run(config: &CliConfig) -> Result<()> {
    let clock = config.clock()?;

    match &config.command {
        Command::Quote(stay) => {
            let mut form = BookingForm::new(clock);
            stay.apply_to(&mut form)?;

            println!("Earliest check-in:  {}", format_calendar_date(form.min_check_in()));
            if let Some(min_check_out) = form.min_check_out() {
                println!("Earliest check-out: {}", format_calendar_date(min_check_out));
            }
            if let Some(summary) = form.summary() {
                println!("Stay: {}", summary);
            }
            match form.validate() {
                Ok(_) => println!("✅ Ready to book"),
                Err(e) => println!("⚠️ {}", e),
            }
            Ok(())
        }
        Command::Book {
            stay,
            transport,
            assume_failure,
        } => {
            let mut booking_config = config.load_booking_config()?;
            if let Some(transport) = transport {
                booking_config.gateway.transport = *transport;
            }
            if *assume_failure {
                booking_config.gateway.on_ambiguous_response =
                    AmbiguousResponsePolicy::AssumeFailure;
            }

            if let Err(e) = booking_config.validate() {
                tracing::error!("❌ Configuration validation failed: {}", e);
                return Err(e);
            }

            let gateway = gateway_from_config(&booking_config.gateway)?;
            let mut form = BookingForm::with_max_rooms(clock, booking_config.max_rooms());
            form.open();
            stay.apply_to(&mut form)?;

            let outcome = form.submit(gateway.as_ref()).await?;
            match error_for_outcome(&outcome) {
                Some(err) => Err(err),
                None => {
                    println!("✅ {}", outcome.user_message());
                    if let Some(url) = outcome.redirect_url() {
                        println!("🔗 {}", url);
                    }
                    Ok(())
                }
            }
        }
        Command::Enquire(args) => {
            let booking_config = config.load_booking_config()?;
            let notification = booking_config.notification()?.clone();
            notification.validate()?;

            let relay = EmailRelay::new(notification)?;
            let enquiry = Enquiry::from(args);
            send_enquiry(&relay, &enquiry, &relay.recipient())
                .await
                .map_err(|e| {
                    if let BookingError::Notification { message } = &e {
                        tracing::error!("✉️ Relay failure detail: {}", message);
                    }
                    e
                })?;

            println!("✅ Booking Request Submitted Successfully!");
            println!("We've received your booking request and will contact you soon to confirm your reservation.");
            Ok(())
        }
    }
}
